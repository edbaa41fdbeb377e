//! CLI binary for the boot-metadata crate.

use std::process::ExitCode;

use boot_metadata::{run, MetadataError, Report, RunConfig};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Takes no options; attributes are added through `GCP_*` and `AWS_*`
/// environment variables of the form `key,file,mode`.
#[derive(Parser)]
#[command(name = "boot-metadata")]
#[command(
    version,
    about = "Write GCP and AWS instance metadata to files under /run/config"
)]
struct Cli {}

fn setup_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .without_time()
                .with_writer(std::io::stdout),
        )
        .with(filter)
        .init();
}

/// Exit status for a finished run: 0 once the pass completed, however many
/// attributes failed, and 1 if the configuration root could not be prepared.
fn exit_status(result: &Result<Report, MetadataError>) -> u8 {
    match result {
        Ok(report) => {
            info!(
                "{} of {} attributes written",
                report.succeeded(),
                report.outcomes.len()
            );
            0
        }
        Err(e) => {
            eprintln!("error: {}", e);
            1
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let _cli = Cli::parse();
    setup_logging();

    let result = run(&RunConfig::default()).await;
    ExitCode::from(exit_status(&result))
}

#[cfg(test)]
mod tests {
    use std::io;
    use std::path::PathBuf;

    use boot_metadata::{Attribute, AttributeOutcome, CloudProvider};

    use super::*;

    #[test]
    fn test_setup_failure_exits_non_zero() {
        let result = Err(MetadataError::Setup {
            path: PathBuf::from("/run/config"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        });
        assert_eq!(exit_status(&result), 1);
    }

    #[test]
    fn test_attribute_failures_exit_zero() {
        let report = Report {
            outcomes: vec![AttributeOutcome {
                provider: CloudProvider::Gcp,
                attribute: Attribute::new("hostname", "hostname", 0o644),
                result: Err(MetadataError::UnexpectedStatus(404)),
            }],
        };
        assert_eq!(exit_status(&Ok(report)), 0);
    }

    #[test]
    fn test_cli_rejects_arguments() {
        assert!(Cli::try_parse_from(["boot-metadata"]).is_ok());
        assert!(Cli::try_parse_from(["boot-metadata", "--root", "/tmp"]).is_err());
    }
}

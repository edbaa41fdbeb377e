//! The single fetch-and-write pass over every provider.

use std::env;
use std::path::{Path, PathBuf};

use tokio::fs::DirBuilder;
use tracing::{debug, error, info};

use crate::client::{MetadataClient, DEFAULT_METADATA_URL};
use crate::error::MetadataError;
use crate::materialize::materialize;
use crate::provider::{Attribute, CloudProvider, Provider};
use crate::providers;
use crate::registry::{environment_snapshot, resolve_attributes};

/// Directory all output files are written under.
pub const CONFIG_ROOT: &str = "/run/config";

/// Mode of the configuration root when it has to be created.
pub const CONFIG_ROOT_MODE: u32 = 0o755;

/// Where a run writes and which metadata service it talks to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    pub config_root: PathBuf,
    pub metadata_url: String,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            config_root: PathBuf::from(CONFIG_ROOT),
            metadata_url: DEFAULT_METADATA_URL.to_string(),
        }
    }
}

/// Result of one attribute's fetch and write.
#[derive(Debug)]
pub struct AttributeOutcome {
    pub provider: CloudProvider,
    pub attribute: Attribute,
    pub result: Result<(), MetadataError>,
}

/// Every attribute attempted during a run, in order.
#[derive(Debug, Default)]
pub struct Report {
    pub outcomes: Vec<AttributeOutcome>,
}

impl Report {
    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.result.is_ok()).count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.succeeded()
    }
}

/// Run the pass against the current process environment.
pub async fn run(config: &RunConfig) -> Result<Report, MetadataError> {
    run_with_environment(config, &environment_snapshot()).await
}

/// Run the pass with an explicit environment snapshot.
///
/// Only failing to prepare the configuration root (or to build the HTTP
/// client) is an error; per-attribute failures are logged and recorded in
/// the returned [`Report`].
///
/// The process working directory is changed to the configuration root.
pub async fn run_with_environment(
    config: &RunConfig,
    vars: &[(String, String)],
) -> Result<Report, MetadataError> {
    prepare_config_root(&config.config_root).await?;
    let client = MetadataClient::with_default_timeout()?;

    let mut report = Report::default();
    for provider in providers::builtin() {
        let attributes = resolve_attributes(&provider, vars);
        let base_url = provider.base_url(&config.metadata_url);
        for attribute in attributes {
            let result = fetch_attribute(&client, &provider, &base_url, &attribute).await;
            if let Err(e) = &result {
                error!(
                    "{}: GET {base_url}{} -> {}: {e}",
                    provider.kind, attribute.key, attribute.file
                );
            }
            report.outcomes.push(AttributeOutcome {
                provider: provider.kind,
                attribute,
                result,
            });
        }
        debug!(provider = %provider.kind, "provider done");
    }

    Ok(report)
}

async fn prepare_config_root(root: &Path) -> Result<(), MetadataError> {
    let setup_err = |source| MetadataError::Setup {
        path: root.to_path_buf(),
        source,
    };

    DirBuilder::new()
        .recursive(true)
        .mode(CONFIG_ROOT_MODE)
        .create(root)
        .await
        .map_err(setup_err)?;
    env::set_current_dir(root).map_err(setup_err)
}

async fn fetch_attribute(
    client: &MetadataClient,
    provider: &Provider,
    base_url: &str,
    attribute: &Attribute,
) -> Result<(), MetadataError> {
    info!("{}: get {} -> {}", provider.kind, attribute.key, attribute.file);
    let body = client
        .fetch(base_url, &attribute.key, provider.headers)
        .await?;
    materialize(Path::new(&attribute.file), &body, attribute.mode).await
}

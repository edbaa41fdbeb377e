//! Materialize cloud instance metadata as plain files at boot.
//!
//! A single sequential pass fetches a fixed set of metadata keys from the GCP
//! and AWS metadata services and writes each value to a file below
//! `/run/config`, so later boot stages can read files instead of talking to
//! the metadata service.
//!
//! # Features
//!
//! - Built-in attribute tables for GCP and AWS
//! - Extra attributes declared through `GCP_*` / `AWS_*` environment variables
//! - Exact file modes per attribute
//! - Best effort: a missing attribute never stops the others
//!
//! # Example
//!
//! ```ignore
//! use boot_metadata::{run, RunConfig};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), boot_metadata::MetadataError> {
//!     let report = run(&RunConfig::default()).await?;
//!     println!("{} written, {} failed", report.succeeded(), report.failed());
//!     Ok(())
//! }
//! ```
//!
//! # Environment declarations
//!
//! | Variable | Value | Effect |
//! |----------|-------|--------|
//! | `GCP_<anything>` | `key,file,mode` | fetch `key` from GCP into `file` |
//! | `AWS_<anything>` | `key,file,mode` | fetch `key` from AWS into `file` |
//!
//! `mode` is four octal digits, e.g. `0640`.

mod client;
mod error;
mod materialize;
mod provider;
mod providers;
mod registry;
mod runner;

pub use client::{MetadataClient, DEFAULT_METADATA_URL, FETCH_TIMEOUT};
pub use error::MetadataError;
pub use materialize::{materialize, DIRECTORY_MODE};
pub use provider::{Attribute, CloudProvider, Header, Provider};
pub use providers::{aws, builtin, gcp};
pub use registry::{environment_attributes, environment_snapshot, resolve_attributes};
pub use runner::{
    run, run_with_environment, AttributeOutcome, Report, RunConfig, CONFIG_ROOT, CONFIG_ROOT_MODE,
};

//! Built-in provider tables.

pub mod aws;
pub mod gcp;

use crate::provider::Provider;

/// All built-in providers, in the order they are processed.
pub fn builtin() -> Vec<Provider> {
    vec![gcp::provider(), aws::provider()]
}

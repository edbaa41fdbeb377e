//! AWS instance metadata service table.

use crate::provider::{Attribute, CloudProvider, Provider};

/// Instance metadata path.
const META_DATA_PATH: &str = "/latest/meta-data/";

/// Prefix of environment variables declaring extra AWS attributes.
pub const ENV_PREFIX: &str = "AWS_";

/// The built-in AWS provider.
pub fn provider() -> Provider {
    Provider {
        kind: CloudProvider::Aws,
        path: META_DATA_PATH,
        headers: &[],
        attributes: vec![
            Attribute::new("instance-id", "instance_id", 0o644),
            Attribute::new("local-ipv4", "local_ipv4", 0o644),
            Attribute::new("public-ipv4", "public_ipv4", 0o644),
        ],
        env_prefix: ENV_PREFIX,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url() {
        assert_eq!(
            provider().base_url("http://169.254.169.254"),
            "http://169.254.169.254/latest/meta-data/"
        );
    }

    #[test]
    fn test_no_headers() {
        assert!(provider().headers.is_empty());
    }

    #[test]
    fn test_attribute_files_unique() {
        let p = provider();
        let mut files: Vec<_> = p.attributes.iter().map(|a| a.file.as_str()).collect();
        files.sort_unstable();
        files.dedup();
        assert_eq!(files.len(), p.attributes.len());
    }
}

//! GCP metadata server table.

use crate::provider::{Attribute, CloudProvider, Header, Provider};

/// Instance metadata path.
const INSTANCE_PATH: &str = "/computeMetadata/v1/instance/";

/// Required header for GCP metadata requests.
const METADATA_FLAVOR_HEADER: &str = "Metadata-Flavor";

/// Required header value for GCP metadata requests.
const METADATA_FLAVOR_VALUE: &str = "Google";

const HEADERS: &[Header] = &[Header {
    name: METADATA_FLAVOR_HEADER,
    value: METADATA_FLAVOR_VALUE,
}];

/// Prefix of environment variables declaring extra GCP attributes.
pub const ENV_PREFIX: &str = "GCP_";

/// The built-in GCP provider.
pub fn provider() -> Provider {
    Provider {
        kind: CloudProvider::Gcp,
        path: INSTANCE_PATH,
        headers: HEADERS,
        attributes: vec![
            Attribute::new("hostname", "hostname", 0o644),
            Attribute::new("name", "local_hostname", 0o644),
            Attribute::new("attributes/ssh-keys", "ssh/authorized_keys", 0o600),
            Attribute::new("attributes/user-data", "userdata", 0o644),
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
            provider().base_url("http://localhost:8080"),
            "http://localhost:8080/computeMetadata/v1/instance/"
        );
    }

    #[test]
    fn test_metadata_flavor_header() {
        let p = provider();
        assert_eq!(p.headers.len(), 1);
        assert_eq!(p.headers[0].name, "Metadata-Flavor");
        assert_eq!(p.headers[0].value, "Google");
    }

    #[test]
    fn test_ssh_keys_are_private() {
        let p = provider();
        let ssh = p
            .attributes
            .iter()
            .find(|a| a.key == "attributes/ssh-keys")
            .unwrap();
        assert_eq!(ssh.file, "ssh/authorized_keys");
        assert_eq!(ssh.mode, 0o600);
    }
}

//! Attribute resolution: built-in tables plus environment declarations.
//!
//! An environment variable whose name starts with a provider's prefix and
//! whose value looks like `key,file,mode` adds one attribute to that
//! provider, e.g. `GCP_FOO=attributes/custom,custom/path,0640`.

use std::env;
use std::path::{Component, Path};
use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, error};

use crate::error::MetadataError;
use crate::provider::{Attribute, Provider};

/// Pattern for `key,file,mode` environment values. ASCII only, so keys never
/// need URL escaping.
static ENV_ATTRIBUTE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([A-Za-z0-9_\-/]+),([A-Za-z0-9_\-/.]+),([0-9]{4})$").expect("Invalid regex")
});

/// Snapshot the process environment, skipping entries that are not UTF-8.
pub fn environment_snapshot() -> Vec<(String, String)> {
    env::vars_os()
        .filter_map(|(name, value)| Some((name.into_string().ok()?, value.into_string().ok()?)))
        .collect()
}

/// Parse the attributes declared by environment entries starting with `prefix`.
///
/// Values that do not match the pattern are skipped without an error, since
/// unrelated variables may share the prefix. Values that match but carry an
/// unusable mode or file path are logged and skipped.
pub fn environment_attributes<'a, I>(prefix: &str, vars: I) -> Vec<Attribute>
where
    I: IntoIterator<Item = &'a (String, String)>,
{
    let mut attrs = Vec::new();
    for (name, value) in vars {
        if !name.starts_with(prefix) {
            continue;
        }
        match parse_entry(name, value) {
            Ok(Some(attr)) => attrs.push(attr),
            Ok(None) => debug!(env = %name, "ignoring env without attribute pattern"),
            Err(e) => error!("{e}"),
        }
    }
    attrs
}

fn parse_entry(name: &str, value: &str) -> Result<Option<Attribute>, MetadataError> {
    let Some(caps) = ENV_ATTRIBUTE_RE.captures(value) else {
        return Ok(None);
    };

    let mode = u32::from_str_radix(&caps[3], 8).map_err(|source| MetadataError::ModeParse {
        entry: format!("{name}={value}"),
        source,
    })?;

    let file = &caps[2];
    if !is_confined(Path::new(file)) {
        return Err(MetadataError::InvalidPath {
            entry: format!("{name}={value}"),
        });
    }

    Ok(Some(Attribute::new(&caps[1], file, mode)))
}

/// Whether `path` stays below the directory it is resolved against.
fn is_confined(path: &Path) -> bool {
    path.components()
        .all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
}

/// The final attribute list for `provider`: its built-in attributes followed
/// by those declared in `vars`.
pub fn resolve_attributes(provider: &Provider, vars: &[(String, String)]) -> Vec<Attribute> {
    let mut attrs = provider.attributes.clone();
    attrs.extend(environment_attributes(provider.env_prefix, vars));
    attrs
}

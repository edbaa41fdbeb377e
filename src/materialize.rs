//! Writing fetched values to disk.

use std::fs::Permissions;
use std::os::unix::fs::PermissionsExt;
use std::path::Path;

use tokio::fs::{self, DirBuilder, OpenOptions};
use tokio::io::AsyncWriteExt;

use crate::error::MetadataError;

/// Mode for parent directories created on demand.
pub const DIRECTORY_MODE: u32 = 0o775;

/// Write `body` to `path` with exactly the permission bits in `mode`.
///
/// Relative paths resolve against the current working directory. Missing
/// parent directories are created with [`DIRECTORY_MODE`]. An existing file
/// is truncated and its mode reset. The write is not atomic.
pub async fn materialize(path: &Path, body: &[u8], mode: u32) -> Result<(), MetadataError> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        DirBuilder::new()
            .recursive(true)
            .mode(DIRECTORY_MODE)
            .create(dir)
            .await
            .map_err(|source| MetadataError::Directory {
                path: dir.to_path_buf(),
                source,
            })?;
    }

    let write_err = |source| MetadataError::Write {
        path: path.to_path_buf(),
        source,
    };

    let mut file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(mode)
        .open(path)
        .await
        .map_err(write_err)?;
    file.write_all(body).await.map_err(write_err)?;
    file.flush().await.map_err(write_err)?;
    drop(file);

    // The open mode is filtered by the umask and ignored for existing files.
    fs::set_permissions(path, Permissions::from_mode(mode))
        .await
        .map_err(write_err)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn mode_of(path: &Path) -> u32 {
        fs::metadata(path).await.unwrap().permissions().mode() & 0o7777
    }

    #[tokio::test]
    async fn test_writes_body_and_mode() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hostname");

        materialize(&path, b"host-1.internal\n", 0o644).await.unwrap();

        assert_eq!(fs::read(&path).await.unwrap(), b"host-1.internal\n");
        assert_eq!(mode_of(&path).await, 0o644);
    }

    #[tokio::test]
    async fn test_mode_not_masked() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("shared");

        materialize(&path, b"x", 0o666).await.unwrap();

        assert_eq!(mode_of(&path).await, 0o666);
    }

    #[tokio::test]
    async fn test_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ssh/keys/authorized_keys");

        materialize(&path, b"ssh-ed25519 AAAA", 0o600).await.unwrap();

        assert_eq!(fs::read(&path).await.unwrap(), b"ssh-ed25519 AAAA");
        assert_eq!(mode_of(&path).await, 0o600);
        assert!(fs::metadata(dir.path().join("ssh/keys"))
            .await
            .unwrap()
            .is_dir());
    }

    #[tokio::test]
    async fn test_truncates_and_resets_mode() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("userdata");

        materialize(&path, b"a much longer first value", 0o644)
            .await
            .unwrap();
        materialize(&path, b"short", 0o600).await.unwrap();

        assert_eq!(fs::read(&path).await.unwrap(), b"short");
        assert_eq!(mode_of(&path).await, 0o600);
    }

    #[tokio::test]
    async fn test_binary_body_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("blob");
        let body = b"binary\x00data\xff\r\n";

        materialize(&path, body, 0o644).await.unwrap();

        assert_eq!(fs::read(&path).await.unwrap(), body);
    }

    #[tokio::test]
    async fn test_parent_is_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("ssh"), b"not a dir").await.unwrap();

        let result = materialize(&dir.path().join("ssh/authorized_keys"), b"k", 0o600).await;

        assert!(matches!(result, Err(MetadataError::Directory { .. })));
    }

    #[tokio::test]
    async fn test_target_is_directory() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("taken")).await.unwrap();

        let result = materialize(&dir.path().join("taken"), b"k", 0o644).await;

        assert!(matches!(result, Err(MetadataError::Write { .. })));
    }
}

//! Fixed vault directory structure

use crate::error::VaultError;
use std::path::{Path, PathBuf};
use tracing::info;

/// Inbox directory watched for captures, relative to the vault root
pub const DEFAULT_INBOX: &str = "Inbox/notes";

/// Directories every vault has, relative to its root
pub const VAULT_DIRS: [&str; 8] = [
    "Inbox/notes",
    "Inbox/audio",
    "Inbox/images",
    "Projects",
    "Areas",
    "Resources",
    "Archives",
    "Reviews",
];

/// Paths inside one vault
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VaultLayout {
    root: PathBuf,
    inbox: PathBuf,
}

impl VaultLayout {
    /// Layout rooted at `root` with the default inbox
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        let inbox = root.join(DEFAULT_INBOX);
        Self { root, inbox }
    }

    /// Use a different inbox, relative to the root
    pub fn with_inbox(mut self, relative: impl AsRef<Path>) -> Self {
        self.inbox = self.root.join(relative);
        self
    }

    /// Vault root
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Watched inbox directory
    pub fn inbox(&self) -> &Path {
        &self.inbox
    }

    /// Create every layout directory; existing directories are fine
    pub async fn ensure(&self) -> Result<(), VaultError> {
        for dir in VAULT_DIRS {
            let path = self.root.join(dir);
            tokio::fs::create_dir_all(&path)
                .await
                .map_err(VaultError::io(&path))?;
        }
        tokio::fs::create_dir_all(&self.inbox)
            .await
            .map_err(VaultError::io(&self.inbox))?;

        info!("PARA + Inbox structure verified at: {}", self.root.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_ensure_creates_all_dirs() {
        let dir = tempdir().unwrap();
        let layout = VaultLayout::new(dir.path().join("SecondBrain"));

        layout.ensure().await.unwrap();

        for sub in VAULT_DIRS {
            assert!(layout.root().join(sub).is_dir(), "{} missing", sub);
        }
        assert_eq!(layout.inbox(), dir.path().join("SecondBrain/Inbox/notes"));
    }

    #[tokio::test]
    async fn test_ensure_is_idempotent() {
        let dir = tempdir().unwrap();
        let layout = VaultLayout::new(dir.path());
        std::fs::create_dir_all(dir.path().join("Projects/keep-me")).unwrap();

        layout.ensure().await.unwrap();
        layout.ensure().await.unwrap();

        assert!(dir.path().join("Projects/keep-me").is_dir());
    }

    #[tokio::test]
    async fn test_custom_inbox_created() {
        let dir = tempdir().unwrap();
        let layout = VaultLayout::new(dir.path()).with_inbox("Drop");

        layout.ensure().await.unwrap();
        assert!(dir.path().join("Drop").is_dir());
        assert_eq!(layout.inbox(), dir.path().join("Drop"));
    }
}

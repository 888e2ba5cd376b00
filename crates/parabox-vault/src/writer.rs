//! Taxonomy Writer: note write + asset move

use crate::error::VaultError;
use crate::note::{Note, NOTE_FILE_NAME};
use crate::slug::slugify;
use chrono::Utc;
use parabox_domain::ClassificationMetadata;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info};

/// Where a capture ended up
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placement {
    /// `VAULT/<area>/<slug>`
    pub directory: PathBuf,

    /// The written `index.md`
    pub note_path: PathBuf,

    /// The relocated original
    pub asset_path: PathBuf,
}

/// Writes classified captures into the vault
///
/// The two writes (note, then asset move) are not transactional. If the move
/// fails the note stays behind without its asset.
#[derive(Debug, Clone)]
pub struct TaxonomyWriter {
    root: PathBuf,
}

impl TaxonomyWriter {
    /// Create a writer for the vault at `root`
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Destination directory for the metadata
    pub fn destination(&self, metadata: &ClassificationMetadata) -> PathBuf {
        self.root
            .join(metadata.area.as_str())
            .join(slugify(&metadata.title))
    }

    /// Write the note and move `source` next to it as `asset_name`
    ///
    /// Existing files with the same names are overwritten.
    pub async fn write(
        &self,
        metadata: &ClassificationMetadata,
        source: &Path,
        asset_name: &str,
    ) -> Result<Placement, VaultError> {
        let directory = self.destination(metadata);
        fs::create_dir_all(&directory)
            .await
            .map_err(VaultError::io(&directory))?;

        let note = Note::new(metadata.clone(), source, Utc::now());
        let note_path = directory.join(NOTE_FILE_NAME);
        fs::write(&note_path, note.render()?)
            .await
            .map_err(VaultError::io(&note_path))?;
        debug!("Wrote note {}", note_path.display());

        let asset_path = directory.join(asset_name);
        move_file(source, &asset_path).await?;

        info!("Saved → {}", note_path.display());

        Ok(Placement {
            directory,
            note_path,
            asset_path,
        })
    }
}

/// Rename, falling back to copy + remove across filesystems
async fn move_file(from: &Path, to: &Path) -> Result<(), VaultError> {
    match fs::rename(from, to).await {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == ErrorKind::CrossesDevices => {
            debug!("Cross-device move {} → {}", from.display(), to.display());
            fs::copy(from, to).await.map_err(VaultError::io(to))?;
            fs::remove_file(from).await.map_err(VaultError::io(from))
        }
        Err(source) => Err(VaultError::Io {
            path: from.to_path_buf(),
            source,
        }),
    }
}

//! Startup scan for notes whose asset never arrived

use crate::error::VaultError;
use crate::note::{Note, NOTE_FILE_NAME};
use parabox_domain::{Area, CaptureKind};
use std::path::{Path, PathBuf};
use tokio::fs;

/// A destination directory holding a note but no original asset
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrphanNote {
    /// `VAULT/<area>/<slug>`
    pub directory: PathBuf,

    /// Source path recorded in the note, when the note is readable
    pub source_path: Option<PathBuf>,
}

/// Find notes left without an asset by an interrupted capture
///
/// Detection only; nothing is repaired or removed.
pub async fn find_orphans(root: &Path) -> Result<Vec<OrphanNote>, VaultError> {
    let asset_names: Vec<&str> = [CaptureKind::Pdf, CaptureKind::Text]
        .iter()
        .filter_map(CaptureKind::asset_name)
        .collect();

    let mut orphans = Vec::new();

    for area in Area::ALL {
        let area_dir = root.join(area.as_str());
        let mut entries = match fs::read_dir(&area_dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => continue,
            Err(e) => return Err(VaultError::io(&area_dir)(e)),
        };

        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(VaultError::io(&area_dir))?
        {
            let directory = entry.path();
            if !directory.is_dir() {
                continue;
            }

            let note_path = directory.join(NOTE_FILE_NAME);
            if !note_path.is_file() {
                continue;
            }
            if asset_names.iter().any(|name| directory.join(name).exists()) {
                continue;
            }

            let source_path = fs::read_to_string(&note_path)
                .await
                .ok()
                .and_then(|doc| Note::parse(&doc).ok())
                .map(|note| note.header.source_path);

            orphans.push(OrphanNote {
                directory,
                source_path,
            });
        }
    }

    orphans.sort_by(|a, b| a.directory.cmp(&b.directory));
    Ok(orphans)
}

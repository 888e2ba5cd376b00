//! Which inbox paths are worth dispatching

use std::path::{Path, PathBuf};
use tokio::fs;

/// Hidden files (editor swap files, `.DS_Store`, iCloud placeholders) are skipped
pub fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .is_some_and(|name| name.to_string_lossy().starts_with('.'))
}

/// Regular, non-hidden files currently in the inbox, sorted by path
pub async fn scan_existing(inbox: &Path) -> std::io::Result<Vec<PathBuf>> {
    let mut entries = fs::read_dir(inbox).await?;
    let mut files = Vec::new();

    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        if is_hidden(&path) {
            continue;
        }
        if entry.file_type().await?.is_file() {
            files.push(path);
        }
    }

    files.sort();
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_hidden_files() {
        assert!(is_hidden(Path::new("/inbox/.DS_Store")));
        assert!(is_hidden(Path::new("/inbox/.note.md.swp")));
        assert!(!is_hidden(Path::new("/inbox/note.md")));
    }

    #[tokio::test]
    async fn test_scan_existing_lists_regular_files() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("b.txt"), "b").unwrap();
        std::fs::write(dir.path().join("a.pdf"), "a").unwrap();
        std::fs::write(dir.path().join(".hidden.md"), "h").unwrap();
        std::fs::create_dir(dir.path().join("sub")).unwrap();

        let files = scan_existing(dir.path()).await.unwrap();
        assert_eq!(
            files,
            vec![dir.path().join("a.pdf"), dir.path().join("b.txt")]
        );
    }
}

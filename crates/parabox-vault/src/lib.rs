//! Parabox Vault
//!
//! The Taxonomy Writer: materializes classified captures into the PARA folder
//! structure of the vault.
//!
//! # Layout
//!
//! ```text
//! VAULT/
//! ├── Inbox/{notes,audio,images}
//! ├── Projects/<slug>/{index.md, asset.pdf | original.txt}
//! ├── Areas/
//! ├── Resources/
//! ├── Archives/
//! └── Reviews/
//! ```
//!
//! Each capture becomes `VAULT/<area>/<slug>/` holding `index.md` (YAML
//! frontmatter plus the summary) and the relocated original. Two captures whose
//! titles slug the same way share a directory, and the later one overwrites the
//! earlier one's files.

#![warn(missing_docs)]

mod error;
mod layout;
mod note;
mod recovery;
mod slug;
mod writer;

pub use error::VaultError;
pub use layout::{VaultLayout, DEFAULT_INBOX, VAULT_DIRS};
pub use note::{Note, NoteHeader, NOTE_FILE_NAME};
pub use recovery::{find_orphans, OrphanNote};
pub use slug::{slugify, UNTITLED};
pub use writer::{Placement, TaxonomyWriter};

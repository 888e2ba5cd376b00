//! Parabox Ingest
//!
//! Watches the vault inbox and files each new capture:
//!
//! 1. Extract text (PDF text layer, or the UTF-8 content of `.txt` / `.md`)
//! 2. Classify it with the configured LLM, falling back to default metadata
//! 3. Write `VAULT/<area>/<slug>/index.md` and move the original next to it
//!
//! Captures run as independent tasks, at most `max_concurrent` at a time.
//! A failed capture stays in the inbox; the watch loop keeps going.

#![warn(missing_docs)]

pub mod config;
mod controller;
mod error;
pub mod inbox;
pub mod provider;
mod watcher;

pub use config::{ConfigError, IngestConfig, LlmConfig, ProviderKind};
pub use controller::{Filed, IngestController};
pub use error::IngestError;
pub use provider::Provider;
pub use watcher::InboxWatcher;

//! Inbox watcher: debounced "file added" events.

use crate::inbox::is_hidden;
use notify_debouncer_full::notify::event::{CreateKind, ModifyKind, RenameMode};
use notify_debouncer_full::notify::{EventKind, RecommendedWatcher, RecursiveMode};
use notify_debouncer_full::{
    new_debouncer, DebounceEventResult, DebouncedEvent, Debouncer, RecommendedCache,
};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, error, warn};

/// Watches the inbox (non-recursively) and forwards added file paths.
///
/// Events are debounced so a file still being written settles before it is
/// reported. Dropping the watcher stops it.
pub struct InboxWatcher {
    // Held for its Drop, which stops the watch
    _debouncer: Debouncer<RecommendedWatcher, RecommendedCache>,
}

impl InboxWatcher {
    /// Start watching `inbox`, sending each added path on `event_tx`.
    pub fn start(
        inbox: &Path,
        event_tx: mpsc::Sender<PathBuf>,
        debounce_duration: Duration,
    ) -> Result<Self, notify_debouncer_full::notify::Error> {
        let mut debouncer = new_debouncer(debounce_duration, None, move |result| {
            forward_debounced_events(result, &event_tx);
        })?;

        debug!("Starting to watch: {:?}", inbox);
        debouncer.watch(inbox, RecursiveMode::NonRecursive)?;

        Ok(Self {
            _debouncer: debouncer,
        })
    }
}

fn forward_debounced_events(result: DebounceEventResult, event_tx: &mpsc::Sender<PathBuf>) {
    match result {
        Ok(events) => {
            for event in events {
                if let Some(path) = added_path(&event) {
                    // Runs on the debouncer thread, outside the runtime
                    if event_tx.blocking_send(path).is_err() {
                        warn!("Event channel closed");
                        break;
                    }
                }
            }
        }
        Err(errors) => {
            for error in errors {
                error!("Watch error: {error}");
            }
        }
    }
}

/// Path of a file that appeared in the inbox, if this event reports one
fn added_path(event: &DebouncedEvent) -> Option<PathBuf> {
    let path = match &event.kind {
        EventKind::Create(CreateKind::Folder) => return None,
        EventKind::Create(_) => event.paths.first()?,
        // Moved into the inbox from elsewhere
        EventKind::Modify(ModifyKind::Name(RenameMode::To)) => event.paths.first()?,
        // Renamed within the inbox; the new name is the second path
        EventKind::Modify(ModifyKind::Name(RenameMode::Both)) => event.paths.get(1)?,
        _ => return None,
    };

    if is_hidden(path) {
        return None;
    }
    Some(path.clone())
}

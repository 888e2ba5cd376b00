//! Ingestion controller: watch the inbox, file every capture.

use crate::config::IngestConfig;
use crate::error::IngestError;
use crate::inbox;
use crate::watcher::InboxWatcher;
use parabox_classifier::Classifier;
use parabox_domain::traits::{LlmProvider, TextExtractor};
use parabox_domain::{CaptureItem, CaptureKind};
use parabox_extractor::{ExtractError, PdfExtractor, PlainTextExtractor};
use parabox_vault::{find_orphans, Placement, TaxonomyWriter, VaultLayout};
use std::collections::HashSet;
use std::future::Future;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tokio::sync::{mpsc, Semaphore};
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

/// Capacity of the watcher → controller channel
const EVENT_CHANNEL_CAPACITY: usize = 256;

type SharedExtractor = Arc<dyn TextExtractor<Error = ExtractError>>;

/// A capture that made it into the vault
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Filed {
    /// Where the note and asset were written
    pub placement: Placement,

    /// Whether the fallback metadata was used
    pub fallback: bool,
}

/// Drives captures from the inbox into the vault
///
/// Cloning is cheap; clones share the admission semaphore and the in-flight set.
pub struct IngestController<L: LlmProvider> {
    layout: VaultLayout,
    classifier: Arc<Classifier<L>>,
    writer: TaxonomyWriter,
    pdf: SharedExtractor,
    text: SharedExtractor,
    permits: Arc<Semaphore>,
    in_flight: Arc<Mutex<HashSet<PathBuf>>>,
    debounce: Duration,
}

impl<L: LlmProvider> Clone for IngestController<L> {
    fn clone(&self) -> Self {
        Self {
            layout: self.layout.clone(),
            classifier: Arc::clone(&self.classifier),
            writer: self.writer.clone(),
            pdf: Arc::clone(&self.pdf),
            text: Arc::clone(&self.text),
            permits: Arc::clone(&self.permits),
            in_flight: Arc::clone(&self.in_flight),
            debounce: self.debounce,
        }
    }
}

impl<L> IngestController<L>
where
    L: LlmProvider + 'static,
{
    /// Create a controller for the configured vault
    pub fn new(config: &IngestConfig, llm: L) -> Self {
        let layout = config.layout();
        Self {
            writer: TaxonomyWriter::new(layout.root()),
            layout,
            classifier: Arc::new(Classifier::new(llm, config.classifier.clone())),
            pdf: Arc::new(PdfExtractor::new()),
            text: Arc::new(PlainTextExtractor::new()),
            permits: Arc::new(Semaphore::new(config.max_concurrent)),
            in_flight: Arc::new(Mutex::new(HashSet::new())),
            debounce: config.debounce(),
        }
    }

    /// Replace the PDF and text extractors
    pub fn with_extractors(mut self, pdf: SharedExtractor, text: SharedExtractor) -> Self {
        self.pdf = pdf;
        self.text = text;
        self
    }

    /// Vault layout in use
    pub fn layout(&self) -> &VaultLayout {
        &self.layout
    }

    /// Create the vault layout and report notes left without their asset
    pub async fn prepare(&self) -> Result<(), IngestError> {
        self.layout.ensure().await?;

        let orphans = find_orphans(self.layout.root()).await?;
        for orphan in &orphans {
            match &orphan.source_path {
                Some(source) => warn!(
                    "Orphan note at {} (asset missing, source was {})",
                    orphan.directory.display(),
                    source.display()
                ),
                None => warn!(
                    "Orphan note at {} (asset missing)",
                    orphan.directory.display()
                ),
            }
        }
        Ok(())
    }

    /// Run one capture through extraction, classification and filing
    ///
    /// On an extraction or write error the source is left where it was.
    pub async fn process(&self, path: &Path) -> Result<Filed, IngestError> {
        let item = CaptureItem::new(path);
        let asset_name = item
            .kind()
            .asset_name()
            .ok_or_else(|| IngestError::UnsupportedKind(item.path().to_path_buf()))?;

        let extractor = [&self.pdf, &self.text]
            .into_iter()
            .find(|extractor| extractor.can_extract(item.path()))
            .ok_or_else(|| ExtractError::Unsupported(item.path().to_path_buf()))?;

        info!("Processing {} capture: {}", item.kind(), item.path().display());

        let text = extractor.extract(item.path()).await?;
        debug!("Extracted {} chars from {}", text.chars().count(), item.path().display());

        let classification = self.classifier.classify_with_outcome(&text).await;

        let placement = self
            .writer
            .write(&classification.metadata, item.path(), asset_name)
            .await?;

        Ok(Filed {
            placement,
            fallback: classification.used_fallback,
        })
    }

    /// Spawn processing of `path` as its own task
    ///
    /// Returns `None` when the file is not a capture or is already being
    /// processed. Errors are logged inside the task.
    pub fn dispatch(&self, path: PathBuf) -> Option<JoinHandle<()>> {
        if CaptureKind::from_path(&path) == CaptureKind::Unrecognized {
            info!("Ignored unsupported file: {}", path.display());
            return None;
        }

        if !self.lock_in_flight().insert(path.clone()) {
            debug!("Already processing {}, skipping", path.display());
            return None;
        }

        info!("Discovered {}", path.display());

        let controller = self.clone();
        Some(tokio::spawn(async move {
            let _guard = InFlightGuard {
                in_flight: Arc::clone(&controller.in_flight),
                path: path.clone(),
            };

            let Ok(_permit) = controller.permits.acquire().await else {
                return;
            };

            match controller.process(&path).await {
                Ok(filed) if filed.fallback => info!(
                    "Filed {} with fallback metadata → {}",
                    path.display(),
                    filed.placement.directory.display()
                ),
                Ok(filed) => info!(
                    "Filed {} → {}",
                    path.display(),
                    filed.placement.directory.display()
                ),
                Err(e) => error!("Failed to process {}: {}", path.display(), e),
            }
        }))
    }

    /// Dispatch every file already sitting in the inbox
    pub async fn scan_existing(&self) -> Result<Vec<JoinHandle<()>>, IngestError> {
        let inbox = self.layout.inbox();
        let files = inbox::scan_existing(inbox).await.map_err(|source| {
            IngestError::Vault(parabox_vault::VaultError::Io {
                path: inbox.to_path_buf(),
                source,
            })
        })?;

        debug!("Initial scan found {} file(s) in {}", files.len(), inbox.display());
        Ok(files
            .into_iter()
            .filter_map(|path| self.dispatch(path))
            .collect())
    }

    /// Watch the inbox until `shutdown` resolves, then wait for in-flight captures
    pub async fn run_until<F>(&self, shutdown: F) -> Result<(), IngestError>
    where
        F: Future<Output = ()>,
    {
        self.prepare().await?;

        let (event_tx, mut event_rx) = mpsc::channel(EVENT_CHANNEL_CAPACITY);
        let _watcher = InboxWatcher::start(self.layout.inbox(), event_tx, self.debounce)
            .map_err(|e| IngestError::Watch(e.to_string()))?;
        info!("Watching {}", self.layout.inbox().display());

        let mut tasks = self.scan_existing().await?;

        tokio::pin!(shutdown);
        loop {
            tokio::select! {
                _ = &mut shutdown => {
                    info!("Shutdown requested");
                    break;
                }
                event = event_rx.recv() => {
                    let Some(path) = event else {
                        warn!("Watcher stopped");
                        break;
                    };
                    tasks.retain(|task| !task.is_finished());
                    tasks.extend(self.dispatch(path));
                }
            }
        }

        let pending = tasks.iter().filter(|task| !task.is_finished()).count();
        if pending > 0 {
            info!("Waiting for {} in-flight capture(s)", pending);
        }
        for task in tasks {
            if let Err(e) = task.await {
                error!("Capture task panicked: {}", e);
            }
        }
        Ok(())
    }

    /// Watch the inbox until Ctrl+C
    pub async fn run(&self) -> Result<(), IngestError> {
        self.run_until(shutdown_signal(tokio::signal::ctrl_c())).await
    }

    fn lock_in_flight(&self) -> std::sync::MutexGuard<'_, HashSet<PathBuf>> {
        self.in_flight.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Resolves when `signal` fires
///
/// If the signal handler cannot be installed this never resolves, so the
/// pipeline keeps running instead of shutting down at once.
async fn shutdown_signal<S>(signal: S)
where
    S: Future<Output = std::io::Result<()>>,
{
    if let Err(e) = signal.await {
        error!("Failed to listen for Ctrl+C, running until killed: {}", e);
        std::future::pending::<()>().await;
    }
}

/// Removes a path from the in-flight set when its task ends
struct InFlightGuard {
    in_flight: Arc<Mutex<HashSet<PathBuf>>>,
    path: PathBuf,
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.in_flight
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&self.path);
    }
}

//! Acquisition controller: the busy/ready state behind a document screen.
//!
//! ```text
//! Idle ──▶ Loading ──▶ Ready
//!            ▲   └───▶ Error
//!            └── any new trigger (supersedes the one in flight)
//! ```
//!
//! Every attempt, remote load or local pick, takes a sequence number when it
//! is triggered. A result that arrives after a newer one was applied, or
//! after a newer remote load began, is dropped on arrival. In-flight work is
//! never aborted, it just stops mattering.
//!
//! Operations hold only a weak reference to the controller across their
//! suspension points, so a controller torn down mid-fetch is not kept alive
//! and the late result is discarded.

use std::fmt;
use std::path::PathBuf;
use std::sync::{Arc, Weak};

use serde::Serialize;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::encoder::{self, EncodedPayload, PDF_MEDIA_TYPE};
use crate::error::{AcquireError, Result};
use crate::fetcher::{DocumentFetcher, HttpFetcher};
use crate::picker::DocumentPicker;
use crate::render::{RenderPlan, RenderStrategy};

/// Where a document's bytes come from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "reference", rename_all = "kebab-case")]
pub enum DocumentSource {
    RemoteUrl(String),
    /// A `file://` URI returned by the picker.
    LocalUri(String),
}

impl DocumentSource {
    pub fn reference(&self) -> &str {
        match self {
            Self::RemoteUrl(url) => url,
            Self::LocalUri(uri) => uri,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    #[default]
    Idle,
    Loading,
    Ready,
    Error,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Idle => "idle",
            Self::Loading => "loading",
            Self::Ready => "ready",
            Self::Error => "error",
        })
    }
}

/// Snapshot of what a screen shows. Replaced wholesale on every transition.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AcquisitionState {
    pub source: Option<DocumentSource>,
    pub payload: Option<EncodedPayload>,
    pub status: Status,
    /// Failure message while `status` is [`Status::Error`].
    pub error: Option<String>,
}

impl AcquisitionState {
    fn loading() -> Self {
        Self {
            status: Status::Loading,
            ..Self::default()
        }
    }

    fn ready(source: DocumentSource, payload: Option<EncodedPayload>) -> Self {
        Self {
            source: Some(source),
            payload,
            status: Status::Ready,
            error: None,
        }
    }

    fn failed(err: &AcquireError) -> Self {
        Self {
            status: Status::Error,
            error: Some(err.to_string()),
            ..Self::default()
        }
    }

    /// Reference the render layer should display, empty when there is none.
    pub fn reference(&self) -> &str {
        match (&self.payload, &self.source) {
            (Some(payload), _) => payload.as_str(),
            (None, Some(source)) => source.reference(),
            (None, None) => "",
        }
    }
}

/// State plus attempt bookkeeping, guarded together so the staleness check
/// and the write are one step.
///
/// A result applies only if it is newer than the last applied result and no
/// remote load began after it. A pick shows nothing while the picker is open,
/// so it only supersedes others once it reports.
#[derive(Default)]
struct Slot {
    state: AcquisitionState,
    issued: u64,
    /// Latest attempt that put the screen into `Loading`.
    loading: u64,
    applied: u64,
}

impl Slot {
    fn issue(&mut self) -> u64 {
        self.issued += 1;
        self.issued
    }

    fn is_latest(&self, seq: u64) -> bool {
        seq > self.applied && seq >= self.loading
    }
}

struct Inner {
    slot: RwLock<Slot>,
    fetcher: Arc<dyn DocumentFetcher>,
    picker: Arc<dyn DocumentPicker>,
    document_url: String,
    strategy: RenderStrategy,
}

impl Inner {
    /// Issue a new attempt number and enter `Loading`.
    async fn begin(&self) -> u64 {
        let mut slot = self.slot.write().await;
        let seq = slot.issue();
        slot.loading = seq;
        slot.state = AcquisitionState::loading();
        seq
    }

    /// Issue a new attempt number without touching the visible state.
    async fn reserve(&self) -> u64 {
        self.slot.write().await.issue()
    }

    /// Apply `state` if attempt `seq` is still the latest.
    async fn finish(&self, seq: u64, state: AcquisitionState) -> bool {
        let mut slot = self.slot.write().await;
        if !slot.is_latest(seq) {
            debug!(seq, issued = slot.issued, applied = slot.applied, "Dropping stale result");
            return false;
        }
        slot.applied = seq;
        slot.state = state;
        true
    }
}

/// Owns one screen's [`AcquisitionState`] and drives it.
pub struct AcquisitionController {
    inner: Arc<Inner>,
}

impl AcquisitionController {
    pub fn new(
        fetcher: Arc<dyn DocumentFetcher>,
        picker: Arc<dyn DocumentPicker>,
        document_url: impl Into<String>,
        strategy: RenderStrategy,
    ) -> Self {
        Self {
            inner: Arc::new(Inner {
                slot: RwLock::new(Slot::default()),
                fetcher,
                picker,
                document_url: document_url.into(),
                strategy,
            }),
        }
    }

    /// Controller over an [`HttpFetcher`] built from `config`.
    pub fn from_config(config: &Config, picker: Arc<dyn DocumentPicker>) -> Result<Self> {
        let fetcher = HttpFetcher::from_config(config)?;
        Ok(Self::new(
            Arc::new(fetcher),
            picker,
            config.document_url.clone(),
            config.render_strategy(),
        ))
    }

    pub fn document_url(&self) -> &str {
        &self.inner.document_url
    }

    pub async fn state(&self) -> AcquisitionState {
        self.inner.slot.read().await.state.clone()
    }

    /// Plan the current document for this controller's platform.
    pub async fn render_plan(&self) -> RenderPlan {
        let slot = self.inner.slot.read().await;
        self.inner.strategy.plan(slot.state.reference())
    }

    /// Fetch the configured document, encode it, and become `Ready`.
    ///
    /// Returns the state after this attempt settles, which belongs to a newer
    /// attempt if this one was superseded.
    pub async fn load_from_remote(&self) -> AcquisitionState {
        load_from_remote(Arc::downgrade(&self.inner)).await;
        self.state().await
    }

    /// Let the user pick a local PDF and show it without encoding.
    ///
    /// A dismissed picker leaves the state exactly as it was.
    pub async fn select_and_load(&self) -> AcquisitionState {
        select_and_load(Arc::downgrade(&self.inner)).await;
        self.state().await
    }

    /// [`load_from_remote`](Self::load_from_remote) as a detached task, as a
    /// screen does on mount. Dropping the controller makes the result a no-op.
    pub fn spawn_load_from_remote(&self) -> JoinHandle<()> {
        tokio::spawn(load_from_remote(Arc::downgrade(&self.inner)))
    }

    /// [`select_and_load`](Self::select_and_load) as a detached task.
    pub fn spawn_select_and_load(&self) -> JoinHandle<()> {
        tokio::spawn(select_and_load(Arc::downgrade(&self.inner)))
    }

    /// Download `url` into the cache as `<filename>.pdf`.
    ///
    /// Independent of the on-screen state.
    pub async fn download(&self, url: &str, filename: &str) -> Result<PathBuf> {
        let path = self.inner.fetcher.download_to_cache(url, filename).await?;
        info!(path = %path.display(), "Download complete");
        Ok(path)
    }
}

async fn load_from_remote(inner: Weak<Inner>) {
    let Some(strong) = inner.upgrade() else {
        return;
    };
    let seq = strong.begin().await;
    let fetcher = Arc::clone(&strong.fetcher);
    let url = strong.document_url.clone();
    drop(strong);

    debug!(seq, url = %url, "Loading remote document");
    let state = match fetch_and_encode(fetcher.as_ref(), &url).await {
        Ok(payload) => {
            info!(seq, bytes = payload.len(), "Remote document ready");
            AcquisitionState::ready(DocumentSource::RemoteUrl(url), Some(payload))
        }
        Err(e) => {
            warn!(seq, error = %e, "Remote load failed");
            AcquisitionState::failed(&e)
        }
    };

    match inner.upgrade() {
        Some(strong) => {
            strong.finish(seq, state).await;
        }
        None => debug!(seq, "Controller gone, discarding result"),
    }
}

async fn select_and_load(inner: Weak<Inner>) {
    let Some(strong) = inner.upgrade() else {
        return;
    };
    let seq = strong.reserve().await;
    let picker = Arc::clone(&strong.picker);
    drop(strong);

    debug!(seq, media_types = ?picker.media_types(), "Opening picker");
    let state = match picker.pick_local().await {
        Ok(uri) => {
            info!(seq, uri = %uri, "Local document selected");
            AcquisitionState::ready(DocumentSource::LocalUri(uri), None)
        }
        Err(e) if e.is_cancellation() => {
            debug!(seq, "Picker dismissed");
            return;
        }
        Err(e) => {
            warn!(seq, error = %e, "Local selection failed");
            AcquisitionState::failed(&e)
        }
    };

    match inner.upgrade() {
        Some(strong) => {
            strong.finish(seq, state).await;
        }
        None => debug!(seq, "Controller gone, discarding selection"),
    }
}

async fn fetch_and_encode(fetcher: &dyn DocumentFetcher, url: &str) -> Result<EncodedPayload> {
    let bytes = fetcher.fetch_remote(url).await?;
    tokio::task::spawn_blocking(move || encoder::encode(&bytes, PDF_MEDIA_TYPE))
        .await
        .map_err(|e| AcquireError::Encoding(e.to_string()))?
}

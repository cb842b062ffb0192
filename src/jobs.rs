//! Interface to the background job scheduler.
//!
//! Loading a document and rendering its first page happen off the UI
//! thread. The recent-documents model only pushes jobs, cancels them and
//! consumes the `JobEvent`s delivered back to the UI thread.

use image::RgbaImage;
use std::fmt;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct JobId(pub u64);

/// Scheduling priority; higher variants run first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum JobPriority {
    None,
    Low,
    High,
    Urgent,
}

/// Stable locator of a model row. `generation` changes every time the model
/// is cleared, so an id from an earlier refresh never matches a live row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RowId {
    pub index: usize,
    pub generation: u64,
}

/// A loaded document.
pub trait Document: Send + Sync {
    /// Size of `page` in document units (width, height).
    fn page_size(&self, page: usize) -> (f64, f64);
    /// Render `page` at `scale`. `None` when the page cannot be drawn.
    fn render(&self, page: usize, rotation: u32, scale: f64) -> Option<RgbaImage>;
}

#[derive(Clone)]
pub enum JobKind {
    Load {
        uri: String,
    },
    Thumbnail {
        document: Arc<dyn Document>,
        page: usize,
        rotation: u32,
        scale: f64,
    },
}

impl fmt::Debug for JobKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Load { uri } => f.debug_struct("Load").field("uri", uri).finish(),
            Self::Thumbnail { page, scale, .. } => f
                .debug_struct("Thumbnail")
                .field("page", page)
                .field("scale", scale)
                .finish_non_exhaustive(),
        }
    }
}

pub enum JobOutcome {
    /// `None` when the file could not be opened as a document.
    Loaded(Option<Arc<dyn Document>>),
    Thumbnailed(Option<RgbaImage>),
}

impl fmt::Debug for JobOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Loaded(doc) => write!(f, "Loaded({})", doc.is_some()),
            Self::Thumbnailed(img) => {
                write!(f, "Thumbnailed({:?})", img.as_ref().map(|i| i.dimensions()))
            }
        }
    }
}

/// Completion notice for one job, carrying the row id it was pushed with.
#[derive(Debug)]
pub struct JobEvent {
    pub job: JobId,
    pub row: RowId,
    pub outcome: JobOutcome,
}

pub trait JobScheduler {
    /// Queue a job. Completion arrives later as a `JobEvent` on the UI thread.
    fn push(&self, kind: JobKind, row: RowId, priority: JobPriority) -> JobId;
    /// Cancel a queued or running job. Its event is never delivered.
    fn cancel(&self, job: JobId);
}

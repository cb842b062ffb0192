//! Background job scheduler backed by the rayon thread pool.
//!
//! Every `push` queues the job and spawns one pool task; each task takes
//! the highest-priority job still queued when it starts, so urgent work
//! overtakes earlier low-priority pushes. Results travel back over an
//! `mpsc` channel that the UI thread drains. A job that panics reports an
//! empty outcome instead of taking the pool down.

use image::DynamicImage;
use image::imageops::FilterType;
use std::cell::Cell;
use std::collections::HashSet;
use std::panic::{self, AssertUnwindSafe};
use std::sync::mpsc::Sender;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::jobs::{
    Document, JobEvent, JobId, JobKind, JobOutcome, JobPriority, JobScheduler, RowId,
};
use crate::utils::uri_to_path;

// ── Documents ─────────────────────────────────────────────────────────────────

/// Opens a URI as a `Document`; `None` for unsupported or unreadable files.
pub trait DocumentLoader: Send + Sync {
    fn load(&self, uri: &str) -> Option<Arc<dyn Document>>;
}

/// Treats any raster image the `image` crate can decode as a one-page
/// document.
#[derive(Debug, Default, Clone, Copy)]
pub struct ImageDocumentLoader;

impl DocumentLoader for ImageDocumentLoader {
    fn load(&self, uri: &str) -> Option<Arc<dyn Document>> {
        let path = uri_to_path(uri)?;
        match image::open(&path) {
            Ok(image) => Some(Arc::new(ImageDocument { image })),
            Err(e) => {
                log::debug!("cannot open {} as a document: {e}", path.display());
                None
            }
        }
    }
}

struct ImageDocument {
    image: DynamicImage,
}

impl Document for ImageDocument {
    fn page_size(&self, page: usize) -> (f64, f64) {
        if page != 0 {
            return (0.0, 0.0);
        }
        (
            f64::from(self.image.width()),
            f64::from(self.image.height()),
        )
    }

    fn render(&self, page: usize, rotation: u32, scale: f64) -> Option<image::RgbaImage> {
        if page != 0 || !scale.is_finite() || scale <= 0.0 {
            return None;
        }
        let rotated = match rotation % 360 {
            90 => self.image.rotate90(),
            180 => self.image.rotate180(),
            270 => self.image.rotate270(),
            _ => self.image.clone(),
        };
        let w = ((f64::from(rotated.width()) * scale).round() as u32).max(1);
        let h = ((f64::from(rotated.height()) * scale).round() as u32).max(1);
        Some(rotated.resize_exact(w, h, FilterType::Triangle).into_rgba8())
    }
}

// ── Queue ─────────────────────────────────────────────────────────────────────

struct Pending {
    id: JobId,
    kind: JobKind,
    row: RowId,
    priority: JobPriority,
}

#[derive(Default)]
struct QueueState {
    pending: Vec<Pending>,
    running: HashSet<JobId>,
    cancelled: HashSet<JobId>,
}

#[derive(Default)]
struct Shared {
    state: Mutex<QueueState>,
}

impl Shared {
    fn lock(&self) -> MutexGuard<'_, QueueState> {
        // Jobs run outside the lock, so a poisoned guard still holds a whole queue.
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn enqueue(&self, job: Pending) {
        self.lock().pending.push(job);
    }

    /// Highest priority first, then oldest id.
    fn take_next(&self) -> Option<Pending> {
        let mut state = self.lock();
        let pos = state
            .pending
            .iter()
            .enumerate()
            .max_by(|(_, a), (_, b)| a.priority.cmp(&b.priority).then(b.id.cmp(&a.id)))
            .map(|(i, _)| i)?;
        let job = state.pending.remove(pos);
        state.running.insert(job.id);
        Some(job)
    }

    /// Mark `id` finished; returns whether its result should be delivered.
    fn finish(&self, id: JobId) -> bool {
        let mut state = self.lock();
        state.running.remove(&id);
        !state.cancelled.remove(&id)
    }

    fn cancel(&self, id: JobId) {
        let mut state = self.lock();
        let before = state.pending.len();
        state.pending.retain(|p| p.id != id);
        if state.pending.len() == before && state.running.contains(&id) {
            state.cancelled.insert(id);
        }
    }
}

/// What a job of `kind` reports when it produced nothing.
fn empty_outcome(kind: &JobKind) -> JobOutcome {
    match kind {
        JobKind::Load { .. } => JobOutcome::Loaded(None),
        JobKind::Thumbnail { .. } => JobOutcome::Thumbnailed(None),
    }
}

fn run_job(kind: JobKind, loader: &dyn DocumentLoader) -> JobOutcome {
    match kind {
        JobKind::Load { uri } => JobOutcome::Loaded(loader.load(&uri)),
        JobKind::Thumbnail {
            document,
            page,
            rotation,
            scale,
        } => JobOutcome::Thumbnailed(document.render(page, rotation, scale)),
    }
}

// ── Scheduler ─────────────────────────────────────────────────────────────────

pub struct ThreadedScheduler {
    shared: Arc<Shared>,
    loader: Arc<dyn DocumentLoader>,
    events: Sender<JobEvent>,
    next_id: Cell<u64>,
}

impl ThreadedScheduler {
    pub fn new(loader: Arc<dyn DocumentLoader>, events: Sender<JobEvent>) -> Self {
        Self {
            shared: Arc::new(Shared::default()),
            loader,
            events,
            next_id: Cell::new(0),
        }
    }
}

impl JobScheduler for ThreadedScheduler {
    fn push(&self, kind: JobKind, row: RowId, priority: JobPriority) -> JobId {
        let id = JobId(self.next_id.get() + 1);
        self.next_id.set(id.0);
        log::debug!("job {} queued: {kind:?}", id.0);

        self.shared.enqueue(Pending {
            id,
            kind,
            row,
            priority,
        });

        let shared = self.shared.clone();
        let loader = self.loader.clone();
        let events = self.events.clone();
        rayon::spawn(move || {
            let Some(Pending { id, kind, row, .. }) = shared.take_next() else {
                return;
            };
            let empty = empty_outcome(&kind);
            let outcome = panic::catch_unwind(AssertUnwindSafe(|| run_job(kind, loader.as_ref())))
                .unwrap_or_else(|_| {
                    log::warn!("job {} panicked", id.0);
                    empty
                });
            if shared.finish(id) {
                // The receiver is gone once the view has been torn down.
                let _ = events.send(JobEvent {
                    job: id,
                    row,
                    outcome,
                });
            } else {
                log::debug!("job {} finished after cancellation", id.0);
            }
        });

        id
    }

    fn cancel(&self, job: JobId) {
        log::debug!("job {} cancelled", job.0);
        self.shared.cancel(job);
    }
}

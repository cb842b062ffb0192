//! Recent documents model and the thumbnail pipeline that feeds it.
//!
//! Each row moves through these states:
//!
//! ```text
//! Pending ──▶ Loading ──▶ Thumbnailing ──▶ Ready
//!    │            │                 │
//!    │            └──▶ ReadyNoThumbnail ◀──┘ (render failed)
//!    ├──▶ Ready (fresh cached thumbnail)
//!    └──▶ ReadyNoThumbnail (fresh record of a failed render)
//! ```
//!
//! Records of documents that left the registry are dropped on refresh,
//! together with their thumbnail files.
//!
//! Jobs carry the `RowId` they were pushed with. Clearing the model cancels
//! every in-flight job and bumps the generation, so events that were
//! already queued when a refresh happened are dropped instead of landing on
//! whatever row now sits at the same index.

use image::RgbaImage;
use std::collections::HashSet;
use std::path::Path;
use std::rc::Rc;
use std::sync::Arc;

use crate::jobs::{
    Document, JobEvent, JobId, JobKind, JobOutcome, JobPriority, JobScheduler, RowId,
};
use crate::metadata::{MTIME_KEY, MetadataStore, NO_THUMBNAIL_KEY, THUMBNAIL_PATH_KEY, is_stale};
use crate::recent::{RecentEntry, RecentRegistry, select_entries};
use crate::thumbnail::{ThumbnailCache, embed_in_frame, thumbnail_scale};
use crate::utils::{file_mtime, now_secs, uri_to_path};

#[derive(Debug, Clone, PartialEq)]
pub enum RowIcon {
    /// Placeholder derived from the content type.
    Mime(String),
    Thumbnail(Arc<RgbaImage>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowState {
    Pending,
    Loading,
    Thumbnailing,
    Ready,
    ReadyNoThumbnail,
}

impl RowState {
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Ready | Self::ReadyNoThumbnail)
    }
}

pub struct ListRow {
    pub uri: String,
    pub display_name: String,
    pub icon: RowIcon,
    pub modified: i64,
    pub selected: bool,
    pub job: Option<JobId>,
    pub thumbnailed: bool,
    pub document: Option<Arc<dyn Document>>,
    pub has_metadata: bool,
    pub state: RowState,
}

impl ListRow {
    fn new(entry: RecentEntry, has_metadata: bool) -> Self {
        Self {
            uri: entry.uri,
            display_name: entry.display_name,
            icon: RowIcon::Mime(entry.mime_type),
            modified: entry.modified,
            selected: false,
            job: None,
            thumbnailed: false,
            document: None,
            has_metadata,
            state: RowState::Pending,
        }
    }
}

/// A fresh cache record: either a rendered thumbnail or the note that
/// the document has none.
enum CachedIcon {
    Thumbnail(RgbaImage),
    Placeholder,
}

/// What the view has to redraw after a model update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelChange {
    Reset,
    Row(usize),
}

pub struct RecentModel {
    rows: Vec<ListRow>,
    generation: u64,
    max_items: usize,
    icon_size: u32,
    registry: Rc<dyn RecentRegistry>,
    metadata: Rc<dyn MetadataStore>,
    thumbnails: ThumbnailCache,
    scheduler: Rc<dyn JobScheduler>,
}

impl RecentModel {
    pub fn new(
        registry: Rc<dyn RecentRegistry>,
        metadata: Rc<dyn MetadataStore>,
        thumbnails: ThumbnailCache,
        scheduler: Rc<dyn JobScheduler>,
        max_items: usize,
        icon_size: u32,
    ) -> Self {
        Self {
            rows: Vec::new(),
            generation: 0,
            max_items,
            icon_size,
            registry,
            metadata,
            thumbnails,
            scheduler,
        }
    }

    pub fn rows(&self) -> &[ListRow] {
        &self.rows
    }

    pub fn row(&self, index: usize) -> Option<&ListRow> {
        self.rows.get(index)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Cancel all in-flight jobs and drop every row.
    pub fn clear(&mut self) {
        for row in self.rows.iter_mut() {
            if let Some(job) = row.job.take() {
                self.scheduler.cancel(job);
            }
        }
        self.rows.clear();
        self.generation += 1;
    }

    /// Rebuild the rows from the registry.
    pub fn refresh(&mut self) -> ModelChange {
        let entries = self.registry.entries();
        self.prune_cache(&entries);
        let entries = select_entries(entries, self.max_items);
        self.clear();

        for entry in entries {
            let index = self.rows.len();
            let has_metadata = self.metadata.is_supported(&entry.uri);
            let cached = if has_metadata {
                self.cached_icon(&entry.uri)
            } else {
                None
            };

            self.rows.push(ListRow::new(entry, has_metadata));
            match cached {
                Some(CachedIcon::Thumbnail(thumbnail)) => {
                    let row = &mut self.rows[index];
                    row.icon = RowIcon::Thumbnail(Arc::new(thumbnail));
                    row.thumbnailed = true;
                    row.state = RowState::Ready;
                }
                Some(CachedIcon::Placeholder) => {
                    let row = &mut self.rows[index];
                    row.thumbnailed = true;
                    row.state = RowState::ReadyNoThumbnail;
                }
                None => self.start_load(index),
            }
        }

        log::debug!(
            "recent view refreshed: {} rows, generation {}",
            self.rows.len(),
            self.generation
        );
        ModelChange::Reset
    }

    /// Mark the row selected and return the URI to open.
    pub fn activate(&mut self, index: usize) -> Option<String> {
        let row = self.rows.get_mut(index)?;
        row.selected = true;
        Some(row.uri.clone())
    }

    /// Apply a job completion. Events for rows that no longer exist, or
    /// for jobs the row no longer waits on, are ignored.
    pub fn handle_event(&mut self, event: JobEvent) -> Option<ModelChange> {
        let JobEvent { job, row, outcome } = event;
        if row.generation != self.generation {
            log::debug!("dropping job {} from generation {}", job.0, row.generation);
            return None;
        }
        let current = self.rows.get(row.index)?;
        if current.job != Some(job) {
            log::debug!("dropping job {}: row {} moved on", job.0, row.index);
            return None;
        }

        match outcome {
            JobOutcome::Loaded(Some(document)) => self.start_thumbnail(row, document),
            JobOutcome::Loaded(None) | JobOutcome::Thumbnailed(None) => {
                self.finish_without_thumbnail(row.index)
            }
            JobOutcome::Thumbnailed(Some(page)) => self.finish_with_thumbnail(row.index, page),
        }
        Some(ModelChange::Row(row.index))
    }

    fn row_id(&self, index: usize) -> RowId {
        RowId {
            index,
            generation: self.generation,
        }
    }

    fn cached_icon(&self, uri: &str) -> Option<CachedIcon> {
        let file_mtime = uri_to_path(uri).and_then(|p| file_mtime(&p));
        if is_stale(self.metadata.get_u64(uri, MTIME_KEY), file_mtime) {
            return None;
        }
        let thumbnail = self
            .metadata
            .get_string(uri, THUMBNAIL_PATH_KEY)
            .and_then(|path| self.thumbnails.load(Path::new(&path)));
        if let Some(thumbnail) = thumbnail {
            return Some(CachedIcon::Thumbnail(thumbnail));
        }
        let failed = self.metadata.get_u64(uri, NO_THUMBNAIL_KEY) == Some(1);
        failed.then_some(CachedIcon::Placeholder)
    }

    /// Forget cached thumbnails of documents the registry no longer lists.
    fn prune_cache(&self, entries: &[RecentEntry]) {
        let known: HashSet<&str> = entries.iter().map(|e| e.uri.as_str()).collect();
        for uri in self.metadata.uris() {
            if known.contains(uri.as_str()) {
                continue;
            }
            log::debug!("dropping cache record for {uri}");
            self.forget_thumbnail(&uri);
            self.metadata.forget(&uri);
        }
    }

    fn start_load(&mut self, index: usize) {
        let id = self.row_id(index);
        let row = &mut self.rows[index];
        let job = self.scheduler.push(
            JobKind::Load {
                uri: row.uri.clone(),
            },
            id,
            JobPriority::High,
        );
        row.job = Some(job);
        row.state = RowState::Loading;
    }

    fn start_thumbnail(&mut self, id: RowId, document: Arc<dyn Document>) {
        let (width, height) = document.page_size(0);
        if width <= 0.0 || height <= 0.0 {
            log::debug!("{}: first page has no area", self.rows[id.index].uri);
            self.finish_without_thumbnail(id.index);
            return;
        }
        let scale = thumbnail_scale(width, height, self.icon_size);
        let job = self.scheduler.push(
            JobKind::Thumbnail {
                document: document.clone(),
                page: 0,
                rotation: 0,
                scale,
            },
            id,
            JobPriority::High,
        );

        let row = &mut self.rows[id.index];
        row.job = Some(job);
        row.thumbnailed = false;
        row.document = Some(document);
        row.state = RowState::Thumbnailing;
    }

    fn finish_with_thumbnail(&mut self, index: usize, page: RgbaImage) {
        let framed = Arc::new(embed_in_frame(&page));
        let row = &mut self.rows[index];
        row.icon = RowIcon::Thumbnail(framed.clone());
        row.thumbnailed = true;
        row.job = None;
        row.state = RowState::Ready;

        if row.has_metadata {
            let uri = row.uri.clone();
            self.store_thumbnail(&uri, &framed);
        }
    }

    fn finish_without_thumbnail(&mut self, index: usize) {
        let row = &mut self.rows[index];
        row.thumbnailed = true;
        row.job = None;
        row.state = RowState::ReadyNoThumbnail;

        if !row.has_metadata {
            return;
        }
        let uri = row.uri.clone();
        self.forget_thumbnail(&uri);
        self.metadata.set_u64(&uri, NO_THUMBNAIL_KEY, 1);
        self.metadata.set_u64(&uri, MTIME_KEY, now_secs());
    }

    /// Persist `thumbnail` and stamp the record. On failure the record is
    /// left without a thumbnail so the next refresh renders again.
    fn store_thumbnail(&self, uri: &str, thumbnail: &RgbaImage) {
        match self.thumbnails.save(thumbnail) {
            Ok(path) => {
                self.forget_thumbnail(uri);
                self.metadata
                    .set_string(uri, THUMBNAIL_PATH_KEY, &path.to_string_lossy());
                self.metadata.remove(uri, NO_THUMBNAIL_KEY);
                self.metadata.set_u64(uri, MTIME_KEY, now_secs());
            }
            Err(e) => {
                log::warn!("cannot save thumbnail for {uri}: {e}");
                self.forget_thumbnail(uri);
            }
        }
    }

    /// Drop the recorded thumbnail, deleting the file when it is ours.
    fn forget_thumbnail(&self, uri: &str) {
        if let Some(old) = self.metadata.get_string(uri, THUMBNAIL_PATH_KEY) {
            self.thumbnails.discard(Path::new(&old));
            self.metadata.remove(uri, THUMBNAIL_PATH_KEY);
        }
    }
}

impl Drop for RecentModel {
    fn drop(&mut self) {
        self.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::JsonMetadataStore;
    use crate::recent::tests::entry;
    use crate::utils::path_to_uri;
    use image::Rgba;
    use std::cell::RefCell;
    use std::path::PathBuf;

    struct FakeRegistry(RefCell<Vec<RecentEntry>>);

    impl RecentRegistry for FakeRegistry {
        fn entries(&self) -> Vec<RecentEntry> {
            self.0.borrow().clone()
        }
    }

    #[derive(Default)]
    struct FakeScheduler {
        pushed: RefCell<Vec<(JobId, JobKind, RowId)>>,
        cancelled: RefCell<Vec<JobId>>,
    }

    impl FakeScheduler {
        fn last(&self) -> (JobId, JobKind, RowId) {
            self.pushed.borrow().last().cloned().unwrap()
        }
    }

    impl JobScheduler for FakeScheduler {
        fn push(&self, kind: JobKind, row: RowId, priority: JobPriority) -> JobId {
            assert_eq!(priority, JobPriority::High);
            let id = JobId(self.pushed.borrow().len() as u64 + 1);
            self.pushed.borrow_mut().push((id, kind, row));
            id
        }

        fn cancel(&self, job: JobId) {
            self.cancelled.borrow_mut().push(job);
        }
    }

    struct FakeDocument(f64, f64);

    impl Document for FakeDocument {
        fn page_size(&self, _page: usize) -> (f64, f64) {
            (self.0, self.1)
        }

        fn render(&self, _page: usize, _rotation: u32, _scale: f64) -> Option<RgbaImage> {
            None
        }
    }

    struct Fixture {
        _dir: tempfile::TempDir,
        docs: PathBuf,
        registry: Rc<FakeRegistry>,
        metadata: Rc<JsonMetadataStore>,
        scheduler: Rc<FakeScheduler>,
        model: RecentModel,
    }

    impl Fixture {
        fn new() -> Self {
            let dir = tempfile::tempdir().unwrap();
            let docs = dir.path().join("docs");
            std::fs::create_dir_all(&docs).unwrap();
            let registry = Rc::new(FakeRegistry(RefCell::new(Vec::new())));
            let metadata = Rc::new(JsonMetadataStore::open(dir.path().join("metadata.json")));
            let scheduler = Rc::new(FakeScheduler::default());
            let model = RecentModel::new(
                registry.clone(),
                metadata.clone(),
                ThumbnailCache::new(dir.path().join("thumbs")),
                scheduler.clone(),
                crate::recent::MAX_RECENT_VIEW_ITEMS,
                crate::thumbnail::ICON_VIEW_SIZE,
            );
            Self {
                _dir: dir,
                docs,
                registry,
                metadata,
                scheduler,
                model,
            }
        }

        /// Registers an on-disk document and returns its URI.
        fn add_document(&self, name: &str, modified: i64) -> String {
            let path = self.docs.join(name);
            std::fs::write(&path, b"%PDF-1.4").unwrap();
            let mut e = entry(name, modified, true);
            e.uri = path_to_uri(&path);
            self.registry.0.borrow_mut().push(e.clone());
            e.uri
        }

        fn deliver(&mut self, outcome: JobOutcome) -> Option<ModelChange> {
            let (job, _, row) = self.scheduler.last();
            self.model.handle_event(JobEvent { job, row, outcome })
        }
    }

    fn page() -> RgbaImage {
        RgbaImage::from_pixel(99, 128, Rgba([200, 200, 200, 255]))
    }

    #[test]
    fn refresh_queues_loads_for_uncached_documents() {
        let mut fx = Fixture::new();
        fx.add_document("a.pdf", 10);
        fx.add_document("b.pdf", 20);

        assert_eq!(fx.model.refresh(), ModelChange::Reset);
        let names: Vec<_> = fx.model.rows().iter().map(|r| r.display_name.as_str()).collect();
        assert_eq!(names, ["b.pdf", "a.pdf"]);
        assert!(fx.model.rows().iter().all(|r| r.state == RowState::Loading));
        assert!(matches!(fx.model.row(0).unwrap().icon, RowIcon::Mime(_)));
        let pushed = fx.scheduler.pushed.borrow();
        assert_eq!(pushed.len(), 2);
        assert_eq!(pushed[0].2.index, 0);
        assert_eq!(pushed[1].2.index, 1);
    }

    #[test]
    fn full_pipeline_caches_the_thumbnail() {
        let mut fx = Fixture::new();
        let uri = fx.add_document("a.pdf", 10);
        fx.model.refresh();

        let change = fx.deliver(JobOutcome::Loaded(Some(Arc::new(FakeDocument(612.0, 792.0)))));
        assert_eq!(change, Some(ModelChange::Row(0)));
        let row = fx.model.row(0).unwrap();
        assert_eq!(row.state, RowState::Thumbnailing);
        assert!(row.document.is_some());
        let (_, kind, _) = fx.scheduler.last();
        let JobKind::Thumbnail { page: 0, scale, .. } = kind else {
            panic!("expected a thumbnail job");
        };
        assert_eq!(scale, 128.0 / 792.0);

        fx.deliver(JobOutcome::Thumbnailed(Some(page())));
        let row = fx.model.row(0).unwrap();
        assert_eq!(row.state, RowState::Ready);
        assert!(row.thumbnailed);
        assert_eq!(row.job, None);
        let RowIcon::Thumbnail(icon) = &row.icon else {
            panic!("expected a thumbnail icon");
        };
        assert_eq!(icon.dimensions(), (106, 137));

        let saved = fx.metadata.get_string(&uri, THUMBNAIL_PATH_KEY).unwrap();
        assert!(Path::new(&saved).exists());
        assert!(fx.metadata.get_u64(&uri, MTIME_KEY).is_some());

        // The next refresh is served from the cache.
        let pushed_before = fx.scheduler.pushed.borrow().len();
        fx.model.refresh();
        assert_eq!(fx.model.row(0).unwrap().state, RowState::Ready);
        assert_eq!(fx.scheduler.pushed.borrow().len(), pushed_before);
    }

    #[test]
    fn stale_cache_is_rebuilt_with_newer_mtime() {
        let mut fx = Fixture::new();
        let uri = fx.add_document("a.pdf", 10);
        let file_time = file_mtime(&uri_to_path(&uri).unwrap()).unwrap();
        let thumb = ThumbnailCache::new(fx.docs.join("old")).save(&page()).unwrap();
        fx.metadata.set_u64(&uri, MTIME_KEY, file_time - 100);
        fx.metadata
            .set_string(&uri, THUMBNAIL_PATH_KEY, &thumb.to_string_lossy());

        fx.model.refresh();
        assert_eq!(fx.model.row(0).unwrap().state, RowState::Loading);

        fx.deliver(JobOutcome::Loaded(Some(Arc::new(FakeDocument(100.0, 100.0)))));
        fx.deliver(JobOutcome::Thumbnailed(Some(page())));
        assert!(fx.metadata.get_u64(&uri, MTIME_KEY).unwrap() >= file_time);
        let fresh = fx.metadata.get_string(&uri, THUMBNAIL_PATH_KEY).unwrap();
        assert_ne!(PathBuf::from(fresh), thumb);
    }

    #[test]
    fn fresh_cache_with_missing_file_falls_back_to_loading() {
        let mut fx = Fixture::new();
        let uri = fx.add_document("a.pdf", 10);
        fx.metadata.set_u64(&uri, MTIME_KEY, u64::MAX);
        fx.metadata
            .set_string(&uri, THUMBNAIL_PATH_KEY, "/nonexistent/thumb.png");

        fx.model.refresh();
        assert_eq!(fx.model.row(0).unwrap().state, RowState::Loading);
    }

    #[test]
    fn unreadable_document_keeps_placeholder() {
        let mut fx = Fixture::new();
        let uri = fx.add_document("broken.pdf", 10);
        fx.model.refresh();

        fx.deliver(JobOutcome::Loaded(None));
        let row = fx.model.row(0).unwrap();
        assert_eq!(row.state, RowState::ReadyNoThumbnail);
        assert!(row.thumbnailed);
        assert_eq!(row.job, None);
        assert_eq!(row.icon, RowIcon::Mime("application/pdf".into()));
        assert!(fx.metadata.get_u64(&uri, MTIME_KEY).is_some());
        assert_eq!(fx.metadata.get_string(&uri, THUMBNAIL_PATH_KEY), None);
        assert_eq!(fx.metadata.get_u64(&uri, NO_THUMBNAIL_KEY), Some(1));
    }

    #[test]
    fn unreadable_document_is_not_reloaded_until_it_changes() {
        let mut fx = Fixture::new();
        let uri = fx.add_document("broken.pdf", 10);
        fx.model.refresh();
        fx.deliver(JobOutcome::Loaded(None));

        let pushed_before = fx.scheduler.pushed.borrow().len();
        fx.model.refresh();
        let row = fx.model.row(0).unwrap();
        assert_eq!(row.state, RowState::ReadyNoThumbnail);
        assert_eq!(row.job, None);
        assert!(matches!(row.icon, RowIcon::Mime(_)));
        assert_eq!(fx.scheduler.pushed.borrow().len(), pushed_before);

        // A newer file makes the record stale again.
        let file_time = file_mtime(&uri_to_path(&uri).unwrap()).unwrap();
        fx.metadata.set_u64(&uri, MTIME_KEY, file_time - 1);
        fx.model.refresh();
        assert_eq!(fx.model.row(0).unwrap().state, RowState::Loading);
    }

    #[test]
    fn rendering_after_a_failure_clears_the_marker() {
        let mut fx = Fixture::new();
        let uri = fx.add_document("a.pdf", 10);
        fx.metadata.set_u64(&uri, NO_THUMBNAIL_KEY, 1);
        fx.model.refresh();

        fx.deliver(JobOutcome::Loaded(Some(Arc::new(FakeDocument(10.0, 10.0)))));
        fx.deliver(JobOutcome::Thumbnailed(Some(page())));
        assert_eq!(fx.metadata.get_u64(&uri, NO_THUMBNAIL_KEY), None);
        assert!(fx.metadata.get_string(&uri, THUMBNAIL_PATH_KEY).is_some());
    }

    #[test]
    fn documents_leaving_the_registry_lose_their_cache() {
        let mut fx = Fixture::new();
        let kept = fx.add_document("kept.pdf", 20);
        let gone = fx.add_document("gone.pdf", 10);
        fx.model.refresh();
        let loads = fx.scheduler.pushed.borrow().clone();
        for (job, _, row) in loads {
            let outcome = JobOutcome::Loaded(Some(Arc::new(FakeDocument(10.0, 10.0))));
            fx.model.handle_event(JobEvent { job, row, outcome });
        }
        let renders = fx.scheduler.pushed.borrow()[2..].to_vec();
        for (job, _, row) in renders {
            let outcome = JobOutcome::Thumbnailed(Some(page()));
            fx.model.handle_event(JobEvent { job, row, outcome });
        }
        let gone_thumb = fx.metadata.get_string(&gone, THUMBNAIL_PATH_KEY).unwrap();
        assert!(Path::new(&gone_thumb).exists());

        fx.registry.0.borrow_mut().retain(|e| e.uri != gone);
        fx.model.refresh();
        assert!(!Path::new(&gone_thumb).exists());
        assert_eq!(fx.metadata.uris(), [kept]);
        assert_eq!(fx.model.row(0).unwrap().state, RowState::Ready);
    }

    #[test]
    fn refresh_cancels_in_flight_jobs_and_drops_their_events() {
        let mut fx = Fixture::new();
        fx.add_document("a.pdf", 10);
        fx.model.refresh();
        let (old_job, _, old_row) = fx.scheduler.last();

        fx.model.refresh();
        assert_eq!(*fx.scheduler.cancelled.borrow(), [old_job]);

        let stale = JobEvent {
            job: old_job,
            row: old_row,
            outcome: JobOutcome::Thumbnailed(Some(page())),
        };
        assert_eq!(fx.model.handle_event(stale), None);
        assert_eq!(fx.model.row(0).unwrap().state, RowState::Loading);
    }

    #[test]
    fn events_for_superseded_jobs_are_ignored() {
        let mut fx = Fixture::new();
        fx.add_document("a.pdf", 10);
        fx.model.refresh();
        let (load_job, _, row) = fx.scheduler.last();
        fx.deliver(JobOutcome::Loaded(Some(Arc::new(FakeDocument(10.0, 10.0)))));

        let replay = JobEvent {
            job: load_job,
            row,
            outcome: JobOutcome::Loaded(None),
        };
        assert_eq!(fx.model.handle_event(replay), None);
        assert_eq!(fx.model.row(0).unwrap().state, RowState::Thumbnailing);
    }

    #[test]
    fn remote_entries_skip_the_cache() {
        let mut fx = Fixture::new();
        let mut remote = entry("remote.pdf", 5, true);
        remote.uri = "sftp://host/remote.pdf".into();
        remote.is_local = false;
        fx.registry.0.borrow_mut().push(remote);

        fx.model.refresh();
        assert!(!fx.model.row(0).unwrap().has_metadata);
        fx.deliver(JobOutcome::Loaded(None));
        assert_eq!(fx.model.row(0).unwrap().state, RowState::ReadyNoThumbnail);
    }

    #[test]
    fn empty_page_degrades_to_placeholder() {
        let mut fx = Fixture::new();
        fx.add_document("a.pdf", 10);
        fx.model.refresh();
        fx.deliver(JobOutcome::Loaded(Some(Arc::new(FakeDocument(0.0, 0.0)))));
        assert_eq!(fx.model.row(0).unwrap().state, RowState::ReadyNoThumbnail);
    }

    #[test]
    fn never_shows_more_than_the_cap() {
        let mut fx = Fixture::new();
        for i in 0..25 {
            fx.add_document(&format!("d{i}.pdf"), i);
        }
        fx.model.refresh();
        assert_eq!(fx.model.len(), 20);
        let times: Vec<_> = fx.model.rows().iter().map(|r| r.modified).collect();
        assert_eq!(times, (5..25).rev().collect::<Vec<_>>());
    }

    #[test]
    fn activation_selects_the_row() {
        let mut fx = Fixture::new();
        let uri = fx.add_document("a.pdf", 10);
        fx.model.refresh();
        assert_eq!(fx.model.activate(0), Some(uri));
        assert!(fx.model.row(0).unwrap().selected);
        assert_eq!(fx.model.activate(7), None);
    }

    #[test]
    fn dropping_the_model_cancels_jobs() {
        let fx = Fixture::new();
        fx.add_document("a.pdf", 10);
        let Fixture {
            mut model,
            scheduler,
            ..
        } = fx;
        model.refresh();
        drop(model);
        assert_eq!(scheduler.cancelled.borrow().len(), 1);
    }
}

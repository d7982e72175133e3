//! Paginated entity tables and the command that fills them.
//!
//! Each [`EntityKind`] owns one [`EntityTableState`]. Changing page or page
//! size moves the table to `Loading` and dispatches
//! [`FetchEntityPageCommand`]. The response replaces records, headers and
//! pagination in a single update; a failure only sets the error.

use std::any::Any;
use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use console_states::{
    Command, CommandFuture, CommandSnapshot, State, StateCtx, Updater, snapshot_clone,
};
use log::{info, warn};
use ustr::Ustr;

use crate::api::{ApiClient, PageData};
use crate::headers::{EntityKind, HeaderMap};
use crate::pagination::{PaginationEvent, PaginationState, PaginationView};
use crate::record::EntityRecord;
use crate::{ApiError, BusinessConfig, Session};

pub const FALLBACK_ERROR: &str = "Something went wrong while loading data.";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TableStatus {
    #[default]
    Loading,
    Error(String),
    Ready,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnSort {
    pub key: Ustr,
    pub order: SortOrder,
}

/// One page request, stamped with the tables' epoch so responses that
/// arrive after a reset are dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchRequest {
    pub kind: EntityKind,
    /// One-based.
    pub page: u32,
    pub size: u32,
    pub epoch: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityTableState {
    kind: EntityKind,
    status: TableStatus,
    records: Vec<EntityRecord>,
    headers: HeaderMap,
    pagination: PaginationState,
    sort: Option<ColumnSort>,
    last_updated: Option<DateTime<Utc>>,
    fetches: u64,
}

impl EntityTableState {
    pub fn new(kind: EntityKind, page_size: u32) -> Self {
        Self {
            kind,
            status: TableStatus::Loading,
            records: Vec::new(),
            headers: HeaderMap::new(),
            pagination: PaginationState::new(page_size),
            sort: None,
            last_updated: None,
            fetches: 0,
        }
    }

    pub fn kind(&self) -> EntityKind {
        self.kind
    }

    pub fn status(&self) -> &TableStatus {
        &self.status
    }

    pub fn is_loading(&self) -> bool {
        self.status == TableStatus::Loading
    }

    pub fn error(&self) -> Option<&str> {
        match &self.status {
            TableStatus::Error(message) => Some(message),
            _ => None,
        }
    }

    pub fn records(&self) -> &[EntityRecord] {
        &self.records
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn pagination(&self) -> &PaginationState {
        &self.pagination
    }

    pub fn pagination_view(&self) -> PaginationView {
        self.pagination.view()
    }

    pub fn sort(&self) -> Option<ColumnSort> {
        self.sort
    }

    pub fn last_updated(&self) -> Option<DateTime<Utc>> {
        self.last_updated
    }

    /// True until the first fetch was issued.
    pub fn needs_initial_fetch(&self) -> bool {
        self.fetches == 0
    }

    /// Enter `Loading` and describe the page to request.
    pub fn begin_fetch(&mut self, epoch: u64) -> FetchRequest {
        self.status = TableStatus::Loading;
        self.fetches += 1;
        FetchRequest {
            kind: self.kind,
            page: self.pagination.current_page,
            size: self.pagination.page_size,
            epoch,
        }
    }

    pub fn apply_page(&mut self, page: PageData, fetched_at: DateTime<Utc>) {
        let sample = page.content.first().map(EntityRecord::fields);
        self.headers = self.kind.header_provider().headers(sample);
        self.pagination.apply(&page);
        self.records = page.content;
        self.status = TableStatus::Ready;
        self.last_updated = Some(fetched_at);

        if let Some(sort) = self.sort
            && self.headers.label(&sort.key).is_none()
        {
            self.sort = None;
        }
    }

    /// Record a failed fetch. Records and pagination keep their last values.
    pub fn fail(&mut self, err: &ApiError) {
        let message = err.to_string();
        self.status = TableStatus::Error(if message.trim().is_empty() {
            FALLBACK_ERROR.to_owned()
        } else {
            message
        });
    }

    /// Apply a pagination event. Returns whether a fetch is needed.
    pub fn handle(&mut self, event: PaginationEvent) -> bool {
        match event {
            PaginationEvent::PageChanged(page) => self.pagination.set_page(page),
            PaginationEvent::PageSizeChanged(size) => self.pagination.set_page_size(size),
        }
    }

    /// Cycle `key` through ascending, descending and unsorted.
    pub fn toggle_sort(&mut self, key: &str) {
        let key = Ustr::from(key);
        self.sort = match self.sort {
            Some(ColumnSort {
                key: current,
                order: SortOrder::Ascending,
            }) if current == key => Some(ColumnSort {
                key,
                order: SortOrder::Descending,
            }),
            Some(ColumnSort {
                key: current,
                order: SortOrder::Descending,
            }) if current == key => None,
            _ => Some(ColumnSort {
                key,
                order: SortOrder::Ascending,
            }),
        };
    }

    /// Records of the current page in display order.
    pub fn rows(&self) -> Vec<&EntityRecord> {
        let mut rows: Vec<&EntityRecord> = self.records.iter().collect();
        if let Some(ColumnSort { key, order }) = self.sort {
            rows.sort_by(|a, b| match order {
                SortOrder::Ascending => a.compare_field(b, &key),
                SortOrder::Descending => b.compare_field(a, &key),
            });
        }
        rows
    }
}

/// Every entity table, keyed by kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityTablesState {
    tables: BTreeMap<EntityKind, EntityTableState>,
    page_size: u32,
    epoch: u64,
}

impl Default for EntityTablesState {
    fn default() -> Self {
        Self::new(crate::pagination::DEFAULT_PAGE_SIZE)
    }
}

impl EntityTablesState {
    pub fn new(page_size: u32) -> Self {
        let tables = EntityKind::ALL
            .into_iter()
            .map(|kind| (kind, EntityTableState::new(kind, page_size)))
            .collect();
        Self {
            tables,
            page_size,
            epoch: 0,
        }
    }

    pub fn table(&self, kind: EntityKind) -> &EntityTableState {
        match self.tables.get(&kind) {
            Some(table) => table,
            None => unreachable!("every entity kind has a table"),
        }
    }

    pub fn table_mut(&mut self, kind: EntityKind) -> &mut EntityTableState {
        let page_size = self.page_size;
        self.tables
            .entry(kind)
            .or_insert_with(|| EntityTableState::new(kind, page_size))
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Forget every loaded page, e.g. on logout. In-flight responses are
    /// discarded when they arrive.
    pub fn reset(&mut self) {
        let epoch = self.epoch + 1;
        *self = Self::new(self.page_size);
        self.epoch = epoch;
    }

    fn begin_fetch(&mut self, kind: EntityKind) -> FetchRequest {
        let epoch = self.epoch;
        self.table_mut(kind).begin_fetch(epoch)
    }

    fn resolve(&mut self, request: FetchRequest, result: Result<PageData, ApiError>, at: DateTime<Utc>) {
        if request.epoch != self.epoch {
            info!("Dropping {:?} page from a previous session", request.kind);
            return;
        }
        let table = self.table_mut(request.kind);
        match result {
            Ok(page) => table.apply_page(page, at),
            Err(err) => table.fail(&err),
        }
    }
}

impl State for EntityTablesState {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// The page [`FetchEntityPageCommand`] should load next.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PendingFetch {
    pub request: Option<FetchRequest>,
}

impl State for PendingFetch {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn snapshot(&self) -> Option<Box<dyn Any + Send>> {
        snapshot_clone(self)
    }
}

/// Loads the page described by [`PendingFetch`].
///
/// Superseded requests are not cancelled; whichever response resolves last
/// is what the table shows.
#[derive(Debug, Default)]
pub struct FetchEntityPageCommand;

impl Command for FetchEntityPageCommand {
    fn run(&self, snap: CommandSnapshot, updater: Updater) -> CommandFuture {
        let Some(request) = snap.state::<PendingFetch>().request else {
            warn!("FetchEntityPageCommand dispatched without a pending request");
            return Box::pin(async {});
        };
        let config = snap.state::<BusinessConfig>();
        let client = ApiClient::new(config.api_base_url, snap.state::<Session>());

        Box::pin(async move {
            info!(
                "Fetching {} page {} (size {})",
                request.kind.service(),
                request.page,
                request.size
            );
            let result = client
                .fetch_page(request.kind.service(), request.page, request.size)
                .await;
            match &result {
                Ok(page) => info!(
                    "Fetched {} rows of {}",
                    page.content.len(),
                    request.kind.service()
                ),
                Err(err) => warn!("Fetching {} failed: {err}", request.kind.service()),
            }

            let fetched_at = Utc::now();
            updater.update::<EntityTablesState>(move |tables| {
                tables.resolve(request, result, fetched_at);
            });
        })
    }
}

/// Put the table of `kind` into `Loading` and fetch its current page.
pub fn request_fetch(ctx: &mut StateCtx, kind: EntityKind) {
    let request = ctx.state_mut::<EntityTablesState>().begin_fetch(kind);
    ctx.state_mut::<PendingFetch>().request = Some(request);
    ctx.dispatch::<FetchEntityPageCommand>();
}

/// Fetch the table of `kind` unless it was already requested once.
pub fn ensure_loaded(ctx: &mut StateCtx, kind: EntityKind) {
    if ctx.state::<EntityTablesState>().table(kind).needs_initial_fetch() {
        request_fetch(ctx, kind);
    }
}

/// Route a pagination control event to its table, refetching if needed.
pub fn handle_pagination(ctx: &mut StateCtx, kind: EntityKind, event: PaginationEvent) {
    let changed = ctx
        .state_mut::<EntityTablesState>()
        .table_mut(kind)
        .handle(event);
    if changed {
        request_fetch(ctx, kind);
    }
}

//! Listing View for Jobflow.
//!
//! Owns the filter state and fetch lifecycle of one listing grid. Every fetch
//! takes a [`FetchTicket`] stamped with a generation number; only the ticket of
//! the latest fetch may commit its result, so when requests overlap the grid
//! always shows the response to the most recent parameters.

use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use serde::Serialize;
use tracing::{debug, warn};

use crate::managers::bookmark_manager::BookmarkManagerTrait;
use crate::managers::listing_card::ListingCard;
use crate::services::api_client::ApiClient;
use crate::services::query_builder::QueryState;
use crate::types::errors::{RequestError, ViewError};
use crate::types::listing::{ListPage, ListingRecord, Pagination};
use crate::types::query::QueryParams;

/// Placeholder cards shown while loading.
pub const SKELETON_COUNT: usize = 8;

/// Page buttons shown on either side of the current page.
const PAGE_WINDOW: u32 = 2;

/// Anything that can serve a page of `T` for a set of parameters.
#[async_trait]
pub trait ListingSource<T: ListingRecord>: Send + Sync {
    async fn fetch_page(&self, params: &QueryParams) -> Result<ListPage<T>, RequestError>;
}

#[async_trait]
impl<T: ListingRecord> ListingSource<T> for ApiClient {
    async fn fetch_page(&self, params: &QueryParams) -> Result<ListPage<T>, RequestError> {
        self.listings::<T>().list(params).await
    }
}

/// Proof that a fetch was started, carrying the parameters it was started with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    pub generation: u64,
    pub params: QueryParams,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ViewState<T> {
    Idle,
    Loading,
    Success(ListPage<T>),
    Error(String),
}

/// Page navigation, present only when there is more than one page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaginationControls {
    pub current: u32,
    pub total_pages: u32,
    pub total: u64,
    /// Page buttons around the current page.
    pub pages: Vec<u32>,
    pub previous_enabled: bool,
    pub next_enabled: bool,
}

impl PaginationControls {
    fn new(current: u32, meta: &Pagination) -> Option<Self> {
        if meta.total_pages <= 1 {
            return None;
        }
        let first = current.saturating_sub(PAGE_WINDOW).max(1);
        let last = current.saturating_add(PAGE_WINDOW).min(meta.total_pages);
        Some(Self {
            current,
            total_pages: meta.total_pages,
            total: meta.total,
            pages: (first..=last).collect(),
            previous_enabled: current > 1,
            next_enabled: current < meta.total_pages,
        })
    }
}

/// What the grid should draw right now.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ViewRender<T: ListingRecord> {
    Loading {
        skeletons: usize,
    },
    Error {
        message: String,
        can_retry: bool,
    },
    Empty {
        has_active_filters: bool,
    },
    Results {
        cards: Vec<ListingCard<T>>,
        pagination: Option<PaginationControls>,
    },
}

/// Filter state plus fetch lifecycle for one kind of listing.
#[derive(Debug, Clone)]
pub struct ListingView<T: ListingRecord> {
    query: QueryState,
    state: ViewState<T>,
    generation: u64,
    last_pagination: Option<Pagination>,
    /// Query of the latest fetch; `last_pagination` is only valid against it.
    fetched_query: Option<QueryState>,
}

impl<T: ListingRecord> Default for ListingView<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ListingRecord> ListingView<T> {
    pub fn new() -> Self {
        Self::from_query(QueryState::new(T::KIND))
    }

    pub fn with_page_size(page_size: u32) -> Self {
        Self::from_query(QueryState::with_limit(T::KIND, page_size))
    }

    /// A view over an already configured query.
    pub fn from_query(query: QueryState) -> Self {
        Self {
            query,
            state: ViewState::Idle,
            generation: 0,
            last_pagination: None,
            fetched_query: None,
        }
    }

    pub fn query(&self) -> &QueryState {
        &self.query
    }

    /// Filter setters live on [`QueryState`]; a `true` result means refetch.
    pub fn query_mut(&mut self) -> &mut QueryState {
        &mut self.query
    }

    pub fn state(&self) -> &ViewState<T> {
        &self.state
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, ViewState::Loading)
    }

    /// Enters `Loading` and supersedes any fetch still in flight.
    ///
    /// Page bounds from the previous result are dropped once the filters
    /// change, so paging waits for the new result's metadata.
    pub fn begin_fetch(&mut self) -> FetchTicket {
        let filters_changed = self
            .fetched_query
            .as_ref()
            .is_some_and(|previous| !previous.same_filters(&self.query));
        if filters_changed {
            self.last_pagination = None;
        }
        self.fetched_query = Some(self.query.clone());
        self.generation += 1;
        self.state = ViewState::Loading;
        FetchTicket {
            generation: self.generation,
            params: self.query.to_params(),
        }
    }

    /// Commits `result` if `ticket` belongs to the latest fetch.
    ///
    /// Returns `false` (and changes nothing) for a superseded ticket.
    pub fn complete(
        &mut self,
        ticket: &FetchTicket,
        result: Result<ListPage<T>, RequestError>,
    ) -> bool {
        if ticket.generation != self.generation {
            debug!(
                kind = %T::KIND,
                stale = ticket.generation,
                current = self.generation,
                "Dropping stale listing response"
            );
            return false;
        }

        self.state = match result {
            Ok(page) => {
                self.last_pagination = page.pagination;
                ViewState::Success(page)
            }
            Err(e) => {
                warn!(kind = %T::KIND, error = %e, "Listing fetch failed");
                ViewState::Error(e.to_string())
            }
        };
        true
    }

    /// Controls for the current result, `None` unless there are 2+ pages.
    pub fn pagination_controls(&self) -> Option<PaginationControls> {
        match &self.state {
            ViewState::Success(page) => page
                .pagination
                .as_ref()
                .and_then(|meta| PaginationControls::new(self.query.page(), meta)),
            _ => None,
        }
    }

    /// Moves to `page`. Returns `Ok(true)` when the page changed and a refetch
    /// is due; pages outside `1..=totalPages` leave everything unchanged.
    pub fn go_to_page(&mut self, page: u32) -> Result<bool, ViewError> {
        let meta = self.last_pagination.ok_or(ViewError::NoPagination)?;
        if page == 0 || page > meta.total_pages {
            return Err(ViewError::PageOutOfRange {
                page,
                total_pages: meta.total_pages,
            });
        }
        Ok(self.query.set_page(page)?)
    }

    pub fn next_page(&mut self) -> Result<bool, ViewError> {
        self.go_to_page(self.query.page().saturating_add(1))
    }

    pub fn previous_page(&mut self) -> Result<bool, ViewError> {
        self.go_to_page(self.query.page().saturating_sub(1))
    }

    /// Builds the draw model. Cards read their bookmark flags from `bookmarks`.
    pub fn render(&self, bookmarks: &dyn BookmarkManagerTrait) -> ViewRender<T> {
        match &self.state {
            ViewState::Idle | ViewState::Loading => ViewRender::Loading {
                skeletons: SKELETON_COUNT,
            },
            ViewState::Error(message) => ViewRender::Error {
                message: message.clone(),
                can_retry: true,
            },
            ViewState::Success(page) if page.items.is_empty() => ViewRender::Empty {
                has_active_filters: self.query.has_active_filters(),
            },
            ViewState::Success(page) => ViewRender::Results {
                cards: page
                    .items
                    .iter()
                    .map(|record| ListingCard::new(record.clone(), bookmarks))
                    .collect(),
                pagination: self.pagination_controls(),
            },
        }
    }
}

/// Drives a shared [`ListingView`] against a [`ListingSource`].
pub struct ListingController<T: ListingRecord, S: ListingSource<T>> {
    view: Arc<Mutex<ListingView<T>>>,
    source: Arc<S>,
}

impl<T: ListingRecord, S: ListingSource<T>> Clone for ListingController<T, S> {
    fn clone(&self) -> Self {
        Self {
            view: Arc::clone(&self.view),
            source: Arc::clone(&self.source),
        }
    }
}

impl<T: ListingRecord, S: ListingSource<T>> ListingController<T, S> {
    pub fn new(view: ListingView<T>, source: Arc<S>) -> Self {
        Self {
            view: Arc::new(Mutex::new(view)),
            source,
        }
    }

    /// Locks the view. The guard must not be held across an await.
    pub fn view(&self) -> MutexGuard<'_, ListingView<T>> {
        self.view.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Fetches with the current parameters. Returns whether this fetch's
    /// result was committed (a newer fetch may have superseded it).
    pub async fn fetch(&self) -> bool {
        let ticket = self.view().begin_fetch();
        let result = self.source.fetch_page(&ticket.params).await;
        self.view().complete(&ticket, result)
    }

    /// Re-runs the last query; used by the error state's retry button.
    pub async fn retry(&self) -> bool {
        self.fetch().await
    }

    /// Moves to `page` and fetches it when the page changed.
    pub async fn go_to_page(&self, page: u32) -> Result<bool, ViewError> {
        let changed = self.view().go_to_page(page)?;
        if changed {
            self.fetch().await;
        }
        Ok(changed)
    }
}

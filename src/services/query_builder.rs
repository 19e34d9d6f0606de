//! Filter/query builder: the UI filter state of one listing view and its
//! translation into list-request parameters.
//!
//! Editing any filter sends the view back to page 1; editing only the page
//! leaves the filters alone. [`QueryState::to_params`] is pure.

use crate::types::errors::QueryError;
use crate::types::kind::{KindSpec, ListingKind};
use crate::types::query::QueryParams;
use crate::types::settings::DEFAULT_PAGE_SIZE;

/// Filter state of a listing view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryState {
    kind: ListingKind,
    page: u32,
    limit: u32,
    search: String,
    /// One slot per facet, aligned with `kind.spec().facets`.
    facets: Vec<Option<String>>,
    featured_only: bool,
}

impl QueryState {
    /// Fresh state: no filters, page 1, default page size.
    pub fn new(kind: ListingKind) -> Self {
        Self::with_limit(kind, DEFAULT_PAGE_SIZE)
    }

    pub fn with_limit(kind: ListingKind, limit: u32) -> Self {
        Self {
            kind,
            page: 1,
            limit: limit.max(1),
            search: String::new(),
            facets: vec![None; kind.spec().facets.len()],
            featured_only: false,
        }
    }

    pub fn kind(&self) -> ListingKind {
        self.kind
    }

    fn spec(&self) -> &'static KindSpec {
        self.kind.spec()
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn featured_only(&self) -> bool {
        self.featured_only
    }

    pub fn facet(&self, key: &str) -> Option<&str> {
        let index = self.facet_index(key)?;
        self.facets[index].as_deref()
    }

    fn facet_index(&self, key: &str) -> Option<usize> {
        self.spec().facets.iter().position(|f| f.key == key)
    }

    /// True when any filter other than the page is set.
    pub fn has_active_filters(&self) -> bool {
        !self.search.trim().is_empty() || self.featured_only || self.facets.iter().any(Option::is_some)
    }

    /// True when both states request the same result set, ignoring the page.
    pub fn same_filters(&self, other: &QueryState) -> bool {
        self.kind == other.kind
            && self.limit == other.limit
            && self.search.trim() == other.search.trim()
            && self.facets == other.facets
            && self.featured_only == other.featured_only
    }

    /// Returns `true` if the search text changed (and the page was reset).
    /// Surrounding whitespace is not a change.
    pub fn set_search(&mut self, search: &str) -> bool {
        if self.search.trim() == search.trim() {
            return false;
        }
        self.search = search.to_string();
        self.page = 1;
        true
    }

    /// Selects `value` for the facet `key`; an empty value unsets it.
    ///
    /// Returns `Ok(true)` if the selection changed (and the page was reset).
    pub fn set_facet(&mut self, key: &str, value: &str) -> Result<bool, QueryError> {
        let index = self.facet_index(key).ok_or_else(|| QueryError::UnknownFacet {
            kind: self.kind.to_string(),
            facet: key.to_string(),
        })?;

        let next = if value.is_empty() {
            None
        } else if self.spec().facets[index].options.iter().any(|o| *o == value) {
            Some(value.to_string())
        } else {
            return Err(QueryError::InvalidOption {
                facet: key.to_string(),
                value: value.to_string(),
            });
        };

        if self.facets[index] == next {
            return Ok(false);
        }
        self.facets[index] = next;
        self.page = 1;
        Ok(true)
    }

    pub fn clear_facet(&mut self, key: &str) -> Result<bool, QueryError> {
        self.set_facet(key, "")
    }

    /// Returns `true` if the flag changed (and the page was reset).
    pub fn set_featured_only(&mut self, featured_only: bool) -> bool {
        if self.featured_only == featured_only {
            return false;
        }
        self.featured_only = featured_only;
        self.page = 1;
        true
    }

    /// Moves to `page` without touching any filter.
    pub fn set_page(&mut self, page: u32) -> Result<bool, QueryError> {
        if page == 0 {
            return Err(QueryError::InvalidPage(page));
        }
        if self.page == page {
            return Ok(false);
        }
        self.page = page;
        Ok(true)
    }

    /// Resets every filter and the page. Returns `true` if anything changed.
    pub fn clear_filters(&mut self) -> bool {
        let cleared = Self::with_limit(self.kind, self.limit);
        if *self == cleared {
            return false;
        }
        *self = cleared;
        true
    }

    /// Request parameters: `page`, `limit`, trimmed `search`, set facets in
    /// declaration order, then `featured=true` when featured-only is on.
    pub fn to_params(&self) -> QueryParams {
        let mut params = QueryParams::new();
        params.push("page", self.page).push("limit", self.limit);
        params.push("search", self.search.trim());
        for (spec, value) in self.spec().facets.iter().zip(&self.facets) {
            params.push_opt(spec.key, value.as_deref());
        }
        if self.featured_only {
            params.push("featured", true);
        }
        params
    }
}

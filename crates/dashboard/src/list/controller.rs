use std::collections::HashSet;
use std::sync::{Mutex, MutexGuard};

use smp_client::ApiError;
use smp_core::{Entity, ListFilter, PageRequest, SortState};

use super::source::{BulkDelete, PageSource};
use crate::debounce::KeyedDebouncer;
use crate::pagination::{Pagination, total_pages};
use crate::sequence::Sequence;
use crate::table::TableEvent;

/// How a list walks through its pages. Fixed per screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PagingMode {
    /// One page at a time, with an explicit page index and total.
    Offset { page_size: u32 },
    /// Pages are appended as a sentinel scrolls into view.
    Infinite { page_size: u32 },
}

impl PagingMode {
    pub fn page_size(&self) -> u32 {
        match self {
            PagingMode::Offset { page_size } | PagingMode::Infinite { page_size } => *page_size,
        }
    }

    pub fn is_infinite(&self) -> bool {
        matches!(self, PagingMode::Infinite { .. })
    }
}

#[derive(Debug)]
struct ListState<T: Entity, F> {
    filters: F,
    sort: SortState,
    page: u32,
    rows: Vec<T>,
    total_count: u64,
    is_loading: bool,
    has_more: bool,
    loaded: bool,
    selection: HashSet<T::Id>,
    last_error: Option<String>,
}

/// Read-only copy of a list's state for rendering.
#[derive(Debug, Clone)]
pub struct ListSnapshot<T: Entity, F> {
    pub filters: F,
    pub sort: SortState,
    pub page: u32,
    pub page_size: u32,
    pub rows: Vec<T>,
    pub total_count: u64,
    pub total_pages: u32,
    pub is_loading: bool,
    /// Infinite mode: whether another page can be appended.
    pub has_more: bool,
    pub selection: HashSet<T::Id>,
    pub last_error: Option<String>,
    loaded: bool,
}

impl<T: Entity, F> ListSnapshot<T, F> {
    /// A fetch completed and there is nothing to show.
    pub fn is_empty(&self) -> bool {
        self.loaded && !self.is_loading && self.rows.is_empty()
    }

    pub fn all_selected(&self) -> bool {
        !self.rows.is_empty() && self.rows.iter().all(|r| self.selection.contains(&r.id()))
    }
}

enum Apply {
    Replace,
    Append,
}

/// Filter -> page -> sort -> fetch orchestration for one screen.
///
/// Only the most recent fetch may update state: each fetch takes a ticket and
/// a response whose ticket has been superseded is dropped. While anything is
/// in flight `is_loading` stays set and the previous rows stay visible.
pub struct ListController<T, S>
where
    T: Entity + Clone + Send + Sync + 'static,
    S: PageSource<T>,
{
    source: S,
    mode: PagingMode,
    state: Mutex<ListState<T, S::Filter>>,
    seq: Sequence,
}

impl<T, S> ListController<T, S>
where
    T: Entity + Clone + Send + Sync + 'static,
    S: PageSource<T>,
{
    pub fn new(source: S, mode: PagingMode) -> Self {
        Self::with_filters(source, mode, S::Filter::default())
    }

    pub fn with_filters(source: S, mode: PagingMode, filters: S::Filter) -> Self {
        Self {
            source,
            mode,
            state: Mutex::new(ListState {
                filters,
                sort: SortState::unsorted(),
                page: 0,
                rows: Vec::new(),
                total_count: 0,
                is_loading: false,
                has_more: true,
                loaded: false,
                selection: HashSet::new(),
                last_error: None,
            }),
            seq: Sequence::new(),
        }
    }

    pub fn mode(&self) -> PagingMode {
        self.mode
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    fn lock(&self) -> MutexGuard<'_, ListState<T, S::Filter>> {
        self.state.lock().unwrap_or_else(|p| p.into_inner())
    }

    pub fn snapshot(&self) -> ListSnapshot<T, S::Filter> {
        let st = self.lock();
        let page_size = self.mode.page_size();
        ListSnapshot {
            filters: st.filters.clone(),
            sort: st.sort.clone(),
            page: st.page,
            page_size,
            rows: st.rows.clone(),
            total_count: st.total_count,
            total_pages: total_pages(st.total_count, page_size),
            is_loading: st.is_loading,
            has_more: st.has_more,
            selection: st.selection.clone(),
            last_error: st.last_error.clone(),
            loaded: st.loaded,
        }
    }

    /// Offset-mode pagination control state.
    pub fn pagination(&self) -> Pagination {
        let st = self.lock();
        Pagination::new(st.page, self.mode.page_size(), st.total_count)
    }

    /// Re-fetch what is currently shown (infinite lists start over).
    pub async fn refresh(&self) -> Result<(), ApiError> {
        let page = if self.mode.is_infinite() {
            0
        } else {
            self.lock().page
        };
        self.fetch(page, Apply::Replace).await
    }

    /// Replace the filters, go back to page 0 and drop the selection.
    ///
    /// An inconsistent filter is rejected before any state changes.
    pub async fn set_filters(&self, filters: S::Filter) -> Result<(), ApiError> {
        filters.to_query_params()?;
        {
            let mut st = self.lock();
            st.filters = filters;
            st.page = 0;
            st.selection.clear();
        }
        self.fetch(0, Apply::Replace).await
    }

    /// Filter input handler: applies `filters` once they have been stable
    /// for the quiet period and differ from the last applied ones.
    /// Returns whether a fetch was made.
    pub async fn set_filters_debounced(
        &self,
        filters: S::Filter,
        debouncer: &KeyedDebouncer<S::Filter>,
    ) -> Result<bool, ApiError> {
        match debouncer.settle(filters).await {
            Some(filters) => self.set_filters(filters).await.map(|_| true),
            None => Ok(false),
        }
    }

    /// Header click on `field`; restarts from page 0.
    pub async fn set_sort(&self, field: &str) -> Result<(), ApiError> {
        {
            let mut st = self.lock();
            st.sort = st.sort.cycle(field);
            st.page = 0;
        }
        self.fetch(0, Apply::Replace).await
    }

    /// Jump to page `n`, clamped to the known range. Offset mode only.
    pub async fn set_page(&self, n: u32) -> Result<(), ApiError> {
        if self.mode.is_infinite() {
            tracing::debug!("set_page ignored in infinite mode");
            return Ok(());
        }
        let target = {
            let st = self.lock();
            let pages = total_pages(st.total_count, self.mode.page_size());
            if st.loaded && pages > 0 { n.min(pages - 1) } else { n }
        };
        self.fetch(target, Apply::Replace).await
    }

    /// Append the next page. Infinite mode only; a no-op while loading or
    /// once everything is in. Returns whether a page was requested.
    pub async fn load_next(&self) -> Result<bool, ApiError> {
        if !self.mode.is_infinite() {
            return Ok(false);
        }
        let next = {
            let st = self.lock();
            if st.is_loading || !st.has_more {
                return Ok(false);
            }
            if st.loaded { st.page + 1 } else { 0 }
        };
        let apply = if next == 0 { Apply::Replace } else { Apply::Append };
        self.fetch(next, apply).await.map(|_| true)
    }

    /// The scroll sentinel became visible.
    pub async fn on_sentinel_visible(&self) -> Result<bool, ApiError> {
        self.load_next().await
    }

    async fn fetch(&self, page: u32, apply: Apply) -> Result<(), ApiError> {
        let (ticket, req, filters) = {
            let mut st = self.lock();
            st.is_loading = true;
            let req = PageRequest::new(page, self.mode.page_size()).with_sort(st.sort.spec().cloned());
            (self.seq.next(), req, st.filters.clone())
        };

        let outcome = self.source.fetch_page(&req, &filters).await;

        let mut st = self.lock();
        if !self.seq.is_current(ticket) {
            tracing::warn!(page, "discarding stale page response");
            return Ok(());
        }
        st.is_loading = false;

        match outcome {
            Ok(fetched) => {
                st.has_more = !fetched.content.is_empty() && !fetched.page.is_last();
                st.total_count = fetched.page.total_elements;
                match apply {
                    Apply::Replace => st.rows = fetched.content,
                    Apply::Append => st.rows.extend(fetched.content),
                }
                st.page = page;
                st.loaded = true;
                st.last_error = None;
                Ok(())
            }
            Err(e) => {
                st.last_error = Some(e.user_message());
                Err(e)
            }
        }
    }

    // ─────────────────────────────────────────────────────────────────────
    // Selection
    // ─────────────────────────────────────────────────────────────────────

    pub fn toggle_row(&self, id: T::Id) {
        let mut st = self.lock();
        if !st.selection.remove(&id) {
            st.selection.insert(id);
        }
    }

    /// Select or clear every loaded row. Rows on other pages are untouched.
    pub fn set_all_selected(&self, selected: bool) {
        let mut st = self.lock();
        let ids: Vec<T::Id> = st.rows.iter().map(Entity::id).collect();
        for id in ids {
            if selected {
                st.selection.insert(id);
            } else {
                st.selection.remove(&id);
            }
        }
    }

    pub fn clear_selection(&self) {
        self.lock().selection.clear();
    }

    /// Selected ids, loaded rows first in display order.
    pub fn selected_ids(&self) -> Vec<T::Id> {
        let st = self.lock();
        let mut ids: Vec<T::Id> = st
            .rows
            .iter()
            .map(Entity::id)
            .filter(|id| st.selection.contains(id))
            .collect();
        for id in &st.selection {
            if !ids.contains(id) {
                ids.push(*id);
            }
        }
        ids
    }

    /// Apply a table interaction.
    pub async fn handle(&self, event: TableEvent<T::Id>) -> Result<(), ApiError> {
        match event {
            TableEvent::Sort(field) => self.set_sort(&field).await,
            TableEvent::SelectRow(id) => {
                self.toggle_row(id);
                Ok(())
            }
            TableEvent::SelectAllChange(selected) => {
                self.set_all_selected(selected);
                Ok(())
            }
        }
    }
}

impl<T, S> ListController<T, S>
where
    T: Entity + Clone + Send + Sync + 'static,
    S: PageSource<T> + BulkDelete<T::Id>,
{
    /// Delete every selected id, then drop them from the held rows.
    /// Returns how many ids were deleted.
    pub async fn delete_selected(&self) -> Result<usize, ApiError> {
        let ids = self.selected_ids();
        if ids.is_empty() {
            return Ok(0);
        }
        // Any page still in flight predates the delete.
        let ticket = self.seq.next();
        let outcome = self.source.delete_many(&ids).await;

        let mut st = self.lock();
        if self.seq.is_current(ticket) {
            st.is_loading = false;
        }
        outcome?;
        st.rows.retain(|r| !ids.contains(&r.id()));
        st.total_count = st.total_count.saturating_sub(ids.len() as u64);
        st.selection.clear();
        tracing::info!(count = ids.len(), "rows deleted");
        Ok(ids.len())
    }
}

// Items list controller.
// Owns the query, the fetched page, pagination, and retry for the list view.

use ratatui::widgets::ListState;
use tracing::{debug, error};

use crate::client::{ItemSource, RetryOutcome, RetryPolicy};
use crate::model::{Item, Query};

use super::loading::ActiveFlag;

/// One successful fetch cycle: a page of items plus the filtered total.
#[derive(Debug, Clone, PartialEq)]
pub struct PageResult {
    pub items: Vec<Item>,
    pub total: u64,
}

/// How a fetch cycle ended.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome {
    Loaded(PageResult),
    Failed(String),
    /// The fetch was deactivated before it could finish.
    Cancelled,
}

/// Fetch a page and the filtered count, retrying the pair as one attempt.
pub async fn fetch_page<S: ItemSource>(
    source: &S,
    query: &Query,
    retry: &RetryPolicy,
    active: &ActiveFlag,
) -> FetchOutcome {
    let outcome = retry
        .run(
            || active.is_active(),
            |_| async move {
                let items = source
                    .list_items(query)
                    .await
                    .map_err(|e| format!("Failed to fetch items: {e}"))?;
                let total = source
                    .count_items(&query.search)
                    .await
                    .map_err(|e| format!("Failed to fetch total items: {e}"))?;
                Ok::<_, String>(PageResult { items, total })
            },
        )
        .await;

    match outcome {
        RetryOutcome::Succeeded(page) => FetchOutcome::Loaded(page),
        RetryOutcome::Exhausted(e) => {
            error!(error = %e, "fetch error after retries");
            FetchOutcome::Failed(e)
        }
        RetryOutcome::Abandoned => FetchOutcome::Cancelled,
    }
}

/// Pages needed to show `total` items, never less than one.
pub fn total_pages(total: u64, page_size: u32) -> u32 {
    let pages = total.div_ceil(u64::from(page_size.max(1))).max(1);
    u32::try_from(pages).unwrap_or(u32::MAX)
}

/// State behind the items list view.
#[derive(Debug)]
pub struct ItemsController {
    /// Items on the current page.
    pub items: Vec<Item>,
    /// Items matching the search across all pages.
    pub total: u64,
    pub total_pages: u32,
    /// Last fetch error, cleared by the next success.
    pub error: Option<String>,
    pub loading: bool,
    /// Selected row within the current page.
    pub list_state: ListState,
    query: Query,
    retry: RetryPolicy,
    active: Option<ActiveFlag>,
}

impl ItemsController {
    pub fn new(page_size: u32, retry: RetryPolicy) -> Self {
        Self {
            items: Vec::new(),
            total: 0,
            total_pages: 1,
            error: None,
            loading: false,
            list_state: ListState::default(),
            query: Query::new(page_size),
            retry,
            active: None,
        }
    }

    pub fn query(&self) -> &Query {
        &self.query
    }

    pub fn current_page(&self) -> u32 {
        self.query.page
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        self.retry
    }

    /// Move to `page` if it is within `1..=total_pages`. Returns whether it changed.
    pub fn set_page(&mut self, page: u32) -> bool {
        if page < 1 || page > self.total_pages || page == self.query.page {
            return false;
        }
        self.query.page = page;
        true
    }

    pub fn next_page(&mut self) -> bool {
        self.set_page(self.query.page.saturating_add(1))
    }

    pub fn prev_page(&mut self) -> bool {
        self.set_page(self.query.page.saturating_sub(1))
    }

    /// Replace the search text and go back to page 1. Returns whether the query changed.
    pub fn set_search(&mut self, text: impl Into<String>) -> bool {
        let text = text.into();
        let changed = text != self.query.search || self.query.page != 1;
        self.query.search = text;
        self.query.page = 1;
        changed
    }

    /// Start a fetch for the current query, superseding any fetch in flight.
    pub fn begin_fetch(&mut self) -> (Query, ActiveFlag) {
        self.cancel();
        let flag = ActiveFlag::new();
        self.active = Some(flag.clone());
        self.loading = true;
        debug!(
            search = %self.query.search,
            page = self.query.page,
            "fetching items"
        );
        (self.query.clone(), flag)
    }

    /// Apply a fetch outcome. Ignored unless `flag` belongs to the current, active fetch.
    pub fn apply(&mut self, flag: &ActiveFlag, outcome: FetchOutcome) -> bool {
        let current = self
            .active
            .as_ref()
            .is_some_and(|active| active.same_as(flag));
        if !current || !flag.is_active() {
            return false;
        }

        match outcome {
            FetchOutcome::Loaded(page) => {
                self.total = page.total;
                self.total_pages = total_pages(page.total, self.query.page_size);
                self.items = page.items;
                self.error = None;
            }
            FetchOutcome::Failed(message) => {
                self.items.clear();
                self.total = 0;
                self.total_pages = 1;
                self.error = Some(message);
            }
            FetchOutcome::Cancelled => return false,
        }

        self.loading = false;
        self.active = None;
        self.reset_selection();
        true
    }

    /// Stop caring about the fetch in flight, if any.
    pub fn cancel(&mut self) {
        if let Some(flag) = self.active.take() {
            flag.deactivate();
        }
        self.loading = false;
    }

    /// Fetch the current query in place.
    pub async fn fetch<S: ItemSource>(&mut self, source: &S) -> bool {
        let (query, flag) = self.begin_fetch();
        let outcome = fetch_page(source, &query, &self.retry, &flag).await;
        self.apply(&flag, outcome)
    }

    /// Get the currently selected index.
    pub fn selected(&self) -> Option<usize> {
        self.list_state.selected()
    }

    /// Get the selected item.
    pub fn selected_item(&self) -> Option<&Item> {
        self.items.get(self.list_state.selected()?)
    }

    /// Select the next item in the list.
    pub fn select_next(&mut self) {
        if self.items.is_empty() {
            return;
        }
        let i = match self.list_state.selected() {
            Some(i) if i + 1 < self.items.len() => i + 1,
            Some(i) => i, // Stay at end
            None => 0,
        };
        self.list_state.select(Some(i));
    }

    /// Select the previous item in the list.
    pub fn select_prev(&mut self) {
        if self.items.is_empty() {
            return;
        }
        let i = self.list_state.selected().map_or(0, |i| i.saturating_sub(1));
        self.list_state.select(Some(i));
    }

    /// Reset selection to first item.
    pub fn reset_selection(&mut self) {
        if self.items.is_empty() {
            self.list_state.select(None);
        } else {
            self.list_state.select(Some(0));
        }
    }
}

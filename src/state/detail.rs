// Item detail controller.
// Loads one item by id for the detail view.

use tracing::{debug, warn};

use crate::client::ItemSource;
use crate::model::Item;

use super::loading::{ActiveFlag, LoadingState};

pub const ITEM_NOT_FOUND: &str = "Item not found";
pub const ITEM_FETCH_FAILED: &str = "Failed to fetch item";

/// Fetch one item, mapping failures to the messages the detail view shows.
pub async fn fetch_item<S: ItemSource>(source: &S, id: u64) -> Result<Item, String> {
    source.get_item(id).await.map_err(|e| {
        warn!(id, error = %e, "item fetch failed");
        if e.is_not_found() {
            ITEM_NOT_FOUND.to_string()
        } else {
            ITEM_FETCH_FAILED.to_string()
        }
    })
}

/// State behind the detail view.
#[derive(Debug)]
pub struct DetailController {
    pub item: LoadingState<Item>,
    active: Option<ActiveFlag>,
}

impl Default for DetailController {
    fn default() -> Self {
        Self::new()
    }
}

impl DetailController {
    pub fn new() -> Self {
        Self {
            item: LoadingState::Idle,
            active: None,
        }
    }

    /// Start loading `id`, superseding any load in flight.
    pub fn begin(&mut self, id: u64) -> ActiveFlag {
        self.cancel();
        let flag = ActiveFlag::new();
        self.active = Some(flag.clone());
        self.item = LoadingState::Loading;
        debug!(id, "loading item");
        flag
    }

    /// Apply a load result if `flag` still belongs to the current load.
    pub fn apply(&mut self, flag: &ActiveFlag, result: Result<Item, String>) -> bool {
        let current = self
            .active
            .as_ref()
            .is_some_and(|active| active.same_as(flag));
        if !current || !flag.is_active() {
            return false;
        }

        self.item = match result {
            Ok(item) => LoadingState::Loaded(item),
            Err(message) => LoadingState::Error(message),
        };
        self.active = None;
        true
    }

    /// Stop caring about the load in flight and clear the view.
    pub fn cancel(&mut self) {
        if let Some(flag) = self.active.take() {
            flag.deactivate();
        }
        self.item = LoadingState::Idle;
    }

    /// Load `id` in place.
    pub async fn load<S: ItemSource>(&mut self, source: &S, id: u64) -> bool {
        let flag = self.begin(id);
        let result = fetch_item(source, id).await;
        self.apply(&flag, result)
    }
}

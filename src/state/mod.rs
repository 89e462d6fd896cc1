// State management module.
// Controllers behind the terminal views: items list, detail, search, navigation.

pub mod detail;
pub mod items;
pub mod loading;
pub mod navigation;
pub mod search;

pub use detail::{DetailController, fetch_item};
pub use items::{FetchOutcome, ItemsController, PageResult, fetch_page, total_pages};
pub use loading::{ActiveFlag, LoadingState};
pub use navigation::{BreadcrumbNode, NavigationStack, ViewLevel};
pub use search::SearchInput;

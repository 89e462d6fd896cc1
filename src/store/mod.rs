// Storage module for the items data file.
// File helpers, default paths, the item store, and the change watcher.

pub mod file;
pub mod items;
pub mod paths;
pub mod watcher;

pub use file::Fingerprint;
pub use items::ItemStore;
pub use watcher::FileWatcher;

pub mod fs_store;
pub mod marker_watcher;

pub use marker_watcher::MarkerWatcher;

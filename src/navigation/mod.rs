//! Navigation contract, URL query state and routes.

pub mod memory;
pub mod query;
pub mod routes;

pub use memory::MemoryNavigator;
pub use query::{Location, QueryParams, QueryPatch, UrlState};

/// How a navigation lands in history.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryMode {
    /// New history entry.
    Push,
    /// Overwrite the current entry.
    Replace,
}

/// Path that refers to the current route.
pub const CURRENT_PATH: &str = ".";

/// The router as seen by a page: read where we are, go somewhere else.
///
/// Implementations own the URL. Pages never cache what they read from it.
pub trait Navigator: Send + Sync {
    /// Current route and query string.
    fn location(&self) -> Location;

    /// Navigate to `path` with `patch` applied. For [`CURRENT_PATH`] the patch
    /// edits the current query string; any other path starts from an empty one.
    fn goto(&self, path: &str, patch: &QueryPatch, mode: HistoryMode);
}

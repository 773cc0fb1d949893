use std::sync::Arc;

/// The address the app was opened with, and the way out of it.
pub trait Location {
    fn href(&self) -> String;

    fn query_param(&self, name: &str) -> Option<String>;

    /// Rewrites the current address in place, dropping its query.
    fn replace(&self, path: &str);

    /// Hands the whole app off to an external page.
    fn assign(&self, url: &str);

    /// The page handed off to, if `assign` was called.
    fn assigned(&self) -> Option<String>;
}

pub type LocationArc = Arc<dyn Location + Send + Sync>;

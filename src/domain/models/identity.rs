use std::sync::Arc;

/// Receives each signed credential the widget produces.
pub type CredentialHandler = Box<dyn Fn(String) + Send + Sync>;

/// A third-party sign-in widget. Its internals are opaque, only these entry
/// points are relied upon.
pub trait IdentityWidget {
    /// Whether the widget's library has finished loading.
    fn is_ready(&self) -> bool;

    fn initialize(&self, client_id: &str, handler: CredentialHandler);

    fn render_button(&self, width: u16);

    /// Passive sign-in prompt, may deliver a credential without user input.
    fn prompt(&self);

    fn disable_auto_select(&self);
}

pub type IdentityWidgetArc = Arc<dyn IdentityWidget + Send + Sync>;

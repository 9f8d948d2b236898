//! Rendering configuration.

/// Options controlling HTML generation.
///
/// ```rust
/// use syntaq_core::RenderOptions;
///
/// let options = RenderOptions::new().with_auto_link(false);
/// assert!(!options.auto_link);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    /// Wrap bare URLs found in plain text in anchors.
    pub auto_link: bool,
}

impl RenderOptions {
    pub const fn new() -> Self {
        Self { auto_link: true }
    }

    /// Enable or disable auto-linking of bare URLs (enabled by default).
    pub const fn with_auto_link(mut self, auto_link: bool) -> Self {
        self.auto_link = auto_link;
        self
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self::new()
    }
}

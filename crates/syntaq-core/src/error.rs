//! Errors raised by the HTML output builder.
//!
//! Malformed markup is never an error: the renderer degrades to literal
//! text. These errors only surface when code driving
//! [`HtmlWriter`](crate::html::HtmlWriter) misuses it, which for the
//! built-in renderers indicates a bug rather than bad input.

/// Error kinds for categorizing builder errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HtmlErrorKind {
    /// Tag nesting was violated.
    Structure,
    /// Conflicting arguments were passed to an element constructor.
    Config,
}

/// An HTML output builder misuse.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HtmlError {
    /// A close was requested for a tag that is not currently open.
    #[error("end tag </{tag}> has no corresponding start tag <{tag}>")]
    UnopenedTag {
        /// Name of the tag that was to be closed.
        tag: String,
    },

    /// A close was requested while no tags were open.
    #[error("no tags to close")]
    EmptyStack,

    /// Both text and HTML content were supplied for one element.
    #[error("cannot specify both text and html content for <{tag}>")]
    ConflictingContent {
        /// Name of the element being built.
        tag: String,
    },
}

impl HtmlError {
    /// Create an error for closing a tag that was never opened.
    pub fn unopened_tag(tag: &str) -> Self {
        Self::UnopenedTag {
            tag: tag.to_string(),
        }
    }

    /// Create an error for conflicting element content.
    pub fn conflicting_content(tag: &str) -> Self {
        Self::ConflictingContent {
            tag: tag.to_string(),
        }
    }

    /// Get the error category.
    pub fn kind(&self) -> HtmlErrorKind {
        match self {
            Self::UnopenedTag { .. } | Self::EmptyStack => HtmlErrorKind::Structure,
            Self::ConflictingContent { .. } => HtmlErrorKind::Config,
        }
    }

    /// Check if this is a tag nesting error.
    pub fn is_structure_error(&self) -> bool {
        self.kind() == HtmlErrorKind::Structure
    }

    /// Check if this is an argument conflict.
    pub fn is_config_error(&self) -> bool {
        self.kind() == HtmlErrorKind::Config
    }
}

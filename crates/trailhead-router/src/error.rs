//! Error types for routing.

use thiserror::Error;

/// Router-specific errors.
///
/// A request that matches nothing is not an error: [`crate::RouteTable::match_route`]
/// returns `None` for that case.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouterError {
    /// Wrong number of positional values for a template's variables.
    #[error("path `{template}` takes {expected} value(s), {supplied} supplied")]
    ArityMismatch {
        /// The template being filled in.
        template: String,
        /// Number of `:name` segments in the template.
        expected: usize,
        /// Number of values the caller passed.
        supplied: usize,
    },

    /// No route is registered under this name or key.
    #[error("route not found: {0}")]
    UnknownRoute(String),

    /// A captured parameter was required but not present.
    #[error("missing path parameter: {0}")]
    MissingParam(String),
}

/// Result type alias for router operations.
pub type Result<T> = std::result::Result<T, RouterError>;

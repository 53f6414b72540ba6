//! Tracing spans for storefront work.

use tracing::Span;

/// Span covering one navigation, from Loading to the final mount.
pub fn page_span(route: &str, generation: u64) -> Span {
    tracing::info_span!("page", route, generation)
}

/// Span covering one cart action.
pub fn action_span(action: &str) -> Span {
    tracing::info_span!("action", action)
}

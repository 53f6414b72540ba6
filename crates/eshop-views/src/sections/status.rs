//! Loading, error, not-found and confirmation pages.

use crate::{html_escape, Fragment};

/// Message shown by [`render_not_found`] when none is given.
pub const DEFAULT_NOT_FOUND_MESSAGE: &str = "Page not found";

/// Render the placeholder mounted while a page is loading.
pub fn render_loading() -> Fragment {
    Fragment::new(
        r#"<div class="loading" aria-busy="true">
    <div class="loading-spinner"></div>
    <p>Loading products...</p>
</div>"#
            .to_string(),
    )
}

/// Render a failed page load. The retry link re-runs `retry_token`.
pub fn render_error(message: &str, retry_token: &str) -> Fragment {
    Fragment::new(format!(
        r#"<div class="error">
    <h2>Something went wrong</h2>
    <p>{}</p>
    <a href="{}" class="btn btn-primary" data-action="retry">Try again</a>
</div>"#,
        html_escape(message),
        html_escape(retry_token)
    ))
}

/// Render a 404 page.
pub fn render_not_found(message: Option<&str>) -> Fragment {
    Fragment::new(format!(
        r##"<div class="error-page">
    <h2>404 - {}</h2>
    <p>The page you are looking for does not exist.</p>
    <a href="#/" class="btn btn-primary">Go to the front page</a>
</div>"##,
        html_escape(message.unwrap_or(DEFAULT_NOT_FOUND_MESSAGE))
    ))
}

/// Render the order confirmation.
pub fn render_thanks() -> Fragment {
    Fragment::new(
        r##"<section class="thanks-page">
    <div class="thanks-content">
        <h2>Thank you for your order!</h2>
        <p class="thanks-message">We have received your order and are processing it now.</p>
        <div class="thanks-actions">
            <a href="#/" class="btn btn-primary">Continue shopping</a>
            <a href="#/cart" class="btn btn-outline">View cart</a>
        </div>
    </div>
</section>"##
            .to_string(),
    )
}

//! Page chrome: header with navigation and cart badge, footer.

use eshop_commerce::catalog::Category;
use eshop_router::Route;

use crate::{html_escape, Fragment};

/// Render the site header.
pub fn render_header(categories: &[Category], cart_count: i64) -> Fragment {
    let links: String = categories
        .iter()
        .map(|c| {
            format!(
                r#"<a href="{}" class="nav-link">{}</a>"#,
                html_escape(&Route::Category(c.slug().to_string()).to_string()),
                html_escape(&c.label())
            )
        })
        .collect();

    Fragment::new(format!(
        r##"<header class="header">
    <a href="#/" class="logo">Eshop</a>
    <form class="search" data-action="search">
        <input type="search" name="q" placeholder="Search products...">
    </form>
    <nav class="nav">
        <a href="#/" class="nav-link">Home</a>
        <div class="dropdown-menu">{links}</div>
    </nav>
    <a href="#/cart" class="cart">Cart <span class="count">{count}</span></a>
</header>"##,
        links = links,
        count = cart_count,
    ))
}

/// Render the site footer.
pub fn render_footer() -> Fragment {
    Fragment::new(
        r##"<footer class="footer">
    <div class="footer-content">
        <div class="footer-section">
            <h3>Contact</h3>
            <p>hello@eshop.example</p>
        </div>
        <div class="footer-section">
            <h3>Quick links</h3>
            <a href="#/">Home</a>
            <a href="#/cart">Cart</a>
        </div>
    </div>
    <div class="footer-bottom"><p>Eshop demo storefront</p></div>
</footer>"##
            .to_string(),
    )
}

/// Wrap page content in header and footer.
pub fn render_layout(categories: &[Category], cart_count: i64, content: &Fragment) -> Fragment {
    Fragment::new(format!(
        "{}\n<main class=\"container\">\n{}\n</main>\n{}",
        render_header(categories, cart_count).as_str(),
        content.as_str(),
        render_footer().as_str()
    ))
}

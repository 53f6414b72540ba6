//! Hero section - home page banner.

use crate::Fragment;

/// Render the home page hero banner.
pub fn render_hero() -> Fragment {
    Fragment::new(
        r##"<section class="hero">
    <div class="hero-content">
        <h1>Welcome to Eshop</h1>
        <p class="hero-subtitle">Explore our selection of quality products</p>
        <div class="hero-actions">
            <a href="#/category/smartphones" class="btn btn-primary">Shop smartphones</a>
            <a href="#/category/laptops" class="btn btn-outline">Shop laptops</a>
        </div>
    </div>
</section>"##
            .to_string(),
    )
}

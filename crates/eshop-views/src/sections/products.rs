//! Product cards and listing pages.

use eshop_commerce::catalog::{Category, Product};
use eshop_router::Route;

use crate::{html_escape, Fragment};

/// Render a single product card.
pub fn render_product_card(product: &Product) -> Fragment {
    let status = product.stock_status();
    let link = Route::Product(product.id).to_string();

    Fragment::new(format!(
        r#"<article class="product-card" data-product-id="{id}">
    <a href="{link}" class="product-link">
        <div class="product-image">
            <img src="{img}" alt="{title}" loading="lazy">
        </div>
        <div class="product-content">
            <h3 class="product-title">{title}</h3>
            <p class="product-description">{description}</p>
            <div class="product-meta">
                <span class="product-category">{category}</span>
                <span class="product-price">{price}</span>
            </div>
            <div class="product-rating">{stars}</div>
            <div class="product-stock {stock_class}">{stock_text}</div>
        </div>
    </a>
    <button class="btn btn-primary add-to-cart" data-action="add-to-cart" data-product-id="{id}"{disabled}>Add to cart</button>
</article>"#,
        id = product.id,
        link = html_escape(&link),
        img = html_escape(product.primary_image().unwrap_or_default()),
        title = html_escape(&product.title),
        description = html_escape(&product.description),
        category = html_escape(&product.category),
        price = html_escape(&product.price.display()),
        stars = render_stars(product).as_str(),
        stock_class = status.css_class(),
        stock_text = html_escape(&status.label(product.stock)),
        disabled = if product.is_available() { "" } else { " disabled" },
    ))
}

/// Render the star rating, rounding down.
pub fn render_stars(product: &Product) -> Fragment {
    let (full, empty) = product.rating_stars();
    Fragment::new(format!(
        r#"<span class="stars" aria-label="{rating:.1} out of 5">{full}{empty}</span> <span class="rating-value">({rating:.1}/5)</span>"#,
        rating = product.rating,
        full = "★".repeat(full as usize),
        empty = "☆".repeat(empty as usize),
    ))
}

/// Render a grid of cards, or `empty_message` when there are none.
pub fn render_product_grid(products: &[Product], empty_message: &str) -> Fragment {
    let body = if products.is_empty() {
        format!(r#"<p class="no-results">{}</p>"#, html_escape(empty_message))
    } else {
        products
            .iter()
            .map(|p| render_product_card(p).into_string())
            .collect::<Vec<_>>()
            .join("\n")
    };

    Fragment::new(format!(
        r#"<div class="products-grid">
{}
</div>"#,
        body
    ))
}

/// Render the featured products section of the home page.
pub fn render_featured(products: &[Product]) -> Fragment {
    Fragment::new(format!(
        r#"<section class="featured-products">
    <h2>Featured products</h2>
    {}
</section>"#,
        render_product_grid(products, "No products to show right now.").as_str()
    ))
}

/// Render search results for `query`.
pub fn render_search_page(query: &str, products: &[Product]) -> Fragment {
    Fragment::new(format!(
        r#"<div class="search-page">
    <h2 class="page-title">Search results for "{}"</h2>
    {}
</div>"#,
        html_escape(query),
        render_product_grid(products, "No products matched your search.").as_str()
    ))
}

/// Render the listing for a category.
pub fn render_category_page(category: &Category, products: &[Product]) -> Fragment {
    Fragment::new(format!(
        r#"<div class="category-page" data-category="{}">
    <h2 class="page-title">Category: {}</h2>
    {}
</div>"#,
        html_escape(category.slug()),
        html_escape(&category.label()),
        render_product_grid(products, "No products in this category.").as_str()
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use eshop_commerce::{Currency, Money, ProductId};

    fn product(id: u64, stock: u32) -> Product {
        Product::new(ProductId::new(id), "Essence <Mascara>", Money::from_decimal(9.99, Currency::DKK))
            .with_stock(stock)
            .with_rating(4.94)
            .with_category("beauty")
    }

    #[test]
    fn test_card_escapes_and_links() {
        let html = render_product_card(&product(1, 99));
        assert!(html.contains(r##"href="#/product/1""##));
        assert!(html.contains("Essence &lt;Mascara&gt;"));
        assert!(!html.contains("<Mascara>"));
        assert!(html.contains("9.99 DKK"));
        assert!(html.contains("in-stock"));
        assert!(!html.contains("disabled"));
    }

    #[test]
    fn test_card_out_of_stock_is_disabled() {
        let html = render_product_card(&product(2, 0));
        assert!(html.contains("out-of-stock"));
        assert!(html.contains(" disabled>"));
    }

    #[test]
    fn test_stars_round_down() {
        let html = render_stars(&product(1, 1));
        assert!(html.contains("★★★★☆"));
        assert!(html.contains("(4.9/5)"));
    }

    #[test]
    fn test_empty_grid_message() {
        let html = render_product_grid(&[], "Nothing here");
        assert!(html.contains(r#"<p class="no-results">Nothing here</p>"#));
    }

    #[test]
    fn test_category_page_label() {
        let html = render_category_page(&Category::new("smartphones"), &[product(1, 3)]);
        assert!(html.contains("Category: Smartphones"));
        assert!(html.contains("low-stock"));
    }

    #[test]
    fn test_search_page_escapes_query() {
        let html = render_search_page("<script>", &[]);
        assert!(html.contains("&lt;script&gt;"));
        assert!(html.contains("No products matched"));
    }
}

//! Product detail page.

use eshop_commerce::cart::ShippingPolicy;
use eshop_commerce::catalog::{Category, Product};
use eshop_router::Route;

use crate::sections::render_stars;
use crate::{html_escape, Fragment};

/// Gallery thumbnails shown under the main image.
pub const MAX_THUMBNAILS: usize = 4;

/// Render the detail page for a product.
///
/// Both buy buttons are disabled when the product is out of stock.
pub fn render_product_detail(product: &Product, policy: &ShippingPolicy) -> Fragment {
    let status = product.stock_status();
    let disabled = if product.is_available() { "" } else { " disabled" };

    let thumbnails: String = product
        .images
        .iter()
        .take(MAX_THUMBNAILS)
        .map(|img| {
            format!(
                r#"<img src="{}" alt="{}" class="thumbnail">"#,
                html_escape(img),
                html_escape(&product.title)
            )
        })
        .collect();
    let gallery = if thumbnails.is_empty() {
        String::new()
    } else {
        format!(r#"<div class="product-thumbnails">{}</div>"#, thumbnails)
    };

    let brand = product
        .brand
        .as_deref()
        .map(|b| format!(r#"<p class="product-brand">Brand: {}</p>"#, html_escape(b)))
        .unwrap_or_default();
    let category = Category::new(product.category.clone());

    Fragment::new(format!(
        r#"<div class="product-detail" data-product-id="{id}">
    <div class="product-gallery">
        <div class="main-image">
            <img src="{img}" alt="{title}">
        </div>
        {gallery}
    </div>
    <div class="product-info">
        <h1 class="product-title">{title}</h1>
        {brand}
        <p class="product-category">Category: <a href="{category_link}">{category_label}</a></p>
        <div class="product-rating">{stars}</div>
        <p class="product-description">{description}</p>
        <div class="product-stock">
            <span class="stock-label">Stock:</span>
            <span class="stock-count {stock_class}">{stock_text}</span>
        </div>
        <div class="product-price"><span class="price">{price}</span></div>
        <div class="product-actions">
            <button class="btn btn-primary btn-large" data-action="buy-now" data-product-id="{id}"{disabled}>Buy now</button>
            <button class="btn btn-outline btn-large" data-action="add-to-cart" data-product-id="{id}"{disabled}>Add to cart</button>
        </div>
        <ul class="product-features">
            <li>Free shipping on orders over {threshold}</li>
            <li>30 day returns</li>
        </ul>
    </div>
</div>"#,
        id = product.id,
        img = html_escape(product.primary_image().unwrap_or_default()),
        title = html_escape(&product.title),
        gallery = gallery,
        brand = brand,
        category_link = html_escape(&Route::Category(product.category.clone()).to_string()),
        category_label = html_escape(&category.label()),
        stars = render_stars(product).as_str(),
        description = html_escape(&product.description),
        stock_class = status.css_class(),
        stock_text = html_escape(&status.label(product.stock)),
        price = html_escape(&product.price.display()),
        disabled = disabled,
        threshold = html_escape(&policy.free_shipping_threshold.display()),
    ))
}

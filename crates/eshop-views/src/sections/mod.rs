//! Section renderers for storefront pages.

mod cart;
mod detail;
mod hero;
mod layout;
mod products;
mod status;

pub use cart::*;
pub use detail::*;
pub use hero::*;
pub use layout::*;
pub use products::*;
pub use status::*;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Fragment;
    use eshop_commerce::cart::{Cart, ShippingPolicy};
    use eshop_commerce::catalog::{Category, Product};
    use eshop_commerce::{Currency, Money, ProductId};

    const HOSTILE: &str = r#"<script>alert("x")</script><img src=x onerror='y'>"#;

    fn hostile_product(id: u64) -> Product {
        let mut p = Product::new(ProductId::new(id), HOSTILE, Money::from_units(120, Currency::DKK))
            .with_stock(8)
            .with_rating(3.5)
            .with_category(HOSTILE);
        p.description = HOSTILE.to_string();
        p.brand = Some(HOSTILE.to_string());
        p.images = vec![format!("https://cdn.test/{}\" onload=\"z", id)];
        p
    }

    fn assert_escaped(html: &Fragment) {
        assert!(!html.contains("<script>"), "raw script tag in {html}");
        assert!(!html.contains("<img src=x"), "raw img tag in {html}");
        assert!(!html.contains("onerror='"), "raw attribute in {html}");
        assert!(!html.contains("\" onload=\""), "attribute break-out in {html}");
    }

    #[test]
    fn test_builders_are_deterministic() {
        let products = vec![hostile_product(1), hostile_product(2)];
        let policy = ShippingPolicy::default();
        let mut cart = Cart::new();
        cart.add(&products[0], 2).unwrap();
        cart.add(&products[1], 1).unwrap();
        let summary = cart.summary(&policy).unwrap();

        assert_eq!(render_cart(&cart, &summary), render_cart(&cart, &summary));
        assert_eq!(
            render_product_detail(&products[0], &policy),
            render_product_detail(&products[0], &policy)
        );
        assert_eq!(
            render_product_grid(&products, "none"),
            render_product_grid(&products, "none")
        );
        let categories = [Category::new("beauty")];
        assert_eq!(render_header(&categories, 3), render_header(&categories, 3));
    }

    #[test]
    fn test_untrusted_text_is_escaped() {
        let product = hostile_product(1);
        let policy = ShippingPolicy::default();
        let mut cart = Cart::new();
        cart.add(&product, 1).unwrap();
        let summary = cart.summary(&policy).unwrap();

        assert_escaped(&render_product_card(&product));
        assert_escaped(&render_product_grid(&[product.clone()], HOSTILE));
        assert_escaped(&render_product_detail(&product, &policy));
        assert_escaped(&render_cart(&cart, &summary));
        assert_escaped(&render_search_page(HOSTILE, &[product.clone()]));
        assert_escaped(&render_category_page(&Category::new(HOSTILE), &[product]));
        assert_escaped(&render_header(&[Category::new(HOSTILE)], 1));
        assert_escaped(&render_error(HOSTILE, HOSTILE));
    }
}

//! Cart page.

use eshop_commerce::cart::{Cart, CartLine, CartSummary};

use crate::{html_escape, Fragment};

/// Render the cart page: line items plus the order summary.
pub fn render_cart(cart: &Cart, summary: &CartSummary) -> Fragment {
    if cart.is_empty() {
        return render_empty_cart();
    }

    let lines: String = cart.lines().iter().map(render_cart_line).collect();
    let shipping = if summary.has_free_shipping() {
        "Free".to_string()
    } else {
        summary.shipping.display()
    };

    Fragment::new(format!(
        r#"<div class="cart-container">
    <h2 class="page-title">Shopping cart</h2>
    <div class="cart-list">
{lines}
    </div>
    <div class="cart-summary">
        <div class="summary-row"><span>Items:</span><span>{count}</span></div>
        <div class="summary-row"><span>Subtotal:</span><span>{subtotal}</span></div>
        <div class="summary-row"><span>Shipping:</span><span class="shipping">{shipping}</span></div>
        <div class="summary-row total"><span>Total:</span><span>{total}</span></div>
        <button class="btn btn-primary btn-large" data-action="checkout">Checkout</button>
    </div>
</div>"#,
        lines = lines,
        count = summary.item_count,
        subtotal = html_escape(&summary.subtotal.display()),
        shipping = html_escape(&shipping),
        total = html_escape(&summary.total.display()),
    ))
}

fn render_cart_line(line: &CartLine) -> String {
    let line_total = line
        .line_total()
        .map(|m| m.display())
        .unwrap_or_else(|_| "-".to_string());

    format!(
        r#"        <div class="cart-item" data-product-id="{id}">
            <div class="cart-item-image"><img src="{img}" alt="{title}"></div>
            <div class="cart-item-details">
                <h3 class="cart-item-title">{title}</h3>
                <p class="cart-item-category">{category}</p>
                <div class="cart-item-price">{price}</div>
            </div>
            <div class="cart-item-quantity">
                <button class="qty-btn" data-action="decrease" data-product-id="{id}">-</button>
                <span class="qty">{qty}</span>
                <button class="qty-btn" data-action="increase" data-product-id="{id}">+</button>
            </div>
            <div class="cart-item-total">{line_total}</div>
            <button class="remove-item" data-action="remove" data-product-id="{id}">Remove</button>
        </div>
"#,
        id = line.product_id,
        img = html_escape(&line.thumbnail),
        title = html_escape(&line.title),
        category = html_escape(&line.category),
        price = html_escape(&line.price.display()),
        qty = line.quantity,
        line_total = html_escape(&line_total),
    )
}

/// Render the empty-cart placeholder.
pub fn render_empty_cart() -> Fragment {
    Fragment::new(
        r##"<div class="cart-container">
    <div class="empty-cart">
        <h3>Your cart is empty</h3>
        <p>Explore our products and add something you like.</p>
        <a href="#/" class="btn btn-primary">Go to the front page</a>
    </div>
</div>"##
            .to_string(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use eshop_commerce::cart::ShippingPolicy;
    use eshop_commerce::catalog::Product;
    use eshop_commerce::{Currency, Money, ProductId};

    fn cart_with(units: i64, quantity: i64) -> Cart {
        let mut cart = Cart::new();
        let p = Product::new(ProductId::new(5), "Desk Lamp", Money::from_units(units, Currency::DKK)).with_stock(10);
        cart.add(&p, quantity).unwrap();
        cart
    }

    #[test]
    fn test_empty_cart() {
        let cart = Cart::new();
        let summary = cart.summary(&ShippingPolicy::default()).unwrap();
        let html = render_cart(&cart, &summary);
        assert!(html.contains("Your cart is empty"));
        assert!(!html.contains("data-action=\"checkout\""));
    }

    #[test]
    fn test_cart_lines_and_summary() {
        let cart = cart_with(200, 2);
        let summary = cart.summary(&ShippingPolicy::default()).unwrap();
        let html = render_cart(&cart, &summary);

        assert!(html.contains(r#"data-action="increase" data-product-id="5""#));
        assert!(html.contains(r#"data-action="remove" data-product-id="5""#));
        assert!(html.contains(r#"<span class="qty">2</span>"#));
        assert!(html.contains("400.00 DKK"));
        assert!(html.contains(r#"<span class="shipping">50.00 DKK</span>"#));
        assert!(html.contains("450.00 DKK"));
    }

    #[test]
    fn test_free_shipping_label() {
        let cart = cart_with(300, 2);
        let summary = cart.summary(&ShippingPolicy::default()).unwrap();
        let html = render_cart(&cart, &summary);
        assert!(html.contains(r#"<span class="shipping">Free</span>"#));
    }
}

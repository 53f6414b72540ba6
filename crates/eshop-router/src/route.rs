//! Storefront routes.

use std::fmt;

use eshop_commerce::ProductId;
use serde::{Deserialize, Serialize};

use crate::encoding::{percent_decode, percent_encode};

/// A storefront page.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "page", content = "arg", rename_all = "snake_case")]
pub enum Route {
    /// `/`
    Home,
    /// `/search/<query>`
    Search(String),
    /// `/category/<slug>`
    Category(String),
    /// `/product/<id>`
    Product(ProductId),
    /// `/cart`
    Cart,
    /// `/thanks`
    Thanks,
    /// Anything else.
    NotFound,
}

/// What a route needs from the catalog before it can render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataRequirement {
    /// A random selection from the full product list.
    FeaturedProducts,
    Search(String),
    Category(String),
    Product(ProductId),
    /// Renders from local state only.
    None,
}

impl Route {
    /// Parse a navigation token such as `#/product/3` or `/search/red%20shoes`.
    ///
    /// Never fails: unknown tokens map to [`Route::NotFound`].
    pub fn parse(token: &str) -> Route {
        let path = token.strip_prefix('#').unwrap_or(token);
        if path.is_empty() || path == "/" {
            return Route::Home;
        }

        let Some(path) = path.strip_prefix('/') else {
            return Route::NotFound;
        };
        let path = path.strip_suffix('/').unwrap_or(path);
        let segments: Vec<&str> = path.split('/').collect();

        match segments.as_slice() {
            ["search", query] => non_empty(percent_decode(query)).map_or(Route::NotFound, Route::Search),
            ["category", name] => non_empty(percent_decode(name)).map_or(Route::NotFound, Route::Category),
            ["product", id] => id.parse().map_or(Route::NotFound, Route::Product),
            ["cart"] => Route::Cart,
            ["thanks"] => Route::Thanks,
            _ => Route::NotFound,
        }
    }

    /// Canonical token for this route, without the leading `#`.
    ///
    /// [`Route::NotFound`] has no canonical path and yields `/404`, which
    /// parses back to `NotFound`.
    pub fn token(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::Search(query) => format!("/search/{}", percent_encode(query)),
            Route::Category(name) => format!("/category/{}", percent_encode(name)),
            Route::Product(id) => format!("/product/{}", id),
            Route::Cart => "/cart".to_string(),
            Route::Thanks => "/thanks".to_string(),
            Route::NotFound => "/404".to_string(),
        }
    }

    /// Catalog data the page depends on.
    pub fn requirement(&self) -> DataRequirement {
        match self {
            Route::Home => DataRequirement::FeaturedProducts,
            Route::Search(query) => DataRequirement::Search(query.clone()),
            Route::Category(name) => DataRequirement::Category(name.clone()),
            Route::Product(id) => DataRequirement::Product(*id),
            Route::Cart | Route::Thanks | Route::NotFound => DataRequirement::None,
        }
    }

    /// Short page name for logs.
    pub fn name(&self) -> &'static str {
        match self {
            Route::Home => "home",
            Route::Search(_) => "search",
            Route::Category(_) => "category",
            Route::Product(_) => "product",
            Route::Cart => "cart",
            Route::Thanks => "thanks",
            Route::NotFound => "not_found",
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.token())
    }
}

fn non_empty(s: String) -> Option<String> {
    if s.trim().is_empty() {
        None
    } else {
        Some(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_home() {
        assert_eq!(Route::parse(""), Route::Home);
        assert_eq!(Route::parse("#"), Route::Home);
        assert_eq!(Route::parse("/"), Route::Home);
        assert_eq!(Route::parse("#/"), Route::Home);
    }

    #[test]
    fn test_parse_pages() {
        assert_eq!(Route::parse("#/cart"), Route::Cart);
        assert_eq!(Route::parse("/thanks/"), Route::Thanks);
        assert_eq!(Route::parse("#/product/12"), Route::Product(ProductId::new(12)));
        assert_eq!(Route::parse("/category/shoes"), Route::Category("shoes".into()));
        assert_eq!(
            Route::parse("#/search/red%20shoes"),
            Route::Search("red shoes".into())
        );
    }

    #[test]
    fn test_parse_not_found() {
        for token in [
            "cart",
            "/carts",
            "/product/abc",
            "/product/-1",
            "/product/",
            "/search/",
            "/search/%20",
            "/category/shoes/extra",
            "//",
            "/cart//",
        ] {
            assert_eq!(Route::parse(token), Route::NotFound, "token {:?}", token);
        }
    }

    #[test]
    fn test_token_round_trip() {
        let routes = [
            Route::Home,
            Route::Search("100% cotton & silk".into()),
            Route::Category("home-decoration".into()),
            Route::Product(ProductId::new(42)),
            Route::Cart,
            Route::Thanks,
            Route::NotFound,
        ];
        for route in routes {
            assert_eq!(Route::parse(&route.token()), route);
        }
    }

    #[test]
    fn test_display_has_hash() {
        assert_eq!(Route::Cart.to_string(), "#/cart");
        assert_eq!(Route::Search("a b".into()).to_string(), "#/search/a%20b");
    }

    #[test]
    fn test_requirement_dispatch() {
        assert_eq!(Route::Home.requirement(), DataRequirement::FeaturedProducts);
        assert_eq!(
            Route::Product(ProductId::new(3)).requirement(),
            DataRequirement::Product(ProductId::new(3))
        );
        assert_eq!(Route::Cart.requirement(), DataRequirement::None);
        assert_eq!(Route::NotFound.requirement(), DataRequirement::None);
    }

    #[test]
    fn test_serializes_tagged() {
        let json = serde_json::to_value(Route::Category("bags".into())).unwrap();
        assert_eq!(json["page"], "category");
        assert_eq!(json["arg"], "bags");
    }
}

//! Catalog client: normalized access to the remote product catalog.

use eshop_commerce::catalog::{Category, Product};
use eshop_commerce::{Currency, Money, ProductId};
use serde::Deserialize;
use serde_json::Value;
use tokio::sync::OnceCell;

use crate::{CatalogError, FetchClient, Response};

/// Client for the dummyjson-compatible product API.
///
/// List operations fail only when the catalog cannot be reached; a
/// response that does not look like a product list yields an empty list.
/// With memoization on, the full product list and the category list are
/// fetched once per client; failed fetches are retried on the next call.
#[derive(Debug)]
pub struct CatalogClient {
    fetch: FetchClient,
    currency: Currency,
    memoize: bool,
    products: OnceCell<Vec<Product>>,
    categories: OnceCell<Vec<Category>>,
}

impl CatalogClient {
    pub fn new(fetch: FetchClient) -> Self {
        Self {
            fetch,
            currency: Currency::default(),
            memoize: true,
            products: OnceCell::new(),
            categories: OnceCell::new(),
        }
    }

    /// Currency that catalog prices are quoted in.
    pub fn with_currency(mut self, currency: Currency) -> Self {
        self.currency = currency;
        self
    }

    /// Turn memoization of the full lists on or off.
    pub fn with_memoize(mut self, memoize: bool) -> Self {
        self.memoize = memoize;
        self
    }

    /// `GET /products`, optionally limited.
    ///
    /// Only the unlimited list is memoized.
    pub async fn list_products(&self, limit: Option<u32>) -> Result<Vec<Product>, CatalogError> {
        match limit {
            Some(limit) => {
                let limit = limit.to_string();
                let result = self.fetch_list(&["products"], &[("limit", &limit)]).await;
                lenient(result, "products")
            }
            None if self.memoize => {
                let result = self
                    .products
                    .get_or_try_init(|| self.fetch_list(&["products"], &[("limit", "0")]))
                    .await
                    .cloned();
                lenient(result, "products")
            }
            None => {
                let result = self.fetch_list(&["products"], &[("limit", "0")]).await;
                lenient(result, "products")
            }
        }
    }

    /// `GET /products/{id}`.
    ///
    /// Returns `None` when the catalog has no such product or answers with
    /// something that is not a product.
    pub async fn get_product(&self, id: ProductId) -> Result<Option<Product>, CatalogError> {
        let id_segment = id.to_string();
        let response = self.fetch.get(&["products", &id_segment], &[]).await?;
        if response.status == 404 {
            tracing::debug!(product_id = %id, "product not found");
            return Ok(None);
        }
        let response = response.error_for_status()?;

        let raw = match response.json::<RawProduct>() {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!(product_id = %id, error = %e, "malformed product response");
                return Ok(None);
            }
        };
        Ok(raw.normalize(self.currency))
    }

    /// Like [`get_product`](Self::get_product), but a missing product is an error.
    pub async fn require_product(&self, id: ProductId) -> Result<Product, CatalogError> {
        self.get_product(id)
            .await?
            .ok_or_else(|| CatalogError::NotFound(format!("product {}", id)))
    }

    /// `GET /products/categories`.
    pub async fn list_categories(&self) -> Result<Vec<Category>, CatalogError> {
        let result = if self.memoize {
            self.categories
                .get_or_try_init(|| self.fetch_categories())
                .await
                .cloned()
        } else {
            self.fetch_categories().await
        };
        lenient(result, "categories")
    }

    /// `GET /products/category/{name}`.
    pub async fn list_by_category(&self, category: &str) -> Result<Vec<Product>, CatalogError> {
        let result = self.fetch_list(&["products", "category", category], &[]).await;
        lenient(result, "category products")
    }

    /// `GET /products/search?q=`.
    pub async fn search(&self, query: &str) -> Result<Vec<Product>, CatalogError> {
        let result = self.fetch_list(&["products", "search"], &[("q", query)]).await;
        lenient(result, "search results")
    }

    async fn fetch_list(&self, segments: &[&str], query: &[(&str, &str)]) -> Result<Vec<Product>, CatalogError> {
        let response = self.fetch.get(segments, query).await?.error_for_status()?;
        let body = parse_body(&response)?;
        let items = match body.get("products").and_then(Value::as_array) {
            Some(items) => items,
            None => return Err(CatalogError::Parse("missing \"products\" array".into())),
        };

        let products: Vec<Product> = items
            .iter()
            .filter_map(|item| serde_json::from_value::<RawProduct>(item.clone()).ok())
            .filter_map(|raw| raw.normalize(self.currency))
            .collect();
        if products.len() < items.len() {
            tracing::debug!(dropped = items.len() - products.len(), "skipped invalid catalog entries");
        }
        Ok(products)
    }

    async fn fetch_categories(&self) -> Result<Vec<Category>, CatalogError> {
        let response = self
            .fetch
            .get(&["products", "categories"], &[])
            .await?
            .error_for_status()?;
        let raw: Vec<RawCategory> = response
            .json()
            .map_err(|e| CatalogError::Parse(e.to_string()))?;
        Ok(raw
            .into_iter()
            .map(RawCategory::into_slug)
            .filter(|slug| !slug.is_empty())
            .map(Category::new)
            .collect())
    }
}

fn parse_body(response: &Response) -> Result<Value, CatalogError> {
    response
        .json::<Value>()
        .map_err(|e| CatalogError::Parse(e.to_string()))
}

/// Parse failures degrade to an empty list; everything else propagates.
fn lenient<T>(result: Result<Vec<T>, CatalogError>, what: &str) -> Result<Vec<T>, CatalogError> {
    match result {
        Err(CatalogError::Parse(reason)) => {
            tracing::warn!(what, reason = %reason, "ignoring malformed catalog response");
            Ok(Vec::new())
        }
        other => other,
    }
}

/// Product as sent by the API; every field is optional.
#[derive(Debug, Deserialize)]
struct RawProduct {
    id: Option<i64>,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    description: Option<String>,
    price: Option<f64>,
    #[serde(default)]
    thumbnail: Option<String>,
    #[serde(default)]
    images: Option<Vec<String>>,
    #[serde(default)]
    category: Option<String>,
    #[serde(default)]
    brand: Option<String>,
    rating: Option<f64>,
    stock: Option<i64>,
}

impl RawProduct {
    fn normalize(self, currency: Currency) -> Option<Product> {
        let id = u64::try_from(self.id?).ok().filter(|id| *id > 0)?;
        let price = self.price.unwrap_or(0.0);
        if !price.is_finite() || price < 0.0 {
            return None;
        }
        let stock = self.stock.unwrap_or(0).clamp(0, u32::MAX as i64) as u32;

        let mut product = Product::new(ProductId::new(id), self.title.unwrap_or_default(), Money::from_decimal(price, currency))
            .with_stock(stock)
            .with_category(self.category.unwrap_or_default())
            .with_rating(self.rating.unwrap_or(0.0));
        product.description = self.description.unwrap_or_default();
        product.thumbnail = self.thumbnail.unwrap_or_default();
        product.images = self.images.unwrap_or_default();
        product.brand = self.brand.filter(|b| !b.is_empty());
        Some(product)
    }
}

/// Older API versions list slugs, newer ones list objects.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawCategory {
    Slug(String),
    Object { slug: String },
}

impl RawCategory {
    fn into_slug(self) -> String {
        match self {
            RawCategory::Slug(slug) | RawCategory::Object { slug } => slug,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{FetchError, MockTransport};
    use serde_json::json;
    use std::sync::Arc;

    fn setup() -> (Arc<MockTransport>, CatalogClient) {
        let mock = Arc::new(MockTransport::new());
        let fetch = FetchClient::new("https://dummyjson.com", mock.clone()).unwrap();
        (mock, CatalogClient::new(fetch))
    }

    fn product_json(id: i64, title: &str, price: f64) -> Value {
        json!({
            "id": id,
            "title": title,
            "description": "desc",
            "price": price,
            "thumbnail": format!("https://cdn.test/{}.png", id),
            "images": [],
            "category": "beauty",
            "brand": "Essence",
            "rating": 4.5,
            "stock": 12
        })
    }

    #[tokio::test]
    async fn test_list_products_normalizes() {
        let (mock, client) = setup();
        mock.respond_json(
            "/products?limit=10",
            json!({"products": [product_json(1, "Mascara", 9.99), product_json(2, "Lipstick", 19.5)], "total": 2}),
        );

        let products = client.list_products(Some(10)).await.unwrap();
        assert_eq!(products.len(), 2);
        assert_eq!(products[0].id, ProductId::new(1));
        assert_eq!(products[0].price, Money::new(999, Currency::DKK));
        assert_eq!(products[1].brand.as_deref(), Some("Essence"));
    }

    #[tokio::test]
    async fn test_invalid_entries_are_dropped() {
        let (mock, client) = setup();
        mock.respond_json(
            "/products/search?q=x",
            json!({"products": [
                product_json(0, "zero id", 1.0),
                product_json(3, "negative", -4.0),
                {"title": "no id"},
                "not an object",
                {"id": 5, "title": "sparse", "rating": 9.0, "stock": -2},
            ]}),
        );

        let products = client.search("x").await.unwrap();
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].id, ProductId::new(5));
        assert_eq!(products[0].rating, 5.0);
        assert_eq!(products[0].stock, 0);
        assert!(products[0].price.is_zero());
    }

    #[tokio::test]
    async fn test_malformed_list_is_empty() {
        let (mock, client) = setup();
        mock.respond_raw("/products/category/shoes", 200, "<html>oops</html>");
        mock.respond_json("/products/search?q=a", json!({"items": []}));

        assert!(client.list_by_category("shoes").await.unwrap().is_empty());
        assert!(client.search("a").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_transport_failure_is_network_error() {
        let (mock, client) = setup();
        mock.time_out("/products/category/bags");

        let err = client.list_by_category("bags").await.unwrap_err();
        assert!(matches!(err, CatalogError::Network(FetchError::Timeout)));
    }

    #[tokio::test]
    async fn test_server_error_is_network_error() {
        let (mock, client) = setup();
        mock.respond_raw("/products?limit=0", 503, "unavailable");

        let err = client.list_products(None).await.unwrap_err();
        assert!(matches!(err, CatalogError::Network(FetchError::HttpError { status: 503, .. })));
    }

    #[tokio::test]
    async fn test_get_product_missing_is_none() {
        let (_mock, client) = setup();
        assert!(client.get_product(ProductId::new(999999)).await.unwrap().is_none());

        let err = client.require_product(ProductId::new(999999)).await.unwrap_err();
        assert!(matches!(err, CatalogError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_get_product_without_id_is_none() {
        let (mock, client) = setup();
        mock.respond_json("/products/4", json!({"message": "weird"}));
        mock.respond_raw("/products/5", 200, "{");

        assert!(client.get_product(ProductId::new(4)).await.unwrap().is_none());
        assert!(client.get_product(ProductId::new(5)).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_get_product() {
        let (mock, client) = setup();
        mock.respond_json("/products/7", product_json(7, "Perfume", 49.0));

        let product = client.get_product(ProductId::new(7)).await.unwrap().unwrap();
        assert_eq!(product.title, "Perfume");
        assert_eq!(product.stock, 12);
    }

    #[tokio::test]
    async fn test_categories_accept_both_shapes() {
        let (mock, client) = setup();
        mock.respond_json("/products/categories", json!(["beauty", "fragrances"]));
        let slugs: Vec<String> = client
            .list_categories()
            .await
            .unwrap()
            .iter()
            .map(|c| c.slug().to_string())
            .collect();
        assert_eq!(slugs, vec!["beauty", "fragrances"]);

        let (mock, client) = setup();
        mock.respond_json(
            "/products/categories",
            json!([{"slug": "beauty", "name": "Beauty", "url": "https://dummyjson.com/products/category/beauty"}]),
        );
        assert_eq!(client.list_categories().await.unwrap()[0].label(), "Beauty");
    }

    #[tokio::test]
    async fn test_full_list_is_memoized() {
        let (mock, client) = setup();
        mock.respond_json("/products?limit=0", json!({"products": [product_json(1, "A", 1.0)]}));

        client.list_products(None).await.unwrap();
        client.list_products(None).await.unwrap();
        assert_eq!(mock.request_count("/products?limit=0"), 1);
    }

    #[tokio::test]
    async fn test_failures_are_not_memoized() {
        let (mock, client) = setup();
        mock.refuse("/products/categories");
        assert!(client.list_categories().await.is_err());

        mock.respond_json("/products/categories", json!(["tops"]));
        assert_eq!(client.list_categories().await.unwrap().len(), 1);
        assert_eq!(mock.request_count("/products/categories"), 2);
    }

    #[tokio::test]
    async fn test_memoize_off_refetches() {
        let (mock, client) = setup();
        let client = client.with_memoize(false);
        mock.respond_json("/products/categories", json!(["tops"]));

        client.list_categories().await.unwrap();
        client.list_categories().await.unwrap();
        assert_eq!(mock.request_count("/products/categories"), 2);
    }
}

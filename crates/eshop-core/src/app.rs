//! The storefront: navigation, page lifecycle and cart actions.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use eshop_cache::{Cache, FileStore};
use eshop_commerce::cart::{Cart, CartEvent, CartStore, CartSummary, ShippingPolicy};
use eshop_commerce::catalog::{Category, Product};
use eshop_commerce::checkout::CheckoutOrder;
use eshop_commerce::ProductId;
use eshop_data::{CatalogClient, FetchClient, ReqwestTransport, Transport};
use eshop_observability::{action_span, page_span};
use eshop_router::{DataRequirement, Navigator, PageState, Route, Ticket};
use eshop_views::*;
use rand::seq::SliceRandom;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tracing::Instrument;

use crate::{Screen, ShopConfig, ShopError, Surface};

/// Number of random products on the home page unless configured.
pub const DEFAULT_FEATURED_COUNT: usize = 3;

/// Message on the 404 page for an unknown product id.
pub const PRODUCT_NOT_FOUND_MESSAGE: &str = "Product not found";

const LOAD_FAILED_MESSAGE: &str = "We could not load this page. Check your connection and try again.";

/// How a navigation ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The page was rendered and mounted.
    Ready { route: Route },
    /// Loading failed and the error view was mounted.
    Failed { route: Route, error: String },
    /// A newer navigation started first; nothing was mounted.
    Discarded { route: Route },
}

impl Outcome {
    pub fn route(&self) -> &Route {
        match self {
            Outcome::Ready { route } | Outcome::Failed { route, .. } | Outcome::Discarded { route } => route,
        }
    }

    /// State of the mounted page, or `None` if the result was discarded.
    pub fn state(&self) -> Option<PageState> {
        match self {
            Outcome::Ready { .. } => Some(PageState::Ready),
            Outcome::Failed { .. } => Some(PageState::Failed),
            Outcome::Discarded { .. } => None,
        }
    }
}

/// A button press on a mounted page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiAction {
    /// Add one unit and stay on the page.
    AddToCart(ProductId),
    /// Add one unit and go to the cart.
    BuyNow(ProductId),
    Increase(ProductId),
    Decrease(ProductId),
    Remove(ProductId),
    Checkout,
    /// Re-run the latest navigation.
    Retry,
}

impl UiAction {
    /// Build an action from a rendered `data-action` and `data-product-id` pair.
    pub fn from_data_action(action: &str, product_id: Option<ProductId>) -> Option<Self> {
        match (action, product_id) {
            ("add-to-cart", Some(id)) => Some(UiAction::AddToCart(id)),
            ("buy-now", Some(id)) => Some(UiAction::BuyNow(id)),
            ("increase", Some(id)) => Some(UiAction::Increase(id)),
            ("decrease", Some(id)) => Some(UiAction::Decrease(id)),
            ("remove", Some(id)) => Some(UiAction::Remove(id)),
            ("checkout", _) => Some(UiAction::Checkout),
            ("retry", _) => Some(UiAction::Retry),
            _ => None,
        }
    }

    /// The `data-action` name.
    pub fn name(&self) -> &'static str {
        match self {
            UiAction::AddToCart(_) => "add-to-cart",
            UiAction::BuyNow(_) => "buy-now",
            UiAction::Increase(_) => "increase",
            UiAction::Decrease(_) => "decrease",
            UiAction::Remove(_) => "remove",
            UiAction::Checkout => "checkout",
            UiAction::Retry => "retry",
        }
    }
}

/// Wires the catalog, the cart and the router to a [`Surface`].
///
/// Navigations may overlap. Each one mounts a loading page right away and
/// holds a [`Ticket`]; when its data arrives the page is mounted only if no
/// newer navigation has started in the meantime. Cart locks are never held
/// across an `.await`.
pub struct Storefront {
    catalog: CatalogClient,
    cart: Mutex<CartStore>,
    navigator: Navigator,
    surface: Arc<dyn Surface>,
    featured_count: usize,
    categories: Mutex<Vec<Category>>,
    // Serializes the staleness check with the mount that follows it.
    mount_guard: Mutex<()>,
}

fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(PoisonError::into_inner)
}

impl Storefront {
    pub fn new(catalog: CatalogClient, cart: CartStore, surface: Arc<dyn Surface>) -> Self {
        Self {
            catalog,
            cart: Mutex::new(cart),
            navigator: Navigator::new(),
            surface,
            featured_count: DEFAULT_FEATURED_COUNT,
            categories: Mutex::new(Vec::new()),
            mount_guard: Mutex::new(()),
        }
    }

    /// Set how many products the home page features.
    pub fn with_featured_count(mut self, count: usize) -> Self {
        self.featured_count = count;
        self
    }

    /// Build a storefront talking HTTP and storing the cart on disk.
    pub fn from_config(config: &ShopConfig, surface: Arc<dyn Surface>) -> Result<Self, ShopError> {
        let transport = Arc::new(ReqwestTransport::new(config.api.timeout())?);
        Self::from_config_with_transport(config, transport, surface)
    }

    /// Like [`from_config`](Self::from_config) with a caller-supplied transport.
    pub fn from_config_with_transport(
        config: &ShopConfig,
        transport: Arc<dyn Transport>,
        surface: Arc<dyn Surface>,
    ) -> Result<Self, ShopError> {
        let fetch = FetchClient::new(&config.api.base_url, transport)?;
        let catalog = CatalogClient::new(fetch)
            .with_currency(config.pricing.currency)
            .with_memoize(config.api.memoize);

        let cache = Cache::new(FileStore::open(config.storage.dir.clone())?);
        let cart = CartStore::open(cache, config.storage.cart_key.clone(), config.shipping_policy()?)?;

        tracing::debug!(
            base_url = %config.api.base_url,
            storage = %config.storage.dir.display(),
            "storefront configured"
        );
        Ok(Self::new(catalog, cart, surface).with_featured_count(config.home.featured_count))
    }

    pub fn catalog(&self) -> &CatalogClient {
        &self.catalog
    }

    /// Route of the latest navigation.
    pub fn current_route(&self) -> Option<Route> {
        self.navigator.current()
    }

    /// Parse `token` and navigate to it.
    pub async fn navigate(&self, token: &str) -> Outcome {
        self.navigate_to(Route::parse(token)).await
    }

    /// Mount the loading page for `route`, fetch its data and mount the
    /// result unless a newer navigation has started.
    pub async fn navigate_to(&self, route: Route) -> Outcome {
        let ticket = {
            let _guard = lock(&self.mount_guard);
            let ticket = self.navigator.begin(route);
            self.mount(&ticket, PageState::Loading, render_loading());
            ticket
        };

        let span = page_span(&ticket.route().token(), ticket.generation());
        self.finish(ticket).instrument(span).await
    }

    async fn finish(&self, ticket: Ticket) -> Outcome {
        let route = ticket.route().clone();
        let (page, ()) = tokio::join!(self.resolve(&route), self.refresh_categories());

        let _guard = lock(&self.mount_guard);
        if !self.navigator.is_current(&ticket) {
            tracing::debug!(route = %route, generation = ticket.generation(), "discarding stale page");
            return Outcome::Discarded { route };
        }

        match page {
            Ok(content) => {
                self.mount(&ticket, PageState::Ready, content);
                Outcome::Ready { route }
            }
            Err(e) => {
                tracing::warn!(route = %route, error = %e, "page failed to load");
                let retry = render_error(LOAD_FAILED_MESSAGE, &route.to_string());
                self.mount(&ticket, PageState::Failed, retry);
                Outcome::Failed {
                    route,
                    error: e.to_string(),
                }
            }
        }
    }

    async fn resolve(&self, route: &Route) -> Result<Fragment, ShopError> {
        let content = match route.requirement() {
            DataRequirement::FeaturedProducts => {
                let products = self.catalog.list_products(None).await?;
                let featured = pick_featured(&products, self.featured_count);
                Fragment::concat([&render_hero(), &render_featured(&featured)])
            }
            DataRequirement::Search(query) => {
                let products = self.catalog.search(&query).await?;
                render_search_page(&query, &products)
            }
            DataRequirement::Category(name) => {
                let products = self.catalog.list_by_category(&name).await?;
                render_category_page(&Category::new(name), &products)
            }
            DataRequirement::Product(id) => match self.catalog.get_product(id).await? {
                Some(product) => render_product_detail(&product, &self.policy()),
                None => render_not_found(Some(PRODUCT_NOT_FOUND_MESSAGE)),
            },
            DataRequirement::None => self.render_local(route)?,
        };
        Ok(content)
    }

    fn render_local(&self, route: &Route) -> Result<Fragment, ShopError> {
        let content = match route {
            Route::Cart => {
                let cart = lock(&self.cart);
                let snapshot = cart.snapshot();
                if snapshot.is_empty() {
                    render_empty_cart()
                } else {
                    render_cart(&snapshot, &cart.summary()?)
                }
            }
            Route::Thanks => render_thanks(),
            _ => render_not_found(None),
        };
        Ok(content)
    }

    async fn refresh_categories(&self) {
        match self.catalog.list_categories().await {
            Ok(categories) => *lock(&self.categories) = categories,
            Err(e) => tracing::warn!(error = %e, "keeping previous category navigation"),
        }
    }

    fn mount(&self, ticket: &Ticket, state: PageState, content: Fragment) {
        let categories = lock(&self.categories).clone();
        let cart_count = lock(&self.cart).item_count();
        let fragment = render_layout(&categories, cart_count, &content);

        tracing::debug!(route = %ticket.route(), generation = ticket.generation(), ?state, "mounting page");
        self.surface.mount(Screen {
            route: ticket.route().clone(),
            state,
            generation: ticket.generation(),
            fragment,
        });
    }

    /// Run a page action. Returns the navigation it triggered, if any.
    pub async fn dispatch(&self, action: UiAction) -> Result<Option<Outcome>, ShopError> {
        let span = action_span(action.name());
        async move {
            match action {
                UiAction::AddToCart(id) => {
                    self.add_to_cart(id, 1).await?;
                    Ok(None)
                }
                UiAction::BuyNow(id) => {
                    self.add_to_cart(id, 1).await?;
                    Ok(Some(self.navigate_to(Route::Cart).await))
                }
                UiAction::Increase(id) => {
                    lock(&self.cart).increment(id)?;
                    Ok(self.refresh_cart_page().await)
                }
                UiAction::Decrease(id) => {
                    lock(&self.cart).decrement(id)?;
                    Ok(self.refresh_cart_page().await)
                }
                UiAction::Remove(id) => {
                    lock(&self.cart).remove(id)?;
                    Ok(self.refresh_cart_page().await)
                }
                UiAction::Checkout => {
                    self.checkout()?;
                    Ok(Some(self.navigate_to(Route::Thanks).await))
                }
                UiAction::Retry => {
                    let route = self.navigator.current().ok_or(ShopError::NothingToRetry)?;
                    Ok(Some(self.navigate_to(route).await))
                }
            }
        }
        .instrument(span)
        .await
    }

    async fn refresh_cart_page(&self) -> Option<Outcome> {
        if self.navigator.current() == Some(Route::Cart) {
            Some(self.navigate_to(Route::Cart).await)
        } else {
            None
        }
    }

    /// Fetch `product_id` and add `quantity` units of it to the cart.
    pub async fn add_to_cart(&self, product_id: ProductId, quantity: i64) -> Result<CartSummary, ShopError> {
        let product = self.catalog.require_product(product_id).await?;
        let mut cart = lock(&self.cart);
        cart.add(&product, quantity)?;
        tracing::info!(product_id = %product_id, quantity, "added to cart");
        Ok(cart.summary()?)
    }

    /// Remove a cart line. Returns whether there was one.
    pub fn remove_from_cart(&self, product_id: ProductId) -> Result<bool, ShopError> {
        Ok(lock(&self.cart).remove(product_id)?)
    }

    /// Set a line's quantity; zero or less removes it.
    pub fn set_quantity(&self, product_id: ProductId, quantity: i64) -> Result<bool, ShopError> {
        Ok(lock(&self.cart).set_quantity(product_id, quantity)?)
    }

    pub fn clear_cart(&self) -> Result<(), ShopError> {
        Ok(lock(&self.cart).clear()?)
    }

    pub fn cart_snapshot(&self) -> Cart {
        lock(&self.cart).snapshot()
    }

    pub fn cart_summary(&self) -> Result<CartSummary, ShopError> {
        Ok(lock(&self.cart).summary()?)
    }

    pub fn cart_count(&self) -> i64 {
        lock(&self.cart).item_count()
    }

    fn policy(&self) -> ShippingPolicy {
        *lock(&self.cart).policy()
    }

    /// Export the cart as an order, log it and empty the cart.
    pub fn checkout(&self) -> Result<CheckoutOrder, ShopError> {
        let mut cart = lock(&self.cart);
        let order = cart.export_for_checkout()?;
        if order.is_empty() {
            return Err(ShopError::EmptyCart);
        }
        cart.clear()?;

        match serde_json::to_string(&order) {
            Ok(json) => tracing::info!(order = %json, total = %order.summary.total, "order placed"),
            Err(e) => tracing::warn!(error = %e, "could not serialize order"),
        }
        Ok(order)
    }

    /// Receive an event for every cart change.
    pub fn subscribe_cart(&self) -> broadcast::Receiver<CartEvent> {
        lock(&self.cart).subscribe()
    }

    /// Keep the surface's cart badge in step with the cart.
    ///
    /// Pushes the current count immediately, then one update per cart
    /// event. Must be called from within a tokio runtime.
    pub fn watch_cart_badge(&self) -> JoinHandle<()> {
        let mut events = self.subscribe_cart();
        let surface = Arc::clone(&self.surface);
        surface.cart_badge(self.cart_count());

        tokio::spawn(async move {
            loop {
                match events.recv().await {
                    Ok(event) => surface.cart_badge(event.summary.item_count),
                    Err(broadcast::error::RecvError::Lagged(skipped)) => {
                        tracing::debug!(skipped, "cart badge fell behind");
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }
        })
    }
}

impl std::fmt::Debug for Storefront {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Storefront")
            .field("catalog", &self.catalog)
            .field("featured_count", &self.featured_count)
            .field("current", &self.navigator.current())
            .finish_non_exhaustive()
    }
}

fn pick_featured(products: &[Product], count: usize) -> Vec<Product> {
    let mut rng = rand::thread_rng();
    products.choose_multiple(&mut rng, count).cloned().collect()
}

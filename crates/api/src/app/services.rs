use std::sync::Arc;

use brasa_cart::CartStorage;
use brasa_catalog::ProductRepository;
use brasa_coupons::CouponRepository;
use brasa_infra::{
    seed, ChangeFeed, InMemoryAuthProvider, InMemoryCartStore, InMemoryConsentLog,
    InMemoryCouponRepository, InMemoryJobRepository, InMemoryProductRepository,
    InMemoryProfileDirectory, InMemoryQuoteRepository,
};
use brasa_quotes::{JobRepository, QuoteRepository};

/// Shared stores and providers behind every handler.
///
/// Everything hangs off one [`ChangeFeed`] so every mutation is visible to
/// the SSE stream.
pub struct AppServices {
    pub auth: Arc<InMemoryAuthProvider>,
    pub profiles: Arc<InMemoryProfileDirectory>,
    pub products: Arc<dyn ProductRepository>,
    pub coupons: Arc<dyn CouponRepository>,
    pub quotes: Arc<dyn QuoteRepository>,
    pub jobs: Arc<dyn JobRepository>,
    pub carts: Arc<dyn CartStorage>,
    pub consents: Arc<InMemoryConsentLog>,
    pub feed: ChangeFeed,
}

pub fn build_services() -> Arc<AppServices> {
    let feed = ChangeFeed::default();

    let profiles = Arc::new(InMemoryProfileDirectory::new(feed.clone()));
    let auth = Arc::new(InMemoryAuthProvider::new(profiles.clone()));
    let products: Arc<dyn ProductRepository> =
        Arc::new(InMemoryProductRepository::new(feed.clone()));
    let coupons: Arc<dyn CouponRepository> = Arc::new(InMemoryCouponRepository::new(feed.clone()));
    let quotes: Arc<dyn QuoteRepository> = Arc::new(InMemoryQuoteRepository::new(feed.clone()));
    let jobs: Arc<dyn JobRepository> = Arc::new(InMemoryJobRepository::new(feed.clone()));
    let carts: Arc<dyn CartStorage> = Arc::new(InMemoryCartStore::new());
    let consents = Arc::new(InMemoryConsentLog::new());

    let seed_demo = std::env::var("BRASA_SEED_DEMO_DATA")
        .unwrap_or_else(|_| "false".to_string())
        .parse::<bool>()
        .unwrap_or(false);
    if seed_demo {
        if let Err(err) = seed::seed_demo_data(&auth, &products, &coupons) {
            tracing::error!(error = %err, "demo data seeding failed");
        }
    }

    Arc::new(AppServices {
        auth,
        profiles,
        products,
        coupons,
        quotes,
        jobs,
        carts,
        consents,
        feed,
    })
}

//! BTC price lookup with a short-lived cache.
//!
//! [`PriceService`] answers from its cache while the last quote is younger
//! than the ttl and otherwise fetches synchronously from its [`PriceFeed`].
//! A failed or incomplete fetch leaves the previous entry untouched.

use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Number;
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::debug;

/// Errors from the price feed.
#[derive(Debug, Error)]
pub enum PriceError {
    /// Feed answered with a non-success status.
    #[error("Price feed returned {0}")]
    Status(String),

    /// Feed response had no `USD` rate.
    #[error("Price feed response has no USD rate")]
    MissingUsd,

    /// Request failed or the body was not valid JSON.
    #[error("Price feed request failed: {0}")]
    Http(#[from] reqwest::Error),
}

impl PriceError {
    /// Message returned to API clients.
    pub fn client_message(&self) -> String {
        match self {
            PriceError::Status(reason) => reason.clone(),
            PriceError::MissingUsd | PriceError::Http(_) => "Failed to get price".to_string(),
        }
    }
}

/// Rates as returned by the feed. Other fields are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FeedPrices {
    #[serde(rename = "USD", default)]
    pub usd: Option<Number>,
    #[serde(rename = "EUR", default)]
    pub eur: Option<Number>,
    #[serde(rename = "GBP", default)]
    pub gbp: Option<Number>,
}

/// Price of one BTC in fiat currencies.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceQuote {
    pub usd: Number,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub eur: Option<Number>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gbp: Option<Number>,
}

impl PriceQuote {
    /// Build a quote from feed rates, or `None` if there is no USD rate.
    pub fn from_feed(prices: FeedPrices) -> Option<Self> {
        Some(Self {
            usd: prices.usd?,
            eur: prices.eur,
            gbp: prices.gbp,
        })
    }
}

/// Source of fresh BTC rates.
#[async_trait]
pub trait PriceFeed: Send + Sync {
    async fn fetch(&self) -> Result<FeedPrices, PriceError>;
}

/// [`PriceFeed`] backed by the mempool.space prices endpoint.
#[derive(Debug, Clone)]
pub struct MempoolPriceFeed {
    http: reqwest::Client,
    url: String,
}

impl MempoolPriceFeed {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, PriceError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            url: url.into(),
        })
    }
}

#[async_trait]
impl PriceFeed for MempoolPriceFeed {
    async fn fetch(&self) -> Result<FeedPrices, PriceError> {
        debug!("Fetching prices from {}", self.url);
        let response = self.http.get(&self.url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(PriceError::Status(
                status.canonical_reason().unwrap_or("Unknown").to_string(),
            ));
        }

        Ok(response.json().await?)
    }
}

#[derive(Debug, Clone)]
struct CacheEntry {
    quote: PriceQuote,
    fetched_at: Instant,
}

impl CacheEntry {
    fn is_fresh(&self, now: Instant, ttl: Duration) -> bool {
        now.saturating_duration_since(self.fetched_at) < ttl
    }
}

/// Single-slot cache holding the last quote and when it was fetched.
#[derive(Debug)]
pub struct PriceCache {
    ttl: Duration,
    slot: RwLock<Option<CacheEntry>>,
}

impl PriceCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            slot: RwLock::new(None),
        }
    }

    /// The cached quote, if it is still fresh at `now`.
    pub async fn fresh(&self, now: Instant) -> Option<PriceQuote> {
        let slot = self.slot.read().await;
        slot.as_ref()
            .filter(|entry| entry.is_fresh(now, self.ttl))
            .map(|entry| entry.quote.clone())
    }

    /// Overwrite the slot.
    pub async fn store(&self, quote: PriceQuote, fetched_at: Instant) {
        *self.slot.write().await = Some(CacheEntry { quote, fetched_at });
    }

    /// The cached quote regardless of age.
    pub async fn last(&self) -> Option<PriceQuote> {
        self.slot.read().await.as_ref().map(|entry| entry.quote.clone())
    }
}

/// Cached price lookup. Shared through application state.
pub struct PriceService {
    feed: Arc<dyn PriceFeed>,
    cache: PriceCache,
}

impl PriceService {
    pub fn new(feed: Arc<dyn PriceFeed>, ttl: Duration) -> Self {
        Self {
            feed,
            cache: PriceCache::new(ttl),
        }
    }

    /// Current quote, from cache when fresh.
    ///
    /// The cache lock is released before fetching, so concurrent refreshes
    /// may both hit the feed; the last write wins.
    pub async fn quote(&self) -> Result<PriceQuote, PriceError> {
        let now = Instant::now();
        if let Some(quote) = self.cache.fresh(now).await {
            debug!("Serving cached price");
            return Ok(quote);
        }

        let prices = self.feed.fetch().await?;
        let quote = PriceQuote::from_feed(prices).ok_or(PriceError::MissingUsd)?;
        self.cache.store(quote.clone(), now).await;
        Ok(quote)
    }

    pub fn cache(&self) -> &PriceCache {
        &self.cache
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    struct CountingFeed {
        calls: AtomicUsize,
        usd: Mutex<Option<u64>>,
    }

    impl CountingFeed {
        fn new(usd: Option<u64>) -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicUsize::new(0),
                usd: Mutex::new(usd),
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }

        fn set_usd(&self, usd: Option<u64>) {
            *self.usd.lock().unwrap() = usd;
        }
    }

    #[async_trait]
    impl PriceFeed for CountingFeed {
        async fn fetch(&self) -> Result<FeedPrices, PriceError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(FeedPrices {
                usd: self.usd.lock().unwrap().map(Number::from),
                eur: Some(Number::from(90_000u64)),
                gbp: Some(Number::from(77_000u64)),
            })
        }
    }

    fn quote(usd: u64) -> PriceQuote {
        PriceQuote {
            usd: Number::from(usd),
            eur: None,
            gbp: None,
        }
    }

    #[tokio::test]
    async fn cache_entry_expires_after_ttl() {
        let cache = PriceCache::new(Duration::from_secs(30));
        let t0 = Instant::now();
        cache.store(quote(100), t0).await;

        assert_eq!(cache.fresh(t0).await, Some(quote(100)));
        assert_eq!(
            cache.fresh(t0 + Duration::from_millis(29_999)).await,
            Some(quote(100))
        );
        assert_eq!(cache.fresh(t0 + Duration::from_secs(30)).await, None);
        assert_eq!(cache.last().await, Some(quote(100)));
    }

    #[tokio::test]
    async fn empty_cache_is_never_fresh() {
        let cache = PriceCache::new(Duration::from_secs(30));
        assert_eq!(cache.fresh(Instant::now()).await, None);
    }

    #[tokio::test]
    async fn second_call_within_ttl_uses_cache() {
        let feed = CountingFeed::new(Some(97_000));
        let service = PriceService::new(feed.clone(), Duration::from_secs(30));

        let first = service.quote().await.unwrap();
        let second = service.quote().await.unwrap();

        assert_eq!(first, second);
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            r#"{"usd":97000,"eur":90000,"gbp":77000}"#
        );
        assert_eq!(feed.calls(), 1);
    }

    #[tokio::test]
    async fn call_after_ttl_fetches_once_more() {
        let feed = CountingFeed::new(Some(97_000));
        let service = PriceService::new(feed.clone(), Duration::from_millis(50));

        service.quote().await.unwrap();
        tokio::time::sleep(Duration::from_millis(80)).await;
        feed.set_usd(Some(98_000));

        let refreshed = service.quote().await.unwrap();
        assert_eq!(refreshed.usd, Number::from(98_000u64));
        assert_eq!(feed.calls(), 2);

        service.quote().await.unwrap();
        assert_eq!(feed.calls(), 2);
    }

    #[tokio::test]
    async fn missing_usd_keeps_previous_entry() {
        let feed = CountingFeed::new(Some(97_000));
        let service = PriceService::new(feed.clone(), Duration::from_millis(20));

        service.quote().await.unwrap();
        tokio::time::sleep(Duration::from_millis(40)).await;
        feed.set_usd(None);

        let err = service.quote().await.unwrap_err();
        assert!(matches!(err, PriceError::MissingUsd));
        assert_eq!(err.client_message(), "Failed to get price");
        assert_eq!(
            service.cache().last().await.map(|q| q.usd),
            Some(Number::from(97_000u64))
        );
    }

    #[test]
    fn quote_omits_missing_currencies() {
        let quote = PriceQuote::from_feed(FeedPrices {
            usd: Some(Number::from(1u64)),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(serde_json::to_string(&quote).unwrap(), r#"{"usd":1}"#);
    }

    #[test]
    fn feed_prices_parse_mempool_shape() {
        let prices: FeedPrices = serde_json::from_str(
            r#"{"time":1700000000,"USD":37000,"EUR":34000,"GBP":29500,"CAD":50000}"#,
        )
        .unwrap();
        let quote = PriceQuote::from_feed(prices).unwrap();
        assert_eq!(quote.usd, Number::from(37_000u64));
        assert_eq!(quote.gbp, Some(Number::from(29_500u64)));
    }
}

use crate::domain::ports::quote_provider::{QuoteError, QuoteProvider};
use crate::domain::values::quote::Quote;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

/// How long a fetched quote stays fresh.
pub const QUOTE_TTL: Duration = Duration::from_secs(300);

struct CachedEntry {
    quote: Quote,
    fetched_at: Instant,
}

/// Keyed TTL cache for quotes. An explicit instance owned by the provider
/// wrapper, not process-global state.
pub struct QuoteCache {
    ttl: Duration,
    entries: Mutex<HashMap<String, CachedEntry>>,
}

impl QuoteCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: Mutex::new(HashMap::new()),
        }
    }

    pub fn get(&self, symbol: &str) -> Option<Quote> {
        let entries = self.entries.lock().ok()?;
        let entry = entries.get(symbol)?;
        if entry.fetched_at.elapsed() >= self.ttl {
            return None;
        }
        Some(entry.quote.clone())
    }

    pub fn put(&self, quote: Quote) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.insert(
                quote.symbol.clone(),
                CachedEntry {
                    quote,
                    fetched_at: Instant::now(),
                },
            );
        }
    }
}

/// Wraps any quote provider with a per-symbol TTL cache. Only successful
/// fetches are cached, so a provider outage is retried on the next request.
pub struct CachedQuotes {
    inner: Arc<dyn QuoteProvider>,
    cache: QuoteCache,
}

impl CachedQuotes {
    pub fn new(inner: Arc<dyn QuoteProvider>, ttl: Duration) -> Self {
        Self {
            inner,
            cache: QuoteCache::new(ttl),
        }
    }
}

#[async_trait]
impl QuoteProvider for CachedQuotes {
    fn name(&self) -> &str {
        self.inner.name()
    }

    async fn fetch(&self, symbol: &str) -> Result<Quote, QuoteError> {
        let key = symbol.trim().to_uppercase();
        if let Some(quote) = self.cache.get(&key) {
            return Ok(quote);
        }
        let quote = self.inner.fetch(&key).await?;
        self.cache.put(quote.clone());
        Ok(quote)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::quotes::fixed::FixedQuotes;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingQuotes {
        inner: FixedQuotes,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl QuoteProvider for CountingQuotes {
        fn name(&self) -> &str {
            "counting"
        }

        async fn fetch(&self, symbol: &str) -> Result<Quote, QuoteError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.inner.fetch(symbol).await
        }
    }

    #[test]
    fn test_second_fetch_served_from_cache() {
        let counting = Arc::new(CountingQuotes {
            inner: FixedQuotes::default(),
            calls: AtomicUsize::new(0),
        });
        let cached = CachedQuotes::new(counting.clone(), Duration::from_secs(300));

        let rt = tokio::runtime::Runtime::new().unwrap();
        rt.block_on(cached.fetch("AAPL")).unwrap();
        rt.block_on(cached.fetch("aapl")).unwrap();
        assert_eq!(counting.calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_expired_entry_refetches() {
        let counting = Arc::new(CountingQuotes {
            inner: FixedQuotes::default(),
            calls: AtomicUsize::new(0),
        });
        let cached = CachedQuotes::new(counting.clone(), Duration::from_millis(10));

        let rt = tokio::runtime::Runtime::new().unwrap();
        rt.block_on(cached.fetch("AAPL")).unwrap();
        std::thread::sleep(Duration::from_millis(20));
        rt.block_on(cached.fetch("AAPL")).unwrap();
        assert_eq!(counting.calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_failures_are_not_cached() {
        let counting = Arc::new(CountingQuotes {
            inner: FixedQuotes::empty(),
            calls: AtomicUsize::new(0),
        });
        let cached = CachedQuotes::new(counting.clone(), Duration::from_secs(300));

        let rt = tokio::runtime::Runtime::new().unwrap();
        assert!(rt.block_on(cached.fetch("AAPL")).is_err());
        assert!(rt.block_on(cached.fetch("AAPL")).is_err());
        assert_eq!(counting.calls.load(Ordering::SeqCst), 2);
    }
}

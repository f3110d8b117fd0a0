use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::Duration;

use parking_lot::Mutex;
use tracing::{debug, info, warn};

use crate::cache::TtlCache;
use crate::error::{Result, TypeaheadError};

use super::retry::{JitterSource, RetryConfig, RetryOverrides, ThreadRngJitter, calculate_delay};

type BoxFuture<T> = Pin<Box<dyn Future<Output = T> + Send>>;
type DeferredRetry = Box<dyn FnOnce() -> BoxFuture<Result<()>> + Send>;

/// Resilient fetch coordinator.
///
/// Explicitly constructed and passed by reference (or cloned — all clones
/// share one TTL cache, retry queue, and connectivity flag), instead of a
/// hidden process-wide singleton. Within one `fetch_with_retry` call
/// attempts run strictly sequentially; there is no cancellation and no
/// timeout beyond whatever the supplied callable enforces itself.
pub struct FetchManager<V> {
    inner: Arc<Inner<V>>,
}

impl<V> Clone for FetchManager<V> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

struct Inner<V> {
    cache: Mutex<TtlCache<V>>,
    retry_queue: Mutex<Vec<(String, Vec<DeferredRetry>)>>,
    online: AtomicBool,
    defaults: RetryConfig,
    jitter: Mutex<Box<dyn JitterSource>>,
    queue_seq: AtomicU64,
}

impl<V: Clone + Send + 'static> FetchManager<V> {
    pub fn new() -> Self {
        Self::with_defaults(RetryConfig::default(), TtlCache::new())
    }

    pub fn with_defaults(defaults: RetryConfig, cache: TtlCache<V>) -> Self {
        Self {
            inner: Arc::new(Inner {
                cache: Mutex::new(cache),
                retry_queue: Mutex::new(Vec::new()),
                online: AtomicBool::new(true),
                defaults,
                jitter: Mutex::new(Box::new(ThreadRngJitter)),
                queue_seq: AtomicU64::new(0),
            }),
        }
    }

    /// Replace the jitter source; tests use a fixed factor.
    pub fn set_jitter_source(&self, source: Box<dyn JitterSource>) {
        *self.inner.jitter.lock() = source;
    }

    pub fn is_online(&self) -> bool {
        self.inner.online.load(Ordering::SeqCst)
    }

    /// Drive the connectivity signal. The offline-to-online transition
    /// drains the deferred retry queue before returning.
    pub async fn set_online(&self, online: bool) {
        let was_online = self.inner.online.swap(online, Ordering::SeqCst);
        if online && !was_online {
            info!("connectivity restored, draining deferred retries");
            self.process_retry_queue().await;
        } else if !online && was_online {
            debug!("connectivity lost");
        }
    }

    /// Last-known-good read, bypassing any fetch.
    pub fn cache_get(&self, key: &str) -> Option<V> {
        self.inner.cache.lock().get(key)
    }

    pub fn cache_set(&self, key: impl Into<String>, value: V) {
        self.inner.cache.lock().set(key, value);
    }

    pub fn cache_set_with_ttl(&self, key: impl Into<String>, value: V, ttl: Duration) {
        self.inner.cache.lock().set_with_ttl(key, value, ttl);
    }

    pub fn cache_clear(&self) {
        self.inner.cache.lock().clear();
    }

    /// Queued deferred retries awaiting reconnect.
    pub fn queued_retries(&self) -> usize {
        self.inner
            .retry_queue
            .lock()
            .iter()
            .map(|(_, callbacks)| callbacks.len())
            .sum()
    }

    /// Cache-aside fetch with retry.
    ///
    /// Returns a cached unexpired value immediately when present. Otherwise
    /// runs up to `max_attempts` sequential attempts: offline attempts
    /// enqueue a deferred resumption of the whole call and count as
    /// failures; online failures back off exponentially before the next
    /// attempt. Exhaustion surfaces `RetryExhausted` wrapping the last
    /// failure. A call that was queued while offline may still complete
    /// later through the queue, observable via the TTL cache.
    pub async fn fetch_with_retry<F, Fut>(
        &self,
        key: &str,
        fetch: F,
        overrides: RetryOverrides,
    ) -> Result<V>
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<V>> + Send + 'static,
    {
        let config = overrides.merged(&self.inner.defaults);
        self.run(key.to_string(), Arc::new(fetch), config).await
    }

    /// The retry loop, boxed so a deferred resumption can re-enter it.
    fn run<F, Fut>(&self, key: String, fetch: Arc<F>, config: RetryConfig) -> BoxFuture<Result<V>>
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<V>> + Send + 'static,
    {
        let manager = self.clone();
        Box::pin(async move {
            if let Some(cached) = manager.cache_get(&key) {
                debug!(key = %key, "fetch served from cache");
                return Ok(cached);
            }

            let mut attempt: u32 = 0;
            loop {
                let outcome = if manager.is_online() {
                    fetch().await
                } else {
                    manager.enqueue_deferred(&key, Arc::clone(&fetch), config.clone());
                    Err(TypeaheadError::Offline)
                };

                match outcome {
                    Ok(value) => {
                        manager.inner.cache.lock().set(key.clone(), value.clone());
                        return Ok(value);
                    }
                    Err(error) => {
                        attempt += 1;
                        if attempt >= config.max_attempts {
                            return Err(TypeaheadError::RetryExhausted {
                                attempts: attempt,
                                source: Box::new(error),
                            });
                        }
                        let factor = manager.inner.jitter.lock().factor();
                        let delay = calculate_delay(attempt, &config, factor);
                        debug!(
                            key = %key,
                            attempt,
                            delay_ms = delay.as_millis() as u64,
                            error = %error,
                            "backing off before retry"
                        );
                        tokio::time::sleep(delay).await;
                    }
                }
            }
        })
    }

    fn enqueue_deferred<F, Fut>(&self, key: &str, fetch: Arc<F>, config: RetryConfig)
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<V>> + Send + 'static,
    {
        let seq = self.inner.queue_seq.fetch_add(1, Ordering::SeqCst);
        let queued_key = format!("{key}#{seq}");
        let manager = self.clone();
        let original_key = key.to_string();
        let callback: DeferredRetry = Box::new(move || {
            Box::pin(async move { manager.run(original_key, fetch, config).await.map(|_| ()) })
        });

        let mut queue = self.inner.retry_queue.lock();
        if let Some((_, callbacks)) = queue.iter_mut().find(|(k, _)| *k == queued_key) {
            callbacks.push(callback);
        } else {
            queue.push((queued_key.clone(), vec![callback]));
        }
        debug!(key = %queued_key, "queued deferred retry while offline");
    }

    /// One callable per queued key per pass; emptied keys are removed.
    /// Drain failures are logged and never abort the pass.
    async fn process_retry_queue(&self) {
        let batch: Vec<(String, DeferredRetry)> = {
            let mut queue = self.inner.retry_queue.lock();
            let mut batch = Vec::new();
            queue.retain_mut(|(key, callbacks)| {
                if !callbacks.is_empty() {
                    batch.push((key.clone(), callbacks.remove(0)));
                }
                !callbacks.is_empty()
            });
            batch
        };

        for (key, callback) in batch {
            if let Err(error) = callback().await {
                warn!(key = %key, error = %error, "deferred retry failed");
            }
        }
    }
}

impl<V: Clone + Send + 'static> Default for FetchManager<V> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    struct FixedJitter(f64);
    impl JitterSource for FixedJitter {
        fn factor(&mut self) -> f64 {
            self.0
        }
    }

    fn quick_manager() -> FetchManager<u32> {
        let config = RetryConfig {
            base_delay: Duration::from_millis(1),
            max_delay: Duration::from_millis(5),
            jitter: false,
            ..RetryConfig::default()
        };
        FetchManager::with_defaults(config, TtlCache::new())
    }

    #[tokio::test]
    async fn test_success_populates_cache() {
        let manager = quick_manager();
        let value = manager
            .fetch_with_retry("k", || async { Ok(7) }, RetryOverrides::new())
            .await
            .unwrap();
        assert_eq!(value, 7);
        assert_eq!(manager.cache_get("k"), Some(7));
    }

    #[tokio::test]
    async fn test_cache_aside_skips_fetch() {
        let manager = quick_manager();
        manager.cache_set("k", 1);

        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let value = manager
            .fetch_with_retry(
                "k",
                move || {
                    counter.fetch_add(1, Ordering::SeqCst);
                    async { Ok(99) }
                },
                RetryOverrides::new(),
            )
            .await
            .unwrap();

        assert_eq!(value, 1);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_exhaustion_wraps_last_failure() {
        let manager = quick_manager();
        let result = manager
            .fetch_with_retry(
                "k",
                || async { Err(TypeaheadError::FetchFailed("boom".into())) },
                RetryOverrides::new().with_max_attempts(3),
            )
            .await;

        match result {
            Err(TypeaheadError::RetryExhausted { attempts, source }) => {
                assert_eq!(attempts, 3);
                assert!(matches!(*source, TypeaheadError::FetchFailed(_)));
            }
            other => panic!("expected RetryExhausted, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_set_jitter_source_is_used() {
        let manager = quick_manager();
        manager.set_jitter_source(Box::new(FixedJitter(0.5)));
        // Smoke test: a failing call still terminates with the injected
        // source in place.
        let result = manager
            .fetch_with_retry(
                "k",
                || async { Err(TypeaheadError::FetchFailed("nope".into())) },
                RetryOverrides::new().with_max_attempts(2),
            )
            .await;
        assert!(result.is_err());
    }
}

//! Poll/cache/broadcast lifecycle for the spot price.

use std::collections::HashMap;
use std::pin::Pin;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, RwLock};
use std::task::{Context, Poll};
use std::time::Duration;

use futures::Stream;
use log::{error, info, warn};
use rust_decimal::Decimal;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use goldfolio_market_data::{SpotPrice, SpotPriceProvider};

/// Notification delivered to every registered subscriber.
#[derive(Debug, Clone, PartialEq)]
pub enum PriceEvent {
    /// The spot price changed to this value.
    Price(Decimal),
    /// A poll failed; the last good price is still cached.
    Error(String),
}

/// State shared between the broadcaster handle and its poll task.
struct BroadcasterInner {
    subscribers: Mutex<HashMap<u64, mpsc::UnboundedSender<PriceEvent>>>,
    next_subscriber_id: AtomicU64,
    last_price: RwLock<Option<SpotPrice>>,
}

impl BroadcasterInner {
    fn new() -> Self {
        Self {
            subscribers: Mutex::new(HashMap::new()),
            next_subscriber_id: AtomicU64::new(0),
            last_price: RwLock::new(None),
        }
    }

    /// Delivers one event to every live subscriber, pruning dead ones.
    ///
    /// A send only fails when the receiving half is gone, so a dead peer
    /// never affects delivery to the rest.
    fn notify(&self, event: &PriceEvent) {
        let mut subscribers = self.subscribers.lock().unwrap();
        subscribers.retain(|id, tx| {
            let alive = tx.send(event.clone()).is_ok();
            if !alive {
                warn!("Dropping disconnected price subscriber {id}");
            }
            alive
        });
    }

    fn remove(&self, id: u64) {
        // Safe to call more than once; removing a missing key is a no-op.
        self.subscribers.lock().unwrap().remove(&id);
    }

    /// One poll cycle: fetch, compare, maybe cache, notify.
    async fn poll_once(&self, provider: &dyn SpotPriceProvider) {
        match provider.latest().await {
            Ok(sample) => {
                let cached = self.last_price.read().unwrap().map(|s| s.price);
                if cached == Some(sample.price) {
                    // Unchanged price: no cache write, no notification.
                    // Keepalives on the stream cover liveness instead.
                    return;
                }
                *self.last_price.write().unwrap() = Some(sample);
                info!("Spot price updated: {} USD/oz", sample.price);
                self.notify(&PriceEvent::Price(sample.price));
            }
            Err(err) => {
                // A failed poll never erases the last good price.
                error!("Spot price poll failed: {err}");
                self.notify(&PriceEvent::Error(err.to_string()));
            }
        }
    }
}

/// Polls a [`SpotPriceProvider`] on a fixed interval and fans price and
/// error notifications out to any number of subscribers.
///
/// Explicitly constructed and owned by whoever wires up the streaming
/// endpoint; `start`/`stop` are caller-controlled and idempotent.
/// Stopping leaves subscribers registered, so a later `start` resumes
/// delivering to them.
pub struct PriceBroadcaster {
    provider: Arc<dyn SpotPriceProvider>,
    poll_interval: Duration,
    inner: Arc<BroadcasterInner>,
    poll_task: Mutex<Option<JoinHandle<()>>>,
}

impl PriceBroadcaster {
    pub fn new(provider: Arc<dyn SpotPriceProvider>, poll_interval: Duration) -> Self {
        Self {
            provider,
            poll_interval,
            inner: Arc::new(BroadcasterInner::new()),
            poll_task: Mutex::new(None),
        }
    }

    /// Starts polling: one immediate poll, then one per interval.
    ///
    /// Polls run serially inside a single task, so a slow upstream delays
    /// the next tick rather than overlapping it. No-op when already
    /// polling.
    pub fn start(&self) {
        let mut poll_task = self.poll_task.lock().unwrap();
        if poll_task.as_ref().is_some_and(|task| !task.is_finished()) {
            return;
        }
        info!(
            "Starting spot price polling ({}s interval)",
            self.poll_interval.as_secs()
        );
        let provider = self.provider.clone();
        let inner = self.inner.clone();
        let poll_interval = self.poll_interval;
        *poll_task = Some(tokio::spawn(async move {
            let mut ticker = tokio::time::interval(poll_interval);
            loop {
                // The first tick completes immediately.
                ticker.tick().await;
                inner.poll_once(provider.as_ref()).await;
            }
        }));
    }

    /// Stops polling without disconnecting subscribers. No-op when idle.
    pub fn stop(&self) {
        if let Some(task) = self.poll_task.lock().unwrap().take() {
            task.abort();
            info!("Stopped spot price polling");
        }
    }

    /// Whether the poll timer is currently armed.
    pub fn is_polling(&self) -> bool {
        self.poll_task
            .lock()
            .unwrap()
            .as_ref()
            .is_some_and(|task| !task.is_finished())
    }

    /// Registers a new subscriber.
    ///
    /// The cached price is not replayed; the subscription sees the next
    /// change (or error) the poll loop observes.
    pub fn subscribe(&self) -> PriceSubscription {
        let (tx, rx) = mpsc::unbounded_channel();
        let id = self.inner.next_subscriber_id.fetch_add(1, Ordering::Relaxed);
        self.inner.subscribers.lock().unwrap().insert(id, tx);
        PriceSubscription {
            id,
            rx,
            inner: self.inner.clone(),
        }
    }

    /// Last successfully fetched price, if any poll has succeeded yet.
    pub fn current_price(&self) -> Option<SpotPrice> {
        *self.inner.last_price.read().unwrap()
    }

    /// Number of registered subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.inner.subscribers.lock().unwrap().len()
    }
}

impl Drop for PriceBroadcaster {
    fn drop(&mut self) {
        self.stop();
    }
}

/// A registration with the broadcaster, held for the lifetime of one
/// stream session.
///
/// Yields [`PriceEvent`]s as a [`Stream`] and deregisters itself exactly
/// once when dropped, whichever disconnect path gets there first.
pub struct PriceSubscription {
    id: u64,
    rx: mpsc::UnboundedReceiver<PriceEvent>,
    inner: Arc<BroadcasterInner>,
}

impl Stream for PriceSubscription {
    type Item = PriceEvent;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.rx.poll_recv(cx)
    }
}

impl Drop for PriceSubscription {
    fn drop(&mut self) {
        self.inner.remove(self.id);
    }
}

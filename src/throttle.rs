use std::time::Duration;

use rand::Rng;
use tokio::time::sleep;
use tracing::{debug, instrument};

/// Politeness pause between consecutive result pages
///
/// arXiv asks clients to space out repeated calls. Each pause lasts the fixed delay
/// plus a uniformly random extra in `[0, max_jitter]`.
#[derive(Debug, Clone, Copy)]
pub struct PageThrottle {
    delay: Duration,
    max_jitter: Duration,
}

impl PageThrottle {
    /// Create a throttle with the given fixed delay and jitter bound
    ///
    /// # Example
    ///
    /// ```
    /// use arxiv_client::throttle::PageThrottle;
    /// use std::time::Duration;
    ///
    /// let throttle = PageThrottle::new(Duration::from_secs(5), Duration::from_secs(3));
    /// let pause = throttle.next_pause();
    /// assert!(pause >= Duration::from_secs(5) && pause <= Duration::from_secs(8));
    /// ```
    pub fn new(delay: Duration, max_jitter: Duration) -> Self {
        Self { delay, max_jitter }
    }

    /// A throttle that never sleeps
    pub fn disabled() -> Self {
        Self::new(Duration::ZERO, Duration::ZERO)
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn max_jitter(&self) -> Duration {
        self.max_jitter
    }

    /// Draw the length of the next pause
    pub fn next_pause(&self) -> Duration {
        if self.max_jitter.is_zero() {
            return self.delay;
        }
        let jitter = rand::thread_rng().gen_range(0.0..=self.max_jitter.as_secs_f64());
        self.delay + Duration::from_secs_f64(jitter)
    }

    /// Sleep for one pause
    #[instrument(skip(self))]
    pub async fn pause(&self) {
        let pause = self.next_pause();
        if pause.is_zero() {
            return;
        }
        debug!(pause_ms = pause.as_millis(), "Pausing before next page");
        sleep(pause).await;
    }
}

//! One-shot deadline that cancels a request token.

use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Timer task that cancels `token` once `after` has elapsed.
///
/// Dropping the deadline disarms the timer, so a settled request never leaves
/// a pending cancellation behind. Must be armed inside a tokio runtime.
#[derive(Debug)]
pub struct Deadline {
    at: Instant,
    token: CancellationToken,
    timer: Option<JoinHandle<()>>,
}

impl Deadline {
    pub fn arm(after: Duration) -> Self {
        let at = Instant::now() + after;
        let token = CancellationToken::new();
        let fire = token.clone();
        let timer = tokio::spawn(async move {
            tokio::time::sleep_until(at).await;
            debug!(after_ms = after.as_millis() as u64, "deadline fired");
            fire.cancel();
        });
        Self {
            at,
            token,
            timer: Some(timer),
        }
    }

    /// Instant at which the request is out of time.
    pub fn at(&self) -> Instant {
        self.at
    }

    /// Token observed by the request; cancelled when the deadline fires.
    pub fn token(&self) -> CancellationToken {
        self.token.clone()
    }

    /// True once the deadline instant is reached, even if the timer task
    /// has not run yet.
    pub fn expired(&self) -> bool {
        self.token.is_cancelled() || Instant::now() >= self.at
    }

    /// Whether the timer is still scheduled.
    pub fn is_armed(&self) -> bool {
        self.timer.as_ref().is_some_and(|t| !t.is_finished())
    }

    /// Stop the timer. Idempotent.
    pub fn disarm(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.abort();
        }
    }
}

impl Drop for Deadline {
    fn drop(&mut self) {
        self.disarm();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn fires_after_duration() {
        let deadline = Deadline::arm(Duration::from_secs(30));
        let token = deadline.token();
        assert!(!deadline.expired());

        tokio::time::sleep(Duration::from_millis(29_999)).await;
        assert!(!token.is_cancelled());

        tokio::time::sleep(Duration::from_millis(2)).await;
        tokio::task::yield_now().await;
        assert!(token.is_cancelled());
        assert!(deadline.expired());
    }

    #[tokio::test(start_paused = true)]
    async fn expired_at_the_instant_before_timer_runs() {
        let deadline = Deadline::arm(Duration::from_secs(30));
        assert_eq!(deadline.at(), Instant::now() + Duration::from_secs(30));

        tokio::time::advance(Duration::from_millis(29_999)).await;
        assert!(!deadline.expired());

        tokio::time::advance(Duration::from_millis(1)).await;
        assert!(deadline.expired());
    }

    #[tokio::test(start_paused = true)]
    async fn disarm_prevents_cancellation() {
        let mut deadline = Deadline::arm(Duration::from_secs(30));
        let token = deadline.token();
        assert!(deadline.is_armed());

        deadline.disarm();
        assert!(!deadline.is_armed());
        deadline.disarm();

        tokio::time::sleep(Duration::from_secs(60)).await;
        assert!(!token.is_cancelled());
    }

    #[tokio::test(start_paused = true)]
    async fn drop_disarms() {
        let token = {
            let deadline = Deadline::arm(Duration::from_secs(1));
            deadline.token()
        };
        tokio::time::sleep(Duration::from_secs(5)).await;
        assert!(!token.is_cancelled());
    }
}

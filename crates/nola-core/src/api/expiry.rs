use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tracing::debug;

/// Whether a session-expired notice is currently on screen.
///
/// Only one notice may be visible at a time. The flag clears itself after
/// the cool-down, independent of anything the user does.
#[derive(Debug)]
pub struct ExpiryNotice {
    showing: AtomicBool,
    cooldown: Duration,
}

impl ExpiryNotice {
    pub fn new(cooldown: Duration) -> Arc<Self> {
        Arc::new(Self {
            showing: AtomicBool::new(false),
            cooldown,
        })
    }

    /// Claim the notice. Returns true for exactly one caller per window.
    ///
    /// Must be called from within a Tokio runtime; the reset is scheduled
    /// on it.
    pub fn try_claim(self: &Arc<Self>) -> bool {
        if self
            .showing
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return false;
        }

        let notice = Arc::clone(self);
        tokio::spawn(async move {
            tokio::time::sleep(notice.cooldown).await;
            notice.showing.store(false, Ordering::Release);
            debug!("Expiry notice cool-down elapsed");
        });
        true
    }

    pub fn is_showing(&self) -> bool {
        self.showing.load(Ordering::Acquire)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_single_claim_per_window() {
        let notice = ExpiryNotice::new(Duration::from_millis(3000));

        assert!(notice.try_claim());
        assert!(!notice.try_claim());
        assert!(notice.is_showing());

        tokio::time::sleep(Duration::from_millis(2999)).await;
        assert!(!notice.try_claim());

        tokio::time::sleep(Duration::from_millis(2)).await;
        assert!(!notice.is_showing());
        assert!(notice.try_claim());
    }

    #[tokio::test(start_paused = true)]
    async fn test_concurrent_claims_have_one_winner() {
        let notice = ExpiryNotice::new(Duration::from_secs(3));
        let handles: Vec<_> = (0..16)
            .map(|_| {
                let notice = Arc::clone(&notice);
                tokio::spawn(async move { notice.try_claim() })
            })
            .collect();

        let mut winners = 0;
        for handle in handles {
            if handle.await.unwrap() {
                winners += 1;
            }
        }
        assert_eq!(winners, 1);
    }
}

//! The process-wide player count.
//!
//! Every connection that is waiting for an opponent or sitting in a game
//! holds a [`PlayerTicket`]. The count is the number of live tickets:
//! [`PlayerRegistry::admit`] hands one out and dropping it gives the slot
//! back. Because the decrement lives in `Drop`, a session that ends by
//! win, draw, or disconnect (or a connection that fails during pairing)
//! all release their slot the same way.
//!
//! # Concurrency note
//!
//! The count sits behind a `std::sync::Mutex`, not Tokio's. It is only
//! held for an increment, decrement, or read, never across an `.await`,
//! and `Drop` cannot be async.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::Notify;

struct Inner {
    count: Mutex<usize>,
    max_players: usize,
    /// Signalled every time a ticket is dropped.
    released: Notify,
}

impl Inner {
    fn lock(&self) -> MutexGuard<'_, usize> {
        // A panic while holding the lock cannot leave the integer half
        // written, so the value is still usable.
        self.count.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Shared handle to the player count.
///
/// Cheap to clone; every clone sees the same count.
#[derive(Clone)]
pub struct PlayerRegistry {
    inner: Arc<Inner>,
}

impl PlayerRegistry {
    /// Creates a registry that admits at most `max_players` at once when
    /// callers check [`has_capacity`](Self::has_capacity) first.
    pub fn new(max_players: usize) -> Self {
        Self {
            inner: Arc::new(Inner {
                count: Mutex::new(0),
                max_players,
                released: Notify::new(),
            }),
        }
    }

    /// Counts one more player and returns the ticket that holds the slot.
    ///
    /// This never refuses. The ceiling is enforced by the acceptor calling
    /// [`wait_for_capacity`](Self::wait_for_capacity) before it starts a
    /// new pairing.
    pub fn admit(&self) -> PlayerTicket {
        let count = {
            let mut count = self.inner.lock();
            *count += 1;
            *count
        };
        tracing::debug!(count, "player admitted");
        PlayerTicket {
            inner: Arc::clone(&self.inner),
        }
    }

    /// Number of live tickets.
    pub fn count(&self) -> usize {
        *self.inner.lock()
    }

    pub fn max_players(&self) -> usize {
        self.inner.max_players
    }

    /// Returns `true` if `additional` more players fit under the ceiling.
    pub fn has_capacity(&self, additional: usize) -> bool {
        self.count() + additional <= self.inner.max_players
    }

    /// Suspends until `additional` more players fit under the ceiling.
    ///
    /// Returns immediately if they already do. Otherwise wakes on each
    /// ticket drop and checks again.
    pub async fn wait_for_capacity(&self, additional: usize) {
        loop {
            let released = self.inner.released.notified();
            tokio::pin!(released);
            // Register before checking so a drop between the check and the
            // await is not missed.
            released.as_mut().enable();

            if self.has_capacity(additional) {
                return;
            }
            tracing::debug!(
                count = self.count(),
                max_players = self.inner.max_players,
                "at capacity, waiting for a game to finish"
            );
            released.await;
        }
    }
}

impl std::fmt::Debug for PlayerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlayerRegistry")
            .field("count", &self.count())
            .field("max_players", &self.inner.max_players)
            .finish()
    }
}

/// One counted player. Dropping it decrements the count.
#[must_use = "dropping the ticket releases the player slot immediately"]
pub struct PlayerTicket {
    inner: Arc<Inner>,
}

impl Drop for PlayerTicket {
    fn drop(&mut self) {
        let count = {
            let mut count = self.inner.lock();
            *count = count.saturating_sub(1);
            *count
        };
        tracing::debug!(count, "player released");
        self.inner.released.notify_waiters();
    }
}

impl std::fmt::Debug for PlayerTicket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlayerTicket").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[test]
    fn test_admit_increments_and_drop_decrements() {
        let registry = PlayerRegistry::new(6);
        let a = registry.admit();
        let b = registry.admit();
        assert_eq!(registry.count(), 2);

        drop(a);
        assert_eq!(registry.count(), 1);
        drop(b);
        assert_eq!(registry.count(), 0);
    }

    #[test]
    fn test_clones_share_count() {
        let registry = PlayerRegistry::new(6);
        let other = registry.clone();
        let _ticket = other.admit();
        assert_eq!(registry.count(), 1);
    }

    #[test]
    fn test_has_capacity_counts_the_new_players() {
        let registry = PlayerRegistry::new(4);
        let _a = registry.admit();
        let _b = registry.admit();
        assert!(registry.has_capacity(2));
        let _c = registry.admit();
        assert!(!registry.has_capacity(2));
        assert!(registry.has_capacity(1));
    }

    #[tokio::test]
    async fn test_wait_for_capacity_returns_immediately_when_room() {
        let registry = PlayerRegistry::new(2);
        tokio::time::timeout(Duration::from_secs(1), registry.wait_for_capacity(2))
            .await
            .expect("should not wait");
    }

    #[tokio::test]
    async fn test_wait_for_capacity_wakes_on_ticket_drop() {
        let registry = PlayerRegistry::new(2);
        let a = registry.admit();
        let _b = registry.admit();

        let waiter = {
            let registry = registry.clone();
            tokio::spawn(async move { registry.wait_for_capacity(1).await })
        };

        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(!waiter.is_finished());

        drop(a);
        tokio::time::timeout(Duration::from_secs(1), waiter)
            .await
            .expect("waiter should wake")
            .unwrap();
    }

    #[tokio::test]
    async fn test_wait_for_capacity_keeps_waiting_until_enough_room() {
        let registry = PlayerRegistry::new(2);
        let a = registry.admit();
        let b = registry.admit();

        let waiter = {
            let registry = registry.clone();
            tokio::spawn(async move { registry.wait_for_capacity(2).await })
        };

        drop(a);
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(!waiter.is_finished());

        drop(b);
        tokio::time::timeout(Duration::from_secs(1), waiter)
            .await
            .expect("waiter should wake")
            .unwrap();
    }
}

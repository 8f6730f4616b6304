//! Navigation drawer controller.
//!
//! The drawer lists the assistants. It opens immediately when the pointer
//! enters the hover zone and closes a short delay after it leaves, so moving
//! from the hover strip into the drawer itself does not make it flicker.
//! Selecting an entry, an explicit close, or a toggle act immediately.
//!
//! At most one close timer is pending at any time. A timer is a spawned
//! tokio task that is aborted on cancellation; each timer also carries a
//! generation number, so a timer that already woke up but lost the race for
//! the lock cannot apply a stale close.

use std::sync::Arc;
use std::time::Duration;

use botdesk_core::config::DEFAULT_DRAWER_CLOSE_DELAY_MS;
use botdesk_core::error::Result;
use serde::{Deserialize, Serialize};
use strum::Display;
use tokio::sync::{Mutex, watch};
use tokio::task::JoinHandle;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum DrawerState {
    #[default]
    Closed,
    Open,
}

impl DrawerState {
    pub fn is_open(self) -> bool {
        matches!(self, Self::Open)
    }

    fn flipped(self) -> Self {
        match self {
            Self::Open => Self::Closed,
            Self::Closed => Self::Open,
        }
    }
}

/// Performs the selection behind a drawer entry.
#[async_trait::async_trait]
pub trait EntrySelector: Send + Sync {
    async fn select_entry(&self, id: &str) -> Result<()>;
}

#[derive(Debug, Default)]
struct PendingClose {
    handle: Option<JoinHandle<()>>,
    generation: u64,
}

impl PendingClose {
    /// Drops the pending timer, if any. Returns whether one was pending.
    fn cancel(&mut self) -> bool {
        self.generation += 1;
        match self.handle.take() {
            Some(handle) => {
                handle.abort();
                true
            }
            None => false,
        }
    }
}

#[derive(Debug)]
struct DrawerInner {
    close_delay: Duration,
    state: watch::Sender<DrawerState>,
    timer: Mutex<PendingClose>,
}

impl DrawerInner {
    fn set(&self, next: DrawerState) {
        self.state.send_if_modified(|current| {
            if *current == next {
                return false;
            }
            tracing::debug!(from = %current, to = %next, "drawer state changed");
            *current = next;
            true
        });
    }

    async fn fire(&self, generation: u64) {
        let mut timer = self.timer.lock().await;
        if timer.generation != generation || timer.handle.is_none() {
            return;
        }
        timer.handle = None;
        self.set(DrawerState::Closed);
    }
}

/// Open/closed state of the navigation drawer with hover-intent timing.
///
/// Cloning yields another handle to the same drawer.
#[derive(Debug, Clone)]
pub struct NavigationDrawer {
    inner: Arc<DrawerInner>,
}

impl Default for NavigationDrawer {
    fn default() -> Self {
        Self::new(Duration::from_millis(DEFAULT_DRAWER_CLOSE_DELAY_MS))
    }
}

impl NavigationDrawer {
    /// Creates a closed drawer that closes `close_delay` after a hover leave.
    pub fn new(close_delay: Duration) -> Self {
        let (state, _) = watch::channel(DrawerState::Closed);
        Self {
            inner: Arc::new(DrawerInner {
                close_delay,
                state,
                timer: Mutex::new(PendingClose::default()),
            }),
        }
    }

    pub fn state(&self) -> DrawerState {
        *self.inner.state.borrow()
    }

    /// Receives every state change, including timer-driven closes.
    pub fn watch(&self) -> watch::Receiver<DrawerState> {
        self.inner.state.subscribe()
    }

    pub fn close_delay(&self) -> Duration {
        self.inner.close_delay
    }

    pub async fn has_pending_close(&self) -> bool {
        self.inner.timer.lock().await.handle.is_some()
    }

    pub async fn enter_hover_zone(&self) {
        let mut timer = self.inner.timer.lock().await;
        if timer.cancel() {
            tracing::debug!("drawer close cancelled by hover");
        }
        self.inner.set(DrawerState::Open);
    }

    /// Schedules a close after the configured delay, replacing any pending one.
    pub async fn leave_hover_zone(&self) {
        let mut timer = self.inner.timer.lock().await;
        timer.cancel();
        let generation = timer.generation;
        let inner = Arc::clone(&self.inner);
        let delay = self.inner.close_delay;
        timer.handle = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            inner.fire(generation).await;
        }));
        tracing::debug!(delay_ms = delay.as_millis() as u64, "drawer close scheduled");
    }

    /// Runs the entry's selection, then closes the drawer.
    ///
    /// The drawer closes even when the selection fails; the selection error
    /// is returned to the caller.
    pub async fn select_entry(&self, id: &str, selector: &dyn EntrySelector) -> Result<()> {
        let result = selector.select_entry(id).await;
        self.request_close().await;
        result
    }

    pub async fn request_close(&self) {
        let mut timer = self.inner.timer.lock().await;
        timer.cancel();
        self.inner.set(DrawerState::Closed);
    }

    pub async fn toggle(&self) -> DrawerState {
        let mut timer = self.inner.timer.lock().await;
        timer.cancel();
        let next = self.state().flipped();
        self.inner.set(next);
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use botdesk_core::DeskError;
    use std::sync::Mutex as StdMutex;

    const DELAY: Duration = Duration::from_millis(200);

    struct RecordingSelector {
        selected: StdMutex<Vec<String>>,
    }

    #[async_trait::async_trait]
    impl EntrySelector for RecordingSelector {
        async fn select_entry(&self, id: &str) -> Result<()> {
            if id == "missing" {
                return Err(DeskError::not_found("assistant", id));
            }
            self.selected.lock().unwrap().push(id.to_string());
            Ok(())
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_enter_opens_immediately() {
        let drawer = NavigationDrawer::new(DELAY);
        assert_eq!(drawer.state(), DrawerState::Closed);
        drawer.enter_hover_zone().await;
        assert_eq!(drawer.state(), DrawerState::Open);
    }

    #[tokio::test(start_paused = true)]
    async fn test_leave_closes_after_delay() {
        let drawer = NavigationDrawer::new(DELAY);
        drawer.enter_hover_zone().await;
        drawer.leave_hover_zone().await;

        tokio::time::sleep(Duration::from_millis(150)).await;
        assert_eq!(drawer.state(), DrawerState::Open);
        assert!(drawer.has_pending_close().await);

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert_eq!(drawer.state(), DrawerState::Closed);
        assert!(!drawer.has_pending_close().await);
    }

    #[tokio::test(start_paused = true)]
    async fn test_reenter_cancels_pending_close() {
        let drawer = NavigationDrawer::new(DELAY);
        drawer.enter_hover_zone().await;
        drawer.leave_hover_zone().await;
        tokio::time::sleep(Duration::from_millis(100)).await;
        drawer.enter_hover_zone().await;

        tokio::time::sleep(Duration::from_millis(1_000)).await;
        assert_eq!(drawer.state(), DrawerState::Open);
        assert!(!drawer.has_pending_close().await);
    }

    #[tokio::test(start_paused = true)]
    async fn test_only_latest_leave_fires() {
        let drawer = NavigationDrawer::new(DELAY);
        drawer.enter_hover_zone().await;
        drawer.leave_hover_zone().await;
        tokio::time::sleep(Duration::from_millis(150)).await;
        drawer.leave_hover_zone().await;

        // The first timer would have fired at 200ms.
        tokio::time::sleep(Duration::from_millis(100)).await;
        assert_eq!(drawer.state(), DrawerState::Open);

        tokio::time::sleep(Duration::from_millis(150)).await;
        assert_eq!(drawer.state(), DrawerState::Closed);
    }

    #[tokio::test(start_paused = true)]
    async fn test_toggle_and_request_close_cancel_timer() {
        let drawer = NavigationDrawer::new(DELAY);
        assert_eq!(drawer.toggle().await, DrawerState::Open);
        drawer.leave_hover_zone().await;
        assert_eq!(drawer.toggle().await, DrawerState::Closed);
        assert_eq!(drawer.toggle().await, DrawerState::Open);

        // The leave timer was cancelled by the first toggle back.
        tokio::time::sleep(Duration::from_millis(500)).await;
        assert_eq!(drawer.state(), DrawerState::Open);

        drawer.leave_hover_zone().await;
        drawer.request_close().await;
        assert_eq!(drawer.state(), DrawerState::Closed);
        assert!(!drawer.has_pending_close().await);
    }

    #[tokio::test(start_paused = true)]
    async fn test_select_entry_delegates_and_closes() {
        let drawer = NavigationDrawer::new(DELAY);
        let selector = RecordingSelector {
            selected: StdMutex::new(Vec::new()),
        };

        drawer.enter_hover_zone().await;
        drawer.leave_hover_zone().await;
        drawer.select_entry("ivy", &selector).await.unwrap();
        assert_eq!(drawer.state(), DrawerState::Closed);
        assert!(!drawer.has_pending_close().await);
        assert_eq!(*selector.selected.lock().unwrap(), vec!["ivy".to_string()]);

        drawer.enter_hover_zone().await;
        let err = drawer.select_entry("missing", &selector).await.unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(drawer.state(), DrawerState::Closed);
    }

    #[tokio::test(start_paused = true)]
    async fn test_watch_sees_timer_close() {
        let drawer = NavigationDrawer::new(DELAY);
        let mut rx = drawer.watch();
        drawer.enter_hover_zone().await;
        drawer.leave_hover_zone().await;

        rx.changed().await.unwrap();
        assert_eq!(*rx.borrow_and_update(), DrawerState::Open);
        rx.changed().await.unwrap();
        assert_eq!(*rx.borrow_and_update(), DrawerState::Closed);
    }
}

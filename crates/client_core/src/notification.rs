use std::{
    sync::{Arc, Mutex, MutexGuard, PoisonError},
    time::Duration,
};

use shared::domain::NotificationKind;
use tokio::time::Instant;
use tracing::debug;

pub const DEFAULT_DISPLAY_DURATION: Duration = Duration::from_millis(3000);
pub const DEFAULT_FADE_OUT_DURATION: Duration = Duration::from_millis(300);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NotificationTiming {
    pub display: Duration,
    pub fade_out: Duration,
}

impl Default for NotificationTiming {
    fn default() -> Self {
        Self {
            display: DEFAULT_DISPLAY_DURATION,
            fade_out: DEFAULT_FADE_OUT_DURATION,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BannerPhase {
    Visible,
    Fading,
    Removed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Banner {
    pub id: u64,
    pub text: String,
    pub kind: NotificationKind,
    pub created_at: Instant,
}

impl Banner {
    pub fn phase_at(&self, now: Instant, timing: NotificationTiming) -> BannerPhase {
        let elapsed = now.saturating_duration_since(self.created_at);
        if elapsed < timing.display {
            BannerPhase::Visible
        } else if elapsed < timing.display + timing.fade_out {
            BannerPhase::Fading
        } else {
            BannerPhase::Removed
        }
    }
}

#[derive(Debug, Default)]
struct PresenterState {
    next_id: u64,
    banners: Vec<(Banner, BannerPhase)>,
}

/// Shows independent, self-dismissing banners. Cloning shares the same set.
///
/// Inside a tokio runtime each banner schedules its own fade and removal.
/// Without one, callers advance banners with [`NotificationPresenter::prune`].
#[derive(Debug, Clone, Default)]
pub struct NotificationPresenter {
    state: Arc<Mutex<PresenterState>>,
    timing: NotificationTiming,
}

impl NotificationPresenter {
    pub fn new(timing: NotificationTiming) -> Self {
        Self {
            state: Arc::default(),
            timing,
        }
    }

    pub fn show(&self, text: impl Into<String>, kind: NotificationKind) -> u64 {
        let banner = {
            let mut state = self.lock();
            state.next_id += 1;
            let banner = Banner {
                id: state.next_id,
                text: text.into(),
                kind,
                created_at: Instant::now(),
            };
            state.banners.push((banner.clone(), BannerPhase::Visible));
            banner
        };
        debug!(id = banner.id, kind = ?banner.kind, "showing notification");

        if let Ok(runtime) = tokio::runtime::Handle::try_current() {
            let presenter = self.clone();
            let id = banner.id;
            runtime.spawn(async move {
                tokio::time::sleep(presenter.timing.display).await;
                presenter.set_phase(id, BannerPhase::Fading);
                tokio::time::sleep(presenter.timing.fade_out).await;
                presenter.remove(id);
            });
        }
        banner.id
    }

    /// Banners still on screen, with the phase their styling should reflect.
    pub fn banners(&self) -> Vec<(Banner, BannerPhase)> {
        self.lock().banners.clone()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().banners.is_empty()
    }

    /// Recomputes every phase from `now` and drops expired banners.
    pub fn prune(&self, now: Instant) {
        let timing = self.timing;
        let mut state = self.lock();
        for (banner, phase) in state.banners.iter_mut() {
            *phase = banner.phase_at(now, timing);
        }
        state
            .banners
            .retain(|(_, phase)| *phase != BannerPhase::Removed);
    }

    fn set_phase(&self, id: u64, next: BannerPhase) {
        if let Some((_, phase)) = self.lock().banners.iter_mut().find(|(b, _)| b.id == id) {
            *phase = next;
        }
    }

    fn remove(&self, id: u64) {
        self.lock().banners.retain(|(banner, _)| banner.id != id);
    }

    fn lock(&self) -> MutexGuard<'_, PresenterState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
#[path = "tests/notification_tests.rs"]
mod tests;

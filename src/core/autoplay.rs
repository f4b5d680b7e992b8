use std::fmt::Debug;

use tracing::debug;

use crate::registry::CarouselId;

pub const DEFAULT_INTERVAL_MS: u32 = 5_000;

/// Creates and cancels repeating timers.
///
/// A started timer calls back into the page with its `target` every
/// `period_ms` until the returned handle is cleared.
pub trait IntervalScheduler {
    type Handle: Copy + Eq + Debug;

    /// `None` if the platform refused to create the timer.
    fn start_interval(&mut self, target: CarouselId, period_ms: u32) -> Option<Self::Handle>;

    fn clear_interval(&mut self, handle: Self::Handle);
}

/// Autoplay timer bookkeeping for one carousel.
///
/// At most one timer handle is live at a time: `start` is a no-op while a
/// handle is held, and `stop` clears exactly the held handle.
#[derive(Debug, Clone)]
pub struct Autoplay<H> {
    period_ms: u32,
    handle: Option<H>,
    hovered: bool,
}

impl<H: Copy + Eq + Debug> Autoplay<H> {
    pub fn new(period_ms: u32) -> Self {
        Self {
            period_ms,
            handle: None,
            hovered: false,
        }
    }

    pub fn period_ms(&self) -> u32 {
        self.period_ms
    }

    pub fn handle(&self) -> Option<H> {
        self.handle
    }

    pub fn is_running(&self) -> bool {
        self.handle.is_some()
    }

    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    pub fn start<S>(&mut self, target: CarouselId, scheduler: &mut S) -> bool
    where
        S: IntervalScheduler<Handle = H>,
    {
        if self.handle.is_some() {
            return false;
        }
        self.handle = scheduler.start_interval(target, self.period_ms);
        if let Some(h) = self.handle {
            debug!(?target, handle = ?h, period_ms = self.period_ms, "autoplay started");
        }
        self.handle.is_some()
    }

    pub fn stop<S>(&mut self, scheduler: &mut S)
    where
        S: IntervalScheduler<Handle = H>,
    {
        if let Some(h) = self.handle.take() {
            scheduler.clear_interval(h);
            debug!(handle = ?h, "autoplay stopped");
        }
    }

    pub fn pointer_entered<S>(&mut self, scheduler: &mut S)
    where
        S: IntervalScheduler<Handle = H>,
    {
        self.hovered = true;
        self.stop(scheduler);
    }

    pub fn pointer_left<S>(&mut self, target: CarouselId, scheduler: &mut S)
    where
        S: IntervalScheduler<Handle = H>,
    {
        self.hovered = false;
        self.start(target, scheduler);
    }

    /// Whether a timer tick should move the carousel.
    pub fn should_advance(&self, lightbox_visible: bool) -> bool {
        self.handle.is_some() && !self.hovered && !lightbox_visible
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::headless::ManualScheduler;

    #[test]
    fn start_is_idempotent() {
        let mut sched = ManualScheduler::default();
        let mut ap = Autoplay::new(DEFAULT_INTERVAL_MS);
        let id = CarouselId(0);

        assert!(ap.start(id, &mut sched));
        assert!(!ap.start(id, &mut sched));
        assert_eq!(sched.live().len(), 1);
    }

    #[test]
    fn hover_clears_the_exact_handle() {
        let mut sched = ManualScheduler::default();
        let mut ap = Autoplay::new(DEFAULT_INTERVAL_MS);
        let id = CarouselId(3);
        ap.start(id, &mut sched);
        let h = ap.handle().unwrap();

        ap.pointer_entered(&mut sched);
        assert!(!ap.is_running());
        assert_eq!(sched.cleared(), &[h]);
        assert!(sched.live().is_empty());

        ap.pointer_left(id, &mut sched);
        ap.pointer_left(id, &mut sched);
        assert_eq!(sched.live().len(), 1);
        assert_ne!(ap.handle(), Some(h));
    }

    #[test]
    fn ticks_are_skipped_while_lightbox_is_open() {
        let mut sched = ManualScheduler::default();
        let mut ap = Autoplay::new(10);
        assert!(!ap.should_advance(false));
        ap.start(CarouselId(0), &mut sched);
        assert!(ap.should_advance(false));
        assert!(!ap.should_advance(true));
    }
}

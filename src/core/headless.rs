//! In-memory page used by tests and the simulator.
//!
//! Every seam the browser crate implements against the DOM has a headless
//! counterpart here that simply records what would have been written.

use hashbrown::HashMap;

use crate::autoplay::IntervalScheduler;
use crate::carousel::CarouselView;
use crate::group::LightboxGroup;
use crate::lightbox::{ImageSource, LightboxImage, LightboxView};
use crate::registry::{CarouselId, Page};

pub type HeadlessPage = Page<HeadlessCarousel, HeadlessLightbox, ManualScheduler>;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct HeadlessCarousel {
    pub slides: usize,
    pub slide_width: Option<f64>,
    pub track_offset: Option<f64>,
    /// `aria-label` of each dot currently in the host.
    pub dots: Vec<String>,
    pub active_dot: Option<usize>,
    pub has_dot_host: bool,
}

impl HeadlessCarousel {
    pub fn new(slides: usize) -> Self {
        Self {
            slides,
            has_dot_host: true,
            ..Default::default()
        }
    }

    pub fn without_dots(slides: usize) -> Self {
        Self {
            slides,
            ..Default::default()
        }
    }
}

impl CarouselView for HeadlessCarousel {
    fn slide_count(&self) -> usize {
        self.slides
    }

    fn set_slide_width(&mut self, percent: f64) {
        self.slide_width = Some(percent);
    }

    fn set_track_offset(&mut self, percent: f64) {
        self.track_offset = Some(percent);
    }

    fn rebuild_dots(&mut self, labels: &[String]) {
        if !self.has_dot_host {
            return;
        }
        self.dots = labels.to_vec();
        self.active_dot = None;
    }

    fn set_active_dot(&mut self, index: usize) {
        if self.has_dot_host && index < self.dots.len() {
            self.active_dot = Some(index);
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeadlessLightbox {
    pub src: String,
    pub alt: String,
    pub caption: String,
    pub visible: bool,
    pub scroll_locked: bool,
}

impl LightboxView for HeadlessLightbox {
    fn show_image(&mut self, src: &str, alt: &str) {
        self.src = src.to_string();
        self.alt = alt.to_string();
    }

    fn show_caption(&mut self, caption: &str) {
        self.caption = caption.to_string();
    }

    fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    fn set_scroll_locked(&mut self, locked: bool) {
        self.scroll_locked = locked;
    }
}

/// Images of each group's track, in slide order.
#[derive(Debug, Clone, Default)]
pub struct HeadlessImages {
    tracks: HashMap<LightboxGroup, Vec<LightboxImage>>,
}

impl HeadlessImages {
    /// `count` images named `{group}-{i}.jpg`.
    pub fn numbered(group: LightboxGroup, count: usize) -> Self {
        let mut images = Self::default();
        images.insert(group, numbered_images(group, count));
        images
    }

    pub fn insert(&mut self, group: LightboxGroup, images: Vec<LightboxImage>) {
        self.tracks.insert(group, images);
    }
}

pub fn numbered_images(group: LightboxGroup, count: usize) -> Vec<LightboxImage> {
    (0..count)
        .map(|i| LightboxImage::new(format!("{group}-{i}.jpg"), format!("{group} {}", i + 1)))
        .collect()
}

impl ImageSource for HeadlessImages {
    fn images(&self, group: LightboxGroup) -> Vec<LightboxImage> {
        self.tracks.get(&group).cloned().unwrap_or_default()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ManualTimer {
    pub handle: u32,
    pub target: CarouselId,
    pub period_ms: u32,
    elapsed_ms: u64,
}

/// Timers that only advance when told to.
#[derive(Debug, Clone, Default)]
pub struct ManualScheduler {
    next_handle: u32,
    live: Vec<ManualTimer>,
    cleared: Vec<u32>,
}

impl ManualScheduler {
    pub fn live(&self) -> &[ManualTimer] {
        &self.live
    }

    pub fn cleared(&self) -> &[u32] {
        &self.cleared
    }

    /// Let `ms` milliseconds pass; returns how many times each timer that
    /// fired at least once went off, in handle order.
    pub fn advance_by(&mut self, ms: u64) -> Vec<(CarouselId, u64)> {
        let mut fired = Vec::new();
        for timer in &mut self.live {
            let period = u64::from(timer.period_ms.max(1));
            let elapsed = timer.elapsed_ms.saturating_add(ms);
            let n = elapsed / period;
            timer.elapsed_ms = elapsed % period;
            if n > 0 {
                fired.push((timer.target, n));
            }
        }
        fired
    }
}

impl HeadlessPage {
    /// Let `ms` milliseconds pass and deliver every autoplay tick that falls
    /// due.
    ///
    /// Nothing else happens during the wait, so a carousel's ticks are reduced
    /// modulo its number of stopping positions: a full cycle lands back where it
    /// started.
    pub fn advance_time(&mut self, ms: u64) {
        for (id, fired) in self.scheduler_mut().advance_by(ms) {
            let Some(positions) = self.carousel(id).map(|c| c.state().dot_count()) else {
                continue;
            };
            let ticks = fired % positions as u64;
            for _ in 0..ticks {
                if !self.autoplay_tick(id) {
                    break;
                }
            }
        }
    }
}

impl IntervalScheduler for ManualScheduler {
    type Handle = u32;

    fn start_interval(&mut self, target: CarouselId, period_ms: u32) -> Option<u32> {
        self.next_handle += 1;
        let handle = self.next_handle;
        self.live.push(ManualTimer {
            handle,
            target,
            period_ms,
            elapsed_ms: 0,
        });
        Some(handle)
    }

    fn clear_interval(&mut self, handle: u32) {
        self.live.retain(|t| t.handle != handle);
        self.cleared.push(handle);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advance_fires_once_per_elapsed_period() {
        let mut s = ManualScheduler::default();
        s.start_interval(CarouselId(0), 5_000);
        s.start_interval(CarouselId(1), 2_000);

        assert!(s.advance_by(1_999).is_empty());
        assert_eq!(s.advance_by(1), vec![(CarouselId(1), 1)]);
        assert_eq!(
            s.advance_by(3_000),
            vec![(CarouselId(0), 1), (CarouselId(1), 1)]
        );
        assert_eq!(
            s.advance_by(10_000),
            vec![(CarouselId(0), 2), (CarouselId(1), 5)]
        );
    }

    #[test]
    fn advance_saturates_on_huge_waits() {
        let mut s = ManualScheduler::default();
        s.start_interval(CarouselId(0), 5_000);
        assert!(s.advance_by(1).is_empty());
        assert_eq!(
            s.advance_by(u64::MAX),
            vec![(CarouselId(0), u64::MAX / 5_000)]
        );
        assert_eq!(s.advance_by(u64::MAX), vec![(CarouselId(0), u64::MAX / 5_000)]);
    }

    #[test]
    fn advance_time_skips_whole_cycles() {
        use crate::registry::PageSettings;

        let mut page = HeadlessPage::new(
            Some(HeadlessLightbox::default()),
            ManualScheduler::default(),
            1200.0,
            PageSettings::default(),
        );
        // 5 slides, 3 per view: stopping positions 0, 1, 2.
        let id = page.add_carousel(LightboxGroup::Plans, Some(HeadlessCarousel::new(5)));

        page.advance_time(5_000 * 7);
        assert_eq!(page.carousel(id).unwrap().state().current_index(), 1);

        page.advance_time(u64::MAX);
        let after = page.carousel(id).unwrap().state().current_index();
        assert!(after < 3);
    }

    #[test]
    fn dot_writes_need_a_host() {
        let mut c = HeadlessCarousel::without_dots(3);
        c.rebuild_dots(&["a".into()]);
        c.set_active_dot(0);
        assert!(c.dots.is_empty());
        assert_eq!(c.active_dot, None);
    }
}

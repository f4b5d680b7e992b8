//! Carousel controller: a fixed sequence of slides scrolled by whole slides.
//!
//! The position arithmetic lives in [`CarouselState`], which never touches the
//! page. [`CarouselController`] pairs that state with a [`CarouselView`] and
//! pushes every change to it explicitly.

use tracing::debug;

use crate::group::LightboxGroup;
use crate::labels::Locale;
use crate::viewport::Breakpoints;

/// Scroll position of one carousel.
///
/// Invariant: `current_index <= max_index()` after every public mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CarouselState {
    current_index: usize,
    slides_per_view: usize,
    total_slides: usize,
}

impl CarouselState {
    pub fn new(total_slides: usize, slides_per_view: usize) -> Self {
        Self {
            current_index: 0,
            slides_per_view: slides_per_view.max(1),
            total_slides,
        }
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn slides_per_view(&self) -> usize {
        self.slides_per_view
    }

    pub fn total_slides(&self) -> usize {
        self.total_slides
    }

    /// Last index at which the view is still full.
    pub fn max_index(&self) -> usize {
        self.total_slides.saturating_sub(self.slides_per_view)
    }

    /// One dot per valid stopping position, never fewer than one.
    pub fn dot_count(&self) -> usize {
        self.max_index() + 1
    }

    pub fn active_dot(&self) -> usize {
        self.current_index.min(self.max_index())
    }

    pub fn slide_width_percent(&self) -> f64 {
        100.0 / self.slides_per_view as f64
    }

    pub fn track_offset_percent(&self) -> f64 {
        -(self.current_index as f64 * self.slide_width_percent())
    }

    fn clamp(&mut self) {
        let max = self.max_index();
        if self.current_index > max {
            self.current_index = max;
        }
    }

    /// Returns `true` when the value actually changed.
    pub fn set_slides_per_view(&mut self, slides_per_view: usize) -> bool {
        let slides_per_view = slides_per_view.max(1);
        let changed = slides_per_view != self.slides_per_view;
        self.slides_per_view = slides_per_view;
        self.clamp();
        changed
    }

    pub fn previous(&mut self) {
        self.current_index = if self.current_index == 0 {
            self.max_index()
        } else {
            self.current_index.min(self.max_index() + 1) - 1
        };
    }

    pub fn next(&mut self) {
        self.current_index = if self.current_index >= self.max_index() {
            0
        } else {
            self.current_index + 1
        };
    }

    /// Accepts any index, including negative or past-the-end requests.
    pub fn go_to(&mut self, index: i64) {
        let max = self.max_index() as i64;
        self.current_index = index.clamp(0, max) as usize;
    }
}

/// Page-side effects of a carousel.
///
/// Implementations own the track, its slides and the optional dot host. A
/// missing dot host turns the dot methods into no-ops.
pub trait CarouselView {
    fn slide_count(&self) -> usize;

    /// Width share of every slide, in percent of the track.
    fn set_slide_width(&mut self, percent: f64);

    /// Horizontal translation of the track, in percent.
    fn set_track_offset(&mut self, percent: f64);

    /// Replace all indicator dots; one dot per label.
    fn rebuild_dots(&mut self, labels: &[String]);

    fn set_active_dot(&mut self, index: usize);
}

/// A request for the lightbox to show one slide of one group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpenRequest {
    pub group: LightboxGroup,
    pub index: usize,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct CarouselOptions {
    pub breakpoints: Breakpoints,
    pub locale: Locale,
}

pub struct CarouselController<V> {
    group: LightboxGroup,
    view: Option<V>,
    state: CarouselState,
    options: CarouselOptions,
}

impl<V: CarouselView> CarouselController<V> {
    /// Capture the slides, size the view for `viewport_width`, build the dots and
    /// render once.
    ///
    /// Without a track (`view == None`) the controller is inert and every later
    /// call is a no-op.
    pub fn initialize(
        group: LightboxGroup,
        view: Option<V>,
        viewport_width: f64,
        options: CarouselOptions,
    ) -> Self {
        let total = view.as_ref().map_or(0, |v| v.slide_count());
        let spv = options.breakpoints.slides_per_view(viewport_width);
        let mut ctl = Self {
            group,
            view,
            state: CarouselState::new(total, spv),
            options,
        };
        if ctl.view.is_none() {
            debug!(group = %group, "carousel track missing; controller inert");
            return ctl;
        }
        ctl.rebuild_dots();
        ctl.render();
        debug!(group = %group, total, slides_per_view = spv, "carousel initialized");
        ctl
    }

    pub fn group(&self) -> LightboxGroup {
        self.group
    }

    pub fn state(&self) -> &CarouselState {
        &self.state
    }

    pub fn view(&self) -> Option<&V> {
        self.view.as_ref()
    }

    pub fn is_inert(&self) -> bool {
        self.view.is_none()
    }

    /// Re-derive slides-per-view from the viewport, re-clamp and rebuild the dots.
    pub fn recompute_slides_per_view(&mut self, viewport_width: f64) {
        if self.view.is_none() {
            return;
        }
        let spv = self.options.breakpoints.slides_per_view(viewport_width);
        if self.state.set_slides_per_view(spv) {
            debug!(group = %self.group, slides_per_view = spv, "breakpoint crossed");
        }
        self.rebuild_dots();
    }

    pub fn resize(&mut self, viewport_width: f64) {
        self.recompute_slides_per_view(viewport_width);
        self.render();
    }

    pub fn previous(&mut self) {
        if self.view.is_none() {
            return;
        }
        self.state.previous();
        self.render();
    }

    pub fn next(&mut self) {
        if self.view.is_none() {
            return;
        }
        self.state.next();
        self.render();
    }

    pub fn go_to(&mut self, index: i64) {
        if self.view.is_none() {
            return;
        }
        self.state.go_to(index);
        self.render();
    }

    pub fn dot_clicked(&mut self, dot_index: usize) {
        self.go_to(dot_index as i64);
    }

    /// The slide's own index goes to the lightbox, never the scroll offset.
    pub fn slide_clicked(&self, slide_index: usize) -> Option<OpenRequest> {
        if self.view.is_none() || slide_index >= self.state.total_slides() {
            return None;
        }
        Some(OpenRequest {
            group: self.group,
            index: slide_index,
        })
    }

    pub fn render(&mut self) {
        self.state.clamp();
        let Some(view) = self.view.as_mut() else {
            return;
        };
        view.set_slide_width(self.state.slide_width_percent());
        view.set_track_offset(self.state.track_offset_percent());
        view.set_active_dot(self.state.active_dot());
    }

    fn rebuild_dots(&mut self) {
        let Some(view) = self.view.as_mut() else {
            return;
        };
        let labels = self.options.locale.dot_labels(self.state.dot_count());
        view.rebuild_dots(&labels);
        view.set_active_dot(self.state.active_dot());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::headless::HeadlessCarousel;

    fn controller(slides: usize, width: f64) -> CarouselController<HeadlessCarousel> {
        CarouselController::initialize(
            LightboxGroup::Galerie,
            Some(HeadlessCarousel::new(slides)),
            width,
            CarouselOptions::default(),
        )
    }

    #[test]
    fn seven_slides_at_desktop_width() {
        let mut c = controller(7, 1200.0);
        assert_eq!(c.state().slides_per_view(), 3);
        assert_eq!(c.state().dot_count(), 5);
        assert_eq!(c.view().unwrap().dots.len(), 5);
        assert_eq!(c.state().current_index(), 0);

        for _ in 0..4 {
            c.next();
        }
        assert_eq!(c.state().current_index(), 4);
        c.next();
        assert_eq!(c.state().current_index(), 0);
    }

    #[test]
    fn previous_from_zero_wraps_to_last_valid_index() {
        let mut c = controller(7, 900.0);
        c.previous();
        assert_eq!(c.state().current_index(), 5);
        assert_eq!(c.view().unwrap().active_dot, Some(5));
    }

    #[test]
    fn previous_then_next_is_identity() {
        for width in [320.0, 900.0, 1400.0] {
            for total in 0..9 {
                let c0 = controller(total, width);
                for start in 0..=c0.state().max_index() {
                    let mut c = controller(total, width);
                    c.go_to(start as i64);
                    c.previous();
                    c.next();
                    assert_eq!(c.state().current_index(), start);
                    c.next();
                    c.previous();
                    assert_eq!(c.state().current_index(), start);
                }
            }
        }
    }

    #[test]
    fn go_to_clamps_any_integer() {
        let mut c = controller(7, 1200.0);
        for i in [-100, -1, 0, 3, 4, 5, 7, 1_000] {
            c.go_to(i);
            assert!(c.state().current_index() <= c.state().max_index());
        }
        c.go_to(-3);
        assert_eq!(c.state().current_index(), 0);
        c.go_to(99);
        assert_eq!(c.state().current_index(), 4);
    }

    #[test]
    fn render_writes_width_and_offset() {
        let mut c = controller(6, 1000.0);
        c.go_to(3);
        let v = c.view().unwrap();
        assert_eq!(v.slide_width, Some(50.0));
        assert_eq!(v.track_offset, Some(-150.0));
        assert_eq!(v.active_dot, Some(3));
    }

    #[test]
    fn resize_reclamps_and_rebuilds_dots() {
        let mut c = controller(7, 500.0);
        assert_eq!(c.state().dot_count(), 7);
        c.go_to(6);

        c.resize(1300.0);
        assert_eq!(c.state().slides_per_view(), 3);
        assert_eq!(c.state().current_index(), 4);
        let v = c.view().unwrap();
        assert_eq!(v.dots.len(), 5);
        assert_eq!(v.active_dot, Some(4));
    }

    #[test]
    fn fewer_slides_than_view_keeps_a_single_dot() {
        let mut c = controller(2, 1200.0);
        assert_eq!(c.state().dot_count(), 1);
        c.next();
        assert_eq!(c.state().current_index(), 0);
        c.previous();
        assert_eq!(c.state().current_index(), 0);
    }

    #[test]
    fn dots_carry_localized_labels() {
        let c = CarouselController::initialize(
            LightboxGroup::Plans,
            Some(HeadlessCarousel::new(3)),
            1200.0,
            CarouselOptions {
                locale: Locale::En,
                ..Default::default()
            },
        );
        assert_eq!(c.view().unwrap().dots, vec!["Go to slide 1".to_string()]);
    }

    #[test]
    fn dot_click_is_go_to() {
        let mut c = controller(7, 300.0);
        c.dot_clicked(5);
        assert_eq!(c.state().current_index(), 5);
    }

    #[test]
    fn slide_click_reports_stable_index_not_offset() {
        let mut c = controller(7, 1200.0);
        c.go_to(3);
        let req = c.slide_clicked(2).unwrap();
        assert_eq!(req.group, LightboxGroup::Galerie);
        assert_eq!(req.index, 2);
        assert!(c.slide_clicked(7).is_none());
    }

    #[test]
    fn missing_track_is_inert() {
        let mut c: CarouselController<HeadlessCarousel> = CarouselController::initialize(
            LightboxGroup::Plans,
            None,
            1200.0,
            CarouselOptions::default(),
        );
        assert!(c.is_inert());
        c.next();
        c.go_to(3);
        c.resize(300.0);
        assert_eq!(c.state().current_index(), 0);
        assert!(c.slide_clicked(0).is_none());
    }
}

use crate::autoplay::IntervalScheduler;
use crate::carousel::CarouselView;
use crate::group::LightboxGroup;
use crate::lightbox::{LightboxImage, LightboxView};
use crate::registry::Page;

/// A read-only picture of the page state.
///
/// Taking a snapshot never touches the views or timers; it only reads the
/// controllers' state.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct PageSnapshot {
    pub viewport_width: f64,
    pub carousels: Vec<CarouselSnapshot>,
    pub lightbox: LightboxSnapshot,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct CarouselSnapshot {
    pub id: usize,
    pub group: LightboxGroup,
    pub inert: bool,
    pub current_index: usize,
    pub slides_per_view: usize,
    pub total_slides: usize,
    pub dot_count: usize,
    pub active_dot: usize,
    pub track_offset_percent: f64,
    pub autoplay_running: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct LightboxSnapshot {
    pub visible: bool,
    pub group: Option<LightboxGroup>,
    pub current_index: usize,
    pub image_count: usize,
    pub current: Option<LightboxImage>,
}

pub struct PageAdapter<'a, C, L, S: IntervalScheduler> {
    page: &'a Page<C, L, S>,
}

impl<'a, C, L, S> PageAdapter<'a, C, L, S>
where
    C: CarouselView,
    L: LightboxView,
    S: IntervalScheduler,
{
    pub fn new(page: &'a Page<C, L, S>) -> Self {
        Self { page }
    }

    pub fn snapshot(&self) -> PageSnapshot {
        let carousels = self
            .page
            .ids()
            .into_iter()
            .filter_map(|id| {
                let c = self.page.carousel(id)?;
                let st = c.state();
                Some(CarouselSnapshot {
                    id: id.0,
                    group: c.group(),
                    inert: c.is_inert(),
                    current_index: st.current_index(),
                    slides_per_view: st.slides_per_view(),
                    total_slides: st.total_slides(),
                    dot_count: st.dot_count(),
                    active_dot: st.active_dot(),
                    track_offset_percent: st.track_offset_percent(),
                    autoplay_running: self.page.autoplay(id).is_some_and(|ap| ap.is_running()),
                })
            })
            .collect();

        let lb = self.page.lightbox().state();
        PageSnapshot {
            viewport_width: self.page.viewport_width(),
            carousels,
            lightbox: LightboxSnapshot {
                visible: lb.is_visible(),
                group: lb.group(),
                current_index: lb.current_index(),
                image_count: lb.images().len(),
                current: lb.current().cloned(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::headless::{HeadlessCarousel, HeadlessImages, HeadlessLightbox, HeadlessPage, ManualScheduler};
    use crate::registry::PageSettings;

    #[test]
    fn snapshot_reflects_navigation_and_lightbox() {
        let mut page: HeadlessPage = Page::new(
            Some(HeadlessLightbox::default()),
            ManualScheduler::default(),
            1200.0,
            PageSettings::default(),
        );
        let g = page.add_carousel(LightboxGroup::Galerie, Some(HeadlessCarousel::new(7)));
        page.next(g);
        page.slide_clicked(g, 2, &HeadlessImages::numbered(LightboxGroup::Galerie, 7));

        let snap = PageAdapter::new(&page).snapshot();
        assert_eq!(snap.carousels.len(), 1);
        let c = &snap.carousels[0];
        assert_eq!(c.current_index, 1);
        assert_eq!(c.dot_count, 5);
        assert!(c.autoplay_running);
        assert!(snap.lightbox.visible);
        assert_eq!(snap.lightbox.current.as_ref().unwrap().src, "galerie-2.jpg");
    }
}

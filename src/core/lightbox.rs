//! Full-size image viewer shared by every carousel on the page.

use tracing::debug;

use crate::carousel::OpenRequest;
use crate::group::LightboxGroup;

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct LightboxImage {
    pub src: String,
    pub alt: String,
    pub caption: Option<String>,
}

impl LightboxImage {
    pub fn new(src: impl Into<String>, alt: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            alt: alt.into(),
            caption: None,
        }
    }

    pub fn with_caption(mut self, caption: impl Into<String>) -> Self {
        self.caption = Some(caption.into());
        self
    }

    /// Caption text, or the alt text when the slide has no (non-blank) caption.
    pub fn display_caption(&self) -> &str {
        match self.caption.as_deref() {
            Some(c) if !c.trim().is_empty() => c,
            _ => &self.alt,
        }
    }
}

/// Reads the images of one group, in slide order, from the page.
///
/// Implementations must only return images living under that group's track.
pub trait ImageSource {
    fn images(&self, group: LightboxGroup) -> Vec<LightboxImage>;
}

pub trait LightboxView {
    fn show_image(&mut self, src: &str, alt: &str);
    fn show_caption(&mut self, caption: &str);
    fn set_visible(&mut self, visible: bool);
    /// Suppress (or restore) page scrolling behind the overlay.
    fn set_scroll_locked(&mut self, locked: bool);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LightboxKey {
    Escape,
    ArrowLeft,
    ArrowRight,
}

impl LightboxKey {
    /// Maps a `KeyboardEvent.key` value.
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "Escape" => Some(LightboxKey::Escape),
            "ArrowLeft" => Some(LightboxKey::ArrowLeft),
            "ArrowRight" => Some(LightboxKey::ArrowRight),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LightboxState {
    images: Vec<LightboxImage>,
    current_index: usize,
    visible: bool,
    group: Option<LightboxGroup>,
}

impl LightboxState {
    pub fn images(&self) -> &[LightboxImage] {
        &self.images
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn group(&self) -> Option<LightboxGroup> {
        self.group
    }

    pub fn current(&self) -> Option<&LightboxImage> {
        self.images.get(self.current_index)
    }

    pub fn previous(&mut self) {
        let len = self.images.len();
        if len == 0 {
            return;
        }
        self.current_index = if self.current_index == 0 {
            len - 1
        } else {
            self.current_index.min(len) - 1
        };
    }

    pub fn next(&mut self) {
        let len = self.images.len();
        if len == 0 {
            return;
        }
        self.current_index = if self.current_index >= len - 1 {
            0
        } else {
            self.current_index + 1
        };
    }
}

pub struct Lightbox<V> {
    view: Option<V>,
    state: LightboxState,
}

impl<V: LightboxView> Lightbox<V> {
    /// `None` when the page has no lightbox root; the viewer then ignores
    /// every request.
    pub fn new(view: Option<V>) -> Self {
        Self {
            view,
            state: LightboxState::default(),
        }
    }

    pub fn state(&self) -> &LightboxState {
        &self.state
    }

    pub fn view(&self) -> Option<&V> {
        self.view.as_ref()
    }

    pub fn is_visible(&self) -> bool {
        self.state.visible
    }

    /// Rebuild the image list from `group` only, show `index` and lock scrolling.
    pub fn open_group(&mut self, group: LightboxGroup, index: usize, source: &impl ImageSource) {
        if self.view.is_none() {
            return;
        }
        self.state.images = source.images(group);
        self.state.group = Some(group);
        self.state.current_index = index;
        self.render_content();
        self.state.visible = true;
        if let Some(view) = self.view.as_mut() {
            view.set_visible(true);
            view.set_scroll_locked(true);
        }
        debug!(
            group = %group,
            index,
            images = self.state.images.len(),
            "lightbox opened"
        );
    }

    pub fn open(&mut self, request: OpenRequest, source: &impl ImageSource) {
        self.open_group(request.group, request.index, source);
    }

    pub fn close(&mut self) {
        let Some(view) = self.view.as_mut() else {
            return;
        };
        let was_visible = self.state.visible;
        self.state.visible = false;
        view.set_visible(false);
        view.set_scroll_locked(false);
        if was_visible {
            debug!("lightbox closed");
        }
    }

    pub fn previous(&mut self) {
        if self.state.images.is_empty() {
            return;
        }
        self.state.previous();
        self.render_content();
    }

    pub fn next(&mut self) {
        if self.state.images.is_empty() {
            return;
        }
        self.state.next();
        self.render_content();
    }

    pub fn render_content(&mut self) {
        let Some(image) = self.state.current() else {
            return;
        };
        let Some(view) = self.view.as_mut() else {
            return;
        };
        view.show_image(&image.src, &image.alt);
        view.show_caption(image.display_caption());
    }

    /// Keyboard navigation, active only while the overlay is shown.
    ///
    /// Returns whether the key was consumed.
    pub fn handle_key(&mut self, key: &str) -> bool {
        if !self.state.visible {
            return false;
        }
        match LightboxKey::from_key(key) {
            Some(LightboxKey::Escape) => self.close(),
            Some(LightboxKey::ArrowLeft) => self.previous(),
            Some(LightboxKey::ArrowRight) => self.next(),
            None => return false,
        }
        true
    }

    pub fn overlay_clicked(&mut self) {
        self.close();
    }

    pub fn close_clicked(&mut self) {
        self.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::headless::{HeadlessImages, HeadlessLightbox};

    fn page() -> HeadlessImages {
        let mut images = HeadlessImages::default();
        images.insert(
            LightboxGroup::Plans,
            vec![
                LightboxImage::new("plan-1.jpg", "Plan 1").with_caption("Rez-de-chaussée"),
                LightboxImage::new("plan-2.jpg", "Plan 2"),
            ],
        );
        images.insert(
            LightboxGroup::Galerie,
            vec![
                LightboxImage::new("g-0.jpg", "Vue 0"),
                LightboxImage::new("g-1.jpg", "Vue 1"),
                LightboxImage::new("g-2.jpg", "Vue 2").with_caption("Salle"),
            ],
        );
        images
    }

    fn lightbox() -> Lightbox<HeadlessLightbox> {
        Lightbox::new(Some(HeadlessLightbox::default()))
    }

    #[test]
    fn open_shows_requested_image_and_locks_scroll() {
        let mut lb = lightbox();
        lb.open_group(LightboxGroup::Galerie, 2, &page());
        let v = lb.view().unwrap();
        assert!(lb.is_visible());
        assert!(v.visible);
        assert!(v.scroll_locked);
        assert_eq!(v.src, "g-2.jpg");
        assert_eq!(v.alt, "Vue 2");
        assert_eq!(v.caption, "Salle");
    }

    #[test]
    fn open_only_collects_the_requested_group() {
        let mut lb = lightbox();
        lb.open_group(LightboxGroup::Plans, 0, &page());
        assert_eq!(lb.state().images().len(), 2);
        assert!(lb
            .state()
            .images()
            .iter()
            .all(|img| img.src.starts_with("plan-")));
        assert_eq!(lb.state().group(), Some(LightboxGroup::Plans));
    }

    #[test]
    fn caption_falls_back_to_alt() {
        let mut lb = lightbox();
        lb.open_group(LightboxGroup::Plans, 1, &page());
        assert_eq!(lb.view().unwrap().caption, "Plan 2");

        let blank = LightboxImage::new("x.jpg", "Alt").with_caption("   ");
        assert_eq!(blank.display_caption(), "Alt");
    }

    #[test]
    fn navigation_wraps_both_ways() {
        let mut lb = lightbox();
        lb.open_group(LightboxGroup::Galerie, 2, &page());
        lb.next();
        assert_eq!(lb.state().current_index(), 0);
        assert_eq!(lb.view().unwrap().src, "g-0.jpg");
        lb.previous();
        assert_eq!(lb.state().current_index(), 2);
        lb.previous();
        assert_eq!(lb.state().current_index(), 1);
    }

    #[test]
    fn empty_group_navigation_is_a_no_op() {
        let mut lb = lightbox();
        lb.open_group(LightboxGroup::Plans, 0, &HeadlessImages::default());
        assert!(lb.is_visible());
        lb.next();
        lb.previous();
        assert_eq!(lb.state().current_index(), 0);
        assert_eq!(lb.view().unwrap().src, "");
    }

    #[test]
    fn out_of_range_open_renders_nothing_then_wraps_into_range() {
        let mut lb = lightbox();
        lb.open_group(LightboxGroup::Plans, 9, &page());
        assert_eq!(lb.view().unwrap().src, "");
        lb.next();
        assert_eq!(lb.state().current_index(), 0);

        lb.open_group(LightboxGroup::Plans, 9, &page());
        lb.previous();
        assert_eq!(lb.state().current_index(), 1);
    }

    #[test]
    fn keys_only_act_while_visible() {
        let mut lb = lightbox();
        assert!(!lb.handle_key("ArrowRight"));

        lb.open_group(LightboxGroup::Galerie, 0, &page());
        assert!(lb.handle_key("ArrowRight"));
        assert_eq!(lb.state().current_index(), 1);
        assert!(lb.handle_key("ArrowLeft"));
        assert_eq!(lb.state().current_index(), 0);
        assert!(!lb.handle_key("Enter"));
        assert!(lb.handle_key("Escape"));
        assert!(!lb.is_visible());
        assert!(!lb.view().unwrap().scroll_locked);
    }

    #[test]
    fn overlay_and_close_button_both_close() {
        let mut lb = lightbox();
        lb.open_group(LightboxGroup::Galerie, 0, &page());
        lb.overlay_clicked();
        assert!(!lb.is_visible());

        lb.open_group(LightboxGroup::Galerie, 0, &page());
        lb.close_clicked();
        assert!(!lb.is_visible());
    }

    #[test]
    fn reopening_rebuilds_from_current_page_content() {
        let mut images = page();
        let mut lb = lightbox();
        lb.open_group(LightboxGroup::Plans, 0, &images);
        assert_eq!(lb.state().images().len(), 2);

        images.insert(LightboxGroup::Plans, vec![LightboxImage::new("only.jpg", "Seul")]);
        lb.open_group(LightboxGroup::Plans, 0, &images);
        assert_eq!(lb.state().images().len(), 1);
        assert_eq!(lb.view().unwrap().src, "only.jpg");
    }

    #[test]
    fn missing_root_ignores_everything() {
        let mut lb: Lightbox<HeadlessLightbox> = Lightbox::new(None);
        lb.open_group(LightboxGroup::Plans, 0, &page());
        assert!(!lb.is_visible());
        assert!(!lb.handle_key("Escape"));
    }
}

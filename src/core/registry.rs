//! The page: every live carousel plus the one shared lightbox.
//!
//! Window-level events (resize, keydown) arrive here once and are fanned out,
//! so carousels can come and go without each holding its own global listener.

use hashbrown::HashMap;
use tracing::{debug, warn};

use crate::autoplay::{Autoplay, IntervalScheduler, DEFAULT_INTERVAL_MS};
use crate::carousel::{CarouselController, CarouselOptions, CarouselView};
use crate::group::LightboxGroup;
use crate::lightbox::{ImageSource, Lightbox, LightboxView};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CarouselId(pub usize);

#[derive(Debug, Clone, Copy)]
pub struct PageSettings {
    pub carousel: CarouselOptions,
    /// `None` disables autoplay.
    pub autoplay_interval_ms: Option<u32>,
}

impl Default for PageSettings {
    fn default() -> Self {
        Self {
            carousel: CarouselOptions::default(),
            autoplay_interval_ms: Some(DEFAULT_INTERVAL_MS),
        }
    }
}

struct Entry<C, H> {
    controller: CarouselController<C>,
    autoplay: Option<Autoplay<H>>,
}

pub struct Page<C, L, S: IntervalScheduler> {
    carousels: HashMap<CarouselId, Entry<C, S::Handle>>,
    next_id: usize,
    lightbox: Lightbox<L>,
    scheduler: S,
    viewport_width: f64,
    settings: PageSettings,
}

impl<C, L, S> Page<C, L, S>
where
    C: CarouselView,
    L: LightboxView,
    S: IntervalScheduler,
{
    pub fn new(lightbox: Option<L>, scheduler: S, viewport_width: f64, settings: PageSettings) -> Self {
        Self {
            carousels: HashMap::new(),
            next_id: 0,
            lightbox: Lightbox::new(lightbox),
            scheduler,
            viewport_width,
            settings,
        }
    }

    /// Initialize a carousel for `group` and start its autoplay.
    pub fn add_carousel(&mut self, group: LightboxGroup, view: Option<C>) -> CarouselId {
        let id = CarouselId(self.next_id);
        self.next_id += 1;

        let controller = CarouselController::initialize(
            group,
            view,
            self.viewport_width,
            self.settings.carousel,
        );
        let mut autoplay = match self.settings.autoplay_interval_ms {
            Some(ms) if !controller.is_inert() => Some(Autoplay::new(ms)),
            _ => None,
        };
        if let Some(ap) = autoplay.as_mut() {
            ap.start(id, &mut self.scheduler);
        }
        self.carousels.insert(
            id,
            Entry {
                controller,
                autoplay,
            },
        );
        debug!(?id, group = %group, "carousel registered");
        id
    }

    /// Drop a carousel and cancel its timer. Later events for `id` are ignored.
    pub fn remove_carousel(&mut self, id: CarouselId) -> Option<CarouselController<C>> {
        let mut entry = self.carousels.remove(&id)?;
        if let Some(ap) = entry.autoplay.as_mut() {
            ap.stop(&mut self.scheduler);
        }
        debug!(?id, "carousel removed");
        Some(entry.controller)
    }

    /// Registered ids in registration order.
    pub fn ids(&self) -> Vec<CarouselId> {
        let mut ids: Vec<_> = self.carousels.keys().copied().collect();
        ids.sort();
        ids
    }

    pub fn len(&self) -> usize {
        self.carousels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.carousels.is_empty()
    }

    pub fn find(&self, group: LightboxGroup) -> Option<CarouselId> {
        self.ids()
            .into_iter()
            .find(|id| self.carousels[id].controller.group() == group)
    }

    pub fn carousel(&self, id: CarouselId) -> Option<&CarouselController<C>> {
        self.carousels.get(&id).map(|e| &e.controller)
    }

    pub fn autoplay(&self, id: CarouselId) -> Option<&Autoplay<S::Handle>> {
        self.carousels.get(&id).and_then(|e| e.autoplay.as_ref())
    }

    pub fn lightbox(&self) -> &Lightbox<L> {
        &self.lightbox
    }

    pub fn lightbox_mut(&mut self) -> &mut Lightbox<L> {
        &mut self.lightbox
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    pub fn viewport_width(&self) -> f64 {
        self.viewport_width
    }

    fn controller_mut(&mut self, id: CarouselId) -> Option<&mut CarouselController<C>> {
        let entry = self.carousels.get_mut(&id);
        if entry.is_none() {
            warn!(?id, "event for unknown carousel ignored");
        }
        entry.map(|e| &mut e.controller)
    }

    pub fn on_resize(&mut self, viewport_width: f64) {
        self.viewport_width = viewport_width;
        for entry in self.carousels.values_mut() {
            entry.controller.resize(viewport_width);
        }
    }

    /// Document keydown. Returns whether the lightbox consumed the key.
    pub fn on_key(&mut self, key: &str) -> bool {
        self.lightbox.handle_key(key)
    }

    pub fn previous(&mut self, id: CarouselId) {
        if let Some(c) = self.controller_mut(id) {
            c.previous();
        }
    }

    pub fn next(&mut self, id: CarouselId) {
        if let Some(c) = self.controller_mut(id) {
            c.next();
        }
    }

    pub fn go_to(&mut self, id: CarouselId, index: i64) {
        if let Some(c) = self.controller_mut(id) {
            c.go_to(index);
        }
    }

    pub fn dot_clicked(&mut self, id: CarouselId, dot_index: usize) {
        if let Some(c) = self.controller_mut(id) {
            c.dot_clicked(dot_index);
        }
    }

    /// Open the lightbox on the clicked slide of carousel `id`.
    pub fn slide_clicked(
        &mut self,
        id: CarouselId,
        slide_index: usize,
        source: &impl ImageSource,
    ) -> bool {
        let request = self
            .controller_mut(id)
            .and_then(|c| c.slide_clicked(slide_index));
        match request {
            Some(req) => {
                self.lightbox.open(req, source);
                self.lightbox.is_visible()
            }
            None => false,
        }
    }

    pub fn pointer_entered(&mut self, id: CarouselId) {
        if let Some(ap) = self.carousels.get_mut(&id).and_then(|e| e.autoplay.as_mut()) {
            ap.pointer_entered(&mut self.scheduler);
        }
    }

    pub fn pointer_left(&mut self, id: CarouselId) {
        if let Some(ap) = self.carousels.get_mut(&id).and_then(|e| e.autoplay.as_mut()) {
            ap.pointer_left(id, &mut self.scheduler);
        }
    }

    /// Timer callback. Advances the carousel unless the lightbox is open.
    pub fn autoplay_tick(&mut self, id: CarouselId) -> bool {
        let lightbox_visible = self.lightbox.is_visible();
        let Some(entry) = self.carousels.get_mut(&id) else {
            return false;
        };
        let advance = entry
            .autoplay
            .as_ref()
            .is_some_and(|ap| ap.should_advance(lightbox_visible));
        if advance {
            entry.controller.next();
        }
        advance
    }

    /// Cancel every live autoplay timer.
    pub fn stop_all(&mut self) {
        for entry in self.carousels.values_mut() {
            if let Some(ap) = entry.autoplay.as_mut() {
                ap.stop(&mut self.scheduler);
            }
        }
    }
}

//! # vitrine
//!
//! Carousel and lightbox widgets for a static promotional page.
//!
//! Each carousel scrolls a fixed row of slides by whole slides, shows one to
//! three slides depending on the viewport width, and opens the shared lightbox
//! on the clicked slide. The lightbox only ever shows images of the group the
//! clicked carousel belongs to.
//!
//! ## Quick Start
//!
//! ```
//! use vitrine::prelude::*;
//! use vitrine::headless::{HeadlessCarousel, HeadlessImages, HeadlessLightbox, ManualScheduler};
//!
//! let mut page = Page::new(
//!     Some(HeadlessLightbox::default()),
//!     ManualScheduler::default(),
//!     1200.0,
//!     PageSettings::default(),
//! );
//! let galerie = page.add_carousel(LightboxGroup::Galerie, Some(HeadlessCarousel::new(7)));
//!
//! page.next(galerie);
//! assert_eq!(page.carousel(galerie).unwrap().state().current_index(), 1);
//!
//! let images = HeadlessImages::numbered(LightboxGroup::Galerie, 7);
//! page.slide_clicked(galerie, 2, &images);
//! assert_eq!(page.lightbox().state().current_index(), 2);
//! ```
//!
//! ## Feature Flags
//!
//! - `serde` (default): page configuration and serializable snapshots
//!
//! ## Modules
//!
//! - [`carousel`]: slide position arithmetic and the controller
//! - [`lightbox`]: the shared full-size viewer
//! - [`registry`]: the page, fanning window events out to every carousel
//! - [`autoplay`]: timer bookkeeping for automatic advancing
//! - [`headless`]: in-memory views for tests and simulation

#[path = "core/autoplay.rs"]
pub mod autoplay;

#[path = "core/carousel.rs"]
pub mod carousel;

#[cfg(feature = "serde")]
#[path = "core/config.rs"]
pub mod config;

#[path = "core/group.rs"]
pub mod group;

#[path = "core/headless.rs"]
pub mod headless;

#[path = "core/labels.rs"]
pub mod labels;

#[path = "core/lightbox.rs"]
pub mod lightbox;

#[path = "core/registry.rs"]
pub mod registry;

#[path = "core/viewport.rs"]
pub mod viewport;

pub mod snapshot;

#[cfg(feature = "serde")]
pub mod sim;

pub mod prelude {
    pub use crate::autoplay::{Autoplay, IntervalScheduler};
    pub use crate::carousel::{CarouselController, CarouselOptions, CarouselState, CarouselView, OpenRequest};
    #[cfg(feature = "serde")]
    pub use crate::config::{ConfigError, PageConfig};
    pub use crate::group::LightboxGroup;
    pub use crate::labels::Locale;
    pub use crate::lightbox::{ImageSource, Lightbox, LightboxImage, LightboxView};
    pub use crate::registry::{CarouselId, Page, PageSettings};
    pub use crate::snapshot::{PageAdapter, PageSnapshot};
    pub use crate::viewport::Breakpoints;
}

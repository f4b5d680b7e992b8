use std::collections::HashMap;

use vitrine::carousel::CarouselView;
use vitrine::config::{CarouselConfig, LightboxConfig};
use vitrine::group::LightboxGroup;
use vitrine::lightbox::{ImageSource, LightboxImage, LightboxView};
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, HtmlImageElement};

pub(super) const SLIDE_SELECTOR: &str = ".carousel-slide";
pub(super) const DOT_CLASS: &str = "carousel-dot";
pub(super) const DOT_INDEX_ATTR: &str = "data-dot-index";
pub(super) const OVERLAY_SELECTOR: &str = ".lightbox-overlay";

pub(super) fn element(doc: &Document, id: Option<&str>) -> Option<Element> {
    doc.get_element_by_id(id?)
}

pub(super) fn elements_under<T: JsCast>(root: &Element, selector: &str) -> Vec<T> {
    let Ok(list) = root.query_selector_all(selector) else {
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|n| n.dyn_into::<T>().ok())
        .collect()
}

fn set_style(el: &HtmlElement, property: &str, value: &str) {
    let _ = el.style().set_property(property, value);
}

fn pct(v: f64) -> String {
    format!("{v}%")
}

pub(super) struct DomCarousel {
    document: Document,
    track: HtmlElement,
    slides: Vec<HtmlElement>,
    dot_host: Option<Element>,
    dots: Vec<Element>,
}

impl DomCarousel {
    /// `None` when the track is missing from the page.
    pub(super) fn find(doc: &Document, cfg: &CarouselConfig) -> Option<Self> {
        let track = doc
            .get_element_by_id(&cfg.track_id())?
            .dyn_into::<HtmlElement>()
            .ok()?;
        let slides = elements_under::<HtmlElement>(&track, SLIDE_SELECTOR);
        Some(Self {
            document: doc.clone(),
            track,
            slides,
            dot_host: element(doc, cfg.dots_id.as_deref()),
            dots: Vec::new(),
        })
    }

    pub(super) fn slides(&self) -> &[HtmlElement] {
        &self.slides
    }

    pub(super) fn dot_host(&self) -> Option<&Element> {
        self.dot_host.as_ref()
    }
}

impl CarouselView for DomCarousel {
    fn slide_count(&self) -> usize {
        self.slides.len()
    }

    fn set_slide_width(&mut self, percent: f64) {
        let basis = pct(percent);
        for slide in &self.slides {
            set_style(slide, "flex-basis", &basis);
        }
    }

    fn set_track_offset(&mut self, percent: f64) {
        set_style(&self.track, "transform", &format!("translateX({})", pct(percent)));
    }

    fn rebuild_dots(&mut self, labels: &[String]) {
        let Some(host) = self.dot_host.as_ref() else {
            return;
        };
        host.set_inner_html("");
        self.dots.clear();
        for (i, label) in labels.iter().enumerate() {
            let Ok(dot) = self.document.create_element("button") else {
                continue;
            };
            dot.set_class_name(DOT_CLASS);
            let _ = dot.set_attribute("type", "button");
            let _ = dot.set_attribute("aria-label", label);
            let _ = dot.set_attribute(DOT_INDEX_ATTR, &i.to_string());
            if host.append_child(&dot).is_ok() {
                self.dots.push(dot);
            }
        }
    }

    fn set_active_dot(&mut self, index: usize) {
        for (i, dot) in self.dots.iter().enumerate() {
            let _ = dot.class_list().toggle_with_force("active", i == index);
        }
    }
}

pub(super) struct DomLightbox {
    root: Element,
    image: Option<HtmlImageElement>,
    caption: Option<Element>,
    body: Option<HtmlElement>,
}

impl DomLightbox {
    pub(super) fn find(doc: &Document, cfg: &LightboxConfig) -> Option<Self> {
        let root = doc.get_element_by_id(&cfg.root_id)?;
        Some(Self {
            root,
            image: element(doc, Some(cfg.image_id.as_str())).and_then(|e| e.dyn_into().ok()),
            caption: element(doc, Some(cfg.caption_id.as_str())),
            body: doc.body(),
        })
    }

    pub(super) fn overlay(&self) -> Option<Element> {
        self.root.query_selector(OVERLAY_SELECTOR).ok().flatten()
    }
}

impl LightboxView for DomLightbox {
    fn show_image(&mut self, src: &str, alt: &str) {
        if let Some(img) = &self.image {
            img.set_src(src);
            img.set_alt(alt);
        }
    }

    fn show_caption(&mut self, caption: &str) {
        if let Some(el) = &self.caption {
            el.set_text_content(Some(caption));
        }
    }

    fn set_visible(&mut self, visible: bool) {
        let _ = self.root.class_list().toggle_with_force("active", visible);
    }

    fn set_scroll_locked(&mut self, locked: bool) {
        let Some(body) = &self.body else {
            return;
        };
        if locked {
            set_style(body, "overflow", "hidden");
        } else {
            let _ = body.style().remove_property("overflow");
        }
    }
}

/// Reads lightbox images straight from each group's track, so an open always
/// reflects the current markup.
#[derive(Clone)]
pub(super) struct DomImages {
    document: Document,
    selectors: HashMap<LightboxGroup, String>,
}

impl DomImages {
    pub(super) fn new(doc: &Document, carousels: &[CarouselConfig]) -> Self {
        Self {
            document: doc.clone(),
            selectors: carousels
                .iter()
                .map(|c| (c.group, c.image_selector()))
                .collect(),
        }
    }
}

impl ImageSource for DomImages {
    fn images(&self, group: LightboxGroup) -> Vec<LightboxImage> {
        let Some(selector) = self.selectors.get(&group) else {
            return Vec::new();
        };
        let Ok(list) = self.document.query_selector_all(selector) else {
            return Vec::new();
        };
        (0..list.length())
            .filter_map(|i| list.item(i))
            .filter_map(|n| n.dyn_into::<HtmlImageElement>().ok())
            .map(|img| {
                let caption = img
                    .parent_element()
                    .and_then(|p| p.query_selector(".slide-caption").ok().flatten())
                    .and_then(|c| c.text_content());
                LightboxImage {
                    src: img.src(),
                    alt: img.alt(),
                    caption,
                }
            })
            .collect()
    }
}

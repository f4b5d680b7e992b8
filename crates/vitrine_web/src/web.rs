use std::cell::RefCell;
use std::rc::Rc;

use vitrine::config::{CarouselConfig, PageConfig};
use vitrine::registry::{CarouselId, Page};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, EventTarget, KeyboardEvent};

mod dom;
mod scheduler;

use dom::{DomCarousel, DomImages, DomLightbox, DOT_CLASS, DOT_INDEX_ATTR};
use scheduler::WebScheduler;

const CONFIG_ELEMENT_ID: &str = "vitrine-config";

type WebPage = Page<DomCarousel, DomLightbox, WebScheduler>;
type SharedPage = Rc<RefCell<WebPage>>;

thread_local! {
    // Kept alive for the whole session.
    static PAGE: RefCell<Option<SharedPage>> = const { RefCell::new(None) };
}

fn warn(msg: &str) {
    web_sys::console::warn_1(&JsValue::from_str(msg));
}

/// Wire every configured carousel and the lightbox to the current document.
#[wasm_bindgen(start)]
pub fn start() {
    let Some(window) = web_sys::window() else {
        return;
    };
    let Some(doc) = window.document() else {
        return;
    };
    if PAGE.with(|p| p.borrow().is_some()) {
        warn("vitrine: start() called twice; ignoring");
        return;
    }

    let config = load_config(&doc);
    let width = viewport_width(&window);
    let lightbox = DomLightbox::find(&doc, &config.lightbox);
    let overlay = lightbox.as_ref().and_then(|lb| lb.overlay());
    let settings = config.settings();

    let page: SharedPage = Rc::new_cyclic(|weak| {
        RefCell::new(Page::new(
            lightbox,
            WebScheduler::new(weak.clone()),
            width,
            settings,
        ))
    });

    let images = DomImages::new(&doc, &config.carousels);
    for cfg in &config.carousels {
        bind_carousel(&doc, &page, cfg, &images);
    }
    bind_lightbox(&doc, &page, &config, overlay);
    bind_window(&window, &doc, &page);

    PAGE.with(|p| *p.borrow_mut() = Some(page));
}

fn load_config(doc: &Document) -> PageConfig {
    let Some(raw) = doc
        .get_element_by_id(CONFIG_ELEMENT_ID)
        .and_then(|el| el.text_content())
    else {
        return PageConfig::default();
    };
    match PageConfig::from_json_str(&raw) {
        Ok(cfg) => cfg,
        Err(e) => {
            warn(&format!("vitrine: {e}; using the default page configuration"));
            PageConfig::default()
        }
    }
}

fn viewport_width(window: &web_sys::Window) -> f64 {
    window
        .inner_width()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0)
}

fn listen<E, F>(target: &EventTarget, event: &str, mut f: F)
where
    E: JsCast,
    F: FnMut(E) + 'static,
{
    let cb = Closure::wrap(Box::new(move |ev: Event| {
        if let Ok(ev) = ev.dyn_into::<E>() {
            f(ev);
        }
    }) as Box<dyn FnMut(Event)>);
    if target
        .add_event_listener_with_callback(event, cb.as_ref().unchecked_ref::<js_sys::Function>())
        .is_ok()
    {
        cb.forget();
    }
}

/// Run `f` on the page unless it is already borrowed by an outer handler.
fn with_page(page: &SharedPage, f: impl FnOnce(&mut WebPage)) {
    if let Ok(mut p) = page.try_borrow_mut() {
        f(&mut p);
    }
}

fn on_click(target: Option<&Element>, page: &SharedPage, f: impl Fn(&mut WebPage) + 'static) {
    let Some(target) = target else {
        return;
    };
    let page = page.clone();
    listen::<Event, _>(target, "click", move |_| with_page(&page, &f));
}

fn bind_carousel(doc: &Document, page: &SharedPage, cfg: &CarouselConfig, images: &DomImages) {
    let view = DomCarousel::find(doc, cfg);
    let slides = view.as_ref().map(|v| v.slides().to_vec()).unwrap_or_default();
    let dot_host = view.as_ref().and_then(|v| v.dot_host().cloned());
    let has_track = view.is_some();

    let id = page.borrow_mut().add_carousel(cfg.group, view);
    if !has_track {
        return;
    }

    let by_id = |key: &Option<String>| key.as_deref().and_then(|k| doc.get_element_by_id(k));
    on_click(by_id(&cfg.prev_id).as_ref(), page, move |p| p.previous(id));
    on_click(by_id(&cfg.next_id).as_ref(), page, move |p| p.next(id));

    for (index, slide) in slides.iter().enumerate() {
        let slide: &Element = slide;
        let images = images.clone();
        on_click(Some(slide), page, move |p| {
            p.slide_clicked(id, index, &images);
        });
    }

    if let Some(host) = dot_host {
        bind_dot_host(&host, page, id);
    }

    if let Some(container) = by_id(&cfg.container_id) {
        let enter = page.clone();
        listen::<Event, _>(&container, "mouseenter", move |_| {
            with_page(&enter, |p| p.pointer_entered(id))
        });
        let leave = page.clone();
        listen::<Event, _>(&container, "mouseleave", move |_| {
            with_page(&leave, |p| p.pointer_left(id))
        });
    }
}

/// Dots are rebuilt on every breakpoint change, so clicks are delegated to the
/// host and resolved through the dot's index attribute.
fn bind_dot_host(host: &Element, page: &SharedPage, id: CarouselId) {
    let page = page.clone();
    let selector = format!(".{DOT_CLASS}");
    listen::<Event, _>(host, "click", move |ev| {
        let dot_index = ev
            .target()
            .and_then(|t| t.dyn_into::<Element>().ok())
            .and_then(|el| el.closest(&selector).ok().flatten())
            .and_then(|dot| dot.get_attribute(DOT_INDEX_ATTR))
            .and_then(|raw| raw.parse::<usize>().ok());
        if let Some(i) = dot_index {
            with_page(&page, |p| p.dot_clicked(id, i));
        }
    });
}

fn bind_lightbox(doc: &Document, page: &SharedPage, config: &PageConfig, overlay: Option<Element>) {
    let ids = &config.lightbox;
    let by_id = |key: &str| doc.get_element_by_id(key);
    on_click(by_id(&ids.close_id).as_ref(), page, |p| p.lightbox_mut().close_clicked());
    on_click(overlay.as_ref(), page, |p| p.lightbox_mut().overlay_clicked());
    on_click(by_id(&ids.prev_id).as_ref(), page, |p| p.lightbox_mut().previous());
    on_click(by_id(&ids.next_id).as_ref(), page, |p| p.lightbox_mut().next());
}

/// The only window/document-level listeners; they fan out through the page.
fn bind_window(window: &web_sys::Window, doc: &Document, page: &SharedPage) {
    let resize = page.clone();
    let win = window.clone();
    listen::<Event, _>(window, "resize", move |_| {
        let w = viewport_width(&win);
        with_page(&resize, |p| p.on_resize(w));
    });

    let keys = page.clone();
    listen::<KeyboardEvent, _>(doc, "keydown", move |ev| {
        with_page(&keys, |p| {
            p.on_key(&ev.key());
        });
    });
}

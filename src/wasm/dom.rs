//! web-sys implementations of the page surfaces.

use std::cell::RefCell;

use gloo::console;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, Event, HtmlAnchorElement, HtmlElement, HtmlIFrameElement};

use super::driver::Driver;
use crate::ease::Ease;
use crate::glitch::PulseTarget;
use crate::menu::{MenuState, MenuView};
use crate::modal::ModalView;
use crate::observer::Band;
use crate::page::Surfaces;
use crate::scroll_lock::PageScroll;
use crate::sections::SectionSurface;
use crate::tween::{Animator, Frame, Prop, TweenSpec};

pub(crate) const ACTIVE: &str = "active";
pub(crate) const GLITCH_CLASS: &str = "trigger-glitch";

thread_local! {
    static REPORTED: RefCell<Vec<&'static str>> = RefCell::new(Vec::new());
}

/// Warn about a failed DOM write. Each kind of write is reported once; a
/// style that cannot be set once will fail the same way on every frame.
pub(crate) fn check<T>(what: &'static str, result: Result<T, JsValue>) {
    let Err(err) = result else {
        return;
    };
    let first = REPORTED.with(|seen| {
        let mut seen = seen.borrow_mut();
        if seen.contains(&what) {
            false
        } else {
            seen.push(what);
            true
        }
    });
    if first {
        console::warn!(format!("{what} failed:"), err);
    }
}

/// All matches of `selector` under `root`, in document order.
pub(crate) fn elements<T: JsCast>(root: &Document, selector: &str) -> Vec<T> {
    let Ok(list) = root.query_selector_all(selector) else {
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<T>().ok())
        .collect()
}

pub(crate) fn by_id<T: JsCast>(document: &Document, id: &str) -> Option<T> {
    document.get_element_by_id(id)?.dyn_into::<T>().ok()
}

pub(crate) fn event_element(event: &Event) -> Option<Element> {
    event.target()?.dyn_into::<Element>().ok()
}

pub(crate) fn closest(el: &Element, selector: &str) -> Option<Element> {
    el.closest(selector).ok().flatten()
}

pub(crate) struct DomSections {
    pub(crate) sections: Vec<HtmlElement>,
    pub(crate) indicators: Vec<Element>,
    pub(crate) driver: Driver,
}

impl SectionSurface for DomSections {
    fn section_count(&self) -> usize {
        self.sections.len()
    }

    fn section_band(&self, index: usize) -> Option<Band> {
        let el = self.sections.get(index)?;
        Some(Band::new(el.offset_top() as f64, el.offset_height() as f64))
    }

    fn section_index(&self, id: &str) -> Option<usize> {
        self.sections.iter().position(|s| s.id() == id)
    }

    fn indicator_count(&self) -> usize {
        self.indicators.len()
    }

    fn set_indicator(&mut self, index: usize, active: bool) {
        if let Some(ind) = self.indicators.get(index) {
            check("indicator class", ind.class_list().toggle_with_force(ACTIVE, active));
        }
    }

    fn reveal_section(&mut self, index: usize) {
        if let Some(el) = self.sections.get(index) {
            self.driver
                .set_immediate(el, Frame::default().with(Prop::Opacity, 1.0));
        }
    }

    fn scale_in(&mut self, index: usize, spec: TweenSpec) {
        if let Some(el) = self.sections.get(index) {
            self.driver.animate(el, spec, None);
        }
    }

    fn scroll_window(&mut self, offset: f64, duration_ms: f64, ease: Ease) {
        self.driver.animate_scroll(offset, duration_ms, ease);
    }
}

/// `#glitch-overlay`. Absent overlay means no pulse, nothing else changes.
pub(crate) struct GlitchOverlay(pub(crate) Option<HtmlElement>);

impl PulseTarget for GlitchOverlay {
    fn set_armed(&mut self, armed: bool) {
        if let Some(el) = &self.0 {
            let classes = el.class_list();
            let result = if armed {
                classes.add_1(GLITCH_CLASS)
            } else {
                classes.remove_1(GLITCH_CLASS)
            };
            check("glitch class", result);
        }
    }

    fn flush(&mut self) {
        // reading layout forces the class removal to be applied
        if let Some(el) = &self.0 {
            let _ = el.offset_width();
        }
    }
}

pub(crate) struct DomMenu {
    pub(crate) toggle: HtmlElement,
    pub(crate) panel: Element,
    pub(crate) links: Vec<HtmlElement>,
    pub(crate) driver: Driver,
}

impl MenuView for DomMenu {
    fn link_count(&self) -> usize {
        self.links.len()
    }

    fn show(&mut self, state: MenuState, label: &str) {
        check(
            "menu panel class",
            self.panel
                .class_list()
                .toggle_with_force(ACTIVE, state.is_open()),
        );
        check("menu label", self.toggle.set_attribute("data-text", label));
        self.toggle.set_inner_text(label);
    }

    fn reveal_link(&mut self, index: usize, spec: TweenSpec) {
        if let Some(link) = self.links.get(index) {
            self.driver.animate(link, spec, None);
        }
    }
}

pub(crate) struct DomModal {
    pub(crate) backdrop: Element,
    pub(crate) frame: HtmlIFrameElement,
    pub(crate) title: Option<Element>,
    pub(crate) download: Option<HtmlAnchorElement>,
}

impl ModalView for DomModal {
    fn set_source(&mut self, src: &str) {
        self.frame.set_src(src);
    }

    fn set_title(&mut self, title: &str) {
        if let Some(el) = &self.title {
            el.set_text_content(Some(title));
        }
    }

    fn set_download(&mut self, href: &str) {
        if let Some(a) = &self.download {
            a.set_href(href);
        }
    }

    fn set_visible(&mut self, visible: bool) {
        check(
            "modal class",
            self.backdrop.class_list().toggle_with_force(ACTIVE, visible),
        );
    }
}

pub(crate) struct DomBody(pub(crate) Option<HtmlElement>);

impl PageScroll for DomBody {
    fn set_scroll_locked(&mut self, locked: bool) {
        let Some(body) = &self.0 else {
            return;
        };
        let style = body.style();
        let result = if locked {
            style.set_property("overflow", "hidden")
        } else {
            style.remove_property("overflow").map(|_| ())
        };
        check("scroll lock", result);
    }
}

pub(crate) struct DomSurfaces;

impl Surfaces for DomSurfaces {
    type Sections = DomSections;
    type Pulse = GlitchOverlay;
    type Menu = DomMenu;
    type Modal = DomModal;
    type Body = DomBody;
}

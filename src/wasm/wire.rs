//! Wiring: find the page's elements, build the interaction state and attach
//! the event listeners that feed it.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use gloo::console;
use gloo::events::{EventListener, EventListenerOptions};
use gloo::timers::callback::Timeout;
use wasm_bindgen::JsCast;
use web_sys::{
    Document, Element, Event, HtmlCanvasElement, HtmlElement,
    HtmlIFrameElement, KeyboardEvent, MouseEvent, Window,
};

use super::background::{self, Background};
use super::dom::{self, DomBody, DomMenu, DomModal, DomSections, DomSurfaces, GlitchOverlay};
use super::driver::Driver;
use crate::config::SiteConfig;
use crate::error::UiError;
use crate::hover::{self, LabelTarget, Rect};
use crate::loader;
use crate::menu::{ClickRegion, MenuState};
use crate::modal::{CardClick, ModalState};
use crate::page::{ClickInfo, Followup, Page, UiEvent};
use crate::text;
use crate::tween::Animator;

thread_local! {
    static MOUNTED: RefCell<Option<Mounted>> = RefCell::new(None);
}

struct Context {
    window: Window,
    page: RefCell<Page<DomSurfaces>>,
    reload: RefCell<Option<Timeout>>,
}

/// A wired page. Dropping it detaches every listener.
pub struct Mounted {
    ctx: Rc<Context>,
    _listeners: Vec<EventListener>,
    _loader: Rc<RefCell<Option<Timeout>>>,
    _background: Option<Background>,
}

impl Mounted {
    /// Keep the page wired for the rest of the document's life.
    pub fn keep(self) {
        MOUNTED.with(|slot| {
            *slot.borrow_mut() = Some(self);
        });
    }

    pub fn active_section(&self) -> Option<usize> {
        self.ctx.page.borrow().active_section()
    }

    pub fn menu_state(&self) -> Option<MenuState> {
        self.ctx.page.borrow().menu_state()
    }

    pub fn modal_state(&self) -> Option<ModalState> {
        self.ctx.page.borrow().modal_state().cloned()
    }

    pub fn scroll_locked(&self) -> bool {
        self.ctx.page.borrow().scroll_locked()
    }
}

/// Wire `document`. Every control is optional; a missing one disables only
/// its own feature.
pub fn mount(document: &Document) -> Result<Mounted, UiError> {
    let window = web_sys::window().ok_or(UiError::MissingElement("window"))?;
    let body = document.body();

    let (config, problems) = match &body {
        Some(body) => {
            let dataset = body.dataset();
            SiteConfig::from_lookup(|key| dataset.get(key))
        }
        None => (SiteConfig::default(), Vec::new()),
    };
    for problem in problems {
        console::warn!(problem.to_string());
    }

    split_text(document)?;
    prepare_glitch_labels(document);

    let driver = Driver::new(window.clone());
    let sections = DomSections {
        sections: dom::elements(document, "section"),
        indicators: dom::elements(document, ".section-indicator"),
        driver: driver.clone(),
    };
    let pulse = GlitchOverlay(dom::by_id(document, "glitch-overlay"));

    let toggle: Option<HtmlElement> = dom::by_id(document, "menu-toggle");
    let panel: Option<Element> = document.get_element_by_id("hud-menu");
    let links: Vec<HtmlElement> = dom::elements(document, ".menu-link");
    let menu = match (toggle.clone(), panel) {
        (Some(toggle), Some(panel)) => Some(DomMenu {
            toggle,
            panel,
            links: links.clone(),
            driver: driver.clone(),
        }),
        _ => None,
    };

    let backdrop = document.get_element_by_id("resumeModal");
    let modal = match (&backdrop, dom::by_id::<HtmlIFrameElement>(document, "resumeFrame")) {
        (Some(backdrop), Some(frame)) => Some(DomModal {
            backdrop: backdrop.clone(),
            frame,
            title: backdrop.query_selector("h3").ok().flatten(),
            download: dom::by_id(document, "downloadResume"),
        }),
        _ => None,
    };

    let page = Page::new(config.clone(), sections, pulse, menu, modal, DomBody(body));
    let ctx = Rc::new(Context {
        window: window.clone(),
        page: RefCell::new(page),
        reload: RefCell::new(None),
    });
    let (scroll_y, viewport_h) = viewport(&window);
    ctx.page.borrow_mut().init(scroll_y, viewport_h);

    let mut listeners = Vec::new();

    for target in ["scroll", "resize"] {
        let weak = Rc::downgrade(&ctx);
        listeners.push(EventListener::new(&window, target, move |_| {
            with_ctx(&weak, |ctx| {
                let (y, viewport_h) = viewport(&ctx.window);
                dispatch(ctx, UiEvent::Scroll { y, viewport_h });
            });
        }));
    }

    let indicators: Vec<Element> = dom::elements(document, ".section-indicator");
    for (index, indicator) in indicators.iter().enumerate() {
        let weak = Rc::downgrade(&ctx);
        listeners.push(EventListener::new(indicator, "click", move |_| {
            with_ctx(&weak, |ctx| dispatch(ctx, UiEvent::IndicatorClick(index)));
        }));
    }

    if let Some(toggle) = &toggle {
        let weak = Rc::downgrade(&ctx);
        listeners.push(EventListener::new(toggle, "click", move |_| {
            with_ctx(&weak, |ctx| dispatch(ctx, UiEvent::MenuToggle));
        }));
    }

    for link in &links {
        let weak = Rc::downgrade(&ctx);
        let href = link.get_attribute("href").unwrap_or_default();
        listeners.push(EventListener::new_with_options(
            link,
            "click",
            EventListenerOptions::enable_prevent_default(),
            move |event| {
                event.prevent_default();
                let href = href.clone();
                with_ctx(&weak, |ctx| dispatch(ctx, UiEvent::MenuLink(href)));
            },
        ));
    }

    {
        let weak = Rc::downgrade(&ctx);
        let backdrop = backdrop.clone();
        listeners.push(EventListener::new(document, "click", move |event| {
            let Some(target) = dom::event_element(event) else {
                return;
            };
            let info = classify_click(&target, backdrop.as_ref());
            with_ctx(&weak, |ctx| dispatch(ctx, UiEvent::Click(info)));
        }));
    }

    {
        let weak = Rc::downgrade(&ctx);
        listeners.push(EventListener::new(document, "keydown", move |event| {
            let Some(event) = event.dyn_ref::<KeyboardEvent>() else {
                return;
            };
            let key = event.key();
            with_ctx(&weak, |ctx| dispatch(ctx, UiEvent::KeyDown(key)));
        }));
    }

    if let Some(open) = document.get_element_by_id("openResume") {
        let weak = Rc::downgrade(&ctx);
        listeners.push(EventListener::new(&open, "click", move |_| {
            with_ctx(&weak, |ctx| dispatch(ctx, UiEvent::ResumeOpen));
        }));
    }

    if let Some(close) = document.get_element_by_id("closeResume") {
        let weak = Rc::downgrade(&ctx);
        listeners.push(EventListener::new(&close, "click", move |_| {
            with_ctx(&weak, |ctx| dispatch(ctx, UiEvent::ModalClose));
        }));
    }

    listeners.extend(magnetic_buttons(document));

    let loader_timer = Rc::new(RefCell::new(None));
    if let Some(listener) = start_loader(document, &window, &driver, &config, &loader_timer) {
        listeners.push(listener);
    }

    let background = match dom::by_id::<HtmlCanvasElement>(document, "bg-canvas") {
        Some(canvas) => match background::start(&canvas, &window) {
            Ok(bg) => Some(bg),
            Err(err) => {
                console::warn!("WebGL not available, skipping 3D background:", err.to_string());
                background::hide(&canvas);
                None
            }
        },
        None => None,
    };

    Ok(Mounted {
        ctx,
        _listeners: listeners,
        _loader: loader_timer,
        _background: background,
    })
}

fn viewport(window: &Window) -> (f64, f64) {
    let y = window.scroll_y().unwrap_or_default();
    let h = window
        .inner_height()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or_default();
    (y, h)
}

fn with_ctx(weak: &Weak<Context>, f: impl FnOnce(&Rc<Context>)) {
    if let Some(ctx) = weak.upgrade() {
        f(&ctx);
    }
}

fn dispatch(ctx: &Rc<Context>, event: UiEvent) {
    let result = ctx.page.borrow_mut().dispatch(event);
    match result {
        Ok(Some(Followup::Reload { ticket, delay_ms })) => {
            let weak = Rc::downgrade(ctx);
            let timer = Timeout::new(delay_ms, move || {
                with_ctx(&weak, |ctx| dispatch(ctx, UiEvent::ReloadDue(ticket)));
            });
            // replacing the slot drops, and so cancels, any earlier reload
            *ctx.reload.borrow_mut() = Some(timer);
        }
        Ok(None) => {}
        Err(err) => console::warn!(err.to_string()),
    }
}

fn classify_click(target: &Element, backdrop: Option<&Element>) -> ClickInfo {
    let menu_region = if dom::closest(target, "#menu-toggle").is_some() {
        ClickRegion::Toggle
    } else if dom::closest(target, "#hud-menu .menu-content").is_some() {
        ClickRegion::MenuContent
    } else {
        ClickRegion::Outside
    };
    let card = dom::closest(target, ".cert-card").map(|card| CardClick {
        pdf: card.get_attribute("data-pdf"),
        title: card.get_attribute("data-title"),
        from_download: dom::closest(target, ".download").is_some(),
    });
    let on_backdrop = backdrop.is_some_and(|b| b.is_same_node(Some(target.as_ref())));
    ClickInfo {
        menu_region,
        card,
        on_backdrop,
    }
}

/// Replace each heading's text with one `span.char` per character.
fn split_text(document: &Document) -> Result<(), UiError> {
    let headings: Vec<HtmlElement> = dom::elements(document, text::SPLIT_SELECTOR);
    for heading in headings {
        let cells = text::char_cells(&heading.inner_text());
        heading.set_text_content(None);
        for cell in cells {
            let span = document.create_element("span")?;
            span.set_class_name(text::CHAR_CLASS);
            span.set_text_content(Some(&cell));
            heading.append_child(&span)?;
        }
    }
    Ok(())
}

fn prepare_glitch_labels(document: &Document) {
    let buttons: Vec<HtmlElement> = dom::elements(document, ".btn, .resume-btn");
    for button in buttons {
        let child: Option<HtmlElement> = button
            .query_selector(".glitch-target")
            .ok()
            .flatten()
            .and_then(|el| el.dyn_into().ok());
        let has_icon = button.query_selector("svg").ok().flatten().is_some();
        let target = match hover::label_target(child.is_some(), has_icon) {
            LabelTarget::Child => child,
            LabelTarget::Button => Some(button),
            LabelTarget::Skip => None,
        };
        if let Some(el) = target {
            dom::check("glitch label class", el.class_list().add_1("glitch-btn"));
            dom::check("glitch label text", el.set_attribute("data-text", &el.inner_text()));
        }
    }
}

fn magnetic_buttons(document: &Document) -> Vec<EventListener> {
    let buttons: Vec<HtmlElement> = dom::elements(document, ".btn");
    let mut listeners = Vec::with_capacity(buttons.len() * 2);
    for button in buttons {
        let el = button.clone();
        listeners.push(EventListener::new(&button, "mousemove", move |event| {
            let Some(event) = event.dyn_ref::<MouseEvent>() else {
                return;
            };
            let rect = el.get_bounding_client_rect();
            let rect = Rect {
                left: rect.left(),
                top: rect.top(),
                width: rect.width(),
                height: rect.height(),
            };
            let transform =
                hover::magnetic_transform(rect, event.client_x() as f64, event.client_y() as f64);
            dom::check("magnetic transform", el.style().set_property("transform", &transform));
        }));
        let el = button.clone();
        listeners.push(EventListener::new(&button, "mouseleave", move |_| {
            dom::check("magnetic reset", el.style().remove_property("transform"));
        }));
    }
    listeners
}

/// Schedule the loader fade. Returns the `load` listener when the document
/// is still loading. Without a loader the landing section is revealed at once.
fn start_loader(
    document: &Document,
    window: &Window,
    driver: &Driver,
    config: &SiteConfig,
    timer: &Rc<RefCell<Option<Timeout>>>,
) -> Option<EventListener> {
    let home: Option<HtmlElement> = dom::by_id(document, "home");
    let chars: Vec<HtmlElement> = dom::elements(document, "#home .char");
    let Some(screen) = dom::by_id::<HtmlElement>(document, "loader") else {
        if let Some(home) = &home {
            loader::reveal_home(&mut driver.clone(), home, &chars);
        }
        return None;
    };
    let delay = config.loader_delay_ms;

    let run = {
        let driver = driver.clone();
        let timer = Rc::clone(timer);
        move || {
            let driver = driver.clone();
            let screen = screen.clone();
            let home = home.clone();
            let chars = chars.clone();
            let fade = Timeout::new(delay, move || {
                let mut animator = driver.clone();
                let hidden = screen.clone();
                let finish = move || {
                    dom::check("hide loader", hidden.style().set_property("display", "none"));
                    if let Some(home) = &home {
                        let mut driver = driver;
                        loader::reveal_home(&mut driver, home, &chars);
                    }
                };
                animator.animate(&screen, loader::loader_fade(), Some(Box::new(finish)));
            });
            *timer.borrow_mut() = Some(fade);
        }
    };

    if document.ready_state() == "complete" {
        run();
        None
    } else {
        Some(EventListener::once(window, "load", move |_: &Event| run()))
    }
}

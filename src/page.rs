//! The interaction state of one page: section activation, the navigation
//! menu and the PDF modal, each owned here and driven only through
//! [`Page::dispatch`].

use crate::config::SiteConfig;
use crate::error::UiError;
use crate::glitch::PulseTarget;
use crate::menu::{ClickRegion, MenuState, MenuView, NavMenu};
use crate::modal::{CardClick, LoadTicket, ModalState, ModalView, PdfModal};
use crate::scroll_lock::{PageScroll, ScrollLock};
use crate::sections::{NavOrigin, SectionController, SectionSurface};

/// The concrete rendering surfaces a page is wired to.
pub trait Surfaces {
    type Sections: SectionSurface;
    type Pulse: PulseTarget;
    type Menu: MenuView;
    type Modal: ModalView;
    type Body: PageScroll;
}

/// A document click, pre-classified by the glue.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClickInfo {
    pub menu_region: ClickRegion,
    /// Set when the click landed inside a certificate card.
    pub card: Option<CardClick>,
    /// The click target is the modal backdrop itself.
    pub on_backdrop: bool,
}

impl ClickInfo {
    pub fn outside() -> Self {
        Self {
            menu_region: ClickRegion::Outside,
            card: None,
            on_backdrop: false,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum UiEvent {
    Scroll { y: f64, viewport_h: f64 },
    IndicatorClick(usize),
    MenuToggle,
    /// A menu link was followed; carries its `href`.
    MenuLink(String),
    Click(ClickInfo),
    KeyDown(String),
    ResumeOpen,
    ModalClose,
    ReloadDue(LoadTicket),
}

/// Work the glue has to schedule on the page's behalf.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Followup {
    /// Dispatch `UiEvent::ReloadDue(ticket)` after `delay_ms`, replacing any
    /// earlier reload timer.
    Reload { ticket: LoadTicket, delay_ms: u32 },
}

pub struct Page<U: Surfaces> {
    config: SiteConfig,
    sections: SectionController<U::Sections, U::Pulse>,
    menu: Option<NavMenu<U::Menu>>,
    modal: Option<PdfModal<U::Modal>>,
    lock: ScrollLock<U::Body>,
}

impl<U: Surfaces> Page<U> {
    /// A missing menu or modal disables that feature; its events become
    /// no-ops.
    pub fn new(
        config: SiteConfig,
        sections: U::Sections,
        pulse: U::Pulse,
        menu: Option<U::Menu>,
        modal: Option<U::Modal>,
        body: U::Body,
    ) -> Self {
        let sections = SectionController::new(sections, pulse, &config);
        let menu = menu.map(|view| NavMenu::new(view, &config));
        Self {
            sections,
            menu,
            modal: modal.map(PdfModal::new),
            lock: ScrollLock::new(body),
            config,
        }
    }

    pub fn init(&mut self, scroll_y: f64, viewport_h: f64) {
        self.sections.init(scroll_y, viewport_h);
    }

    pub fn dispatch(&mut self, event: UiEvent) -> Result<Option<Followup>, UiError> {
        match event {
            UiEvent::Scroll { y, viewport_h } => {
                self.sections.on_scroll(y, viewport_h);
                Ok(None)
            }
            UiEvent::IndicatorClick(index) => {
                self.sections.scroll_to(index, NavOrigin::Indicator)?;
                Ok(None)
            }
            UiEvent::MenuToggle => {
                if let Some(menu) = self.menu.as_mut() {
                    menu.toggle();
                }
                Ok(None)
            }
            UiEvent::MenuLink(href) => {
                let navigated = self.sections.scroll_to_target(&href, NavOrigin::MenuLink);
                if let Some(menu) = self.menu.as_mut() {
                    menu.select_link();
                }
                navigated.map(|_| None)
            }
            UiEvent::Click(info) => Ok(self.click(info)),
            UiEvent::KeyDown(key) => {
                if let Some(menu) = self.menu.as_mut() {
                    menu.key_down(&key);
                }
                Ok(None)
            }
            UiEvent::ResumeOpen => {
                let url = self.config.resume_url.clone();
                let title = self.config.resume_title.clone();
                Ok(self.open_modal(&url, &title))
            }
            UiEvent::ModalClose => {
                self.close_modal();
                Ok(None)
            }
            UiEvent::ReloadDue(ticket) => {
                if let Some(modal) = self.modal.as_mut() {
                    modal.commit(ticket, &mut self.lock);
                }
                Ok(None)
            }
        }
    }

    fn click(&mut self, info: ClickInfo) -> Option<Followup> {
        if let Some(menu) = self.menu.as_mut() {
            menu.click(info.menu_region);
        }
        let mut followup = None;
        if let Some(card) = info.card {
            if let Some((url, title)) = card.request(&self.config.certificate_title) {
                followup = self.open_modal(&url, &title);
            }
        }
        if info.on_backdrop {
            self.close_modal();
        }
        followup
    }

    fn open_modal(&mut self, url: &str, title: &str) -> Option<Followup> {
        let modal = self.modal.as_mut()?;
        let ticket = modal.open(url, title);
        Some(Followup::Reload {
            ticket,
            delay_ms: self.config.modal_reload_ms,
        })
    }

    fn close_modal(&mut self) {
        if let Some(modal) = self.modal.as_mut() {
            modal.close(&mut self.lock);
        }
    }

    pub fn active_section(&self) -> Option<usize> {
        self.sections.active()
    }

    pub fn menu_state(&self) -> Option<MenuState> {
        self.menu.as_ref().map(|m| m.state())
    }

    pub fn modal_state(&self) -> Option<&ModalState> {
        self.modal.as_ref().map(|m| m.state())
    }

    pub fn scroll_locked(&self) -> bool {
        self.lock.is_locked()
    }

    pub fn sections(&self) -> &SectionController<U::Sections, U::Pulse> {
        &self.sections
    }

    pub fn menu(&self) -> Option<&NavMenu<U::Menu>> {
        self.menu.as_ref()
    }

    pub fn modal(&self) -> Option<&PdfModal<U::Modal>> {
        self.modal.as_ref()
    }

    pub fn body(&self) -> &U::Body {
        self.lock.body()
    }
}

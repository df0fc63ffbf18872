//! Single reusable PDF preview overlay.
//!
//! Opening is two-step: [`PdfModal::open`] clears the embedded viewer and
//! hands back a [`LoadTicket`]; after a short delay the caller presents the
//! ticket to [`PdfModal::commit`], which loads the new document. Only the
//! newest ticket commits, so a second `open` replaces the first.

use crate::scroll_lock::{LockHolder, PageScroll, ScrollLock};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ModalState {
    Closed,
    Open { url: String, title: String },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LoadTicket(u64);

pub trait ModalView {
    /// Point the embedded viewer at `src`; an empty string unloads it.
    fn set_source(&mut self, src: &str);
    fn set_title(&mut self, title: &str);
    fn set_download(&mut self, href: &str);
    fn set_visible(&mut self, visible: bool);
}

/// What a click inside a certificate card carried.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CardClick {
    pub pdf: Option<String>,
    pub title: Option<String>,
    /// The click started inside the card's own download control.
    pub from_download: bool,
}

impl CardClick {
    /// The `(url, title)` to preview, if this click should open the modal.
    pub fn request(&self, default_title: &str) -> Option<(String, String)> {
        if self.from_download {
            return None;
        }
        let url = self.pdf.as_deref().filter(|u| !u.is_empty())?;
        let title = self
            .title
            .as_deref()
            .filter(|t| !t.is_empty())
            .unwrap_or(default_title);
        Some((url.to_string(), title.to_string()))
    }
}

/// Viewer URL for a document, with the browser PDF toolbar hidden.
pub fn viewer_source(url: &str) -> String {
    format!("{url}#toolbar=0")
}

struct Pending {
    ticket: LoadTicket,
    url: String,
    title: String,
}

pub struct PdfModal<V> {
    view: V,
    state: ModalState,
    pending: Option<Pending>,
    next_ticket: u64,
}

impl<V: ModalView> PdfModal<V> {
    pub fn new(view: V) -> Self {
        Self {
            view,
            state: ModalState::Closed,
            pending: None,
            next_ticket: 0,
        }
    }

    pub fn state(&self) -> &ModalState {
        &self.state
    }

    pub fn is_open(&self) -> bool {
        matches!(self.state, ModalState::Open { .. })
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn open(&mut self, url: &str, title: &str) -> LoadTicket {
        self.view.set_source("");
        self.next_ticket += 1;
        let ticket = LoadTicket(self.next_ticket);
        self.pending = Some(Pending {
            ticket,
            url: url.to_string(),
            title: title.to_string(),
        });
        ticket
    }

    /// Finish the load started by `open`. Stale tickets do nothing and
    /// return false.
    pub fn commit<B: PageScroll>(&mut self, ticket: LoadTicket, lock: &mut ScrollLock<B>) -> bool {
        match &self.pending {
            Some(pending) if pending.ticket == ticket => {}
            _ => return false,
        }
        let Some(Pending { url, title, .. }) = self.pending.take() else {
            return false;
        };
        self.view.set_source(&viewer_source(&url));
        self.view.set_download(&url);
        self.view.set_title(&title);
        self.view.set_visible(true);
        lock.acquire(LockHolder::Modal);
        self.state = ModalState::Open { url, title };
        true
    }

    pub fn close<B: PageScroll>(&mut self, lock: &mut ScrollLock<B>) {
        self.pending = None;
        self.view.set_visible(false);
        lock.release(LockHolder::Modal);
        self.view.set_source("");
        self.state = ModalState::Closed;
    }
}

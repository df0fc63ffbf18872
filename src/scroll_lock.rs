/// Components that may suspend background scrolling.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LockHolder {
    Modal,
    /// Not taken by the slide-out menu today; kept so a locking menu can
    /// share the body with the modal without releasing its lock.
    Menu,
}

/// The document body's overflow switch.
pub trait PageScroll {
    fn set_scroll_locked(&mut self, locked: bool);
}

/// Background scroll suppression shared between overlays. Scrolling stays
/// locked while any holder has it; each holder counts once no matter how
/// often it acquires.
pub struct ScrollLock<B> {
    body: B,
    holders: Vec<LockHolder>,
}

impl<B: PageScroll> ScrollLock<B> {
    pub fn new(body: B) -> Self {
        Self {
            body,
            holders: Vec::new(),
        }
    }

    pub fn acquire(&mut self, holder: LockHolder) {
        if self.holders.contains(&holder) {
            return;
        }
        self.holders.push(holder);
        if self.holders.len() == 1 {
            self.body.set_scroll_locked(true);
        }
    }

    pub fn release(&mut self, holder: LockHolder) {
        let before = self.holders.len();
        self.holders.retain(|h| *h != holder);
        if before > 0 && self.holders.is_empty() {
            self.body.set_scroll_locked(false);
        }
    }

    pub fn is_locked(&self) -> bool {
        !self.holders.is_empty()
    }

    pub fn body(&self) -> &B {
        &self.body
    }
}

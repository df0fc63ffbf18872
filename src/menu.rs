use crate::config::SiteConfig;
use crate::ease::Ease;
use crate::tween::{Prop, TweenSpec};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MenuState {
    Closed,
    Open,
}

impl MenuState {
    /// Text shown on the toggle control.
    pub fn label(self) -> &'static str {
        match self {
            MenuState::Closed => "MENU",
            MenuState::Open => "CLOSE",
        }
    }

    pub fn is_open(self) -> bool {
        self == MenuState::Open
    }
}

/// Where a document click landed, relative to the menu.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClickRegion {
    Toggle,
    MenuContent,
    Outside,
}

pub trait MenuView {
    fn link_count(&self) -> usize;
    /// Render `state`: panel visibility plus the toggle label.
    fn show(&mut self, state: MenuState, label: &str);
    fn reveal_link(&mut self, index: usize, spec: TweenSpec);
}

/// Slide-out navigation menu.
pub struct NavMenu<V> {
    view: V,
    state: MenuState,
    stagger_ms: f64,
}

impl<V: MenuView> NavMenu<V> {
    pub fn new(view: V, config: &SiteConfig) -> Self {
        Self {
            view,
            state: MenuState::Closed,
            stagger_ms: config.link_stagger_ms,
        }
    }

    pub fn state(&self) -> MenuState {
        self.state
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn toggle(&mut self) -> MenuState {
        let next = match self.state {
            MenuState::Closed => MenuState::Open,
            MenuState::Open => MenuState::Closed,
        };
        self.set(next);
        if next.is_open() {
            for index in 0..self.view.link_count() {
                let spec = TweenSpec::new(600.0, Ease::Power3Out)
                    .motion(Prop::Opacity, 0.0, 1.0)
                    .motion(Prop::TranslateY, 40.0, 0.0)
                    .delay(index as f64 * self.stagger_ms);
                self.view.reveal_link(index, spec);
            }
        }
        next
    }

    /// A link was followed. Navigation itself is the caller's job; the menu
    /// always closes.
    pub fn select_link(&mut self) {
        self.set(MenuState::Closed);
    }

    /// Returns true if the click closed the menu.
    pub fn click(&mut self, region: ClickRegion) -> bool {
        if self.state.is_open() && region == ClickRegion::Outside {
            self.set(MenuState::Closed);
            return true;
        }
        false
    }

    pub fn key_down(&mut self, key: &str) -> bool {
        if self.state.is_open() && key == "Escape" {
            self.set(MenuState::Closed);
            return true;
        }
        false
    }

    fn set(&mut self, next: MenuState) {
        self.state = next;
        self.view.show(next, next.label());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Panel {
        links: usize,
        label: String,
        visible: bool,
        delays: Vec<f64>,
    }

    impl MenuView for Panel {
        fn link_count(&self) -> usize {
            self.links
        }
        fn show(&mut self, state: MenuState, label: &str) {
            self.visible = state.is_open();
            self.label = label.to_string();
        }
        fn reveal_link(&mut self, _index: usize, spec: TweenSpec) {
            self.delays.push(spec.delay_ms);
        }
    }

    fn menu(links: usize) -> NavMenu<Panel> {
        NavMenu::new(
            Panel {
                links,
                ..Panel::default()
            },
            &SiteConfig::default(),
        )
    }

    #[test]
    fn toggle_flips_and_staggers_forward_only() {
        let mut m = menu(3);
        assert_eq!(m.toggle(), MenuState::Open);
        assert_eq!(m.view().label, "CLOSE");
        assert!(m.view().visible);
        assert_eq!(m.view().delays, vec![0.0, 100.0, 200.0]);

        assert_eq!(m.toggle(), MenuState::Closed);
        assert_eq!(m.view().label, "MENU");
        assert_eq!(m.view().delays.len(), 3);
    }

    #[test]
    fn escape_only_matters_while_open() {
        let mut m = menu(1);
        assert!(!m.key_down("Escape"));
        m.toggle();
        assert!(!m.key_down("Enter"));
        assert!(m.key_down("Escape"));
        assert_eq!(m.state(), MenuState::Closed);
    }

    #[test]
    fn clicks_inside_keep_it_open() {
        let mut m = menu(1);
        m.toggle();
        assert!(!m.click(ClickRegion::MenuContent));
        assert!(!m.click(ClickRegion::Toggle));
        assert!(m.state().is_open());
        assert!(m.click(ClickRegion::Outside));
        assert!(!m.state().is_open());
    }

    #[test]
    fn selecting_a_link_closes_even_when_closed() {
        let mut m = menu(1);
        m.select_link();
        assert_eq!(m.state(), MenuState::Closed);
        assert_eq!(m.view().label, "MENU");
    }
}

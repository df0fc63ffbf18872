//! Section activation: which section is "current", which indicator is lit,
//! and navigation between sections.
//!
//! Activation is driven only by the scroll observer. Navigation requests ask
//! the surface to animate the window scroll and nothing else; the section
//! becomes active when the scroll actually carries the viewport across its
//! trigger.

use crate::config::{ScaleInPolicy, SiteConfig};
use crate::ease::Ease;
use crate::error::UiError;
use crate::glitch::{GlitchPulse, PulseTarget};
use crate::observer::{Band, Crossing, ScrollObserver, TriggerSpec};
use crate::tween::{Prop, TweenSpec};

/// Top at 90% down the viewport until the bottom leaves through the top.
const SCALE_IN_TRIGGER: TriggerSpec = TriggerSpec {
    start_fraction: 0.9,
    end_fraction: 0.0,
};

/// Everything the controller needs from the page.
pub trait SectionSurface {
    fn section_count(&self) -> usize;
    /// Current layout band of a section; `None` if it cannot be measured.
    fn section_band(&self, index: usize) -> Option<Band>;
    fn section_index(&self, id: &str) -> Option<usize>;
    fn indicator_count(&self) -> usize;
    fn set_indicator(&mut self, index: usize, active: bool);
    /// Make a section fully visible with no animation.
    fn reveal_section(&mut self, index: usize);
    fn scale_in(&mut self, index: usize, spec: TweenSpec);
    fn scroll_window(&mut self, offset: f64, duration_ms: f64, ease: Ease);
}

/// Where a navigation request came from; decides the scroll duration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NavOrigin {
    Indicator,
    MenuLink,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Role {
    Activation,
    ScaleIn,
}

pub struct SectionController<S, P> {
    surface: S,
    glitch: GlitchPulse<P>,
    observer: ScrollObserver,
    roles: Vec<Role>,
    active: Option<usize>,
    scaled: Vec<bool>,
    scale_in: ScaleInPolicy,
    header_offset: f64,
    indicator_scroll_ms: f64,
    menu_scroll_ms: f64,
}

impl<S: SectionSurface, P: PulseTarget> SectionController<S, P> {
    pub fn new(surface: S, pulse: P, config: &SiteConfig) -> Self {
        let count = surface.section_count();
        let mut observer = ScrollObserver::new();
        let mut roles = Vec::with_capacity(count * 2);
        for index in 0..count {
            observer.observe(index, TriggerSpec::CENTER);
            roles.push(Role::Activation);
            observer.observe(index, SCALE_IN_TRIGGER);
            roles.push(Role::ScaleIn);
        }
        Self {
            surface,
            glitch: GlitchPulse::new(pulse),
            observer,
            roles,
            active: None,
            scaled: vec![false; count],
            scale_in: config.scale_in,
            header_offset: config.header_offset,
            indicator_scroll_ms: config.indicator_scroll_ms,
            menu_scroll_ms: config.menu_scroll_ms,
        }
    }

    /// Show every section immediately, then evaluate the observer once at
    /// the current scroll position.
    pub fn init(&mut self, scroll_y: f64, viewport_h: f64) {
        for index in 0..self.surface.section_count() {
            self.surface.reveal_section(index);
        }
        self.on_scroll(scroll_y, viewport_h);
    }

    pub fn on_scroll(&mut self, scroll_y: f64, viewport_h: f64) {
        let surface = &self.surface;
        let crossings = self
            .observer
            .update(scroll_y, viewport_h, |index| surface.section_band(index));

        for (id, crossing) in crossings {
            let Some(index) = self.observer.subject(id) else {
                continue;
            };
            match (self.roles.get(id.index()), crossing) {
                (Some(Role::Activation), Crossing::Enter | Crossing::EnterBack) => {
                    self.activate(index);
                }
                (Some(Role::ScaleIn), Crossing::Enter) => self.play_scale_in(index),
                _ => {}
            }
        }
    }

    /// Mark `index` active. Re-entering the active section still restarts
    /// the glitch pulse.
    pub fn on_section_enter(&mut self, index: usize) -> Result<(), UiError> {
        let count = self.surface.section_count();
        if index >= count {
            return Err(UiError::SectionOutOfRange { index, count });
        }
        self.activate(index);
        Ok(())
    }

    /// Start scrolling so that section `index` sits just below the header.
    pub fn scroll_to(&mut self, index: usize, origin: NavOrigin) -> Result<(), UiError> {
        let band = self
            .surface
            .section_band(index)
            .ok_or(UiError::SectionOutOfRange {
                index,
                count: self.surface.section_count(),
            })?;
        let duration = match origin {
            NavOrigin::Indicator => self.indicator_scroll_ms,
            NavOrigin::MenuLink => self.menu_scroll_ms,
        };
        self.surface
            .scroll_window(band.top - self.header_offset, duration, Ease::Power3InOut);
        Ok(())
    }

    /// Resolve an in-page link target (`#about`) and scroll to it.
    pub fn scroll_to_target(&mut self, href: &str, origin: NavOrigin) -> Result<usize, UiError> {
        let id = href.strip_prefix('#').unwrap_or(href);
        let index = self
            .surface
            .section_index(id)
            .ok_or_else(|| UiError::UnknownSection(href.to_string()))?;
        self.scroll_to(index, origin)?;
        Ok(index)
    }

    pub fn active(&self) -> Option<usize> {
        self.active
    }

    pub fn glitch_restarts(&self) -> u64 {
        self.glitch.restarts()
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    fn activate(&mut self, index: usize) {
        self.active = Some(index);
        for i in 0..self.surface.indicator_count() {
            self.surface.set_indicator(i, i == index);
        }
        self.glitch.restart();
    }

    fn play_scale_in(&mut self, index: usize) {
        let Some(played) = self.scaled.get_mut(index) else {
            return;
        };
        if *played && self.scale_in == ScaleInPolicy::Once {
            return;
        }
        *played = true;
        self.surface.scale_in(
            index,
            TweenSpec::new(600.0, Ease::Power2Out).motion(Prop::Scale, 0.98, 1.0),
        );
    }
}

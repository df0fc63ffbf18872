//! Scroll observer: turns raw scroll positions into directional crossing
//! events per registered trigger.
//!
//! A trigger is active while `start <= scroll_y < end`, where
//!
//! ```text
//! start = band.top    - start_fraction * viewport_height
//! end   = band.bottom - end_fraction   * viewport_height
//! ```
//!
//! i.e. "the element's top reaches `start_fraction` down the viewport" until
//! "the element's bottom reaches `end_fraction` down the viewport".

/// Vertical extent of an element in document coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Band {
    pub top: f64,
    pub bottom: f64,
}

impl Band {
    pub fn new(top: f64, height: f64) -> Self {
        Self {
            top,
            bottom: top + height.max(0.0),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TriggerSpec {
    pub start_fraction: f64,
    pub end_fraction: f64,
}

impl TriggerSpec {
    /// Top at viewport centre until bottom at viewport centre.
    pub const CENTER: TriggerSpec = TriggerSpec {
        start_fraction: 0.5,
        end_fraction: 0.5,
    };

    pub fn window(&self, band: Band, viewport_h: f64) -> (f64, f64) {
        (
            band.top - self.start_fraction * viewport_h,
            band.bottom - self.end_fraction * viewport_h,
        )
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TriggerId(usize);

impl TriggerId {
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Crossing {
    /// Became active while scrolling forward.
    Enter,
    /// Left through the end while scrolling forward.
    Leave,
    /// Became active again while scrolling backward.
    EnterBack,
    /// Left through the start while scrolling backward.
    LeaveBack,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Zone {
    Before,
    Active,
    After,
}

struct Trigger {
    spec: TriggerSpec,
    subject: usize,
    zone: Option<Zone>,
}

/// Tracks every registered trigger's zone between updates.
#[derive(Default)]
pub struct ScrollObserver {
    triggers: Vec<Trigger>,
    last_scroll: Option<f64>,
}

impl ScrollObserver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a trigger bound to `subject` (the index the band callback is
    /// asked for on every update).
    pub fn observe(&mut self, subject: usize, spec: TriggerSpec) -> TriggerId {
        self.triggers.push(Trigger {
            spec,
            subject,
            zone: None,
        });
        TriggerId(self.triggers.len() - 1)
    }

    pub fn subject(&self, id: TriggerId) -> Option<usize> {
        self.triggers.get(id.0).map(|t| t.subject)
    }

    /// Re-evaluate every trigger at `scroll_y`.
    ///
    /// Crossings come back ordered along the direction of travel: ascending by
    /// band when scrolling forward, descending when scrolling back, so the
    /// last `Enter`/`EnterBack` belongs to the trigger the viewport actually
    /// settled in. Triggers whose band cannot be measured are skipped.
    pub fn update<F>(&mut self, scroll_y: f64, viewport_h: f64, band_of: F) -> Vec<(TriggerId, Crossing)>
    where
        F: Fn(usize) -> Option<Band>,
    {
        let forward = self.last_scroll.map_or(true, |last| scroll_y >= last);
        self.last_scroll = Some(scroll_y);

        let mut fired: Vec<(f64, TriggerId, Crossing)> = Vec::new();
        for (i, trigger) in self.triggers.iter_mut().enumerate() {
            let Some(band) = band_of(trigger.subject) else {
                continue;
            };
            let (start, end) = trigger.spec.window(band, viewport_h);
            let zone = if scroll_y < start {
                Zone::Before
            } else if scroll_y < end {
                Zone::Active
            } else {
                Zone::After
            };
            let previous = trigger.zone.replace(zone);
            for crossing in transition(previous, zone) {
                fired.push((band.top, TriggerId(i), crossing));
            }
        }

        fired.sort_by(|a, b| {
            let ord = a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal);
            if forward {
                ord
            } else {
                ord.reverse()
            }
        });
        fired.into_iter().map(|(_, id, c)| (id, c)).collect()
    }
}

fn transition(previous: Option<Zone>, next: Zone) -> Vec<Crossing> {
    use Crossing::*;
    match (previous, next) {
        // First evaluation behaves as if the page had scrolled down from the
        // very top to where it is now.
        (None, Zone::Before) => vec![],
        (None, Zone::Active) => vec![Enter],
        (None, Zone::After) => vec![Enter, Leave],
        (Some(a), b) if a == b => vec![],
        (Some(Zone::Before), Zone::Active) => vec![Enter],
        (Some(Zone::Before), Zone::After) => vec![Enter, Leave],
        (Some(Zone::Active), Zone::After) => vec![Leave],
        (Some(Zone::Active), Zone::Before) => vec![LeaveBack],
        (Some(Zone::After), Zone::Active) => vec![EnterBack],
        (Some(Zone::After), Zone::Before) => vec![EnterBack, LeaveBack],
        (Some(_), _) => vec![],
    }
}

//! Tween descriptions and the animation-driver seam.
//!
//! A [`TweenSpec`] is a pure description: which style properties move, from
//! where to where, over how long and along which curve. Sampling it at an
//! elapsed time yields a [`Frame`] the driver writes to the element. The
//! browser driver lives in the wasm layer; everything here runs on the host.

use crate::ease::Ease;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Prop {
    Opacity,
    Scale,
    TranslateY,
}

/// One property's path. `from: None` starts wherever the element is when the
/// tween begins; see [`TweenSpec::resolve`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Motion {
    pub prop: Prop,
    pub from: Option<f64>,
    pub to: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TweenSpec {
    pub motions: Vec<Motion>,
    pub duration_ms: f64,
    pub delay_ms: f64,
    pub ease: Ease,
}

impl TweenSpec {
    pub fn new(duration_ms: f64, ease: Ease) -> Self {
        Self {
            motions: Vec::new(),
            duration_ms: duration_ms.max(1.0),
            delay_ms: 0.0,
            ease,
        }
    }

    pub fn motion(mut self, prop: Prop, from: f64, to: f64) -> Self {
        self.motions.push(Motion {
            prop,
            from: Some(from),
            to,
        });
        self
    }

    /// Move `prop` to `to` from its current value.
    pub fn to(mut self, prop: Prop, to: f64) -> Self {
        self.motions.push(Motion {
            prop,
            from: None,
            to,
        });
        self
    }

    /// Fill in every open start value from `current`. Until resolved, an
    /// open motion samples as already at its target.
    pub fn resolve(mut self, current: impl Fn(Prop) -> f64) -> Self {
        for m in &mut self.motions {
            if m.from.is_none() {
                m.from = Some(current(m.prop));
            }
        }
        self
    }

    pub fn delay(mut self, delay_ms: f64) -> Self {
        self.delay_ms = delay_ms.max(0.0);
        self
    }

    pub fn touches(&self, prop: Prop) -> bool {
        self.motions.iter().any(|m| m.prop == prop)
    }

    /// Eased progress; zero while still inside the delay.
    pub fn progress(&self, elapsed_ms: f64) -> f64 {
        let t = (elapsed_ms - self.delay_ms) / self.duration_ms;
        self.ease.apply(t)
    }

    pub fn is_done(&self, elapsed_ms: f64) -> bool {
        elapsed_ms >= self.delay_ms + self.duration_ms
    }

    pub fn sample(&self, elapsed_ms: f64) -> Frame {
        let p = self.progress(elapsed_ms);
        let mut frame = Frame::default();
        for m in &self.motions {
            let from = m.from.unwrap_or(m.to);
            frame.set(m.prop, from + (m.to - from) * p);
        }
        frame
    }
}

/// Style values for one element at one instant. `None` leaves the property
/// alone.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Frame {
    pub opacity: Option<f64>,
    pub scale: Option<f64>,
    pub translate_y: Option<f64>,
}

impl Frame {
    pub fn with(mut self, prop: Prop, value: f64) -> Self {
        self.set(prop, value);
        self
    }

    pub fn set(&mut self, prop: Prop, value: f64) {
        match prop {
            Prop::Opacity => self.opacity = Some(value),
            Prop::Scale => self.scale = Some(value),
            Prop::TranslateY => self.translate_y = Some(value),
        }
    }

    pub fn get(&self, prop: Prop) -> Option<f64> {
        match prop {
            Prop::Opacity => self.opacity,
            Prop::Scale => self.scale,
            Prop::TranslateY => self.translate_y,
        }
    }

    /// CSS `transform` for the geometric properties, if any are set.
    pub fn transform(&self) -> Option<String> {
        let mut parts = Vec::new();
        if let Some(y) = self.translate_y {
            parts.push(format!("translateY({y}px)"));
        }
        if let Some(s) = self.scale {
            parts.push(format!("scale({s})"));
        }
        if parts.is_empty() {
            None
        } else {
            Some(parts.join(" "))
        }
    }
}

/// Scalar tween for the window scroll offset. Retargeting starts a fresh
/// tween from wherever the current one is, so a second navigation request
/// overwrites the first instead of queueing behind it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollTween {
    from: f64,
    to: f64,
    start_ms: f64,
    duration_ms: f64,
    ease: Ease,
}

impl ScrollTween {
    pub fn new(from: f64, to: f64, start_ms: f64, duration_ms: f64, ease: Ease) -> Self {
        Self {
            from,
            to,
            start_ms,
            duration_ms: duration_ms.max(1.0),
            ease,
        }
    }

    pub fn target(&self) -> f64 {
        self.to
    }

    pub fn is_done(&self, now_ms: f64) -> bool {
        now_ms - self.start_ms >= self.duration_ms
    }

    pub fn sample(&self, now_ms: f64) -> f64 {
        let t = (now_ms - self.start_ms) / self.duration_ms;
        let eased = self.ease.apply(t);
        (self.from + (self.to - self.from) * eased).max(0.0)
    }

    pub fn retarget(&mut self, now_ms: f64, to: f64, duration_ms: f64, ease: Ease) {
        let current = self.sample(now_ms);
        *self = Self::new(current, to, now_ms, duration_ms, ease);
    }
}

/// Animation-driver capability.
pub trait Animator {
    type Target;

    /// Start a tween on `target`, replacing any in-flight tween on the same
    /// target that moves the same properties.
    fn animate(
        &mut self,
        target: &Self::Target,
        spec: TweenSpec,
        on_complete: Option<Box<dyn FnOnce()>>,
    );

    /// Animate the window scroll offset. Overwrites any scroll in flight.
    fn animate_scroll(&mut self, offset: f64, duration_ms: f64, ease: Ease);

    fn set_immediate(&mut self, target: &Self::Target, frame: Frame);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delayed_tween_holds_start_values() {
        let spec = TweenSpec::new(600.0, Ease::Power3Out)
            .motion(Prop::Opacity, 0.0, 1.0)
            .motion(Prop::TranslateY, 40.0, 0.0)
            .delay(200.0);
        let frame = spec.sample(100.0);
        assert_eq!(frame.opacity, Some(0.0));
        assert_eq!(frame.translate_y, Some(40.0));
        assert!(!spec.is_done(700.0));
        assert!(spec.is_done(800.0));
        assert_eq!(spec.sample(800.0).opacity, Some(1.0));
    }

    #[test]
    fn open_motions_start_from_the_current_value() {
        let spec = TweenSpec::new(800.0, Ease::Linear)
            .to(Prop::Opacity, 1.0)
            .to(Prop::Scale, 1.0);
        assert_eq!(spec.sample(0.0).opacity, Some(1.0));

        let spec = spec.resolve(|prop| match prop {
            Prop::Opacity => 0.5,
            _ => 0.9,
        });
        let first = spec.sample(0.0);
        assert_eq!(first.opacity, Some(0.5));
        assert_eq!(first.scale, Some(0.9));
        assert_eq!(spec.sample(400.0).opacity, Some(0.75));
    }

    #[test]
    fn resolve_keeps_explicit_start_values() {
        let spec = TweenSpec::new(100.0, Ease::Linear)
            .motion(Prop::TranslateY, 40.0, 0.0)
            .resolve(|_| 7.0);
        assert_eq!(spec.sample(0.0).translate_y, Some(40.0));
    }

    #[test]
    fn transform_composes_translate_then_scale() {
        let frame = Frame::default()
            .with(Prop::TranslateY, 20.0)
            .with(Prop::Scale, 0.98);
        assert_eq!(
            frame.transform().as_deref(),
            Some("translateY(20px) scale(0.98)")
        );
        assert_eq!(Frame::default().with(Prop::Opacity, 1.0).transform(), None);
    }

    #[test]
    fn scroll_retarget_continues_from_current_position() {
        let mut tween = ScrollTween::new(0.0, 1000.0, 0.0, 1000.0, Ease::Linear);
        assert_eq!(tween.sample(250.0), 250.0);
        tween.retarget(250.0, 0.0, 500.0, Ease::Linear);
        assert_eq!(tween.target(), 0.0);
        assert_eq!(tween.sample(250.0), 250.0);
        assert_eq!(tween.sample(500.0), 125.0);
        assert!(tween.is_done(750.0));
    }

    #[test]
    fn scroll_never_goes_negative() {
        let tween = ScrollTween::new(50.0, -100.0, 0.0, 100.0, Ease::Linear);
        assert_eq!(tween.sample(100.0), 0.0);
    }
}

//! Loading-screen hand-off: fade the loader out, then bring in the landing
//! section and its split headline characters.

use crate::ease::Ease;
use crate::tween::{Animator, Frame, Prop, TweenSpec};

pub const LOADER_FADE_MS: f64 = 600.0;
pub const HOME_REVEAL_MS: f64 = 800.0;
pub const CHAR_STAGGER_MS: f64 = 20.0;

pub fn loader_fade() -> TweenSpec {
    TweenSpec::new(LOADER_FADE_MS, Ease::Power2InOut).motion(Prop::Opacity, 1.0, 0.0)
}

/// The landing section settles at full opacity and scale from wherever it is.
pub fn home_reveal() -> TweenSpec {
    TweenSpec::new(HOME_REVEAL_MS, Ease::Power2Out)
        .to(Prop::Opacity, 1.0)
        .to(Prop::Scale, 1.0)
}

/// Headline characters rise 20px and fade in, one after the other.
pub fn char_rise(index: usize) -> TweenSpec {
    TweenSpec::new(HOME_REVEAL_MS, Ease::ExpoOut)
        .motion(Prop::TranslateY, 20.0, 0.0)
        .motion(Prop::Opacity, 0.0, 1.0)
        .delay(index as f64 * CHAR_STAGGER_MS)
}

/// Second half of the transition, run once the loader is gone.
pub fn reveal_home<A: Animator>(animator: &mut A, home: &A::Target, chars: &[A::Target]) {
    animator.animate(home, home_reveal(), None);
    for (index, ch) in chars.iter().enumerate() {
        animator.set_immediate(ch, Frame::default().with(Prop::Opacity, 0.0));
        animator.animate(ch, char_rise(index), None);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Log(Vec<(u32, f64)>);

    impl Animator for Log {
        type Target = u32;

        fn animate(&mut self, target: &u32, spec: TweenSpec, _done: Option<Box<dyn FnOnce()>>) {
            self.0.push((*target, spec.delay_ms));
        }

        fn animate_scroll(&mut self, _offset: f64, _duration_ms: f64, _ease: Ease) {}

        fn set_immediate(&mut self, _target: &u32, _frame: Frame) {}
    }

    #[test]
    fn chars_are_staggered_after_home() {
        let mut log = Log::default();
        reveal_home(&mut log, &0, &[1, 2, 3]);
        assert_eq!(log.0, vec![(0, 0.0), (1, 0.0), (2, 20.0), (3, 40.0)]);
    }

    #[test]
    fn home_reveal_does_not_hide_a_visible_section() {
        let first = home_reveal().sample(0.0);
        assert_eq!(first.opacity, Some(1.0));
        assert_eq!(first.scale, Some(1.0));

        // section already shown, slightly shrunk by an earlier scale-in
        let spec = home_reveal().resolve(|prop| match prop {
            Prop::Scale => 0.98,
            _ => 1.0,
        });
        assert_eq!(spec.sample(0.0).opacity, Some(1.0));
        assert_eq!(spec.sample(0.0).scale, Some(0.98));
        assert_eq!(spec.sample(HOME_REVEAL_MS).scale, Some(1.0));
    }

    #[test]
    fn fade_ends_transparent() {
        let fade = loader_fade();
        assert_eq!(fade.sample(LOADER_FADE_MS).opacity, Some(0.0));
    }
}

/// Easing curves used by the tween driver. `PowerN` follows the usual tweening
/// convention where power2 is cubic and power3 is quartic.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Ease {
    Linear,
    Power2Out,
    Power2InOut,
    Power3Out,
    Power3InOut,
    ExpoOut,
}

impl Ease {
    /// Map linear progress `t` in `[0, 1]` onto the curve.
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Ease::Linear => t,
            Ease::Power2Out => out(t, 3),
            Ease::Power2InOut => in_out(t, 3),
            Ease::Power3Out => out(t, 4),
            Ease::Power3InOut => in_out(t, 4),
            Ease::ExpoOut => {
                if t >= 1.0 {
                    1.0
                } else {
                    1.0 - 2f64.powf(-10.0 * t)
                }
            }
        }
    }
}

fn out(t: f64, power: i32) -> f64 {
    1.0 - (1.0 - t).powi(power)
}

fn in_out(t: f64, power: i32) -> f64 {
    if t < 0.5 {
        (2.0 * t).powi(power) / 2.0
    } else {
        1.0 - (2.0 * (1.0 - t)).powi(power) / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Ease; 6] = [
        Ease::Linear,
        Ease::Power2Out,
        Ease::Power2InOut,
        Ease::Power3Out,
        Ease::Power3InOut,
        Ease::ExpoOut,
    ];

    #[test]
    fn curves_are_pinned_at_both_ends() {
        for ease in ALL {
            assert!(ease.apply(0.0).abs() < 1e-9, "{ease:?} at 0");
            assert!((ease.apply(1.0) - 1.0).abs() < 1e-9, "{ease:?} at 1");
        }
    }

    #[test]
    fn in_out_is_symmetric_around_midpoint() {
        for ease in [Ease::Power2InOut, Ease::Power3InOut] {
            assert!((ease.apply(0.5) - 0.5).abs() < 1e-9);
            let a = ease.apply(0.2);
            let b = ease.apply(0.8);
            assert!((a + b - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn out_curves_front_load_progress() {
        assert!(Ease::Power3Out.apply(0.25) > 0.25);
        assert!(Ease::ExpoOut.apply(0.25) > Ease::Power2Out.apply(0.25) * 0.9);
    }

    #[test]
    fn progress_outside_unit_range_is_clamped() {
        assert_eq!(Ease::Power3InOut.apply(-1.0), 0.0);
        assert_eq!(Ease::Power3InOut.apply(3.0), 1.0);
    }
}

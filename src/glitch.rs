/// Rendering side of a restartable pulse: a class that can be switched off
/// and on, and a way to make the renderer notice the "off" before the "on".
pub trait PulseTarget {
    fn set_armed(&mut self, armed: bool);
    /// Force pending style changes to be applied (a layout flush in the DOM).
    fn flush(&mut self);
}

/// A visual cue that restarts from the beginning every time it is fired,
/// even if the previous run already completed.
pub struct GlitchPulse<P> {
    target: P,
    restarts: u64,
}

impl<P: PulseTarget> GlitchPulse<P> {
    pub fn new(target: P) -> Self {
        Self {
            target,
            restarts: 0,
        }
    }

    pub fn restart(&mut self) {
        self.target.set_armed(false);
        self.target.flush();
        self.target.set_armed(true);
        self.restarts += 1;
    }

    pub fn restarts(&self) -> u64 {
        self.restarts
    }

    pub fn target(&self) -> &P {
        &self.target
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder(Vec<&'static str>);

    impl PulseTarget for Recorder {
        fn set_armed(&mut self, armed: bool) {
            self.0.push(if armed { "on" } else { "off" });
        }

        fn flush(&mut self) {
            self.0.push("flush");
        }
    }

    #[test]
    fn restart_flushes_between_off_and_on() {
        let mut pulse = GlitchPulse::new(Recorder::default());
        pulse.restart();
        pulse.restart();
        assert_eq!(pulse.restarts(), 2);
        assert_eq!(
            pulse.target().0,
            vec!["off", "flush", "on", "off", "flush", "on"]
        );
    }
}

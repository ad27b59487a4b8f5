//! Easing curves for animation frames.

use std::{f64::consts::PI, str::FromStr, time::Duration};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Easing {
    Linear,
    /// Slow start and slow arrival, like jQuery's default.
    #[default]
    Swing,
}

impl Easing {
    /// Map the progress `0.0..=1.0` to the eased progress.
    pub fn apply(self, progress: f64) -> f64 {
        let progress = progress.clamp(0.0, 1.0);
        match self {
            Self::Linear => progress,
            Self::Swing => 0.5 - (progress * PI).cos() / 2.0,
        }
    }

    /// Get the position after `elapsed` of a journey from `from` to `to` taking `duration`.
    pub fn position(self, from: f64, to: f64, elapsed: Duration, duration: Duration) -> f64 {
        if elapsed >= duration {
            return to;
        }
        let progress = elapsed.as_secs_f64() / duration.as_secs_f64();
        from + (to - from) * self.apply(progress)
    }
}

impl FromStr for Easing {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "linear" => Ok(Self::Linear),
            "swing" => Ok(Self::Swing),
            _ => Err(format!("unknown easing: {s}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use crate::easing::Easing;

    #[test]
    fn test_apply() {
        assert_eq!(Easing::Linear.apply(0.25), 0.25);
        assert!(Easing::Swing.apply(0.0).abs() < 1e-9);
        assert!((Easing::Swing.apply(0.5) - 0.5).abs() < 1e-9);
        assert!((Easing::Swing.apply(1.0) - 1.0).abs() < 1e-9);
        assert!(Easing::Swing.apply(0.1) < 0.1);
        assert_eq!(Easing::Linear.apply(2.0), 1.0);
    }

    #[test]
    fn test_position() {
        let second = Duration::from_secs(1);
        assert_eq!(
            Easing::Linear.position(-80.0, 120.0, Duration::from_millis(500), second),
            20.0
        );
        assert_eq!(Easing::Swing.position(-80.0, 120.0, second, second), 120.0);
        assert_eq!(
            Easing::Swing.position(10.0, 10.0, Duration::ZERO, Duration::ZERO),
            10.0
        );
        assert_eq!(Easing::Swing.position(0.0, 50.0, Duration::ZERO, second), 0.0);
    }

    #[test]
    fn test_from_str() {
        assert_eq!("linear".parse::<Easing>(), Ok(Easing::Linear));
        assert_eq!("swing".parse::<Easing>(), Ok(Easing::Swing));
        assert!("bounce".parse::<Easing>().is_err());
    }
}

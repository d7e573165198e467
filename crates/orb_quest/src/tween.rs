use strum::{EnumCount, EnumIter};

/// Signature shared by every easing curve: time fraction in, progress out.
pub type EasingFn = fn(f64) -> f64;

/// Shape of a transformation's progress over its lifetime.
///
/// The curves are cubic fits. Progress is not clamped, `WindupOvershoot`
/// dips below zero and passes one before settling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, EnumIter, EnumCount)]
pub enum Easing {
    #[default]
    Linear,
    WindupOvershoot,
    EaseBoth,
}

impl Easing {
    pub const fn function(self) -> EasingFn {
        match self {
            Self::Linear => linear,
            Self::WindupOvershoot => windup_overshoot,
            Self::EaseBoth => ease_both,
        }
    }

    pub fn apply(self, fraction: f64) -> f64 {
        (self.function())(fraction)
    }
}

pub const fn linear(fraction: f64) -> f64 {
    fraction
}

/// `-4.586466f³ + 6.842106f² - 1.25564f`
pub fn windup_overshoot(fraction: f64) -> f64 {
    (-4.586466f64).mul_add(fraction, 6.842106).mul_add(fraction, -1.25564) * fraction
}

/// `-2.3158484f³ + 3.5488129f² - 0.23296452f`
pub fn ease_both(fraction: f64) -> f64 {
    (-2.3158484f64).mul_add(fraction, 3.5488129).mul_add(fraction, -0.23296452) * fraction
}

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator;

    use super::*;

    const TOLERANCE: f64 = 1e-6;

    #[test]
    fn every_curve_starts_at_zero_and_ends_at_one() {
        for easing in Easing::iter() {
            assert!(
                easing.apply(0.0).abs() < TOLERANCE,
                "{easing:?} should start at 0"
            );
            assert!(
                (easing.apply(1.0) - 1.0).abs() < TOLERANCE,
                "{easing:?} should end at 1, got {}",
                easing.apply(1.0)
            );
        }
    }

    #[test]
    fn windup_dips_below_zero_then_overshoots() {
        assert!(
            windup_overshoot(0.05) < 0.0,
            "the wind-up pulls back before moving forward"
        );
        assert!(
            windup_overshoot(0.8) > 1.0,
            "the curve passes its target before settling"
        );
    }

    #[test]
    fn ease_both_matches_polynomial() {
        let f = 0.5f64;
        let expected = -2.3158484 * f.powi(3) + 3.5488129 * f.powi(2) - 0.23296452 * f;
        assert!(
            (ease_both(f) - expected).abs() < TOLERANCE,
            "Horner form matches the expanded cubic"
        );
    }

    #[test]
    fn selector_maps_to_function() {
        assert_eq!(Easing::Linear.apply(0.25), 0.25, "linear is the identity");
        assert_eq!(
            Easing::WindupOvershoot.apply(0.3),
            windup_overshoot(0.3),
            "selector dispatches to the matching curve"
        );
        assert_eq!(Easing::COUNT, 3, "three curves are available");
    }
}

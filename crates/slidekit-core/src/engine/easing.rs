//! Pure easing curves mapping progress [0, 1] to travelled fraction [0, 1].

pub use crate::config::EasingType;

impl EasingType {
    /// Apply the easing function to a progress value
    ///
    /// # Arguments
    /// * `t` - Progress value in range [0, 1]
    ///
    /// # Returns
    /// Eased value in range [0, 1]
    #[inline]
    pub fn apply(&self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            EasingType::None => {
                if t < 1.0 {
                    0.0
                } else {
                    1.0
                }
            }
            EasingType::Linear => t,
            EasingType::QuadOut => power_ease_out(t, 2),
            EasingType::Cubic => power_ease_out(t, 3),
            EasingType::Quintic => power_ease_out(t, 5),
            EasingType::EaseOut => exponential_ease_out(t),
        }
    }
}

/// `1 - (1 - t)^power`, the ease-out family used for snaps and glides
#[inline]
fn power_ease_out(t: f64, power: i32) -> f64 {
    1.0 - (1.0 - t).powi(power)
}

#[inline]
fn exponential_ease_out(t: f64) -> f64 {
    if t >= 1.0 {
        1.0
    } else {
        1.0 - (-10.0 * t).exp2()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [EasingType; 6] = [
        EasingType::None,
        EasingType::Linear,
        EasingType::Cubic,
        EasingType::Quintic,
        EasingType::EaseOut,
        EasingType::QuadOut,
    ];

    #[test]
    fn test_easing_boundaries() {
        for easing in ALL {
            // t=0 should give 0
            assert!((easing.apply(0.0) - 0.0).abs() < 0.001, "{:?} at t=0", easing);
            // t=1 should give 1
            assert!((easing.apply(1.0) - 1.0).abs() < 0.001, "{:?} at t=1", easing);
        }
    }

    #[test]
    fn test_easing_monotonic() {
        for easing in ALL {
            let mut prev = 0.0;
            for i in 0..=10 {
                let t = i as f64 / 10.0;
                let v = easing.apply(t);
                assert!(v >= prev, "{:?} not monotonic at t={}", easing, t);
                prev = v;
            }
        }
    }

    #[test]
    fn test_quintic_matches_snap_curve() {
        for i in 0..=20 {
            let t = i as f64 / 20.0;
            let snap = 1.0 + (t - 1.0).powi(5);
            assert!((EasingType::Quintic.apply(t) - snap).abs() < 1e-12);
        }
    }

    #[test]
    fn test_quad_and_cubic_curves() {
        for i in 0..=20 {
            let t = i as f64 / 20.0;
            assert!((EasingType::QuadOut.apply(t) - t * (2.0 - t)).abs() < 1e-12);
            assert!((EasingType::Cubic.apply(t) - (1.0 - (1.0 - t).powi(3))).abs() < 1e-12);
        }
        assert!((EasingType::EaseOut.apply(0.1) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_out_of_range_progress_is_clamped() {
        assert_eq!(EasingType::QuadOut.apply(1.5), 1.0);
        assert_eq!(EasingType::Linear.apply(-0.5), 0.0);
    }
}

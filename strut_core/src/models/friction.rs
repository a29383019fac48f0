// strut_core/src/models/friction.rs

use serde::Deserialize;

use crate::error::{non_negative, positive, ConfigError, ConfigResult};

/// A piecewise-linear tire friction curve.
///
/// Maps a normalized slip ratio to a friction force magnitude. The curve rises
/// linearly from zero to `extremum_value` at `extremum_slip`, then falls
/// linearly through `asymptote_value` at `asymptote_slip` and keeps falling
/// past it. The result is scaled by `stiffness` and never negative.
///
/// Only valid curves can be built: `asymptote_slip` must exceed
/// `extremum_slip`, otherwise the falling segment divides by zero.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(try_from = "FrictionCurveParams")]
pub struct FrictionCurve {
    extremum_slip: f64,
    extremum_value: f64,
    asymptote_slip: f64,
    asymptote_value: f64,
    stiffness: f64,
}

/// Unvalidated curve parameters, as they appear in configuration files.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct FrictionCurveParams {
    pub extremum_slip: f64,
    pub extremum_value: f64,
    pub asymptote_slip: f64,
    pub asymptote_value: f64,
    pub stiffness: f64,
}

impl Default for FrictionCurveParams {
    fn default() -> Self {
        Self {
            extremum_slip: 1.0,
            extremum_value: 1.0,
            asymptote_slip: 2.0,
            asymptote_value: 0.5,
            stiffness: 1.0,
        }
    }
}

impl TryFrom<FrictionCurveParams> for FrictionCurve {
    type Error = ConfigError;

    fn try_from(p: FrictionCurveParams) -> ConfigResult<Self> {
        FrictionCurve::new(
            p.extremum_slip,
            p.extremum_value,
            p.asymptote_slip,
            p.asymptote_value,
            p.stiffness,
        )
    }
}

impl FrictionCurve {
    pub fn new(
        extremum_slip: f64,
        extremum_value: f64,
        asymptote_slip: f64,
        asymptote_value: f64,
        stiffness: f64,
    ) -> ConfigResult<Self> {
        positive("extremum_slip", extremum_slip)?;
        non_negative("extremum_value", extremum_value)?;
        positive("asymptote_slip", asymptote_slip)?;
        non_negative("asymptote_value", asymptote_value)?;
        non_negative("stiffness", stiffness)?;

        if asymptote_slip <= extremum_slip {
            return Err(ConfigError::DegenerateFrictionCurve {
                extremum: extremum_slip,
                asymptote: asymptote_slip,
            });
        }

        Ok(Self {
            extremum_slip,
            extremum_value,
            asymptote_slip,
            asymptote_value,
            stiffness,
        })
    }

    /// Friction force magnitude for a slip ratio.
    ///
    /// `slip` is expected to be non-negative: callers pass the absolute slip
    /// and reapply its sign to the resulting force.
    pub fn evaluate(&self, slip: f64) -> f64 {
        let value = if slip <= self.extremum_slip {
            (slip / self.extremum_slip) * self.extremum_value
        } else {
            let t = (slip - self.extremum_slip) / (self.asymptote_slip - self.extremum_slip);
            self.extremum_value - t * (self.extremum_value - self.asymptote_value)
        };

        (value * self.stiffness).max(0.0)
    }

    pub fn extremum_slip(&self) -> f64 {
        self.extremum_slip
    }

    pub fn extremum_value(&self) -> f64 {
        self.extremum_value
    }

    pub fn asymptote_slip(&self) -> f64 {
        self.asymptote_slip
    }

    pub fn asymptote_value(&self) -> f64 {
        self.asymptote_value
    }

    pub fn stiffness(&self) -> f64 {
        self.stiffness
    }
}

impl Default for FrictionCurve {
    fn default() -> Self {
        let p = FrictionCurveParams::default();
        Self {
            extremum_slip: p.extremum_slip,
            extremum_value: p.extremum_value,
            asymptote_slip: p.asymptote_slip,
            asymptote_value: p.asymptote_value,
            stiffness: p.stiffness,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn default_curve_matches_reference_points() {
        let curve = FrictionCurve::default();
        assert_relative_eq!(curve.evaluate(0.0), 0.0);
        assert_relative_eq!(curve.evaluate(0.5), 0.5);
        assert_relative_eq!(curve.evaluate(1.0), 1.0);
        assert_relative_eq!(curve.evaluate(1.5), 0.75);
        assert_relative_eq!(curve.evaluate(2.0), 0.5);
        // Past the asymptote the curve keeps falling linearly until the floor.
        assert_relative_eq!(curve.evaluate(2.5), 0.25);
        assert_relative_eq!(curve.evaluate(3.0), 0.0);
    }

    #[test]
    fn clamps_at_zero_far_past_the_asymptote() {
        let curve = FrictionCurve::default();
        assert_eq!(curve.evaluate(4.0), 0.0);
        assert_eq!(curve.evaluate(100.0), 0.0);
    }

    #[test]
    fn stiffness_scales_the_curve() {
        let curve = FrictionCurve::new(0.4, 2.0, 0.8, 1.0, 3.0).unwrap();
        assert_relative_eq!(curve.evaluate(0.0), 0.0);
        assert_relative_eq!(curve.evaluate(0.4), 2.0 * 3.0);
        assert_relative_eq!(curve.evaluate(0.8), 1.0 * 3.0);

        let slick = FrictionCurve::new(0.4, 2.0, 0.8, 1.0, 0.0).unwrap();
        assert_eq!(slick.evaluate(0.4), 0.0);
    }

    #[test]
    fn rises_monotonically_up_to_the_extremum() {
        let curve = FrictionCurve::new(0.3, 1.2, 1.0, 0.6, 1.5).unwrap();
        let mut previous = curve.evaluate(0.0);
        for i in 1..=30 {
            let value = curve.evaluate(i as f64 * 0.01);
            assert!(value > previous, "not rising at slip {}", i as f64 * 0.01);
            previous = value;
        }
    }

    #[test]
    fn never_negative() {
        let curve = FrictionCurve::new(0.2, 0.8, 0.5, 0.0, 2.0).unwrap();
        for i in 0..200 {
            assert!(curve.evaluate(i as f64 * 0.05) >= 0.0);
        }
    }

    #[test]
    fn rejects_degenerate_curves() {
        assert_eq!(
            FrictionCurve::new(1.0, 1.0, 1.0, 0.5, 1.0),
            Err(ConfigError::DegenerateFrictionCurve {
                extremum: 1.0,
                asymptote: 1.0
            })
        );
        assert!(FrictionCurve::new(2.0, 1.0, 1.0, 0.5, 1.0).is_err());
        assert!(matches!(
            FrictionCurve::new(0.0, 1.0, 2.0, 0.5, 1.0),
            Err(ConfigError::NotPositive { field: "extremum_slip", .. })
        ));
        assert!(matches!(
            FrictionCurve::new(1.0, 1.0, 2.0, 0.5, -1.0),
            Err(ConfigError::Negative { field: "stiffness", .. })
        ));
        assert!(matches!(
            FrictionCurve::new(1.0, f64::NAN, 2.0, 0.5, 1.0),
            Err(ConfigError::NotFinite { field: "extremum_value", .. })
        ));
    }

    #[test]
    fn params_are_validated_on_conversion() {
        let params = FrictionCurveParams {
            extremum_slip: 0.25,
            extremum_value: 1.1,
            asymptote_slip: 0.9,
            asymptote_value: 0.7,
            stiffness: 1.3,
        };
        assert_eq!(
            FrictionCurve::try_from(params),
            FrictionCurve::new(0.25, 1.1, 0.9, 0.7, 1.3)
        );
        let inverted = FrictionCurveParams {
            asymptote_slip: 0.1,
            ..params
        };
        assert!(FrictionCurve::try_from(inverted).is_err());
    }
}

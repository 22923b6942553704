//! Logistic storage curve described by the guarded parameters
//!
//! The four fields parameterise a logistic projection of cumulative
//! storage: `Q0` at the start, growing toward `Qmax` at rate `r`, with the
//! storage rate peaking in year `tp`. With `C = Qmax - Q0` and
//! `x = exp(r * (tp - t))`:
//!
//! - cumulative: `Q0 + C / (1 + x)`
//! - rate: `C * r * x / (1 + x)^2`
//!
//! The rate curve has its own inflection points `ln(2 + sqrt 3) / r` years
//! either side of the peak.
//!
//! The cumulative curve is anchored at `Q0`: it starts there and levels off
//! at `Qmax`. The rate-target projections in [`crate::fit`] instead plot only
//! the growth `C / (1 + x)` above their own starting offset, which is the
//! same curve shifted down by `Q0`. Rates are identical in both forms.

use crate::error::{FormGuardError, Result};
use formguard_core::{validate_with, Field, FormValues, Rules};
use serde::Serialize;

/// A logistic projection built from validated parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LogisticCurve {
    q0: f64,
    qmax: f64,
    r: f64,
    tp: f64,
}

/// One yearly point of a projection
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CurvePoint {
    pub year: i32,
    pub cumulative: f64,
    pub rate: f64,
}

/// Headline figures for a projection
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CurveSummary {
    pub q0: f64,
    pub qmax: f64,
    pub r: f64,
    pub tp: f64,
    /// Storage rate at the peak year
    pub peak_rate: f64,
    /// Rate-curve inflection before the peak
    pub rising_inflection: f64,
    /// Rate-curve inflection after the peak
    pub falling_inflection: f64,
}

/// Build under the default page rules
impl TryFrom<FormValues> for LogisticCurve {
    type Error = FormGuardError;

    fn try_from(values: FormValues) -> Result<Self> {
        Self::with_rules(values, &Rules::DEFAULT)
    }
}

impl LogisticCurve {
    /// Build from values accepted under `rules`
    ///
    /// Loose coercion lets `Infinity` through validation; a curve needs
    /// every parameter finite, so those are rejected here.
    pub fn with_rules(values: FormValues, rules: &Rules) -> Result<Self> {
        validate_with(&values, rules).map_err(FormGuardError::Rejected)?;

        if let Some(field) = Field::ALL
            .into_iter()
            .find(|field| !values.get(*field).is_finite())
        {
            return Err(FormGuardError::NonFinite(field));
        }

        Ok(Self {
            q0: values.q0,
            qmax: values.qmax,
            r: values.r,
            tp: values.tp,
        })
    }

    /// Storage still to come: `Qmax - Q0`
    pub fn capacity(&self) -> f64 {
        self.qmax - self.q0
    }

    fn growth_term(&self, t: f64) -> f64 {
        (self.r * (self.tp - t)).exp()
    }

    /// Cumulative storage at time `t`
    pub fn cumulative(&self, t: f64) -> f64 {
        self.q0 + self.capacity() / (1.0 + self.growth_term(t))
    }

    /// Storage rate at time `t`
    pub fn rate(&self, t: f64) -> f64 {
        let x = self.growth_term(t);
        if x.is_infinite() {
            return 0.0;
        }
        self.capacity() * self.r * x / (1.0 + x).powi(2)
    }

    /// Highest storage rate, reached at `tp`
    pub fn peak_rate(&self) -> f64 {
        self.capacity() * self.r / 4.0
    }

    /// Inflection times of the rate curve, before and after the peak
    pub fn rate_inflections(&self) -> (f64, f64) {
        let offset = (2.0 + 3.0_f64.sqrt()).ln() / self.r;
        (self.tp - offset, self.tp + offset)
    }

    /// Yearly points from `from` to `to`, both inclusive
    pub fn sample(&self, from: i32, to: i32) -> Vec<CurvePoint> {
        (from..=to)
            .map(|year| {
                let t = f64::from(year);
                CurvePoint {
                    year,
                    cumulative: self.cumulative(t),
                    rate: self.rate(t),
                }
            })
            .collect()
    }

    pub fn summary(&self) -> CurveSummary {
        let (rising_inflection, falling_inflection) = self.rate_inflections();
        CurveSummary {
            q0: self.q0,
            qmax: self.qmax,
            r: self.r,
            tp: self.tp,
            peak_rate: self.peak_rate(),
            rising_inflection,
            falling_inflection,
        }
    }
}

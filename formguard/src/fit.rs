//! Rate-target fitting for logistic storage projections
//!
//! For each candidate growth rate, a grid search finds the peak year and
//! ultimate storage whose logistic curve
//!
//! 1. passes through the starting cumulative storage in the starting year, and
//! 2. delivers the target storage rate in the target year.
//!
//! Peak years are searched on a linear grid, ultimate storage on a
//! logarithmic grid. Step 1 picks, for every storage candidate, the peak
//! year minimising `(p - start_q)^2`; step 2 picks the storage candidate
//! minimising `(target_s - q)^2`. Ties go to the earliest grid point.
//!
//! [`project_rates`] then turns each fitted curve into a yearly
//! storage-rate series starting at the year the rate changes.

use crate::error::{FormGuardError, Result};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Intercept of the exponential fit to historical cumulative storage
///
/// Cumulative storage in year `y` is taken as `exp(w * y - HISTORIC_INTERCEPT)`.
pub const HISTORIC_INTERCEPT: f64 = 182.643_172_1;

/// Rate projections run up to, but not including, this year
pub const PROJECTION_END_YEAR: i32 = 2150;

/// An evenly spaced grid given as `start,stop,count`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sweep {
    pub start: f64,
    pub stop: f64,
    pub count: usize,
}

impl Sweep {
    pub fn new(start: f64, stop: f64, count: usize) -> Self {
        Self { start, stop, count }
    }

    /// `count` points from `start` to `stop`, both inclusive
    pub fn linear(&self) -> Vec<f64> {
        match self.count {
            0 => Vec::new(),
            1 => vec![self.start],
            n => {
                let step = (self.stop - self.start) / (n - 1) as f64;
                let mut points: Vec<f64> =
                    (0..n).map(|i| self.start + step * i as f64).collect();
                points[n - 1] = self.stop;
                points
            }
        }
    }

    /// `count` points spaced evenly in log10 between `start` and `stop`
    pub fn logarithmic(&self) -> Vec<f64> {
        Sweep::new(self.start.log10(), self.stop.log10(), self.count)
            .linear()
            .into_iter()
            .map(|exponent| 10f64.powf(exponent))
            .collect()
    }
}

impl FromStr for Sweep {
    type Err = FormGuardError;

    fn from_str(s: &str) -> Result<Self> {
        let parts = parse_list(s)?;
        let [start, stop, count] = parts[..] else {
            return Err(FormGuardError::Fit(format!(
                "sweep {s:?} must be start,stop,count"
            )));
        };

        if !(count >= 1.0 && count.is_finite()) {
            return Err(FormGuardError::Fit(format!(
                "sweep {s:?} needs a count of at least 1"
            )));
        }

        // Fractional counts truncate
        Ok(Sweep::new(start, stop, count as usize))
    }
}

/// Parse a comma-separated list of numbers
pub fn parse_list(s: &str) -> Result<Vec<f64>> {
    s.split(',')
        .map(|part| {
            part.trim()
                .parse::<f64>()
                .map_err(|_| FormGuardError::Fit(format!("{part:?} is not a number")))
        })
        .collect()
}

/// Inputs of a rate-target fit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FitRequest {
    /// Year the starting storage was observed
    pub start_year: f64,
    /// Cumulative storage in the starting year
    pub start_q: f64,
    /// Year the target rate must be met
    pub target_year: f64,
    /// Storage rate required in the target year
    pub target_s: f64,
    /// Candidate peak years (linear grid)
    pub peak_years: Sweep,
    /// Candidate ultimate storage (logarithmic grid)
    pub totals: Sweep,
    /// Growth rates to fit, one result each
    pub rates: Vec<f64>,
}

/// Best grid point for one growth rate
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FitResult {
    pub rate: f64,
    pub peak_year: f64,
    pub total_stored: f64,
}

impl FitRequest {
    fn check(&self) -> Result<()> {
        if self.rates.is_empty() {
            return Err(FormGuardError::Fit("no growth rates given".to_string()));
        }
        if let Some(rate) = self.rates.iter().find(|r| !(r.is_finite() && **r > 0.0)) {
            return Err(FormGuardError::Fit(format!(
                "growth rate {rate} must be positive and finite"
            )));
        }
        if !(self.totals.start > 0.0 && self.totals.stop > 0.0) {
            return Err(FormGuardError::Fit(
                "storage grid bounds must be positive".to_string(),
            ));
        }
        if self.peak_years.count == 0 || self.totals.count == 0 {
            return Err(FormGuardError::Fit("grids must not be empty".to_string()));
        }
        Ok(())
    }

    /// Fit every growth rate against the grids
    pub fn fit(&self) -> Result<Vec<FitResult>> {
        self.check()?;

        let peak_years = self.peak_years.linear();
        let totals = self.totals.logarithmic();

        let results = self
            .rates
            .iter()
            .map(|&rate| self.fit_rate(rate, &peak_years, &totals))
            .collect();

        Ok(results)
    }

    fn fit_rate(&self, rate: f64, peak_years: &[f64], totals: &[f64]) -> FitResult {
        let best_peaks: Vec<f64> = totals
            .iter()
            .map(|&total| {
                let misfit = peak_years.iter().map(|&peak| {
                    let p = (total - self.start_q) / (1.0 + (rate * (peak - self.start_year)).exp());
                    (p - self.start_q).powi(2)
                });
                peak_years[argmin(misfit)]
            })
            .collect();

        let rate_misfit = totals.iter().zip(&best_peaks).map(|(&total, &peak)| {
            let x = (rate * (peak - self.target_year)).exp();
            let q = (total - self.start_q) * rate * x / (1.0 + x).powi(2);
            (self.target_s - q).powi(2)
        });
        let best = argmin(rate_misfit);

        FitResult {
            rate,
            peak_year: best_peaks[best],
            total_stored: totals[best],
        }
    }
}

/// Index of the first smallest value; NaN never wins
fn argmin(values: impl Iterator<Item = f64>) -> usize {
    let mut best = (0, f64::INFINITY);
    for (i, value) in values.enumerate() {
        if value < best.1 {
            best = (i, value);
        }
    }
    best.0
}

/// Cumulative storage implied by the historical trend in `year`
pub fn historic_cumulative(year: i32, w: f64) -> f64 {
    (f64::from(year) * w - HISTORIC_INTERCEPT).exp()
}

/// Storage-rate projection for one fitted curve
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RateProjection {
    pub rate: f64,
    /// Rising inflection of the rate curve
    pub inflection_time: f64,
    pub first_year: i32,
    /// One rate per year from `first_year` up to [`PROJECTION_END_YEAR`]
    pub storage_rates: Vec<f64>,
}

/// Project yearly storage rates from `year_rate_change` for each fit
///
/// Each curve grows the fitted total minus the historical cumulative
/// storage at `year_rate_change`.
pub fn project_rates(results: &[FitResult], w: f64, year_rate_change: i32) -> Vec<RateProjection> {
    let offset = historic_cumulative(year_rate_change, w);

    results
        .iter()
        .map(|result| {
            let capacity = result.total_stored - offset;
            let storage_rates = (year_rate_change..PROJECTION_END_YEAR)
                .map(|year| {
                    let x = (result.rate * (result.peak_year - f64::from(year))).exp();
                    capacity * result.rate * x / (1.0 + x).powi(2)
                })
                .collect();

            RateProjection {
                rate: result.rate,
                inflection_time: result.peak_year - (2.0 + 3.0_f64.sqrt()).ln() / result.rate,
                first_year: year_rate_change,
                storage_rates,
            }
        })
        .collect()
}

/// Flat report: parallel lists, one entry per rate, rates concatenated
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FitReport {
    pub peak_years: Vec<f64>,
    pub total_stored_list: Vec<f64>,
    pub inflection_times: Vec<f64>,
    pub storage_rates: Vec<f64>,
}

impl FitReport {
    pub fn new(results: &[FitResult], projections: &[RateProjection]) -> Self {
        Self {
            peak_years: results.iter().map(|r| r.peak_year).collect(),
            total_stored_list: results.iter().map(|r| r.total_stored).collect(),
            inflection_times: projections.iter().map(|p| p.inflection_time).collect(),
            storage_rates: projections
                .iter()
                .flat_map(|p| p.storage_rates.iter().copied())
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-6 * b.abs().max(1.0)
    }

    // Peak years [2020, 2030, 2040], totals [10, 100, 1000]
    fn request(rates: Vec<f64>) -> FitRequest {
        FitRequest {
            start_year: 2020.0,
            start_q: 1.0,
            target_year: 2030.0,
            target_s: 2.0,
            peak_years: Sweep::new(2020.0, 2040.0, 3),
            totals: Sweep::new(10.0, 1000.0, 3),
            rates,
        }
    }

    #[test]
    fn test_linear_sweep() {
        assert_eq!(Sweep::new(2020.0, 2040.0, 3).linear(), vec![2020.0, 2030.0, 2040.0]);
        assert_eq!(Sweep::new(5.0, 9.0, 1).linear(), vec![5.0]);
        assert!(Sweep::new(5.0, 9.0, 0).linear().is_empty());
    }

    #[test]
    fn test_logarithmic_sweep() {
        let points = Sweep::new(10.0, 1000.0, 3).logarithmic();
        assert_eq!(points.len(), 3);
        assert!(close(points[0], 10.0));
        assert!(close(points[1], 100.0));
        assert!(close(points[2], 1000.0));
    }

    #[test]
    fn test_parse_sweep() {
        assert_eq!("2020, 2040, 3".parse::<Sweep>().unwrap(), Sweep::new(2020.0, 2040.0, 3));
        assert_eq!("1,2,4.9".parse::<Sweep>().unwrap().count, 4);
        assert!(matches!("1,2".parse::<Sweep>(), Err(FormGuardError::Fit(_))));
        assert!(matches!("1,2,0".parse::<Sweep>(), Err(FormGuardError::Fit(_))));
        assert!(matches!("1,x,3".parse::<Sweep>(), Err(FormGuardError::Fit(_))));
    }

    #[test]
    fn test_slow_growth_fit() {
        // r = 0.1: p is closest to start_q at the latest peak (2040) for every
        // total; q(2030) = (total - 1) * 0.1 * e / (1 + e)^2 gives
        // 0.177, 1.946, 19.64, so total 100 is nearest the target of 2.
        let results = request(vec![0.1]).fit().unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].peak_year, 2040.0);
        assert!(close(results[0].total_stored, 100.0));
    }

    #[test]
    fn test_fast_growth_fit() {
        // r = 1: misfit at 2030 (about 0.999, 0.991, 0.911) beats 2040 (about 1);
        // q(2030) = (total - 1) / 4 gives 2.25, 24.75, 249.75, so total 10 wins.
        let results = request(vec![1.0]).fit().unwrap();
        assert_eq!(results[0].peak_year, 2030.0);
        assert!(close(results[0].total_stored, 10.0));
    }

    #[test]
    fn test_one_result_per_rate_in_order() {
        let results = request(vec![1.0, 0.1]).fit().unwrap();
        assert_eq!(results.iter().map(|r| r.rate).collect::<Vec<_>>(), vec![1.0, 0.1]);
        assert_eq!(results[1].peak_year, 2040.0);
    }

    #[test]
    fn test_rejects_unusable_requests() {
        assert!(matches!(request(vec![]).fit(), Err(FormGuardError::Fit(_))));
        assert!(matches!(request(vec![-0.1]).fit(), Err(FormGuardError::Fit(_))));

        let mut bad_totals = request(vec![0.1]);
        bad_totals.totals = Sweep::new(0.0, 1000.0, 3);
        assert!(matches!(bad_totals.fit(), Err(FormGuardError::Fit(_))));
    }

    #[test]
    fn test_argmin_prefers_first_and_skips_nan() {
        assert_eq!(argmin([3.0, 1.0, 1.0].into_iter()), 1);
        assert_eq!(argmin([f64::NAN, 2.0, 5.0].into_iter()), 1);
    }

    #[test]
    fn test_rate_projection() {
        let fit = FitResult {
            rate: 0.1,
            peak_year: 2040.0,
            total_stored: 100.0,
        };
        let projections = project_rates(&[fit], 0.09, 2030);
        let projection = &projections[0];

        // exp(2030 * 0.09 - 182.6431721) = exp(0.0568279)
        let offset = 1.058_473_6;
        assert!(close(historic_cumulative(2030, 0.09), offset));

        assert_eq!(projection.first_year, 2030);
        assert_eq!(projection.storage_rates.len(), 120);
        // Peak year 2040 is index 10: rate = C * r / 4
        assert!(close(projection.storage_rates[10], (100.0 - offset) * 0.1 / 4.0));
        // 2040 - ln(2 + sqrt 3) / 0.1
        assert!(close(projection.inflection_time, 2026.830_421));
    }

    #[test]
    fn test_report_flattens_rates() {
        let results = request(vec![0.1, 1.0]).fit().unwrap();
        let projections = project_rates(&results, 0.09, 2030);
        let report = FitReport::new(&results, &projections);

        assert_eq!(report.peak_years, vec![2040.0, 2030.0]);
        assert_eq!(report.inflection_times.len(), 2);
        assert_eq!(report.storage_rates.len(), 240);
    }
}

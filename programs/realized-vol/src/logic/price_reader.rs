use std::cmp::Ordering;

use anchor_lang::prelude::*;

use crate::{
    constants::DEFAULT_MAX_STALENESS_SECS,
    errors::VolError,
    state::{Decimal, PriceFeed, PriceSample},
};

/// Acceptance policy for the latest oracle observation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PriceReader {
    /// `None` accepts whatever band the oracle reports
    pub max_confidence_interval: Option<Decimal>,
    pub max_staleness: i64,
}

impl Default for PriceReader {
    fn default() -> Self {
        Self {
            max_confidence_interval: None,
            max_staleness: DEFAULT_MAX_STALENESS_SECS,
        }
    }
}

impl PriceReader {
    /// Loads the latest sample and rejects it if it is stale, negative or
    /// wider than the confidence bound. Never retries.
    pub fn read(&self, feed: &impl PriceFeed, now: i64) -> Result<PriceSample> {
        let sample = feed.latest_sample()?;

        let age = now
            .checked_sub(sample.timestamp)
            .ok_or(VolError::MathError)?;
        require!(age <= self.max_staleness, VolError::StaleFeed);

        require!(!sample.price.is_negative(), VolError::InvalidPriceData);
        require!(!sample.confidence.is_negative(), VolError::InvalidPriceData);

        if let Some(max_confidence_interval) = self.max_confidence_interval {
            require!(
                sample.confidence.cmp_value(&max_confidence_interval) != Ordering::Greater,
                VolError::ConfidenceExceeded
            );
        }

        Ok(sample)
    }
}

use anchor_lang::prelude::*;

use crate::{
    constants::MAX_WINDOW_POINTS,
    errors::VolError,
    state::{Decimal, HistoryBuffer},
};

/// Regular time grid `start, start + interval, ..` up to and including `end`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VolatilityWindow {
    pub start_timestamp: i64,
    pub end_timestamp: i64,
    pub interval: i64,
}

impl VolatilityWindow {
    pub fn new(start_timestamp: i64, end_timestamp: i64, interval: i64) -> Result<Self> {
        require_gt!(end_timestamp, start_timestamp, VolError::InvalidRange);
        require_gt!(interval, 0, VolError::InvalidRange);

        Ok(Self {
            start_timestamp,
            end_timestamp,
            interval,
        })
    }

    /// Number of grid boundaries inside the window.
    pub fn point_count(&self) -> u64 {
        // end > start and interval > 0, so both operands are positive
        let span = self.end_timestamp.abs_diff(self.start_timestamp);
        (span / self.interval.unsigned_abs()).saturating_add(1)
    }

    /// Step-hold resampling: each boundary takes the most recent row at or
    /// before it. Prices are carried forward, never interpolated.
    ///
    /// The window is validated up front; prices are then looked up lazily,
    /// one boundary at a time.
    pub fn prices<'a>(
        &self,
        history: &HistoryBuffer<'a>,
    ) -> Result<impl Iterator<Item = Result<Decimal>> + 'a> {
        require!(
            history.latest_at_or_before(self.start_timestamp).is_some(),
            VolError::InsufficientHistory
        );

        let points = self.point_count();
        require_gte!(points, 2, VolError::InsufficientSamples);
        require_gte!(
            MAX_WINDOW_POINTS as u64,
            points,
            VolError::WindowTooLarge
        );

        let history = *history;
        let interval = self.interval;
        Ok((0..points).scan(self.start_timestamp, move |boundary, _| {
            let at = *boundary;
            *boundary = boundary.saturating_add(interval);
            Some(
                history
                    .latest_at_or_before(at)
                    .map(|row| row.price())
                    .ok_or_else(|| error!(VolError::InsufficientHistory)),
            )
        }))
    }

    pub fn resample(&self, history: &HistoryBuffer) -> Result<Vec<Decimal>> {
        self.prices(history)?.collect()
    }
}

/// Validates the window and resamples `history` onto it.
pub fn build(
    history: &HistoryBuffer,
    start_timestamp: i64,
    end_timestamp: i64,
    interval: i64,
) -> Result<Vec<Decimal>> {
    VolatilityWindow::new(start_timestamp, end_timestamp, interval)?.resample(history)
}

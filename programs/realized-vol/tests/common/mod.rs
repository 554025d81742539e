#![allow(dead_code)]

use anchor_lang::prelude::*;
use realized_vol::{errors::VolError, AggregatorFeed, Decimal, HistoryBuffer, HistoryRow, StoredState};

/// Oracle-side writer for a history arena, appending the way the oracle does.
pub struct HistoryFixture {
    pub rows: Vec<HistoryRow>,
    pub insertion_idx: usize,
}

impl HistoryFixture {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            rows: vec![HistoryRow::default(); capacity],
            insertion_idx: 0,
        }
    }

    pub fn from_samples(capacity: usize, samples: &[(i64, Decimal)]) -> Self {
        let mut fixture = Self::with_capacity(capacity);
        for &(timestamp, price) in samples {
            fixture.append(timestamp, price);
        }
        fixture
    }

    pub fn append(&mut self, timestamp: i64, price: Decimal) {
        self.rows[self.insertion_idx] = HistoryRow::new(timestamp, price);
        self.insertion_idx = (self.insertion_idx + 1) % self.rows.len();
    }

    pub fn buffer(&self) -> HistoryBuffer<'_> {
        HistoryBuffer::new(&self.rows, self.insertion_idx).unwrap()
    }

    /// Raw account bytes as the oracle lays them out.
    pub fn account_data(&self) -> Vec<u8> {
        let mut data = HistoryBuffer::DISCRIMINATOR.to_vec();
        data.extend_from_slice(&(self.insertion_idx as u32).to_le_bytes());
        data.extend_from_slice(bytemuck::cast_slice(&self.rows));
        data
    }
}

/// Raw aggregator account bytes carrying the fields the program decodes.
pub fn aggregator_account_data(feed: &AggregatorFeed) -> Vec<u8> {
    let mut data = vec![0u8; AggregatorFeed::MIN_LEN];
    let mut put = |offset: usize, bytes: &[u8]| {
        data[offset..offset + bytes.len()].copy_from_slice(bytes)
    };
    put(0, &AggregatorFeed::discriminator());
    put(AggregatorFeed::MIN_ORACLE_RESULTS_OFFSET, &feed.min_oracle_results.to_le_bytes());
    put(AggregatorFeed::NUM_SUCCESS_OFFSET, &feed.num_success.to_le_bytes());
    put(
        AggregatorFeed::ROUND_OPEN_TIMESTAMP_OFFSET,
        &feed.round_open_timestamp.to_le_bytes(),
    );
    for (offset, value) in [
        (AggregatorFeed::RESULT_OFFSET, feed.result),
        (AggregatorFeed::STD_DEVIATION_OFFSET, feed.std_deviation),
    ] {
        put(offset, &value.mantissa.to_le_bytes());
        put(offset + 16, &value.scale.to_le_bytes());
    }
    put(AggregatorFeed::HISTORY_BUFFER_OFFSET, feed.history_buffer.as_ref());
    data
}

pub fn units(value: i128) -> Decimal {
    Decimal::new(value, 0)
}

pub fn initialized_state() -> StoredState {
    let mut state = StoredState::default();
    state.initialize(Pubkey::new_unique(), 255).unwrap();
    state
}

pub fn assert_vol_error<T: std::fmt::Debug>(result: Result<T>, expected: VolError) {
    match result {
        Err(anchor_lang::error::Error::AnchorError(error)) => {
            assert_eq!(error.error_code_number, u32::from(expected), "{}", error.error_msg)
        }
        other => panic!("expected {:?}, got {:?}", expected, other),
    }
}

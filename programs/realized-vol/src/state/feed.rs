use anchor_lang::prelude::*;
use anchor_lang::solana_program::hash::hash;

use crate::{errors::VolError, state::Decimal};

/// One oracle observation.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PriceSample {
    pub timestamp: i64,
    pub price: Decimal,
    /// Oracle-reported uncertainty band around `price`
    pub confidence: Decimal,
}

/// Source of the latest oracle observation.
pub trait PriceFeed {
    fn latest_sample(&self) -> Result<PriceSample>;
}

/// A fixed observation is its own feed.
impl PriceFeed for PriceSample {
    fn latest_sample(&self) -> Result<PriceSample> {
        Ok(*self)
    }
}

/// Latest confirmed round of the upstream aggregator account.
///
/// The aggregator is owned and written by the oracle network; this program
/// only decodes the handful of fields it needs from the raw account bytes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AggregatorFeed {
    pub min_oracle_results: u32,
    pub num_success: u32,
    pub round_open_timestamp: i64,
    pub result: Decimal,
    pub std_deviation: Decimal,
    /// History buffer the oracle appends this aggregator's results to
    pub history_buffer: Pubkey,
}

impl AggregatorFeed {
    pub const ACCOUNT_NAME: &'static str = "AggregatorAccountData";

    // Offsets into the packed little-endian account data
    pub const MIN_ORACLE_RESULTS_OFFSET: usize = 8 + // discriminator
        32 + // name
        128 + // metadata
        32 + // reserved
        32 + // queue
        4; // oracle_request_batch_size
    pub const LATEST_ROUND_OFFSET: usize = Self::MIN_ORACLE_RESULTS_OFFSET +
        4 + // min_oracle_results
        4 + // min_job_results
        4 + // min_update_delay_seconds
        8 + // start_after
        Decimal::SIZE + // variance_threshold
        8 + // force_report_period
        8 + // expiration
        8 + // consecutive_failure_count
        8 + // next_allowed_update_time
        1 + // is_locked
        32; // crank
    pub const NUM_SUCCESS_OFFSET: usize = Self::LATEST_ROUND_OFFSET;
    pub const ROUND_OPEN_TIMESTAMP_OFFSET: usize = Self::LATEST_ROUND_OFFSET +
        4 + // num_success
        4 + // num_error
        1 + // is_closed
        8; // round_open_slot
    pub const RESULT_OFFSET: usize = Self::ROUND_OPEN_TIMESTAMP_OFFSET + 8;
    pub const STD_DEVIATION_OFFSET: usize = Self::RESULT_OFFSET + Decimal::SIZE;
    pub const ROUND_LEN: usize = 4 + // num_success
        4 + // num_error
        1 + // is_closed
        8 + // round_open_slot
        8 + // round_open_timestamp
        4 * Decimal::SIZE + // result, std_deviation, min_response, max_response
        16 * 32 + // oracle_pubkeys_data
        16 * Decimal::SIZE + // medians_data
        16 * 8 + // current_payout
        16 + // medians_fulfilled
        16; // errors_fulfilled
    pub const HISTORY_BUFFER_OFFSET: usize = Self::LATEST_ROUND_OFFSET +
        2 * Self::ROUND_LEN + // latest_confirmed_round, current_round
        16 * 32 + // job_pubkeys_data
        16 * 32 + // job_hashes
        4 + // job_pubkeys_size
        32 + // jobs_checksum
        32; // authority
    pub const MIN_LEN: usize = Self::HISTORY_BUFFER_OFFSET + 32;

    /// Anchor account discriminator of the upstream aggregator type.
    pub fn discriminator() -> [u8; 8] {
        let digest = hash(format!("account:{}", Self::ACCOUNT_NAME).as_bytes());
        let mut discriminator = [0u8; 8];
        discriminator.copy_from_slice(&digest.to_bytes()[..8]);
        discriminator
    }

    pub fn load_from_account_info(account_info: &AccountInfo) -> Result<Self> {
        let data = account_info.try_borrow_data()?;
        Self::from_account_data(&data)
    }

    pub fn from_account_data(data: &[u8]) -> Result<Self> {
        require_gte!(data.len(), Self::MIN_LEN, VolError::InvalidAggregatorAccount);
        require!(
            data[..8] == Self::discriminator(),
            VolError::InvalidAggregatorAccount
        );

        Ok(Self {
            min_oracle_results: read_u32(data, Self::MIN_ORACLE_RESULTS_OFFSET)?,
            num_success: read_u32(data, Self::NUM_SUCCESS_OFFSET)?,
            round_open_timestamp: read_i64(data, Self::ROUND_OPEN_TIMESTAMP_OFFSET)?,
            result: read_decimal(data, Self::RESULT_OFFSET)?,
            std_deviation: read_decimal(data, Self::STD_DEVIATION_OFFSET)?,
            history_buffer: Pubkey::new_from_array(field(data, Self::HISTORY_BUFFER_OFFSET)?),
        })
    }

    /// Only the buffer this aggregator writes to may back a volatility window.
    pub fn verify_history_buffer(&self, history_buffer: &Pubkey) -> Result<()> {
        require_keys_eq!(
            self.history_buffer,
            *history_buffer,
            VolError::InvalidHistoryBuffer
        );
        Ok(())
    }
}

impl PriceFeed for AggregatorFeed {
    fn latest_sample(&self) -> Result<PriceSample> {
        require_gte!(
            self.num_success,
            self.min_oracle_results,
            VolError::InvalidAggregatorRound
        );

        Ok(PriceSample {
            timestamp: self.round_open_timestamp,
            price: self.result,
            confidence: self.std_deviation,
        })
    }
}

fn field<const N: usize>(data: &[u8], offset: usize) -> Result<[u8; N]> {
    data.get(offset..offset + N)
        .and_then(|bytes| bytes.try_into().ok())
        .ok_or_else(|| error!(VolError::InvalidAggregatorAccount))
}

fn read_u32(data: &[u8], offset: usize) -> Result<u32> {
    Ok(u32::from_le_bytes(field(data, offset)?))
}

fn read_i64(data: &[u8], offset: usize) -> Result<i64> {
    Ok(i64::from_le_bytes(field(data, offset)?))
}

fn read_decimal(data: &[u8], offset: usize) -> Result<Decimal> {
    Ok(Decimal {
        mantissa: i128::from_le_bytes(field(data, offset)?),
        scale: u32::from_le_bytes(field(data, offset + 16)?),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feed() -> AggregatorFeed {
        AggregatorFeed {
            min_oracle_results: 3,
            num_success: 4,
            round_open_timestamp: 1_700_000_000,
            result: Decimal::new(14_250_000_000, 8),
            std_deviation: Decimal::new(7, 3),
            history_buffer: Pubkey::new_unique(),
        }
    }

    fn account_data(feed: &AggregatorFeed) -> Vec<u8> {
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
        put(AggregatorFeed::RESULT_OFFSET, &feed.result.mantissa.to_le_bytes());
        put(AggregatorFeed::RESULT_OFFSET + 16, &feed.result.scale.to_le_bytes());
        put(AggregatorFeed::STD_DEVIATION_OFFSET, &feed.std_deviation.mantissa.to_le_bytes());
        put(AggregatorFeed::STD_DEVIATION_OFFSET + 16, &feed.std_deviation.scale.to_le_bytes());
        put(AggregatorFeed::HISTORY_BUFFER_OFFSET, feed.history_buffer.as_ref());
        data
    }

    #[test]
    fn account_layout_offsets() {
        assert_eq!(AggregatorFeed::LATEST_ROUND_OFFSET, 341);
        assert_eq!(AggregatorFeed::RESULT_OFFSET, 366);
        assert_eq!(AggregatorFeed::ROUND_LEN, 1_097);
        assert_eq!(AggregatorFeed::HISTORY_BUFFER_OFFSET, 3_627);
        assert_eq!(AggregatorFeed::MIN_LEN, 3_659);
    }

    #[test]
    fn decodes_round_and_history_buffer_key() {
        let feed = feed();
        assert_eq!(AggregatorFeed::from_account_data(&account_data(&feed)).unwrap(), feed);
    }

    #[test]
    fn only_the_linked_history_buffer_is_accepted() {
        let feed = feed();
        assert!(feed.verify_history_buffer(&feed.history_buffer).is_ok());
        assert!(feed.verify_history_buffer(&Pubkey::new_unique()).is_err());
    }

    #[test]
    fn rejects_short_or_foreign_accounts() {
        let data = account_data(&feed());
        assert!(AggregatorFeed::from_account_data(&data[..AggregatorFeed::MIN_LEN - 1]).is_err());

        let mut foreign = data.clone();
        foreign[0] ^= 0xff;
        assert!(AggregatorFeed::from_account_data(&foreign).is_err());
    }

    #[test]
    fn round_without_quorum_has_no_sample() {
        let mut open_round = feed();
        open_round.num_success = 2;
        assert!(open_round.latest_sample().is_err());

        let sample = feed().latest_sample().unwrap();
        assert_eq!(sample.price, feed().result);
        assert_eq!(sample.confidence, feed().std_deviation);
        assert_eq!(sample.timestamp, 1_700_000_000);
    }
}

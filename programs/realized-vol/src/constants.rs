//! Program-wide constants: PDA seeds, request defaults and numeric limits

use anchor_lang::prelude::*;
use anchor_lang::solana_program::pubkey;

/// Oracle program that owns the aggregator and its history buffer.
pub const ORACLE_PROGRAM_ID: Pubkey = pubkey!("SW1TCH7qEPTdLsDHRgPuMQjbQxKdH2aBStViMFnt64f");

// PDA seeds
pub const STORED_STATE_SEED: &[u8] = b"stored_state";

// Time
pub const SECONDS_PER_DAY: i64 = 3600 * 24;

/// Latest round older than this is rejected by `read_price` unless the caller overrides it.
pub const DEFAULT_MAX_STALENESS_SECS: i64 = 300;

// calc_vol defaults when the caller leaves a parameter unset
pub const DEFAULT_INTERVAL_SECS: i64 = SECONDS_PER_DAY;
pub const DEFAULT_LOOKBACK_SECS: i64 = SECONDS_PER_DAY * 10;

/// Upper bound on resampled boundaries per window. Each boundary costs one
/// binary search over the history; memory use does not grow with the window.
pub const MAX_WINDOW_POINTS: usize = 1024;

/// Fractional digits kept when the f64 volatility is stored back as a `Decimal`.
pub const VOLATILITY_SCALE: u32 = 12;

/// Largest scale a `Decimal` can carry without overflowing `10^scale` in an i128.
pub const MAX_DECIMAL_SCALE: u32 = 28;

/// Periods used to annualize a daily-interval volatility for reporting.
pub const TRADING_DAYS_PER_YEAR: f64 = 252.0;

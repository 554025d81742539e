use anchor_lang::prelude::*;

use crate::state::Decimal;

#[event]
pub struct StateInitialized {
    pub stored_state: Pubkey,
    pub authority: Pubkey,
}

#[event]
pub struct PriceRead {
    pub stored_state: Pubkey,
    pub price: Decimal,
    pub confidence: Decimal,
    pub feed_timestamp: i64,
    pub updated_at: i64,
}

#[event]
pub struct VolatilityCalculated {
    pub stored_state: Pubkey,
    pub volatility: Decimal,
    pub annualized_volatility: Option<Decimal>,
    pub start_timestamp: i64,
    pub end_timestamp: i64,
    pub interval: i64,
    pub sample_count: u32,
    pub updated_at: i64,
}

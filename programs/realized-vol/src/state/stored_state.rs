use anchor_lang::prelude::*;

use crate::{errors::VolError, state::Decimal};

/// Per-client record of the last accepted price and the last computed volatility.
#[account]
#[derive(Debug, Default)]
pub struct StoredState {
    pub authority: Pubkey,
    pub current_price: Decimal, // Last price accepted by read_price
    pub volatility: Decimal,    // Fractional, unannualized (0.02 == 2%)
    pub last_updated: i64,      // Unix time of the latest write to either field
    pub is_initialized: bool,
    pub bump: u8,
}

impl StoredState {
    pub const SIZE: usize = 8 + // discriminator
        32 + // authority
        Decimal::SIZE + // current_price
        Decimal::SIZE + // volatility
        8 + // last_updated
        1 + // is_initialized
        1; // bump

    /// One-way transition into the initialized state with zeroed fields.
    pub fn initialize(&mut self, authority: Pubkey, bump: u8) -> Result<()> {
        require!(!self.is_initialized, VolError::AlreadyInitialized);

        self.authority = authority;
        self.bump = bump;
        self.is_initialized = true;
        self.update(Some(Decimal::ZERO), Some(Decimal::ZERO), 0);
        Ok(())
    }

    pub fn record_price(&mut self, price: Decimal, now: i64) {
        self.update(Some(price), None, now);
    }

    pub fn record_volatility(&mut self, volatility: Decimal, now: i64) {
        self.update(None, Some(volatility), now);
    }

    fn update(
        &mut self,
        updated_current_price: Option<Decimal>,
        updated_volatility: Option<Decimal>,
        updated_at: i64,
    ) {
        if let Some(val) = updated_current_price {
            self.current_price = val;
        }
        if let Some(val) = updated_volatility {
            self.volatility = val;
        }
        self.last_updated = updated_at;
    }
}

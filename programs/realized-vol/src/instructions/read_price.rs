use anchor_lang::prelude::*;

use crate::{
    constants::{DEFAULT_MAX_STALENESS_SECS, ORACLE_PROGRAM_ID, STORED_STATE_SEED},
    errors::VolError,
    events::PriceRead,
    logic::{apply_read_price, PriceReader},
    state::{AggregatorFeed, Decimal, StoredState},
};

#[derive(Clone, AnchorSerialize, AnchorDeserialize)]
pub struct ReadPriceParams {
    pub max_confidence_interval: Option<Decimal>,
    /// Seconds; defaults to `DEFAULT_MAX_STALENESS_SECS`
    pub max_staleness: Option<i64>,
}

#[derive(Accounts)]
#[instruction(params: ReadPriceParams)]
pub struct ReadPrice<'info> {
    /// CHECK: owner checked here, decoded by AggregatorFeed::load_from_account_info
    #[account(owner = ORACLE_PROGRAM_ID @ VolError::InvalidAggregatorAccount)]
    pub aggregator: UncheckedAccount<'info>,

    #[account(
        mut,
        seeds = [STORED_STATE_SEED, authority.key().as_ref()],
        bump = stored_state.bump,
        has_one = authority,
    )]
    pub stored_state: Account<'info, StoredState>,

    pub authority: Signer<'info>,
}

impl ReadPrice<'_> {
    pub fn read_price(ctx: Context<ReadPrice>, params: ReadPriceParams) -> Result<()> {
        let now = Clock::get()?.unix_timestamp;
        let feed = AggregatorFeed::load_from_account_info(&ctx.accounts.aggregator)?;

        let reader = PriceReader {
            max_confidence_interval: params.max_confidence_interval,
            max_staleness: params.max_staleness.unwrap_or(DEFAULT_MAX_STALENESS_SECS),
        };
        let stored_state = &mut ctx.accounts.stored_state;
        let sample = apply_read_price(stored_state, &feed, &reader, now)?;

        msg!(
            "Current price: {} ± {} (round opened {})",
            sample.price,
            sample.confidence,
            sample.timestamp
        );

        emit!(PriceRead {
            stored_state: stored_state.key(),
            price: sample.price,
            confidence: sample.confidence,
            feed_timestamp: sample.timestamp,
            updated_at: now,
        });

        Ok(())
    }
}

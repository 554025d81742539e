use anchor_lang::prelude::*;

use crate::{
    constants::{DEFAULT_INTERVAL_SECS, DEFAULT_LOOKBACK_SECS, ORACLE_PROGRAM_ID, STORED_STATE_SEED},
    errors::VolError,
    events::VolatilityCalculated,
    logic::{apply_calc_vol, VolatilityWindow},
    state::{AggregatorFeed, HistoryBuffer, StoredState},
};

#[derive(Clone, AnchorSerialize, AnchorDeserialize)]
pub struct CalcVolParams {
    pub interval: Option<i64>, // seconds, defaults to one day
    pub start_timestamp: Option<i64>,
    pub end_timestamp: Option<i64>, // defaults to the current clock
}

#[derive(Accounts)]
#[instruction(params: CalcVolParams)]
pub struct CalcVol<'info> {
    /// CHECK: owner checked here, decoded by AggregatorFeed::load_from_account_info
    #[account(owner = ORACLE_PROGRAM_ID @ VolError::InvalidAggregatorAccount)]
    pub aggregator: UncheckedAccount<'info>,

    /// CHECK: must be the buffer named by the aggregator, checked in the handler
    #[account(owner = ORACLE_PROGRAM_ID @ VolError::InvalidHistoryBuffer)]
    pub history_buffer: UncheckedAccount<'info>,

    #[account(
        mut,
        seeds = [STORED_STATE_SEED, authority.key().as_ref()],
        bump = stored_state.bump,
        has_one = authority,
    )]
    pub stored_state: Account<'info, StoredState>,

    pub authority: Signer<'info>,
}

impl CalcVolParams {
    /// Fills unset fields: the window ends now and looks back ten days at a daily step.
    pub fn window(&self, now: i64) -> Result<VolatilityWindow> {
        let end_timestamp = self.end_timestamp.unwrap_or(now);
        let start_timestamp = match self.start_timestamp {
            Some(start) => start,
            None => end_timestamp
                .checked_sub(DEFAULT_LOOKBACK_SECS)
                .ok_or(VolError::MathError)?,
        };
        let interval = self.interval.unwrap_or(DEFAULT_INTERVAL_SECS);

        VolatilityWindow::new(start_timestamp, end_timestamp, interval)
    }
}

impl CalcVol<'_> {
    pub fn calc_vol(ctx: Context<CalcVol>, params: CalcVolParams) -> Result<()> {
        let now = Clock::get()?.unix_timestamp;
        let window = params.window(now)?;

        let aggregator = AggregatorFeed::load_from_account_info(&ctx.accounts.aggregator)?;
        aggregator.verify_history_buffer(ctx.accounts.history_buffer.key)?;

        let data = ctx.accounts.history_buffer.try_borrow_data()?;
        let history = HistoryBuffer::from_account_data(&data)?;

        let stored_state = &mut ctx.accounts.stored_state;
        let report = apply_calc_vol(stored_state, &history, &window, now)?;

        if let Some(annualized) = report.annualized_volatility {
            msg!("Annualized volatility: {}", annualized);
        }
        msg!(
            "Realized volatility over {} samples: {}",
            report.sample_count,
            report.volatility
        );

        emit!(VolatilityCalculated {
            stored_state: stored_state.key(),
            volatility: report.volatility,
            annualized_volatility: report.annualized_volatility,
            start_timestamp: window.start_timestamp,
            end_timestamp: window.end_timestamp,
            interval: window.interval,
            sample_count: report.sample_count as u32,
            updated_at: now,
        });

        Ok(())
    }
}

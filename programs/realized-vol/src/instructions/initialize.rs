use crate::{constants::STORED_STATE_SEED, events::StateInitialized, state::*};
use anchor_lang::prelude::*;

#[derive(Accounts)]
pub struct Initialize<'info> {
    // init_if_needed lets a repeat call reach the handler and fail with AlreadyInitialized
    #[account(
        init_if_needed,
        payer = authority,
        space = StoredState::SIZE,
        seeds = [STORED_STATE_SEED, authority.key().as_ref()],
        bump
    )]
    pub stored_state: Account<'info, StoredState>,

    #[account(mut)]
    pub authority: Signer<'info>,

    pub system_program: Program<'info, System>,
}

impl Initialize<'_> {
    pub fn initialize(ctx: Context<Initialize>) -> Result<()> {
        let authority = ctx.accounts.authority.key();
        let stored_state = &mut ctx.accounts.stored_state;
        stored_state.initialize(authority, ctx.bumps.stored_state)?;

        emit!(StateInitialized {
            stored_state: stored_state.key(),
            authority,
        });

        msg!("Stored state initialized for {}", authority);
        Ok(())
    }
}

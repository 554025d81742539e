pub mod constants;
pub mod errors;
pub mod events;
pub mod instructions;
pub mod logic;
pub mod state;

use anchor_lang::prelude::*;

pub use events::*;
pub use instructions::*;
pub use state::*;

declare_id!("HXe1AKcEue9SZLoec1Vj1sTULLUHvuG9iKEU9vwMAD9m");

#[program]
pub mod realized_vol {
    use super::*;

    pub fn initialize(ctx: Context<Initialize>) -> Result<()> {
        Initialize::initialize(ctx)
    }

    pub fn read_price(ctx: Context<ReadPrice>, params: ReadPriceParams) -> Result<()> {
        ReadPrice::read_price(ctx, params)
    }

    pub fn calc_vol(ctx: Context<CalcVol>, params: CalcVolParams) -> Result<()> {
        CalcVol::calc_vol(ctx, params)
    }
}

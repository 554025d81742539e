//! Host-independent core: price acceptance, window resampling and the
//! volatility statistic. Instruction handlers wire these to accounts.

pub mod engine;
pub mod price_reader;
pub mod volatility;
pub mod window;

pub use engine::*;
pub use price_reader::*;
pub use volatility::{annualize, compute, log_returns, realized_volatility, ReturnStats, RunningStats};
pub use window::{build, VolatilityWindow};

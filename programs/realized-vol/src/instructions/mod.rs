pub mod calc_vol;
pub mod initialize;
pub mod read_price;

pub use calc_vol::*;
pub use initialize::*;
pub use read_price::*;

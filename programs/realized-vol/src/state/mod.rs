pub mod decimal;
pub mod feed;
pub mod history;
pub mod stored_state;

pub use decimal::*;
pub use feed::*;
pub use history::*;
pub use stored_state::*;

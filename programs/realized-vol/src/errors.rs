use anchor_lang::prelude::*;

#[error_code]
#[derive(Eq, PartialEq)]
pub enum VolError {
    #[msg("Stored state is already initialized")]
    AlreadyInitialized,

    #[msg("Oracle feed exceeded provided confidence interval")]
    ConfidenceExceeded,

    #[msg("Oracle feed has not been updated within the allowed staleness")]
    StaleFeed,

    #[msg("Invalid price data")]
    InvalidPriceData,

    #[msg("Not a valid aggregator account")]
    InvalidAggregatorAccount,

    #[msg("Aggregator round has not reached the minimum oracle responses")]
    InvalidAggregatorRound,

    #[msg("Not a valid history buffer account")]
    InvalidHistoryBuffer,

    #[msg("Start must precede end and interval must be positive")]
    InvalidRange,

    #[msg("No history at or before the start of the window")]
    InsufficientHistory,

    #[msg("Not enough data in the range")]
    InsufficientSamples,

    #[msg("Price must be positive to take a log return")]
    NonPositivePrice,

    #[msg("Window spans too many intervals")]
    WindowTooLarge,

    #[msg("Mathematical operation error")]
    MathError,
}

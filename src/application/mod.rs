pub mod submitter;
pub mod swap_executor;
pub mod round_trip;

pub use submitter::TransactionSubmitter;
pub use swap_executor::SwapExecutor;
pub use round_trip::{
    RoundTripConfig, RoundTripError, RoundTripOrchestrator, RoundTripReport, RoundTripState,
    UnconfirmedBuyPolicy, DEFAULT_SETTLE_DELAY,
};

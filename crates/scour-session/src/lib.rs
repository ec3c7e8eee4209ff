mod sweeper;
mod tracker;

pub use sweeper::{start_sweeper, SweeperHandle};
pub use tracker::{
    CacheStatus, SessionContext, SessionStats, SessionTracker, DEFAULT_SWEEP_INTERVAL,
};

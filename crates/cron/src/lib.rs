//! The broadcast trigger: a single recurring cron schedule, bound to a
//! fixed time zone and reconfigurable at runtime without a restart.

pub mod error;
pub mod schedule;
pub mod service;

pub use {
    error::{Error, Result},
    schedule::{BROADCAST_TZ, DEFAULT_EXPR},
    service::{BroadcastFn, RantScheduler, SchedulerStatus},
};

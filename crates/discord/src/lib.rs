//! Discord glue: command dispatch, broadcast fan-out, and the gateway
//! client lifecycle.
//!
//! All bot state lives in the corpus store, the broadcast registry, and the
//! scheduler; the handler itself is stateless between events.

pub mod broadcast;
pub mod client;
pub mod commands;
pub mod error;
pub mod handler;
pub mod render;

pub use {
    client::run_bot,
    error::{Error, Result},
    handler::RantHandler,
};

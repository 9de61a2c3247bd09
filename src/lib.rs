//! Bitcoin payment input classifier
//!

pub mod broadcast;
pub mod chain;
pub mod classifier;
pub mod cli;
pub mod codec;
pub mod config;
pub mod errors;
pub mod payment_request;
pub mod types;

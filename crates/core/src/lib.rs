//! Core probe logic.
//!
//! This crate provides:
//! - Static token registry with mainnet addresses
//! - Probe configuration with up-front endpoint validation
//! - The sequential QuoteChecker
//! - Report aggregation and rendering

mod checker;
pub mod config;
mod report;
mod tokens;

pub use checker::QuoteChecker;
pub use config::{
    ConfigError, ProbeConfig, DEFAULT_AMOUNT, DEFAULT_FROM_CHAIN_ID, DEFAULT_TIMEOUT,
    DEFAULT_TO_CHAIN_ID, DEFAULT_WALLET,
};
pub use report::{render, QuoteResult, TokenReport};
pub use tokens::{quote_target, Token, TokenRegistry, DAI, REGISTRY, SNX, TOKENS};

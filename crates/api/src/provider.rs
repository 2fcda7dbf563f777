//! Liquidity providers the Across swap API can delegate a quote to.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Liquidity-routing backends behind the swap API.
///
/// The set is closed: the API only knows these three routers, and the
/// probe asks about each of them in `ALL` order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Provider {
    /// Uniswap routing
    Uniswap,
    /// 0x aggregator
    ZeroX,
    /// LI.FI bridge/swap aggregator
    Lifi,
}

impl Provider {
    /// All providers, in the fixed probing order.
    pub const ALL: [Provider; 3] = [Provider::Uniswap, Provider::ZeroX, Provider::Lifi];

    /// Wire name used in API parameters and payloads.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Provider::Uniswap => "uniswap",
            Provider::ZeroX => "0x",
            Provider::Lifi => "lifi",
        }
    }

    /// Check whether `text` mentions this provider (case-insensitive substring).
    pub fn mentioned_in(&self, text: &str) -> bool {
        text.to_lowercase().contains(self.as_str())
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Provider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "uniswap" => Ok(Provider::Uniswap),
            "0x" => Ok(Provider::ZeroX),
            "lifi" => Ok(Provider::Lifi),
            other => Err(format!("unknown provider: {}", other)),
        }
    }
}

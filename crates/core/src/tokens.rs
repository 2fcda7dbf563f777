//! Token registry for the support probe.
//!
//! Contains the 9 probed tokens with their Ethereum mainnet addresses.
//! Tokens without a known mainnet deployment carry the zero address and are
//! reported as missing instead of being probed.

use std::collections::HashMap;
use std::sync::LazyLock;

use alloy::primitives::{address, Address};

/// A probed token.
#[derive(Debug, Clone, Copy)]
pub struct Token {
    /// Token symbol (e.g., "DAI")
    pub symbol: &'static str,
    /// Token contract address on the source chain
    pub address: Address,
}

impl Token {
    const fn new(symbol: &'static str, address: Address) -> Self {
        Self { symbol, address }
    }

    const fn unresolved(symbol: &'static str) -> Self {
        Self {
            symbol,
            address: Address::ZERO,
        }
    }

    /// Whether a usable address is known for this token.
    pub fn has_address(&self) -> bool {
        !self.address.is_zero()
    }
}

// ============================================================================
// Token table - requested symbols + Ethereum mainnet addresses
// ============================================================================

pub const BAL: Token = Token::new("BAL", address!("ba100000625a3754423978a60c9317c58a424e3d"));
pub const VLR: Token = Token::unresolved("VLR");
pub const POOL: Token = Token::new("POOL", address!("0cec1a9154ff802e7934fc916ed7ca50bde6844e"));
pub const LSK: Token = Token::unresolved("LSK");
pub const WLD: Token = Token::new("WLD", address!("163f8c2467924be0ae7b5347228cabf260318753"));
pub const WGHO: Token = Token::unresolved("WGHO");
pub const CAKE: Token = Token::new("CAKE", address!("152649ea73beab28c5b49b26eb48f7ead6d4c898"));
pub const DAI: Token = Token::new("DAI", address!("6b175474e89094c44da98b954eedeac495271d0f"));
pub const SNX: Token = Token::new("SNX", address!("c011a73ee8576fb46f5e1c5751ca3b9fe0af2a6f"));

/// All probed tokens, in report order.
pub const TOKENS: &[Token] = &[BAL, VLR, POOL, LSK, WLD, WGHO, CAKE, DAI, SNX];

/// Pick the output token for a probe.
///
/// Quotes swap into DAI; probing DAI itself targets SNX so the pair is never
/// degenerate.
pub fn quote_target(token: &Token) -> Token {
    if token.symbol == DAI.symbol {
        SNX
    } else {
        DAI
    }
}

/// Symbol-indexed view over the token table.
#[derive(Debug)]
pub struct TokenRegistry {
    by_symbol: HashMap<&'static str, &'static Token>,
}

impl TokenRegistry {
    pub fn new() -> Self {
        let by_symbol = TOKENS.iter().map(|t| (t.symbol, t)).collect();
        Self { by_symbol }
    }

    /// Look up a token by symbol.
    pub fn get_by_symbol(&self, symbol: &str) -> Option<&'static Token> {
        self.by_symbol.get(symbol).copied()
    }

    /// Tokens with a known address, in table order.
    pub fn probeable(&self) -> impl Iterator<Item = &'static Token> {
        TOKENS.iter().filter(|t| t.has_address())
    }

    /// Tokens still missing an address, in table order.
    pub fn unresolved(&self) -> impl Iterator<Item = &'static Token> {
        TOKENS.iter().filter(|t| !t.has_address())
    }
}

impl Default for TokenRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Global token registry instance.
pub static REGISTRY: LazyLock<TokenRegistry> = LazyLock::new(TokenRegistry::new);

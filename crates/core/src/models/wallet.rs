use serde::{Deserialize, Serialize};

/// Account state reported by the wallet connector.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalletAccount {
    pub address: Option<String>,
    pub is_connected: bool,
}

/// What to read a balance for: the chain's native coin or an ERC-20 contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TokenIdentity {
    Native,
    Contract { address: String, decimals: u32 },
}

impl TokenIdentity {
    pub fn decimals(&self) -> u32 {
        match self {
            TokenIdentity::Native => NATIVE_DECIMALS,
            TokenIdentity::Contract { decimals, .. } => *decimals,
        }
    }
}

/// Balance lookup state, as the wallet connector reports it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceState {
    /// Raw integer balance in the token's smallest unit. `None` until loaded.
    pub balance_raw: Option<u128>,
    pub is_loading: bool,
    pub is_error: bool,
}

/// A token on the wallet allow-list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WellKnownToken {
    pub address: &'static str,
    pub symbol: &'static str,
    pub name: &'static str,
    pub decimals: u32,
}

impl WellKnownToken {
    pub fn identity(&self) -> TokenIdentity {
        TokenIdentity::Contract {
            address: self.address.to_string(),
            decimals: self.decimals,
        }
    }
}

/// Decimals of native ETH.
pub const NATIVE_DECIMALS: u32 = 18;

/// Ethereum mainnet tokens checked for a non-zero balance.
pub const WELL_KNOWN_TOKENS: [WellKnownToken; 3] = [
    WellKnownToken {
        address: "0xdAC17F958D2ee523a2206206994597C13D831ec7",
        symbol: "USDT",
        name: "Tether USD",
        decimals: 6,
    },
    WellKnownToken {
        address: "0xA0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48",
        symbol: "USDC",
        name: "USD Coin",
        decimals: 6,
    },
    WellKnownToken {
        address: "0x6B175474E89094C44Da98b954EedeAC495271d0F",
        symbol: "DAI",
        name: "Dai Stablecoin",
        decimals: 18,
    },
];

/// Convert a raw integer balance into whole units using `decimals`.
pub fn decode_balance(raw: u128, decimals: u32) -> f64 {
    raw as f64 / 10f64.powi(decimals as i32)
}

use serde::Serialize;

use crate::models::asset::AssetId;
use crate::models::wallet::{
    decode_balance, BalanceState, TokenIdentity, WalletAccount, NATIVE_DECIMALS,
    WELL_KNOWN_TOKENS,
};
use crate::store::{AssetStore, SharedStore};

/// Wallet connector collaborator (connection + on-chain balances).
pub trait WalletSource: Send + Sync {
    fn account(&self) -> WalletAccount;

    fn balance(&self, address: &str, token: &TokenIdentity) -> BalanceState;
}

/// One wallet-held asset pill.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeldAsset {
    pub id: AssetId,
    pub name: String,
    pub symbol: String,
    pub balance: f64,
    pub selected: bool,
}

impl HeldAsset {
    /// Balance with four decimals, e.g. "1.2500".
    pub fn formatted_balance(&self) -> String {
        format!("{:.4}", self.balance)
    }
}

/// What the wallet section shows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum WalletView {
    /// No wallet connected: prompt the user to connect.
    Disconnected,
    /// Connected but nothing to list.
    Empty,
    Assets(Vec<HeldAsset>),
}

impl WalletView {
    pub fn message(&self) -> Option<&'static str> {
        match self {
            WalletView::Disconnected => Some("Note: Connect your wallet to view your assets"),
            WalletView::Empty => Some("No assets found in wallet"),
            WalletView::Assets(_) => None,
        }
    }
}

/// Derive the held-assets view from the wallet and the current selection.
///
/// Native ETH is always listed (zero while its balance is unknown); the
/// allow-listed tokens are listed only with a positive balance. Each
/// balance is decoded with its own token's decimals.
pub fn held_assets(source: &dyn WalletSource, store: &AssetStore) -> WalletView {
    let account = source.account();
    if !account.is_connected {
        return WalletView::Disconnected;
    }
    let Some(address) = account.address else {
        return WalletView::Empty;
    };

    let native = source.balance(&address, &TokenIdentity::Native);
    let eth_id = AssetId::from("ethereum");
    let mut assets = vec![HeldAsset {
        selected: store.is_selected(&eth_id),
        id: eth_id,
        name: "Ethereum".to_string(),
        symbol: "ETH".to_string(),
        balance: native
            .balance_raw
            .map(|raw| decode_balance(raw, NATIVE_DECIMALS))
            .unwrap_or(0.0),
    }];

    for token in WELL_KNOWN_TOKENS {
        let state = source.balance(&address, &token.identity());
        let raw = match state.balance_raw {
            Some(raw) if raw > 0 && !state.is_error => raw,
            _ => continue,
        };
        let id = AssetId::from(token.symbol.to_lowercase());
        assets.push(HeldAsset {
            selected: store.is_selected(&id),
            id,
            name: token.name.to_string(),
            symbol: token.symbol.to_string(),
            balance: decode_balance(raw, token.decimals),
        });
    }

    WalletView::Assets(assets)
}

/// Clicking a wallet pill toggles selection.
pub fn click_held(store: &SharedStore, id: &AssetId) {
    store.toggle_selected(id);
}

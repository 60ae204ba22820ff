pub mod asset_store;
pub mod shared;

pub use asset_store::{now_millis, AssetCacheEntry, AssetStore, DEFAULT_ASSET};
pub use shared::SharedStore;

pub mod asset;
pub mod chart;
pub mod settings;
pub mod time_range;
pub mod wallet;

pub mod traits;

// Service implementations
pub mod coingecko;

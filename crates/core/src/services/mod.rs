pub mod chart_service;
pub mod notifier;
pub mod recent_service;
pub mod search_service;
pub mod wallet_service;

//! Component widgets for the dashboard.

pub mod stat_card;

pub use stat_card::StatCard;

pub mod fixtures;
pub mod health;
pub mod metrics;

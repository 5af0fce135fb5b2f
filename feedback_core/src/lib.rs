//! Idempotent sample-data seeding for the feedback pages schema.
//!
//! The [`seed::Seeder`] takes an explicitly opened connection, writes the sample
//! [`seed::SeedPlan`] in one transaction and is closed by its owner afterwards.

pub mod config;
pub mod entity;
pub mod error;
pub mod ids;
pub mod models;
pub mod seed;

#[cfg(test)]
pub(crate) mod test_utils;

pub mod prelude {
    pub use super::config;
    pub use super::entity;
    pub use super::ids;
    pub use super::models;

    pub use super::error::{FailureKind, SeedError};
    pub use super::seed::{SeedPlan, SeedSummary, Seeder};
}

// tfc-workspace-tools - Terraform Cloud workspace state migration and unlock
// This exposes the core components for testing and integration

pub mod commands;
pub mod config;
pub mod tfc;

// Re-export key types for easy access
pub use commands::migrate::MigrateOutcome;
pub use commands::unlock::UnlockScope;
pub use config::TfcConfig;
pub use tfc::{TfcClient, TfcError};

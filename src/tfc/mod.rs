pub mod client;
pub mod errors;
pub mod projects;
pub mod state_versions;
pub mod types;
pub mod workspaces;

pub use client::TfcClient;
pub use errors::TfcError;

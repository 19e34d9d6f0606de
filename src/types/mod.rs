// Jobflow shared type definitions
// Each submodule defines types used across the client.

pub mod api;
pub mod errors;
pub mod kind;
pub mod listing;
pub mod query;
pub mod settings;

//! Jobflow database layer.
//!
//! Provides SQLite connection management, schema migrations and the
//! [`LocalStorage`] key/value store the client persists its state in.
//!
//! # Usage
//!
//! ```no_run
//! use jobflow::database::{Database, LocalStorage};
//!
//! // Open a persistent database
//! let db = Database::open("jobflow.db").expect("failed to open database");
//! db.set_item("savedEventIds", "[3,9]").expect("write failed");
//!
//! // Or use an in-memory database for testing
//! let db = Database::open_in_memory().expect("failed to open in-memory database");
//! assert!(db.get_item("savedEventIds").unwrap().is_none());
//! ```

pub mod connection;
pub mod local_storage;
pub mod migrations;

pub use connection::Database;
pub use local_storage::LocalStorage;

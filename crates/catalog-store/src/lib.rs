//! Local storage module for the catalog client.
//!
//! Uses `rusqlite` (bundled `SQLite`) as a small key/value store,
//! the terminal counterpart of browser local storage. The bearer
//! token lives there under a fixed key.

mod connection;
/// Key/value item operations.
pub mod local_storage;
mod migrations;
/// Bearer token persistence.
pub mod session;

#[allow(clippy::module_name_repetitions)]
pub use connection::{open_in_memory, open_store, resolve_data_dir};
pub use local_storage::{get_item, remove_item, set_item};
#[allow(clippy::module_name_repetitions)]
pub use session::{AUTH_TOKEN_KEY, SessionStore};

//! External service interactions
//!
//! - Table loading from data files
//! - Key-value storage backends
//! - Filter preference persistence

pub mod loader;
pub mod preference;
pub mod store;

pub use loader::{default_table, load_table};
pub use preference::PreferenceStore;
pub use store::{JsonFileStore, KeyValueStore, UnavailableStore};

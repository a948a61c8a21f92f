//! Remote menu fetching, the startup sync, and menu filtering.

pub mod api_types;
pub mod client;
pub mod error;
pub mod filter;
pub mod sync;
pub mod types;

pub use client::MenuClient;
pub use filter::MenuFilter;
pub use sync::{spawn_startup_sync, SyncHandle};
pub use types::{Category, MenuEntry};

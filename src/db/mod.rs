//! Local persistence layer (key-value).

pub mod kv;

pub use kv::{FileKvStore, KeyValueStore, KvError, MemoryKvStore};

/// Storage keys as constants.
pub mod keys {
    /// Signed-in user record
    pub const AUTH_STATE: &str = "authState";
    /// Session backend tokens
    pub const BACKEND_SESSION: &str = "supabase.session";
}

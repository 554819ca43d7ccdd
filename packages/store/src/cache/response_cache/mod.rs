//! Response cache modules
//!
//! - `core`: ResponseCache struct, construction and introspection
//! - `operations`: store, retrieve, header and invalidate
//! - `revalidation`: freshen and the header-only update path
//!
//! The eviction store and the stale overlay are synchronized independently.
//! Operations that touch both (store, freshen) are not atomic across the
//! pair; a racing store and invalidate on one key resolve as last write wins.

pub mod core;
pub mod operations;
pub mod revalidation;

pub use self::core::ResponseCache;

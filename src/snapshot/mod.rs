// src/snapshot/mod.rs

//! Per-site persisted state.
//!
//! Each site owns two files under the storage directory, named after its
//! derived identifier: `<id>.hash` holds the checksum of the last seen
//! content, `<id>.site` holds that content as it was fetched.

pub mod hash;
pub mod store;

pub use hash::{SITE_ID_LEN, checksum, site_id};
pub use store::{CONTENT_EXT, HASH_EXT, Snapshot, SnapshotStore};

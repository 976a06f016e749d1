//! Cache module for storing rate tables on disk
//!
//! This module provides a file-backed key-value store. Keys are lowercase
//! currency codes and values are JSON-serialized cache entries.

mod manager;

pub use manager::CacheManager;

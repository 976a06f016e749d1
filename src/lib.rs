//! fxtiers library
//!
//! Exchange rates fetched from a public currency API, cached on disk for 24
//! hours, and grouped into three tiers by value.

pub mod app;
pub mod cache;
pub mod classify;
pub mod cli;
pub mod data;
pub mod error;
pub mod report;
pub mod ui;

pub use error::{RatesError, Result};

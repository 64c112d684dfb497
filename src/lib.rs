//! Feedsite - a static news page generator
//!
//! This crate polls a configured list of syndication feeds, merges new
//! entries into per-feed history without duplicates, and renders every feed
//! to its own static HTML page plus an index page linking them all.

pub mod config;
pub mod entry;
pub mod error;
pub mod fetcher;
pub mod merge;
pub mod render;
pub mod scheduler;
pub mod store;
pub mod timezone;

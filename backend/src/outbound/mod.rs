//! Outbound adapters talking to the filesystem.

pub mod persistence;

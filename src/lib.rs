//! Vidseg - hierarchical video segmentation tool
//!
//! This library crate exposes the command implementations for integration testing.

pub mod config;
pub mod export;
pub mod inspect;

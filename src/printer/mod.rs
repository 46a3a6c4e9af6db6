//! # Printer Module
//!
//! This module provides printer hardware presets.
//!
//! ## Modules
//!
//! - [`config`]: Printer hardware specifications

pub mod config;

pub use config::PrinterConfig;

//! Tunelink - remote control client for a networked music player.
//!
//! Tunelink mirrors and drives the playback state of a music player running
//! on a separate host, over a persistent duplex JSON message channel. The
//! main features include:
//!
//! - Reactive session state with per-slice change streams
//! - Wall-clock position extrapolation between host snapshots
//! - Optimistic, fire-and-forget command submission
//! - Seek-drag arbitration against incoming snapshots
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use tunelink::config::Config;
//!
//! // Load configuration (falls back to defaults when no file exists)
//! let config = Config::load().expect("config");
//! println!("Remote host: {}:{}", config.connection.host, config.connection.port);
//! ```

/// Configuration schema definitions and loading.
pub mod config;

/// Core error types and result aliases.
pub mod core;

/// Reactive services for remote player integration.
pub mod services;

/// Tracing and log output configuration.
pub mod tracing_config;

/// Re-exported core types for convenience.
pub use core::{Result, TunelinkError};

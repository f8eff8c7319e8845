//! # Safetitle Architecture
//!
//! Safetitle keeps note titles usable as file names on every desktop
//! filesystem. It is a **library first**: the classifier and the edit guard
//! know nothing about terminals, and the bundled CLI is just one client.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Parses arguments, prints verdicts, sets up logging       │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Plugin Shell (plugin.rs)                                   │
//! │  - One guard per open document view                         │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Edit Guard (guard.rs, listener.rs)                         │
//! │  - Intercepts focus/input/confirm/blur on the title         │
//! │  - Reverts invalid commits to the last good title           │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Classifier (filename.rs, constants.rs)                     │
//! │  - Pure, stateless name checks                              │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! The guard reaches the host editor only through the traits in [`host`], so
//! any framework that can query an element, register listeners, and show a
//! tooltip can drive it.
//!
//! ## Threading
//!
//! Everything above the classifier is single threaded and event driven. The
//! guard runs inside the host's dispatch call and never blocks. The
//! classifier is pure and can be called from anywhere.
//!
//! ## Module Overview
//!
//! - [`filename`]: `classify` / `is_invalid` and the rejection reasons
//! - [`constants`]: rule data and message strings
//! - [`guard`]: the per-title edit guard
//! - [`listener`]: listener groups released as one unit
//! - [`host`]: traits for the host editor
//! - [`plugin`]: tracks guards across open views
//! - [`config`]: configuration loading
//! - [`error`]: error types
//! - `testing`: fake host for tests (`test_utils` feature)

pub mod config;
pub mod constants;
pub mod error;
pub mod filename;
pub mod guard;
pub mod host;
pub mod listener;
pub mod plugin;

#[cfg(any(test, feature = "test_utils"))]
pub mod testing;

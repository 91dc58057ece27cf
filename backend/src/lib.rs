//! # Ferien Rust Backend
//!
//! School-free day calendar for German federal states.
//!
//! This crate fetches school vacation periods and public holidays for one or
//! more Bundesländer, merges them into a single list of school-free days over
//! a rolling window, persists the result as a YAML document and answers
//! point-in-time questions ("is today free?", "how long until the next
//! vacation?"). A REST API via Axum exposes the same answers.
//!
//! ## Architecture
//!
//! - [`models`]: States, records, windows and the snapshot type
//! - [`sources`]: Suppliers of raw vacation and holiday records (HTTP or local fixtures)
//! - [`calendar`]: Normalization, merging, completeness and point-in-time queries
//! - [`persistence`]: YAML snapshot documents and sinks
//! - [`services`]: Per-state refresh controllers, run tracking and scheduling
//! - [`config`]: TOML configuration
//! - [`http`]: Axum-based HTTP server and request handlers
//!

pub mod calendar;
pub mod clock;
pub mod config;
pub mod error;
pub mod models;
pub mod persistence;
pub mod services;
pub mod sources;

#[cfg(feature = "http-server")]
pub mod http;

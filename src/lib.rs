//! WAF decision engine library.
//!
//! Exposes the multi-signal scoring engine, its sliding-window rate
//! tracker, and the configuration and API glue used by the service binary.

pub mod api;
pub mod config;
pub mod core;
pub mod models;

//! hirestats - days-to-hire statistics
//!
//! Batch pipeline that turns raw job postings into an outlier-trimmed
//! days-to-hire snapshot per (standard job, country) and per standard job,
//! plus a read-only lookup over that snapshot.
//!
//! # Architecture
//! - `pipeline`: aggregator, chunked recompute driver, snapshot writer
//! - `storage`: SeaORM backend, grouped extraction, snapshot queries
//! - `services`: stats lookup service
//! - `api`: HTTP lookup and health endpoints
//! - `interfaces`: CLI commands
//! - `config`: Configuration management
//! - `runtime`: Application lifecycle and execution modes
//! - `system`: Logging and cancellation

pub mod api;
pub mod cli;
pub mod config;
pub mod errors;
pub mod interfaces;
pub mod pipeline;
pub mod runtime;
pub mod services;
pub mod storage;
pub mod system;
pub mod utils;

//! Disha course recommendation engine.
//!
//! Fits label encodings and a one-vs-rest decision-tree classifier from a
//! survey dataset at startup, then serves course recommendations over HTTP.

pub mod classifier;
pub mod config;
pub mod dataset;
pub mod encoding;
pub mod engine;
pub mod error;
pub mod literal;
pub mod routes;
pub mod types;

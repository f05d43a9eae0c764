//! Source client for the watched endpoint.
//!
//! This crate provides:
//! - `IdSource` trait for anything that can produce the current identifier list
//! - `HttpIdSource`, which GETs a JSON integer array over HTTP

pub mod client;
pub mod error;
pub mod http;

pub use client::IdSource;
pub use error::SourceError;
pub use http::HttpIdSource;

//! YAVIQ - client SDK for the YAVIQ token optimization service
//!
//! The optimization itself happens on the backend. This crate validates
//! parameters, builds authenticated requests, unwraps the backend's response
//! envelope and classifies failures.
//!
//! ## Key Features
//!
//! - **Prompt Optimization**: shrink free text in `safe`, `balanced` or `aggressive` mode
//! - **Structured Encoding**: JSON/YAML/CSV to and from the compact TOON format
//! - **Optimize and Run**: one-call input optimization, model call and answer compression,
//!   with RAG and chat-history variants
//! - **Savings Estimates**: local heuristic token counts, backend counts when reported

pub mod api;
pub mod commands;
pub mod config;
pub mod error;
pub mod optimization;
pub mod spinner;

pub use api::{
    EncodeResult, EnvelopeClient, HistoryMessage, HttpTransport, OptimizeResult,
    OptimizeRunOptions, RawResponse, Route, RunResult, Transport, YaviqClient,
};
pub use commands::Operation;
pub use config::{Config, ConfigBuilder, ConfigError, DEFAULT_ENDPOINT};
pub use error::{ClientError, ErrorKind};
pub use optimization::{estimate_tokens, normalize_mode, Mode, SavingsEstimate};

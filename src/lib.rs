//! codeshell: headless core of a browser code editor shell.
//!
//! - models: file tree and language mapping
//! - kernel: workspace store (state/action/effect), editor groups, context builder
//! - ai: gateway client for the hosted model
//! - server: HTTP proxy exposing the gateway
//! - config: CLI/env configuration for the proxy binary

pub mod ai;
pub mod config;
pub mod kernel;
pub mod models;
pub mod server;

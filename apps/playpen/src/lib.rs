//! # playpen
//!
//! Server, CLI and configuration around [`playpen_core`].
//!
//! The library target exists so integration tests can drive the router
//! without starting a real server.

pub mod api;
pub mod cli;
pub mod config;

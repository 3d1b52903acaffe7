//! Build Configuration Resolver Library
//!
//! This module exports the resolution engine for the build tool, its renderer
//! and its static generator.

pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod paths;
pub mod probe;

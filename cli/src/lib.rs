//! Health Calculator CLI Library
//!
//! Exposes the command, session and rendering modules for the `health-calc`
//! binary and its tests.

pub mod cli;
pub mod commands;
pub mod config;
pub mod controller;
pub mod error;
pub mod render;
pub mod session;

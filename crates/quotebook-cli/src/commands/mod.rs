//! Command handlers

pub mod config;
pub mod quote;
pub mod shell;
pub mod status;
pub mod sync;
pub mod transfer;

//! Voice-enabled chat assistant with task personas, document context and
//! reply translation.

pub mod adapters;
pub mod assistant;
pub mod config;
pub mod domain;
pub mod error;
pub mod ports;
pub mod utils;

//! Bulk WAN BFD mode changer
//!
//! Finds WAN interfaces whose circuit name contains a given text (case
//! insensitive) across every site of an SD-WAN tenant and, once confirmed,
//! sets their BFD mode. Link Quality Monitoring and Bandwidth Monitoring can
//! be switched in the same pass.

pub mod auth;
pub mod client;
pub mod commands;
pub mod config;
pub mod error;
pub mod matcher;
pub mod model;
pub mod output;
pub mod plan;
pub mod prompt;

pub use client::ControllerClient;
pub use error::{Error, Result};

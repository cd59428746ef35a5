//! CLI Commands

pub mod bfd;

pub use bfd::{find_matches, run, BfdUpdate, MatchedInterface, Summary};

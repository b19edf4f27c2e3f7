#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod error;
pub mod flags;
pub mod shell;

pub mod core;
pub mod highlight;
pub mod input;
pub mod parser;
pub mod process;

//! Database layer - repositories over the shared pool

pub mod repos;

pub use repos::*;

//! Domain logic

pub mod pull;

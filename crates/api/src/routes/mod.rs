//! Route Handlers

pub mod rank;

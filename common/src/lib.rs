//! Data types shared between the reporting service and its API clients.

pub mod model;
pub mod requests;

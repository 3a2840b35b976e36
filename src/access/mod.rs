//! Access codes and the services they unlock.

pub mod registry;

pub use registry::{AccessRegistry, Service};

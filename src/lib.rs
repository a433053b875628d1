pub mod actuators;
pub mod config;

#[cfg(feature = "backend")]
pub mod service;

//! Core traits for the dependency injection system.

pub mod resolver;

pub use resolver::Resolver;

//! Public library modules for the CLI crate
pub mod inputs;
pub mod render;

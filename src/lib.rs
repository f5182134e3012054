//! Application shell for the Holarium simulation.

pub mod app;

//! Command-line front end for the gridfire pipeline.

pub mod cli;

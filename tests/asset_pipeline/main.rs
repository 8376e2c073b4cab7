//! End-to-end tests for the `isoart-rs` asset pipeline

mod animation;
mod common;
mod sprites;
mod tiles;

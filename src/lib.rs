pub mod batch;
pub mod bind;
pub mod config;
pub mod encode;
pub mod error;
pub mod graph;
pub mod parse;
pub mod wasm;

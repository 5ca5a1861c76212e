//! Shared types and domain logic for the Chocorocks inventory dashboard
//!
//! This crate contains the models and the pure workflow logic shared between
//! the dashboard's data layer and the browser (via WASM). Nothing in here
//! performs I/O; everything compiles to native and to `wasm32`.

pub mod models;
pub mod movement;
pub mod stock;
pub mod types;
pub mod validation;

pub use models::*;
pub use movement::*;
pub use stock::*;
pub use types::*;
pub use validation::*;

// Tue Jan 20 2026 - Alex

pub mod core;

pub use self::core::{Engine, EngineState};

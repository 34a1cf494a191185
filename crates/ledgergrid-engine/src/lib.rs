//! ledgergrid_engine - Cell engine for the custom view grid.

pub mod builtins;
pub mod engine;

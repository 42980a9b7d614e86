//! Data types shared by the analyzers, the capture loader and the output layer.

pub mod capture;
pub mod core;
pub mod tokens;

pub use self::capture::*;
pub use self::core::*;
pub use self::tokens::*;

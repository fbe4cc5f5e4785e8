pub mod assembler;
pub mod constants;
pub mod parser;
pub mod runtime;

pub use self::assembler::{assemble, LoadError};
pub use self::runtime::{Computer, HaltReason, Snapshot, Status};

//! The four assemblers.
//!
//! Each assembler is a pure function from the entities created before it and
//! its own configuration block to the entities it creates. None of them
//! touches the graph; the composer in [`crate::site`] decides when each one
//! runs and registers what it returns.

pub mod cdn;
pub mod domain;
pub mod pipeline;
pub mod storage;

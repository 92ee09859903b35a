use std::io;

use thiserror::Error;

use crate::config::ConfigError;

pub type Result<T> = std::result::Result<T, VmError>;

#[derive(Debug, Error)]
pub enum VmError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("invalid cell address {pointer} (tape has {tape_size} cells)")]
    InvalidAddress { pointer: i64, tape_size: usize },

    #[error("failed to read input: {0}")]
    Input(#[source] io::Error),

    #[error("failed to write output: {0}")]
    Output(#[source] io::Error),

    /// A finite program ended while skipping a loop body.
    #[error("program ended inside the loop opened at opcode {position}")]
    UnterminatedLoop { position: usize },
}

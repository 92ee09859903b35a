//! Byte-tape machine for the eight-instruction tape language.
//!
//! The interpreter does not own a program text. It pulls already classified [`Opcode`]s from
//! any iterator, which may be finite (a classic program listing) or endless (opcodes derived
//! from a random generator). Everything pulled is recorded in a [`TokenHistory`], which is what
//! lets a loop close jump back to its matching open in a stream that can only be produced
//! forwards.
//!
//! A program stops without error when a finite source runs out or when a loop close has no
//! matching open anywhere in the history. Addressing a cell outside the tape and failing
//! input/output are errors ([`VmError`]).
#![forbid(unsafe_code)]

mod config;
mod error;
mod history;
mod interpreter;
mod opcode;
mod tape;

pub use config::{ConfigError, VmConfig, DEFAULT_EOF, DEFAULT_TAPE_SIZE, EOF_ENV, TAPE_SIZE_ENV};
pub use error::{Result, VmError};
pub use history::{BeginningOfHistory, TokenHistory};
pub use interpreter::{ExitReason, HaltReason, Interpreter, Step};
pub use opcode::Opcode;
pub use tape::Tape;

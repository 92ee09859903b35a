//! Runtime for braintwist, a language whose programs are lists of integer seeds.
//!
//! Each seed of a [`Program`] drives a delayed 64-bit Mersenne Twister; the twisters are XORed
//! into one stream, and the low three bits of every value select an [`Opcode`] of a classic
//! eight-instruction tape language. The opcode stream never ends, so a program stops only
//! when a loop close finds no matching loop open, or on an error.
//!
//! ```no_run
//! use braintwist::{Program, VmConfig};
//!
//! // `Cat`: echoes stdin to stdout.
//! let program = Program::new([(848406u64, 0u32)])?;
//! program.interpreter(VmConfig::default())?.run()?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! Splitting program text into seeds and line counts is left to the caller.
#![forbid(unsafe_code)]

mod adapter;
mod program;

pub use adapter::{decode, next_opcode, Opcodes, OPCODE_TABLE};
pub use program::{compose, Program, ProgramError, SeedLine};

pub use braintwist_gen::{CombineOp, Generator, LeafGenerator, Mt64, UnionGenerator};
pub use braintwist_tape::{
    BeginningOfHistory, ConfigError, ExitReason, HaltReason, Interpreter, Opcode, Step,
    TokenHistory, VmConfig, VmError,
};

use std::io::{Read, Write};

use braintwist_gen::{CombineOp, Generator};
use braintwist_tape::{Interpreter, VmConfig};
use thiserror::Error;

use crate::adapter::Opcodes;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProgramError {
    #[error("program has no seeds")]
    Empty,
}

/// One seed of a program and the number of line breaks that precede it in the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SeedLine {
    pub seed: u64,
    pub delay: u32,
}

impl SeedLine {
    pub fn new(seed: u64, delay: u32) -> Self {
        Self { seed, delay }
    }

    pub fn leaf(&self) -> Generator {
        Generator::leaf(self.seed, self.delay)
    }
}

impl From<(u64, u32)> for SeedLine {
    fn from((seed, delay): (u64, u32)) -> Self {
        Self::new(seed, delay)
    }
}

/// Combines one leaf per line, left to right, with `op`.
pub fn compose(lines: &[SeedLine], op: CombineOp) -> Result<Generator, ProgramError> {
    Generator::compose(lines.iter().map(SeedLine::leaf), op).ok_or(ProgramError::Empty)
}

/// A non-empty list of seed lines.
///
/// Running a program XORs one delayed Mersenne Twister per line into a single stream and
/// reads the low three bits of every value as an opcode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Program {
    lines: Vec<SeedLine>,
}

impl Program {
    pub fn new<I, L>(lines: I) -> Result<Self, ProgramError>
    where
        I: IntoIterator<Item = L>,
        L: Into<SeedLine>,
    {
        let lines: Vec<SeedLine> = lines.into_iter().map(Into::into).collect();
        if lines.is_empty() {
            return Err(ProgramError::Empty);
        }
        Ok(Self { lines })
    }

    pub fn lines(&self) -> &[SeedLine] {
        &self.lines
    }

    /// The program's generator with a caller-chosen operator instead of XOR.
    pub fn compose(&self, op: CombineOp) -> Generator {
        match compose(&self.lines, op) {
            Ok(generator) => generator,
            Err(ProgramError::Empty) => unreachable!("Program::new rejects empty line lists"),
        }
    }

    pub fn generator(&self) -> Generator {
        self.compose(CombineOp::Xor)
    }

    pub fn opcodes(&self) -> Opcodes {
        Opcodes::new(self.generator())
    }

    /// Interpreter on stdin/stdout. Fails only if `config` is invalid.
    pub fn interpreter(&self, config: VmConfig) -> braintwist_tape::Result<Interpreter<Opcodes>> {
        tracing::debug!(seeds = self.lines.len(), "building interpreter");
        Interpreter::new(self.opcodes(), config)
    }

    pub fn interpreter_with_io<R, W>(
        &self,
        config: VmConfig,
        input: R,
        output: W,
    ) -> braintwist_tape::Result<Interpreter<Opcodes, R, W>>
    where
        R: Read,
        W: Write,
    {
        tracing::debug!(seeds = self.lines.len(), "building interpreter");
        Interpreter::with_io(self.opcodes(), config, input, output)
    }
}

use thiserror::Error;

use crate::opcode::Opcode;

/// A backward scan ran past the first recorded opcode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("beginning of opcode history")]
pub struct BeginningOfHistory;

/// Append-only log of every opcode pulled from a source, with a cursor that can be moved
/// back over already recorded opcodes and forward again.
///
/// The source is only consulted when the cursor sits at the end of the log. Positions that
/// were recorded once are always served from the log, so a source such as a random
/// generator is never asked to reproduce a value it already produced.
#[derive(Debug, Clone)]
pub struct TokenHistory<I> {
    source: I,
    tokens: Vec<Opcode>,
    cursor: usize,
}

impl<I> TokenHistory<I>
where
    I: Iterator<Item = Opcode>,
{
    pub fn new(source: I) -> Self {
        Self {
            source,
            tokens: Vec::new(),
            cursor: 0,
        }
    }

    /// Returns the opcode at the cursor and moves past it.
    ///
    /// `None` means the source is exhausted; an infinite source never returns it.
    pub fn advance(&mut self) -> Option<Opcode> {
        if let Some(&op) = self.tokens.get(self.cursor) {
            self.cursor += 1;
            return Some(op);
        }

        let op = self.source.next()?;
        self.tokens.push(op);
        self.cursor += 1;
        Some(op)
    }

    /// Steps the cursor back by one and returns the opcode before the one last returned by
    /// [`advance`](Self::advance).
    ///
    /// After `retreat` yields some opcode `op`, the next `advance` returns the opcode
    /// following `op`.
    pub fn retreat(&mut self) -> Result<Opcode, BeginningOfHistory> {
        if self.cursor <= 1 {
            return Err(BeginningOfHistory);
        }
        self.cursor -= 1;
        Ok(self.tokens[self.cursor - 1])
    }
}

impl<I> TokenHistory<I> {
    /// Number of opcodes recorded so far.
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn as_slice(&self) -> &[Opcode] {
        &self.tokens
    }

    pub fn source(&self) -> &I {
        &self.source
    }
}

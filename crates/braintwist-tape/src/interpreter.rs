use std::io::{self, BufReader, Read, Stdin, Stdout, Write};

use crate::config::VmConfig;
use crate::error::{Result, VmError};
use crate::history::{BeginningOfHistory, TokenHistory};
use crate::opcode::Opcode;
use crate::tape::Tape;

/// Why a program stopped without an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HaltReason {
    /// A finite opcode source ran out at an instruction boundary.
    EndOfProgram,
    /// A loop close found no matching open in the history. This is how generated programs,
    /// whose opcode stream never ends, terminate.
    UnmatchedLoopClose,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Continue,
    Halt(HaltReason),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitReason {
    Halted(HaltReason),
    StepLimit,
}

/// Tape machine driven by an opcode stream.
///
/// The stream is recorded in a [`TokenHistory`] as it is consumed so that loop closes can
/// scan backwards over opcodes that were produced earlier. The machine owns its tape,
/// history and streams; one interpreter runs one program.
pub struct Interpreter<I, R = Stdin, W = Stdout> {
    history: TokenHistory<I>,
    tape: Tape,
    pointer: i64,
    input: BufReader<R>,
    output: W,
    eof: u8,
    steps: u64,
    halted: Option<HaltReason>,
}

impl<I> Interpreter<I>
where
    I: Iterator<Item = Opcode>,
{
    /// Interpreter reading from stdin and writing to stdout.
    pub fn new(source: I, config: VmConfig) -> Result<Self> {
        Self::with_io(source, config, io::stdin(), io::stdout())
    }
}

impl<I, R, W> Interpreter<I, R, W>
where
    I: Iterator<Item = Opcode>,
    R: Read,
    W: Write,
{
    /// Fails with [`VmError::Config`] if `config` does not pass [`VmConfig::validate`].
    pub fn with_io(source: I, config: VmConfig, input: R, output: W) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            history: TokenHistory::new(source),
            tape: Tape::new(config.tape_size),
            pointer: 0,
            input: BufReader::new(input),
            output,
            eof: config.eof,
            steps: 0,
            halted: None,
        })
    }

    /// Executes one opcode.
    ///
    /// Loops are handled within the step that reaches the bracket: a skipped loop body or a
    /// backward scan to the matching open never spans more than one call. Once the program
    /// has halted, further calls report the same halt without executing anything.
    pub fn step(&mut self) -> Result<Step> {
        if let Some(reason) = self.halted {
            return Ok(Step::Halt(reason));
        }
        let Some(op) = self.history.advance() else {
            return Ok(self.halt(HaltReason::EndOfProgram));
        };
        self.steps += 1;

        match op {
            Opcode::Increment => {
                let cell = self.tape.get_mut(self.pointer)?;
                *cell = cell.wrapping_add(1);
            }
            Opcode::Decrement => {
                let cell = self.tape.get_mut(self.pointer)?;
                *cell = cell.wrapping_sub(1);
            }
            Opcode::MoveRight => self.pointer = self.pointer.wrapping_add(1),
            Opcode::MoveLeft => self.pointer = self.pointer.wrapping_sub(1),
            Opcode::Read => {
                self.tape.get(self.pointer)?;
                let byte = self.read_byte()?;
                *self.tape.get_mut(self.pointer)? = byte;
            }
            Opcode::Write => {
                let byte = self.tape.get(self.pointer)?;
                self.output.write_all(&[byte]).map_err(VmError::Output)?;
            }
            Opcode::LoopOpen => {
                if self.tape.get(self.pointer)? == 0 {
                    self.skip_loop()?;
                }
            }
            Opcode::LoopClose => {
                if self.tape.get(self.pointer)? != 0 && self.rewind_loop().is_err() {
                    return Ok(self.halt(HaltReason::UnmatchedLoopClose));
                }
            }
        }

        Ok(Step::Continue)
    }

    fn halt(&mut self, reason: HaltReason) -> Step {
        self.halted = Some(reason);
        Step::Halt(reason)
    }

    /// Steps until the program halts. Output is flushed before returning.
    pub fn run(&mut self) -> Result<HaltReason> {
        tracing::debug!(tape_size = self.tape.len(), eof = self.eof, "run started");
        loop {
            match self.step() {
                Ok(Step::Continue) => {}
                Ok(Step::Halt(reason)) => return self.finish(reason),
                Err(err) => return self.fail(err),
            }
        }
    }

    /// Like [`run`](Self::run), but gives up after `max_steps` executed opcodes.
    pub fn run_bounded(&mut self, max_steps: u64) -> Result<ExitReason> {
        tracing::debug!(
            tape_size = self.tape.len(),
            eof = self.eof,
            max_steps,
            "run started"
        );
        let mut executed = 0u64;
        while executed < max_steps {
            match self.step() {
                Ok(Step::Continue) => executed += 1,
                Ok(Step::Halt(reason)) => return self.finish(reason).map(ExitReason::Halted),
                Err(err) => return self.fail(err),
            }
        }

        self.output.flush().map_err(VmError::Output)?;
        tracing::debug!(steps = self.steps, "step limit reached");
        Ok(ExitReason::StepLimit)
    }

    fn finish(&mut self, reason: HaltReason) -> Result<HaltReason> {
        self.output.flush().map_err(VmError::Output)?;
        tracing::debug!(
            ?reason,
            steps = self.steps,
            history_len = self.history.len(),
            "program halted"
        );
        Ok(reason)
    }

    fn fail<T>(&mut self, err: VmError) -> Result<T> {
        // Keep what the program already wrote; the step error is the one returned.
        if let Err(flush_err) = self.output.flush() {
            tracing::debug!("flush after failure also failed: {flush_err}");
        }
        tracing::debug!(steps = self.steps, pointer = self.pointer, "program failed: {err}");
        Err(err)
    }

    fn read_byte(&mut self) -> Result<u8> {
        // Prompts written without a trailing newline must be visible before blocking on input.
        self.output.flush().map_err(VmError::Output)?;

        let mut byte = [0u8; 1];
        loop {
            match self.input.read(&mut byte) {
                Ok(0) => return Ok(self.eof),
                Ok(_) => return Ok(byte[0]),
                Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
                Err(err) => return Err(VmError::Input(err)),
            }
        }
    }

    /// Consumes opcodes up to and including the loop close matching the open just executed.
    fn skip_loop(&mut self) -> Result<()> {
        let position = self.history.cursor() - 1;
        let mut depth = 0usize;
        loop {
            match self.history.advance() {
                None => return Err(VmError::UnterminatedLoop { position }),
                Some(Opcode::LoopOpen) => depth += 1,
                Some(Opcode::LoopClose) if depth == 0 => break,
                Some(Opcode::LoopClose) => depth -= 1,
                Some(_) => {}
            }
        }
        tracing::trace!(
            from = position,
            to = self.history.cursor() - 1,
            "skipped loop body"
        );
        Ok(())
    }

    /// Moves the cursor back so the next opcode is the first one of the loop body.
    fn rewind_loop(&mut self) -> std::result::Result<(), BeginningOfHistory> {
        let from = self.history.cursor() - 1;
        let mut depth = 0usize;
        loop {
            match self.history.retreat()? {
                Opcode::LoopClose => depth += 1,
                Opcode::LoopOpen if depth == 0 => break,
                Opcode::LoopOpen => depth -= 1,
                _ => {}
            }
        }
        tracing::trace!(from, to = self.history.cursor() - 1, "rewound to loop open");
        Ok(())
    }

    pub fn output(&self) -> &W {
        &self.output
    }

    pub fn into_output(self) -> W {
        self.output
    }
}

impl<I, R, W> Interpreter<I, R, W> {
    pub fn pointer(&self) -> i64 {
        self.pointer
    }

    pub fn tape(&self) -> &[u8] {
        self.tape.as_slice()
    }

    /// Cells can be preset before running, e.g. to hand a program arguments.
    pub fn tape_mut(&mut self) -> &mut [u8] {
        self.tape.as_mut_slice()
    }

    /// Opcodes executed so far. Opcodes passed over while matching loops are not counted.
    pub fn steps(&self) -> u64 {
        self.steps
    }

    pub fn history(&self) -> &TokenHistory<I> {
        &self.history
    }

    pub fn eof(&self) -> u8 {
        self.eof
    }

    /// Why the program stopped, once it has.
    pub fn halted(&self) -> Option<HaltReason> {
        self.halted
    }
}

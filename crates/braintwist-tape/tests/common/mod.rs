#![allow(dead_code)]

use std::io;
use std::sync::{Arc, Mutex};

use braintwist_tape::{Interpreter, Opcode, VmConfig};

/// Opcodes spelled in the classic one-character notation; other characters are skipped.
pub fn listing(src: &str) -> Vec<Opcode> {
    src.chars()
        .filter_map(|c| Opcode::ALL.into_iter().find(|op| op.symbol() == c))
        .collect()
}

pub type TestInterpreter<'a> = Interpreter<std::vec::IntoIter<Opcode>, &'a [u8], Vec<u8>>;

pub fn interpreter<'a>(src: &str, config: VmConfig, input: &'a [u8]) -> TestInterpreter<'a> {
    init_tracing();
    Interpreter::with_io(listing(src).into_iter(), config, input, Vec::new())
        .expect("test config is valid")
}

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Writer whose every write fails.
pub struct BrokenPipe;

impl io::Write for BrokenPipe {
    fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
        Err(io::Error::new(io::ErrorKind::BrokenPipe, "sink closed"))
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Reader whose every read fails.
pub struct FailingInput;

impl io::Read for FailingInput {
    fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
        Err(io::Error::new(io::ErrorKind::Other, "device unplugged"))
    }
}

/// Writer that fails on both write and flush.
pub struct DeadSink;

impl io::Write for DeadSink {
    fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
        Err(io::Error::new(io::ErrorKind::BrokenPipe, "sink closed"))
    }

    fn flush(&mut self) -> io::Result<()> {
        Err(io::Error::new(io::ErrorKind::BrokenPipe, "sink closed"))
    }
}

/// Shared buffer that collects formatted tracing output.
#[derive(Clone, Default)]
pub struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
    pub fn contents(&self) -> String {
        let buf = self.0.lock().unwrap();
        String::from_utf8_lossy(&buf).into_owned()
    }

    /// Runs `f` with a debug-level subscriber writing into this buffer.
    pub fn capture<T>(&self, f: impl FnOnce() -> T) -> T {
        let logs = self.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_ansi(false)
            .with_writer(move || logs.clone())
            .finish();
        tracing::subscriber::with_default(subscriber, f)
    }
}

impl io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

use std::{
    collections::TryReserveError,
    io::{Read, Write},
};

use crossterm::{style, QueueableCommand};

/// Bytes added to the line buffer every time it runs full.
pub const LINE_CHUNK: usize = 1024;

#[derive(Debug, thiserror::Error)]
pub enum ReadLineError {
    #[error("Allocation error")]
    Allocation(#[from] TryReserveError),
    #[error("Io Error <{0}>")]
    Io(#[from] std::io::Error),
}

/// One line of input with the newline stripped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    text: String,
}

impl Line {
    pub fn as_str(&self) -> &str {
        &self.text
    }
}

/// What a single read produced.
#[derive(Debug, PartialEq, Eq)]
pub enum Input {
    Line(Line),
    /// The stream ended before a single byte of a new line arrived.
    EndOfInput,
}

struct LineBuffer {
    buf: Vec<u8>,
}

impl LineBuffer {
    fn new() -> Result<Self, TryReserveError> {
        let mut buf = Vec::new();
        buf.try_reserve_exact(LINE_CHUNK)?;
        Ok(Self { buf })
    }

    fn push(&mut self, byte: u8) -> Result<(), TryReserveError> {
        if self.buf.len() == self.buf.capacity() {
            self.buf.try_reserve_exact(LINE_CHUNK)?;
        }
        self.buf.push(byte);
        Ok(())
    }

    fn finish(self) -> Line {
        let text = match String::from_utf8(self.buf) {
            Ok(text) => text,
            Err(err) => String::from_utf8_lossy(err.as_bytes()).into_owned(),
        };
        Line { text }
    }
}

/// Reads bytes until a newline or the end of the stream.
///
/// The buffer has no upper bound; it grows by [`LINE_CHUNK`] whenever it is
/// full. A failed reservation is returned as [`ReadLineError::Allocation`].
pub fn read_line(input: &mut impl Read) -> Result<Input, ReadLineError> {
    let mut line = LineBuffer::new()?;
    let mut read_any = false;

    for byte in input.bytes() {
        let byte = byte?;
        read_any = true;
        if byte == b'\n' {
            return Ok(Input::Line(line.finish()));
        }
        line.push(byte)?;
    }

    if !read_any {
        return Ok(Input::EndOfInput);
    }

    Ok(Input::Line(line.finish()))
}

pub fn write_prompt(stdout: &mut impl Write, prompt: &str) -> std::io::Result<()> {
    stdout.queue(style::Print(prompt))?;
    stdout.flush()
}

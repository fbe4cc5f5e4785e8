//! Console used by the system calls

use std::io::{self, BufRead, Cursor, Stdout, StdinLock, Write};

/// Text input and output of a running program
pub trait Console {
    /// Write bytes, flushed right away
    ///
    /// # Errors
    ///
    /// Forwards the underlying I/O errors
    fn write(&mut self, bytes: &[u8]) -> io::Result<()>;

    /// Read a whitespace-delimited signed integer. Returns `None` at the end of the input or if
    /// the input is not an integer.
    ///
    /// # Errors
    ///
    /// Forwards the underlying I/O errors
    fn read_int(&mut self) -> io::Result<Option<i32>>;

    /// Read a line, without its terminator. Returns `None` at the end of the input.
    ///
    /// # Errors
    ///
    /// Forwards the underlying I/O errors
    fn read_line(&mut self) -> io::Result<Option<Vec<u8>>>;

    /// Read the next non-whitespace byte. Returns `None` at the end of the input.
    ///
    /// # Errors
    ///
    /// Forwards the underlying I/O errors
    fn read_char(&mut self) -> io::Result<Option<u8>>;
}

/// A console over a pair of streams
#[derive(Debug)]
pub struct StreamConsole<R, W> {
    input: R,
    output: W,
}

/// Console reading the process standard input and writing to its standard output
pub type NativeConsole = StreamConsole<StdinLock<'static>, Stdout>;

/// Console with a fixed input, capturing its output
pub type InMemoryConsole = StreamConsole<Cursor<Vec<u8>>, Vec<u8>>;

impl<R, W> StreamConsole<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn output(&self) -> &W {
        &self.output
    }

    pub fn into_parts(self) -> (R, W) {
        (self.input, self.output)
    }
}

impl Default for NativeConsole {
    fn default() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl InMemoryConsole {
    pub fn with_input(input: impl Into<Vec<u8>>) -> Self {
        Self::new(Cursor::new(input.into()), Vec::new())
    }

    /// Everything written so far, lossily decoded
    pub fn output_string(&self) -> String {
        String::from_utf8_lossy(&self.output).into_owned()
    }
}

impl<R: BufRead, W> StreamConsole<R, W> {
    fn peek(&mut self) -> io::Result<Option<u8>> {
        Ok(self.input.fill_buf()?.first().copied())
    }

    fn skip_whitespace(&mut self) -> io::Result<()> {
        while let Some(byte) = self.peek()? {
            if !byte.is_ascii_whitespace() {
                break;
            }
            self.input.consume(1);
        }

        Ok(())
    }
}

impl<R: BufRead, W: Write> Console for StreamConsole<R, W> {
    fn write(&mut self, bytes: &[u8]) -> io::Result<()> {
        self.output.write_all(bytes)?;
        self.output.flush()
    }

    fn read_int(&mut self) -> io::Result<Option<i32>> {
        self.skip_whitespace()?;

        let mut literal = String::new();
        if let Some(sign @ (b'+' | b'-')) = self.peek()? {
            literal.push(char::from(sign));
            self.input.consume(1);
        }

        while let Some(digit) = self.peek()?.filter(u8::is_ascii_digit) {
            literal.push(char::from(digit));
            self.input.consume(1);
        }

        Ok(literal.parse().ok())
    }

    fn read_line(&mut self) -> io::Result<Option<Vec<u8>>> {
        let mut line = Vec::new();
        if self.input.read_until(b'\n', &mut line)? == 0 {
            return Ok(None);
        }

        if line.last() == Some(&b'\n') {
            line.pop();
            if line.last() == Some(&b'\r') {
                line.pop();
            }
        }

        Ok(Some(line))
    }

    fn read_char(&mut self) -> io::Result<Option<u8>> {
        self.skip_whitespace()?;
        let byte = self.peek()?;
        if byte.is_some() {
            self.input.consume(1);
        }

        Ok(byte)
    }
}

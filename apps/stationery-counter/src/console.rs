//! # Console
//!
//! Line and token reader over any `BufRead`, paired with a `Write` sink.
//!
//! Integers are read as whitespace-delimited tokens, so `2 3` on one line
//! answers both the product and the quantity prompt. Names are read as
//! whole lines.

use std::collections::VecDeque;
use std::fmt::Display;
use std::io::{self, BufRead, ErrorKind, Write};

use crate::error::{SessionError, SessionResult};

/// Result of reading one integer token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IntToken {
    Value(i64),
    /// The token was not an integer. The rest of its line is discarded.
    Invalid(String),
}

pub struct Console<R, W> {
    input: R,
    output: W,
    pending: VecDeque<String>,
    line_buffer: String,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Console {
            input,
            output,
            pending: VecDeque::new(),
            line_buffer: String::new(),
        }
    }

    /// Writes one full line.
    pub fn say(&mut self, line: impl Display) -> SessionResult<()> {
        writeln!(self.output, "{line}")?;
        Ok(())
    }

    /// Writes a prompt without a newline and flushes it.
    pub fn prompt(&mut self, text: &str) -> SessionResult<()> {
        write!(self.output, "{text}")?;
        self.output.flush()?;
        Ok(())
    }

    /// Reads the next whole line, or what is left of the current one.
    ///
    /// The returned text has its line terminator stripped but is otherwise
    /// untouched.
    pub fn next_line(&mut self) -> SessionResult<String> {
        if !self.pending.is_empty() {
            let rest: Vec<String> = self.pending.drain(..).collect();
            return Ok(rest.join(" "));
        }

        self.read_raw_line()
    }

    /// Reads the next whitespace-delimited token, crossing blank lines.
    pub fn next_token(&mut self) -> SessionResult<String> {
        loop {
            if let Some(token) = self.pending.pop_front() {
                return Ok(token);
            }

            let line = self.read_raw_line()?;
            self.pending
                .extend(line.split_whitespace().map(str::to_string));
        }
    }

    /// Reads the next token as an integer.
    pub fn next_int(&mut self) -> SessionResult<IntToken> {
        let token = self.next_token()?;

        match token.parse::<i64>() {
            Ok(value) => Ok(IntToken::Value(value)),
            Err(_) => {
                self.pending.clear();
                Ok(IntToken::Invalid(token))
            }
        }
    }

    /// Hands back the output sink.
    pub fn into_output(self) -> W {
        self.output
    }

    fn read_raw_line(&mut self) -> SessionResult<String> {
        loop {
            self.line_buffer.clear();

            match self.input.read_line(&mut self.line_buffer) {
                Ok(0) => return Err(SessionError::InputClosed),
                Ok(_) => {
                    let line = self.line_buffer.trim_end_matches(['\n', '\r']);
                    return Ok(line.to_string());
                }
                Err(error) if error.kind() == ErrorKind::Interrupted => continue,
                Err(error) => return Err(error.into()),
            }
        }
    }
}

/// Console bound to the process's stdin and stdout.
pub type StdConsole = Console<io::StdinLock<'static>, io::StdoutLock<'static>>;

impl StdConsole {
    /// Locks stdin and stdout for the lifetime of the session.
    pub fn stdio() -> Self {
        Console::new(io::stdin().lock(), io::stdout().lock())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn console(input: &str) -> Console<Cursor<Vec<u8>>, Vec<u8>> {
        Console::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    #[test]
    fn test_tokens_span_lines() {
        let mut console = console("2 3\n\n  -1\n");

        assert_eq!(console.next_int().unwrap(), IntToken::Value(2));
        assert_eq!(console.next_int().unwrap(), IntToken::Value(3));
        assert_eq!(console.next_int().unwrap(), IntToken::Value(-1));
        assert!(matches!(
            console.next_int().unwrap_err(),
            SessionError::InputClosed
        ));
    }

    #[test]
    fn test_invalid_token_discards_rest_of_line() {
        let mut console = console("abc 5\n7\n");

        assert_eq!(
            console.next_int().unwrap(),
            IntToken::Invalid("abc".to_string())
        );
        assert_eq!(console.next_int().unwrap(), IntToken::Value(7));
    }

    #[test]
    fn test_next_line_keeps_inner_spaces() {
        let mut console = console("John Smith\r\n");

        assert_eq!(console.next_line().unwrap(), "John Smith");
        assert!(matches!(
            console.next_line().unwrap_err(),
            SessionError::InputClosed
        ));
    }

    #[test]
    fn test_prompt_has_no_newline() {
        let mut console = console("");

        console.prompt("Enter quantity: ").unwrap();
        console.say("Quantity reduced.").unwrap();

        let output = String::from_utf8(console.into_output()).unwrap();
        assert_eq!(output, "Enter quantity: Quantity reduced.\n");
    }
}

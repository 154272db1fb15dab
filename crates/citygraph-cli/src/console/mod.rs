//! Line-oriented console used for reports and prompts.
//!
//! Reports go to the output writer; logs are separate and go through tracing.

use std::io::{self, BufRead, StdinLock, Stdout, Write};

/// Width of the `=` rules framing banners and headers.
pub const RULE_WIDTH: usize = 60;

/// Paired input and output streams.
#[derive(Debug)]
pub struct Console<R, W> {
    input: R,
    output: W,
}

impl Console<StdinLock<'static>, Stdout> {
    /// Console bound to the process's stdin and stdout.
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> Console<R, W> {
    /// Creates a console over the given streams.
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Asks a question on the same line and reads the trimmed answer.
    ///
    /// Returns `None` once the input is exhausted.
    pub fn prompt(&mut self, question: &str) -> io::Result<Option<String>> {
        write!(self.output, "{question}")?;
        self.output.flush()?;

        let mut answer = String::new();
        if self.input.read_line(&mut answer)? == 0 {
            writeln!(self.output)?;
            return Ok(None);
        }

        Ok(Some(answer.trim().to_owned()))
    }

    /// Writes a full-width rule.
    pub fn rule(&mut self) -> io::Result<()> {
        writeln!(self.output, "{}", "=".repeat(RULE_WIDTH))
    }

    /// Writes a title framed by rules.
    pub fn banner(&mut self, title: &str) -> io::Result<()> {
        self.rule()?;
        writeln!(self.output, "{title}")?;
        self.rule()
    }

    /// Writes an indented section header preceded by a blank line.
    pub fn header(&mut self, title: &str) -> io::Result<()> {
        writeln!(self.output)?;
        self.rule()?;
        writeln!(self.output, "  {title}")?;
        self.rule()
    }

    /// Consumes the console, returning the output writer.
    #[cfg(test)]
    pub fn into_output(self) -> W {
        self.output
    }
}

impl<R, W: Write> Write for Console<R, W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.output.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.output.flush()
    }
}

/// Console reading from a fixed script and capturing everything written.
#[cfg(test)]
pub fn scripted(input: &str) -> Console<io::Cursor<Vec<u8>>, Vec<u8>> {
    Console::new(io::Cursor::new(input.as_bytes().to_vec()), Vec::new())
}

/// Captured output as text.
#[cfg(test)]
pub fn captured(console: Console<io::Cursor<Vec<u8>>, Vec<u8>>) -> String {
    String::from_utf8(console.into_output()).expect("console output is UTF-8")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_reads_trimmed_lines() {
        let mut console = scripted("  yes  \nsecond\n");

        assert_eq!(console.prompt("? ").unwrap().as_deref(), Some("yes"));
        assert_eq!(console.prompt("? ").unwrap().as_deref(), Some("second"));
        assert_eq!(console.prompt("? ").unwrap(), None);
    }

    #[test]
    fn test_header_layout() {
        let mut console = scripted("");
        console.header("Test Summary").unwrap();

        let rule = "=".repeat(RULE_WIDTH);
        assert_eq!(captured(console), format!("\n{rule}\n  Test Summary\n{rule}\n"));
    }
}

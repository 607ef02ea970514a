// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::io::{self, Write};

use crossterm::{QueueableCommand,
                cursor::{MoveLeft, MoveRight, MoveTo, MoveToColumn},
                terminal::{Clear, ClearType}};

use crate::DEFAULT_PROMPT_TEMPLATE;

/// The terminal surface and screen utilities that the line editor renders through.
///
/// The cursor primitives ([`Self::move_left`], [`Self::move_right`],
/// [`Self::write_text`]) are what incremental updates use. [`Self::reset_input_display`]
/// is the full redraw primitive: it blanks the current row and writes the prompt followed
/// by the line, leaving the visual cursor at the end of the line.
///
/// Implementations must treat `n == 0` moves as no-ops.
pub trait RenderBackend {
    /// Write text at the visual cursor, advancing it.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal write fails.
    fn write_text(&mut self, text: &str) -> io::Result<()>;

    /// # Errors
    ///
    /// Returns an error if the terminal write fails.
    fn move_left(&mut self, n: usize) -> io::Result<()>;

    /// # Errors
    ///
    /// Returns an error if the terminal write fails.
    fn move_right(&mut self, n: usize) -> io::Result<()>;

    /// Write `line` and move to the start of the next row.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal write fails.
    fn writeln(&mut self, line: &str) -> io::Result<()>;

    /// Write a fresh prompt for `cwd` at the visual cursor.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal write fails.
    fn prompt(&mut self, cwd: &str) -> io::Result<()>;

    /// Clear the whole screen and move home.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal write fails.
    fn clear_screen(&mut self) -> io::Result<()>;

    /// Blank the current row, then write the prompt for `cwd` and `line`.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal write fails.
    fn reset_input_display(&mut self, cwd: &str, line: &str) -> io::Result<()>;

    /// # Errors
    ///
    /// Returns an error if flushing the terminal fails.
    fn flush(&mut self) -> io::Result<()>;
}

/// Turns a prompt template like `"{cwd} $ "` into the prompt for a given working
/// directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptTemplate {
    pub template: String,
}

impl Default for PromptTemplate {
    fn default() -> Self { Self::new(DEFAULT_PROMPT_TEMPLATE) }
}

impl PromptTemplate {
    pub const CWD_PLACEHOLDER: &'static str = "{cwd}";

    #[must_use]
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
        }
    }

    #[must_use]
    pub fn render(&self, cwd: &str) -> String {
        self.template.replace(Self::CWD_PLACEHOLDER, cwd)
    }

    /// Number of columns the prompt takes up, ignoring any ANSI styling in it.
    #[must_use]
    pub fn display_width(&self, cwd: &str) -> usize {
        strip_ansi_escapes::strip_str(self.render(cwd)).chars().count()
    }
}

/// A [`RenderBackend`] that emits ANSI escape sequences (via crossterm commands) to any
/// [`Write`] implementation. Cursor motion uses `CSI n D` / `CSI n C`, which is what
/// xterm compatible surfaces expect.
#[derive(Debug)]
pub struct AnsiRenderBackend<W: Write> {
    pub term: W,
    pub prompt_template: PromptTemplate,
}

impl<W: Write> AnsiRenderBackend<W> {
    pub fn new(term: W, prompt_template: PromptTemplate) -> Self {
        Self {
            term,
            prompt_template,
        }
    }
}

impl<W: Write> RenderBackend for AnsiRenderBackend<W> {
    fn write_text(&mut self, text: &str) -> io::Result<()> {
        self.term.write_all(text.as_bytes())
    }

    fn move_left(&mut self, n: usize) -> io::Result<()> {
        for chunk in u16_chunks(n) {
            self.term.queue(MoveLeft(chunk))?;
        }
        Ok(())
    }

    fn move_right(&mut self, n: usize) -> io::Result<()> {
        for chunk in u16_chunks(n) {
            self.term.queue(MoveRight(chunk))?;
        }
        Ok(())
    }

    fn writeln(&mut self, line: &str) -> io::Result<()> {
        // Raw mode: a bare `\n` doesn't return the carriage.
        write!(self.term, "{line}\r\n")
    }

    fn prompt(&mut self, cwd: &str) -> io::Result<()> {
        let prompt = self.prompt_template.render(cwd);
        self.term.write_all(prompt.as_bytes())
    }

    fn clear_screen(&mut self) -> io::Result<()> {
        self.term.queue(Clear(ClearType::All))?.queue(MoveTo(0, 0))?;
        Ok(())
    }

    fn reset_input_display(&mut self, cwd: &str, line: &str) -> io::Result<()> {
        self.term
            .queue(MoveToColumn(0))?
            .queue(Clear(ClearType::CurrentLine))?;
        let prompt = self.prompt_template.render(cwd);
        write!(self.term, "{prompt}{line}")
    }

    fn flush(&mut self) -> io::Result<()> { self.term.flush() }
}

/// Split a column count into non zero `u16` steps. `0` yields nothing, since `CSI 0 D`
/// moves one column on most terminals.
fn u16_chunks(n: usize) -> impl Iterator<Item = u16> {
    let max = usize::from(u16::MAX);
    let full = n / max;
    let rest = n % max;
    std::iter::repeat_n(u16::MAX, full)
        .chain((rest > 0).then(|| u16::try_from(rest).unwrap_or(u16::MAX)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_fixtures::StdoutMock;
    use pretty_assertions::assert_eq;

    fn backend() -> (AnsiRenderBackend<StdoutMock>, StdoutMock) {
        let stdout_mock = StdoutMock::default();
        let backend = AnsiRenderBackend::new(stdout_mock.clone(), PromptTemplate::new("{cwd} $ "));
        (backend, stdout_mock)
    }

    #[test]
    fn test_prompt_template() {
        let template = PromptTemplate::new("\x1b[32m{cwd}\x1b[0m $ ");
        assert_eq!(template.render("~"), "\x1b[32m~\x1b[0m $ ");
        assert_eq!(template.display_width("~"), 4);
    }

    #[test]
    fn test_move_left_and_right_sequences() {
        let (mut backend, stdout_mock) = backend();
        backend.move_left(3).unwrap();
        backend.move_right(1).unwrap();
        assert_eq!(stdout_mock.get_copy_of_buffer_as_string(), "\x1b[3D\x1b[1C");
    }

    #[test]
    fn test_zero_move_writes_nothing() {
        let (mut backend, stdout_mock) = backend();
        backend.move_left(0).unwrap();
        backend.move_right(0).unwrap();
        assert_eq!(stdout_mock.get_copy_of_buffer_as_string(), "");
    }

    #[test]
    fn test_reset_input_display() {
        let (mut backend, stdout_mock) = backend();
        backend.reset_input_display("/tmp", "ls -la").unwrap();
        let output = stdout_mock.get_copy_of_buffer_as_string();
        assert!(output.starts_with("\x1b[1G\x1b[2K"), "got: {output:?}");
        assert_eq!(stdout_mock.get_copy_of_buffer_as_string_strip_ansi(), "/tmp $ ls -la");
    }

    #[test]
    fn test_writeln_uses_crlf() {
        let (mut backend, stdout_mock) = backend();
        backend.writeln("^C").unwrap();
        assert_eq!(stdout_mock.get_copy_of_buffer_as_string(), "^C\r\n");
    }

    #[test]
    fn test_u16_chunks() {
        assert_eq!(u16_chunks(0).count(), 0);
        assert_eq!(u16_chunks(5).collect::<Vec<_>>(), vec![5]);
        assert_eq!(
            u16_chunks(usize::from(u16::MAX) + 2).collect::<Vec<_>>(),
            vec![u16::MAX, 2]
        );
    }
}

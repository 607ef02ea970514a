// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::io;

use crate::{InputBuffer, PromptTemplate, RenderBackend};

/// A [`RenderBackend`] that applies every operation to an in memory grid of chars,
/// instead of emitting escape sequences. This makes it possible to assert what a user
/// would actually see: the text of each row, and where the visual cursor is.
///
/// The grid has no width limit and never scrolls.
#[derive(Debug, Clone)]
pub struct ScreenModel {
    pub rows: Vec<Vec<char>>,
    pub row: usize,
    pub col: usize,
    pub prompt_template: PromptTemplate,
    /// Number of [`RenderBackend`] calls so far, including flushes.
    pub op_count: usize,
}

impl ScreenModel {
    #[must_use]
    pub fn new(prompt_template: &str) -> Self {
        Self {
            rows: vec![vec![]],
            row: 0,
            col: 0,
            prompt_template: PromptTemplate::new(prompt_template),
            op_count: 0,
        }
    }

    #[must_use]
    pub fn row_text(&self, row: usize) -> String {
        self.rows
            .get(row)
            .map(|it| it.iter().collect())
            .unwrap_or_default()
    }

    #[must_use]
    pub fn current_row_text(&self) -> String { self.row_text(self.row) }

    /// The prompt for `cwd` as it appears on screen, without styling.
    #[must_use]
    pub fn visible_prompt(&self, cwd: &str) -> String {
        strip_ansi_escapes::strip_str(self.prompt_template.render(cwd))
    }

    /// Assert that the current row shows the prompt followed by the buffer text, and the
    /// visual cursor sits on the buffer's cursor.
    ///
    /// # Panics
    ///
    /// Panics if the screen and the buffer disagree.
    pub fn assert_in_sync(&self, cwd: &str, buffer: &InputBuffer) {
        pretty_assertions::assert_eq!(
            self.current_row_text(),
            format!("{}{}", self.visible_prompt(cwd), buffer.text())
        );
        pretty_assertions::assert_eq!(
            self.col,
            self.prompt_template.display_width(cwd) + buffer.cursor(),
            "visual cursor column"
        );
    }

    fn put_str(&mut self, text: &str) {
        for ch in text.chars() {
            let line = &mut self.rows[self.row];
            if line.len() <= self.col {
                line.resize(self.col + 1, ' ');
            }
            line[self.col] = ch;
            self.col += 1;
        }
    }

    fn new_line(&mut self) {
        self.row += 1;
        self.col = 0;
        if self.rows.len() <= self.row {
            self.rows.push(vec![]);
        }
    }
}

impl RenderBackend for ScreenModel {
    fn write_text(&mut self, text: &str) -> io::Result<()> {
        self.op_count += 1;
        self.put_str(text);
        Ok(())
    }

    fn move_left(&mut self, n: usize) -> io::Result<()> {
        if n > 0 {
            self.op_count += 1;
            self.col = self.col.saturating_sub(n);
        }
        Ok(())
    }

    fn move_right(&mut self, n: usize) -> io::Result<()> {
        if n > 0 {
            self.op_count += 1;
            self.col += n;
        }
        Ok(())
    }

    fn writeln(&mut self, line: &str) -> io::Result<()> {
        self.op_count += 1;
        self.put_str(line);
        self.new_line();
        Ok(())
    }

    fn prompt(&mut self, cwd: &str) -> io::Result<()> {
        self.op_count += 1;
        let prompt = self.visible_prompt(cwd);
        self.put_str(&prompt);
        Ok(())
    }

    fn clear_screen(&mut self) -> io::Result<()> {
        self.op_count += 1;
        self.rows = vec![vec![]];
        self.row = 0;
        self.col = 0;
        Ok(())
    }

    fn reset_input_display(&mut self, cwd: &str, line: &str) -> io::Result<()> {
        self.op_count += 1;
        self.rows[self.row].clear();
        self.col = 0;
        let prompt = self.visible_prompt(cwd);
        self.put_str(&prompt);
        self.put_str(line);
        Ok(())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.op_count += 1;
        Ok(())
    }
}

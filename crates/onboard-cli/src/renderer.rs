//! Terminal output for the markdown produced by `onboard_core::display`.
//!
//! Rich output goes through termimad; `--no-color` prints the markdown
//! unchanged.

use std::fmt::Display;

use termimad::{crossterm::style::Color, MadSkin};

/// Prints markdown either styled or as plain text.
pub struct TerminalRenderer {
    rich_enabled: bool,
    skin: MadSkin,
}

impl TerminalRenderer {
    pub fn new(rich_enabled: bool) -> Self {
        let mut skin = MadSkin::default();
        skin.set_headers_fg(Color::Blue);
        skin.bold.set_fg(Color::Yellow);
        skin.italic.set_fg(Color::DarkGrey);
        skin.inline_code.set_bg(Color::AnsiValue(238));
        skin.quote_mark.set_fg(Color::Red);

        Self { rich_enabled, skin }
    }

    /// Renders a markdown document.
    ///
    /// Headers keep their hash marks, table rows are laid out as one block
    /// and every other line is styled inline.
    pub fn render(&self, markdown: &str) {
        if !self.rich_enabled {
            print!("{markdown}");
            if !markdown.ends_with('\n') {
                println!();
            }
            return;
        }

        let mut table = String::new();
        for line in markdown.lines() {
            if line.starts_with('|') {
                table.push_str(line);
                table.push('\n');
                continue;
            }
            self.flush_table(&mut table);

            if line.starts_with('#') {
                println!("\x1b[34m{line}\x1b[0m");
            } else {
                self.skin.print_inline(line);
                println!();
            }
        }
        self.flush_table(&mut table);
    }

    /// Renders anything implementing `Display`, typically a display wrapper.
    pub fn show(&self, view: &impl Display) {
        self.render(&view.to_string());
    }

    fn flush_table(&self, table: &mut String) {
        if !table.is_empty() {
            self.skin.print_text(table);
            table.clear();
        }
    }
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new(true)
    }
}

//! Human-facing output: status lines, key/value summaries, spinners and the
//! `--json` document writers.
//!
//! Errors are not printed here; `main` renders them once on the way out.

pub mod json;
pub mod progress;
pub mod styles;

use console::Term;
use owo_colors::OwoColorize as _;
pub use styles::Styles;

/// Terminal state and palette for one invocation.
pub struct OutputContext {
    pub styles: Styles,
    /// Stdout is attached to a terminal.
    is_tty: bool,
    /// `--quiet`: status lines and spinners are dropped.
    pub quiet: bool,
}

impl OutputContext {
    /// Colours are used only on a terminal, without `--no-color` or `NO_COLOR`.
    #[must_use]
    pub fn new(no_color: bool, quiet: bool) -> Self {
        let is_tty = Term::stdout().is_term();
        let mut styles = Styles::default();
        if !no_color && is_tty && std::env::var_os("NO_COLOR").is_none() {
            styles.colorize();
        }
        Self {
            styles,
            is_tty,
            quiet,
        }
    }

    /// Spinners only make sense on an interactive, non-quiet terminal.
    #[must_use]
    pub fn show_progress(&self) -> bool {
        self.is_tty && !self.quiet
    }

    pub fn success(&self, msg: &str) {
        self.line("✓", self.styles.success, msg);
    }

    pub fn warn(&self, msg: &str) {
        self.line("⚠", self.styles.warning, msg);
    }

    pub fn info(&self, msg: &str) {
        self.line("ℹ", self.styles.info, msg);
    }

    /// Section title above a block of `kv` lines.
    pub fn header(&self, title: &str) {
        if !self.quiet {
            println!("  {}", title.style(self.styles.header));
        }
    }

    /// One `label  value` row, e.g. `Client ID  4`.
    pub fn kv(&self, label: &str, value: &str) {
        if !self.quiet {
            println!("  {}  {value}", label.style(self.styles.dim));
        }
    }

    fn line(&self, glyph: &str, style: owo_colors::Style, msg: &str) {
        if !self.quiet {
            println!("  {} {msg}", glyph.style(style));
        }
    }
}

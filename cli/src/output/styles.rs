//! Colour palette for human-readable output.

use owo_colors::Style;

/// Styles used by `OutputContext`; all plain until `colorize` runs.
#[derive(Default, Clone)]
pub struct Styles {
    pub success: Style,
    pub warning: Style,
    pub info: Style,
    /// Field labels in `kv` lines.
    pub dim: Style,
    pub header: Style,
}

impl Styles {
    /// Switch to the coloured palette.
    pub fn colorize(&mut self) {
        self.success = Style::new().green();
        self.warning = Style::new().yellow();
        self.info = Style::new().blue();
        self.dim = Style::new().dimmed();
        self.header = Style::new().bold().cyan();
    }
}

//! Terminal colors for install results and listings.

use owo_colors::Style;

/// Colors keyed by what the text reports. Plain until [`Styles::colorize`].
#[derive(Default, Clone)]
pub struct Styles {
    /// Installed recipes and saved settings.
    pub ok: Style,
    /// Skipped recipes and warnings.
    pub warn: Style,
    /// Failed recipes and errors.
    pub fail: Style,
    /// Step arrows, notices and section titles.
    pub accent: Style,
    /// Command lines, match details and defaults.
    pub dim: Style,
    /// Recipe and profile names.
    pub bold: Style,
}

impl Styles {
    pub fn colorize(&mut self) {
        self.ok = Style::new().green();
        self.warn = Style::new().yellow();
        self.fail = Style::new().red();
        self.accent = Style::new().cyan();
        self.dim = Style::new().dimmed();
        self.bold = Style::new().bold();
    }
}

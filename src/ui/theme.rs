//! Visual theme and styling.

use console::Style;

/// asmago's visual theme.
#[derive(Debug, Clone)]
pub struct AsmagoTheme {
    /// Style for success messages (green).
    pub success: Style,
    /// Style for warning messages (orange).
    pub warning: Style,
    /// Style for error messages (red bold).
    pub error: Style,
    /// Style for dim/secondary text.
    pub dim: Style,
    /// Style for highlighted/important text (bold).
    pub highlight: Style,
    /// Style for headers (cyan bold).
    pub header: Style,
    /// Style for commands shown in output (dim italic).
    pub command: Style,
    /// Style for key labels in key-value displays (bold).
    pub key: Style,
}

impl Default for AsmagoTheme {
    fn default() -> Self {
        Self::new()
    }
}

impl AsmagoTheme {
    /// Create the default theme.
    pub fn new() -> Self {
        Self {
            success: Style::new().green(),
            warning: Style::new().color256(208),
            error: Style::new().red().bold(),
            dim: Style::new().dim(),
            highlight: Style::new().bold(),
            header: Style::new().bold().cyan(),
            command: Style::new().dim().italic(),
            key: Style::new().bold(),
        }
    }

    /// Create a theme without colors (for non-TTY or --no-color).
    pub fn plain() -> Self {
        Self {
            success: Style::new(),
            warning: Style::new(),
            error: Style::new(),
            dim: Style::new(),
            highlight: Style::new(),
            header: Style::new(),
            command: Style::new(),
            key: Style::new(),
        }
    }

    /// Pick the colored or plain theme for the current terminal.
    pub fn detect() -> Self {
        if should_use_colors() {
            Self::new()
        } else {
            Self::plain()
        }
    }

    /// Format a success message (icon + text in green).
    pub fn format_success(&self, msg: &str) -> String {
        format!("{}", self.success.apply_to(format!("✓ {}", msg)))
    }

    /// Format a warning message (icon + text in orange).
    pub fn format_warning(&self, msg: &str) -> String {
        format!("{}", self.warning.apply_to(format!("⚠ {}", msg)))
    }

    /// Format an error message (icon + text in red bold).
    pub fn format_error(&self, msg: &str) -> String {
        format!("{}", self.error.apply_to(format!("✗ {}", msg)))
    }

    /// Format a header banner.
    pub fn format_header(&self, title: &str) -> String {
        format!("{}", self.header.apply_to(title))
    }

    /// Format a command line.
    pub fn format_command(&self, command: &str) -> String {
        format!("  {}", self.command.apply_to(command))
    }
}

/// Check if colors should be enabled.
pub fn should_use_colors() -> bool {
    // https://no-color.org/
    if std::env::var_os("NO_COLOR").is_some() {
        return false;
    }

    console::Term::stdout().is_term()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn theme_formats_success() {
        let theme = AsmagoTheme::plain();
        let msg = theme.format_success("Shortcut executed successfully.");
        assert!(msg.contains("✓"));
        assert!(msg.contains("Shortcut executed"));
    }

    #[test]
    fn theme_formats_warning() {
        let theme = AsmagoTheme::plain();
        let msg = theme.format_warning("SSO token has expired");
        assert!(msg.starts_with("⚠"));
    }

    #[test]
    fn theme_formats_error() {
        let theme = AsmagoTheme::plain();
        assert_eq!(theme.format_error("Failed"), "✗ Failed");
    }

    #[test]
    fn plain_command_is_indented_verbatim() {
        let theme = AsmagoTheme::plain();
        assert_eq!(
            theme.format_command("aws ssm start-session --target i-1"),
            "  aws ssm start-session --target i-1"
        );
    }

    #[test]
    fn default_impl_matches_new() {
        let default = AsmagoTheme::default();
        let new = AsmagoTheme::new();
        assert_eq!(default.format_success("test"), new.format_success("test"));
    }
}

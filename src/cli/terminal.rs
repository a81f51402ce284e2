//! Styling of `check` and `report` lines on stdout

use std::fmt::Display;

use owo_colors::{OwoColorize, colors::css};

/// How a line of output is painted.
///
/// Colour is only applied when stdout supports it, so piped output stays
/// plain text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Style {
    /// A check that found nothing.
    Pass,
    /// A check that found issues, or the issue total.
    Issue,
    /// A chart or section title.
    Heading,
    /// A single diagnostic under its check.
    Detail,
}

impl Style {
    /// Renders `text` in this style.
    #[must_use]
    pub fn paint<T: Display + ?Sized>(self, text: &T) -> String {
        if !stdout_has_colour() {
            return text.to_string();
        }
        match self {
            Self::Pass => text.fg::<css::Green>().to_string(),
            Self::Issue => text.fg::<css::Orange>().to_string(),
            Self::Heading => text.fg::<css::LightBlue>().bold().to_string(),
            Self::Detail => text.dimmed().to_string(),
        }
    }
}

fn stdout_has_colour() -> bool {
    supports_color::on_cached(supports_color::Stream::Stdout).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_is_preserved() {
        for style in [Style::Pass, Style::Issue, Style::Heading, Style::Detail] {
            assert!(style.paint("3 issues found").contains("3 issues found"));
        }
    }
}

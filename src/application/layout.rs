//! Turning tick values into the output line.

use crate::application::format::TickFormat;

/// Separator written after every label unless configured otherwise.
pub const DEFAULT_SEPARATOR: &str = " ";

/// Formats ticks and joins them into a single line of labels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelLayout {
    format: TickFormat,
    separator: String,
}

impl Default for LabelLayout {
    fn default() -> Self {
        Self::new(TickFormat::default(), DEFAULT_SEPARATOR)
    }
}

impl LabelLayout {
    pub fn new(format: TickFormat, separator: impl Into<String>) -> Self {
        Self {
            format,
            separator: separator.into(),
        }
    }

    pub fn format(&self) -> &TickFormat {
        &self.format
    }

    pub fn separator(&self) -> &str {
        &self.separator
    }

    pub fn labels(&self, ticks: &[f64]) -> Vec<String> {
        ticks.iter().map(|&t| self.format.render(t)).collect()
    }

    /// Every label followed by the separator, then a newline.
    pub fn line(&self, ticks: &[f64]) -> String {
        let mut out = String::new();
        for label in self.labels(ticks) {
            out.push_str(&label);
            out.push_str(&self.separator);
        }
        out.push('\n');
        out
    }

    /// Display width of the labels joined by the separator, in characters.
    pub fn width(&self, ticks: &[f64]) -> usize {
        self.labels(ticks).join(&self.separator).chars().count()
    }
}

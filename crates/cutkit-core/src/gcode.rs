//! G-code text rendering of the directive stream.

use crate::directive::MoveDirective;

/// Renders directives as G-code lines.
#[derive(Debug, Clone)]
pub struct GcodeWriter {
    decimals: usize,
    line_numbers_enabled: bool,
    start_line_number: u32,
}

impl Default for GcodeWriter {
    fn default() -> Self {
        Self {
            decimals: 4,
            line_numbers_enabled: false,
            start_line_number: 10,
        }
    }
}

impl GcodeWriter {
    /// Creates a writer with the given coordinate precision.
    pub fn new(decimals: usize) -> Self {
        Self {
            decimals,
            ..Self::default()
        }
    }

    /// Creates a writer that prefixes each line with `N` numbers.
    pub fn with_line_numbers(mut self, enabled: bool) -> Self {
        self.line_numbers_enabled = enabled;
        self
    }

    /// Render a single directive without a line number.
    pub fn format_directive(&self, directive: &MoveDirective) -> String {
        let mut line = String::from(directive.mode.gcode_word());
        let words = [
            ('X', directive.x),
            ('Y', directive.y),
            ('Z', directive.z),
            ('I', directive.i),
            ('J', directive.j),
        ];
        for (letter, value) in words {
            if let Some(v) = value {
                line.push_str(&format!(" {}{}", letter, self.number(v)));
            }
        }
        if let Some(feed) = directive.feed {
            line.push_str(&format!(" F{:.1}", feed));
        }
        line
    }

    /// Render every directive, one line each, numbering in steps of 10 when enabled.
    pub fn write_lines(&self, directives: &[MoveDirective]) -> Vec<String> {
        let mut line_number = self.start_line_number;
        directives
            .iter()
            .map(|d| {
                let body = self.format_directive(d);
                if self.line_numbers_enabled {
                    let numbered = format!("N{} {}", line_number, body);
                    line_number += 10;
                    numbered
                } else {
                    body
                }
            })
            .collect()
    }

    /// Render a whole program as newline-terminated text.
    pub fn write_program(&self, directives: &[MoveDirective]) -> String {
        let mut gcode = String::new();
        for line in self.write_lines(directives) {
            gcode.push_str(&line);
            gcode.push('\n');
        }
        gcode
    }

    fn number(&self, value: f64) -> String {
        let text = format!("{:.*}", self.decimals, value);
        // Avoid "-0.0000" for values that round to zero
        if text.trim_start_matches('-').chars().all(|c| c == '0' || c == '.') {
            format!("{:.*}", self.decimals, 0.0)
        } else {
            text
        }
    }
}

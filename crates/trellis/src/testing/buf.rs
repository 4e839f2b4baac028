//! Canvas match assertions for tests.

use crate::canvas::Canvas;

/// A helper macro to create expected-row lists for canvas assertions.
#[macro_export]
macro_rules! buf {
    ($($line:literal)*) => {
        &[$($line),*]
    };
}

/// Compares a canvas against expected text rows.
///
/// Trailing blanks on both sides are ignored so expectations stay readable.
pub struct CanvasTest<'a> {
    /// The canvas under test.
    canvas: &'a Canvas,
}

impl<'a> CanvasTest<'a> {
    /// Wrap a canvas for matching.
    pub fn new(canvas: &'a Canvas) -> Self {
        Self { canvas }
    }

    /// The canvas rows as strings.
    pub fn lines(&self) -> Vec<String> {
        (0..self.canvas.rows())
            .map(|y| self.canvas.row_text(y).to_string())
            .collect()
    }

    /// True when the canvas text matches the expected rows.
    pub fn matches(&self, expected: &[&str]) -> bool {
        if expected.len() != self.canvas.rows() as usize {
            return false;
        }
        expected
            .iter()
            .enumerate()
            .all(|(y, line)| self.canvas.row_text(y as u32).trim_end() == line.trim_end())
    }

    /// Assert a match, pretty-printing both sides on failure.
    pub fn assert_matches(&self, expected: &[&str]) {
        if self.matches(expected) {
            return;
        }
        let width = self
            .canvas
            .cols()
            .max(expected.iter().map(|l| l.len() as u32).max().unwrap_or(0))
            .max(10) as usize;

        println!("\nExpected:");
        println!("┌{}┐", "─".repeat(width));
        for line in expected {
            println!("│{line:width$}│");
        }
        println!("└{}┘", "─".repeat(width));

        println!("\nActual:");
        println!("┌{}┐", "─".repeat(width));
        for line in self.lines() {
            println!("│{line:width$}│");
        }
        println!("└{}┘", "─".repeat(width));

        panic!("canvas mismatch");
    }
}

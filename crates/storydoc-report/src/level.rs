//! Section depth tracking.

/// Heading markup for a section at `depth`.
///
/// AsciiDoc section titles use one `=` more than their nesting depth.
///
/// ```
/// use storydoc_report::heading_markup;
///
/// assert_eq!(heading_markup(0), "=");
/// assert_eq!(heading_markup(2), "===");
/// ```
#[must_use]
pub fn heading_markup(depth: usize) -> String {
    "=".repeat(depth + 1)
}

/// Current section nesting depth.
///
/// Stories and scenarios [`enter`](Self::enter) before writing their heading
/// and [`exit`](Self::exit) once their content is complete.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SectionLevel {
    depth: usize,
}

impl SectionLevel {
    /// Start tracking at `base` depth.
    #[must_use]
    pub fn new(base: usize) -> Self {
        Self { depth: base }
    }

    #[must_use]
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Open a nested section and return the new depth.
    pub fn enter(&mut self) -> usize {
        self.depth += 1;
        self.depth
    }

    /// Close the innermost section and return the new depth.
    ///
    /// Depth never goes below zero; an unmatched exit is logged and ignored.
    pub fn exit(&mut self) -> usize {
        if self.depth == 0 {
            tracing::warn!("Section exit without matching enter");
        } else {
            self.depth -= 1;
        }
        self.depth
    }

    /// Heading markup for the current depth.
    #[must_use]
    pub fn heading(&self) -> String {
        heading_markup(self.depth)
    }
}

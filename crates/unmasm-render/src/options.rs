//! Listing configuration.

/// Options controlling listing output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListingOptions {
    /// Maximum number of raw bytes dumped per instruction; 0 disables the dump.
    pub max_bytes: usize,
    /// Emit a blank line after every block.
    pub block_lines: bool,
    /// Emit a `; block reason:` line before every block.
    pub show_reasons: bool,
}

impl Default for ListingOptions {
    fn default() -> Self {
        Self {
            max_bytes: 8,
            block_lines: true,
            show_reasons: false,
        }
    }
}

impl ListingOptions {
    /// Sets the byte dump limit.
    pub fn with_max_bytes(mut self, max_bytes: usize) -> Self {
        self.max_bytes = max_bytes;
        self
    }

    /// Enables or disables block separator lines.
    pub fn with_block_lines(mut self, block_lines: bool) -> Self {
        self.block_lines = block_lines;
        self
    }

    /// Enables or disables block reason lines.
    pub fn with_reasons(mut self, show_reasons: bool) -> Self {
        self.show_reasons = show_reasons;
        self
    }
}

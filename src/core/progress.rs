pub const DEFAULT_BAR_WIDTH: usize = 30;

/// Fixed-width textual progress bar, e.g. `[█████░░░░░] 1/2 (50%)`.
#[derive(Debug, Clone, Copy)]
pub struct ProgressBar {
    width: usize,
}

impl Default for ProgressBar {
    fn default() -> Self {
        Self::new(DEFAULT_BAR_WIDTH)
    }
}

impl ProgressBar {
    pub fn new(width: usize) -> Self {
        Self { width }
    }

    pub fn render(&self, current: usize, total: usize) -> String {
        let (filled, percent) = if total == 0 {
            (0, 0)
        } else {
            let current = current.min(total);
            (
                rounded_ratio(self.width * current, total),
                rounded_ratio(100 * current, total),
            )
        };

        format!(
            "[{}{}] {}/{} ({}%)",
            "█".repeat(filled),
            "░".repeat(self.width - filled),
            current,
            total,
            percent
        )
    }
}

// Round half up without going through floats.
fn rounded_ratio(numerator: usize, denominator: usize) -> usize {
    (2 * numerator + denominator) / (2 * denominator)
}

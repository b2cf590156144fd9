use indicatif::{ProgressBar, ProgressStyle};

/// Progress bar for one scan, drawn on stderr.
pub struct ScanProgress {
    bar: ProgressBar,
}

impl ScanProgress {
    pub fn new(visible: bool) -> Self {
        let bar = if visible {
            ProgressBar::new(0)
        } else {
            ProgressBar::hidden()
        };
        bar.set_style(
            ProgressStyle::with_template("{spinner:.green} {msg} [{bar:40.cyan/blue}] {pos}/{len}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("=> "),
        );
        Self { bar }
    }

    pub fn start(&self, message: String, total: usize) {
        self.bar.set_message(message);
        self.bar.set_length(total as u64);
        self.bar.set_position(0);
    }

    /// The estimate can undercount; the bar grows rather than clamping.
    pub fn update(&self, count: usize) {
        let count = count as u64;
        if self.bar.length().is_some_and(|len| count > len) {
            self.bar.set_length(count);
        }
        self.bar.set_position(count);
    }

    pub fn finish(&self) {
        if let Some(len) = self.bar.length() {
            self.bar.set_position(len);
        }
        self.bar.finish_and_clear();
    }

    pub fn abandon(&self) {
        self.bar.abandon();
    }

    pub fn position(&self) -> u64 {
        self.bar.position()
    }

    pub fn length(&self) -> Option<u64> {
        self.bar.length()
    }
}

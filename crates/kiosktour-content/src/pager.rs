//! Page cursor for an open document.

/// Minimum time between two accepted page clicks, in seconds.
pub const DEFAULT_CLICK_COOLDOWN_SECS: f64 = 0.2;

/// Outcome of a page click.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageStep {
    /// The cursor moved to this 0-based page index.
    Moved(usize),
    /// Already on the last page.
    AtEnd,
    /// Already on the first page.
    AtStart,
    /// Ignored: too soon after the previous accepted click.
    Cooldown,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DocumentPager {
    page_count: usize,
    index: usize,
    cooldown_secs: f64,
    last_click: Option<f64>,
}

impl DocumentPager {
    pub fn new(page_count: usize) -> Self {
        Self::with_cooldown(page_count, DEFAULT_CLICK_COOLDOWN_SECS)
    }

    pub fn with_cooldown(page_count: usize, cooldown_secs: f64) -> Self {
        Self {
            page_count,
            index: 0,
            cooldown_secs,
            last_click: None,
        }
    }

    pub fn page_count(&self) -> usize {
        self.page_count
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn is_empty(&self) -> bool {
        self.page_count == 0
    }

    pub fn has_previous(&self) -> bool {
        self.index > 0
    }

    pub fn has_next(&self) -> bool {
        self.page_count > 0 && self.index < self.page_count - 1
    }

    /// `"2 / 7"`
    pub fn label(&self) -> String {
        format!("{} / {}", self.index + 1, self.page_count)
    }

    /// Accepts a click at `now` (seconds) unless it falls inside the cooldown window.
    /// An accepted click restarts the window even if the cursor cannot move.
    fn accept_click(&mut self, now: f64) -> bool {
        if let Some(last) = self.last_click {
            if now < last + self.cooldown_secs {
                return false;
            }
        }
        self.last_click = Some(now);
        true
    }

    pub fn next(&mut self, now: f64) -> PageStep {
        if !self.accept_click(now) {
            return PageStep::Cooldown;
        }
        if self.has_next() {
            self.index += 1;
            PageStep::Moved(self.index)
        } else {
            PageStep::AtEnd
        }
    }

    pub fn previous(&mut self, now: f64) -> PageStep {
        if !self.accept_click(now) {
            return PageStep::Cooldown;
        }
        if self.has_previous() {
            self.index -= 1;
            PageStep::Moved(self.index)
        } else {
            PageStep::AtStart
        }
    }
}

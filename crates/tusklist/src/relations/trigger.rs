/// Scroll state reported by the presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Viewport {
    /// Index of the first visible entry
    pub first_visible: usize,
    /// Number of visible entries
    pub visible_count: usize,
    /// Number of entries in the list
    pub total: usize,
}

/// Decides when scrolling has come close enough to the end of the list to
/// load the next page.
///
/// Once it fires it stays latched until the list grows, so a burst of scroll
/// events near the end asks for one page only.
#[derive(Debug, Clone)]
pub struct LoadMoreTrigger {
    visible_threshold: usize,
    previous_total: usize,
    awaiting_growth: bool,
    current_page: u32,
}

impl LoadMoreTrigger {
    /// Entries left below the viewport at which a default trigger fires
    pub const DEFAULT_VISIBLE_THRESHOLD: usize = 15;

    /// Create a trigger firing when fewer than `visible_threshold` entries
    /// remain below the viewport
    pub fn new(visible_threshold: usize) -> Self {
        Self {
            visible_threshold,
            previous_total: 0,
            // the initial page is requested explicitly, not by scrolling
            awaiting_growth: true,
            current_page: 0,
        }
    }

    /// Pages requested through this trigger since the last reset
    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    /// Feed a scroll notification, returns `true` when a page should load
    pub fn on_scrolled(&mut self, viewport: Viewport) -> bool {
        if viewport.total < self.previous_total {
            self.current_page = 0;
            self.previous_total = viewport.total;
            self.awaiting_growth = viewport.total == 0;
        }

        if self.awaiting_growth && viewport.total > self.previous_total {
            self.awaiting_growth = false;
            self.previous_total = viewport.total;
        }

        let last_visible = viewport.first_visible + viewport.visible_count;
        if !self.awaiting_growth && last_visible + self.visible_threshold > viewport.total {
            self.current_page += 1;
            self.awaiting_growth = true;
            return true;
        }
        false
    }

    /// Release the latch without the list having grown, e.g. after a failed
    /// load so the next scroll can try again
    pub fn release(&mut self) {
        self.awaiting_growth = false;
    }

    /// Forget all scroll history
    pub fn reset(&mut self) {
        self.current_page = 0;
        self.previous_total = 0;
        self.awaiting_growth = true;
    }
}

impl Default for LoadMoreTrigger {
    fn default() -> Self {
        Self::new(Self::DEFAULT_VISIBLE_THRESHOLD)
    }
}

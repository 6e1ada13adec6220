//! Horizontal swipe recognition. A completed gesture maps onto the same
//! next/previous transitions as the buttons and indicators, so the three
//! input paths cannot drift apart.

/// Minimum horizontal travel, in pixels, for a gesture to count.
pub const DEFAULT_SWIPE_THRESHOLD: f32 = 50.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwipeDirection {
    /// Leftward swipe: advance.
    Next,
    /// Rightward swipe: go back.
    Previous,
}

#[derive(Debug, Clone)]
pub struct SwipeTracker {
    threshold: f32,
    start: Option<f32>,
}

impl Default for SwipeTracker {
    fn default() -> Self {
        Self::with_threshold(DEFAULT_SWIPE_THRESHOLD)
    }
}

impl SwipeTracker {
    pub fn with_threshold(threshold: f32) -> Self {
        Self {
            threshold,
            start: None,
        }
    }

    pub fn touch_start(&mut self, x: f32) {
        self.start = Some(x);
    }

    /// Completes the gesture. Travel below the threshold, or an end
    /// without a matching start, resolves to no navigation.
    pub fn touch_end(&mut self, x: f32) -> Option<SwipeDirection> {
        let start = self.start.take()?;
        if x <= start - self.threshold {
            Some(SwipeDirection::Next)
        } else if x >= start + self.threshold {
            Some(SwipeDirection::Previous)
        } else {
            None
        }
    }
}

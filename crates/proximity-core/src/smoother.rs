//! Moving-average smoothing of distance estimates.

use std::collections::VecDeque;

/// Fixed-window moving average.
///
/// Holds at most `window` values; the oldest is evicted first. Until the
/// window fills, the mean covers whatever has been pushed so far.
#[derive(Debug, Clone)]
pub struct MovingAverage {
    history: VecDeque<f64>,
    window: usize,
}

impl MovingAverage {
    /// Create a smoother over `window` samples. A window of zero is treated as one.
    pub fn new(window: usize) -> Self {
        let window = window.max(1);
        Self {
            history: VecDeque::with_capacity(window),
            window,
        }
    }

    /// Append a value and return the mean of the current window.
    pub fn push(&mut self, value: f64) -> f64 {
        self.history.push_back(value);
        if self.history.len() > self.window {
            self.history.pop_front();
        }
        self.history.iter().sum::<f64>() / self.history.len() as f64
    }

    /// Mean of the current window, `None` before the first push.
    pub fn current(&self) -> Option<f64> {
        if self.history.is_empty() {
            return None;
        }
        Some(self.history.iter().sum::<f64>() / self.history.len() as f64)
    }

    pub fn len(&self) -> usize {
        self.history.len()
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    /// Whether `window` samples have been collected.
    pub fn is_full(&self) -> bool {
        self.history.len() == self.window
    }

    pub fn window(&self) -> usize {
        self.window
    }

    /// Drop all history.
    pub fn reset(&mut self) {
        self.history.clear();
    }
}

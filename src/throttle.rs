//! Trailing-call throttle for bursty signals such as window resizes.

/// Rate limiter that fires at most once per window with the latest value.
///
/// The first [`call`](Self::call) opens a window; later calls inside it
/// only replace the stored value. Once the window has elapsed,
/// [`poll`](Self::poll) hands out the most recent value exactly once and
/// the throttle is idle again. Time is supplied by the caller in
/// milliseconds.
///
/// ## Example
///
/// ```rust
/// use gallery_stack_view::Throttle;
///
/// let mut throttle = Throttle::new(250.0);
/// for (t, width) in [(0.0, 800), (20.0, 900), (60.0, 1000)] {
///     throttle.call(t, width);
/// }
/// assert_eq!(throttle.poll(100.0), None);
/// assert_eq!(throttle.poll(250.0), Some(1000));
/// assert_eq!(throttle.poll(500.0), None);
/// ```
#[derive(Clone, Debug)]
pub struct Throttle<T> {
    window_ms: f64,
    deadline: Option<f64>,
    pending: Option<T>,
}

impl<T> Throttle<T> {
    /// Create a throttle with the given window length.
    pub fn new(window_ms: f64) -> Self {
        Self {
            window_ms: window_ms.max(0.0),
            deadline: None,
            pending: None,
        }
    }

    /// Record a signal at time `now_ms`.
    pub fn call(&mut self, now_ms: f64, value: T) {
        if self.deadline.is_none() {
            self.deadline = Some(now_ms + self.window_ms);
        }
        self.pending = Some(value);
    }

    /// Take the latest value if its window has elapsed.
    pub fn poll(&mut self, now_ms: f64) -> Option<T> {
        match self.deadline {
            Some(deadline) if now_ms >= deadline => {
                self.deadline = None;
                self.pending.take()
            }
            _ => None,
        }
    }

    /// When the pending value becomes due, if any.
    #[inline]
    pub fn deadline(&self) -> Option<f64> {
        self.deadline
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_burst_fires_once_with_last_value() {
        let mut throttle = Throttle::new(250.0);
        for (i, t) in [0.0, 25.0, 50.0, 75.0, 100.0].into_iter().enumerate() {
            throttle.call(t, i);
            assert_eq!(throttle.poll(t), None);
        }

        assert_eq!(throttle.poll(249.9), None);
        assert_eq!(throttle.poll(250.0), Some(4));
        assert_eq!(throttle.poll(1000.0), None);
        assert_eq!(throttle.deadline(), None);
    }

    #[test]
    fn test_window_reopens_after_firing() {
        let mut throttle = Throttle::new(250.0);
        throttle.call(0.0, 'a');
        assert_eq!(throttle.poll(300.0), Some('a'));

        throttle.call(310.0, 'b');
        assert_eq!(throttle.deadline(), Some(560.0));
        assert_eq!(throttle.poll(400.0), None);
        assert_eq!(throttle.poll(560.0), Some('b'));
    }
}

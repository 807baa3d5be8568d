//! Carousel Navigation
//!
//! Scroll arithmetic for the horizontal card strip.

/// Scroll geometry read from the container element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScrollMetrics {
    pub scroll_left: i32,
    pub scroll_width: i32,
    pub client_width: i32,
}

impl ScrollMetrics {
    pub fn max_scroll(&self) -> i32 {
        (self.scroll_width - self.client_width).max(0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollDirection {
    Left,
    Right,
}

/// Enabled state of the previous/next buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NavState {
    pub prev_disabled: bool,
    pub next_disabled: bool,
}

/// Offset after moving one step, clamped to the scrollable range
pub fn scroll_target(metrics: ScrollMetrics, direction: ScrollDirection, step: i32) -> i32 {
    let delta = match direction {
        ScrollDirection::Left => -step,
        ScrollDirection::Right => step,
    };
    (metrics.scroll_left + delta).clamp(0, metrics.max_scroll())
}

/// Disable a button once within `edge` pixels of its end
pub fn nav_state(metrics: ScrollMetrics, edge: i32) -> NavState {
    NavState {
        prev_disabled: metrics.scroll_left <= edge,
        next_disabled: metrics.scroll_left >= metrics.max_scroll() - edge,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(scroll_left: i32) -> ScrollMetrics {
        ScrollMetrics { scroll_left, scroll_width: 2000, client_width: 1000 }
    }

    #[test]
    fn test_step_moves_one_card_and_clamps() {
        assert_eq!(scroll_target(at(0), ScrollDirection::Right, 320), 320);
        assert_eq!(scroll_target(at(320), ScrollDirection::Left, 320), 0);
        assert_eq!(scroll_target(at(100), ScrollDirection::Left, 320), 0);
        assert_eq!(scroll_target(at(900), ScrollDirection::Right, 320), 1000);
    }

    #[test]
    fn test_buttons_disable_near_edges() {
        assert_eq!(nav_state(at(10), 10), NavState { prev_disabled: true, next_disabled: false });
        assert_eq!(nav_state(at(11), 10), NavState { prev_disabled: false, next_disabled: false });
        assert_eq!(nav_state(at(990), 10), NavState { prev_disabled: false, next_disabled: true });
    }

    #[test]
    fn test_content_narrower_than_viewport_disables_both() {
        let metrics = ScrollMetrics { scroll_left: 0, scroll_width: 600, client_width: 1000 };
        assert_eq!(metrics.max_scroll(), 0);
        assert_eq!(nav_state(metrics, 10), NavState { prev_disabled: true, next_disabled: true });
    }
}

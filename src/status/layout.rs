// SPDX-License-Identifier: MIT

//! Fitting the window list into the columns left over once the left and
//! right status texts are reserved. Two-pass by design: the visible slice
//! depends on where the current window sits, not just on total width, so
//! everything is measured before a single cell is drawn.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Arrow {
    Absent,
    Normal,
    /// A window with a pending alert is hidden on this side.
    Alert,
}

/// Measured window, label columns only; the separator column is accounted
/// for internally.
#[derive(Debug, Clone, Copy)]
pub(crate) struct WindowFit {
    pub width: usize,
    pub current: bool,
    pub alert: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Layout {
    /// False means the row is rendered blank: not an error, just not
    /// enough space for anything useful.
    pub visible: bool,
    /// First window-list column that appears on screen.
    pub start: usize,
    /// Columns available to the window list after arrows are placed.
    pub budget: usize,
    pub left_arrow: Arrow,
    pub right_arrow: Arrow,
}

impl Layout {
    fn blank() -> Self {
        Self {
            visible: false,
            start: 0,
            budget: 0,
            left_arrow: Arrow::Absent,
            right_arrow: Arrow::Absent,
        }
    }
}

/// Compute the visible slice of the window list for a row of `sx` columns
/// with `llen`/`rlen` columns of left/right text.
///
/// When the list overflows, the slice is chosen so the current window's
/// label ends at the last visible column, with scroll arrows taking one
/// column each. The current window is always fully visible whenever it
/// fits in the budget at all.
pub(crate) fn compute(sx: usize, llen: usize, rlen: usize, windows: &[WindowFit]) -> Layout {
    let mut reserved = 0;
    if llen > 0 {
        reserved += llen + 1;
    }
    if rlen > 0 {
        reserved += rlen + 1;
    }
    if sx == 0 || sx <= reserved {
        return Layout::blank();
    }
    let mut xx = sx - reserved;

    let mut total = 0;
    let mut offset = 0;
    let mut current_width = 0;
    for win in windows {
        if win.current {
            offset = total;
            current_width = win.width;
        }
        total += win.width + 1;
    }

    let mut start = 0;
    let mut left_arrow = Arrow::Absent;
    let mut right_arrow = Arrow::Absent;

    if total > xx {
        if offset + current_width < xx {
            // Current window already lies in the first xx columns; only
            // the tail is cut off.
            right_arrow = Arrow::Normal;
            xx -= 1;
        } else {
            // The start column must be offset + width - xx so the current
            // window's last column is the last one visible.
            left_arrow = Arrow::Normal;
            xx -= 1;
            start = (offset + current_width).saturating_sub(xx);
            if xx > 0 && total > start + xx + 1 {
                right_arrow = Arrow::Normal;
                start += 1;
                xx -= 1;
            }
        }
    }

    if total == 0 || xx == 0 {
        return Layout::blank();
    }
    let budget = xx;

    // An arrow lights up only when a window wholly outside the visible
    // span on its side has a pending alert.
    let mut off = 0;
    for win in windows {
        if win.alert {
            if left_arrow != Arrow::Absent && off + win.width <= start {
                left_arrow = Arrow::Alert;
            }
            if right_arrow != Arrow::Absent && off >= start + budget {
                right_arrow = Arrow::Alert;
            }
        }
        off += win.width + 1;
    }

    Layout {
        visible: true,
        start,
        budget,
        left_arrow,
        right_arrow,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fit(width: usize) -> WindowFit {
        WindowFit {
            width,
            current: false,
            alert: false,
        }
    }

    fn current(width: usize) -> WindowFit {
        WindowFit {
            current: true,
            ..fit(width)
        }
    }

    fn alert(width: usize) -> WindowFit {
        WindowFit {
            alert: true,
            ..fit(width)
        }
    }

    #[test]
    fn test_everything_fits() {
        let plan = compute(30, 0, 0, &[current(5), fit(5), fit(5)]);
        assert!(plan.visible);
        assert_eq!(plan.start, 0);
        assert_eq!(plan.budget, 30);
        assert_eq!(plan.left_arrow, Arrow::Absent);
        assert_eq!(plan.right_arrow, Arrow::Absent);
    }

    #[test]
    fn test_current_near_start_shows_right_arrow_only() {
        // 20 columns, 5 of left text: 14 left for three 6-column entries
        // (label 5 + separator). The current window spans [6, 11) which is
        // inside the first 14 columns, so rendering starts at 0.
        let plan = compute(20, 5, 0, &[fit(5), current(5), fit(5)]);
        assert!(plan.visible);
        assert_eq!(plan.start, 0);
        assert_eq!(plan.budget, 13);
        assert_eq!(plan.left_arrow, Arrow::Absent);
        assert_eq!(plan.right_arrow, Arrow::Normal);
    }

    #[test]
    fn test_current_at_end_shows_left_arrow_only() {
        let windows = [fit(5), fit(5), fit(5), fit(5), current(5)];
        let plan = compute(20, 0, 0, &windows);
        assert!(plan.visible);
        assert_eq!(plan.left_arrow, Arrow::Normal);
        assert_eq!(plan.right_arrow, Arrow::Absent);
        // Current spans [24, 29): it must end at the last visible column.
        assert_eq!(plan.budget, 19);
        assert_eq!(plan.start, 10);
        assert_eq!(plan.start + plan.budget, 29);
    }

    #[test]
    fn test_current_in_middle_shows_both_arrows() {
        let mut windows = vec![fit(5); 10];
        windows[4] = current(5);
        let plan = compute(20, 0, 0, &windows);
        assert_eq!(plan.left_arrow, Arrow::Normal);
        assert_eq!(plan.right_arrow, Arrow::Normal);
        assert_eq!(plan.start, 11);
        assert_eq!(plan.budget, 18);
        // Current window [24, 29) stays fully inside the visible span.
        assert!(plan.start <= 24 && 29 <= plan.start + plan.budget);
    }

    #[test]
    fn test_hidden_alerts_light_up_arrows() {
        let mut windows = vec![fit(5); 10];
        windows[4] = current(5);
        windows[0] = alert(5); // spans [0, 5), left of start 11
        windows[9] = alert(5); // spans [54, 59), right of 29
        let plan = compute(20, 0, 0, &windows);
        assert_eq!(plan.left_arrow, Arrow::Alert);
        assert_eq!(plan.right_arrow, Arrow::Alert);
    }

    #[test]
    fn test_visible_alert_leaves_arrows_normal() {
        let mut windows = vec![fit(5); 10];
        windows[4] = current(5);
        windows[3] = alert(5); // spans [18, 23), inside [11, 29)
        let plan = compute(20, 0, 0, &windows);
        assert_eq!(plan.left_arrow, Arrow::Normal);
        assert_eq!(plan.right_arrow, Arrow::Normal);
    }

    #[test]
    fn test_reserved_text_leaves_no_room() {
        let plan = compute(10, 6, 4, &[current(3)]);
        assert!(!plan.visible);
    }

    #[test]
    fn test_empty_window_list_is_blank() {
        let plan = compute(20, 0, 0, &[]);
        assert!(!plan.visible);
    }
}

use crate::page_group::{pages_for, position_count, DisplayMode, PageGroup};

/// Emitted by every navigation call that moved the current position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PositionChanged {
    pub from: usize,
    pub to: usize,
}

/// Navigation keeps the single current position of the slideshow
#[derive(Debug, Clone)]
pub struct Navigation {
    current_position: usize,
    position_count: usize,
    page_count: usize,
    mode: DisplayMode,
}

impl Navigation {
    pub fn new(page_count: usize, mode: DisplayMode) -> Self {
        Self {
            current_position: 0,
            position_count: position_count(page_count, mode),
            page_count,
            mode,
        }
    }

    pub fn position(&self) -> usize {
        self.current_position
    }

    pub fn position_count(&self) -> usize {
        self.position_count
    }

    pub fn mode(&self) -> DisplayMode {
        self.mode
    }

    pub fn is_empty(&self) -> bool {
        self.position_count == 0
    }

    /// Pages shown at the current position, `None` for an empty document.
    pub fn pages(&self) -> Option<PageGroup> {
        (!self.is_empty()).then(|| pages_for(self.current_position, self.page_count, self.mode))
    }

    /// Human readable location, e.g. `3 / 10` or `5-6 / 10`.
    pub fn caption(&self) -> String {
        match self.pages() {
            None => format!("0 / {}", self.page_count),
            Some(PageGroup::Solo(page)) => format!("{} / {}", page + 1, self.page_count),
            Some(PageGroup::Pair(left, right)) => {
                format!("{}-{} / {}", left + 1, right + 1, self.page_count)
            }
        }
    }

    pub fn advance(&mut self) -> Option<PositionChanged> {
        if self.current_position + 1 < self.position_count {
            self.move_to(self.current_position + 1)
        } else {
            None
        }
    }

    pub fn retreat(&mut self) -> Option<PositionChanged> {
        if self.current_position > 0 {
            self.move_to(self.current_position - 1)
        } else {
            None
        }
    }

    /// Out of range positions are ignored, not clamped.
    pub fn jump_to(&mut self, position: usize) -> Option<PositionChanged> {
        if position < self.position_count && position != self.current_position {
            self.move_to(position)
        } else {
            None
        }
    }

    fn move_to(&mut self, position: usize) -> Option<PositionChanged> {
        let change = PositionChanged {
            from: self.current_position,
            to: position,
        };
        self.current_position = position;
        tracing::debug!(from = change.from, to = change.to, "position changed");
        Some(change)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn ten_pages_single_mode() {
        let mut nav = Navigation::new(10, DisplayMode::Single);
        assert_eq!(nav.position_count(), 10);
        assert_eq!(nav.jump_to(9), Some(PositionChanged { from: 0, to: 9 }));
        assert_eq!(nav.advance(), None);
        assert_eq!(nav.position(), 9);
    }

    #[test]
    fn retreat_at_start_is_a_no_op() {
        let mut nav = Navigation::new(3, DisplayMode::Single);
        assert_eq!(nav.retreat(), None);
        assert_eq!(nav.position(), 0);
    }

    #[test]
    fn jump_out_of_range_is_ignored() {
        let mut nav = Navigation::new(4, DisplayMode::Double);
        assert_eq!(nav.jump_to(2), None);
        assert_eq!(nav.jump_to(usize::MAX), None);
        assert_eq!(nav.position(), 0);
    }

    #[test]
    fn jump_to_current_position_does_not_notify() {
        let mut nav = Navigation::new(4, DisplayMode::Single);
        nav.advance();
        assert_eq!(nav.jump_to(1), None);
    }

    #[test]
    fn empty_document_never_moves() {
        let mut nav = Navigation::new(0, DisplayMode::Double);
        assert!(nav.is_empty());
        assert_eq!(nav.position(), 0);
        assert_eq!(nav.advance(), None);
        assert_eq!(nav.retreat(), None);
        assert_eq!(nav.jump_to(0), None);
        assert_eq!(nav.pages(), None);
        assert_eq!(nav.caption(), "0 / 0");
    }

    #[test]
    fn caption_follows_page_groups() {
        let mut nav = Navigation::new(7, DisplayMode::Double);
        nav.jump_to(2);
        assert_eq!(nav.caption(), "5-6 / 7");
        nav.advance();
        assert_eq!(nav.pages(), Some(PageGroup::Solo(6)));
        assert_eq!(nav.caption(), "7 / 7");
    }

    proptest! {
        #[test]
        fn advance_then_retreat_is_identity_inside(n in 3usize..200, seed in any::<usize>()) {
            let mut nav = Navigation::new(n, DisplayMode::Single);
            let start = 1 + seed % (n - 2);
            nav.jump_to(start);
            prop_assert!(nav.advance().is_some());
            prop_assert!(nav.retreat().is_some());
            prop_assert_eq!(nav.position(), start);
        }

        #[test]
        fn position_stays_in_bounds(
            n in 1usize..50,
            double in any::<bool>(),
            ops in proptest::collection::vec(0u8..3, 0..100),
        ) {
            let mode = if double { DisplayMode::Double } else { DisplayMode::Single };
            let mut nav = Navigation::new(n, mode);
            for (i, op) in ops.into_iter().enumerate() {
                match op {
                    0 => { nav.advance(); }
                    1 => { nav.retreat(); }
                    _ => { nav.jump_to(i); }
                }
                prop_assert!(nav.position() < nav.position_count());
            }
        }
    }
}

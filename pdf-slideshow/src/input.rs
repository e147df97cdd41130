//! Translation of raw input into navigation requests.

/// Legacy wheel buttons reported by X11 style platforms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WheelButton {
    /// Button 4
    Up,
    /// Button 5
    Down,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    PrimaryClick,
    SecondaryClick,
    Space,
    /// Vertical wheel delta, positive when scrolling up.
    Wheel(f32),
    WheelButton(WheelButton),
    SliderChanged(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavAction {
    Advance,
    Retreat,
    JumpTo(usize),
    None,
}

/// Suppresses slider callbacks caused by writing the position back to the slider.
#[derive(Debug, Default)]
pub struct SliderGuard {
    suppressed: bool,
}

impl SliderGuard {
    pub fn is_suppressed(&self) -> bool {
        self.suppressed
    }

    /// Runs the programmatic slider write with callbacks suppressed.
    ///
    /// Whatever change the widget echoed during the write is mapped while the
    /// guard is still held, so the returned action is always [`NavAction::None`]
    /// for a slider echo.
    pub fn write_back<F>(&mut self, write: F) -> NavAction
    where
        F: FnOnce() -> Option<usize>,
    {
        self.suppressed = true;
        let echoed = write();
        let action = echoed
            .map(|value| self.map(InputEvent::SliderChanged(value)))
            .unwrap_or(NavAction::None);
        self.suppressed = false;

        if let Some(value) = echoed {
            tracing::trace!(value, "ignored slider echo");
        }
        action
    }

    pub fn map(&self, event: InputEvent) -> NavAction {
        match event {
            InputEvent::PrimaryClick | InputEvent::Space => NavAction::Advance,
            InputEvent::SecondaryClick => NavAction::Retreat,
            InputEvent::Wheel(delta) if delta > 0.0 => NavAction::Retreat,
            InputEvent::Wheel(delta) if delta < 0.0 => NavAction::Advance,
            InputEvent::Wheel(_) => NavAction::None,
            InputEvent::WheelButton(WheelButton::Up) => NavAction::Retreat,
            InputEvent::WheelButton(WheelButton::Down) => NavAction::Advance,
            InputEvent::SliderChanged(_) if self.suppressed => NavAction::None,
            InputEvent::SliderChanged(value) => NavAction::JumpTo(value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pointer_and_keyboard() {
        let guard = SliderGuard::default();
        assert_eq!(guard.map(InputEvent::PrimaryClick), NavAction::Advance);
        assert_eq!(guard.map(InputEvent::Space), NavAction::Advance);
        assert_eq!(guard.map(InputEvent::SecondaryClick), NavAction::Retreat);
    }

    #[test]
    fn wheel_directions() {
        let guard = SliderGuard::default();
        assert_eq!(guard.map(InputEvent::Wheel(120.0)), NavAction::Retreat);
        assert_eq!(guard.map(InputEvent::Wheel(-1.0)), NavAction::Advance);
        assert_eq!(guard.map(InputEvent::Wheel(0.0)), NavAction::None);
        assert_eq!(
            guard.map(InputEvent::WheelButton(WheelButton::Up)),
            NavAction::Retreat
        );
        assert_eq!(
            guard.map(InputEvent::WheelButton(WheelButton::Down)),
            NavAction::Advance
        );
    }

    #[test]
    fn user_slider_change_jumps() {
        let guard = SliderGuard::default();
        assert_eq!(guard.map(InputEvent::SliderChanged(4)), NavAction::JumpTo(4));
    }

    #[test]
    fn echo_during_write_back_is_ignored() {
        let mut guard = SliderGuard::default();
        let mut seen_suppressed = false;

        let action = guard.write_back(|| {
            seen_suppressed = true;
            Some(5)
        });

        assert!(seen_suppressed);
        assert_eq!(action, NavAction::None);
        assert!(!guard.is_suppressed());
        assert_eq!(guard.map(InputEvent::SliderChanged(5)), NavAction::JumpTo(5));
    }
}

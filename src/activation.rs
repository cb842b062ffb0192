//! Item activation logic for the recent documents grid
//!
//! A document is opened by pressing and releasing the primary button on the
//! same grid cell. Only one pressed cell is remembered; every new press
//! replaces it and a matching release consumes it. Double and triple
//! clicks are absorbed so a double click opens the document once.

use crate::recent_model::RecentModel;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PressTracker {
    pressed: Option<u32>,
}

impl PressTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remember the cell under a press. `cell` is `None` over empty space.
    pub fn press(&mut self, n_press: i32, cell: Option<u32>) {
        if n_press > 1 {
            return;
        }
        self.pressed = cell;
    }

    /// Returns the activated cell when the release lands on the cell that
    /// was pressed.
    pub fn release(&mut self, n_press: i32, cell: Option<u32>) -> Option<u32> {
        if n_press > 1 {
            return None;
        }
        let cell = cell?;
        let pressed = self.pressed.take()?;
        (pressed == cell).then_some(cell)
    }
}

/// Feed a release into `tracker` and, on a match, select the row and
/// return the URI to open.
pub fn activate_on_release(
    tracker: &mut PressTracker,
    model: &mut RecentModel,
    n_press: i32,
    cell: Option<u32>,
) -> Option<String> {
    let cell = tracker.release(n_press, cell)?;
    model.activate(cell as usize)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn press_and_release_on_same_cell_activates_once() {
        let mut t = PressTracker::new();
        t.press(1, Some(3));
        assert_eq!(t.release(1, Some(3)), Some(3));
        assert_eq!(t.release(1, Some(3)), None);
    }

    #[test]
    fn release_on_another_cell_does_nothing() {
        let mut t = PressTracker::new();
        t.press(1, Some(3));
        assert_eq!(t.release(1, Some(4)), None);
        assert_eq!(t.pressed, None);
    }

    #[test]
    fn release_over_empty_space_keeps_the_press() {
        let mut t = PressTracker::new();
        t.press(1, Some(2));
        assert_eq!(t.release(1, None), None);
        assert_eq!(t.pressed, Some(2));
    }

    #[test]
    fn new_press_replaces_the_old_one() {
        let mut t = PressTracker::new();
        t.press(1, Some(1));
        t.press(1, Some(5));
        assert_eq!(t.release(1, Some(1)), None);

        t.press(1, Some(1));
        t.press(1, None);
        assert_eq!(t.release(1, Some(1)), None);
    }

    #[test]
    fn double_click_activates_exactly_once() {
        let mut t = PressTracker::new();
        let mut activations = 0;
        t.press(1, Some(0));
        activations += t.release(1, Some(0)).is_some() as u32;
        t.press(2, Some(0));
        activations += t.release(2, Some(0)).is_some() as u32;
        t.press(3, Some(0));
        activations += t.release(3, Some(0)).is_some() as u32;
        assert_eq!(activations, 1);
    }

    #[test]
    fn release_without_press_is_ignored() {
        let mut t = PressTracker::new();
        assert_eq!(t.release(1, Some(0)), None);
    }
}

//! Application state definitions

use super::toasts::Toasts;

/// Current view in the application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    /// One of the optimizer consoles, by registry index
    Console(usize),
    /// Service panel with model and endpoint details
    Service,
}

impl Default for View {
    fn default() -> Self {
        View::Console(0)
    }
}

/// Main application state
#[derive(Default)]
pub struct AppState {
    pub current_view: View,
    pub toasts: Toasts,
    pub scroll_offset: usize,
    /// Console to return to when leaving the service panel
    last_console: usize,
}

impl AppState {
    /// Index of the selected console, if one is showing
    pub fn selected_console(&self) -> Option<usize> {
        match self.current_view {
            View::Console(index) => Some(index),
            View::Service => None,
        }
    }

    /// Switch to the next console, wrapping at the end
    pub fn next_console(&mut self, count: usize) {
        if count == 0 {
            return;
        }
        let index = match self.current_view {
            View::Console(index) => (index + 1) % count,
            View::Service => self.last_console,
        };
        self.show_console(index);
    }

    /// Switch to the previous console, wrapping at the start
    pub fn prev_console(&mut self, count: usize) {
        if count == 0 {
            return;
        }
        let index = match self.current_view {
            View::Console(index) => {
                if index == 0 {
                    count - 1
                } else {
                    index - 1
                }
            }
            View::Service => self.last_console,
        };
        self.show_console(index);
    }

    /// Jump straight to a console by registry index
    pub fn show_console(&mut self, index: usize) {
        self.current_view = View::Console(index);
        self.last_console = index;
        self.reset_scroll();
    }

    /// Toggle between the service panel and the last console
    pub fn toggle_service(&mut self) {
        self.current_view = match self.current_view {
            View::Service => View::Console(self.last_console),
            View::Console(_) => View::Service,
        };
        self.reset_scroll();
    }

    /// Scroll the result pane down a page (10 lines)
    pub fn scroll_down_page(&mut self) {
        self.scroll_offset = self.scroll_offset.saturating_add(10);
    }

    /// Scroll the result pane up a page (10 lines)
    pub fn scroll_up_page(&mut self) {
        self.scroll_offset = self.scroll_offset.saturating_sub(10);
    }

    pub fn reset_scroll(&mut self) {
        self.scroll_offset = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod navigation {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_starts_on_first_console() {
            let state = AppState::default();
            assert_eq!(state.current_view, View::Console(0));
            assert_eq!(state.selected_console(), Some(0));
        }

        #[test]
        fn test_next_console_wraps() {
            let mut state = AppState::default();
            for _ in 0..3 {
                state.next_console(3);
            }
            assert_eq!(state.current_view, View::Console(0));
        }

        #[test]
        fn test_prev_console_wraps_backwards() {
            let mut state = AppState::default();
            state.prev_console(3);
            assert_eq!(state.current_view, View::Console(2));
        }

        #[test]
        fn test_service_toggle_round_trips() {
            let mut state = AppState::default();
            state.next_console(3);
            state.toggle_service();
            assert_eq!(state.current_view, View::Service);
            assert_eq!(state.selected_console(), None);
            state.toggle_service();
            assert_eq!(state.current_view, View::Console(1));
        }

        #[test]
        fn test_console_cycling_leaves_service_panel() {
            let mut state = AppState::default();
            state.show_console(2);
            state.toggle_service();
            state.next_console(3);
            assert_eq!(state.current_view, View::Console(2));
        }

        #[test]
        fn test_empty_registry_is_ignored() {
            let mut state = AppState::default();
            state.next_console(0);
            assert_eq!(state.current_view, View::Console(0));
        }
    }

    mod scrolling {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_scroll_saturates_at_zero() {
            let mut state = AppState::default();
            state.scroll_up_page();
            assert_eq!(state.scroll_offset, 0);
            state.scroll_down_page();
            state.scroll_down_page();
            state.scroll_up_page();
            assert_eq!(state.scroll_offset, 10);
        }

        #[test]
        fn test_switching_consoles_resets_scroll() {
            let mut state = AppState::default();
            state.scroll_down_page();
            state.next_console(3);
            assert_eq!(state.scroll_offset, 0);
        }
    }
}

//! Screen navigation.

/// The screens of the application.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Screen {
    /// The landing page.
    #[default]
    Landing,
    /// The chat with the estimation assistant.
    Chat,
}

/// Tracks which screen is shown.
///
/// There is no history: each screen is reachable from the other one by a
/// single explicit action.
#[derive(Clone, Debug, Default)]
pub struct Navigator {
    active: Screen,
}

impl Navigator {
    /// Creates a navigator showing the landing page.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the screen currently shown.
    #[inline]
    pub fn active_screen(&self) -> Screen {
        self.active
    }

    /// Shows the given screen. Returns `false` if it was already shown.
    pub fn navigate_to(&mut self, screen: Screen) -> bool {
        if self.active == screen {
            return false;
        }
        debug!("navigating from {:?} to {:?}", self.active, screen);
        self.active = screen;
        true
    }

    /// Leaves the landing page for the chat.
    #[inline]
    pub fn start_estimation(&mut self) -> bool {
        self.navigate_to(Screen::Chat)
    }

    /// Leaves the chat for the landing page.
    #[inline]
    pub fn back(&mut self) -> bool {
        self.navigate_to(Screen::Landing)
    }
}

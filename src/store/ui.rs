/// Layout flags that are not tied to a screen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UiStore {
    nav_open: bool,
}

impl UiStore {
    #[must_use]
    pub const fn nav_open(&self) -> bool {
        self.nav_open
    }

    pub fn toggle_nav(&mut self) {
        self.nav_open = !self.nav_open;
    }

    pub fn set_nav(&mut self, open: bool) {
        self.nav_open = open;
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Sidebar {
    open: bool,
}

impl Sidebar {
    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn toggle(&mut self) {
        self.open = !self.open;
    }

    /// Any click outside both the sidebar and its toggle button closes it.
    pub fn on_document_click(&mut self, inside_sidebar: bool, inside_toggle: bool) {
        if !inside_sidebar && !inside_toggle {
            self.open = false;
        }
    }
}

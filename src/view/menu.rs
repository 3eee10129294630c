//! Mobile navigation menu behind the hamburger button.

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MobileMenu {
    open: bool,
}

impl MobileMenu {
    pub fn toggle(&mut self) {
        self.open = !self.open;
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    pub fn is_open(&self) -> bool {
        self.open
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_then_close() {
        let mut m = MobileMenu::default();
        m.toggle();
        assert!(m.is_open());
        m.close();
        m.close();
        assert!(!m.is_open());
    }
}

/// Default number of entries revealed per page.
pub const PAGE_SIZE: usize = 30;

/// Rows of slack allowed when deciding the list bottom reached the viewport.
pub const SCROLL_TOLERANCE: usize = 2;

/// Prefix of the view currently handed to the renderer.
///
/// Grows by one page per bottom-reached scroll event and shrinks only through
/// [`Window::reset`], which every filter change goes through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    page_size: usize,
    shown: usize,
}

impl Window {
    pub fn new(page_size: usize) -> Self {
        Self {
            page_size: page_size.max(1),
            shown: 0,
        }
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn shown(&self) -> usize {
        self.shown
    }

    /// Shows the first page of a source holding `total` entries.
    pub fn reset(&mut self, total: usize) {
        self.shown = self.page_size.min(total);
    }

    /// Reveals one more page. Returns false when everything is already shown.
    pub fn extend(&mut self, total: usize) -> bool {
        if self.shown >= total {
            return false;
        }
        self.shown = (self.shown + self.page_size).min(total);
        true
    }

    pub fn is_exhausted(&self, total: usize) -> bool {
        self.shown >= total
    }
}

impl Default for Window {
    fn default() -> Self {
        Self::new(PAGE_SIZE)
    }
}

/// True when the bottom edge of the rendered list sits within `tolerance` of
/// the viewport bottom. Both positions are measured from the same origin.
pub fn reached_bottom(content_bottom: usize, viewport_bottom: usize, tolerance: usize) -> bool {
    content_bottom <= viewport_bottom + tolerance
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extends_by_page_until_total() {
        let mut window = Window::default();
        window.reset(45);
        assert_eq!(window.shown(), 30);
        assert!(window.extend(45));
        assert_eq!(window.shown(), 45);
        assert!(!window.extend(45));
        assert_eq!(window.shown(), 45);
    }

    #[test]
    fn test_reset_clamps_to_small_sources() {
        let mut window = Window::new(30);
        window.reset(0);
        assert_eq!(window.shown(), 0);
        assert!(window.is_exhausted(0));
        window.reset(12);
        assert_eq!(window.shown(), 12);
    }

    #[test]
    fn test_zero_page_size_is_promoted() {
        let mut window = Window::new(0);
        window.reset(5);
        assert_eq!(window.shown(), 1);
    }

    #[test]
    fn test_reached_bottom_uses_tolerance() {
        assert!(reached_bottom(40, 40, 2));
        assert!(reached_bottom(42, 40, 2));
        assert!(!reached_bottom(43, 40, 2));
        assert!(reached_bottom(10, 40, 0));
    }
}

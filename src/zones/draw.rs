//! Press-drag-release gesture that produces a zone rectangle

use crate::core::types::{Rect, Vec2};

/// In-progress rectangle drawing
#[derive(Debug, Default, Clone)]
pub struct DrawGesture {
    anchor: Option<Vec2>,
    current: Option<Vec2>,
}

impl DrawGesture {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pointer pressed: start a new rectangle at `pos`
    pub fn begin(&mut self, pos: Vec2) {
        self.anchor = Some(pos);
        self.current = Some(pos);
    }

    /// Pointer moved; ignored unless a gesture is active
    pub fn drag(&mut self, pos: Vec2) {
        if self.anchor.is_some() {
            self.current = Some(pos);
        }
    }

    pub fn is_active(&self) -> bool {
        self.anchor.is_some()
    }

    /// Normalized rectangle for the outline drawn while dragging
    pub fn preview(&self) -> Option<Rect> {
        Some(Rect::from_corners(self.anchor?, self.current?))
    }

    /// Pointer released: yields the finished rectangle and resets
    pub fn finish(&mut self) -> Option<Rect> {
        let rect = self.preview();
        self.cancel();
        rect
    }

    pub fn cancel(&mut self) {
        self.anchor = None;
        self.current = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reverse_drag_normalizes() {
        let mut gesture = DrawGesture::new();
        gesture.begin(Vec2::new(50.0, 50.0));
        gesture.drag(Vec2::new(30.0, 40.0));
        gesture.drag(Vec2::new(10.0, 20.0));
        assert_eq!(gesture.finish(), Some(Rect::new(10.0, 20.0, 40.0, 30.0)));
        assert!(!gesture.is_active());
    }

    #[test]
    fn test_finish_without_begin() {
        let mut gesture = DrawGesture::new();
        gesture.drag(Vec2::new(10.0, 10.0));
        assert_eq!(gesture.finish(), None);
    }

    #[test]
    fn test_click_without_drag_is_empty_rect() {
        let mut gesture = DrawGesture::new();
        gesture.begin(Vec2::new(7.0, 8.0));
        assert_eq!(gesture.finish(), Some(Rect::new(7.0, 8.0, 0.0, 0.0)));
    }
}

use serde::{Deserialize, Serialize};

/// Axis-aligned box in screen space, as reported by the host's layout.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub top: f32,
    pub left: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(top: f32, left: f32, width: f32, height: f32) -> Self {
        Self {
            top,
            left,
            width,
            height,
        }
    }

    pub fn origin(top: f32, left: f32) -> Self {
        Self::new(top, left, 0., 0.)
    }

    /// Position of this rect's top-left corner relative to `container`'s.
    pub fn offset_from(&self, container: &Rect) -> Offset {
        Offset {
            top: self.top - container.top,
            left: self.left - container.left,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Offset {
    pub top: f32,
    pub left: f32,
}

impl Offset {
    pub fn new(top: f32, left: f32) -> Self {
        Self { top, left }
    }
}

//! Drawing primitives the host provides.
//!
//! The engine never rasterizes vectors itself: it emits calls on a `Canvas`.
//! A browser host can replay a `CommandList` onto a 2D context; the
//! `VectorCanvas` back end tessellates the same calls into triangles.

use glam::Vec2;

use super::color::Color;
use crate::core::viewport::Viewport;

/// Two strokes from `tip` to `left` and from `tip` to `right`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Arrowhead {
    pub tip: Vec2,
    pub left: Vec2,
    pub right: Vec2,
}

/// Sink for one frame of drawing calls.
pub trait Canvas {
    /// Erase the whole viewport.
    fn clear(&mut self, viewport: Viewport);

    /// Blit a full-viewport RGBA8 buffer (row-major, 4 bytes per pixel).
    fn put_pixels(&mut self, width: u32, height: u32, rgba: &[u8]);

    /// Filled circle with a 1px outline.
    fn fill_circle(&mut self, center: Vec2, radius: f32, fill: Color, outline: Color);

    /// Straight stroked segment.
    fn stroke_segment(&mut self, from: Vec2, to: Vec2, width: f32, color: Color);

    /// Both strokes of an arrowhead.
    fn stroke_arrowhead(&mut self, head: &Arrowhead, width: f32, color: Color);
}

/// A recorded drawing call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear {
        width: u32,
        height: u32,
    },
    Pixels {
        width: u32,
        height: u32,
        rgba: Vec<u8>,
    },
    Circle {
        center: Vec2,
        radius: f32,
        fill: Color,
        outline: Color,
    },
    Segment {
        from: Vec2,
        to: Vec2,
        width: f32,
        color: Color,
    },
    Arrowhead {
        head: Arrowhead,
        width: f32,
        color: Color,
    },
}

/// Canvas that records every call in order.
#[derive(Debug, Clone, Default)]
pub struct CommandList {
    pub commands: Vec<DrawCommand>,
}

impl CommandList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &DrawCommand> {
        self.commands.iter()
    }

    pub fn segment_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Segment { .. }))
            .count()
    }

    pub fn arrowhead_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Arrowhead { .. }))
            .count()
    }

    pub fn circle_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Circle { .. }))
            .count()
    }
}

impl Canvas for CommandList {
    fn clear(&mut self, viewport: Viewport) {
        self.commands.push(DrawCommand::Clear {
            width: viewport.width(),
            height: viewport.height(),
        });
    }

    fn put_pixels(&mut self, width: u32, height: u32, rgba: &[u8]) {
        self.commands.push(DrawCommand::Pixels {
            width,
            height,
            rgba: rgba.to_vec(),
        });
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, fill: Color, outline: Color) {
        self.commands.push(DrawCommand::Circle {
            center,
            radius,
            fill,
            outline,
        });
    }

    fn stroke_segment(&mut self, from: Vec2, to: Vec2, width: f32, color: Color) {
        self.commands.push(DrawCommand::Segment {
            from,
            to,
            width,
            color,
        });
    }

    fn stroke_arrowhead(&mut self, head: &Arrowhead, width: f32, color: Color) {
        self.commands.push(DrawCommand::Arrowhead {
            head: *head,
            width,
            color,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_in_call_order() {
        let mut list = CommandList::new();
        list.clear(Viewport::new(4, 2).unwrap());
        list.stroke_segment(Vec2::ZERO, Vec2::ONE, 1.0, Color::BLACK);
        list.fill_circle(Vec2::ONE, 10.0, Color::RED, Color::BLACK);

        assert_eq!(list.len(), 3);
        assert!(matches!(list.commands[0], DrawCommand::Clear { width: 4, height: 2 }));
        assert_eq!(list.segment_count(), 1);
        assert_eq!(list.circle_count(), 1);
        assert_eq!(list.arrowhead_count(), 0);
    }
}

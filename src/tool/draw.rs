use crate::math::Point3;

/// An RGBA color with components in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const RED: Self = Self::rgb(1.0, 0.0, 0.0);
    pub const GREEN: Self = Self::rgb(0.0, 1.0, 0.0);
    pub const BLUE: Self = Self::rgb(0.0, 0.0, 1.0);
    pub const WHITE: Self = Self::rgb(1.0, 1.0, 1.0);

    /// Creates an opaque color.
    #[must_use]
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }
}

/// Immediate-mode drawing primitives provided by the host viewport.
pub trait DrawSurface {
    /// Draws a sphere marker.
    fn sphere(&mut self, center: &Point3, radius: f64, color: Color);

    /// Draws a line segment.
    fn line(&mut self, from: &Point3, to: &Point3, color: Color);

    /// Draws a polyline whose last point connects back to the first.
    fn closed_polyline(&mut self, points: &[Point3], color: Color);
}

/// A recorded draw call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Sphere {
        center: Point3,
        radius: f64,
        color: Color,
    },
    Line {
        from: Point3,
        to: Point3,
        color: Color,
    },
    ClosedPolyline {
        points: Vec<Point3>,
        color: Color,
    },
}

/// A [`DrawSurface`] that records every call, for headless hosts and tests.
#[derive(Debug, Clone, Default)]
pub struct DrawList {
    commands: Vec<DrawCommand>,
}

impl DrawList {
    /// Creates an empty draw list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the recorded commands in call order.
    #[must_use]
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Removes all recorded commands.
    pub fn clear(&mut self) {
        self.commands.clear();
    }

    /// Returns the number of recorded commands.
    #[must_use]
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Returns `true` if nothing was drawn.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Counts recorded sphere markers.
    #[must_use]
    pub fn sphere_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Sphere { .. }))
            .count()
    }

    /// Counts recorded line segments.
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Line { .. }))
            .count()
    }

    /// Returns the points of the first recorded closed polyline.
    #[must_use]
    pub fn first_polyline(&self) -> Option<&[Point3]> {
        self.commands.iter().find_map(|c| match c {
            DrawCommand::ClosedPolyline { points, .. } => Some(points.as_slice()),
            _ => None,
        })
    }
}

impl DrawSurface for DrawList {
    fn sphere(&mut self, center: &Point3, radius: f64, color: Color) {
        self.commands.push(DrawCommand::Sphere {
            center: *center,
            radius,
            color,
        });
    }

    fn line(&mut self, from: &Point3, to: &Point3, color: Color) {
        self.commands.push(DrawCommand::Line {
            from: *from,
            to: *to,
            color,
        });
    }

    fn closed_polyline(&mut self, points: &[Point3], color: Color) {
        self.commands.push(DrawCommand::ClosedPolyline {
            points: points.to_vec(),
            color,
        });
    }
}

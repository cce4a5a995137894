//! Layout geometry in CSS pixels.
//!
//! The rendering layer measures bounding rectangles every layout pass and
//! hands them to the engine; nothing here is retained across frames.

/// A pointer or element coordinate, origin top-left, y grows downward.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    /// Horizontal coordinate.
    pub x: f64,
    /// Vertical coordinate.
    pub y: f64,
}

impl Point {
    /// Point at `(x, y)`.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point.
    pub fn distance_to(&self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// An axis-aligned bounding rectangle.
///
/// Zero height is valid: a collapsed trash region still has a position and
/// a horizontal span.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    /// Left edge.
    pub left: f64,
    /// Top edge.
    pub top: f64,
    /// Horizontal extent.
    pub width: f64,
    /// Vertical extent, possibly zero.
    pub height: f64,
}

impl Rect {
    /// Rect from its top-left corner and size.
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Right edge.
    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    /// Bottom edge.
    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    /// Geometric center.
    pub fn center(&self) -> Point {
        Point::new(self.left + self.width / 2.0, self.top + self.height / 2.0)
    }

    /// Strict containment: points on an edge are outside.
    pub fn contains_strictly(&self, point: Point) -> bool {
        point.x > self.left && point.x < self.right() && point.y > self.top && point.y < self.bottom()
    }

    /// Whether `x` lies within the horizontal span, edges included.
    pub fn spans_x(&self, x: f64) -> bool {
        x >= self.left && x <= self.right()
    }

    /// The same rectangle shifted by a transform.
    pub fn translated(&self, transform: Transform) -> Self {
        Self {
            left: self.left + transform.x,
            top: self.top + transform.y,
            ..*self
        }
    }
}

/// Visual offset applied to the dragged card.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Transform {
    /// Horizontal offset.
    pub x: f64,
    /// Vertical offset.
    pub y: f64,
}

impl Transform {
    /// No offset.
    pub const IDENTITY: Self = Self { x: 0.0, y: 0.0 };

    /// Offset by `(x, y)`.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Offset from `origin` to `pointer`.
    pub fn between(origin: Point, pointer: Point) -> Self {
        Self {
            x: pointer.x - origin.x,
            y: pointer.y - origin.y,
        }
    }
}

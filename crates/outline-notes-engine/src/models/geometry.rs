use serde::Serialize;

/// Integer position of a region's top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Size {
    pub width: i32,
    pub height: i32,
}

impl Size {
    pub fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }
}

/// Position and size of a region, normalized to integer units
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Bounds {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Bounds {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn from_parts(origin: Point, size: Size) -> Self {
        Self::new(origin.x, origin.y, size.width, size.height)
    }

    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Closed-interval point test: points on any edge are inside.
    pub fn contains(&self, x: i32, y: i32) -> bool {
        let (x, y) = (i64::from(x), i64::from(y));
        let (left, top) = (i64::from(self.x), i64::from(self.y));
        let right = left + i64::from(self.width);
        let bottom = top + i64::from(self.height);
        left <= x && x <= right && top <= y && y <= bottom
    }

    /// Corner-point overlap: true when either origin lies inside the other box.
    ///
    /// Rectangles that cross without either corner landing inside the other
    /// are not reported. Placement relies on this narrower test.
    pub fn corners_overlap(&self, other: &Bounds) -> bool {
        other.contains(self.x, self.y) || self.contains(other.x, other.y)
    }
}

/// Write a coordinate the way the page format stores it: one fractional digit
pub(crate) fn format_coordinate(value: i32) -> String {
    format!("{value}.0")
}

/// Normalize a stored decimal to integer units, truncating toward zero
pub(crate) fn truncate_coordinate(value: f64) -> i32 {
    value.trunc() as i32
}

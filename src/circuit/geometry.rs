//! Grid coordinates and the pin layout rules shared by the resolver and the editor

use std::fmt;
use std::ops::{Add, Sub};

/// A cell on the editing grid
///
/// Coordinates are signed so that components may be dragged past the origin.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy, Default, PartialOrd, Ord)]
pub struct Point {
    /// Column, growing to the right
    pub x: i32,
    /// Row, growing downwards
    pub y: i32,
}

impl Point {
    /// Create a new point
    pub fn new(x: i32, y: i32) -> Point {
        Point { x, y }
    }

    /// Closest point inside the editing grid
    pub fn clamp_to_grid(&self) -> Point {
        Point::new(
            self.x.clamp(-GRID_LIMIT, GRID_LIMIT),
            self.y.clamp(-GRID_LIMIT, GRID_LIMIT),
        )
    }
}

/// Largest coordinate reachable by the editor cursor, in both directions
pub const GRID_LIMIT: i32 = 1 << 20;

impl Add for Point {
    type Output = Point;
    fn add(self, rhs: Point) -> Point {
        Point::new(self.x.saturating_add(rhs.x), self.y.saturating_add(rhs.y))
    }
}

impl Sub for Point {
    type Output = Point;
    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x.saturating_sub(rhs.x), self.y.saturating_sub(rhs.y))
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Axis-aligned footprint of a component, anchored at its top-left cell
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub struct Rect {
    /// Top-left cell
    pub origin: Point,
    /// Number of columns
    pub width: i32,
    /// Number of rows
    pub height: i32,
}

impl Rect {
    /// Create a new footprint
    pub fn new(origin: Point, width: i32, height: i32) -> Rect {
        Rect {
            origin,
            width,
            height,
        }
    }

    /// Returns whether the cell lies inside the footprint (right and bottom edges excluded)
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.origin.x
            && p.x < self.origin.x.saturating_add(self.width)
            && p.y >= self.origin.y
            && p.y < self.origin.y.saturating_add(self.height)
    }

    /// Returns whether the two footprints share a cell
    pub fn intersects(&self, other: &Rect) -> bool {
        let (a, b) = (self.end(), other.end());
        self.origin.x < b.x
            && other.origin.x < a.x
            && self.origin.y < b.y
            && other.origin.y < a.y
    }

    /// Smallest footprint covering both
    pub fn union(&self, other: &Rect) -> Rect {
        let x0 = self.origin.x.min(other.origin.x);
        let y0 = self.origin.y.min(other.origin.y);
        let x1 = self.end().x.max(other.end().x);
        let y1 = self.end().y.max(other.end().y);
        Rect::new(Point::new(x0, y0), x1.saturating_sub(x0), y1.saturating_sub(y0))
    }

    /// Cell just past the bottom-right corner
    pub fn end(&self) -> Point {
        self.origin + Point::new(self.width, self.height)
    }
}

/// Row offset of the output pin, shared by every gate kind
pub const OUTPUT_ROW: i32 = 1;

/// Returns whether a wire endpoint lands on the left (input) edge of a footprint
///
/// Multi-input gates take their inputs on every row of `[y, y + height]` except the
/// output row. Single-input gates take their only input on the output row.
pub fn touches_input_edge(p: Point, bounds: &Rect, single_input: bool) -> bool {
    if p.x != bounds.origin.x {
        return false;
    }
    let row = p.y.saturating_sub(bounds.origin.y);
    if single_input {
        row == OUTPUT_ROW
    } else {
        row >= 0 && row <= bounds.height && row != OUTPUT_ROW
    }
}

/// Returns whether a wire endpoint lands on the output pin, just right of the middle row
pub fn touches_output_edge(p: Point, bounds: &Rect) -> bool {
    p == output_pin(bounds)
}

/// Position of the output pin of a footprint
pub fn output_pin(bounds: &Rect) -> Point {
    bounds.origin + Point::new(bounds.width, OUTPUT_ROW)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gate_rect() -> Rect {
        Rect::new(Point::new(10, 5), 8, 3)
    }

    #[test]
    fn test_contains() {
        let r = gate_rect();
        assert!(r.contains(Point::new(10, 5)));
        assert!(r.contains(Point::new(17, 7)));
        assert!(!r.contains(Point::new(18, 5)));
        assert!(!r.contains(Point::new(10, 8)));
        assert!(!r.contains(Point::new(9, 6)));
    }

    #[test]
    fn test_input_edge() {
        let r = gate_rect();
        assert!(touches_input_edge(Point::new(10, 5), &r, false));
        assert!(!touches_input_edge(Point::new(10, 6), &r, false));
        assert!(touches_input_edge(Point::new(10, 7), &r, false));
        // The row just below the footprint is accepted as well
        assert!(touches_input_edge(Point::new(10, 8), &r, false));
        assert!(!touches_input_edge(Point::new(10, 9), &r, false));
        assert!(!touches_input_edge(Point::new(10, 4), &r, false));
        assert!(!touches_input_edge(Point::new(11, 5), &r, false));
    }

    #[test]
    fn test_single_input_edge() {
        let r = gate_rect();
        assert!(touches_input_edge(Point::new(10, 6), &r, true));
        assert!(!touches_input_edge(Point::new(10, 5), &r, true));
        assert!(!touches_input_edge(Point::new(10, 7), &r, true));
    }

    #[test]
    fn test_output_edge() {
        let r = gate_rect();
        assert_eq!(output_pin(&r), Point::new(18, 6));
        assert!(touches_output_edge(Point::new(18, 6), &r));
        assert!(!touches_output_edge(Point::new(17, 6), &r));
        assert!(!touches_output_edge(Point::new(18, 5), &r));
    }

    #[test]
    fn test_saturation() {
        let far = Point::new(i32::MAX, i32::MIN);
        assert_eq!(far + Point::new(1, -1), far);
        assert_eq!(far - Point::new(-5, 5), far);
        let r = Rect::new(Point::new(i32::MAX - 1, 0), 8, 3);
        assert!(r.contains(Point::new(i32::MAX - 1, 1)));
        assert_eq!(output_pin(&r), Point::new(i32::MAX, 1));
        let u = r.union(&Rect::new(Point::new(i32::MIN, 0), 1, 1));
        assert_eq!(u.width, i32::MAX);
        assert_eq!(far.clamp_to_grid(), Point::new(GRID_LIMIT, -GRID_LIMIT));
    }

    #[test]
    fn test_union() {
        let a = Rect::new(Point::new(0, 0), 2, 2);
        let b = Rect::new(Point::new(-3, 4), 1, 1);
        assert_eq!(a.union(&b), Rect::new(Point::new(-3, 0), 5, 5));
        assert!(!a.intersects(&b));
        assert!(a.intersects(&a.union(&b)));
        assert!(!a.intersects(&Rect::new(Point::new(2, 0), 1, 1)));
        assert!(a.intersects(&Rect::new(Point::new(1, 1), 4, 4)));
    }
}

use std::fmt;

use crate::circuit::geometry::Point;
use crate::circuit::id::WireId;

/// Shape of the two-segment path between the endpoints of a wire
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub enum Elbow {
    /// Vertical run from the start, then horizontal run to the end
    VerticalFirst,
    /// Horizontal run from the start, then vertical run to the end
    HorizontalFirst,
}

impl Elbow {
    /// The elbow describing the same path walked from the other end
    pub fn flipped(&self) -> Elbow {
        match self {
            Elbow::VerticalFirst => Elbow::HorizontalFirst,
            Elbow::HorizontalFirst => Elbow::VerticalFirst,
        }
    }
}

/// A wire between two grid cells
///
/// Once resolved, `start` sits on the pin of the gate driving the wire and `end`
/// on the input edge of the gate it feeds.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Wire {
    id: WireId,
    start: Point,
    end: Point,
    elbow: Elbow,
    pub(crate) state: bool,
}

impl Wire {
    pub(crate) fn new(id: WireId, start: Point, end: Point, elbow: Elbow) -> Wire {
        Wire {
            id,
            start,
            end,
            elbow,
            state: false,
        }
    }

    /// Handle of the wire
    pub fn id(&self) -> WireId {
        self.id
    }

    /// Producing end of the wire
    pub fn start(&self) -> Point {
        self.start
    }

    /// Consuming end of the wire
    pub fn end(&self) -> Point {
        self.end
    }

    /// Shape of the path
    pub fn elbow(&self) -> Elbow {
        self.elbow
    }

    /// Value carried by the wire
    pub fn state(&self) -> bool {
        self.state
    }

    pub(crate) fn set_endpoints(&mut self, start: Point, end: Point) {
        self.start = start;
        self.end = end;
    }

    /// Swap the endpoints, keeping the same path on the grid
    pub(crate) fn reverse(&mut self) {
        std::mem::swap(&mut self.start, &mut self.end);
        self.elbow = self.elbow.flipped();
    }

    /// Cell where the two runs meet
    pub fn corner(&self) -> Point {
        match self.elbow {
            Elbow::VerticalFirst => Point::new(self.start.x, self.end.y),
            Elbow::HorizontalFirst => Point::new(self.end.x, self.start.y),
        }
    }

    /// All cells on the path, from start to end
    pub fn cells(&self) -> Vec<Point> {
        let corner = self.corner();
        let mut ret = vec![self.start];
        walk(self.start, corner, &mut ret);
        walk(corner, self.end, &mut ret);
        ret
    }

    /// Returns whether the path goes through the cell
    pub fn passes_through(&self, p: Point) -> bool {
        let c = self.corner();
        on_segment(self.start, c, p) || on_segment(c, self.end, p)
    }
}

/// Append the cells after `from` up to and including `to`, along a straight run
fn walk(from: Point, to: Point, cells: &mut Vec<Point>) {
    let dx = to.x.saturating_sub(from.x).signum();
    let dy = to.y.saturating_sub(from.y).signum();
    let mut p = from;
    while p != to {
        p = Point::new(p.x + dx, p.y + dy);
        cells.push(p);
    }
}

fn on_segment(a: Point, b: Point, p: Point) -> bool {
    let in_x = p.x >= a.x.min(b.x) && p.x <= a.x.max(b.x);
    let in_y = p.y >= a.y.min(b.y) && p.y <= a.y.max(b.y);
    in_x && in_y && (a.x == b.x || a.y == b.y)
}

impl fmt::Display for Wire {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let v = self.state as u8;
        write!(f, "{} {} -> {} = {v}", self.id, self.start, self.end)
    }
}

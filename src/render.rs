//! Plain text view of the editor
//!
//! Wires are drawn first, then gates over them, then the cursor. Low wires use `-`, `|`
//! and `+` at bends; high wires use `#` everywhere.
//!
//! Large circuits are cropped to a window of at most [`MAX_COLUMNS`] by [`MAX_ROWS`]
//! cells around the cursor.

use fxhash::FxHashMap;
use itertools::Itertools;

use crate::circuit::geometry::Rect;
use crate::circuit::{Gate, GateKind, Point, Wire};
use crate::editor::Editor;

const EMPTY: char = ' ';
const CURSOR: char = '@';
const HIGH: char = '#';

/// Maximum width of the rendered area
pub const MAX_COLUMNS: i32 = 200;
/// Maximum height of the rendered area
pub const MAX_ROWS: i32 = 100;

/// Cells drawn so far, by position
#[derive(Default)]
struct Canvas {
    cells: FxHashMap<Point, char>,
}

impl Canvas {
    fn set(&mut self, p: Point, c: char) {
        self.cells.insert(p, c);
    }

    /// Draw the cells of a straight run that lie inside the area
    fn draw_run(&mut self, from: Point, to: Point, c: char, area: &Rect) {
        let end = area.end();
        let x0 = from.x.min(to.x).max(area.origin.x);
        let x1 = from.x.max(to.x).min(end.x.saturating_sub(1));
        let y0 = from.y.min(to.y).max(area.origin.y);
        let y1 = from.y.max(to.y).min(end.y.saturating_sub(1));
        for y in y0..=y1 {
            for x in x0..=x1 {
                self.set(Point::new(x, y), c);
            }
        }
    }

    fn draw_wire(&mut self, w: &Wire, area: &Rect) {
        let (start, corner, end) = (w.start(), w.corner(), w.end());
        for (from, to) in [(start, corner), (corner, end)] {
            if from == to {
                continue;
            }
            let c = if w.state() {
                HIGH
            } else if from.y == to.y {
                '-'
            } else {
                '|'
            };
            self.draw_run(from, to, c, area);
        }
        if start == end || (corner != start && corner != end) {
            let c = if w.state() { HIGH } else { '+' };
            self.draw_run(corner, corner, c, area);
        }
    }

    fn draw_gate(&mut self, g: &Gate, area: &Rect) {
        let b = g.bounds();
        if !b.intersects(area) {
            return;
        }
        let label = match g.kind() {
            GateKind::Input => (g.probe() as u8).to_string(),
            k => k.name().to_owned(),
        };
        let mut label = label.chars();
        for dy in 0..b.height {
            for dx in 0..b.width {
                let p = b.origin + Point::new(dx, dy);
                let edge = dx == 0 || dx == b.width - 1;
                let c = if dy == 0 || dy == b.height - 1 {
                    if edge {
                        '+'
                    } else {
                        '='
                    }
                } else if edge {
                    if dx == 0 {
                        '['
                    } else {
                        ']'
                    }
                } else if dy == 1 {
                    label.next().unwrap_or(EMPTY)
                } else {
                    EMPTY
                };
                self.set(p, c);
            }
        }
    }

    /// Lines covering the area, top to bottom
    fn lines(&self, area: &Rect) -> Vec<String> {
        (0..area.height)
            .map(|dy| {
                (0..area.width)
                    .map(|dx| {
                        let p = area.origin + Point::new(dx, dy);
                        self.cells.get(&p).copied().unwrap_or(EMPTY)
                    })
                    .join("")
                    .trim_end()
                    .to_owned()
            })
            .collect()
    }
}

/// Restrict one axis of the area to `max` cells, keeping the cursor in view
fn crop(origin: i32, len: i32, cursor: i32, max: i32) -> (i32, i32) {
    if len <= max {
        return (origin, len);
    }
    let last = origin.saturating_add(len - max);
    let o = cursor.saturating_sub(max / 2).clamp(origin, last);
    (o, max)
}

/// Draw the circuit and the cursor, on the smallest area covering both
pub fn render(editor: &Editor) -> Vec<String> {
    let c = editor.circuit();
    let p = editor.cursor();
    let cursor = Rect::new(p, 1, 1);
    let full = match c.bounds() {
        Some(b) => b.union(&cursor),
        None => cursor,
    };
    let (x, width) = crop(full.origin.x, full.width, p.x, MAX_COLUMNS);
    let (y, height) = crop(full.origin.y, full.height, p.y, MAX_ROWS);
    let area = Rect::new(Point::new(x, y), width, height);

    let mut canvas = Canvas::default();
    for w in c.wires() {
        canvas.draw_wire(w, &area);
    }
    for g in c.gates() {
        canvas.draw_gate(g, &area);
    }
    canvas.set(editor.cursor(), CURSOR);
    canvas.lines(&area)
}

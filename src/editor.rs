//! Interactive editing as a state machine
//!
//! The editor owns the circuit and a cursor. Each discrete input [`Event`] updates the
//! current [`Mode`] or applies a mutation, then runs one tick: the circuit is resolved
//! and, while the simulation is enabled, values are propagated.
//!
//! ```
//! # use gridlogic::circuit::{GateKind, Point};
//! # use gridlogic::editor::{Editor, Event};
//! let mut ed = Editor::new();
//! for ev in [
//!     Event::BeginGate(GateKind::Input),
//!     Event::Confirm,
//!     Event::CursorTo(Point::new(4, 1)),
//!     Event::BeginWire,
//!     Event::CursorTo(Point::new(9, 1)),
//!     Event::Confirm,
//!     Event::CursorTo(Point::new(1, 1)),
//!     Event::Toggle,
//!     Event::ToggleSimulation,
//! ] {
//!     ed.handle(ev);
//! }
//! assert!(ed.circuit().wires()[0].state());
//! ```

use tracing::{debug, info};

use crate::circuit::geometry::GRID_LIMIT;
use crate::circuit::{Circuit, GateId, GateKind, Point, WireId};
use crate::io::export;
use crate::resolve::{resolve, Resolution};
use crate::sim::{propagate, Settle};

/// A component under the cursor
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Component {
    /// A gate
    Gate(GateId),
    /// A wire
    Wire(WireId),
}

/// Cursor movement direction
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Direction {
    /// Towards row 0
    Up,
    /// Away from row 0
    Down,
    /// Towards column 0
    Left,
    /// Away from column 0
    Right,
}

impl Direction {
    fn offset(&self, n: i32) -> Point {
        match self {
            Direction::Up => Point::new(0, n.saturating_neg()),
            Direction::Down => Point::new(0, n),
            Direction::Left => Point::new(n.saturating_neg(), 0),
            Direction::Right => Point::new(n, 0),
        }
    }
}

/// Current interaction mode
#[derive(Debug, PartialEq, Eq, Clone, Copy, Default)]
pub enum Mode {
    /// Waiting for a command
    #[default]
    Idle,
    /// A gate of this kind will be placed at the cursor on confirmation
    PlacingGate(GateKind),
    /// A wire will be drawn from `start` to the cursor on confirmation
    PlacingWire {
        /// First endpoint, as drawn
        start: Point,
    },
    /// A component will be shifted by the cursor displacement since `grab` on confirmation
    Moving {
        /// Component being moved
        target: Component,
        /// Cursor position when the move started
        grab: Point,
    },
}

/// Discrete input to the editor
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Event {
    /// Move the cursor by a number of cells
    Cursor(Direction, i32),
    /// Move the cursor to a cell
    CursorTo(Point),
    /// Start placing a gate
    BeginGate(GateKind),
    /// Start drawing a wire from the cursor
    BeginWire,
    /// Start moving the component under the cursor
    BeginMove,
    /// Complete the current placement or move
    Confirm,
    /// Abandon the current placement or move
    Cancel,
    /// Delete the component under the cursor
    Delete,
    /// Toggle the input probe under the cursor
    Toggle,
    /// Start or stop the simulation
    ToggleSimulation,
    /// Nothing happened; only run a tick
    Tick,
    /// Run this many ticks, at least one
    Ticks(u32),
}

/// Editor state: the circuit, the cursor and the interaction mode
#[derive(Debug, Clone, Default)]
pub struct Editor {
    circuit: Circuit,
    cursor: Point,
    mode: Mode,
    simulating: bool,
    resolution: Resolution,
    settle: Option<Settle>,
}

impl Editor {
    /// Create an editor on an empty circuit
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an editor on an existing circuit
    pub fn from_circuit(circuit: Circuit) -> Self {
        let mut ret = Editor {
            circuit,
            ..Default::default()
        };
        ret.tick();
        ret
    }

    /// The circuit being edited
    pub fn circuit(&self) -> &Circuit {
        &self.circuit
    }

    /// Cursor position, always within [`GRID_LIMIT`] of the origin
    pub fn cursor(&self) -> Point {
        self.cursor
    }

    /// Current interaction mode
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Returns whether values are propagated on each tick
    pub fn is_simulating(&self) -> bool {
        self.simulating
    }

    /// Summary of the last resolve
    pub fn resolution(&self) -> &Resolution {
        &self.resolution
    }

    /// Outcome of the last propagation, if the simulation ran on the last tick
    pub fn settle(&self) -> Option<Settle> {
        self.settle
    }

    /// Netlist of the circuit as of the last tick
    pub fn export(&self) -> Vec<String> {
        export(&self.circuit)
    }

    /// Component under the cursor, gates first
    pub fn component_at_cursor(&self) -> Option<Component> {
        if let Some(g) = self.circuit.gate_at(self.cursor) {
            Some(Component::Gate(g))
        } else {
            self.circuit.wire_at(self.cursor).map(Component::Wire)
        }
    }

    /// Resolve the circuit, and propagate values if the simulation is running
    pub fn tick(&mut self) {
        self.resolution = resolve(&mut self.circuit);
        self.settle = if self.simulating {
            Some(propagate(&mut self.circuit))
        } else {
            None
        };
    }

    /// Apply an event and run a tick; returns whether the event was accepted
    pub fn handle(&mut self, event: Event) -> bool {
        let accepted = self.apply(event);
        if !accepted {
            debug!("ignored {:?} in mode {:?}", event, self.mode);
        }
        self.tick();
        accepted
    }

    fn apply(&mut self, event: Event) -> bool {
        match (event, self.mode) {
            (Event::Cursor(dir, n), _) => {
                self.cursor = (self.cursor + dir.offset(n)).clamp_to_grid();
                true
            }
            (Event::CursorTo(p), _) => {
                self.cursor = p.clamp_to_grid();
                true
            }
            (Event::Tick, _) => true,
            (Event::Ticks(n), _) => {
                // The last tick is run by handle
                for _ in 1..n {
                    self.tick();
                }
                true
            }
            (Event::ToggleSimulation, _) => {
                self.simulating = !self.simulating;
                info!(
                    "simulation {}",
                    if self.simulating { "enabled" } else { "paused" }
                );
                true
            }
            (Event::Cancel, Mode::Idle) => false,
            (Event::Cancel, _) => {
                self.mode = Mode::Idle;
                true
            }
            (Event::BeginGate(kind), Mode::Idle) => {
                self.mode = Mode::PlacingGate(kind);
                true
            }
            (Event::BeginWire, Mode::Idle) => {
                self.mode = Mode::PlacingWire { start: self.cursor };
                true
            }
            (Event::BeginMove, Mode::Idle) => match self.component_at_cursor() {
                Some(target) => {
                    self.mode = Mode::Moving {
                        target,
                        grab: self.cursor,
                    };
                    true
                }
                None => false,
            },
            (Event::Delete, Mode::Idle) => self.delete_at_cursor(),
            (Event::Toggle, Mode::Idle) => self.toggle_at_cursor(),
            (Event::Confirm, Mode::PlacingGate(kind)) => {
                let id = self.circuit.create_gate(kind, self.cursor);
                info!("placed {kind} gate {id} at {}", self.cursor);
                self.mode = Mode::Idle;
                true
            }
            (Event::Confirm, Mode::PlacingWire { start }) => {
                if start == self.cursor {
                    return false;
                }
                let id = self.circuit.create_wire(start, self.cursor);
                info!("placed wire {id} from {start} to {}", self.cursor);
                self.mode = Mode::Idle;
                true
            }
            (Event::Confirm, Mode::Moving { target, grab }) => {
                let delta = self.cursor - grab;
                self.mode = Mode::Idle;
                self.move_component(target, delta)
            }
            _ => false,
        }
    }

    fn move_component(&mut self, target: Component, delta: Point) -> bool {
        let res = match target {
            Component::Gate(id) => match self.circuit.gate(id) {
                Some(g) => {
                    let p = g.position() + delta;
                    self.circuit.move_gate(id, p)
                }
                None => return false,
            },
            Component::Wire(id) => match self.circuit.wire(id) {
                Some(w) => {
                    let (s, e) = (w.start() + delta, w.end() + delta);
                    self.circuit.move_wire(id, s, e)
                }
                None => return false,
            },
        };
        match res {
            Ok(()) => {
                info!("moved {:?} by {}", target, delta);
                true
            }
            Err(err) => {
                debug!("{}", err);
                false
            }
        }
    }

    fn delete_at_cursor(&mut self) -> bool {
        let res = match self.component_at_cursor() {
            Some(Component::Gate(id)) => self.circuit.delete_gate(id).map(|_| ()),
            Some(Component::Wire(id)) => self.circuit.delete_wire(id).map(|_| ()),
            None => return false,
        };
        match res {
            Ok(()) => {
                info!("deleted component at {}", self.cursor);
                true
            }
            Err(err) => {
                debug!("{}", err);
                false
            }
        }
    }

    fn toggle_at_cursor(&mut self) -> bool {
        let Some(id) = self.circuit.gate_at(self.cursor) else {
            return false;
        };
        match self.circuit.toggle_input(id) {
            Ok(v) => {
                info!("input {} set to {}", id, v as u8);
                true
            }
            Err(err) => {
                debug!("{}", err);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(ed: &mut Editor, events: &[Event]) -> Vec<bool> {
        events.iter().map(|e| ed.handle(*e)).collect()
    }

    /// Input probe at the origin, inverter at (10, 0), both wired
    fn inverter() -> Editor {
        let mut ed = Editor::new();
        run(
            &mut ed,
            &[
                Event::BeginGate(GateKind::Input),
                Event::Confirm,
                Event::CursorTo(Point::new(10, 0)),
                Event::BeginGate(GateKind::Not),
                Event::Confirm,
                Event::CursorTo(Point::new(10, 1)),
                Event::BeginWire,
                Event::Cursor(Direction::Left, 6),
                Event::Confirm,
                Event::CursorTo(Point::new(18, 1)),
                Event::BeginWire,
                Event::Cursor(Direction::Right, 3),
                Event::Confirm,
            ],
        );
        ed
    }

    #[test]
    fn test_place() {
        let ed = inverter();
        assert_eq!(ed.mode(), Mode::Idle);
        assert_eq!(ed.cursor(), Point::new(21, 1));
        assert_eq!(ed.circuit().nb_gates(), 2);
        assert_eq!(ed.circuit().nb_wires(), 2);
        assert!(ed.resolution().is_clean());
        // The first wire was drawn backwards
        assert_eq!(ed.circuit().wires()[0].start(), Point::new(4, 1));
        assert_eq!(ed.settle(), None);
    }

    #[test]
    fn test_simulation() {
        let mut ed = inverter();
        let out = ed.circuit().wires()[1].id();
        assert_eq!(ed.circuit().wire_state(out), Some(false));
        ed.handle(Event::ToggleSimulation);
        assert!(ed.is_simulating());
        assert!(ed.settle().unwrap().is_settled());
        assert_eq!(ed.circuit().wire_state(out), Some(true));

        ed.handle(Event::CursorTo(Point::new(2, 2)));
        assert!(ed.handle(Event::Toggle));
        assert_eq!(ed.circuit().wire_state(out), Some(false));

        // Paused: values are frozen
        ed.handle(Event::ToggleSimulation);
        assert!(ed.handle(Event::Toggle));
        assert_eq!(ed.circuit().wire_state(out), Some(false));
        ed.handle(Event::ToggleSimulation);
        assert_eq!(ed.circuit().wire_state(out), Some(true));
    }

    #[test]
    fn test_rejected() {
        let mut ed = inverter();
        ed.handle(Event::CursorTo(Point::new(12, 1)));
        // Not an input probe
        assert!(!ed.handle(Event::Toggle));
        // Nothing to cancel
        assert!(!ed.handle(Event::Cancel));
        // Confirm without a pending action
        assert!(!ed.handle(Event::Confirm));
        ed.handle(Event::CursorTo(Point::new(50, 50)));
        assert!(!ed.handle(Event::BeginMove));
        assert!(!ed.handle(Event::Delete));
        // Zero-length wire
        assert!(ed.handle(Event::BeginWire));
        assert!(!ed.handle(Event::Confirm));
        assert!(ed.handle(Event::Cancel));
        assert_eq!(ed.mode(), Mode::Idle);
        assert_eq!(ed.circuit().nb_wires(), 2);
    }

    #[test]
    fn test_move_gate() {
        let mut ed = inverter();
        let not = ed.circuit().gates()[1].id();
        let accepted = run(
            &mut ed,
            &[
                Event::CursorTo(Point::new(12, 2)),
                Event::BeginMove,
                Event::Cursor(Direction::Down, 5),
                Event::Confirm,
            ],
        );
        assert!(accepted.iter().all(|a| *a));
        assert_eq!(ed.circuit().gate(not).unwrap().position(), Point::new(10, 5));
        // Both wires are now detached from the inverter
        assert!(ed.circuit().gate(not).unwrap().inputs().is_empty());
        assert_eq!(ed.circuit().gate(not).unwrap().output(), None);
        assert_eq!(ed.resolution().starved_gates, vec![not]);
    }

    #[test]
    fn test_move_wire() {
        let mut ed = inverter();
        let w = ed.circuit().wires()[1].id();
        run(
            &mut ed,
            &[
                Event::CursorTo(Point::new(20, 1)),
                Event::BeginMove,
                Event::Cursor(Direction::Up, 2),
                Event::Confirm,
            ],
        );
        let wire = ed.circuit().wire(w).unwrap();
        assert_eq!(wire.start(), Point::new(18, -1));
        assert_eq!(wire.end(), Point::new(21, -1));
        assert_eq!(ed.resolution().inert_wires, vec![w]);
    }

    #[test]
    fn test_cancel_move() {
        let mut ed = inverter();
        run(
            &mut ed,
            &[
                Event::CursorTo(Point::new(1, 1)),
                Event::BeginMove,
                Event::Cursor(Direction::Right, 30),
                Event::Cancel,
            ],
        );
        assert_eq!(ed.circuit().gates()[0].position(), Point::new(0, 0));
    }

    #[test]
    fn test_delete() {
        let mut ed = inverter();
        let ids: Vec<_> = ed.circuit().gates().iter().map(|g| g.id()).collect();
        ed.handle(Event::CursorTo(Point::new(14, 1)));
        assert_eq!(ed.component_at_cursor(), Some(Component::Gate(ids[1])));
        assert!(ed.handle(Event::Delete));
        assert_eq!(ed.circuit().nb_gates(), 1);
        assert_eq!(ed.circuit().gates()[0].id(), ids[0]);

        ed.handle(Event::CursorTo(Point::new(7, 1)));
        assert!(ed.handle(Event::Delete));
        assert_eq!(ed.circuit().nb_wires(), 1);
    }

    #[test]
    fn test_cursor_limits() {
        let mut ed = Editor::new();
        ed.handle(Event::CursorTo(Point::new(i32::MAX, 0)));
        assert_eq!(ed.cursor(), Point::new(GRID_LIMIT, 0));
        assert!(ed.handle(Event::Cursor(Direction::Right, 1)));
        assert_eq!(ed.cursor(), Point::new(GRID_LIMIT, 0));
        ed.handle(Event::Cursor(Direction::Left, i32::MIN));
        assert_eq!(ed.cursor(), Point::new(GRID_LIMIT, 0));
        ed.handle(Event::Cursor(Direction::Up, i32::MAX));
        assert_eq!(ed.cursor(), Point::new(GRID_LIMIT, -GRID_LIMIT));

        // The cursor stays on the grid, so the move is a no-op
        run(
            &mut ed,
            &[
                Event::BeginGate(GateKind::And),
                Event::Confirm,
                Event::BeginMove,
                Event::Cursor(Direction::Right, 5),
                Event::Confirm,
            ],
        );
        assert_eq!(ed.mode(), Mode::Idle);
        assert_eq!(ed.circuit().gates()[0].position().x, GRID_LIMIT);
    }

    #[test]
    fn test_ticks() {
        // Inverter feeding itself: its output flips on every tick
        let mut c = Circuit::new();
        c.create_gate(GateKind::Not, Point::new(0, 0));
        let w = c.create_wire(Point::new(8, 1), Point::new(0, 1));
        let mut ed = Editor::from_circuit(c);
        assert_eq!(ed.circuit().wire_state(w), Some(false));
        ed.handle(Event::ToggleSimulation);
        assert_eq!(ed.circuit().wire_state(w), Some(true));
        assert!(ed.handle(Event::Ticks(3)));
        assert_eq!(ed.circuit().wire_state(w), Some(false));
        assert!(!ed.settle().unwrap().is_settled());
        assert!(ed.handle(Event::Ticks(0)));
        assert_eq!(ed.circuit().wire_state(w), Some(true));
    }

    #[test]
    fn test_export() {
        let ed = inverter();
        assert_eq!(
            ed.export(),
            vec!["WIRE(w0)", "WIRE(w1)", "w1 = NOT(w0)"]
        );
    }
}

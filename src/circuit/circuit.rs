use core::fmt;

use tracing::trace;

use crate::circuit::gates::{Gate, GateKind};
use crate::circuit::geometry::{Point, Rect};
use crate::circuit::id::{GateId, WireId};
use crate::circuit::wire::{Elbow, Wire};
use crate::error::CircuitError;

/// Editable circuit: the gates and wires placed on the grid
///
/// Both collections are stored densely and kept sorted by handle, so that deleting a
/// component keeps the relative order of all others. Handles are never reused.
/// Connectivity is not stored here permanently: the links on each gate are
/// recomputed from the geometry by [`crate::resolve::resolve`].
#[derive(Debug, Clone, Default)]
pub struct Circuit {
    gates: Vec<Gate>,
    wires: Vec<Wire>,
    next_gate: u32,
    next_wire: u32,
}

impl Circuit {
    /// Create a new empty circuit
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the number of gates
    pub fn nb_gates(&self) -> usize {
        self.gates.len()
    }

    /// Return the number of wires
    pub fn nb_wires(&self) -> usize {
        self.wires.len()
    }

    /// All gates, in creation order
    pub fn gates(&self) -> &[Gate] {
        &self.gates
    }

    /// All wires, in creation order
    pub fn wires(&self) -> &[Wire] {
        &self.wires
    }

    /// Mutable access to both collections at once, for the resolver
    pub(crate) fn split_mut(&mut self) -> (&mut [Gate], &mut [Wire]) {
        (&mut self.gates, &mut self.wires)
    }

    fn gate_index(&self, id: GateId) -> Option<usize> {
        self.gates.binary_search_by_key(&id, |g| g.id()).ok()
    }

    fn wire_index(&self, id: WireId) -> Option<usize> {
        self.wires.binary_search_by_key(&id, |w| w.id()).ok()
    }

    /// Get a gate by handle
    pub fn gate(&self, id: GateId) -> Option<&Gate> {
        self.gate_index(id).map(|i| &self.gates[i])
    }

    /// Get a wire by handle
    pub fn wire(&self, id: WireId) -> Option<&Wire> {
        self.wire_index(id).map(|i| &self.wires[i])
    }

    fn gate_mut(&mut self, id: GateId) -> Result<&mut Gate, CircuitError> {
        match self.gate_index(id) {
            Some(i) => Ok(&mut self.gates[i]),
            None => Err(CircuitError::UnknownGate(id)),
        }
    }

    fn wire_mut(&mut self, id: WireId) -> Result<&mut Wire, CircuitError> {
        match self.wire_index(id) {
            Some(i) => Ok(&mut self.wires[i]),
            None => Err(CircuitError::UnknownWire(id)),
        }
    }

    /// Value carried by a wire, if it exists
    pub fn wire_state(&self, id: WireId) -> Option<bool> {
        self.wire(id).map(|w| w.state())
    }

    /// Set the value carried by a wire
    pub(crate) fn set_wire_state(&mut self, id: WireId, value: bool) -> Option<bool> {
        let i = self.wire_index(id)?;
        let prev = self.wires[i].state;
        self.wires[i].state = value;
        Some(prev)
    }

    /// Place a new gate with its top-left cell at the given position
    pub fn create_gate(&mut self, kind: GateKind, position: Point) -> GateId {
        let id = GateId::from_raw(self.next_gate);
        self.next_gate += 1;
        self.gates.push(Gate::new(id, kind, position));
        trace!("created {kind} gate {id} at {position}");
        id
    }

    /// Place a new input probe with the given value
    pub fn create_input(&mut self, position: Point, value: bool) -> GateId {
        let id = self.create_gate(GateKind::Input, position);
        if let Some(i) = self.gate_index(id) {
            self.gates[i].probe = value;
        }
        id
    }

    /// Place a new wire, with a vertical run from `start` followed by a horizontal run
    pub fn create_wire(&mut self, start: Point, end: Point) -> WireId {
        self.create_wire_with_elbow(start, end, Elbow::VerticalFirst)
    }

    /// Place a new wire with an explicit path shape
    pub fn create_wire_with_elbow(&mut self, start: Point, end: Point, elbow: Elbow) -> WireId {
        let id = WireId::from_raw(self.next_wire);
        self.next_wire += 1;
        self.wires.push(Wire::new(id, start, end, elbow));
        trace!("created wire {id} from {start} to {end}");
        id
    }

    /// Remove a gate; the handles of other components are unchanged
    pub fn delete_gate(&mut self, id: GateId) -> Result<Gate, CircuitError> {
        let i = self.gate_index(id).ok_or(CircuitError::UnknownGate(id))?;
        trace!("deleted gate {id}");
        Ok(self.gates.remove(i))
    }

    /// Remove a wire; the handles of other components are unchanged
    ///
    /// Gates may still reference the wire until the next resolve.
    pub fn delete_wire(&mut self, id: WireId) -> Result<Wire, CircuitError> {
        let i = self.wire_index(id).ok_or(CircuitError::UnknownWire(id))?;
        trace!("deleted wire {id}");
        Ok(self.wires.remove(i))
    }

    /// Move a gate to a new top-left cell
    pub fn move_gate(&mut self, id: GateId, position: Point) -> Result<(), CircuitError> {
        self.gate_mut(id)?.set_position(position);
        Ok(())
    }

    /// Move the endpoints of a wire
    pub fn move_wire(&mut self, id: WireId, start: Point, end: Point) -> Result<(), CircuitError> {
        self.wire_mut(id)?.set_endpoints(start, end);
        Ok(())
    }

    /// Flip the value of an input probe, returning the new value
    pub fn toggle_input(&mut self, id: GateId) -> Result<bool, CircuitError> {
        let g = self.gate_mut(id)?;
        if g.kind() != GateKind::Input {
            return Err(CircuitError::NotAnInput(id, g.kind()));
        }
        g.probe = !g.probe;
        Ok(g.probe)
    }

    /// Set the value of an input probe
    pub fn set_input(&mut self, id: GateId, value: bool) -> Result<(), CircuitError> {
        let g = self.gate_mut(id)?;
        if g.kind() != GateKind::Input {
            return Err(CircuitError::NotAnInput(id, g.kind()));
        }
        g.probe = value;
        Ok(())
    }

    /// Handles of all input probes, in creation order
    pub fn inputs(&self) -> Vec<GateId> {
        self.gates
            .iter()
            .filter(|g| g.kind() == GateKind::Input)
            .map(|g| g.id())
            .collect()
    }

    /// Topmost gate covering the cell; later gates are drawn over earlier ones
    pub fn gate_at(&self, p: Point) -> Option<GateId> {
        self.gates.iter().rev().find(|g| g.contains(p)).map(|g| g.id())
    }

    /// Topmost wire going through the cell
    pub fn wire_at(&self, p: Point) -> Option<WireId> {
        self.wires
            .iter()
            .rev()
            .find(|w| w.passes_through(p))
            .map(|w| w.id())
    }

    /// Reset all wires to low
    pub fn clear_states(&mut self) {
        for w in self.wires.iter_mut() {
            w.state = false;
        }
    }

    /// Smallest footprint covering every gate and wire
    pub fn bounds(&self) -> Option<Rect> {
        let gates = self.gates.iter().map(|g| g.bounds());
        let wires = self.wires.iter().map(|w| {
            let (s, e) = (w.start(), w.end());
            let origin = Point::new(s.x.min(e.x), s.y.min(e.y));
            let width = s.x.saturating_sub(e.x).saturating_abs().saturating_add(1);
            let height = s.y.saturating_sub(e.y).saturating_abs().saturating_add(1);
            Rect::new(origin, width, height)
        });
        gates.chain(wires).reduce(|a, b| a.union(&b))
    }

    /// Check consistency of the datastructure
    pub fn check(&self) {
        for w in self.gates.windows(2) {
            assert!(w[0].id() < w[1].id(), "Gates are not sorted by handle");
        }
        for w in self.wires.windows(2) {
            assert!(w[0].id() < w[1].id(), "Wires are not sorted by handle");
        }
        for g in &self.gates {
            assert!(g.id().raw() < self.next_gate, "Invalid gate {}", g.id());
            if g.kind() != GateKind::Input {
                assert!(!g.probe, "Probe value set on {}", g.id());
            }
        }
        for w in &self.wires {
            assert!(w.id().raw() < self.next_wire, "Invalid wire {}", w.id());
        }
    }
}

impl fmt::Display for Circuit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Circuit with {} gates, {} wires:",
            self.nb_gates(),
            self.nb_wires()
        )?;
        for g in &self.gates {
            writeln!(f, "\t{g}")?;
        }
        for w in &self.wires {
            writeln!(f, "\t{w}")?;
        }
        Ok(())
    }
}

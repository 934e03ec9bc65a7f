//! Connectivity inference from the wire geometry
//!
//! The circuit keeps no persistent adjacency: every resolve clears the links on all gates
//! and rebuilds them by checking each wire endpoint against the pins of each gate.
//!
//! ```
//! # use gridlogic::circuit::{Circuit, GateKind, Point};
//! # use gridlogic::resolve::resolve;
//! let mut circuit = Circuit::new();
//! let probe = circuit.create_gate(GateKind::Input, Point::new(0, 0));
//! let inv = circuit.create_gate(GateKind::Not, Point::new(10, 0));
//! // Drawn backwards, from the inverter's input to the probe's output
//! let w = circuit.create_wire(Point::new(10, 1), Point::new(4, 1));
//! resolve(&mut circuit);
//! assert_eq!(circuit.gate(probe).unwrap().output(), Some(w));
//! assert_eq!(circuit.gate(inv).unwrap().inputs(), &[w]);
//! ```

use tracing::{debug, trace};

use crate::circuit::{Circuit, Gate, GateId, Wire, WireId};

/// Summary of a resolve pass
///
/// None of these are errors: inert wires and starved gates are simply left out of the
/// simulation, and contested outputs are resolved in favor of the most recent wire.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Resolution {
    /// Number of wires whose endpoints were swapped
    pub nb_reversed: usize,
    /// Wires attached to no pin at all
    pub inert_wires: Vec<WireId>,
    /// Gates without enough inputs to be evaluated
    pub starved_gates: Vec<GateId>,
    /// Gates whose output pin is claimed by several wires
    pub contested_outputs: Vec<GateId>,
}

impl Resolution {
    /// Returns whether every wire and gate found its place
    pub fn is_clean(&self) -> bool {
        self.inert_wires.is_empty()
            && self.starved_gates.is_empty()
            && self.contested_outputs.is_empty()
    }
}

/// Returns whether a wire, as drawn, reaches a pin with the right end
fn attaches_forward(w: &Wire, gates: &[Gate]) -> bool {
    gates
        .iter()
        .any(|g| g.touches_output(w.start()) || g.touches_input(w.end()))
}

/// Returns whether a wire would reach a pin if it was drawn the other way
fn attaches_backward(w: &Wire, gates: &[Gate]) -> bool {
    gates
        .iter()
        .any(|g| g.touches_output(w.end()) || g.touches_input(w.start()))
}

/// Swap wire endpoints so that each wire starts on the pin that drives it
///
/// A wire is only reversed if it attaches backward and not forward, so that wires
/// already in canonical orientation are never flipped again. Returns the number of
/// reversed wires.
fn normalize(gates: &[Gate], wires: &mut [Wire]) -> usize {
    let mut nb_reversed = 0;
    for w in wires.iter_mut() {
        if !attaches_forward(w, gates) && attaches_backward(w, gates) {
            trace!("reversing wire {}", w.id());
            w.reverse();
            nb_reversed += 1;
        }
    }
    nb_reversed
}

/// Swap wire endpoints so that each wire starts on the pin that drives it
///
/// This is the first step of [`resolve`]; returns the number of reversed wires.
pub fn normalize_wires(circuit: &mut Circuit) -> usize {
    let (gates, wires) = circuit.split_mut();
    normalize(gates, wires)
}

/// Rebuild the inputs and output of every gate from the wire geometry
///
/// Inputs are listed in wire creation order. If several wires start on the same
/// output pin, the last one wins. Resolving twice without modification in between
/// gives the same result.
pub fn resolve(circuit: &mut Circuit) -> Resolution {
    let (gates, wires) = circuit.split_mut();
    let nb_reversed = normalize(gates, wires);

    let mut attached = vec![false; wires.len()];
    let mut contested_outputs = Vec::new();
    for g in gates.iter_mut() {
        g.inputs.clear();
        g.output = None;
        for (i, w) in wires.iter().enumerate() {
            if g.touches_input(w.end()) {
                g.inputs.push(w.id());
                attached[i] = true;
            }
            if g.touches_output(w.start()) {
                if g.output.is_some() && contested_outputs.last() != Some(&g.id()) {
                    contested_outputs.push(g.id());
                }
                g.output = Some(w.id());
                attached[i] = true;
            }
        }
    }

    let inert_wires: Vec<WireId> = wires
        .iter()
        .zip(attached)
        .filter(|(_, a)| !a)
        .map(|(w, _)| w.id())
        .collect();
    let starved_gates: Vec<GateId> = gates
        .iter()
        .filter(|g| !g.is_ready())
        .map(|g| g.id())
        .collect();
    debug!(
        "resolved {} gates and {} wires: {} reversed, {} inert, {} starved gates, {} contested outputs",
        gates.len(),
        wires.len(),
        nb_reversed,
        inert_wires.len(),
        starved_gates.len(),
        contested_outputs.len()
    );
    Resolution {
        nb_reversed,
        inert_wires,
        starved_gates,
        contested_outputs,
    }
}

/// Wires driven by a gate but feeding none, in wire order
///
/// These are the observable outputs of the circuit. Relies on the last resolve.
pub fn primary_outputs(circuit: &Circuit) -> Vec<WireId> {
    let driven: Vec<WireId> = circuit.gates().iter().filter_map(|g| g.output()).collect();
    circuit
        .wires()
        .iter()
        .map(|w| w.id())
        .filter(|w| driven.contains(w))
        .filter(|w| !circuit.gates().iter().any(|g| g.inputs().contains(w)))
        .collect()
}

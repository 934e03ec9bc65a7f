//! Simulation of a resolved circuit
//!
//! The network is not sorted: each pass evaluates every gate once, in creation order, and
//! writes the result to its output wire. A feed-forward network settles after at most as
//! many passes as there are gates. A network with a feedback loop may not settle at all:
//! [`propagate`] still stops after the same number of passes and leaves the wires as
//! computed.

use tracing::{debug, trace};

use crate::circuit::{Circuit, Gate, GateKind, WireId};
use crate::error::CircuitError;
use crate::resolve::{primary_outputs, resolve};

/// Outcome of a propagation
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Settle {
    /// Number of passes over the gates
    pub passes: usize,
    /// Whether the last pass still changed a wire
    pub changed_on_last_pass: bool,
}

impl Settle {
    /// Returns whether the wires reached a fixed point
    pub fn is_settled(&self) -> bool {
        !self.changed_on_last_pass
    }
}

/// Fold the values of the input wires; None if any of them is missing
fn fold_inputs<F>(c: &Circuit, inputs: &[WireId], f: F) -> Option<bool>
where
    F: Fn(bool, bool) -> bool,
{
    let (first, rest) = inputs.split_first()?;
    let mut ret = c.wire_state(*first)?;
    for w in rest {
        ret = f(ret, c.wire_state(*w)?);
    }
    Some(ret)
}

/// Compute the output value of a gate from the current state of its input wires
///
/// Returns None if the gate does not have enough resolved inputs, or if one of its
/// inputs refers to a wire that no longer exists.
pub fn evaluate(c: &Circuit, g: &Gate) -> Option<bool> {
    if !g.is_ready() {
        return None;
    }
    match g.kind() {
        GateKind::And => fold_inputs(c, g.inputs(), |a, b| a & b),
        GateKind::Or => fold_inputs(c, g.inputs(), |a, b| a | b),
        GateKind::Xor => fold_inputs(c, g.inputs(), |a, b| a ^ b),
        GateKind::Not => fold_inputs(c, g.inputs(), |a, _| a).map(|v| !v),
        GateKind::Input => Some(g.probe()),
    }
}

/// Evaluate every gate once; returns whether a wire changed
fn run_pass(c: &mut Circuit) -> bool {
    let mut changed = false;
    for i in 0..c.nb_gates() {
        let g = &c.gates()[i];
        let (Some(output), Some(value)) = (g.output(), evaluate(c, g)) else {
            continue;
        };
        if c.set_wire_state(output, value) == Some(!value) {
            trace!("{} = {}", output, value as u8);
            changed = true;
        }
    }
    changed
}

/// Run exactly `nb_passes` evaluation passes over all gates
pub fn propagate_passes(c: &mut Circuit, nb_passes: usize) -> Settle {
    let mut changed_on_last_pass = false;
    for _ in 0..nb_passes {
        changed_on_last_pass = run_pass(c);
    }
    Settle {
        passes: nb_passes,
        changed_on_last_pass,
    }
}

/// Propagate values through the circuit, with as many passes as there are gates
///
/// The circuit must have been resolved beforehand.
pub fn propagate(c: &mut Circuit) -> Settle {
    let ret = propagate_passes(c, c.nb_gates());
    if !ret.is_settled() {
        debug!(
            "circuit did not settle after {} passes, it probably contains a feedback loop",
            ret.passes
        );
    }
    ret
}

/// Largest number of inputs accepted by [`exhaustive_patterns`]
pub const MAX_EXHAUSTIVE_INPUTS: usize = 23;

/// All input combinations for a given number of inputs, first input as the lowest bit
///
/// # Panics
///
/// Panics if `nb_inputs` is larger than [`MAX_EXHAUSTIVE_INPUTS`].
pub fn exhaustive_patterns(nb_inputs: usize) -> Vec<Vec<bool>> {
    assert!(
        nb_inputs <= MAX_EXHAUSTIVE_INPUTS,
        "Too many inputs for exhaustive simulation"
    );
    (0..1usize << nb_inputs)
        .map(|m| (0..nb_inputs).map(|i| (m >> i) & 1 != 0).collect())
        .collect()
}

/// Simulate the circuit for each pattern of input probe values; return the output values
///
/// Probes are assigned in creation order, and the outputs are the wires driven by a gate
/// but feeding none. Wire values are cleared before each pattern, so that the result
/// does not depend on the previous pattern even when the circuit has feedback loops.
pub fn simulate(
    c: &mut Circuit,
    patterns: &[Vec<bool>],
) -> Result<Vec<Vec<bool>>, CircuitError> {
    resolve(c);
    let inputs = c.inputs();
    let outputs = primary_outputs(c);
    let mut ret = Vec::new();
    for pattern in patterns {
        assert_eq!(pattern.len(), inputs.len());
        for (id, v) in inputs.iter().zip(pattern) {
            c.set_input(*id, *v)?;
        }
        c.clear_states();
        propagate(c);
        ret.push(
            outputs
                .iter()
                .map(|w| c.wire_state(*w).unwrap_or(false))
                .collect(),
        );
    }
    Ok(ret)
}

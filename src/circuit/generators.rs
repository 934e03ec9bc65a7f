//! Circuit generators and templates
//!
//! Gates are laid out in columns 12 cells apart and rows 4 cells apart, so that no wire
//! endpoint touches a pin it was not drawn to.

use crate::circuit::{Circuit, GateKind, Point, WireId};

const COLUMN_PITCH: i32 = 12;
const ROW_PITCH: i32 = 4;

/// Position of the gate at a given column and row of the layout
fn slot(column: i32, row: i32) -> Point {
    Point::new(column * COLUMN_PITCH, row * ROW_PITCH)
}

/// Simple generators to test functionality
pub mod testcases {
    use super::*;

    /// An input probe followed by a chain of inverters
    ///
    /// Returns the circuit and the output wire of the last inverter.
    pub fn not_chain(len: usize, value: bool) -> (Circuit, WireId) {
        let mut ret = Circuit::new();
        ret.create_input(slot(0, 0), value);
        let mut pin = GateKind::Input.output_pin(slot(0, 0));
        for i in 0..len {
            let position = slot(i as i32 + 1, 0);
            ret.create_gate(GateKind::Not, position);
            ret.create_wire(pin, GateKind::Not.input_pins(position)[0]);
            pin = GateKind::Not.output_pin(position);
        }
        let out = ret.create_wire(pin, pin + Point::new(2, 0));
        (ret, out)
    }

    /// A chain of Xor gates computing the parity of the input probes
    ///
    /// Returns the circuit and the output wire of the last gate.
    pub fn parity_chain(values: &[bool]) -> (Circuit, WireId) {
        assert!(!values.is_empty());
        let mut ret = Circuit::new();
        let mut probes = Vec::new();
        for (i, v) in values.iter().enumerate() {
            let position = slot(0, i as i32);
            ret.create_input(position, *v);
            probes.push(GateKind::Input.output_pin(position));
        }
        let mut acc = probes[0];
        for (i, p) in probes.iter().enumerate().skip(1) {
            let position = slot(i as i32, 0);
            ret.create_gate(GateKind::Xor, position);
            let inputs = GateKind::Xor.input_pins(position);
            ret.create_wire(acc, inputs[0]);
            ret.create_wire(*p, inputs[1]);
            acc = GateKind::Xor.output_pin(position);
        }
        let out = ret.create_wire(acc, acc + Point::new(2, 0));
        (ret, out)
    }
}

/// Random circuit generators
pub mod random {
    use rand::rngs::SmallRng;
    use rand::seq::SliceRandom;
    use rand::{Rng, SeedableRng};

    use super::*;

    const KINDS: [GateKind; 4] = [GateKind::And, GateKind::Or, GateKind::Xor, GateKind::Not];

    /// Planned gate: kind, layout slot and the planned gates feeding it
    struct Planned {
        kind: GateKind,
        position: Point,
        sources: Vec<usize>,
        probe: bool,
    }

    /// A random feed-forward forest of gates fed by input probes
    ///
    /// Each gate output feeds at most one gate, and the outputs left unused get a dangling
    /// wire. Gates and wires are created in random order, so that the creation order is
    /// not a topological order of the circuit.
    pub fn feed_forward(nb_inputs: usize, nb_gates: usize, seed: u64) -> Circuit {
        assert!(nb_inputs > 0);
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut plan = Vec::new();
        let mut columns = Vec::new();
        let mut column_rows: Vec<i32> = vec![nb_inputs as i32];
        for i in 0..nb_inputs {
            plan.push(Planned {
                kind: GateKind::Input,
                position: slot(0, i as i32),
                sources: Vec::new(),
                probe: rng.gen(),
            });
            columns.push(0);
        }

        // Outputs not consumed yet
        let mut available: Vec<usize> = (0..nb_inputs).collect();
        for _ in 0..nb_gates {
            let mut kind = KINDS[rng.gen_range(0..KINDS.len())];
            if available.len() < 2 {
                kind = GateKind::Not;
            }
            let arity = if kind == GateKind::Not { 1 } else { 2 };
            let mut sources = Vec::new();
            for _ in 0..arity {
                let i = rng.gen_range(0..available.len());
                sources.push(available.swap_remove(i));
            }
            let column = 1 + sources.iter().map(|s| columns[*s]).max().unwrap_or(0);
            if column_rows.len() <= column {
                column_rows.resize(column + 1, 0);
            }
            let row = column_rows[column];
            column_rows[column] += 1;
            available.push(plan.len());
            columns.push(column);
            plan.push(Planned {
                kind,
                position: slot(column as i32, row),
                sources,
                probe: false,
            });
        }

        let mut ret = Circuit::new();
        let mut order: Vec<usize> = (0..plan.len()).collect();
        order.shuffle(&mut rng);
        for i in order {
            let p = &plan[i];
            if p.kind == GateKind::Input {
                ret.create_input(p.position, p.probe);
            } else {
                ret.create_gate(p.kind, p.position);
            }
        }

        // Wires, drawn in random order and direction
        let output_pin = |i: usize| plan[i].kind.output_pin(plan[i].position);
        let mut wires = Vec::new();
        for p in plan.iter() {
            for (s, pin) in p.sources.iter().zip(p.kind.input_pins(p.position)) {
                wires.push((output_pin(*s), pin));
            }
        }
        for i in available {
            let pin = output_pin(i);
            wires.push((pin, pin + Point::new(2, 0)));
        }
        wires.shuffle(&mut rng);
        for (start, end) in wires {
            if rng.gen() {
                ret.create_wire(start, end);
            } else {
                ret.create_wire(end, start);
            }
        }
        ret
    }
}

#[cfg(test)]
mod tests {
    use super::{random, testcases};
    use crate::resolve::resolve;
    use crate::sim::{propagate, propagate_passes};

    #[test]
    fn test_not_chain() {
        for len in [0, 1, 2, 5] {
            for value in [false, true] {
                let (mut c, out) = testcases::not_chain(len, value);
                assert!(resolve(&mut c).is_clean());
                propagate(&mut c);
                assert_eq!(c.wire_state(out), Some(value ^ (len % 2 == 1)));
            }
        }
    }

    #[test]
    fn test_double_inversion() {
        let (mut c, out) = testcases::not_chain(2, true);
        resolve(&mut c);
        propagate_passes(&mut c, 2);
        assert_eq!(c.wire_state(out), Some(true));
    }

    #[test]
    fn test_parity_chain() {
        let values = [true, false, true, true, false];
        let (mut c, out) = testcases::parity_chain(&values);
        assert!(resolve(&mut c).is_clean());
        propagate(&mut c);
        assert_eq!(c.wire_state(out), Some(true));
    }

    #[test]
    fn test_feed_forward() {
        for seed in 0..20 {
            let mut c = random::feed_forward(4, 12, seed);
            assert_eq!(c.nb_gates(), 16);
            let res = resolve(&mut c);
            assert!(res.is_clean(), "{:?}", res);

            // Settles within the pass budget, and further passes change nothing
            let settle = propagate(&mut c);
            assert!(settle.is_settled());
            let states: Vec<bool> = c.wires().iter().map(|w| w.state()).collect();
            propagate_passes(&mut c, 5);
            let again: Vec<bool> = c.wires().iter().map(|w| w.state()).collect();
            assert_eq!(states, again);
        }
    }

    #[test]
    fn test_resolve_idempotent() {
        for seed in 0..20 {
            let mut c = random::feed_forward(3, 8, seed);
            resolve(&mut c);
            let before: Vec<_> = c
                .gates()
                .iter()
                .map(|g| (g.inputs().to_vec(), g.output()))
                .collect();
            assert_eq!(resolve(&mut c).nb_reversed, 0);
            let after: Vec<_> = c
                .gates()
                .iter()
                .map(|g| (g.inputs().to_vec(), g.output()))
                .collect();
            assert_eq!(before, after);
        }
    }
}

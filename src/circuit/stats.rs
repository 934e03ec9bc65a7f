//! Compute circuit statistics
//!
//! ```
//! # use gridlogic::circuit::Circuit;
//! # let circuit = Circuit::new();
//! use gridlogic::circuit::stats::stats;
//! let stats = stats(&circuit);
//!
//! // Check that there is no Xor gate
//! assert_eq!(stats.nb_xor, 0);
//!
//! // Show the statistics
//! println!("{}", stats);
//! ```

use std::fmt;

use fxhash::FxHashMap;

use crate::circuit::{Circuit, GateKind};

/// Number of gates, wires and connectivity issues in a circuit
#[derive(Clone, Debug, Default)]
pub struct CircuitStats {
    /// Number of input probes
    pub nb_inputs: usize,
    /// Number of And gates
    pub nb_and: usize,
    /// Number of Or gates
    pub nb_or: usize,
    /// Number of Xor gates
    pub nb_xor: usize,
    /// Number of Not gates
    pub nb_not: usize,
    /// Number of wires
    pub nb_wires: usize,
    /// Number of wires attached to no pin
    pub nb_inert_wires: usize,
    /// Number of gates whose output pin is free
    pub nb_unused_outputs: usize,
    /// Number of gates without enough inputs
    pub nb_starved: usize,
    /// Number of resolved inputs, per gate kind and arity
    pub arity: FxHashMap<(GateKind, usize), usize>,
}

impl CircuitStats {
    /// Total number of gates, including input probes
    pub fn nb_gates(&self) -> usize {
        self.nb_inputs + self.nb_and + self.nb_or + self.nb_xor + self.nb_not
    }

    /// Record a new gate
    fn add_gate(&mut self, kind: GateKind, nb_inputs: usize) {
        match kind {
            GateKind::Input => self.nb_inputs += 1,
            GateKind::And => self.nb_and += 1,
            GateKind::Or => self.nb_or += 1,
            GateKind::Xor => self.nb_xor += 1,
            GateKind::Not => self.nb_not += 1,
        }
        if kind.has_inputs() {
            *self.arity.entry((kind, nb_inputs)).or_insert(0) += 1;
        }
    }

    fn fmt_arity(&self, f: &mut fmt::Formatter<'_>, kind: GateKind) -> fmt::Result {
        let mut arities: Vec<(usize, usize)> = self
            .arity
            .iter()
            .filter(|((k, _), _)| *k == kind)
            .map(|((_, a), nb)| (*a, *nb))
            .collect();
        arities.sort();
        for (a, nb) in arities {
            writeln!(f, "      {}: {}", a, nb)?;
        }
        Ok(())
    }
}

impl fmt::Display for CircuitStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Stats:")?;
        writeln!(f, "  Inputs: {}", self.nb_inputs)?;
        writeln!(f, "  Gates: {}", self.nb_gates())?;
        for (kind, nb) in [
            (GateKind::And, self.nb_and),
            (GateKind::Or, self.nb_or),
            (GateKind::Xor, self.nb_xor),
            (GateKind::Not, self.nb_not),
        ] {
            if nb != 0 {
                writeln!(f, "  {}: {}", kind, nb)?;
                self.fmt_arity(f, kind)?;
            }
        }
        writeln!(f, "  Wires: {}", self.nb_wires)?;
        if self.nb_inert_wires != 0 {
            writeln!(f, "      inert: {}", self.nb_inert_wires)?;
        }
        if self.nb_unused_outputs != 0 {
            writeln!(f, "  Unused outputs: {}", self.nb_unused_outputs)?;
        }
        if self.nb_starved != 0 {
            writeln!(f, "  Missing inputs: {}", self.nb_starved)?;
        }
        fmt::Result::Ok(())
    }
}

/// Compute the statistics of a resolved circuit
pub fn stats(c: &Circuit) -> CircuitStats {
    let mut ret = CircuitStats {
        nb_wires: c.nb_wires(),
        ..Default::default()
    };
    for g in c.gates() {
        ret.add_gate(g.kind(), g.inputs().len());
        if g.output().is_none() {
            ret.nb_unused_outputs += 1;
        }
        if !g.is_ready() {
            ret.nb_starved += 1;
        }
    }
    ret.nb_inert_wires = c
        .wires()
        .iter()
        .filter(|w| {
            !c.gates()
                .iter()
                .any(|g| g.output() == Some(w.id()) || g.inputs().contains(&w.id()))
        })
        .count();
    ret
}

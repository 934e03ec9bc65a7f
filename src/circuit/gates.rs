use std::fmt;
use std::str::FromStr;

use itertools::Itertools;

use crate::circuit::geometry::{self, Point, Rect, OUTPUT_ROW};
use crate::circuit::id::{GateId, WireId};
use crate::error::ParseKindError;

/// Kinds of gates that can be placed on the grid
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy, PartialOrd, Ord)]
pub enum GateKind {
    /// N-input And gate
    And,
    /// N-input Or gate
    Or,
    /// N-input Xor gate (parity)
    Xor,
    /// Inverter
    Not,
    /// Input probe, toggled by the user
    Input,
}

impl GateKind {
    /// All kinds, in menu order
    pub const ALL: [GateKind; 5] = [
        GateKind::And,
        GateKind::Or,
        GateKind::Xor,
        GateKind::Not,
        GateKind::Input,
    ];

    /// Footprint size (width, height) of the kind
    pub fn size(&self) -> (i32, i32) {
        match self {
            GateKind::Input => (4, 3),
            _ => (8, 3),
        }
    }

    /// Returns whether the gate takes its single input on the output row
    pub fn is_single_input(&self) -> bool {
        matches!(self, GateKind::Not)
    }

    /// Returns whether the gate reads wires at all
    pub fn has_inputs(&self) -> bool {
        !matches!(self, GateKind::Input)
    }

    /// Returns whether a gate of this kind can be evaluated with this many resolved inputs
    pub fn accepts_arity(&self, nb_inputs: usize) -> bool {
        match self {
            GateKind::And | GateKind::Or | GateKind::Xor => nb_inputs >= 1,
            GateKind::Not => nb_inputs == 1,
            GateKind::Input => true,
        }
    }

    /// Input pin cells of a gate of this kind placed at `position`
    pub fn input_pins(&self, position: Point) -> Vec<Point> {
        let p = position;
        match self {
            GateKind::Input => Vec::new(),
            GateKind::Not => vec![p + Point::new(0, OUTPUT_ROW)],
            GateKind::And | GateKind::Or | GateKind::Xor => {
                let (_, h) = self.size();
                (0..h)
                    .filter(|r| *r != OUTPUT_ROW)
                    .map(|r| p + Point::new(0, r))
                    .collect()
            }
        }
    }

    /// Output pin cell of a gate of this kind placed at `position`
    pub fn output_pin(&self, position: Point) -> Point {
        let (w, h) = self.size();
        geometry::output_pin(&Rect::new(position, w, h))
    }

    /// Keyword used in scripts and exported descriptions
    pub fn name(&self) -> &'static str {
        match self {
            GateKind::And => "AND",
            GateKind::Or => "OR",
            GateKind::Xor => "XOR",
            GateKind::Not => "NOT",
            GateKind::Input => "INPUT",
        }
    }
}

impl fmt::Display for GateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for GateKind {
    type Err = ParseKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        GateKind::ALL
            .iter()
            .find(|k| k.name().eq_ignore_ascii_case(s))
            .copied()
            .ok_or_else(|| ParseKindError(s.to_owned()))
    }
}

/// A gate placed on the grid
///
/// Only the kind, position and probe value are owned by the user. The `inputs` and
/// `output` links are derived from the wire geometry and rebuilt on every resolve.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Gate {
    id: GateId,
    kind: GateKind,
    position: Point,
    pub(crate) inputs: Vec<WireId>,
    pub(crate) output: Option<WireId>,
    pub(crate) probe: bool,
}

impl Gate {
    pub(crate) fn new(id: GateId, kind: GateKind, position: Point) -> Gate {
        Gate {
            id,
            kind,
            position,
            inputs: Vec::new(),
            output: None,
            probe: false,
        }
    }

    /// Handle of the gate
    pub fn id(&self) -> GateId {
        self.id
    }

    /// Kind of the gate
    pub fn kind(&self) -> GateKind {
        self.kind
    }

    /// Top-left cell of the gate
    pub fn position(&self) -> Point {
        self.position
    }

    pub(crate) fn set_position(&mut self, p: Point) {
        self.position = p;
    }

    /// Wires feeding the gate, as of the last resolve
    pub fn inputs(&self) -> &[WireId] {
        &self.inputs
    }

    /// Wire driven by the gate, as of the last resolve
    pub fn output(&self) -> Option<WireId> {
        self.output
    }

    /// Value of an input probe; always false for other kinds
    pub fn probe(&self) -> bool {
        self.probe
    }

    /// Footprint of the gate
    pub fn bounds(&self) -> Rect {
        let (w, h) = self.kind.size();
        Rect::new(self.position, w, h)
    }

    /// Returns whether the cell lies on the gate
    pub fn contains(&self, p: Point) -> bool {
        self.bounds().contains(p)
    }

    /// Returns whether a wire endpoint at this cell feeds the gate
    pub fn touches_input(&self, p: Point) -> bool {
        self.kind.has_inputs()
            && geometry::touches_input_edge(p, &self.bounds(), self.kind.is_single_input())
    }

    /// Returns whether a wire endpoint at this cell is driven by the gate
    pub fn touches_output(&self, p: Point) -> bool {
        geometry::touches_output_edge(p, &self.bounds())
    }

    /// Nominal input pin cells, one row apart and skipping the output row
    pub fn input_pins(&self) -> Vec<Point> {
        self.kind.input_pins(self.position)
    }

    /// Output pin cell
    pub fn output_pin(&self) -> Point {
        self.kind.output_pin(self.position)
    }

    /// Returns whether the resolved inputs are enough to evaluate the gate
    pub fn is_ready(&self) -> bool {
        self.kind.accepts_arity(self.inputs.len())
    }
}

impl fmt::Display for Gate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} at {}", self.id, self.kind, self.position)?;
        if self.kind == GateKind::Input {
            write!(f, " = {}", self.probe as u8)?;
        } else {
            write!(f, " <- [{}]", self.inputs.iter().join(", "))?;
        }
        if let Some(o) = self.output {
            write!(f, " -> {o}")?;
        }
        Ok(())
    }
}

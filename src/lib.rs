//! Grid-based combinational logic editor and simulator
//!
//! Gates and input probes are placed on a grid and connected with orthogonal wires.
//! There is no explicit netlist: which wire feeds which gate is inferred from the
//! coordinates of the wire endpoints, every time the layout changes.
//!
//! # Usage
//!
//! The binary replays editing scripts, one editor command per line:
//!
//! ```bash
//! # Show available commands
//! gridlogic help
//! # Replay a script and draw the final circuit
//! gridlogic run adder.txt
//! # Export the circuit as a netlist
//! gridlogic export adder.txt -o adder.net
//! # Print the truth table
//! gridlogic table adder.txt
//! ```
//!
//! # Development
//!
//! ## Datastructures
//!
//! `Circuit` holds gates and wires in creation order, addressed by stable handles.
//! Gates own their kind, position and (for input probes) their value; wires own their
//! two endpoints and a single boolean state.
//! The links between them are derived data, rebuilt by [`resolve::resolve`]:
//! * a wire whose end lands on the left edge of a gate feeds it;
//! * a wire whose start lands on the output pin of a gate is driven by it;
//! * a wire drawn backwards is reversed first.
//!
//! Values are then computed by [`sim::propagate`], with a bounded number of passes so that
//! feedback loops terminate.
//!
//! For example, here is an inverter fed by a probe:
//! ```
//! # use gridlogic::{Circuit, GateKind, Point};
//! use gridlogic::resolve::resolve;
//! use gridlogic::sim::propagate;
//!
//! let mut c = Circuit::new();
//! c.create_input(Point::new(0, 0), true);
//! c.create_gate(GateKind::Not, Point::new(10, 0));
//! let a = c.create_wire(Point::new(4, 1), Point::new(10, 1));
//! let b = c.create_wire(Point::new(18, 1), Point::new(22, 1));
//! resolve(&mut c);
//! propagate(&mut c);
//! assert_eq!(c.wire_state(a), Some(true));
//! assert_eq!(c.wire_state(b), Some(false));
//! ```
//!
//! ## Editing
//!
//! The [`editor::Editor`] drives all of this from discrete input events, and runs a
//! resolve (and a propagation while the simulation is enabled) after each of them.

#![warn(missing_docs)]

pub mod circuit;
pub mod editor;
pub mod error;
pub mod io;
pub mod render;
pub mod resolve;
pub mod sim;

pub use circuit::{stats, Circuit, Gate, GateId, GateKind, Point, Wire, WireId};

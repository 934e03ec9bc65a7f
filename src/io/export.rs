use std::io::Write;

use itertools::Itertools;

use crate::circuit::{Circuit, GateKind};

/// Export a resolved circuit as a netlist, one statement per line
///
/// The description uses simple statements, similar to the ISCAS .bench format:
/// ```text
///     WIRE(w0)
///     WIRE(w1)
///     WIRE(w2)
///     w2 = AND(w0, w1)
/// ```
/// Every wire is declared in storage order, then every gate with an output and enough
/// inputs gets one assignment, in storage order. Input probes have no assignment.
pub fn export(c: &Circuit) -> Vec<String> {
    let mut ret = Vec::new();
    for w in c.wires() {
        ret.push(format!("WIRE({})", w.id()));
    }
    for g in c.gates() {
        let Some(output) = g.output() else {
            continue;
        };
        if !g.is_ready() {
            continue;
        }
        match g.kind() {
            // TODO: declare probes once the netlist has a syntax for primary inputs
            GateKind::Input => (),
            GateKind::And | GateKind::Or | GateKind::Xor | GateKind::Not => {
                let rep = g.inputs().iter().join(", ");
                ret.push(format!("{} = {}({})", output, g.kind(), rep));
            }
        }
    }
    ret
}

/// Write a resolved circuit as a netlist, after a header comment
pub fn write_export<W: Write>(w: &mut W, c: &Circuit) -> std::io::Result<()> {
    writeln!(w, "# Generated by gridlogic")?;
    for line in export(c) {
        writeln!(w, "{}", line)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::circuit::Point;
    use crate::resolve::resolve;

    #[test]
    fn test_and() {
        let mut c = Circuit::new();
        c.create_gate(GateKind::And, Point::new(10, 0));
        c.create_wire(Point::new(0, 0), Point::new(10, 0));
        c.create_wire(Point::new(0, 2), Point::new(10, 2));
        resolve(&mut c);
        // No output wire: the gate is skipped
        assert_eq!(export(&c), vec!["WIRE(w0)", "WIRE(w1)"]);

        c.create_wire(Point::new(18, 1), Point::new(20, 1));
        resolve(&mut c);
        assert_eq!(
            export(&c),
            vec!["WIRE(w0)", "WIRE(w1)", "WIRE(w2)", "w2 = AND(w0, w1)"]
        );
    }

    #[test]
    fn test_two_wires() {
        let mut c = Circuit::new();
        c.create_gate(GateKind::And, Point::new(10, 0));
        c.create_wire(Point::new(0, 0), Point::new(10, 0));
        c.create_wire(Point::new(18, 1), Point::new(20, 1));
        resolve(&mut c);
        let lines = export(&c);
        assert_eq!(lines.len(), 3);
        assert_eq!(lines, vec!["WIRE(w0)", "WIRE(w1)", "w1 = AND(w0)"]);
    }

    #[test]
    fn test_kinds() {
        let mut c = Circuit::new();
        c.create_gate(GateKind::Input, Point::new(0, 0));
        c.create_gate(GateKind::Not, Point::new(10, 0));
        c.create_gate(GateKind::Xor, Point::new(20, 0));
        c.create_gate(GateKind::Or, Point::new(30, 0));
        c.create_wire(Point::new(4, 1), Point::new(10, 1));
        c.create_wire(Point::new(18, 1), Point::new(20, 0));
        c.create_wire(Point::new(4, 1), Point::new(20, 2));
        c.create_wire(Point::new(28, 1), Point::new(30, 0));
        c.create_wire(Point::new(28, 1), Point::new(30, 2));
        c.create_wire(Point::new(38, 1), Point::new(40, 1));
        resolve(&mut c);
        // w2 and w4 take over the output pins already claimed by w0 and w3
        let lines = export(&c);
        assert_eq!(lines.len(), 9);
        assert_eq!(lines[6], "w1 = NOT(w0)");
        assert_eq!(lines[7], "w4 = XOR(w1, w2)");
        assert_eq!(lines[8], "w5 = OR(w3, w4)");
    }

    #[test]
    fn test_deterministic() {
        let mut c = Circuit::new();
        c.create_gate(GateKind::Input, Point::new(0, 0));
        c.create_gate(GateKind::Not, Point::new(10, 0));
        c.create_wire(Point::new(10, 1), Point::new(4, 1));
        c.create_wire(Point::new(18, 1), Point::new(22, 1));
        resolve(&mut c);
        let mut buf1 = Vec::new();
        let mut buf2 = Vec::new();
        write_export(&mut buf1, &c).unwrap();
        write_export(&mut buf2, &c).unwrap();
        assert_eq!(buf1, buf2);
        assert_eq!(
            String::from_utf8(buf1).unwrap(),
            "# Generated by gridlogic\nWIRE(w0)\nWIRE(w1)\nw1 = NOT(w0)\n"
        );
    }
}

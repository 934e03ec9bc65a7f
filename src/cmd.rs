//! Command line interface

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use itertools::Itertools;
use tracing::{info, warn};

use gridlogic::circuit::stats::stats;
use gridlogic::editor::Editor;
use gridlogic::io::{read_script_file, write_export};
use gridlogic::render::render;
use gridlogic::sim::{exhaustive_patterns, simulate, MAX_EXHAUSTIVE_INPUTS};

/// Command line arguments
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Verbosity level, repeat for more details
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

/// Command line arguments
#[derive(Subcommand)]
pub enum Commands {
    /// Replay an editing script and draw the result
    ///
    /// Scripts hold one editor command per line, for example:
    ///    gate INPUT
    ///    confirm
    ///    at 4 1
    ///    wire
    ///    right 6
    ///    confirm
    /// The final canvas and the wire values are printed.
    #[clap()]
    Run(RunArgs),

    /// Export the circuit built by a script as a netlist
    #[clap()]
    Export(ExportArgs),

    /// Show statistics about the circuit built by a script
    ///
    /// Will print the number of gates of each kind, the wires and the connectivity issues.
    #[clap()]
    Show(ShowArgs),

    /// Print the truth table of the circuit built by a script
    ///
    /// Input probes are enumerated in creation order, and the outputs are the wires driven
    /// by a gate but feeding none.
    #[clap(alias = "truth")]
    Table(TableArgs),
}

/// Replay a script in a fresh editor
fn replay(script: &Path) -> Result<Editor> {
    let events = read_script_file(script)
        .with_context(|| format!("Failed to read script {}", script.display()))?;
    let mut ed = Editor::new();
    let mut nb_rejected = 0;
    for ev in events {
        if !ed.handle(ev) {
            nb_rejected += 1;
        }
    }
    if nb_rejected != 0 {
        warn!("{} script commands were rejected", nb_rejected);
    }
    info!(
        "replayed {}: {} gates, {} wires",
        script.display(),
        ed.circuit().nb_gates(),
        ed.circuit().nb_wires()
    );
    Ok(ed)
}

/// Command arguments for script replay
#[derive(Args)]
pub struct RunArgs {
    /// Script to replay
    script: PathBuf,

    /// Additional ticks to run after the script
    #[arg(short = 't', long, default_value_t = 0)]
    ticks: usize,
}

impl RunArgs {
    pub fn run(&self) -> Result<()> {
        let mut ed = replay(&self.script)?;
        for _ in 0..self.ticks {
            ed.tick();
        }
        for line in render(&ed) {
            println!("{line}");
        }
        println!();
        for w in ed.circuit().wires() {
            println!("{w}");
        }
        if let Some(settle) = ed.settle() {
            if !settle.is_settled() {
                println!("Not settled after {} passes", settle.passes);
            }
        }
        Ok(())
    }
}

/// Command arguments for netlist export
#[derive(Args)]
pub struct ExportArgs {
    /// Script building the circuit
    script: PathBuf,

    /// Output file for the netlist; standard output if omitted
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,
}

impl ExportArgs {
    pub fn run(&self) -> Result<()> {
        let ed = replay(&self.script)?;
        match &self.output {
            Some(path) => {
                let f = File::create(path)
                    .with_context(|| format!("Failed to create {}", path.display()))?;
                let mut w = BufWriter::new(f);
                write_export(&mut w, ed.circuit())?;
                w.flush()?;
            }
            None => write_export(&mut io::stdout().lock(), ed.circuit())?,
        }
        Ok(())
    }
}

/// Command arguments for circuit informations
#[derive(Args)]
pub struct ShowArgs {
    /// Script building the circuit
    script: PathBuf,
}

impl ShowArgs {
    pub fn run(&self) -> Result<()> {
        let ed = replay(&self.script)?;
        println!("{}", ed.circuit());
        println!("{}", stats(ed.circuit()));
        Ok(())
    }
}

fn bits(v: &[bool]) -> String {
    v.iter().map(|b| *b as u8).join("")
}

/// Command arguments for truth tables
#[derive(Args)]
pub struct TableArgs {
    /// Script building the circuit
    script: PathBuf,
}

impl TableArgs {
    pub fn run(&self) -> Result<()> {
        let ed = replay(&self.script)?;
        let mut c = ed.circuit().clone();
        let nb_inputs = c.inputs().len();
        if nb_inputs > MAX_EXHAUSTIVE_INPUTS {
            anyhow::bail!("Too many input probes for a truth table: {}", nb_inputs);
        }
        let patterns = exhaustive_patterns(nb_inputs);
        let outputs = simulate(&mut c, &patterns)?;
        for (i, o) in patterns.iter().zip(outputs.iter()) {
            println!("{} : {}", bits(i), bits(o));
        }
        Ok(())
    }
}

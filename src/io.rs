//! Text formats: netlist export and editor scripts

mod export;
mod script;

use std::fs::File;
use std::path::Path;

use crate::editor::Event;
use crate::error::ScriptError;

pub use export::{export, write_export};
pub use script::read_script;

/// Read an editor script from a file
pub fn read_script_file(path: &Path) -> Result<Vec<Event>, ScriptError> {
    let f = File::open(path)?;
    read_script(f)
}

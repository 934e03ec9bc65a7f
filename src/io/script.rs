use std::io::{BufRead, BufReader, Read};

use crate::circuit::geometry::GRID_LIMIT;
use crate::circuit::{GateKind, Point};
use crate::editor::{Direction, Event};
use crate::error::ScriptError;

/// Parse a coordinate or a cursor displacement, which must stay within the grid
fn parse_number(line: usize, s: &str) -> Result<i32, ScriptError> {
    match s.parse::<i32>() {
        Ok(v) if (-GRID_LIMIT..=GRID_LIMIT).contains(&v) => Ok(v),
        _ => Err(ScriptError::Number {
            line,
            value: s.to_owned(),
        }),
    }
}

fn wrong_arguments(line: usize, command: &str, expected: &'static str) -> ScriptError {
    ScriptError::Arguments {
        line,
        command: command.to_owned(),
        expected,
    }
}

/// Parse a single script line; returns the events it expands to
fn parse_line(line: usize, text: &str) -> Result<Vec<Event>, ScriptError> {
    let t = match text.find('#') {
        Some(i) => &text[..i],
        None => text,
    };
    let parts: Vec<&str> = t.split_whitespace().collect();
    let Some((command, args)) = parts.split_first() else {
        return Ok(Vec::new());
    };
    let command = command.to_ascii_lowercase();

    let no_args = |ev: Event| -> Result<Vec<Event>, ScriptError> {
        if args.is_empty() {
            Ok(vec![ev])
        } else {
            Err(wrong_arguments(line, &command, "no argument"))
        }
    };
    let count = || -> Result<i32, ScriptError> {
        match args {
            [] => Ok(1),
            [n] => parse_number(line, n),
            _ => Err(wrong_arguments(line, &command, "an optional count")),
        }
    };

    match command.as_str() {
        "at" => match args {
            [x, y] => Ok(vec![Event::CursorTo(Point::new(
                parse_number(line, x)?,
                parse_number(line, y)?,
            ))]),
            _ => Err(wrong_arguments(line, &command, "two coordinates")),
        },
        "up" => Ok(vec![Event::Cursor(Direction::Up, count()?)]),
        "down" => Ok(vec![Event::Cursor(Direction::Down, count()?)]),
        "left" => Ok(vec![Event::Cursor(Direction::Left, count()?)]),
        "right" => Ok(vec![Event::Cursor(Direction::Right, count()?)]),
        "gate" => match args {
            [kind] => {
                let kind = kind
                    .parse::<GateKind>()
                    .map_err(|source| ScriptError::Kind { line, source })?;
                Ok(vec![Event::BeginGate(kind)])
            }
            _ => Err(wrong_arguments(line, &command, "a gate kind")),
        },
        "wire" => no_args(Event::BeginWire),
        "move" => no_args(Event::BeginMove),
        "confirm" => no_args(Event::Confirm),
        "cancel" => no_args(Event::Cancel),
        "delete" => no_args(Event::Delete),
        "toggle" => no_args(Event::Toggle),
        "sim" => no_args(Event::ToggleSimulation),
        "tick" => match args {
            [] => Ok(vec![Event::Tick]),
            [n] => match n.parse::<u32>() {
                Ok(0) => Ok(Vec::new()),
                Ok(n) => Ok(vec![Event::Ticks(n)]),
                Err(_) => Err(wrong_arguments(line, &command, "a positive count")),
            },
            _ => Err(wrong_arguments(line, &command, "an optional count")),
        },
        _ => Err(ScriptError::UnknownCommand {
            line,
            command: command.clone(),
        }),
    }
}

/// Read an editor script, one command per line
///
/// Scripts replay an editing session without a terminal:
/// ```text
///     # An inverter fed by a probe
///     gate INPUT
///     confirm
///     at 10 0
///     gate NOT
///     confirm
///     at 4 1
///     wire
///     right 6
///     confirm
///     at 1 1
///     toggle
///     sim
///     tick 2
/// ```
/// Cursor moves are `at X Y` or `up`/`down`/`left`/`right` with an optional count.
/// Coordinates and counts are limited to [`GRID_LIMIT`] in absolute value.
pub fn read_script<R: Read>(r: R) -> Result<Vec<Event>, ScriptError> {
    let mut ret = Vec::new();
    for (i, line) in BufReader::new(r).lines().enumerate() {
        ret.extend(parse_line(i + 1, &line?)?);
    }
    Ok(ret)
}

//! Navigation commands read from the shell's input

use anyhow::{bail, Context, Result};
use router_core::RouteParams;

/// A single shell command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Navigate to a location, pushing a history entry
    Push(String),
    /// Navigate to a location, replacing the current entry
    Replace(String),
    /// Navigate to a named route
    Open { name: String, params: RouteParams },
    Back,
    Forward,
    Go(isize),
    /// Print the current route and the mounted view
    Current,
    /// Print the route table
    Routes,
    /// Print the recorded history entries
    History,
    Help,
    Quit,
}

pub const HELP: &str = "\
push <location>         navigate to a location (e.g. /room/42?tab=files)
replace <location>      navigate without adding a history entry
open <name> [key=value] navigate to a named route (e.g. open room roomId=42)
back | forward | go <n> move through history
current                 show the current route
routes                  list registered routes
history                 list recorded history entries
quit                    exit";

impl Command {
    /// Parse one input line. Blank lines parse to `None`.
    pub fn parse(line: &str) -> Result<Option<Command>> {
        let mut words = line.split_whitespace();
        let Some(verb) = words.next() else {
            return Ok(None);
        };
        let args: Vec<&str> = words.collect();

        let command = match (verb, args.as_slice()) {
            ("push", [location]) => Command::Push(location.to_string()),
            ("replace", [location]) => Command::Replace(location.to_string()),
            ("open", [name, pairs @ ..]) => Command::Open {
                name: name.to_string(),
                params: parse_params(pairs)?,
            },
            ("back", []) => Command::Back,
            ("forward", []) => Command::Forward,
            ("go", [delta]) => Command::Go(
                delta
                    .parse()
                    .with_context(|| format!("Invalid history offset {:?}", delta))?,
            ),
            ("current", []) => Command::Current,
            ("routes", []) => Command::Routes,
            ("history", []) => Command::History,
            ("help", []) => Command::Help,
            ("quit" | "exit", []) => Command::Quit,
            _ => bail!("Unrecognized command {:?} (try \"help\")", line.trim()),
        };

        Ok(Some(command))
    }
}

fn parse_params(pairs: &[&str]) -> Result<RouteParams> {
    pairs
        .iter()
        .map(|pair| match pair.split_once('=') {
            Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
            _ => bail!("Invalid parameter {:?}, expected key=value", pair),
        })
        .collect()
}

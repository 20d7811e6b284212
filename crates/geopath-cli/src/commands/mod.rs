// Subcommand handlers. main.rs parses arguments and builds the context;
// each module here runs one subcommand against it.

pub mod batch;
pub mod find;
pub mod history;
pub mod record;

use geopath_lib::{Error as PathError, ErrorKind, PathService};

use geopath_cli::output::Renderer;

/// Everything a subcommand needs.
pub struct CommandContext {
    pub service: PathService,
    pub owner: String,
    pub renderer: Renderer,
}

/// Turn a library error into a user-facing message with a hint.
pub fn friendly_error(err: PathError) -> anyhow::Error {
    let hint = match (&err, err.kind()) {
        (PathError::UnknownAlgorithm { .. }, _) => Some("Pass --algorithm astar, dijkstra or bfs."),
        (PathError::InvalidCoordinate { .. }, _) => {
            Some("Coordinates are LAT,LNG in decimal degrees, for example 40.7128,-74.0060.")
        }
        (PathError::MissingOwner, _) => Some("Set --owner or GEOPATH_OWNER."),
        (_, ErrorKind::PathNotFound) => {
            Some("Obstacles block every corridor lane. Try more --lanes or a wider --lane-spacing-km.")
        }
        (_, ErrorKind::NotFound) => Some("Run `geopath history` to list your stored paths."),
        (_, ErrorKind::AccessDenied) => {
            Some("The path belongs to another owner. Check --owner or GEOPATH_OWNER.")
        }
        (_, ErrorKind::Persistence) => Some("Check that the --store file is readable and writable."),
        _ => None,
    };

    match hint {
        Some(hint) => anyhow::anyhow!("{err}. {hint}"),
        None => anyhow::Error::new(err),
    }
}

//! `find` subcommand: compute and store one path.

use anyhow::Result;
use clap::Args;

use geopath_cli::args::{parse_obstacle, parse_point};
use geopath_lib::{Obstacle, PathQuery, Point, SearchOptions};

use super::{friendly_error, CommandContext};

/// Arguments for the find command.
#[derive(Args, Debug, Clone)]
pub struct FindArgs {
    /// Start point as LAT,LNG.
    #[arg(long, value_parser = parse_point, allow_hyphen_values = true)]
    pub from: Point,
    /// End point as LAT,LNG.
    #[arg(long, value_parser = parse_point, allow_hyphen_values = true)]
    pub to: Point,
    /// Search algorithm: astar, dijkstra or bfs.
    #[arg(long, default_value = "astar")]
    pub algorithm: String,
    /// Number of path segments (defaults per algorithm).
    #[arg(long)]
    pub steps: Option<usize>,
    /// Lanes on each side of the course line.
    #[arg(long)]
    pub lanes: Option<usize>,
    /// Sideways distance between lanes in kilometres.
    #[arg(long)]
    pub lane_spacing_km: Option<f64>,
    /// Circular no-go zone as LAT,LNG,RADIUS_KM. Repeatable.
    #[arg(long = "obstacle", value_parser = parse_obstacle, allow_hyphen_values = true)]
    pub obstacles: Vec<Obstacle>,
    /// Let other owners read the stored path.
    #[arg(long)]
    pub public: bool,
}

impl FindArgs {
    /// Convert CLI args to a library query.
    pub fn to_query(&self) -> PathQuery {
        let query = PathQuery::new(self.from, self.to, self.algorithm.clone()).with_options(
            SearchOptions {
                steps: self.steps,
                lanes: self.lanes,
                lane_spacing_km: self.lane_spacing_km,
                obstacles: self.obstacles.clone(),
            },
        );
        if self.public {
            query.public()
        } else {
            query
        }
    }
}

pub async fn handle_find(ctx: &CommandContext, args: &FindArgs) -> Result<()> {
    let request = args.to_query().owned_by(ctx.owner.clone());
    let result = ctx.service.find(&request).await.map_err(friendly_error)?;
    println!("{}", ctx.renderer.result(&result)?);
    Ok(())
}

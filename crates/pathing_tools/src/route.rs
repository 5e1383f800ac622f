//! Running a scenario through the asynchronous pathfinder.
//!
//! The runner plays the host: it owns the dispatcher, submits the one
//! request and polls until the result has been delivered.

use std::sync::{Arc, Mutex, PoisonError};
use std::thread;
use std::time::{Duration, Instant};

use pathing_core::prelude::*;
use thiserror::Error;
use tracing::{debug, info};

use crate::scenario::{RouteScenario, ScenarioError};

/// How long to wait between dispatcher polls.
const POLL_INTERVAL: Duration = Duration::from_millis(1);

/// Error type for route runs.
#[derive(Error, Debug)]
pub enum RouteError {
    /// The scenario could not be used.
    #[error(transparent)]
    Scenario(#[from] ScenarioError),
    /// The pathfinder reported a failure.
    #[error(transparent)]
    Path(#[from] PathError),
    /// Nothing was delivered before the deadline.
    #[error("No result after {0:?}")]
    TimedOut(Duration),
    /// The search finished without delivering anything.
    #[error("Search finished without a result")]
    Dropped,
}

/// A delivered route, in both spaces.
#[derive(Debug, Clone)]
pub struct RouteReport {
    /// Cells along the path.
    pub cells: Vec<GridCoord>,
    /// The path as delivered, in world space.
    pub path: WorldPath,
}

/// Route `scenario` through a [`Pathfinder`], waiting at most `timeout`.
///
/// Origin and target cells are converted to world positions at their cell
/// centers, so the request goes through the same conversions a host's would.
///
/// # Errors
///
/// Returns the pathfinder's failure, or [`RouteError::Dropped`] if the
/// configured policy discarded it.
pub fn run_route(
    scenario: &RouteScenario,
    debug: bool,
    timeout: Duration,
) -> std::result::Result<RouteReport, RouteError> {
    scenario.validate()?;
    let grid = scenario.grid();
    let terrain = scenario.terrain()?;

    let dispatcher = Dispatcher::new();
    let pathfinder = Pathfinder::new(grid, terrain, dispatcher.handle(), &scenario.config)?;

    let origin = pathfinder.grid().cell_center(scenario.origin_cell());
    let target = pathfinder.grid().cell_center(scenario.target_cell());
    info!(
        scenario = %scenario.name,
        origin = %scenario.origin_cell(),
        target = %scenario.target_cell(),
        "Submitting path request"
    );

    let delivered: Arc<Mutex<Option<Result<WorldPath>>>> = Arc::default();
    let slot = Arc::clone(&delivered);
    pathfinder.find_path_with(origin, target, debug, move |result| {
        *slot.lock().unwrap_or_else(PoisonError::into_inner) = Some(result);
    });

    let deadline = Instant::now() + timeout;
    loop {
        let ran = dispatcher.poll();
        if ran > 0 {
            debug!(callbacks = ran, "Polled dispatcher");
        }
        if pathfinder.in_flight() == 0 && dispatcher.pending() == 0 {
            break;
        }
        if Instant::now() >= deadline {
            return Err(RouteError::TimedOut(timeout));
        }
        thread::sleep(POLL_INTERVAL);
    }

    let path = take_delivered(&delivered).ok_or(RouteError::Dropped)??;
    let cells = path
        .points
        .iter()
        .map(|&point| pathfinder.grid().to_grid(point))
        .collect();
    Ok(RouteReport { cells, path })
}

/// Take the delivered result, even if a panicking callback poisoned the slot.
fn take_delivered(slot: &Mutex<Option<Result<WorldPath>>>) -> Option<Result<WorldPath>> {
    slot.lock().unwrap_or_else(PoisonError::into_inner).take()
}

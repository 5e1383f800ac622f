//! Asynchronous path requests.
//!
//! [`Pathfinder::find_path`] runs the search on a worker pool and delivers
//! the world-space result through the main-thread [`Dispatcher`]. Requests
//! are fire-and-forget: they cannot be cancelled, and results arrive in
//! completion order, not request order.
//!
//! [`Dispatcher`]: crate::dispatch::Dispatcher

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use rayon::{ThreadPool, ThreadPoolBuilder};
use tracing::{debug, error, warn};

use crate::config::{FailurePolicy, PathfinderConfig};
use crate::dispatch::DispatchHandle;
use crate::error::{panic_message, PathError, Result};
use crate::grid::GridMapping;
use crate::math::Vec2Fixed;
use crate::path::Path;
use crate::search::SearchEngine;
use crate::terrain::TerrainCost;

/// A path in world space, as delivered to request callbacks.
pub type WorldPath = Path<Vec2Fixed>;

/// Submits searches to worker threads and routes results to the main thread.
pub struct Pathfinder<G, T> {
    grid: Arc<G>,
    engine: Arc<SearchEngine<Arc<G>, T>>,
    pool: ThreadPool,
    dispatch: DispatchHandle,
    failure_policy: FailurePolicy,
    diagnostics_by_default: bool,
    in_flight: Arc<AtomicUsize>,
}

impl<G, T> Pathfinder<G, T>
where
    G: GridMapping + 'static,
    T: TerrainCost + 'static,
{
    /// Create a pathfinder delivering results through `dispatch`.
    ///
    /// # Errors
    ///
    /// Returns [`PathError::WorkerPool`] if the worker threads cannot be started.
    pub fn new(
        grid: G,
        terrain: T,
        dispatch: DispatchHandle,
        config: &PathfinderConfig,
    ) -> Result<Self> {
        let prefix = config.thread_name_prefix.clone();
        let pool = ThreadPoolBuilder::new()
            .num_threads(config.worker_threads)
            .thread_name(move |i| format!("{prefix}-{i}"))
            .panic_handler(|payload| {
                error!(panic = %panic_message(&*payload), "Pathfinding worker panicked");
            })
            .build()
            .map_err(|e| PathError::WorkerPool(e.to_string()))?;

        let grid = Arc::new(grid);
        let engine = Arc::new(SearchEngine::new(Arc::clone(&grid), terrain));
        debug!(
            threads = pool.current_num_threads(),
            policy = ?config.failure_policy,
            "Pathfinder started"
        );

        Ok(Self {
            grid,
            engine,
            pool,
            dispatch,
            failure_policy: config.failure_policy,
            diagnostics_by_default: config.diagnostics_by_default,
            in_flight: Arc::new(AtomicUsize::new(0)),
        })
    }

    /// Request a path, keeping diagnostics per the configured default.
    ///
    /// See [`Pathfinder::find_path_with`].
    pub fn find_path<F>(&self, origin: Vec2Fixed, target: Vec2Fixed, on_complete: F)
    where
        F: FnOnce(Result<WorldPath>) + Send + 'static,
    {
        self.find_path_with(origin, target, self.diagnostics_by_default, on_complete);
    }

    /// Request a path between two world positions.
    ///
    /// `on_complete` runs once, on the thread polling the dispatcher, with
    /// the path's cell centers in world space. Under
    /// [`FailurePolicy::SilentDrop`] it runs only if a path was found;
    /// otherwise it also receives failures.
    pub fn find_path_with<F>(
        &self,
        origin: Vec2Fixed,
        target: Vec2Fixed,
        debug: bool,
        on_complete: F,
    ) where
        F: FnOnce(Result<WorldPath>) + Send + 'static,
    {
        let engine = Arc::clone(&self.engine);
        let dispatch = self.dispatch.clone();
        let policy = self.failure_policy;
        let in_flight = Arc::clone(&self.in_flight);

        in_flight.fetch_add(1, Ordering::SeqCst);
        self.pool.spawn(move || {
            match resolve(&*engine, origin, target, debug) {
                Ok(path) => dispatch.dispatch(move || on_complete(Ok(path))),
                Err(err) => {
                    if err.is_no_path() {
                        debug!(%err, "Path request failed");
                    } else {
                        warn!(%err, "Path request faulted");
                    }
                    if policy == FailurePolicy::Report {
                        dispatch.dispatch(move || on_complete(Err(err)));
                    }
                }
            }
            in_flight.fetch_sub(1, Ordering::SeqCst);
        });
    }

    /// Use new terrain for every search submitted from now on.
    ///
    /// Searches already running finish against the terrain they started with.
    pub fn replace_terrain(&mut self, terrain: T) {
        self.engine = Arc::new(SearchEngine::new(Arc::clone(&self.grid), terrain));
    }

    /// Searches submitted whose results have not yet been queued.
    #[must_use]
    pub fn in_flight(&self) -> usize {
        self.in_flight.load(Ordering::SeqCst)
    }

    /// The engine future searches run on, for blocking use on the caller's thread.
    #[must_use]
    pub fn engine(&self) -> &SearchEngine<Arc<G>, T> {
        &self.engine
    }

    /// The grid mapping collaborator.
    #[must_use]
    pub fn grid(&self) -> &G {
        &self.grid
    }
}

/// Run one request start to finish on a worker, containing any panic.
fn resolve<G, T>(
    engine: &SearchEngine<G, T>,
    origin: Vec2Fixed,
    target: Vec2Fixed,
    debug: bool,
) -> Result<WorldPath>
where
    G: GridMapping,
    T: TerrainCost,
{
    catch_unwind(AssertUnwindSafe(|| {
        let grid = engine.grid();
        match engine.find(origin, target, debug)? {
            Some(path) => Ok(path.map_points(|cell| grid.cell_center(cell))),
            None => Err(PathError::NoPath {
                origin: grid.to_grid(origin),
                goal: grid.to_grid(target),
            }),
        }
    }))
    .unwrap_or_else(|payload| {
        let message = panic_message(&*payload);
        error!(panic = %message, "Search panicked");
        Err(PathError::SearchPanicked(message))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatch::Dispatcher;
    use crate::grid::SquareGrid;
    use crate::math::Fixed;
    use crate::node::GridCoord;
    use crate::terrain::TierMap;
    use std::sync::Mutex;
    use std::time::{Duration, Instant};

    /// Terrain that panics on one cell, standing in for a faulty collaborator.
    struct Tripwire(GridCoord);

    impl TerrainCost for Tripwire {
        fn cost_tier(&self, cell: GridCoord) -> Option<u32> {
            assert_ne!(cell, self.0, "tripwire");
            Some(0)
        }
    }

    fn grid() -> SquareGrid {
        SquareGrid::new(5, Fixed::ONE)
    }

    fn at(x: i32, y: i32) -> Vec2Fixed {
        grid().grid_to_world(GridCoord::new(x, y))
    }

    /// Poll until no search is running and nothing is queued.
    fn drain<G: GridMapping + 'static, T: TerrainCost + 'static>(
        pathfinder: &Pathfinder<G, T>,
        dispatcher: &Dispatcher,
    ) -> usize {
        let deadline = Instant::now() + Duration::from_secs(10);
        let mut ran = 0;
        while pathfinder.in_flight() > 0 || dispatcher.pending() > 0 {
            assert!(Instant::now() < deadline, "searches did not finish");
            ran += dispatcher.poll();
            std::thread::yield_now();
        }
        ran + dispatcher.poll()
    }

    #[test]
    fn test_delivers_world_space_path() {
        let dispatcher = Dispatcher::new();
        let pathfinder = Pathfinder::new(
            grid(),
            TierMap::uniform(5, 0),
            dispatcher.handle(),
            &PathfinderConfig::default().with_worker_threads(2),
        )
        .unwrap();

        let result = Arc::new(Mutex::new(None));
        let slot = Arc::clone(&result);
        pathfinder.find_path(at(0, 0), at(2, 0), move |path| {
            *slot.lock().unwrap() = Some(path);
        });

        assert_eq!(drain(&pathfinder, &dispatcher), 1);
        let path = result.lock().unwrap().take().unwrap().unwrap();
        assert_eq!(path.points, vec![at(0, 0), at(1, 0), at(2, 0)]);
        assert_eq!(path.cost, Fixed::from_num(2));
    }

    #[test]
    fn test_reports_no_path_by_default() {
        let dispatcher = Dispatcher::new();
        let pathfinder = Pathfinder::new(
            grid(),
            TierMap::uniform(5, 0),
            dispatcher.handle(),
            &PathfinderConfig::default(),
        )
        .unwrap();

        let result = Arc::new(Mutex::new(None));
        let slot = Arc::clone(&result);
        pathfinder.find_path(at(0, 0), at(9, 9), move |path| {
            *slot.lock().unwrap() = Some(path);
        });

        assert_eq!(drain(&pathfinder, &dispatcher), 1);
        let err = result.lock().unwrap().take().unwrap().unwrap_err();
        assert!(err.is_no_path());
    }

    #[test]
    fn test_worker_panic_is_contained() {
        let dispatcher = Dispatcher::new();
        let pathfinder = Pathfinder::new(
            grid(),
            Tripwire(GridCoord::new(1, 1)),
            dispatcher.handle(),
            &PathfinderConfig::default().with_worker_threads(1),
        )
        .unwrap();

        let result = Arc::new(Mutex::new(None));
        let slot = Arc::clone(&result);
        pathfinder.find_path(at(0, 0), at(4, 4), move |path| {
            *slot.lock().unwrap() = Some(path);
        });
        assert_eq!(drain(&pathfinder, &dispatcher), 1);
        let err = result.lock().unwrap().take().unwrap().unwrap_err();
        assert!(matches!(err, PathError::SearchPanicked(ref m) if m.contains("tripwire")));

        // The pool survives and serves a request that never looks at the tripwire.
        let ok = Arc::new(Mutex::new(None));
        let slot = Arc::clone(&ok);
        pathfinder.find_path(at(4, 4), at(4, 1), move |path| {
            *slot.lock().unwrap() = Some(path.is_ok());
        });
        assert_eq!(drain(&pathfinder, &dispatcher), 1);
        assert_eq!(*ok.lock().unwrap(), Some(true));
    }

    #[test]
    fn test_replace_terrain_affects_later_searches() {
        let dispatcher = Dispatcher::new();
        let mut pathfinder = Pathfinder::new(
            grid(),
            TierMap::uniform(5, 0),
            dispatcher.handle(),
            &PathfinderConfig::default(),
        )
        .unwrap();

        let costs = Arc::new(Mutex::new(Vec::new()));
        let record = |costs: &Arc<Mutex<Vec<Fixed>>>| {
            let costs = Arc::clone(costs);
            move |path: Result<WorldPath>| costs.lock().unwrap().push(path.unwrap().cost)
        };

        pathfinder.find_path(at(0, 0), at(0, 1), record(&costs));
        drain(&pathfinder, &dispatcher);

        pathfinder.replace_terrain(TierMap::uniform(5, 0).with_tier(GridCoord::new(0, 1), 1));
        pathfinder.find_path(at(0, 0), at(0, 1), record(&costs));
        drain(&pathfinder, &dispatcher);

        assert_eq!(
            *costs.lock().unwrap(),
            vec![Fixed::ONE, Fixed::from_num(5)]
        );
    }
}

// controller.rs - Owns the current grid and drives it forward on a timer

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{debug, info, trace};

use crate::config::SimulationConfig;
use crate::error::{LifeError, Result};
use crate::grid::Grid;
use crate::patterns::{self, Seed, check_density};
use crate::step;

/// Consistent view of the simulation, published after every grid replacement.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub grid: Arc<Grid>,
    /// Generations advanced since the last clear, resize, or placement.
    pub generation: u64,
    pub running: bool,
}

struct State {
    grid: Arc<Grid>,
    generation: u64,
    tick_interval: Duration,
    random_density: f64,
    running: bool,
    // Bumped whenever the ticker is armed or disarmed; ticks from an older epoch are ignored.
    epoch: u64,
}

impl State {
    fn snapshot(&self) -> Snapshot {
        Snapshot {
            grid: Arc::clone(&self.grid),
            generation: self.generation,
            running: self.running,
        }
    }
}

struct Shared {
    state: Mutex<State>,
    changes: watch::Sender<Snapshot>,
}

impl Shared {
    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn publish(&self, state: &State) {
        self.changes.send_replace(state.snapshot());
    }

    /// Advances one generation if `epoch` is still the live one.
    /// Returns false when the ticker that called it should exit.
    fn tick(&self, epoch: u64) -> bool {
        let mut state = self.lock();
        if !state.running || state.epoch != epoch {
            trace!(epoch, "stale tick ignored");
            return false;
        }
        state.grid = Arc::new(step::next_generation(&state.grid));
        state.generation += 1;
        trace!(
            generation = state.generation,
            population = state.grid.population(),
            "tick"
        );
        self.publish(&state);
        true
    }
}

/// Holds the one current `Grid` and the ticker that steps it while running.
///
/// Grid mutations validate first and either replace the grid wholesale or
/// leave everything untouched. The recurring tick is a task on the supplied
/// tokio runtime; the controller owns its handle and cancels it on `stop`,
/// on re-arm, and when dropped.
pub struct SimulationController {
    shared: Arc<Shared>,
    runtime: Handle,
    ticker: Option<JoinHandle<()>>,
}

impl SimulationController {
    pub fn new(config: SimulationConfig, runtime: Handle) -> Result<Self> {
        config.validate()?;
        let mut grid = Grid::new(config.size)?;
        if let Some(name) = &config.initial_seed {
            let seed: Seed = name.parse()?;
            grid = seeded(&grid, seed, None, config.random_density)?;
        }
        let state = State {
            grid: Arc::new(grid),
            generation: 0,
            tick_interval: config.tick_interval(),
            random_density: config.random_density,
            running: false,
            epoch: 0,
        };
        let (changes, _) = watch::channel(state.snapshot());
        Ok(Self {
            shared: Arc::new(Shared {
                state: Mutex::new(state),
                changes,
            }),
            runtime,
            ticker: None,
        })
    }

    pub fn snapshot(&self) -> Snapshot {
        self.shared.lock().snapshot()
    }

    pub fn grid(&self) -> Arc<Grid> {
        Arc::clone(&self.shared.lock().grid)
    }

    pub fn size(&self) -> usize {
        self.shared.lock().grid.size()
    }

    pub fn generation(&self) -> u64 {
        self.shared.lock().generation
    }

    pub fn tick_interval(&self) -> Duration {
        self.shared.lock().tick_interval
    }

    pub fn random_density(&self) -> f64 {
        self.shared.lock().random_density
    }

    pub fn is_running(&self) -> bool {
        self.shared.lock().running
    }

    /// Change feed. The receiver sees the latest snapshot after every grid
    /// replacement and every start/stop.
    pub fn subscribe(&self) -> watch::Receiver<Snapshot> {
        self.shared.changes.subscribe()
    }

    pub fn toggle_cell(&self, row: usize, col: usize) -> Result<()> {
        self.replace_grid(false, |state| state.grid.with_toggled(row, col))?;
        debug!(row, col, "cell toggled");
        Ok(())
    }

    /// Resolves `name` and places it. Patterns are centered when `origin` is
    /// `None`; `"random"` refills the whole grid and ignores `origin`.
    pub fn place_pattern(&self, name: &str, origin: Option<(isize, isize)>) -> Result<()> {
        let seed: Seed = name.parse()?;
        self.place_seed(seed, origin)
    }

    pub fn place_seed(&self, seed: Seed, origin: Option<(isize, isize)>) -> Result<()> {
        self.replace_grid(true, |state| {
            seeded(&state.grid, seed, origin, state.random_density)
        })?;
        debug!(%seed, ?origin, "seed placed");
        Ok(())
    }

    /// Swaps in an empty grid of `new_size`. A running ticker keeps going and
    /// steps the new grid from its next tick.
    pub fn resize(&self, new_size: usize) -> Result<()> {
        self.replace_grid(true, |_| Grid::new(new_size))?;
        info!(size = new_size, "grid resized");
        Ok(())
    }

    pub fn clear(&self) {
        let mut state = self.shared.lock();
        state.grid = Arc::new(state.grid.cleared());
        state.generation = 0;
        self.shared.publish(&state);
        debug!("grid cleared");
    }

    /// Advances one generation immediately, running or not.
    pub fn step(&self) {
        let mut state = self.shared.lock();
        state.grid = Arc::new(step::next_generation(&state.grid));
        state.generation += 1;
        self.shared.publish(&state);
    }

    pub fn set_random_density(&self, density: f64) -> Result<()> {
        check_density(density)?;
        self.shared.lock().random_density = density;
        Ok(())
    }

    /// Updates the cadence. When running, the ticker is re-armed so the next
    /// tick lands one new interval from now; nothing fires immediately.
    pub fn set_tick_interval(&mut self, interval: Duration) -> Result<()> {
        if interval.is_zero() {
            return Err(LifeError::config("tick interval must be non-zero"));
        }
        let rearm = {
            let mut state = self.shared.lock();
            state.tick_interval = interval;
            if state.running {
                state.epoch += 1;
                Some(state.epoch)
            } else {
                None
            }
        };
        if let Some(epoch) = rearm {
            self.arm(epoch, interval);
        }
        info!(interval_ms = interval.as_millis() as u64, "tick interval set");
        Ok(())
    }

    /// Stopped -> Running. No-op when already running.
    pub fn start(&mut self) {
        let (epoch, interval) = {
            let mut state = self.shared.lock();
            if state.running {
                return;
            }
            state.running = true;
            state.epoch += 1;
            self.shared.publish(&state);
            (state.epoch, state.tick_interval)
        };
        self.arm(epoch, interval);
        info!(interval_ms = interval.as_millis() as u64, "simulation started");
    }

    /// Running -> Stopped. Once this returns no further tick is applied.
    pub fn stop(&mut self) {
        {
            let mut state = self.shared.lock();
            if !state.running {
                return;
            }
            state.running = false;
            state.epoch += 1;
            self.shared.publish(&state);
        }
        self.disarm();
        info!("simulation stopped");
    }

    fn arm(&mut self, epoch: u64, period: Duration) {
        let shared = Arc::clone(&self.shared);
        let task = self.runtime.spawn(async move {
            let mut ticks = time::interval_at(Instant::now() + period, period);
            ticks.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticks.tick().await;
                if !shared.tick(epoch) {
                    break;
                }
            }
        });
        if let Some(old) = self.ticker.replace(task) {
            old.abort();
        }
    }

    fn disarm(&mut self) {
        if let Some(task) = self.ticker.take() {
            task.abort();
        }
    }

    // Builds the replacement under the lock so a tick can't interleave.
    // On error nothing changes and nothing is published.
    fn replace_grid(
        &self,
        reset_generation: bool,
        build: impl FnOnce(&State) -> Result<Grid>,
    ) -> Result<()> {
        let mut state = self.shared.lock();
        let grid = build(&state)?;
        state.grid = Arc::new(grid);
        if reset_generation {
            state.generation = 0;
        }
        self.shared.publish(&state);
        Ok(())
    }
}

// `grid` with `seed` applied; patterns default to the centered origin.
fn seeded(grid: &Grid, seed: Seed, origin: Option<(isize, isize)>, density: f64) -> Result<Grid> {
    match seed {
        Seed::Random => patterns::random_fill(grid.size(), density),
        Seed::Pattern(id) => {
            let pattern = id.pattern();
            let (row, col) = origin.unwrap_or_else(|| pattern.centered_origin(grid.size()));
            Ok(patterns::place(grid, pattern, row, col))
        }
    }
}

impl Drop for SimulationController {
    fn drop(&mut self) {
        {
            let mut state = self.shared.lock();
            state.running = false;
            state.epoch += 1;
        }
        self.disarm();
    }
}

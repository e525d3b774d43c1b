use std::{
    sync::mpsc::{self, RecvTimeoutError},
    thread::{self, JoinHandle},
    time::{Duration, Instant},
};

use tracing::{debug, info, warn};

use crate::{engine, Cell, LifeError, LiveSet, Radius, Result};

const MIN_TICK_INTERVAL: Duration = Duration::from_millis(10);
const MAX_TICK_INTERVAL: Duration = Duration::from_secs(5);

#[derive(Debug, Clone)]
pub struct SimConfig {
    pub radius: Radius,
    pub tick_interval: Duration,
    pub start_paused: bool,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            radius: Radius::MOORE,
            tick_interval: Duration::from_millis(200),
            start_paused: false,
        }
    }
}

/// What the simulation looked like when a snapshot was requested.
#[derive(Debug, Clone)]
pub struct Status {
    pub live: LiveSet,
    pub generation: u64,
    pub running: bool,
    pub tick_interval: Duration,
}

#[derive(Debug)]
pub enum SimCmd {
    Snapshot(mpsc::Sender<Status>),
    TogglePause,
    Step,
    Reset,
    /// Flips one cell. Only honored while paused.
    ToggleCell(Cell),
    Faster,
    Slower,
    Stop,
}

#[derive(Debug)]
struct State {
    seed: LiveSet,
    live: LiveSet,
    generation: u64,
    running: bool,
    tick_interval: Duration,
    radius: Radius,
    last_tick: Instant,
}

impl State {
    fn new(seed: LiveSet, config: SimConfig) -> Self {
        Self {
            live: seed.clone(),
            seed,
            generation: 0,
            running: !config.start_paused,
            tick_interval: config.tick_interval,
            radius: config.radius,
            last_tick: Instant::now(),
        }
    }

    fn status(&self) -> Status {
        Status {
            live: self.live.clone(),
            generation: self.generation,
            running: self.running,
            tick_interval: self.tick_interval,
        }
    }

    fn tick(&mut self) {
        self.live = engine::step(&self.live, self.radius);
        self.generation += 1;
        self.last_tick = Instant::now();
        debug!(
            generation = self.generation,
            population = self.live.len(),
            "generation advanced"
        );
    }

    /// returns `false` once the loop should exit.
    fn apply(&mut self, cmd: SimCmd) -> bool {
        match cmd {
            SimCmd::Snapshot(sender) => {
                if sender.send(self.status()).is_err() {
                    warn!("snapshot requester went away");
                }
            }
            SimCmd::TogglePause => {
                self.running = !self.running;
                self.last_tick = Instant::now();
                info!(running = self.running, "run state toggled");
            }
            SimCmd::Step => self.tick(),
            SimCmd::Reset => {
                self.live = self.seed.clone();
                self.generation = 0;
                self.running = false;
                info!(population = self.live.len(), "reset to seed");
            }
            SimCmd::ToggleCell(cell) if self.running => {
                warn!(x = cell.x, y = cell.y, "ignoring cell toggle while running");
            }
            SimCmd::ToggleCell(cell) => self.live = self.live.toggled(cell),
            SimCmd::Faster => {
                self.tick_interval = (self.tick_interval / 2).max(MIN_TICK_INTERVAL);
            }
            SimCmd::Slower => {
                self.tick_interval = (self.tick_interval * 2).min(MAX_TICK_INTERVAL);
            }
            SimCmd::Stop => return false,
        }
        true
    }
}

#[derive(Debug, Clone)]
pub struct SimHandle {
    sender: mpsc::Sender<SimCmd>,
}

impl SimHandle {
    pub fn new(sender: mpsc::Sender<SimCmd>) -> Self {
        Self { sender }
    }

    pub fn send(&self, cmd: SimCmd) -> Result<()> {
        self.sender
            .send(cmd)
            .map_err(|_| LifeError::SimulationStopped)
    }

    pub fn snapshot(&self) -> Result<Status> {
        let (sender, receiver) = mpsc::channel();
        self.send(SimCmd::Snapshot(sender))?;
        receiver.recv().map_err(|_| LifeError::SimulationStopped)
    }

    pub fn toggle_pause(&self) -> Result<()> {
        self.send(SimCmd::TogglePause)
    }

    pub fn step(&self) -> Result<()> {
        self.send(SimCmd::Step)
    }

    pub fn reset(&self) -> Result<()> {
        self.send(SimCmd::Reset)
    }

    pub fn toggle_cell(&self, cell: Cell) -> Result<()> {
        self.send(SimCmd::ToggleCell(cell))
    }

    pub fn faster(&self) -> Result<()> {
        self.send(SimCmd::Faster)
    }

    pub fn slower(&self) -> Result<()> {
        self.send(SimCmd::Slower)
    }

    pub fn stop(&self) -> Result<()> {
        self.send(SimCmd::Stop)
    }
}

#[derive(Debug)]
pub struct Sim {
    thread: JoinHandle<()>,
    sender: mpsc::Sender<SimCmd>,
}

impl Sim {
    pub fn spawn(seed: LiveSet, config: SimConfig) -> Result<Self> {
        info!(
            population = seed.len(),
            radius = config.radius.get(),
            paused = config.start_paused,
            "starting simulation"
        );
        let state = State::new(seed, config);
        let (sender, receiver) = mpsc::channel();
        let thread = thread::Builder::new()
            .name("sim".into())
            .spawn(move || sim_loop(receiver, state))?;

        Ok(Self { thread, sender })
    }

    pub fn handle(&self) -> SimHandle {
        SimHandle::new(self.sender.clone())
    }

    pub fn join(self) -> Result<()> {
        drop(self.sender);
        self.thread.join().map_err(|_| LifeError::SimulationStopped)
    }
}

fn sim_loop(receiver: mpsc::Receiver<SimCmd>, mut state: State) {
    loop {
        let cmd = if state.running {
            let wait = state.tick_interval.saturating_sub(state.last_tick.elapsed());
            match receiver.recv_timeout(wait) {
                Ok(cmd) => Some(cmd),
                Err(RecvTimeoutError::Timeout) => None,
                Err(RecvTimeoutError::Disconnected) => break,
            }
        } else {
            match receiver.recv() {
                Ok(cmd) => Some(cmd),
                Err(_) => break,
            }
        };

        if let Some(cmd) = cmd {
            if !state.apply(cmd) {
                break;
            }
        }

        if state.running && state.last_tick.elapsed() >= state.tick_interval {
            state.tick();
        }
    }
    info!(generation = state.generation, "simulation stopped");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{cell, pattern};

    fn paused() -> SimConfig {
        SimConfig {
            start_paused: true,
            ..SimConfig::default()
        }
    }

    #[test]
    fn paused_sim_only_moves_on_step() {
        let blinker = pattern::builtin("blinker").unwrap();
        let sim = Sim::spawn(blinker.clone(), paused()).unwrap();
        let handle = sim.handle();

        let status = handle.snapshot().unwrap();
        assert_eq!(status.generation, 0);
        assert!(!status.running);
        assert_eq!(status.live, blinker);

        handle.step().unwrap();
        let status = handle.snapshot().unwrap();
        assert_eq!(status.generation, 1);
        assert_eq!(status.live, engine::next_generation(&blinker));

        handle.stop().unwrap();
        sim.join().unwrap();
    }

    #[test]
    fn toggles_only_apply_while_paused() {
        let sim = Sim::spawn(LiveSet::empty(), paused()).unwrap();
        let handle = sim.handle();

        handle.toggle_cell(cell!(3, -2)).unwrap();
        assert!(handle.snapshot().unwrap().live.contains(cell!(3, -2)));

        handle.toggle_pause().unwrap();
        handle.toggle_cell(cell!(7, 7)).unwrap();
        let status = handle.snapshot().unwrap();
        assert!(status.running);
        assert!(!status.live.contains(cell!(7, 7)));

        handle.stop().unwrap();
        sim.join().unwrap();
    }

    #[test]
    fn reset_restores_seed_and_pauses() {
        let glider = pattern::builtin("glider").unwrap();
        let sim = Sim::spawn(glider.clone(), paused()).unwrap();
        let handle = sim.handle();

        handle.step().unwrap();
        handle.step().unwrap();
        handle.reset().unwrap();
        let status = handle.snapshot().unwrap();
        assert_eq!(status.generation, 0);
        assert_eq!(status.live, glider);
        assert!(!status.running);

        handle.stop().unwrap();
        sim.join().unwrap();
    }

    #[test]
    fn speed_is_clamped() {
        let sim = Sim::spawn(LiveSet::empty(), paused()).unwrap();
        let handle = sim.handle();
        for _ in 0..20 {
            handle.faster().unwrap();
        }
        assert_eq!(handle.snapshot().unwrap().tick_interval, MIN_TICK_INTERVAL);
        for _ in 0..20 {
            handle.slower().unwrap();
        }
        assert_eq!(handle.snapshot().unwrap().tick_interval, MAX_TICK_INTERVAL);

        handle.stop().unwrap();
        sim.join().unwrap();
    }

    #[test]
    fn running_sim_advances_on_its_own() {
        let config = SimConfig {
            tick_interval: MIN_TICK_INTERVAL,
            ..SimConfig::default()
        };
        let sim = Sim::spawn(pattern::builtin("block").unwrap(), config).unwrap();
        let handle = sim.handle();
        thread::sleep(Duration::from_millis(100));
        let status = handle.snapshot().unwrap();
        assert!(status.generation > 0);
        assert_eq!(status.live.len(), 4);

        handle.stop().unwrap();
        sim.join().unwrap();
    }

    #[test]
    fn stopped_sim_refuses_commands() {
        let sim = Sim::spawn(LiveSet::empty(), paused()).unwrap();
        let handle = sim.handle();
        handle.stop().unwrap();
        sim.join().unwrap();
        assert!(matches!(handle.snapshot(), Err(LifeError::SimulationStopped)));
    }
}

use std::{
    sync::mpsc,
    thread::{self, JoinHandle},
    time::{Duration, Instant},
};

use tracing::{debug, info, warn};

use crate::{pos, Pos, PosSet, World};

/// the b3/s23 rule engine, sole owner of its world.
#[derive(Debug, Clone)]
pub struct LifeEngine<W>
where
    W: World,
{
    world: W,
    generation: u64,
    halted: bool,
}

impl<W> LifeEngine<W>
where
    W: World,
{
    pub fn new(world: W) -> Self {
        Self {
            world,
            generation: 0,
            halted: false,
        }
    }

    pub fn world(&self) -> &W {
        &self.world
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_halted(&self) -> bool {
        self.halted
    }

    /// distinct wrapped positions around `pos`, never including `pos` itself.
    pub fn get_neighbors(&self, pos: Pos) -> PosSet {
        let (width, height) = (self.world.width(), self.world.height());
        let mut neighbors: PosSet = (-1..=1)
            .flat_map(|y| (-1..=1).map(move |x| pos!(x, y)))
            .filter(|&offset| offset != pos!(0, 0))
            .map(|offset| (pos + offset).wrap(width, height))
            .collect();
        neighbors.remove(&pos);
        neighbors
    }

    pub fn get_neighbor_count(&self, pos: Pos) -> usize {
        self.get_neighbors(pos)
            .into_iter()
            .filter(|&pos| self.world.is_alive(pos))
            .count()
    }

    /// advances one generation, returns whether any cell changed.
    ///
    /// the whole grid is judged against the current generation before any
    /// flip is applied. once a step changes nothing the engine is halted and
    /// every later call is a no-op returning `false`.
    pub fn step(&mut self) -> bool {
        if self.halted {
            return false;
        }

        let mut births = PosSet::default();
        let mut deaths = PosSet::default();
        for pos in self.world.positions() {
            let is_active = self.world.is_alive(pos);
            let neighbor_count = self.get_neighbor_count(pos);
            match (is_active, neighbor_count) {
                (true, count) if count < 2 || count > 3 => {
                    deaths.insert(pos);
                }
                (false, 3) => {
                    births.insert(pos);
                }
                _ => (),
            }
        }

        if births.is_empty() && deaths.is_empty() {
            debug!(generation = self.generation, "no cell changed, halting");
            self.halted = true;
            return false;
        }

        self.world.apply_changes(&births, &deaths);
        self.generation += 1;
        debug!(
            generation = self.generation,
            births = births.len(),
            deaths = deaths.len(),
            "advanced"
        );
        true
    }
}

const DEFAULT_TICK_INTERVAL: Duration = Duration::from_millis(200);
const TICK_INTERVAL_VAR: &str = "LIFE_TICK_MS";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimConfig {
    /// delay between two generations
    pub tick_interval: Duration,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            tick_interval: DEFAULT_TICK_INTERVAL,
        }
    }
}

impl SimConfig {
    /// defaults, with the tick interval overridden by `LIFE_TICK_MS` when set.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(val) = std::env::var(TICK_INTERVAL_VAR) {
            match parse_tick_ms(&val) {
                Some(interval) => config.tick_interval = interval,
                None => warn!("ignoring {TICK_INTERVAL_VAR}={val:?}, expected a positive integer"),
            }
        }
        config
    }
}

fn parse_tick_ms(val: &str) -> Option<Duration> {
    match val.trim().parse::<u64>() {
        Ok(0) | Err(_) => None,
        Ok(ms) => Some(Duration::from_millis(ms)),
    }
}

#[derive(Debug)]
pub enum SimEvent<W>
where
    W: World,
{
    Generation { generation: u64, world: W },
    Ended { generation: u64 },
}

#[derive(Debug)]
pub enum SimCmd {
    Stop,
}

#[derive(Debug, Clone)]
pub struct SimHandle {
    sender: mpsc::Sender<SimCmd>,
}

impl SimHandle {
    /// asks the simulation to stop, a no-op when it is already gone.
    pub fn stop(&self) {
        let _ = self.sender.send(SimCmd::Stop);
    }
}

#[derive(Debug)]
pub struct Sim {
    thread: JoinHandle<u64>,
    sender: mpsc::Sender<SimCmd>,
}

impl Sim {
    /// `events` should be bounded, publishing a generation waits for the view.
    pub fn spawn<W>(engine: LifeEngine<W>, config: SimConfig, events: mpsc::SyncSender<SimEvent<W>>) -> Self
    where
        W: World,
    {
        let (sender, receiver) = mpsc::channel();
        let thread = thread::spawn(move || sim_loop(receiver, events, engine, config));
        Self { thread, sender }
    }

    pub fn handle(&self) -> SimHandle {
        let sender = self.sender.clone();
        SimHandle { sender }
    }

    /// waits for the simulation to finish, returns the last generation reached.
    pub fn join(self) -> u64 {
        drop(self.sender);
        match self.thread.join() {
            Ok(generation) => generation,
            Err(payload) => std::panic::resume_unwind(payload),
        }
    }
}

const EVT_CHECK_TIMEOUT: Duration = Duration::from_millis(10);

fn sim_loop<W>(
    receiver: mpsc::Receiver<SimCmd>,
    events: mpsc::SyncSender<SimEvent<W>>,
    mut engine: LifeEngine<W>,
    config: SimConfig,
) -> u64
where
    W: World,
{
    info!(
        width = engine.world().width(),
        height = engine.world().height(),
        population = engine.world().population(),
        "simulation started"
    );
    if publish(&events, &engine).is_err() {
        return engine.generation();
    }
    let mut last_update = Instant::now();

    loop {
        if let Ok(cmd) = receiver.try_recv() {
            match cmd {
                SimCmd::Stop => {
                    info!(generation = engine.generation(), "simulation stopped");
                    return engine.generation();
                }
            }
        }

        if last_update.elapsed() >= config.tick_interval {
            last_update = Instant::now();
            if !engine.step() {
                info!(generation = engine.generation(), "simulation ended");
                let generation = engine.generation();
                if events.send(SimEvent::Ended { generation }).is_err() {
                    debug!("view hung up before the end of game");
                }
                return generation;
            }
            if publish(&events, &engine).is_err() {
                debug!("view hung up, stopping simulation");
                return engine.generation();
            }
        }

        thread::sleep(EVT_CHECK_TIMEOUT.min(config.tick_interval));
    }
}

fn publish<W>(events: &mpsc::SyncSender<SimEvent<W>>, engine: &LifeEngine<W>) -> Result<(), mpsc::SendError<SimEvent<W>>>
where
    W: World,
{
    events.send(SimEvent::Generation {
        generation: engine.generation(),
        world: engine.world().clone(),
    })
}

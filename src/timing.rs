//! Timing demo
//! Named tasks with a fixed artificial delay that run their children after
//! themselves, traced with one span per task so nested timings show up in the logs.

use std::thread;
use std::time::{Duration, Instant};
use tracing::{debug, info, info_span};

/// Depth reported when a task reaches the bottom of its call chain.
pub const CALL_DEPTH: usize = 7;

/// The built-in task variants; they differ only in delay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Variant {
    A,
    B,
    C,
}

impl Variant {
    pub const ALL: [Variant; 3] = [Variant::A, Variant::B, Variant::C];

    pub fn name(self) -> &'static str {
        match self {
            Variant::A => "TimedTaskA",
            Variant::B => "TimedTaskB",
            Variant::C => "TimedTaskC",
        }
    }

    pub fn delay(self) -> Duration {
        match self {
            Variant::A => Duration::from_millis(100),
            Variant::B => Duration::from_millis(150),
            Variant::C => Duration::from_millis(200),
        }
    }
}

/// Run one task: sleep for `delay`, then run each child in order.
///
/// Returns the elapsed time including the children.
pub fn run_timed(name: &str, delay: Duration, children: &[TimedTask]) -> Duration {
    let span = info_span!("timed_task", task = name);
    let _guard = span.enter();

    let started = Instant::now();
    info!("Starting {name} execution");
    thread::sleep(delay);
    info!("{name} reached level {CALL_DEPTH}");

    for child in children {
        child.execute();
    }

    let elapsed = started.elapsed();
    debug!(elapsed_ms = elapsed.as_secs_f64() * 1000.0, "task finished");
    elapsed
}

#[derive(Debug, Clone)]
pub struct TimedTask {
    name: String,
    delay: Duration,
    children: Vec<TimedTask>,
    created: Instant,
}

impl TimedTask {
    pub fn new(name: impl Into<String>, delay: Duration) -> Self {
        Self {
            name: name.into(),
            delay,
            children: Vec::new(),
            created: Instant::now(),
        }
    }

    pub fn from_variant(variant: Variant) -> Self {
        Self::new(variant.name(), variant.delay())
    }

    pub fn add_child(&mut self, child: TimedTask) {
        self.children.push(child);
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn children(&self) -> &[TimedTask] {
        &self.children
    }

    pub fn execute(&self) -> Duration {
        run_timed(&self.name, self.delay, &self.children)
    }

    /// Time since the task was constructed, e.g. `TimedTaskA execution time: 101.27ms`.
    pub fn debug_info(&self) -> String {
        let millis = self.created.elapsed().as_secs_f64() * 1000.0;
        format!("{} execution time: {millis:.2}ms", self.name)
    }
}

/// One task per [`Variant`], run individually or all in order.
#[derive(Debug, Clone)]
pub struct TimingSuite {
    tasks: Vec<(Variant, TimedTask)>,
}

impl Default for TimingSuite {
    fn default() -> Self {
        Self::new()
    }
}

impl TimingSuite {
    pub fn new() -> Self {
        Self {
            tasks: Variant::ALL
                .iter()
                .map(|&v| (v, TimedTask::from_variant(v)))
                .collect(),
        }
    }

    pub fn task(&self, variant: Variant) -> Option<&TimedTask> {
        self.tasks
            .iter()
            .find(|(v, _)| *v == variant)
            .map(|(_, task)| task)
    }

    pub fn task_mut(&mut self, variant: Variant) -> Option<&mut TimedTask> {
        self.tasks
            .iter_mut()
            .find(|(v, _)| *v == variant)
            .map(|(_, task)| task)
    }

    pub fn run(&self, variant: Variant) -> Option<Duration> {
        info!("Running {}...", variant.name());
        self.task(variant).map(TimedTask::execute)
    }

    /// Run every task in variant order.
    pub fn run_all(&self) -> Vec<(Variant, Duration)> {
        info!("Running all tasks...");
        self.tasks
            .iter()
            .map(|(v, task)| (*v, task.execute()))
            .collect()
    }
}

//! Context drift monitor.
//!
//! [`DriftMonitor`] is a single-threaded polling loop. Each tick it takes a fresh
//! [`RepositoryState`] sample, diffs it against the previous one and produces
//! [`DriftEvent`]s in a fixed order: branch, staleness, added skills, removed
//! skills. Branch and skill diffs need a previous sample; staleness does not, so
//! the very first tick can already report a stale state file.
//!
//! A staleness warning is issued once and then suppressed until the state file
//! is fresh again or the branch changes.
//!
//! The loop stops when the shared stop flag is raised. The flag is checked
//! between ticks and while sleeping, never in the middle of a tick.

use crate::core::output::{Level, Reporter};
use crate::core::state::{RepositoryState, StateSampler};
use std::collections::BTreeSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::{Duration, Instant};

/// Longest uninterrupted sleep between two stop-flag checks
const SLEEP_SLICE: Duration = Duration::from_millis(200);

#[derive(Debug, Clone, PartialEq)]
pub enum DriftEvent {
    BranchChanged { from: Option<String>, to: String },
    StateStale { age_hours: f64, threshold_hours: f64 },
    SkillsAdded(BTreeSet<String>),
    SkillsRemoved(BTreeSet<String>),
}

impl DriftEvent {
    pub fn level(&self) -> Level {
        match self {
            DriftEvent::BranchChanged { .. } | DriftEvent::StateStale { .. } => Level::Warn,
            DriftEvent::SkillsAdded(_) => Level::Ok,
            DriftEvent::SkillsRemoved(_) => Level::Error,
        }
    }

    /// One-line, user-facing description. `state_label` names the tracked
    /// state file.
    pub fn render(&self, state_label: &str) -> String {
        match self {
            DriftEvent::BranchChanged { from, to } => format!(
                "Branch changed: {} -> {to} (update {state_label} with your current task context)",
                from.as_deref().unwrap_or("(none)")
            ),
            DriftEvent::StateStale {
                age_hours,
                threshold_hours,
            } => format!(
                "{state_label} is stale ({age_hours:.1}h old > {threshold_hours}h limit); \
                 run: skillsmith snapshot -n 'checkpoint' then update {state_label}"
            ),
            DriftEvent::SkillsAdded(skills) => format!("New skills: {}", join(skills)),
            DriftEvent::SkillsRemoved(skills) => format!("Removed skills: {}", join(skills)),
        }
    }
}

fn join(skills: &BTreeSet<String>) -> String {
    skills.iter().map(String::as_str).collect::<Vec<_>>().join(", ")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonitorState {
    Idle,
    Running,
    Stopped,
}

#[derive(Debug, Clone)]
pub struct MonitorConfig {
    pub interval: Duration,
    pub stale_hours: f64,
    /// Display name of the tracked state file
    pub state_label: String,
    /// Stop after this many ticks; run until stopped when `None`
    pub max_ticks: Option<u64>,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(30),
            stale_hours: 24.0,
            state_label: "STATE.md".to_string(),
            max_ticks: None,
        }
    }
}

pub struct DriftMonitor<S: StateSampler> {
    sampler: S,
    config: MonitorConfig,
    last_state: Option<RepositoryState>,
    warned_stale: bool,
    state: MonitorState,
    ticks: u64,
}

impl<S: StateSampler> DriftMonitor<S> {
    pub fn new(sampler: S, config: MonitorConfig) -> Self {
        Self {
            sampler,
            config,
            last_state: None,
            warned_stale: false,
            state: MonitorState::Idle,
            ticks: 0,
        }
    }

    pub fn state(&self) -> MonitorState {
        self.state
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// The state carried into the next tick
    pub fn last_state(&self) -> Option<&RepositoryState> {
        self.last_state.as_ref()
    }

    /// Samples once and returns the drift relative to the previous tick.
    ///
    /// A signal missing from the sample (branch unreadable, skill scan failed)
    /// carries the previous value forward instead of counting as a change.
    pub fn tick(&mut self) -> Vec<DriftEvent> {
        if self.state == MonitorState::Idle {
            self.state = MonitorState::Running;
        }
        self.ticks += 1;

        let current = self.sampler.sample();
        let previous = self.last_state.take();
        let mut events = Vec::new();

        let branch = match (&previous, current.branch) {
            (Some(prev), Some(now)) => {
                if prev.branch.as_deref() != Some(now.as_str()) {
                    events.push(DriftEvent::BranchChanged {
                        from: prev.branch.clone(),
                        to: now.clone(),
                    });
                    self.warned_stale = false;
                }
                Some(now)
            }
            (Some(prev), None) => prev.branch.clone(),
            (None, now) => now,
        };

        if let Some(age_hours) = current.state_age_hours {
            if age_hours > self.config.stale_hours {
                if !self.warned_stale {
                    events.push(DriftEvent::StateStale {
                        age_hours,
                        threshold_hours: self.config.stale_hours,
                    });
                    self.warned_stale = true;
                }
            } else {
                self.warned_stale = false;
            }
        }

        let previous_skills = previous.and_then(|prev| prev.skill_ids);
        let skill_ids = match (previous_skills, current.skill_ids) {
            (Some(before), Some(now)) => {
                let added: BTreeSet<String> = now.difference(&before).cloned().collect();
                let removed: BTreeSet<String> = before.difference(&now).cloned().collect();
                if !added.is_empty() {
                    events.push(DriftEvent::SkillsAdded(added));
                }
                if !removed.is_empty() {
                    events.push(DriftEvent::SkillsRemoved(removed));
                }
                Some(now)
            }
            (before, None) => before,
            (None, now) => now,
        };

        self.last_state = Some(RepositoryState {
            branch,
            state_age_hours: current.state_age_hours,
            skill_ids,
        });

        log::debug!("Tick {} produced {} event(s)", self.ticks, events.len());
        events
    }

    /// Polls until `stop` is raised or the configured tick limit is reached,
    /// reporting every event through `reporter`.
    pub fn run(&mut self, reporter: &dyn Reporter, stop: &AtomicBool) {
        loop {
            if stop.load(Ordering::SeqCst) {
                break;
            }

            for event in self.tick() {
                reporter.emit(event.level(), &event.render(&self.config.state_label));
            }

            if self
                .config
                .max_ticks
                .is_some_and(|max_ticks| self.ticks >= max_ticks)
            {
                break;
            }

            if !self.sleep_interval(stop) {
                break;
            }
        }

        self.state = MonitorState::Stopped;
    }

    /// Sleeps for one interval. Returns `false` if `stop` was raised meanwhile.
    ///
    /// An interval too long to express as a deadline sleeps until stopped.
    fn sleep_interval(&self, stop: &AtomicBool) -> bool {
        let deadline = Instant::now().checked_add(self.config.interval);
        loop {
            if stop.load(Ordering::SeqCst) {
                return false;
            }
            let remaining = match deadline {
                Some(deadline) => deadline.saturating_duration_since(Instant::now()),
                None => SLEEP_SLICE,
            };
            if remaining.is_zero() {
                return true;
            }
            thread::sleep(remaining.min(SLEEP_SLICE));
        }
    }
}

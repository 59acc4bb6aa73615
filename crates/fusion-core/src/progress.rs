//! Progress reporting for a fusion run.

use std::fmt;
use std::sync::Mutex;

/// Pipeline stages, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Stage {
    Read,
    Transform,
    Fuse,
    SwitchView,
    Clear,
    Write,
    Done,
}

impl Stage {
    pub const ALL: [Stage; 7] = [
        Stage::Read,
        Stage::Transform,
        Stage::Fuse,
        Stage::SwitchView,
        Stage::Clear,
        Stage::Write,
        Stage::Done,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Stage::Read => "read",
            Stage::Transform => "transform",
            Stage::Fuse => "fuse",
            Stage::SwitchView => "switch-view",
            Stage::Clear => "clear",
            Stage::Write => "write",
            Stage::Done => "done",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Receives a call as each stage starts.
pub trait ProgressReporter: Send + Sync {
    fn stage(&self, stage: Stage);
}

/// Ignores all progress.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopReporter;

impl ProgressReporter for NoopReporter {
    fn stage(&self, _stage: Stage) {}
}

/// Keeps every reported stage in order.
#[derive(Debug, Default)]
pub struct RecordingReporter {
    stages: Mutex<Vec<Stage>>,
}

impl RecordingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stages(&self) -> Vec<Stage> {
        self.stages
            .lock()
            .map(|stages| stages.clone())
            .unwrap_or_default()
    }
}

impl ProgressReporter for RecordingReporter {
    fn stage(&self, stage: Stage) {
        if let Ok(mut stages) = self.stages.lock() {
            stages.push(stage);
        }
    }
}

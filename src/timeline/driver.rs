use crate::timeline::phase::{Phase, PhaseTable};

/// Timeline state resolved for one instant.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TimelineSample {
    /// Active phase.
    pub phase: Phase,
    /// Index of the active phase in the table.
    pub phase_index: usize,
    /// Progress through the active phase, `[0, 1]`.
    pub phase_progress: f64,
    /// Progress through the whole intro, `[0, 1]`.
    pub global_progress: f64,
}

/// How a run reached its end.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Completion {
    /// Global progress reached 1.
    Natural,
    /// The host requested a skip.
    Skipped,
}

/// Result of advancing the timeline by one host frame.
#[derive(Clone, Debug, PartialEq)]
pub struct TimelineTick {
    /// State after the advance.
    pub sample: TimelineSample,
    /// Phases entered during this tick, in table order. A long frame may cross several.
    pub entered: Vec<Phase>,
    /// Set on exactly one tick per run.
    pub completion: Option<Completion>,
}

/// Lifecycle of a [`Timeline`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimelineState {
    /// Accepting ticks.
    Running,
    /// Completed; further ticks are no-ops.
    Finished(Completion),
    /// Cancelled before completion; further ticks are no-ops.
    Cancelled,
}

/// Converts elapsed host time into phase state and edge-triggers completion.
#[derive(Clone, Debug)]
pub struct Timeline {
    duration_ms: f64,
    table: PhaseTable,
    elapsed_ms: f64,
    last_index: Option<usize>,
    state: TimelineState,
}

impl Timeline {
    /// Create a running timeline.
    ///
    /// A non-positive or NaN `duration_ms` yields a timeline that completes on its first tick.
    pub fn new(duration_ms: f64, table: PhaseTable) -> Self {
        Self {
            duration_ms,
            table,
            elapsed_ms: 0.0,
            last_index: None,
            state: TimelineState::Running,
        }
    }

    /// Configured duration.
    pub fn duration_ms(&self) -> f64 {
        self.duration_ms
    }

    /// Accumulated elapsed time.
    pub fn elapsed_ms(&self) -> f64 {
        self.elapsed_ms
    }

    /// Phase table driving this timeline.
    pub fn table(&self) -> &PhaseTable {
        &self.table
    }

    /// Current lifecycle state.
    pub fn state(&self) -> TimelineState {
        self.state
    }

    /// `true` while ticks are accepted.
    pub fn is_running(&self) -> bool {
        self.state == TimelineState::Running
    }

    fn is_degenerate(&self) -> bool {
        self.duration_ms.is_nan() || self.duration_ms <= 0.0
    }

    /// Global progress for an elapsed time, clamped to `[0, 1]`.
    pub fn global_progress_at(&self, elapsed_ms: f64) -> f64 {
        if self.is_degenerate() {
            return 1.0;
        }
        if elapsed_ms.is_nan() {
            return 0.0;
        }
        (elapsed_ms / self.duration_ms).clamp(0.0, 1.0)
    }

    /// Pure lookup of the timeline state at `elapsed_ms`.
    pub fn sample_at(&self, elapsed_ms: f64) -> TimelineSample {
        self.sample_global(self.global_progress_at(elapsed_ms))
    }

    fn sample_global(&self, global_progress: f64) -> TimelineSample {
        let (phase_index, phase_progress) = self.table.resolve(global_progress);
        TimelineSample {
            phase: self.table.spans()[phase_index].phase,
            phase_index,
            phase_progress,
            global_progress,
        }
    }

    /// Current state; pinned to progress 1 once finished.
    pub fn current(&self) -> TimelineSample {
        match self.state {
            TimelineState::Finished(_) => self.sample_global(1.0),
            _ => self.sample_at(self.elapsed_ms),
        }
    }

    /// Advance by `delta_ms` of host time.
    ///
    /// Returns `None` once the timeline is finished or cancelled. Negative or non-finite deltas
    /// advance nothing, which keeps progress monotonic.
    pub fn tick(&mut self, delta_ms: f64) -> Option<TimelineTick> {
        if !self.is_running() {
            return None;
        }

        if delta_ms.is_finite() && delta_ms > 0.0 {
            self.elapsed_ms += delta_ms;
        }

        let sample = self.sample_at(self.elapsed_ms);
        let entered = self.enter_through(sample.phase_index);
        for phase in &entered {
            tracing::debug!(phase = %phase, elapsed_ms = self.elapsed_ms, "phase entered");
        }

        let completion = if sample.global_progress >= 1.0 {
            self.state = TimelineState::Finished(Completion::Natural);
            tracing::debug!(elapsed_ms = self.elapsed_ms, "timeline complete");
            Some(Completion::Natural)
        } else {
            None
        };

        Some(TimelineTick {
            sample,
            entered,
            completion,
        })
    }

    fn enter_through(&mut self, index: usize) -> Vec<Phase> {
        let from = self.last_index.map_or(0, |i| i + 1);
        if index < from {
            return Vec::new();
        }
        self.last_index = Some(index);
        self.table.spans()[from..=index]
            .iter()
            .map(|s| s.phase)
            .collect()
    }

    /// Jump to the end. Returns `true` only when this call completed the run.
    pub fn skip(&mut self) -> bool {
        if !self.is_running() {
            return false;
        }
        if !self.is_degenerate() {
            self.elapsed_ms = self.elapsed_ms.max(self.duration_ms);
        }
        self.state = TimelineState::Finished(Completion::Skipped);
        tracing::debug!(elapsed_ms = self.elapsed_ms, "timeline skipped");
        true
    }

    /// Stop accepting ticks without completing. Idempotent; returns `true` on the first call.
    pub fn cancel(&mut self) -> bool {
        if !self.is_running() {
            return false;
        }
        self.state = TimelineState::Cancelled;
        tracing::debug!(elapsed_ms = self.elapsed_ms, "timeline cancelled");
        true
    }

    /// Rewind to a fresh running state.
    pub fn reset(&mut self) {
        self.elapsed_ms = 0.0;
        self.last_index = None;
        self.state = TimelineState::Running;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/driver.rs"]
mod tests;

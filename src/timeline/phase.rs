use crate::foundation::error::{KosmosError, KosmosResult};

/// Named segment of the intro, in playback order.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Empty space; particles fade in.
    Void,
    /// Ambient drift.
    Stardust,
    /// Particles pulled toward the center.
    Convergence,
    /// Fast tight gyre around the center.
    Singularity,
    /// Outward burst and glyph reveal.
    Revelation,
    /// Terminal hold.
    Complete,
}

impl Phase {
    /// Every phase in playback order.
    pub const ALL: [Phase; 6] = [
        Phase::Void,
        Phase::Stardust,
        Phase::Convergence,
        Phase::Singularity,
        Phase::Revelation,
        Phase::Complete,
    ];

    /// Stable lowercase name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Void => "void",
            Self::Stardust => "stardust",
            Self::Convergence => "convergence",
            Self::Singularity => "singularity",
            Self::Revelation => "revelation",
            Self::Complete => "complete",
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// One row of a [`PhaseTable`]: `phase` is active for global progress in `[start, end)`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PhaseSpan {
    /// Phase kind.
    pub phase: Phase,
    /// Inclusive start fraction.
    pub start: f64,
    /// Exclusive end fraction (inclusive for the terminal span).
    pub end: f64,
}

impl PhaseSpan {
    /// Construct a span.
    pub fn new(phase: Phase, start: f64, end: f64) -> Self {
        Self { phase, start, end }
    }

    /// Progress through this span for a global progress value, clamped to `[0, 1]`.
    pub fn progress_at(&self, global: f64) -> f64 {
        ((global - self.start) / (self.end - self.start)).clamp(0.0, 1.0)
    }
}

/// Ordered partition of `[0, 1]` into phases.
///
/// Construction rejects anything that is not an exact partition; fractions are never clamped or
/// repaired.
#[derive(Clone, Debug, PartialEq)]
pub struct PhaseTable {
    spans: Vec<PhaseSpan>,
}

impl PhaseTable {
    /// Tolerance for float round-off when checking boundaries.
    pub const EPSILON: f64 = 1e-9;

    /// Validate and build a phase table.
    pub fn new(spans: Vec<PhaseSpan>) -> KosmosResult<Self> {
        let (Some(first), Some(last)) = (spans.first(), spans.last()) else {
            return Err(KosmosError::timeline("phase table must not be empty"));
        };
        if (first.start - 0.0).abs() > Self::EPSILON {
            return Err(KosmosError::timeline(format!(
                "phase table must start at 0, got {} for '{}'",
                first.start, first.phase
            )));
        }
        if (last.end - 1.0).abs() > Self::EPSILON {
            return Err(KosmosError::timeline(format!(
                "phase table must end at 1, got {} for '{}'",
                last.end, last.phase
            )));
        }

        for (i, s) in spans.iter().enumerate() {
            if !s.start.is_finite() || !s.end.is_finite() {
                return Err(KosmosError::timeline(format!(
                    "phase '{}' has non-finite bounds",
                    s.phase
                )));
            }
            if s.end - s.start <= Self::EPSILON {
                return Err(KosmosError::timeline(format!(
                    "phase '{}' must have end > start (got {}..{})",
                    s.phase, s.start, s.end
                )));
            }
            if spans[..i].iter().any(|prev| prev.phase == s.phase) {
                return Err(KosmosError::timeline(format!(
                    "phase '{}' appears more than once",
                    s.phase
                )));
            }
        }

        for pair in spans.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            if (a.end - b.start).abs() > Self::EPSILON {
                let what = if a.end < b.start { "gap" } else { "overlap" };
                return Err(KosmosError::timeline(format!(
                    "{what} between '{}' (ends {}) and '{}' (starts {})",
                    a.phase, a.end, b.phase, b.start
                )));
            }
        }

        Ok(Self { spans })
    }

    /// The six-phase cinematic table used by default.
    pub fn cinematic() -> Self {
        Self {
            spans: vec![
                PhaseSpan::new(Phase::Void, 0.0, 0.15),
                PhaseSpan::new(Phase::Stardust, 0.15, 0.35),
                PhaseSpan::new(Phase::Convergence, 0.35, 0.55),
                PhaseSpan::new(Phase::Singularity, 0.55, 0.75),
                PhaseSpan::new(Phase::Revelation, 0.75, 0.95),
                PhaseSpan::new(Phase::Complete, 0.95, 1.0),
            ],
        }
    }

    /// Spans in playback order.
    pub fn spans(&self) -> &[PhaseSpan] {
        &self.spans
    }

    /// Number of spans.
    pub fn len(&self) -> usize {
        self.spans.len()
    }

    /// Always `false`; an empty table cannot be constructed.
    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

    /// The last span, which holds once progress reaches 1.
    pub fn terminal(&self) -> PhaseSpan {
        self.spans[self.spans.len() - 1]
    }

    /// Span for `phase`, if present in the table.
    pub fn span_of(&self, phase: Phase) -> Option<PhaseSpan> {
        self.spans.iter().copied().find(|s| s.phase == phase)
    }

    /// Resolve a global progress value to `(span index, phase progress)`.
    pub fn resolve(&self, global: f64) -> (usize, f64) {
        let g = if global.is_nan() {
            0.0
        } else {
            global.clamp(0.0, 1.0)
        };
        if g >= 1.0 {
            return (self.spans.len() - 1, 1.0);
        }
        let idx = self
            .spans
            .iter()
            .rposition(|s| s.start <= g)
            .unwrap_or(0);
        (idx, self.spans[idx].progress_at(g))
    }
}

impl Default for PhaseTable {
    fn default() -> Self {
        Self::cinematic()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/phase.rs"]
mod tests;

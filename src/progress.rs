//! Per-record progress reporting.

use core::fmt;

use tracing::info;

/// The three phases of a run, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Upserting every generated record.
    Insert,
    /// Re-applying a bounded prefix with a changed column.
    Update,
    /// Point-reading every key back.
    Verify,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Phase::Insert => "insert",
            Phase::Update => "update",
            Phase::Verify => "verify",
        })
    }
}

/// Receives a tick after every record of a batch.
pub trait Progress {
    /// A batch of `total` records is starting.
    fn start(&mut self, phase: Phase, total: usize);
    /// `done` records of the current batch have been processed.
    fn advance(&mut self, done: usize);
    /// The current batch completed.
    fn finish(&mut self);
}

/// Logs an `info` line each time another tenth of the batch completes.
#[derive(Debug, Default)]
pub struct LogProgress {
    phase: Option<Phase>,
    total: usize,
    next_tenth: usize,
}

impl LogProgress {
    fn threshold(&self) -> usize {
        (self.total * self.next_tenth).div_ceil(10)
    }
}

impl Progress for LogProgress {
    fn start(&mut self, phase: Phase, total: usize) {
        self.phase = Some(phase);
        self.total = total;
        self.next_tenth = 1;
        info!(%phase, total, "batch started");
    }

    fn advance(&mut self, done: usize) {
        if self.total == 0 || self.next_tenth > 10 || done < self.threshold() {
            return;
        }
        // Skip every tenth already passed, so small batches log once per record at most.
        while self.next_tenth <= 10 && done >= self.threshold() {
            self.next_tenth += 1;
        }
        let percent = done * 100 / self.total;
        if let Some(phase) = self.phase {
            info!(%phase, done, total = self.total, "{percent}%");
        }
    }

    fn finish(&mut self) {
        if let Some(phase) = self.phase.take() {
            info!(%phase, total = self.total, "batch finished");
        }
    }
}

/// Discards every tick.
#[derive(Debug, Default, Clone, Copy)]
pub struct Silent;

impl Progress for Silent {
    fn start(&mut self, _phase: Phase, _total: usize) {}
    fn advance(&mut self, _done: usize) {}
    fn finish(&mut self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tenths_advance_monotonically() {
        let mut progress = LogProgress::default();
        progress.start(Phase::Insert, 20);
        progress.advance(1);
        assert_eq!(progress.next_tenth, 1);
        progress.advance(2);
        assert_eq!(progress.next_tenth, 2);
        progress.advance(20);
        assert_eq!(progress.next_tenth, 11);
        progress.finish();
        assert_eq!(progress.phase, None);
    }

    #[test]
    fn tiny_batch_skips_passed_tenths() {
        let mut progress = LogProgress::default();
        progress.start(Phase::Verify, 3);
        progress.advance(1);
        // 1/3 covers the first three tenths.
        assert_eq!(progress.next_tenth, 4);
    }

    #[test]
    fn phase_labels() {
        assert_eq!(Phase::Insert.to_string(), "insert");
        assert_eq!(Phase::Update.to_string(), "update");
        assert_eq!(Phase::Verify.to_string(), "verify");
    }
}

//! Optional progress reporting for long-running transforms.
//! Reporters observe the computation, they never influence it.

use std::fmt;

/// The phases of a distance transform, in execution order.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum TransformStep {
    Initialization,
    ForwardScan,
    BackwardScan,
    Normalization,
    Done,
}

impl fmt::Display for TransformStep {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(match self {
            TransformStep::Initialization => "Initialization",
            TransformStep::ForwardScan => "Forward Scan",
            TransformStep::BackwardScan => "Backward Scan",
            TransformStep::Normalization => "Normalization",
            TransformStep::Done => "",
        })
    }
}

/// Receives step changes and row progress of a transform.
pub trait ProgressReporter {
    /// Called when the transform enters a new phase.
    fn step(&mut self, _step: TransformStep) {}

    /// Called once per processed row, and once more with `current == total`
    /// when a scan finishes.
    fn progress(&mut self, _current: usize, _total: usize) {}
}

/// Discards all progress.
#[derive(Copy, Clone, Default, Debug)]
pub struct NoProgress;

impl ProgressReporter for NoProgress {}

/// Forwards progress to the `log` facade:
/// steps at debug level, rows at trace level.
#[derive(Copy, Clone, Default, Debug)]
pub struct LogProgress;

impl ProgressReporter for LogProgress {
    fn step(&mut self, step: TransformStep) {
        if step != TransformStep::Done {
            log::debug!("{}", step);
        }
    }

    fn progress(&mut self, current: usize, total: usize) {
        log::trace!("row {}/{}", current, total);
    }
}

impl<R: ProgressReporter + ?Sized> ProgressReporter for &mut R {
    fn step(&mut self, step: TransformStep) {
        (**self).step(step)
    }

    fn progress(&mut self, current: usize, total: usize) {
        (**self).progress(current, total)
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_names(){
        assert_eq!(TransformStep::ForwardScan.to_string(), "Forward Scan");
        assert_eq!(TransformStep::Done.to_string(), "");
    }

    #[test]
    fn log_progress_accepts_events_without_logger(){
        let mut reporter = LogProgress;
        reporter.step(TransformStep::Initialization);
        reporter.progress(0, 10);
        reporter.step(TransformStep::Done);
    }
}

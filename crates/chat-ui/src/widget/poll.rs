/// Outcome of one placeholder lookup
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PollOutcome {
    Ready,
    Pending,
    TimedOut,
}

/// Bounded wait for the widget placeholder to be committed.
///
/// Each call to [`check`](Self::check) counts as one attempt; once the
/// attempts covering `timeout_ms` are used up the poll reports
/// [`PollOutcome::TimedOut`] and stays there.
#[derive(Clone, Debug)]
pub struct MountPoll {
    attempts: u32,
    max_attempts: u32,
    finished: Option<PollOutcome>,
}

impl MountPoll {
    pub fn new(interval_ms: u32, timeout_ms: u32) -> Self {
        let interval_ms = interval_ms.max(1);
        Self {
            attempts: 0,
            max_attempts: timeout_ms.div_ceil(interval_ms).max(1),
            finished: None,
        }
    }

    pub fn check(&mut self, found: bool) -> PollOutcome {
        if let Some(outcome) = self.finished {
            return outcome;
        }

        self.attempts += 1;
        let outcome = if found {
            PollOutcome::Ready
        } else if self.attempts >= self.max_attempts {
            PollOutcome::TimedOut
        } else {
            PollOutcome::Pending
        };

        if outcome != PollOutcome::Pending {
            self.finished = Some(outcome);
        }
        outcome
    }

    pub const fn attempts(&self) -> u32 {
        self.attempts
    }

    pub const fn max_attempts(&self) -> u32 {
        self.max_attempts
    }
}

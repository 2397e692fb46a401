//! Quiz state machine.
//!
//! Tracks which regions are left to find, which one is being asked for, the
//! last attempt and the number of wrong clicks. Time is not handled here: a
//! wrong click returns a [`FeedbackTicket`] and the owner calls
//! [`QuizState::clear_feedback`] with it once the feedback delay has passed.

use std::collections::HashSet;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

/// Where the quiz is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No catalog yet, or the catalog is empty.
    Loading,
    /// Waiting for the user to click a region.
    AwaitingClick,
    /// A wrong click is on display; clicks are ignored until it clears.
    ShowingFeedback,
    /// Every region has been found.
    Complete,
}

/// Identifies one displayed attempt so a late timer can't clear a newer one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FeedbackTicket(u64);

/// The last click and whether it was right.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attempt {
    pub region: String,
    pub correct: bool,
    pub ticket: FeedbackTicket,
}

/// Result of [`QuizState::submit_click`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    /// The click had no effect.
    Ignored,
    Correct {
        ticket: FeedbackTicket,
        completed: bool,
    },
    Incorrect {
        ticket: FeedbackTicket,
    },
}

impl ClickOutcome {
    /// Ticket to clear once the feedback delay elapses.
    pub fn ticket(self) -> Option<FeedbackTicket> {
        match self {
            Self::Ignored => None,
            Self::Correct { ticket, .. } | Self::Incorrect { ticket } => Some(ticket),
        }
    }
}

pub struct QuizState {
    phase: Phase,
    catalog: Vec<String>,
    remaining: Vec<String>,
    solved: HashSet<String>,
    prompt: Option<String>,
    last_attempt: Option<Attempt>,
    errors: usize,
    next_ticket: u64,
    rng: StdRng,
}

impl QuizState {
    /// An empty quiz in [`Phase::Loading`].
    pub fn new(rng: StdRng) -> Self {
        Self {
            phase: Phase::Loading,
            catalog: Vec::new(),
            remaining: Vec::new(),
            solved: HashSet::new(),
            prompt: None,
            last_attempt: None,
            errors: 0,
            next_ticket: 0,
            rng,
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_os_rng())
    }

    /// Start a session over `catalog`. Duplicate identifiers are collapsed.
    ///
    /// An empty catalog leaves the quiz in [`Phase::Loading`].
    pub fn initialize(&mut self, catalog: Vec<String>) {
        let mut seen = HashSet::new();
        self.catalog = catalog
            .into_iter()
            .filter(|region| seen.insert(region.clone()))
            .collect();
        self.remaining = self.catalog.clone();
        self.solved.clear();
        self.errors = 0;
        self.last_attempt = None;
        self.prompt = None;

        if self.remaining.is_empty() {
            self.phase = Phase::Loading;
            debug!("empty catalog, staying in loading");
            return;
        }

        self.phase = Phase::AwaitingClick;
        self.draw_prompt();
        debug!(regions = self.catalog.len(), prompt = ?self.prompt, "quiz initialized");
    }

    /// Restart over `catalog`, discarding progress and errors.
    pub fn reset(&mut self, catalog: Vec<String>) {
        self.initialize(catalog);
    }

    /// Drop the catalog and go back to [`Phase::Loading`].
    pub fn unload(&mut self) {
        self.initialize(Vec::new());
    }

    /// Handle a click on `region`.
    ///
    /// Only acts while awaiting a click. Clicks on solved regions or on names
    /// outside the catalog are ignored.
    pub fn submit_click(&mut self, region: &str) -> ClickOutcome {
        if self.phase != Phase::AwaitingClick || self.solved.contains(region) {
            return ClickOutcome::Ignored;
        }
        if !self.catalog.iter().any(|known| known == region) {
            debug!(region, "click outside catalog ignored");
            return ClickOutcome::Ignored;
        }

        let ticket = self.issue_ticket();

        if self.prompt.as_deref() == Some(region) {
            self.remaining.retain(|candidate| candidate != region);
            self.solved.insert(region.to_string());
            self.last_attempt = Some(Attempt {
                region: region.to_string(),
                correct: true,
                ticket,
            });

            let completed = self.remaining.is_empty();
            if completed {
                self.phase = Phase::Complete;
                self.prompt = None;
                debug!(errors = self.errors, "quiz complete");
            } else {
                self.draw_prompt();
                debug!(region, next = ?self.prompt, "correct click");
            }
            ClickOutcome::Correct { ticket, completed }
        } else {
            self.errors += 1;
            self.phase = Phase::ShowingFeedback;
            self.last_attempt = Some(Attempt {
                region: region.to_string(),
                correct: false,
                ticket,
            });
            debug!(region, errors = self.errors, "incorrect click");
            ClickOutcome::Incorrect { ticket }
        }
    }

    /// Clear the attempt identified by `ticket`. Returns false when the ticket
    /// is stale.
    pub fn clear_feedback(&mut self, ticket: FeedbackTicket) -> bool {
        if self.last_attempt.as_ref().map(|attempt| attempt.ticket) != Some(ticket) {
            return false;
        }

        self.last_attempt = None;
        if self.phase == Phase::ShowingFeedback {
            self.phase = Phase::AwaitingClick;
        }
        true
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn catalog(&self) -> &[String] {
        &self.catalog
    }

    pub fn remaining(&self) -> &[String] {
        &self.remaining
    }

    pub fn solved(&self) -> &HashSet<String> {
        &self.solved
    }

    pub fn prompt(&self) -> Option<&str> {
        self.prompt.as_deref()
    }

    pub fn last_attempt(&self) -> Option<&Attempt> {
        self.last_attempt.as_ref()
    }

    pub fn errors(&self) -> usize {
        self.errors
    }

    fn issue_ticket(&mut self) -> FeedbackTicket {
        self.next_ticket += 1;
        FeedbackTicket(self.next_ticket)
    }

    /// Uniform over the regions still remaining.
    fn draw_prompt(&mut self) {
        let index = self.rng.random_range(0..self.remaining.len());
        self.prompt = Some(self.remaining[index].clone());
    }
}

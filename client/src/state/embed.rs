//! Report embedding session: credential exchange, rate-limit backoff, and
//! widget mounting for the selected report.
//!
//! ARCHITECTURE
//! ============
//! The session is a state machine that returns an `EmbedCommand` for every
//! transition; the viewer component carries the command out (start a fetch,
//! start a backoff countdown, mount the widget) and feeds results back in.
//!
//! ```text
//! idle -> fetching-credential -> embedding -> ready
//!              |   ^
//!              v   | (countdown reaches zero)
//!          rate-limited --(retries exhausted)--> failed
//! ```
//!
//! Every command carries an `EmbedTicket` stamped with the selection
//! generation. Selecting another report, retrying manually, or clearing bumps
//! the generation, so results and countdown ticks that belong to an older
//! selection are ignored and can never start a fetch for it.

#[cfg(test)]
#[path = "embed_test.rs"]
mod embed_test;

use crate::config::{MAX_RATE_LIMIT_RETRIES, RATE_LIMIT_BACKOFF_STEP_SECS};
use crate::net::error::ApiError;
use crate::net::types::EmbedCredential;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum EmbedPhase {
    #[default]
    Idle,
    FetchingCredential,
    /// Waiting out a 429 before automatic retry number `attempt`.
    RateLimited { attempt: u32, remaining_secs: u32 },
    /// Credential in hand; the widget is being mounted.
    Embedding,
    Ready,
    Failed(String),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EmbedTicket {
    generation: u64,
}

#[derive(Clone, Debug, PartialEq)]
pub enum EmbedCommand {
    Nothing,
    /// Request an embed credential for `report_id`.
    Fetch { ticket: EmbedTicket, report_id: i64 },
    /// Start a countdown of `delay_secs`, calling `tick` once per second.
    ScheduleRetry { ticket: EmbedTicket, delay_secs: u32 },
    /// Mount the widget with this credential.
    Mount { ticket: EmbedTicket, credential: EmbedCredential },
}

#[derive(Clone, Debug, Default)]
pub struct EmbedSession {
    report_id: Option<i64>,
    phase: EmbedPhase,
    retries: u32,
    credential: Option<EmbedCredential>,
    generation: u64,
}

/// Backoff before automatic retry number `attempt` (1-based).
pub fn backoff_secs(attempt: u32) -> u32 {
    attempt * RATE_LIMIT_BACKOFF_STEP_SECS
}

impl EmbedSession {
    pub fn phase(&self) -> &EmbedPhase {
        &self.phase
    }

    pub fn report_id(&self) -> Option<i64> {
        self.report_id
    }

    pub fn credential(&self) -> Option<&EmbedCredential> {
        self.credential.as_ref()
    }

    pub fn is_current(&self, ticket: EmbedTicket) -> bool {
        ticket.generation == self.generation
    }

    /// Start over for `report_id`, abandoning whatever the previous selection
    /// had in flight.
    pub fn select(&mut self, report_id: i64) -> EmbedCommand {
        let ticket = self.restart(Some(report_id));
        self.phase = EmbedPhase::FetchingCredential;
        EmbedCommand::Fetch { ticket, report_id }
    }

    /// Manual retry for the current report, with a fresh retry budget.
    pub fn retry(&mut self) -> EmbedCommand {
        match self.report_id {
            Some(report_id) => self.select(report_id),
            None => EmbedCommand::Nothing,
        }
    }

    /// Back to idle; the viewer is going away.
    pub fn clear(&mut self) {
        self.restart(None);
    }

    pub fn on_credential(&mut self, ticket: EmbedTicket, result: Result<EmbedCredential, ApiError>) -> EmbedCommand {
        if !self.is_current(ticket) || self.phase != EmbedPhase::FetchingCredential {
            return EmbedCommand::Nothing;
        }
        match result {
            Ok(credential) => {
                self.retries = 0;
                self.credential = Some(credential.clone());
                self.phase = EmbedPhase::Embedding;
                EmbedCommand::Mount { ticket, credential }
            }
            Err(ApiError::RateLimited) if self.retries < MAX_RATE_LIMIT_RETRIES => {
                self.retries += 1;
                let delay_secs = backoff_secs(self.retries);
                self.phase = EmbedPhase::RateLimited { attempt: self.retries, remaining_secs: delay_secs };
                EmbedCommand::ScheduleRetry { ticket, delay_secs }
            }
            Err(ApiError::Cancelled) => EmbedCommand::Nothing,
            Err(err) => {
                self.phase = EmbedPhase::Failed(err.user_message());
                EmbedCommand::Nothing
            }
        }
    }

    /// One second of backoff elapsed. Yields the retry fetch when the
    /// countdown reaches zero.
    pub fn tick(&mut self, ticket: EmbedTicket) -> EmbedCommand {
        if !self.is_current(ticket) {
            return EmbedCommand::Nothing;
        }
        let EmbedPhase::RateLimited { attempt, remaining_secs } = self.phase else {
            return EmbedCommand::Nothing;
        };
        let remaining_secs = remaining_secs.saturating_sub(1);
        if remaining_secs > 0 {
            self.phase = EmbedPhase::RateLimited { attempt, remaining_secs };
            return EmbedCommand::Nothing;
        }
        let Some(report_id) = self.report_id else {
            return EmbedCommand::Nothing;
        };
        self.phase = EmbedPhase::FetchingCredential;
        EmbedCommand::Fetch { ticket, report_id }
    }

    /// The widget accepted the credential.
    pub fn on_mounted(&mut self, ticket: EmbedTicket) -> bool {
        if !self.is_current(ticket) || self.phase != EmbedPhase::Embedding {
            return false;
        }
        self.phase = EmbedPhase::Ready;
        true
    }

    pub fn on_mount_failed(&mut self, ticket: EmbedTicket, message: String) {
        if self.is_current(ticket) {
            self.credential = None;
            self.phase = EmbedPhase::Failed(message);
        }
    }

    /// User-facing status for the current phase, if any.
    pub fn status_message(&self) -> Option<String> {
        match &self.phase {
            EmbedPhase::Idle | EmbedPhase::Ready => None,
            EmbedPhase::FetchingCredential | EmbedPhase::Embedding => Some("Loading report...".to_owned()),
            EmbedPhase::RateLimited { attempt, remaining_secs } => Some(format!(
                "Too many requests. Retrying automatically in {remaining_secs}s ({attempt}/{MAX_RATE_LIMIT_RETRIES})..."
            )),
            EmbedPhase::Failed(message) => Some(message.clone()),
        }
    }

    fn restart(&mut self, report_id: Option<i64>) -> EmbedTicket {
        self.generation += 1;
        self.report_id = report_id;
        self.retries = 0;
        self.credential = None;
        self.phase = EmbedPhase::Idle;
        EmbedTicket { generation: self.generation }
    }
}

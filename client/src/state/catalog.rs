//! Report catalog state with single-outstanding-fetch discipline.
//!
//! DESIGN
//! ======
//! Each fetch is issued under a `FetchTicket`. Starting a new fetch or
//! unmounting retires every earlier ticket, so only the most recent fetch can
//! write into the catalog, whatever order responses arrive in. The view layer
//! pairs each ticket with an `AbortHandle` so retired requests are also
//! cancelled on the wire.

#[cfg(test)]
#[path = "catalog_test.rs"]
mod catalog_test;

use crate::net::types::ReportSummary;

#[derive(Clone, Debug, PartialEq)]
pub enum CatalogPhase {
    Loading,
    Failed(String),
    /// The backend answered with an empty list.
    Empty,
    Loaded(Vec<ReportSummary>),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FetchTicket(u64);

#[derive(Clone, Debug)]
pub struct CatalogState {
    phase: CatalogPhase,
    seq: u64,
    mounted: bool,
}

impl Default for CatalogState {
    fn default() -> Self {
        Self { phase: CatalogPhase::Loading, seq: 0, mounted: true }
    }
}

impl CatalogState {
    pub fn phase(&self) -> &CatalogPhase {
        &self.phase
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub fn reports(&self) -> &[ReportSummary] {
        match &self.phase {
            CatalogPhase::Loaded(reports) => reports,
            _ => &[],
        }
    }

    /// Retire any outstanding fetch and start a new one.
    pub fn begin_fetch(&mut self) -> FetchTicket {
        self.seq += 1;
        self.phase = CatalogPhase::Loading;
        FetchTicket(self.seq)
    }

    pub fn is_current(&self, ticket: FetchTicket) -> bool {
        self.mounted && ticket.0 == self.seq
    }

    /// Apply a fetch result. Returns `false` when the ticket was retired and
    /// the result dropped.
    pub fn complete(&mut self, ticket: FetchTicket, result: Result<Vec<ReportSummary>, String>) -> bool {
        if !self.is_current(ticket) {
            return false;
        }
        self.phase = match result {
            Ok(reports) if reports.is_empty() => CatalogPhase::Empty,
            Ok(reports) => CatalogPhase::Loaded(reports),
            Err(message) => CatalogPhase::Failed(message),
        };
        true
    }

    /// Retire every outstanding fetch; nothing is applied afterwards.
    pub fn unmount(&mut self) {
        self.mounted = false;
        self.seq += 1;
    }
}

//! Per-request abort handles.
//!
//! Client-side (hydrate): wraps a browser `AbortController` whose signal is
//! attached to the outgoing fetch. Server-side: an inert handle that only
//! remembers whether `abort` was called.

#[cfg(test)]
#[path = "abort_test.rs"]
mod abort_test;

use std::cell::Cell;

/// Cancellation token for one outstanding request.
#[derive(Debug, Default)]
pub struct AbortHandle {
    aborted: Cell<bool>,
    #[cfg(feature = "hydrate")]
    controller: Option<web_sys::AbortController>,
}

impl AbortHandle {
    pub fn new() -> Self {
        Self {
            aborted: Cell::new(false),
            #[cfg(feature = "hydrate")]
            controller: web_sys::AbortController::new().ok(),
        }
    }

    pub fn abort(&self) {
        self.aborted.set(true);
        #[cfg(feature = "hydrate")]
        if let Some(controller) = &self.controller {
            controller.abort();
        }
    }

    pub fn is_aborted(&self) -> bool {
        self.aborted.get()
    }

    #[cfg(feature = "hydrate")]
    pub(crate) fn signal(&self) -> Option<web_sys::AbortSignal> {
        self.controller.as_ref().map(web_sys::AbortController::signal)
    }
}

/// Slot holding at most one live handle; installing a new handle aborts the
/// previous one first.
#[derive(Debug, Default)]
pub struct InFlight {
    current: Option<std::rc::Rc<AbortHandle>>,
}

impl InFlight {
    /// Abort whatever is outstanding and return a fresh handle for the next request.
    pub fn replace(&mut self) -> std::rc::Rc<AbortHandle> {
        self.cancel();
        let handle = std::rc::Rc::new(AbortHandle::new());
        self.current = Some(std::rc::Rc::clone(&handle));
        handle
    }

    pub fn cancel(&mut self) {
        if let Some(previous) = self.current.take() {
            previous.abort();
        }
    }

    pub fn is_idle(&self) -> bool {
        self.current.is_none()
    }
}

impl Drop for InFlight {
    fn drop(&mut self) {
        self.cancel();
    }
}

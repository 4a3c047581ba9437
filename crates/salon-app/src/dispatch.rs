//! Action dispatch channels
//!
//! A [`Dispatcher`] is a publish/subscribe channel carrying [`Action`]
//! values. One shared instance is the process-wide channel every
//! component listens on; the open-rooms store additionally creates one
//! private instance per room view entry, so each room sub-store can
//! behave as if it alone owned the dispatch channel.
//!
//! Dispatch is run-to-completion: handlers for one action finish before
//! the next action starts. A dispatch issued from inside a handler is
//! queued and drained afterwards.

use crate::core::Action;
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::Arc;
use tracing::trace;

/// Handle identifying a registered handler, used to unregister it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DispatchToken(u64);

type Handler = Arc<dyn Fn(&Action) + Send + Sync>;

#[derive(Default)]
struct DispatcherInner {
    handlers: Vec<(DispatchToken, Handler)>,
    queue: VecDeque<Action>,
    dispatching: bool,
    next_token: u64,
}

/// A publish/subscribe channel for [`Action`]s
#[derive(Default)]
pub struct Dispatcher {
    inner: Mutex<DispatcherInner>,
}

impl Dispatcher {
    /// Create a new, empty dispatcher
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Register a handler; it receives every subsequently dispatched
    /// action until unregistered.
    pub fn register(&self, handler: impl Fn(&Action) + Send + Sync + 'static) -> DispatchToken {
        let mut inner = self.inner.lock();
        inner.next_token += 1;
        let token = DispatchToken(inner.next_token);
        inner.handlers.push((token, Arc::new(handler)));
        token
    }

    /// Remove a previously registered handler
    pub fn unregister(&self, token: DispatchToken) {
        self.inner.lock().handlers.retain(|(t, _)| *t != token);
    }

    /// Dispatch an action to every registered handler, in registration
    /// order.
    ///
    /// Handlers run to completion. A dispatch issued from inside a
    /// handler is queued and processed after the current action
    /// finishes. The handler list is snapshotted per action, so handlers
    /// may register or unregister others while running.
    pub fn dispatch(&self, action: Action) {
        {
            let mut inner = self.inner.lock();
            inner.queue.push_back(action);
            if inner.dispatching {
                return;
            }
            inner.dispatching = true;
        }
        loop {
            let (action, handlers) = {
                let mut inner = self.inner.lock();
                match inner.queue.pop_front() {
                    Some(action) => {
                        let handlers: Vec<Handler> =
                            inner.handlers.iter().map(|(_, h)| h.clone()).collect();
                        (action, handlers)
                    }
                    None => {
                        inner.dispatching = false;
                        return;
                    }
                }
            };
            trace!(action = action.name(), handlers = handlers.len(), "dispatch");
            for handler in &handlers {
                handler(&action);
            }
        }
    }
}

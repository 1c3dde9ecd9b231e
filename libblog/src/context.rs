//! Shareable state container built from a reducer and bound actions
//!
//! A [`DataContext`] is a factory: it owns a reducer, an initial state and a
//! `bind` function that turns a [`Dispatch`] capability into a bundle of
//! operations. Every call to [`DataContext::provide`] creates an independent
//! [`Provider`] owning its own state. Views never reach for an ambient global;
//! they are handed a [`ContextHandle`] when they are constructed.
//!
//! State changes are published through a `tokio::sync::watch` channel, so a
//! handle can tell whether it needs to re-render.
//!
//! # Example
//!
//! ```
//! use libblog::context::{create_data_context, Dispatch};
//!
//! fn reducer(count: u32, step: u32) -> u32 {
//!     count + step
//! }
//!
//! struct Counter {
//!     dispatch: Dispatch<u32, u32>,
//! }
//!
//! impl Counter {
//!     fn increment(&self) {
//!         self.dispatch.dispatch(1);
//!     }
//! }
//!
//! let context = create_data_context(reducer, |dispatch| Counter { dispatch }, 0);
//! let provider = context.provide();
//! let handle = provider.handle();
//!
//! handle.actions().increment();
//! assert_eq!(handle.state(), 1);
//! ```

use std::fmt::Debug;
use std::sync::Arc;

use tokio::sync::watch;

/// Pure state transition function
pub type Reducer<S, A> = fn(S, A) -> S;

type Binder<S, A, O> = dyn Fn(Dispatch<S, A>) -> O + Send + Sync;

/// Capability to submit actions to one provider's state
///
/// Cloning a `Dispatch` yields another handle to the same state.
pub struct Dispatch<S, A> {
    state: Arc<watch::Sender<S>>,
    reducer: Reducer<S, A>,
}

impl<S, A> Clone for Dispatch<S, A> {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
            reducer: self.reducer,
        }
    }
}

impl<S, A> Dispatch<S, A>
where
    S: Default,
    A: Debug,
{
    /// Run the reducer over the current state and publish the result
    ///
    /// The transition happens under the channel's lock, so concurrent
    /// dispatches are applied one after another.
    pub fn dispatch(&self, action: A) {
        tracing::debug!(?action, "dispatch");
        let reducer = self.reducer;
        self.state.send_modify(|state| {
            let current = std::mem::take(state);
            *state = reducer(current, action);
        });
    }
}

impl<S: Clone, A> Dispatch<S, A> {
    /// Current state
    pub fn state(&self) -> S {
        self.state.borrow().clone()
    }
}

/// Factory for providers sharing a reducer and action bindings
pub struct DataContext<S, A, O> {
    reducer: Reducer<S, A>,
    bind: Arc<Binder<S, A, O>>,
    initial: S,
}

impl<S: Clone, A, O> Clone for DataContext<S, A, O> {
    fn clone(&self) -> Self {
        Self {
            reducer: self.reducer,
            bind: Arc::clone(&self.bind),
            initial: self.initial.clone(),
        }
    }
}

/// Wire a reducer and an action binder into a context
///
/// # Arguments
///
/// * `reducer` - Pure `(state, action) -> state` function
/// * `bind` - Builds the operation bundle from a dispatch capability
/// * `initial` - State every new provider starts from
pub fn create_data_context<S, A, O, F>(reducer: Reducer<S, A>, bind: F, initial: S) -> DataContext<S, A, O>
where
    F: Fn(Dispatch<S, A>) -> O + Send + Sync + 'static,
{
    DataContext {
        reducer,
        bind: Arc::new(bind),
        initial,
    }
}

impl<S: Clone, A, O> DataContext<S, A, O> {
    /// Create a provider owning a fresh copy of the initial state
    pub fn provide(&self) -> Provider<S, O> {
        let (sender, _) = watch::channel(self.initial.clone());
        let dispatch = Dispatch {
            state: Arc::new(sender),
            reducer: self.reducer,
        };

        let receiver = dispatch.state.subscribe();
        let actions = Arc::new((self.bind)(dispatch));

        tracing::debug!("provider created");

        Provider { receiver, actions }
    }
}

/// Owner of one state instance and its bound actions
///
/// Dropping the provider (and every handle derived from it) tears the
/// state down.
pub struct Provider<S, O> {
    receiver: watch::Receiver<S>,
    actions: Arc<O>,
}

impl<S: Clone, O> Provider<S, O> {
    /// Handle to pass to descendant views
    pub fn handle(&self) -> ContextHandle<S, O> {
        ContextHandle {
            receiver: self.receiver.clone(),
            actions: Arc::clone(&self.actions),
        }
    }

    /// Current state
    pub fn state(&self) -> S {
        self.receiver.borrow().clone()
    }

    /// Bound operations
    pub fn actions(&self) -> &O {
        &self.actions
    }
}

impl<S, O> Drop for Provider<S, O> {
    fn drop(&mut self) {
        tracing::debug!("provider dropped");
    }
}

/// The exposed `{ state, actions }` bundle
pub struct ContextValue<S, O> {
    pub state: S,
    pub actions: Arc<O>,
}

/// Read access to a provider's state and operations
pub struct ContextHandle<S, O> {
    receiver: watch::Receiver<S>,
    actions: Arc<O>,
}

impl<S, O> Clone for ContextHandle<S, O> {
    fn clone(&self) -> Self {
        Self {
            receiver: self.receiver.clone(),
            actions: Arc::clone(&self.actions),
        }
    }
}

impl<S: Clone, O> ContextHandle<S, O> {
    /// Current state and operations as one value
    ///
    /// Marks the current state as seen.
    pub fn value(&mut self) -> ContextValue<S, O> {
        ContextValue {
            state: self.receiver.borrow_and_update().clone(),
            actions: Arc::clone(&self.actions),
        }
    }

    /// Current state, without marking it as seen
    pub fn state(&self) -> S {
        self.receiver.borrow().clone()
    }

    /// Bound operations
    pub fn actions(&self) -> &O {
        &self.actions
    }

    /// True if state was published since this handle last called `value`
    ///
    /// Returns false once the provider's dispatch side is gone.
    pub fn has_changed(&self) -> bool {
        self.receiver.has_changed().unwrap_or(false)
    }

    /// Wait for the next state change
    ///
    /// Returns false if no further changes can happen.
    pub async fn changed(&mut self) -> bool {
        self.receiver.changed().await.is_ok()
    }
}

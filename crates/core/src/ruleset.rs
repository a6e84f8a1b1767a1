// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The generic (state, event) -> action Rule Set and the Machine Cursor
//! that evaluates it (spec.md §4.A, Component A "Rule Set / FSM kernel").

use crate::error::FsmError;
use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

type ActionFn<S, C, P> = Box<dyn Fn(&mut C, Option<&P>) -> S + Send + Sync>;

/// A mapping from `(state, event)` to an action.
///
/// `add_rule` is last-writer-wins on a duplicate `(state, event)` key, per
/// spec.md §4.A — a `HashMap::insert` does exactly this, so no extra
/// bookkeeping is needed to get that behavior; callers who want strictness
/// (a build-time error on re-registration) should check
/// [`Ruleset::contains`] before calling `add_rule`.
pub struct Ruleset<S, E, C, P = ()> {
    actions: HashMap<(S, E), ActionFn<S, C, P>>,
}

impl<S, E, C, P> Default for Ruleset<S, E, C, P>
where
    S: Eq + Hash,
    E: Eq + Hash,
{
    fn default() -> Self {
        Self { actions: HashMap::new() }
    }
}

impl<S, E, C, P> Ruleset<S, E, C, P>
where
    S: Copy + Eq + Hash,
    E: Copy + Eq + Hash,
{
    pub fn new() -> Self {
        Self { actions: HashMap::new() }
    }

    /// Register an action for `(state, event)`. Overwrites any prior
    /// registration for the same key (last-writer-wins).
    pub fn add_rule(
        &mut self,
        state: S,
        event: E,
        action: impl Fn(&mut C, Option<&P>) -> S + Send + Sync + 'static,
    ) -> &mut Self {
        self.actions.insert((state, event), Box::new(action));
        self
    }

    pub fn contains(&self, state: S, event: E) -> bool {
        self.actions.contains_key(&(state, event))
    }

    fn get(&self, state: S, event: E) -> Option<&ActionFn<S, C, P>> {
        self.actions.get(&(state, event))
    }
}

/// Owns one FSM instance: the Rule Set plus the Machine Cursor
/// (`previous_state`, `current_state`, logging toggle, owner tag).
///
/// Invariant (spec.md §3): `previous_state == current_state` only at
/// construction; every successful transition sets
/// `previous_state <- current_state(before)`, `current_state <- result`.
pub struct Machine<S, E, C, P = ()> {
    ruleset: Ruleset<S, E, C, P>,
    previous_state: S,
    current_state: S,
    log_enabled: Arc<AtomicBool>,
    owner_name: &'static str,
}

impl<S, E, C, P> Machine<S, E, C, P>
where
    S: Copy + Eq + Hash + Debug,
    E: Copy + Eq + Hash + Debug,
{
    pub fn new(ruleset: Ruleset<S, E, C, P>, initial_state: S, owner_name: &'static str) -> Self {
        Self {
            ruleset,
            previous_state: initial_state,
            current_state: initial_state,
            log_enabled: Arc::new(AtomicBool::new(false)),
            owner_name,
        }
    }

    pub fn current_state(&self) -> S {
        self.current_state
    }

    pub fn previous_state(&self) -> S {
        self.previous_state
    }

    /// Shared handle for the log-enable toggle (spec.md §9 — reduces the
    /// dedicated log-toggle channel to an atomic read before each emission).
    pub fn log_enabled_handle(&self) -> Arc<AtomicBool> {
        self.log_enabled.clone()
    }

    pub fn set_log_enabled(&self, enabled: bool) {
        self.log_enabled.store(enabled, Ordering::Relaxed);
    }

    /// Evaluate `(current_state, event)` through the rule set, run the
    /// matching action, and commit the transition. Actions run
    /// synchronously on the caller's task (spec.md §4.A) — they must not
    /// suspend.
    ///
    /// On a missing rule, state is left unchanged and a `FsmError` is
    /// returned; the caller logs it and continues (spec.md §7).
    pub fn process_event(
        &mut self,
        ctx: &mut C,
        source: &str,
        event: E,
        payload: Option<&P>,
    ) -> Result<S, FsmError<S, E>> {
        match self.ruleset.get(self.current_state, event) {
            Some(action) => {
                let next = action(ctx, payload);
                self.previous_state = self.current_state;
                self.current_state = next;
                if self.log_enabled.load(Ordering::Relaxed) {
                    tracing::debug!(
                        machine = self.owner_name,
                        from = ?self.previous_state,
                        to = ?self.current_state,
                        ?event,
                        %source,
                        "transition"
                    );
                }
                Ok(next)
            }
            None => {
                let err = FsmError::new(source, self.current_state, event);
                tracing::error!(
                    machine = self.owner_name,
                    state = ?self.current_state,
                    ?event,
                    %source,
                    "rule violation"
                );
                Err(err)
            }
        }
    }
}

#[cfg(test)]
#[path = "ruleset_tests.rs"]
mod tests;

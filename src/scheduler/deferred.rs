//! Single-shot deferred action with cancellation and arm-time mode capture.
//!
//! Every demo screen needs the same pattern: a user event arms a delayed
//! interruption whose content depends on a two-valued mode. The classic
//! bugs are firing a stale callback after a mode switch, and stacking
//! duplicate timers under rapid repeat triggers (keystrokes). This module
//! centralizes the arm/cancel/fire-once bookkeeping:
//!
//! - Lifecycle is `Idle → Armed → {Fired | Cancelled}`; both terminal
//!   states require an explicit [`DeferredScheduler::reset`] before the
//!   next arm. No transition skips `Armed`.
//! - `arm` while `Armed` or `Fired` is a silent no-op returning the
//!   existing handle, so at most one timer is ever pending.
//! - Mode is captured at arm time, never re-read at fire time.
//! - The host drives the clock: [`DeferredScheduler::poll`] with an
//!   explicit `Instant` fires the action once the deadline has passed and
//!   returns the effect produced by the `on_fire` branch. No wall clock
//!   is read implicitly, which keeps every lifecycle deterministic under
//!   test.

use std::fmt;
use std::time::{Duration, Instant};

/// Lifecycle state of a deferred action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeferredState {
    /// No action armed; `arm` is permitted.
    Idle,
    /// A timer is pending and has not yet fired or been cancelled.
    Armed,
    /// The delay elapsed and `on_fire` ran exactly once. Terminal until reset.
    Fired,
    /// Cancelled before firing; `on_fire` will never run. Terminal until reset.
    Cancelled,
}

/// Opaque token identifying one armed timer instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActionId(u64);

impl ActionId {
    /// Numeric form, for logs.
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ActionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "action-{}", self.0)
    }
}

struct ArmedAction<M, E> {
    id: ActionId,
    deadline: Instant,
    mode: M,
    // Taken exactly once on fire; dropped on cancel so it can never run.
    on_fire: Option<Box<dyn FnOnce(M) -> E + Send>>,
}

/// Single-shot deferred action scheduler.
///
/// `M` is the caller's mode type, captured at arm time. `E` is the effect
/// value produced by the `on_fire` branch; the host applies it after
/// [`poll`](Self::poll) returns it. Keeping the effect a value rather
/// than a callback into host state means the captured mode is the
/// closure's only input.
pub struct DeferredScheduler<M: Copy, E> {
    state: DeferredState,
    current: Option<ArmedAction<M, E>>,
    next_id: u64,
}

impl<M: Copy, E> Default for DeferredScheduler<M, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M: Copy, E> DeferredScheduler<M, E> {
    /// Create an idle scheduler.
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: DeferredState::Idle,
            current: None,
            next_id: 0,
        }
    }

    /// Arm a one-shot action firing `delay` after `now`.
    ///
    /// Captures `mode` at call time. If an action is already `Armed`,
    /// `Fired`, or `Cancelled`-awaiting-reset, this is a no-op returning
    /// the existing handle — rapid repeated triggers are an expected
    /// caller pattern and must not create duplicate timers.
    pub fn arm(
        &mut self,
        now: Instant,
        delay: Duration,
        mode: M,
        on_fire: impl FnOnce(M) -> E + Send + 'static,
    ) -> ActionId {
        // Armed, Fired, and Cancelled all reject re-arm; terminal states
        // require an explicit reset first.
        if self.state != DeferredState::Idle {
            if let Some(action) = &self.current {
                return action.id;
            }
        }

        self.next_id += 1;
        let id = ActionId(self.next_id);
        self.current = Some(ArmedAction {
            id,
            deadline: now + delay,
            mode,
            on_fire: Some(Box::new(on_fire)),
        });
        self.state = DeferredState::Armed;
        id
    }

    /// Cancel a pending action: `Armed → Cancelled`.
    ///
    /// Drops the stored `on_fire` so it can never run. No-op if the action
    /// already fired or was already cancelled. Cancellation is
    /// authoritative: after `cancel` returns, no future `poll` fires.
    pub fn cancel(&mut self) {
        if self.state == DeferredState::Armed {
            if let Some(action) = self.current.as_mut() {
                action.on_fire = None;
            }
            self.state = DeferredState::Cancelled;
        }
    }

    /// Discard a `Fired`/`Cancelled` action, permitting a new `arm`.
    ///
    /// No-op while `Armed` (cancel first) or `Idle`.
    pub fn reset(&mut self) {
        if matches!(self.state, DeferredState::Fired | DeferredState::Cancelled) {
            self.current = None;
            self.state = DeferredState::Idle;
        }
    }

    /// Advance the host clock: fire the pending action if its deadline has
    /// passed, returning the effect produced by the captured branch.
    ///
    /// Fires at most once per armed instance; subsequent polls return
    /// `None` until the scheduler is reset and re-armed.
    pub fn poll(&mut self, now: Instant) -> Option<E> {
        if self.state != DeferredState::Armed {
            return None;
        }
        let action = self.current.as_mut()?;
        if now < action.deadline {
            return None;
        }
        let on_fire = action.on_fire.take()?;
        let mode = action.mode;
        self.state = DeferredState::Fired;
        Some(on_fire(mode))
    }

    /// Current lifecycle state.
    #[must_use]
    pub fn state(&self) -> DeferredState {
        self.state
    }

    /// Handle of the current action, if one exists (any non-idle state).
    #[must_use]
    pub fn current_id(&self) -> Option<ActionId> {
        self.current.as_ref().map(|a| a.id)
    }

    /// Deadline of the pending action, if armed.
    #[must_use]
    pub fn deadline(&self) -> Option<Instant> {
        match self.state {
            DeferredState::Armed => self.current.as_ref().map(|a| a.deadline),
            _ => None,
        }
    }

    /// Time remaining until fire, if armed. Zero once the deadline passed.
    #[must_use]
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.deadline()
            .map(|deadline| deadline.saturating_duration_since(now))
    }

    /// Whether a timer is pending.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.state == DeferredState::Armed
    }
}

impl<M: Copy, E> Drop for DeferredScheduler<M, E> {
    // Teardown of the owning context must release the pending timer on all
    // exit paths, so a fired callback can never touch a dead context.
    fn drop(&mut self) {
        self.cancel();
    }
}

impl<M: Copy, E> fmt::Debug for DeferredScheduler<M, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeferredScheduler")
            .field("state", &self.state)
            .field("current_id", &self.current_id())
            .finish_non_exhaustive()
    }
}

//! The interrupt-trap session: type, wait, get interrupted.
//!
//! Drives the "Modal from Nowhere" demo (and the blocking phase of the
//! chat demo). The first keystroke arms a randomized trap; when it fires,
//! the mode captured at arm time decides the interruption: bad mode throws
//! a blocking modal whose OK discards the draft, good mode shows a
//! dismissible toast that touches nothing.

use std::time::Instant;

use crate::core::mode::Mode;
use crate::scheduler::deferred::{ActionId, DeferredScheduler, DeferredState};
use crate::scheduler::delay::DelayRange;

/// What fired into the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interruption {
    /// Blocks all input until acknowledged; OK is destructive.
    BlockingModal,
    /// Non-blocking, dismissible, touches nothing.
    DismissableToast,
}

/// Observable session transitions, for logging and CLI narration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InterruptEvent {
    /// A trap was armed by the first keystroke.
    TrapArmed(ActionId),
    /// The trap fired with the given interruption.
    TrapFired(Interruption),
    /// Pending trap cancelled (teardown or explicit).
    TrapCancelled,
    /// The blocking modal's OK discarded this many draft characters.
    DraftDiscarded(usize),
}

/// One user's editing session under the interrupt trap.
pub struct InterruptSession {
    mode: Mode,
    delay_range: DelayRange,
    scheduler: DeferredScheduler<Mode, Interruption>,
    draft: String,
    interruption: Option<Interruption>,
    status: Option<String>,
}

impl InterruptSession {
    /// Start a session in `mode` with the configured trap delay range.
    #[must_use]
    pub fn new(mode: Mode, delay_range: DelayRange) -> Self {
        Self {
            mode,
            delay_range,
            scheduler: DeferredScheduler::new(),
            draft: String::new(),
            interruption: None,
            status: None,
        }
    }

    /// Append typed text. The first keystroke of an idle session arms the
    /// trap; further keystrokes are no-ops on the scheduler (one pending
    /// timer, never duplicates).
    pub fn type_text(&mut self, now: Instant, text: &str) -> Option<InterruptEvent> {
        if self.interruption == Some(Interruption::BlockingModal) {
            // Bad mode blocks all input until the modal is acknowledged.
            return None;
        }
        self.draft.push_str(text);
        if self.draft.is_empty() || self.scheduler.state() != DeferredState::Idle {
            return None;
        }
        let delay = self.delay_range.sample(&mut rand::rng());
        let id = self.scheduler.arm(now, delay, self.mode, |mode| match mode {
            Mode::Bad | Mode::BadV2 => Interruption::BlockingModal,
            Mode::Good => Interruption::DismissableToast,
        });
        Some(InterruptEvent::TrapArmed(id))
    }

    /// Advance the session clock; surfaces the interruption when the trap
    /// fires.
    pub fn poll(&mut self, now: Instant) -> Option<InterruptEvent> {
        let fired = self.scheduler.poll(now)?;
        self.interruption = Some(fired);
        Some(InterruptEvent::TrapFired(fired))
    }

    /// Acknowledge the blocking modal. `ok` is the destructive path: the
    /// draft is discarded, mirroring the forced-restart original.
    pub fn acknowledge_modal(&mut self, ok: bool) -> Option<InterruptEvent> {
        if self.interruption != Some(Interruption::BlockingModal) {
            return None;
        }
        self.interruption = None;
        self.scheduler.reset();
        if ok {
            let lost = self.draft.len();
            self.draft.clear();
            self.status = Some("System forced a restart. Unsaved work was discarded.".to_string());
            Some(InterruptEvent::DraftDiscarded(lost))
        } else {
            None
        }
    }

    /// Dismiss the toast. The draft is untouched.
    pub fn dismiss_toast(&mut self) {
        if self.interruption == Some(Interruption::DismissableToast) {
            self.interruption = None;
            self.scheduler.reset();
        }
    }

    /// Switch modes: a full teardown. Any pending trap is cancelled before
    /// the new mode takes effect, so a stale timer can never fire into the
    /// new rendition.
    pub fn switch_mode(&mut self, mode: Mode) -> Option<InterruptEvent> {
        let had_pending = self.scheduler.is_pending();
        self.scheduler.cancel();
        self.scheduler.reset();
        self.mode = mode;
        self.draft.clear();
        self.interruption = None;
        self.status = None;
        had_pending.then_some(InterruptEvent::TrapCancelled)
    }

    /// Cancel a pending trap without otherwise disturbing the session.
    pub fn cancel_trap(&mut self) -> Option<InterruptEvent> {
        if self.scheduler.is_pending() {
            self.scheduler.cancel();
            Some(InterruptEvent::TrapCancelled)
        } else {
            None
        }
    }

    /// Active mode.
    #[must_use]
    pub const fn mode(&self) -> Mode {
        self.mode
    }

    /// Current draft text.
    #[must_use]
    pub fn draft(&self) -> &str {
        &self.draft
    }

    /// Interruption currently displayed, if any.
    #[must_use]
    pub const fn interruption(&self) -> Option<Interruption> {
        self.interruption
    }

    /// Status banner, if the destructive path ran.
    #[must_use]
    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    /// Trap state, for narration.
    #[must_use]
    pub fn trap_state(&self) -> DeferredState {
        self.scheduler.state()
    }

    /// Time until the trap fires, if armed.
    #[must_use]
    pub fn trap_remaining(&self, now: Instant) -> Option<std::time::Duration> {
        self.scheduler.remaining(now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn fixed(ms: u64) -> DelayRange {
        DelayRange::fixed(Duration::from_millis(ms))
    }

    fn secs(n: u64) -> Duration {
        Duration::from_secs(n)
    }

    #[test]
    fn first_keystroke_arms_the_trap() {
        let now = Instant::now();
        let mut s = InterruptSession::new(Mode::Bad, fixed(5_000));
        let event = s.type_text(now, "h");
        assert!(matches!(event, Some(InterruptEvent::TrapArmed(_))));
        assert_eq!(s.trap_state(), DeferredState::Armed);
    }

    #[test]
    fn rapid_keystrokes_never_double_arm() {
        let now = Instant::now();
        let mut s = InterruptSession::new(Mode::Bad, fixed(5_000));
        assert!(s.type_text(now, "h").is_some());
        for i in 1..20 {
            assert!(
                s.type_text(now + Duration::from_millis(i), "e").is_none(),
                "keystroke {i} must not re-arm"
            );
        }
        assert_eq!(s.draft(), "heeeeeeeeeeeeeeeeeee");
    }

    #[test]
    fn bad_mode_fires_blocking_modal() {
        let now = Instant::now();
        let mut s = InterruptSession::new(Mode::Bad, fixed(5_000));
        s.type_text(now, "draft");

        assert!(s.poll(now + secs(4)).is_none());
        assert_eq!(
            s.poll(now + secs(5)),
            Some(InterruptEvent::TrapFired(Interruption::BlockingModal))
        );
        assert_eq!(s.interruption(), Some(Interruption::BlockingModal));
    }

    #[test]
    fn good_mode_fires_dismissible_toast() {
        let now = Instant::now();
        let mut s = InterruptSession::new(Mode::Good, fixed(3_000));
        s.type_text(now, "draft");

        assert_eq!(
            s.poll(now + secs(3)),
            Some(InterruptEvent::TrapFired(Interruption::DismissableToast))
        );
        // Toast blocks nothing.
        assert!(s.type_text(now + secs(4), "!").is_none());
        assert_eq!(s.draft(), "draft!");
        s.dismiss_toast();
        assert_eq!(s.draft(), "draft!", "dismissal touches nothing");
    }

    #[test]
    fn modal_ok_discards_the_draft() {
        let now = Instant::now();
        let mut s = InterruptSession::new(Mode::Bad, fixed(1_000));
        s.type_text(now, "precious work");
        s.poll(now + secs(1));

        // Input is blocked while the modal is up.
        s.type_text(now + secs(2), "more");
        assert_eq!(s.draft(), "precious work");

        let event = s.acknowledge_modal(true);
        assert_eq!(event, Some(InterruptEvent::DraftDiscarded(13)));
        assert_eq!(s.draft(), "");
        assert!(s.status().unwrap().contains("discarded"));
    }

    #[test]
    fn modal_cancel_keeps_the_draft() {
        let now = Instant::now();
        let mut s = InterruptSession::new(Mode::Bad, fixed(1_000));
        s.type_text(now, "precious work");
        s.poll(now + secs(1));

        assert!(s.acknowledge_modal(false).is_none());
        assert_eq!(s.draft(), "precious work");
        assert!(s.status().is_none());
    }

    #[test]
    fn cancel_before_deadline_suppresses_the_trap() {
        let now = Instant::now();
        let mut s = InterruptSession::new(Mode::Bad, fixed(5_000));
        s.type_text(now, "x");

        // Cancel at t=2s of the 5s delay.
        assert_eq!(s.cancel_trap(), Some(InterruptEvent::TrapCancelled));
        assert_eq!(s.trap_state(), DeferredState::Cancelled);
        assert!(s.poll(now + secs(10)).is_none(), "cancelled trap never fires");
    }

    #[test]
    fn mode_switch_tears_down_a_pending_trap() {
        let now = Instant::now();
        let mut s = InterruptSession::new(Mode::Bad, fixed(5_000));
        s.type_text(now, "x");

        assert_eq!(s.switch_mode(Mode::Good), Some(InterruptEvent::TrapCancelled));
        assert_eq!(s.mode(), Mode::Good);
        assert_eq!(s.draft(), "");
        assert!(s.poll(now + secs(10)).is_none(), "old trap must not fire");

        // A fresh keystroke arms a fresh trap under the new mode.
        assert!(s.type_text(now + secs(11), "y").is_some());
        assert_eq!(
            s.poll(now + secs(16)),
            Some(InterruptEvent::TrapFired(Interruption::DismissableToast))
        );
    }

    #[test]
    fn captured_mode_wins_over_live_mode() {
        // Arm under Bad, then flip the live mode before the deadline. The
        // interruption must be the one captured at arm time.
        let now = Instant::now();
        let mut s = InterruptSession::new(Mode::Bad, fixed(5_000));
        s.type_text(now, "x");
        s.mode = Mode::Good; // live flip without teardown (the bug the design guards)

        assert_eq!(
            s.poll(now + secs(5)),
            Some(InterruptEvent::TrapFired(Interruption::BlockingModal)),
            "mode is captured at arm time, not re-read at fire time"
        );
    }

    #[test]
    fn trap_rearms_after_toast_dismissal() {
        let now = Instant::now();
        let mut s = InterruptSession::new(Mode::Good, fixed(1_000));
        s.type_text(now, "a");
        s.poll(now + secs(1));
        s.dismiss_toast();

        let event = s.type_text(now + secs(2), "b");
        assert!(matches!(event, Some(InterruptEvent::TrapArmed(_))));
    }
}

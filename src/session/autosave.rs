//! The crash/autosave session: an unstable editor that wipes unsaved work
//! on a fixed countdown.
//!
//! Both modes live under the same simulated crash: every crash interval
//! the text reverts to the last checkpoint. Bad mode only checkpoints on
//! an explicit manual save; good mode checkpoints automatically every
//! autosave interval, bounding the loss window to that interval.

use std::time::Instant;

use crate::core::mode::Mode;
use crate::scheduler::interval::PeriodicTicker;

/// Observable draft-session transitions, in the order they applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DraftEvent {
    /// The autosave ticker checkpointed unsaved changes.
    AutoSaved,
    /// An explicit manual save checkpointed unsaved changes.
    ManualSaved,
    /// The simulated crash rolled the text back, losing this many
    /// characters relative to the pre-crash text.
    Crashed {
        /// Characters of unsaved work wiped by this crash.
        chars_lost: usize,
    },
}

/// One user's editing session under the crash countdown.
pub struct DraftSession {
    mode: Mode,
    text: String,
    checkpoint: String,
    crash_ticker: PeriodicTicker,
    autosave_ticker: Option<PeriodicTicker>,
    crash_count: u32,
    total_chars_lost: usize,
}

impl DraftSession {
    /// Start a session. `autosave_interval` is only honored in good mode.
    #[must_use]
    pub fn new(
        mode: Mode,
        now: Instant,
        crash_interval: std::time::Duration,
        autosave_interval: std::time::Duration,
    ) -> Self {
        let seed = "Draft content...";
        Self {
            mode,
            text: seed.to_string(),
            checkpoint: seed.to_string(),
            crash_ticker: PeriodicTicker::new(crash_interval, now),
            autosave_ticker: (mode == Mode::Good)
                .then(|| PeriodicTicker::new(autosave_interval, now)),
            crash_count: 0,
            total_chars_lost: 0,
        }
    }

    /// Append typed text.
    pub fn type_text(&mut self, text: &str) {
        self.text.push_str(text);
    }

    /// Checkpoint now, regardless of mode. Does not reset the crash
    /// countdown.
    pub fn manual_save(&mut self) -> Option<DraftEvent> {
        if self.text == self.checkpoint {
            return None;
        }
        self.checkpoint = self.text.clone();
        Some(DraftEvent::ManualSaved)
    }

    /// Advance the session clock, applying every elapsed autosave and
    /// crash tick. Autosave applies before a crash in the same poll, so
    /// good mode's loss window is bounded by the autosave interval.
    pub fn poll(&mut self, now: Instant) -> Vec<DraftEvent> {
        let mut events = Vec::new();

        if let Some(ticker) = self.autosave_ticker.as_mut() {
            for _ in 0..ticker.poll(now) {
                if self.text != self.checkpoint {
                    self.checkpoint = self.text.clone();
                    events.push(DraftEvent::AutoSaved);
                }
            }
        }

        for _ in 0..self.crash_ticker.poll(now) {
            let chars_lost = self.text.len().saturating_sub(self.checkpoint.len());
            self.text = self.checkpoint.clone();
            self.crash_count += 1;
            self.total_chars_lost += chars_lost;
            events.push(DraftEvent::Crashed { chars_lost });
        }

        events
    }

    /// Switch modes: resets text, checkpoint, and both countdowns.
    pub fn switch_mode(
        &mut self,
        mode: Mode,
        now: Instant,
        autosave_interval: std::time::Duration,
    ) {
        self.mode = mode;
        let seed = match mode {
            Mode::Bad | Mode::BadV2 => "Type fast! You must hit SAVE manually!",
            Mode::Good => "Relax. Your work is checkpointed for you.",
        };
        self.text = seed.to_string();
        self.checkpoint = seed.to_string();
        self.crash_ticker.reset(now);
        self.autosave_ticker =
            (mode == Mode::Good).then(|| PeriodicTicker::new(autosave_interval, now));
    }

    /// Active mode.
    #[must_use]
    pub const fn mode(&self) -> Mode {
        self.mode
    }

    /// Current text, including unsaved changes.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Last checkpointed text (what a crash reverts to).
    #[must_use]
    pub fn checkpoint(&self) -> &str {
        &self.checkpoint
    }

    /// Characters that would be lost if the crash hit right now.
    #[must_use]
    pub fn at_risk(&self) -> usize {
        self.text.len().saturating_sub(self.checkpoint.len())
    }

    /// Seconds until the next simulated crash.
    #[must_use]
    pub fn crash_remaining(&self, now: Instant) -> std::time::Duration {
        self.crash_ticker.remaining(now)
    }

    /// Crashes survived so far.
    #[must_use]
    pub const fn crash_count(&self) -> u32 {
        self.crash_count
    }

    /// Total characters lost across all crashes.
    #[must_use]
    pub const fn total_chars_lost(&self) -> usize {
        self.total_chars_lost
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn secs(n: u64) -> Duration {
        Duration::from_secs(n)
    }

    fn bad_session(now: Instant) -> DraftSession {
        DraftSession::new(Mode::Bad, now, secs(30), secs(5))
    }

    fn good_session(now: Instant) -> DraftSession {
        DraftSession::new(Mode::Good, now, secs(30), secs(5))
    }

    #[test]
    fn bad_mode_loses_unsaved_work_on_crash() {
        let now = Instant::now();
        let mut s = bad_session(now);
        s.type_text(" plus twelve!");
        assert_eq!(s.at_risk(), 13);

        let events = s.poll(now + secs(30));
        assert_eq!(events, vec![DraftEvent::Crashed { chars_lost: 13 }]);
        assert_eq!(s.text(), "Draft content...");
        assert_eq!(s.total_chars_lost(), 13);
    }

    #[test]
    fn manual_save_checkpoints_before_crash() {
        let now = Instant::now();
        let mut s = bad_session(now);
        s.type_text(" saved part");
        assert_eq!(s.manual_save(), Some(DraftEvent::ManualSaved));
        s.type_text(" unsaved part");

        let events = s.poll(now + secs(30));
        assert_eq!(events, vec![DraftEvent::Crashed { chars_lost: 13 }]);
        assert_eq!(s.text(), "Draft content... saved part");
    }

    #[test]
    fn manual_save_with_no_changes_is_noop() {
        let now = Instant::now();
        let mut s = bad_session(now);
        assert!(s.manual_save().is_none());
    }

    #[test]
    fn good_mode_autosaves_every_interval() {
        let now = Instant::now();
        let mut s = good_session(now);
        s.type_text(" one");

        let events = s.poll(now + secs(5));
        assert_eq!(events, vec![DraftEvent::AutoSaved]);
        assert_eq!(s.checkpoint(), "Draft content... one");
        assert_eq!(s.at_risk(), 0);
    }

    #[test]
    fn autosave_applies_before_crash_in_same_poll() {
        let now = Instant::now();
        let mut s = good_session(now);
        s.type_text(" everything typed before the crash window");

        // Jump straight to the crash boundary: the elapsed autosave ticks
        // checkpoint first, so the crash wipes nothing.
        let events = s.poll(now + secs(30));
        assert_eq!(
            events,
            vec![DraftEvent::AutoSaved, DraftEvent::Crashed { chars_lost: 0 }]
        );
        assert!(s.text().ends_with("before the crash window"));
        assert_eq!(s.total_chars_lost(), 0);
    }

    #[test]
    fn idle_autosave_ticks_emit_nothing() {
        let now = Instant::now();
        let mut s = good_session(now);
        // Nothing typed: autosave ticks have nothing to checkpoint.
        let events = s.poll(now + secs(10));
        assert!(events.is_empty());
    }

    #[test]
    fn bad_mode_has_no_autosave() {
        let now = Instant::now();
        let mut s = bad_session(now);
        s.type_text(" doomed");
        let events = s.poll(now + secs(25));
        assert!(events.is_empty(), "no autosave, no crash yet");
        assert_eq!(s.at_risk(), 7);
    }

    #[test]
    fn crash_counter_accumulates_across_polls() {
        let now = Instant::now();
        let mut s = bad_session(now);
        s.poll(now + secs(30));
        s.poll(now + secs(60));
        s.poll(now + secs(95));
        assert_eq!(s.crash_count(), 3);
    }

    #[test]
    fn mode_switch_resets_state_and_countdowns() {
        let now = Instant::now();
        let mut s = bad_session(now);
        s.type_text(" junk");
        s.poll(now + secs(30));

        s.switch_mode(Mode::Good, now + secs(31), secs(5));
        assert_eq!(s.mode(), Mode::Good);
        assert_eq!(s.at_risk(), 0);
        // Crash countdown restarted from the switch instant.
        assert_eq!(s.crash_remaining(now + secs(31)), secs(30));
    }
}

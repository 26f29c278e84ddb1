//! The interrupt trap on a virtual clock: same keystrokes, both modes.
//!
//! Run with: `cargo run --example interrupt_trap`

use std::time::{Duration, Instant};

use friction_lab::prelude::*;

fn drive(mode: Mode) {
    println!("── {} mode ──", mode.label());
    let start = Instant::now();
    let mut session = InterruptSession::new(mode, DelayRange::fixed(Duration::from_secs(4)));

    session.type_text(start, "An important draft");
    println!("typed 18 chars; trap armed");

    // Advance a virtual clock one second at a time.
    for second in 1..=6 {
        let now = start + Duration::from_secs(second);
        if let Some(InterruptEvent::TrapFired(kind)) = session.poll(now) {
            match kind {
                Interruption::BlockingModal => {
                    println!("t+{second}s  blocking modal fired; input frozen");
                    if let Some(InterruptEvent::DraftDiscarded(lost)) =
                        session.acknowledge_modal(true)
                    {
                        println!("       OK pressed: {lost} chars discarded");
                    }
                }
                Interruption::DismissableToast => {
                    println!("t+{second}s  toast fired; typing continues");
                    session.type_text(now, " survives");
                    session.dismiss_toast();
                }
            }
        }
    }

    println!("draft after the dust settles: {:?}\n", session.draft());
}

fn main() {
    drive(Mode::Bad);
    drive(Mode::Good);
}

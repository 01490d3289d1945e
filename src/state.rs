//! Shared signal state
//!
//! The whole record (phase, countdown, color, mode) lives in a single 32-bit
//! atomic word. Readers get a coherent [`Snapshot`] from one load; writers
//! apply a pure update with a compare-and-swap loop, so the countdown task is
//! never held up behind a lower-priority task. On the RP2040 the CAS is
//! provided by `portable-atomic` through a critical section a few
//! instructions long.
//!
//! Field ownership: only the countdown driver and the mode toggle write
//! `phase`/`countdown`/`color`, and only the mode toggle writes `mode`.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;
use portable_atomic::{AtomicU32, Ordering};

use crate::types::{Mode, Snapshot};

/// Process-wide signal state shared by every task
pub static SIGNAL_STATE: SignalState = SignalState::new();

pub struct SignalState {
    word: AtomicU32,
    changed: Signal<CriticalSectionRawMutex, ()>,
}

impl SignalState {
    /// Power-on state: GREEN, countdown 9, green, day mode
    pub const fn new() -> Self {
        Self::with(Snapshot::initial())
    }

    pub const fn with(snapshot: Snapshot) -> Self {
        Self {
            word: AtomicU32::new(snapshot.pack()),
            changed: Signal::new(),
        }
    }

    /// Current state as one consistent record
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::unpack(self.word.load(Ordering::Acquire))
    }

    pub fn mode(&self) -> Mode {
        self.snapshot().mode
    }

    /// Atomically replace the state with `f(current)`
    ///
    /// Returns the previous and the new snapshot. Waiters are only woken when
    /// something actually changed.
    pub fn update<F>(&self, mut f: F) -> (Snapshot, Snapshot)
    where
        F: FnMut(Snapshot) -> Snapshot,
    {
        let previous = match self.word.fetch_update(Ordering::AcqRel, Ordering::Acquire, |word| {
            Some(f(Snapshot::unpack(word)).pack())
        }) {
            Ok(word) | Err(word) => Snapshot::unpack(word),
        };
        let current = f(previous);
        if current != previous {
            self.changed.signal(());
        }
        (previous, current)
    }

    /// Resolves the next time any field changes
    ///
    /// Only one task may wait at a time; the indicator task owns this.
    pub async fn wait_changed(&self) {
        self.changed.wait().await
    }

    /// Whether a change is pending that `wait_changed` has not consumed yet
    pub fn change_pending(&self) -> bool {
        self.changed.signaled()
    }
}

impl Default for SignalState {
    fn default() -> Self {
        Self::new()
    }
}

//! Scheduled event queue.
//!
//! Deferred gameplay effects (respawns) are armed with a deadline in
//! simulation time and released by [`EventQueue::drain_due`], which the frame
//! driver calls once per step. Nothing here reads the wall clock.

use crate::game::types::PlayerId;

/// A deferred effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduledEvent {
    Respawn { player: PlayerId },
}

#[derive(Debug, Clone, Copy)]
struct Pending {
    fire_at: f32,
    seq: u64,
    event: ScheduledEvent,
}

/// Time-ordered queue of [`ScheduledEvent`]s.
#[derive(Debug, Clone, Default)]
pub struct EventQueue {
    pending: Vec<Pending>,
    next_seq: u64,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arms `event` to fire once simulation time reaches `fire_at`.
    pub fn schedule(&mut self, fire_at: f32, event: ScheduledEvent) {
        self.pending.push(Pending {
            fire_at,
            seq: self.next_seq,
            event,
        });
        self.next_seq += 1;
    }

    /// Removes and returns every event with `fire_at <= now`.
    ///
    /// Events come out in deadline order; equal deadlines keep the order
    /// they were scheduled in.
    pub fn drain_due(&mut self, now: f32) -> Vec<ScheduledEvent> {
        let (mut due, rest): (Vec<Pending>, Vec<Pending>) =
            self.pending.drain(..).partition(|p| p.fire_at <= now);
        self.pending = rest;
        due.sort_by(|a, b| a.fire_at.total_cmp(&b.fire_at).then(a.seq.cmp(&b.seq)));
        due.into_iter().map(|p| p.event).collect()
    }

    /// True if `event` is waiting to fire.
    pub fn contains(&self, event: &ScheduledEvent) -> bool {
        self.pending.iter().any(|p| p.event == *event)
    }

    /// Number of events waiting to fire.
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }
}

// Deferred effects: small state changes that land a fixed time after the
// action that caused them (flash clears, end of a guard window, delayed
// knockback).
//
// Entries are drained by the frame tick in timestamp order and applied to the
// character that occupies the slot at fire time. Two guards keep stale
// entries away from the wrong character:
// - the session epoch, bumped whenever a match is started, reset or the
//   player's class changes
// - the character instance number captured at scheduling time

use log::trace;

use super::characters::{Character, CharacterInstance, CharacterState, Side};

/// State change applied when a deferred entry fires
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DeferredEffect {
    /// End the hit/heal/shield flash
    ClearFlash,
    /// End a teleport's invulnerability
    ClearInvulnerable,
    /// End a defense skill's guard window
    EndDefenseWindow,
    /// Drop whatever is left of a divine shield
    ExpireShield,
    /// Delayed shove from a windup attack
    KnockBack { vx: f32 },
}

/// Who an effect produced by an action lands on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recipient {
    /// The character that acted
    Actor,
    /// Its opponent
    Target,
}

/// An effect requested by an action, relative to that action
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Deferred {
    pub delay_ms: f32,
    pub recipient: Recipient,
    pub effect: DeferredEffect,
}

impl Deferred {
    pub fn on_actor(delay_ms: f32, effect: DeferredEffect) -> Self {
        Self {
            delay_ms,
            recipient: Recipient::Actor,
            effect,
        }
    }

    pub fn on_target(delay_ms: f32, effect: DeferredEffect) -> Self {
        Self {
            delay_ms,
            recipient: Recipient::Target,
            effect,
        }
    }

    /// Resolve the recipient against the side that acted
    pub fn side_for(&self, actor: Side) -> Side {
        match self.recipient {
            Recipient::Actor => actor,
            Recipient::Target => actor.opponent(),
        }
    }
}

/// A queued effect with everything needed to validate it at fire time
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScheduledEffect {
    pub fire_at_ms: f32,
    pub sequence: u64,
    pub epoch: u64,
    pub side: Side,
    pub instance: CharacterInstance,
    pub effect: DeferredEffect,
}

/// Time-ordered queue of deferred effects
#[derive(Debug, Default)]
pub struct EffectScheduler {
    queue: Vec<ScheduledEffect>,
    next_sequence: u64,
    epoch: u64,
}

impl EffectScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Invalidate everything scheduled so far
    pub fn advance_epoch(&mut self) {
        self.epoch += 1;
    }

    /// Number of entries still waiting (stale ones included)
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Queue `effect` for the character currently in `side`'s slot
    pub fn schedule(
        &mut self,
        now: f32,
        delay_ms: f32,
        side: Side,
        instance: CharacterInstance,
        effect: DeferredEffect,
    ) {
        let sequence = self.next_sequence;
        self.next_sequence += 1;
        self.queue.push(ScheduledEffect {
            fire_at_ms: now + delay_ms,
            sequence,
            epoch: self.epoch,
            side,
            instance,
            effect,
        });
    }

    /// Remove and return every entry due at `now`, oldest first.
    ///
    /// Entries from an earlier epoch are dropped here and never returned.
    pub fn drain_due(&mut self, now: f32) -> Vec<ScheduledEffect> {
        let (mut due, pending): (Vec<_>, Vec<_>) = self
            .queue
            .drain(..)
            .partition(|entry| entry.fire_at_ms <= now);
        self.queue = pending;

        let epoch = self.epoch;
        due.retain(|entry| {
            let current = entry.epoch == epoch;
            if !current {
                trace!(
                    "dropping stale {:?} for {} (epoch {} != {})",
                    entry.effect,
                    entry.side,
                    entry.epoch,
                    epoch
                );
            }
            current
        });
        due.sort_by(|a, b| {
            a.fire_at_ms
                .total_cmp(&b.fire_at_ms)
                .then(a.sequence.cmp(&b.sequence))
        });
        due
    }
}

/// Apply a deferred effect to the character as it is now
pub fn apply_effect(character: &Character, effect: DeferredEffect) -> Character {
    let mut next = character.clone();
    // A knockdown owns the invulnerability until the character is back up
    let knocked_down = matches!(
        character.state,
        CharacterState::Fallen | CharacterState::Recovering
    );

    match effect {
        DeferredEffect::ClearFlash => next.is_flashing = false,
        DeferredEffect::ClearInvulnerable => {
            if !knocked_down {
                next.invulnerable = false;
            }
        }
        DeferredEffect::EndDefenseWindow => {
            next.is_defending = false;
            if !knocked_down {
                next.invulnerable = false;
            }
            if next.state == CharacterState::Defending {
                next.state = CharacterState::Idle;
            }
        }
        DeferredEffect::ExpireShield => {
            if next.shield > 0.0 {
                next.shield = 0.0;
                next.shield_duration = 0.0;
            }
        }
        DeferredEffect::KnockBack { vx } => next.velocity.x = vx,
    }
    next
}

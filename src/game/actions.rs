// Commands the player (or the enemy brain) can issue.
//
// Every command checks its preconditions first. A refused command leaves both
// fighters untouched and only logs why.

use log::debug;

use super::characters::{Character, CharacterState, Facing, Side};
use super::combat::attacks::{BASIC_ATTACK_COOLDOWN_MS, SPECIAL_ATTACK_COOLDOWN_MS};
use super::combat::{activate, basic_attack, special_attack, AttackOutcome};
use super::error::Refusal;
use super::events::SoundCue;
use super::session::{Game, GamePhase};

fn log_refusal(side: Side, action: &str, result: Result<(), Refusal>) {
    if let Err(reason) = result {
        debug!("{} {} refused: {}", side, action, reason);
    }
}

fn check_able(character: &Character) -> Result<(), Refusal> {
    if character.state.is_incapacitated() {
        return Err(Refusal::Incapacitated(character.state));
    }
    Ok(())
}

fn check_can_attack(character: &Character) -> Result<(), Refusal> {
    check_able(character)?;
    if character.state == CharacterState::Attacking {
        return Err(Refusal::Busy(character.state));
    }
    Ok(())
}

fn check_attack_cooldown(character: &Character, cooldown_ms: f32, now: f32) -> Result<(), Refusal> {
    match character.since_last_attack(now) {
        Some(elapsed) if elapsed < cooldown_ms => Err(Refusal::OnCooldown {
            remaining_ms: cooldown_ms - elapsed,
        }),
        _ => Ok(()),
    }
}

impl Game {
    fn require_fighting(&self) -> Result<(), Refusal> {
        if self.phase != GamePhase::Fighting {
            return Err(Refusal::NotFighting);
        }
        Ok(())
    }

    /// Write an attack's result back into both slots
    fn land(&mut self, side: Side, outcome: AttackOutcome) {
        if outcome.connected {
            self.cues.push(SoundCue::Hit);
        }
        *self.character_mut(side) = outcome.attacker;
        *self.character_mut(side.opponent()) = outcome.defender;
        self.schedule(side, &outcome.deferred);
    }

    /// Face `facing`; idle or running characters start running
    pub fn move_character(&mut self, side: Side, facing: Facing) {
        let result = self.try_move(side, facing);
        log_refusal(side, "move", result);
    }

    fn try_move(&mut self, side: Side, facing: Facing) -> Result<(), Refusal> {
        self.require_fighting()?;
        let character = self.character_mut(side);
        check_able(character)?;

        character.direction = facing;
        if character.state.accepts_run() {
            character.state = CharacterState::Running;
        }
        Ok(())
    }

    /// Horizontal input released
    pub fn stop_character(&mut self, side: Side) {
        let result = self.try_stop(side);
        log_refusal(side, "stop", result);
    }

    fn try_stop(&mut self, side: Side) -> Result<(), Refusal> {
        self.require_fighting()?;
        let character = self.character_mut(side);
        if character.state == CharacterState::Running {
            character.state = CharacterState::Idle;
        }
        Ok(())
    }

    pub fn jump(&mut self, side: Side) {
        let result = self.try_jump(side);
        log_refusal(side, "jump", result);
    }

    fn try_jump(&mut self, side: Side) -> Result<(), Refusal> {
        self.require_fighting()?;
        let jump_velocity = self.config.jump_velocity;
        let character = self.character_mut(side);
        check_able(character)?;
        if !character.is_grounded() {
            return Err(Refusal::Airborne);
        }

        character.velocity.y = jump_velocity;
        character.state = CharacterState::Jumping;
        Ok(())
    }

    /// Raise (`true`) or lower (`false`) the guard
    pub fn defend(&mut self, side: Side, is_defending: bool) {
        let result = self.try_defend(side, is_defending);
        log_refusal(side, "defend", result);
    }

    fn try_defend(&mut self, side: Side, is_defending: bool) -> Result<(), Refusal> {
        self.require_fighting()?;
        let character = self.character_mut(side);
        check_able(character)?;
        if is_defending && character.is_stamina_depleted {
            return Err(Refusal::StaminaDepleted);
        }

        character.is_defending = is_defending;
        if is_defending {
            character.state = CharacterState::Defending;
        } else if character.state == CharacterState::Defending {
            character.state = CharacterState::Idle;
        }
        Ok(())
    }

    pub fn basic_attack(&mut self, side: Side) {
        let result = self.try_basic_attack(side);
        log_refusal(side, "basic attack", result);
    }

    fn try_basic_attack(&mut self, side: Side) -> Result<(), Refusal> {
        self.require_fighting()?;
        let now = self.now_ms();
        let attacker = self.character(side);
        check_can_attack(attacker)?;
        check_attack_cooldown(attacker, BASIC_ATTACK_COOLDOWN_MS, now)?;

        let outcome = basic_attack(attacker, self.character(side.opponent()), now);
        self.land(side, outcome);
        Ok(())
    }

    pub fn special_attack(&mut self, side: Side) {
        let result = self.try_special_attack(side);
        log_refusal(side, "special attack", result);
    }

    fn try_special_attack(&mut self, side: Side) -> Result<(), Refusal> {
        self.require_fighting()?;
        let now = self.now_ms();
        let attacker = self.character(side);
        check_can_attack(attacker)?;
        check_attack_cooldown(attacker, SPECIAL_ATTACK_COOLDOWN_MS, now)?;

        let outcome = special_attack(attacker, self.character(side.opponent()), now);
        self.land(side, outcome);
        Ok(())
    }

    /// Use the skill with `id` (1 to 5)
    pub fn use_skill(&mut self, side: Side, id: u8) {
        let result = self.try_use_skill(side, id);
        log_refusal(side, "skill", result);
    }

    fn try_use_skill(&mut self, side: Side, id: u8) -> Result<(), Refusal> {
        self.require_fighting()?;
        let now = self.now_ms();
        let caster = self.character(side);
        check_can_attack(caster)?;
        if caster.is_defending {
            return Err(Refusal::Defending);
        }
        let index = caster.skill_index(id).ok_or(Refusal::UnknownSkill(id))?;
        let skill = &caster.skills[index];
        if !skill.is_ready(now) {
            return Err(Refusal::OnCooldown {
                remaining_ms: skill.cooldown_remaining(now),
            });
        }

        debug!("{} uses {}", side, skill.name);
        let outcome = activate(caster, self.character(side.opponent()), index, now);
        self.land(side, outcome);
        Ok(())
    }
}

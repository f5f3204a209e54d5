// Game session: owns both fighters and drives a frame of simulation.
//
// A frame drains due deferred effects, steps physics for both characters,
// lets the enemy brain act through the regular commands and finally checks
// whether somebody has won.

use glam::Vec3;
use log::{debug, info, trace};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use super::ai::{AiPlan, Decision, EnemyBrain};
use super::characters::{
    Character, CharacterClass, CharacterInstance, CharacterState, CharacterType, Side,
    CHARACTER_CLASSES,
};
use super::config::{default_platforms, ArenaConfig};
use super::events::{SoundCue, SoundCues};
use super::scheduler::{apply_effect, Deferred, EffectScheduler};
use super::update::{step_pair, TickContext};
use crate::engine::physics::Platform;

/// Phase of the match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GamePhase {
    /// Character selection, nothing simulates
    #[default]
    Menu,
    Fighting,
    /// Reserved for multi-round matches
    RoundEnd,
    MatchEnd,
}

/// One duel between the player and the enemy
#[derive(Debug)]
pub struct Game {
    pub(super) phase: GamePhase,
    pub(super) player: Character,
    pub(super) enemy: Character,
    pub(super) platforms: Vec<Platform>,
    pub(super) config: ArenaConfig,
    /// Seconds of simulated fighting
    pub(super) elapsed_time: f32,
    pub(super) winner: Option<Side>,
    pub(super) selected_character: CharacterType,
    pub(super) scheduler: EffectScheduler,
    pub(super) brain: EnemyBrain,
    pub(super) rng: StdRng,
    pub(super) cues: SoundCues,
    next_instance: CharacterInstance,
}

impl Game {
    /// Default arena with an entropy-seeded random source
    pub fn new() -> Self {
        Self::with_layout(ArenaConfig::DEFAULT, default_platforms(), StdRng::from_entropy())
    }

    /// Default arena with a reproducible random source
    pub fn with_seed(seed: u64) -> Self {
        Self::with_layout(ArenaConfig::DEFAULT, default_platforms(), StdRng::seed_from_u64(seed))
    }

    pub fn with_layout(config: ArenaConfig, platforms: Vec<Platform>, rng: StdRng) -> Self {
        Self {
            phase: GamePhase::Menu,
            player: Character::from_class(
                Side::Player,
                CharacterType::Warrior.class(),
                config.player_spawn,
                0,
            ),
            enemy: Character::from_class(
                Side::Enemy,
                CharacterType::Mage.class(),
                config.enemy_spawn,
                1,
            ),
            platforms,
            config,
            elapsed_time: 0.0,
            winner: None,
            selected_character: CharacterType::Warrior,
            scheduler: EffectScheduler::new(),
            brain: EnemyBrain::new(),
            rng,
            cues: SoundCues::new(),
            next_instance: 2,
        }
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn player(&self) -> &Character {
        &self.player
    }

    pub fn enemy(&self) -> &Character {
        &self.enemy
    }

    pub fn character(&self, side: Side) -> &Character {
        match side {
            Side::Player => &self.player,
            Side::Enemy => &self.enemy,
        }
    }

    pub(super) fn character_mut(&mut self, side: Side) -> &mut Character {
        match side {
            Side::Player => &mut self.player,
            Side::Enemy => &mut self.enemy,
        }
    }

    pub fn platforms(&self) -> &[Platform] {
        &self.platforms
    }

    pub fn config(&self) -> &ArenaConfig {
        &self.config
    }

    pub fn winner(&self) -> Option<Side> {
        self.winner
    }

    pub fn available_characters(&self) -> &'static [CharacterClass] {
        &CHARACTER_CLASSES
    }

    pub fn selected_character(&self) -> CharacterType {
        self.selected_character
    }

    pub fn gravity(&self) -> f32 {
        self.config.gravity
    }

    /// Seconds of simulated fighting since the session was built
    pub fn elapsed_time(&self) -> f32 {
        self.elapsed_time
    }

    /// Simulation clock used for cooldowns and scheduling
    pub fn now_ms(&self) -> f32 {
        self.elapsed_time * 1000.0
    }

    /// Milliseconds until `side` can use skill `id` again
    pub fn skill_cooldown_remaining(&self, side: Side, id: u8) -> Option<f32> {
        let now = self.now_ms();
        self.character(side)
            .skill(id)
            .map(|skill| skill.cooldown_remaining(now))
    }

    /// Take every sound cue raised since the last call
    pub fn drain_sound_cues(&mut self) -> Vec<SoundCue> {
        self.cues.drain()
    }

    fn build(&mut self, side: Side, class: CharacterType) -> Character {
        let spawn = spawn_point(&self.config, side);
        let instance = self.next_instance;
        self.next_instance += 1;
        Character::from_class(side, class.class(), spawn, instance)
    }

    fn random_class(&mut self) -> CharacterType {
        CharacterType::ALL
            .choose(&mut self.rng)
            .copied()
            .unwrap_or(CharacterType::Warrior)
    }

    /// Fresh fighters for both slots; anything still scheduled goes stale
    fn rebuild_fighters(&mut self) {
        self.scheduler.advance_epoch();
        let player_class = self.selected_character;
        self.player = self.build(Side::Player, player_class);
        let enemy_class = self.random_class();
        self.enemy = self.build(Side::Enemy, enemy_class);
        self.brain.reset();
        self.winner = None;
    }

    pub fn start_game(&mut self) {
        self.rebuild_fighters();
        self.phase = GamePhase::Fighting;
        info!(
            "match started: {} vs {}",
            self.player.class, self.enemy.class
        );
    }

    /// Back to the menu with fresh fighters
    pub fn reset_game(&mut self) {
        self.rebuild_fighters();
        self.phase = GamePhase::Menu;
        info!("game reset");
    }

    /// Swap the player's class; pending effects for the old fighter go stale
    /// through its instance number, the enemy's still fire
    pub fn select_character(&mut self, class: CharacterType) {
        self.selected_character = class;
        self.player = self.build(Side::Player, class);
        info!("player selected {}", class);
    }

    /// Queue deferred effects produced by an action of `actor`
    pub(super) fn schedule(&mut self, actor: Side, deferred: &[Deferred]) {
        let now = self.now_ms();
        for entry in deferred {
            let side = entry.side_for(actor);
            let instance = self.character(side).instance;
            self.scheduler
                .schedule(now, entry.delay_ms, side, instance, entry.effect);
        }
    }

    fn run_due_effects(&mut self) {
        let now = self.now_ms();
        for entry in self.scheduler.drain_due(now) {
            let slot = self.character_mut(entry.side);
            if slot.instance != entry.instance {
                trace!(
                    "dropping {:?} for replaced {} character",
                    entry.effect,
                    entry.side
                );
                continue;
            }
            trace!("applying {:?} to {}", entry.effect, entry.side);
            *slot = apply_effect(slot, entry.effect);
        }
    }

    fn execute_plan(&mut self, plan: AiPlan) {
        self.enemy.direction = plan.facing;
        match plan.decision {
            Decision::BasicAttack => self.basic_attack(Side::Enemy),
            Decision::SpecialAttack => self.special_attack(Side::Enemy),
            Decision::UseSkill(id) => self.use_skill(Side::Enemy, id),
            Decision::Jump => self.jump(Side::Enemy),
            Decision::Run => self.enemy.state = CharacterState::Running,
            Decision::Idle => self.enemy.state = CharacterState::Idle,
        }
    }

    fn check_for_winner(&mut self) {
        let winner = if self.player.health <= 0.0 {
            Side::Enemy
        } else if self.enemy.health <= 0.0 {
            Side::Player
        } else {
            return;
        };

        self.phase = GamePhase::MatchEnd;
        self.winner = Some(winner);
        self.cues.push(SoundCue::Success);
        info!("match over: {} wins", winner);
    }

    /// Advance the match by `dt` seconds
    pub fn update_game_state(&mut self, dt: f32) {
        if self.phase != GamePhase::Fighting {
            return;
        }

        self.elapsed_time += dt;
        self.run_due_effects();

        let now_ms = self.now_ms();
        let tick = {
            let ctx = TickContext {
                dt,
                now_ms,
                platforms: &self.platforms,
                config: &self.config,
            };
            step_pair(&self.player, &self.enemy, &ctx)
        };

        self.player = tick.player.character;
        self.enemy = tick.enemy.character;
        self.schedule(Side::Player, &tick.player.deferred);
        self.schedule(Side::Enemy, &tick.enemy.deferred);

        if tick.clinch_break {
            debug!("clinch broken at {:.0} ms", now_ms);
            self.cues.push(SoundCue::Hit);
        }

        let plan = self
            .brain
            .think(dt * 1000.0, &self.enemy, &self.player, now_ms, &mut self.rng);
        if let Some(plan) = plan {
            self.execute_plan(plan);
        }

        self.check_for_winner();
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

/// Spawn point a side starts from
pub fn spawn_point(config: &ArenaConfig, side: Side) -> Vec3 {
    match side {
        Side::Player => config.player_spawn,
        Side::Enemy => config.enemy_spawn,
    }
}

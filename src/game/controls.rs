// Player controls: held and edge input turned into commands once per frame

use super::characters::{Facing, Side};
use super::session::{Game, GamePhase};
use crate::engine::input::{Control, ControlState};

/// Issue the player's commands for this frame.
///
/// Arrows steer while held, jump fires whenever the fighter is on the ground
/// and the key is held, the guard follows the defense key's edges and attacks
/// and skills fire on the press edge.
pub fn apply_player_controls(game: &mut Game, controls: &ControlState) {
    if game.phase() != GamePhase::Fighting {
        return;
    }
    if game.player().state.is_incapacitated() {
        return;
    }

    match controls.horizontal() {
        -1 => game.move_character(Side::Player, Facing::Left),
        1 => game.move_character(Side::Player, Facing::Right),
        _ => game.stop_character(Side::Player),
    }

    if controls.is_pressed(Control::Jump) && game.player().is_grounded() {
        game.jump(Side::Player);
    }

    if controls.just_pressed(Control::Defense) {
        game.defend(Side::Player, true);
    } else if controls.just_released(Control::Defense) {
        game.defend(Side::Player, false);
    }

    if controls.just_pressed(Control::Attack) {
        game.basic_attack(Side::Player);
    }
    if controls.just_pressed(Control::SpecialAttack) {
        game.special_attack(Side::Player);
    }

    for control in Control::SKILLS {
        if let Some(id) = control.skill_id().filter(|_| controls.just_pressed(control)) {
            game.use_skill(Side::Player, id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::characters::CharacterState;
    use approx::assert_relative_eq;

    fn fighting() -> Game {
        let mut game = Game::with_seed(8);
        game.start_game();
        game.enemy.position.x = 8.0;
        game.enemy.state = CharacterState::Stunned;
        game.enemy.stun_timer = 60_000.0;
        game
    }

    #[test]
    fn test_arrows_steer_and_release_stops() {
        let mut game = fighting();
        let mut controls = ControlState::new();
        controls.press(Control::Left);
        apply_player_controls(&mut game, &controls);
        assert_eq!(game.player().direction, Facing::Left);
        assert_eq!(game.player().state, CharacterState::Running);

        controls.release(Control::Left);
        apply_player_controls(&mut game, &controls);
        assert_eq!(game.player().state, CharacterState::Idle);
    }

    #[test]
    fn test_held_jump_only_from_ground() {
        let mut game = fighting();
        let mut controls = ControlState::new();
        controls.press(Control::Jump);
        apply_player_controls(&mut game, &controls);
        assert_relative_eq!(game.player().velocity.y, 10.0);

        game.player.velocity.y = 4.0;
        apply_player_controls(&mut game, &controls);
        assert_relative_eq!(game.player().velocity.y, 4.0);
    }

    #[test]
    fn test_guard_follows_key_edges() {
        let mut game = fighting();
        let mut controls = ControlState::new();
        controls.press(Control::Defense);
        apply_player_controls(&mut game, &controls);
        assert!(game.player().is_defending);

        controls.end_frame();
        apply_player_controls(&mut game, &controls);
        assert!(game.player().is_defending);

        controls.release(Control::Defense);
        apply_player_controls(&mut game, &controls);
        assert!(!game.player().is_defending);
    }

    #[test]
    fn test_skill_fires_once_per_press() {
        let mut game = fighting();
        let mut controls = ControlState::new();
        controls.press(Control::Skill2);
        apply_player_controls(&mut game, &controls);
        let used = game.player().skills[1].last_used;
        assert!(used.is_some());

        controls.end_frame();
        apply_player_controls(&mut game, &controls);
        assert_eq!(game.player().skills[1].last_used, used);
    }

    #[test]
    fn test_nothing_happens_in_menu() {
        let mut game = Game::with_seed(8);
        let mut controls = ControlState::new();
        controls.press(Control::Right);
        apply_player_controls(&mut game, &controls);
        assert_eq!(game.player().state, CharacterState::Idle);
    }
}

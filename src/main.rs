use anyhow::Result;
use arena_duel::engine::frame_clock::FrameClock;
use arena_duel::engine::input::InputManager;
use arena_duel::game::characters::CharacterType;
use arena_duel::game::controls::apply_player_controls;
use arena_duel::game::{Game, GamePhase};
use log::{debug, info};
use winit::{
    event::{ElementState, Event, KeyEvent, WindowEvent},
    event_loop::EventLoop,
    keyboard::{KeyCode, PhysicalKey},
    window::WindowBuilder,
};

/// Keys handled outside the fighter's controls
fn handle_meta_key(game: &mut Game, clock: &mut FrameClock, key: KeyCode) {
    let menu_pick = match key {
        KeyCode::Digit1 => Some(0),
        KeyCode::Digit2 => Some(1),
        KeyCode::Digit3 => Some(2),
        KeyCode::Digit4 => Some(3),
        _ => None,
    };

    match (game.phase(), key) {
        (GamePhase::Menu | GamePhase::MatchEnd, KeyCode::Enter) => game.start_game(),
        (_, KeyCode::KeyR) => game.reset_game(),
        (_, KeyCode::KeyP) => clock.toggle_pause(),
        (GamePhase::Menu, _) => {
            if let Some(class) = menu_pick.and_then(|i| CharacterType::ALL.get(i).copied()) {
                game.select_character(class);
            }
        }
        _ => {}
    }
}

fn window_title(game: &Game, fps: f32) -> String {
    let status = match game.phase() {
        GamePhase::Menu => format!(
            "Arena Duel - pick a fighter (1-4), Enter to start [{}]",
            game.selected_character()
        ),
        GamePhase::Fighting | GamePhase::RoundEnd => format!(
            "Arena Duel - {} {:.0}/{:.0} vs {} {:.0}/{:.0}",
            game.player().name,
            game.player().health,
            game.player().max_health,
            game.enemy().name,
            game.enemy().health,
            game.enemy().max_health,
        ),
        GamePhase::MatchEnd => format!(
            "Arena Duel - {} wins! Enter for a rematch, R for the menu",
            game.winner().map_or("nobody", |side| side.as_str())
        ),
    };
    format!("{} ({:.0} fps)", status, fps)
}

fn main() -> Result<()> {
    // Initialize logger
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    info!("Starting Arena Duel...");

    let event_loop = EventLoop::new()?;
    let window = WindowBuilder::new()
        .with_title("Arena Duel")
        .with_inner_size(winit::dpi::LogicalSize::new(1280, 720))
        .with_resizable(true)
        .build(&event_loop)?;

    info!("Window created successfully");

    let mut game = Game::new();
    let mut input = InputManager::default();
    let mut clock = FrameClock::new();
    let mut title = String::new();

    event_loop
        .run(move |event, elwt| match event {
            Event::WindowEvent {
                event: WindowEvent::CloseRequested,
                ..
            } => {
                info!("Close requested, shutting down...");
                elwt.exit();
            }
            Event::WindowEvent {
                event: WindowEvent::Focused(false),
                ..
            } => input.reset(),
            Event::WindowEvent {
                event: WindowEvent::KeyboardInput { event, .. },
                ..
            } => {
                input.process_keyboard_event(&event);
                if let KeyEvent {
                    physical_key: PhysicalKey::Code(key),
                    state: ElementState::Pressed,
                    repeat: false,
                    ..
                } = event
                {
                    if key == KeyCode::Escape {
                        elwt.exit();
                    } else {
                        handle_meta_key(&mut game, &mut clock, key);
                    }
                }
            }
            Event::AboutToWait => {
                let dt = clock.begin_frame();
                if dt > 0.0 {
                    apply_player_controls(&mut game, input.state());
                    game.update_game_state(dt);
                }
                input.end_frame();

                for cue in game.drain_sound_cues() {
                    debug!("sound cue: {:?}", cue);
                }

                let next_title = window_title(&game, clock.fps());
                if next_title != title {
                    window.set_title(&next_title);
                    title = next_title;
                }
                window.request_redraw();
            }
            _ => {}
        })
        .map_err(|e| anyhow::anyhow!("Event loop error: {}", e))?;

    Ok(())
}

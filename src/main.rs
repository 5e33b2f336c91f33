use sdl2::event::Event;
use sdl2::keyboard::Keycode;
use sdl2::pixels::Color;
use std::path::PathBuf;

mod gui;
mod l10n;
mod modes;
mod settings;
mod state;
mod text;
mod world;

use gui::{
    capture_jpeg, DialogMode, MainMenu, MainMenuAction, PendingThumbnail, SaveGameDialog,
    ScreenshotCache,
};
use l10n::Localization;
use modes::{UiMode, WindowManager};
use settings::Settings;
use state::{GameTime, SessionState, Signature, StateManager};
use text::draw_text;
use world::Calendar;

// Game resolution constants
const GAME_WIDTH: u32 = 800;
const GAME_HEIGHT: u32 = 450;

/// Saves live under the platform data directory; falls back to a relative
/// directory when none exists (odd, but possible on stripped-down systems).
fn saves_root() -> PathBuf {
    dirs::data_dir()
        .map(|dir| dir.join("emberwood").join("saves"))
        .unwrap_or_else(|| PathBuf::from("saves"))
}

/// Calculate the best window scale based on monitor size
fn calculate_window_scale(video_subsystem: &sdl2::VideoSubsystem) -> u32 {
    match video_subsystem.desktop_display_mode(0) {
        Ok(display_mode) => {
            // Leave 10% margin for taskbars/decorations
            let usable_w = (display_mode.w as f32 * 0.9) as i32;
            let usable_h = (display_mode.h as f32 * 0.9) as i32;

            let scale = (usable_w / GAME_WIDTH as i32).min(usable_h / GAME_HEIGHT as i32);
            scale.clamp(1, 4) as u32
        }
        Err(_) => {
            log::warn!("could not detect monitor size, using 1x scale");
            1
        }
    }
}

/// Placeholder gameplay scene plus the session HUD line.
fn render_scene(
    canvas: &mut sdl2::render::Canvas<sdl2::video::Window>,
    state_manager: &StateManager,
    world: &Calendar,
) -> Result<(), String> {
    canvas.set_draw_color(Color::RGB(18, 30, 24));
    canvas.clear();

    if let Some(session) = state_manager.session() {
        let hud = format!(
            "{} - {} {} - {}",
            session.player.player_name,
            session.clock.day,
            world.month_name(session.clock.month),
            session.cell_name
        );
        draw_text(canvas, &hud, 12, 12, Color::RGB(200, 200, 180), 2)?;
        draw_text(canvas, "ESC MENU", 12, GAME_HEIGHT as i32 - 24, Color::RGB(110, 120, 110), 1)?;
    }

    Ok(())
}

fn main() -> Result<(), String> {
    env_logger::init();

    let settings = Settings::load_or_default();
    let world = Calendar;
    let l10n = Localization::new();
    let mut state_manager = StateManager::new(saves_root()).map_err(|e| e.to_string())?;

    let mut windows = WindowManager::new();
    // Boot straight into the menu; there is no session yet.
    windows.push_mode(UiMode::MainMenu);

    let sdl_context = sdl2::init()?;
    let video_subsystem = sdl_context.video()?;
    let scale = calculate_window_scale(&video_subsystem);

    let window = video_subsystem
        .window("Emberwood", GAME_WIDTH * scale, GAME_HEIGHT * scale)
        .position_centered()
        .build()
        .map_err(|e| e.to_string())?;

    let mut canvas = window
        .into_canvas()
        .present_vsync()
        .build()
        .map_err(|e| e.to_string())?;
    canvas
        .set_logical_size(GAME_WIDTH, GAME_HEIGHT)
        .map_err(|e| e.to_string())?;
    let texture_creator = canvas.texture_creator();

    let mut screenshot_cache = ScreenshotCache::new();
    let mut save_dialog = SaveGameDialog::new();
    let mut main_menu = MainMenu::for_state(state_manager.state());

    // Frame grabbed when the menu opens; embedded in any save made from it.
    let mut menu_capture: Vec<u8> = Vec::new();

    video_subsystem.text_input().start();

    let mut event_pump = sdl_context.event_pump()?;
    'running: loop {
        for event in event_pump.poll_iter() {
            match event {
                Event::Quit { .. } => break 'running,

                Event::TextInput { text, .. } if windows.current() == UiMode::SaveDialog => {
                    for c in text.chars() {
                        save_dialog.input_char(c);
                    }
                }

                Event::KeyDown {
                    keycode: Some(key), ..
                } => match windows.current() {
                    UiMode::Playing => {
                        if key == Keycode::Escape {
                            menu_capture = capture_jpeg(&canvas).unwrap_or_else(|e| {
                                log::warn!("screenshot capture failed: {}", e);
                                Vec::new()
                            });
                            main_menu = MainMenu::for_state(state_manager.state());
                            windows.push_mode(UiMode::MainMenu);
                        }
                    }

                    UiMode::MainMenu => match key {
                        Keycode::Up => main_menu.navigate_up(),
                        Keycode::Down => main_menu.navigate_down(),
                        Keycode::Escape => {
                            if state_manager.state() == SessionState::Running {
                                windows.pop_mode();
                            }
                        }
                        Keycode::Return => match main_menu.selected_action() {
                            MainMenuAction::Resume => windows.pop_mode(),
                            MainMenuAction::NewGame => {
                                state_manager.start_session(
                                    Signature {
                                        player_name: "Mira".to_string(),
                                        player_level: 1,
                                        player_class: "Warden".to_string(),
                                    },
                                    "Emberwood Gate".to_string(),
                                    GameTime { day: 1, month: 0, hour: 8.0 },
                                );
                                windows.clear();
                            }
                            MainMenuAction::SaveGame => {
                                save_dialog.set_mode(DialogMode::Saving, &state_manager);
                                save_dialog.open(&state_manager, &settings);
                                windows.pop_mode();
                                windows.push_mode(UiMode::SaveDialog);
                            }
                            MainMenuAction::LoadGame => {
                                save_dialog.set_mode(DialogMode::Loading, &state_manager);
                                save_dialog.open(&state_manager, &settings);
                                windows.pop_mode();
                                windows.push_mode(UiMode::SaveDialog);
                            }
                            MainMenuAction::QuitToMenu => {
                                state_manager.end_session();
                                main_menu = MainMenu::for_state(SessionState::NoGame);
                            }
                            MainMenuAction::Quit => break 'running,
                        },
                        _ => {}
                    },

                    UiMode::SaveDialog => match key {
                        Keycode::Up => save_dialog.slot_previous(&state_manager, &world, &l10n),
                        Keycode::Down => save_dialog.slot_next(&state_manager, &world, &l10n),
                        Keycode::Left => save_dialog.character_previous(&state_manager),
                        Keycode::Right => save_dialog.character_next(&state_manager),
                        Keycode::Backspace => save_dialog.backspace(),
                        Keycode::Escape => {
                            save_dialog.cancel(&mut windows);
                        }
                        Keycode::Return => {
                            if let Err(e) =
                                save_dialog.confirm(&mut state_manager, &mut windows, &menu_capture)
                            {
                                log::error!("save/load failed: {}", e);
                            }
                            main_menu = MainMenu::for_state(state_manager.state());
                        }
                        _ => {}
                    },
                },

                _ => {}
            }

            // With no session, closing an overlay must land on the menu,
            // not on an empty scene.
            if windows.current() == UiMode::Playing
                && state_manager.state() == SessionState::NoGame
            {
                main_menu = MainMenu::for_state(SessionState::NoGame);
                windows.push_mode(UiMode::MainMenu);
            }
        }

        // Apply any queued thumbnail change before drawing.
        match save_dialog.take_pending_thumbnail() {
            PendingThumbnail::Keep => {}
            PendingThumbnail::Clear => screenshot_cache.clear(),
            PendingThumbnail::Show(jpeg) => {
                if let Err(e) = screenshot_cache.show(&jpeg, &texture_creator) {
                    log::warn!("could not display save screenshot: {}", e);
                    screenshot_cache.clear();
                }
            }
        }

        render_scene(&mut canvas, &state_manager, &world)?;
        match windows.current() {
            UiMode::Playing => {}
            UiMode::MainMenu => main_menu.render(&mut canvas)?,
            UiMode::SaveDialog => save_dialog.render(&mut canvas, &screenshot_cache, &l10n)?,
        }
        canvas.present();
    }

    Ok(())
}

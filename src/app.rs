use std::path::Path;
use std::time::{Duration, Instant};

use glam::UVec2;
use sdl2::event::{Event, WindowEvent};
use sdl2::image::{InitFlag, LoadTexture, Sdl2ImageContext};
use sdl2::keyboard::Keycode;
use sdl2::render::{Canvas, TextureCreator};
use sdl2::video::{Window, WindowContext};
use sdl2::{EventPump, Sdl};
use strum::IntoEnumIterator;
use tracing::{debug, error, info, trace, warn};

use crate::asset::{Asset, TextureCatalog};
use crate::config::GameConfig;
use crate::constants::{LOOP_TIME, WORLD_SIZE};
use crate::error::{AssetError, GameError, GameResult};
use crate::game::Game;
use crate::platform;
use crate::systems::input::{Key, KeyEvent};
use crate::systems::render::{draw_world, TextureStore};

const WINDOW_TITLE: &str = "Hippo Maze";

/// Desktop frontend: owns the SDL window, feeds input into the [`Game`] and draws it.
pub struct App {
    pub game: Game,
    canvas: Canvas<Window>,
    event_pump: EventPump,
    textures: TextureStore,
    last_tick: Instant,
    focused: bool,
    // Keep SDL alive for the app lifetime
    _texture_creator: TextureCreator<WindowContext>,
    _image_context: Sdl2ImageContext,
    _sdl_context: Sdl,
}

impl App {
    /// Opens the window, loads textures from the configured asset directory and sets up
    /// the game.
    ///
    /// # Errors
    ///
    /// Returns `GameError::Sdl` if any SDL initialization step fails. Textures that fail
    /// to load are only logged.
    pub fn new(config: &GameConfig) -> GameResult<Self> {
        info!("Initializing SDL2 application");
        let sdl_context = sdl2::init().map_err(GameError::Sdl)?;
        let video_subsystem = sdl_context.video().map_err(GameError::Sdl)?;
        let image_context = sdl2::image::init(InitFlag::PNG).map_err(GameError::Sdl)?;
        let event_pump = sdl_context.event_pump().map_err(GameError::Sdl)?;

        trace!(width = WORLD_SIZE.x, height = WORLD_SIZE.y, "Creating game window");
        let window = video_subsystem
            .window(WINDOW_TITLE, WORLD_SIZE.x, WORLD_SIZE.y)
            .position_centered()
            .build()
            .map_err(|e| GameError::Sdl(e.to_string()))?;

        let canvas = window
            .into_canvas()
            .accelerated()
            .build()
            .map_err(|e| GameError::Sdl(e.to_string()))?;
        debug!(renderer_info = ?canvas.info(), "Canvas renderer initialized");

        let texture_creator = canvas.texture_creator();
        let (catalog, textures) = load_textures(&texture_creator, &config.asset_dir);

        let game = Game::new(config, catalog);

        info!("Application initialization completed successfully");
        Ok(App {
            game,
            canvas,
            event_pump,
            textures,
            last_tick: Instant::now(),
            focused: true,
            _texture_creator: texture_creator,
            _image_context: image_context,
            _sdl_context: sdl_context,
        })
    }

    /// Runs a single frame: input, game logic, drawing, then sleeps out the rest of
    /// `LOOP_TIME`.
    ///
    /// # Returns
    ///
    /// `true` if the game should keep running.
    pub fn run(&mut self) -> bool {
        let start = Instant::now();

        if !self.handle_events() {
            return false;
        }

        let dt = self.last_tick.elapsed().as_secs_f32();
        self.last_tick = start;

        if self.game.tick(dt) {
            return false;
        }

        if let Err(e) = draw_world(&mut self.canvas, &self.textures, &mut self.game.world) {
            error!(error = %e, "Failed to draw frame");
        }
        self.canvas.present();

        if start.elapsed() < LOOP_TIME {
            let time = LOOP_TIME.saturating_sub(start.elapsed());
            if time != Duration::ZERO {
                platform::sleep(time, self.focused);
            }
        }

        true
    }

    /// Forwards keyboard events to the game. Returns `false` when the window was closed.
    fn handle_events(&mut self) -> bool {
        for event in self.event_pump.poll_iter() {
            match event {
                Event::Quit { .. } => {
                    info!("Window closed");
                    return false;
                }
                Event::Window { win_event, .. } => match win_event {
                    WindowEvent::FocusGained => self.focused = true,
                    WindowEvent::FocusLost => self.focused = false,
                    _ => {}
                },
                Event::KeyDown {
                    keycode: Some(keycode),
                    repeat: false,
                    ..
                } => {
                    if let Some(key) = map_key(keycode) {
                        self.game.send_key(KeyEvent::pressed(key));
                    }
                }
                Event::KeyUp {
                    keycode: Some(keycode), ..
                } => {
                    if let Some(key) = map_key(keycode) {
                        self.game.send_key(KeyEvent::released(key));
                    }
                }
                _ => {}
            }
        }
        true
    }
}

fn map_key(keycode: Keycode) -> Option<Key> {
    Some(match keycode {
        Keycode::Up => Key::Up,
        Keycode::Down => Key::Down,
        Keycode::Left => Key::Left,
        Keycode::Right => Key::Right,
        Keycode::Kp8 => Key::Numpad8,
        Keycode::Kp2 => Key::Numpad2,
        Keycode::Kp4 => Key::Numpad4,
        Keycode::Kp6 => Key::Numpad6,
        Keycode::Escape => Key::Escape,
        Keycode::Q => Key::Q,
        Keycode::P => Key::P,
        _ => return None,
    })
}

/// Loads every asset image it can find. Missing files are logged and left out of the
/// catalog, so scene setup can report exactly what is absent.
fn load_textures(creator: &TextureCreator<WindowContext>, asset_dir: &Path) -> (TextureCatalog, TextureStore) {
    let mut catalog = TextureCatalog::default();
    let mut textures = TextureStore::new();

    for asset in Asset::iter() {
        let path = asset.path(asset_dir);
        match creator.load_texture(&path) {
            Ok(texture) => {
                let query = texture.query();
                trace!(%asset, width = query.width, height = query.height, "Texture loaded");
                catalog.insert(asset, UVec2::new(query.width, query.height));
                textures.insert(asset, texture);
            }
            Err(reason) => {
                let error = AssetError::LoadFailed {
                    asset,
                    path: path.display().to_string(),
                    reason,
                };
                warn!(%error, "Texture unavailable");
            }
        }
    }

    info!(loaded = catalog.len(), "Textures loaded");
    (catalog, textures)
}

//! Echo Quest entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::Vec2;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, KeyboardEvent, MouseEvent};

    use echo_quest::consts::*;
    use echo_quest::input::{self, HeldKeys};
    use echo_quest::renderer::RenderState;
    use echo_quest::sim::{
        GameEvent, GamePhase, GameState, QuestionBank, QuizPhase, TickInput, tick,
    };
    use echo_quest::{GameMode, Settings};

    const INSTRUCTIONS_QUIZ: &str = "Arrows/WASD to walk, walk into a gold block for a question";
    const INSTRUCTIONS_PLATFORMER: &str =
        "Arrows/WASD to run, Space to jump, E near the bridge to make it solid";

    /// Game instance holding all state
    struct Game {
        state: GameState,
        settings: Settings,
        render_state: Option<RenderState>,
        accumulator: f32,
        last_time: f64,
        held: HeldKeys,
        /// One-shot inputs waiting for the next tick
        pending: TickInput,
        /// Canvas client size in CSS pixels
        client_size: Vec2,
    }

    impl Game {
        fn new(settings: Settings) -> Self {
            let state = GameState::new(&settings, QuestionBank::embedded());
            Self {
                state,
                settings,
                render_state: None,
                accumulator: 0.0,
                last_time: 0.0,
                held: HeldKeys::new(),
                pending: TickInput::default(),
                client_size: Vec2::ONE,
            }
        }

        /// Held keys plus whatever one-shots arrived since the last tick
        fn sample_input(&self) -> TickInput {
            let movement = self.held.movement();
            TickInput {
                left: movement.left,
                right: movement.right,
                up: movement.up,
                down: movement.down,
                jump: movement.jump,
                ..self.pending.clone()
            }
        }

        /// Canvas offset coordinates to world pixels
        fn to_world(&self, x: f32, y: f32) -> Vec2 {
            let screen = self.state.screen.as_vec2();
            Vec2::new(x, y) * screen / self.client_size.max(Vec2::ONE)
        }

        /// Run simulation ticks
        fn update(&mut self, dt: f32) {
            let dt = dt.min(0.1);
            self.accumulator += dt;

            let mut substeps = 0;
            while self.accumulator >= FRAME_DT && substeps < MAX_SUBSTEPS {
                let input = self.sample_input();
                tick(&mut self.state, &input);
                self.accumulator -= FRAME_DT;
                substeps += 1;

                // One-shots are consumed by the first tick; keep the pointer
                self.pending = TickInput {
                    pointer: self.pending.pointer,
                    ..TickInput::default()
                };
            }

            for event in self.state.drain_events() {
                match event {
                    GameEvent::QuizMissing { tag } => {
                        log::warn!("No question for block {tag}")
                    }
                    other => log::debug!("{other:?}"),
                }
            }
        }

        /// Render the current frame
        fn render(&mut self) {
            let high_contrast = self.settings.high_contrast;
            if let Some(ref mut render_state) = self.render_state {
                match render_state.draw(&self.state, high_contrast) {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost) => {
                        render_state.resize(render_state.size.0, render_state.size.1);
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("Out of memory!");
                    }
                    Err(e) => log::warn!("Render error: {:?}", e),
                }
            }
        }

        /// Update HUD elements in DOM
        fn update_hud(&self) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };

            set_visible(&document, "instructions", self.settings.show_instructions);

            let session = self.state.quiz.as_ref();
            set_visible(&document, "quiz", session.is_some());
            let Some(session) = session else {
                return;
            };

            if let Some(el) = document.get_element_by_id("quiz-question") {
                el.set_text_content(Some(&session.question.question));
            }
            if let Some(el) = document.get_element_by_id("quiz-options") {
                let options = session
                    .question
                    .options
                    .iter()
                    .enumerate()
                    .map(|(i, option)| format!("<li>{}. {}</li>", i + 1, escape_html(option)))
                    .collect::<String>();
                if el.inner_html() != options {
                    el.set_inner_html(&options);
                }
            }
            if let Some(el) = document.get_element_by_id("quiz-feedback") {
                el.set_text_content(session.feedback());
                let class = match session.phase() {
                    QuizPhase::Answering => "hidden",
                    QuizPhase::Feedback { correct: true } => "correct",
                    QuizPhase::Feedback { correct: false } => "wrong",
                };
                let _ = el.set_attribute("class", class);
            }
        }
    }

    fn set_visible(document: &web_sys::Document, id: &str, visible: bool) {
        if let Some(el) = document.get_element_by_id(id) {
            let _ = el.set_attribute("class", if visible { "" } else { "hidden" });
        }
    }

    fn escape_html(text: &str) -> String {
        text.replace('&', "&amp;")
            .replace('<', "&lt;")
            .replace('>', "&gt;")
    }

    /// `?mode=platformer` overrides the saved mode
    fn mode_from_url(window: &web_sys::Window) -> Option<GameMode> {
        let search = window.location().search().ok()?;
        search
            .trim_start_matches('?')
            .split('&')
            .filter_map(|pair| pair.split_once('='))
            .find(|(key, _)| *key == "mode")
            .and_then(|(_, value)| GameMode::from_str(value))
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Echo Quest starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        let mut settings = Settings::load();
        if let Some(mode) = mode_from_url(&window) {
            settings.mode = mode;
        }

        let game = Rc::new(RefCell::new(Game::new(settings.clone())));
        let world = game.borrow().state.screen;

        // Backing store at device resolution, aspect taken from the world
        let dpr = window.device_pixel_ratio();
        let client_w = canvas.client_width().max(1) as f32;
        let client_h = client_w * world.y as f32 / world.x as f32;
        let width = (client_w as f64 * dpr) as u32;
        let height = (client_h as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);
        game.borrow_mut().client_size = Vec2::new(client_w, client_h);

        if let Some(el) = document.get_element_by_id("instructions") {
            el.set_text_content(Some(match settings.mode {
                GameMode::Quiz => INSTRUCTIONS_QUIZ,
                GameMode::Platformer => INSTRUCTIONS_PLATFORMER,
            }));
        }

        log::info!("Mode: {}", settings.mode.as_str());

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .expect("Failed to create surface");

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .expect("Failed to get adapter");

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        match RenderState::new(surface, &adapter, width, height, world).await {
            Ok(render_state) => game.borrow_mut().render_state = Some(render_state),
            Err(e) => log::error!("Failed to create device: {e}"),
        }

        setup_input_handlers(&canvas, game.clone());

        request_animation_frame(game);

        log::info!("Echo Quest running!");
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        let window = web_sys::window().expect("no window");

        // Key down: held set plus one-shots
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let code = event.code();
                if input::is_game_key(&code) {
                    event.prevent_default();
                }
                let mut g = game.borrow_mut();
                match code.as_str() {
                    input::QUIT => g.pending.quit = true,
                    input::INTERACT if !event.repeat() => g.pending.interact = true,
                    other if g.state.phase == GamePhase::Quiz => {
                        if let Some(index) = input::answer_index(other) {
                            g.pending.answer = Some(index);
                        }
                    }
                    _ => {}
                }
                g.held.press(&code);
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Key up
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                game.borrow_mut().held.release(&event.code());
            });
            let _ = window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Focus loss would leave keys stuck down
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                game.borrow_mut().held.clear();
            });
            let _ =
                window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Mouse move: hover on quiz buttons
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let mut g = game.borrow_mut();
                let point = g.to_world(event.offset_x() as f32, event.offset_y() as f32);
                g.pending.pointer = Some(point);
            });
            let _ = canvas
                .add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Mouse click: answer or close the popup
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                if event.button() != 0 {
                    return;
                }
                let mut g = game.borrow_mut();
                let point = g.to_world(event.offset_x() as f32, event.offset_y() as f32);
                g.pending.click = Some(point);
                g.pending.pointer = Some(point);
            });
            let _ = canvas
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        {
            let mut g = game.borrow_mut();

            let dt = if g.last_time > 0.0 {
                ((time - g.last_time) / 1000.0) as f32
            } else {
                FRAME_DT
            };
            g.last_time = time;

            g.update(dt);
            g.render();
            g.update_hud();

            if !g.state.is_running() {
                log::info!("Echo Quest stopped");
                g.settings.save();
                return;
            }
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

/// Headless run: plays a short scripted session and logs what happens.
///
/// Usage: `echo-quest [quiz|platformer] [settings.json]`
#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use std::path::Path;
    use std::time::{Duration, Instant};

    use echo_quest::consts::FRAME_DT;
    use echo_quest::sim::{GameState, QuestionBank, tick};
    use echo_quest::{GameMode, Settings};

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Echo Quest (native) starting...");

    let mut args = std::env::args().skip(1);
    let mode_arg = args.next();
    let mut settings = args
        .next()
        .map(|path| Settings::load(Path::new(&path)))
        .unwrap_or_default();
    if let Some(arg) = mode_arg {
        match GameMode::from_str(&arg) {
            Some(mode) => settings.mode = mode,
            None => log::warn!("Unknown mode {arg:?}, using {}", settings.mode.as_str()),
        }
    }

    let bank = QuestionBank::load(Path::new("data/questions.json"));
    let mut state = GameState::new(&settings, bank);
    let script = headless::script(settings.mode);

    let frame = Duration::from_secs_f32(FRAME_DT);
    for input in script.iter() {
        let started = Instant::now();
        tick(&mut state, input);
        for event in state.drain_events() {
            log::info!("tick {}: {:?}", state.time_ticks, event);
        }
        if !state.is_running() {
            break;
        }
        if let Some(rest) = frame.checked_sub(started.elapsed()) {
            std::thread::sleep(rest);
        }
    }

    let position = state.body.position();
    log::info!(
        "Finished after {} ticks at ({:.1}, {:.1})",
        state.time_ticks,
        position.x,
        position.y
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use echo_quest::GameMode;
    use echo_quest::sim::TickInput;
    use glam::Vec2;

    fn hold(n: usize, input: TickInput) -> impl Iterator<Item = TickInput> {
        std::iter::repeat_n(input, n)
    }

    /// Scripted inputs, one per tick
    pub fn script(mode: GameMode) -> Vec<TickInput> {
        let right = TickInput {
            right: true,
            ..TickInput::default()
        };
        let mut inputs = Vec::new();
        match mode {
            GameMode::Quiz => {
                // Down the left corridor, then right into block 3
                inputs.extend(hold(
                    94,
                    TickInput {
                        down: true,
                        ..TickInput::default()
                    },
                ));
                inputs.extend(hold(100, right.clone()));
                inputs.push(TickInput {
                    answer: Some(0),
                    ..TickInput::default()
                });
                inputs.extend(hold(10, TickInput::default()));
                inputs.push(TickInput {
                    click: Some(Vec2::new(400.0, 240.0)),
                    ..TickInput::default()
                });
                inputs.extend(hold(
                    20,
                    TickInput {
                        left: true,
                        ..TickInput::default()
                    },
                ));
            }
            GameMode::Platformer => {
                // Settle on the floor, run up to the gap, jump and light the bridge
                inputs.extend(hold(40, TickInput::default()));
                inputs.extend(hold(34, right.clone()));
                inputs.extend(hold(
                    10,
                    TickInput {
                        right: true,
                        jump: true,
                        ..TickInput::default()
                    },
                ));
                inputs.push(TickInput {
                    right: true,
                    interact: true,
                    ..TickInput::default()
                });
                inputs.extend(hold(80, right.clone()));
            }
        }
        inputs.push(TickInput {
            quit: true,
            ..TickInput::default()
        });
        inputs
    }
}

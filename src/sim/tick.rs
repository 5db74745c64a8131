//! Fixed-step simulation tick
//!
//! One tick is one frame: sample intent, run the resolver, then let the
//! interaction layer react to what the body touched.

use glam::Vec2;

use super::quiz::{ClickOutcome, QuizSession};
use super::resolve::{ResolutionReport, resolve};
use super::state::{GameEvent, GamePhase, GameState};
use crate::settings::GameMode;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    /// Walk up, or jump in the platformer
    pub up: bool,
    pub down: bool,
    pub jump: bool,
    /// Activate a nearby echo platform (one-shot)
    pub interact: bool,
    /// Pick a quiz option by index (one-shot)
    pub answer: Option<usize>,
    /// Pointer click in screen space (one-shot)
    pub click: Option<Vec2>,
    /// Current pointer position
    pub pointer: Option<Vec2>,
    pub quit: bool,
}

/// Advance the game state by one frame
pub fn tick(state: &mut GameState, input: &TickInput) {
    if state.phase == GamePhase::Quit {
        return;
    }
    if input.quit {
        log::info!("Quit requested");
        state.phase = GamePhase::Quit;
        state.events.push(GameEvent::Quit);
        return;
    }

    state.time_ticks += 1;
    if input.pointer.is_some() {
        state.pointer = input.pointer;
    }

    // Movement is suspended while the popup is open
    if state.phase == GamePhase::Quiz {
        update_quiz(state, input);
        return;
    }

    if input.interact {
        activate_nearby_echoes(state);
    }

    let desired = match state.mode {
        GameMode::Quiz => walk_velocity(state, input),
        GameMode::Platformer => platformer_velocity(state, input),
    };
    let report = resolve(&mut state.body, &state.obstacles, desired, state.bounds);

    if report.respawned {
        log::debug!("Fell out of the world, respawning");
        state.events.push(GameEvent::Respawned);
    } else if report.bumped_head {
        log::debug!("Hit a ceiling at y={}", state.body.rect().top());
    } else if report.landed && desired.y > state.tuning.run_speed {
        // Resting contact re-lands every other frame at low speed
        log::debug!("Landed at y={} from vy={:.1}", state.body.rect().bottom(), desired.y);
    }

    trigger_quiz(state, &report);
}

/// Four-way walking at constant speed; right and down win over left and up
fn walk_velocity(state: &GameState, input: &TickInput) -> Vec2 {
    let speed = state.tuning.walk_speed;
    let mut velocity = Vec2::ZERO;
    if input.left {
        velocity.x = -speed;
    }
    if input.right {
        velocity.x = speed;
    }
    if input.up {
        velocity.y = -speed;
    }
    if input.down {
        velocity.y = speed;
    }
    velocity
}

/// Run, jump when grounded, then gravity up to terminal velocity
fn platformer_velocity(state: &mut GameState, input: &TickInput) -> Vec2 {
    let tuning = state.tuning;
    let vx = if input.left {
        -tuning.run_speed
    } else if input.right {
        tuning.run_speed
    } else {
        0.0
    };

    let mut vy = state.body.velocity.y;
    if (input.jump || input.up) && state.body.grounded {
        vy = tuning.jump_power;
        state.body.grounded = false;
    }
    vy = (vy + tuning.gravity).min(tuning.terminal_velocity);

    Vec2::new(vx, vy)
}

/// Toggle every echo platform whose center is within range of the body
fn activate_nearby_echoes(state: &mut GameState) {
    let center = state.body.rect().center();
    for (index, obstacle) in state.obstacles.iter_mut().enumerate() {
        let Some(range) = obstacle.interaction_range() else {
            continue;
        };
        if center.distance(obstacle.bounds.center()) < range {
            let solid = obstacle.activate();
            log::info!("Echo {index} is now {}", if solid { "solid" } else { "passable" });
            state.events.push(GameEvent::EchoToggled {
                obstacle: index,
                solid,
            });
        }
    }
}

/// Open a quiz for the first question block the body ran into
fn trigger_quiz(state: &mut GameState, report: &ResolutionReport) {
    let tag = report
        .touches
        .iter()
        .find_map(|t| state.obstacles[t.obstacle].tag())
        .map(str::to_owned);

    let Some(tag) = tag else {
        state.missing_tag = None;
        return;
    };

    match state.bank.get(&tag) {
        Ok(question) => {
            log::info!("Opening question {tag}");
            state.quiz = Some(QuizSession::open(
                tag.clone(),
                question.clone(),
                state.screen,
            ));
            state.phase = GamePhase::Quiz;
            state.missing_tag = None;
            state.events.push(GameEvent::QuizOpened { tag });
        }
        Err(e) => {
            // Report once per stretch of contact, not every frame
            if state.missing_tag.as_deref() != Some(tag.as_str()) {
                log::warn!("{e}");
                state.events.push(GameEvent::QuizMissing { tag: tag.clone() });
                state.missing_tag = Some(tag);
            }
        }
    }
}

fn update_quiz(state: &mut GameState, input: &TickInput) {
    let Some(session) = state.quiz.as_mut() else {
        state.phase = GamePhase::Playing;
        return;
    };

    let outcome = if let Some(index) = input.answer {
        match session.select(index) {
            Some(correct) => ClickOutcome::Answered { index, correct },
            None => ClickOutcome::Ignored,
        }
    } else if let Some(point) = input.click {
        session.click(point)
    } else {
        return;
    };

    match outcome {
        ClickOutcome::Ignored => {}
        ClickOutcome::Answered { index, correct } => {
            log::info!(
                "Question {} answered with option {index}: {}",
                session.tag,
                if correct { "correct" } else { "wrong" }
            );
            state.events.push(GameEvent::QuizAnswered {
                tag: session.tag.clone(),
                correct,
            });
        }
        ClickOutcome::Closed => {
            let tag = session.tag.clone();
            log::info!("Closing question {tag}");
            state.quiz = None;
            state.phase = GamePhase::Playing;
            state.events.push(GameEvent::QuizClosed { tag });
        }
    }
}

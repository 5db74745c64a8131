//! Shape generation for 2D primitives
//!
//! Everything on screen is a filled rectangle. Coordinates stay in world
//! pixels here; the pipeline maps them to clip space.

use super::vertex::{Vertex, colors};
use crate::settings::GameMode;
use crate::sim::{GameState, Obstacle, ObstacleKind, QuizPhase, QuizSession, Rect};

/// Two triangles covering `rect`
pub fn rect(rect: Rect, color: [f32; 4]) -> Vec<Vertex> {
    let (l, t) = (rect.left() as f32, rect.top() as f32);
    let (r, b) = (rect.right() as f32, rect.bottom() as f32);
    vec![
        Vertex::new(l, t, color),
        Vertex::new(l, b, color),
        Vertex::new(r, t, color),
        Vertex::new(r, t, color),
        Vertex::new(l, b, color),
        Vertex::new(r, b, color),
    ]
}

/// Rectangle border of the given thickness, drawn inside `bounds`
pub fn outline(bounds: Rect, thickness: i32, color: [f32; 4]) -> Vec<Vertex> {
    let t = thickness.min(bounds.w / 2).min(bounds.h / 2).max(1);
    let mut vertices = Vec::with_capacity(24);
    vertices.extend(rect(Rect::new(bounds.x, bounds.y, bounds.w, t), color));
    vertices.extend(rect(
        Rect::new(bounds.x, bounds.bottom() - t, bounds.w, t),
        color,
    ));
    vertices.extend(rect(
        Rect::new(bounds.x, bounds.y + t, t, bounds.h - 2 * t),
        color,
    ));
    vertices.extend(rect(
        Rect::new(bounds.right() - t, bounds.y + t, t, bounds.h - 2 * t),
        color,
    ));
    vertices
}

/// Fill color for an obstacle in its current state. Static obstacles are
/// walls on the quiz map and platforms in the platformer.
pub fn obstacle_color(obstacle: &Obstacle, mode: GameMode, high_contrast: bool) -> [f32; 4] {
    match obstacle.kind {
        ObstacleKind::Echo { solid: false, .. } => colors::ECHO_PASSABLE,
        _ if high_contrast => colors::HC_SOLID,
        ObstacleKind::Static if mode == GameMode::Platformer => colors::PLATFORM,
        ObstacleKind::Static => colors::WALL,
        ObstacleKind::Quiz { .. } => colors::QUESTION_BLOCK,
        ObstacleKind::Echo { solid: true, .. } => colors::ECHO_SOLID,
    }
}

/// Clear color for a mode
pub fn background(mode: GameMode, high_contrast: bool) -> [f32; 4] {
    match mode {
        _ if high_contrast => colors::HC_BACKGROUND,
        GameMode::Quiz => colors::QUIZ_BACKGROUND,
        GameMode::Platformer => colors::PLATFORMER_BACKGROUND,
    }
}

/// Popup panel, option buttons (with hover), and the feedback bar.
///
/// Text is drawn by the host on top of these.
pub fn quiz_popup(session: &QuizSession, hovered: Option<usize>) -> Vec<Vertex> {
    let mut vertices = rect(session.panel, colors::POPUP);
    vertices.extend(outline(session.panel, 3, colors::POPUP_BORDER));

    match session.phase() {
        QuizPhase::Answering => {
            for (i, button) in session.buttons.iter().enumerate() {
                let color = if hovered == Some(i) {
                    colors::BUTTON_HOVER
                } else {
                    colors::BUTTON
                };
                vertices.extend(rect(*button, color));
                vertices.extend(outline(*button, 1, colors::POPUP_BORDER));
            }
        }
        QuizPhase::Feedback { correct } => {
            let color = if correct {
                colors::FEEDBACK_CORRECT
            } else {
                colors::FEEDBACK_WRONG
            };
            let bar = Rect::new(
                session.panel.x + 20,
                session.panel.bottom() - 44,
                session.panel.w - 40,
                4,
            );
            vertices.extend(rect(bar, color));
        }
    }
    vertices
}

/// Full scene for one frame, back to front
pub fn scene(state: &GameState, high_contrast: bool) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((state.obstacles.len() + 8) * 6);

    for obstacle in &state.obstacles {
        let color = obstacle_color(obstacle, state.mode, high_contrast);
        vertices.extend(rect(obstacle.bounds, color));
    }

    let player = match state.mode {
        _ if high_contrast => colors::HC_PLAYER,
        GameMode::Quiz => colors::WALKER,
        GameMode::Platformer => colors::RUNNER,
    };
    vertices.extend(rect(state.body.rect(), player));

    if let Some(session) = &state.quiz {
        let hovered = state.pointer.and_then(|p| session.button_at(p));
        vertices.extend(quiz_popup(session, hovered));
    }

    vertices
}

//! Keyboard state for the frame loop
//!
//! Keys are tracked by physical `KeyboardEvent.code` ("KeyA", "ArrowLeft",
//! "Space"). The code of a key is the same on press and release whatever the
//! modifiers, so a key pressed as `a` and released as `A` still clears.

use std::collections::HashSet;

use crate::sim::TickInput;

const LEFT: &[&str] = &["ArrowLeft", "KeyA"];
const RIGHT: &[&str] = &["ArrowRight", "KeyD"];
const UP: &[&str] = &["ArrowUp", "KeyW"];
const DOWN: &[&str] = &["ArrowDown", "KeyS"];
const JUMP: &[&str] = &["Space"];

pub const INTERACT: &str = "KeyE";
pub const QUIT: &str = "Escape";

/// Physical keys currently held down
#[derive(Debug, Clone, Default)]
pub struct HeldKeys {
    codes: HashSet<String>,
}

impl HeldKeys {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, code: &str) {
        self.codes.insert(code.to_owned());
    }

    pub fn release(&mut self, code: &str) {
        self.codes.remove(code);
    }

    /// Forget everything, e.g. when the window loses focus
    pub fn clear(&mut self) {
        self.codes.clear();
    }

    fn any(&self, codes: &[&str]) -> bool {
        codes.iter().any(|c| self.codes.contains(*c))
    }

    /// Movement part of a tick's input; one-shots are left at their defaults
    pub fn movement(&self) -> TickInput {
        TickInput {
            left: self.any(LEFT),
            right: self.any(RIGHT),
            up: self.any(UP),
            down: self.any(DOWN),
            jump: self.any(JUMP),
            ..TickInput::default()
        }
    }
}

/// Whether the browser's default action (scrolling) should be suppressed
pub fn is_game_key(code: &str) -> bool {
    code.starts_with("Arrow") || code == "Space"
}

/// Quiz option picked by a number key: "Digit1" / "Numpad1" is option 0
pub fn answer_index(code: &str) -> Option<usize> {
    let digit = code
        .strip_prefix("Digit")
        .or_else(|| code.strip_prefix("Numpad"))?;
    match digit.parse::<usize>() {
        Ok(n @ 1..=9) => Some(n - 1),
        _ => None,
    }
}

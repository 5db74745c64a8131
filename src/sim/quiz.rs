//! Question bank and the modal quiz popup
//!
//! The bank is a JSON object keyed by block tag. A session is opened when the
//! player walks into a question block and lives until the second click: the
//! first click on an option shows feedback, the next click anywhere closes.

use std::collections::HashMap;

use glam::{IVec2, Vec2};
use serde::{Deserialize, Serialize};

use super::rect::Rect;
use crate::error::LoadError;

pub const FEEDBACK_CORRECT: &str = "Correct! (click to close)";
pub const FEEDBACK_WRONG: &str = "Wrong... (click to close)";

/// Margin between the screen edge and the popup panel
const PANEL_MARGIN: i32 = 100;
const BUTTON_INSET: i32 = 20;
/// Offset of the first option below the panel top (room for the question)
const BUTTON_TOP: i32 = 100;
const BUTTON_PITCH: i32 = 60;
const BUTTON_HEIGHT: i32 = 40;

/// One multiple-choice question
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub question: String,
    #[serde(alias = "reponses")]
    pub options: Vec<String>,
    #[serde(alias = "bonne_reponse")]
    pub correct_index: usize,
}

impl Question {
    fn is_valid(&self) -> bool {
        self.correct_index < self.options.len()
    }
}

/// Questions keyed by block tag
#[derive(Debug, Clone, Default)]
pub struct QuestionBank {
    questions: HashMap<String, Question>,
}

impl QuestionBank {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a bank, dropping entries whose answer index is out of range
    pub fn from_json(source_name: &str, json: &str) -> Result<Self, LoadError> {
        let raw: HashMap<String, Question> =
            serde_json::from_str(json).map_err(|e| LoadError::data(source_name, e))?;

        let mut questions = HashMap::with_capacity(raw.len());
        for (tag, question) in raw {
            if question.is_valid() {
                questions.insert(tag, question);
            } else {
                log::warn!(
                    "{}: question {} has correct_index {} but {} options, skipping",
                    source_name,
                    tag,
                    question.correct_index,
                    question.options.len()
                );
            }
        }
        Ok(Self { questions })
    }

    /// Parse a bank, falling back to an empty one on error
    pub fn from_json_or_empty(source_name: &str, json: &str) -> Self {
        match Self::from_json(source_name, json) {
            Ok(bank) => {
                log::info!("Loaded {} questions from {}", bank.len(), source_name);
                bank
            }
            Err(e) => {
                log::warn!("{e}; continuing without questions");
                Self::new()
            }
        }
    }

    /// The bank shipped with the crate
    pub fn embedded() -> Self {
        Self::from_json_or_empty(
            "embedded questions",
            include_str!("../../data/questions.json"),
        )
    }

    /// Read a bank from disk, falling back to an empty one
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load(path: &std::path::Path) -> Self {
        let name = path.display().to_string();
        match std::fs::read_to_string(path) {
            Ok(json) => Self::from_json_or_empty(&name, &json),
            Err(e) => {
                log::warn!("{}; continuing without questions", LoadError::data(name, e));
                Self::new()
            }
        }
    }

    pub fn insert(&mut self, tag: impl Into<String>, question: Question) {
        self.questions.insert(tag.into(), question);
    }

    pub fn get(&self, tag: &str) -> Result<&Question, LoadError> {
        self.questions.get(tag).ok_or_else(|| LoadError::Lookup {
            tag: tag.to_string(),
        })
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizPhase {
    /// Waiting for an option to be picked
    Answering,
    /// Result shown, next click closes
    Feedback { correct: bool },
}

/// What a click on the popup did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    /// Missed every button while answering
    Ignored,
    Answered { index: usize, correct: bool },
    Closed,
}

/// An open quiz popup
#[derive(Debug, Clone)]
pub struct QuizSession {
    pub tag: String,
    pub question: Question,
    /// Popup background
    pub panel: Rect,
    /// One button per option, top to bottom
    pub buttons: Vec<Rect>,
    phase: QuizPhase,
}

impl QuizSession {
    /// Lay out the popup for a `screen`-sized view
    pub fn open(tag: impl Into<String>, question: Question, screen: IVec2) -> Self {
        let panel = Rect::new(
            PANEL_MARGIN,
            PANEL_MARGIN,
            screen.x - 2 * PANEL_MARGIN,
            screen.y - 2 * PANEL_MARGIN,
        );
        let buttons = (0..question.options.len() as i32)
            .map(|i| {
                Rect::new(
                    panel.x + BUTTON_INSET,
                    panel.y + BUTTON_TOP + i * BUTTON_PITCH,
                    panel.w - 2 * BUTTON_INSET,
                    BUTTON_HEIGHT,
                )
            })
            .collect();

        Self {
            tag: tag.into(),
            question,
            panel,
            buttons,
            phase: QuizPhase::Answering,
        }
    }

    pub fn phase(&self) -> QuizPhase {
        self.phase
    }

    /// Answer by option index. Returns whether it was right, or `None` if the
    /// index is out of range or an answer was already given.
    pub fn select(&mut self, index: usize) -> Option<bool> {
        if self.phase != QuizPhase::Answering || index >= self.question.options.len() {
            return None;
        }
        let correct = index == self.question.correct_index;
        self.phase = QuizPhase::Feedback { correct };
        Some(correct)
    }

    /// Handle a pointer click in screen space
    pub fn click(&mut self, point: Vec2) -> ClickOutcome {
        if let QuizPhase::Feedback { .. } = self.phase {
            return ClickOutcome::Closed;
        }
        match self.button_at(point) {
            Some(index) => match self.select(index) {
                Some(correct) => ClickOutcome::Answered { index, correct },
                None => ClickOutcome::Ignored,
            },
            None => ClickOutcome::Ignored,
        }
    }

    /// Option button under `point`, if any
    pub fn button_at(&self, point: Vec2) -> Option<usize> {
        self.buttons.iter().position(|b| b.contains_point(point))
    }

    pub fn feedback(&self) -> Option<&'static str> {
        match self.phase {
            QuizPhase::Answering => None,
            QuizPhase::Feedback { correct: true } => Some(FEEDBACK_CORRECT),
            QuizPhase::Feedback { correct: false } => Some(FEEDBACK_WRONG),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCREEN: IVec2 = IVec2::new(800, 480);

    fn capital_question() -> Question {
        Question {
            question: "Capital of France?".to_string(),
            options: vec!["Lyon".into(), "Marseille".into(), "Paris".into()],
            correct_index: 2,
        }
    }

    #[test]
    fn test_bank_accepts_both_key_styles() {
        let json = r#"{
            "1": {"question": "2 + 2?", "options": ["3", "4"], "correct_index": 1},
            "2": {"question": "Sky?", "reponses": ["Blue", "Green"], "bonne_reponse": 0}
        }"#;
        let bank = QuestionBank::from_json("test", json).unwrap();
        assert_eq!(bank.len(), 2);
        assert_eq!(bank.get("1").unwrap().correct_index, 1);
        assert_eq!(bank.get("2").unwrap().options, vec!["Blue", "Green"]);
    }

    #[test]
    fn test_bank_drops_out_of_range_answers() {
        let json = r#"{
            "1": {"question": "ok", "options": ["a"], "correct_index": 0},
            "2": {"question": "bad", "options": ["a", "b"], "correct_index": 2},
            "3": {"question": "empty", "options": [], "correct_index": 0}
        }"#;
        let bank = QuestionBank::from_json("test", json).unwrap();
        assert_eq!(bank.len(), 1);
        assert!(bank.get("2").is_err());
    }

    #[test]
    fn test_malformed_bank_degrades_to_empty() {
        assert!(matches!(
            QuestionBank::from_json("broken.json", "{not json"),
            Err(LoadError::Data { .. })
        ));
        let bank = QuestionBank::from_json_or_empty("broken.json", "[1, 2, 3]");
        assert!(bank.is_empty());
    }

    #[test]
    fn test_missing_tag_is_lookup_error() {
        let bank = QuestionBank::new();
        assert_eq!(
            bank.get("7"),
            Err(LoadError::Lookup {
                tag: "7".to_string()
            })
        );
    }

    #[test]
    fn test_embedded_bank_has_map_questions() {
        let bank = QuestionBank::embedded();
        for tag in ["1", "2", "3"] {
            assert!(bank.get(tag).is_ok(), "missing question {tag}");
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn test_missing_file_degrades_to_empty() {
        let bank = QuestionBank::load(std::path::Path::new("does/not/exist.json"));
        assert!(bank.is_empty());
    }

    #[test]
    fn test_layout() {
        let session = QuizSession::open("1", capital_question(), SCREEN);
        assert_eq!(session.panel, Rect::new(100, 100, 600, 280));
        assert_eq!(session.buttons.len(), 3);
        assert_eq!(session.buttons[0], Rect::new(120, 200, 560, 40));
        assert_eq!(session.buttons[2], Rect::new(120, 320, 560, 40));
    }

    #[test]
    fn test_select_correct_and_wrong() {
        let mut session = QuizSession::open("1", capital_question(), SCREEN);
        assert_eq!(session.feedback(), None);
        assert_eq!(session.select(2), Some(true));
        assert_eq!(session.feedback(), Some(FEEDBACK_CORRECT));
        // Already answered
        assert_eq!(session.select(0), None);

        let mut session = QuizSession::open("1", capital_question(), SCREEN);
        assert_eq!(session.select(0), Some(false));
        assert_eq!(session.feedback(), Some(FEEDBACK_WRONG));
    }

    #[test]
    fn test_click_flow() {
        let mut session = QuizSession::open("1", capital_question(), SCREEN);

        // Between buttons
        assert_eq!(session.click(Vec2::new(300.0, 250.0)), ClickOutcome::Ignored);
        assert_eq!(session.phase(), QuizPhase::Answering);

        // Third button
        assert_eq!(
            session.click(Vec2::new(300.0, 330.0)),
            ClickOutcome::Answered {
                index: 2,
                correct: true
            }
        );
        assert_eq!(session.phase(), QuizPhase::Feedback { correct: true });

        // Anywhere closes
        assert_eq!(session.click(Vec2::new(5.0, 5.0)), ClickOutcome::Closed);
    }

    #[test]
    fn test_button_hover() {
        let session = QuizSession::open("1", capital_question(), SCREEN);
        assert_eq!(session.button_at(Vec2::new(121.0, 265.0)), Some(1));
        assert_eq!(session.button_at(Vec2::new(50.0, 265.0)), None);
    }
}

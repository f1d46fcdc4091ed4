//! Editor state machine for a single carousel project.
//!
//! [`EditorState::apply`] is a pure transition: it takes a [`Command`] and
//! returns the next state together with the persistence requests
//! ([`Effect`]s) an outer driver must execute. The state itself never does
//! I/O.
//!
//! Slide creation is two-phase. `AddSlide` and `DuplicateSlide` only emit a
//! [`Effect::CreateSlide`]; the driver persists it and feeds the stored slide
//! back as [`Command::CommitCreated`], which appends it locally.

use crate::error::CoreError;
use crate::formatter::{apply_format, FormatCommand, Selection};
use crate::save::{SaveStatus, SaveTracker};
use crate::slide::{next_slide_number, sort_for_display, NewSlide, Slide, MAX_SLIDES};
use crate::suggestion::{apply_suggestion, StyleSuggestion};
use crate::text::char_count;
use crate::types::{DbId, Timestamp};

// ---------------------------------------------------------------------------
// Commands, effects, rejections
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Previous,
    Next,
    /// Jump to the slide at `index`.
    Select(usize),
    AddSlide,
    DuplicateSlide,
    DeleteSlide,
    /// A slide requested by `AddSlide`/`DuplicateSlide` has been stored.
    CommitCreated(Slide),
    /// Direct typing: the active slide's full new content.
    EditContent(String),
    Format {
        selection: Selection,
        command: FormatCommand,
    },
    ApplySuggestion(StyleSuggestion),
    SetTone(Option<String>),
}

/// Persistence request produced by a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    CreateSlide(NewSlide),
    UpdateSlide {
        slide_id: DbId,
        content: String,
        tone: Option<String>,
        revision: i64,
    },
    DeleteSlide {
        slide_id: DbId,
    },
}

/// Why a command was refused. The state is unchanged whenever one is returned.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Rejection {
    #[error("A carousel holds at most {} slides", MAX_SLIDES)]
    CapacityReached,

    #[error("The last remaining slide cannot be deleted")]
    LastSlide,

    #[error("The project has no slides")]
    NoActiveSlide,

    #[error("Slide index {index} is out of range for {len} slides")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Slide {slide_id} belongs to project {actual}, not {expected}")]
    ForeignSlide {
        slide_id: DbId,
        expected: DbId,
        actual: DbId,
    },

    #[error("{0}")]
    InvalidSelection(String),
}

/// Outcome of a successful transition.
#[derive(Debug, Clone)]
pub struct Transition {
    pub state: EditorState,
    pub effects: Vec<Effect>,
}

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct EditorState {
    project_id: DbId,
    slides: Vec<Slide>,
    active: usize,
    caret: usize,
    saves: SaveTracker,
}

impl EditorState {
    /// Build editor state from the stored slides of a project.
    ///
    /// Slides are put into display order and the first one becomes active.
    pub fn new(project_id: DbId, mut slides: Vec<Slide>) -> Self {
        sort_for_display(&mut slides);
        let floor = slides.iter().map(|s| s.revision).max().unwrap_or(0);
        let caret = slides.first().map_or(0, |s| char_count(&s.content));
        Self {
            project_id,
            slides,
            active: 0,
            caret,
            saves: SaveTracker::with_floor(floor),
        }
    }

    pub fn project_id(&self) -> DbId {
        self.project_id
    }

    pub fn slides(&self) -> &[Slide] {
        &self.slides
    }

    pub fn active_index(&self) -> usize {
        self.active
    }

    pub fn active_slide(&self) -> Option<&Slide> {
        self.slides.get(self.active)
    }

    /// Caret position (characters) within the active slide.
    pub fn caret(&self) -> usize {
        self.caret
    }

    pub fn is_saving(&self) -> bool {
        self.saves.is_saving()
    }

    pub fn saves(&self) -> &SaveTracker {
        &self.saves
    }

    /// Record completion of the save stamped `revision`.
    pub fn settle_save(&mut self, slide_id: DbId, revision: i64) -> SaveStatus {
        self.saves.settle(slide_id, revision)
    }

    /// Compute the transition for `command` at time `now`.
    pub fn apply(&self, command: Command, now: Timestamp) -> Result<Transition, Rejection> {
        let mut next = self.clone();
        let mut effects = Vec::new();

        match command {
            Command::Previous => next.focus(self.active.saturating_sub(1)),
            Command::Next => {
                let last = self.slides.len().saturating_sub(1);
                next.focus((self.active + 1).min(last));
            }
            Command::Select(index) => {
                if index >= self.slides.len() {
                    return Err(Rejection::IndexOutOfRange {
                        index,
                        len: self.slides.len(),
                    });
                }
                next.focus(index);
            }
            Command::AddSlide => {
                self.ensure_capacity()?;
                effects.push(Effect::CreateSlide(NewSlide {
                    project_id: self.project_id,
                    slide_number: next_slide_number(self.slides.len()),
                    content: String::new(),
                    title: None,
                    tone: None,
                }));
            }
            Command::DuplicateSlide => {
                self.ensure_capacity()?;
                let source = self.active_slide().ok_or(Rejection::NoActiveSlide)?;
                effects.push(Effect::CreateSlide(NewSlide {
                    project_id: self.project_id,
                    slide_number: next_slide_number(self.slides.len()),
                    content: source.content.clone(),
                    title: None,
                    tone: source.tone.clone(),
                }));
            }
            Command::CommitCreated(slide) => {
                self.ensure_capacity()?;
                if slide.project_id != self.project_id {
                    return Err(Rejection::ForeignSlide {
                        slide_id: slide.id,
                        expected: self.project_id,
                        actual: slide.project_id,
                    });
                }
                let position = self.slides.len();
                next.slides.push(slide);
                next.focus(position);
            }
            Command::DeleteSlide => {
                if self.slides.len() <= 1 {
                    return Err(Rejection::LastSlide);
                }
                let removed = next.slides.remove(self.active);
                next.saves.forget(removed.id);
                next.focus(self.active.saturating_sub(1));
                effects.push(Effect::DeleteSlide {
                    slide_id: removed.id,
                });
            }
            Command::EditContent(content) => {
                let caret = char_count(&content);
                effects.push(next.change_content(content, caret, now)?);
            }
            Command::Format { selection, command } => {
                let slide = self.active_slide().ok_or(Rejection::NoActiveSlide)?;
                let formatted = apply_format(&slide.content, selection, &command)
                    .map_err(|e| match e {
                        CoreError::Validation(msg) => Rejection::InvalidSelection(msg),
                        other => Rejection::InvalidSelection(other.to_string()),
                    })?;
                if let Some(formatted) = formatted {
                    effects.push(next.change_content(formatted.text, formatted.caret, now)?);
                }
            }
            Command::ApplySuggestion(suggestion) => {
                let slide = self.active_slide().ok_or(Rejection::NoActiveSlide)?;
                let content = apply_suggestion(&slide.content, &suggestion);
                let caret = char_count(&content);
                effects.push(next.change_content(content, caret, now)?);
            }
            Command::SetTone(tone) => {
                let caret = self.caret;
                let slide = next
                    .slides
                    .get_mut(self.active)
                    .ok_or(Rejection::NoActiveSlide)?;
                slide.tone = tone;
                slide.updated_at = now;
                let content = slide.content.clone();
                effects.push(next.change_content(content, caret, now)?);
            }
        }

        Ok(Transition {
            state: next,
            effects,
        })
    }

    // ---- private helpers ----

    fn ensure_capacity(&self) -> Result<(), Rejection> {
        if self.slides.len() >= MAX_SLIDES {
            return Err(Rejection::CapacityReached);
        }
        Ok(())
    }

    /// Move the active pointer and put the caret at the end of that slide.
    fn focus(&mut self, index: usize) {
        self.active = index;
        self.caret = self
            .slides
            .get(index)
            .map_or(0, |s| char_count(&s.content));
    }

    /// Update the active slide in memory and stamp a save for it.
    fn change_content(
        &mut self,
        content: String,
        caret: usize,
        now: Timestamp,
    ) -> Result<Effect, Rejection> {
        let slide = self
            .slides
            .get_mut(self.active)
            .ok_or(Rejection::NoActiveSlide)?;
        slide.set_content(content, now);
        let (slide_id, content, tone) = (slide.id, slide.content.clone(), slide.tone.clone());
        self.caret = caret;
        let revision = self.saves.issue(slide_id);
        Ok(Effect::UpdateSlide {
            slide_id,
            content,
            tone,
            revision,
        })
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use chrono::{TimeZone, Utc};

    use super::*;

    const PROJECT: DbId = 1;

    fn at(secs: i64) -> Timestamp {
        Utc.timestamp_opt(1_700_000_000 + secs, 0).unwrap()
    }

    fn slide(id: DbId, number: i32, content: &str) -> Slide {
        Slide {
            id,
            project_id: PROJECT,
            slide_number: number,
            title: None,
            content: content.to_string(),
            char_count: content.chars().count() as i32,
            tone: None,
            revision: 0,
            created_at: at(0),
            updated_at: at(0),
        }
    }

    fn state_with(count: usize) -> EditorState {
        let slides = (1..=count)
            .map(|n| slide(n as DbId, n as i32, &format!("slide {n}")))
            .collect();
        EditorState::new(PROJECT, slides)
    }

    fn step(state: &EditorState, command: Command) -> Transition {
        state.apply(command, at(60)).expect("command accepted")
    }

    #[test]
    fn new_sorts_slides_for_display() {
        let state = EditorState::new(
            PROJECT,
            vec![slide(5, 3, "c"), slide(2, 1, "a"), slide(9, 1, "b")],
        );
        let ids: Vec<DbId> = state.slides().iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![2, 9, 5]);
        assert_eq!(state.active_index(), 0);
    }

    #[test]
    fn navigation_clamps_without_wrapping() {
        let state = state_with(3);
        let state = step(&state, Command::Previous).state;
        assert_eq!(state.active_index(), 0);

        let state = step(&state, Command::Next).state;
        let state = step(&state, Command::Next).state;
        let state = step(&state, Command::Next).state;
        assert_eq!(state.active_index(), 2);
    }

    #[test]
    fn select_rejects_out_of_range() {
        let state = state_with(2);
        assert_eq!(step(&state, Command::Select(1)).state.active_index(), 1);
        assert_matches!(
            state.apply(Command::Select(2), at(1)),
            Err(Rejection::IndexOutOfRange { index: 2, len: 2 })
        );
    }

    #[test]
    fn add_requests_creation_without_touching_state() {
        let state = state_with(2);
        let transition = step(&state, Command::AddSlide);
        assert_eq!(transition.state.slides().len(), 2);
        assert_eq!(
            transition.effects,
            vec![Effect::CreateSlide(NewSlide {
                project_id: PROJECT,
                slide_number: 3,
                content: String::new(),
                title: None,
                tone: None,
            })]
        );
    }

    #[test]
    fn commit_appends_and_activates_new_slide() {
        let state = state_with(2);
        let transition = step(&state, Command::CommitCreated(slide(40, 3, "")));
        assert_eq!(transition.state.slides().len(), 3);
        assert_eq!(transition.state.active_index(), 2);
        assert_eq!(transition.state.active_slide().unwrap().id, 40);
        assert!(transition.effects.is_empty());
    }

    #[test]
    fn commit_rejects_slides_from_other_projects() {
        let state = state_with(1);
        let mut foreign = slide(77, 2, "");
        foreign.project_id = 2;
        assert_matches!(
            state.apply(Command::CommitCreated(foreign), at(1)),
            Err(Rejection::ForeignSlide { slide_id: 77, .. })
        );
    }

    #[test]
    fn add_and_duplicate_rejected_at_capacity() {
        let state = state_with(MAX_SLIDES);
        assert_eq!(state.apply(Command::AddSlide, at(1)).unwrap_err(), Rejection::CapacityReached);
        assert_eq!(
            state.apply(Command::DuplicateSlide, at(1)).unwrap_err(),
            Rejection::CapacityReached
        );
        assert_eq!(
            state
                .apply(Command::CommitCreated(slide(99, 11, "")), at(1))
                .unwrap_err(),
            Rejection::CapacityReached
        );
        assert_eq!(state.slides().len(), MAX_SLIDES);
    }

    #[test]
    fn collection_never_exceeds_capacity() {
        let mut state = state_with(1);
        for id in 100..120 {
            if let Ok(t) = state.apply(Command::CommitCreated(slide(id, 0, "")), at(1)) {
                state = t.state;
            }
        }
        assert_eq!(state.slides().len(), MAX_SLIDES);
    }

    #[test]
    fn duplicate_clones_content_and_tone() {
        let mut source = slide(1, 1, "Hook line");
        source.tone = Some("playful".into());
        source.title = Some("Intro".into());
        let state = EditorState::new(PROJECT, vec![source, slide(2, 2, "other")]);
        let transition = step(&state, Command::DuplicateSlide);
        assert_matches!(
            transition.effects.as_slice(),
            [Effect::CreateSlide(new)] if new.content == "Hook line"
                && new.tone.as_deref() == Some("playful")
                && new.title.is_none()
                && new.slide_number == 3
        );
    }

    #[test]
    fn delete_rejected_for_last_slide() {
        let state = state_with(1);
        assert_eq!(state.apply(Command::DeleteSlide, at(1)).unwrap_err(), Rejection::LastSlide);
    }

    #[test]
    fn delete_removes_active_and_steps_back() {
        let state = step(&state_with(3), Command::Select(2)).state;
        let transition = step(&state, Command::DeleteSlide);
        assert_eq!(transition.effects, vec![Effect::DeleteSlide { slide_id: 3 }]);
        assert_eq!(transition.state.slides().len(), 2);
        assert_eq!(transition.state.active_index(), 1);

        let first = step(&transition.state, Command::Select(0)).state;
        let after = step(&first, Command::DeleteSlide).state;
        assert_eq!(after.active_index(), 0);
        assert_eq!(after.slides().len(), 1);
    }

    #[test]
    fn active_index_stays_in_bounds_after_deletes() {
        let mut state = step(&state_with(MAX_SLIDES), Command::Select(MAX_SLIDES - 1)).state;
        while let Ok(t) = state.apply(Command::DeleteSlide, at(1)) {
            state = t.state;
            assert!(state.active_index() < state.slides().len());
        }
        assert_eq!(state.slides().len(), 1);
    }

    #[test]
    fn edit_updates_memory_and_requests_save() {
        let state = state_with(1);
        let transition = state
            .apply(Command::EditContent("héllo".into()), at(30))
            .unwrap();
        let slide = transition.state.active_slide().unwrap();
        assert_eq!(slide.content, "héllo");
        assert_eq!(slide.char_count, 5);
        assert_eq!(slide.updated_at, at(30));
        assert_eq!(transition.state.caret(), 5);
        assert!(transition.state.is_saving());
        assert_eq!(
            transition.effects,
            vec![Effect::UpdateSlide {
                slide_id: 1,
                content: "héllo".into(),
                tone: None,
                revision: 1,
            }]
        );
    }

    #[test]
    fn format_goes_through_save_pipeline() {
        let state = EditorState::new(PROJECT, vec![slide(1, 1, "hello world")]);
        let transition = step(
            &state,
            Command::Format {
                selection: Selection::new(0, 5),
                command: FormatCommand::Bold,
            },
        );
        assert_eq!(transition.state.active_slide().unwrap().content, "**hello** world");
        assert_eq!(transition.state.caret(), 9);
        assert_matches!(transition.effects.as_slice(), [Effect::UpdateSlide { .. }]);
    }

    #[test]
    fn unknown_format_changes_nothing() {
        let state = state_with(1);
        let transition = step(
            &state,
            Command::Format {
                selection: Selection::caret(0),
                command: FormatCommand::Unknown("strike".into()),
            },
        );
        assert!(transition.effects.is_empty());
        assert!(!transition.state.is_saving());
        assert_eq!(transition.state.active_slide().unwrap().content, "slide 1");
    }

    #[test]
    fn bad_selection_is_rejected() {
        let state = state_with(1);
        assert_matches!(
            state.apply(
                Command::Format {
                    selection: Selection::new(3, 50),
                    command: FormatCommand::Italic,
                },
                at(1),
            ),
            Err(Rejection::InvalidSelection(_))
        );
    }

    #[test]
    fn structure_suggestion_replaces_content() {
        let state = state_with(1);
        let suggestion = StyleSuggestion {
            kind: crate::suggestion::SuggestionKind::Structure,
            original: String::new(),
            suggestion: "New text".into(),
        };
        let transition = step(&state, Command::ApplySuggestion(suggestion));
        assert_eq!(transition.state.active_slide().unwrap().content, "New text");
        assert_eq!(transition.effects.len(), 1);
    }

    #[test]
    fn set_tone_saves_with_new_tone() {
        let state = state_with(1);
        let transition = step(&state, Command::SetTone(Some("bold".into())));
        assert_matches!(
            transition.effects.as_slice(),
            [Effect::UpdateSlide { tone: Some(t), .. }] if t == "bold"
        );
    }

    #[test]
    fn revisions_start_above_stored_revision() {
        let mut stored = slide(1, 1, "x");
        stored.revision = 41;
        let state = EditorState::new(PROJECT, vec![stored]);
        let transition = step(&state, Command::EditContent("y".into()));
        assert_matches!(
            transition.effects.as_slice(),
            [Effect::UpdateSlide { revision: 42, .. }]
        );
    }

    #[test]
    fn empty_project_only_accepts_add() {
        let state = EditorState::new(PROJECT, Vec::new());
        assert_eq!(
            state.apply(Command::EditContent("x".into()), at(1)).unwrap_err(),
            Rejection::NoActiveSlide
        );
        assert_eq!(state.apply(Command::DeleteSlide, at(1)).unwrap_err(), Rejection::LastSlide);
        assert_eq!(step(&state, Command::Next).state.active_index(), 0);
        let transition = step(&state, Command::AddSlide);
        assert_matches!(
            transition.effects.as_slice(),
            [Effect::CreateSlide(NewSlide { slide_number: 1, .. })]
        );
    }
}

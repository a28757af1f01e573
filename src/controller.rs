use std::fmt;

use crate::directory::StudentDirectory;
use crate::models::StudentRecord;
use crate::resolver::{self, ResolveError};

/// Which screen is showing, and for whom.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum ViewState<'a> {
    #[default]
    LoggedOut,
    LoggedIn(&'a StudentRecord),
}

impl<'a> ViewState<'a> {
    pub fn student(&self) -> Option<&'a StudentRecord> {
        match *self {
            ViewState::LoggedOut => None,
            ViewState::LoggedIn(student) => Some(student),
        }
    }
}

/// Transient text for the selector screen. Not kept in `ViewState`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserMessage {
    InvalidSelection,
}

impl fmt::Display for UserMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UserMessage::InvalidSelection => write!(f, "Please select a student from the list."),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transition<'a> {
    pub state: ViewState<'a>,
    pub message: Option<UserMessage>,
}

pub fn select_student<'a>(
    directory: &'a StudentDirectory,
    state: ViewState<'a>,
    identifier: &str,
) -> Transition<'a> {
    match resolver::resolve(directory, identifier) {
        Ok(student) => {
            log::debug!("selected student {}", student.id);
            Transition {
                state: ViewState::LoggedIn(student),
                message: None,
            }
        }
        Err(ResolveError::NoSelection) => Transition {
            state,
            message: None,
        },
        Err(err @ ResolveError::NotFound(_)) => {
            log::warn!("selection rejected: {err}");
            Transition {
                state,
                message: Some(UserMessage::InvalidSelection),
            }
        }
    }
}

pub fn logout(state: ViewState<'_>) -> ViewState<'_> {
    if let ViewState::LoggedIn(student) = state {
        log::debug!("logged out of student {}", student.id);
    }
    ViewState::LoggedOut
}

/// Selects a student from the selector screen, failing when nobody loads.
///
/// Used by one-shot surfaces that have no selector to fall back to.
pub fn login<'a>(
    directory: &'a StudentDirectory,
    identifier: &str,
) -> anyhow::Result<&'a StudentRecord> {
    let transition = select_student(directory, ViewState::LoggedOut, identifier);
    if let Some(message) = transition.message {
        anyhow::bail!("{message}");
    }
    match transition.state {
        ViewState::LoggedIn(student) => Ok(student),
        ViewState::LoggedOut => anyhow::bail!("no student selected"),
    }
}

/// Owns the current `ViewState` for a single UI event loop.
#[derive(Debug)]
pub struct ViewStateController<'a> {
    directory: &'a StudentDirectory,
    state: ViewState<'a>,
}

impl<'a> ViewStateController<'a> {
    pub fn new(directory: &'a StudentDirectory) -> Self {
        Self {
            directory,
            state: ViewState::LoggedOut,
        }
    }

    pub fn state(&self) -> ViewState<'a> {
        self.state
    }

    pub fn directory(&self) -> &'a StudentDirectory {
        self.directory
    }

    pub fn select_student(&mut self, identifier: &str) -> Transition<'a> {
        let transition = select_student(self.directory, self.state, identifier);
        self.state = transition.state;
        transition
    }

    pub fn logout(&mut self) -> ViewState<'a> {
        self.state = logout(self.state);
        self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Project, ProjectStatus, TestResult};
    use crate::projection;
    use chrono::NaiveDate;

    fn directory() -> StudentDirectory {
        StudentDirectory::seed().unwrap()
    }

    #[test]
    fn starts_logged_out() {
        let directory = directory();
        let controller = ViewStateController::new(&directory);
        assert_eq!(controller.state(), ViewState::LoggedOut);
        assert_eq!(ViewState::default(), ViewState::LoggedOut);
    }

    #[test]
    fn empty_selection_waits_without_message() {
        let directory = directory();
        let transition = select_student(&directory, ViewState::LoggedOut, "");
        assert_eq!(transition.state, ViewState::LoggedOut);
        assert_eq!(transition.message, None);
    }

    #[test]
    fn unknown_selection_stays_out_with_message() {
        let directory = directory();
        let transition = select_student(&directory, ViewState::LoggedOut, "ghost");
        assert_eq!(transition.state, ViewState::LoggedOut);
        assert_eq!(transition.message, Some(UserMessage::InvalidSelection));
        assert_eq!(
            transition.message.unwrap().to_string(),
            "Please select a student from the list."
        );
    }

    #[test]
    fn valid_selection_logs_in() {
        let directory = directory();
        let mut controller = ViewStateController::new(&directory);
        let transition = controller.select_student("s2");
        assert_eq!(transition.message, None);
        assert_eq!(controller.state().student().map(|s| s.id.as_str()), Some("s2"));
    }

    #[test]
    fn logout_is_idempotent() {
        assert_eq!(logout(ViewState::LoggedOut), ViewState::LoggedOut);

        let directory = directory();
        let mut controller = ViewStateController::new(&directory);
        assert_eq!(controller.logout(), ViewState::LoggedOut);
        assert_eq!(controller.logout(), ViewState::LoggedOut);
    }

    #[test]
    fn select_logout_select_round_trips() {
        let directory = directory();
        let single = select_student(&directory, ViewState::LoggedOut, "s1").state;

        let mut controller = ViewStateController::new(&directory);
        controller.select_student("s1");
        controller.logout();
        let again = controller.select_student("s1").state;

        assert_eq!(single, again);
        assert!(matches!(again, ViewState::LoggedIn(s) if s.id == "s1"));
    }

    #[test]
    fn failed_selection_keeps_loaded_student() {
        let directory = directory();
        let mut controller = ViewStateController::new(&directory);
        controller.select_student("s3");

        let transition = controller.select_student("missing");
        assert_eq!(transition.message, Some(UserMessage::InvalidSelection));
        assert_eq!(controller.state().student().map(|s| s.id.as_str()), Some("s3"));

        controller.select_student("");
        assert_eq!(controller.state().student().map(|s| s.id.as_str()), Some("s3"));

        controller.select_student("s1");
        assert_eq!(controller.state().student().map(|s| s.id.as_str()), Some("s1"));
    }

    #[test]
    fn aigerim_midterm_scenario() {
        let directory = StudentDirectory::new(vec![StudentRecord {
            id: "s1".to_string(),
            name: "Aigerim".to_string(),
            grade: "7A".to_string(),
            test_results: vec![TestResult {
                name: "Midterm:Algebra".to_string(),
                score: 45.0,
                max_score: 50.0,
                date: NaiveDate::from_ymd_opt(2026, 10, 10).unwrap(),
            }],
            midterm_project: Project {
                title: "Calculator".to_string(),
                description: "Console calculator".to_string(),
                grade: "A".to_string(),
                feedback: "Solid".to_string(),
                status: ProjectStatus::Completed,
                tools: vec!["Python".to_string()],
                video_url: None,
                image_url: None,
            },
            feedback: "Great term".to_string(),
            syllabus: Vec::new(),
            external_resources_url: "https://materials.example.com".to_string(),
        }])
        .unwrap();

        let transition = select_student(&directory, ViewState::LoggedOut, "s1");
        let student = transition.state.student().unwrap();
        let points = projection::project(&student.test_results);

        assert_eq!(points.len(), 1);
        assert_eq!(points[0].label, "Midterm");
        assert!((points[0].percentage - 90.0).abs() < 0.001);
        assert_eq!(points[0].display_fraction, "45/50");
    }

    #[test]
    fn login_loads_known_student() {
        let directory = directory();
        let student = login(&directory, "s2").unwrap();
        assert_eq!(student.id, "s2");
    }

    #[test]
    fn login_fails_without_a_valid_student() {
        let directory = directory();
        let empty = login(&directory, "").unwrap_err();
        assert_eq!(empty.to_string(), "no student selected");

        let unknown = login(&directory, "ghost").unwrap_err();
        assert_eq!(unknown.to_string(), "Please select a student from the list.");
    }
}

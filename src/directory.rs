use std::collections::HashSet;
use std::path::Path;

use anyhow::Context;
use chrono::NaiveDate;

use crate::models::{
    Project, ProjectStatus, StudentRecord, SyllabusItem, SyllabusStatus, TestResult,
};

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum DirectoryError {
    #[error("student id `{0}` appears more than once")]
    DuplicateId(String),
    #[error("student at position {0} has an empty id")]
    EmptyId(usize),
}

/// Read-only roster of every student a caregiver can pick.
#[derive(Debug, Clone)]
pub struct StudentDirectory {
    students: Vec<StudentRecord>,
}

impl StudentDirectory {
    pub fn new(students: Vec<StudentRecord>) -> Result<Self, DirectoryError> {
        let mut seen = HashSet::new();
        for (position, student) in students.iter().enumerate() {
            if student.id.is_empty() {
                return Err(DirectoryError::EmptyId(position));
            }
            if !seen.insert(student.id.as_str()) {
                return Err(DirectoryError::DuplicateId(student.id.clone()));
            }
            for result in &student.test_results {
                if result.max_score <= 0.0 {
                    log::warn!(
                        "test `{}` for student {} has max score {}; it will chart as 0%",
                        result.name,
                        student.id,
                        result.max_score
                    );
                }
            }
        }

        Ok(Self { students })
    }

    pub fn from_json_path(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read student data from {}", path.display()))?;
        let students: Vec<StudentRecord> = serde_json::from_str(&raw)
            .with_context(|| format!("invalid student data in {}", path.display()))?;
        let directory = Self::new(students)
            .with_context(|| format!("rejected student data in {}", path.display()))?;
        log::info!(
            "loaded {} students from {}",
            directory.len(),
            path.display()
        );
        Ok(directory)
    }

    /// Students in their original order.
    pub fn list_all(&self) -> &[StudentRecord] {
        &self.students
    }

    pub fn len(&self) -> usize {
        self.students.len()
    }

    pub fn is_empty(&self) -> bool {
        self.students.is_empty()
    }

    /// Built-in demonstration roster.
    pub fn seed() -> anyhow::Result<Self> {
        let date = |y, m, d| NaiveDate::from_ymd_opt(y, m, d).context("invalid date");

        let students = vec![
            StudentRecord {
                id: "s1".to_string(),
                name: "Aigerim Bekova".to_string(),
                grade: "7A".to_string(),
                test_results: vec![
                    TestResult {
                        name: "Quiz 1: Algorithms and flowcharts".to_string(),
                        score: 9.0,
                        max_score: 10.0,
                        date: date(2026, 9, 12)?,
                    },
                    TestResult {
                        name: "Quiz 2: Variables and types".to_string(),
                        score: 7.0,
                        max_score: 10.0,
                        date: date(2026, 9, 26)?,
                    },
                    TestResult {
                        name: "Midterm:Python basics".to_string(),
                        score: 45.0,
                        max_score: 50.0,
                        date: date(2026, 10, 10)?,
                    },
                ],
                midterm_project: Project {
                    title: "Smart Greenhouse".to_string(),
                    description: "Arduino sensors report soil moisture and switch a pump on when the plants need water.".to_string(),
                    grade: "A".to_string(),
                    feedback: "Clean wiring and a clear demo. The threshold logic is well explained.".to_string(),
                    status: ProjectStatus::Completed,
                    tools: vec!["Arduino".to_string(), "C++".to_string(), "Tinkercad".to_string()],
                    video_url: Some("https://media.example.com/projects/s1-greenhouse.mp4".to_string()),
                    image_url: Some("https://media.example.com/projects/s1-greenhouse.jpg".to_string()),
                },
                feedback: "Aigerim asks good questions and helps classmates debug their code.".to_string(),
                syllabus: vec![
                    SyllabusItem {
                        topic: "Algorithms".to_string(),
                        status: SyllabusStatus::Completed,
                        description: "Flowcharts, sequencing and branching.".to_string(),
                    },
                    SyllabusItem {
                        topic: "Python basics".to_string(),
                        status: SyllabusStatus::Completed,
                        description: "Variables, input and output.".to_string(),
                    },
                    SyllabusItem {
                        topic: "Loops".to_string(),
                        status: SyllabusStatus::Current,
                        description: "for and while loops with small games.".to_string(),
                    },
                    SyllabusItem {
                        topic: "Functions".to_string(),
                        status: SyllabusStatus::Upcoming,
                        description: "Splitting programs into reusable parts.".to_string(),
                    },
                ],
                external_resources_url: "https://materials.example.com/7a".to_string(),
            },
            StudentRecord {
                id: "s2".to_string(),
                name: "Nurlan Seitkali".to_string(),
                grade: "7A".to_string(),
                test_results: vec![
                    TestResult {
                        name: "Quiz 1: Algorithms and flowcharts".to_string(),
                        score: 6.0,
                        max_score: 10.0,
                        date: date(2026, 9, 12)?,
                    },
                    TestResult {
                        name: "Quiz 2: Variables and types".to_string(),
                        score: 8.5,
                        max_score: 10.0,
                        date: date(2026, 9, 26)?,
                    },
                    TestResult {
                        name: "Midterm:Python basics".to_string(),
                        score: 38.0,
                        max_score: 50.0,
                        date: date(2026, 10, 10)?,
                    },
                ],
                midterm_project: Project {
                    title: "Quiz Game".to_string(),
                    description: "A terminal trivia game that keeps score and picks random questions.".to_string(),
                    grade: "B".to_string(),
                    feedback: "Works well. Next step is loading questions from a file.".to_string(),
                    status: ProjectStatus::InProgress,
                    tools: vec!["Python".to_string(), "Replit".to_string()],
                    video_url: None,
                    image_url: None,
                },
                feedback: "Nurlan is steadily improving. More practice with loops at home will help.".to_string(),
                syllabus: vec![
                    SyllabusItem {
                        topic: "Algorithms".to_string(),
                        status: SyllabusStatus::Completed,
                        description: "Flowcharts, sequencing and branching.".to_string(),
                    },
                    SyllabusItem {
                        topic: "Python basics".to_string(),
                        status: SyllabusStatus::Completed,
                        description: "Variables, input and output.".to_string(),
                    },
                    SyllabusItem {
                        topic: "Loops".to_string(),
                        status: SyllabusStatus::Current,
                        description: "for and while loops with small games.".to_string(),
                    },
                ],
                external_resources_url: "https://materials.example.com/7a".to_string(),
            },
            StudentRecord {
                id: "s3".to_string(),
                name: "Dana Omarova".to_string(),
                grade: "8B".to_string(),
                test_results: vec![
                    TestResult {
                        name: "Quiz 1: HTML structure".to_string(),
                        score: 10.0,
                        max_score: 10.0,
                        date: date(2026, 9, 15)?,
                    },
                    TestResult {
                        name: "Midterm:Web pages".to_string(),
                        score: 41.0,
                        max_score: 50.0,
                        date: date(2026, 10, 13)?,
                    },
                ],
                midterm_project: Project {
                    title: "School News Site".to_string(),
                    description: "A static site with a news feed and a timetable page.".to_string(),
                    grade: "A".to_string(),
                    feedback: "Good layout. Keep the colour contrast in mind.".to_string(),
                    status: ProjectStatus::Planned,
                    tools: vec!["HTML".to_string(), "CSS".to_string(), "Figma".to_string()],
                    video_url: None,
                    image_url: Some("https://media.example.com/projects/s3-news.png".to_string()),
                },
                feedback: "Dana works independently and finishes tasks early.".to_string(),
                syllabus: vec![
                    SyllabusItem {
                        topic: "HTML".to_string(),
                        status: SyllabusStatus::Completed,
                        description: "Tags, links and images.".to_string(),
                    },
                    SyllabusItem {
                        topic: "CSS".to_string(),
                        status: SyllabusStatus::Current,
                        description: "Selectors, box model and flexbox.".to_string(),
                    },
                    SyllabusItem {
                        topic: "JavaScript".to_string(),
                        status: SyllabusStatus::Upcoming,
                        description: "Events and the DOM.".to_string(),
                    },
                ],
                external_resources_url: "https://materials.example.com/8b".to_string(),
            },
        ];

        Ok(Self::new(students)?)
    }
}

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestResult {
    pub name: String,
    pub score: f64,
    pub max_score: f64,
    pub date: NaiveDate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProjectStatus {
    Completed,
    #[serde(rename = "In Progress")]
    InProgress,
    Planned,
}

impl ProjectStatus {
    pub fn label(self) -> &'static str {
        match self {
            ProjectStatus::Completed => "Completed",
            ProjectStatus::InProgress => "In progress",
            ProjectStatus::Planned => "Planned",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub title: String,
    pub description: String,
    pub grade: String,
    pub feedback: String,
    pub status: ProjectStatus,
    #[serde(default)]
    pub tools: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SyllabusStatus {
    Completed,
    Current,
    Upcoming,
}

impl SyllabusStatus {
    pub fn label(self) -> &'static str {
        match self {
            SyllabusStatus::Completed => "Done",
            SyllabusStatus::Current => "Now",
            SyllabusStatus::Upcoming => "Next",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyllabusItem {
    pub topic: String,
    pub status: SyllabusStatus,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentRecord {
    pub id: String,
    pub name: String,
    pub grade: String,
    #[serde(default)]
    pub test_results: Vec<TestResult>,
    pub midterm_project: Project,
    pub feedback: String,
    #[serde(default)]
    pub syllabus: Vec<SyllabusItem>,
    pub external_resources_url: String,
}

impl StudentRecord {
    /// Text shown for this student in the selector list.
    pub fn choice_label(&self) -> String {
        format!("{} ({})", self.name, self.grade)
    }

    /// Completed syllabus topics over total topics.
    pub fn syllabus_progress(&self) -> (usize, usize) {
        let done = self
            .syllabus
            .iter()
            .filter(|item| item.status == SyllabusStatus::Completed)
            .count();
        (done, self.syllabus.len())
    }
}

/// One bar of the score chart.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartPoint {
    pub label: String,
    pub percentage: f64,
    pub display_fraction: String,
    pub degenerate: bool,
}

impl ChartPoint {
    pub fn is_highlighted(&self) -> bool {
        !self.degenerate && self.percentage > crate::projection::HIGHLIGHT_THRESHOLD
    }
}

impl fmt::Display for ChartPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {:.1}% ({})",
            self.label, self.percentage, self.display_fraction
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statuses_use_source_spelling() {
        let status: ProjectStatus = serde_json::from_str("\"In Progress\"").unwrap();
        assert_eq!(status, ProjectStatus::InProgress);
        let status: SyllabusStatus = serde_json::from_str("\"Upcoming\"").unwrap();
        assert_eq!(status, SyllabusStatus::Upcoming);
        assert!(serde_json::from_str::<SyllabusStatus>("\"Later\"").is_err());
    }

    #[test]
    fn record_reads_camel_case_fields() {
        let raw = r#"{
            "id": "s9",
            "name": "Dana Ospan",
            "grade": "8B",
            "testResults": [
                {"name": "Quiz 1: Loops", "score": 9, "maxScore": 10, "date": "2026-09-12"}
            ],
            "midtermProject": {
                "title": "Weather bot",
                "description": "Telegram bot",
                "grade": "A",
                "feedback": "Nice",
                "status": "Planned",
                "videoUrl": "https://example.com/demo.mp4"
            },
            "feedback": "Keep going",
            "syllabus": [
                {"topic": "Loops", "status": "Completed", "description": "for and while"},
                {"topic": "Functions", "status": "Current", "description": "def"}
            ],
            "externalResourcesUrl": "https://example.com/materials"
        }"#;

        let record: StudentRecord = serde_json::from_str(raw).unwrap();
        assert_eq!(record.test_results[0].max_score, 10.0);
        assert_eq!(
            record.test_results[0].date,
            NaiveDate::from_ymd_opt(2026, 9, 12).unwrap()
        );
        assert!(record.midterm_project.tools.is_empty());
        assert!(record.midterm_project.image_url.is_none());
        assert_eq!(record.choice_label(), "Dana Ospan (8B)");
        assert_eq!(record.syllabus_progress(), (1, 2));
    }
}

use std::fmt::Write;

use crate::controller::{UserMessage, ViewState};
use crate::directory::StudentDirectory;
use crate::models::{ChartPoint, StudentRecord};
use crate::projection;

const BAR_WIDTH: usize = 20;

pub fn render_screen(
    directory: &StudentDirectory,
    state: ViewState<'_>,
    message: Option<UserMessage>,
) -> String {
    match state {
        ViewState::LoggedOut => render_selector(directory, message),
        ViewState::LoggedIn(student) => match message {
            Some(message) => format!("! {message}\n\n{}", render_dashboard(student)),
            None => render_dashboard(student),
        },
    }
}

pub fn render_selector(directory: &StudentDirectory, message: Option<UserMessage>) -> String {
    let mut output = String::new();

    let _ = writeln!(output, "# Parent Portal");
    let _ = writeln!(output, "Choose your child from the list.");
    let _ = writeln!(output);

    if directory.is_empty() {
        let _ = writeln!(output, "No students available.");
    } else {
        for student in directory.list_all() {
            let _ = writeln!(output, "- {}  {}", student.id, student.choice_label());
        }
    }

    if let Some(message) = message {
        let _ = writeln!(output);
        let _ = writeln!(output, "! {message}");
    }

    output
}

pub fn render_dashboard(student: &StudentRecord) -> String {
    let mut output = String::new();
    let project = &student.midterm_project;

    let _ = writeln!(output, "# IT Progress Portal: {}", student.name);
    let _ = writeln!(output, "Learning materials: {}", student.external_resources_url);
    let _ = writeln!(output);
    let _ = writeln!(output, "Midterm grade: {}", project.grade);
    let _ = writeln!(output, "Class: {}", student.grade);
    let _ = writeln!(output);

    let _ = writeln!(output, "## Midterm Project: {}", project.title);
    let _ = writeln!(output, "{}", project.description);
    let _ = writeln!(output, "Status: {}", project.status.label());
    if !project.tools.is_empty() {
        let _ = writeln!(output, "Tools: {}", project.tools.join(", "));
    }
    let _ = writeln!(output, "Teacher grade {}: \"{}\"", project.grade, project.feedback);
    match &project.video_url {
        Some(url) => {
            let _ = writeln!(output, "Demo video: {url}");
        }
        None => {
            let _ = writeln!(output, "Demo video: not uploaded yet");
        }
    }
    if let Some(url) = &project.image_url {
        let _ = writeln!(output, "Poster: {url}");
    }
    let _ = writeln!(output);

    let _ = writeln!(output, "## Test Results (%)");
    let points = projection::project(&student.test_results);
    if points.is_empty() {
        let _ = writeln!(output, "No test results yet.");
    } else {
        for point in &points {
            let _ = writeln!(output, "{}", chart_row(point));
        }
    }
    let _ = writeln!(output);

    let (done, total) = student.syllabus_progress();
    let _ = writeln!(output, "## Syllabus ({done}/{total} completed)");
    for item in &student.syllabus {
        let _ = writeln!(
            output,
            "- [{}] {}: {}",
            item.status.label(),
            item.topic,
            item.description
        );
    }
    let _ = writeln!(output);

    let _ = writeln!(output, "## Teacher Feedback");
    let _ = writeln!(output, "\"{}\"", student.feedback);

    output
}

fn chart_row(point: &ChartPoint) -> String {
    let share = point.percentage.clamp(0.0, 100.0) / 100.0;
    let filled = (share * BAR_WIDTH as f64).round() as usize;
    let marker = if point.is_highlighted() {
        "*"
    } else if point.degenerate {
        "?"
    } else {
        " "
    };
    format!(
        "{marker} {:<12} {}{} {:>5.1}% ({})",
        point.label,
        "#".repeat(filled),
        ".".repeat(BAR_WIDTH - filled),
        point.percentage,
        point.display_fraction
    )
}

/// Writes chart points as CSV with a header row.
pub fn write_chart_csv<W: std::io::Write>(
    writer: W,
    points: &[ChartPoint],
) -> anyhow::Result<()> {
    #[derive(serde::Serialize)]
    struct CsvRow<'a> {
        label: &'a str,
        percentage: f64,
        display_fraction: &'a str,
        highlighted: bool,
        degenerate: bool,
    }

    let mut writer = csv::Writer::from_writer(writer);
    for point in points {
        writer.serialize(CsvRow {
            label: &point.label,
            percentage: point.percentage,
            display_fraction: &point.display_fraction,
            highlighted: point.is_highlighted(),
            degenerate: point.degenerate,
        })?;
    }
    writer.flush()?;
    Ok(())
}

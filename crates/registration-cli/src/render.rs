//! Plain-text rendering of the page: feedback banner, course/grade options and
//! the registered students table.

use registration_client::{
    ListState, StudentRecord, SubmissionOutcome, COLUMNS, COURSES, GRADES,
};
use std::fmt::Write;

const LOADING: &str = "Loading...";
const NO_STUDENTS: &str = "No students registered yet.";

/// Feedback banner. Empty when there is nothing to report.
pub fn banner(outcome: &SubmissionOutcome) -> String {
    match outcome {
        SubmissionOutcome::None => String::new(),
        SubmissionOutcome::Success(message) => format!("[ok] {}", message),
        SubmissionOutcome::Error(message) => format!("[error] {}", message),
    }
}

/// Course and grade choices accepted by the form.
pub fn options() -> String {
    let mut out = String::from("Courses:\n");
    for course in COURSES {
        let _ = writeln!(out, "  {}", course);
    }
    let _ = writeln!(out, "Grades: {}", GRADES.join(", "));
    out
}

/// Registered students table.
pub fn students(state: ListState<'_>) -> String {
    let rows: Vec<[&str; 6]> = match state {
        ListState::Populated(records) => records.iter().map(cells).collect(),
        ListState::Loading | ListState::Empty => Vec::new(),
    };

    let mut widths = COLUMNS.map(str::len);
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::from("Registered Students\n");
    push_row(&mut out, &COLUMNS, &widths);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    push_row(&mut out, &rule.iter().map(String::as_str).collect::<Vec<_>>(), &widths);

    match state {
        ListState::Loading => out.push_str(LOADING),
        ListState::Empty => out.push_str(NO_STUDENTS),
        ListState::Populated(_) => {
            for row in &rows {
                push_row(&mut out, row, &widths);
            }
        }
    }

    out.trim_end().to_string()
}

fn cells(record: &StudentRecord) -> [&str; 6] {
    [
        record.student_name.as_str(),
        record.parent_name.as_str(),
        record.email.as_str(),
        record.phone.as_str(),
        record.course.as_str(),
        record.grade.as_str(),
    ]
}

fn push_row(out: &mut String, cells: &[&str], widths: &[usize]) {
    let line: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{:<width$}", cell, width = width))
        .collect();
    let _ = writeln!(out, "{}", line.join("  ").trim_end());
}

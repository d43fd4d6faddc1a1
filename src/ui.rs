use ratatui::{prelude::*, widgets::*};

use crate::constants::NO_COURSES_SENTINEL;
use crate::models::Student;

/// Format a store-supplied GPA for display with exactly two decimal places.
/// The value is never computed client-side.
pub fn format_gpa(gpa: f64) -> String {
    format!("{:.2}", gpa)
}

/// One-line course summary for the roster table, or the placeholder when
/// the student has no enrollments. Display-only branch.
pub fn format_courses(student: &Student) -> String {
    if student.courses.is_empty() {
        return NO_COURSES_SENTINEL.to_string();
    }

    student
        .courses
        .iter()
        .map(|c| match &c.grade_letter {
            Some(letter) => format!("{} - {}", c.name, letter),
            None => c.name.clone(),
        })
        .collect::<Vec<_>>()
        .join(", ")
}

/// Color for a GPA value in the roster table
pub fn gpa_color(gpa: f64) -> Color {
    if gpa >= 3.5 {
        Color::Green
    } else if gpa >= 2.0 {
        Color::Yellow
    } else {
        Color::Red
    }
}

/// Renders a bordered single-line input field
pub fn render_input<'a>(
    content: &'a str,
    title: &'a str,
    is_focused: bool,
    is_editing: bool,
) -> Paragraph<'a> {
    let border_style = if is_focused && is_editing {
        Style::default().fg(Color::Yellow)
    } else if is_focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(title);

    Paragraph::new(content).block(block)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CourseSummary;

    fn student_with_courses(courses: Vec<CourseSummary>) -> Student {
        Student {
            id: 1,
            name: String::from("Ada"),
            email: String::from("ada@x.com"),
            gpa: 3.666,
            courses,
        }
    }

    #[test]
    fn test_gpa_formats_to_two_decimals() {
        assert_eq!(format_gpa(3.666), "3.67");
        assert_eq!(format_gpa(3.0), "3.00");
        assert_eq!(format_gpa(0.0), "0.00");
    }

    #[test]
    fn test_empty_course_list_shows_sentinel() {
        let student = student_with_courses(Vec::new());
        assert_eq!(format_courses(&student), NO_COURSES_SENTINEL);
    }

    #[test]
    fn test_courses_show_name_and_letter() {
        let student = student_with_courses(vec![
            CourseSummary {
                name: String::from("Algorithms"),
                grade_letter: Some(String::from("A")),
                grade_score: 4.0,
            },
            CourseSummary {
                name: String::from("Databases"),
                grade_letter: None,
                grade_score: 0.0,
            },
        ]);
        assert_eq!(format_courses(&student), "Algorithms - A, Databases");
    }
}

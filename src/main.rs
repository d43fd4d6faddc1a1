//! Gradebook TUI - Actor-based terminal client for a student records service
//!
//! Architecture:
//! - UI Layer (Ratatui) - synchronous terminal rendering
//! - App Layer - central state machine processing events
//! - Network Layer (Tokio) - async HTTP against the record store

mod app;
mod config;
mod constants;
mod messages;
mod models;
mod network;
mod ui;

use std::io;
use std::time::Duration;

use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{prelude::*, widgets::*};
use tokio::sync::mpsc;

use app::AppActor;
use config::Config;
use messages::ui_events::{
    key_to_ui_event, EnrollmentField, InputMode, LookupField, Panel, RegistrationField,
};
use messages::{RenderState, StoreCommand, StoreResponse, UiEvent};
use models::GradeLevel;
use network::{StoreActor, StoreClient};

/// Terminal cleanup guard
struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging to file
    let file_appender = tracing_appender::rolling::never(".", "gradebook.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_ansi(false)
        .init();

    let config = Config::load();
    tracing::info!(base_url = %config.base_url, "Starting gradebook client");

    // Terminal setup
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let _guard = TerminalGuard;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create channels
    let (ui_tx, ui_rx) = mpsc::unbounded_channel::<UiEvent>();
    let (store_cmd_tx, store_cmd_rx) = mpsc::unbounded_channel::<StoreCommand>();
    let (store_resp_tx, store_resp_rx) = mpsc::unbounded_channel::<StoreResponse>();
    let (render_tx, mut render_rx) = mpsc::unbounded_channel::<RenderState>();

    // Spawn store actor
    let store_actor = StoreActor::new(StoreClient::new(config.base_url), store_resp_tx);
    tokio::spawn(store_actor.run(store_cmd_rx));

    // Spawn app actor
    let app_actor = AppActor::new(store_cmd_tx, render_tx);
    tokio::spawn(app_actor.run(ui_rx, store_resp_rx));

    // Run UI loop (synchronous with async polling)
    run_ui_loop(&mut terminal, ui_tx, &mut render_rx).await?;

    Ok(())
}

/// Run the synchronous UI rendering loop
async fn run_ui_loop(
    terminal: &mut Terminal<impl Backend>,
    ui_tx: mpsc::UnboundedSender<UiEvent>,
    render_rx: &mut mpsc::UnboundedReceiver<RenderState>,
) -> anyhow::Result<()> {
    let mut current_state = RenderState::default();

    loop {
        // Draw with current state
        terminal.draw(|f| draw_ui(f, &current_state))?;

        // Poll for events with timeout
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if let Some(event) = key_to_ui_event(
                    key,
                    current_state.active_panel,
                    current_state.input_mode,
                    current_state.show_help,
                    current_state.notice.is_some(),
                ) {
                    if matches!(event, UiEvent::Quit) {
                        let _ = ui_tx.send(event);
                        break;
                    }
                    let _ = ui_tx.send(event);
                }
            }
        }

        // Check for state updates (non-blocking)
        while let Ok(state) = render_rx.try_recv() {
            current_state = state;
        }
    }

    Ok(())
}

// ============================================================================
// UI Drawing Functions
// ============================================================================

fn draw_ui(f: &mut Frame, state: &RenderState) {
    let area = f.area();

    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),  // Header
            Constraint::Min(8),     // Roster table
            Constraint::Length(13), // Form panels
            Constraint::Length(1),  // Status bar
        ])
        .split(area);

    draw_header(f, main_chunks[0]);
    draw_roster(f, state, main_chunks[1]);

    let form_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(33),
            Constraint::Percentage(34),
            Constraint::Percentage(33),
        ])
        .split(main_chunks[2]);

    draw_lookup(f, state, form_chunks[0]);
    draw_enrollment(f, state, form_chunks[1]);
    draw_registration(f, state, form_chunks[2]);

    draw_status_bar(f, state, main_chunks[3]);

    // Popups
    if state.show_help {
        draw_help_popup(f, area);
    }

    if let Some(notice) = &state.notice {
        draw_notice_popup(f, notice, area);
    }
}

fn draw_header(f: &mut Frame, area: Rect) {
    let title = Line::from(vec![
        Span::styled(" Gradebook ", Style::default().fg(Color::Black).bg(Color::Cyan).bold()),
        Span::styled(
            " student records client ",
            Style::default().fg(Color::DarkGray),
        ),
    ]);
    f.render_widget(Paragraph::new(title), area);
}

fn draw_roster(f: &mut Frame, state: &RenderState, area: Rect) {
    let is_focused = state.active_panel == Panel::Roster;
    let border_style = if is_focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };

    let loading = if state.roster_loading { " [...]" } else { "" };
    let refreshed = state
        .last_refreshed
        .as_deref()
        .map(|t| format!(" refreshed {} ", t))
        .unwrap_or_default();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(format!(
            " Student Roster ({}) (r:refresh){} ",
            state.students.len(),
            loading
        ))
        .title_bottom(Line::from(refreshed).right_aligned());

    let header = Row::new(vec!["ID", "Name", "Email", "GPA", "Courses"])
        .style(Style::default().fg(Color::DarkGray).bold());

    let rows: Vec<Row> = state
        .students
        .iter()
        .skip(state.roster_scroll as usize)
        .map(|s| {
            Row::new(vec![
                Cell::from(s.id.to_string()),
                Cell::from(s.name.clone()),
                Cell::from(s.email.clone()),
                Cell::from(ui::format_gpa(s.gpa))
                    .style(Style::default().fg(ui::gpa_color(s.gpa))),
                Cell::from(ui::format_courses(s)),
            ])
        })
        .collect();

    let widths = [
        Constraint::Length(6),
        Constraint::Percentage(18),
        Constraint::Percentage(24),
        Constraint::Length(6),
        Constraint::Percentage(45),
    ];

    let table = Table::new(rows, widths).header(header).block(block);
    f.render_widget(table, area);
}

fn panel_block(title: String, is_focused: bool) -> Block<'static> {
    let border_style = if is_focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };

    Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(title)
}

/// Place the editing cursor inside a rendered input field
fn set_input_cursor(f: &mut Frame, area: Rect, cursor_position: usize) {
    let max_x = area.x + area.width.saturating_sub(2);
    let cursor_x = (area.x + cursor_position as u16 + 1).min(max_x);
    f.set_cursor_position(Position::new(cursor_x, area.y + 1));
}

fn draw_lookup(f: &mut Frame, state: &RenderState, area: Rect) {
    let is_focused = state.active_panel == Panel::Lookup;
    let is_editing = is_focused && state.input_mode == InputMode::Editing;

    let loading = if state.lookup_loading { " [...]" } else { "" };
    let block = panel_block(format!(" Grade Lookup{} ", loading), is_focused);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(1),
        ])
        .split(inner);

    let student_focused = is_focused && state.lookup_field == LookupField::StudentId;
    let course_focused = is_focused && state.lookup_field == LookupField::CourseName;

    f.render_widget(
        ui::render_input(
            &state.lookup_student_id,
            " Student ID ",
            student_focused,
            is_editing,
        ),
        chunks[0],
    );
    f.render_widget(
        ui::render_input(
            &state.lookup_course_name,
            " Course Name ",
            course_focused,
            is_editing,
        ),
        chunks[1],
    );

    // Grade and error are mutually exclusive; render whichever is set
    let result_line = if let Some(error) = &state.lookup_error {
        Line::from(Span::styled(error.clone(), Style::default().fg(Color::Red)))
    } else if let Some(grade) = state.lookup_grade {
        Line::from(vec![
            Span::raw("Score: "),
            Span::styled(format!("{}", grade), Style::default().fg(Color::Green).bold()),
        ])
    } else {
        Line::from(Span::styled(
            "s: look up a grade",
            Style::default().fg(Color::DarkGray),
        ))
    };

    f.render_widget(Paragraph::new(result_line).wrap(Wrap { trim: true }), chunks[2]);

    if is_editing {
        match state.lookup_field {
            LookupField::StudentId => set_input_cursor(f, chunks[0], state.cursor_position),
            LookupField::CourseName => set_input_cursor(f, chunks[1], state.cursor_position),
        }
    }
}

fn draw_enrollment(f: &mut Frame, state: &RenderState, area: Rect) {
    let is_focused = state.active_panel == Panel::Enrollment;
    let is_editing = is_focused && state.input_mode == InputMode::Editing;

    let loading = if state.enrollment_loading { " [...]" } else { "" };
    let block = panel_block(format!(" Add Course{} ", loading), is_focused);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(1),
        ])
        .split(inner);

    let course_focused = is_focused && state.enrollment_field == EnrollmentField::CourseName;
    let student_focused = is_focused && state.enrollment_field == EnrollmentField::StudentId;
    let grade_focused = is_focused && state.enrollment_field == EnrollmentField::GradeId;

    f.render_widget(
        ui::render_input(
            &state.enrollment_course_name,
            " Course Name ",
            course_focused,
            is_editing,
        ),
        chunks[0],
    );
    f.render_widget(
        ui::render_input(
            &state.enrollment_student_id,
            " Student ID ",
            student_focused,
            is_editing,
        ),
        chunks[1],
    );
    f.render_widget(
        ui::render_input(
            &state.enrollment_grade_id,
            " Grade ID ",
            grade_focused,
            is_editing,
        ),
        chunks[2],
    );

    // Static grade scale, known at build time
    let reference = GradeLevel::ALL
        .iter()
        .map(|g| format!("{}:{} ({:.1})", g.id(), g.letter(), g.points()))
        .collect::<Vec<_>>()
        .join("  ");

    f.render_widget(
        Paragraph::new(Line::from(Span::styled(
            reference,
            Style::default().fg(Color::DarkGray),
        ))),
        chunks[3],
    );

    if is_editing {
        match state.enrollment_field {
            EnrollmentField::CourseName => set_input_cursor(f, chunks[0], state.cursor_position),
            EnrollmentField::StudentId => set_input_cursor(f, chunks[1], state.cursor_position),
            EnrollmentField::GradeId => set_input_cursor(f, chunks[2], state.cursor_position),
        }
    }
}

fn draw_registration(f: &mut Frame, state: &RenderState, area: Rect) {
    let is_focused = state.active_panel == Panel::Registration;
    let is_editing = is_focused && state.input_mode == InputMode::Editing;

    let loading = if state.registration_loading { " [...]" } else { "" };
    let block = panel_block(format!(" Add Student{} ", loading), is_focused);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(1),
        ])
        .split(inner);

    let name_focused = is_focused && state.registration_field == RegistrationField::Name;
    let email_focused = is_focused && state.registration_field == RegistrationField::Email;

    f.render_widget(
        ui::render_input(&state.registration_name, " Name ", name_focused, is_editing),
        chunks[0],
    );
    f.render_widget(
        ui::render_input(
            &state.registration_email,
            " Email ",
            email_focused,
            is_editing,
        ),
        chunks[1],
    );

    // Success and error are mutually exclusive
    let message_line = if let Some(error) = &state.registration_error {
        Line::from(Span::styled(error.clone(), Style::default().fg(Color::Red)))
    } else if let Some(success) = &state.registration_success {
        Line::from(Span::styled(
            success.clone(),
            Style::default().fg(Color::Green),
        ))
    } else {
        Line::from(Span::styled(
            "s: register a student",
            Style::default().fg(Color::DarkGray),
        ))
    };

    f.render_widget(
        Paragraph::new(message_line).wrap(Wrap { trim: true }),
        chunks[2],
    );

    if is_editing {
        match state.registration_field {
            RegistrationField::Name => set_input_cursor(f, chunks[0], state.cursor_position),
            RegistrationField::Email => set_input_cursor(f, chunks[1], state.cursor_position),
        }
    }
}

fn draw_status_bar(f: &mut Frame, state: &RenderState, area: Rect) {
    let status = if state.input_mode == InputMode::Editing {
        " ESC:stop editing | Tab:next field | Enter:submit "
    } else if state.active_panel == Panel::Roster {
        " Tab:panel | r:refresh | up/down:scroll | ?:help | q:quit "
    } else {
        " Tab:panel | e:edit | s:submit | ?:help | q:quit "
    };

    let bar = Paragraph::new(status).style(Style::default().fg(Color::DarkGray));
    f.render_widget(bar, area);
}

fn draw_help_popup(f: &mut Frame, area: Rect) {
    let popup_area = centered_rect(60, 70, area);

    let help_text = r#"
 GRADEBOOK TUI - Keyboard Shortcuts

 NAVIGATION
   Tab / Shift+Tab    Switch panels
   Up / Down          Scroll the roster

 ROSTER
   r / Enter          Refresh the student list

 FORMS (lookup, add course, add student)
   e / Enter          Edit the selected field
   Tab (editing)      Next field
   Enter (editing)    Submit
   Esc                Stop editing
   s                  Submit

 GENERAL
   ?                  Toggle this help
   q / Ctrl+C         Quit

 Press any key to close...
"#;

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Help ")
        .style(Style::default().bg(Color::Black));

    let help = Paragraph::new(help_text)
        .block(block)
        .wrap(Wrap { trim: false });

    f.render_widget(Clear, popup_area);
    f.render_widget(help, popup_area);
}

fn draw_notice_popup(f: &mut Frame, notice: &str, area: Rect) {
    let popup_area = centered_rect(40, 20, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Notice ")
        .style(Style::default().bg(Color::Black));

    let lines = vec![
        Line::from(""),
        Line::from(Span::raw(notice.to_string())),
        Line::from(""),
        Line::from(Span::styled(
            "Press any key to continue...",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let popup = Paragraph::new(lines)
        .block(block)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: false });

    f.render_widget(Clear, popup_area);
    f.render_widget(popup, popup_area);
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

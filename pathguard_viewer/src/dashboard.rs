//! PathGuard TUI Dashboard
//! =======================
//!
//! Terminal front-end showing both projection views side by side.
//! Uses Ratatui canvases for the views and Crossterm for input.
//!
//! Enable with the `dashboard` feature flag.
//!
//! Keys:
//! - `p` start a stepped reveal
//! - `c` cancel the running reveal
//! - `f` redraw the full scene
//! - `q` / Esc quit
//!
//! Reveal frames are ticked from the event loop whenever the clock passes
//! the next frame's deadline, so drawing and input share one thread.

use std::io;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use pathguard_core::{AxisRange, ProjectionView, Rgb, Series, Tick, Workbench};
use pathguard_env::PlaybackClock;
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::canvas::{Canvas, Line as CanvasLine, Points},
    widgets::{Block, Borders, Paragraph},
    Frame, Terminal,
};
use tracing::warn;

// =============================================================================
// CONVERSIONS
// =============================================================================

fn to_color(rgb: Rgb) -> Color {
    Color::Rgb(rgb.0, rgb.1, rgb.2)
}

/// Canvas bounds for an axis range; a collapsed range is widened by one unit
/// each way so the canvas never has zero extent.
fn canvas_bounds(range: AxisRange) -> [f64; 2] {
    if range.span() > 0.0 {
        [range.min, range.max]
    } else {
        [range.min - 1.0, range.max + 1.0]
    }
}

// =============================================================================
// VIEWER DASHBOARD
// =============================================================================

/// What a key press asks the event loop to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum KeyAction {
    Continue,
    Quit,
}

/// TUI dashboard over a loaded workbench.
pub struct ViewerDashboard<C: PlaybackClock> {
    workbench: Workbench,
    clock: C,
    /// Input name shown in the header
    source: String,
    /// Clock time at which the next reveal frame is due
    next_frame_at: Option<Duration>,
    /// Last frame index drawn by a reveal
    last_index: Option<usize>,
    /// Last rejected action, shown in the footer
    notice: Option<String>,
}

impl<C: PlaybackClock> ViewerDashboard<C> {
    /// Creates a dashboard over a workbench that already holds a session.
    pub fn new(workbench: Workbench, clock: C, source: impl Into<String>) -> Self {
        Self {
            workbench,
            clock,
            source: source.into(),
            next_frame_at: None,
            last_index: None,
            notice: None,
        }
    }

    pub fn workbench(&self) -> &Workbench {
        &self.workbench
    }

    /// Arms a reveal; the first frame is due immediately.
    pub fn start_reveal(&mut self) {
        match self.workbench.start_reveal() {
            Ok(()) => {
                self.notice = None;
                self.last_index = None;
                self.next_frame_at = Some(self.clock.now());
            }
            Err(e) => {
                warn!("{}", e);
                self.notice = Some(e.to_string());
            }
        }
    }

    /// Draws the next reveal frame if it is due.
    pub fn advance(&mut self) {
        let Some(due) = self.next_frame_at else {
            return;
        };
        if self.clock.now() < due {
            return;
        }

        match self.workbench.tick() {
            Tick::Frame { index, next_in } => {
                self.last_index = Some(index);
                self.next_frame_at = Some(self.clock.now() + next_in);
            }
            Tick::Finished { index } => {
                self.last_index = Some(index);
                self.next_frame_at = None;
            }
            Tick::Idle => self.next_frame_at = None,
        }
    }

    fn handle_key(&mut self, code: KeyCode) -> KeyAction {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => return KeyAction::Quit,
            KeyCode::Char('p') => self.start_reveal(),
            KeyCode::Char('c') => {
                self.workbench.cancel_reveal();
                self.next_frame_at = None;
            }
            KeyCode::Char('f') => match self.workbench.render_full() {
                Ok(()) => {
                    self.notice = None;
                    self.last_index = None;
                }
                Err(e) => self.notice = Some(e.to_string()),
            },
            _ => {}
        }
        KeyAction::Continue
    }

    /// Run the TUI main loop (blocks until 'q' pressed)
    ///
    /// The terminal is restored even when drawing or input fails.
    pub fn run(&mut self) -> io::Result<()> {
        // Setup terminal
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        if let Err(e) = execute!(stdout, EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(e);
        }
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = match Terminal::new(backend) {
            Ok(terminal) => terminal,
            Err(e) => {
                let _ = execute!(io::stdout(), LeaveAlternateScreen);
                let _ = disable_raw_mode();
                return Err(e);
            }
        };

        let result = self.event_loop(&mut terminal);

        // Restore terminal
        let restored = disable_raw_mode()
            .and_then(|()| execute!(terminal.backend_mut(), LeaveAlternateScreen))
            .and_then(|()| terminal.show_cursor());

        result.and(restored)
    }

    fn event_loop(&mut self, terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> io::Result<()> {
        loop {
            self.advance();

            // Draw UI
            terminal.draw(|f| self.ui(f))?;

            // Handle input (non-blocking with 50ms timeout)
            if event::poll(Duration::from_millis(50))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press && self.handle_key(key.code) == KeyAction::Quit {
                        return Ok(());
                    }
                }
            }
        }
    }

    /// Render the UI
    fn ui(&self, f: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(10),   // Views
                Constraint::Length(1), // Footer
            ])
            .split(f.area());

        // === HEADER ===
        let session = self.workbench.session();
        let report = session.report();
        let progress = match self.last_index {
            Some(index) => format!("sample {}/{}", index + 1, session.data().trajectory.len()),
            None => format!("{} samples", session.data().trajectory.len()),
        };
        let header = Paragraph::new(Line::from(vec![
            Span::styled("PathGuard", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw("  |  "),
            Span::raw(self.source.clone()),
            Span::raw("  |  "),
            Span::styled(progress, Style::default().fg(Color::Cyan)),
            Span::raw("  |  "),
            Span::styled(
                format!(
                    "{} off-plan, {} horizon crossings",
                    report.danger_points.len(),
                    report.danger_segment_starts.len()
                ),
                Style::default().fg(if report.is_clear() { Color::Green } else { Color::Red }),
            ),
        ]))
        .block(Block::default().borders(Borders::BOTTOM));
        f.render_widget(header, chunks[0]);

        // === VIEWS ===
        let view_chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(chunks[1]);
        let views = self.workbench.views();
        render_view(f, &views.top, view_chunks[0]);
        render_view(f, &views.side, view_chunks[1]);

        // === FOOTER ===
        let status = self.workbench.status().to_string();
        let footer_text = match &self.notice {
            Some(notice) => format!("{}  {}", notice, status),
            None => format!("{}  [p] reveal  [c] cancel  [f] full  [q] quit", status),
        };
        let footer = Paragraph::new(footer_text).style(Style::default().fg(Color::DarkGray));
        f.render_widget(footer, chunks[2]);
    }
}

/// Draws one projection view as a canvas, series in stored order.
fn render_view(f: &mut Frame, view: &ProjectionView, area: Rect) {
    let title = format!(
        "{} ({} / {})",
        view.title(),
        view.horizontal_axis().title(),
        view.vertical_axis().title()
    );
    let canvas = Canvas::default()
        .block(Block::default().title(title).borders(Borders::ALL))
        .x_bounds(canvas_bounds(view.horizontal_range()))
        .y_bounds(canvas_bounds(view.vertical_range()))
        .paint(|ctx| {
            for series in view.series() {
                match series {
                    Series::Line { color, start, end, .. } => {
                        ctx.draw(&CanvasLine::new(start[0], start[1], end[0], end[1], to_color(*color)));
                    }
                    Series::Points { color, coords, .. } => {
                        let coords: Vec<(f64, f64)> = coords.iter().map(|c| (c[0], c[1])).collect();
                        ctx.draw(&Points {
                            coords: &coords,
                            color: to_color(*color),
                        });
                    }
                }
            }
        });
    f.render_widget(canvas, area);
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pathguard_core::{InputData, Point, SessionStatus, WorkbenchConfig};
    use pathguard_env::ManualClock;

    fn dashboard(samples: usize) -> (ViewerDashboard<ManualClock>, ManualClock) {
        let mut workbench = Workbench::new(&WorkbenchConfig::default());
        workbench
            .load_data(InputData {
                acceptable_deviation: 1.0,
                trajectory: (0..samples).map(|i| Point::new(i as f64, 0.0, 0.0)).collect(),
                plan: vec![],
                horizon: vec![],
            })
            .unwrap();
        let clock = ManualClock::new();
        (ViewerDashboard::new(workbench, clock.clone(), "test"), clock)
    }

    #[test]
    fn test_canvas_bounds_widen_collapsed_range() {
        assert_eq!(canvas_bounds(AxisRange::new(-2.0, 5.0)), [-2.0, 5.0]);
        assert_eq!(canvas_bounds(AxisRange::new(0.0, 0.0)), [-1.0, 1.0]);
    }

    #[test]
    fn test_to_color() {
        assert_eq!(to_color(Rgb(255, 40, 40)), Color::Rgb(255, 40, 40));
    }

    #[test]
    fn test_frames_wait_for_deadline() {
        let (mut dash, clock) = dashboard(3);
        dash.handle_key(KeyCode::Char('p'));

        dash.advance();
        assert_eq!(dash.last_index, Some(0));

        // Not due yet
        dash.advance();
        assert_eq!(dash.last_index, Some(0));

        clock.advance(Duration::from_millis(250));
        dash.advance();
        assert_eq!(dash.last_index, Some(1));

        clock.advance(Duration::from_millis(250));
        dash.advance();
        assert_eq!(dash.last_index, Some(2));
        assert_eq!(dash.workbench().status(), SessionStatus::Idle);
        assert_eq!(dash.next_frame_at, None);
    }

    #[test]
    fn test_cancel_key_stops_reveal() {
        let (mut dash, clock) = dashboard(5);
        dash.handle_key(KeyCode::Char('p'));
        dash.advance();
        dash.handle_key(KeyCode::Char('c'));

        clock.advance(Duration::from_secs(10));
        dash.advance();
        assert_eq!(dash.last_index, Some(0));
        assert!(!dash.workbench().is_revealing());
    }

    #[test]
    fn test_full_redraw_key_refused_mid_reveal() {
        let (mut dash, _clock) = dashboard(5);
        dash.handle_key(KeyCode::Char('p'));
        dash.advance();

        dash.handle_key(KeyCode::Char('f'));
        assert!(dash.notice.is_some());
        assert_eq!(dash.last_index, Some(0));

        dash.handle_key(KeyCode::Char('c'));
        dash.handle_key(KeyCode::Char('f'));
        assert!(dash.notice.is_none());
        assert_eq!(dash.last_index, None);
        assert_eq!(dash.workbench().views().top.series().len(), 5);
    }

    #[test]
    fn test_second_reveal_shows_notice() {
        let (mut dash, _clock) = dashboard(5);
        dash.handle_key(KeyCode::Char('p'));
        dash.handle_key(KeyCode::Char('p'));

        assert!(dash.notice.is_some());
        assert_eq!(dash.handle_key(KeyCode::Char('q')), KeyAction::Quit);
    }
}

// 🖥️ Full-screen pie chart on a ratatui braille canvas
// Only compiled with the "tui" feature

use crate::chart::{PieChart, PieRenderer};
use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{
        canvas::{Canvas, Points},
        Block, Borders, Paragraph,
    },
    Frame, Terminal,
};
use std::io;

const PALETTE: [Color; 8] = [
    Color::Cyan,
    Color::Yellow,
    Color::Green,
    Color::Magenta,
    Color::Blue,
    Color::Red,
    Color::LightCyan,
    Color::LightGreen,
];

/// Radial resolution of the filled wedges
const RINGS: usize = 40;
const STEP_DEG: f64 = 1.5;

/// Half of the visible extent around the unit circle (room for the labels)
const HALF_EXTENT: f64 = 1.35;

pub fn slice_color(index: usize) -> Color {
    PALETTE[index % PALETTE.len()]
}

/// Draws the chart full-screen until q / Esc / Enter
pub struct TerminalPieRenderer;

impl PieRenderer for TerminalPieRenderer {
    fn render(&mut self, chart: &PieChart) -> Result<()> {
        run_chart(chart)
    }
}

pub fn run_chart(chart: &PieChart) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = chart_loop(&mut terminal, chart);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res?;
    Ok(())
}

fn chart_loop<B: Backend>(terminal: &mut Terminal<B>, chart: &PieChart) -> io::Result<()> {
    loop {
        terminal.draw(|f| draw_chart(f, chart))?;

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            match key.code {
                KeyCode::Char('q') | KeyCode::Esc | KeyCode::Enter => return Ok(()),
                _ => {}
            }
        }
    }
}

pub fn draw_chart(f: &mut Frame, chart: &PieChart) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),    // Chart + legend
            Constraint::Length(3), // Status bar
        ])
        .split(f.size());

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(70), Constraint::Percentage(30)])
        .split(chunks[0]);

    render_pie(f, body[0], chart);
    render_legend(f, body[1], chart);
    render_status_bar(f, chunks[1]);
}

/// Canvas bounds that keep the circle round
///
/// A terminal cell is roughly twice as tall as it is wide, so the axis with
/// more room gets stretched to match the other.
pub fn canvas_bounds(area: Rect) -> ([f64; 2], [f64; 2]) {
    let inner_w = area.width.saturating_sub(2).max(1) as f64;
    let inner_h = area.height.saturating_sub(2).max(1) as f64;
    let aspect = inner_w / (2.0 * inner_h);

    if aspect >= 1.0 {
        let half_w = HALF_EXTENT * aspect;
        ([-half_w, half_w], [-HALF_EXTENT, HALF_EXTENT])
    } else {
        let half_h = HALF_EXTENT / aspect;
        ([-HALF_EXTENT, HALF_EXTENT], [-half_h, half_h])
    }
}

fn render_pie(f: &mut Frame, area: Rect, chart: &PieChart) {
    let (x_bounds, y_bounds) = canvas_bounds(area);
    let wedges: Vec<Vec<(f64, f64)>> = chart
        .slices
        .iter()
        .map(|slice| slice.fill_points(RINGS, STEP_DEG))
        .collect();

    let canvas = Canvas::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" {} ", chart.title)),
        )
        .marker(Marker::Braille)
        .x_bounds(x_bounds)
        .y_bounds(y_bounds)
        .paint(|ctx| {
            for (i, coords) in wedges.iter().enumerate() {
                ctx.draw(&Points {
                    coords,
                    color: slice_color(i),
                });
            }
            ctx.layer();
            for slice in &chart.slices {
                let (x, y) = slice.percent_position();
                ctx.print(
                    x,
                    y,
                    Span::styled(
                        slice.percent_label(),
                        Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
                    ),
                );
                let (x, y) = slice.label_position();
                ctx.print(x, y, slice.label.clone());
            }
        });

    f.render_widget(canvas, area);
}

fn render_legend(f: &mut Frame, area: Rect, chart: &PieChart) {
    let lines: Vec<Line> = chart
        .slices
        .iter()
        .enumerate()
        .map(|(i, slice)| {
            Line::from(vec![
                Span::styled("██ ", Style::default().fg(slice_color(i))),
                Span::raw(format!(
                    "{}  ${:.2}  {}",
                    slice.label,
                    slice.value,
                    slice.percent_label()
                )),
            ])
        })
        .collect();

    let legend = Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(" Categories "));
    f.render_widget(legend, area);
}

fn render_status_bar(f: &mut Frame, area: Rect) {
    let help = Paragraph::new(Line::from(vec![
        Span::styled("q", Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)),
        Span::raw(" / "),
        Span::styled("Esc", Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)),
        Span::raw(" / "),
        Span::styled("Enter", Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)),
        Span::raw(" back to menu"),
    ]))
    .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, area);
}

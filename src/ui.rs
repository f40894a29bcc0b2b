// Terminal rendering surface - ratatui canvas map + summary grid

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use fars_analysis::{AxisRange, GeoPoint, MapCanvas, MapExtent, SummaryTable};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{
        canvas::{Canvas, Map, MapResolution, Points},
        Block, Borders, Cell, Paragraph, Row, Table,
    },
    Frame, Terminal,
};
use std::io;

/// Continental US, used when an axis has no usable coordinate
const US_LONGITUDE: [f64; 2] = [-125.0, -66.0];
const US_LATITUDE: [f64; 2] = [24.0, 50.0];

/// Half-width given to an axis whose values are all equal
const DEGENERATE_PADDING: f64 = 0.5;

// ============================================================================
// MAP CANVAS
// ============================================================================

/// Collects draw calls, then renders them as a braille map.
pub struct TerminalMapCanvas {
    title: String,
    region: Option<String>,
    extent: Option<MapExtent>,
    points: Vec<(f64, f64)>,
}

impl TerminalMapCanvas {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            region: None,
            extent: None,
            points: Vec::new(),
        }
    }

    pub fn x_bounds(&self) -> [f64; 2] {
        axis_bounds(self.extent.and_then(|e| e.longitude), US_LONGITUDE)
    }

    pub fn y_bounds(&self) -> [f64; 2] {
        axis_bounds(self.extent.and_then(|e| e.latitude), US_LATITUDE)
    }

    pub fn render(&self, f: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(0),    // Map
                Constraint::Length(3), // Status bar
            ])
            .split(area);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White))
            .title(format!(" {} ", self.title));

        if self.region.is_none() {
            let empty = Paragraph::new("No accidents to plot").block(block);
            f.render_widget(empty, chunks[0]);
        } else {
            let canvas = Canvas::default()
                .block(block)
                .marker(Marker::Braille)
                .x_bounds(self.x_bounds())
                .y_bounds(self.y_bounds())
                .paint(|ctx| {
                    ctx.draw(&Map {
                        color: Color::Green,
                        resolution: MapResolution::High,
                    });
                    ctx.layer();
                    ctx.draw(&Points {
                        coords: &self.points,
                        color: Color::Red,
                    });
                });
            f.render_widget(canvas, chunks[0]);
        }

        let status = Line::from(vec![
            Span::styled(
                format!(" Points: {} ", self.points.len()),
                Style::default().fg(Color::Cyan),
            ),
            Span::raw(" | "),
            Span::styled("q", Style::default().fg(Color::Red)),
            Span::raw(" Quit"),
        ]);
        let status_bar = Paragraph::new(vec![status]).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::White)),
        );
        f.render_widget(status_bar, chunks[1]);
    }
}

impl MapCanvas for TerminalMapCanvas {
    fn draw_region(&mut self, region: &str, extent: &MapExtent) -> fars_analysis::Result<()> {
        self.region = Some(region.to_string());
        self.extent = Some(*extent);
        Ok(())
    }

    fn plot_point(&mut self, point: GeoPoint) -> fars_analysis::Result<()> {
        self.points.push((point.longitude, point.latitude));
        Ok(())
    }
}

fn axis_bounds(range: Option<AxisRange>, fallback: [f64; 2]) -> [f64; 2] {
    match range {
        None => fallback,
        Some(r) if r.is_degenerate() => [r.min - DEGENERATE_PADDING, r.max + DEGENERATE_PADDING],
        Some(r) => [r.min, r.max],
    }
}

// ============================================================================
// SUMMARY GRID
// ============================================================================

pub fn render_summary(f: &mut Frame, area: Rect, summary: &SummaryTable) {
    let header_cells = summary.column_labels().into_iter().map(|h| {
        Cell::from(h).style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
    });
    let header = Row::new(header_cells)
        .style(Style::default().bg(Color::DarkGray))
        .height(1);

    let rows = summary.rows.iter().map(|row| {
        let mut cells = vec![Cell::from(row.month.to_string())];
        cells.extend(row.counts.iter().map(|count| match count {
            Some(n) => Cell::from(n.to_string()),
            None => Cell::from(fars_analysis::summary::NO_DATA)
                .style(Style::default().fg(Color::DarkGray)),
        }));
        Row::new(cells).height(1)
    });

    let widths = vec![Constraint::Length(8); summary.years().len() + 1];
    let table = Table::new(rows, widths).header(header).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White))
            .title(" Accidents per month "),
    );

    f.render_widget(table, area);
}

// ============================================================================
// TERMINAL LOOP
// ============================================================================

pub fn run_map_view(canvas: &TerminalMapCanvas) -> Result<()> {
    run_screen(|f| {
        let area = f.size();
        canvas.render(f, area)
    })
}

pub fn run_summary_view(summary: &SummaryTable) -> Result<()> {
    run_screen(|f| {
        let area = f.size();
        render_summary(f, area, summary)
    })
}

fn run_screen(draw: impl Fn(&mut Frame)) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = wait_for_quit(&mut terminal, &draw);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res.map_err(Into::into)
}

fn wait_for_quit<B: Backend>(
    terminal: &mut Terminal<B>,
    draw: &impl Fn(&mut Frame),
) -> io::Result<()> {
    loop {
        terminal.draw(|f| draw(f))?;

        if let Event::Key(key) = event::read()? {
            if matches!(key.code, KeyCode::Char('q') | KeyCode::Esc) {
                return Ok(());
            }
        }
    }
}

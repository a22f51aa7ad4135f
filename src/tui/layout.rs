//! TUI layout and widget rendering.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::symbols;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph};

use super::runtime::App;
use super::style;

/// Renders the full TUI frame.
pub fn render(frame: &mut Frame, app: &App) {
    let status_height = u16::try_from(app.set().len() + 2).unwrap_or(u16::MAX);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),             // header
            Constraint::Min(10),               // chart
            Constraint::Length(status_height), // values at cursor
            Constraint::Length(1),             // footer
        ])
        .split(frame.area());

    render_header(frame, app, chunks[0]);
    render_chart(frame, app, chunks[1]);
    render_status(frame, app, chunks[2]);
    render_footer(frame, chunks[3]);
}

/// Header bar: seed, profile count, overlay state.
fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let overlay = if app.show_mobility { "on" } else { "off" };
    let header = Line::from(vec![
        Span::styled(
            " POWER SCHEDULE ",
            Style::default()
                .fg(style::HEADER_FG)
                .bg(style::HEADER_BG)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(format!(
            " seed={} │ profiles={} │ horizon={}h │ mobility {} ",
            app.seed(),
            app.set().len(),
            app.horizon(),
            overlay,
        )),
    ]);
    frame.render_widget(Paragraph::new(header), area);
}

/// All visible profiles over the horizon.
fn render_chart(frame: &mut Frame, app: &App, area: Rect) {
    let series = app.series();
    let y_bounds = style::auto_bounds_y(series.iter().map(|s| s.points.as_slice()));
    let x_hi = app.horizon() as f64;

    let datasets: Vec<Dataset> = series
        .iter()
        .map(|s| {
            let color = style::profile_color(&s.name, s.index);
            let (marker, graph) = if s.dotted {
                (symbols::Marker::Dot, GraphType::Scatter)
            } else {
                (symbols::Marker::Braille, GraphType::Line)
            };
            Dataset::default()
                .name(s.name.as_str())
                .marker(marker)
                .graph_type(graph)
                .style(Style::default().fg(color))
                .data(&s.points)
        })
        .collect();

    let chart = Chart::new(datasets)
        .block(
            Block::default()
                .title(" Energy Availability and Mobility Needs ")
                .borders(Borders::ALL),
        )
        .x_axis(
            Axis::default()
                .title("hour")
                .bounds([0.0, x_hi])
                .labels(vec![
                    "0".to_string(),
                    format!("{}", app.horizon() / 2),
                    format!("{}", app.horizon()),
                ]),
        )
        .y_axis(
            Axis::default()
                .title("kW")
                .bounds(y_bounds)
                .labels(vec![
                    format!("{:.1}", y_bounds[0]),
                    format!("{:.1}", y_bounds[1]),
                ]),
        );

    frame.render_widget(chart, area);
}

/// Per-profile value at the cursor hour.
fn render_status(frame: &mut Frame, app: &App, area: Rect) {
    let lines: Vec<Line> = app
        .set()
        .profiles()
        .iter()
        .enumerate()
        .map(|(i, p)| {
            let value = p.schedule.value_at(app.cursor).unwrap_or(0.0);
            Line::from(vec![
                Span::styled(
                    format!("  {:<16}", p.name),
                    Style::default().fg(style::profile_color(&p.name, i)),
                ),
                Span::raw(format!("{value:>7.2} kW")),
            ])
        })
        .collect();

    let block = Block::default()
        .title(format!(" Hour {} ", app.cursor))
        .borders(Borders::ALL);
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

/// Footer with keybinding hints.
fn render_footer(frame: &mut Frame, area: Rect) {
    let footer = Paragraph::new(Line::from(Span::styled(
        " q:Quit  r:Regenerate  m:Mobility  ←/→:Hour",
        Style::default().fg(style::FOOTER_FG),
    )));
    frame.render_widget(footer, area);
}

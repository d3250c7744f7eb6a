use crate::app::App;
use crate::braille::BrailleCanvas;
use crate::coins::{color_for, legend, mintage_width, normalize, SortKey, FIRST_YEAR, LAST_YEAR};
use crate::map::HIGHLIGHT_COLOR;
use crate::table::TableView;
use num_format::{Locale, ToFormattedString};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Margin, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState, Widget, Wrap},
    Frame,
};

const YEAR_COUNT: u16 = LAST_YEAR - FIRST_YEAR + 1;

/// Screen regions (outer rects, borders included)
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AppLayout {
    pub map: Rect,
    pub timeline: Rect,
    pub status: Rect,
    pub tooltip: Rect,
    pub joint: Rect,
    pub legend: Rect,
    pub table: Rect,
}

/// Area inside a bordered block
pub fn inner(rect: Rect) -> Rect {
    rect.inner(Margin::new(1, 1))
}

pub fn layout(area: Rect) -> AppLayout {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(6),    // Map and side panel
            Constraint::Length(4), // Timeline
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(58), Constraint::Percentage(42)])
        .split(rows[0]);

    let side = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5), // Hovered country
            Constraint::Length(5), // Joint coin
            Constraint::Length(4), // Legend
            Constraint::Min(4),    // Coin table
        ])
        .split(columns[1]);

    AppLayout {
        map: columns[0],
        timeline: rows[1],
        status: rows[2],
        tooltip: side[0],
        joint: side[1],
        legend: side[2],
        table: side[3],
    }
}

/// Width of one year slot on the timeline
fn year_slot(inner: Rect) -> u16 {
    (inner.width / YEAR_COUNT).max(1)
}

/// Year under a terminal column of the timeline
pub fn timeline_year_at(inner: Rect, col: u16) -> Option<u16> {
    if col < inner.x || col >= inner.x + inner.width {
        return None;
    }
    let idx = (col - inner.x) / year_slot(inner);
    (idx < YEAR_COUNT).then(|| FIRST_YEAR + idx)
}

/// Render the UI
pub fn render(frame: &mut Frame, app: &App) {
    let areas = app.layout;

    render_map(frame, app, areas.map);
    render_tooltip(frame, app, areas.tooltip);
    render_joint(frame, app, areas.joint);
    render_legend(frame, areas.legend);
    render_table(frame, app, areas.table);
    render_timeline(frame, app, areas.timeline);
    render_status_bar(frame, app, areas.status);
}

fn titled(title: &str) -> Block<'_> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(Span::styled(
            title,
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ))
}

fn render_map(frame: &mut Frame, app: &App, area: Rect) {
    let block = titled(" Eurozone commemorative coins ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if !app.map_renderer.has_data() {
        let msg = Paragraph::new("No map data found").style(Style::default().fg(Color::DarkGray));
        frame.render_widget(msg, inner);
        return;
    }

    let mut canvas = BrailleCanvas::new(inner.width as usize, inner.height as usize);
    app.map_renderer.render(&mut canvas, &app.viewport);
    frame.render_widget(MapWidget { canvas }, inner);
}

/// Custom widget that copies a braille canvas into the frame buffer
struct MapWidget {
    canvas: BrailleCanvas,
}

impl Widget for MapWidget {
    fn render(self, area: Rect, buf: &mut Buffer) {
        for row in 0..self.canvas.height().min(area.height as usize) {
            let y = area.y + row as u16;
            for col in 0..self.canvas.width().min(area.width as usize) {
                let x = area.x + col as u16;
                let cell = self.canvas.cell(col, row);
                if let Some(bg) = cell.bg {
                    buf[(x, y)].set_bg(bg);
                }
                if let Some(glyph) = cell.glyph {
                    buf[(x, y)].set_char(glyph);
                    if let Some(fg) = cell.fg {
                        buf[(x, y)].set_fg(fg);
                    }
                }
            }
        }
    }
}

fn render_tooltip(frame: &mut Frame, app: &App, area: Rect) {
    let text = app
        .hovered_tooltip()
        .map(|tip| {
            let mut lines = tip.lines();
            let mut text = Text::default();
            if let Some(first) = lines.next() {
                let swatch = app
                    .hovered
                    .as_deref()
                    .and_then(|country| app.map_renderer.fill(country))
                    .unwrap_or(Color::Reset);
                text.push_line(Line::from(vec![
                    Span::styled("██ ", Style::default().fg(swatch)),
                    Span::styled(first, Style::default().add_modifier(Modifier::BOLD)),
                ]));
            }
            for line in lines {
                text.push_line(Line::raw(line));
            }
            text
        })
        .unwrap_or_else(|| Text::styled("Hover a country", Style::default().fg(Color::DarkGray)));

    let paragraph = Paragraph::new(text)
        .block(titled(" Country "))
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}

fn render_joint(frame: &mut Frame, app: &App, area: Rect) {
    let text = Text::from(vec![
        Line::raw(app.joint.description.as_str()),
        Line::styled(app.joint.image_path.as_str(), Style::default().fg(Color::DarkGray)),
    ]);
    let title = format!(" Jointly issued coin {} ", app.controller.state().selected_year);
    let paragraph = Paragraph::new(text)
        .block(titled(&title))
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}

fn render_legend(frame: &mut Frame, area: Rect) {
    let mut spans = Vec::new();
    for (label, color) in legend() {
        spans.push(Span::styled("██", Style::default().fg(color)));
        spans.push(Span::raw(format!(" {label}  ")));
    }
    let paragraph = Paragraph::new(Line::from(spans))
        .block(titled(" Price "))
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}

/// Header label with ▲▼, the active direction highlighted
fn sort_header(label: &str, key: SortKey, table: &TableView) -> Cell<'static> {
    let active = Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD);
    let idle = Style::default().fg(Color::DarkGray);
    let (up, down) = match (table.sort_key == key, table.ascending) {
        (true, true) => (active, idle),
        (true, false) => (idle, active),
        (false, _) => (idle, idle),
    };
    Cell::from(Line::from(vec![
        Span::styled(format!("{label} "), Style::default().add_modifier(Modifier::BOLD)),
        Span::styled("▲", up),
        Span::styled("▼", down),
    ]))
}

/// Black text on light swatches, white on dark ones
fn price_text_color(price: f64) -> Color {
    if normalize(price) < 0.5 {
        Color::Black
    } else {
        Color::White
    }
}

fn render_table(frame: &mut Frame, app: &App, area: Rect) {
    let Some(table) = app.table.as_ref() else {
        let msg = Paragraph::new("Click a Eurozone country")
            .style(Style::default().fg(Color::DarkGray))
            .block(titled(" Coins "));
        frame.render_widget(msg, area);
        return;
    };

    let header = Row::new(vec![
        sort_header("Year", SortKey::Year, table),
        Cell::from(Span::styled("Description", Style::default().add_modifier(Modifier::BOLD))),
        sort_header("Price", SortKey::Price, table),
        sort_header("Mintage", SortKey::Mintage, table),
    ]);

    let rows: Vec<Row> = table
        .rows
        .iter()
        .map(|coin| {
            let year_style = if table.is_highlighted(coin) {
                Style::default()
                    .bg(HIGHLIGHT_COLOR)
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            let icon_count = (mintage_width(coin.mint_count) / 10.0).round() as usize;

            Row::new(vec![
                Cell::from(coin.mintage_year.to_string()).style(year_style),
                Cell::from(Text::from(vec![
                    Line::raw(coin.description.clone()),
                    Line::styled(coin.image_path(), Style::default().fg(Color::DarkGray)),
                ])),
                Cell::from(format!("{:.2}€", coin.price)).style(
                    Style::default()
                        .bg(color_for(normalize(coin.price)))
                        .fg(price_text_color(coin.price)),
                ),
                Cell::from(Text::from(vec![
                    Line::styled("●".repeat(icon_count), Style::default().fg(Color::Yellow)),
                    Line::raw(coin.mint_count.to_formatted_string(&Locale::en)),
                ])),
            ])
            .height(2)
        })
        .collect();

    let title = format!(" {} · {} ", table.country, table.flag_path);
    let widget = Table::new(
        rows,
        [
            Constraint::Length(8),
            Constraint::Min(12),
            Constraint::Length(10),
            Constraint::Length(12),
        ],
    )
    .header(header)
    .block(titled(&title));

    let mut state = TableState::default().with_offset(table.scroll);
    frame.render_stateful_widget(widget, area, &mut state);
}

fn render_timeline(frame: &mut Frame, app: &App, area: Rect) {
    let block = titled(" Year ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let selected = app.controller.state().selected_year;
    let slot = year_slot(inner) as usize;

    let mut labels = Vec::new();
    let mut track = String::new();
    for year in FIRST_YEAR..=LAST_YEAR {
        let text = if slot >= 5 {
            year.to_string()
        } else {
            format!("{:02}", year % 100)
        };
        let text: String = format!("{text:<slot$}").chars().take(slot).collect();
        let style = if year == selected {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD | Modifier::REVERSED)
        } else {
            Style::default().fg(Color::Gray)
        };
        labels.push(Span::styled(text, style));

        let knob = if year == selected { "●" } else { "─" };
        track.push_str(knob);
        track.push_str(&"─".repeat(slot.saturating_sub(1)));
    }

    let paragraph = Paragraph::new(vec![
        Line::from(labels),
        Line::styled(track, Style::default().fg(Color::DarkGray)),
    ]);
    frame.render_widget(paragraph, inner);
}

fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let state = app.controller.state();
    let direction = if state.sort_ascending { "▲" } else { "▼" };

    let status = Line::from(vec![
        Span::styled(" Year: ", Style::default().fg(Color::DarkGray)),
        Span::styled(state.selected_year.to_string(), Style::default().fg(Color::Yellow)),
        Span::styled(" | Sort: ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            format!("{} {}", state.sort_key.label(), direction),
            Style::default().fg(Color::Magenta),
        ),
        Span::styled(" | Selected: ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            app.map_renderer.highlighted().unwrap_or("-").to_string(),
            Style::default().fg(Color::Yellow),
        ),
        Span::styled(" | ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            format!("{} euro countries", app.store.eurozone().count()),
            Style::default().fg(Color::Cyan),
        ),
        Span::styled(
            " | ←/→:year y/Y p/P m/M:sort j/k:scroll q:quit",
            Style::default().fg(Color::DarkGray),
        ),
    ]);

    frame.render_widget(Paragraph::new(status), area);
}

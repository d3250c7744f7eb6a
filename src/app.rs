use crate::coins::{JointCoinView, FIRST_YEAR, LAST_YEAR};
use crate::data::{DataStore, Dataset};
use crate::map::{MapRenderer, Viewport};
use crate::selection::{Command, Refresh, SelectionController, SelectionState};
use crate::table::TableView;
use crate::ui::{self, AppLayout};
use ratatui::layout::{Position, Rect};

/// Application state
pub struct App {
    pub store: DataStore,
    pub controller: SelectionController,
    pub map_renderer: MapRenderer,
    pub viewport: Viewport,
    pub layout: AppLayout,
    /// Coins of the selected country, `None` until a euro country is chosen
    pub table: Option<TableView>,
    pub joint: JointCoinView,
    /// Country under the mouse cursor
    pub hovered: Option<String>,
    pub should_quit: bool,
}

impl App {
    pub fn new(dataset: Dataset, state: SelectionState, width: u16, height: u16) -> Self {
        let layout = ui::layout(Rect::new(0, 0, width, height));
        let map_inner = ui::inner(layout.map);
        let joint = dataset.store.joint_for_year(state.selected_year);

        let mut app = Self {
            store: dataset.store,
            controller: SelectionController::new(state),
            map_renderer: MapRenderer::new(dataset.countries),
            // Braille gives 2x4 resolution per character
            viewport: Viewport::europe(map_inner.width as usize * 2, map_inner.height as usize * 4),
            layout,
            table: None,
            joint,
            hovered: None,
            should_quit: false,
        };
        app.apply(Refresh::all());
        app
    }

    /// Recompute the layout when the terminal resizes
    pub fn resize(&mut self, width: u16, height: u16) {
        self.layout = ui::layout(Rect::new(0, 0, width, height));
        let map_inner = ui::inner(self.layout.map);
        self.viewport = Viewport::europe(map_inner.width as usize * 2, map_inner.height as usize * 4);
    }

    /// Run a command through the controller and redraw what it invalidated
    pub fn dispatch(&mut self, command: Command) {
        let refresh = self.controller.apply(&self.store, command);
        if refresh.is_empty() {
            return;
        }
        self.apply(refresh);
    }

    fn apply(&mut self, refresh: Refresh) {
        let state = self.controller.state();

        if refresh.map {
            self.map_renderer.refresh(&self.store, state.selected_year);
        }
        if refresh.joint {
            self.joint = self.store.joint_for_year(state.selected_year);
        }
        if refresh.table {
            if let Some(table) = TableView::build(&self.store, state) {
                self.table = Some(table);
            }
        }
        if refresh.year_highlight {
            if let Some(table) = self.table.as_mut() {
                table.set_highlight_year(state.selected_year);
            }
        }
        if refresh.outline {
            self.map_renderer.highlight(&self.store, &state.selected_country);
        }
    }

    /// Request quit
    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    /// Move the timeline by `delta` years, stopping at either end
    pub fn step_year(&mut self, delta: i32) {
        let year = self.controller.state().selected_year as i32 + delta;
        let year = year.clamp(FIRST_YEAR as i32, LAST_YEAR as i32) as u16;
        self.dispatch(Command::SelectYear(year));
    }

    pub fn scroll_table(&mut self, delta: i32) {
        if let Some(table) = self.table.as_mut() {
            table.scroll_by(delta);
        }
    }

    /// Braille pixel at the center of a terminal cell, if it is on the map
    fn map_pixel(&self, col: u16, row: u16) -> Option<(f64, f64)> {
        let inner = ui::inner(self.layout.map);
        if !inner.contains(Position::new(col, row)) {
            return None;
        }
        let px = (col - inner.x) as f64 * 2.0 + 1.0;
        let py = (row - inner.y) as f64 * 4.0 + 2.0;
        Some((px, py))
    }

    fn country_at(&self, col: u16, row: u16) -> Option<String> {
        let (px, py) = self.map_pixel(col, row)?;
        self.map_renderer
            .hit_test(&self.viewport, px, py)
            .map(str::to_string)
    }

    /// Left click: select a country on the map or a year on the timeline
    pub fn click(&mut self, col: u16, row: u16) {
        if let Some(country) = self.country_at(col, row) {
            self.dispatch(Command::SelectCountry(country));
            return;
        }
        let timeline = ui::inner(self.layout.timeline);
        if timeline.contains(Position::new(col, row)) {
            if let Some(year) = ui::timeline_year_at(timeline, col) {
                self.dispatch(Command::SelectYear(year));
            }
        }
    }

    /// Mouse wheel: scroll the table under the cursor, step years elsewhere
    pub fn wheel(&mut self, col: u16, row: u16, delta: i32) {
        if self.layout.table.contains(Position::new(col, row)) {
            self.scroll_table(delta);
        } else if self.layout.map.contains(Position::new(col, row))
            || self.layout.timeline.contains(Position::new(col, row))
        {
            self.step_year(delta);
        }
    }

    /// Track the country under the mouse cursor
    pub fn hover(&mut self, col: u16, row: u16) {
        self.hovered = self.country_at(col, row);
    }

    /// Tooltip of the hovered country for the selected year
    pub fn hovered_tooltip(&self) -> Option<&str> {
        self.hovered
            .as_deref()
            .and_then(|country| self.map_renderer.tooltip(country))
    }
}

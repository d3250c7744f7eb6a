use crate::braille::BrailleCanvas;
use crate::coins::{CountryStatus, NON_PARTICIPANT_COLOR};
use crate::data::DataStore;
use crate::map::geometry::{self, draw_circle, draw_line, fill_circle_cells, fill_polygon};
use crate::map::projection::Viewport;
use crate::map::spatial::FeatureGrid;
use glam::DVec2;
use ratatui::style::Color;
use rayon::prelude::*;

/// A geographic line (sequence of lon/lat coordinates)
pub type LineString = Vec<(f64, f64)>;

/// One country as read from the boundary file
#[derive(Clone, Debug)]
pub struct CountryFeature {
    pub name: String,
    /// Polygons, each a list of rings (exterior first)
    pub polygons: Vec<Vec<LineString>>,
}

/// Countries too small to see as polygons at this scale; drawn as markers
const SMALL_COUNTRIES: [&str; 6] = [
    "Vatican City",
    "Monaco",
    "Luxembourg",
    "San Marino",
    "Andorra",
    "Malta",
];

/// Fixed marker positions that replace the boundary data entirely
/// (the supplied outline for the Vatican is unusable)
const LOCATION_OVERRIDES: [(&str, (f64, f64)); 1] = [("Vatican City", (12.36062, 41.88378))];

/// Marker radius in braille pixels
pub const MARKER_RADIUS: i32 = 2;
/// Outline of the selected country
pub const HIGHLIGHT_COLOR: Color = Color::Rgb(0x0b, 0x4c, 0x92);
const BORDER_COLOR: Color = Color::White;
/// Grid cell size in degrees for hit testing
const GRID_CELL_DEGREES: f64 = 1.0;

fn is_small_country(name: &str) -> bool {
    SMALL_COUNTRIES.contains(&name)
}

fn location_override(name: &str) -> Option<(f64, f64)> {
    LOCATION_OVERRIDES
        .iter()
        .find(|(n, _)| *n == name)
        .map(|&(_, location)| location)
}

enum ShapeKind {
    /// All rings of all polygons, filled even-odd
    Polygon(Vec<LineString>),
    Marker { lon: f64, lat: f64 },
}

struct Shape {
    name: String,
    kind: ShapeKind,
}

struct CountryStyle {
    fill: Color,
    tooltip: String,
}

/// Choropleth of the Eurozone: one shape per country, restyled per year
pub struct MapRenderer {
    shapes: Vec<Shape>,
    styles: Vec<CountryStyle>,
    grid: FeatureGrid,
    highlighted: Option<usize>,
}

impl MapRenderer {
    pub fn new(features: Vec<CountryFeature>) -> Self {
        let mut shapes = Vec::with_capacity(features.len() + LOCATION_OVERRIDES.len());

        for feature in features {
            if location_override(&feature.name).is_some() {
                continue;
            }
            if is_small_country(&feature.name) {
                match geometry::centroid(&feature.polygons) {
                    Some((lon, lat)) => shapes.push(Shape {
                        name: feature.name,
                        kind: ShapeKind::Marker { lon, lat },
                    }),
                    None => log::warn!("No outline for {}, not drawn", feature.name),
                }
                continue;
            }
            let rings: Vec<LineString> = feature.polygons.into_iter().flatten().collect();
            if rings.is_empty() {
                log::warn!("No outline for {}, not drawn", feature.name);
                continue;
            }
            shapes.push(Shape {
                name: feature.name,
                kind: ShapeKind::Polygon(rings),
            });
        }

        for (name, (lon, lat)) in LOCATION_OVERRIDES {
            shapes.push(Shape {
                name: name.to_string(),
                kind: ShapeKind::Marker { lon, lat },
            });
        }

        let grid = FeatureGrid::build(
            shapes.iter().enumerate().filter_map(|(idx, shape)| match &shape.kind {
                ShapeKind::Polygon(rings) => {
                    geometry::bbox(std::slice::from_ref(rings)).map(|b| (idx, b))
                }
                ShapeKind::Marker { .. } => None,
            }),
            GRID_CELL_DEGREES,
        );

        Self {
            shapes,
            styles: Vec::new(),
            grid,
            highlighted: None,
        }
    }

    /// Check if any country outline is loaded
    pub fn has_data(&self) -> bool {
        self.shapes
            .iter()
            .any(|s| matches!(s.kind, ShapeKind::Polygon(_)))
    }

    /// Recompute fill and tooltip of every country for `year`
    pub fn refresh(&mut self, store: &DataStore, year: u16) {
        self.styles = self
            .shapes
            .par_iter()
            .map(|shape| {
                let status = CountryStatus::classify(store, &shape.name, year);
                CountryStyle {
                    fill: status.fill(),
                    tooltip: status.tooltip(),
                }
            })
            .collect();
    }

    /// Outline `country`. Non-euro names leave the current outline alone;
    /// a euro country without a shape ends up with no outline.
    pub fn highlight(&mut self, store: &DataStore, country: &str) {
        if !store.is_eurozone(country) {
            return;
        }
        self.highlighted = self.shapes.iter().position(|s| s.name == country);
        if self.highlighted.is_none() {
            log::warn!("No map shape for {}, outline skipped", country);
        }
    }

    pub fn highlighted(&self) -> Option<&str> {
        self.highlighted.map(|idx| self.shapes[idx].name.as_str())
    }

    fn index_of(&self, country: &str) -> Option<usize> {
        self.shapes.iter().position(|s| s.name == country)
    }

    /// Tooltip of `country` for the last refreshed year
    pub fn tooltip(&self, country: &str) -> Option<&str> {
        self.index_of(country)
            .and_then(|idx| self.styles.get(idx))
            .map(|style| style.tooltip.as_str())
    }

    /// Fill of `country` for the last refreshed year
    pub fn fill(&self, country: &str) -> Option<Color> {
        self.index_of(country)
            .and_then(|idx| self.styles.get(idx))
            .map(|style| style.fill)
    }

    fn fill_at(&self, idx: usize) -> Color {
        self.styles
            .get(idx)
            .map(|style| style.fill)
            .unwrap_or(NON_PARTICIPANT_COLOR)
    }

    /// Render all countries to the canvas
    pub fn render(&self, canvas: &mut BrailleCanvas, viewport: &Viewport) {
        // Fills first so borders stay visible on top
        for (idx, shape) in self.shapes.iter().enumerate() {
            if let ShapeKind::Polygon(rings) = &shape.kind {
                let projected: Vec<Vec<DVec2>> = rings
                    .iter()
                    .map(|ring| ring.iter().map(|&(lon, lat)| viewport.project_f(lon, lat)).collect())
                    .collect();
                fill_polygon(canvas, &projected, self.fill_at(idx));
            }
        }

        for shape in &self.shapes {
            if let ShapeKind::Polygon(rings) = &shape.kind {
                for ring in rings {
                    self.draw_linestring(canvas, ring, viewport, BORDER_COLOR);
                }
            }
        }

        for (idx, shape) in self.shapes.iter().enumerate() {
            if let ShapeKind::Marker { lon, lat } = shape.kind {
                let (px, py) = viewport.project(lon, lat);
                if Some(idx) == self.highlighted {
                    fill_circle_cells(canvas, px, py, MARKER_RADIUS, HIGHLIGHT_COLOR);
                }
                draw_circle(canvas, px, py, MARKER_RADIUS, self.fill_at(idx));
            }
        }

        if let Some(idx) = self.highlighted {
            if let ShapeKind::Polygon(rings) = &self.shapes[idx].kind {
                for ring in rings {
                    self.draw_linestring(canvas, ring, viewport, HIGHLIGHT_COLOR);
                }
            }
        }
    }

    /// Draw a linestring with viewport culling
    fn draw_linestring(&self, canvas: &mut BrailleCanvas, line: &LineString, viewport: &Viewport, color: Color) {
        if line.len() < 2 {
            return;
        }

        let mut prev: Option<(i32, i32)> = None;

        for &(lon, lat) in line {
            let (px, py) = viewport.project(lon, lat);

            if let Some((prev_x, prev_y)) = prev {
                if viewport.line_might_be_visible((prev_x, prev_y), (px, py)) {
                    draw_line(canvas, prev_x, prev_y, px, py, color);
                }
            }

            prev = Some((px, py));
        }
    }

    /// Country under a braille pixel. Markers win over the polygons below them.
    pub fn hit_test(&self, viewport: &Viewport, px: f64, py: f64) -> Option<&str> {
        let reach = (MARKER_RADIUS + 1) as f64;
        let marker = self
            .shapes
            .iter()
            .filter_map(|shape| match shape.kind {
                ShapeKind::Marker { lon, lat } => {
                    let d = viewport.project_f(lon, lat).distance(DVec2::new(px, py));
                    (d <= reach).then_some((d, shape))
                }
                ShapeKind::Polygon(_) => None,
            })
            .min_by(|a, b| a.0.total_cmp(&b.0));
        if let Some((_, shape)) = marker {
            return Some(shape.name.as_str());
        }

        let (lon, lat) = viewport.unproject(px, py);
        self.grid
            .query_point(lon, lat)
            .iter()
            .map(|&idx| &self.shapes[idx])
            .find(|shape| match &shape.kind {
                ShapeKind::Polygon(rings) => geometry::contains(rings, lon, lat),
                ShapeKind::Marker { .. } => false,
            })
            .map(|shape| shape.name.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coins::{color_for, coin, normalize, NO_COIN_COLOR};

    fn square(name: &str, lon: f64, lat: f64, size: f64) -> CountryFeature {
        CountryFeature {
            name: name.to_string(),
            polygons: vec![vec![vec![
                (lon, lat),
                (lon + size, lat),
                (lon + size, lat + size),
                (lon, lat + size),
                (lon, lat),
            ]]],
        }
    }

    fn store() -> DataStore {
        let mut slovakia = coin("Slovakia", 2023, 10.0, 1000);
        slovakia.country_map_name = "Slovensko".to_string();
        let mut slovakia_top = coin("Slovakia", 2023, 25.0, 1000);
        slovakia_top.country_map_name = "Slovensko".to_string();
        DataStore::new(
            vec![
                slovakia,
                slovakia_top,
                coin("Malta", 2023, 3.0, 10),
                coin("Vatican City", 2020, 30.0, 10),
                coin("Luxembourg", 2023, 5.0, 10),
            ],
            Vec::new(),
        )
    }

    fn renderer() -> MapRenderer {
        let mut map = MapRenderer::new(vec![
            square("Slovensko", 17.0, 47.5, 4.0),
            square("Polska", 14.0, 52.0, 8.0),
            square("Malta", 14.2, 35.8, 0.4),
            // Broken outline, replaced by the fixed location
            square("Vatican City", 0.0, 0.0, 1.0),
        ]);
        map.refresh(&store(), 2023);
        map
    }

    #[test]
    fn test_styles_follow_status() {
        let map = renderer();
        assert_eq!(map.fill("Slovensko"), Some(color_for(normalize(25.0))));
        assert_eq!(map.fill("Polska"), Some(NON_PARTICIPANT_COLOR));
        assert_eq!(map.fill("Vatican City"), Some(NO_COIN_COLOR));
        assert_eq!(map.tooltip("Polska"), Some("Polska\nNot in the Eurozone"));
        assert_eq!(
            map.tooltip("Vatican City"),
            Some("Vatican City\nNo coin issued this year")
        );
        assert!(map.has_data());
    }

    #[test]
    fn test_vatican_uses_fixed_location() {
        let map = renderer();
        let vatican: Vec<&Shape> = map.shapes.iter().filter(|s| s.name == "Vatican City").collect();
        assert_eq!(vatican.len(), 1);
        match vatican[0].kind {
            ShapeKind::Marker { lon, lat } => assert_eq!((lon, lat), (12.36062, 41.88378)),
            ShapeKind::Polygon(_) => panic!("Vatican drawn as polygon"),
        }
    }

    #[test]
    fn test_vatican_added_without_feature() {
        let map = MapRenderer::new(Vec::new());
        assert_eq!(map.shapes.len(), 1);
        assert!(!map.has_data());
    }

    #[test]
    fn test_small_country_is_marker_at_centroid() {
        let map = renderer();
        let malta = map.shapes.iter().find(|s| s.name == "Malta").unwrap();
        match malta.kind {
            ShapeKind::Marker { lon, lat } => {
                assert!((lon - 14.4).abs() < 1e-9);
                assert!((lat - 36.0).abs() < 1e-9);
            }
            ShapeKind::Polygon(_) => panic!("Malta drawn as polygon"),
        }
    }

    #[test]
    fn test_hit_test() {
        let map = renderer();
        let vp = Viewport::europe(400, 260);

        let p = vp.project_f(19.0, 49.5);
        assert_eq!(map.hit_test(&vp, p.x, p.y), Some("Slovensko"));

        let p = vp.project_f(20.0, 56.0);
        assert_eq!(map.hit_test(&vp, p.x, p.y), Some("Polska"));

        let p = vp.project_f(12.36062, 41.88378);
        assert_eq!(map.hit_test(&vp, p.x + 1.0, p.y), Some("Vatican City"));

        let p = vp.project_f(-30.0, 30.0);
        assert_eq!(map.hit_test(&vp, p.x, p.y), None);
    }

    #[test]
    fn test_single_highlight() {
        let store = store();
        let mut map = renderer();

        map.highlight(&store, "Slovensko");
        assert_eq!(map.highlighted(), Some("Slovensko"));

        map.highlight(&store, "Malta");
        assert_eq!(map.highlighted(), Some("Malta"));

        // Non-euro selection leaves the outline alone
        map.highlight(&store, "Polska");
        assert_eq!(map.highlighted(), Some("Malta"));

        // Euro country missing from the map: outline removed
        map.highlight(&store, "Luxembourg");
        assert_eq!(map.highlighted(), None);
    }

    #[test]
    fn test_render_fills_and_outlines() {
        let store = store();
        let mut map = renderer();
        map.highlight(&store, "Slovensko");

        let vp = Viewport::europe(400, 260);
        let mut canvas = BrailleCanvas::new(200, 65);
        map.render(&mut canvas, &vp);

        let inside = vp.project(19.0, 49.5);
        let cell = canvas.cell(inside.0 as usize / 2, inside.1 as usize / 4);
        assert_eq!(cell.bg, Some(color_for(normalize(25.0))));

        let edge = vp.project(17.0, 49.5);
        let cell = canvas.cell(edge.0 as usize / 2, edge.1 as usize / 4);
        assert_eq!(cell.fg, Some(HIGHLIGHT_COLOR));
    }
}

use crate::braille::BrailleCanvas;
use crate::map::LineString;
use glam::DVec2;
use ratatui::style::Color;

/// Draw a line using Bresenham's algorithm
pub fn draw_line(canvas: &mut BrailleCanvas, x0: i32, y0: i32, x1: i32, y1: i32, color: Color) {
    let dx = (x1 - x0).abs();
    let dy = -(y1 - y0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    let mut x = x0;
    let mut y = y0;

    loop {
        canvas.set_pixel_signed(x, y, color);

        if x == x1 && y == y1 {
            break;
        }

        let e2 = 2 * err;

        if e2 >= dy {
            if x == x1 {
                break;
            }
            err += dy;
            x += sx;
        }

        if e2 <= dx {
            if y == y1 {
                break;
            }
            err += dx;
            y += sy;
        }
    }
}

/// Draw a filled circle (country markers)
pub fn draw_circle(canvas: &mut BrailleCanvas, cx: i32, cy: i32, radius: i32, color: Color) {
    for dy in -radius..=radius {
        for dx in -radius..=radius {
            if dx * dx + dy * dy <= radius * radius {
                canvas.set_pixel_signed(cx + dx, cy + dy, color);
            }
        }
    }
}

/// Flood every character cell covered by a circle (marker outline)
pub fn fill_circle_cells(canvas: &mut BrailleCanvas, cx: i32, cy: i32, radius: i32, color: Color) {
    let min_x = (cx - radius).max(0) / 2;
    let max_x = (cx + radius).max(0) / 2;
    let min_y = (cy - radius).max(0) / 4;
    let max_y = (cy + radius).max(0) / 4;
    for row in min_y..=max_y {
        for col in min_x..=max_x {
            canvas.fill_cell(col as usize, row as usize, color);
        }
    }
}

/// Scanline fill at character-cell resolution. `rings` are in pixel space
/// and combined with the even-odd rule, so holes stay empty.
pub fn fill_polygon(canvas: &mut BrailleCanvas, rings: &[Vec<DVec2>], color: Color) {
    let mut crossings: Vec<f64> = Vec::new();

    for row in 0..canvas.height() {
        // Sample through the middle of the cell
        let y = (row * 4 + 2) as f64;
        crossings.clear();

        for ring in rings {
            for pair in ring.windows(2) {
                let (a, b) = (pair[0], pair[1]);
                if (a.y <= y) != (b.y <= y) {
                    crossings.push(a.x + (y - a.y) * (b.x - a.x) / (b.y - a.y));
                }
            }
        }

        crossings.sort_by(|a, b| a.total_cmp(b));
        for span in crossings.chunks_exact(2) {
            // Cell `col` is inside when its center x = col*2+1 lies in [start, end)
            let start = ((span[0] - 1.0) / 2.0).ceil().max(0.0) as usize;
            let end = (((span[1] - 1.0) / 2.0).ceil().max(0.0) as usize).min(canvas.width());
            for col in start..end {
                canvas.fill_cell(col, row, color);
            }
        }
    }
}

/// Even-odd point-in-polygon over all rings of one country
pub fn contains(rings: &[LineString], lon: f64, lat: f64) -> bool {
    let mut inside = false;
    for ring in rings {
        for pair in ring.windows(2) {
            let ((x0, y0), (x1, y1)) = (pair[0], pair[1]);
            if (y0 > lat) != (y1 > lat) && lon < x0 + (lat - y0) * (x1 - x0) / (y1 - y0) {
                inside = !inside;
            }
        }
    }
    inside
}

/// Area-weighted planar centroid of a set of polygons (lon, lat)
pub fn centroid(polygons: &[Vec<LineString>]) -> Option<(f64, f64)> {
    let mut area = 0.0;
    let mut weighted = DVec2::ZERO;
    let mut vertex_sum = DVec2::ZERO;
    let mut vertex_count = 0usize;

    for ring in polygons.iter().flatten() {
        for pair in ring.windows(2) {
            let a = DVec2::new(pair[0].0, pair[0].1);
            let b = DVec2::new(pair[1].0, pair[1].1);
            let cross = a.perp_dot(b);
            area += cross;
            weighted += (a + b) * cross;
        }
        for &(x, y) in ring {
            vertex_sum += DVec2::new(x, y);
            vertex_count += 1;
        }
    }

    if vertex_count == 0 {
        return None;
    }
    if area.abs() < 1e-12 {
        // Degenerate outline: fall back to the vertex mean
        let mean = vertex_sum / vertex_count as f64;
        return Some((mean.x, mean.y));
    }

    let c = weighted / (3.0 * area);
    Some((c.x, c.y))
}

/// Bounding box (min_lon, min_lat, max_lon, max_lat) of a set of polygons
pub fn bbox(polygons: &[Vec<LineString>]) -> Option<(f64, f64, f64, f64)> {
    polygons
        .iter()
        .flatten()
        .flatten()
        .fold(None, |acc, &(x, y)| match acc {
            None => Some((x, y, x, y)),
            Some((min_x, min_y, max_x, max_y)) => {
                Some((min_x.min(x), min_y.min(y), max_x.max(x), max_y.max(y)))
            }
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    const INK: Color = Color::White;

    fn square(x0: f64, y0: f64, size: f64) -> LineString {
        vec![
            (x0, y0),
            (x0 + size, y0),
            (x0 + size, y0 + size),
            (x0, y0 + size),
            (x0, y0),
        ]
    }

    #[test]
    fn test_horizontal_line() {
        let mut canvas = BrailleCanvas::new(5, 1);
        draw_line(&mut canvas, 0, 0, 9, 0, INK);
        assert_eq!(canvas.to_string(), "⠉⠉⠉⠉⠉");
    }

    #[test]
    fn test_vertical_line() {
        let mut canvas = BrailleCanvas::new(1, 2);
        draw_line(&mut canvas, 0, 0, 0, 7, INK);
        assert_eq!(canvas.to_string(), "⡇\n⡇");
    }

    #[test]
    fn test_fill_polygon_cells() {
        // 3x2 cells canvas = 6x8 pixels; square covering pixels x 0..4, y 0..8
        let mut canvas = BrailleCanvas::new(3, 2);
        let ring: Vec<DVec2> = square(0.0, 0.0, 4.0)
            .into_iter()
            .map(|(x, y)| DVec2::new(x, y * 2.0))
            .collect();
        fill_polygon(&mut canvas, &[ring], Color::Blue);

        for row in 0..2 {
            assert_eq!(canvas.cell(0, row).bg, Some(Color::Blue));
            assert_eq!(canvas.cell(1, row).bg, Some(Color::Blue));
            assert_eq!(canvas.cell(2, row).bg, None);
        }
    }

    #[test]
    fn test_fill_respects_holes() {
        let mut canvas = BrailleCanvas::new(6, 3);
        let to_px = |ring: LineString| -> Vec<DVec2> {
            ring.into_iter().map(|(x, y)| DVec2::new(x, y)).collect()
        };
        let outer = to_px(square(0.0, 0.0, 12.0));
        let hole = to_px(square(4.0, 4.0, 4.0));
        fill_polygon(&mut canvas, &[outer, hole], Color::Blue);

        // Row 1 samples y = 6, inside the hole for x in [4, 8)
        assert_eq!(canvas.cell(0, 1).bg, Some(Color::Blue));
        assert_eq!(canvas.cell(2, 1).bg, None);
        assert_eq!(canvas.cell(4, 1).bg, Some(Color::Blue));
    }

    #[test]
    fn test_contains_with_hole() {
        let rings = vec![square(0.0, 0.0, 10.0), square(4.0, 4.0, 2.0)];
        assert!(contains(&rings, 1.0, 1.0));
        assert!(!contains(&rings, 5.0, 5.0));
        assert!(!contains(&rings, 11.0, 5.0));
    }

    #[test]
    fn test_centroid_of_square() {
        let (x, y) = centroid(&[vec![square(2.0, 4.0, 2.0)]]).unwrap();
        assert!((x - 3.0).abs() < 1e-12);
        assert!((y - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_centroid_weights_by_area() {
        let big = vec![square(0.0, 0.0, 3.0)];
        let small = vec![square(10.0, 0.0, 1.0)];
        let (x, _) = centroid(&[big, small]).unwrap();
        // (1.5 * 9 + 10.5 * 1) / 10
        assert!((x - 2.4).abs() < 1e-12);
        assert!(centroid(&[]).is_none());
    }

    #[test]
    fn test_bbox() {
        let polygons = vec![vec![square(1.0, 2.0, 3.0)], vec![square(-5.0, 0.0, 1.0)]];
        assert_eq!(bbox(&polygons), Some((-5.0, 0.0, 4.0, 5.0)));
        assert_eq!(bbox(&[]), None);
    }
}

use glam::DVec2;

/// Reference frame the map layout was designed for (pixels)
const REFERENCE_WIDTH: f64 = 1050.0;
const REFERENCE_HEIGHT: f64 = 690.0;
/// Where the projection center lands inside the reference frame
const REFERENCE_TRANSLATE: (f64, f64) = (480.0, 250.0);
/// Pixels per radian inside the reference frame
const REFERENCE_SCALE: f64 = 1070.0;

/// Equirectangular viewport over the Eurozone, in braille pixels
#[derive(Clone, Debug)]
pub struct Viewport {
    /// Center longitude (degrees)
    pub center_lon: f64,
    /// Center latitude (degrees)
    pub center_lat: f64,
    /// Pixels per radian
    pub scale: f64,
    /// Pixel position of the center
    pub translate: DVec2,
    /// Canvas pixel width
    pub width: usize,
    /// Canvas pixel height
    pub height: usize,
}

impl Viewport {
    /// Fit the reference Europe frame into a canvas of the given size,
    /// keeping its aspect ratio and centering the slack.
    pub fn europe(width: usize, height: usize) -> Self {
        let factor = (width as f64 / REFERENCE_WIDTH).min(height as f64 / REFERENCE_HEIGHT);
        let pad_x = (width as f64 - REFERENCE_WIDTH * factor) / 2.0;
        let pad_y = (height as f64 - REFERENCE_HEIGHT * factor) / 2.0;

        Self {
            center_lon: 8.9,
            center_lat: 57.75,
            scale: REFERENCE_SCALE * factor,
            translate: DVec2::new(
                pad_x + REFERENCE_TRANSLATE.0 * factor,
                pad_y + REFERENCE_TRANSLATE.1 * factor,
            ),
            width,
            height,
        }
    }

    /// Project to fractional pixel coordinates
    pub fn project_f(&self, lon: f64, lat: f64) -> DVec2 {
        let dx = (lon - self.center_lon).to_radians();
        let dy = (lat - self.center_lat).to_radians();
        DVec2::new(
            self.translate.x + dx * self.scale,
            self.translate.y - dy * self.scale,
        )
    }

    /// Project a geographic coordinate (lon, lat) to pixel coordinates
    pub fn project(&self, lon: f64, lat: f64) -> (i32, i32) {
        let p = self.project_f(lon, lat);
        (p.x.floor() as i32, p.y.floor() as i32)
    }

    /// Unproject pixel coordinates back to geographic coordinates (lon, lat)
    pub fn unproject(&self, px: f64, py: f64) -> (f64, f64) {
        let lon = self.center_lon + ((px - self.translate.x) / self.scale).to_degrees();
        let lat = self.center_lat - ((py - self.translate.y) / self.scale).to_degrees();
        (lon, lat)
    }

    /// Check if a line segment might be visible (rough bounding box check)
    pub fn line_might_be_visible(&self, p1: (i32, i32), p2: (i32, i32)) -> bool {
        let min_x = p1.0.min(p2.0);
        let max_x = p1.0.max(p2.0);
        let min_y = p1.1.min(p2.1);
        let max_y = p1.1.max(p2.1);

        max_x >= 0
            && min_x < self.width as i32
            && max_y >= 0
            && min_y < self.height as i32
    }
}

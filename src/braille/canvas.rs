use ratatui::style::Color;

/// Braille Unicode canvas for high-resolution terminal graphics.
/// Each character cell represents a 2x4 pixel grid (8 dots). Dots carry a
/// single ink color per cell; a cell may also be flooded with a paper
/// (background) color, which is how choropleth fills are drawn.
pub struct BrailleCanvas {
    width: usize,  // Characters
    height: usize, // Characters
    pixels: Vec<Vec<u8>>,
    ink: Vec<Vec<Option<Color>>>,
    paper: Vec<Vec<Option<Color>>>,
}

/// What one terminal cell should display
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CanvasCell {
    /// Braille glyph, `None` when no dot is set
    pub glyph: Option<char>,
    pub fg: Option<Color>,
    pub bg: Option<Color>,
}

impl BrailleCanvas {
    /// Create a new canvas with the given character dimensions.
    /// Effective pixel resolution: width*2 x height*4
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![vec![0u8; width]; height],
            ink: vec![vec![None; width]; height],
            paper: vec![vec![None; width]; height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Set a pixel at the given coordinates; the whole cell takes `color`.
    /// Braille dot layout per character:
    /// ```text
    /// (0,0) (1,0)   bits: 0x01 0x08
    /// (0,1) (1,1)   bits: 0x02 0x10
    /// (0,2) (1,2)   bits: 0x04 0x20
    /// (0,3) (1,3)   bits: 0x40 0x80
    /// ```
    pub fn set_pixel(&mut self, x: usize, y: usize, color: Color) {
        let cx = x / 2;
        let cy = y / 4;

        if cx >= self.width || cy >= self.height {
            return;
        }

        let bit = match (x % 2, y % 4) {
            (0, 0) => 0x01,
            (1, 0) => 0x08,
            (0, 1) => 0x02,
            (1, 1) => 0x10,
            (0, 2) => 0x04,
            (1, 2) => 0x20,
            (0, 3) => 0x40,
            (1, 3) => 0x80,
            _ => 0,
        };

        self.pixels[cy][cx] |= bit;
        self.ink[cy][cx] = Some(color);
    }

    /// Set a pixel using signed coordinates (ignores negative values)
    pub fn set_pixel_signed(&mut self, x: i32, y: i32, color: Color) {
        if x >= 0 && y >= 0 {
            self.set_pixel(x as usize, y as usize, color);
        }
    }

    /// Flood a character cell with a background color
    pub fn fill_cell(&mut self, cx: usize, cy: usize, color: Color) {
        if cx < self.width && cy < self.height {
            self.paper[cy][cx] = Some(color);
        }
    }

    /// Read back one character cell
    pub fn cell(&self, cx: usize, cy: usize) -> CanvasCell {
        if cx >= self.width || cy >= self.height {
            return CanvasCell { glyph: None, fg: None, bg: None };
        }
        let bits = self.pixels[cy][cx];
        CanvasCell {
            glyph: (bits != 0).then(|| char::from_u32(0x2800 + bits as u32).unwrap_or(' ')),
            fg: self.ink[cy][cx],
            bg: self.paper[cy][cx],
        }
    }

    /// Convert the dot layer to a string of Braille characters
    #[cfg(test)]
    pub fn to_string(&self) -> String {
        self.pixels
            .iter()
            .map(|row| {
                row.iter()
                    .map(|&b| char::from_u32(0x2800 + b as u32).unwrap_or(' '))
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

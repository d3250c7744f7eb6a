use ratatui::style::Color;

/// Fill for countries that do not use the euro
pub const NON_PARTICIPANT_COLOR: Color = Color::Rgb(0, 0, 0);
/// Fill for Eurozone countries that issued nothing in the selected year
pub const NO_COIN_COLOR: Color = Color::Rgb(128, 128, 128);

/// Price breakpoints (euro, normalized). Stretched at the low end so the
/// many cheap coins do not collapse into a single shade.
const PRICE_BREAKS: [(f64, f64); 5] = [
    (0.0, 0.0),
    (3.0, 0.26),
    (5.0, 0.5),
    (20.0, 0.78),
    (50.0, 1.0),
];

/// Mintage breakpoints (coins struck, icon width in px)
const MINTAGE_BREAKS: [(f64, f64); 4] = [
    (50_000.0, 20.0),
    (500_000.0, 30.0),
    (5_000_000.0, 40.0),
    (20_000_000.0, 50.0),
];

/// ColorBrewer BuPu, nine classes, light to dark
const BU_PU: [(u8, u8, u8); 9] = [
    (0xf7, 0xfc, 0xfd),
    (0xe0, 0xec, 0xf4),
    (0xbf, 0xd3, 0xe6),
    (0x9e, 0xbc, 0xda),
    (0x8c, 0x96, 0xc6),
    (0x8c, 0x6b, 0xb1),
    (0x88, 0x41, 0x9d),
    (0x81, 0x0f, 0x7c),
    (0x4d, 0x00, 0x4b),
];

/// Prices shown in the legend
const LEGEND_PRICES: [f64; 5] = [3.0, 5.0, 10.0, 20.0, 50.0];

/// Piecewise-linear lookup, clamped to the first/last value outside the table
fn piecewise(breaks: &[(f64, f64)], x: f64) -> f64 {
    let (first_x, first_y) = breaks[0];
    if x <= first_x {
        return first_y;
    }
    for pair in breaks.windows(2) {
        let (x0, y0) = pair[0];
        let (x1, y1) = pair[1];
        if x <= x1 {
            return y0 + (x - x0) / (x1 - x0) * (y1 - y0);
        }
    }
    breaks[breaks.len() - 1].1
}

/// Map a price in euro onto [0, 1]
pub fn normalize(price: f64) -> f64 {
    if price.is_nan() {
        return 0.0;
    }
    piecewise(&PRICE_BREAKS, price)
}

/// Uniform cubic B-spline through one channel of the ramp
fn basis(t: f64, v0: f64, v1: f64, v2: f64, v3: f64) -> f64 {
    let t2 = t * t;
    let t3 = t2 * t;
    ((1.0 - 3.0 * t + 3.0 * t2 - t3) * v0
        + (4.0 - 6.0 * t2 + 3.0 * t3) * v1
        + (1.0 + 3.0 * t + 3.0 * t2 - 3.0 * t3) * v2
        + t3 * v3)
        / 6.0
}

fn channel(values: &[f64], t: f64) -> f64 {
    let n = values.len() - 1;
    let (i, t) = if t <= 0.0 {
        (0, 0.0)
    } else if t >= 1.0 {
        (n - 1, 1.0)
    } else {
        ((t * n as f64).floor() as usize, t)
    };

    let v1 = values[i];
    let v2 = values[i + 1];
    let v0 = if i > 0 { values[i - 1] } else { 2.0 * v1 - v2 };
    let v3 = if i < n - 1 { values[i + 2] } else { 2.0 * v2 - v1 };

    basis((t - i as f64 / n as f64) * n as f64, v0, v1, v2, v3)
}

/// Sequential Blue-Purple color for a normalized value
pub fn color_for(normalized: f64) -> Color {
    let t = if normalized.is_nan() { 0.0 } else { normalized };
    let reds: Vec<f64> = BU_PU.iter().map(|c| c.0 as f64).collect();
    let greens: Vec<f64> = BU_PU.iter().map(|c| c.1 as f64).collect();
    let blues: Vec<f64> = BU_PU.iter().map(|c| c.2 as f64).collect();

    let to_u8 = |v: f64| v.round().clamp(0.0, 255.0) as u8;
    Color::Rgb(
        to_u8(channel(&reds, t)),
        to_u8(channel(&greens, t)),
        to_u8(channel(&blues, t)),
    )
}

/// Legend entries: price stops followed by the two sentinels
pub fn legend() -> Vec<(String, Color)> {
    let mut entries: Vec<(String, Color)> = LEGEND_PRICES
        .iter()
        .enumerate()
        .map(|(i, &price)| {
            let label = if i == LEGEND_PRICES.len() - 1 {
                format!("{price}€+")
            } else {
                format!("{price}€")
            };
            (label, color_for(normalize(price)))
        })
        .collect();
    entries.push(("no coin".to_string(), NO_COIN_COLOR));
    entries.push(("not in Eurozone".to_string(), NON_PARTICIPANT_COLOR));
    entries
}

/// Width in px of the mintage icon, 20 for rare coins up to 50 for mass issues
pub fn mintage_width(mint_count: u64) -> f64 {
    piecewise(&MINTAGE_BREAKS, mint_count as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_normalize_breakpoints() {
        assert!(approx(normalize(0.0), 0.0));
        assert!(approx(normalize(3.0), 0.26));
        assert!(approx(normalize(5.0), 0.5));
        assert!(approx(normalize(20.0), 0.78));
        assert!(approx(normalize(50.0), 1.0));
    }

    #[test]
    fn test_normalize_clamps() {
        assert_eq!(normalize(-4.0), 0.0);
        assert_eq!(normalize(120.0), 1.0);
        assert_eq!(normalize(f64::NAN), 0.0);
    }

    #[test]
    fn test_normalize_interpolates() {
        assert!(approx(normalize(1.5), 0.13));
        assert!(approx(normalize(4.0), 0.38));
        assert!(approx(normalize(35.0), 0.89));
    }

    #[test]
    fn test_normalize_monotonic() {
        let mut last = normalize(0.0);
        for step in 1..=1200 {
            let value = normalize(step as f64 * 0.05);
            assert!(value >= last, "dropped at {}", step as f64 * 0.05);
            last = value;
        }
    }

    #[test]
    fn test_color_ramp_ends() {
        assert_eq!(color_for(0.0), Color::Rgb(0xf7, 0xfc, 0xfd));
        assert_eq!(color_for(1.0), Color::Rgb(0x4d, 0x00, 0x4b));
        assert_eq!(color_for(-1.0), color_for(0.0));
        assert_eq!(color_for(2.0), color_for(1.0));
    }

    #[test]
    fn test_color_darkens_with_price() {
        let brightness = |c: Color| match c {
            Color::Rgb(r, g, b) => r as u32 + g as u32 + b as u32,
            _ => unreachable!(),
        };
        assert!(brightness(color_for(normalize(2.0))) > brightness(color_for(normalize(25.0))));
    }

    #[test]
    fn test_sentinels_differ_from_ramp() {
        assert_ne!(NON_PARTICIPANT_COLOR, NO_COIN_COLOR);
        assert_ne!(color_for(1.0), NON_PARTICIPANT_COLOR);
    }

    #[test]
    fn test_legend_labels() {
        let entries = legend();
        assert_eq!(entries.len(), 7);
        assert_eq!(entries[0].0, "3€");
        assert_eq!(entries[4].0, "50€+");
        assert_eq!(entries[5].1, NO_COIN_COLOR);
    }

    #[test]
    fn test_mintage_width() {
        assert_eq!(mintage_width(1_000), 20.0);
        assert_eq!(mintage_width(50_000), 20.0);
        assert!(approx(mintage_width(275_000), 25.0));
        assert_eq!(mintage_width(5_000_000), 40.0);
        assert_eq!(mintage_width(90_000_000), 50.0);
    }
}

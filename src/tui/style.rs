//! Colour constants and auto-scaling helpers for the TUI.

use ratatui::style::Color;

/// Grid Energy line colour.
pub const GRID_COLOR: Color = Color::Rgb(0x1f, 0x77, 0xb4);
/// Solar Power line colour.
pub const SOLAR_COLOR: Color = Color::Rgb(0xff, 0x7f, 0x0e);
/// Surplus Solar line colour.
pub const SURPLUS_COLOR: Color = Color::Rgb(0x2c, 0xa0, 0x2c);
/// Mobility Needs overlay colour.
pub const MOBILITY_COLOR: Color = Color::Rgb(0xd6, 0x27, 0x28);
/// Colours for profiles without a fixed one, cycled by position.
const PALETTE: [Color; 5] = [
    Color::Cyan,
    Color::Magenta,
    Color::Yellow,
    Color::LightBlue,
    Color::LightGreen,
];
/// Header bar foreground.
pub const HEADER_FG: Color = Color::White;
/// Header bar background.
pub const HEADER_BG: Color = Color::DarkGray;
/// Footer help text colour.
pub const FOOTER_FG: Color = Color::DarkGray;

/// Colour for a profile, by name, falling back to the palette by position.
pub fn profile_color(name: &str, index: usize) -> Color {
    match name {
        "Grid Energy" => GRID_COLOR,
        "Solar Power" => SOLAR_COLOR,
        "Surplus Solar" => SURPLUS_COLOR,
        "Mobility Needs" => MOBILITY_COLOR,
        _ => PALETTE[index % PALETTE.len()],
    }
}

/// Computes Y-axis bounds over every series with 10% padding.
pub fn auto_bounds_y<'a>(series: impl IntoIterator<Item = &'a [(f64, f64)]>) -> [f64; 2] {
    let (min, max) = series
        .into_iter()
        .flatten()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &(_, y)| {
            (lo.min(y), hi.max(y))
        });
    if !min.is_finite() || !max.is_finite() {
        return [-1.0, 1.0];
    }
    let range = (max - min).max(0.1);
    let pad = range * 0.1;
    [min - pad, max + pad]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_profiles_keep_their_colours() {
        assert_eq!(profile_color("Solar Power", 3), SOLAR_COLOR);
        assert_eq!(profile_color("Mobility Needs", 0), MOBILITY_COLOR);
        assert_eq!(profile_color("Profile 1", 0), PALETTE[0]);
        assert_eq!(profile_color("Profile 7", 6), PALETTE[1]);
    }

    #[test]
    fn bounds_pad_across_series() {
        let a = [(0.0, 10.0), (1.0, 20.0)];
        let b = [(0.0, 30.0)];
        let [lo, hi] = auto_bounds_y([&a[..], &b[..]]);
        assert!((lo - 8.0).abs() < 1e-9);
        assert!((hi - 32.0).abs() < 1e-9);
    }

    #[test]
    fn empty_series_fall_back() {
        assert_eq!(auto_bounds_y(std::iter::empty()), [-1.0, 1.0]);
    }
}

use std::fmt;

use chrono::{DateTime, Utc};

use crate::models::grid::Cell;

/// Tile colour of an empty cell.
pub const EMPTY_TILE_COLOR: &str = "#fff";

pub const PASTEL_SATURATION: u8 = 70;
pub const PASTEL_LIGHTNESS: u8 = 85;

const MINUTE: i64 = 60;
const HOUR: i64 = 3_600;
const DAY: i64 = 86_400;

/// Short label for how long ago the cell was planted: `45s`, `2m`, `2h`, `2d`.
/// Empty for unoccupied cells and plantings without a recorded time.
pub fn display_age(cell: &Cell, now: DateTime<Utc>) -> String {
    let Some(planted_at) = cell.planting.as_ref().and_then(|p| p.planted_at) else {
        return String::new();
    };
    let secs = (now - planted_at).num_seconds().max(0);
    if secs < MINUTE {
        format!("{secs}s")
    } else if secs < HOUR {
        format!("{}m", secs / MINUTE)
    } else if secs < DAY {
        format!("{}h", secs / HOUR)
    } else {
        format!("{}d", secs / DAY)
    }
}

/// HSL pastel with fixed saturation and lightness.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PastelColor {
    pub hue: u16,
}

impl fmt::Display for PastelColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "hsl({}, {}%, {}%)",
            self.hue, PASTEL_SATURATION, PASTEL_LIGHTNESS
        )
    }
}

/// Stable tile colour for a flower name.
///
/// `h = unit + ((h << 5) - h)` over the UTF-16 code units, where only the
/// shift truncates to 32 bits; the sum itself is kept exact. The hue is the
/// non-negative remainder mod 360.
pub fn color_for(name: &str) -> PastelColor {
    let hash = name.encode_utf16().fold(0i64, |h, unit| {
        let shifted = i64::from((h as i32).wrapping_shl(5));
        i64::from(unit) + shifted - h
    });
    PastelColor {
        hue: hash.rem_euclid(360) as u16,
    }
}

/// First character of the name, uppercased.
pub fn tile_label(name: &str) -> String {
    name.chars()
        .next()
        .map(|c| c.to_uppercase().collect())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::grid::Planting;
    use chrono::Duration;

    fn planted_ago(now: DateTime<Utc>, ms: i64) -> Cell {
        Cell {
            row: 0,
            col: 0,
            planting: Some(Planting {
                flower_id: "tulip".into(),
                planted_at: Some(now - Duration::milliseconds(ms)),
            }),
        }
    }

    #[test]
    fn test_age_seconds() {
        let now = Utc::now();
        assert_eq!(display_age(&planted_ago(now, 45_000), now), "45s");
    }

    #[test]
    fn test_age_minutes() {
        let now = Utc::now();
        assert_eq!(display_age(&planted_ago(now, 125_000), now), "2m");
    }

    #[test]
    fn test_age_hours() {
        let now = Utc::now();
        assert_eq!(display_age(&planted_ago(now, 7_200_000), now), "2h");
    }

    #[test]
    fn test_age_days() {
        let now = Utc::now();
        assert_eq!(display_age(&planted_ago(now, 172_800_000), now), "2d");
    }

    #[test]
    fn test_age_thresholds_floor() {
        let now = Utc::now();
        assert_eq!(display_age(&planted_ago(now, 59_999), now), "59s");
        assert_eq!(display_age(&planted_ago(now, 60_000), now), "1m");
        assert_eq!(display_age(&planted_ago(now, 3_599_000), now), "59m");
        assert_eq!(display_age(&planted_ago(now, 86_399_000), now), "23h");
    }

    #[test]
    fn test_age_of_empty_cell_is_blank() {
        assert_eq!(display_age(&Cell::empty(0, 0), Utc::now()), "");
    }

    #[test]
    fn test_age_without_recorded_time_is_blank() {
        let cell = Cell {
            row: 0,
            col: 0,
            planting: Some(Planting {
                flower_id: "tulip".into(),
                planted_at: None,
            }),
        };
        assert_eq!(display_age(&cell, Utc::now()), "");
    }

    #[test]
    fn test_age_in_future_clamps_to_zero() {
        let now = Utc::now();
        assert_eq!(display_age(&planted_ago(now, -5_000), now), "0s");
    }

    #[test]
    fn test_color_is_deterministic() {
        assert_eq!(color_for("Tulip"), color_for("Tulip"));
        assert_eq!(color_for("Tulip").to_string(), color_for("Tulip").to_string());
    }

    #[test]
    fn test_color_known_values() {
        // "a" → 97; "ab" → 98 + 97 * 31 = 3105 → 3105 mod 360 = 225
        assert_eq!(color_for("a").hue, 97);
        assert_eq!(color_for("ab").hue, 225);
        assert_eq!(color_for("").hue, 0);
    }

    #[test]
    fn test_color_long_names_keep_exact_sum() {
        // Sums past i32::MAX must not wrap: 8914968378 mod 360 = 18.
        assert_eq!(color_for("Lavandula angustifolia").hue, 18);
        assert_eq!(color_for("Black-eyed Susan").hue, 159);
        assert_eq!(color_for("Tulip").hue, 346);
    }

    #[test]
    fn test_color_hue_in_range_for_long_names() {
        for name in ["Tulip", "Rose", "Lavandula angustifolia 'Hidcote Superior'", "ñandú 🌸"] {
            assert!(color_for(name).hue < 360, "hue for {name} out of range");
        }
    }

    #[test]
    fn test_color_renders_as_hsl() {
        assert_eq!(color_for("a").to_string(), "hsl(97, 70%, 85%)");
    }

    #[test]
    fn test_tile_label() {
        assert_eq!(tile_label("tulip"), "T");
        assert_eq!(tile_label("ßlume"), "SS");
        assert_eq!(tile_label(""), "");
    }
}

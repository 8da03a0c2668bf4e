use serde::Serialize;

use crate::{
    error::ColorError,
    rgb::{MAX_DISTANCE, Rgb},
    table::{ColorEntry, ColorTable},
};

// Strictly above any reachable distance, so the first entry always updates it
const SENTINEL_DISTANCE: u16 = 1000;
const _: () = assert!(SENTINEL_DISTANCE > MAX_DISTANCE);

/// The winning entry of a nearest-color query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ColorMatch<'a> {
    pub entry: &'a ColorEntry,
    pub distance: u16,
}

impl<'a> ColorMatch<'a> {
    pub fn name(&self) -> &'a str {
        &self.entry.name
    }
}

impl ColorTable {
    /// Linear scan by Manhattan distance. On equal distances the entry
    /// appearing last in table order wins.
    pub fn nearest(&self, query: Rgb) -> Result<ColorMatch<'_>, ColorError> {
        let mut minimum = SENTINEL_DISTANCE;
        let mut best = None;

        for entry in self {
            let distance = query.manhattan(entry.rgb);
            if distance <= minimum {
                minimum = distance;
                best = Some(entry);
            }
        }

        best.map(|entry| ColorMatch {
            entry,
            distance: minimum,
        })
        .ok_or(ColorError::EmptyTable)
    }
}

/// Name of the reference color closest to `(r, g, b)`.
pub fn nearest_color(table: &ColorTable, r: u8, g: u8, b: u8) -> Result<&str, ColorError> {
    table.nearest(Rgb::new(r, g, b)).map(|m| m.name())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(entries: &[(&str, u8, u8, u8)]) -> ColorTable {
        ColorTable::from_entries(
            "test",
            entries
                .iter()
                .map(|&(name, r, g, b)| ColorEntry::new(name, r, g, b))
                .collect(),
        )
    }

    #[test]
    fn later_entry_wins_a_tie() {
        let t = table(&[("Red", 255, 0, 0), ("Crimson", 255, 0, 0)]);
        assert_eq!(nearest_color(&t, 255, 0, 0).unwrap(), "Crimson");
    }

    #[test]
    fn tie_at_non_zero_distance() {
        // both are 10 away from (100, 100, 100)
        let t = table(&[("Darker", 90, 100, 100), ("Far", 0, 0, 0), ("Lighter", 110, 100, 100)]);
        let m = t.nearest(Rgb::new(100, 100, 100)).unwrap();
        assert_eq!(m.name(), "Lighter");
        assert_eq!(m.distance, 10);
    }

    #[test]
    fn earlier_strictly_closer_entry_is_kept() {
        let t = table(&[("Near", 10, 10, 10), ("Farther", 20, 20, 20)]);
        assert_eq!(nearest_color(&t, 12, 12, 12).unwrap(), "Near");
    }

    #[test]
    fn black_at_origin() {
        let t = table(&[("White", 255, 255, 255), ("Black", 0, 0, 0)]);
        let m = t.nearest(Rgb::new(0, 0, 0)).unwrap();
        assert_eq!(m.name(), "Black");
        assert_eq!(m.distance, 0);
    }

    #[test]
    fn white_over_black() {
        let t = table(&[("White", 255, 255, 255), ("Black", 0, 0, 0)]);
        assert_eq!(nearest_color(&t, 255, 255, 255).unwrap(), "White");
    }

    #[test]
    fn single_entry_at_max_distance() {
        let t = table(&[("Black", 0, 0, 0)]);
        let m = t.nearest(Rgb::new(255, 255, 255)).unwrap();
        assert_eq!(m.name(), "Black");
        assert_eq!(m.distance, MAX_DISTANCE);
    }

    #[test]
    fn empty_table() {
        let t = table(&[]);
        for (r, g, b) in [(0, 0, 0), (255, 255, 255), (12, 34, 56)] {
            assert!(matches!(nearest_color(&t, r, g, b), Err(ColorError::EmptyTable)));
        }
    }

    #[test]
    fn every_entry_is_at_least_as_close_as_the_rest() {
        let t = table(&[
            ("Red", 255, 0, 0),
            ("Maroon", 128, 0, 0),
            ("Olive", 128, 128, 0),
            ("Navy", 0, 0, 128),
            ("Teal", 0, 128, 128),
            ("Silver", 192, 192, 192),
            ("Gray", 128, 128, 128),
        ]);
        for entry in &t {
            let m = t.nearest(entry.rgb).unwrap();
            assert_eq!(m.distance, 0);
            assert!(t.iter().all(|other| entry.rgb.manhattan(other.rgb) >= m.distance));
        }
    }

    #[test]
    fn repeated_queries_agree() {
        let t = table(&[("Red", 255, 0, 0), ("Green", 0, 255, 0), ("Blue", 0, 0, 255)]);
        let first = nearest_color(&t, 40, 200, 90).unwrap().to_string();
        for _ in 0..10 {
            assert_eq!(nearest_color(&t, 40, 200, 90).unwrap(), first);
        }
        assert_eq!(first, "Green");
    }
}

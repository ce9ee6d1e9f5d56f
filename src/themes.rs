//! District themes and the spatial rule that assigns them.
//!
//! A theme bundles the look of a district: a facade palette, a roof-height
//! band, and a footprint band. Blocks pick their theme with the pure quadrant
//! rule [`theme_for`]; the perimeter belt has a dedicated theme.

use bevy::prelude::*;
use rand::Rng;

pub struct ThemesPlugin;

impl Plugin for ThemesPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ThemeTable>();
    }
}

/// District classification.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum ThemeId {
    Office,
    Commercial,
    Residential,
    Industrial,
    Perimeter,
}

impl ThemeId {
    pub fn all() -> &'static [ThemeId] {
        &[
            ThemeId::Office,
            ThemeId::Commercial,
            ThemeId::Residential,
            ThemeId::Industrial,
            ThemeId::Perimeter,
        ]
    }
}

/// An inclusive sampling band.
#[derive(Clone, Copy, Debug)]
pub struct SizeRange {
    pub min: f32,
    pub max: f32,
}

impl SizeRange {
    pub fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    pub fn sample(&self, rng: &mut impl Rng) -> f32 {
        rng.gen_range(self.min..=self.max)
    }
}

/// Visual configuration for one district.
#[derive(Clone, Debug)]
pub struct Theme {
    /// Facade colors, sampled uniformly per building.
    pub palette: Vec<Color>,
    /// Roof height band.
    pub height: SizeRange,
    /// Footprint band. Only the minimum still binds (as the sliver
    /// threshold); full-bleed tiling superseded random sizing.
    pub footprint: SizeRange,
}

/// Static theme table, loaded before generation and never mutated.
#[derive(Resource, Clone)]
pub struct ThemeTable {
    office: Theme,
    commercial: Theme,
    residential: Theme,
    industrial: Theme,
    perimeter: Theme,
}

impl ThemeTable {
    pub fn get(&self, id: ThemeId) -> &Theme {
        match id {
            ThemeId::Office => &self.office,
            ThemeId::Commercial => &self.commercial,
            ThemeId::Residential => &self.residential,
            ThemeId::Industrial => &self.industrial,
            ThemeId::Perimeter => &self.perimeter,
        }
    }
}

impl Default for ThemeTable {
    fn default() -> Self {
        Self {
            office: Theme {
                palette: vec![
                    Color::srgba(0.35, 0.45, 0.60, 1.0),
                    Color::srgba(0.45, 0.55, 0.70, 1.0),
                    Color::srgba(0.30, 0.35, 0.45, 1.0),
                ],
                height: SizeRange::new(18.0, 30.0),
                footprint: SizeRange::new(6.0, 20.0),
            },
            commercial: Theme {
                palette: vec![
                    Color::srgba(0.70, 0.55, 0.35, 1.0),
                    Color::srgba(0.65, 0.45, 0.40, 1.0),
                    Color::srgba(0.75, 0.65, 0.45, 1.0),
                ],
                height: SizeRange::new(10.0, 22.0),
                footprint: SizeRange::new(5.0, 18.0),
            },
            residential: Theme {
                palette: vec![
                    Color::srgba(0.60, 0.45, 0.35, 1.0),
                    Color::srgba(0.70, 0.60, 0.50, 1.0),
                    Color::srgba(0.55, 0.50, 0.45, 1.0),
                    Color::srgba(0.65, 0.55, 0.40, 1.0),
                ],
                height: SizeRange::new(5.0, 12.0),
                footprint: SizeRange::new(4.0, 14.0),
            },
            industrial: Theme {
                palette: vec![
                    Color::srgba(0.45, 0.45, 0.48, 1.0),
                    Color::srgba(0.55, 0.55, 0.55, 1.0),
                    Color::srgba(0.40, 0.42, 0.40, 1.0),
                ],
                height: SizeRange::new(6.0, 14.0),
                footprint: SizeRange::new(6.0, 22.0),
            },
            perimeter: Theme {
                palette: vec![
                    Color::srgba(0.30, 0.30, 0.32, 1.0),
                    Color::srgba(0.35, 0.33, 0.30, 1.0),
                ],
                height: SizeRange::new(8.0, 16.0),
                footprint: SizeRange::new(4.0, 40.0),
            },
        }
    }
}

/// Quadrant rule mapping a block center to its district theme. Ties on an
/// axis (exactly 0) fall toward the positive quadrant.
pub fn theme_for(x: f32, z: f32) -> ThemeId {
    match (x < 0.0, z < 0.0) {
        (true, true) => ThemeId::Office,
        (false, true) => ThemeId::Commercial,
        (true, false) => ThemeId::Residential,
        (false, false) => ThemeId::Industrial,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn quadrants_map_to_distinct_themes() {
        assert_eq!(theme_for(-15.0, -15.0), ThemeId::Office);
        assert_eq!(theme_for(15.0, -15.0), ThemeId::Commercial);
        assert_eq!(theme_for(-15.0, 15.0), ThemeId::Residential);
        assert_eq!(theme_for(15.0, 15.0), ThemeId::Industrial);
    }

    #[test]
    fn origin_falls_toward_positive_quadrant() {
        assert_eq!(theme_for(0.0, 0.0), ThemeId::Industrial);
    }

    #[test]
    fn sampled_heights_stay_in_band() {
        let table = ThemeTable::default();
        let mut rng = StdRng::seed_from_u64(9);
        let band = table.get(ThemeId::Residential).height;

        for _ in 0..100 {
            let h = band.sample(&mut rng);
            assert!(h >= band.min && h <= band.max);
        }
    }
}

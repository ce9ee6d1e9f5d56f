//! Procedural block-and-building layout for a grid-road city.
//!
//! - Fixed orthogonal road grid with exclusion-band queries
//! - City blocks derived between adjacent roads
//! - Interval-subtraction segment tiling with themed, full-bleed buildings
//! - Perimeter belt closing off the world edge
//! - Spatial index for collision/navigation consumers

use bevy::prelude::*;

pub mod blocks;
pub mod layout;
pub mod roads;
pub mod spans;
pub mod spatial;
pub mod themes;

pub struct CityLayoutPlugin;

impl Plugin for CityLayoutPlugin {
    fn build(&self, app: &mut App) {
        // Each stage gates on the previous one's completion flag, so the
        // pipeline settles over a few schedule runs: grid, blocks, layout,
        // then the spatial index.
        app.add_plugins(roads::RoadGridPlugin)
            .add_plugins(blocks::BlocksPlugin)
            .add_plugins(themes::ThemesPlugin)
            .add_plugins(layout::LayoutPlugin)
            .add_plugins(spatial::SpatialIndexPlugin);
    }
}

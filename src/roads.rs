//! Orthogonal road grid with exclusion-band queries.
//!
//! Roads are fixed axis-aligned center-lines: horizontal roads run east-west
//! at a Z position, vertical roads run north-south at an X position, and all
//! share one paved width. The grid is built once at startup and never mutated.

use bevy::prelude::*;

use crate::spans::Span;

pub struct RoadGridPlugin;

impl Plugin for RoadGridPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<RoadGridConfig>()
            .init_resource::<RoadGrid>()
            .add_systems(Update, build_road_grid.run_if(should_build_grid));
    }
}

/// Configuration for the road grid.
#[derive(Resource, Clone)]
pub struct RoadGridConfig {
    /// Z positions of the east-west center-lines.
    pub horizontal: Vec<f32>,
    /// X positions of the north-south center-lines.
    pub vertical: Vec<f32>,
    /// Paved width shared by every road.
    pub road_width: f32,
}

impl Default for RoadGridConfig {
    fn default() -> Self {
        // The classic 3x3 grid with nine intersections.
        Self {
            horizontal: vec![-30.0, 0.0, 30.0],
            vertical: vec![-30.0, 0.0, 30.0],
            road_width: 15.0,
        }
    }
}

/// The road grid resource. Positions are kept sorted so block derivation can
/// walk adjacent pairs.
#[derive(Resource, Default)]
pub struct RoadGrid {
    horizontal: Vec<f32>,
    vertical: Vec<f32>,
    road_width: f32,
    built: bool,
}

impl RoadGrid {
    pub fn new(mut horizontal: Vec<f32>, mut vertical: Vec<f32>, road_width: f32) -> Self {
        horizontal.sort_by(|a, b| a.total_cmp(b));
        vertical.sort_by(|a, b| a.total_cmp(b));
        Self {
            horizontal,
            vertical,
            road_width,
            built: true,
        }
    }

    /// Sorted Z positions of the east-west roads.
    pub fn horizontal(&self) -> &[f32] {
        &self.horizontal
    }

    /// Sorted X positions of the north-south roads.
    pub fn vertical(&self) -> &[f32] {
        &self.vertical
    }

    pub fn road_width(&self) -> f32 {
        self.road_width
    }

    pub fn half_width(&self) -> f32 {
        self.road_width * 0.5
    }

    pub fn is_built(&self) -> bool {
        self.built
    }

    /// Exclusion band around one center-line: half the paved width plus a
    /// caller-supplied buffer on each side.
    pub fn exclusion_band(&self, center: f32, buffer: f32) -> Span {
        let reach = self.half_width() + buffer;
        Span::new(center - reach, center + reach)
    }

    /// Bands constraining X, one per vertical road.
    pub fn vertical_bands(&self, buffer: f32) -> Vec<Span> {
        self.vertical
            .iter()
            .map(|&x| self.exclusion_band(x, buffer))
            .collect()
    }

    /// Bands constraining Z, one per horizontal road.
    pub fn horizontal_bands(&self, buffer: f32) -> Vec<Span> {
        self.horizontal
            .iter()
            .map(|&z| self.exclusion_band(z, buffer))
            .collect()
    }

    /// Whether a point lies on any road, widened by `buffer`. Roads span the
    /// whole world along their length, so only the constrained axis matters.
    /// The comparison is strict: a point exactly on the band edge is off-road,
    /// so full-bleed segments abutting a band pass their own re-check.
    pub fn is_on_road(&self, x: f32, z: f32, buffer: f32) -> bool {
        let reach = self.half_width() + buffer;
        self.horizontal.iter().any(|&c| (z - c).abs() < reach)
            || self.vertical.iter().any(|&c| (x - c).abs() < reach)
    }
}

fn should_build_grid(grid: Res<RoadGrid>) -> bool {
    !grid.built
}

fn build_road_grid(config: Res<RoadGridConfig>, mut grid: ResMut<RoadGrid>) {
    *grid = RoadGrid::new(
        config.horizontal.clone(),
        config.vertical.clone(),
        config.road_width,
    );

    info!(
        "Road grid ready: {} horizontal x {} vertical roads, width {}",
        grid.horizontal.len(),
        grid.vertical.len(),
        grid.road_width
    );
}

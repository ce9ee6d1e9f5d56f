//! Building layout generator.
//!
//! Carves each block's span into road-free safe ranges per axis, combines
//! them pairwise into rectangular segments, and tiles every surviving segment
//! full-bleed with a themed building. The same subtraction technique closes
//! off the world edge with a perimeter belt. Generation never fails: segments
//! that are too small or touch a road are dropped silently, and an empty
//! layout is a valid (if sparse) result.

use bevy::prelude::*;
use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::blocks::{CityBlock, CityBlocks};
use crate::roads::RoadGrid;
use crate::spans::{filter_min_length, subtract_bands, Span, SpanVec};
use crate::themes::{theme_for, Theme, ThemeId, ThemeTable};

pub struct LayoutPlugin;

impl Plugin for LayoutPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<LayoutConfig>()
            .init_resource::<CityBuildings>()
            .add_systems(Update, generate_layout.run_if(should_generate));
    }
}

/// Settings for the layout generator.
#[derive(Resource, Clone)]
pub struct LayoutConfig {
    /// Setback kept between building walls and the paved road edge.
    pub clearance: f32,
    /// Segments narrower than this on either axis are dropped as slivers.
    pub min_building_size: f32,
    /// Half extent of the world; the perimeter belt tiles out to this limit.
    pub world_half_size: f32,
    /// Seed for the layout RNG, so a given configuration reproduces exactly.
    pub seed: u64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            clearance: 2.5,
            min_building_size: 5.0,
            world_half_size: 70.0,
            seed: 42,
        }
    }
}

/// A placed building. Consumers treat the list as immutable obstacles.
#[derive(Clone, Debug, PartialEq)]
pub struct Building {
    /// Footprint center on the ground plane (`y` holds world Z).
    pub center: Vec2,
    /// Footprint extent: `x` is width, `y` is depth.
    pub footprint: Vec2,
    pub height: f32,
    pub color: Color,
    pub theme: ThemeId,
}

impl Building {
    pub fn min_corner(&self) -> Vec2 {
        self.center - self.footprint * 0.5
    }

    pub fn max_corner(&self) -> Vec2 {
        self.center + self.footprint * 0.5
    }

    /// Whether a point lies inside the footprint, widened by `buffer`.
    pub fn contains_point(&self, x: f32, z: f32, buffer: f32) -> bool {
        let half = self.footprint * 0.5 + Vec2::splat(buffer);
        (x - self.center.x).abs() <= half.x && (z - self.center.y).abs() <= half.y
    }

    /// Axis-aligned overlap test against another rectangle.
    pub fn intersects_rect(&self, center: Vec2, half_extents: Vec2) -> bool {
        let half = self.footprint * 0.5;
        (center.x - self.center.x).abs() < half.x + half_extents.x
            && (center.y - self.center.y).abs() < half.y + half_extents.y
    }
}

/// The generated layout. Rebuilt wholesale on regeneration, never patched.
#[derive(Resource, Default)]
pub struct CityBuildings {
    pub buildings: Vec<Building>,
    pub generated: bool,
}

fn should_generate(blocks: Res<CityBlocks>, buildings: Res<CityBuildings>) -> bool {
    blocks.derived && !buildings.generated
}

fn generate_layout(
    grid: Res<RoadGrid>,
    blocks: Res<CityBlocks>,
    themes: Res<ThemeTable>,
    config: Res<LayoutConfig>,
    mut out: ResMut<CityBuildings>,
) {
    info!(
        "Generating building layout for {} blocks (seed {})",
        blocks.blocks.len(),
        config.seed
    );

    let mut rng = StdRng::seed_from_u64(config.seed);
    out.buildings = generate(&grid, &blocks.blocks, &themes, &config, &mut rng);
    out.generated = true;

    info!("Placed {} buildings", out.buildings.len());
}

/// Deterministic layout entry point: block interiors first, then the
/// perimeter belt. Output order is fixed, so a seed reproduces the city.
pub fn generate(
    grid: &RoadGrid,
    blocks: &[CityBlock],
    themes: &ThemeTable,
    config: &LayoutConfig,
    rng: &mut StdRng,
) -> Vec<Building> {
    let mut buildings = Vec::new();

    for block in blocks {
        tile_block(block, grid, themes, config, rng, &mut buildings);
    }

    tile_perimeter(blocks, grid, themes, config, rng, &mut buildings);

    buildings
}

/// Safe ranges for one axis: subtract the exclusion bands, drop slivers.
fn safe_ranges(span: Span, bands: &[Span], min_size: f32) -> SpanVec {
    filter_min_length(subtract_bands(span, bands), min_size)
}

fn tile_block(
    block: &CityBlock,
    grid: &RoadGrid,
    themes: &ThemeTable,
    config: &LayoutConfig,
    rng: &mut StdRng,
    out: &mut Vec<Building>,
) {
    let theme_id = theme_for(block.center.x, block.center.y);
    let theme = themes.get(theme_id);
    let min_size = config.min_building_size.max(theme.footprint.min);

    let x_ranges = safe_ranges(
        block.span_x(),
        &grid.vertical_bands(config.clearance),
        min_size,
    );
    let z_ranges = safe_ranges(
        block.span_z(),
        &grid.horizontal_bands(config.clearance),
        min_size,
    );

    for xr in &x_ranges {
        for zr in &z_ranges {
            place_segment(*xr, *zr, theme_id, theme, grid, config, rng, out);
        }
    }
}

/// Close off the world edge, leaving gaps where roads exit. The west/east
/// walls run the full world depth so the corners tile exactly once; the
/// north/south caps fill the remaining gap between them.
fn tile_perimeter(
    blocks: &[CityBlock],
    grid: &RoadGrid,
    themes: &ThemeTable,
    config: &LayoutConfig,
    rng: &mut StdRng,
    out: &mut Vec<Building>,
) {
    let Some((city_x, city_z)) = city_bounds(blocks) else {
        return;
    };

    let w = config.world_half_size;
    let theme = themes.get(ThemeId::Perimeter);
    let min_size = config.min_building_size.max(theme.footprint.min);

    let x_bands = grid.vertical_bands(config.clearance);
    let z_bands = grid.horizontal_bands(config.clearance);

    let walls = [Span::new(-w, city_x.min), Span::new(city_x.max, w)];
    for wall in walls {
        for xr in &safe_ranges(wall, &x_bands, min_size) {
            for zr in &safe_ranges(Span::new(-w, w), &z_bands, min_size) {
                place_segment(*xr, *zr, ThemeId::Perimeter, theme, grid, config, rng, out);
            }
        }
    }

    let caps = [Span::new(-w, city_z.min), Span::new(city_z.max, w)];
    for cap in caps {
        for zr in &safe_ranges(cap, &z_bands, min_size) {
            for xr in &safe_ranges(city_x, &x_bands, min_size) {
                place_segment(*xr, *zr, ThemeId::Perimeter, theme, grid, config, rng, out);
            }
        }
    }
}

/// Overall extent of the blocks as (x span, z span).
fn city_bounds(blocks: &[CityBlock]) -> Option<(Span, Span)> {
    let first = blocks.first()?;
    let mut x = first.span_x();
    let mut z = first.span_z();

    for block in &blocks[1..] {
        x = Span::new(x.min.min(block.span_x().min), x.max.max(block.span_x().max));
        z = Span::new(z.min.min(block.span_z().min), z.max.max(block.span_z().max));
    }

    Some((x, z))
}

/// Instantiate one full-bleed building over a segment: the footprint exactly
/// equals the segment, which rules out gaps and road overlap by construction.
/// The corner probe is a defensive re-check on top of that; a hit drops the
/// candidate without retrying.
fn place_segment(
    xr: Span,
    zr: Span,
    theme_id: ThemeId,
    theme: &Theme,
    grid: &RoadGrid,
    config: &LayoutConfig,
    rng: &mut StdRng,
    out: &mut Vec<Building>,
) {
    let center = Vec2::new(xr.center(), zr.center());
    let footprint = Vec2::new(xr.length(), zr.length());

    if !segment_clear(center, footprint, grid, config.clearance) {
        debug!(
            "Dropped segment at ({}, {}): exclusion band hit",
            center.x, center.y
        );
        return;
    }

    out.push(Building {
        center,
        footprint,
        height: theme.height.sample(rng),
        color: pick_color(&theme.palette, rng),
        theme: theme_id,
    });
}

/// Center plus all four corners must sit outside every road's exclusion band.
fn segment_clear(center: Vec2, footprint: Vec2, grid: &RoadGrid, clearance: f32) -> bool {
    let half = footprint * 0.5;
    let probes = [
        center,
        Vec2::new(center.x - half.x, center.y - half.y),
        Vec2::new(center.x + half.x, center.y - half.y),
        Vec2::new(center.x - half.x, center.y + half.y),
        Vec2::new(center.x + half.x, center.y + half.y),
    ];

    probes.iter().all(|p| !grid.is_on_road(p.x, p.y, clearance))
}

fn pick_color(palette: &[Color], rng: &mut StdRng) -> Color {
    if palette.is_empty() {
        return Color::WHITE;
    }
    palette[rng.gen_range(0..palette.len())]
}

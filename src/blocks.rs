//! City block derivation from the road grid.
//!
//! One square block sits on every midpoint between adjacent road pairs on
//! both axes. Blocks deliberately overlap the surrounding roads; the layout
//! generator subtracts the exclusion bands afterwards, so a block is a
//! candidate region rather than a guaranteed-clear one.

use bevy::prelude::*;

use crate::roads::RoadGrid;
use crate::spans::Span;

pub struct BlocksPlugin;

impl Plugin for BlocksPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<BlockConfig>()
            .init_resource::<CityBlocks>()
            .add_systems(Update, extract_blocks.run_if(should_extract_blocks));
    }
}

/// Configuration for block derivation.
#[derive(Resource, Clone)]
pub struct BlockConfig {
    /// Side length of the square region considered buildable around each
    /// block center. Larger than the road spacing so blocks reach under the
    /// neighboring roads and the subtraction step carves the real edges.
    pub block_size: f32,
}

impl Default for BlockConfig {
    fn default() -> Self {
        Self { block_size: 50.0 }
    }
}

/// A square region of candidate land centered between roads.
#[derive(Clone, Copy, Debug)]
pub struct CityBlock {
    pub center: Vec2,
    pub size: f32,
}

impl CityBlock {
    pub fn span_x(&self) -> Span {
        let half = self.size * 0.5;
        Span::new(self.center.x - half, self.center.x + half)
    }

    pub fn span_z(&self) -> Span {
        let half = self.size * 0.5;
        Span::new(self.center.y - half, self.center.y + half)
    }
}

/// Resource holding the derived blocks. Read-only after derivation.
#[derive(Resource, Default)]
pub struct CityBlocks {
    pub blocks: Vec<CityBlock>,
    pub derived: bool,
}

/// One block per midpoint between adjacent road pairs on both axes.
pub fn derive_blocks(grid: &RoadGrid, block_size: f32) -> Vec<CityBlock> {
    let mut blocks = Vec::new();

    for xs in grid.vertical().windows(2) {
        for zs in grid.horizontal().windows(2) {
            blocks.push(CityBlock {
                center: Vec2::new((xs[0] + xs[1]) * 0.5, (zs[0] + zs[1]) * 0.5),
                size: block_size,
            });
        }
    }

    blocks
}

fn should_extract_blocks(grid: Res<RoadGrid>, blocks: Res<CityBlocks>) -> bool {
    grid.is_built() && !blocks.derived
}

fn extract_blocks(grid: Res<RoadGrid>, config: Res<BlockConfig>, mut blocks: ResMut<CityBlocks>) {
    blocks.blocks = derive_blocks(&grid, config.block_size);
    blocks.derived = true;

    info!("Derived {} city blocks", blocks.blocks.len());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn three_by_three_grid_yields_four_blocks() {
        let grid = RoadGrid::new(vec![-30.0, 0.0, 30.0], vec![-30.0, 0.0, 30.0], 15.0);
        let blocks = derive_blocks(&grid, 50.0);

        assert_eq!(blocks.len(), 4);
        let centers: Vec<(f32, f32)> = blocks
            .iter()
            .map(|b| (b.center.x, b.center.y))
            .collect();
        assert!(centers.contains(&(-15.0, -15.0)));
        assert!(centers.contains(&(-15.0, 15.0)));
        assert!(centers.contains(&(15.0, -15.0)));
        assert!(centers.contains(&(15.0, 15.0)));
    }

    #[test]
    fn single_road_on_an_axis_yields_no_blocks() {
        let grid = RoadGrid::new(vec![0.0], vec![-30.0, 30.0], 15.0);
        assert!(derive_blocks(&grid, 50.0).is_empty());
    }

    #[test]
    fn block_span_reaches_under_neighbor_roads() {
        let block = CityBlock {
            center: Vec2::new(-15.0, -15.0),
            size: 50.0,
        };
        assert_eq!(block.span_x(), Span::new(-40.0, 10.0));
        assert_eq!(block.span_z(), Span::new(-40.0, 10.0));
    }
}

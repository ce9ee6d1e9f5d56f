//! Spatial hash over building footprints for collision and navigation
//! queries. Built once after generation; consumers treat the building list
//! as a static set of axis-aligned obstacles.

use bevy::prelude::*;
use std::collections::HashMap;

use crate::layout::{Building, CityBuildings};

pub struct SpatialIndexPlugin;

impl Plugin for SpatialIndexPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<BuildingIndex>()
            .add_systems(Update, index_buildings.run_if(should_index));
    }
}

/// Cell hash keyed on footprint extents; values are indices into the
/// generated building list.
#[derive(Resource)]
pub struct BuildingIndex {
    cell_size: f32,
    cells: HashMap<(i32, i32), Vec<usize>>,
    built: bool,
}

impl Default for BuildingIndex {
    fn default() -> Self {
        Self {
            cell_size: 16.0,
            cells: HashMap::new(),
            built: false,
        }
    }
}

impl BuildingIndex {
    pub fn new(cell_size: f32) -> Self {
        Self {
            cell_size,
            cells: HashMap::new(),
            built: false,
        }
    }

    pub fn is_built(&self) -> bool {
        self.built
    }

    fn to_cell(&self, pos: Vec2) -> (i32, i32) {
        (
            (pos.x / self.cell_size).floor() as i32,
            (pos.y / self.cell_size).floor() as i32,
        )
    }

    /// Rebuild the index from scratch. Each building is registered in every
    /// cell its footprint touches.
    pub fn rebuild(&mut self, buildings: &[Building]) {
        self.cells.clear();

        for (idx, building) in buildings.iter().enumerate() {
            let min_cell = self.to_cell(building.min_corner());
            let max_cell = self.to_cell(building.max_corner());

            for cx in min_cell.0..=max_cell.0 {
                for cy in min_cell.1..=max_cell.1 {
                    self.cells.entry((cx, cy)).or_default().push(idx);
                }
            }
        }

        self.built = true;
    }

    /// Candidate building indices whose cell contains the point.
    pub fn candidates_at(&self, pos: Vec2) -> &[usize] {
        self.cells
            .get(&self.to_cell(pos))
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    /// Exact point-vs-obstacle test, widened by `buffer`. Returns the index
    /// of the first building hit.
    pub fn hit_test(&self, buildings: &[Building], x: f32, z: f32, buffer: f32) -> Option<usize> {
        let probe = Vec2::new(x, z);
        let reach = Vec2::splat(buffer.max(0.0));
        let min_cell = self.to_cell(probe - reach);
        let max_cell = self.to_cell(probe + reach);

        for cx in min_cell.0..=max_cell.0 {
            for cy in min_cell.1..=max_cell.1 {
                let Some(indices) = self.cells.get(&(cx, cy)) else {
                    continue;
                };
                for &idx in indices {
                    if buildings[idx].contains_point(x, z, buffer) {
                        return Some(idx);
                    }
                }
            }
        }

        None
    }

    /// Indices of buildings overlapping an axis-aligned rectangle.
    pub fn query_rect(
        &self,
        buildings: &[Building],
        center: Vec2,
        half_extents: Vec2,
    ) -> Vec<usize> {
        let min_cell = self.to_cell(center - half_extents);
        let max_cell = self.to_cell(center + half_extents);

        let mut result = Vec::new();
        for cx in min_cell.0..=max_cell.0 {
            for cy in min_cell.1..=max_cell.1 {
                let Some(indices) = self.cells.get(&(cx, cy)) else {
                    continue;
                };
                for &idx in indices {
                    if !result.contains(&idx) && buildings[idx].intersects_rect(center, half_extents)
                    {
                        result.push(idx);
                    }
                }
            }
        }

        result
    }
}

fn should_index(buildings: Res<CityBuildings>, index: Res<BuildingIndex>) -> bool {
    buildings.generated && !index.built
}

fn index_buildings(buildings: Res<CityBuildings>, mut index: ResMut<BuildingIndex>) {
    index.rebuild(&buildings.buildings);
    info!(
        "Spatial index ready: {} buildings in {} cells",
        buildings.buildings.len(),
        index.cells.len()
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::themes::ThemeId;

    fn building(x: f32, z: f32, w: f32, d: f32) -> Building {
        Building {
            center: Vec2::new(x, z),
            footprint: Vec2::new(w, d),
            height: 10.0,
            color: Color::WHITE,
            theme: ThemeId::Residential,
        }
    }

    #[test]
    fn hit_test_finds_the_containing_building() {
        let buildings = vec![building(-15.0, -15.0, 10.0, 10.0), building(40.0, 40.0, 8.0, 8.0)];
        let mut index = BuildingIndex::new(16.0);
        index.rebuild(&buildings);

        assert_eq!(index.hit_test(&buildings, -15.0, -15.0, 0.0), Some(0));
        assert_eq!(index.hit_test(&buildings, 41.0, 39.0, 0.0), Some(1));
        assert_eq!(index.hit_test(&buildings, 0.0, 0.0, 0.0), None);
    }

    #[test]
    fn buffer_extends_the_hit_area() {
        let buildings = vec![building(0.0, 0.0, 4.0, 4.0)];
        let mut index = BuildingIndex::new(16.0);
        index.rebuild(&buildings);

        assert_eq!(index.hit_test(&buildings, 3.0, 0.0, 0.0), None);
        assert_eq!(index.hit_test(&buildings, 3.0, 0.0, 1.5), Some(0));
    }

    #[test]
    fn large_footprints_span_multiple_cells() {
        // 40 units wide at cell size 16: straddles several cells.
        let buildings = vec![building(0.0, 0.0, 40.0, 6.0)];
        let mut index = BuildingIndex::new(16.0);
        index.rebuild(&buildings);

        assert_eq!(index.hit_test(&buildings, -18.0, 0.0, 0.0), Some(0));
        assert_eq!(index.hit_test(&buildings, 18.0, 0.0, 0.0), Some(0));
    }

    #[test]
    fn query_rect_reports_overlaps_once() {
        let buildings = vec![building(0.0, 0.0, 40.0, 6.0), building(0.0, 30.0, 6.0, 6.0)];
        let mut index = BuildingIndex::new(16.0);
        index.rebuild(&buildings);

        let hits = index.query_rect(&buildings, Vec2::new(0.0, 0.0), Vec2::new(50.0, 2.0));
        assert_eq!(hits, vec![0]);

        let all = index.query_rect(&buildings, Vec2::new(0.0, 15.0), Vec2::new(50.0, 20.0));
        assert_eq!(all.len(), 2);
    }
}

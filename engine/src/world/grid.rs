//! Grid Configuration Module
//!
//! Placement grid used by the build system.
//!
//! ## Snapping
//! Every axis rounds to the nearest multiple of the grid size. The vertical
//! axis is additionally clamped to `>= 0` so nothing is ever placed below the
//! ground plane. Snapping is idempotent: `snap(snap(p)) == snap(p)`.
//!
//! - 1 unit = 1 meter (SI units)

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Default grid cell size in meters
pub const DEFAULT_GRID_SIZE: f32 = 1.0;

/// Placement grid configuration.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    /// Cell size in meters
    pub grid_size: f32,
    /// Grid snapping on/off
    pub snap_enabled: bool,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            grid_size: DEFAULT_GRID_SIZE,
            snap_enabled: true,
        }
    }
}

impl GridConfig {
    pub fn new(grid_size: f32) -> Self {
        Self {
            grid_size,
            snap_enabled: true,
        }
    }

    /// Snap a position to the grid if snapping is enabled.
    ///
    /// Y is clamped to the ground plane either way.
    pub fn snap(&self, pos: Vec3) -> Vec3 {
        if !self.snap_enabled || self.grid_size <= 0.0 {
            return Vec3::new(pos.x, pos.y.max(0.0), pos.z);
        }
        snap_to_grid(pos, self.grid_size)
    }
}

/// Snap all three axes to multiples of `grid_size`, clamping Y to `>= 0`.
pub fn snap_to_grid(pos: Vec3, grid_size: f32) -> Vec3 {
    let snapped = (pos / grid_size).round() * grid_size;
    Vec3::new(snapped.x, snapped.y.max(0.0), snapped.z)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_grid() {
        let grid = GridConfig::default();
        assert_eq!(grid.grid_size, 1.0);
        assert!(grid.snap_enabled);
    }

    #[test]
    fn test_snap_all_axes() {
        let grid = GridConfig::default();
        let snapped = grid.snap(Vec3::new(2.4, 3.6, -7.51));
        assert_eq!(snapped, Vec3::new(2.0, 4.0, -8.0));
    }

    #[test]
    fn test_snap_clamps_below_ground() {
        let grid = GridConfig::default();
        assert_eq!(grid.snap(Vec3::new(0.2, -3.0, 0.0)).y, 0.0);
    }

    #[test]
    fn test_snap_is_idempotent() {
        let grids = [GridConfig::new(1.0), GridConfig::new(0.5), GridConfig::new(4.0)];
        let points = [
            Vec3::new(0.49, 0.51, -0.5),
            Vec3::new(13.37, 2.2, -99.9),
            Vec3::new(-0.01, -5.0, 1000.25),
            Vec3::new(7.75, 9.99, 3.125),
        ];
        for grid in &grids {
            for &p in &points {
                let once = grid.snap(p);
                assert_eq!(grid.snap(once), once, "grid {} point {:?}", grid.grid_size, p);
            }
        }
    }

    #[test]
    fn test_snap_disabled_only_clamps_height() {
        let grid = GridConfig { snap_enabled: false, ..Default::default() };
        assert_eq!(grid.snap(Vec3::new(0.3, -1.0, 0.7)), Vec3::new(0.3, 0.0, 0.7));
    }
}

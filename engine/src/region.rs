use std::ops::Range;

use crate::api::ConfigError;

/// One square tile of the canvas. Rebuilt from its index whenever needed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Region {
    pub index: usize,
    pub x: Range<u32>,
    pub y: Range<u32>,
}

impl Region {
    pub fn pixel_count(&self) -> usize {
        self.x.len() * self.y.len()
    }
}

/// Row-major partition of a `width x height` canvas into `region_size` tiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegionGrid {
    width: u32,
    height: u32,
    region_size: u32,
    count_x: u32,
    count_y: u32,
}

impl RegionGrid {
    pub fn new(width: u32, height: u32, region_size: u32) -> Result<Self, ConfigError> {
        if width == 0 || height == 0 {
            return Err(ConfigError::InvalidCanvasSize { width, height });
        }
        if region_size == 0 {
            return Err(ConfigError::InvalidRegionSize);
        }
        Ok(Self {
            width,
            height,
            region_size,
            count_x: width.div_ceil(region_size),
            count_y: height.div_ceil(region_size),
        })
    }

    pub fn width(&self) -> u32 { self.width }
    pub fn height(&self) -> u32 { self.height }
    pub fn region_size(&self) -> u32 { self.region_size }
    pub fn region_count_x(&self) -> u32 { self.count_x }
    pub fn region_count_y(&self) -> u32 { self.count_y }

    pub fn total_regions(&self) -> usize {
        self.count_x as usize * self.count_y as usize
    }

    /// Nominal bounds. The last row and column may overrun the canvas; see [`Self::clip`].
    pub fn bounds_for_index(&self, index: usize) -> Region {
        let count_x = self.count_x as usize;
        let col = u32::try_from(index % count_x).unwrap_or(u32::MAX);
        // indices past the grid saturate to an empty region once clipped
        let row = u32::try_from(index / count_x).unwrap_or(u32::MAX);
        let size = self.region_size;
        Region {
            index,
            x: size.saturating_mul(col)..size.saturating_mul(col.saturating_add(1)),
            y: size.saturating_mul(row)..size.saturating_mul(row.saturating_add(1)),
        }
    }

    pub fn clip(&self, region: Region) -> Region {
        Region {
            index: region.index,
            x: region.x.start.min(self.width)..region.x.end.min(self.width),
            y: region.y.start.min(self.height)..region.y.end.min(self.height),
        }
    }

    pub fn clipped_bounds(&self, index: usize) -> Region {
        self.clip(self.bounds_for_index(index))
    }

    /// Every region in visiting order, clipped to the canvas.
    pub fn regions(&self) -> impl Iterator<Item = Region> + '_ {
        (0..self.total_regions()).map(|i| self.clipped_bounds(i))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_round_up() {
        let g = RegionGrid::new(1024, 768, 50).unwrap();
        assert_eq!(g.region_count_x(), 21);
        assert_eq!(g.region_count_y(), 16);
        assert_eq!(g.total_regions(), 336);
    }

    #[test]
    fn hundred_by_hundred_in_fifties() {
        let g = RegionGrid::new(100, 100, 50).unwrap();
        assert_eq!(g.total_regions(), 4);
        let bounds: Vec<_> = g.regions().map(|r| (r.x, r.y)).collect();
        assert_eq!(
            bounds,
            vec![(0..50, 0..50), (50..100, 0..50), (0..50, 50..100), (50..100, 50..100)]
        );
    }

    #[test]
    fn row_major_order() {
        let g = RegionGrid::new(30, 20, 10).unwrap();
        let starts: Vec<_> = g.regions().map(|r| (r.x.start, r.y.start)).collect();
        assert_eq!(starts, vec![(0, 0), (10, 0), (20, 0), (0, 10), (10, 10), (20, 10)]);
    }

    #[test]
    fn nominal_bounds_overrun_but_clipped_do_not() {
        let g = RegionGrid::new(105, 61, 50).unwrap();
        let last = g.total_regions() - 1;
        assert_eq!(g.bounds_for_index(last), Region { index: last, x: 100..150, y: 50..100 });
        assert_eq!(g.clipped_bounds(last), Region { index: last, x: 100..105, y: 50..61 });
    }

    #[test]
    fn clipped_regions_cover_every_pixel_once() {
        for (w, h, size) in [(1, 1, 1), (7, 3, 2), (100, 100, 50), (105, 61, 50), (13, 29, 64), (64, 64, 8)] {
            let g = RegionGrid::new(w, h, size).unwrap();
            let mut hits = vec![0u8; (w * h) as usize];
            for r in g.regions() {
                for x in r.x.clone() {
                    for y in r.y.clone() {
                        hits[(y * w + x) as usize] += 1;
                    }
                }
            }
            assert!(hits.iter().all(|&n| n == 1), "{w}x{h} / {size}");
            assert_eq!(g.regions().map(|r| r.pixel_count()).sum::<usize>(), (w * h) as usize);
        }
    }

    #[test]
    fn indices_past_the_grid_clip_to_nothing() {
        let g = RegionGrid::new(10, 10, 10).unwrap();
        for index in [g.total_regions(), 1 << 20, usize::MAX] {
            let r = g.clipped_bounds(index);
            assert_eq!(r.pixel_count(), 0, "index {index}");
        }
        let far = g.bounds_for_index(usize::MAX);
        assert_eq!(far.y, u32::MAX..u32::MAX);
    }

    #[test]
    fn rejects_degenerate_geometry() {
        assert_eq!(RegionGrid::new(0, 10, 5), Err(ConfigError::InvalidCanvasSize { width: 0, height: 10 }));
        assert_eq!(RegionGrid::new(10, 10, 0), Err(ConfigError::InvalidRegionSize));
    }
}

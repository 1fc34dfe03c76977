mod images;

pub use images::{wait_all, Dimensions, HttpImageLoader, ImageLoad, ImageLoader};

use log::debug;
use std::sync::Arc;

use crate::config::LayoutConfig;

/// Columns for a container width, following the card's responsive classes
pub fn column_count(container_width: u32) -> usize {
    match container_width {
        0..=767 => 1,
        768..=991 => 2,
        992..=1199 => 3,
        _ => 4,
    }
}

/// Position of one tile
#[derive(Debug, Clone, PartialEq)]
pub struct Placement {
    pub column: usize,
    /// Left offset, in percent of the container when percent positioning is on
    pub left: f64,
    pub top: f64,
    pub height: f64,
}

/// A laid-out grid
#[derive(Debug, Clone, PartialEq)]
pub struct Masonry {
    placements: Vec<Placement>,
    columns: usize,
    height: f64,
    percent_position: bool,
}

impl Masonry {
    pub fn layout(container_width: u32, tiles: &[ImageLoad], options: &LayoutConfig) -> Self {
        let columns = column_count(container_width);
        let column_width = container_width as f64 / columns as f64;
        let mut column_heights = vec![0.0_f64; columns];
        let mut placements = Vec::with_capacity(tiles.len());

        for tile in tiles {
            let height = image_height(tile, column_width, options) + options.card_body_height as f64;

            let mut column = 0;
            for (i, h) in column_heights.iter().enumerate() {
                if *h < column_heights[column] {
                    column = i;
                }
            }

            let left = if options.percent_position {
                column as f64 * 100.0 / columns as f64
            } else {
                column as f64 * column_width
            };
            placements.push(Placement {
                column,
                left,
                top: column_heights[column],
                height,
            });
            column_heights[column] += height;
        }

        let height = column_heights.iter().copied().fold(0.0, f64::max);
        debug!(
            "Laid out {} tiles in {} columns, container height {}",
            tiles.len(),
            columns,
            height
        );

        Self {
            placements,
            columns,
            height,
            percent_position: options.percent_position,
        }
    }

    pub fn placements(&self) -> &[Placement] {
        &self.placements
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn container_height(&self) -> f64 {
        self.height
    }

    /// Inline style for the tile at `index`
    pub fn tile_style(&self, index: usize) -> Option<String> {
        let p = self.placements.get(index)?;
        let unit = if self.percent_position { "%" } else { "px" };
        Some(format!(
            "position: absolute; left: {}{}; top: {}px;",
            p.left, unit, p.top
        ))
    }

    /// Tear down the grid; tiles fall back to normal flow
    pub fn destroy(self) {
        debug!("Destroying masonry grid with {} tiles", self.placements.len());
    }
}

fn image_height(tile: &ImageLoad, column_width: f64, options: &LayoutConfig) -> f64 {
    match tile {
        ImageLoad::Loaded(Some(d)) if d.width > 0 => column_width * d.height as f64 / d.width as f64,
        ImageLoad::Loaded(_) => column_width / options.default_aspect_ratio,
        ImageLoad::Failed | ImageLoad::Absent => 0.0,
    }
}

/// Owns the grid of one card list for the lifetime of the view.
///
/// Every layout pass destroys the previous grid first, then waits for all
/// images before measuring.
pub struct LayoutController {
    loader: Arc<dyn ImageLoader>,
    options: LayoutConfig,
    container_width: u32,
    instance: Option<Masonry>,
    destroyed: usize,
}

impl LayoutController {
    pub fn new(loader: Arc<dyn ImageLoader>, options: LayoutConfig, container_width: u32) -> Self {
        Self {
            loader,
            options,
            container_width,
            instance: None,
            destroyed: 0,
        }
    }

    /// Lay out cards whose images are `sources`, in display order
    pub async fn relayout(&mut self, sources: &[Option<String>]) -> &Masonry {
        self.clear();
        let loads = wait_all(Arc::clone(&self.loader), sources).await;
        let grid = Masonry::layout(self.container_width, &loads, &self.options);
        self.instance.insert(grid)
    }

    /// Destroy the current grid, if any
    pub fn clear(&mut self) {
        if let Some(grid) = self.instance.take() {
            grid.destroy();
            self.destroyed += 1;
        }
    }

    pub fn current(&self) -> Option<&Masonry> {
        self.instance.as_ref()
    }

    /// Number of grids torn down so far
    pub fn destroyed(&self) -> usize {
        self.destroyed
    }

}

impl Drop for LayoutController {
    fn drop(&mut self) {
        self.clear();
    }
}

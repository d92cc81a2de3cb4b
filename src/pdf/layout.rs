use crate::error::Error;
use crate::model::{LabelImage, Placement, SheetLayout};

/// Page-oriented drawing backend driven by [`paginate`].
pub trait DrawingSurface {
    /// Open the first page.
    fn begin_page(&mut self) -> Result<(), Error>;
    /// Close the current page and open the next one.
    fn new_page(&mut self) -> Result<(), Error>;
    /// Draw `image` stretched to `width` x `height` with its bottom-left corner at `(x, y)`.
    fn place_image(
        &mut self,
        image: &LabelImage,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
    ) -> Result<(), Error>;
    /// Serialize the document, handing the bytes to the caller.
    fn finalize(self) -> Result<Vec<u8>, Error>;
}

/// A layout checked to hold at least one label per page.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Grid {
    layout: SheetLayout,
    cells_per_page: usize,
}

impl Grid {
    pub fn new(layout: SheetLayout) -> Result<Self, Error> {
        if layout.columns == 0 {
            return Err(Error::Layout("column count is zero".into()));
        }
        let cells_per_page = layout.cells_per_page();
        if cells_per_page == 0 {
            return Err(Error::Layout(format!(
                "a {:.1}pt label does not fit on a {:.1}pt page with a {:.1}pt bottom reserve",
                layout.label_height, layout.page_height, layout.bottom_reserve
            )));
        }
        if layout.x_margin() < 0.0 {
            log::warn!(
                "Label grid ({} x {:.1}pt) is wider than the page ({:.1}pt)",
                layout.columns,
                layout.label_width,
                layout.page_width
            );
        }
        Ok(Self {
            layout,
            cells_per_page,
        })
    }

    pub fn layout(&self) -> &SheetLayout {
        &self.layout
    }

    pub fn cells_per_page(&self) -> usize {
        self.cells_per_page
    }
}

/// Cell assignment for the `idx`-th label (0-based).
///
/// Cells fill row-major, left to right, top to bottom; a page is full after
/// `grid.cells_per_page()` labels.
pub fn placement(idx: usize, grid: &Grid) -> Placement {
    let layout = &grid.layout;
    let page = idx / grid.cells_per_page;
    let pos = idx % grid.cells_per_page;
    let column = pos % layout.columns;
    let row = pos / layout.columns;
    Placement {
        page,
        column,
        row,
        x: layout.x_margin() + column as f32 * layout.label_width,
        y: layout.y_start() - row as f32 * layout.label_height,
    }
}

/// Pages needed for `n` labels. Zero labels need zero pages.
pub fn page_count(n: usize, grid: &Grid) -> usize {
    n.div_ceil(grid.cells_per_page)
}

/// Place every label on `surface`, breaking pages at each multiple of the page capacity.
pub fn paginate<S: DrawingSurface>(
    images: &[LabelImage],
    grid: &Grid,
    surface: &mut S,
) -> Result<(), Error> {
    let (width, height) = (grid.layout.label_width, grid.layout.label_height);
    for (idx, image) in images.iter().enumerate() {
        let p = placement(idx, grid);
        if idx == 0 {
            surface.begin_page()?;
        } else if p.column == 0 && p.row == 0 {
            log::debug!("Page {} full, starting page {}", p.page, p.page + 1);
            surface.new_page()?;
        }
        surface.place_image(image, p.x, p.y, width, height)?;
    }
    Ok(())
}

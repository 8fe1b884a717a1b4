//! Neighborhood snapshots handed to convolution kernels.
//!
//! A window is a `rows x cols` block of samples centered on the output
//! position. Cells are stored row-major; `(0, 0)` is the top-left neighbor
//! and `(v_radius, h_radius)` the center. Positions outside the grid are
//! already replaced by the nearest edge sample.
//!
//! [`Window`] has compile-time dimensions and lives on the stack.
//! [`DynWindow`] has runtime radii and owns one scratch buffer per tile.

/// Row access shared by both window kinds, used by the scan loop.
pub(crate) trait Slots<T> {
    /// Mutable cells of window row `r`.
    fn slots_mut(&mut self, r: usize) -> &mut [T];
}

/// Fixed-size neighborhood of `ROWS x COLS` samples.
///
/// Both dimensions are odd. Kernels usually read it through
/// [`get`](Self::get) with signed offsets from the center:
///
/// ```rust
/// use plane_ops::window::Window;
///
/// let w = Window::from_cells([[1, 2, 3], [4, 5, 6], [7, 8, 9]]);
/// assert_eq!(w.center(), 5);
/// assert_eq!(w.get(-1, 1), 3);
/// assert_eq!(w.at(2, 0), 7);
/// assert_eq!(w.iter().sum::<i32>(), 45);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Window<T, const ROWS: usize, const COLS: usize> {
    cells: [[T; COLS]; ROWS],
}

impl<T: Copy, const ROWS: usize, const COLS: usize> Window<T, ROWS, COLS> {
    /// Rows above and below the center.
    pub const V_RADIUS: usize = ROWS / 2;
    /// Columns left and right of the center.
    pub const H_RADIUS: usize = COLS / 2;

    /// Wraps explicit cells, e.g. to unit-test a kernel.
    pub fn from_cells(cells: [[T; COLS]; ROWS]) -> Self {
        const { assert!(ROWS % 2 == 1 && COLS % 2 == 1, "window dimensions must be odd") };
        Self { cells }
    }

    pub(crate) fn filled(value: T) -> Self {
        Self {
            cells: [[value; COLS]; ROWS],
        }
    }

    /// Sample at signed offset `(dy, dx)` from the center.
    ///
    /// # Panics
    ///
    /// Panics if `|dy| > V_RADIUS` or `|dx| > H_RADIUS`.
    #[inline]
    pub fn get(&self, dy: isize, dx: isize) -> T {
        self.cells[Self::V_RADIUS.wrapping_add_signed(dy)][Self::H_RADIUS.wrapping_add_signed(dx)]
    }

    /// Sample at absolute window position `(row, col)`.
    #[inline]
    pub fn at(&self, row: usize, col: usize) -> T {
        self.cells[row][col]
    }

    /// The sample at the output position.
    #[inline]
    pub fn center(&self) -> T {
        self.cells[Self::V_RADIUS][Self::H_RADIUS]
    }

    /// Window row `r`, left to right.
    #[inline]
    pub fn row(&self, r: usize) -> &[T; COLS] {
        &self.cells[r]
    }

    /// All cells as a nested array.
    #[inline]
    pub fn as_array(&self) -> &[[T; COLS]; ROWS] {
        &self.cells
    }

    /// Cells in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = T> + '_ {
        self.cells.iter().flat_map(|row| row.iter().copied())
    }

    /// Vertical radius.
    #[inline]
    pub const fn v_radius(&self) -> usize {
        Self::V_RADIUS
    }

    /// Horizontal radius.
    #[inline]
    pub const fn h_radius(&self) -> usize {
        Self::H_RADIUS
    }
}

impl<T, const ROWS: usize, const COLS: usize> Slots<T> for Window<T, ROWS, COLS> {
    #[inline]
    fn slots_mut(&mut self, r: usize) -> &mut [T] {
        &mut self.cells[r]
    }
}

/// Neighborhood with radii chosen at run time.
///
/// Same layout and accessors as [`Window`].
#[derive(Debug, Clone, PartialEq)]
pub struct DynWindow<T> {
    cells: Vec<T>,
    v_radius: usize,
    h_radius: usize,
}

impl<T: Copy> DynWindow<T> {
    /// Creates a `(2*v_radius+1) x (2*h_radius+1)` window with every cell set to `value`.
    pub fn new(v_radius: usize, h_radius: usize, value: T) -> Self {
        let len = (2 * v_radius + 1) * (2 * h_radius + 1);
        Self {
            cells: vec![value; len],
            v_radius,
            h_radius,
        }
    }

    /// Number of window rows.
    #[inline]
    pub fn rows(&self) -> usize {
        2 * self.v_radius + 1
    }

    /// Number of window columns.
    #[inline]
    pub fn cols(&self) -> usize {
        2 * self.h_radius + 1
    }

    /// Sample at signed offset `(dy, dx)` from the center.
    ///
    /// # Panics
    ///
    /// Panics if the offset leaves the window.
    #[inline]
    pub fn get(&self, dy: isize, dx: isize) -> T {
        let r = self.v_radius.wrapping_add_signed(dy);
        let c = self.h_radius.wrapping_add_signed(dx);
        assert!(r < self.rows() && c < self.cols(), "offset ({dy}, {dx}) outside window");
        self.cells[r * self.cols() + c]
    }

    /// Sample at absolute window position `(row, col)`.
    #[inline]
    pub fn at(&self, row: usize, col: usize) -> T {
        assert!(col < self.cols(), "column {col} outside window");
        self.cells[row * self.cols() + col]
    }

    /// The sample at the output position.
    #[inline]
    pub fn center(&self) -> T {
        self.cells[self.v_radius * self.cols() + self.h_radius]
    }

    /// Window row `r`, left to right.
    #[inline]
    pub fn row(&self, r: usize) -> &[T] {
        let cols = self.cols();
        &self.cells[r * cols..(r + 1) * cols]
    }

    /// Cells in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = T> + '_ {
        self.cells.iter().copied()
    }

    /// Vertical radius.
    #[inline]
    pub fn v_radius(&self) -> usize {
        self.v_radius
    }

    /// Horizontal radius.
    #[inline]
    pub fn h_radius(&self) -> usize {
        self.h_radius
    }
}

impl<T: Copy> Slots<T> for DynWindow<T> {
    #[inline]
    fn slots_mut(&mut self, r: usize) -> &mut [T] {
        let cols = self.cols();
        &mut self.cells[r * cols..(r + 1) * cols]
    }
}

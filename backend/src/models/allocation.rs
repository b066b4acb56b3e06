//! Allocation matrix
//!
//! The sole output of a run: `cells[i][j]` holds the quantity shipped from
//! origin `i` to destination `j`. Shape always matches the problem's cost grid,
//! with zeros where nothing is shipped.

use serde::{Deserialize, Serialize};

/// Shipment plan produced by the allocator
///
/// # Example
/// ```
/// use vogel_transport_core_rs::AllocationMatrix;
///
/// let mut plan = AllocationMatrix::zeros(2, 2);
/// plan.set(0, 1, 15.0);
/// plan.set(1, 0, 5.0);
///
/// assert_eq!(plan.row_sum(0), 15.0);
/// assert_eq!(plan.col_sum(0), 5.0);
/// assert_eq!(plan.total_cost(&[vec![4.0, 2.0], vec![3.0, 9.0]]), 45.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllocationMatrix {
    cells: Vec<Vec<f64>>,
}

impl AllocationMatrix {
    /// All-zero matrix with `rows` origins and `cols` destinations
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            cells: vec![vec![0.0; cols]; rows],
        }
    }

    pub fn num_rows(&self) -> usize {
        self.cells.len()
    }

    pub fn num_cols(&self) -> usize {
        self.cells.first().map_or(0, Vec::len)
    }

    /// Quantity shipped on one lane
    ///
    /// # Panics
    /// Panics if either index is out of range.
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.cells[row][col]
    }

    /// Overwrite the quantity on one lane
    pub fn set(&mut self, row: usize, col: usize, quantity: f64) {
        self.cells[row][col] = quantity;
    }

    pub fn rows(&self) -> &[Vec<f64>] {
        &self.cells
    }

    /// Total shipped out of origin `row`
    pub fn row_sum(&self, row: usize) -> f64 {
        self.cells[row].iter().sum()
    }

    /// Total delivered into destination `col`
    pub fn col_sum(&self, col: usize) -> f64 {
        self.cells.iter().map(|r| r[col]).sum()
    }

    /// Row sums for every origin, in index order
    pub fn row_sums(&self) -> Vec<f64> {
        (0..self.num_rows()).map(|i| self.row_sum(i)).collect()
    }

    /// Column sums for every destination, in index order
    pub fn col_sums(&self) -> Vec<f64> {
        (0..self.num_cols()).map(|j| self.col_sum(j)).collect()
    }

    /// Total quantity shipped across all lanes
    pub fn total_shipped(&self) -> f64 {
        self.cells.iter().flatten().sum()
    }

    /// Number of lanes carrying a positive quantity
    pub fn occupied_cells(&self) -> usize {
        self.cells.iter().flatten().filter(|&&q| q > 0.0).count()
    }

    /// Element-wise product sum of this matrix and `cost`
    ///
    /// `cost` must have the same shape as the matrix.
    pub fn total_cost(&self, cost: &[Vec<f64>]) -> f64 {
        debug_assert_eq!(cost.len(), self.cells.len());
        self.cells
            .iter()
            .zip(cost)
            .flat_map(|(quantities, costs)| quantities.iter().zip(costs))
            .map(|(q, c)| q * c)
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zeros_shape() {
        let plan = AllocationMatrix::zeros(3, 4);

        assert_eq!(plan.num_rows(), 3);
        assert_eq!(plan.num_cols(), 4);
        assert_eq!(plan.total_shipped(), 0.0);
        assert_eq!(plan.occupied_cells(), 0);
    }

    #[test]
    fn test_set_overwrites() {
        let mut plan = AllocationMatrix::zeros(1, 1);
        plan.set(0, 0, 7.0);
        plan.set(0, 0, 3.0);

        assert_eq!(plan.get(0, 0), 3.0);
    }

    #[test]
    fn test_sums() {
        let mut plan = AllocationMatrix::zeros(2, 3);
        plan.set(0, 0, 1.0);
        plan.set(0, 2, 2.0);
        plan.set(1, 2, 4.0);

        assert_eq!(plan.row_sums(), vec![3.0, 4.0]);
        assert_eq!(plan.col_sums(), vec![1.0, 0.0, 6.0]);
        assert_eq!(plan.total_shipped(), 7.0);
        assert_eq!(plan.occupied_cells(), 3);
    }
}

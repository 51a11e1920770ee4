use crate::core::utils::geometry;
use nalgebra::Point3;

/// One conformer (snapshot) of a molecule.
///
/// The potential energy is optional: frames coming from a trajectory usually have
/// none until energies are read from a separate table or pasted by the user.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Frame {
    /// Potential energy in kcal/mol, if known.
    energy: Option<f64>,
    /// Atomic positions in Angstroms.
    positions: Vec<Point3<f64>>,
}

impl Frame {
    pub fn new(positions: Vec<Point3<f64>>) -> Self {
        Self {
            energy: None,
            positions,
        }
    }

    /// Creates a frame without geometry that only carries an energy.
    pub fn with_energy(energy: f64) -> Self {
        Self {
            energy: Some(energy),
            positions: Vec::new(),
        }
    }

    pub fn energy(&self) -> Option<f64> {
        self.energy
    }

    pub fn set_energy(&mut self, energy: Option<f64>) {
        self.energy = energy;
    }

    pub fn positions(&self) -> &[Point3<f64>] {
        &self.positions
    }

    pub fn n_atoms(&self) -> usize {
        self.positions.len()
    }

    /// Geometric center of the frame's atoms, or `None` for a frame without atoms.
    pub fn centroid(&self) -> Option<Point3<f64>> {
        geometry::centroid(&self.positions)
    }
}

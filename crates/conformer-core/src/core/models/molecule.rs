use super::frame::Frame;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Clone)]
pub enum ModelError {
    #[error("Frame index {index} is out of range for a molecule with {len} frame(s)")]
    FrameOutOfRange { index: usize, len: usize },

    #[error("Population vector has {actual} entries but the molecule has {expected} frame(s)")]
    PopulationLength { expected: usize, actual: usize },
}

/// An ordered collection of frames together with their statistical populations.
///
/// The population vector is either empty (not yet computed, or invalidated because
/// frames were added) or holds exactly one entry per frame.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Molecule {
    name: String,
    frames: Vec<Frame>,
    populations: Vec<f64>,
}

impl Molecule {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_frames(name: impl Into<String>, frames: Vec<Frame>) -> Self {
        Self {
            name: name.into(),
            frames,
            populations: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Appends a frame and returns its index.
    ///
    /// Any previously computed populations no longer describe the frame set and are
    /// cleared.
    pub fn add_frame(&mut self, frame: Frame) -> usize {
        self.frames.push(frame);
        self.populations.clear();
        self.frames.len() - 1
    }

    pub fn n_frames(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    pub fn frame(&self, index: usize) -> Option<&Frame> {
        self.frames.get(index)
    }

    pub fn frame_mut(&mut self, index: usize) -> Option<&mut Frame> {
        self.frames.get_mut(index)
    }

    /// Per-frame potential energies in frame order.
    pub fn energies(&self) -> impl Iterator<Item = Option<f64>> + '_ {
        self.frames.iter().map(Frame::energy)
    }

    pub fn set_energy(&mut self, index: usize, energy: Option<f64>) -> Result<(), ModelError> {
        let len = self.frames.len();
        let frame = self
            .frames
            .get_mut(index)
            .ok_or(ModelError::FrameOutOfRange { index, len })?;
        frame.set_energy(energy);
        Ok(())
    }

    pub fn populations(&self) -> &[f64] {
        &self.populations
    }

    pub fn population(&self, index: usize) -> Option<f64> {
        self.populations.get(index).copied()
    }

    /// Replaces the population vector, which must have one entry per frame.
    pub fn set_populations(&mut self, populations: Vec<f64>) -> Result<(), ModelError> {
        if populations.len() != self.frames.len() {
            return Err(ModelError::PopulationLength {
                expected: self.frames.len(),
                actual: populations.len(),
            });
        }
        self.populations = populations;
        Ok(())
    }
}

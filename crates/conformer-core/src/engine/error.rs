use crate::core::models::molecule::ModelError;
use thiserror::Error;

/// An operation's data precondition does not hold.
#[derive(Debug, Error, PartialEq, Clone)]
pub enum InvalidStateError {
    #[error("potential energy not defined for frame {frame}")]
    MissingEnergy { frame: usize },

    #[error("potential energy of frame {frame} is not finite ({value})")]
    NonFiniteEnergy { frame: usize, value: f64 },
}

/// Structurally invalid input.
#[derive(Debug, Error, PartialEq, Clone)]
pub enum PreconditionError {
    #[error("molecule has no frames")]
    EmptyMolecule,

    #[error("frame index {index} is out of range for {len} frame(s)")]
    FrameOutOfRange { index: usize, len: usize },

    #[error("temperature must be finite and positive, got {0} K")]
    NonPositiveTemperature(f64),

    #[error("rotation axis must be a finite, non-zero vector")]
    DegenerateAxis,

    #[error("rotation angle must be finite, got {0} degrees")]
    NonFiniteAngle(f64),

    #[error("population vector has {actual} entries for {expected} frame(s)")]
    PopulationLength { expected: usize, actual: usize },

    #[error("molecule has {molecule} frame(s) but the handler tracks {handler}")]
    FrameCountMismatch { molecule: usize, handler: usize },
}

#[derive(Debug, Error, PartialEq, Clone)]
pub enum EngineError {
    #[error("Invalid state: {0}")]
    InvalidState(#[from] InvalidStateError),

    #[error("Precondition violated: {0}")]
    Precondition(#[from] PreconditionError),
}

impl From<ModelError> for EngineError {
    fn from(err: ModelError) -> Self {
        match err {
            ModelError::FrameOutOfRange { index, len } => {
                PreconditionError::FrameOutOfRange { index, len }.into()
            }
            ModelError::PopulationLength { expected, actual } => {
                PreconditionError::PopulationLength { expected, actual }.into()
            }
        }
    }
}

use super::error::{EngineError, PreconditionError};
use crate::core::models::molecule::Molecule;
use crate::core::transform::TransformStack;
use crate::core::utils::geometry;
use nalgebra::{Matrix4, Point3, UnitQuaternion, Vector3};
use tracing::{debug, trace};

/// Rotation state of a single frame.
#[derive(Debug, Clone, PartialEq)]
struct FrameTransform {
    /// Homogeneous rotation matrix derived from `rotation`, column-major.
    matrix: Matrix4<f64>,
    /// Pivot of rotation and scaling in model coordinates.
    center: Point3<f64>,
    /// Accumulated trackball rotation.
    rotation: UnitQuaternion<f64>,
    /// `true` until the first rotation seeds `rotation`.
    first: bool,
}

impl Default for FrameTransform {
    fn default() -> Self {
        Self {
            matrix: Matrix4::identity(),
            center: Point3::origin(),
            rotation: UnitQuaternion::identity(),
            first: true,
        }
    }
}

impl FrameTransform {
    fn reset_rotation(&mut self) {
        self.rotation = UnitQuaternion::identity();
        self.matrix = Matrix4::identity();
        self.first = true;
    }

    fn rotate(&mut self, increment: &UnitQuaternion<f64>) {
        let composed = if self.first {
            self.first = false;
            *increment
        } else {
            self.rotation * increment
        };
        self.rotation = UnitQuaternion::new_normalize(composed.into_inner());
        self.matrix = self.rotation.to_homogeneous();
    }
}

/// Per-frame trackball transforms for one loaded molecule.
///
/// Each frame keeps its own accumulated rotation and pivot while the scale is shared.
/// In blocked mode a single interactive rotation drives every frame; each frame still
/// accumulates the increment into its own state.
#[derive(Debug, Clone, PartialEq)]
pub struct MoleculeHandler {
    scale: f64,
    blocked: bool,
    frames: Vec<FrameTransform>,
}

impl Default for MoleculeHandler {
    fn default() -> Self {
        Self {
            scale: 1.0,
            blocked: true,
            frames: Vec::new(),
        }
    }
}

impl MoleculeHandler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_frames(n_frames: usize) -> Self {
        let mut handler = Self::new();
        handler.set_n_frames(n_frames);
        handler
    }

    /// Reallocates exactly `n_frames` identity records. The scale is kept.
    pub fn set_n_frames(&mut self, n_frames: usize) {
        debug!(n_frames, "Reallocating frame transforms.");
        self.frames = vec![FrameTransform::default(); n_frames];
    }

    pub fn n_frames(&self) -> usize {
        self.frames.len()
    }

    pub fn set_blocked(&mut self, blocked: bool) {
        self.blocked = blocked;
    }

    pub fn is_blocked(&self) -> bool {
        self.blocked
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn scale_mut(&mut self) -> &mut f64 {
        &mut self.scale
    }

    pub fn set_scale(&mut self, scale: f64) {
        self.scale = scale;
    }

    /// Applies an incremental rotation of `angle_degrees` about `axis`.
    ///
    /// The axis is normalized here. When blocked, every frame receives the increment;
    /// otherwise only `frame` does. `frame` must be in range in both modes.
    pub fn rotate(
        &mut self,
        angle_degrees: f64,
        axis: &Vector3<f64>,
        frame: usize,
    ) -> Result<(), EngineError> {
        self.check_index(frame)?;
        if !angle_degrees.is_finite() {
            return Err(PreconditionError::NonFiniteAngle(angle_degrees).into());
        }
        let increment = geometry::quaternion_from_axis_angle(axis, angle_degrees)
            .ok_or(PreconditionError::DegenerateAxis)?;

        trace!(
            angle_degrees,
            frame,
            blocked = self.blocked,
            "Applying trackball rotation."
        );

        if self.blocked {
            self.frames
                .iter_mut()
                .for_each(|record| record.rotate(&increment));
        } else {
            self.frames[frame].rotate(&increment);
        }
        Ok(())
    }

    /// Loads the frame's model transform into `stack`.
    ///
    /// The stack is reset, then translated to the rotation center, rotated, scaled and
    /// translated back, so rotation and scaling both pivot on the center.
    pub fn apply_transformation<S: TransformStack + ?Sized>(
        &self,
        frame: usize,
        stack: &mut S,
    ) -> Result<(), EngineError> {
        let record = self.record(frame)?;
        let center = record.center.coords;
        stack.load_identity();
        stack.translate(&center);
        stack.multiply(&record.matrix);
        stack.scale(self.scale);
        stack.translate(&(-center));
        Ok(())
    }

    /// The composed model transform of `frame`, identical to what
    /// [`apply_transformation`](Self::apply_transformation) loads into a stack.
    pub fn model_matrix(&self, frame: usize) -> Result<Matrix4<f64>, EngineError> {
        let record = self.record(frame)?;
        let center = record.center.coords;
        Ok(Matrix4::new_translation(&center)
            * record.matrix
            * Matrix4::new_scaling(self.scale)
            * Matrix4::new_translation(&(-center)))
    }

    pub fn matrix(&self, frame: usize) -> Result<&Matrix4<f64>, EngineError> {
        Ok(&self.record(frame)?.matrix)
    }

    pub fn quaternion(&self, frame: usize) -> Result<&UnitQuaternion<f64>, EngineError> {
        Ok(&self.record(frame)?.rotation)
    }

    /// Whether `frame` has received at least one rotation since allocation or reset.
    pub fn is_initialized(&self, frame: usize) -> Result<bool, EngineError> {
        Ok(!self.record(frame)?.first)
    }

    pub fn set_rotation_center(
        &mut self,
        center: Point3<f64>,
        frame: usize,
    ) -> Result<(), EngineError> {
        self.check_index(frame)?;
        self.frames[frame].center = center;
        Ok(())
    }

    pub fn rotation_center(&self, frame: usize) -> Result<Point3<f64>, EngineError> {
        Ok(self.record(frame)?.center)
    }

    /// Sets every frame's rotation center to the centroid of its atoms.
    ///
    /// Frames without atoms keep their current center.
    pub fn center_on(&mut self, molecule: &Molecule) -> Result<(), EngineError> {
        if molecule.n_frames() != self.frames.len() {
            return Err(PreconditionError::FrameCountMismatch {
                molecule: molecule.n_frames(),
                handler: self.frames.len(),
            }
            .into());
        }
        for (record, frame) in self.frames.iter_mut().zip(molecule.frames()) {
            if let Some(centroid) = frame.centroid() {
                record.center = centroid;
            }
        }
        Ok(())
    }

    /// Returns every frame to the unrotated state. Frame count, centers and scale are
    /// unchanged.
    pub fn reset(&mut self) {
        debug!(n_frames = self.frames.len(), "Resetting frame rotations.");
        self.frames
            .iter_mut()
            .for_each(FrameTransform::reset_rotation);
    }

    fn check_index(&self, frame: usize) -> Result<(), PreconditionError> {
        if frame < self.frames.len() {
            Ok(())
        } else {
            Err(PreconditionError::FrameOutOfRange {
                index: frame,
                len: self.frames.len(),
            })
        }
    }

    fn record(&self, frame: usize) -> Result<&FrameTransform, PreconditionError> {
        self.frames
            .get(frame)
            .ok_or(PreconditionError::FrameOutOfRange {
                index: frame,
                len: self.frames.len(),
            })
    }
}

use nalgebra::{Matrix4, Point3, Vector3};

/// The ambient model-view transform a renderer exposes.
///
/// Every mutating operation right-multiplies the current matrix, so the operation
/// issued last is the first one applied to vertices.
pub trait TransformStack {
    fn load_identity(&mut self);
    fn translate(&mut self, offset: &Vector3<f64>);
    fn multiply(&mut self, matrix: &Matrix4<f64>);
    fn scale(&mut self, factor: f64);
    fn current(&self) -> Matrix4<f64>;
}

/// An in-memory model-view stack with push/pop of saved matrices.
#[derive(Debug, Clone, PartialEq)]
pub struct MatrixStack {
    /// Saved matrices; the last entry is the current matrix and is never popped.
    matrices: Vec<Matrix4<f64>>,
}

impl Default for MatrixStack {
    fn default() -> Self {
        Self::new()
    }
}

impl MatrixStack {
    pub fn new() -> Self {
        Self {
            matrices: vec![Matrix4::identity()],
        }
    }

    /// Duplicates the current matrix onto the top of the stack.
    pub fn push(&mut self) {
        let top = self.top();
        self.matrices.push(top);
    }

    /// Restores the previously pushed matrix.
    ///
    /// Returns `false` when only the base matrix is left.
    pub fn pop(&mut self) -> bool {
        if self.matrices.len() > 1 {
            self.matrices.pop();
            true
        } else {
            false
        }
    }

    pub fn depth(&self) -> usize {
        self.matrices.len()
    }

    /// Maps a model-space point through the current matrix.
    pub fn transform_point(&self, point: &Point3<f64>) -> Point3<f64> {
        self.top().transform_point(point)
    }

    fn top(&self) -> Matrix4<f64> {
        self.matrices
            .last()
            .copied()
            .unwrap_or_else(Matrix4::identity)
    }

    fn top_mut(&mut self) -> &mut Matrix4<f64> {
        if self.matrices.is_empty() {
            self.matrices.push(Matrix4::identity());
        }
        let last = self.matrices.len() - 1;
        &mut self.matrices[last]
    }
}

impl TransformStack for MatrixStack {
    fn load_identity(&mut self) {
        *self.top_mut() = Matrix4::identity();
    }

    fn translate(&mut self, offset: &Vector3<f64>) {
        let top = self.top_mut();
        *top = *top * Matrix4::new_translation(offset);
    }

    fn multiply(&mut self, matrix: &Matrix4<f64>) {
        let top = self.top_mut();
        *top = *top * matrix;
    }

    fn scale(&mut self, factor: f64) {
        let top = self.top_mut();
        *top = *top * Matrix4::new_scaling(factor);
    }

    fn current(&self) -> Matrix4<f64> {
        self.top()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_stack_starts_at_identity() {
        let stack = MatrixStack::new();
        assert_eq!(stack.current(), Matrix4::identity());
        assert_eq!(stack.depth(), 1);
    }

    #[test]
    fn operations_apply_in_reverse_issue_order() {
        let mut stack = MatrixStack::new();
        stack.translate(&Vector3::new(1.0, 0.0, 0.0));
        stack.scale(2.0);

        let p = stack.transform_point(&Point3::new(1.0, 1.0, 1.0));

        assert!((p - Point3::new(3.0, 2.0, 2.0)).norm() < 1e-12);
    }

    #[test]
    fn load_identity_discards_accumulated_transform() {
        let mut stack = MatrixStack::new();
        stack.scale(4.0);
        stack.load_identity();
        assert_eq!(stack.current(), Matrix4::identity());
    }

    #[test]
    fn pop_restores_pushed_matrix_and_keeps_base() {
        let mut stack = MatrixStack::new();
        stack.translate(&Vector3::new(0.0, 2.0, 0.0));
        let saved = stack.current();

        stack.push();
        stack.scale(3.0);
        assert_ne!(stack.current(), saved);

        assert!(stack.pop());
        assert_eq!(stack.current(), saved);
        assert!(!stack.pop());
        assert_eq!(stack.depth(), 1);
    }
}

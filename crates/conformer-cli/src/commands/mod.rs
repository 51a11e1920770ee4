pub mod populate;
pub mod transform;

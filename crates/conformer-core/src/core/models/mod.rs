pub mod frame;
pub mod molecule;

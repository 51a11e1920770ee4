use crate::utils::parser::RotationStep;
use conformers::engine::config::PopulationConfig;
use nalgebra::Point3;
use std::path::PathBuf;

pub struct PopulateConfig {
    pub energies_path: PathBuf,
    pub plain_text: bool,
    pub output_path: Option<PathBuf>,
    pub population: PopulationConfig,
}

pub struct TransformConfig {
    pub n_frames: usize,
    pub frame: usize,
    pub rotations: Vec<RotationStep>,
    pub center: Option<Point3<f64>>,
    pub scale: f64,
    pub blocked: bool,
}

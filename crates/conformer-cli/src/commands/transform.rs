use crate::cli::TransformArgs;
use crate::config::{TransformConfig, build_transform_config};
use crate::error::Result;
use conformers::core::transform::{MatrixStack, TransformStack};
use conformers::engine::handler::MoleculeHandler;
use nalgebra::Matrix4;
use tracing::{debug, info};

pub fn run(args: TransformArgs) -> Result<()> {
    let config = build_transform_config(&args)?;
    let handler = build_handler(&config)?;

    let mut stack = MatrixStack::new();
    handler.apply_transformation(config.frame, &mut stack)?;

    println!(
        "Model matrix of frame {} ({} frame(s), {}):",
        config.frame,
        config.n_frames,
        if config.blocked { "blocked" } else { "unblocked" }
    );
    print!("{}", format_matrix(&stack.current()));
    Ok(())
}

fn build_handler(config: &TransformConfig) -> Result<MoleculeHandler> {
    let mut handler = MoleculeHandler::with_frames(config.n_frames);
    handler.set_blocked(config.blocked);
    handler.set_scale(config.scale);
    if let Some(center) = config.center {
        handler.set_rotation_center(center, config.frame)?;
    }

    info!(
        steps = config.rotations.len(),
        "Applying rotation steps to the handler."
    );
    for step in &config.rotations {
        debug!(angle = step.angle_degrees, axis = ?step.axis, "Rotation step.");
        handler.rotate(step.angle_degrees, &step.axis, config.frame)?;
    }
    Ok(handler)
}

fn format_matrix(matrix: &Matrix4<f64>) -> String {
    matrix
        .row_iter()
        .map(|row| {
            // Adding 0.0 turns -0.0 into 0.0.
            let cells: Vec<String> = row.iter().map(|v| format!("{:>12.6}", v + 0.0)).collect();
            format!("{}\n", cells.join(" "))
        })
        .collect()
}

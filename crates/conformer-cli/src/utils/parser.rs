use nalgebra::Vector3;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("Invalid vector '{0}'. Expected three comma-separated numbers 'X,Y,Z' (e.g., '0,0,1').")]
    InvalidVector(String),

    #[error("Invalid rotation '{0}'. Expected 'ANGLE:X,Y,Z' with the angle in degrees (e.g., '90:0,0,1').")]
    InvalidRotation(String),

    #[error("Component '{component}' cannot be empty in '{input}'.")]
    EmptyComponent {
        component: &'static str,
        input: String,
    },
}

/// One interactive rotation increment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotationStep {
    pub angle_degrees: f64,
    pub axis: Vector3<f64>,
}

pub fn parse_vector(input: &str) -> Result<Vector3<f64>, ParseError> {
    let components: Vec<&str> = input.split(',').map(str::trim).collect();
    if components.len() != 3 {
        return Err(ParseError::InvalidVector(input.to_string()));
    }
    let mut values = [0.0; 3];
    for (value, component) in values.iter_mut().zip(components) {
        if component.is_empty() {
            return Err(ParseError::EmptyComponent {
                component: "vector component",
                input: input.to_string(),
            });
        }
        *value = component
            .parse()
            .map_err(|_| ParseError::InvalidVector(input.to_string()))?;
    }
    Ok(Vector3::from(values))
}

pub fn parse_rotation(input: &str) -> Result<RotationStep, ParseError> {
    let (angle, axis) = input
        .split_once(':')
        .ok_or_else(|| ParseError::InvalidRotation(input.to_string()))?;
    let angle = angle.trim();
    if angle.is_empty() {
        return Err(ParseError::EmptyComponent {
            component: "angle",
            input: input.to_string(),
        });
    }
    let angle_degrees = angle
        .parse()
        .map_err(|_| ParseError::InvalidRotation(input.to_string()))?;
    let axis = parse_vector(axis).map_err(|e| match e {
        ParseError::EmptyComponent { component, .. } => ParseError::EmptyComponent {
            component,
            input: input.to_string(),
        },
        _ => ParseError::InvalidRotation(input.to_string()),
    })?;
    Ok(RotationStep {
        angle_degrees,
        axis,
    })
}

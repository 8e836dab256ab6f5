use std::{num::ParseIntError, path::PathBuf};

use thiserror::Error;

/// Rejected geometry at entity construction.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    #[error("{what} must be a finite number, got {value}")]
    NonFinite { what: &'static str, value: f32 },
    #[error("{what} must not be negative, got {value}")]
    Negative { what: &'static str, value: f32 },
}

#[derive(Error, Debug)]
pub enum LevelError {
    #[error("could not read level file {path:?}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{directive} must have {expected} parameters not {found}")]
    FieldCount {
        directive: String,
        expected: usize,
        found: usize,
    },
    #[error("`{field}` is not a whole number")]
    NotANumber {
        field: String,
        #[source]
        source: ParseIntError,
    },
    #[error("{0} is not a valid game object type")]
    UnknownDirective(String),
    #[error(transparent)]
    Geometry(#[from] GeometryError),
    #[error("a level needs exactly 2 sheepdogs, found {0}")]
    SheepdogCount(usize),
}

/// Finite check shared by the validating constructors.
pub(crate) fn finite(what: &'static str, value: f32) -> Result<f32, GeometryError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(GeometryError::NonFinite { what, value })
    }
}

pub(crate) fn non_negative(what: &'static str, value: f32) -> Result<f32, GeometryError> {
    let value = finite(what, value)?;
    if value < 0. {
        Err(GeometryError::Negative { what, value })
    } else {
        Ok(value)
    }
}

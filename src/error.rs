use std::path::PathBuf;

use thiserror::Error;

use crate::scene::NodeId;

/// Scene graph structural errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SceneError {
    #[error("node {0:?} does not exist")]
    NodeNotFound(NodeId),

    #[error("the root node cannot be removed or reparented")]
    RootImmutable,

    #[error("attaching {child:?} under {parent:?} would create a cycle")]
    CycleDetected { child: NodeId, parent: NodeId },

    #[error("node {0:?} is not a camera")]
    NotACamera(NodeId),

    #[error("tree invariant violated: {0}")]
    Invariant(String),
}

/// Color string parse failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorParseError {
    #[error("color string must start with '#': {0:?}")]
    MissingHash(String),

    #[error("color string must have 3 or 6 hex digits: {0:?}")]
    BadLength(String),

    #[error("invalid hex digit in color string: {0:?}")]
    BadDigit(String),
}

/// Debug panel binding failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BindingError {
    #[error("no property labelled {0:?}")]
    UnknownLabel(String),

    #[error("property {label:?} expects a {expected} value")]
    TypeMismatch { label: String, expected: &'static str },

    #[error("property {0:?} is not an action")]
    NotAnAction(String),
}

/// Per-frame render failures
#[derive(Debug, Error)]
pub enum RenderError {
    #[error(transparent)]
    Scene(#[from] SceneError),
}

/// Asset loading failures
#[derive(Debug, Clone, Error)]
pub enum AssetError {
    #[error("failed to import {path:?}: {message}")]
    Import { path: PathBuf, message: String },

    #[error("no triangle geometry in {0:?}")]
    NoGeometry(PathBuf),

    #[error("mesh primitive in {0:?} has no positions")]
    MissingPositions(PathBuf),

    #[error("loader thread for {0:?} exited without a result")]
    Disconnected(PathBuf),
}

/// Configuration file failures
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path:?}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {path:?}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Color(#[from] ColorParseError),
}

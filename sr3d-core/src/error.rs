/// Error types for loading, scene editing and rendering
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Which coordinate sequence an index pointed into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexKind {
    Vertex,
    Texcoord,
    Normal,
}

impl fmt::Display for IndexKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndexKind::Vertex => f.write_str("vertex"),
            IndexKind::Texcoord => f.write_str("texture coordinate"),
            IndexKind::Normal => f.write_str("normal"),
        }
    }
}

/// Reason a single geometry line was rejected
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseErrorKind {
    #[error("`{tag}` expects {expected} fields, found {found}")]
    Arity {
        tag: &'static str,
        expected: usize,
        found: usize,
    },
    #[error("invalid number `{0}`")]
    InvalidNumber(String),
    #[error("invalid face corner `{0}`")]
    InvalidCorner(String),
    #[error("{kind} index {index} out of range ({len} defined)")]
    IndexOutOfRange {
        kind: IndexKind,
        index: usize,
        len: usize,
    },
    #[error("face needs at least 3 corners, found {0}")]
    TooFewCorners(usize),
}

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("line {line}: {reason}")]
    Parse { line: usize, reason: ParseErrorKind },
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneError {
    #[error("node does not exist or was removed")]
    UnknownNode,
    #[error("parent node is not a group")]
    NotAGroup,
    #[error("node has no drawable payload")]
    NotDrawable,
    #[error("reparenting would make a node its own ancestor")]
    Cycle,
    #[error("polygon needs at least 3 vertices, got {0}")]
    DegeneratePolygon(usize),
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CameraError {
    #[error("invalid viewport {width}x{height}")]
    InvalidViewport { width: u32, height: u32 },
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderError {
    #[error("pixel buffer holds {actual} pixels, viewport needs {expected}")]
    BufferTooSmall { expected: usize, actual: usize },
    #[error(transparent)]
    Scene(#[from] SceneError),
}

//! Shape graph errors.

/// Error building or loading a shape graph
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GraphError {
    /// Two shapes share a name
    #[error("duplicate shape: {name}")]
    DuplicateShape {
        /// Shape name
        name: String,
    },
    /// Two operations share an identifier
    #[error("duplicate operation: {id}")]
    DuplicateOperation {
        /// Operation identifier
        id: String,
    },
    /// Two members of one shape share a name
    #[error("duplicate member {member} in shape {shape}")]
    DuplicateMember {
        /// Shape name
        shape: String,
        /// Member name
        member: String,
    },
    /// A type or operation references a shape that does not exist
    #[error("unknown shape {name} referenced from {referrer}")]
    UnknownShape {
        /// Missing shape name
        name: String,
        /// Where the reference appeared
        referrer: String,
    },
    /// The document could not be read
    #[error("IO error: {0}")]
    Io(String),
    /// The document could not be decoded
    #[error("decode error: {0}")]
    Decode(String),
}

impl From<std::io::Error> for GraphError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for GraphError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}

impl From<serde_yaml::Error> for GraphError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::Decode(err.to_string())
    }
}

/// Error following a dot-separated member path
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PathError {
    /// No operation with this identifier
    #[error("operation {0} does not exist")]
    UnknownOperation(String),
    /// The operation has neither input nor output shape
    #[error("operation {0} has no input or output shape")]
    NoShapes(String),
    /// Path is empty or has an empty segment
    #[error("path {0:?} has an empty segment")]
    EmptySegment(String),
    /// A segment names no member of the shape reached so far
    #[error("shape {shape} has no member {segment}")]
    MissingMember {
        /// Shape searched
        shape: String,
        /// Missing member name
        segment: String,
    },
    /// A segment was reached through a member that is not a structure
    #[error("member {member} is not a structure, cannot descend into {segment}")]
    NotAStructure {
        /// Non-structure member
        member: String,
        /// Segment that could not be followed
        segment: String,
    },
}

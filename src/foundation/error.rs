/// Convenience result type used across vinci.
pub type VinciResult<T> = Result<T, VinciError>;

/// Top-level error taxonomy used by parser, interpreter and renderer APIs.
#[derive(thiserror::Error, Debug)]
pub enum VinciError {
    /// Malformed instruction text. Raised before any instruction executes.
    #[error("parse error at line {line}: {message}")]
    Parse {
        /// 0-based index of the offending line.
        line: usize,
        /// Human-readable description.
        message: String,
    },

    /// An instruction referenced an id absent from the current canvas.
    #[error("block [{0}] is not found")]
    BlockNotFound(String),

    /// Cut point not strictly interior, or cut line outside the operand's span.
    #[error("invalid geometry: {0}")]
    InvalidGeometry(String),

    /// Swap operands differ in size.
    #[error("size mismatch: {0}")]
    SizeMismatch(String),

    /// Merge operands are not edge-adjacent and aligned.
    #[error("not mergeable: {0}")]
    NotMergeable(String),

    /// A block rectangle has inverted corners or zero area.
    #[error("invalid block: {0}")]
    InvalidBlock(String),

    /// Invalid user-provided configuration, program metadata or frame data.
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Failure of the instruction on `line`.
    #[error("at line {line}: {source}")]
    Instruction {
        /// 0-based index of the instruction's source line.
        line: usize,
        /// Underlying failure.
        #[source]
        source: Box<VinciError>,
    },

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl VinciError {
    /// Build a [`VinciError::Parse`] value.
    pub fn parse(line: usize, msg: impl Into<String>) -> Self {
        Self::Parse {
            line,
            message: msg.into(),
        }
    }

    /// Build a [`VinciError::BlockNotFound`] value.
    pub fn block_not_found(id: impl Into<String>) -> Self {
        Self::BlockNotFound(id.into())
    }

    /// Build a [`VinciError::InvalidGeometry`] value.
    pub fn invalid_geometry(msg: impl Into<String>) -> Self {
        Self::InvalidGeometry(msg.into())
    }

    /// Build a [`VinciError::SizeMismatch`] value.
    pub fn size_mismatch(msg: impl Into<String>) -> Self {
        Self::SizeMismatch(msg.into())
    }

    /// Build a [`VinciError::NotMergeable`] value.
    pub fn not_mergeable(msg: impl Into<String>) -> Self {
        Self::NotMergeable(msg.into())
    }

    /// Build a [`VinciError::InvalidBlock`] value.
    pub fn invalid_block(msg: impl Into<String>) -> Self {
        Self::InvalidBlock(msg.into())
    }

    /// Build a [`VinciError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`VinciError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// Attach the source line of the failing instruction.
    pub fn at_line(self, line: usize) -> Self {
        Self::Instruction {
            line,
            source: Box::new(self),
        }
    }

    /// Source line carried by parse and instruction failures.
    pub fn line(&self) -> Option<usize> {
        match self {
            Self::Parse { line, .. } | Self::Instruction { line, .. } => Some(*line),
            _ => None,
        }
    }

    /// Innermost error, skipping the line wrapper.
    pub fn kind(&self) -> &VinciError {
        match self {
            Self::Instruction { source, .. } => source.kind(),
            other => other,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;

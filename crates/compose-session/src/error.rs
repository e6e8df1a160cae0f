#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TrackerError {
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),
    #[error("insert position {position} out of range (composing length {len})")]
    OutOfRange { position: usize, len: usize },
}

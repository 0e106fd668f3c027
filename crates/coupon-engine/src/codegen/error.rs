/// Failures from [`CodeGenerator`](crate::CodeGenerator).
#[derive(Clone, thiserror::Error, Debug, PartialEq, Eq)]
pub enum CodeGenError {
    /// Every distinct code of the configured length has already been handed
    /// out. A plain collision never produces this; it is retried.
    #[error("all {capacity} codes of length {length} have been issued")]
    SpaceExhausted { length: usize, capacity: u128 },
}

/// A source of uniformly distributed indices.
///
/// The code generator draws every symbol through this trait, so tests can
/// replay a fixed sequence of draws and force collisions deterministically.
pub trait RandSource {
    /// Returns a value uniformly distributed in `0..bound`.
    ///
    /// Callers never pass `bound == 0`.
    fn below(&self, bound: usize) -> usize;
}

use crate::{CodeGenError, DIGITS, IDEOGRAPHS, RandSource, ThreadRandom, code_capacity};
use parking_lot::Mutex;
use std::collections::HashSet;
#[cfg(feature = "tracing")]
use tracing::instrument;

/// Code length used when none (or zero) is configured.
pub const DEFAULT_CODE_LENGTH: usize = 10;

/// A lock-based generator of globally unique coupon codes.
///
/// The generator owns the set of every code it has ever produced. That set is
/// the process-wide uniqueness domain: share one instance (behind an
/// [`Arc`](std::sync::Arc)) across every campaign rather than building one per
/// campaign, or codes may repeat between campaigns.
///
/// ## Sampling
///
/// - Position 0 is drawn from [`IDEOGRAPHS`].
/// - Every later position first flips a fair coin between digits and
///   ideographs, then draws uniformly within the chosen half. Digits and
///   ideographs each appear with probability 1/2 per position, not in
///   proportion to their counts.
///
/// ## Concurrency
///
/// Sampling, the membership check, and recording the winner all happen under
/// one mutex held for the whole retry loop, so two callers can never both
/// accept the same candidate. The cost is that code emission is serialized
/// across the process.
///
/// ## Capacity
///
/// At most [`code_capacity`] distinct codes exist for a length:
/// `16 * 26^(length - 1)`, about 8.7e13 at the default length of 10.
/// Collisions are retried without limit; only a fully spent code space fails,
/// with [`CodeGenError::SpaceExhausted`].
///
/// # Example
///
/// ```
/// use coupon_engine::{CodeGenerator, ThreadRandom, is_ideograph};
///
/// let generator = CodeGenerator::new(ThreadRandom);
/// let code = generator.generate().unwrap();
///
/// assert_eq!(code.chars().count(), 10);
/// assert!(is_ideograph(code.chars().next().unwrap()));
/// assert!(generator.contains(&code));
/// ```
pub struct CodeGenerator<R = ThreadRandom>
where
    R: RandSource,
{
    length: usize,
    capacity: Option<u128>,
    rng: R,
    issued: Mutex<HashSet<String>>,
}

impl Default for CodeGenerator<ThreadRandom> {
    fn default() -> Self {
        Self::new(ThreadRandom)
    }
}

impl<R> CodeGenerator<R>
where
    R: RandSource,
{
    /// Creates a generator producing codes of [`DEFAULT_CODE_LENGTH`].
    pub fn new(rng: R) -> Self {
        Self::with_length(DEFAULT_CODE_LENGTH, rng)
    }

    /// Creates a generator producing codes of `length` symbols.
    ///
    /// A `length` of zero falls back to [`DEFAULT_CODE_LENGTH`].
    pub fn with_length(length: usize, rng: R) -> Self {
        let length = if length == 0 {
            DEFAULT_CODE_LENGTH
        } else {
            length
        };

        Self {
            length,
            capacity: code_capacity(length),
            rng,
            issued: Mutex::new(HashSet::new()),
        }
    }

    /// Upper bound on distinct codes this generator can produce, or `None`
    /// when it is effectively unbounded.
    pub fn capacity(&self) -> Option<u128> {
        self.capacity
    }

    pub fn length(&self) -> usize {
        self.length
    }

    /// How many codes this generator has handed out.
    pub fn issued_count(&self) -> usize {
        self.issued.lock().len()
    }

    pub fn contains(&self, code: &str) -> bool {
        self.issued.lock().contains(code)
    }

    /// Produces a code that no earlier call on this generator has returned,
    /// and records it.
    ///
    /// Collisions are resampled without limit while unissued codes remain.
    /// Unlike a pure retry-forever loop, a fully spent code space is reported
    /// as an error instead of spinning with the lock held.
    ///
    /// # Errors
    /// - [`CodeGenError::SpaceExhausted`] when every code of the configured
    ///   length has been issued.
    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip(self)))]
    pub fn generate(&self) -> Result<String, CodeGenError> {
        let mut issued = self.issued.lock();

        if let Some(capacity) = self.capacity {
            if issued.len() as u128 >= capacity {
                return Err(CodeGenError::SpaceExhausted {
                    length: self.length,
                    capacity,
                });
            }
        }

        loop {
            let candidate = self.sample();
            if !issued.contains(&candidate) {
                issued.insert(candidate.clone());
                return Ok(candidate);
            }
            #[cfg(feature = "tracing")]
            tracing::trace!("coupon code collision, resampling");
        }
    }

    fn sample(&self) -> String {
        // Hangul syllables are 3 bytes in UTF-8.
        let mut code = String::with_capacity(self.length * 3);
        code.push(IDEOGRAPHS[self.rng.below(IDEOGRAPHS.len())]);

        for _ in 1..self.length {
            let symbol = if self.rng.below(2) == 0 {
                DIGITS[self.rng.below(DIGITS.len())]
            } else {
                IDEOGRAPHS[self.rng.below(IDEOGRAPHS.len())]
            };
            code.push(symbol);
        }

        code
    }
}

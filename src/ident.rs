//! Short opaque identifiers for modules and bar instances.
//!
//! Identifiers are echoed back by the host in click events, so they only
//! need to be unique within one bar's lifetime. Two alphanumeric characters
//! give 3844 combinations, which is plenty for a status line.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{BarError, BarResult};

/// Characters identifiers are drawn from.
pub const ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Default identifier length.
pub const DEFAULT_ID_LEN: usize = 2;

/// Identifier of a module (or of the bar itself).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModuleId(String);

impl ModuleId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ModuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ModuleId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl PartialEq<str> for ModuleId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

/// Source of randomness for identifier generation.
pub trait RandomSource: Send {
    /// Return a value in `0..bound`.
    fn pick(&mut self, bound: usize) -> usize;
}

/// Randomness backed by v4 UUIDs.
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidRandom;

impl RandomSource for UuidRandom {
    fn pick(&mut self, bound: usize) -> usize {
        (uuid::Uuid::new_v4().as_u128() % bound as u128) as usize
    }
}

/// Generates identifiers, retrying until one is unused.
pub struct IdAllocator {
    len: usize,
    rng: Box<dyn RandomSource>,
}

impl IdAllocator {
    /// Create an allocator producing identifiers of `len` characters.
    pub fn new(len: usize) -> Self {
        Self::with_source(len, Box::new(UuidRandom))
    }

    /// Create an allocator with an explicit randomness source.
    pub fn with_source(len: usize, rng: Box<dyn RandomSource>) -> Self {
        Self {
            len: len.max(1),
            rng,
        }
    }

    /// Identifier length in characters.
    pub fn id_len(&self) -> usize {
        self.len
    }

    /// Number of distinct identifiers this allocator can produce.
    pub fn capacity(&self) -> usize {
        u32::try_from(self.len)
            .ok()
            .and_then(|len| ALPHABET.len().checked_pow(len))
            .unwrap_or(usize::MAX)
    }

    fn generate(&mut self) -> ModuleId {
        let id = (0..self.len)
            .map(|_| ALPHABET[self.rng.pick(ALPHABET.len())] as char)
            .collect();
        ModuleId(id)
    }

    /// Allocate an identifier for which `is_taken` returns false.
    ///
    /// `used` is the number of identifiers currently taken; once it reaches
    /// [`capacity`](Self::capacity) no retry can succeed.
    pub fn allocate<F>(&mut self, used: usize, is_taken: F) -> BarResult<ModuleId>
    where
        F: Fn(&ModuleId) -> bool,
    {
        if used >= self.capacity() {
            return Err(BarError::IdSpaceExhausted {
                len: self.len,
                used,
            });
        }

        loop {
            let id = self.generate();
            if !is_taken(&id) {
                return Ok(id);
            }
            tracing::trace!(%id, "identifier collision, retrying");
        }
    }
}

impl fmt::Debug for IdAllocator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IdAllocator").field("len", &self.len).finish()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::collections::HashSet;

    /// Replays a fixed sequence of picks, wrapping around.
    pub(crate) struct ScriptedRandom {
        picks: Vec<usize>,
        pos: usize,
    }

    impl ScriptedRandom {
        pub(crate) fn new(picks: Vec<usize>) -> Self {
            Self { picks, pos: 0 }
        }
    }

    impl RandomSource for ScriptedRandom {
        fn pick(&mut self, bound: usize) -> usize {
            let value = self.picks[self.pos % self.picks.len()] % bound;
            self.pos += 1;
            value
        }
    }

    #[test]
    fn test_allocate_has_configured_length() {
        let mut alloc = IdAllocator::new(DEFAULT_ID_LEN);
        let id = alloc.allocate(0, |_| false).unwrap();
        assert_eq!(id.as_str().len(), DEFAULT_ID_LEN);
        assert!(id.as_str().bytes().all(|b| ALPHABET.contains(&b)));
    }

    #[test]
    fn test_many_allocations_are_distinct() {
        let mut alloc = IdAllocator::new(3);
        let mut seen = HashSet::new();
        for _ in 0..500 {
            let id = alloc.allocate(seen.len(), |id| seen.contains(id)).unwrap();
            assert_eq!(id.as_str().len(), 3);
            assert!(seen.insert(id));
        }
        assert_eq!(seen.len(), 500);
    }

    #[test]
    fn test_collision_retries_until_unique() {
        // First two draws produce "aa" (taken), then "ab".
        let rng = ScriptedRandom::new(vec![0, 0, 0, 1]);
        let mut alloc = IdAllocator::with_source(2, Box::new(rng));
        let taken: HashSet<ModuleId> = [ModuleId::from("aa")].into_iter().collect();

        let id = alloc.allocate(taken.len(), |id| taken.contains(id)).unwrap();
        assert_eq!(id, ModuleId::from("ab"));
    }

    #[test]
    fn test_scripted_source_is_deterministic() {
        let mut a = IdAllocator::with_source(2, Box::new(ScriptedRandom::new(vec![7, 61])));
        let mut b = IdAllocator::with_source(2, Box::new(ScriptedRandom::new(vec![7, 61])));
        assert_eq!(a.allocate(0, |_| false).unwrap(), b.allocate(0, |_| false).unwrap());
    }

    #[test]
    fn test_exhausted_space_is_an_error() {
        let mut alloc = IdAllocator::new(1);
        assert_eq!(alloc.capacity(), 62);
        let err = alloc.allocate(62, |_| true).unwrap_err();
        assert!(matches!(err, BarError::IdSpaceExhausted { len: 1, used: 62 }));
    }

    #[test]
    fn test_zero_length_is_clamped() {
        let alloc = IdAllocator::new(0);
        assert_eq!(alloc.id_len(), 1);
    }

    #[test]
    fn test_module_id_serializes_as_string() {
        let id = ModuleId::from("xY");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"xY\"");
    }
}

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::sync::OnceLock;

/// Lazily computed structural hash of the record that owns it.
///
/// Ignored by the owner's `PartialEq` and `Hash`, so it never affects
/// structural comparison. `OnceLock` makes the first computation race-free.
#[derive(Debug, Clone, Default)]
pub(crate) struct HashCache(OnceLock<u64>);

impl HashCache {
    pub(crate) fn get_or_compute<T: Hash + ?Sized>(&self, owner: &T) -> u64 {
        *self.0.get_or_init(|| {
            let mut hasher = DefaultHasher::new();
            owner.hash(&mut hasher);
            hasher.finish()
        })
    }
}

impl PartialEq for HashCache {
    fn eq(&self, _: &Self) -> bool {
        true
    }
}

impl Eq for HashCache {}

impl Hash for HashCache {
    fn hash<H: Hasher>(&self, _: &mut H) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Hash)]
    struct Sample {
        value: u32,
        cache: HashCache,
    }

    #[test]
    fn test_hash_is_cached_and_stable() {
        let a = Sample {
            value: 1,
            cache: HashCache::default(),
        };
        let b = Sample {
            value: 1,
            cache: HashCache::default(),
        };
        let first = a.cache.get_or_compute(&a);
        assert_eq!(first, a.cache.get_or_compute(&a));
        assert_eq!(first, b.cache.get_or_compute(&b));
        assert_eq!(HashCache::default(), HashCache::default());
    }
}

use std::collections::HashMap;
use std::sync::Mutex;

/// Bounded cache in front of a pure `&str -> R` conversion. When the cache is
/// full it is cleared before the next insert; a capacity of zero disables it.
pub struct Memoized<F, R> {
    func: F,
    capacity: usize,
    cache: Mutex<HashMap<String, R>>,
}

impl<F, R> Memoized<F, R>
where
    F: Fn(&str) -> R,
    R: Clone,
{
    pub fn new(func: F, capacity: usize) -> Self {
        Self {
            func,
            capacity,
            cache: Mutex::new(HashMap::new()),
        }
    }

    pub fn call(&self, input: &str) -> R {
        if self.capacity == 0 {
            return (self.func)(input);
        }
        // A poisoned lock only means another caller panicked mid-insert; the
        // map itself is still usable.
        let mut cache = self
            .cache
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        if let Some(hit) = cache.get(input) {
            return hit.clone();
        }
        let value = (self.func)(input);
        if cache.len() >= self.capacity {
            cache.clear();
        }
        cache.insert(input.to_string(), value.clone());
        value
    }

    pub fn cached_len(&self) -> usize {
        self.cache
            .lock()
            .map(|cache| cache.len())
            .unwrap_or_else(|poisoned| poisoned.into_inner().len())
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

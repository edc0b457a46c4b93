//! A bounded cache of compiled, whole-string-anchored regular expressions.
use crate::error::FilterError;
use regex::Regex;
use std::cell::RefCell;
use std::collections::HashMap;

#[derive(Debug)]
pub struct RegexCache {
    capacity: usize,
    compiled: RefCell<HashMap<String, Regex>>,
}

impl RegexCache {
    /// A capacity of zero disables caching.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            compiled: RefCell::new(HashMap::new()),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.compiled.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns a regex matching `pattern` against the whole input.
    pub fn get(&self, pattern: &str) -> Result<Regex, FilterError> {
        if let Some(regex) = self.compiled.borrow().get(pattern) {
            return Ok(regex.clone());
        }

        let regex = Regex::new(&format!("^(?:{})$", pattern)).map_err(|e| FilterError::Regex {
            pattern: pattern.to_string(),
            message: e.to_string(),
        })?;

        if self.capacity > 0 {
            let mut compiled = self.compiled.borrow_mut();
            if compiled.len() >= self.capacity {
                log::trace!("Regex cache full ({} entries), clearing", compiled.len());
                compiled.clear();
            }
            compiled.insert(pattern.to_string(), regex.clone());
        }
        Ok(regex)
    }
}

impl Clone for RegexCache {
    /// Clones start cold; only the capacity is carried over.
    fn clone(&self) -> Self {
        Self::new(self.capacity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_patterns_are_anchored() {
        let cache = RegexCache::new(4);
        let re = cache.get(r"cld-(\d+)").unwrap();
        assert!(re.is_match("cld-1000"));
        assert!(!re.is_match("xcld-1000"));
        assert!(!re.is_match("cld-1000-2"));
    }

    #[test]
    fn test_alternation_is_anchored_as_a_whole() {
        let cache = RegexCache::new(4);
        let re = cache.get("a|b").unwrap();
        assert!(re.is_match("a"));
        assert!(!re.is_match("ab"));
    }

    #[test]
    fn test_capacity_bounds_entries() {
        let cache = RegexCache::new(2);
        cache.get("a").unwrap();
        cache.get("b").unwrap();
        assert_eq!(cache.len(), 2);
        cache.get("c").unwrap();
        assert_eq!(cache.len(), 1);

        let disabled = RegexCache::new(0);
        disabled.get("a").unwrap();
        assert!(disabled.is_empty());
    }

    #[test]
    fn test_invalid_pattern_is_an_error() {
        let cache = RegexCache::new(2);
        let err = cache.get("(").unwrap_err();
        assert!(matches!(err, FilterError::Regex { ref pattern, .. } if pattern == "("));
    }
}

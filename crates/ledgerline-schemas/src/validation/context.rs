//! Record path tracking for validation reports
//!
//! Copyright (c) 2025 Ledgerline Team
//! Licensed under the Apache-2.0 license

/// Position inside a record, rendered as `$.field[index]`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationContext {
    /// Current record path
    pub path: String,
}

impl ValidationContext {
    /// Context at the record root
    pub fn new() -> Self {
        Self {
            path: "$".to_string(),
        }
    }

    /// Create a child context with updated path
    pub fn child<P: AsRef<str>>(&self, path_segment: P) -> Self {
        Self {
            path: format!("{}.{}", self.path, path_segment.as_ref()),
        }
    }

    /// Create a child context for array index
    pub fn child_index(&self, index: usize) -> Self {
        Self {
            path: format!("{}[{}]", self.path, index),
        }
    }

    /// Convert a JSON pointer (`/inputs/0/fulfills`) into a record path
    ///
    /// Segments made only of digits are read as array indices.
    pub fn from_pointer(pointer: &str) -> Self {
        pointer
            .split('/')
            .skip(1)
            .map(|segment| segment.replace("~1", "/").replace("~0", "~"))
            .fold(Self::new(), |context, segment| {
                match segment.parse::<usize>() {
                    Ok(index) if !segment.is_empty() => context.child_index(index),
                    _ => context.child(segment),
                }
            })
    }

    /// Place a root-relative record path underneath this context
    pub fn reroot(&self, path: &str) -> String {
        match path.strip_prefix('$') {
            Some(rest) => format!("{}{}", self.path, rest),
            None => format!("{}.{}", self.path, path),
        }
    }
}

impl Default for ValidationContext {
    fn default() -> Self {
        Self::new()
    }
}

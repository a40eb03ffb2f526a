use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Structural proof that an annotation type can be instantiated: the
/// annotation type name plus a value for every declared element.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct AnnotationMirror {
    pub annotation_type: String,
    pub values: BTreeMap<String, serde_json::Value>,
}

impl AnnotationMirror {
    pub fn new(annotation_type: impl Into<String>) -> Self {
        Self {
            annotation_type: annotation_type.into(),
            values: BTreeMap::new(),
        }
    }

    pub fn with_value(mut self, element: impl Into<String>, value: serde_json::Value) -> Self {
        self.values.insert(element.into(), value);
        self
    }

    pub fn value(&self, element: &str) -> Option<&serde_json::Value> {
        self.values.get(element)
    }
}

impl fmt::Display for AnnotationMirror {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "@{}", self.annotation_type)?;
        if self.values.is_empty() {
            return Ok(());
        }
        f.write_str("(")?;
        for (idx, (name, value)) in self.values.iter().enumerate() {
            if idx > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{name}={value}")?;
        }
        f.write_str(")")
    }
}

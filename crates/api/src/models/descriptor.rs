use crate::error::{ApiError, ApiResult};
use serde::{Deserialize, Serialize};

/// Program contexts an annotation may be applied to, as declared by its
/// `@Target` meta-annotation.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ElementType {
    Type,
    Field,
    Method,
    Parameter,
    Constructor,
    LocalVariable,
    AnnotationType,
    Package,
    TypeParameter,
    TypeUse,
    Module,
    RecordComponent,
}

/// Returns true when a target set makes an annotation usable as a type
/// qualifier: `TYPE_USE` must be present and the only other permitted
/// context is `TYPE_PARAMETER`.
pub fn has_type_qualifier_element_types(targets: &[ElementType]) -> bool {
    let mut has_type_use = false;
    for target in targets {
        match target {
            ElementType::TypeUse => has_type_use = true,
            ElementType::TypeParameter => {}
            _ => return false,
        }
    }
    has_type_use
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ClassKind {
    Class,
    Interface,
    Enum,
    Annotation,
    Record,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RetentionPolicy {
    Source,
    Class,
    Runtime,
}

/// A declared annotation element (an annotation "method").
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ElementDescriptor {
    pub name: String,
    pub value_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<serde_json::Value>,
}

impl ElementDescriptor {
    pub fn new(name: impl Into<String>, value_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value_type: value_type.into(),
            default: None,
        }
    }

    pub fn with_default(mut self, value: serde_json::Value) -> Self {
        self.default = Some(value);
        self
    }
}

/// Statically known shape of a class, standing in for what a runtime would
/// learn by loading it reflectively.
///
/// `target` is `None` when the class carries no `@Target` meta-annotation
/// at all, which is distinct from an explicitly empty target set.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ClassDescriptor {
    pub name: String,
    pub kind: ClassKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<Vec<ElementType>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retention: Option<RetentionPolicy>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub elements: Vec<ElementDescriptor>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub meta_annotations: Vec<String>,
}

impl ClassDescriptor {
    pub fn new(name: impl Into<String>, kind: ClassKind) -> Self {
        Self {
            name: name.into(),
            kind,
            target: None,
            retention: None,
            elements: Vec::new(),
            meta_annotations: Vec::new(),
        }
    }

    /// Shorthand for an annotation type with runtime retention and no target.
    pub fn annotation(name: impl Into<String>) -> Self {
        let mut descriptor = Self::new(name, ClassKind::Annotation);
        descriptor.retention = Some(RetentionPolicy::Runtime);
        descriptor
    }

    pub fn with_target(mut self, targets: impl IntoIterator<Item = ElementType>) -> Self {
        self.target = Some(targets.into_iter().collect());
        self
    }

    pub fn with_element(mut self, element: ElementDescriptor) -> Self {
        self.elements.push(element);
        self
    }

    pub fn with_meta_annotation(mut self, name: impl Into<String>) -> Self {
        self.meta_annotations.push(name.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn simple_name(&self) -> &str {
        self.name.rsplit('.').next().unwrap_or(&self.name)
    }

    pub fn package_name(&self) -> Option<&str> {
        self.name.rsplit_once('.').map(|(package, _)| package)
    }

    pub fn is_annotation(&self) -> bool {
        self.kind == ClassKind::Annotation
    }

    pub fn has_meta_annotation(&self, name: &str) -> bool {
        self.meta_annotations.iter().any(|m| m == name)
    }

    /// Checks the descriptor is internally consistent: a well-formed dotted
    /// name and uniquely named elements.
    pub fn validate(&self) -> ApiResult<()> {
        if !is_qualified_name(&self.name) {
            return Err(ApiError::InvalidDescriptor(format!(
                "'{}' is not a valid qualified class name",
                self.name
            )));
        }
        for (idx, element) in self.elements.iter().enumerate() {
            if element.name.is_empty() {
                return Err(ApiError::InvalidDescriptor(format!(
                    "{} declares an element with an empty name",
                    self.name
                )));
            }
            if self.elements[..idx].iter().any(|e| e.name == element.name) {
                return Err(ApiError::InvalidDescriptor(format!(
                    "{} declares element '{}' more than once",
                    self.name, element.name
                )));
            }
        }
        Ok(())
    }
}

/// Dotted identifier check: non-empty segments made of identifier characters.
pub fn is_qualified_name(name: &str) -> bool {
    !name.is_empty()
        && name.split('.').all(|segment| {
            let mut chars = segment.chars();
            match chars.next() {
                Some(first) if first.is_alphabetic() || first == '_' || first == '$' => {
                    chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$')
                }
                _ => false,
            }
        })
}

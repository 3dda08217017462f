//! Input validation limits for graph documents

/// Maximum length for vertex names (256 chars)
pub const MAX_VERTEX_NAME_LEN: usize = 256;

/// Maximum length for vertex and edge labels (128 chars)
pub const MAX_LABEL_LEN: usize = 128;

/// Maximum length for property keys (128 chars)
pub const MAX_PROPERTY_KEY_LEN: usize = 128;

/// Maximum number of vertices plus edges in one graph document
pub const MAX_DOCUMENT_ELEMENTS: usize = 1_000_000;

/// Validation error type
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    VertexNameTooLong { len: usize, max: usize },
    LabelTooLong { len: usize, max: usize },
    PropertyKeyTooLong { len: usize, max: usize },
    TooManyElements { count: usize, max: usize },
    EmptyVertexName,
    EmptyLabel,
    EmptyPropertyKey,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::VertexNameTooLong { len, max } => {
                write!(f, "Vertex name too long: {} chars (max {})", len, max)
            }
            Self::LabelTooLong { len, max } => {
                write!(f, "Label too long: {} chars (max {})", len, max)
            }
            Self::PropertyKeyTooLong { len, max } => {
                write!(f, "Property key too long: {} chars (max {})", len, max)
            }
            Self::TooManyElements { count, max } => {
                write!(f, "Too many elements in document: {} (max {})", count, max)
            }
            Self::EmptyVertexName => write!(f, "Vertex name cannot be empty"),
            Self::EmptyLabel => write!(f, "Label cannot be empty"),
            Self::EmptyPropertyKey => write!(f, "Property key cannot be empty"),
        }
    }
}

impl std::error::Error for ValidationError {}

/// Validate vertex name
pub fn validate_vertex_name(name: &str) -> Result<(), ValidationError> {
    if name.is_empty() {
        return Err(ValidationError::EmptyVertexName);
    }
    if name.len() > MAX_VERTEX_NAME_LEN {
        return Err(ValidationError::VertexNameTooLong {
            len: name.len(),
            max: MAX_VERTEX_NAME_LEN,
        });
    }
    Ok(())
}

/// Validate vertex or edge label
pub fn validate_label(label: &str) -> Result<(), ValidationError> {
    if label.is_empty() {
        return Err(ValidationError::EmptyLabel);
    }
    if label.len() > MAX_LABEL_LEN {
        return Err(ValidationError::LabelTooLong {
            len: label.len(),
            max: MAX_LABEL_LEN,
        });
    }
    Ok(())
}

/// Validate property key
pub fn validate_property_key(key: &str) -> Result<(), ValidationError> {
    if key.is_empty() {
        return Err(ValidationError::EmptyPropertyKey);
    }
    if key.len() > MAX_PROPERTY_KEY_LEN {
        return Err(ValidationError::PropertyKeyTooLong {
            len: key.len(),
            max: MAX_PROPERTY_KEY_LEN,
        });
    }
    Ok(())
}

/// Validate element count of a graph document
pub fn validate_document_size(count: usize) -> Result<(), ValidationError> {
    if count > MAX_DOCUMENT_ELEMENTS {
        return Err(ValidationError::TooManyElements {
            count,
            max: MAX_DOCUMENT_ELEMENTS,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_vertex_name() {
        assert!(validate_vertex_name("marko").is_ok());
        assert_eq!(
            validate_vertex_name(""),
            Err(ValidationError::EmptyVertexName)
        );
        assert!(validate_vertex_name(&"x".repeat(300)).is_err());
    }

    #[test]
    fn test_validate_label() {
        assert!(validate_label("knows").is_ok());
        assert_eq!(validate_label(""), Err(ValidationError::EmptyLabel));
        assert!(validate_label(&"l".repeat(129)).is_err());
    }

    #[test]
    fn test_validate_property_key() {
        assert!(validate_property_key("age").is_ok());
        assert!(validate_property_key("").is_err());
    }
}

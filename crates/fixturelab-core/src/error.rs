use thiserror::Error;

#[derive(Error, Debug)]
pub enum FixtureError {
    #[error("XML parsing error at {location}: {message}")]
    XmlParse { message: String, location: String },

    #[error("XML serialization error: {0}")]
    XmlWrite(String),

    #[error("Malformed fixture structure: {message}")]
    Structure { message: String },

    #[error("Merge service returned status {status}: {message}")]
    Service { status: u16, message: String },

    #[error("Invalid reference data: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl FixtureError {
    pub fn structure(message: impl Into<String>) -> Self {
        Self::Structure {
            message: message.into(),
        }
    }

    pub fn service(status: u16, message: impl Into<String>) -> Self {
        Self::Service {
            status,
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, FixtureError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_structure_formats_correctly() {
        let err = FixtureError::structure("document has no <sheet> element");
        assert_eq!(
            err.to_string(),
            "Malformed fixture structure: document has no <sheet> element"
        );
    }

    #[test]
    fn error_service_formats_correctly() {
        let err = FixtureError::service(400, "Missing file1 or file2");
        assert_eq!(
            err.to_string(),
            "Merge service returned status 400: Missing file1 or file2"
        );
    }
}

use serde::{Deserialize, Serialize};

/// Capability a caller asks the engine about.
///
/// Names are taken verbatim and resolved against the definition catalogs at
/// check time. A name that does not resolve, including a blank one, denies the
/// request.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AccessRequest {
    functionality: String,
    object: Option<String>,
    access_level: String,
}

impl AccessRequest {
    /// Creates a request; `object == None` asks for functionality-wide access.
    #[must_use]
    pub fn new(
        functionality: impl Into<String>,
        object: Option<String>,
        access_level: impl Into<String>,
    ) -> Self {
        Self {
            functionality: functionality.into(),
            object,
            access_level: access_level.into(),
        }
    }

    /// Shorthand for a functionality-wide request.
    #[must_use]
    pub fn functionality_wide(
        functionality: impl Into<String>,
        access_level: impl Into<String>,
    ) -> Self {
        Self::new(functionality, None, access_level)
    }

    /// Shorthand for a request scoped to one object.
    #[must_use]
    pub fn scoped(
        functionality: impl Into<String>,
        object: impl Into<String>,
        access_level: impl Into<String>,
    ) -> Self {
        Self::new(functionality, Some(object.into()), access_level)
    }

    /// Returns the requested functionality name.
    #[must_use]
    pub fn functionality(&self) -> &str {
        self.functionality.as_str()
    }

    /// Returns the requested object name, if any.
    #[must_use]
    pub fn object(&self) -> Option<&str> {
        self.object.as_deref()
    }

    /// Returns the requested access level name.
    #[must_use]
    pub fn access_level(&self) -> &str {
        self.access_level.as_str()
    }
}

impl std::fmt::Display for AccessRequest {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.object {
            Some(object) => write!(
                formatter,
                "{}/{}@{}",
                self.functionality, object, self.access_level
            ),
            None => write!(formatter, "{}@{}", self.functionality, self.access_level),
        }
    }
}

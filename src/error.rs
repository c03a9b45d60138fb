pub type PathweaveResult<T> = std::result::Result<T, PathweaveError>;

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathweaveError {
    ProductionExists { production_name: String },
    MissingProduction { production_name: String },
    InvalidProductionName { production_name: String },
}

impl std::fmt::Display for PathweaveError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ProductionExists { production_name } => {
                write!(f, "Production already exists: {}", production_name)
            }
            Self::MissingProduction { production_name } => {
                write!(f, "Production not found: {}", production_name)
            }
            Self::InvalidProductionName { production_name } => {
                write!(
                    f,
                    "Invalid production name '{}': expected an identifier",
                    production_name
                )
            }
        }
    }
}

impl std::error::Error for PathweaveError {}

/// Production names become class names in the emitted source.
pub(crate) fn validate_production_name(name: &str) -> PathweaveResult<()> {
    let mut chars = name.chars();
    let valid = chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_');

    if valid {
        Ok(())
    } else {
        Err(PathweaveError::InvalidProductionName {
            production_name: name.to_string(),
        })
    }
}

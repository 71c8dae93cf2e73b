use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SdkError {
    #[error("failed to read config {}: {source}", .path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("invalid config: `{field}` must not be empty")]
    EmptyConfigField { field: &'static str },

    #[error("{0}")]
    Load(#[from] cwsave_roster::LoadError),
}

impl SdkError {
    /// The load failure class, if this error came from loading a database.
    pub fn load_failure(&self) -> Option<cwsave_roster::LoadFailure> {
        match self {
            Self::Load(err) => Some(err.kind()),
            _ => None,
        }
    }
}

pub type SdkResult<T> = Result<T, SdkError>;

#[cfg(test)]
mod tests {
    use super::*;
    use cwsave_roster::{DecodeError, LoadError, LoadFailure};

    #[test]
    fn load_errors_convert_and_keep_their_message() {
        let load = LoadError::RecordCorrupted {
            index: 0,
            source: DecodeError::InvalidName,
        };
        let expected = load.to_string();
        let err: SdkError = load.into();
        assert_eq!(err.to_string(), expected);
        assert_eq!(err.load_failure(), Some(LoadFailure::RecordCorrupted));
    }

    #[test]
    fn config_errors_have_no_load_failure() {
        let err = SdkError::EmptyConfigField { field: "save_dir_name" };
        assert_eq!(err.load_failure(), None);
    }
}

use std::{error, fmt, io, path::PathBuf};

use crate::core::battle::{component::UnitType, scenario};

#[derive(Debug, derive_more::From)]
pub enum ZError {
    RonDeserializeError {
        error: ron::de::Error,
        path: PathBuf,
    },
    IOError(io::Error),
    ScenarioError(scenario::Error),
    MissingPrototype(UnitType),
}

impl ZError {
    pub fn from_ron_de_error(error: ron::de::Error, path: PathBuf) -> Self {
        ZError::RonDeserializeError { error, path }
    }
}

impl fmt::Display for ZError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ZError::RonDeserializeError { error, path } => {
                let s = path.to_str().unwrap_or("<no path>");
                write!(f, "Can't deserialize '{}': {}", s, error)
            }
            ZError::IOError(ref e) => write!(f, "IO Error: {}", e),
            ZError::ScenarioError(ref e) => write!(f, "Bad scenario: {:?}", e),
            ZError::MissingPrototype(unit_type) => {
                write!(f, "No prototype for {:?} in the rules", unit_type)
            }
        }
    }
}

impl error::Error for ZError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            ZError::RonDeserializeError { error, .. } => Some(error),
            ZError::IOError(ref e) => Some(e),
            ZError::ScenarioError(_) | ZError::MissingPrototype(_) => None,
        }
    }
}

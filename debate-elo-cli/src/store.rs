//! Reading and writing the documents each step consumes and produces.

use std::{fs, io, path::Path};

use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, warn};

use crate::Error;

pub fn read_document<T: DeserializeOwned>(path: &Path) -> Result<T, Error> {
    let content = fs::read_to_string(path).map_err(|source| Error::Read {
        path: path.to_owned(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| Error::Parse {
        path: path.to_owned(),
        source,
    })
}

/// Reads state left behind by an earlier run. A missing, empty or corrupt
/// document counts as no prior state.
pub fn read_prior<T: DeserializeOwned + Default>(path: &Path) -> T {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            debug!("No prior state at {}", path.display());
            return T::default();
        }
        Err(err) => {
            warn!("Ignoring unreadable prior state at {}: {err}", path.display());
            return T::default();
        }
    };

    if content.trim().is_empty() {
        debug!("Prior state at {} is empty", path.display());
        return T::default();
    }

    serde_json::from_str(&content).unwrap_or_else(|err| {
        warn!("Ignoring corrupt prior state at {}: {err}", path.display());
        T::default()
    })
}

pub fn write_document<T: Serialize>(path: &Path, document: &T) -> Result<(), Error> {
    let json = serde_json::to_string(document).map_err(Error::Serialize)?;
    write_text(path, &json)
}

pub fn write_text(path: &Path, text: &str) -> Result<(), Error> {
    fs::write(path, text).map_err(|source| Error::Write {
        path: path.to_owned(),
        source,
    })
}

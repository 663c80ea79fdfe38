use std::{fs, path::Path, time::Duration};

use serde::de::DeserializeOwned;

use crate::{error::ZError, ZResult};

pub fn time_s(s: f32) -> Duration {
    let ms = s * 1000.0;
    Duration::from_millis(ms as u64)
}

/// Read a file to a string.
pub fn read_file<P: AsRef<Path>>(path: P) -> ZResult<String> {
    Ok(fs::read_to_string(path)?)
}

pub fn deserialize_from_file<P, D>(path: P) -> ZResult<D>
where
    P: AsRef<Path>,
    D: DeserializeOwned,
{
    let path = path.as_ref();
    let s = read_file(path)?;
    ron::de::from_str(&s).map_err(|e| ZError::from_ron_de_error(e, path.into()))
}

//! Generic parameters functions
//!
//! Parameter files are either TOML (`.toml`) or JSON (`.json`), selected by
//! the file's extension.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use serde::de::DeserializeOwned;
use std::fs::read_to_string;
use std::path::Path;
use thiserror::Error;
use toml;

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// An error that occurs during loading of a parameter file.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("The software root environment variable (CDPR_SW_ROOT) is not set")]
    SwRootNotSet,

    #[error("Cannot load the parmeter file: {0}")]
    FileLoadError(std::io::Error),

    #[error("Cannot read the TOML parameter file: {0}")]
    DeserialiseError(toml::de::Error),

    #[error("Cannot read the JSON parameter file: {0}")]
    JsonDeserialiseError(serde_json::Error),

    #[error("Unsupported parameter file extension {0:?}, expected \"toml\" or \"json\"")]
    UnsupportedFormat(Option<String>),
}

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Load a parameter file
///
/// The file path is relative to the "params" directory under the software
/// root. An absolute path is used as given.
pub fn load<P, F>(param_file_path: F) -> Result<P, LoadError>
where
    P: DeserializeOwned,
    F: AsRef<Path>,
{
    if param_file_path.as_ref().is_absolute() {
        return load_path(param_file_path);
    }

    // Get the params dir
    let mut path = crate::host::get_cdpr_sw_root().map_err(|_| LoadError::SwRootNotSet)?;
    path.push("params");
    path.push(param_file_path);

    load_path(path)
}

/// Load a parameter file from an explicit path.
pub fn load_path<P, F>(path: F) -> Result<P, LoadError>
where
    P: DeserializeOwned,
    F: AsRef<Path>,
{
    let path = path.as_ref();

    // Load the file into a string
    let params_str = match read_to_string(path) {
        Ok(s) => s,
        Err(e) => return Err(LoadError::FileLoadError(e)),
    };

    // Parse the string into the parameter struct
    match path.extension().and_then(|e| e.to_str()) {
        Some("toml") => from_toml_str(params_str.as_str()),
        Some("json") => from_json_str(params_str.as_str()),
        ext => Err(LoadError::UnsupportedFormat(ext.map(String::from))),
    }
}

/// Parse parameters from a TOML string.
pub fn from_toml_str<P>(params_str: &str) -> Result<P, LoadError>
where
    P: DeserializeOwned,
{
    toml::from_str(params_str).map_err(LoadError::DeserialiseError)
}

/// Parse parameters from a JSON string.
pub fn from_json_str<P>(params_str: &str) -> Result<P, LoadError>
where
    P: DeserializeOwned,
{
    serde_json::from_str(params_str).map_err(LoadError::JsonDeserialiseError)
}

#[cfg(test)]
mod test {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Dummy {
        radius_m: f64,
        flags: Vec<bool>,
    }

    #[test]
    fn test_formats_agree() {
        let from_toml: Dummy = from_toml_str("radius_m = 0.045\nflags = [true, false]").unwrap();
        let from_json: Dummy =
            from_json_str(r#"{ "radius_m": 0.045, "flags": [true, false] }"#).unwrap();

        assert_eq!(from_toml, from_json);
    }

    #[test]
    fn test_bad_inputs() {
        assert!(matches!(
            from_toml_str::<Dummy>("radius_m = 0.045"),
            Err(LoadError::DeserialiseError(_))
        ));
        assert!(matches!(
            load_path::<Dummy, _>("definitely/not/a/real/file.toml"),
            Err(LoadError::FileLoadError(_))
        ));
    }
}

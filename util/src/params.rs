//! Generic parameters functions

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use serde::de::DeserializeOwned;
use std::fs::read_to_string;
use std::path::{Path, PathBuf};
use thiserror::Error;
use toml;

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// An error that occurs during loading of a parameter file.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("The software root environment variable (GPS_NAV_SW_ROOT) is not set")]
    SwRootNotSet,

    #[error("Cannot load the parmeter file {0:?}: {1}")]
    FileLoadError(PathBuf, std::io::Error),

    #[error("Cannot read the parameter file {0:?}: {1}")]
    DeserialiseError(PathBuf, toml::de::Error),
}

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Load a parameter file
///
/// The file path is relative to the "params" directory in the software root.
pub fn load<P>(param_file_path: &str) -> Result<P, LoadError>
where
    P: DeserializeOwned,
{
    // Get the params dir
    let mut path = crate::host::get_sw_root().map_err(|_| LoadError::SwRootNotSet)?;
    path.push("params");
    path.push(param_file_path);

    load_from_path(path)
}

/// Load a parameter file from an explicit path, bypassing the software root.
pub fn load_from_path<P, F>(path: F) -> Result<P, LoadError>
where
    P: DeserializeOwned,
    F: AsRef<Path>,
{
    let path = path.as_ref().to_path_buf();

    // Load the file into a string
    let params_str = match read_to_string(&path) {
        Ok(s) => s,
        Err(e) => return Err(LoadError::FileLoadError(path, e)),
    };

    // Parse the string into the parameter struct
    parse(params_str.as_str()).map_err(|e| LoadError::DeserialiseError(path, e))
}

/// Parse parameters from a TOML string.
pub fn parse<P>(params_str: &str) -> Result<P, toml::de::Error>
where
    P: DeserializeOwned,
{
    toml::from_str(params_str)
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;
    use serde::Deserialize;

    #[derive(Deserialize, Debug)]
    struct TestParams {
        cycle_period_s: f64,
        name: String,
    }

    #[test]
    fn test_load_from_path() {
        let dir = std::env::temp_dir().join("gps_nav_util_params_test");
        std::fs::create_dir_all(&dir).unwrap();

        // Valid file
        let good = dir.join("good.toml");
        std::fs::write(&good, "cycle_period_s = 0.1\nname = \"nav\"\n").unwrap();
        let p: TestParams = load_from_path(&good).unwrap();
        assert_eq!(p.cycle_period_s, 0.1);
        assert_eq!(p.name, "nav");

        // Missing field
        let bad = dir.join("bad.toml");
        std::fs::write(&bad, "cycle_period_s = 0.1\n").unwrap();
        match load_from_path::<TestParams, _>(&bad) {
            Err(LoadError::DeserialiseError(..)) => (),
            r => panic!("Expected a deserialise error, got {:?}", r),
        }

        // Missing file
        match load_from_path::<TestParams, _>(dir.join("missing.toml")) {
            Err(LoadError::FileLoadError(..)) => (),
            r => panic!("Expected a file load error, got {:?}", r),
        }
    }
}

use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::io::{self, Read};
use std::path::Path;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ListingRequest {
    pub platform: Option<String>,
    pub fields: BTreeMap<String, String>,
    pub text: Option<String>,
    pub keywords: Vec<String>,
}

/// Reads a JSON document from `path`, or from stdin when no path is given.
pub fn read_json<T: DeserializeOwned>(path: Option<&Path>) -> Result<T, String> {
    let payload = match path {
        Some(path) => std::fs::read_to_string(path)
            .map_err(|err| format!("failed reading {}: {}", path.display(), err))?,
        None => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .map_err(|err| format!("failed reading stdin: {}", err))?;
            buffer
        }
    };

    if payload.trim().is_empty() {
        return Err("missing input: pass --input or pipe JSON on stdin".to_string());
    }
    serde_json::from_str(&payload).map_err(|err| format!("invalid input: {}", err))
}

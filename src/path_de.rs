use serde::de::DeserializeOwned;

use crate::error::SchemaError;

/// Deserialize with JSON-path context in error messages.
pub fn from_str_with_path<T: DeserializeOwned>(src: &str, source_name: &str) -> Result<T, SchemaError> {
    let de = &mut serde_json::Deserializer::from_str(src);
    serde_path_to_error::deserialize::<_, T>(de).map_err(|err| document_error(err, source_name))
}

pub fn from_slice_with_path<T: DeserializeOwned>(bytes: &[u8], source_name: &str) -> Result<T, SchemaError> {
    let de = &mut serde_json::Deserializer::from_slice(bytes);
    serde_path_to_error::deserialize::<_, T>(de).map_err(|err| document_error(err, source_name))
}

fn document_error(err: serde_path_to_error::Error<serde_json::Error>, source_name: &str) -> SchemaError {
    SchemaError::Document {
        source_name: source_name.to_owned(),
        path: err.path().to_string(),
        message: err.into_inner().to_string(),
    }
}

use flate2::read::MultiGzDecoder;
use projectstore_model::Fields;
use serde_json::Value;
use std::io::Read;

use crate::store::StoreError;

/// Decode an uncompressed current-state snapshot.
///
/// Errors carry no path; the store attaches the file they came from.
pub fn decode_latest(bytes: &[u8]) -> Result<Fields, StoreError> {
    let value: Value =
        serde_json::from_slice(bytes).map_err(|source| StoreError::Parse { path: None, source })?;
    into_object(value)
}

/// Decompress and decode one historical snapshot.
///
/// Concatenated gzip members are read through to the end of the input.
pub fn decode_version(bytes: &[u8]) -> Result<Fields, StoreError> {
    let json = gzip_decompress(bytes)?;
    decode_latest(&json)
}

fn into_object(value: Value) -> Result<Fields, StoreError> {
    match value {
        Value::Object(fields) => Ok(fields),
        other => Err(StoreError::MalformedSnapshot {
            path: None,
            value: other,
        }),
    }
}

fn gzip_decompress(data: &[u8]) -> Result<Vec<u8>, StoreError> {
    let mut decoder = MultiGzDecoder::new(data);
    let mut buf = Vec::new();
    decoder
        .read_to_end(&mut buf)
        .map_err(|source| StoreError::Decompress { path: None, source })?;
    Ok(buf)
}

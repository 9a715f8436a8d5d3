use cosmwasm_std::Binary;
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::error::EncodeError;

/// Serializes `msg` to compact json and wraps it as a base64 [Binary],
/// the form contracts expect for embedded `msg` payloads.
pub fn encode<T: Serialize + ?Sized>(msg: &T) -> Result<Binary, EncodeError> {
    let json = serde_json::to_vec(msg).map_err(EncodeError::json)?;
    Ok(Binary::from(json))
}

/// Inverse of [encode].
pub fn decode<T: DeserializeOwned>(msg: &Binary) -> Result<T, EncodeError> {
    serde_json::from_slice(msg.as_slice()).map_err(EncodeError::json_de)
}

// src/payload.rs
//! Structured payload encoding for `Store::put_structured` / `get_structured`
//!
//! Stateless free functions over serde_json. Never used on the envelope path.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::Result;

pub fn encode<T: Serialize + ?Sized>(value: &T) -> Result<Vec<u8>> {
    Ok(serde_json::to_vec(value)?)
}

pub fn decode<T: DeserializeOwned>(bytes: &[u8]) -> Result<T> {
    Ok(serde_json::from_slice(bytes)?)
}

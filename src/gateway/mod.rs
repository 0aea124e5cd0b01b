//
// src/gateway/mod.rs
//
mod gateway;
mod query;

pub use gateway::{Gateway, GatewayError, API_KEY_PARAM};
pub use query::QueryMap;

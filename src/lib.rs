// src/lib.rs
pub mod config;
pub mod gateway;
pub mod server;

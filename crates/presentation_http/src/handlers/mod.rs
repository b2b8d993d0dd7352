//! HTTP request handlers

pub mod health;
pub mod query;
pub mod stations;

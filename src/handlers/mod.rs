//! HTTP handlers for resource CRUD and the watchlist.

pub mod entity;
pub mod watchlist;

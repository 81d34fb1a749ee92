//! Transit routing server.
//!
//! Loads a station network with time-dependent travel times and answers
//! "what is the fastest way from here to there at this time?", by Dijkstra
//! or by A*, and compares how much work each algorithm did.

pub mod config;
pub mod dataset;
pub mod domain;
pub mod graph;
pub mod routing;
pub mod store;
pub mod web;

//! Core library for the modsync command line application.
//!
//! The library reconciles a local directory of Minecraft mod archives with a
//! directory on a remote host. Each archive's identity is read from its
//! embedded metadata in [`metadata`], or guessed from its filename in
//! [`heuristic`] when that fails. [`inventory`] scans a source into archive
//! records, [`reconcile`] pairs the two inventories, and [`report`] renders the
//! outcome. Source adapters live under [`io`] and the end-to-end orchestration
//! in [`sync`].

pub mod config;
pub mod error;
pub mod heuristic;
pub mod inventory;
pub mod io;
pub mod metadata;
pub mod model;
pub mod reconcile;
pub mod report;
pub mod sync;

pub use error::{Result, ToolError};

//! Directory tree and source-content collector.
//!
//! Walks a folder, draws it as an ASCII tree and pulls in top-level Python
//! classes, Dockerfiles and TOML files on request. Scans run on a background
//! thread and their results are cached per folder and settings.

pub mod app;

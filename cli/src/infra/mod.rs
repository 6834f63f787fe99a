//! Infrastructure layer — concrete implementations of application port traits.
//!
//! This module contains all I/O-performing code: process-table and platform
//! queries, filesystem stores, terminal prompting, and task-engine processes.
//!
//! Imports from `crate::domain` and `crate::application::ports` are allowed.
//! Imports from `crate::commands` or `crate::output` are forbidden.

pub mod config;
pub mod credentials;
pub mod env;
pub mod fs;
pub mod host_facts;
pub mod process_table;
pub mod prompt;
pub mod recipe_source;
pub mod task_engine;

//! Application services — use-case orchestration.
//!
//! Each service module implements a single use-case by composing domain logic
//! with port trait calls. Services import only from `crate::domain` and
//! `crate::application::ports` — never from `crate::infra`, `crate::commands`,
//! or `crate::output`.

pub mod config_service;
pub mod discovery;
pub mod execute;
pub mod install;
pub mod profile_service;
pub mod recipe_repository;
pub mod resolve;

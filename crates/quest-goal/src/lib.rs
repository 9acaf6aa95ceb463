//! # quest-goal
//!
//! Goal tracking and persistence for Eternal Quest.
//!
//! A [`Goal`] is a trackable objective with a point value. Recording an
//! event against a goal earns points according to its variant, and the
//! [`GoalStore`] accumulates those points into a score that never resets.
//!
//! ## Key components
//!
//! - [`Goal`] / [`GoalKind`] — Simple (one-shot), Eternal (never completes),
//!   and Checklist (completes after N events, with a bonus)
//! - [`GoalStore`] — ordered goal collection plus cumulative score
//! - [`codec`] — line-oriented text encoding (`save` / `load`)
//! - [`GoalFile`] — file-backed persistence with replace-on-success saves
//! - [`QuestConfig`] — `.quest/config.toml` project settings

pub mod codec;
pub mod config;
pub mod error;
pub mod file;
pub mod goal;
pub mod store;

pub use codec::{load, save};
pub use config::QuestConfig;
pub use error::GoalError;
pub use file::GoalFile;
pub use goal::{Goal, GoalId, GoalKind};
pub use store::{GoalListing, GoalStore, GoalVariant};

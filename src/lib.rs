//! # Millionaire Game Library
//!
//! This library provides the core game logic for a single-player
//! "Who Wants to Be a Millionaire" style quiz. It covers the timed
//! game state machine, the question databases with random and
//! id-based selection, the money ladder with its fallback
//! checkpoints, the 50:50 joker, and English/German language packs.
//!
//! The embedder supplies the presentation: implement
//! [`view::Presentation`] (and optionally [`sound::Sound`]), hand both
//! to a [`controller::GameController`], and either drive
//! [`tick`](controller::GameController::tick) from your own loop or
//! hand the controller to a [`scheduler::Ticker`]. User input flows
//! back through the [`scheduler::CommandSender`] returned at
//! construction.

#![cfg_attr(all(coverage_nightly, test), feature(coverage_attribute))]
#![deny(missing_docs)]
#![deny(rustdoc::missing_crate_level_docs)]
#![warn(clippy::pedantic)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::doc_markdown)]

pub mod constants;

pub mod controller;
pub mod game;
pub mod language;
pub mod question;
pub mod scheduler;
pub mod sound;
pub mod store;
pub mod view;

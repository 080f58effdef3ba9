//! Baldur's Gate 3 mod installer for Linux (Steam/Proton).
//!
//! Installs `.zip` and `.pak` mod packages into the game's Mods directory
//! and keeps the two `modsettings.lsx` load-order registries in step.
//!
//! - **[`paths`]** locate the install directory and both registries
//! - **[`registry`]** read, edit and atomically write `modsettings.lsx`
//! - **[`package`]** extract payloads and the `info.json` manifest
//! - **[`manager`]** compose the above into install, remove and list
//! - **[`commands`]** subcommands and the interactive menu
#![deny(clippy::or_fun_call)]
#![deny(clippy::bool_to_int_with_if)]

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod files;
pub mod logging;
pub mod manager;
pub mod manifest;
pub mod package;
pub mod paths;
pub mod registry;

#[cfg(test)]
mod test_support;

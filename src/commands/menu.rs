//! Interactive menu: install or remove mods until the user exits.
use anyhow::{Context as _, Result};
use std::path::PathBuf;
use std::sync::Arc;

use crate::cli::GlobalOpts;
use crate::logging::{Log, Logger};
use crate::manager::ModManager;

/// Main menu entries, numbered from 1.
const MENU_OPTIONS: [&str; 3] = ["Install mod", "Remove mod", "Exit"];

/// Line-oriented user interaction used by the menu.
#[cfg_attr(test, mockall::automock)]
pub trait Prompt {
    /// Ask for one line of input.  `None` means the user cancelled.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal cannot be read.
    fn read_line(&self, message: &str) -> Result<Option<String>>;

    /// Show one line of output.
    fn show(&self, line: &str);
}

/// [`Prompt`] backed by `inquire` on the controlling terminal.
#[derive(Debug, Default, Clone, Copy)]
pub struct InquirePrompt;

impl Prompt for InquirePrompt {
    fn read_line(&self, message: &str) -> Result<Option<String>> {
        match inquire::Text::new(message).prompt_skippable() {
            Ok(answer) => Ok(answer),
            Err(inquire::InquireError::OperationInterrupted) => Ok(None),
            Err(e) => Err(e).context("reading menu input"),
        }
    }

    #[allow(clippy::print_stdout)]
    fn show(&self, line: &str) {
        println!("{line}");
    }
}

/// Run the interactive menu on the terminal.
///
/// # Errors
///
/// Returns an error if setup fails or the terminal cannot be read.  Install
/// and remove failures are reported and the menu continues.
pub fn run(global: &GlobalOpts, log: &Arc<Logger>) -> Result<()> {
    let manager = super::open_manager(global, log)?;
    run_menu(&manager, &InquirePrompt, &**log)
}

/// Menu loop over an arbitrary [`Prompt`].
///
/// Exits on the Exit choice or when the main prompt is cancelled.
///
/// # Errors
///
/// Returns an error only if the prompt itself fails.
pub fn run_menu(manager: &ModManager, prompt: &dyn Prompt, log: &dyn Log) -> Result<()> {
    loop {
        prompt.show("");
        for (i, option) in MENU_OPTIONS.iter().enumerate() {
            prompt.show(&format!("{}. {option}", i + 1));
        }
        let Some(input) = prompt.read_line(&format!("Choice [1-{}]:", MENU_OPTIONS.len()))?
        else {
            return Ok(());
        };

        match parse_choice(&input, MENU_OPTIONS.len()) {
            Some(1) => install_choice(manager, prompt, log)?,
            Some(2) => remove_choice(manager, prompt, log)?,
            Some(_) => return Ok(()),
            None => prompt.show(&format!(
                "Invalid choice '{}'. Enter a number from 1 to {}.",
                input.trim(),
                MENU_OPTIONS.len()
            )),
        }
    }
}

fn install_choice(manager: &ModManager, prompt: &dyn Prompt, log: &dyn Log) -> Result<()> {
    let Some(input) = prompt.read_line("Path to .zip or .pak file:")? else {
        return Ok(());
    };
    let path = clean_path(&input);
    if path.as_os_str().is_empty() {
        prompt.show("No path given.");
        return Ok(());
    }

    match manager.install(&path) {
        Ok(report) => prompt.show(&super::install::summary(&report)),
        Err(e) => log.error(&format!("Install failed: {e:#}")),
    }
    Ok(())
}

fn remove_choice(manager: &ModManager, prompt: &dyn Prompt, log: &dyn Log) -> Result<()> {
    let records = match manager.list() {
        Ok(records) => records,
        Err(e) => {
            log.error(&format!("Cannot read installed mods: {e:#}"));
            return Ok(());
        }
    };
    if records.is_empty() {
        prompt.show("No mods installed.");
        return Ok(());
    }

    for line in super::numbered_lines(&records) {
        prompt.show(&line);
    }
    let number = loop {
        let Some(input) = prompt.read_line("Number to remove (0 to cancel):")? else {
            return Ok(());
        };
        match input.trim().parse::<usize>() {
            Ok(number) => break number,
            Err(_) => prompt.show(&format!(
                "Invalid number '{}'. Enter a number from the list, or 0 to cancel.",
                input.trim()
            )),
        }
    };
    if number == 0 {
        return Ok(());
    }

    match manager.remove(number - 1) {
        Ok(removed) => prompt.show(&format!("Removed {removed}")),
        Err(e) => log.error(&format!("Remove failed: {e:#}")),
    }
    Ok(())
}

/// Parse a 1-based menu choice, rejecting anything outside `1..=count`.
fn parse_choice(input: &str, count: usize) -> Option<usize> {
    input
        .trim()
        .parse::<usize>()
        .ok()
        .filter(|n| (1..=count).contains(n))
}

/// Strip surrounding whitespace and quotes, as left by terminal drag-and-drop.
fn clean_path(input: &str) -> PathBuf {
    PathBuf::from(input.trim().trim_matches(['"', '\'']).trim())
}

//! Command: print version information.

/// Version string embedded at build time, or the crate version.
#[must_use]
pub fn version() -> &'static str {
    option_env!("BG3_MODS_VERSION").unwrap_or(env!("CARGO_PKG_VERSION"))
}

/// Print the version to stdout.
#[allow(clippy::print_stdout)]
pub fn run() {
    println!("bg3-mods {}", version());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_is_not_empty() {
        assert!(!version().is_empty());
    }
}

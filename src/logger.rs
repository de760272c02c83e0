//! Terminal logging with colored module prefixes.
//!
//! ```ignore
//! log!("serve"; "listening on {addr}");
//! ```

use colored::{ColoredString, Colorize};

/// Log a message with a colored module prefix.
///
/// # Usage
/// ```ignore
/// log!("module"; "message with {} formatting", args);
/// ```
#[macro_export]
macro_rules! log {
    ($module:expr; $($arg:tt)*) => {{
        $crate::logger::log($module, &format!($($arg)*))
    }};
}

/// Log a message with a `[module]` prefix.
pub fn log(module: &str, message: &str) {
    println!("{} {message}", colorize_prefix(module));
}

/// Apply color to a module prefix based on module type.
fn colorize_prefix(module: &str) -> ColoredString {
    let prefix = format!("[{module}]");
    match module.to_ascii_lowercase().as_str() {
        "serve" => prefix.bright_blue().bold(),
        "build" => prefix.bright_green().bold(),
        "error" => prefix.bright_red().bold(),
        _ => prefix.bright_yellow().bold(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefix_wraps_module_in_brackets() {
        let prefix = colorize_prefix("serve").to_string();
        assert!(prefix.contains("[serve]"));
    }

    #[test]
    fn test_unknown_module_still_renders() {
        let prefix = colorize_prefix("syndicate").to_string();
        assert!(prefix.contains("[syndicate]"));
    }
}

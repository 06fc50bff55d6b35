//! UI helper functions for terminal output formatting.

use std::io::Write;

pub fn write_error(err: &mut dyn Write, msg: &str) -> std::io::Result<()> {
    writeln!(err, "Error: {}", msg)
}

/// Display a warning message to stderr with "WARNING:" prefix
pub fn display_warning(err: &mut dyn Write, message: &str) -> std::io::Result<()> {
    writeln!(err, "WARNING: {}", message)
}

/// Title underlined to its own width.
pub fn write_heading(out: &mut dyn Write, title: &str) -> std::io::Result<()> {
    writeln!(out, "{}", title)?;
    writeln!(out, "{}", "=".repeat(title.chars().count()))
}

/// Line printed between games when several run back to back.
pub fn write_separator(out: &mut dyn Write) -> std::io::Result<()> {
    writeln!(out, "\n{}\n", "=".repeat(60))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn heading_is_underlined_to_width() {
        let mut out = Vec::new();
        write_heading(&mut out, "Ride the Bus").unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "Ride the Bus\n============\n");
    }
}

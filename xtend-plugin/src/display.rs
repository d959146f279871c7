use std::io::{self, Write};

use colored::Colorize;

use crate::PluginInfo;

/// Write the plugin banner followed by one line per plugin.
///
/// ```text
/// > Plugins
///   - static (0.2.0) Serves a directory of static files
/// ```
///
/// Writes nothing for an empty slice.
pub fn write_plugins<W: Write>(out: &mut W, plugins: &[PluginInfo]) -> io::Result<()> {
    if plugins.is_empty() {
        return Ok(());
    }

    writeln!(out, "{}", "> Plugins".bold().green())?;
    for plugin in plugins {
        writeln!(
            out,
            "  - {} ({}) {}",
            plugin.name, plugin.version, plugin.description
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(plugins: &[PluginInfo]) -> String {
        let mut buf = Vec::new();
        write_plugins(&mut buf, plugins).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_empty_writes_nothing() {
        assert_eq!(render(&[]), "");
    }

    #[test]
    fn test_one_line_per_plugin() {
        let out = render(&[
            PluginInfo::new("static", "0.2.0", "Serves static files"),
            PluginInfo::new("timeouts", "latest", "Query timeouts"),
        ]);
        let lines: Vec<_> = out.lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(lines[0].contains("> Plugins"));
        assert_eq!(lines[1], "  - static (0.2.0) Serves static files");
        assert_eq!(lines[2], "  - timeouts (latest) Query timeouts");
    }
}

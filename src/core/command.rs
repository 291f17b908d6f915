//! Command parser for the : command system

use super::view::Tab;

/// Parsed command from user input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    // Navigation
    Tab(String),

    // Filters
    Class(String),
    Range(String),

    // Reports
    Export(String),

    Help,
    Quit,

    // Unknown command
    Unknown(String),
}

/// Parse a command string (without the leading :)
pub fn parse_command(input: &str) -> Command {
    let input = input.trim();
    let mut parts = input.splitn(2, ' ');
    let cmd = parts.next().unwrap_or("");
    let args = parts
        .next()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty());

    match cmd.to_lowercase().as_str() {
        "tab" | "t" => match args {
            Some(tab) => Command::Tab(tab),
            None => Command::Unknown(input.to_string()),
        },
        "class" | "cls" => match args {
            Some(class) => Command::Class(class),
            None => Command::Unknown(input.to_string()),
        },
        "range" | "date" => match args {
            Some(range) => Command::Range(range),
            None => Command::Unknown(input.to_string()),
        },

        "export" | "exp" => match args {
            Some(kind) => Command::Export(kind),
            None => Command::Unknown(input.to_string()),
        },
        "pdf" | "csv" if args.is_none() => Command::Export(cmd.to_string()),

        "help" | "h" | "?" => Command::Help,
        "quit" | "q" | "exit" => Command::Quit,

        // Bare tab names jump straight to the tab
        name if args.is_none() && name.parse::<Tab>().is_ok() => {
            Command::Tab(cmd.to_string())
        }

        _ => Command::Unknown(input.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_navigation_commands() {
        assert_eq!(
            parse_command("tab attendance"),
            Command::Tab("attendance".to_string())
        );
        assert_eq!(parse_command("grades"), Command::Tab("grades".to_string()));
        assert_eq!(parse_command("  cmp  "), Command::Tab("cmp".to_string()));
    }

    #[test]
    fn test_bare_names_match_tab_aliases() {
        for alias in [
            "performance",
            "perf",
            "attendance",
            "att",
            "comparison",
            "cmp",
            "compare",
            "grades",
            "grade",
        ] {
            assert_eq!(parse_command(alias), Command::Tab(alias.to_string()));
            assert!(alias.parse::<Tab>().is_ok());
        }
        assert_eq!(
            parse_command("compare now"),
            Command::Unknown("compare now".to_string())
        );
    }

    #[test]
    fn test_parse_filter_commands() {
        assert_eq!(
            parse_command("class Class B"),
            Command::Class("Class B".to_string())
        );
        assert_eq!(
            parse_command("range last 3 months"),
            Command::Range("last 3 months".to_string())
        );
        assert_eq!(parse_command("date 1m"), Command::Range("1m".to_string()));
    }

    #[test]
    fn test_parse_export_commands() {
        assert_eq!(parse_command("export pdf"), Command::Export("pdf".to_string()));
        assert_eq!(parse_command("csv"), Command::Export("csv".to_string()));
        assert_eq!(parse_command("exp XML"), Command::Export("XML".to_string()));
    }

    #[test]
    fn test_parse_missing_arguments() {
        assert_eq!(parse_command("tab"), Command::Unknown("tab".to_string()));
        assert_eq!(parse_command("class "), Command::Unknown("class".to_string()));
        assert_eq!(parse_command("export"), Command::Unknown("export".to_string()));
    }

    #[test]
    fn test_parse_unknown() {
        assert_eq!(parse_command("q"), Command::Quit);
        assert_eq!(parse_command("help"), Command::Help);
        assert_eq!(
            parse_command("notacommand"),
            Command::Unknown("notacommand".to_string())
        );
    }
}

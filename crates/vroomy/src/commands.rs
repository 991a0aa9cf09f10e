//! Parsing of what the user types on the chat screen.

/// A line typed on the chat screen.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ChatCommand {
    /// Go back to the landing page.
    Back,
    /// Exit the program.
    Quit,
    /// List the canned suggestions.
    Suggest,
    /// Load the suggestion with the given 1-based index into the pending
    /// input.
    Use(usize),
    /// Submit the pending input.
    SubmitPending,
    /// Submit the given text.
    Submit(String),
    /// A slash command that is not recognized, or has a bad argument.
    Unknown(String),
}

impl ChatCommand {
    /// Parses a line read from the terminal, trailing newline included.
    pub fn parse(line: &str) -> Self {
        let line = line.trim_end_matches(['\r', '\n']);
        if line.trim().is_empty() {
            return Self::SubmitPending;
        }

        let Some(command) = line.trim().strip_prefix('/') else {
            return Self::Submit(line.to_owned());
        };
        let mut parts = command.split_whitespace();
        match (parts.next(), parts.next(), parts.next()) {
            (Some("back"), None, _) => Self::Back,
            (Some("quit"), None, _) => Self::Quit,
            (Some("suggest"), None, _) => Self::Suggest,
            (Some("use"), Some(index), None) => match index.parse() {
                Ok(index) if index > 0 => Self::Use(index),
                _ => Self::Unknown(line.trim().to_owned()),
            },
            _ => Self::Unknown(line.trim().to_owned()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text() {
        assert_eq!(
            ChatCommand::parse("Golf 2020, 13427 miles\n"),
            ChatCommand::Submit("Golf 2020, 13427 miles".to_owned())
        );
    }

    #[test]
    fn test_empty_line() {
        assert_eq!(ChatCommand::parse("\n"), ChatCommand::SubmitPending);
        assert_eq!(ChatCommand::parse("   \r\n"), ChatCommand::SubmitPending);
    }

    #[test]
    fn test_slash_commands() {
        assert_eq!(ChatCommand::parse("/back\n"), ChatCommand::Back);
        assert_eq!(ChatCommand::parse(" /quit "), ChatCommand::Quit);
        assert_eq!(ChatCommand::parse("/suggest"), ChatCommand::Suggest);
        assert_eq!(ChatCommand::parse("/use 2\n"), ChatCommand::Use(2));
    }

    #[test]
    fn test_bad_commands() {
        for line in ["/use", "/use 0", "/use two", "/use 1 2", "/back now", "/"]
        {
            assert_eq!(
                ChatCommand::parse(line),
                ChatCommand::Unknown(line.to_owned()),
                "{line}"
            );
        }
    }
}

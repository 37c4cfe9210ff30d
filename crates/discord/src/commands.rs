//! Prefix command parsing.

/// A parsed inbound command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `rant [today]`. The `today` argument selects the date-indexed
    /// entry, anything else (or nothing) a random one.
    Rant { today: bool },
    /// `grant`: authorize the invoking channel for scheduled broadcasts.
    Grant,
    /// `grant list`: list the granted channels of the invoking guild.
    GrantList,
    /// `deny`: withdraw the invoking channel.
    Deny,
    /// `settime <expr>`: replace the broadcast schedule.
    SetTime { expr: String },
    /// `ping`: latency report.
    Ping,
    /// Anything unrecognized (or empty) after the prefix.
    Help,
}

/// Parse a raw message against the command prefix.
///
/// Returns `None` when the message does not address the bot at all. The
/// command word is case-insensitive; arguments keep their case and are
/// re-joined with single spaces.
#[must_use]
pub fn parse(prefix: &str, content: &str) -> Option<Command> {
    let rest = content.strip_prefix(prefix)?;
    let mut words = rest.split_whitespace();
    let word = words.next().unwrap_or_default().to_lowercase();

    Some(match word.as_str() {
        "rant" => Command::Rant {
            today: words.next().is_some_and(|w| w.eq_ignore_ascii_case("today")),
        },
        "grant" => match words.next() {
            Some(w) if w.eq_ignore_ascii_case("list") => Command::GrantList,
            _ => Command::Grant,
        },
        "deny" => Command::Deny,
        "settime" => Command::SetTime {
            expr: words.collect::<Vec<_>>().join(" "),
        },
        "ping" => Command::Ping,
        _ => Command::Help,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ignores_unprefixed_messages() {
        assert_eq!(parse("?", "hello there"), None);
        assert_eq!(parse("?", "rant"), None);
    }

    #[test]
    fn parses_rant_variants() {
        assert_eq!(parse("?", "?rant"), Some(Command::Rant { today: false }));
        assert_eq!(parse("?", "?rant today"), Some(Command::Rant { today: true }));
        assert_eq!(parse("?", "?rant TODAY"), Some(Command::Rant { today: true }));
        // Any other argument falls back to a random pick.
        assert_eq!(
            parse("?", "?rant yesterday"),
            Some(Command::Rant { today: false })
        );
    }

    #[test]
    fn command_word_is_case_insensitive() {
        assert_eq!(parse("?", "?RANT"), Some(Command::Rant { today: false }));
        assert_eq!(parse("?", "?Grant"), Some(Command::Grant));
        assert_eq!(parse("?", "?PING"), Some(Command::Ping));
    }

    #[test]
    fn parses_grant_and_grant_list() {
        assert_eq!(parse("?", "?grant"), Some(Command::Grant));
        assert_eq!(parse("?", "?grant list"), Some(Command::GrantList));
        assert_eq!(parse("?", "?grant LIST"), Some(Command::GrantList));
        // Unknown grant argument behaves like a bare grant.
        assert_eq!(parse("?", "?grant here"), Some(Command::Grant));
    }

    #[test]
    fn parses_deny_and_ping() {
        assert_eq!(parse("?", "?deny"), Some(Command::Deny));
        assert_eq!(parse("?", "?ping"), Some(Command::Ping));
    }

    #[test]
    fn settime_joins_remaining_args() {
        assert_eq!(
            parse("?", "?settime 0 30 18 * * *"),
            Some(Command::SetTime {
                expr: "0 30 18 * * *".into()
            })
        );
    }

    #[test]
    fn settime_collapses_extra_whitespace() {
        assert_eq!(
            parse("?", "?settime  0  30 18 * * *"),
            Some(Command::SetTime {
                expr: "0 30 18 * * *".into()
            })
        );
    }

    #[test]
    fn settime_without_args_yields_empty_expr() {
        assert_eq!(parse("?", "?settime"), Some(Command::SetTime { expr: String::new() }));
    }

    #[test]
    fn unknown_and_empty_fall_to_help() {
        assert_eq!(parse("?", "?"), Some(Command::Help));
        assert_eq!(parse("?", "?bogus"), Some(Command::Help));
        assert_eq!(parse("?", "?help"), Some(Command::Help));
    }

    #[test]
    fn multi_char_prefix() {
        assert_eq!(parse("r!", "r!rant"), Some(Command::Rant { today: false }));
        assert_eq!(parse("r!", "rant"), None);
    }
}

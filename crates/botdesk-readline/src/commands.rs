use anyhow::{Result, anyhow, bail};
use botdesk_core::config::LayoutMode;
use botdesk_core::report::ParameterAdjustment;

/// Slash commands offered by completion and hints.
pub const COMMANDS: &[&str] = &[
    "/assistants",
    "/select",
    "/menu",
    "/report",
    "/save",
    "/discard",
    "/param",
    "/apply",
    "/layout",
    "/expand",
    "/minimize",
    "/help",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamAction {
    Adjust(ParameterAdjustment),
    Reset,
}

/// One line of REPL input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Assistants,
    Select(String),
    Menu,
    Report,
    Save(Option<String>),
    Discard,
    /// `index` is zero-based.
    Param { index: usize, action: ParamAction },
    Apply,
    Layout(LayoutMode),
    Expand,
    Minimize,
    Help,
    Quit,
    Submit(String),
}

/// Parses a trimmed, non-empty input line.
pub fn parse_line(line: &str) -> Result<Command> {
    if line == "quit" || line == "exit" {
        return Ok(Command::Quit);
    }
    if !line.starts_with('/') {
        return Ok(Command::Submit(line.to_string()));
    }

    let (name, rest) = match line.split_once(char::is_whitespace) {
        Some((name, rest)) => (name, rest.trim()),
        None => (line, ""),
    };

    let command = match name {
        "/assistants" => Command::Assistants,
        "/select" if !rest.is_empty() => Command::Select(rest.to_string()),
        "/select" => bail!("usage: /select <id>"),
        "/menu" => Command::Menu,
        "/report" => Command::Report,
        "/save" => Command::Save((!rest.is_empty()).then(|| rest.to_string())),
        "/discard" => Command::Discard,
        "/param" => parse_param(rest)?,
        "/apply" => Command::Apply,
        "/layout" => Command::Layout(
            rest.parse()
                .map_err(|_| anyhow!("usage: /layout <desktop|mobile>"))?,
        ),
        "/expand" => Command::Expand,
        "/minimize" => Command::Minimize,
        "/help" => Command::Help,
        other => bail!("unknown command: {}", other),
    };
    Ok(command)
}

fn parse_param(args: &str) -> Result<Command> {
    const USAGE: &str = "usage: /param <1|2> <+|-|reset>";
    let mut parts = args.split_whitespace();
    let (Some(number), Some(action), None) = (parts.next(), parts.next(), parts.next()) else {
        bail!(USAGE);
    };
    let index = match number.parse::<usize>() {
        Ok(n @ 1..=2) => n - 1,
        _ => bail!(USAGE),
    };
    let action = match action {
        "+" => ParamAction::Adjust(ParameterAdjustment::Increment),
        "-" => ParamAction::Adjust(ParameterAdjustment::Decrement),
        "reset" => ParamAction::Reset,
        _ => bail!(USAGE),
    };
    Ok(Command::Param { index, action })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_is_submitted() {
        assert_eq!(
            parse_line("show me the chart").unwrap(),
            Command::Submit("show me the chart".to_string())
        );
        assert_eq!(parse_line("exit").unwrap(), Command::Quit);
    }

    #[test]
    fn test_select_and_save_arguments() {
        assert_eq!(
            parse_line("/select ivy").unwrap(),
            Command::Select("ivy".to_string())
        );
        assert!(parse_line("/select").is_err());
        assert_eq!(parse_line("/save").unwrap(), Command::Save(None));
        assert_eq!(
            parse_line("/save Top accounts").unwrap(),
            Command::Save(Some("Top accounts".to_string()))
        );
    }

    #[test]
    fn test_param_command() {
        assert_eq!(
            parse_line("/param 2 -").unwrap(),
            Command::Param {
                index: 1,
                action: ParamAction::Adjust(ParameterAdjustment::Decrement)
            }
        );
        assert_eq!(
            parse_line("/param 1 reset").unwrap(),
            Command::Param {
                index: 0,
                action: ParamAction::Reset
            }
        );
        assert!(parse_line("/param 3 +").is_err());
        assert!(parse_line("/param 1").is_err());
        assert!(parse_line("/param 1 + extra").is_err());
    }

    #[test]
    fn test_layout_and_unknown_commands() {
        assert_eq!(
            parse_line("/layout Mobile").unwrap(),
            Command::Layout(LayoutMode::Mobile)
        );
        assert!(parse_line("/layout tablet").is_err());
        assert!(parse_line("/frobnicate").is_err());
    }
}

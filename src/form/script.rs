//! Line-oriented edit scripts.
//!
//! ```text
//! # comments and blank lines are skipped
//! set schemaList[0].config cfg1
//! choose schemaList[0].jobTypes dataGrid
//! add schemaList[0].secondLevel
//! remove schemaList 1
//! submit
//! ```
//!
//! Text arguments run to the end of the line. A JSON string literal may be
//! used instead when the text needs surrounding spaces or escapes.

use thiserror::Error;

use crate::tree::FieldPath;

use super::actions::FormCommand;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("line {line}: {message}")]
pub struct ScriptError {
    pub line: usize,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptLine {
    pub line: usize,
    pub command: FormCommand,
}

pub fn parse_script(source: &str) -> Result<Vec<ScriptLine>, ScriptError> {
    let mut lines = Vec::new();
    for (offset, raw) in source.lines().enumerate() {
        let line = offset + 1;
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let command = parse_line(trimmed).map_err(|message| ScriptError { line, message })?;
        lines.push(ScriptLine { line, command });
    }
    Ok(lines)
}

fn parse_line(line: &str) -> Result<FormCommand, String> {
    let (verb, rest) = split_word(line);
    match verb {
        "set" => {
            let (path, text) = path_argument(rest)?;
            Ok(FormCommand::Set {
                path,
                value: text_argument(text)?,
            })
        }
        "clear" => Ok(FormCommand::Clear {
            path: only_path(rest)?,
        }),
        "choose" => {
            let (path, label) = path_argument(rest)?;
            Ok(FormCommand::Choose {
                path,
                label: text_argument(label)?,
            })
        }
        "touch" => Ok(FormCommand::Touch {
            path: only_path(rest)?,
        }),
        "add" => Ok(FormCommand::Append {
            group: only_path(rest)?,
        }),
        "remove" => {
            let (group, index) = path_argument(rest)?;
            let index = index
                .parse::<usize>()
                .map_err(|_| format!("remove expects an entry index, got '{index}'"))?;
            Ok(FormCommand::Remove { group, index })
        }
        "submit" if rest.is_empty() => Ok(FormCommand::Submit),
        "submit" => Err("submit takes no arguments".to_string()),
        other => Err(format!("unknown command '{other}'")),
    }
}

fn split_word(input: &str) -> (&str, &str) {
    match input.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim_start()),
        None => (input, ""),
    }
}

fn path_argument(input: &str) -> Result<(FieldPath, &str), String> {
    let (raw, rest) = split_word(input);
    let path = FieldPath::parse(raw);
    if path.is_empty() {
        return Err("missing field path".to_string());
    }
    Ok((path, rest))
}

fn only_path(input: &str) -> Result<FieldPath, String> {
    let (path, rest) = path_argument(input)?;
    if !rest.is_empty() {
        return Err(format!("unexpected trailing input '{rest}'"));
    }
    Ok(path)
}

fn text_argument(input: &str) -> Result<String, String> {
    if input.starts_with('"') {
        serde_json::from_str::<String>(input).map_err(|err| format!("invalid quoted text: {err}"))
    } else {
        Ok(input.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_command() {
        let script = r#"
            # seed
            set schemaList[0].config cfg one
            set tableConfig "  padded  "
            clear schemaList[0].jobTypes
            choose schemaList[0].secondLevel[0].type date
            touch tableConfig
            add schemaList[0].secondLevel
            remove schemaList 0
            submit
        "#;
        let lines = parse_script(script).unwrap();
        let commands: Vec<_> = lines.iter().map(|line| line.command.clone()).collect();
        assert_eq!(lines[0].line, 3);
        assert_eq!(
            commands,
            vec![
                FormCommand::Set {
                    path: FieldPath::parse("schemaList[0].config"),
                    value: "cfg one".into(),
                },
                FormCommand::Set {
                    path: FieldPath::parse("tableConfig"),
                    value: "  padded  ".into(),
                },
                FormCommand::Clear {
                    path: FieldPath::parse("schemaList[0].jobTypes"),
                },
                FormCommand::Choose {
                    path: FieldPath::parse("schemaList[0].secondLevel[0].type"),
                    label: "date".into(),
                },
                FormCommand::Touch {
                    path: FieldPath::parse("tableConfig"),
                },
                FormCommand::Append {
                    group: FieldPath::parse("schemaList[0].secondLevel"),
                },
                FormCommand::Remove {
                    group: FieldPath::parse("schemaList"),
                    index: 0,
                },
                FormCommand::Submit,
            ]
        );
    }

    #[test]
    fn empty_text_is_allowed() {
        let lines = parse_script("set tableConfig").unwrap();
        assert_eq!(
            lines[0].command,
            FormCommand::Set {
                path: FieldPath::parse("tableConfig"),
                value: String::new(),
            }
        );
    }

    #[test]
    fn reports_line_numbers() {
        let err = parse_script("set a b\n\nremove schemaList one").unwrap_err();
        assert_eq!(err.line, 3);
        assert!(err.message.contains("index"), "{}", err.message);

        let err = parse_script("explode").unwrap_err();
        assert_eq!(err.to_string(), "line 1: unknown command 'explode'");

        let err = parse_script("add").unwrap_err();
        assert_eq!(err.message, "missing field path");
    }
}

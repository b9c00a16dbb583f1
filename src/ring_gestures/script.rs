//! Plain-text notation for patterns (`triangle:0-2-4`) and for replayable
//! gesture scripts, one step per line:
//!
//! ```text
//! # register an extra pattern, draw it and cast it
//! pattern triangle:0-2-4
//! down 0
//! enter 2
//! enter 4
//! up
//! cast
//! ```

use crate::ring_gestures::engine::{NodeEvent, NodeIndex};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptStep {
    Node(NodeEvent),
    /// `pattern name:0-2-4`; registered before any input is replayed.
    Pattern {
        name: Option<String>,
        pattern: Vec<NodeIndex>,
    },
    Cast,
    Clear,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseErrorKind {
    EmptyInput,
    EmptyName,
    EmptyIndex { position: usize },
    InvalidIndex { position: usize, value: String },
    UnknownCommand { command: String },
    MissingNode { command: String },
    UnexpectedArgument { command: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    /// 1-based script line; `0` for single-line pattern notation.
    pub line: usize,
    pub kind: ParseErrorKind,
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.line > 0 {
            write!(f, "line {}: {:?}", self.line, self.kind)
        } else {
            write!(f, "{:?}", self.kind)
        }
    }
}

impl std::error::Error for ParseError {}

/// Parses `name:0-2-4` (or a bare `0-2-4`) into its name and node indices.
pub fn parse_pattern(input: &str) -> Result<(Option<String>, Vec<NodeIndex>), ParseError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(pattern_error(ParseErrorKind::EmptyInput));
    }

    let (name, indices) = match trimmed.split_once(':') {
        Some((prefix, rest)) => {
            let name = prefix.trim();
            if name.is_empty() {
                return Err(pattern_error(ParseErrorKind::EmptyName));
            }
            (Some(name.to_string()), rest)
        }
        None => (None, trimmed),
    };

    let mut pattern = Vec::new();
    for (position, part) in indices.split('-').enumerate() {
        let part = part.trim();
        if part.is_empty() {
            return Err(pattern_error(ParseErrorKind::EmptyIndex { position }));
        }
        let index = part.parse::<NodeIndex>().map_err(|_| {
            pattern_error(ParseErrorKind::InvalidIndex {
                position,
                value: part.to_string(),
            })
        })?;
        pattern.push(index);
    }
    Ok((name, pattern))
}

pub fn serialize_pattern(name: Option<&str>, pattern: &[NodeIndex]) -> String {
    let indices = pattern
        .iter()
        .map(|idx| idx.to_string())
        .collect::<Vec<_>>()
        .join("-");
    match name {
        Some(name) => format!("{name}:{indices}"),
        None => indices,
    }
}

pub fn parse_script(input: &str) -> Result<Vec<ScriptStep>, ParseError> {
    let mut steps = Vec::new();
    for (idx, raw) in input.lines().enumerate() {
        let line = idx + 1;
        let content = raw.split('#').next().unwrap_or_default().trim();
        if content.is_empty() {
            continue;
        }
        let mut words = content.split_whitespace();
        let command = words.next().unwrap_or_default().to_lowercase();
        let argument = words.next();
        if words.next().is_some() {
            return Err(ParseError {
                line,
                kind: ParseErrorKind::UnexpectedArgument { command },
            });
        }
        let step = match command.as_str() {
            "down" => ScriptStep::Node(NodeEvent::PointerDown(node_arg(line, &command, argument)?)),
            "enter" => ScriptStep::Node(NodeEvent::HoverEnter(node_arg(line, &command, argument)?)),
            "exit" => ScriptStep::Node(NodeEvent::HoverExit(node_arg(line, &command, argument)?)),
            "pattern" => {
                let notation = argument.ok_or_else(|| ParseError {
                    line,
                    kind: ParseErrorKind::MissingNode {
                        command: command.clone(),
                    },
                })?;
                let (name, pattern) =
                    parse_pattern(notation).map_err(|err| ParseError { line, ..err })?;
                ScriptStep::Pattern { name, pattern }
            }
            "up" | "cast" | "clear" if argument.is_some() => {
                return Err(ParseError {
                    line,
                    kind: ParseErrorKind::UnexpectedArgument { command },
                });
            }
            "up" => ScriptStep::Node(NodeEvent::PointerUp),
            "cast" => ScriptStep::Cast,
            "clear" => ScriptStep::Clear,
            _ => {
                return Err(ParseError {
                    line,
                    kind: ParseErrorKind::UnknownCommand { command },
                })
            }
        };
        steps.push(step);
    }
    Ok(steps)
}

fn node_arg(line: usize, command: &str, argument: Option<&str>) -> Result<NodeIndex, ParseError> {
    let value = argument.ok_or_else(|| ParseError {
        line,
        kind: ParseErrorKind::MissingNode {
            command: command.to_string(),
        },
    })?;
    value.parse::<NodeIndex>().map_err(|_| ParseError {
        line,
        kind: ParseErrorKind::InvalidIndex {
            position: 0,
            value: value.to_string(),
        },
    })
}

fn pattern_error(kind: ParseErrorKind) -> ParseError {
    ParseError { line: 0, kind }
}

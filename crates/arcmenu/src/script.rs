//! Plain-text gesture scripts, one event per line:
//!
//! ```text
//! # open near the left edge and pick the second button
//! begin 50 60
//! move 132.5 116.5
//! end
//! ```
//!
//! Commands are `begin x y`, `move x y`, `tap x y`, `end` and `cancel`.
//! `press x y ms` is a press held for `ms` milliseconds; it opens a
//! long-press or tap menu depending on the hold time. Blank lines and `#`
//! comments are skipped.

use crate::events::GestureEvent;
use crate::geometry::Point;
use std::num::ParseFloatError;
use std::time::{Duration, TryFromFloatSecsError};
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ScriptError {
    #[error("line {line}: unknown command '{command}'")]
    UnknownCommand { line: usize, command: String },
    #[error("line {line}: '{command}' takes {expected} argument(s), got {got}")]
    Arity {
        line: usize,
        command: String,
        expected: usize,
        got: usize,
    },
    #[error("line {line}: invalid number '{value}': {source}")]
    Number {
        line: usize,
        value: String,
        source: ParseFloatError,
    },
    #[error("line {line}: invalid hold time '{value}': {source}")]
    HoldTime {
        line: usize,
        value: String,
        source: TryFromFloatSecsError,
    },
}

pub fn parse_script(script: &str) -> Result<Vec<GestureEvent>, ScriptError> {
    script
        .lines()
        .enumerate()
        .filter_map(|(idx, raw)| {
            let line = raw.split('#').next().unwrap_or_default().trim();
            (!line.is_empty()).then(|| parse_line(idx + 1, line))
        })
        .collect()
}

fn parse_line(line: usize, text: &str) -> Result<GestureEvent, ScriptError> {
    let mut words = text.split_whitespace();
    let command = words.next().unwrap_or_default().to_ascii_lowercase();
    let args: Vec<&str> = words.collect();

    let arity = |expected: usize| {
        if args.len() == expected {
            Ok(())
        } else {
            Err(ScriptError::Arity {
                line,
                command: command.clone(),
                expected,
                got: args.len(),
            })
        }
    };

    let event = match command.as_str() {
        "begin" | "move" | "tap" => {
            arity(2)?;
            let point = Point::new(number(line, args[0])?, number(line, args[1])?);
            match command.as_str() {
                "begin" => GestureEvent::Began(point),
                "move" => GestureEvent::Changed(point),
                _ => GestureEvent::Tapped(point),
            }
        }
        "press" => {
            arity(3)?;
            let at = Point::new(number(line, args[0])?, number(line, args[1])?);
            let held = Duration::try_from_secs_f64(number(line, args[2])? / 1000.0).map_err(
                |source| ScriptError::HoldTime {
                    line,
                    value: args[2].to_string(),
                    source,
                },
            )?;
            GestureEvent::Pressed { at, held }
        }
        "end" => {
            arity(0)?;
            GestureEvent::Ended
        }
        "cancel" => {
            arity(0)?;
            GestureEvent::Cancelled
        }
        _ => {
            return Err(ScriptError::UnknownCommand {
                line,
                command: command.clone(),
            });
        }
    };

    Ok(event)
}

fn number(line: usize, value: &str) -> Result<f64, ScriptError> {
    value.parse().map_err(|source| ScriptError::Number {
        line,
        value: value.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_script() {
        let script = "
            # long press on the left
            begin 50 60
            move 150 60   # first button
            MOVE 132.5 116.5

            end
            tap 1 2
            cancel
        ";

        assert_eq!(
            parse_script(script).unwrap(),
            vec![
                GestureEvent::Began(Point::new(50.0, 60.0)),
                GestureEvent::Changed(Point::new(150.0, 60.0)),
                GestureEvent::Changed(Point::new(132.5, 116.5)),
                GestureEvent::Ended,
                GestureEvent::Tapped(Point::new(1.0, 2.0)),
                GestureEvent::Cancelled,
            ]
        );
    }

    #[test]
    fn test_press_carries_hold_time() {
        assert_eq!(
            parse_script("press 600 400 250\nPress 10 20 1500").unwrap(),
            vec![
                GestureEvent::Pressed {
                    at: Point::new(600.0, 400.0),
                    held: Duration::from_millis(250),
                },
                GestureEvent::Pressed {
                    at: Point::new(10.0, 20.0),
                    held: Duration::from_millis(1500),
                },
            ]
        );
        assert!(matches!(
            parse_script("press 1 2"),
            Err(ScriptError::Arity { expected: 3, got: 2, .. })
        ));
        assert!(matches!(
            parse_script("press 1 2 -5"),
            Err(ScriptError::HoldTime { line: 1, .. })
        ));
    }

    #[test]
    fn test_empty_script() {
        assert_eq!(parse_script("\n# nothing\n").unwrap(), Vec::new());
    }

    #[test]
    fn test_errors_carry_line_numbers() {
        assert_eq!(
            parse_script("begin 1 2\nhover 3 4"),
            Err(ScriptError::UnknownCommand {
                line: 2,
                command: "hover".to_string()
            })
        );
        assert_eq!(
            parse_script("end now"),
            Err(ScriptError::Arity {
                line: 1,
                command: "end".to_string(),
                expected: 0,
                got: 1
            })
        );
        assert!(matches!(
            parse_script("begin 1\n"),
            Err(ScriptError::Arity { expected: 2, got: 1, .. })
        ));
        assert!(matches!(
            parse_script("\n\nmove x 4"),
            Err(ScriptError::Number { line: 3, .. })
        ));
    }
}

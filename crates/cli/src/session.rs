//! Line-by-line driver: feeds input lines to the agent and prints results.

use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::{json, Value};
use toybot::{execute_line, Agent, LineOutcome, Orientation, Pose};

const PROMPT: &str = "Command: ";
const MALFORMED: &str = "ERROR: invalid/malformed command.";

/// Input source flavour.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    /// Command file: every line runs, `#` comments and blank lines skipped.
    File,
    /// Prompted input; `EXIT`/`exit` or EOF ends the session.
    Interactive,
}

/// One executed (non-skipped) line, as recorded in the transcript.
#[derive(Clone, Debug, Serialize)]
pub struct Entry {
    pub line: String,
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub report: Option<Value>,
}

/// Run all lines from `input`, writing user-facing output to `out`.
pub fn run<R: BufRead, W: Write>(
    agent: &mut Agent<'_>,
    input: R,
    mut out: W,
    mode: Mode,
) -> Result<Vec<Entry>> {
    let mut entries = Vec::new();
    let mut lines = input.split(b'\n');
    loop {
        if mode == Mode::Interactive {
            write!(out, "{PROMPT}")?;
            out.flush()?;
        }
        let Some(raw) = lines.next() else { break };
        let raw = raw.context("reading command line")?;
        let line = match String::from_utf8(raw) {
            Ok(line) => line,
            Err(e) => {
                entries.push(undecodable(e.as_bytes(), &mut out)?);
                continue;
            }
        };
        let line = line.trim_end_matches('\r');
        if mode == Mode::Interactive && matches!(line.trim(), "EXIT" | "exit") {
            break;
        }
        if let Some(entry) = step(agent, line, &mut out)? {
            entries.push(entry);
        }
    }
    tracing::info!(executed = entries.len(), "session finished");
    Ok(entries)
}

fn step<W: Write>(agent: &mut Agent<'_>, line: &str, out: &mut W) -> Result<Option<Entry>> {
    let entry = match execute_line(agent, line) {
        LineOutcome::Skipped => return Ok(None),
        LineOutcome::Malformed(e) => {
            tracing::debug!(line, error = %e, "malformed");
            writeln!(out, "{line} -> {MALFORMED}")?;
            Entry {
                line: line.to_string(),
                status: "malformed",
                error: Some(e.to_string()),
                report: None,
            }
        }
        LineOutcome::Rejected(cmd, e) => {
            tracing::warn!(command = %cmd, reason = %e, "rejected");
            Entry {
                line: line.to_string(),
                status: "rejected",
                error: Some(e.to_string()),
                report: agent.report().map(|p| pose_json(&p)),
            }
        }
        LineOutcome::Done(cmd, pose) => {
            tracing::debug!(command = %cmd, "done");
            writeln!(out, "{line} -> {}", display_report(pose.as_ref()))?;
            Entry {
                line: line.to_string(),
                status: "done",
                error: None,
                report: pose.map(|p| pose_json(&p)),
            }
        }
    };
    Ok(Some(entry))
}

/// A line that is not UTF-8 is reported as malformed; the session goes on.
fn undecodable<W: Write>(raw: &[u8], out: &mut W) -> Result<Entry> {
    let line = String::from_utf8_lossy(raw);
    let line = line.trim_end_matches('\r');
    tracing::debug!(line, "not valid UTF-8");
    writeln!(out, "{line} -> {MALFORMED}")?;
    Ok(Entry {
        line: line.to_string(),
        status: "malformed",
        error: Some("line is not valid UTF-8".to_string()),
        report: None,
    })
}

fn display_report(pose: Option<&Pose>) -> String {
    match pose {
        Some(p) => p.to_string(),
        None => "(none, none, none)".to_string(),
    }
}

fn pose_json(p: &Pose) -> Value {
    let heading = match p.orientation {
        Orientation::Heading(h) => json!(h.name()),
        Orientation::Angle(a) => json!(a),
    };
    json!({ "x": p.x(), "y": p.y(), "heading": heading })
}

#[cfg(test)]
mod tests {
    use super::*;
    use toybot::Surface;

    fn run_bytes(input: &[u8], mode: Mode) -> (String, Vec<Entry>) {
        let table = Surface::new(5.0, 5.0).unwrap();
        let mut agent = Agent::new(Some(&table));
        let mut out = Vec::new();
        let entries = run(&mut agent, input, &mut out, mode).unwrap();
        (String::from_utf8(out).unwrap(), entries)
    }

    fn run_str(input: &str, mode: Mode) -> (String, Vec<Entry>) {
        run_bytes(input.as_bytes(), mode)
    }

    #[test]
    fn invalid_utf8_line_is_malformed_and_session_continues() {
        let input = b"PLACE 0,0,NORTH\n\xff\xfe MOVE\r\nMOVE\n";
        let (out, entries) = run_bytes(input, Mode::File);
        let lines: Vec<_> = out.lines().collect();
        assert_eq!(
            lines,
            [
                "PLACE 0,0,NORTH -> (0, 0, NORTH)",
                "\u{FFFD}\u{FFFD} MOVE -> ERROR: invalid/malformed command.",
                "MOVE -> (0, 1, NORTH)",
            ]
        );
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[1].status, "malformed");
        assert_eq!(entries[1].error.as_deref(), Some("line is not valid UTF-8"));
    }

    #[test]
    fn file_mode_prints_successes_and_errors() {
        let input = "# sample\nPLACE 1,2,EAST\nMOVE\nMOVE\nLEFT\nMOVE\n\nJUMP 3\nREPORT\n";
        let (out, entries) = run_str(input, Mode::File);
        let lines: Vec<_> = out.lines().collect();
        assert_eq!(
            lines,
            [
                "PLACE 1,2,EAST -> (1, 2, EAST)",
                "MOVE -> (2, 2, EAST)",
                "MOVE -> (3, 2, EAST)",
                "LEFT -> (3, 2, NORTH)",
                "MOVE -> (3, 3, NORTH)",
                "JUMP 3 -> ERROR: invalid/malformed command.",
                "REPORT -> (3, 3, NORTH)",
            ]
        );
        assert_eq!(entries.len(), 7);
        assert_eq!(entries[5].status, "malformed");
        assert_eq!(entries[6].report, Some(json!({"x": 3.0, "y": 3.0, "heading": "NORTH"})));
    }

    #[test]
    fn rejected_moves_print_nothing() {
        let (out, entries) = run_str("MOVE\nPLACE 0,0,SOUTH\nMOVE\n", Mode::File);
        assert_eq!(out, "PLACE 0,0,SOUTH -> (0, 0, SOUTH)\n");
        assert_eq!(entries[0].status, "rejected");
        assert_eq!(entries[0].report, None);
        assert_eq!(entries[2].status, "rejected");
        assert!(entries[2].error.as_deref().unwrap().contains("outside"));
    }

    #[test]
    fn interactive_stops_at_exit() {
        let (out, entries) = run_str("PLACE 0,0,NORTH\nexit\nMOVE\n", Mode::Interactive);
        assert_eq!(entries.len(), 1);
        assert_eq!(
            out,
            "Command: PLACE 0,0,NORTH -> (0, 0, NORTH)\nCommand: "
        );
    }

    #[test]
    fn report_before_place_is_absent() {
        let (out, _) = run_str("REPORT\n", Mode::File);
        assert_eq!(out, "REPORT -> (none, none, none)\n");
    }
}

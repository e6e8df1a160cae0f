//! Line-based editing scripts replayed through a tracker over the in-memory host.
//!
//! ```text
//! # comment
//! commit 今日は
//! compose ねこ
//! left
//! caret ねごこ 2
//! finish
//! ```

use serde::Serialize;

use compose_core::memory::TextBuffer;
use compose_core::surface::{EditingSurface, KeyEvent};
use compose_core::unicode::OffsetUnit;
use compose_session::{ComposeState, ComposingTextTracker};

#[derive(Debug, thiserror::Error)]
pub enum ScriptError {
    #[error("line {line}: unknown operation '{op}'")]
    UnknownOp { line: usize, op: String },
    #[error("line {line}: {op} expects {expected}")]
    BadArgs {
        line: usize,
        op: &'static str,
        expected: &'static str,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Op {
    Compose(String),
    Clear,
    Finish,
    Commit(String),
    Left,
    Right,
    Set(usize),
    TrySet(usize),
    Caret(String, usize),
    Region(usize, usize),
    Select(usize, usize),
    Delete(usize, usize),
    DeleteCodePoints(usize, usize),
    Key(u32),
    Reset,
}

/// A parsed operation with its 1-based source line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    pub line: usize,
    pub op: Op,
}

pub fn parse_script(src: &str) -> Result<Vec<Step>, ScriptError> {
    let mut steps = Vec::new();
    for (idx, raw) in src.lines().enumerate() {
        let line = idx + 1;
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let (name, rest) = match trimmed.split_once(char::is_whitespace) {
            Some((name, rest)) => (name, rest.trim()),
            None => (trimmed, ""),
        };
        steps.push(Step {
            line,
            op: parse_op(line, name, rest)?,
        });
    }
    Ok(steps)
}

fn parse_op(line: usize, name: &str, rest: &str) -> Result<Op, ScriptError> {
    let bad = |op: &'static str, expected: &'static str| ScriptError::BadArgs {
        line,
        op,
        expected,
    };
    let one = |op: &'static str| -> Result<usize, ScriptError> {
        rest.parse().map_err(|_| bad(op, "one offset"))
    };
    let two = |op: &'static str| -> Result<(usize, usize), ScriptError> {
        let mut it = rest.split_whitespace().map(str::parse::<usize>);
        match (it.next(), it.next(), it.next()) {
            (Some(Ok(a)), Some(Ok(b)), None) => Ok((a, b)),
            _ => Err(bad(op, "two offsets")),
        }
    };

    let op = match name {
        "compose" if !rest.is_empty() => Op::Compose(rest.to_string()),
        "compose" => return Err(bad("compose", "text")),
        "clear" => Op::Clear,
        "finish" => Op::Finish,
        "commit" if !rest.is_empty() => Op::Commit(rest.to_string()),
        "commit" => return Err(bad("commit", "text")),
        "left" => Op::Left,
        "right" => Op::Right,
        "set" => Op::Set(one("set")?),
        "try-set" => Op::TrySet(one("try-set")?),
        "caret" => match rest.rsplit_once(char::is_whitespace) {
            Some((text, pos)) if !text.trim().is_empty() => Op::Caret(
                text.trim().to_string(),
                pos.parse().map_err(|_| bad("caret", "text and offset"))?,
            ),
            _ => return Err(bad("caret", "text and offset")),
        },
        "region" => {
            let (s, e) = two("region")?;
            Op::Region(s, e)
        }
        "select" => {
            let (s, e) = two("select")?;
            Op::Select(s, e)
        }
        "delete" => {
            let (b, a) = two("delete")?;
            Op::Delete(b, a)
        }
        "delete-cp" => {
            let (b, a) = two("delete-cp")?;
            Op::DeleteCodePoints(b, a)
        }
        "key" => Op::Key(rest.parse().map_err(|_| bad("key", "a key code"))?),
        "reset" => Op::Reset,
        other => {
            return Err(ScriptError::UnknownOp {
                line,
                op: other.to_string(),
            })
        }
    };
    Ok(op)
}

/// Tracker and host state after one step.
#[derive(Debug, Serialize)]
pub struct StepReport {
    pub line: usize,
    pub op: String,
    /// Result reported by the operation, `None` for tracker-only operations.
    pub ok: Option<bool>,
    pub composing: String,
    pub insert_position: usize,
    pub state: &'static str,
    pub host_text: String,
    pub selection: (usize, usize),
    pub host_composing: Option<(usize, usize)>,
}

pub struct Replayer {
    tracker: ComposingTextTracker,
}

impl Replayer {
    pub fn new(unit: OffsetUnit) -> Self {
        Self {
            tracker: ComposingTextTracker::with_unit(Box::new(TextBuffer::with_unit(unit)), unit),
        }
    }

    pub fn tracker(&self) -> &ComposingTextTracker {
        &self.tracker
    }

    fn host(&self) -> Option<&TextBuffer> {
        self.tracker.base().as_any().downcast_ref::<TextBuffer>()
    }

    pub fn apply(&mut self, step: &Step) -> StepReport {
        let t = &mut self.tracker;
        let ok = match &step.op {
            Op::Compose(text) => Some(t.set_composing_text(Some(text), 1)),
            Op::Clear => Some(t.set_composing_text(None, 1)),
            Op::Finish => Some(t.finish_composing_text()),
            Op::Commit(text) => Some(t.commit_text(text, 1)),
            Op::Left => {
                t.move_insert_position_left();
                None
            }
            Op::Right => {
                t.move_insert_position_right();
                None
            }
            Op::Set(n) => {
                t.set_insert_position(*n);
                None
            }
            Op::TrySet(n) => Some(t.try_set_insert_position(*n).is_ok()),
            Op::Caret(text, pos) => Some(t.place_caret(text, *pos)),
            Op::Region(s, e) => Some(t.set_composing_region(*s, *e)),
            Op::Select(s, e) => Some(t.set_selection(*s, *e)),
            Op::Delete(b, a) => Some(t.delete_surrounding_text(*b, *a)),
            Op::DeleteCodePoints(b, a) => Some(t.delete_surrounding_text_in_code_points(*b, *a)),
            Op::Key(code) => Some(t.send_key_event(&KeyEvent::down(*code))),
            Op::Reset => {
                t.reset();
                None
            }
        };
        self.report(step, ok)
    }

    fn report(&self, step: &Step, ok: Option<bool>) -> StepReport {
        let t = &self.tracker;
        let host = self.host();
        StepReport {
            line: step.line,
            op: format!("{:?}", step.op),
            ok,
            composing: t.composing_text().to_string(),
            insert_position: t.insert_position(),
            state: match t.state() {
                ComposeState::Empty => "empty",
                ComposeState::Composing => "composing",
            },
            host_text: host.map(|h| h.text().to_string()).unwrap_or_default(),
            selection: host.map(TextBuffer::selection).unwrap_or_default(),
            host_composing: host.and_then(TextBuffer::composing_region),
        }
    }
}

pub fn replay(steps: &[Step], unit: OffsetUnit) -> Vec<StepReport> {
    let mut replayer = Replayer::new(unit);
    steps.iter().map(|step| replayer.apply(step)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_script() {
        let steps = parse_script(
            "# demo\n\ncompose ねこ\nleft\ncaret ねごこ 2\nregion 0 1\nfinish\n",
        )
        .unwrap();
        let ops: Vec<Op> = steps.iter().map(|s| s.op.clone()).collect();
        assert_eq!(
            ops,
            vec![
                Op::Compose("ねこ".into()),
                Op::Left,
                Op::Caret("ねごこ".into(), 2),
                Op::Region(0, 1),
                Op::Finish,
            ]
        );
        assert_eq!(steps[0].line, 3);
    }

    #[test]
    fn test_parse_errors_carry_line() {
        match parse_script("left\njump 3\n") {
            Err(ScriptError::UnknownOp { line, op }) => {
                assert_eq!(line, 2);
                assert_eq!(op, "jump");
            }
            other => panic!("expected UnknownOp, got {other:?}"),
        }
        assert!(matches!(
            parse_script("set x"),
            Err(ScriptError::BadArgs { line: 1, .. })
        ));
        assert!(matches!(
            parse_script("region 1"),
            Err(ScriptError::BadArgs { .. })
        ));
        assert!(matches!(
            parse_script("compose"),
            Err(ScriptError::BadArgs { .. })
        ));
    }

    #[test]
    fn test_replay_conversion_caret() {
        let steps = parse_script("commit 今日は\ncompose ねこ\nleft\ncaret ねごこ 2\n").unwrap();
        let reports = replay(&steps, OffsetUnit::Char);
        let last = reports.last().unwrap();
        assert_eq!(last.composing, "ねごこ");
        assert_eq!(last.insert_position, 2);
        assert_eq!(last.host_text, "今日はねごこ");
        assert_eq!(last.selection, (5, 5));
        assert_eq!(last.state, "composing");
        assert_eq!(reports[2].ok, None);
    }

    #[test]
    fn test_replay_code_point_delete_is_refused() {
        let steps = parse_script("commit abc\ndelete-cp 1 0\ndelete 1 0\n").unwrap();
        let reports = replay(&steps, OffsetUnit::Char);
        assert_eq!(reports[1].ok, Some(false));
        assert_eq!(reports[1].host_text, "abc");
        assert_eq!(reports[2].ok, Some(true));
        assert_eq!(reports[2].host_text, "ab");
    }

    #[test]
    fn test_replay_finish_keeps_host_text() {
        let steps = parse_script("compose abc\nset 9\nfinish\n").unwrap();
        let reports = replay(&steps, OffsetUnit::Char);
        assert_eq!(reports[1].insert_position, 9);
        assert_eq!(reports[2].insert_position, 0);
        assert_eq!(reports[2].state, "empty");
        assert_eq!(reports[2].host_text, "abc");
        assert_eq!(reports[2].host_composing, None);
    }
}

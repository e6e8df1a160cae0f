use std::fs;
use std::io::{self, BufWriter, Write};

use compose_core::unicode::OffsetUnit;

use crate::script::{parse_script, replay, StepReport};

pub fn replay_file(file: &str, unit: OffsetUnit, json: bool) {
    let content = die!(fs::read_to_string(file), "Error reading {file}: {}");
    let steps = die!(parse_script(&content), "Error: {}");
    let reports = replay(&steps, unit);

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    for report in &reports {
        let written = if json {
            serde_json::to_string(report)
                .map_err(io::Error::other)
                .and_then(|line| writeln!(out, "{line}"))
        } else {
            write_text(&mut out, report)
        };
        die!(written, "Error writing output: {}");
    }
    die!(out.flush(), "Error writing output: {}");
}

fn write_text(out: &mut impl Write, r: &StepReport) -> io::Result<()> {
    let ok = match r.ok {
        Some(true) => "ok",
        Some(false) => "FAIL",
        None => "-",
    };
    writeln!(
        out,
        "{:>4}  {:<28} {:<4} [{}] composing={:?} pos={} host={:?} sel={}..{}",
        r.line,
        r.op,
        ok,
        r.state,
        r.composing,
        r.insert_position,
        r.host_text,
        r.selection.0,
        r.selection.1,
    )
}

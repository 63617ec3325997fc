//! Printing a reveal's timeline without waiting for it.

use std::io::{self, Write};
use unveil_runtime::{RevealEvent, TimedEvent};

/// Write `events` as a JSON array
pub fn write_json<W: Write>(mut out: W, events: &[TimedEvent]) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut out, events)?;
    writeln!(out)
}

/// Write `events` as a text table, one event per row, plus a summary
pub fn write_text<W: Write>(mut out: W, events: &[TimedEvent]) -> io::Result<()> {
    for timed in events {
        let offset = timed.at.as_secs_f64() * 1_000.0;
        match &timed.event {
            RevealEvent::Revealed { cursor, state } => writeln!(
                out,
                "{offset:>10.3}  revealed      {:<8} {}",
                cursor.to_string(),
                state.get(cursor.line).unwrap_or_default()
            )?,
            RevealEvent::LineStarted { line } => {
                writeln!(out, "{offset:>10.3}  line_started  {line}")?;
            }
            RevealEvent::Completed => writeln!(out, "{offset:>10.3}  completed")?,
            RevealEvent::Cancelled => writeln!(out, "{offset:>10.3}  cancelled")?,
        }
    }

    let total = events.last().map_or(0.0, |e| e.at.as_secs_f64() * 1_000.0);
    writeln!(out, "{} events over {total:.3} ms", events.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use unveil_core::{LineSet, Timing};
    use unveil_runtime::RevealSequencer;

    fn timeline(lines: &[&str]) -> Vec<TimedEvent> {
        let timing = Timing::new(Duration::from_millis(10), Duration::from_millis(50));
        RevealSequencer::new(LineSet::new(lines.iter().copied()), timing).timeline()
    }

    #[test]
    fn test_text_plan() {
        let mut out = Vec::new();
        write_text(&mut out, &timeline(&["ab", "c"])).unwrap();
        let text = String::from_utf8(out).unwrap();
        let rows: Vec<&str> = text.lines().collect();

        assert_eq!(rows.len(), 6);
        assert_eq!(rows[0].trim_end(), "    10.000  revealed      0:1      a");
        assert_eq!(rows[1].trim_end(), "    20.000  revealed      0:2      ab");
        assert_eq!(rows[2], "    70.000  line_started  1");
        assert_eq!(rows[4], "   130.000  completed");
        assert_eq!(rows[5], "5 events over 130.000 ms");
    }

    #[test]
    fn test_text_plan_empty() {
        let mut out = Vec::new();
        write_text(&mut out, &[]).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "0 events over 0.000 ms\n");
    }

    #[test]
    fn test_json_plan() {
        let mut out = Vec::new();
        write_json(&mut out, &timeline(&["a"])).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        let events = value.as_array().unwrap();

        assert_eq!(events.len(), 2);
        assert_eq!(events[0]["event"], "revealed");
        assert_eq!(events[0]["offset_ms"], 10.0);
        assert_eq!(events[0]["state"], serde_json::json!(["a"]));
        assert_eq!(events[1]["event"], "completed");
        assert_eq!(events[1]["offset_ms"], 60.0);
    }
}

// LRC timed-text parsing.
// Lenient by design of the format: anything that is not a well-formed `[mm:ss(.fff)]` tag is plain text.

use std::sync::OnceLock;

use tracing::debug;

use crate::types::{Cue, Timestamp};

/// `[m:ss]`, `[mm:ss]`, and the same with a 1-3 digit fraction.
const TAG_PATTERN: &str = r"\[([0-9]{1,2}):([0-9]{2})(?:\.([0-9]{1,3}))?\]";

fn tag_regex() -> &'static regex::Regex {
    static RE: OnceLock<regex::Regex> = OnceLock::new();
    RE.get_or_init(|| regex::Regex::new(TAG_PATTERN).expect("LRC tag pattern compiles"))
}

/// Parse LRC source into cues sorted by time.
///
/// Each line yields one cue per timestamp tag, all sharing the line's text
/// (tags stripped, whitespace trimmed). Lines without tags are dropped.
/// Equal timestamps keep source order.
pub fn parse(source: &str) -> Vec<Cue> {
    let mut cues = Vec::new();
    let mut untimed = 0usize;

    for line in source.lines() {
        match parse_line(line) {
            Some((times, text)) => {
                cues.extend(times.into_iter().map(|time| Cue::new(time, text.clone())));
            }
            None => untimed += 1,
        }
    }

    // Stable sort keeps parse order among equal timestamps.
    cues.sort_by_key(|cue| cue.time);

    debug!(cues = cues.len(), untimed, "parsed LRC source");
    cues
}

/// Returns the tag timestamps of one physical line and its stripped text,
/// or `None` if the line carries no well-formed tag.
fn parse_line(line: &str) -> Option<(Vec<Timestamp>, String)> {
    let re = tag_regex();

    let times: Vec<Timestamp> = re
        .captures_iter(line)
        .map(|caps| {
            let minutes = caps.get(1).map_or(0, |m| digits(m.as_str()));
            let seconds = caps.get(2).map_or(0, |m| digits(m.as_str()));
            let millis = caps.get(3).map_or(0, |m| fraction_millis(m.as_str()));
            Timestamp::from_millis(minutes * 60_000 + seconds * 1_000 + millis)
        })
        .collect();

    if times.is_empty() {
        return None;
    }

    let text = re
        .replace_all(line, "")
        .trim_matches(|c: char| c.is_whitespace() || c == '\u{feff}')
        .to_string();
    Some((times, text))
}

/// Decimal value of an ASCII digit run already validated by the tag pattern.
fn digits(s: &str) -> u64 {
    s.parse().unwrap_or(0)
}

/// Fraction digits right-padded to milliseconds: `5` -> 500, `05` -> 50, `050` -> 50.
fn fraction_millis(s: &str) -> u64 {
    let scale = match s.len() {
        1 => 100,
        2 => 10,
        _ => 1,
    };
    digits(s) * scale
}

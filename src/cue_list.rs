// Sorted cue container. Owns the ordering invariant and the active-cue lookup.

use serde::{Deserialize, Serialize};

use crate::lrc;
use crate::types::{Cue, Timestamp};

/// Cues sorted ascending by time (stable among equal times).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(from = "Vec<Cue>", into = "Vec<Cue>")]
pub struct CueList {
    cues: Vec<Cue>,
}

impl CueList {
    /// Build a list from cues in any order.
    pub fn new(mut cues: Vec<Cue>) -> Self {
        cues.sort_by_key(|cue| cue.time);
        CueList { cues }
    }

    /// Parse LRC source directly into a list.
    pub fn parse(source: &str) -> Self {
        CueList { cues: lrc::parse(source) }
    }

    /// Index of the last cue starting at or before `position`.
    /// `None` before the first cue or when the list is empty. O(log n).
    pub fn resolve(&self, position: Timestamp) -> Option<usize> {
        self.cues
            .partition_point(|cue| cue.time <= position)
            .checked_sub(1)
    }

    pub fn len(&self) -> usize {
        self.cues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cues.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Cue> {
        self.cues.get(index)
    }

    pub fn as_slice(&self) -> &[Cue] {
        &self.cues
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Cue> {
        self.cues.iter()
    }
}

impl From<Vec<Cue>> for CueList {
    fn from(cues: Vec<Cue>) -> Self {
        CueList::new(cues)
    }
}

impl From<CueList> for Vec<Cue> {
    fn from(list: CueList) -> Self {
        list.cues
    }
}

impl<'a> IntoIterator for &'a CueList {
    type Item = &'a Cue;
    type IntoIter = std::slice::Iter<'a, Cue>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn list(times: &[u64]) -> CueList {
        CueList::new(
            times
                .iter()
                .map(|&t| Cue::new(Timestamp::from_millis(t), format!("line {}", t)))
                .collect(),
        )
    }

    #[test]
    fn new_sorts_hand_built_cues() {
        let cues = list(&[5_000, 0, 2_000]);
        let times: Vec<u64> = cues.iter().map(|c| c.time.as_millis()).collect();
        assert_eq!(times, vec![0, 2_000, 5_000]);
    }

    #[test]
    fn resolve_before_first_cue_is_none() {
        let cues = list(&[1_000, 2_000]);
        assert_eq!(cues.resolve(Timestamp::from_millis(999)), None);
        assert_eq!(CueList::default().resolve(Timestamp::from_millis(5_000)), None);
    }

    #[test]
    fn resolve_boundaries_are_inclusive() {
        let cues = list(&[0, 2_000, 5_000]);
        assert_eq!(cues.resolve(Timestamp::from_millis(0)), Some(0));
        assert_eq!(cues.resolve(Timestamp::from_millis(1_999)), Some(0));
        assert_eq!(cues.resolve(Timestamp::from_millis(2_000)), Some(1));
        assert_eq!(cues.resolve(Timestamp::from_millis(4_999)), Some(1));
        assert_eq!(cues.resolve(Timestamp::from_millis(5_000)), Some(2));
        assert_eq!(cues.resolve(Timestamp::from_millis(u64::MAX)), Some(2));
    }

    #[test]
    fn resolve_fractional_positions_around_boundary() {
        let cues = list(&[0, 2_000]);
        assert_eq!(cues.resolve(Timestamp::from_millis_f64(1_999.6)), Some(0));
        assert_eq!(cues.resolve(Timestamp::from_millis_f64(1_999.999)), Some(0));
        assert_eq!(cues.resolve(Timestamp::from_millis_f64(2_000.0)), Some(1));
        assert_eq!(cues.resolve(Timestamp::from_secs_f64(1.9996)), Some(0));
        assert_eq!(cues.resolve(Timestamp::from_secs_f64(2.0)), Some(1));
    }

    #[test]
    fn resolve_picks_last_of_equal_times() {
        let cues = list(&[1_000, 1_000, 1_000, 3_000]);
        assert_eq!(cues.resolve(Timestamp::from_millis(1_500)), Some(2));
    }

    #[test]
    fn deserializing_restores_order() {
        let cues: CueList = serde_json::from_str(
            r#"[{"time_ms": 3000, "text": "b"}, {"time_ms": 1000, "text": "a"}]"#,
        )
        .unwrap();
        assert_eq!(cues.get(0).map(|c| c.text.as_str()), Some("a"));
        assert_eq!(cues.len(), 2);
    }

    proptest! {
        /// Later positions never resolve to an earlier cue.
        #[test]
        fn resolve_is_monotonic(
            times in prop::collection::vec(0u64..600_000, 0..64),
            a in 0u64..700_000,
            b in 0u64..700_000,
        ) {
            let cues = list(&times);
            let (p1, p2) = if a <= b { (a, b) } else { (b, a) };
            let r1 = cues.resolve(Timestamp::from_millis(p1));
            let r2 = cues.resolve(Timestamp::from_millis(p2));
            // None orders before Some(_).
            prop_assert!(r1 <= r2);
        }

        /// Binary search agrees with a forward linear scan.
        #[test]
        fn resolve_matches_linear_scan(
            times in prop::collection::vec(0u64..10_000, 0..64),
            position in 0u64..12_000,
        ) {
            let cues = list(&times);
            let position = Timestamp::from_millis(position);
            let linear = cues.iter().rposition(|c| c.time <= position);
            prop_assert_eq!(cues.resolve(position), linear);
        }

        /// A fractional position never activates a cue that starts after it.
        #[test]
        fn fractional_position_never_runs_ahead(
            times in prop::collection::vec(0u64..10_000, 1..64),
            position in 0f64..12_000.0,
        ) {
            let cues = list(&times);
            if let Some(index) = cues.resolve(Timestamp::from_millis_f64(position)) {
                let start = cues.get(index).map(|c| c.time.as_millis() as f64);
                prop_assert!(start.is_some_and(|start| start <= position));
            }
        }
    }
}

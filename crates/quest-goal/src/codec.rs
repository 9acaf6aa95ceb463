// codec.rs — Line-oriented text encoding for a GoalStore.
//
// Layout, one record per line:
//   <score>
//   SimpleGoal,<name>,<points>,<complete>
//   EternalGoal,<name>,<points>
//   ChecklistGoal,<name>,<points>,<target_count>,<current_count>,<bonus>
//
// Checklist records carry `current_count` in both directions, so in-progress
// checklists survive a save/reload cycle. Files written by older builds that
// reset progress on load are still readable because the layout is the same.
//
// Loading is two-phase: the whole source is decoded into a fresh store, and
// only a fully decoded store is ever handed back or swapped in.

use std::io::{BufRead, Write};

use crate::error::GoalError;
use crate::goal::{Goal, GoalKind, CHECKLIST_TAG, ETERNAL_TAG, RECORD_DELIMITER, SIMPLE_TAG};
use crate::store::GoalStore;

/// Write `store` to `sink`: the score line, then one record per goal.
///
/// The store is only read. The sink is flushed before returning.
pub fn save<W: Write>(store: &GoalStore, mut sink: W) -> Result<(), GoalError> {
    writeln!(sink, "{}", store.total_score())?;
    for goal in store.goals() {
        writeln!(sink, "{}", goal.to_record())?;
    }
    sink.flush()?;
    tracing::debug!(
        goals = store.len(),
        score = store.total_score(),
        "goal store encoded"
    );
    Ok(())
}

/// Decode a complete store from `source`.
pub fn load<R: BufRead>(source: R) -> Result<GoalStore, GoalError> {
    let mut lines = source.lines().enumerate();

    let score = match lines.next() {
        Some((_, line)) => {
            let line = line?;
            parse_int::<i64>(line.trim(), 1, "score")?
        }
        None => return Err(GoalError::malformed(1, "missing score line")),
    };

    let mut goals = Vec::new();
    for (idx, line) in lines {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        goals.push(parse_record(&line, idx + 1)?);
    }

    tracing::debug!(goals = goals.len(), score, "goal store decoded");
    Ok(GoalStore::from_parts(goals, score))
}

impl GoalStore {
    /// Replace this store's goals and score with the contents of `source`.
    ///
    /// On error `self` is left exactly as it was.
    pub fn reload_from<R: BufRead>(&mut self, source: R) -> Result<(), GoalError> {
        let fresh = load(source)?;
        *self = fresh;
        Ok(())
    }

    /// Encode this store to `sink`. Shorthand for [`save`].
    pub fn save_to<W: Write>(&self, sink: W) -> Result<(), GoalError> {
        save(self, sink)
    }
}

/// Decode one goal record. `line_no` is 1-based and only used for errors.
fn parse_record(line: &str, line_no: usize) -> Result<Goal, GoalError> {
    let fields: Vec<&str> = line.split(RECORD_DELIMITER).collect();
    let tag = fields[0].trim();

    let expected = match tag {
        SIMPLE_TAG => 4,
        ETERNAL_TAG => 3,
        CHECKLIST_TAG => 6,
        other => {
            return Err(GoalError::malformed(
                line_no,
                format!("unknown goal type {:?}", other),
            ))
        }
    };
    if fields.len() != expected {
        return Err(GoalError::malformed(
            line_no,
            format!(
                "{} expects {} fields, found {}",
                tag,
                expected,
                fields.len()
            ),
        ));
    }

    let name = fields[1];
    if name.trim().is_empty() {
        return Err(GoalError::malformed(line_no, "empty goal name"));
    }
    let points = parse_int::<i64>(fields[2], line_no, "points")?;

    let kind = match tag {
        SIMPLE_TAG => GoalKind::Simple {
            complete: parse_bool(fields[3], line_no)?,
        },
        ETERNAL_TAG => GoalKind::Eternal,
        _ => {
            let target_count = parse_int::<u32>(fields[3], line_no, "target count")?;
            let current_count = parse_int::<u32>(fields[4], line_no, "current count")?;
            let bonus = parse_int::<i64>(fields[5], line_no, "bonus")?;
            if target_count < 1 {
                return Err(GoalError::malformed(line_no, "target count must be at least 1"));
            }
            if current_count > target_count {
                return Err(GoalError::malformed(
                    line_no,
                    format!(
                        "current count {} exceeds target count {}",
                        current_count, target_count
                    ),
                ));
            }
            GoalKind::Checklist {
                target_count,
                current_count,
                bonus,
            }
        }
    };

    Ok(Goal::new(name, points, kind))
}

fn parse_int<T: std::str::FromStr>(
    field: &str,
    line_no: usize,
    what: &str,
) -> Result<T, GoalError> {
    field.trim().parse::<T>().map_err(|_| {
        GoalError::malformed(line_no, format!("{} is not an integer: {:?}", what, field))
    })
}

// Older save files wrote "True"/"False".
fn parse_bool(field: &str, line_no: usize) -> Result<bool, GoalError> {
    let field = field.trim();
    if field.eq_ignore_ascii_case("true") {
        Ok(true)
    } else if field.eq_ignore_ascii_case("false") {
        Ok(false)
    } else {
        Err(GoalError::malformed(
            line_no,
            format!("completion flag is not true/false: {:?}", field),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::GoalVariant;
    use std::io::{self, Cursor};

    fn sample_store() -> GoalStore {
        let mut store = GoalStore::new();
        store
            .create_goal("Read scripture", 10, GoalVariant::Simple)
            .unwrap();
        store.create_goal("Pray", 7, GoalVariant::Eternal).unwrap();
        store
            .create_goal(
                "Run 10 times",
                5,
                GoalVariant::Checklist {
                    target_count: 10,
                    bonus: 50,
                },
            )
            .unwrap();
        store.record_event(0).unwrap();
        store.record_event(1).unwrap();
        store.record_event(2).unwrap();
        store.record_event(2).unwrap();
        store
    }

    fn encode(store: &GoalStore) -> String {
        let mut buf = Vec::new();
        save(store, &mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn save_writes_score_then_records() {
        let text = encode(&sample_store());
        assert_eq!(
            text,
            "27\n\
             SimpleGoal,Read scripture,10,true\n\
             EternalGoal,Pray,7\n\
             ChecklistGoal,Run 10 times,5,10,2,50\n"
        );
    }

    #[test]
    fn empty_store_is_just_a_score() {
        assert_eq!(encode(&GoalStore::new()), "0\n");
        let store = load(Cursor::new("0\n")).unwrap();
        assert!(store.is_empty());
        assert_eq!(store.total_score(), 0);
    }

    #[test]
    fn reload_preserves_listing_and_score() {
        let original = sample_store();
        let restored = load(Cursor::new(encode(&original))).unwrap();

        let strip = |s: &GoalStore| -> Vec<(String, String, i64)> {
            s.list_goals()
                .into_iter()
                .map(|r| (r.label, r.name, r.points))
                .collect()
        };
        assert_eq!(strip(&restored), strip(&original));
        assert_eq!(restored.total_score(), original.total_score());

        let kinds: Vec<&GoalKind> = restored.goals().iter().map(|g| &g.kind).collect();
        let expected: Vec<&GoalKind> = original.goals().iter().map(|g| &g.kind).collect();
        assert_eq!(kinds, expected);
    }

    #[test]
    fn checklist_progress_survives_reload() {
        let mut restored = load(Cursor::new(encode(&sample_store()))).unwrap();
        assert_eq!(restored.goals()[2].progress_label(), "[2/10]");

        for _ in 0..7 {
            assert_eq!(restored.record_event(2).unwrap(), 5);
        }
        assert_eq!(restored.record_event(2).unwrap(), 55);
        assert_eq!(restored.record_event(2).unwrap(), 0);
    }

    #[test]
    fn completed_simple_goal_stays_complete() {
        let mut restored = load(Cursor::new(encode(&sample_store()))).unwrap();
        assert!(restored.goals()[0].is_complete());
        assert_eq!(restored.record_event(0).unwrap(), 0);
    }

    #[test]
    fn accepts_legacy_capitalized_booleans_and_trailing_blanks() {
        let text = "10\r\nSimpleGoal,Read,10,True\r\nSimpleGoal,Walk,3,False\r\n\r\n\n";
        let store = load(Cursor::new(text)).unwrap();
        assert_eq!(store.len(), 2);
        assert!(store.goals()[0].is_complete());
        assert!(!store.goals()[1].is_complete());
    }

    #[test]
    fn score_at_the_limit_keeps_recording() {
        let mut store = load(Cursor::new("9223372036854775807\nEternalGoal,x,1\n")).unwrap();
        assert_eq!(store.record_event(0).unwrap(), 1);
        assert_eq!(store.total_score(), i64::MAX);
        assert_eq!(encode(&store), "9223372036854775807\nEternalGoal,x,1\n");
    }

    #[test]
    fn score_beyond_i64_is_malformed() {
        let result = load(Cursor::new("9223372036854775808\n"));
        assert!(matches!(result, Err(GoalError::MalformedRecord { line: 1, .. })));
    }

    #[test]
    fn missing_score_line_is_malformed() {
        let result = load(Cursor::new(""));
        assert!(matches!(result, Err(GoalError::MalformedRecord { line: 1, .. })));
    }

    #[test]
    fn non_integer_score_is_malformed() {
        let result = load(Cursor::new("lots\nEternalGoal,Pray,7\n"));
        assert!(matches!(result, Err(GoalError::MalformedRecord { line: 1, .. })));
    }

    #[test]
    fn unknown_tag_is_malformed() {
        let result = load(Cursor::new("0\nWeeklyGoal,Gym,5\n"));
        assert!(matches!(result, Err(GoalError::MalformedRecord { line: 2, .. })));
    }

    #[test]
    fn wrong_field_count_is_malformed() {
        for line in [
            "SimpleGoal,Read,10",
            "EternalGoal,Pray",
            "EternalGoal,Pray,7,extra",
            "ChecklistGoal,Run,5,10,50",
        ] {
            let text = format!("0\n{}\n", line);
            let result = load(Cursor::new(text));
            assert!(
                matches!(result, Err(GoalError::MalformedRecord { line: 2, .. })),
                "accepted {:?}",
                line
            );
        }
    }

    #[test]
    fn inconsistent_checklist_is_malformed() {
        for line in ["ChecklistGoal,Run,5,0,0,50", "ChecklistGoal,Run,5,3,4,50"] {
            let result = load(Cursor::new(format!("0\n{}\n", line)));
            assert!(
                matches!(result, Err(GoalError::MalformedRecord { .. })),
                "accepted {:?}",
                line
            );
        }
    }

    #[test]
    fn failed_reload_leaves_store_untouched() {
        let mut store = sample_store();
        let before = encode(&store);

        let result = store.reload_from(Cursor::new(
            "99\nEternalGoal,Pray,7\nChecklistGoal,broken\n",
        ));
        assert!(result.is_err());
        assert_eq!(encode(&store), before);
        assert_eq!(store.total_score(), 27);
    }

    #[test]
    fn successful_reload_replaces_store() {
        let mut store = sample_store();
        store
            .reload_from(Cursor::new("3\nEternalGoal,Stretch,3\n"))
            .unwrap();
        assert_eq!(store.len(), 1);
        assert_eq!(store.total_score(), 3);
        assert_eq!(store.goals()[0].name, "Stretch");
    }

    struct ClosedSink;

    impl Write for ClosedSink {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "sink closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn write_failure_is_an_io_error() {
        let store = sample_store();
        let before = encode(&store);
        let result = save(&store, ClosedSink);
        assert!(matches!(result, Err(GoalError::Io(_))));
        assert_eq!(encode(&store), before);
    }

    struct FailingSource;

    impl io::Read for FailingSource {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::Other, "disk gone"))
        }
    }

    #[test]
    fn read_failure_is_an_io_error() {
        let mut store = sample_store();
        let result = store.reload_from(io::BufReader::new(FailingSource));
        assert!(matches!(result, Err(GoalError::Io(_))));
        assert_eq!(store.len(), 3);
    }
}

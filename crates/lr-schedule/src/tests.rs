//! Unit tests for lr-schedule.

use std::time::Duration;

use lr_core::{SinkId, StreamId, Timestamp};

use crate::{build_cycle, DelayTable, Event, EventKind, EventQueue, StreamDefinition};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

fn table(millis: &[u64]) -> DelayTable {
    DelayTable::new(millis.iter().map(|&m| ms(m)).collect()).unwrap()
}

fn stream(sink: &str, lines: &[&str], delays: &[u64], offset_ms: u64) -> StreamDefinition {
    StreamDefinition::new(sink, lines.iter().copied(), table(delays), ms(offset_ms))
}

/// Stream A: `["x","y"]`, delays `[1s,1s]`, offset 0.
/// Stream B: `["z"]`, delays `[2s]`, offset 0.5s.
fn worked_example() -> Vec<StreamDefinition> {
    vec![
        stream("a", &["x", "y"], &[1_000, 1_000], 0),
        stream("b", &["z"], &[2_000], 500),
    ]
}

const T: Timestamp = Timestamp(1_700_000_000_000_000);

/// Drain a queue into `(offset_ms_from_T, sink, payload)` triples.
fn drain(mut queue: EventQueue) -> Vec<(u64, String, Option<String>)> {
    let mut out = Vec::new();
    while !queue.is_empty() {
        let ev = queue.pop_min().unwrap();
        out.push((
            (ev.fire_at - T).as_millis() as u64,
            ev.sink.to_string(),
            ev.payload().map(str::to_owned),
        ));
    }
    out
}

// ── DelayTable ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod delay_table {
    use super::*;

    #[test]
    fn empty_table_rejected() {
        assert!(DelayTable::new(vec![]).is_err());
    }

    #[test]
    fn zero_delay_rejected() {
        assert!(DelayTable::new(vec![ms(5), Duration::ZERO]).is_err());
    }

    #[test]
    fn sub_microsecond_delay_rejected() {
        assert!(DelayTable::from_secs_f64(&[4e-7]).is_err());
        assert!(DelayTable::new(vec![ms(5), Duration::from_nanos(999)]).is_err());
        assert!(DelayTable::new(vec![Duration::from_micros(1)]).is_ok());
    }

    #[test]
    fn scaling_below_a_microsecond_rejected() {
        let t = DelayTable::new(vec![Duration::from_micros(1)]).unwrap();
        assert!(t.scaled(0.5).is_err());
    }

    #[test]
    fn negative_and_nan_secs_rejected() {
        assert!(DelayTable::from_secs_f64(&[0.5, -1.0]).is_err());
        assert!(DelayTable::from_secs_f64(&[f64::NAN]).is_err());
    }

    #[test]
    fn index_wraps_cyclically() {
        let t = table(&[10, 20, 30]);
        assert_eq!(t.get(0), ms(10));
        assert_eq!(t.get(2), ms(30));
        assert_eq!(t.get(3), ms(10));
        assert_eq!(t.get(7), ms(20));
    }

    #[test]
    fn cumulative_sums_with_wrap() {
        let t = table(&[10, 20]);
        assert_eq!(t.cumulative(0), Duration::ZERO);
        assert_eq!(t.cumulative(1), ms(10));
        assert_eq!(t.cumulative(5), ms(10 + 20 + 10 + 20 + 10));
    }

    #[test]
    fn scaled_multiplies_each_entry() {
        let t = DelayTable::from_secs_f64(&[0.5, 1.2]).unwrap().scaled(3.0).unwrap();
        assert_eq!(t.as_slice(), &[ms(1_500), ms(3_600)]);
        assert_eq!(t.get(2), ms(1_500));
    }

    #[test]
    fn scale_must_be_positive() {
        let t = table(&[10]);
        assert!(t.scaled(0.0).is_err());
        assert!(t.scaled(-2.0).is_err());
        assert!(t.scaled(f64::INFINITY).is_err());
    }
}

// ── StreamDefinition ──────────────────────────────────────────────────────────

#[cfg(test)]
mod stream_definition {
    use super::*;

    #[test]
    fn span_covers_offset_and_all_delays() {
        let s = stream("a", &["1", "2", "3"], &[100, 200], 50);
        assert_eq!(s.span(), ms(50 + 100 + 200 + 100));
    }

    #[test]
    fn empty_stream_span_is_offset() {
        let s = stream("a", &[], &[100], 250);
        assert_eq!(s.span(), ms(250));
    }

    #[test]
    fn negative_offset_rejected() {
        let r = StreamDefinition::with_offset_secs("a", ["x"], table(&[1]), -0.5);
        assert!(r.is_err());
    }

    #[test]
    fn scaled_stream_scales_offset_too() {
        let s = stream("a", &["x"], &[1_000], 1_000).scaled(3.0).unwrap();
        assert_eq!(s.start_offset(), ms(3_000));
        assert_eq!(s.delays().get(0), ms(3_000));
        assert_eq!(s.sink(), &SinkId::from("a"));
    }
}

// ── Cycle builder ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod cycle_builder {
    use super::*;

    #[test]
    fn worked_example_events_per_stream() {
        let events = build_cycle(T, &worked_example());
        let offsets: Vec<(u64, Option<&str>)> = events
            .iter()
            .map(|e| ((e.fire_at - T).as_millis() as u64, e.payload()))
            .collect();
        assert_eq!(
            offsets,
            vec![(0, None), (1_000, Some("x")), (2_000, Some("y")), (500, None), (2_500, Some("z"))]
        );
        assert_eq!(events[0].stream, StreamId(0));
        assert_eq!(events[3].stream, StreamId(1));
    }

    #[test]
    fn stream_ids_follow_slice_position() {
        let streams = vec![
            stream("a", &["1"], &[10], 0),
            stream("b", &[], &[10], 0),
            stream("c", &["1", "2"], &[10], 0),
        ];
        let ids: Vec<(String, StreamId)> = build_cycle(T, &streams)
            .iter()
            .filter(|e| e.is_clear())
            .map(|e| (e.sink.to_string(), e.stream))
            .collect();
        assert_eq!(
            ids,
            vec![
                ("a".to_string(), StreamId(0)),
                ("b".to_string(), StreamId(1)),
                ("c".to_string(), StreamId(2)),
            ]
        );
    }

    #[test]
    fn building_twice_is_identical() {
        let streams = worked_example();
        assert_eq!(build_cycle(T, &streams), build_cycle(T, &streams));
    }

    #[test]
    fn different_anchor_shifts_every_event() {
        let streams = worked_example();
        let later = T + Duration::from_secs(60);
        let a = build_cycle(T, &streams);
        let b = build_cycle(later, &streams);
        for (x, y) in a.iter().zip(&b) {
            assert_eq!(y.fire_at - x.fire_at, Duration::from_secs(60));
            assert_eq!(x.kind, y.kind);
        }
    }

    #[test]
    fn empty_lines_still_clear() {
        let events = build_cycle(T, &[stream("empty", &[], &[100], 300)]);
        assert_eq!(events.len(), 1);
        assert!(events[0].is_clear());
        assert_eq!(events[0].fire_at, T + ms(300));
    }

    #[test]
    fn exactly_one_clear_per_stream_and_it_is_first() {
        let streams = vec![
            stream("a", &["1", "2", "3", "4"], &[70, 10, 40], 0),
            stream("b", &["1", "2"], &[5], 900),
        ];
        let events = build_cycle(T, &streams);
        for sink in ["a", "b"] {
            let mine: Vec<&Event> = events.iter().filter(|e| e.sink.as_str() == sink).collect();
            assert_eq!(mine.iter().filter(|e| e.is_clear()).count(), 1);
            let clear_at = mine.iter().find(|e| e.is_clear()).unwrap().fire_at;
            assert!(mine.iter().all(|e| e.fire_at >= clear_at));
        }
    }

    #[test]
    fn log_offsets_are_prefix_sums_of_cyclic_delays() {
        let delays = [70u64, 10, 40];
        let offset = 25u64;
        let lines: Vec<String> = (0..8).map(|i| format!("line {i}")).collect();
        let refs: Vec<&str> = lines.iter().map(String::as_str).collect();
        let events = build_cycle(T, &[stream("a", &refs, &delays, offset)]);

        let logs: Vec<&Event> = events.iter().filter(|e| !e.is_clear()).collect();
        assert_eq!(logs.len(), 8);
        for (k, ev) in logs.iter().enumerate() {
            let expected: u64 = offset + (0..=k).map(|i| delays[i % delays.len()]).sum::<u64>();
            assert_eq!(ev.fire_at, T + ms(expected), "line {k}");
            assert_eq!(ev.payload(), Some(lines[k].as_str()));
        }
    }

    #[test]
    fn logs_strictly_increase_within_stream() {
        let events = build_cycle(T, &[stream("a", &["1", "2", "3", "4", "5"], &[3, 1], 0)]);
        let logs: Vec<Timestamp> = events.iter().filter(|e| !e.is_clear()).map(|e| e.fire_at).collect();
        assert!(logs.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn microsecond_scale_delays_still_strictly_increase() {
        // 1.5us steps truncate to 1, 3, 4us past the anchor.
        let delays = DelayTable::new(vec![Duration::from_nanos(1_500)]).unwrap();
        let s = StreamDefinition::new("a", ["1", "2", "3"], delays, Duration::ZERO);
        let offsets: Vec<u64> = build_cycle(T, &[s])
            .iter()
            .map(|e| (e.fire_at - T).as_micros() as u64)
            .collect();
        assert_eq!(offsets, vec![0, 1, 3, 4]);
    }
}

// ── EventQueue ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod event_queue {
    use super::*;
    use crate::ScheduleError;

    #[test]
    fn worked_example_global_order() {
        let queue = EventQueue::from_events(build_cycle(T, &worked_example()));
        let expected: Vec<(u64, String, Option<String>)> = vec![
            (0, "a".into(), None),
            (500, "b".into(), None),
            (1_000, "a".into(), Some("x".into())),
            (2_000, "a".into(), Some("y".into())),
            (2_500, "b".into(), Some("z".into())),
        ];
        assert_eq!(drain(queue), expected);
    }

    #[test]
    fn clear_wins_exact_tie_regardless_of_insert_order() {
        let mut q = EventQueue::new();
        q.insert(Event::log(T, StreamId(0), "a".into(), "first".into()));
        q.insert(Event::clear(T, StreamId(1), "b".into()));
        let first = q.pop_min().unwrap();
        assert!(first.is_clear());
        assert_eq!(first.sink.as_str(), "b");
    }

    #[test]
    fn same_kind_ties_keep_insertion_order() {
        let mut q = EventQueue::new();
        for (i, sink) in ["c", "a", "b"].into_iter().enumerate() {
            q.insert(Event::log(T, StreamId(i as u32), sink.into(), "l".into()));
        }
        let sinks: Vec<String> = drain(q).into_iter().map(|(_, s, _)| s).collect();
        assert_eq!(sinks, ["c", "a", "b"]);
    }

    #[test]
    fn earlier_fire_time_beats_kind_rank() {
        let mut q = EventQueue::new();
        q.insert(Event::clear(T + ms(1), StreamId(0), "a".into()));
        q.insert(Event::log(T, StreamId(1), "b".into(), "early".into()));
        assert_eq!(q.pop_min().unwrap().payload(), Some("early"));
    }

    #[test]
    fn cross_stream_clear_ties_with_log() {
        // b's clear lands exactly on a's first line.
        let streams = vec![stream("a", &["x"], &[500], 0), stream("b", &["z"], &[100], 500)];
        let order = drain(EventQueue::from_events(build_cycle(T, &streams)));
        assert_eq!(order[1], (500, "b".into(), None));
        assert_eq!(order[2], (500, "a".into(), Some("x".into())));
    }

    #[test]
    fn pop_empty_is_an_error() {
        let mut q = EventQueue::new();
        assert!(matches!(q.pop_min(), Err(ScheduleError::EmptyQueue)));
    }

    #[test]
    fn peek_does_not_remove() {
        let mut q: EventQueue = build_cycle(T, &worked_example()).into_iter().collect();
        assert_eq!(q.len(), 5);
        assert_eq!(q.next_fire_at(), Some(T));
        assert!(q.peek_min().unwrap().is_clear());
        assert_eq!(q.len(), 5);
        q.pop_min().unwrap();
        assert_eq!(q.next_fire_at(), Some(T + ms(500)));
    }

    #[test]
    fn kind_rank_orders_clear_first() {
        assert!(EventKind::Clear.rank() < EventKind::Log("x".into()).rank());
        assert_eq!(EventKind::Clear.op(), "clear");
        assert_eq!(EventKind::Log("x".into()).op(), "append");
    }
}

// ── Loader ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod loader {
    use std::fs;
    use std::io::Cursor;

    use super::*;
    use crate::{load_streams_csv, load_streams_reader, load_template_reader, ScheduleError};

    #[test]
    fn template_lines_strip_terminators_keep_blanks() {
        let lines = load_template_reader(Cursor::new("one\r\ntwo\n\nfour\n")).unwrap();
        assert_eq!(lines, ["one", "two", "", "four"]);
    }

    #[test]
    fn manifest_resolves_relative_to_base() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("tmpl")).unwrap();
        fs::write(dir.path().join("tmpl/1.log"), "alpha\nbeta\n").unwrap();
        fs::write(dir.path().join("tmpl/2.log"), "gamma\n").unwrap();

        let manifest = "\
template,output,start_offset_secs,delays_secs
tmpl/1.log,out/1-out.log,0,0.5 1.2
tmpl/2.log,out/2-out.log,1,1.1
";
        fs::write(dir.path().join("streams.csv"), manifest).unwrap();

        let streams = load_streams_csv(&dir.path().join("streams.csv")).unwrap();
        assert_eq!(streams.len(), 2);

        let first = &streams[0];
        assert_eq!(first.sink().as_str(), dir.path().join("out/1-out.log").display().to_string());
        assert_eq!(first.lines().len(), 2);
        assert_eq!(&*first.lines()[1], "beta");
        assert_eq!(first.delays().get(1), ms(1_200));

        assert_eq!(streams[1].start_offset(), Duration::from_secs(1));
    }

    #[test]
    fn aliased_output_paths_share_one_sink_id() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("t.log"), "x\n").unwrap();
        let manifest = "\
template,output,start_offset_secs,delays_secs
t.log,out/1-out.log,0,1
./t.log,out/./1-out.log,0,1
t.log,out//1-out.log,0,1
";
        let streams = load_streams_reader(Cursor::new(manifest), &dir.path().join(".")).unwrap();
        let expected = dir.path().join("out").join("1-out.log").display().to_string();
        for s in &streams {
            assert_eq!(s.sink().as_str(), expected);
        }
    }

    #[test]
    fn missing_template_reports_path() {
        let manifest = "template,output,start_offset_secs,delays_secs\nnope.log,out.log,0,1\n";
        let err = load_streams_reader(Cursor::new(manifest), std::path::Path::new("/nonexistent"))
            .unwrap_err();
        match err {
            ScheduleError::Io { path, .. } => assert!(path.ends_with("nope.log"), "{path}"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn bad_delay_token_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("t.log"), "x\n").unwrap();
        let manifest = "template,output,start_offset_secs,delays_secs\nt.log,o.log,0,0.5 fast\n";
        let err = load_streams_reader(Cursor::new(manifest), dir.path()).unwrap_err();
        assert!(matches!(err, ScheduleError::Config(_)), "{err}");
    }

    #[test]
    fn empty_delay_column_rejected() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("t.log"), "x\n").unwrap();
        let manifest = "template,output,start_offset_secs,delays_secs\nt.log,o.log,0,\n";
        assert!(load_streams_reader(Cursor::new(manifest), dir.path()).is_err());
    }

    #[test]
    fn empty_manifest_rejected() {
        let manifest = "template,output,start_offset_secs,delays_secs\n";
        let err = load_streams_reader(Cursor::new(manifest), std::path::Path::new(".")).unwrap_err();
        assert!(matches!(err, ScheduleError::Config(_)));
    }
}

//! End-to-end dispatch tests over the built-in registry, with recording
//! fakes standing in for the hub collaborators.

use std::sync::{Arc, Mutex};

use tyche_console::{
    Dispatcher, HubContext, LiveChannel, MediaControl, Severity, TimerBackend, TimerEntry,
};

#[derive(Default)]
struct Recorder {
    calls: Mutex<Vec<String>>,
}

impl Recorder {
    fn record(&self, call: impl Into<String>) {
        self.calls.lock().unwrap().push(call.into());
    }

    fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

impl LiveChannel for Recorder {
    fn connect(&self) {
        self.record("connect");
    }

    fn disconnect(&self) {
        self.record("disconnect");
    }
}

impl MediaControl for Recorder {
    fn set_volume(&self, value: f64) {
        self.record(format!("vol:{value}"));
    }

    fn play(&self) {
        self.record("play");
    }

    fn pause(&self) {
        self.record("pause");
    }

    fn next(&self) {
        self.record("next");
    }

    fn previous(&self) {
        self.record("prev");
    }
}

struct FixedTimers(Vec<TimerEntry>);

impl TimerBackend for FixedTimers {
    fn list_timers(&self) -> Vec<TimerEntry> {
        self.0.clone()
    }
}

struct Harness {
    dispatcher: Dispatcher,
    channel: Arc<Recorder>,
    media: Arc<Recorder>,
}

fn harness() -> Harness {
    harness_with_timers(Vec::new())
}

fn harness_with_timers(timers: Vec<TimerEntry>) -> Harness {
    let channel = Arc::new(Recorder::default());
    let media = Arc::new(Recorder::default());
    let ctx = HubContext::new(
        Arc::clone(&channel) as Arc<dyn LiveChannel>,
        Arc::clone(&media) as Arc<dyn MediaControl>,
        Arc::new(FixedTimers(timers)),
    );
    Harness {
        dispatcher: Dispatcher::new(ctx),
        channel,
        media,
    }
}

#[test]
fn test_unknown_command_logs_one_error_and_returns_false() {
    let h = harness();

    assert!(!h.dispatcher.execute("frobnicate --fast"));

    let entries = h.dispatcher.sink().entries();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].severity, Severity::Error);
    assert!(entries[0].message.contains("frobnicate"));
    assert!(entries[0].message.contains("is not defined"));
}

#[test]
fn test_help_lists_every_command_in_registry_order() {
    let h = harness();

    assert!(h.dispatcher.execute("help"));

    let entries = h.dispatcher.sink().entries();
    assert_eq!(entries.len(), 1);
    let listing = &entries[0].message;
    assert!(entries[0].markup);

    let mut last = 0;
    for command in h.dispatcher.registry().commands() {
        let at = listing[last..]
            .find(&command.cmd)
            .unwrap_or_else(|| panic!("'{}' missing or out of order", command.cmd));
        assert!(listing.contains(&command.description));
        last += at;
    }
}

#[test]
fn test_man_without_argument_prints_usage_only() {
    let h = harness();

    assert!(h.dispatcher.execute("man"));

    let entries = h.dispatcher.sink().entries();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].severity, Severity::Error);
    assert!(entries[0].message.starts_with("Usage: man"));
}

#[test]
fn test_man_with_unknown_target_names_it() {
    let h = harness();

    assert!(h.dispatcher.execute("man doesnotexist"));

    let entries = h.dispatcher.sink().entries();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].severity, Severity::Error);
    assert!(entries[0].message.contains("doesnotexist"));
}

#[test]
fn test_man_renders_a_page_for_known_commands() {
    let h = harness();

    assert!(h.dispatcher.execute("man spotify"));

    let entries = h.dispatcher.sink().entries();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].severity, Severity::Command);
    assert!(entries[0].message.contains("TYCHE COMMAND MANUAL - SPOTIFY"));
    assert!(entries[0].message.contains("SYNOPSIS"));
}

#[test]
fn test_calc_carbs_prints_exact_result() {
    let h = harness();

    assert!(h.dispatcher.execute("calc carbs --per-100g 40 --amount 150"));

    let entries = h.dispatcher.sink().entries();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].message, "60");
    assert_eq!(entries[0].severity, Severity::Command);
}

#[test]
fn test_calc_carbs_via_aliases() {
    let h = harness();

    assert!(h.dispatcher.execute("calc carbs -p 40 -a 150"));
    assert_eq!(h.dispatcher.sink().entries()[0].message, "60");
}

#[test]
fn test_calc_carbs_propagates_nan_instead_of_failing() {
    let h = harness();

    assert!(h.dispatcher.execute("calc carbs --per-100g forty --amount 150"));

    let entries = h.dispatcher.sink().entries();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].message, "NaN");
}

#[test]
fn test_subcommand_alias_does_not_match_global_scope() {
    let h = harness();

    // -p belongs to 'calc carbs'; at global scope it is just noise.
    assert!(h.dispatcher.execute("calc -p 40"));

    let entries = h.dispatcher.sink().entries();
    assert!(entries.iter().all(|e| e.message != "60"));
    assert!(
        entries
            .iter()
            .any(|e| e.severity == Severity::Warning && e.message.contains("'-p'"))
    );
}

#[test]
fn test_global_alias_does_not_match_subcommand_scope() {
    let h = harness();

    // spotify has no global options; 'vol' owns -v. Before vol is claimed,
    // -v matches nothing.
    assert!(h.dispatcher.execute("spotify -v 50"));

    assert!(h.media.calls().is_empty());
    let entries = h.dispatcher.sink().entries();
    assert!(
        entries
            .iter()
            .any(|e| e.severity == Severity::Warning && e.message.contains("'-v'"))
    );
}

#[test]
fn test_unrecognized_token_warns_but_still_dispatches() {
    let h = harness();

    assert!(h.dispatcher.execute("spotify vol --value 50 bogus"));

    assert_eq!(h.media.calls(), vec!["vol:50"]);
    let warnings: Vec<_> = h
        .dispatcher
        .sink()
        .entries()
        .into_iter()
        .filter(|e| e.severity == Severity::Warning)
        .collect();
    assert_eq!(warnings.len(), 1);
    assert!(warnings[0].message.contains("bogus"));
}

#[test]
fn test_spotify_transport_subcommands() {
    let h = harness();

    h.dispatcher.execute("spotify play");
    h.dispatcher.execute("spotify pause");
    h.dispatcher.execute("spotify next");
    h.dispatcher.execute("spotify prev");

    assert_eq!(h.media.calls(), vec!["play", "pause", "next", "prev"]);
    assert!(h.dispatcher.sink().is_empty());
}

#[test]
fn test_spotify_vol_without_value_forwards_nan() {
    let h = harness();

    assert!(h.dispatcher.execute("spotify vol --value"));

    assert_eq!(h.media.calls(), vec!["vol:NaN"]);
}

#[test]
fn test_unknown_subcommand_token_warns_twice_and_does_nothing() {
    let h = harness();

    assert!(h.dispatcher.execute("spotify stop"));

    assert!(h.media.calls().is_empty());
    let entries = h.dispatcher.sink().entries();
    // 'stop' is no spotify subcommand: one warning for the stray token, one
    // for the missing subcommand. Nothing reaches the media backend.
    assert_eq!(entries.len(), 2);
    assert!(entries.iter().all(|e| e.severity == Severity::Warning));
    assert!(entries[0].message.contains("'stop'"));
    assert!(entries[1].message.contains("Missing subcommand"));
}

#[test]
fn test_missing_subcommand_is_a_warning_without_side_effects() {
    let h = harness();

    assert!(h.dispatcher.execute("spotify"));

    assert!(h.media.calls().is_empty());
    let entries = h.dispatcher.sink().entries();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].severity, Severity::Warning);
    assert!(entries[0].message.contains("Missing subcommand"));
}

#[test]
fn test_connect_and_disconnect_drive_the_channel() {
    let h = harness();

    assert!(h.dispatcher.execute("connect tyche"));
    assert!(h.dispatcher.execute("disconnect tyche"));

    assert_eq!(h.channel.calls(), vec!["connect", "disconnect"]);
    assert!(h.dispatcher.sink().is_empty());
}

#[test]
fn test_history_suppresses_immediate_repeats_only() {
    let h = harness();

    h.dispatcher.submit("help");
    h.dispatcher.submit("help");
    assert_eq!(h.dispatcher.history().entries(), vec!["help"]);

    h.dispatcher.submit("spotify play");
    h.dispatcher.submit("help");
    assert_eq!(
        h.dispatcher.history().entries(),
        vec!["help", "spotify play", "help"]
    );
}

#[test]
fn test_blank_submission_is_skipped_entirely() {
    let h = harness();

    assert!(!h.dispatcher.submit("   "));

    assert!(h.dispatcher.history().entries().is_empty());
    assert!(h.dispatcher.sink().is_empty());
}

#[test]
fn test_timer_list_appends_after_background_tail_completes() {
    let h = harness_with_timers(vec![
        TimerEntry {
            id: "pasta".to_string(),
            remaining_time: 30,
        },
        TimerEntry {
            id: "tea".to_string(),
            remaining_time: 120,
        },
    ]);

    assert!(h.dispatcher.execute("timer list"));
    h.dispatcher.wait_for_background_tasks();

    let entries = h.dispatcher.sink().entries();
    assert_eq!(entries.len(), 1);
    assert!(entries[0].markup);
    assert_eq!(entries[0].message, "pasta: 30 s\ntea: 120 s\n");
}

#[test]
fn test_timer_list_with_no_timers_still_reports() {
    let h = harness();

    assert!(h.dispatcher.execute("timer list"));
    h.dispatcher.wait_for_background_tasks();

    let entries = h.dispatcher.sink().entries();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].message, "");
}

#[test]
fn test_rapid_submissions_all_complete_without_loss() {
    let h = harness_with_timers(vec![TimerEntry {
        id: "egg".to_string(),
        remaining_time: 300,
    }]);

    // Two async tails plus one synchronous command in between; everything
    // lands, in whatever order.
    h.dispatcher.submit("timer list");
    h.dispatcher.submit("calc carbs -p 10 -a 50");
    h.dispatcher.submit("timer list");
    h.dispatcher.wait_for_background_tasks();

    let messages: Vec<String> = h
        .dispatcher
        .sink()
        .entries()
        .into_iter()
        .map(|e| e.message)
        .collect();
    assert_eq!(messages.len(), 3);
    assert_eq!(
        messages.iter().filter(|m| *m == "egg: 300 s\n").count(),
        2
    );
    assert!(messages.iter().any(|m| m == "5"));
}

use std::fs::read_to_string;
use std::path::Path;
use std::sync::Mutex;

use cwtree::report::{
    disable_ansi_colors, emit_reports, set_output_file, take_reports, Confidence, ErrorKey,
    LogReport, Severity,
};
use cwtree::token::TokenKind;
use cwtree::{parse_script, CwFile, Found, LocaStore, NodeArena};

/// The report sink is global, so tests that go through it take this lock and
/// sort out their own reports by pathname.
static TEST_MUTEX: Mutex<()> = Mutex::new(());

fn reports_for(file: &str) -> Vec<LogReport> {
    take_reports()
        .into_iter()
        .filter(|r| r.primary().loc.pathname.as_path() == Path::new(file))
        .collect()
}

#[test]
fn read_a_script_file() {
    let mut arena = NodeArena::new();
    let roots = CwFile::read(Path::new("tests/files/kingdom.txt"), &mut arena).unwrap();
    assert_eq!(roots.len(), 2);

    let kingdom = roots[0];
    assert!(arena[kingdom].has_label("k_test_kingdom"));

    let capital = arena.expect_one(kingdom, "capital").unwrap();
    assert_eq!(arena[capital].value().unwrap().as_str(), "c_test_county");

    // the @name assignment at the end of the file
    let correction = &arena[roots[1]];
    assert_eq!(correction.label().unwrap().kind(), TokenKind::LocalValue);
    assert_eq!(correction.value().unwrap().get_number(), Some(0.5));
}

#[test]
fn hsv_colors_take_two_nodes() {
    let mut arena = NodeArena::new();
    let roots = CwFile::read(Path::new("tests/files/kingdom.txt"), &mut arena).unwrap();
    let kingdom = roots[0];

    let color = arena.expect_one(kingdom, "color").unwrap();
    assert_eq!(arena[color].value().unwrap().as_str(), "hsv");

    let values = arena.following(color).unwrap();
    assert!(arena[kingdom].children().unwrap().contains(&values));
    let list = arena[values].children().unwrap()[0];
    let channels: Vec<&str> = arena[list]
        .children()
        .unwrap()
        .iter()
        .map(|&id| arena[id].value().unwrap().as_str())
        .collect();
    assert_eq!(channels, vec!["0.6", "0.9", "0.8"]);
}

#[test]
fn queries_over_a_script_file() {
    let mut arena = NodeArena::new();
    let roots = CwFile::read(Path::new("tests/files/kingdom.txt"), &mut arena).unwrap();
    let kingdom = roots[0];

    // a date as a label
    let history = arena.lookup(kingdom, "1066.9.15").unwrap();
    let Found::One(history) = history else { panic!("expected one history entry") };
    assert_eq!(arena[history].label().unwrap().kind(), TokenKind::Date);
    let holder = arena.expect_one(history, "holder").unwrap();
    assert_eq!(arena[holder].value().unwrap().get_integer(), Some(90107));

    // operators other than = survive on the nodes
    let allow = arena.expect_one(kingdom, "allow").unwrap();
    assert_eq!(arena[allow].operator().unwrap().as_str(), "?=");
    assert_eq!(arena[allow].value().unwrap().get_bool(), Some(true));
    let development = arena.expect_one(kingdom, "development").unwrap();
    assert_eq!(arena[development].operator().unwrap().as_str(), ">=");

    // list values keep their classification
    let names = arena.expect_one(kingdom, "male_names").unwrap();
    let list = arena[names].children().unwrap()[0];
    let kinds: Vec<TokenKind> = arena[list]
        .children()
        .unwrap()
        .iter()
        .map(|&id| arena[id].value().unwrap().kind())
        .collect();
    assert_eq!(kinds, vec![TokenKind::Identifier, TokenKind::Identifier, TokenKind::String]);

    // scripted value references
    let priority = arena.expect_one(kingdom, "ai_primary_priority").unwrap();
    let add = arena.expect_one(priority, "add").unwrap();
    assert_eq!(arena[add].value().unwrap().kind(), TokenKind::LocalValue);
    let factor = arena.expect_one(priority, "factor").unwrap();
    assert_eq!(arena[factor].value().unwrap().kind(), TokenKind::Expression);
    assert_eq!(arena[factor].value().unwrap().as_str(), "@[base_priority * 2]");
}

#[test]
fn read_a_localization_file() {
    let mut store = LocaStore::new();
    let records =
        CwFile::read_localization(Path::new("tests/files/english.yml"), &mut store).unwrap();
    assert_eq!(records.len(), 5);
    assert_eq!(store.len(), 5);

    assert_eq!(store.get("k_test_adj").unwrap().value, "Testish");
    assert_eq!(store.get("k_test_motto").unwrap().value, "Strength # Honor");
    assert_eq!(store.get("k_test_empty").unwrap().value, "");
    assert!(store.get("k_test_dropped").is_none());

    store.add_passthrough("TIER");
    store.add_passthrough("NAME");
    assert_eq!(store.resolve("k_test_kingdom").unwrap(), "Greater Testish Realm");
    assert_eq!(
        store.resolve("k_test_ruler_title").unwrap(),
        "$TIER|U$ $NAME$ of Greater Testish Realm"
    );
}

#[test]
fn read_a_token_dialect_localization_file() {
    let mut store = LocaStore::new();
    let records =
        CwFile::read_localization_tokens(Path::new("tests/files/tokens.yml"), &mut store).unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(store.resolve("greeting_hello").unwrap(), "Hello");
    assert_eq!(store.resolve("greeting_bye").unwrap(), "Farewell, friend");
}

#[test]
fn unclosed_brace_is_reported_not_fatal() {
    let _guard = TEST_MUTEX.lock().unwrap();
    let file = "never_closed_test";
    let mut arena = NodeArena::new();
    let roots = parse_script("a = { b = c", file, &mut arena).unwrap();
    assert_eq!(arena.describe(roots[0]), "a = { b = c }");

    let reports = reports_for(file);
    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0].key, ErrorKey::ParseError);
    assert_eq!(reports[0].severity, Severity::Warning);
    assert_eq!(reports[0].msg, "opening { was never closed");
    // the report points at the { that was left open
    assert_eq!(reports[0].primary().loc.line, 1);
    assert_eq!(reports[0].primary().loc.column, 5);
}

#[test]
fn misplaced_brace_gets_a_weak_warning() {
    let _guard = TEST_MUTEX.lock().unwrap();
    let file = "brace_column_test";
    let mut arena = NodeArena::new();
    parse_script("a = {\nb = {\n}\n}\n", file, &mut arena).unwrap();

    let reports = reports_for(file);
    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0].key, ErrorKey::BracePlacement);
    assert_eq!(reports[0].confidence, Confidence::Weak);
    assert_eq!(reports[0].primary().loc.line, 3);
}

#[test]
fn emitted_reports_are_readable() {
    let _guard = TEST_MUTEX.lock().unwrap();
    let file = "emit_test";
    disable_ansi_colors();

    let text_out = std::env::temp_dir().join("cwtree_emit_test.txt");
    set_output_file(&text_out).unwrap();
    let mut arena = NodeArena::new();
    parse_script("a = { b = c", file, &mut arena).unwrap();
    emit_reports(false);
    let written = read_to_string(&text_out).unwrap();
    assert!(written.contains("warning(parse-error): opening { was never closed"));
    assert!(written.contains("--> emit_test: line 1 col 5"));

    let json_out = std::env::temp_dir().join("cwtree_emit_test.json");
    set_output_file(&json_out).unwrap();
    let mut arena = NodeArena::new();
    parse_script("d = { e = f", file, &mut arena).unwrap();
    emit_reports(true);
    let written = read_to_string(&json_out).unwrap();
    let value: serde_json::Value = serde_json::from_str(&written).unwrap();
    let reports = value.as_array().unwrap();
    assert_eq!(reports[0]["key"], "parse-error");
    assert_eq!(reports[0]["severity"], "warning");
    assert_eq!(reports[0]["locations"][0]["linenr"], 1);
}

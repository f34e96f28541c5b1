use std::path::Path;
use std::process::{Command, Output};

use tempfile::TempDir;

fn scriptref(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_scriptref"))
        .current_dir(dir)
        .env_remove("RUST_LOG")
        .args(args)
        .output()
        .unwrap()
}

fn read_jsonl(path: &Path) -> Vec<serde_json::Value> {
    std::fs::read_to_string(path)
        .unwrap()
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect()
}

#[test]
fn tsk_end_to_end() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("tsk.csv"),
        "1\t1\t1\t_\t\"In the beginning\"\tge 1:1;ex 20:1-3\n\
         19\t51\t1\t_\thave mercy\tps 51:1,3-5;2sa 12:1-14;isa 1:1-2:3\n\
         66\t22\t21\t_\t\"The \"\"grace\"\"\"\t\n",
    )
    .unwrap();

    let out = scriptref(dir.path(), &["tsk", "tsk.csv"]);
    assert!(out.status.success(), "tsk failed: {}", String::from_utf8_lossy(&out.stderr));

    let written = std::fs::read_to_string(dir.path().join("tsk_xrefs.jsonl")).unwrap();
    let first = written.lines().next().unwrap();
    assert_eq!(
        first,
        r#"{"type":"directed","source":"Gen.1.1","source_text":"In the beginning","targets":["Gen.1.1","Exod.20.1-Exod.20.3"]}"#
    );

    let records = read_jsonl(&dir.path().join("tsk_xrefs.jsonl"));
    assert_eq!(records.len(), 3);
    assert_eq!(records[1]["source"], "Ps.51.1");
    assert_eq!(
        records[1]["targets"],
        serde_json::json!(["Ps.51.1", "Ps.51.3-Ps.51.5", "2Sam.12.1-2Sam.12.14", "Isa.1.1-Isa.2.3"])
    );
    assert_eq!(records[2]["source"], "Rev.22.21");
    assert_eq!(records[2]["source_text"], "The \"grace\"");
    assert_eq!(records[2]["targets"], serde_json::json!([]));
    assert!(written.contains(r#"The \"grace\""#));
}

#[test]
fn tsk_aborts_on_unknown_book_without_output() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("tsk.csv"), "1\t1\t1\t_\ttext\tge 1:1\n1\t1\t2\t_\ttext\txx 1:1\n").unwrap();

    let out = scriptref(dir.path(), &["tsk", "tsk.csv"]);
    assert_eq!(out.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("Unknown Book"), "stderr: {stderr}");
    assert!(stderr.contains("Input line 2."), "stderr: {stderr}");
    assert!(!dir.path().join("tsk_xrefs.jsonl").exists());
}

#[test]
fn tsk_skip_policy_keeps_every_row() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("tsk.tsv"), "1\t1\t1\t_\ttext\tge 1:1;xx 1:1\n1\t1\t2\t_\ttext\tge 1:x\n").unwrap();

    let out = scriptref(dir.path(), &["tsk", "--on-malformed", "skip", "tsk.tsv"]);
    assert!(out.status.success(), "tsk failed: {}", String::from_utf8_lossy(&out.stderr));

    let records = read_jsonl(&dir.path().join("tsk_xrefs.jsonl"));
    assert_eq!(records.len(), 2);
    assert_eq!(records[0]["targets"], serde_json::json!(["Gen.1.1"]));
    assert_eq!(records[1]["targets"], serde_json::json!([]));
}

#[test]
fn skip_policy_from_config_file() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join(".scriptref.toml"),
        "on_malformed = \"skip\"\n\n[tsk]\noutput = \"graph.jsonl\"\n",
    )
    .unwrap();
    std::fs::write(dir.path().join("tsk.csv"), "1\t1\t1\t_\ttext\tzz 9:9;ex 20\n").unwrap();

    let out = scriptref(dir.path(), &["tsk", "tsk.csv"]);
    assert!(out.status.success(), "tsk failed: {}", String::from_utf8_lossy(&out.stderr));

    let records = read_jsonl(&dir.path().join("graph.jsonl"));
    assert_eq!(records[0]["targets"], serde_json::json!(["Exod.20"]));
}

#[test]
fn xref_filters_votes_and_groups_in_first_seen_order() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("votes.csv"),
        "From Verse,To Verse,Votes\nA,B,1\nZ,Y,2\nA,C,0\nA,D,5\nZ,Y,1\n",
    )
    .unwrap();

    let out = scriptref(dir.path(), &["xref", "votes.csv"]);
    assert!(out.status.success(), "xref failed: {}", String::from_utf8_lossy(&out.stderr));

    let written = std::fs::read_to_string(dir.path().join("out.jsonl")).unwrap();
    assert_eq!(
        written,
        "{\"type\":\"directed\",\"source\":\"A\",\"targets\":[\"B\",\"D\"]}\n\
         {\"type\":\"directed\",\"source\":\"Z\",\"targets\":[\"Y\",\"Y\"]}\n"
    );
}

#[test]
fn wrong_extension_is_a_usage_error() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("votes.json"), "[]").unwrap();

    let out = scriptref(dir.path(), &["xref", "votes.json"]);
    assert_eq!(out.status.code(), Some(2));
    assert!(!dir.path().join("out.jsonl").exists());
}

#[test]
fn missing_input_is_a_usage_error() {
    let dir = TempDir::new().unwrap();
    let out = scriptref(dir.path(), &["tsk", "absent.csv"]);
    assert_eq!(out.status.code(), Some(2));
}

#[test]
fn extra_positional_argument_is_rejected() {
    let dir = TempDir::new().unwrap();
    let out = scriptref(dir.path(), &["xref", "a.csv", "b.csv"]);
    assert_eq!(out.status.code(), Some(2));
}

#[test]
fn strongs_extracts_matching_verses() {
    let dir = TempDir::new().unwrap();
    let db = rusqlite::Connection::open(dir.path().join("av1769s.bib")).unwrap();
    db.execute_batch(
        "CREATE TABLE bible (id INTEGER, ref TEXT, text TEXT);
         INSERT INTO bible VALUES (1, 'Gen 1:1', 'In the beginning[H7225] God[H430] created[H1254][(H8804)] the heaven[H8064] and[H853] the earth[H776].');
         INSERT INTO bible VALUES (2, 'Gen 1:2', 'And the earth[H776] was[H1961][(H8804)] without form[H8414]');
         INSERT INTO bible VALUES (3, 'Ps 82:1', 'God[H430] standeth[H5324][(H8737)] in the congregation[H5712]');",
    )
    .unwrap();
    drop(db);
    std::fs::write(
        dir.path().join("strongs.json"),
        r#"{"H430": {"original": "elohim", "transliteration": "ʼĕlôhîym", "definition": "God"}}"#,
    )
    .unwrap();

    let out = scriptref(dir.path(), &["strongs", "H430,X9", "-o", "csv"]);
    assert!(out.status.success(), "strongs failed: {}", String::from_utf8_lossy(&out.stderr));
    assert!(String::from_utf8_lossy(&out.stdout).contains("Total entries: 2"));

    let written = std::fs::read_to_string(dir.path().join("csv/H430.csv")).unwrap();
    let lines: Vec<&str> = written.lines().collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0], "Idx,Book,Ref.,KJB Verse,KJB Word,Original,Transliteration,Definition");
    assert_eq!(
        lines[1],
        r#""1","Gen","Gen 1:1","In the beginning **God[H430]** created the heaven and the earth","God","H430 elohim","ʼĕlôhîym","God""#
    );
    assert!(lines[2].starts_with(r#""2","Ps","Ps 82:1","**God[H430]** standeth in the congregation""#));
}

#[test]
fn strongs_without_valid_numbers_is_a_usage_error() {
    let dir = TempDir::new().unwrap();
    let out = scriptref(dir.path(), &["strongs", "x25"]);
    assert_eq!(out.status.code(), Some(2));
}

#[test]
fn strongs_missing_database_fails() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("strongs.json"), "{}").unwrap();
    let out = scriptref(dir.path(), &["strongs", "H1"]);
    assert_eq!(out.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&out.stderr).contains("Data Source Not Found"));
}

#[test]
fn strongs_store_without_verse_table_fails() {
    let dir = TempDir::new().unwrap();
    let db = rusqlite::Connection::open(dir.path().join("av1769s.bib")).unwrap();
    db.execute_batch("CREATE TABLE words (id INTEGER, word TEXT);").unwrap();
    drop(db);
    std::fs::write(dir.path().join("strongs.json"), "{}").unwrap();

    let out = scriptref(dir.path(), &["strongs", "H1"]);
    assert_eq!(out.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("Data Source Not Found"));
    assert!(stderr.contains("has no `bible` table"));
    assert!(!dir.path().join("H1.csv").exists());
}

#[test]
fn malformed_policy_flag_only_applies_to_tsk() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("votes.csv"), "From Verse,To Verse,Votes\nGen.1.1,John.1.1,3\n").unwrap();

    let out = scriptref(dir.path(), &["xref", "--on-malformed", "skip", "votes.csv"]);
    assert_eq!(out.status.code(), Some(2));
    assert!(!dir.path().join("out.jsonl").exists());

    let out = scriptref(dir.path(), &["--on-malformed", "skip", "tsk", "votes.csv"]);
    assert_eq!(out.status.code(), Some(2));
}

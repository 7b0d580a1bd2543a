// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn writes_queryable_json() {
    let dir = tempfile::tempdir().unwrap();
    let metadata = RigMetadata {
        name: "t".to_string(),
        trigger: Some(TriggerRecord::new("logs", "matched", "2026-01-01T00:00:00Z")),
        evidence: vec![],
        actions: vec![ActionStatus { name: "noop".into(), state: "done".into() }],
        generated_at: "2026-01-01T00:00:01Z".to_string(),
    };
    write(dir.path(), &metadata).unwrap();

    let content = std::fs::read_to_string(dir.path().join(METADATA_FILE)).unwrap();
    let value: serde_json::Value = serde_json::from_str(&content).unwrap();
    assert_eq!(value["name"], "t");
    assert_eq!(value["trigger"]["monitor"], "logs");
    assert_eq!(value["actions"][0]["state"], "done");
}

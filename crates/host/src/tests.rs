use std::io::Write;

use pretty_assertions::assert_eq;
use serde_json::json;
use tempfile::NamedTempFile;

use super::*;

fn file_with(contents: &str) -> NamedTempFile {
	let mut file = NamedTempFile::new().unwrap();
	file.write_all(contents.as_bytes()).unwrap();
	file
}

fn args(seed: &NamedTempFile, events: &NamedTempFile) -> Args {
	Args {
		config: None,
		seed: Some(seed.path().to_path_buf()),
		events: Some(events.path().to_path_buf()),
		dry_run: true,
		dump: false,
		verbose: false,
	}
}

fn doc_at(store: &MemoryStore, path: &str) -> serde_json::Value {
	store.snapshot().get(path).cloned().unwrap_or(serde_json::Value::Null)
}

#[tokio::test]
async fn dry_run_drains_queue_and_ignores_noise() {
	let seed = file_with(
		&json!({
			"partnerships/p1": {"user1Id": "alice", "user2Id": "bob"},
			"users/bob": {"fcmToken": "tok123"},
			"notificationQueue/q1": {"targetToken": "tok123", "title": "Hi", "body": "There"}
		})
		.to_string(),
	);
	let events = file_with(concat!(
		r#"{"kind": "update", "path": "partnerships/p1/stories/s1", "before": {"text": ""}, "after": {"text": "done", "authorId": "alice"}}"#,
		"\n",
		"# comment\n",
		"not json\n",
		"\n",
		r#"{"kind": "create", "path": "notificationQueue/q1", "value": {}}"#,
		"\n",
	));
	let config = HostConfig {
		max_in_flight: 1,
		..HostConfig::default()
	};

	let (store, report) = run(&args(&seed, &events), &config).await.unwrap();
	assert_eq!(report.completed, 2);
	assert_eq!(report.panicked, 0);

	let record = doc_at(&store, "notificationQueue/q1");
	assert_eq!(record["processed"], json!(true));
	assert!(record["processedAt"].is_string());
	assert_eq!(doc_at(&store, "users/bob"), json!({"fcmToken": "tok123"}));
}

#[tokio::test]
async fn invalid_seed_is_reported_with_path() {
	let seed = file_with("[1, 2, 3]");
	let events = file_with("");
	let err = run(&args(&seed, &events), &HostConfig::default()).await.unwrap_err();
	assert!(matches!(err, HostError::SeedJson { .. }));

	let seed = file_with(r#"{"users": {}}"#);
	let err = run(&args(&seed, &events), &HostConfig::default()).await.unwrap_err();
	assert!(matches!(err, HostError::Seed(_)));
}

#[tokio::test]
async fn live_mode_requires_fcm_credentials() {
	let seed = file_with("{}");
	let events = file_with("");
	let mut args = args(&seed, &events);
	args.dry_run = false;
	let err = run(&args, &HostConfig::default()).await.unwrap_err();
	assert!(matches!(err, HostError::Fcm(_)));
}

#[test]
fn cli_parses_flags() {
	let args = Args::try_parse_from(["storybell-host", "--config", "host.toml", "--dry-run", "--dump", "-v"]).unwrap();
	assert_eq!(args.config, Some(PathBuf::from("host.toml")));
	assert!(args.dry_run && args.dump && args.verbose);
	assert!(args.events.is_none());
}

#![cfg(feature = "test")]

// std
use std::fs;
// self
use signin_broker::{
	_preludet::*,
	env::MapEnv,
	source::{ConfigSource, DirSource},
	store::ConfigStore,
};

fn write(dir: &tempfile::TempDir, name: &str, contents: &str) {
	fs::write(dir.path().join(name), contents).expect("Fixture file should be writable.");
}

#[test]
fn directory_documents_load_with_declared_default() {
	let dir = tempfile::tempdir().expect("Temporary directory should be created.");

	write(&dir, "signin.en.json", r#"{ "title": "Sign in" }"#);
	write(&dir, "signin.zh_CN.json", r#"{ "title": "$ENV.ZH_TITLE" }"#);
	write(&dir, "default", "zh-CN\n");
	write(&dir, "notes.txt", "ignored");

	let store = ConfigStore::new();
	let summary = store
		.load(&DirSource::new(dir.path()), &test_env([("ZH_TITLE", "登录")]))
		.expect("Directory source should load.");

	assert_eq!(summary.locales, vec!["en", "zh-cn"]);
	assert_eq!(summary.default_locale.as_deref(), Some("zh-cn"));
	assert_eq!(store.full_config("").map(|c| c.title.clone()).as_deref(), Some("登录"));
}

#[test]
fn malformed_file_reports_origin_and_path() {
	let dir = tempfile::tempdir().expect("Temporary directory should be created.");

	write(&dir, "en.json", r#"{ "title": "Sign in", "third_party": { "providers": [{ "id": 7 }] } }"#);

	let raw = DirSource::new(dir.path()).read().expect("Valid JSON should read.");
	let store = ConfigStore::new();
	let err = store
		.load(&DirSource::new(dir.path()), &MapEnv::new())
		.expect_err("A numeric provider ID should be rejected.");

	assert_eq!(raw.documents.len(), 1);

	let Error::Load(LoadError::Parse { origin, source }) = &err else {
		panic!("Expected a parse error, got {err:?}.");
	};

	assert!(origin.ends_with("en.json"), "Error should name the file: {origin}");
	assert_eq!(source.path().to_string(), "third_party.providers[0].id");
	assert_eq!(store.generation().number, 0);
}

#[test]
fn invalid_json_fails_the_read() {
	let dir = tempfile::tempdir().expect("Temporary directory should be created.");

	write(&dir, "en.json", "{ not json");

	assert!(matches!(DirSource::new(dir.path()).read(), Err(LoadError::Parse { .. })));
}

mod test_utilities;

use assert_fs::prelude::*;
use predicates::str;
use rstest::rstest;
use test_utilities::{BINARY_NAME, Fixture, atlas_cache_cmd};

#[test]
fn command() {
	atlas_cache_cmd()
		.assert()
		.failure()
		.code(2)
		.stdout(str::is_empty())
		.stderr(str::contains(format!("Usage: {BINARY_NAME} [OPTIONS] <COMMAND>")));
}

#[rstest]
#[case("get", "[OPTIONS] <DATASET> <TILE>")]
#[case("invalidate", "[OPTIONS] <DATASET> <TILE>")]
#[case("resolve", "[OPTIONS] <DATASET> <TILE>")]
fn subcommand(#[case] sub_command: &str, #[case] usage: &str) {
	atlas_cache_cmd()
		.arg(sub_command)
		.assert()
		.failure()
		.code(2)
		.stdout(str::is_empty())
		.stderr(str::contains(format!("Usage: {BINARY_NAME} {sub_command} {usage}")));
}

#[test]
fn get_writes_to_stdout() {
	let fixture = Fixture::new();
	fixture
		.cmd(&["get", "AAA", "1/1/1"])
		.assert()
		.success()
		.stdout("X");
	fixture
		.cmd(&["get", "AAA", "2-2-2"])
		.assert()
		.success()
		.stdout("Y");
}

#[test]
fn get_reports_absent_tiles() {
	let fixture = Fixture::new();
	fixture
		.cmd(&["get", "AAA", "5/5/5"])
		.assert()
		.failure()
		.code(1)
		.stdout(str::is_empty())
		.stderr(str::contains("not found"));
}

#[test]
fn cached_copy_is_served_until_invalidated() {
	let fixture = Fixture::new();
	fixture.cmd(&["get", "AAA", "1/1/1"]).assert().success().stdout("X");

	fixture.remote.child("AAA/1/AAA_1-1-1.atlas").write_binary(b"Z").unwrap();
	fixture.cmd(&["get", "AAA", "1/1/1"]).assert().success().stdout("X");

	fixture.cmd(&["invalidate", "AAA", "1/1/1"]).assert().success();
	fixture.cmd(&["get", "AAA", "1/1/1"]).assert().success().stdout("Z");
}

#[test]
fn clear_reports_removed_entries() {
	let fixture = Fixture::new();
	fixture.cmd(&["get", "AAA", "1/1/1"]).assert().success();
	fixture.cmd(&["get", "AAA", "2/2/2"]).assert().success();

	fixture
		.cmd(&["clear"])
		.assert()
		.success()
		.stdout(str::starts_with("removed 2 entries"))
		.stdout(str::contains("(counted before clearing)"));
	fixture
		.cmd(&["clear"])
		.assert()
		.success()
		.stdout(str::starts_with("removed 0 entries"));
}

#[test]
fn namespaces_do_not_share_entries() {
	let fixture = Fixture::new();
	fixture
		.cmd(&["get", "AAA", "1/1/1", "--namespace", "one"])
		.assert()
		.success()
		.stdout("X");
	fixture.remote.child("AAA/1/AAA_1-1-1.atlas").write_binary(b"Z").unwrap();
	fixture
		.cmd(&["get", "AAA", "1/1/1", "--namespace", "two"])
		.assert()
		.success()
		.stdout("Z");
	fixture
		.cmd(&["get", "AAA", "1/1/1", "--namespace", "one"])
		.assert()
		.success()
		.stdout("X");
}

#[test]
fn resolve_prints_path_and_id() {
	atlas_cache_cmd()
		.args(["resolve", "AAA", "1/1/1", "--scheme", "zz-xx-subfolders"])
		.assert()
		.success()
		.stdout(str::contains("path: AAA/1/1/AAA_1-1-1.atlas"))
		.stdout(str::is_match("cache id: [0-9a-f]{64}\n").unwrap());
}

#[test]
fn config_file_and_overrides() {
	let fixture = Fixture::new();
	let config = fixture.local.child("atlas_cache.yaml");
	config
		.write_str(&format!(
			"backing_uri: {}\nnamespace: from-file\ncache:\n  cache_dir: {}\n",
			fixture.remote.path().display(),
			fixture.local.child("cache").path().display()
		))
		.unwrap();

	atlas_cache_cmd()
		.args(["get", "AAA", "1/1/1", "-c", config.path().to_str().unwrap()])
		.assert()
		.success()
		.stdout("X");

	atlas_cache_cmd()
		.args(["resolve", "AAA", "1/1/1", "-c", config.path().to_str().unwrap(), "--scheme", "flat"])
		.assert()
		.success()
		.stdout(str::contains("path: AAA/AAA_1-1-1.atlas"));
}

#[test]
fn unsupported_uri_is_an_error() {
	let fixture = Fixture::new();
	atlas_cache_cmd()
		.args(["get", "AAA", "1/1/1", "--uri", "s3://bucket/atlas"])
		.args(["--cache-dir", fixture.local.path().to_str().unwrap()])
		.assert()
		.failure()
		.code(1)
		.stderr(str::contains("invalid cache configuration"));
}

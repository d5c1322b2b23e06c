#![allow(unused)]

use assert_cmd::{Command, cargo};
use assert_fs::{TempDir, prelude::*};

#[cfg(windows)]
pub const BINARY_NAME: &str = "atlas_cache.exe";
#[cfg(not(windows))]
pub const BINARY_NAME: &str = "atlas_cache";

/// Helper to create a Command for the atlas_cache binary.
pub fn atlas_cache_cmd() -> Command {
	Command::new(cargo::cargo_bin!())
}

/// A backing directory holding the `AAA` reference shards and an empty cache directory.
pub struct Fixture {
	pub remote: TempDir,
	pub local: TempDir,
}

impl Fixture {
	pub fn new() -> Self {
		let remote = TempDir::new().unwrap();
		remote.child("AAA/1/AAA_1-1-1.atlas").write_binary(b"X").unwrap();
		remote.child("AAA/2/AAA_2-2-2.atlas").write_binary(b"Y").unwrap();
		Fixture {
			remote,
			local: TempDir::new().unwrap(),
		}
	}

	/// Command preconfigured with this fixture's backing URI and cache directory.
	pub fn cmd(&self, args: &[&str]) -> Command {
		let mut cmd = atlas_cache_cmd();
		cmd.args(args)
			.arg("--uri")
			.arg(self.remote.path())
			.arg("--cache-dir")
			.arg(self.local.path());
		cmd
	}
}

//! Path schemes for atlas shards addressed by slippy-map tiles.
//!
//! Shards of one dataset live below a folder named after the dataset. The file name
//! repeats the dataset id and the tile as `{dataset}_{z}-{x}-{y}.atlas`. The presets only
//! differ in how many sub folders they put in between:
//!
//! | preset | layout |
//! |---|---|
//! | [`ZzSubfolder`](SlippyTileSchemeType::ZzSubfolder) | `{dataset}/{z}/{dataset}_{z}-{x}-{y}.atlas` |
//! | [`ZzXxSubfolders`](SlippyTileSchemeType::ZzXxSubfolders) | `{dataset}/{z}/{x}/{dataset}_{z}-{x}-{y}.atlas` |
//! | [`Flat`](SlippyTileSchemeType::Flat) | `{dataset}/{dataset}_{z}-{x}-{y}.atlas` |
//!
//! Any other layout can be described with a template:
//!
//! ```rust
//! use atlas_cache_core::{TileCoord, scheme::{PathScheme, SlippyTileScheme}};
//!
//! let scheme = SlippyTileScheme::from_template("{dataset}/{z}/{x}/{y}.pbf").unwrap();
//! let tile = TileCoord::new(3, 4, 5).unwrap();
//! assert_eq!(scheme.resolve("DEU", &tile).unwrap(), "DEU/3/4/5.pbf");
//! ```

use super::{PathScheme, validate_dataset_id, validate_remote_path};
use crate::TileCoord;
use anyhow::{Error, Result, bail, ensure};
use regex::Regex;
use std::{fmt::Display, str::FromStr, sync::LazyLock};

/// Named layouts for atlas shard files.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SlippyTileSchemeType {
	ZzSubfolder,
	ZzXxSubfolders,
	Flat,
}

impl SlippyTileSchemeType {
	pub fn template(&self) -> &'static str {
		match self {
			SlippyTileSchemeType::ZzSubfolder => "{dataset}/{z}/{dataset}_{z}-{x}-{y}.atlas",
			SlippyTileSchemeType::ZzXxSubfolders => "{dataset}/{z}/{x}/{dataset}_{z}-{x}-{y}.atlas",
			SlippyTileSchemeType::Flat => "{dataset}/{dataset}_{z}-{x}-{y}.atlas",
		}
	}

	pub fn name(&self) -> &'static str {
		match self {
			SlippyTileSchemeType::ZzSubfolder => "zz-subfolder",
			SlippyTileSchemeType::ZzXxSubfolders => "zz-xx-subfolders",
			SlippyTileSchemeType::Flat => "flat",
		}
	}

	pub fn all() -> [SlippyTileSchemeType; 3] {
		[
			SlippyTileSchemeType::ZzSubfolder,
			SlippyTileSchemeType::ZzXxSubfolders,
			SlippyTileSchemeType::Flat,
		]
	}
}

#[derive(Clone, Debug, PartialEq, Eq)]
enum Part {
	Literal(String),
	Dataset,
	Level,
	X,
	Y,
}

/// A [`PathScheme`] for [`TileCoord`] keys driven by a path template.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SlippyTileScheme {
	template: String,
	parts: Vec<Part>,
}

static RE_PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\{([^{}]*)\}").unwrap());

impl SlippyTileScheme {
	pub fn new(scheme_type: SlippyTileSchemeType) -> Self {
		// preset templates are known to be valid
		Self::parse(scheme_type.template()).unwrap_or_else(|e| unreachable!("invalid preset template: {e}"))
	}

	/// Builds a scheme from a template using `{dataset}`, `{z}`, `{x}` and `{y}`.
	///
	/// Every placeholder has to appear at least once, otherwise two different keys could
	/// end up at the same remote path.
	pub fn from_template(template: &str) -> Result<Self> {
		Self::parse(template)
	}

	pub fn template(&self) -> &str {
		&self.template
	}

	fn parse(template: &str) -> Result<Self> {
		ensure!(!template.starts_with('/'), "template '{template}' must be relative");

		let mut parts = Vec::new();
		let mut last = 0;
		for caps in RE_PLACEHOLDER.captures_iter(template) {
			let Some(whole) = caps.get(0) else { continue };
			push_literal(&mut parts, template, &template[last..whole.start()])?;
			parts.push(match &caps[1] {
				"dataset" => Part::Dataset,
				"z" => Part::Level,
				"x" => Part::X,
				"y" => Part::Y,
				other => bail!("unknown placeholder '{{{other}}}' in template '{template}'"),
			});
			last = whole.end();
		}
		push_literal(&mut parts, template, &template[last..])?;

		for (part, name) in [
			(Part::Dataset, "{dataset}"),
			(Part::Level, "{z}"),
			(Part::X, "{x}"),
			(Part::Y, "{y}"),
		] {
			ensure!(parts.contains(&part), "template '{template}' must contain {name}");
		}

		Ok(Self {
			template: template.to_string(),
			parts,
		})
	}
}

fn push_literal(parts: &mut Vec<Part>, template: &str, literal: &str) -> Result<()> {
	ensure!(
		!literal.contains(['{', '}']),
		"unbalanced brace in template '{template}'"
	);
	if !literal.is_empty() {
		parts.push(Part::Literal(literal.to_string()));
	}
	Ok(())
}

impl PathScheme<TileCoord> for SlippyTileScheme {
	fn resolve(&self, dataset_id: &str, tile: &TileCoord) -> Result<String> {
		validate_dataset_id(dataset_id)?;
		let mut path = String::new();
		for part in &self.parts {
			match part {
				Part::Literal(text) => path.push_str(text),
				Part::Dataset => path.push_str(dataset_id),
				Part::Level => path.push_str(&tile.level.to_string()),
				Part::X => path.push_str(&tile.x.to_string()),
				Part::Y => path.push_str(&tile.y.to_string()),
			}
		}
		validate_remote_path(&path)?;
		Ok(path)
	}
}

impl FromStr for SlippyTileScheme {
	type Err = Error;

	/// Accepts a preset name (`zz-subfolder`, `zz-xx-subfolders`, `flat`) or a template.
	fn from_str(s: &str) -> Result<Self> {
		if s.contains('{') {
			return Self::from_template(s);
		}
		let name = s.trim().to_ascii_lowercase().replace('_', "-");
		match SlippyTileSchemeType::all().into_iter().find(|t| t.name() == name) {
			Some(scheme_type) => Ok(Self::new(scheme_type)),
			None => bail!(
				"unknown path scheme '{s}', use one of {} or a template like '{{dataset}}/{{z}}/{{x}}/{{y}}.atlas'",
				SlippyTileSchemeType::all().map(|t| t.name()).join(", ")
			),
		}
	}
}

impl Display for SlippyTileScheme {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(&self.template)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	fn tile(level: u8, x: u32, y: u32) -> TileCoord {
		TileCoord::new(level, x, y).unwrap()
	}

	#[rstest]
	#[case(SlippyTileSchemeType::ZzSubfolder, (1, 1, 1), "AAA/1/AAA_1-1-1.atlas")]
	#[case(SlippyTileSchemeType::ZzSubfolder, (2, 2, 2), "AAA/2/AAA_2-2-2.atlas")]
	#[case(SlippyTileSchemeType::ZzXxSubfolders, (9, 168, 233), "AAA/9/168/AAA_9-168-233.atlas")]
	#[case(SlippyTileSchemeType::Flat, (5, 5, 5), "AAA/AAA_5-5-5.atlas")]
	fn presets(#[case] scheme_type: SlippyTileSchemeType, #[case] t: (u8, u32, u32), #[case] expected: &str) {
		let scheme = SlippyTileScheme::new(scheme_type);
		assert_eq!(scheme.resolve("AAA", &tile(t.0, t.1, t.2)).unwrap(), expected);
	}

	#[rstest]
	#[case("zz-subfolder", SlippyTileSchemeType::ZzSubfolder)]
	#[case("ZZ_SUBFOLDER", SlippyTileSchemeType::ZzSubfolder)]
	#[case("zz-xx-subfolders", SlippyTileSchemeType::ZzXxSubfolders)]
	#[case("flat", SlippyTileSchemeType::Flat)]
	fn preset_names(#[case] name: &str, #[case] expected: SlippyTileSchemeType) {
		assert_eq!(name.parse::<SlippyTileScheme>().unwrap(), SlippyTileScheme::new(expected));
	}

	#[rstest]
	#[case("{dataset}/{z}/{x}", "must contain {y}")]
	#[case("{dataset}/{z}/{x}/{y}/{w}", "unknown placeholder '{w}'")]
	#[case("{dataset}/{z}/{x}/{y}}", "unbalanced brace")]
	#[case("{dataset}/{z/{x}/{y}", "unbalanced brace")]
	#[case("/{dataset}/{z}/{x}/{y}", "must be relative")]
	fn invalid_templates(#[case] template: &str, #[case] message: &str) {
		let err = SlippyTileScheme::from_template(template).unwrap_err().to_string();
		assert!(err.contains(message), "'{err}' should contain '{message}'");
	}

	#[test]
	fn unknown_preset_lists_alternatives() {
		let err = "zz-yy".parse::<SlippyTileScheme>().unwrap_err().to_string();
		assert!(err.contains("zz-subfolder, zz-xx-subfolders, flat"), "{err}");
	}

	#[test]
	fn invalid_dataset_ids_fail() {
		let scheme = SlippyTileScheme::new(SlippyTileSchemeType::ZzSubfolder);
		assert!(scheme.resolve("", &tile(1, 1, 1)).is_err());
		assert!(scheme.resolve("../etc", &tile(1, 1, 1)).is_err());
	}

	#[test]
	fn template_literals_may_not_escape() {
		let scheme = SlippyTileScheme::from_template("../{dataset}/{z}/{x}/{y}").unwrap();
		assert!(scheme.resolve("AAA", &tile(1, 0, 0)).is_err());
	}

	#[test]
	fn adjacent_placeholders() {
		let scheme = SlippyTileScheme::from_template("{dataset}/{z}{x}-{y}{dataset}").unwrap();
		assert_eq!(scheme.resolve("AAA", &tile(9, 168, 233)).unwrap(), "AAA/9168-233AAA");
	}

	#[test]
	fn display_is_template() {
		let scheme = SlippyTileScheme::new(SlippyTileSchemeType::Flat);
		assert_eq!(scheme.to_string(), "{dataset}/{dataset}_{z}-{x}-{y}.atlas");
		assert_eq!(scheme.template(), scheme.to_string());
	}
}

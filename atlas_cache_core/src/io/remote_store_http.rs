//! Remote store reading objects over HTTP(S).
//!
//! # Overview
//!
//! [`RemoteStoreHttp`] maps a relative object path onto its root URL, answers `exists`
//! with a `HEAD` request and `read` with a `GET` request. It does not retry: a failed
//! request is reported to the caller as it is.
//!
//! The following keys of the [`StoreConfig`] are understood:
//!
//! | key | meaning |
//! |---|---|
//! | `http.timeout_seconds` | total request timeout |
//! | `http.user_agent` | `User-Agent` header |
//! | `http.header.<Name>` | additional request header `<Name>` |
//!
//! Other keys are ignored.
//!
//! # Examples
//!
//! ```rust
//! use atlas_cache_core::io::{RemoteStoreHttp, StoreConfig};
//! use reqwest::Url;
//!
//! let mut config = StoreConfig::new();
//! config.insert("http.timeout_seconds".into(), "30".into());
//! let store = RemoteStoreHttp::from_url(Url::parse("https://example.org/atlas").unwrap(), &config).unwrap();
//! assert_eq!(
//!     store.object_url("AAA/1/AAA_1-1-1.atlas").unwrap().as_str(),
//!     "https://example.org/atlas/AAA/1/AAA_1-1-1.atlas"
//! );
//! ```

use super::{RemoteStore, StoreConfig};
use crate::Blob;
use anyhow::{Context, Result, bail, ensure};
use async_trait::async_trait;
use reqwest::{
	Client, StatusCode, Url,
	header::{HeaderMap, HeaderName, HeaderValue},
};
use std::time::Duration;

const KEY_TIMEOUT: &str = "http.timeout_seconds";
const KEY_USER_AGENT: &str = "http.user_agent";
const KEY_HEADER_PREFIX: &str = "http.header.";

/// A [`RemoteStore`] backed by an HTTP(S) server.
#[derive(Debug)]
pub struct RemoteStoreHttp {
	client: Client,
	name: String,
	root: Url,
}

impl RemoteStoreHttp {
	/// Creates a store rooted at `url`, configured from `config`.
	pub fn from_url(url: Url, config: &StoreConfig) -> Result<RemoteStoreHttp> {
		match url.scheme() {
			"http" | "https" => (),
			other => bail!("unsupported URL scheme '{other}' in '{url}', expected 'http' or 'https'"),
		}

		let mut root = url;
		if !root.path().ends_with('/') {
			let path = format!("{}/", root.path());
			root.set_path(&path);
		}

		let client = build_client(config).with_context(|| format!("configuring HTTP client for '{root}'"))?;

		Ok(RemoteStoreHttp {
			client,
			name: root.to_string(),
			root,
		})
	}

	/// Absolute URL of the object at the relative `path`.
	pub fn object_url(&self, path: &str) -> Result<Url> {
		ensure!(!path.starts_with('/'), "path '{path}' must be relative");
		ensure!(
			path.split('/').all(|segment| !segment.is_empty() && segment != "." && segment != ".."),
			"path '{path}' must not contain empty, '.' or '..' segments"
		);
		Ok(self.root.join(path)?)
	}
}

fn build_client(config: &StoreConfig) -> Result<Client> {
	let mut builder = Client::builder().tcp_keepalive(Duration::from_secs(600));
	let mut headers = HeaderMap::new();

	for (key, value) in config {
		if key == KEY_TIMEOUT {
			let seconds: u64 = value
				.parse()
				.with_context(|| format!("'{KEY_TIMEOUT}' must be a number of seconds, got '{value}'"))?;
			builder = builder.timeout(Duration::from_secs(seconds));
		} else if key == KEY_USER_AGENT {
			builder = builder.user_agent(value.clone());
		} else if let Some(name) = key.strip_prefix(KEY_HEADER_PREFIX) {
			let name = HeaderName::from_bytes(name.as_bytes()).with_context(|| format!("invalid header name in '{key}'"))?;
			let value = HeaderValue::from_str(value).with_context(|| format!("invalid header value for '{key}'"))?;
			headers.insert(name, value);
		} else {
			log::debug!("HTTP remote store ignores config key '{key}'");
		}
	}

	Ok(builder.default_headers(headers).build()?)
}

#[async_trait]
impl RemoteStore for RemoteStoreHttp {
	async fn exists(&self, path: &str) -> Result<bool> {
		let url = self.object_url(path)?;
		let response = self
			.client
			.head(url.clone())
			.send()
			.await
			.with_context(|| format!("HEAD '{url}' failed"))?;

		match response.status() {
			status if status.is_success() => Ok(true),
			StatusCode::NOT_FOUND | StatusCode::GONE => Ok(false),
			status => bail!("HEAD '{url}' returned unexpected status {status}"),
		}
	}

	async fn read(&self, path: &str) -> Result<Blob> {
		let url = self.object_url(path)?;
		let response = self
			.client
			.get(url.clone())
			.send()
			.await
			.with_context(|| format!("GET '{url}' failed"))?;

		if !response.status().is_success() {
			bail!("GET '{url}' returned status {}", response.status());
		}

		let bytes = response
			.bytes()
			.await
			.with_context(|| format!("reading response body of '{url}' failed"))?;
		Ok(Blob::from(&*bytes))
	}

	fn get_name(&self) -> &str {
		&self.name
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::collections::HashMap;
	use tokio::{
		io::{AsyncReadExt, AsyncWriteExt},
		net::TcpListener,
	};

	/// Serves `files` over plain HTTP/1.1 on a random local port until the test ends.
	async fn serve(files: HashMap<&'static str, &'static [u8]>) -> Url {
		let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
		let addr = listener.local_addr().unwrap();
		tokio::spawn(async move {
			loop {
				let Ok((mut socket, _)) = listener.accept().await else {
					return;
				};
				let files = files.clone();
				tokio::spawn(async move {
					let mut buf = vec![0u8; 4096];
					let n = socket.read(&mut buf).await.unwrap_or(0);
					let request = String::from_utf8_lossy(&buf[..n]).to_string();
					let mut parts = request.split_whitespace();
					let method = parts.next().unwrap_or_default().to_string();
					let path = parts.next().unwrap_or_default().to_string();

					let response: Vec<u8> = if path.starts_with("/denied/") {
						b"HTTP/1.1 403 Forbidden\r\ncontent-length: 0\r\nconnection: close\r\n\r\n".to_vec()
					} else if let Some(body) = files.get(path.as_str()) {
						let mut r =
							format!("HTTP/1.1 200 OK\r\ncontent-length: {}\r\nconnection: close\r\n\r\n", body.len()).into_bytes();
						if method == "GET" {
							r.extend_from_slice(body);
						}
						r
					} else {
						b"HTTP/1.1 404 Not Found\r\ncontent-length: 0\r\nconnection: close\r\n\r\n".to_vec()
					};
					socket.write_all(&response).await.ok();
					socket.shutdown().await.ok();
				});
			}
		});
		Url::parse(&format!("http://{addr}/atlas")).unwrap()
	}

	#[tokio::test]
	async fn exists_and_read_over_http() -> Result<()> {
		let root = serve(HashMap::from([("/atlas/AAA/1/AAA_1-1-1.atlas", &b"shard one"[..])])).await;
		let store = RemoteStoreHttp::from_url(root, &StoreConfig::new())?;

		assert!(store.exists("AAA/1/AAA_1-1-1.atlas").await?);
		assert!(!store.exists("AAA/5/AAA_5-5-5.atlas").await?);
		assert_eq!(store.read("AAA/1/AAA_1-1-1.atlas").await?.as_slice(), b"shard one");
		assert!(store.read("AAA/5/AAA_5-5-5.atlas").await.is_err());
		Ok(())
	}

	#[tokio::test]
	async fn unexpected_status_is_an_error_not_absence() -> Result<()> {
		let root = serve(HashMap::new()).await;
		let root = root.join("/denied/")?;
		let store = RemoteStoreHttp::from_url(root, &StoreConfig::new())?;
		let err = store.exists("AAA/1/AAA_1-1-1.atlas").await.unwrap_err();
		assert!(err.to_string().contains("403"), "{err}");
		Ok(())
	}

	#[test]
	fn object_urls() -> Result<()> {
		let store = RemoteStoreHttp::from_url(Url::parse("https://example.org/data")?, &StoreConfig::new())?;
		assert_eq!(store.get_name(), "https://example.org/data/");
		assert_eq!(
			store.object_url("AAA/2/AAA_2-2-2.atlas")?.as_str(),
			"https://example.org/data/AAA/2/AAA_2-2-2.atlas"
		);
		assert!(store.object_url("/AAA/2/AAA_2-2-2.atlas").is_err());
		assert!(store.object_url("AAA/../x").is_err());
		assert!(store.object_url("AAA//x").is_err());
		Ok(())
	}

	#[test]
	fn config_is_validated() {
		let url = Url::parse("https://example.org/").unwrap();

		let config = StoreConfig::from([("http.timeout_seconds".to_string(), "soon".to_string())]);
		assert!(RemoteStoreHttp::from_url(url.clone(), &config).is_err());

		let config = StoreConfig::from([
			("http.timeout_seconds".to_string(), "5".to_string()),
			("http.user_agent".to_string(), "atlas-cache-test".to_string()),
			("http.header.Authorization".to_string(), "Bearer abc".to_string()),
			("unrelated.key".to_string(), "whatever".to_string()),
		]);
		assert!(RemoteStoreHttp::from_url(url.clone(), &config).is_ok());

		let config = StoreConfig::from([("http.header.Bad Name".to_string(), "x".to_string())]);
		assert!(RemoteStoreHttp::from_url(url, &config).is_err());
	}

	#[test]
	fn rejects_other_schemes() {
		let url = Url::parse("ftp://example.org/").unwrap();
		assert!(RemoteStoreHttp::from_url(url, &StoreConfig::new()).is_err());
	}
}

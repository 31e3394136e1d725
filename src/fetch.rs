//! Loading input tables from disk or over HTTP.

use anyhow::{Context, Result, bail};
use flate2::read::GzDecoder;
use std::io::Read;
use tracing::debug;

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];
const UTF8_BOM: [u8; 3] = [0xef, 0xbb, 0xbf];

/// Returns the raw bytes behind `source`, a file path or an `http(s)` URL.
///
/// Gzip payloads are decompressed and a leading UTF-8 BOM is dropped.
#[tracing::instrument]
pub fn load_source(source: &str) -> Result<Vec<u8>> {
    let bytes = if is_url(source) {
        fetch_bytes(source)?
    } else {
        std::fs::read(source).with_context(|| format!("failed to read {source}"))?
    };
    debug!(bytes = bytes.len(), "Source loaded");

    let bytes = if bytes.starts_with(&GZIP_MAGIC) {
        let mut decoded = Vec::new();
        GzDecoder::new(bytes.as_slice())
            .read_to_end(&mut decoded)
            .with_context(|| format!("failed to gunzip {source}"))?;
        debug!(bytes = decoded.len(), "Source decompressed");
        decoded
    } else {
        bytes
    };

    Ok(strip_bom(bytes))
}

fn is_url(source: &str) -> bool {
    source.starts_with("http://") || source.starts_with("https://")
}

fn fetch_bytes(url: &str) -> Result<Vec<u8>> {
    let resp = reqwest::blocking::get(url).with_context(|| format!("GET {url} failed"))?;
    let status = resp.status();
    if !status.is_success() {
        bail!("GET {url} returned {status}");
    }
    Ok(resp.bytes()?.to_vec())
}

fn strip_bom(mut bytes: Vec<u8>) -> Vec<u8> {
    if bytes.starts_with(&UTF8_BOM) {
        bytes.drain(..UTF8_BOM.len());
    }
    bytes
}

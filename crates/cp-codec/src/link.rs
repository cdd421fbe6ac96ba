//! Shareable links: `{page}?p=<payload>` and `{page}?id=<uuid>`.

use crate::error::{CodecError, Result};
use crate::pipeline::PuzzleCodec;
use cp_core::Puzzle;
use url::{form_urlencoded, Url};
use uuid::Uuid;

/// Query parameter carrying an encoded puzzle.
pub const PAYLOAD_PARAM: &str = "p";
/// Query parameter carrying a stored puzzle's id.
pub const ID_PARAM: &str = "id";

/// What a link points at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkTarget {
    /// An inline encoded puzzle.
    Payload(String),
    /// A puzzle kept by the remote store.
    Stored(Uuid),
    Empty,
}

impl LinkTarget {
    /// Inspect a full URL or a bare query string. `id` wins over `p`.
    pub fn parse(url_or_query: &str) -> Result<Self> {
        let params = query_params(url_or_query);
        if let Some(id) = param(&params, ID_PARAM) {
            return Uuid::parse_str(id.trim())
                .map(LinkTarget::Stored)
                .map_err(|_| CodecError::InvalidPuzzleId(id.to_string()));
        }
        Ok(match param(&params, PAYLOAD_PARAM) {
            Some(payload) => LinkTarget::Payload(payload.to_string()),
            None => LinkTarget::Empty,
        })
    }
}

/// Build a share link for `puzzle` on the page at `base_url`.
///
/// Any query or fragment already on `base_url` is dropped.
pub fn encode_puzzle_to_link(puzzle: &Puzzle, base_url: &str) -> Result<String> {
    payload_link(base_url, &PuzzleCodec::default().encode(puzzle))
}

/// Build a share link for an already encoded payload.
pub fn payload_link(base_url: &str, payload: &str) -> Result<String> {
    let mut url = page_url(base_url)?;
    url.query_pairs_mut().append_pair(PAYLOAD_PARAM, payload);
    Ok(url.into())
}

/// Decode the puzzle carried by a link's `p` parameter.
///
/// `Ok(None)` when the parameter is absent; any decode failure is an error
/// for the caller to replace with a fallback.
pub fn decode_puzzle_from_link(url_or_query: &str) -> Result<Option<Puzzle>> {
    PuzzleCodec::default().decode_link(url_or_query)
}

/// Build a link to a stored puzzle.
pub fn stored_puzzle_link(base_url: &str, id: Uuid) -> Result<String> {
    let mut url = page_url(base_url)?;
    url.query_pairs_mut().append_pair(ID_PARAM, &id.to_string());
    Ok(url.into())
}

impl PuzzleCodec {
    /// [`decode_puzzle_from_link`] with this codec's palette.
    pub fn decode_link(&self, url_or_query: &str) -> Result<Option<Puzzle>> {
        let params = query_params(url_or_query);
        match param(&params, PAYLOAD_PARAM) {
            Some(payload) => self.decode(payload).map(|decoded| Some(decoded.puzzle)),
            None => Ok(None),
        }
    }
}

/// `base_url` parsed, with query and fragment removed.
fn page_url(base_url: &str) -> Result<Url> {
    let mut url = Url::parse(base_url).map_err(|_| CodecError::InvalidBaseUrl(base_url.to_string()))?;
    if url.cannot_be_a_base() {
        return Err(CodecError::InvalidBaseUrl(base_url.to_string()));
    }
    url.set_query(None);
    url.set_fragment(None);
    Ok(url)
}

/// Form-decoded `key=value` pairs from a URL or bare query string.
///
/// Malformed escapes are kept literally, so an unrelated parameter never
/// hides `p` or `id`.
pub fn query_params(url_or_query: &str) -> Vec<(String, String)> {
    if let Ok(url) = Url::parse(url_or_query) {
        return url.query_pairs().into_owned().collect();
    }
    let without_fragment = url_or_query.split('#').next().unwrap_or_default();
    let query = without_fragment
        .split_once('?')
        .map_or(without_fragment, |(_, query)| query);
    form_urlencoded::parse(query.as_bytes()).into_owned().collect()
}

/// First non-empty value for `key`.
fn param<'a>(params: &'a [(String, String)], key: &str) -> Option<&'a str> {
    params
        .iter()
        .find(|(k, v)| k == key && !v.is_empty())
        .map(|(_, v)| v.as_str())
}

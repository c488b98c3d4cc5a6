//! Master playlist url from the iframe and embed pages of a title.
//!
//! The embed page declares its playlist parameters in a script object literal.
//! Only the flat `params: { 'key': 'value', ... }` literal is read, as plain
//! text, and nothing of the script is ever evaluated.

use super::html::decode_html;
use crate::{Error, Result};
use regex::Regex;
use reqwest::Url;
use std::{collections::HashMap, sync::LazyLock};

static IFRAME_SRC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"<iframe[^>]*?\ssrc="([^"]+)""#).unwrap());

static PARAMS_LITERAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)params\s*:\s*\{([^{}]*)\}").unwrap());

/// Url of the embed page referenced by the iframe page.
pub(super) fn embed_url(iframe_url: &str, html: &str) -> Result<Url> {
    let src = IFRAME_SRC
        .captures(html)
        .and_then(|x| x.get(1))
        .ok_or_else(|| Error::scrape(iframe_url, "no iframe src"))?;

    Url::parse(&decode_html(src.as_str()))
        .map_err(|x| Error::scrape(iframe_url, format!("invalid iframe src: {}", x)))
}

/// Entries of the `params` object literal, with quotes stripped from keys and values.
pub(super) fn params(html: &str) -> Option<HashMap<String, String>> {
    let body = PARAMS_LITERAL.captures(html)?.get(1)?.as_str();

    Some(
        body.split(',')
            .filter_map(|x| x.split_once(':'))
            .map(|(key, value)| (unquote(key), unquote(value)))
            .filter(|(key, _)| !key.is_empty())
            .collect(),
    )
}

fn unquote(text: &str) -> String {
    text.trim().trim_matches(|x| x == '\'' || x == '"').to_owned()
}

/// Builds `{playlist_base_url}/{scws_id}` with the token and expiry of the embed page.
pub(super) fn playlist_url(
    playlist_base_url: &str,
    scws_id: u64,
    embed_url: &Url,
    embed_html: &str,
) -> Result<Url> {
    let params = params(embed_html)
        .ok_or_else(|| Error::scrape(embed_url.as_str(), "no masterPlaylist params"))?;
    let param = |name: &str| {
        params
            .get(name)
            .filter(|x| !x.is_empty())
            .ok_or_else(|| Error::scrape(embed_url.as_str(), format!("no {} in masterPlaylist params", name)))
    };

    let token = param("token")?;
    let expires = param("expires")?;

    let mut url = Url::parse(&format!(
        "{}/{}",
        playlist_base_url.trim_end_matches('/'),
        scws_id
    ))
    .map_err(|x| Error::scrape(playlist_base_url, x.to_string()))?;

    {
        let mut query = url.query_pairs_mut();
        query.append_pair("token", token);
        query.append_pair("expires", expires);

        if has_param(embed_url, "b") {
            query.append_pair("b", "1");
        }

        if has_param(embed_url, "canPlayFHD") {
            query.append_pair("h", "1");
        }
    }

    Ok(url)
}

fn has_param(url: &Url, name: &str) -> bool {
    url.query_pairs().any(|(key, value)| key == name && !value.is_empty())
}

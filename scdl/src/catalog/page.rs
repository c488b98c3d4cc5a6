use super::html::decode_html;
use crate::{Error, Result, downloader::Fetch};
use regex::Regex;
use serde::{Deserialize, de::DeserializeOwned};
use std::sync::LazyLock;

static DATA_PAGE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?s)<div id="app"[^>]*?data-page="([^"]+)""#).unwrap());

#[derive(Deserialize)]
struct Page<T> {
    props: T,
}

/// Props of the json payload every catalog page embeds in its `data-page` attribute.
pub(super) async fn props<T: DeserializeOwned>(fetcher: &impl Fetch, url: &str) -> Result<T> {
    let html = fetcher.text(url).await?;
    parse_props(url, &html)
}

pub(super) fn parse_props<T: DeserializeOwned>(url: &str, html: &str) -> Result<T> {
    let payload = DATA_PAGE
        .captures(html)
        .and_then(|x| x.get(1))
        .ok_or_else(|| Error::scrape(url, "no data-page attribute on the app element"))?;

    serde_json::from_str::<Page<T>>(&decode_html(payload.as_str()))
        .map(|x| x.props)
        .map_err(|x| Error::scrape(url, x.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize)]
    struct Props {
        name: String,
    }

    #[test]
    fn payload_is_unescaped_and_parsed() {
        let html = r#"<html><body><div id="app" data-page="{&quot;component&quot;:&quot;Titles/Show&quot;,&quot;props&quot;:{&quot;name&quot;:&quot;Rick &amp; Morty&quot;}}"><!-- --></div></body></html>"#;
        let props = parse_props::<Props>("https://site/titles/1-rick", html).unwrap();
        assert_eq!(props.name, "Rick & Morty");
    }

    #[test]
    fn missing_payload() {
        let error = parse_props::<Props>("https://site/search", "<div id=\"root\"></div>").unwrap_err();
        assert!(matches!(error, Error::Scrape { url, .. } if url == "https://site/search"));
    }

    #[test]
    fn malformed_payload() {
        let html = r#"<div id="app" data-page="{&quot;props&quot;:{}}">"#;
        assert!(matches!(
            parse_props::<Props>("https://site/search", html),
            Err(Error::Scrape { .. })
        ));
    }
}

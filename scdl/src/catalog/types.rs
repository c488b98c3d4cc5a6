use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// A movie or a series of the catalog.
#[derive(Clone, Debug, Serialize)]
pub struct Title {
    pub id: u64,
    pub slug: String,
    pub friendly_name: String,
    pub images: Vec<Image>,
    pub plot: Option<String>,
    pub release_date: Option<String>,
    pub score: Option<String>,
    /// Identifier of the video on the streaming backend.
    pub scws_id: Option<u64>,
    pub seasons: Vec<Season>,
    pub is_series: bool,
    pub trailer_url: Option<String>,
    pub embed_trailer_url: Option<String>,
}

#[derive(Clone, Debug, Serialize)]
pub struct Season {
    pub number: u32,
    pub episodes: Vec<Episode>,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Episode {
    pub id: u64,
    pub number: u32,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub plot: Option<String>,
    #[serde(default)]
    pub scws_id: Option<u64>,
}

#[derive(Clone, Debug, Serialize)]
pub struct Image {
    #[serde(rename = "type")]
    pub kind: ImageKind,
    pub url: String,
}

#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ImageKind {
    Poster,
    Background,
    Cover,
    CoverMobile,
    Logo,
    #[serde(other)]
    Other,
}

// Shapes of the `data-page` payloads.

#[derive(Deserialize)]
pub(super) struct SearchProps {
    #[serde(default)]
    pub titles: Vec<TitleRecord>,
}

#[derive(Deserialize)]
pub(super) struct TitleRecord {
    pub id: u64,
    pub slug: String,
    #[serde(default)]
    pub images: Vec<ImageRecord>,
}

#[derive(Deserialize)]
pub(super) struct ImageRecord {
    #[serde(rename = "type")]
    pub kind: ImageKind,
    pub filename: String,
}

#[derive(Deserialize)]
pub(super) struct TitleProps {
    pub title: TitleInfo,
}

#[derive(Deserialize)]
pub(super) struct TitleInfo {
    pub name: String,
    #[serde(default, deserialize_with = "string_or_number")]
    pub score: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub plot: Option<String>,
    #[serde(default)]
    pub scws_id: Option<u64>,
    #[serde(default)]
    pub trailers: Vec<Trailer>,
    #[serde(default)]
    pub seasons: Vec<SeasonRecord>,
}

#[derive(Deserialize)]
pub(super) struct Trailer {
    pub youtube_id: Option<String>,
}

#[derive(Deserialize)]
pub(super) struct SeasonRecord {
    pub number: u32,
}

#[derive(Deserialize)]
pub(super) struct SeasonProps {
    #[serde(rename = "loadedSeason")]
    pub loaded_season: LoadedSeason,
}

#[derive(Deserialize)]
pub(super) struct LoadedSeason {
    #[serde(default)]
    pub episodes: Vec<Episode>,
}

fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => None,
        Some(Value::String(x)) => Some(x),
        Some(x) => Some(x.to_string()),
    })
}

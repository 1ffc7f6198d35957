use std::sync::LazyLock;

use regex::{Captures, Regex};
use reqwest::Client;
use serde::Deserialize;

use crate::{
    captions::CaptionsProvider,
    error::{Result, TldwError},
    types::{Segment, Transcript},
};

static TEXT_ELEMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?s)<text\b([^>]*)>(.*?)</text>"#).expect("text element regex")
});
static START_ATTR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"\bstart="([^"]*)""#).expect("start attribute regex"));
static DUR_ATTR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"\bdur="([^"]*)""#).expect("dur attribute regex"));
static P_ELEMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?s)<p\b([^>]*)>(.*?)</p>"#).expect("p element regex"));
static T_ATTR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"\bt="([^"]*)""#).expect("t attribute regex"));
static D_ATTR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"\bd="([^"]*)""#).expect("d attribute regex"));
static ENTITY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"&(#[xX][0-9a-fA-F]+|#[0-9]+|[a-zA-Z]+);").expect("entity regex")
});
static MARKUP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]*>").expect("markup regex"));

/// Captions scraped from the YouTube watch page and its timed-text tracks
#[derive(Debug, Clone)]
pub struct YoutubeCaptions {
    client: Client,
    base_url: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CaptionsData {
    player_captions_tracklist_renderer: Option<TracklistRenderer>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TracklistRenderer {
    #[serde(default)]
    caption_tracks: Vec<CaptionTrack>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaptionTrack {
    pub base_url: String,
    pub language_code: String,
    #[serde(default)]
    pub kind: Option<String>,
}

impl CaptionTrack {
    /// Speech-recognition tracks are marked with `kind: "asr"`
    pub fn is_generated(&self) -> bool {
        self.kind.as_deref() == Some("asr")
    }
}

impl YoutubeCaptions {
    const BASE_URL: &str = "https://www.youtube.com";

    pub fn new() -> Self {
        Self::with_client(Client::new())
    }

    pub fn with_client(client: Client) -> Self {
        Self {
            client,
            base_url: Self::BASE_URL.into(),
        }
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Loads the watch page html for `video_id`
    #[tracing::instrument(skip(self))]
    async fn fetch_watch_page(&self, video_id: &str) -> Result<String> {
        let resp = self
            .client
            .get(format!("{}/watch", self.base_url))
            .query(&[("v", video_id)])
            .header("Accept-Language", "en-US,en;q=0.9")
            .send()
            .await
            .inspect_err(|e| tracing::error!(error = %e, "Failed to load watch page"))?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let message = resp.text().await.unwrap_or_default();
            return Err(TldwError::Api { status, message });
        }

        Ok(resp.text().await?)
    }

    #[tracing::instrument(skip_all, fields(language = %track.language_code))]
    async fn fetch_track(&self, track: &CaptionTrack) -> Result<String> {
        let resp = self
            .client
            .get(track_url(&track.base_url))
            .send()
            .await
            .inspect_err(|e| tracing::error!(error = %e, "Failed to load caption track"))?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let message = resp.text().await.unwrap_or_default();
            return Err(TldwError::Api { status, message });
        }

        Ok(resp.text().await?)
    }
}

impl Default for YoutubeCaptions {
    fn default() -> Self {
        Self::new()
    }
}

impl CaptionsProvider for YoutubeCaptions {
    async fn fetch_captions(&self, video_id: &str, languages: &[String]) -> Result<Transcript> {
        if video_id.is_empty() || video_id.starts_with("http") {
            return Err(TldwError::CaptionsUnavailable {
                video_id: video_id.to_string(),
                reason: "invalid video id".into(),
            });
        }

        let html = self.fetch_watch_page(video_id).await?;
        let tracks = caption_tracks(&html, video_id)?;
        let track =
            select_track(&tracks, languages).ok_or_else(|| TldwError::NoTranscriptFound {
                video_id: video_id.to_string(),
            })?;

        tracing::debug!(
            language = %track.language_code,
            generated = track.is_generated(),
            available = tracks.len(),
            "Selected caption track"
        );

        let xml = self.fetch_track(track).await?;

        Ok(Transcript {
            video_id: video_id.to_string(),
            language: track.language_code.clone(),
            segments: parse_timed_text(&xml),
        })
    }
}

/// Pulls the caption track list out of the player data embedded in the
/// watch page.
pub fn caption_tracks(html: &str, video_id: &str) -> Result<Vec<CaptionTrack>> {
    let Some(after) = html.split("\"captions\":").nth(1) else {
        if html.contains("class=\"g-recaptcha\"") {
            return Err(TldwError::CaptionsUnavailable {
                video_id: video_id.to_string(),
                reason: "too many requests, YouTube asks for a captcha".into(),
            });
        }
        // captions disabled for this video
        return Err(TldwError::NoTranscriptFound {
            video_id: video_id.to_string(),
        });
    };

    let json = after.split(",\"videoDetails").next().unwrap_or(after);
    let data: CaptionsData = serde_json::from_str(&json.replace('\n', ""))?;

    let tracks = data
        .player_captions_tracklist_renderer
        .map(|renderer| renderer.caption_tracks)
        .unwrap_or_default();

    if tracks.is_empty() {
        return Err(TldwError::NoTranscriptFound {
            video_id: video_id.to_string(),
        });
    }

    Ok(tracks)
}

/// First requested language wins; within a language a manually created track
/// is preferred over a generated one.
pub fn select_track<'a>(tracks: &'a [CaptionTrack], languages: &[String]) -> Option<&'a CaptionTrack> {
    languages.iter().find_map(|lang| {
        let mut candidates = tracks.iter().filter(|t| &t.language_code == lang);
        let manual = candidates.clone().find(|t| !t.is_generated());
        manual.or_else(|| candidates.next())
    })
}

/// Track urls may ask for the srv3 format; drop that so the plain
/// `<text start dur>` document comes back.
fn track_url(base_url: &str) -> String {
    base_url.replace("&fmt=srv3", "")
}

/// Parses a timed-text document into segments.
///
/// Understands the plain format (`<text start=".." dur="..">`, seconds) and
/// srv3 (`<p t=".." d="..">`, milliseconds).
pub fn parse_timed_text(xml: &str) -> Vec<Segment> {
    let segments = parse_elements(xml, &TEXT_ELEMENT, (&*START_ATTR, &*DUR_ATTR), 1.0);
    if !segments.is_empty() {
        return segments;
    }
    parse_elements(xml, &P_ELEMENT, (&*T_ATTR, &*D_ATTR), 1000.0)
}

fn parse_elements(
    xml: &str,
    element: &Regex,
    (start_attr, dur_attr): (&Regex, &Regex),
    units_per_second: f64,
) -> Vec<Segment> {
    element
        .captures_iter(xml)
        .filter_map(|caps| {
            let attrs = caps.get(1).map_or("", |m| m.as_str());
            let body = caps.get(2).map_or("", |m| m.as_str());

            // XML escaping wraps the HTML escaping, so decode twice
            let text = decode_entities(&decode_entities(body));
            let text = MARKUP.replace_all(&text, "").into_owned();
            if text.is_empty() {
                return None;
            }

            Some(Segment {
                start: attr_value(start_attr, attrs) / units_per_second,
                duration: attr_value(dur_attr, attrs) / units_per_second,
                text,
            })
        })
        .collect()
}

fn attr_value(attr: &Regex, attrs: &str) -> f64 {
    attr.captures(attrs)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
        .unwrap_or(0.0)
}

/// Decodes named and numeric character references, leaving unknown ones as is
pub fn decode_entities(text: &str) -> String {
    ENTITY
        .replace_all(text, |caps: &Captures| {
            let entity = &caps[1];
            let decoded = match entity {
                "amp" => Some('&'),
                "lt" => Some('<'),
                "gt" => Some('>'),
                "quot" => Some('"'),
                "apos" => Some('\''),
                "nbsp" => Some('\u{a0}'),
                _ => entity
                    .strip_prefix("#x")
                    .or_else(|| entity.strip_prefix("#X"))
                    .map(|hex| u32::from_str_radix(hex, 16))
                    .or_else(|| entity.strip_prefix('#').map(|dec| dec.parse::<u32>()))
                    .and_then(|code| code.ok())
                    .and_then(char::from_u32),
            };
            decoded.map_or_else(|| caps[0].to_string(), String::from)
        })
        .into_owned()
}

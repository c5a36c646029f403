use feed_rs::parser;
use html_escape::decode_html_entities;
use url::Url;

use crate::app::{ModfetchError, Result};
use crate::domain::entry::FEATURED_PREFIX;
use crate::domain::{Entry, OwnershipIndex};

/// Literal markers bounding the module filename inside an item's summary.
const FILENAME_OPEN: &str = "Filename:</b>";
const FILENAME_CLOSE: &str = "<br";

/// Query parameter carrying the module id in the download URL.
const MODULE_ID_PARAM: &str = "moduleid";

#[derive(Clone, Default)]
pub struct Normalizer;

impl Normalizer {
    pub fn new() -> Self {
        Self
    }

    /// Convert a raw feed body into ranked entries, newest first.
    ///
    /// Parsing is all-or-nothing per item: the first malformed item fails
    /// the whole call, so rank positions never misalign with the feed.
    pub fn normalize(&self, body: &[u8], owned: &OwnershipIndex) -> Result<Vec<Entry>> {
        let feed = parser::parse(body).map_err(|e| ModfetchError::FeedParse(e.to_string()))?;

        feed.entries
            .into_iter()
            .enumerate()
            .map(|(i, raw)| entry_from(i + 1, raw, owned))
            .collect()
    }
}

fn entry_from(
    position: usize,
    raw: feed_rs::model::Entry,
    owned: &OwnershipIndex,
) -> Result<Entry> {
    let title = raw
        .title
        .map(|t| decode_html_entities(&t.content).to_string())
        .ok_or_else(|| malformed(position, "missing title"))?;

    let published_at = raw
        .published
        .or(raw.updated)
        .ok_or_else(|| malformed(position, "missing publish date"))?;

    let download_url = raw
        .links
        .first()
        .map(|l| l.href.clone())
        .ok_or_else(|| malformed(position, "missing download link"))?;

    let summary = raw.summary.map(|s| s.content).unwrap_or_default();
    let filename = extract_between(&summary, FILENAME_OPEN, FILENAME_CLOSE)
        .ok_or_else(|| malformed(position, "missing filename marker in summary"))?;
    let filename = decode_html_entities(filename.trim()).to_string();

    let module_id = module_id_from(&download_url)
        .ok_or_else(|| malformed(position, "no moduleid parameter in download link"))?;

    let page_url = raw
        .links
        .get(1)
        .map(|l| l.href.clone())
        .unwrap_or_else(|| Entry::page_url_for(module_id));

    Ok(Entry {
        position,
        featured: title.starts_with(FEATURED_PREFIX),
        owned: owned.contains(&filename),
        stream_url: Entry::stream_url_for(module_id),
        title,
        published_at,
        filename,
        download_url,
        page_url,
        module_id,
    })
}

fn malformed(position: usize, reason: &str) -> ModfetchError {
    ModfetchError::MalformedEntry(format!("feed item at rank {}: {}", position, reason))
}

/// Slice the text between two literal markers.
fn extract_between<'a>(text: &'a str, open: &str, close: &str) -> Option<&'a str> {
    let start = text.find(open)? + open.len();
    let rest = &text[start..];
    let end = rest.find(close)?;
    Some(&rest[..end])
}

fn module_id_from(download_url: &str) -> Option<u64> {
    let url = Url::parse(download_url).ok()?;
    url.query_pairs()
        .find(|(key, _)| key == MODULE_ID_PARAM)
        .and_then(|(_, value)| value.parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    const FEED_SAMPLE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0">
  <channel>
    <title>The Mod Archive: Featured Modules</title>
    <link>https://modarchive.org</link>
    <item>
      <title>Featured: space debris</title>
      <link>https://api.modarchive.org/downloads.php?moduleid=57925#spacedeb.mod</link>
      <pubDate>Wed, 03 Jan 2024 10:00:00 GMT</pubDate>
      <description>&lt;b&gt;Filename:&lt;/b&gt; spacedeb.mod&lt;br&gt;&lt;b&gt;Format:&lt;/b&gt; MOD&lt;br&gt;</description>
    </item>
    <item>
      <title>second reality</title>
      <link>https://api.modarchive.org/downloads.php?moduleid=41234#2nd_real.s3m</link>
      <pubDate>Tue, 02 Jan 2024 09:00:00 GMT</pubDate>
      <description>&lt;b&gt;Filename:&lt;/b&gt; 2nd_real.s3m&lt;br&gt;&lt;b&gt;Format:&lt;/b&gt; S3M&lt;br&gt;</description>
    </item>
  </channel>
</rss>"#;

    const NO_MARKER_SAMPLE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0">
  <channel>
    <title>Broken</title>
    <item>
      <title>no marker here</title>
      <link>https://api.modarchive.org/downloads.php?moduleid=111</link>
      <pubDate>Mon, 01 Jan 2024 00:00:00 GMT</pubDate>
      <description>A module without the usual summary fields</description>
    </item>
  </channel>
</rss>"#;

    const NO_MODULE_ID_SAMPLE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0">
  <channel>
    <title>Broken</title>
    <item>
      <title>bad link</title>
      <link>https://api.modarchive.org/downloads.php?file=weird.mod</link>
      <pubDate>Mon, 01 Jan 2024 00:00:00 GMT</pubDate>
      <description>&lt;b&gt;Filename:&lt;/b&gt; weird.mod&lt;br&gt;</description>
    </item>
  </channel>
</rss>"#;

    #[test]
    fn test_parse_ranked_entries() {
        let entries = Normalizer::new()
            .normalize(FEED_SAMPLE.as_bytes(), &OwnershipIndex::default())
            .unwrap();

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].position, 1);
        assert_eq!(entries[1].position, 2);

        assert_eq!(entries[0].filename, "spacedeb.mod");
        assert_eq!(entries[0].module_id, 57925);
        assert!(entries[0].featured);
        assert_eq!(entries[0].display_title(), "space debris");
        assert_eq!(
            entries[0].stream_url,
            "https://modarchive.org/index.php?request=view_player&query=57925"
        );

        assert_eq!(entries[1].filename, "2nd_real.s3m");
        assert!(!entries[1].featured);
        // RSS items carry a single link, so the page URL is derived.
        assert_eq!(entries[1].page_url, Entry::page_url_for(41234));
    }

    #[test]
    fn test_owned_set_at_construction() {
        let mut owned = OwnershipIndex::default();
        owned.insert("2nd_real.s3m".to_string());

        let entries = Normalizer::new()
            .normalize(FEED_SAMPLE.as_bytes(), &owned)
            .unwrap();

        assert!(!entries[0].owned);
        assert!(entries[1].owned);
    }

    #[test]
    fn test_missing_filename_marker_is_malformed() {
        let result =
            Normalizer::new().normalize(NO_MARKER_SAMPLE.as_bytes(), &OwnershipIndex::default());
        assert!(matches!(result, Err(ModfetchError::MalformedEntry(_))));
    }

    #[test]
    fn test_missing_module_id_is_malformed() {
        let result =
            Normalizer::new().normalize(NO_MODULE_ID_SAMPLE.as_bytes(), &OwnershipIndex::default());
        assert!(matches!(result, Err(ModfetchError::MalformedEntry(_))));
    }

    #[test]
    fn test_filename_is_trimmed_and_decoded() {
        let feed = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0">
  <channel>
    <title>t</title>
    <item>
      <title>ampersand</title>
      <link>https://api.modarchive.org/downloads.php?moduleid=7</link>
      <pubDate>Mon, 01 Jan 2024 00:00:00 GMT</pubDate>
      <description>&lt;b&gt;Filename:&lt;/b&gt;  rock&amp;amp;roll.mod &lt;br&gt;</description>
    </item>
  </channel>
</rss>"#;

        let entries = Normalizer::new()
            .normalize(feed.as_bytes(), &OwnershipIndex::default())
            .unwrap();
        assert_eq!(entries[0].filename, "rock&roll.mod");
    }

    #[test]
    fn test_extract_between() {
        assert_eq!(
            extract_between("a Filename:</b> x.mod<br> b", FILENAME_OPEN, FILENAME_CLOSE),
            Some(" x.mod")
        );
        assert_eq!(extract_between("nothing", FILENAME_OPEN, FILENAME_CLOSE), None);
    }
}

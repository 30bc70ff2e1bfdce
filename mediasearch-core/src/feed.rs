//! Podcast RSS feed parsing (§4.8): turns a raw feed document into a
//! [`PodcastItem`] (the channel) plus its [`EpisodeItem`]s, reading both the
//! plain RSS 2.0 elements and the `itunes:*` namespace extensions most
//! podcast feeds carry.

use chrono::DateTime;
use mediasearch_types::{CaseInsensitiveSet, EpisodeItem, Explicit, PodcastItem, ProviderName};
use quick_xml::Reader;
use quick_xml::events::Event;

use crate::error::ProviderError;

/// Parses podcast RSS feeds into canonical items.
pub struct FeedParser;

#[derive(Default)]
struct ChannelDraft {
    title: String,
    description: String,
    itunes_summary: String,
    author: Option<String>,
    artwork_url: Option<String>,
    language: Option<String>,
    website_url: Option<String>,
    categories: CaseInsensitiveSet,
    explicit: Explicit,
    last_updated: Option<i64>,
}

#[derive(Default)]
struct ItemDraft {
    guid: Option<String>,
    title: String,
    description: String,
    itunes_summary: String,
    audio_url: Option<String>,
    duration_seconds: Option<u32>,
    artwork_url: Option<String>,
    publish_date: Option<i64>,
}

impl FeedParser {
    /// Parse `xml` (the raw body fetched from `feed_url`) into a channel-level
    /// [`PodcastItem`] and its episodes. `feed_url` becomes both the item's
    /// `feed_url` and the identity anchor used by the deduper.
    ///
    /// Episodes without a resolvable `<enclosure url="...">` are dropped —
    /// an episode with no audio is not playable.
    pub fn parse(xml: &str, feed_url: &str) -> Result<(PodcastItem, Vec<EpisodeItem>), ProviderError> {
        let mut reader = Reader::from_str(xml);
        reader.config_mut().trim_text(true);

        let mut channel = ChannelDraft::default();
        let mut episodes = Vec::new();
        let mut current_item: Option<ItemDraft> = None;
        let mut tag_stack: Vec<Vec<u8>> = Vec::new();
        let mut saw_channel = false;

        loop {
            let event = reader
                .read_event()
                .map_err(|e| ProviderError::FeedInvalid(e.to_string()))?;

            match event {
                Event::Eof => break,
                Event::Start(ref e) => {
                    let name = e.name().as_ref().to_vec();
                    if name == b"channel" {
                        saw_channel = true;
                    }
                    if name == b"item" {
                        current_item = Some(ItemDraft::default());
                    }
                    if name == b"itunes:category" {
                        if let Some(text) = attr_value(e, b"text") {
                            channel.categories.insert(text);
                        }
                    }
                    if name == b"itunes:image" {
                        if let Some(href) = attr_value(e, b"href") {
                            if current_item.is_some() {
                                current_item.as_mut().unwrap().artwork_url = Some(href);
                            } else {
                                channel.artwork_url = Some(href);
                            }
                        }
                    }
                    if name == b"enclosure" {
                        if let Some(draft) = current_item.as_mut() {
                            draft.audio_url = attr_value(e, b"url");
                        }
                    }
                    tag_stack.push(name);
                }
                Event::Empty(ref e) => {
                    let name = e.name().as_ref().to_vec();
                    if name == b"itunes:category" {
                        if let Some(text) = attr_value(e, b"text") {
                            channel.categories.insert(text);
                        }
                    }
                    if name == b"itunes:image" {
                        if let Some(href) = attr_value(e, b"href") {
                            if current_item.is_some() {
                                current_item.as_mut().unwrap().artwork_url = Some(href);
                            } else {
                                channel.artwork_url = Some(href);
                            }
                        }
                    }
                    if name == b"enclosure" {
                        if let Some(draft) = current_item.as_mut() {
                            draft.audio_url = attr_value(e, b"url");
                        }
                    }
                }
                Event::Text(ref e) => {
                    let text = e
                        .unescape()
                        .map_err(|err| ProviderError::FeedInvalid(err.to_string()))?
                        .into_owned();
                    let text = text.trim();
                    if text.is_empty() {
                        continue;
                    }
                    if let Some(tag) = tag_stack.last() {
                        apply_leaf_text(tag, text, &mut channel, current_item.as_mut());
                    }
                }
                Event::End(ref e) => {
                    let name = e.name().as_ref().to_vec();
                    if name == b"item" {
                        if let Some(draft) = current_item.take() {
                            if let Some(audio_url) = draft.audio_url {
                                let description = if draft.description.is_empty() {
                                    draft.itunes_summary
                                } else {
                                    draft.description
                                };
                                episodes.push(EpisodeItem {
                                    guid: draft.guid.unwrap_or_else(|| audio_url.clone()),
                                    parent_id: feed_url.to_string(),
                                    title: draft.title,
                                    description,
                                    audio_url,
                                    duration_seconds: draft.duration_seconds,
                                    artwork_url: draft.artwork_url.clone().or_else(|| channel.artwork_url.clone()),
                                    publish_date: draft.publish_date,
                                });
                            }
                        }
                    }
                    tag_stack.pop();
                }
                _ => {}
            }
        }

        if !saw_channel {
            return Err(ProviderError::FeedInvalid(
                "document has no <channel> element".to_string(),
            ));
        }

        let description = if channel.description.is_empty() {
            channel.itunes_summary
        } else {
            channel.description
        };

        let item = PodcastItem {
            id: feed_url.to_string(),
            title: channel.title,
            author: channel.author,
            description,
            artwork_url: channel.artwork_url,
            feed_url: Some(feed_url.to_string()),
            itunes_id: None,
            categories: channel.categories,
            episode_count: if episodes.is_empty() {
                None
            } else {
                Some(episodes.len() as u32)
            },
            language: channel.language,
            website_url: channel.website_url,
            last_updated: channel.last_updated,
            explicit: channel.explicit,
            popularity: 0,
            source: ProviderName::DirectFeed,
            source_providers: mediasearch_types::CaseInsensitiveSetProviders::just(
                ProviderName::DirectFeed,
            ),
        };

        Ok((item, episodes))
    }
}

fn attr_value(e: &quick_xml::events::BytesStart<'_>, key: &[u8]) -> Option<String> {
    e.attributes().flatten().find_map(|a| {
        if a.key.as_ref() == key {
            a.unescape_value().ok().map(|v| v.into_owned())
        } else {
            None
        }
    })
}

fn apply_leaf_text(
    tag: &[u8],
    text: &str,
    channel: &mut ChannelDraft,
    item: Option<&mut ItemDraft>,
) {
    match (tag, item) {
        (b"title", Some(draft)) => draft.title = text.to_string(),
        (b"title", None) => channel.title = text.to_string(),
        (b"description", Some(draft)) => draft.description = text.to_string(),
        (b"description", None) => channel.description = text.to_string(),
        (b"itunes:summary", Some(draft)) => draft.itunes_summary = text.to_string(),
        (b"itunes:summary", None) => channel.itunes_summary = text.to_string(),
        (b"itunes:author", None) => channel.author = Some(text.to_string()),
        (b"link", None) => channel.website_url = Some(text.to_string()),
        (b"language", None) => channel.language = Some(text.to_string()),
        (b"itunes:explicit", None) => channel.explicit = parse_explicit(text),
        (b"lastBuildDate" | b"pubDate", None) => channel.last_updated = parse_rfc822(text),
        (b"guid", Some(draft)) => draft.guid = Some(text.to_string()),
        (b"pubDate", Some(draft)) => draft.publish_date = parse_rfc822(text),
        (b"itunes:duration", Some(draft)) => draft.duration_seconds = parse_duration(text),
        _ => {}
    }
}

fn parse_explicit(text: &str) -> Explicit {
    match text.trim().to_lowercase().as_str() {
        "yes" | "true" | "explicit" => Explicit::True,
        "no" | "false" | "clean" => Explicit::False,
        _ => Explicit::Unknown,
    }
}

/// RFC-822 `pubDate`/`lastBuildDate`, returned as unix millis.
fn parse_rfc822(text: &str) -> Option<i64> {
    DateTime::parse_from_rfc2822(text.trim())
        .ok()
        .map(|dt| dt.timestamp_millis())
}

/// `itunes:duration` as `HH:MM:SS`, `MM:SS`, or a bare second count.
fn parse_duration(text: &str) -> Option<u32> {
    let parts: Vec<&str> = text.trim().split(':').collect();
    let nums: Option<Vec<u32>> = parts.iter().map(|p| p.parse::<u32>().ok()).collect();
    let nums = nums?;
    match nums.as_slice() {
        [s] => Some(*s),
        [m, s] => Some(m * 60 + s),
        [h, m, s] => Some(h * 3600 + m * 60 + s),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_FEED: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0" xmlns:itunes="http://www.itunes.com/dtds/podcast-1.0.dtd">
  <channel>
    <title>Daily Signal</title>
    <description>News, daily.</description>
    <link>https://example.com</link>
    <language>en-us</language>
    <itunes:author>Acme Media</itunes:author>
    <itunes:image href="https://example.com/art.png"/>
    <itunes:category text="News"/>
    <itunes:explicit>no</itunes:explicit>
    <item>
      <title>Episode 1</title>
      <description>First episode</description>
      <guid>ep-1</guid>
      <pubDate>Mon, 01 Jan 2024 08:00:00 GMT</pubDate>
      <itunes:duration>00:12:30</itunes:duration>
      <enclosure url="https://example.com/ep1.mp3" type="audio/mpeg"/>
    </item>
    <item>
      <title>No audio episode</title>
      <description>Should be dropped</description>
      <guid>ep-2</guid>
    </item>
  </channel>
</rss>"#;

    #[test]
    fn parses_channel_and_episodes_dropping_enclosure_less_items() {
        let (item, episodes) = FeedParser::parse(SAMPLE_FEED, "https://example.com/feed.xml").unwrap();
        assert_eq!(item.title, "Daily Signal");
        assert_eq!(item.author.as_deref(), Some("Acme Media"));
        assert_eq!(item.artwork_url.as_deref(), Some("https://example.com/art.png"));
        assert!(item.categories.iter().any(|c| c == "News"));
        assert_eq!(item.explicit, Explicit::False);

        assert_eq!(episodes.len(), 1);
        let ep = &episodes[0];
        assert_eq!(ep.title, "Episode 1");
        assert_eq!(ep.audio_url, "https://example.com/ep1.mp3");
        assert_eq!(ep.duration_seconds, Some(750));
        assert!(ep.publish_date.is_some());
    }

    #[test]
    fn rejects_documents_with_no_channel() {
        let err = FeedParser::parse("<rss></rss>", "https://example.com/feed.xml").unwrap_err();
        assert!(matches!(err, ProviderError::FeedInvalid(_)));
    }

    #[test]
    fn duration_parses_all_three_formats() {
        assert_eq!(parse_duration("45"), Some(45));
        assert_eq!(parse_duration("2:05"), Some(125));
        assert_eq!(parse_duration("1:02:03"), Some(3723));
    }
}

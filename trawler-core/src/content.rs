//! Assembly of resolvable content items from extracted raw results.

use std::collections::{BTreeMap, HashMap};

use crate::types::{Category, EpisodeDescriptor, ExtractedAttributes, RawResult, TorrentPayload};

/// Provider payload carried by a content item until it is merged.
#[derive(Debug, Clone, PartialEq)]
pub enum ContentPayload {
    /// Torrents keyed by quality tag
    Movie {
        torrents: BTreeMap<String, TorrentPayload>,
    },
    /// Episodes carrying torrents, in listing order
    Show { episodes: Vec<EpisodeDescriptor> },
}

/// Extracted attributes plus the payload they describe.
#[derive(Debug, Clone, PartialEq)]
pub struct ContentItem {
    pub category: Category,
    pub attributes: ExtractedAttributes,
    pub payload: ContentPayload,
}

impl ContentItem {
    /// Builds an item from a raw result and the attributes extracted from it.
    ///
    /// An episode listing supplied by the index loses its leading entry here,
    /// per result, before any merging. A show may come out with no episodes;
    /// resolution skips it. Returns `None` when the raw result carries no
    /// torrent at all.
    pub fn from_raw(
        raw: &RawResult,
        attributes: ExtractedAttributes,
        category: Category,
        provider: &str,
    ) -> Option<Self> {
        let torrents = collect_torrents(raw, &attributes.quality, provider);

        let payload = match category {
            Category::Movie => {
                if torrents.is_empty() {
                    return None;
                }
                ContentPayload::Movie { torrents }
            }
            Category::Show if !raw.episodes.is_empty() => {
                let mut episodes = raw.episodes.clone();
                drop_leading_episode(&mut episodes);
                episodes.retain(|episode| !episode.torrents.is_empty());
                for episode in &mut episodes {
                    for torrent in episode.torrents.values_mut() {
                        torrent.provider.get_or_insert_with(|| provider.to_string());
                    }
                }
                ContentPayload::Show { episodes }
            }
            Category::Show => {
                let episode = attributes.episode?;
                if torrents.is_empty() {
                    return None;
                }
                ContentPayload::Show {
                    episodes: vec![EpisodeDescriptor {
                        season: attributes.season.unwrap_or(1),
                        episode,
                        torrents,
                    }],
                }
            }
        };

        Some(Self {
            category,
            attributes,
            payload,
        })
    }

    /// Key under which releases of the same title are grouped.
    fn group_key(&self) -> (Category, String, Option<u16>, String) {
        (
            self.category,
            self.attributes.slug.clone(),
            self.attributes.year,
            self.attributes.language.clone(),
        )
    }

    /// Folds another release of the same title into this item.
    fn absorb(&mut self, other: ContentItem) {
        match (&mut self.payload, other.payload) {
            (ContentPayload::Movie { torrents }, ContentPayload::Movie { torrents: incoming }) => {
                for (quality, torrent) in incoming {
                    match torrents.get(&quality) {
                        Some(existing) if existing.seeds >= torrent.seeds => {}
                        _ => {
                            torrents.insert(quality, torrent);
                        }
                    }
                }
            }
            (ContentPayload::Show { episodes }, ContentPayload::Show { episodes: incoming }) => {
                episodes.extend(incoming);
            }
            _ => {}
        }
    }
}

/// Legacy removal of the first entry of an index-supplied episode listing.
///
/// The leading entry is treated as invalid whatever it holds.
pub fn drop_leading_episode(episodes: &mut Vec<EpisodeDescriptor>) {
    if !episodes.is_empty() {
        episodes.remove(0);
    }
}

/// Torrents of a raw result keyed by quality.
fn collect_torrents(
    raw: &RawResult,
    fallback_quality: &str,
    provider: &str,
) -> BTreeMap<String, TorrentPayload> {
    let listed = raw.torrents.iter().cloned();
    let flat = raw
        .torrents
        .is_empty()
        .then(|| raw.flat_torrent(provider))
        .flatten();

    let mut torrents = BTreeMap::new();
    for torrent in listed.chain(flat) {
        let mut torrent = torrent.with_display_size();
        let quality = torrent
            .quality
            .clone()
            .unwrap_or_else(|| fallback_quality.to_string())
            .to_lowercase();
        torrent.provider.get_or_insert_with(|| provider.to_string());

        match torrents.get(&quality) {
            Some(TorrentPayload { seeds, .. }) if *seeds >= torrent.seeds => {}
            _ => {
                torrents.insert(quality, torrent);
            }
        }
    }
    torrents
}

/// Merges items describing the same title, keeping first-seen order.
///
/// Movie torrents merge by quality, the better seeded payload winning a
/// quality slot. Show listings append the other release's episodes, each
/// already trimmed of its own leading entry.
pub fn coalesce(items: Vec<ContentItem>) -> Vec<ContentItem> {
    let mut merged: Vec<ContentItem> = Vec::with_capacity(items.len());
    let mut positions: HashMap<(Category, String, Option<u16>, String), usize> = HashMap::new();

    for item in items {
        let key = item.group_key();
        match positions.get(&key) {
            Some(&position) => merged[position].absorb(item),
            None => {
                positions.insert(key, merged.len());
                merged.push(item);
            }
        }
    }

    merged
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn attributes(slug: &str, quality: &str) -> ExtractedAttributes {
        ExtractedAttributes {
            title: slug.replace('-', " "),
            slug: slug.to_string(),
            year: Some(2014),
            season: None,
            episode: None,
            language: "en".to_string(),
            quality: quality.to_string(),
        }
    }

    fn torrent(url: &str, quality: Option<&str>, seeds: u32) -> TorrentPayload {
        TorrentPayload {
            url: url.to_string(),
            quality: quality.map(str::to_string),
            seeds,
            peers: 0,
            size_bytes: None,
            file_size: None,
            provider: None,
        }
    }

    #[test]
    fn test_movie_from_listed_torrents() {
        let mut raw = RawResult::new("Interstellar 2014");
        raw.torrents = vec![
            torrent("magnet:a", Some("720p"), 10),
            torrent("magnet:b", Some("1080p"), 20),
        ];

        let item =
            ContentItem::from_raw(&raw, attributes("interstellar", "480p"), Category::Movie, "YTS")
                .unwrap();

        let ContentPayload::Movie { torrents } = item.payload else {
            panic!("expected movie payload");
        };
        assert_eq!(torrents.len(), 2);
        assert_eq!(torrents["1080p"].url, "magnet:b");
        assert_eq!(torrents["720p"].provider.as_deref(), Some("YTS"));
    }

    #[test]
    fn test_movie_from_flat_torrent_uses_extracted_quality() {
        let raw: RawResult = serde_json::from_value(json!({
            "title": "Interstellar.2014.720p",
            "magnet": "magnet:flat",
            "seeders": 3
        }))
        .unwrap();

        let item =
            ContentItem::from_raw(&raw, attributes("interstellar", "720p"), Category::Movie, "KAT")
                .unwrap();
        let ContentPayload::Movie { torrents } = item.payload else {
            panic!("expected movie payload");
        };
        assert_eq!(torrents["720p"].url, "magnet:flat");
        assert_eq!(torrents["720p"].seeds, 3);
    }

    #[test]
    fn test_movie_without_torrents_is_dropped() {
        let raw = RawResult::new("Interstellar 2014");
        assert!(
            ContentItem::from_raw(&raw, attributes("interstellar", "720p"), Category::Movie, "KAT")
                .is_none()
        );
    }

    #[test]
    fn test_show_synthesises_single_episode_listing() {
        let raw: RawResult = serde_json::from_value(json!({
            "title": "Lost.S02E03.720p",
            "magnet": "magnet:lost"
        }))
        .unwrap();
        let mut attrs = attributes("lost", "720p");
        attrs.season = Some(2);
        attrs.episode = Some(3);

        let item = ContentItem::from_raw(&raw, attrs, Category::Show, "EZTV").unwrap();
        let ContentPayload::Show { episodes } = item.payload else {
            panic!("expected show payload");
        };
        assert_eq!(episodes.len(), 1);
        assert_eq!((episodes[0].season, episodes[0].episode), (2, 3));
        assert_eq!(episodes[0].torrents["720p"].url, "magnet:lost");
    }

    #[test]
    fn test_show_listing_loses_leading_entry_and_empty_slots() {
        let raw: RawResult = serde_json::from_value(json!({
            "title": "Gate",
            "episodes": [
                { "season": 1, "number": 1, "torrents": { "480p": { "url": "magnet:g1" } } },
                { "season": 1, "number": 2 },
                { "season": 1, "number": 3, "torrents": { "480p": { "url": "magnet:g3" } } }
            ]
        }))
        .unwrap();

        let item = ContentItem::from_raw(&raw, attributes("gate", "480p"), Category::Show, "HS")
            .unwrap();
        let ContentPayload::Show { episodes } = item.payload else {
            panic!("expected show payload");
        };
        assert_eq!(episodes.len(), 1);
        assert_eq!(episodes[0].episode, 3);
        assert_eq!(episodes[0].torrents["480p"].provider.as_deref(), Some("HS"));
    }

    #[test]
    fn test_show_listing_with_only_leading_entry_is_empty() {
        let raw: RawResult = serde_json::from_value(json!({
            "title": "Gate",
            "episodes": [
                { "season": 1, "number": 1, "torrents": { "480p": { "url": "magnet:g1" } } }
            ]
        }))
        .unwrap();

        let item = ContentItem::from_raw(&raw, attributes("gate", "480p"), Category::Show, "HS")
            .unwrap();
        assert_eq!(item.payload, ContentPayload::Show { episodes: vec![] });
    }

    #[test]
    fn test_drop_leading_episode_on_empty_listing() {
        let mut episodes = Vec::new();
        drop_leading_episode(&mut episodes);
        assert!(episodes.is_empty());
    }

    #[test]
    fn test_coalesce_keeps_best_seeded_quality() {
        let mut first = RawResult::new("Interstellar 2014 720p");
        first.torrents = vec![torrent("magnet:weak", Some("720p"), 1)];
        let mut second = RawResult::new("Interstellar 2014 720p PROPER");
        second.torrents = vec![
            torrent("magnet:strong", Some("720p"), 50),
            torrent("magnet:hd", Some("1080p"), 5),
        ];
        let mut other = RawResult::new("Gravity 2013");
        other.torrents = vec![torrent("magnet:gravity", Some("720p"), 9)];

        let items = vec![
            ContentItem::from_raw(&first, attributes("interstellar", "720p"), Category::Movie, "KAT")
                .unwrap(),
            ContentItem::from_raw(&other, attributes("gravity", "720p"), Category::Movie, "KAT")
                .unwrap(),
            ContentItem::from_raw(&second, attributes("interstellar", "720p"), Category::Movie, "KAT")
                .unwrap(),
        ];

        let merged = coalesce(items);
        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0].attributes.slug, "interstellar");
        assert_eq!(merged[1].attributes.slug, "gravity");

        let ContentPayload::Movie { torrents } = &merged[0].payload else {
            panic!("expected movie payload");
        };
        assert_eq!(torrents["720p"].url, "magnet:strong");
        assert_eq!(torrents["1080p"].url, "magnet:hd");
    }

    #[test]
    fn test_coalesce_appends_show_episodes() {
        let episode = |n: u32, url: &str| -> RawResult {
            serde_json::from_value(json!({
                "title": format!("Lost.S01E0{n}"),
                "magnet": url
            }))
            .unwrap()
        };
        let attrs = |n: u32| {
            let mut a = attributes("lost", "480p");
            a.season = Some(1);
            a.episode = Some(n);
            a
        };

        let items = vec![
            ContentItem::from_raw(&episode(1, "magnet:e1"), attrs(1), Category::Show, "EZTV")
                .unwrap(),
            ContentItem::from_raw(&episode(2, "magnet:e2"), attrs(2), Category::Show, "EZTV")
                .unwrap(),
        ];

        let merged = coalesce(items);
        assert_eq!(merged.len(), 1);
        let ContentPayload::Show { episodes } = &merged[0].payload else {
            panic!("expected show payload");
        };
        let numbers: Vec<_> = episodes.iter().map(|e| e.episode).collect();
        assert_eq!(numbers, vec![1, 2]);
    }

    #[test]
    fn test_coalesce_trims_each_listing_before_merging() {
        let listed = |title: &str, numbers: &[u32]| -> RawResult {
            let episodes: Vec<_> = numbers
                .iter()
                .map(|n| {
                    json!({
                        "season": 1,
                        "number": n,
                        "torrents": { "480p": { "url": format!("magnet:{n}") } }
                    })
                })
                .collect();
            serde_json::from_value(json!({ "title": title, "episodes": episodes })).unwrap()
        };

        let item = |raw: RawResult| {
            ContentItem::from_raw(&raw, attributes("lost", "480p"), Category::Show, "HS").unwrap()
        };

        let items = vec![
            item(listed("Lost S01E01", &[1])),
            item(listed("Lost S01E02", &[1, 2])),
        ];

        let merged = coalesce(items);
        assert_eq!(merged.len(), 1);
        let ContentPayload::Show { episodes } = &merged[0].payload else {
            panic!("expected show payload");
        };
        let numbers: Vec<_> = episodes.iter().map(|e| (e.season, e.episode)).collect();
        assert_eq!(numbers, vec![(1, 2)]);
    }
}

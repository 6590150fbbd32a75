use crate::types::{PodcastError, Result};
use quick_xml::events::Event;
use quick_xml::name::{Namespace, ResolveResult};
use quick_xml::reader::NsReader;
use tracing::debug;

const PODCAST_NS: &[u8] = b"https://podcastindex.org/namespace/1.0";
const ITUNES_NS: &[u8] = b"http://www.itunes.com/dtds/podcast-1.0.dtd";

/// One parsed feed: channel metadata plus every `<item>` in document order.
/// This is the representation the feed cache holds for the process lifetime.
#[derive(Debug, Clone, Default)]
pub struct FeedDocument {
    pub title: String,
    pub description: String,
    pub entries: Vec<FeedEntry>,
}

/// Raw per-item harvest. Field values are exactly as authored (entities
/// unescaped, CDATA preserved); interpretation and defaulting happen in the
/// extractor.
#[derive(Debug, Clone, Default)]
pub struct FeedEntry {
    pub guid: String,
    pub episode_number: String,
    pub title: String,
    pub description: String,
    pub link: String,
    pub pub_date: String,
    pub duration: String,
    pub persons: Vec<PersonTag>,
    pub enclosures: Vec<EnclosureTag>,
    pub transcripts: Vec<TranscriptTag>,
    pub chapters_url: Option<String>,
}

/// `<podcast:person role="...">Name</podcast:person>`, any depth in an item.
#[derive(Debug, Clone, Default)]
pub struct PersonTag {
    pub name: String,
    pub role: String,
}

#[derive(Debug, Clone, Default)]
pub struct EnclosureTag {
    pub url: String,
    pub mime_type: String,
    pub length: String,
}

/// `<podcast:transcript url=... type=... language=.../>`. `url` may be
/// absent in malformed feeds; the extractor drops those.
#[derive(Debug, Clone, Default)]
pub struct TranscriptTag {
    pub url: Option<String>,
    pub mime_type: String,
    pub language: Option<String>,
}

/// Which element's text we are currently accumulating.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Capture {
    ChannelTitle,
    ChannelDescription,
    Title,
    Description,
    Link,
    Guid,
    PubDate,
    Duration,
    EpisodeNumber,
    PersonName,
}

/// Podcast 2.0 feed parser built on quick-xml's namespace-aware reader.
pub struct FeedParser;

impl FeedParser {
    /// Parses feed XML into a `FeedDocument`. Fails only on structurally
    /// broken XML; missing or unexpected elements are simply not harvested.
    pub fn parse(content: &str) -> Result<FeedDocument> {
        let lowered = content.to_lowercase();
        if !lowered.contains("<rss") && !lowered.contains("<channel") {
            return Err(PodcastError::MalformedXml(
                "no RSS structure found".to_string(),
            ));
        }

        let mut reader = NsReader::from_str(content);
        let mut document = FeedDocument::default();
        let mut current: Option<FeedEntry> = None;
        let mut capture: Option<Capture> = None;
        let mut text_buf = String::new();
        let mut person_role = String::new();

        loop {
            match reader.read_resolved_event() {
                Ok((resolve, Event::Start(e))) => {
                    let in_item = current.is_some();
                    let local = e.local_name().as_ref().to_vec();

                    if local == b"item" {
                        current = Some(FeedEntry::default());
                        capture = None;
                        text_buf.clear();
                        continue;
                    }

                    let next = if in_item {
                        match local.as_slice() {
                            b"title" => Some(Capture::Title),
                            b"description" => Some(Capture::Description),
                            b"link" => Some(Capture::Link),
                            b"guid" => Some(Capture::Guid),
                            b"pubDate" => Some(Capture::PubDate),
                            b"duration" if is_ns(&resolve, ITUNES_NS) => Some(Capture::Duration),
                            b"episode" if is_ns(&resolve, PODCAST_NS) => {
                                Some(Capture::EpisodeNumber)
                            }
                            b"person" if is_ns(&resolve, PODCAST_NS) => {
                                person_role = attribute_value(&e, b"role").unwrap_or_default();
                                Some(Capture::PersonName)
                            }
                            _ => {
                                Self::handle_attribute_element(
                                    &resolve,
                                    &local,
                                    &e,
                                    current.as_mut(),
                                );
                                None
                            }
                        }
                    } else {
                        match local.as_slice() {
                            b"title" if document.title.is_empty() => Some(Capture::ChannelTitle),
                            b"description" if document.description.is_empty() => {
                                Some(Capture::ChannelDescription)
                            }
                            _ => None,
                        }
                    };

                    if next.is_some() {
                        capture = next;
                        text_buf.clear();
                    }
                }
                Ok((resolve, Event::Empty(e))) => {
                    let local = e.local_name().as_ref().to_vec();
                    Self::handle_attribute_element(&resolve, &local, &e, current.as_mut());
                }
                Ok((_, Event::Text(e))) => {
                    if capture.is_some() {
                        if let Ok(text) = e.unescape() {
                            text_buf.push_str(&text);
                        }
                    }
                }
                Ok((_, Event::CData(e))) => {
                    if capture.is_some() {
                        text_buf.push_str(&String::from_utf8_lossy(&e.into_inner()));
                    }
                }
                Ok((_, Event::End(e))) => {
                    let local = e.local_name().as_ref().to_vec();

                    if local == b"item" {
                        if let Some(entry) = current.take() {
                            document.entries.push(entry);
                        }
                        capture = None;
                        text_buf.clear();
                        continue;
                    }

                    if let Some(active) = capture {
                        if capture_matches(active, &local) {
                            Self::assign_capture(
                                active,
                                &text_buf,
                                &mut document,
                                current.as_mut(),
                                &mut person_role,
                            );
                            capture = None;
                            text_buf.clear();
                        }
                    }
                }
                Ok((_, Event::Eof)) => break,
                Ok(_) => {}
                Err(e) => return Err(PodcastError::MalformedXml(e.to_string())),
            }
        }

        debug!(
            "Parsed feed '{}' with {} entries",
            document.title,
            document.entries.len()
        );
        Ok(document)
    }

    /// Attribute-only elements: enclosures, transcripts, chapters. These can
    /// appear self-closed or as start/end pairs, so both event arms land here.
    fn handle_attribute_element(
        resolve: &ResolveResult,
        local: &[u8],
        e: &quick_xml::events::BytesStart,
        current: Option<&mut FeedEntry>,
    ) {
        let Some(entry) = current else { return };

        match local {
            b"enclosure" => {
                entry.enclosures.push(EnclosureTag {
                    url: attribute_value(e, b"url").unwrap_or_default(),
                    mime_type: attribute_value(e, b"type").unwrap_or_default(),
                    length: attribute_value(e, b"length").unwrap_or_default(),
                });
            }
            b"transcript" if is_ns(resolve, PODCAST_NS) => {
                entry.transcripts.push(TranscriptTag {
                    url: attribute_value(e, b"url"),
                    mime_type: attribute_value(e, b"type").unwrap_or_default(),
                    language: attribute_value(e, b"language"),
                });
            }
            b"chapters" if is_ns(resolve, PODCAST_NS) => {
                entry.chapters_url = attribute_value(e, b"url");
            }
            _ => {}
        }
    }

    fn assign_capture(
        capture: Capture,
        text: &str,
        document: &mut FeedDocument,
        current: Option<&mut FeedEntry>,
        person_role: &mut String,
    ) {
        match capture {
            Capture::ChannelTitle => document.title = text.trim().to_string(),
            Capture::ChannelDescription => document.description = text.trim().to_string(),
            _ => {
                let Some(entry) = current else { return };
                match capture {
                    Capture::Title => entry.title = text.to_string(),
                    Capture::Description => entry.description = text.to_string(),
                    Capture::Link => entry.link = text.to_string(),
                    Capture::Guid => entry.guid = text.to_string(),
                    Capture::PubDate => entry.pub_date = text.to_string(),
                    Capture::Duration => entry.duration = text.to_string(),
                    Capture::EpisodeNumber => entry.episode_number = text.to_string(),
                    Capture::PersonName => {
                        entry.persons.push(PersonTag {
                            name: text.to_string(),
                            role: std::mem::take(person_role),
                        });
                    }
                    Capture::ChannelTitle | Capture::ChannelDescription => {}
                }
            }
        }
    }
}

fn capture_matches(capture: Capture, local: &[u8]) -> bool {
    let expected: &[u8] = match capture {
        Capture::ChannelTitle | Capture::Title => b"title",
        Capture::ChannelDescription | Capture::Description => b"description",
        Capture::Link => b"link",
        Capture::Guid => b"guid",
        Capture::PubDate => b"pubDate",
        Capture::Duration => b"duration",
        Capture::EpisodeNumber => b"episode",
        Capture::PersonName => b"person",
    };
    local == expected
}

fn is_ns(resolve: &ResolveResult, uri: &[u8]) -> bool {
    matches!(resolve, ResolveResult::Bound(Namespace(ns)) if *ns == uri)
}

fn attribute_value(e: &quick_xml::events::BytesStart, name: &[u8]) -> Option<String> {
    e.attributes().flatten().find_map(|attr| {
        if attr.key.local_name().as_ref() == name {
            attr.unescape_value().ok().map(|v| v.into_owned())
        } else {
            None
        }
    })
}

use crate::parser::{FeedDocument, FeedEntry};
use crate::types::{Enclosure, EpisodeRecord, TranscriptRef};

/// Turns every entry of a parsed feed into an `EpisodeRecord`, in document
/// order. Extraction is best-effort and total: a malformed entry yields a
/// record with defaulted fields rather than being skipped, and this function
/// never fails.
pub fn extract_episodes(show_name: &str, document: &FeedDocument) -> Vec<EpisodeRecord> {
    document
        .entries
        .iter()
        .map(|entry| extract_episode(show_name, entry))
        .collect()
}

/// Extracts a single entry. Exposed for lookups that already know which
/// entry they want.
pub fn extract_episode(show_name: &str, entry: &FeedEntry) -> EpisodeRecord {
    // Guid is the primary identifier; the podcast-namespace episode number
    // is the fallback. Both absent leaves the id empty, which is tolerated.
    let id = if !entry.guid.is_empty() {
        entry.guid.clone()
    } else {
        entry.episode_number.clone()
    };

    let episode_number = if entry.episode_number.is_empty() {
        None
    } else {
        Some(entry.episode_number.clone())
    };

    let hosts = entry
        .persons
        .iter()
        .filter(|person| person.role == "host")
        .map(|person| person.name.trim().to_string())
        .filter(|name| !name.is_empty())
        .collect();

    let enclosures = entry
        .enclosures
        .iter()
        .map(|enclosure| Enclosure {
            url: enclosure.url.clone(),
            mime_type: enclosure.mime_type.clone(),
            length_bytes: enclosure.length.parse().unwrap_or(0),
        })
        .collect();

    // Transcripts without a url are unusable and dropped entirely.
    let transcripts: Vec<TranscriptRef> = entry
        .transcripts
        .iter()
        .filter_map(|transcript| {
            transcript.url.as_ref().map(|url| TranscriptRef {
                url: url.clone(),
                mime_type: transcript.mime_type.clone(),
                language: transcript
                    .language
                    .clone()
                    .unwrap_or_else(|| "en-us".to_string()),
            })
        })
        .collect();

    let transcript_url = transcripts.first().map(|t| t.url.clone());

    EpisodeRecord {
        show_name: show_name.to_string(),
        id,
        episode_number,
        title: entry.title.clone(),
        description: entry.description.trim().to_string(),
        published_date: entry.pub_date.clone(),
        link: entry.link.clone(),
        duration: entry.duration.clone(),
        hosts,
        enclosures,
        transcripts,
        transcript_url,
        chapters_url: entry.chapters_url.clone(),
    }
}

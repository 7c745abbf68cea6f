//! Track reconstruction.
//!
//! A track's clip array is an ordered list of identifiers; each one is
//! dereferenced through the chain timeline entry -> clip item -> AV source
//! -> file info. Title sources have no downstream chain, so missing links
//! degrade to empty values instead of failing.

use roxmltree::Node;

use crate::error::{Error, Result};
use crate::item::{
    AudioItem, PixelSize, StillItem, TimelineItem, TitleItem, TrackKind, VideoItem,
};
use crate::resolve::{
    attr_f64, attr_f64_or, attr_flag, attr_u32, attr_u64, child_with_attr, first_child,
    RecordIndex, ATTR_UID,
};

const TAG_TRACK: &str = "Track";
const TAG_TRACK_CLIPS: &str = "TrkClips";
const TAG_ITEM_ARRAY: &str = "TIArr";
const TAG_TITLE_SOURCE: &str = "TiTitleSource";
const TAG_STILL_ITEM: &str = "TmlnStillItem";
const TAG_VIDEO_ITEM: &str = "TmlnVideoItem";
const TAG_AUDIO_ITEM: &str = "TmlnAudioItem";

/// Materialize the ordered item list of one track.
pub(crate) fn reconstruct_track(
    data_str: Node<'_, '_>,
    index: &RecordIndex<'_, '_>,
    kind: TrackKind,
) -> Result<Vec<TimelineItem>> {
    let track = child_with_attr(
        data_str,
        Some(TAG_TRACK),
        "TrackTyp",
        &kind.type_id().to_string(),
    )
    .ok_or_else(|| Error::MissingElement(format!("{} track", kind.name())))?;

    let array = first_child(track, TAG_TRACK_CLIPS)
        .and_then(|clips| clips.attribute(ATTR_UID))
        .and_then(|uid| index.by_uid_tagged(TAG_ITEM_ARRAY, uid))
        .ok_or_else(|| Error::MissingElement(format!("clip array for {} track", kind.name())))?;

    let mut items = Vec::new();
    for entry_ref in array
        .children()
        .filter(|n| n.is_element() && n.tag_name().name() == ATTR_UID)
    {
        let Some(uid) = entry_ref.attribute(ATTR_UID) else {
            continue;
        };
        let Some(entry) = index.by_uid(uid) else {
            tracing::warn!("Dangling timeline entry reference: {}", uid);
            continue;
        };
        if let Some(item) = build_item(entry, index, kind)? {
            items.push(item);
        }
    }
    tracing::debug!("Reconstructed {} {} items", items.len(), kind.name());
    Ok(items)
}

/// Build one typed item from its timeline entry, classified by tag name.
fn build_item(
    entry: Node<'_, '_>,
    index: &RecordIndex<'_, '_>,
    kind: TrackKind,
) -> Result<Option<TimelineItem>> {
    let timeline_start = attr_f64(entry, "TmlnSrt");
    let timeline_end = attr_f64(entry, "TmlnEnd");
    let effects = collect_effects(entry);

    let tag = entry.tag_name().name();
    if tag == TAG_TITLE_SOURCE {
        if kind == TrackKind::Audio {
            return Err(Error::MisplacedItem {
                kind: "Title sequence",
                track: kind.name(),
            });
        }
        return Ok(Some(TimelineItem::Title(TitleItem {
            timeline_start,
            timeline_end,
            effects,
        })));
    }

    // Entry -> clip item -> AV source -> file info. Every link is optional;
    // a broken chain reads back as empty field values.
    let clip_item = first_child(entry, "ClipWMItem")
        .and_then(|n| n.attribute(ATTR_UID))
        .and_then(|uid| index.by_uid(uid));
    let av_source = clip_item
        .and_then(|n| first_child(n, "Srce"))
        .and_then(|n| n.attribute(ATTR_UID))
        .and_then(|uid| index.by_uid_tagged("AVSource", uid));
    let file_info = av_source
        .and_then(|n| n.attribute("FileID"))
        .and_then(|id| index.file_info(id));

    let name = clip_item
        .and_then(|n| n.attribute("ClpNam"))
        .unwrap_or_default()
        .to_string();
    let src_path = file_info
        .and_then(|n| n.attribute("SrceFn"))
        .unwrap_or_default()
        .to_string();
    let file_size = av_source.map(|n| attr_u64(n, "FileSize")).unwrap_or(0);
    let src_size_px = av_source
        .map(|n| PixelSize {
            width: attr_u32(n, "SrcWidth"),
            height: attr_u32(n, "SrcHeight"),
        })
        .unwrap_or_default();

    let source_start = attr_f64(entry, "ClpSrt");
    let source_end = attr_f64(entry, "ClpEnd");

    let item = match tag {
        TAG_STILL_ITEM => {
            if kind == TrackKind::Audio {
                return Err(Error::MisplacedItem {
                    kind: "Picture",
                    track: kind.name(),
                });
            }
            TimelineItem::Still(StillItem {
                timeline_start,
                timeline_end,
                effects,
                name,
                src_path,
                file_size,
                src_size_px,
            })
        }
        TAG_VIDEO_ITEM => TimelineItem::Video(VideoItem {
            timeline_start,
            timeline_end,
            effects,
            name,
            src_path,
            file_size,
            src_size_px,
            source_start,
            source_end,
        }),
        TAG_AUDIO_ITEM => TimelineItem::Audio(AudioItem {
            timeline_start,
            timeline_end,
            effects,
            name,
            src_path,
            file_size,
            src_size_px,
            source_start,
            source_end,
            is_muted: attr_flag(entry, "Mute"),
            fades_in: attr_flag(entry, "FadeIn"),
            fades_out: attr_flag(entry, "FadeOut"),
            volume: attr_f64_or(entry, "Volume", 1.0),
        }),
        other => {
            // Entry tags vary by producing-application version; anything
            // unrecognized is not an item.
            tracing::debug!("Skipping unrecognized timeline entry tag: {}", other);
            return Ok(None);
        }
    };
    Ok(Some(item))
}

/// Effect names attached to a timeline entry, in document order.
fn collect_effects(entry: Node<'_, '_>) -> Vec<String> {
    entry
        .children()
        .filter(|n| n.is_element() && n.tag_name().name() == "Efct")
        .filter_map(|n| n.attribute("EfctNam"))
        .map(str::to_string)
        .collect()
}

//! ffmpeg command synthesis from a reconstructed video track.
//!
//! The emitted syntax must match ffmpeg's CLI exactly: one input clause
//! per item, a labeled filter-graph fragment per input, and a trailing
//! concat filter.

use crate::error::RenderError;
use crate::item::{PixelSize, TimelineItem};

const OUTPUT_FILE: &str = "output.mp4";
const STILL_FRAMERATE: u32 = 24;

/// Synthesize an ffmpeg command that renders `items` back to back.
///
/// Items must be in timeline order, non-overlapping, and either all video
/// clips or all equally-sized still images; anything else is rejected
/// rather than guessed at.
pub(crate) fn ffmpeg_command(
    items: &[TimelineItem],
    substitutions: &[(String, String)],
) -> Result<String, RenderError> {
    if items.is_empty() {
        return Err(RenderError::EmptyTimeline);
    }

    let mut command = String::from("ffmpeg ");
    let mut filter = String::new();
    let mut has_videos = false;
    let mut has_images = false;
    let mut last_end = 0.0_f64;
    let mut last_size: Option<PixelSize> = None;

    for (i, item) in items.iter().enumerate() {
        if item.timeline_start() < last_end {
            return Err(RenderError::OverlappingItems {
                at: item.timeline_start(),
            });
        }

        let (path, size) = match item {
            TimelineItem::Video(video) => {
                has_videos = true;
                (video.src_path.as_str(), video.src_size_px)
            }
            TimelineItem::Still(still) => {
                has_images = true;
                (still.src_path.as_str(), still.src_size_px)
            }
            other => {
                return Err(RenderError::UnsupportedItem { kind: other.kind() });
            }
        };

        if has_videos && has_images {
            return Err(RenderError::MixedMedia);
        }

        if let TimelineItem::Still(_) = item {
            if let Some(expected) = last_size {
                if size != expected {
                    return Err(RenderError::SizeMismatch {
                        expected,
                        found: size,
                    });
                }
            }
        }

        let path = substitute(path.to_string(), substitutions);

        match item {
            TimelineItem::Video(video) => {
                command.push_str(&format!(
                    "-ss {} -to {} -i '{}' ",
                    video.source_start, video.source_end, path
                ));
                filter.push_str(&format!("[{i}:v] [{i}:a] "));
            }
            TimelineItem::Still(still) => {
                command.push_str(&format!(
                    "-loop 1 -framerate {STILL_FRAMERATE} -t {} -i '{}' ",
                    still.timeline_end - still.timeline_start,
                    path
                ));
                filter.push_str(&format!("[{i}] "));
            }
            _ => unreachable!("rejected above"),
        }

        last_end = item.timeline_end();
        last_size = Some(size);
    }

    let count = items.len();
    if has_videos {
        command.push_str(&format!(
            "-filter_complex '{filter}concat=n={count}:v=1:a=1 [v] [a]' -map '[v]' -map '[a]' "
        ));
    } else {
        command.push_str(&format!("-filter_complex '{filter}concat=n={count}:v=1:a=0' "));
    }
    command.push_str(OUTPUT_FILE);
    Ok(command)
}

/// Apply every substitution rule to `path`, in list order.
///
/// Each rule re-applies until its pattern no longer occurs, so a later
/// rule can match text an earlier rule introduced. A rule that can never
/// run dry (empty pattern, or a replacement containing the pattern) is
/// applied as a single pass instead.
fn substitute(mut path: String, rules: &[(String, String)]) -> String {
    for (find, replace) in rules {
        if find.is_empty() {
            continue;
        }
        if replace.contains(find.as_str()) {
            path = path.replace(find.as_str(), replace);
            continue;
        }
        while path.contains(find.as_str()) {
            path = path.replace(find.as_str(), replace);
        }
    }
    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::{StillItem, TitleItem, VideoItem};

    fn video(start: f64, end: f64, src_start: f64, src_end: f64, path: &str) -> TimelineItem {
        TimelineItem::Video(VideoItem {
            timeline_start: start,
            timeline_end: end,
            effects: Vec::new(),
            name: String::new(),
            src_path: path.to_string(),
            file_size: 0,
            src_size_px: PixelSize {
                width: 640,
                height: 480,
            },
            source_start: src_start,
            source_end: src_end,
        })
    }

    fn still(start: f64, end: f64, path: &str, width: u32, height: u32) -> TimelineItem {
        TimelineItem::Still(StillItem {
            timeline_start: start,
            timeline_end: end,
            effects: Vec::new(),
            name: String::new(),
            src_path: path.to_string(),
            file_size: 0,
            src_size_px: PixelSize { width, height },
        })
    }

    fn title(start: f64, end: f64) -> TimelineItem {
        TimelineItem::Title(TitleItem {
            timeline_start: start,
            timeline_end: end,
            effects: Vec::new(),
        })
    }

    #[test]
    fn test_video_command() {
        let items = vec![
            video(0.0, 5.0, 1.5, 6.5, "a.wmv"),
            video(5.0, 8.0, 0.0, 3.0, "b.wmv"),
        ];
        let command = ffmpeg_command(&items, &[]).unwrap();
        assert_eq!(
            command,
            "ffmpeg -ss 1.5 -to 6.5 -i 'a.wmv' -ss 0 -to 3 -i 'b.wmv' \
             -filter_complex '[0:v] [0:a] [1:v] [1:a] concat=n=2:v=1:a=1 [v] [a]' \
             -map '[v]' -map '[a]' output.mp4"
        );
    }

    #[test]
    fn test_still_command() {
        let items = vec![
            still(0.0, 5.0, "p.jpg", 640, 480),
            still(5.0, 7.0, "q.jpg", 640, 480),
        ];
        let command = ffmpeg_command(&items, &[]).unwrap();
        assert_eq!(
            command,
            "ffmpeg -loop 1 -framerate 24 -t 5 -i 'p.jpg' \
             -loop 1 -framerate 24 -t 2 -i 'q.jpg' \
             -filter_complex '[0] [1] concat=n=2:v=1:a=0' output.mp4"
        );
    }

    #[test]
    fn test_gap_between_items_is_allowed() {
        let items = vec![
            video(0.0, 5.0, 0.0, 5.0, "a.wmv"),
            video(6.0, 8.0, 0.0, 2.0, "b.wmv"),
        ];
        assert!(ffmpeg_command(&items, &[]).is_ok());
    }

    #[test]
    fn test_empty_timeline() {
        assert!(matches!(
            ffmpeg_command(&[], &[]),
            Err(RenderError::EmptyTimeline)
        ));
    }

    #[test]
    fn test_overlapping_items() {
        let items = vec![
            video(0.0, 5.0, 0.0, 5.0, "a.wmv"),
            video(3.0, 8.0, 0.0, 5.0, "b.wmv"),
        ];
        assert!(matches!(
            ffmpeg_command(&items, &[]),
            Err(RenderError::OverlappingItems { at }) if at == 3.0
        ));
    }

    #[test]
    fn test_title_is_unsupported() {
        let items = vec![title(0.0, 5.0)];
        assert!(matches!(
            ffmpeg_command(&items, &[]),
            Err(RenderError::UnsupportedItem { kind: "title" })
        ));
    }

    #[test]
    fn test_mixed_media_is_rejected() {
        let items = vec![
            video(0.0, 5.0, 0.0, 5.0, "a.wmv"),
            still(5.0, 7.0, "p.jpg", 640, 480),
        ];
        assert!(matches!(
            ffmpeg_command(&items, &[]),
            Err(RenderError::MixedMedia)
        ));
    }

    #[test]
    fn test_still_size_mismatch() {
        let items = vec![
            still(0.0, 5.0, "p.jpg", 640, 480),
            still(5.0, 7.0, "q.jpg", 800, 600),
        ];
        let err = ffmpeg_command(&items, &[]).unwrap_err();
        match err {
            RenderError::SizeMismatch { expected, found } => {
                assert_eq!(expected.width, 640);
                assert_eq!(found.width, 800);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_substitution_rules_apply_in_order() {
        let rules = vec![
            ("\\".to_string(), "/".to_string()),
            ("@:MyPictures".to_string(), "/home/x".to_string()),
        ];
        assert_eq!(
            substitute("@:MyPictures\\foo.jpg".to_string(), &rules),
            "/home/x/foo.jpg"
        );
    }

    #[test]
    fn test_substitution_reapplies_until_dry() {
        let rules = vec![("aa".to_string(), "a".to_string())];
        assert_eq!(substitute("aaaa".to_string(), &rules), "a");
    }

    #[test]
    fn test_substitution_terminates_when_replacement_contains_pattern() {
        let rules = vec![("a".to_string(), "aa".to_string())];
        assert_eq!(substitute("aba".to_string(), &rules), "aabaa");
    }

    #[test]
    fn test_substitution_skips_empty_pattern() {
        let rules = vec![(String::new(), "x".to_string())];
        assert_eq!(substitute("path".to_string(), &rules), "path");
    }
}

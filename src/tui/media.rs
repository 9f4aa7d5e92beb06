//! URL scanning for media embedded in bot replies.
//!
//! The bot links book covers and read-along videos inline; the TUI can't
//! embed them, but it can offer a cover preview overlay and track playable
//! previews so they get force-stopped on chat close.

const IMAGE_EXTENSIONS: &[&str] = &[".png", ".jpg", ".jpeg", ".gif", ".webp"];
const VIDEO_MARKERS: &[&str] = &["youtube.com/embed/", "youtube.com/watch", "youtu.be/"];
const VIDEO_EXTENSIONS: &[&str] = &[".mp4", ".webm"];

fn urls(text: &str) -> impl Iterator<Item = &str> {
    text.split_whitespace()
        .map(|token| token.trim_end_matches(['.', ',', ')', '!', '?']))
        .filter(|token| token.starts_with("http://") || token.starts_with("https://"))
}

/// Image URLs in order of appearance.
pub fn image_urls(text: &str) -> Vec<String> {
    urls(text)
        .filter(|url| {
            let lowered = url.to_lowercase();
            IMAGE_EXTENSIONS.iter().any(|ext| lowered.ends_with(ext))
        })
        .map(str::to_string)
        .collect()
}

/// Video URLs in order of appearance.
pub fn video_urls(text: &str) -> Vec<String> {
    urls(text)
        .filter(|url| {
            let lowered = url.to_lowercase();
            VIDEO_MARKERS.iter().any(|marker| lowered.contains(marker))
                || VIDEO_EXTENSIONS.iter().any(|ext| lowered.ends_with(ext))
        })
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_urls_found_and_ordered() {
        let text = "Covers: https://img/one.PNG and https://img/two.jpg, plus text";
        assert_eq!(
            image_urls(text),
            vec!["https://img/one.PNG".to_string(), "https://img/two.jpg".to_string()]
        );
    }

    #[test]
    fn test_video_urls_by_marker_and_extension() {
        let text = "Watch https://www.youtube.com/embed/abc123 or https://cdn/read-along.mp4!";
        assert_eq!(
            video_urls(text),
            vec![
                "https://www.youtube.com/embed/abc123".to_string(),
                "https://cdn/read-along.mp4".to_string(),
            ]
        );
    }

    #[test]
    fn test_plain_text_has_no_media() {
        assert!(image_urls("no links here").is_empty());
        assert!(video_urls("not even http").is_empty());
    }

    #[test]
    fn test_image_is_not_a_video() {
        let text = "https://img/cover.png";
        assert!(video_urls(text).is_empty());
        assert_eq!(image_urls(text).len(), 1);
    }
}

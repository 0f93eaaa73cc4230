//! Submission line bookkeeping
//!
//! Frame specs are single indices or ascending comma-joined sets; buffer
//! lines are deduplicated by exact string match.

/// Union `added` into the comma-joined spec, numerically sorted ascending.
/// Entries that do not parse as frame indices are dropped.
pub fn merge_frame_spec(existing: &str, added: &str) -> String {
    let mut indices: Vec<u32> = existing
        .split(',')
        .chain(added.split(','))
        .filter_map(|part| part.trim().parse().ok())
        .collect();
    indices.sort_unstable();
    indices.dedup();
    indices
        .iter()
        .map(|i| i.to_string())
        .collect::<Vec<_>>()
        .join(",")
}

/// `video,spec` with the note double-quoted when present
pub fn build_line(video_id: &str, frame_spec: &str, note: &str) -> String {
    if note.is_empty() {
        format!("{},{}", video_id, frame_spec)
    } else {
        format!("{},{},\"{}\"", video_id, frame_spec, note)
    }
}

/// Append `line` to the buffer unless an identical line already exists.
/// Blank lines are ignored by the duplicate check. Returns the new buffer,
/// or None when the line was a duplicate.
pub fn append_unique(buffer: &str, line: &str) -> Option<String> {
    let exists = buffer.lines().filter(|l| !l.is_empty()).any(|l| l == line);
    if exists {
        return None;
    }
    if buffer.is_empty() {
        Some(line.to_string())
    } else {
        Some(format!("{}\n{}", buffer, line))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_sorts_numerically_not_lexically() {
        assert_eq!(merge_frame_spec("3", "1"), "1,3");
        assert_eq!(merge_frame_spec("9,100", "20"), "9,20,100");
    }

    #[test]
    fn test_merge_dedupes() {
        assert_eq!(merge_frame_spec("1,3", "3"), "1,3");
    }

    #[test]
    fn test_merge_from_empty() {
        assert_eq!(merge_frame_spec("", "5"), "5");
    }

    #[test]
    fn test_merge_drops_unparsable() {
        assert_eq!(merge_frame_spec("1,x", "2"), "1,2");
    }

    #[test]
    fn test_build_line_quotes_note() {
        assert_eq!(build_line("v1", "5", ""), "v1,5");
        assert_eq!(build_line("v1", "1,3", "two frames"), "v1,1,3,\"two frames\"");
    }

    #[test]
    fn test_append_unique() {
        assert_eq!(append_unique("", "v1,5"), Some("v1,5".to_string()));
        assert_eq!(append_unique("v1,5", "v1,5"), None);
        assert_eq!(append_unique("v1,5", "v2,6"), Some("v1,5\nv2,6".to_string()));
    }
}

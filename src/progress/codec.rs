use super::types::ProgressEvent;

use bytes::Bytes;

/// Encodes one event as a JSON object followed by `\n`.
///
/// JSON string escaping guarantees the payload itself holds no raw newline,
/// so the line terminator is an unambiguous delimiter.
pub fn encode_event(event: &ProgressEvent) -> Result<Bytes, serde_json::Error> {
    let mut line = serde_json::to_vec(event)?;
    line.push(b'\n');
    Ok(Bytes::from(line))
}

/// Decodes every well-formed event line of an NDJSON body.
///
/// Blank lines and lines that are not a known event are skipped.
pub fn decode_events(text: &str) -> Vec<ProgressEvent> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter_map(|line| match serde_json::from_str::<ProgressEvent>(line) {
            Ok(event) => Some(event),
            Err(e) => {
                tracing::debug!("Ignoring undecodable event line: {}", e);
                None
            }
        })
        .collect()
}

/// Concatenates the `report` chunks of an NDJSON body in arrival order.
///
/// Returns `None` when the body carries no report event at all, which means
/// the producing run never completed.
pub fn collect_report_content(text: &str) -> Option<String> {
    let mut content: Option<String> = None;

    for event in decode_events(text) {
        if let ProgressEvent::Report { content: chunk } = event {
            content.get_or_insert_with(String::new).push_str(&chunk);
        }
    }

    content
}

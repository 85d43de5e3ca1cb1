//! Message extraction: raw Gmail message -> normalized MessageRecord

use google_gmail1::api::{Message, MessagePart};

use crate::models::MessageRecord;

/// Build a [`MessageRecord`] from a full-format Gmail message
///
/// Pure transform, no side effects. Headers are scanned case-insensitively
/// and only `from`, `date`, and `subject` are retained; if a header appears
/// more than once the first match wins. A record with `text: None` is a
/// valid result meaning no readable body content was found.
pub fn extract_record(id: &str, message: &Message) -> MessageRecord {
    let mut record = MessageRecord::new(id);

    let Some(payload) = message.payload.as_ref() else {
        return record;
    };

    if let Some(headers) = payload.headers.as_ref() {
        for header in headers {
            let (Some(name), Some(value)) = (&header.name, &header.value) else {
                continue;
            };
            match name.to_ascii_lowercase().as_str() {
                "from" if record.from.is_none() => record.from = Some(value.clone()),
                "date" if record.date.is_none() => record.date = Some(value.clone()),
                "subject" if record.subject.is_none() => record.subject = Some(value.clone()),
                _ => {}
            }
        }
    }

    record.text = extract_text(payload);
    record
}

/// Extract readable body text from a message payload
///
/// Multipart messages are scanned in listed order and the first part whose
/// MIME type is `text/plain` or `text/html` and that carries body data wins;
/// HTML is stripped down to its visible text. The scan stops at that first
/// match, so an HTML part listed before a plain-text part shadows it. This
/// ordering-dependent selection is intentional and relied on by callers.
///
/// Single-part messages have their body decoded directly as plain text,
/// whatever the declared MIME type.
fn extract_text(payload: &MessagePart) -> Option<String> {
    if let Some(parts) = payload.parts.as_ref() {
        for part in parts {
            let mime_type = part.mime_type.as_deref().unwrap_or("");
            if mime_type != "text/plain" && mime_type != "text/html" {
                continue;
            }
            // A matching part without body data does not end the scan.
            let Some(data) = part.body.as_ref().and_then(|b| b.data.as_ref()) else {
                continue;
            };
            let text = String::from_utf8_lossy(data).into_owned();
            return Some(if mime_type == "text/html" {
                strip_html(&text)
            } else {
                text
            });
        }
        None
    } else {
        payload
            .body
            .as_ref()
            .and_then(|b| b.data.as_ref())
            .map(|data| String::from_utf8_lossy(data).into_owned())
    }
}

/// Strip HTML tags from a string, returning only the visible text.
///
/// A small state-machine stripper, not a full HTML parser. `<br>`, `<p>`,
/// `<div>`, and `<li>` boundaries become newlines; all other tags are
/// dropped. Common HTML entities (`&amp;`, `&lt;`, `&gt;`, `&quot;`,
/// `&apos;`, `&nbsp;`, `&#NNN;`, `&#xHHH;`) are decoded.
pub fn strip_html(html: &str) -> String {
    let mut out = String::with_capacity(html.len());
    let mut in_tag = false;
    let mut tag_name = String::new();
    let mut name_done = false;
    let mut in_entity = false;
    let mut entity_buf = String::new();

    for ch in html.chars() {
        if in_entity {
            if ch == ';' {
                out.push_str(&decode_entity(&entity_buf));
                entity_buf.clear();
                in_entity = false;
            } else if entity_buf.len() < 10 {
                entity_buf.push(ch);
            } else {
                // Too long to be a real entity, emit raw
                out.push('&');
                out.push_str(&entity_buf);
                out.push(ch);
                entity_buf.clear();
                in_entity = false;
            }
            continue;
        }

        if in_tag {
            if ch == '>' {
                let lower = tag_name.to_ascii_lowercase();
                if matches!(
                    lower.as_str(),
                    "br" | "br/" | "p" | "/p" | "div" | "/div" | "li"
                ) {
                    out.push('\n');
                }
                tag_name.clear();
                name_done = false;
                in_tag = false;
            } else if !name_done {
                // Capture the tag name only; attributes are skipped
                if ch.is_whitespace() {
                    name_done = !tag_name.is_empty();
                } else if tag_name.len() < 50 {
                    tag_name.push(ch);
                }
            }
            continue;
        }

        match ch {
            '<' => {
                in_tag = true;
                tag_name.clear();
                name_done = false;
            }
            '&' => {
                in_entity = true;
                entity_buf.clear();
            }
            _ => out.push(ch),
        }
    }

    // Flush any incomplete entity
    if in_entity {
        out.push('&');
        out.push_str(&entity_buf);
    }

    out
}

/// Decode a single HTML entity (without the leading `&` and trailing `;`).
fn decode_entity(entity: &str) -> String {
    match entity {
        "amp" => "&".to_string(),
        "lt" => "<".to_string(),
        "gt" => ">".to_string(),
        "quot" => "\"".to_string(),
        "apos" => "'".to_string(),
        "nbsp" => " ".to_string(),
        s if s.starts_with('#') => {
            let num_str = &s[1..];
            let codepoint = if let Some(hex) = num_str.strip_prefix('x') {
                u32::from_str_radix(hex, 16).ok()
            } else {
                num_str.parse::<u32>().ok()
            };
            codepoint
                .and_then(char::from_u32)
                .map(|c| c.to_string())
                .unwrap_or_else(|| format!("&{entity};"))
        }
        _ => format!("&{entity};"),
    }
}

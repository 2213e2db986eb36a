use tinarelay_api::models::EventPayload;

/// Fills `{placeholder}` tokens in a status template from the event
/// payload. Unknown placeholders resolve to the empty string; formatting
/// never fails.
pub fn format_message(template: &str, payload: &EventPayload) -> String {
    let mut output = String::with_capacity(template.len());
    let mut chars = template.chars();

    while let Some(c) = chars.next() {
        if c != '{' {
            output.push(c);
            continue;
        }

        let mut key = String::new();
        let mut closed = false;
        for inner in chars.by_ref() {
            if inner == '}' {
                closed = true;
                break;
            }
            key.push(inner);
        }

        if closed {
            output.push_str(&resolve(&key, payload));
        } else {
            // Unterminated brace, keep it literal.
            output.push('{');
            output.push_str(&key);
        }
    }

    output
}

fn resolve(key: &str, payload: &EventPayload) -> String {
    match key {
        "username" => username(payload),
        "filename" => payload.str_field("name").unwrap_or("*Missing*").to_string(),
        "elapsedTime" => payload
            .f64_field("time")
            .filter(|&secs| secs != 0.0)
            .map(format_elapsed)
            .unwrap_or_default(),
        "reason" => payload.str_field("reason").unwrap_or("Unknown").to_string(),
        "labeltype" => payload.str_field("labeltype").unwrap_or("").to_string(),
        _ => String::new(),
    }
}

// The "Who's Printing" plugin sends an explicitly empty username when the
// printer is released, which reads as "nobody".
fn username(payload: &EventPayload) -> String {
    if payload.contains("username") {
        return payload.str_field("username").unwrap_or("nobody").to_string();
    }

    payload.str_field("name").unwrap_or("somebody").to_string()
}

/// Renders elapsed seconds as "1h 2m 3s", dropping leading zero parts.
pub fn format_elapsed(seconds: f64) -> String {
    let total = seconds.round().max(0.0) as u64;
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let secs = total % 60;

    if hours > 0 {
        format!("{hours}h {minutes}m {secs}s")
    } else if minutes > 0 {
        format!("{minutes}m {secs}s")
    } else {
        format!("{secs}s")
    }
}

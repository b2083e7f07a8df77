//! Organisation/person number ("orgno") formatting.
//!
//! The upstream API tags identification numbers with a bracketed
//! country code, e.g. `[SE]850101-9876`. The host edits them in a
//! human-friendly dashed form. Conversions in both directions live
//! here.

/// TLDs whose registries require a tagged identification number.
const ORGNO_TLDS: [&str; 2] = ["se", "nu"];

pub fn tld_supports_orgno(tld: &str) -> bool {
    let normalized = tld.trim().trim_start_matches('.').to_lowercase();
    ORGNO_TLDS.contains(&normalized.as_str())
}

/// Split a leading `[CC]` tag off the value, returning the uppercased
/// tag and the remainder with leading whitespace removed.
fn split_country_tag(value: &str) -> (Option<String>, &str) {
    let Some(rest) = value.strip_prefix('[') else {
        return (None, value);
    };
    let Some(end) = rest.find(']') else {
        return (None, value);
    };
    let tag = &rest[..end];
    if tag.len() < 2 || !tag.chars().all(|c| c.is_ascii_alphabetic()) {
        return (None, value);
    }
    (Some(tag.to_uppercase()), rest[end + 1..].trim_start())
}

fn has_country_tag(value: &str) -> bool {
    split_country_tag(value).0.is_some()
}

/// Human-editable display form: tag stripped, Swedish numbers dashed as
/// `YYMMDD-XXXX`. 12-digit values drop the century prefix first.
/// Anything else is returned trimmed but untouched.
pub fn format_for_display(orgno: &str) -> String {
    let (country, value) = split_country_tag(orgno.trim());

    if matches!(country.as_deref(), Some("SE") | None) {
        let digits: String = value.chars().filter(char::is_ascii_digit).collect();
        if digits.len() == 12 {
            return format!("{}-{}", &digits[2..8], &digits[8..]);
        }
        if digits.len() == 10 {
            return format!("{}-{}", &digits[..6], &digits[6..]);
        }
    }

    value.to_string()
}

/// API wire form: already-tagged values pass through unchanged; TLDs on
/// the allow-list get tagged `[SE]` with display formatting applied;
/// everything else is passed through trimmed.
pub fn format_for_api(orgno: &str, tld: &str) -> String {
    let value = orgno.trim();
    if value.is_empty() {
        return String::new();
    }
    if has_country_tag(value) {
        return value.to_string();
    }
    if tld_supports_orgno(tld) {
        return format!("[SE]{}", format_for_display(value));
    }
    value.to_string()
}

/// Pick the identification number out of the host's additional-field
/// map: first non-empty value whose key mentions "identification".
pub fn identification_from_fields<'a, I>(fields: I) -> Option<String>
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    fields.into_iter().find_map(|(key, value)| {
        let trimmed = value.trim();
        if key.to_lowercase().contains("identification") && !trimmed.is_empty() {
            Some(trimmed.to_string())
        } else {
            None
        }
    })
}

//! Line-oriented phone provisioning format
//!
//! Only two regions of a provisioning file are understood: the DSS key block
//! and the SIP account block. Everything else is carried through untouched.

pub mod dss;
pub mod sip;

use std::borrow::Cow;
use std::ops::Range;

use catalog_api::models::ConfigDocument;
use regex::Regex;

use crate::errors::CfgError;

pub use dss::{extract_dss_keys, format_dss_block, DSS_MARKER, MAX_DSS_KEYS};
pub use sip::{extract_sip_account, format_sip_block, END_OF_FILE, SIP_MARKER};

/// Structured projection of a raw provisioning file. Line endings are
/// normalised to `\n` first.
pub fn project(raw: String) -> ConfigDocument {
    let raw = normalize_line_endings(&raw);
    ConfigDocument {
        sip_account: extract_sip_account(&raw),
        dss_keys: extract_dss_keys(&raw),
        raw_config: raw,
    }
}

/// Turn `\r\n` and lone `\r` line endings into `\n`
pub fn normalize_line_endings(raw: &str) -> String {
    if !raw.contains('\r') {
        return raw.to_string();
    }
    raw.replace("\r\n", "\n").replace('\r', "\n")
}

/// Check that the structured fields can be written back without losing data
pub fn validate(document: &ConfigDocument) -> Result<(), CfgError> {
    if document.dss_keys.len() > MAX_DSS_KEYS as usize {
        return Err(CfgError::ValidationRejected(format!(
            "At most {} DSS keys are supported, got {}",
            MAX_DSS_KEYS,
            document.dss_keys.len()
        )));
    }

    let mut previous = 0;
    for key in &document.dss_keys {
        if key.position <= previous || key.position > MAX_DSS_KEYS {
            return Err(CfgError::ValidationRejected(format!(
                "DSS key position {} is out of order or outside 1..={}",
                key.position, MAX_DSS_KEYS
            )));
        }
        previous = key.position;

        for (name, value) in [("value", &key.value), ("label", &key.label), ("icon", &key.icon)] {
            check_value(&format!("DSS key {} {}", key.position, name), value)?;
        }
    }

    for (field, value) in document.sip_account.entries() {
        check_value(&format!("SIP field {}", field), value)?;
    }

    Ok(())
}

fn check_value(what: &str, value: &str) -> Result<(), CfgError> {
    if value.contains(['\n', '\r']) {
        return Err(CfgError::ValidationRejected(format!(
            "{} must fit on one line",
            what
        )));
    }
    if let Some(marker) = [DSS_MARKER, SIP_MARKER, END_OF_FILE]
        .into_iter()
        .find(|marker| value.contains(marker))
    {
        return Err(CfgError::ValidationRejected(format!(
            "{} must not contain {}",
            what, marker
        )));
    }
    Ok(())
}

/// Write the structured fields back into the raw document.
///
/// Both blocks are located in the raw text before anything is replaced, so a
/// value inside one block can never be mistaken for the other. An existing
/// DSS block is replaced in place, otherwise a new one is put at the top. An
/// existing SIP block is replaced in place, otherwise a new one is appended.
/// Text outside the two blocks is kept as is.
pub fn reconcile(document: &ConfigDocument) -> Result<String, CfgError> {
    validate(document)?;

    let raw = normalize_line_endings(&document.raw_config);
    // the replacement includes the blank line that closes the block
    let dss_block = format!("{}\n", format_dss_block(&document.dss_keys));
    let sip_block = format_sip_block(&document.sip_account);

    let dss_span = dss::DSS_BLOCK.find(&raw).map(|m| m.range());
    if dss_span.is_none() && raw.contains(DSS_MARKER) {
        return Err(CfgError::ValidationRejected(
            "DSS block is not closed by a blank line".to_string(),
        ));
    }

    let sip_span = find_outside(&sip::SIP_BLOCK, &raw, dss_span.as_ref());
    if sip_span.is_none() && outside(&raw, dss_span.as_ref()).contains(SIP_MARKER) {
        return Err(CfgError::ValidationRejected(format!(
            "SIP block is not closed by {}",
            END_OF_FILE
        )));
    }

    let mut edits: Vec<(Range<usize>, &str)> = Vec::with_capacity(2);
    if let Some(span) = dss_span.clone() {
        edits.push((span, dss_block.as_str()));
    }
    if let Some(span) = sip_span.clone() {
        edits.push((span, sip_block.as_str()));
    }
    edits.sort_by_key(|(span, _)| span.start);

    let mut config = String::with_capacity(raw.len() + dss_block.len() + sip_block.len());
    let mut cursor = 0;
    for (span, replacement) in edits {
        config.push_str(&raw[cursor..span.start]);
        config.push_str(replacement);
        cursor = span.end;
    }
    config.push_str(&raw[cursor..]);

    if dss_span.is_none() {
        config.insert_str(0, &dss_block);
    }

    if sip_span.is_none() {
        if config.ends_with(&dss_block) {
            config.push_str(&sip_block);
        } else {
            config = format!("{}\n{}", config.trim_end(), sip_block);
        }
    }

    Ok(config)
}

/// First match of `re` that does not overlap `skip`
pub(crate) fn find_outside(re: &Regex, raw: &str, skip: Option<&Range<usize>>) -> Option<Range<usize>> {
    let Some(skip) = skip else {
        return re.find(raw).map(|m| m.range());
    };
    re.find(&raw[..skip.start])
        .map(|m| m.range())
        .or_else(|| re.find_at(raw, skip.end).map(|m| m.range()))
}

/// `raw` without the `skip` span
fn outside<'a>(raw: &'a str, skip: Option<&Range<usize>>) -> Cow<'a, str> {
    match skip {
        Some(skip) => Cow::Owned(format!("{}{}", &raw[..skip.start], &raw[skip.end..])),
        None => Cow::Borrowed(raw),
    }
}

//! DSS key block of a provisioning file

use std::collections::BTreeMap;
use std::sync::LazyLock;

use catalog_api::models::{DssKey, DEFAULT_DSS_ICON};
use regex::Regex;

/// Opening marker of the DSS block
pub const DSS_MARKER: &str = "<DSSKEY CONFIG MODULE>";

/// Highest key position the block can describe
pub const MAX_DSS_KEYS: u32 = 32;

/// Whole block, from the marker through the blank line that closes it
pub(crate) static DSS_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)<DSSKEY CONFIG MODULE>\n--Dsskey Config1--(.*?)\n\n").expect("valid regex")
});

static FKEY_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^Fkey(\d+) (Type|Value|Title|ICON)[ \t]*:(.*)$").expect("valid regex")
});

#[derive(Default)]
struct KeyLines<'a> {
    key_type: Option<&'a str>,
    value: Option<&'a str>,
    title: Option<&'a str>,
    icon: Option<&'a str>,
}

/// Read the DSS keys out of a raw document.
///
/// Keys are returned in position order. A key needs its Type, Value and Title
/// lines; a missing ICON line means the default icon. No block, no keys.
pub fn extract_dss_keys(raw: &str) -> Vec<DssKey> {
    let Some(block) = DSS_BLOCK.captures(raw).and_then(|c| c.get(1)) else {
        return Vec::new();
    };

    let mut lines: BTreeMap<u32, KeyLines> = BTreeMap::new();
    for caps in FKEY_LINE.captures_iter(block.as_str()) {
        let Ok(position) = caps[1].parse::<u32>() else {
            continue;
        };
        if !(1..=MAX_DSS_KEYS).contains(&position) {
            continue;
        }
        let value = caps.get(3).map_or("", |m| m.as_str()).trim();
        let entry = lines.entry(position).or_default();
        // first occurrence wins
        let slot = match &caps[2] {
            "Type" => &mut entry.key_type,
            "Value" => &mut entry.value,
            "Title" => &mut entry.title,
            _ => &mut entry.icon,
        };
        slot.get_or_insert(value);
    }

    lines
        .into_iter()
        .filter_map(|(position, lines)| {
            let key_type = lines.key_type?.parse().ok()?;
            Some(DssKey {
                position,
                key_type,
                value: lines.value?.to_string(),
                label: lines.title?.to_string(),
                icon: lines.icon.unwrap_or(DEFAULT_DSS_ICON).to_string(),
            })
        })
        .collect()
}

/// Render the DSS block, ending with a newline
pub fn format_dss_block(keys: &[DssKey]) -> String {
    let mut lines = vec![DSS_MARKER.to_string(), "--Dsskey Config1--".to_string()];
    for key in keys {
        let i = key.position;
        lines.push(format!("Fkey{} Type    :{}", i, key.key_type));
        lines.push(format!("Fkey{} Value   :{}", i, key.value));
        lines.push(format!("Fkey{} Title   :{}", i, key.label));
        lines.push(format!("Fkey{} ICON    :{}", i, key.icon));
    }
    lines.push(String::new());
    lines.join("\n")
}

//! SIP account block of a provisioning file

use std::sync::LazyLock;

use catalog_api::models::{SipAccount, SipField};
use regex::Regex;

use super::dss::DSS_BLOCK;
use super::find_outside;

/// Opening marker of the SIP block
pub const SIP_MARKER: &str = "<SIP CONFIG MODULE>";

/// Line closing the SIP block, and the file
pub const END_OF_FILE: &str = "<<END OF FILE>>";

/// Whole block, from the marker through the end-of-file line
pub(crate) static SIP_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)<SIP CONFIG MODULE>(.*?)<<END OF FILE>>").expect("valid regex")
});

static SIP_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^SIP1 ([A-Za-z][A-Za-z ]*?)[ \t]*:(.*)$").expect("valid regex")
});

/// Label of a field inside the provisioning file
fn line_label(field: SipField) -> &'static str {
    match field {
        SipField::PhoneNumber => "Phone Number",
        SipField::DisplayName => "Display Name",
        SipField::RegisterAddr => "Register Addr",
        SipField::RegisterPort => "Register Port",
        SipField::RegisterUser => "Register User",
        SipField::RegisterPassword => "Register Password",
        SipField::RegisterTtl => "Register TTL",
        SipField::EnableReg => "Enable Reg",
    }
}

fn field_for_label(label: &str) -> Option<SipField> {
    SipField::ALL.into_iter().find(|field| line_label(*field) == label)
}

/// Read the first SIP line's account out of a raw document.
///
/// Fields that are missing, or the whole block missing, read as empty strings.
/// A SIP marker inside the DSS block does not start the SIP block.
pub fn extract_sip_account(raw: &str) -> SipAccount {
    let mut sip = SipAccount::default();
    let dss_span = DSS_BLOCK.find(raw).map(|m| m.range());
    let Some(block) = find_outside(&SIP_BLOCK, raw, dss_span.as_ref()) else {
        return sip;
    };

    let mut seen = Vec::with_capacity(SipField::ALL.len());
    for caps in SIP_LINE.captures_iter(&raw[block]) {
        let Some(field) = field_for_label(&caps[1]) else {
            continue;
        };
        if seen.contains(&field) {
            continue;
        }
        seen.push(field);
        sip.set(field, caps[2].trim());
    }
    sip
}

/// Render the SIP block, ending with the end-of-file line
pub fn format_sip_block(sip: &SipAccount) -> String {
    let mut out = String::from(SIP_MARKER);
    out.push('\n');
    for (field, value) in sip.entries() {
        // labels are padded so the colons line up
        out.push_str(&format!("SIP1 {:<17}:{}\n", line_label(field), value));
    }
    out.push_str(END_OF_FILE);
    out
}

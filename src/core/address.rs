//! MAC/OUI normalization: separator stripping, classification, and
//! canonical formatting.
//!
//! Classification never errors; malformed input is simply not a MAC/OUI.

const MAC_DIGITS: usize = 12;
const OUI_DIGITS: usize = 6;

/// A validated address in canonical form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalAddress {
    /// Colon-separated uppercase MAC, e.g. `74:13:EA:9A:22:2E`.
    pub mac: String,
    /// Bare uppercase OUI, e.g. `7413EA`.
    pub oui: String,
}

/// Strip every character that is not an ASCII hex digit.
pub fn remove_separators(text: &str) -> String {
    text.chars().filter(|c| c.is_ascii_hexdigit()).collect()
}

/// True iff the stripped text is exactly 12 hex digits within 48 bits.
pub fn is_mac(text: &str) -> bool {
    let hex = remove_separators(text);
    hex.len() == MAC_DIGITS
        && u64::from_str_radix(&hex, 16).is_ok_and(|v| v <= 0xFFFF_FFFF_FFFF)
}

/// True iff the stripped text is exactly 6 hex digits within 24 bits.
pub fn is_oui(text: &str) -> bool {
    let hex = remove_separators(text);
    hex.len() == OUI_DIGITS && u32::from_str_radix(&hex, 16).is_ok_and(|v| v <= 0xFF_FFFF)
}

/// The OUI portion (first 6 stripped digits) of a MAC.
pub fn oui_from_mac(mac: &str) -> String {
    let hex = remove_separators(mac);
    let end = hex.len().min(OUI_DIGITS);
    hex[..end].to_string()
}

/// Expand an OUI to a full MAC by right-padding with zeros.
pub fn mac_from_oui(oui: &str) -> String {
    format!("{:0<width$}", remove_separators(oui), width = MAC_DIGITS)
}

/// Left-zero-pad to 12 digits, uppercase, and insert `sep` between byte pairs.
pub fn format_mac(hex: &str, sep: &str) -> String {
    let padded = format!(
        "{:0>width$}",
        remove_separators(hex).to_uppercase(),
        width = MAC_DIGITS
    );
    join_pairs(&padded, sep)
}

/// Left-zero-pad to 6 digits, uppercase, and insert `sep` between byte pairs.
pub fn format_oui(hex: &str, sep: &str) -> String {
    let padded = format!(
        "{:0>width$}",
        remove_separators(hex).to_uppercase(),
        width = OUI_DIGITS
    );
    join_pairs(&padded, sep)
}

/// Classify free-form input and produce its canonical forms.
///
/// The OUI test runs first, then the MAC test; input that fits neither
/// returns `None`.
pub fn canonicalize(text: &str) -> Option<CanonicalAddress> {
    if is_oui(text) {
        Some(CanonicalAddress {
            mac: format_mac(&mac_from_oui(text), ":"),
            oui: format_oui(text, ""),
        })
    } else if is_mac(text) {
        Some(CanonicalAddress {
            mac: format_mac(text, ":"),
            oui: format_oui(&oui_from_mac(text), ""),
        })
    } else {
        None
    }
}

fn join_pairs(hex: &str, sep: &str) -> String {
    let chars: Vec<char> = hex.chars().collect();
    chars
        .chunks(2)
        .map(|pair| pair.iter().collect::<String>())
        .collect::<Vec<_>>()
        .join(sep)
}

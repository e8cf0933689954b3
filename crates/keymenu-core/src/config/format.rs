// Keymenu Config - Keybind Value Formats
// Current "<scanCode>, <modifierMask>" values and legacy virtual-key lists

use crate::virtual_key::virtual_key_to_scan_code;
use crate::{Keyset, Modifier, ScanCode};

/// Errors raised while decoding a persisted keybind value
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormatError {
    #[error("invalid number '{0}' in keybind value")]
    InvalidNumber(String),
}

fn parse_number<T: std::str::FromStr>(token: &str) -> Result<T, FormatError> {
    token
        .trim()
        .parse::<T>()
        .map_err(|_| FormatError::InvalidNumber(token.trim().to_string()))
}

/// Parse a current-format value: `"<scanCode>, <modifierMask>"`.
///
/// A missing second field means no modifier, an empty value means unset.
/// An empty key field ahead of a modifier is malformed.
/// Unknown scan codes resolve to `ScanCode::NONE` and unknown modifier bits
/// are dropped.
pub fn parse_current(value: &str) -> Result<Keyset, FormatError> {
    if value.trim().is_empty() {
        return Ok(Keyset::NONE);
    }

    let mut fields = value.split(',').map(str::trim);
    let first = fields.next().unwrap_or_default();
    let key = ScanCode::from_raw(parse_number::<u32>(first)?);
    let modifier = match fields.next().filter(|bits| !bits.is_empty()) {
        Some(bits) => Modifier::from_raw(parse_number::<u16>(bits)?),
        None => Modifier::NONE,
    };
    Ok(Keyset::new(key, modifier))
}

/// Encode a chord for the current-format section.
///
/// Returns `None` for an unset key, which is stored as an absent value.
pub fn encode_current(keyset: Keyset) -> Option<String> {
    if keyset.is_none() {
        return None;
    }
    Some(format!("{}, {}", keyset.key.code(), keyset.modifier.bits()))
}

/// Parse a legacy value: a comma-separated list of virtual-key codes.
///
/// The last non-modifier becomes the key and every modifier accumulates into
/// the mask. A modifier seen before any real key is held as the key until a
/// real key arrives and pushes it into the mask. An empty value is an unset
/// binding.
pub fn parse_legacy(value: &str) -> Result<Keyset, FormatError> {
    if value.trim().is_empty() {
        return Ok(Keyset::NONE);
    }

    let mut key = ScanCode::NONE;
    let mut modifier = Modifier::NONE;

    for token in value.split(',') {
        let code = virtual_key_to_scan_code(parse_number::<u32>(token)?);

        if code.is_modifier() {
            if key.is_none() {
                key = code;
            } else {
                modifier |= code.to_modifier();
            }
        } else {
            if key.is_modifier() {
                modifier |= key.to_modifier();
            }
            key = code;
        }
    }

    Ok(Keyset::new(key, modifier))
}

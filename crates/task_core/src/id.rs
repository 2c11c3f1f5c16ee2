//! Short task identifiers.
//!
//! An id is the SHA-256 digest of the description and the creation
//! timestamp, narrowed to its leading 64 bits and rendered in the URL-safe
//! base64 alphabet. Only the first [`ID_LEN`] characters are kept.

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use sha2::{Digest, Sha256};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

pub const ID_LEN: usize = 5;

pub fn generate_id(description: &str) -> String {
    generate_id_at(description, OffsetDateTime::now_utc())
}

pub fn generate_id_at(description: &str, timestamp: OffsetDateTime) -> String {
    let mut hasher = Sha256::new();
    hasher.update(description.as_bytes());
    // Rfc3339 only fails for offsets with seconds or years outside 0..=9999.
    if let Ok(rendered) = timestamp.format(&Rfc3339) {
        hasher.update(rendered.as_bytes());
    } else {
        hasher.update(timestamp.unix_timestamp_nanos().to_be_bytes());
    }
    let digest = hasher.finalize();

    let mut prefix = [0u8; 8];
    prefix.copy_from_slice(&digest[..8]);
    let number = u64::from_be_bytes(prefix);

    let mut encoded = URL_SAFE_NO_PAD.encode(number.to_be_bytes());
    encoded.truncate(ID_LEN);
    encoded
}

// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Format predicates for caller-supplied strings.
//!
//! Each predicate looks at a single string and nothing else. They never
//! panic, log or allocate. Ids and keys are checked after [`trim_input`];
//! tag values are checked verbatim.
//!
//! Lengths follow the host's string model: trimming strips every code point
//! at or below U+0020 (ASCII controls included, Unicode spaces kept), and
//! tag value length is counted in UTF-16 code units.
//!
//! | Input | Rule (after trim) |
//! |-------|-------------------|
//! | project id | `^[A-Za-z0-9-]{8,16}$` |
//! | tag key | `^[A-Za-z][A-Za-z0-9_]{0,63}$` |
//! | event name | same as tag key |
//! | tag value | at most 1024 UTF-16 code units, any content (not trimmed) |

/// Minimum project id length after trimming.
pub const PROJECT_ID_MIN_LEN: usize = 8;
/// Maximum project id length after trimming.
pub const PROJECT_ID_MAX_LEN: usize = 16;
/// Maximum tag key / event name length after trimming.
pub const TAG_KEY_MAX_LEN: usize = 64;
/// Maximum tag value length in UTF-16 code units.
pub const TAG_VALUE_MAX_LEN: usize = 1024;

/// Strips leading and trailing code points at or below U+0020.
pub fn trim_input(raw: &str) -> &str {
	raw.trim_matches(|c: char| c <= ' ')
}

/// Returns `true` if `project_id` is 8-16 ASCII letters, digits or hyphens
/// once trimmed.
pub fn is_valid_project_id(project_id: &str) -> bool {
	let trimmed = trim_input(project_id);
	(PROJECT_ID_MIN_LEN..=PROJECT_ID_MAX_LEN).contains(&trimmed.len())
		&& trimmed.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'-')
}

/// Returns `true` if `key` is a 1-64 character identifier starting with an
/// ASCII letter, followed by ASCII letters, digits or underscores.
pub fn is_valid_tag_key(key: &str) -> bool {
	is_identifier(trim_input(key))
}

/// Returns `true` if `value` is at most [`TAG_VALUE_MAX_LEN`] UTF-16 code units.
///
/// Length is counted in UTF-16 code units, so a character outside the Basic
/// Multilingual Plane (most emoji) counts twice.
pub fn is_valid_tag_value(value: &str) -> bool {
	// UTF-16 never needs more code units than UTF-8 needs bytes.
	value.len() <= TAG_VALUE_MAX_LEN || value.encode_utf16().count() <= TAG_VALUE_MAX_LEN
}

/// Returns `true` if `event_name` satisfies the tag key rule.
///
/// Events are recorded as tags, so the two share one format.
pub fn is_valid_event_name(event_name: &str) -> bool {
	is_valid_tag_key(event_name)
}

fn is_identifier(s: &str) -> bool {
	let mut bytes = s.bytes();
	match bytes.next() {
		Some(first) if first.is_ascii_alphabetic() => {
			s.len() <= TAG_KEY_MAX_LEN && bytes.all(|b| b.is_ascii_alphanumeric() || b == b'_')
		}
		_ => false,
	}
}

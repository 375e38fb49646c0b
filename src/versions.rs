/// A bible translation/edition supported by the application. `id` is the
/// internal identifier used in UI state and persistence; `api_id` is what
/// the upstream API expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BibleVersion {
    pub id: &'static str,
    pub api_id: &'static str,
    pub name: &'static str,
    pub abbreviation: Option<&'static str>,
    pub default: bool,
}

/// Supported bible versions. Non-empty by construction; at most one entry
/// carries `default: true`.
pub const BIBLE_VERSIONS: &[BibleVersion] = &[
    BibleVersion {
        id: "asv",
        api_id: "685d1470fe4d5c3b-01",
        name: "American Standard Version",
        abbreviation: Some("ASV"),
        default: true,
    },
    BibleVersion {
        id: "kjv",
        api_id: "de4e12af7f28f599-01",
        name: "King James Version",
        abbreviation: Some("KJV"),
        default: false,
    },
    BibleVersion {
        id: "fbv",
        api_id: "65eec8e0b60e656b-01",
        name: "Free Bible Version",
        abbreviation: Some("FBV"),
        default: false,
    },
    BibleVersion {
        id: "lsv",
        api_id: "01b29f4b342acc35-01",
        name: "Literal Standard Version",
        abbreviation: Some("LSV"),
        default: false,
    },
];

/// The version flagged as default, or the first registry entry if none is.
pub fn default_version() -> &'static BibleVersion {
    BIBLE_VERSIONS
        .iter()
        .find(|v| v.default)
        .unwrap_or(&BIBLE_VERSIONS[0])
}

/// Resolves an internal id or an upstream api id to the upstream api id.
///
/// Lookup order: internal id, then api id. Unknown non-empty input is passed
/// through unchanged and trusted to already be a valid upstream id. Empty or
/// absent input resolves to the default version's api id.
pub fn resolve_api_id(id_or_api_id: Option<&str>) -> String {
    let Some(input) = id_or_api_id.map(str::trim).filter(|s| !s.is_empty()) else {
        return default_version().api_id.to_string();
    };

    if let Some(version) = BIBLE_VERSIONS.iter().find(|v| v.id == input) {
        return version.api_id.to_string();
    }
    if let Some(version) = BIBLE_VERSIONS.iter().find(|v| v.api_id == input) {
        return version.api_id.to_string();
    }
    input.to_string()
}

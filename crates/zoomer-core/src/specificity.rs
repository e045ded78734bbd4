//! Specificity model: component bitmask and record ranking.
//!
//! A stored preference records which URL components were significant when it
//! was written. Ranking uses fixed powers of ten so any higher-order
//! component strictly outranks every combination of lower-order ones:
//! host 1, path 10, query 100, fragment 1000. The only possible tie is
//! between identical score shapes, which the matcher breaks by record id.

use serde::{Deserialize, Serialize};

use crate::store::ZoomRecord;
use crate::url_parts::UrlParts;

const HOST_SCORE: u32 = 1;
const PATH_SCORE: u32 = 10;
const QUERY_SCORE: u32 = 100;
const FRAGMENT_SCORE: u32 = 1000;

/// Bit flags for the optional URL components. Host is implicit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ComponentMask(u8);

impl ComponentMask {
    pub const PATH: u8 = 1;
    pub const QUERY: u8 = 2;
    pub const FRAGMENT: u8 = 4;

    pub const HOST_ONLY: Self = Self(0);
    pub const ALL: Self = Self(Self::PATH | Self::QUERY | Self::FRAGMENT);

    /// Build a mask from the three user toggles.
    pub fn from_options(path: bool, query: bool, fragment: bool) -> Self {
        let mut bits = 0;
        if path {
            bits |= Self::PATH;
        }
        if query {
            bits |= Self::QUERY;
        }
        if fragment {
            bits |= Self::FRAGMENT;
        }
        Self(bits)
    }

    /// Reconstruct a mask from its stored integer form. Unknown bits are dropped.
    pub fn from_bits(bits: u8) -> Self {
        Self(bits & Self::ALL.0)
    }

    pub fn bits(self) -> u8 {
        self.0
    }

    pub fn has_path(self) -> bool {
        self.0 & Self::PATH != 0
    }

    pub fn has_query(self) -> bool {
        self.0 & Self::QUERY != 0
    }

    pub fn has_fragment(self) -> bool {
        self.0 & Self::FRAGMENT != 0
    }
}

/// Deterministic rank of a stored record. A masked component only counts
/// when its stored value is non-trivial, so a host-only path of `/` does
/// not inflate the score.
pub fn specificity_score(record: &ZoomRecord) -> u32 {
    let mut score = HOST_SCORE;
    if record.component_mask.has_path() && record.path != "/" {
        score += PATH_SCORE;
    }
    if record.component_mask.has_query() && !record.query.is_empty() {
        score += QUERY_SCORE;
    }
    if record.component_mask.has_fragment() && !record.fragment.is_empty() {
        score += FRAGMENT_SCORE;
    }
    score
}

/// Canonical string form of a URL filtered through a component mask:
/// host plus whichever of path/query/fragment the mask includes.
pub fn standardized_url(parts: &UrlParts, mask: ComponentMask) -> String {
    let mut out = parts.host.clone();
    if mask.has_path() {
        out.push_str(&parts.path);
    }
    if mask.has_query() {
        out.push_str(&parts.query);
    }
    if mask.has_fragment() {
        out.push_str(&parts.fragment);
    }
    out
}

/// One diagnostic match level for a URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecificityLevel {
    pub mask: ComponentMask,
    pub url: String,
    pub label: &'static str,
}

/// Enumerate the match levels applicable to a URL, most specific first.
/// Combinations whose optional pieces are empty are skipped. Used for
/// diagnostics and preview output, not by the matcher itself.
pub fn specificity_levels(parts: &UrlParts) -> Vec<SpecificityLevel> {
    let mut levels = Vec::new();
    let has_path = parts.path != "/";

    if !parts.fragment.is_empty() || !parts.query.is_empty() {
        levels.push(level(parts, ComponentMask::ALL, "host + path + query + fragment"));
    }
    if !parts.query.is_empty() && has_path {
        let mask = ComponentMask::from_bits(ComponentMask::PATH | ComponentMask::QUERY);
        levels.push(level(parts, mask, "host + path + query"));
    }
    if !parts.fragment.is_empty() && has_path {
        let mask = ComponentMask::from_bits(ComponentMask::PATH | ComponentMask::FRAGMENT);
        levels.push(level(parts, mask, "host + path + fragment"));
    }
    if has_path {
        let mask = ComponentMask::from_bits(ComponentMask::PATH);
        levels.push(level(parts, mask, "host + path"));
    }
    levels.push(level(parts, ComponentMask::HOST_ONLY, "host only"));

    levels
}

fn level(parts: &UrlParts, mask: ComponentMask, label: &'static str) -> SpecificityLevel {
    SpecificityLevel {
        mask,
        url: standardized_url(parts, mask),
        label,
    }
}

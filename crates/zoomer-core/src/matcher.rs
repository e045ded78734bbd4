//! Best-match selection over a host's stored records.

use crate::specificity::specificity_score;
use crate::store::ZoomRecord;
use crate::url_parts::UrlParts;

/// True when every component flagged in the record's own mask equals the
/// URL's normalized value. Components outside the mask are ignored, so a
/// path-only record matches regardless of the URL's query or fragment.
pub fn record_matches(record: &ZoomRecord, parts: &UrlParts) -> bool {
    if record.host != parts.host {
        return false;
    }
    if record.component_mask.has_path() && record.path != parts.path {
        return false;
    }
    if record.component_mask.has_query() && record.query != parts.query {
        return false;
    }
    if record.component_mask.has_fragment() && record.fragment != parts.fragment {
        return false;
    }
    true
}

/// Pick the matching record with the highest specificity score.
///
/// Candidates are expected to be host-scoped already (host mismatches are
/// still rejected). Equal scores are broken by the lowest record id, so the
/// result does not depend on slice order.
pub fn find_best_match<'a>(
    parts: &UrlParts,
    candidates: &'a [ZoomRecord],
) -> Option<&'a ZoomRecord> {
    let mut best: Option<(&ZoomRecord, u32)> = None;

    for record in candidates {
        if !record_matches(record, parts) {
            continue;
        }
        let score = specificity_score(record);
        let wins = match best {
            None => true,
            Some((current, best_score)) => {
                score > best_score || (score == best_score && record.id < current.id)
            }
        };
        if wins {
            best = Some((record, score));
        }
    }

    best.map(|(record, _)| record)
}

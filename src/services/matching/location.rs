// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Campus/location agreement and meeting place labels.

use crate::models::AvailabilitySlot;

/// Label used when a relaxed pairing has no place at all.
pub const MANUAL_COORDINATION: &str = "To be arranged (manual coordination required)";

/// Which site attributes two slots agree on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SiteMatch {
    pub campus: bool,
    /// Both labels present and equal ignoring case
    pub location: bool,
}

impl SiteMatch {
    pub fn between(a: &AvailabilitySlot, b: &AvailabilitySlot) -> Self {
        let campus = matches!((&a.campus, &b.campus), (Some(x), Some(y)) if x == y);
        let location = matches!(
            (&a.location, &b.location),
            (Some(x), Some(y)) if x.to_lowercase() == y.to_lowercase()
        );
        Self { campus, location }
    }
}

/// Pick the meeting place for a slot pairing.
///
/// Agreed location (prefixed by the shared campus), else whichever side
/// named a location, else the shared campus.
pub fn resolve_location(
    a: &AvailabilitySlot,
    b: &AvailabilitySlot,
    site: SiteMatch,
) -> Option<String> {
    if site.location {
        let label = a.location.as_deref()?;
        return Some(match a.campus.as_deref() {
            Some(campus) if site.campus => format!("{campus} - {label}"),
            _ => label.to_string(),
        });
    }

    if let Some(location) = a.location.as_ref().or(b.location.as_ref()) {
        return Some(location.clone());
    }

    if site.campus {
        return a.campus.clone();
    }

    None
}

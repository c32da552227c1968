use chrono::{DateTime, Utc};
use crate::core::relative_time::relative_time;
use crate::models::{Candidate, PublicProfile, UserRecord, ANONYMOUS_NAME};

impl PublicProfile {
    /// Public shape of a stored record, without distance information
    ///
    /// Missing display fields become empty strings. Anonymous records are
    /// masked, see [`PublicProfile::redacted`].
    pub fn from_record(record: &UserRecord, now: DateTime<Utc>) -> Self {
        Self {
            id: record.id.to_string(),
            name: record.name.clone().unwrap_or_default(),
            headline: record.headline.clone().unwrap_or_default(),
            profile_image: record.profile_image.clone().unwrap_or_default(),
            location: record.location.clone().unwrap_or_default(),
            distance: None,
            bearing: None,
            last_visit: record.last_location_update.map(|ts| relative_time(ts, now)),
            is_anonymous: record.anonymous(),
        }
        .redacted()
    }

    /// Public shape of a ranked candidate
    pub fn from_candidate(candidate: &Candidate, now: DateTime<Utc>) -> Self {
        Self {
            distance: Some(candidate.distance),
            bearing: candidate.bearing,
            ..Self::from_record(&candidate.record, now)
        }
    }

    /// Apply the anonymity mask
    ///
    /// Idempotent: masking an already masked profile changes nothing.
    pub fn redacted(self) -> Self {
        if !self.is_anonymous {
            return self;
        }

        Self {
            name: ANONYMOUS_NAME.to_string(),
            headline: String::new(),
            profile_image: String::new(),
            location: String::new(),
            ..self
        }
    }
}

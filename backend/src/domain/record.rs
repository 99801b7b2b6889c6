//! Criminal record model and validated creation input.
//!
//! Records are immutable after creation: the classifier-derived fields
//! (`danger_level`, `predicted_crime_type`, `recidivism_score`) are stamped
//! exactly once by [`RecordDraft::into_record`] and there is no update
//! operation. Identifiers come from the store's monotonic counter and are
//! never reused within a process lifetime.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::classifier;

/// Severity of the recorded crime.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema,
)]
pub enum CrimeSeverity {
    Low,
    #[default]
    Medium,
    High,
}

/// Current status of the subject.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema,
)]
pub enum RecordStatus {
    #[default]
    Wanted,
    Arrested,
    Released,
}

/// Classifier output for how dangerous a subject is considered.
///
/// The ordinal ordering `Low < Medium < High` is relied upon by callers
/// checking monotonicity, so the variant order is load-bearing.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema,
)]
pub enum DangerLevel {
    Low,
    Medium,
    High,
}

/// Classifier output for the most likely crime category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum PredictedCrime {
    Theft,
    Assault,
    Fraud,
    #[serde(rename = "Drug Offense")]
    DrugOffense,
}

impl fmt::Display for PredictedCrime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Theft => "Theft",
            Self::Assault => "Assault",
            Self::Fraud => "Fraud",
            Self::DrugOffense => "Drug Offense",
        };
        write!(f, "{label}")
    }
}

/// A stored criminal record, including the derived classifier fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CriminalRecord {
    /// Store-assigned identifier, unique for the lifetime of the store.
    pub id: u64,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    /// Crime category; falls back to the predicted category when omitted.
    pub crime_type: String,
    pub crime_severity: CrimeSeverity,
    pub prior_convictions: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_known_location: Option<String>,
    pub status: RecordStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub eye_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hair_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scars_marks: Option<String>,
    /// Relative path of a stored upload, when a photo was submitted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo_path: Option<String>,
    pub danger_level: DangerLevel,
    pub predicted_crime_type: PredictedCrime,
    /// `min(1.0, prior_convictions * 0.2)`, stamped at creation.
    pub recidivism_score: f64,
    pub created_at: DateTime<Utc>,
}

/// Reduced view returned by the listing endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecordSummary {
    pub id: u64,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    pub crime_type: String,
    pub status: RecordStatus,
    pub danger_level: DangerLevel,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo_path: Option<String>,
}

impl From<&CriminalRecord> for RecordSummary {
    fn from(record: &CriminalRecord) -> Self {
        Self {
            id: record.id,
            name: record.name.clone(),
            age: record.age,
            crime_type: record.crime_type.clone(),
            status: record.status,
            danger_level: record.danger_level,
            photo_path: record.photo_path.clone(),
        }
    }
}

/// Validation failures raised when constructing a [`RecordDraft`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordValidationError {
    /// Name was missing or blank once trimmed.
    EmptyName,
}

impl fmt::Display for RecordValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "name must not be empty"),
        }
    }
}

impl std::error::Error for RecordValidationError {}

/// Validated input for creating a record.
///
/// `name` is the only required field; everything else defaults the way the
/// intake form does (severity `Medium`, status `Wanted`, zero priors).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RecordDraft {
    name: String,
    pub age: Option<u32>,
    pub gender: Option<String>,
    pub crime_type: Option<String>,
    pub crime_severity: CrimeSeverity,
    pub prior_convictions: u32,
    pub last_known_location: Option<String>,
    pub status: RecordStatus,
    pub height: Option<f64>,
    pub weight: Option<f64>,
    pub eye_color: Option<String>,
    pub hair_color: Option<String>,
    pub scars_marks: Option<String>,
    pub photo_path: Option<String>,
}

impl RecordDraft {
    /// Construct a draft from the subject's name, trimming surrounding
    /// whitespace.
    pub fn new(name: &str) -> Result<Self, RecordValidationError> {
        let normalized = name.trim();
        if normalized.is_empty() {
            return Err(RecordValidationError::EmptyName);
        }
        Ok(Self {
            name: normalized.to_owned(),
            ..Self::default()
        })
    }

    /// Subject name recorded on the draft.
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Finalise the draft into a stored record, stamping the identifier,
    /// creation time, and classifier-derived fields.
    pub fn into_record(self, id: u64, created_at: DateTime<Utc>) -> CriminalRecord {
        let model_age = self.age.unwrap_or(classifier::DEFAULT_AGE);
        let danger_level = classifier::risk_level(self.prior_convictions, self.crime_severity);
        let predicted_crime_type = classifier::predicted_crime_type(model_age);
        let recidivism_score = classifier::recidivism_score(self.prior_convictions);
        let crime_type = self
            .crime_type
            .unwrap_or_else(|| predicted_crime_type.to_string());

        CriminalRecord {
            id,
            name: self.name,
            age: self.age,
            gender: self.gender,
            crime_type,
            crime_severity: self.crime_severity,
            prior_convictions: self.prior_convictions,
            last_known_location: self.last_known_location,
            status: self.status,
            height: self.height,
            weight: self.weight,
            eye_color: self.eye_color,
            hair_color: self.hair_color,
            scars_marks: self.scars_marks,
            photo_path: self.photo_path,
            danger_level,
            predicted_crime_type,
            recidivism_score,
            created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn draft(name: &str) -> RecordDraft {
        RecordDraft::new(name).expect("valid draft")
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    fn blank_names_are_rejected(#[case] name: &str) {
        let err = RecordDraft::new(name).expect_err("blank name must fail");
        assert_eq!(err, RecordValidationError::EmptyName);
    }

    #[test]
    fn name_is_trimmed() {
        assert_eq!(draft("  Jane Smith  ").name(), "Jane Smith");
    }

    #[test]
    fn derived_fields_are_stamped_at_creation() {
        let mut d = draft("John Doe");
        d.age = Some(28);
        d.prior_convictions = 4;
        d.crime_severity = CrimeSeverity::Low;
        let record = d.into_record(7, Utc::now());

        assert_eq!(record.id, 7);
        assert_eq!(record.danger_level, DangerLevel::High);
        assert_eq!(record.predicted_crime_type, PredictedCrime::Assault);
        assert!((record.recidivism_score - 0.8).abs() < f64::EPSILON);
    }

    #[test]
    fn crime_type_falls_back_to_prediction() {
        let mut d = draft("John Doe");
        d.age = Some(52);
        let record = d.into_record(1, Utc::now());
        assert_eq!(record.crime_type, "Drug Offense");

        let mut d = draft("Jane Smith");
        d.crime_type = Some("Arson".to_owned());
        let record = d.into_record(2, Utc::now());
        assert_eq!(record.crime_type, "Arson");
    }

    #[test]
    fn record_serialises_camel_case() {
        let record = draft("John Doe").into_record(1, Utc::now());
        let value = serde_json::to_value(&record).expect("serialise record");
        assert!(value.get("priorConvictions").is_some());
        assert!(value.get("dangerLevel").is_some());
        assert!(value.get("prior_convictions").is_none());
        // Optional fields that were never supplied stay off the wire.
        assert!(value.get("photoPath").is_none());
    }

    #[test]
    fn drug_offense_serialises_with_space() {
        let value = serde_json::to_value(PredictedCrime::DrugOffense).expect("serialise");
        assert_eq!(value.as_str(), Some("Drug Offense"));
    }

    #[test]
    fn summary_projects_listing_fields() {
        let mut d = draft("Jane Smith");
        d.age = Some(41);
        d.photo_path = Some("uploads/jane_ab12cd34.jpg".to_owned());
        let record = d.into_record(3, Utc::now());
        let summary = RecordSummary::from(&record);

        assert_eq!(summary.id, 3);
        assert_eq!(summary.name, "Jane Smith");
        assert_eq!(summary.crime_type, "Fraud");
        assert_eq!(summary.photo_path.as_deref(), Some("uploads/jane_ab12cd34.jpg"));
    }
}

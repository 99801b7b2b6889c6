//! Rule-based predictors for danger level, crime category, and recidivism.
//!
//! Despite the "AI model" labels on the API surface, these are fixed
//! threshold tables over two or three inputs. They stay explicit, named,
//! pure functions so nobody mistakes them for statistical output.

use crate::domain::record::{CrimeSeverity, DangerLevel, PredictedCrime};

/// Age assumed when the intake form omits one.
pub const DEFAULT_AGE: u32 = 30;

/// Danger classification from prior convictions and crime severity.
///
/// High when `prior_convictions >= 3` or the severity is `High`; Medium when
/// `prior_convictions >= 1` or the severity is `Medium`; Low otherwise.
pub fn risk_level(prior_convictions: u32, crime_severity: CrimeSeverity) -> DangerLevel {
    if prior_convictions >= 3 || crime_severity == CrimeSeverity::High {
        DangerLevel::High
    } else if prior_convictions >= 1 || crime_severity == CrimeSeverity::Medium {
        DangerLevel::Medium
    } else {
        DangerLevel::Low
    }
}

/// Crime-category prediction as a step function of age.
pub fn predicted_crime_type(age: u32) -> PredictedCrime {
    match age {
        0..=24 => PredictedCrime::Theft,
        25..=34 => PredictedCrime::Assault,
        35..=49 => PredictedCrime::Fraud,
        _ => PredictedCrime::DrugOffense,
    }
}

/// Recidivism score in `[0, 1]`: each prior conviction adds 0.2, saturating.
pub fn recidivism_score(prior_convictions: u32) -> f64 {
    (f64::from(prior_convictions) * 0.2).min(1.0)
}

/// Recidivism risk bucket used by the ad-hoc prediction endpoint.
///
/// Note the cutoffs (`> 3`, `> 1`) differ from [`risk_level`]; both ladders
/// are part of the API contract.
pub fn recidivism_risk(prior_convictions: u32) -> DangerLevel {
    if prior_convictions > 3 {
        DangerLevel::High
    } else if prior_convictions > 1 {
        DangerLevel::Medium
    } else {
        DangerLevel::Low
    }
}

//! icf-assessment
//!
//! Questionnaire wizard for ICF (International Classification of Functioning,
//! Disability and Health) assessments: step navigation, disability and
//! environmental scoring, and export of the flattened results.

pub mod config;
pub mod error;
pub mod telemetry;
pub mod workflows;

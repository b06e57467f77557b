use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Token submitted for "not specified" on both ICF rating scales.
pub const NOT_SPECIFIED_TOKEN: &str = "8";
/// Token submitted for "not applicable" on both ICF rating scales.
pub const NOT_APPLICABLE_TOKEN: &str = "9";

/// A single rating as captured by the questionnaire.
///
/// Parsing is lenient: tokens that are neither a sentinel nor an integer in
/// `-4..=4` are kept as [`RatingCode::Unrecognized`] so the raw value can still
/// be echoed back, but scoring never aggregates them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RatingCode {
    Value(i8),
    NotSpecified,
    NotApplicable,
    Unrecognized(String),
}

impl RatingCode {
    pub fn parse(token: &str) -> Self {
        let trimmed = token.trim();
        match trimmed {
            NOT_SPECIFIED_TOKEN => Self::NotSpecified,
            NOT_APPLICABLE_TOKEN => Self::NotApplicable,
            _ => match trimmed.parse::<i8>() {
                Ok(value) if (-4..=4).contains(&value) => Self::Value(value),
                _ => Self::Unrecognized(token.to_string()),
            },
        }
    }

    pub fn token(&self) -> String {
        match self {
            Self::Value(value) => value.to_string(),
            Self::NotSpecified => NOT_SPECIFIED_TOKEN.to_string(),
            Self::NotApplicable => NOT_APPLICABLE_TOKEN.to_string(),
            Self::Unrecognized(raw) => raw.clone(),
        }
    }

    pub const fn value(&self) -> Option<i8> {
        match self {
            Self::Value(value) => Some(*value),
            _ => None,
        }
    }

    pub const fn is_sentinel(&self) -> bool {
        matches!(self, Self::NotSpecified | Self::NotApplicable)
    }
}

impl From<String> for RatingCode {
    fn from(value: String) -> Self {
        Self::parse(&value)
    }
}

impl From<&str> for RatingCode {
    fn from(value: &str) -> Self {
        Self::parse(value)
    }
}

impl From<RatingCode> for String {
    fn from(value: RatingCode) -> Self {
        value.token()
    }
}

impl fmt::Display for RatingCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.token())
    }
}

/// The two ICF qualifier scales used by the questionnaire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RatingScale {
    /// 0–4 severity plus the 8/9 sentinels.
    Impairment,
    /// -4..4 barrier/facilitator plus the 8/9 sentinels.
    Environmental,
}

impl RatingScale {
    pub fn accepts(self, code: &RatingCode) -> bool {
        match code {
            RatingCode::Value(value) => self.value_range().contains(value),
            RatingCode::NotSpecified | RatingCode::NotApplicable => true,
            RatingCode::Unrecognized(_) => false,
        }
    }

    pub const fn value_range(self) -> std::ops::RangeInclusive<i8> {
        match self {
            Self::Impairment => 0..=4,
            Self::Environmental => -4..=4,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FunctionalSection {
    BodyFunctions,
    ActivityParticipation,
}

impl FunctionalSection {
    pub const fn label(self) -> &'static str {
        match self {
            Self::BodyFunctions => "Body Functions",
            Self::ActivityParticipation => "Activity and Participation",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FunctionalDomain {
    MentalFunctions,
    SensoryFunctions,
    VoiceSpeechFunctions,
    CardiovascularFunctions,
    DigestiveFunctions,
    MovementFunctions,
    Learning,
    Communication,
    Mobility,
    SelfCare,
    DomesticLife,
    InterpersonalInteractions,
    MajorLifeAreas,
    CommunityLife,
}

impl FunctionalDomain {
    pub const fn ordered() -> [Self; 14] {
        [
            Self::MentalFunctions,
            Self::SensoryFunctions,
            Self::VoiceSpeechFunctions,
            Self::CardiovascularFunctions,
            Self::DigestiveFunctions,
            Self::MovementFunctions,
            Self::Learning,
            Self::Communication,
            Self::Mobility,
            Self::SelfCare,
            Self::DomesticLife,
            Self::InterpersonalInteractions,
            Self::MajorLifeAreas,
            Self::CommunityLife,
        ]
    }

    pub fn in_section(section: FunctionalSection) -> Vec<Self> {
        Self::ordered()
            .into_iter()
            .filter(|domain| domain.section() == section)
            .collect()
    }

    pub const fn section(self) -> FunctionalSection {
        match self {
            Self::MentalFunctions
            | Self::SensoryFunctions
            | Self::VoiceSpeechFunctions
            | Self::CardiovascularFunctions
            | Self::DigestiveFunctions
            | Self::MovementFunctions => FunctionalSection::BodyFunctions,
            _ => FunctionalSection::ActivityParticipation,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::MentalFunctions => "Mental Functions",
            Self::SensoryFunctions => "Sensory Functions",
            Self::VoiceSpeechFunctions => "Voice and Speech Functions",
            Self::CardiovascularFunctions => "Cardiovascular Functions",
            Self::DigestiveFunctions => "Digestive Functions",
            Self::MovementFunctions => "Movement Functions",
            Self::Learning => "Learning and Applying Knowledge",
            Self::Communication => "Communication",
            Self::Mobility => "Mobility",
            Self::SelfCare => "Self-Care",
            Self::DomesticLife => "Domestic Life",
            Self::InterpersonalInteractions => "Interpersonal Interactions",
            Self::MajorLifeAreas => "Major Life Areas",
            Self::CommunityLife => "Community and Social Life",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnvironmentalDomain {
    ProductsAndTechnology,
    NaturalEnvironment,
    SupportAndRelationships,
    Attitudes,
    ServicesAndPolicies,
}

impl EnvironmentalDomain {
    pub const fn ordered() -> [Self; 5] {
        [
            Self::ProductsAndTechnology,
            Self::NaturalEnvironment,
            Self::SupportAndRelationships,
            Self::Attitudes,
            Self::ServicesAndPolicies,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::ProductsAndTechnology => "Products and Technology",
            Self::NaturalEnvironment => "Natural Environment",
            Self::SupportAndRelationships => "Support and Relationships",
            Self::Attitudes => "Attitudes",
            Self::ServicesAndPolicies => "Services and Policies",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Male => "Male",
            Self::Female => "Female",
            Self::Other => "Other",
        }
    }
}

/// Patient details captured on the first step. Nothing downstream computes
/// on these fields; they are carried through to the export rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonalInfo {
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    pub age: u8,
    pub gender: Gender,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub medical_history: Option<String>,
}

impl PersonalInfo {
    pub const MAX_AGE: u8 = 120;

    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        age: u8,
        gender: Gender,
    ) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            age,
            gender,
            id_number: None,
            contact_phone: None,
            contact_email: None,
            address: None,
            medical_history: None,
        }
    }

    /// First and last name joined by a single space, untrimmed.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Presence and range checks the intake form applies before submission.
    pub fn validate(&self) -> Result<(), PersonalInfoError> {
        if self.first_name.trim().is_empty() {
            return Err(PersonalInfoError::MissingFirstName);
        }

        if self.age > Self::MAX_AGE {
            return Err(PersonalInfoError::AgeOutOfRange(self.age));
        }

        if let Some(email) = non_blank(self.contact_email.as_deref()) {
            if !looks_like_email(email) {
                return Err(PersonalInfoError::InvalidEmail(email.to_string()));
            }
        }

        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PersonalInfoError {
    #[error("first name is required")]
    MissingFirstName,
    #[error("age must be between 0 and 120, got {0}")]
    AgeOutOfRange(u8),
    #[error("invalid email address: {0}")]
    InvalidEmail(String),
}

pub(crate) fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}

fn looks_like_email(value: &str) -> bool {
    let mut parts = value.splitn(2, '@');
    match (parts.next(), parts.next()) {
        (Some(local), Some(domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain
                    .split_once('.')
                    .map(|(host, tld)| !host.is_empty() && !tld.is_empty())
                    .unwrap_or(false)
        }
        _ => false,
    }
}

/// Impairment-scale ratings for the six body-function and eight
/// activity/participation domains.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionalCapacityRecord {
    #[serde(default)]
    pub ratings: BTreeMap<FunctionalDomain, RatingCode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_notes: Option<String>,
}

impl FunctionalCapacityRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every domain rated with the same code.
    pub fn uniform(code: impl Into<RatingCode>) -> Self {
        let code = code.into();
        FunctionalDomain::ordered()
            .into_iter()
            .map(|domain| (domain, code.clone()))
            .collect()
    }

    pub fn with_rating(mut self, domain: FunctionalDomain, code: impl Into<RatingCode>) -> Self {
        self.set_rating(domain, code);
        self
    }

    pub fn set_rating(&mut self, domain: FunctionalDomain, code: impl Into<RatingCode>) {
        self.ratings.insert(domain, code.into());
    }

    pub fn rating(&self, domain: FunctionalDomain) -> Option<&RatingCode> {
        self.ratings.get(&domain)
    }

    pub fn missing_domains(&self) -> Vec<FunctionalDomain> {
        FunctionalDomain::ordered()
            .into_iter()
            .filter(|domain| !self.ratings.contains_key(domain))
            .collect()
    }

    pub fn is_complete(&self) -> bool {
        self.missing_domains().is_empty()
    }

    pub fn is_empty(&self) -> bool {
        self.ratings.is_empty()
    }
}

impl FromIterator<(FunctionalDomain, RatingCode)> for FunctionalCapacityRecord {
    fn from_iter<I: IntoIterator<Item = (FunctionalDomain, RatingCode)>>(iter: I) -> Self {
        Self {
            ratings: iter.into_iter().collect(),
            additional_notes: None,
        }
    }
}

/// Environmental-scale ratings for the five environmental-factor chapters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvironmentalFactorsRecord {
    #[serde(default)]
    pub ratings: BTreeMap<EnvironmentalDomain, RatingCode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub environmental_notes: Option<String>,
}

impl EnvironmentalFactorsRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn uniform(code: impl Into<RatingCode>) -> Self {
        let code = code.into();
        EnvironmentalDomain::ordered()
            .into_iter()
            .map(|domain| (domain, code.clone()))
            .collect()
    }

    pub fn with_rating(mut self, domain: EnvironmentalDomain, code: impl Into<RatingCode>) -> Self {
        self.set_rating(domain, code);
        self
    }

    pub fn set_rating(&mut self, domain: EnvironmentalDomain, code: impl Into<RatingCode>) {
        self.ratings.insert(domain, code.into());
    }

    pub fn rating(&self, domain: EnvironmentalDomain) -> Option<&RatingCode> {
        self.ratings.get(&domain)
    }

    pub fn missing_domains(&self) -> Vec<EnvironmentalDomain> {
        EnvironmentalDomain::ordered()
            .into_iter()
            .filter(|domain| !self.ratings.contains_key(domain))
            .collect()
    }

    pub fn is_complete(&self) -> bool {
        self.missing_domains().is_empty()
    }

    pub fn is_empty(&self) -> bool {
        self.ratings.is_empty()
    }
}

impl FromIterator<(EnvironmentalDomain, RatingCode)> for EnvironmentalFactorsRecord {
    fn from_iter<I: IntoIterator<Item = (EnvironmentalDomain, RatingCode)>>(iter: I) -> Self {
        Self {
            ratings: iter.into_iter().collect(),
            environmental_notes: None,
        }
    }
}

/// Everything collected by the wizard. Each step owns exactly one slice.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssessmentRecord {
    #[serde(default)]
    pub personal_info: Option<PersonalInfo>,
    #[serde(default)]
    pub functional_capacity: FunctionalCapacityRecord,
    #[serde(default)]
    pub environmental_factors: EnvironmentalFactorsRecord,
}

impl AssessmentRecord {
    pub fn is_empty(&self) -> bool {
        self.personal_info.is_none()
            && self.functional_capacity.is_empty()
            && self.environmental_factors.is_empty()
    }
}

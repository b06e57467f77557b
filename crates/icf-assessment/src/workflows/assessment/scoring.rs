//! Summary scores derived from the rated domains.
//!
//! Both classifiers are pure functions of the record they receive. Ratings
//! that fall outside the scale (sentinels, malformed tokens, out-of-range
//! values) are dropped before averaging rather than counted as zero.

use super::domain::{
    EnvironmentalFactorsRecord, FunctionalCapacityRecord, RatingCode, RatingScale,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisabilityCategory {
    NoDisability,
    Mild,
    Moderate,
    Severe,
    Complete,
    NotAvailable,
}

impl DisabilityCategory {
    pub const fn label(self) -> &'static str {
        match self {
            Self::NoDisability => "No disability (0-4%)",
            Self::Mild => "Mild disability (5-24%)",
            Self::Moderate => "Moderate disability (25-49%)",
            Self::Severe => "Severe disability (50-95%)",
            Self::Complete => "Complete disability (96-100%)",
            Self::NotAvailable => "Not available",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnvironmentalContext {
    HighlySupportive,
    ModeratelySupportive,
    Neutral,
    MildlyChallenging,
    SignificantlyChallenging,
    NotAvailable,
}

impl EnvironmentalContext {
    pub const fn label(self) -> &'static str {
        match self {
            Self::HighlySupportive => "Highly supportive environment",
            Self::ModeratelySupportive => "Moderately supportive environment",
            Self::Neutral => "Neutral environment",
            Self::MildlyChallenging => "Mildly challenging environment",
            Self::SignificantlyChallenging => "Significantly challenging environment",
            Self::NotAvailable => "Not available",
        }
    }
}

pub fn disability_category(record: &FunctionalCapacityRecord) -> DisabilityCategory {
    disability_percentage(record)
        .map(classify_disability_percentage)
        .unwrap_or(DisabilityCategory::NotAvailable)
}

/// Mean impairment expressed as a share of the maximum qualifier (4).
pub fn disability_percentage(record: &FunctionalCapacityRecord) -> Option<f64> {
    mean_of(record.ratings.values(), RatingScale::Impairment).map(|mean| mean / 4.0 * 100.0)
}

pub fn classify_disability_percentage(percentage: f64) -> DisabilityCategory {
    if percentage < 5.0 {
        DisabilityCategory::NoDisability
    } else if percentage < 25.0 {
        DisabilityCategory::Mild
    } else if percentage < 50.0 {
        DisabilityCategory::Moderate
    } else if percentage < 96.0 {
        DisabilityCategory::Severe
    } else {
        DisabilityCategory::Complete
    }
}

pub fn environmental_context(record: &EnvironmentalFactorsRecord) -> EnvironmentalContext {
    environmental_mean(record)
        .map(classify_environmental_mean)
        .unwrap_or(EnvironmentalContext::NotAvailable)
}

pub fn environmental_mean(record: &EnvironmentalFactorsRecord) -> Option<f64> {
    mean_of(record.ratings.values(), RatingScale::Environmental)
}

pub fn classify_environmental_mean(mean: f64) -> EnvironmentalContext {
    if mean > 2.0 {
        EnvironmentalContext::HighlySupportive
    } else if mean > 0.0 {
        EnvironmentalContext::ModeratelySupportive
    } else if mean == 0.0 {
        EnvironmentalContext::Neutral
    } else if mean > -2.0 {
        EnvironmentalContext::MildlyChallenging
    } else {
        EnvironmentalContext::SignificantlyChallenging
    }
}

fn mean_of<'a, I>(codes: I, scale: RatingScale) -> Option<f64>
where
    I: IntoIterator<Item = &'a RatingCode>,
{
    let (sum, count) = codes
        .into_iter()
        .filter(|code| scale.accepts(code))
        .filter_map(RatingCode::value)
        .fold((0i32, 0u32), |(sum, count), value| {
            (sum + i32::from(value), count + 1)
        });

    if count == 0 {
        None
    } else {
        Some(f64::from(sum) / f64::from(count))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::assessment::domain::{EnvironmentalDomain, FunctionalDomain};

    #[test]
    fn uniform_extremes_map_to_outer_categories() {
        assert_eq!(
            disability_category(&FunctionalCapacityRecord::uniform("0")),
            DisabilityCategory::NoDisability
        );
        assert_eq!(
            disability_category(&FunctionalCapacityRecord::uniform("4")),
            DisabilityCategory::Complete
        );
    }

    #[test]
    fn sentinels_and_malformed_ratings_are_excluded_not_zeroed() {
        let record = FunctionalCapacityRecord::uniform("9")
            .with_rating(FunctionalDomain::Mobility, "4")
            .with_rating(FunctionalDomain::SelfCare, "oops")
            .with_rating(FunctionalDomain::Learning, "8");

        assert_eq!(disability_percentage(&record), Some(100.0));
        assert_eq!(disability_category(&record), DisabilityCategory::Complete);
    }

    #[test]
    fn negative_values_are_outside_the_impairment_scale() {
        let record = FunctionalCapacityRecord::new()
            .with_rating(FunctionalDomain::Mobility, "-3")
            .with_rating(FunctionalDomain::Communication, "2");

        assert_eq!(disability_percentage(&record), Some(50.0));
    }

    #[test]
    fn no_scorable_ratings_is_not_available() {
        assert_eq!(
            disability_category(&FunctionalCapacityRecord::uniform("8")),
            DisabilityCategory::NotAvailable
        );
        assert_eq!(
            disability_category(&FunctionalCapacityRecord::new()),
            DisabilityCategory::NotAvailable
        );
    }

    #[test]
    fn environmental_mean_skips_sentinels() {
        let record = EnvironmentalFactorsRecord::uniform("8")
            .with_rating(EnvironmentalDomain::Attitudes, "-4")
            .with_rating(EnvironmentalDomain::ServicesAndPolicies, "-2");

        assert_eq!(environmental_mean(&record), Some(-3.0));
        assert_eq!(
            environmental_context(&record),
            EnvironmentalContext::SignificantlyChallenging
        );
    }

    #[test]
    fn balanced_environment_is_neutral() {
        let record = EnvironmentalFactorsRecord::uniform("0")
            .with_rating(EnvironmentalDomain::Attitudes, "3")
            .with_rating(EnvironmentalDomain::NaturalEnvironment, "-3");

        assert_eq!(environmental_context(&record), EnvironmentalContext::Neutral);
    }

    #[test]
    fn results_do_not_depend_on_call_order() {
        let functional = FunctionalCapacityRecord::uniform("2");
        let environmental = EnvironmentalFactorsRecord::uniform("-1");

        let first = (
            disability_category(&functional),
            environmental_context(&environmental),
        );
        let _ = environmental_context(&EnvironmentalFactorsRecord::uniform("4"));
        let _ = disability_category(&FunctionalCapacityRecord::uniform("0"));
        let second = (
            disability_category(&functional),
            environmental_context(&environmental),
        );

        assert_eq!(first, second);
    }
}

use super::domain::{RatingCode, RatingScale};

const IMPAIRMENT_LABELS: [(RatingCode, &str); 7] = [
    (RatingCode::Value(0), "No difficulty (0-4%)"),
    (RatingCode::Value(1), "Mild difficulty (5-24%)"),
    (RatingCode::Value(2), "Moderate difficulty (25-49%)"),
    (RatingCode::Value(3), "Severe difficulty (50-95%)"),
    (RatingCode::Value(4), "Complete difficulty (96-100%)"),
    (RatingCode::NotSpecified, "Not specified"),
    (RatingCode::NotApplicable, "Not applicable"),
];

/// Human-readable label for a rating on the given scale.
///
/// Impairment labels come from a fixed table; codes outside it fall back to
/// their raw token. Environmental labels are derived from the signed value.
/// The 8/9 sentinels are separate variants and therefore never rendered as
/// facilitators.
pub fn label_for(code: &RatingCode, scale: RatingScale) -> String {
    match scale {
        RatingScale::Impairment => IMPAIRMENT_LABELS
            .iter()
            .find(|(known, _)| known == code)
            .map(|(_, label)| (*label).to_string())
            .unwrap_or_else(|| code.token()),
        RatingScale::Environmental => match code {
            RatingCode::Value(value) if *value > 0 => format!("+{value} (Facilitator)"),
            RatingCode::Value(value) if *value < 0 => format!("{value} (Barrier)"),
            RatingCode::Value(_) => "0 (No impact)".to_string(),
            RatingCode::NotSpecified => "Not specified".to_string(),
            RatingCode::NotApplicable => "Not applicable".to_string(),
            RatingCode::Unrecognized(raw) => raw.clone(),
        },
    }
}

pub fn label_for_token(token: &str, scale: RatingScale) -> String {
    label_for(&RatingCode::parse(token), scale)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn impairment_table_covers_all_seven_codes() {
        let labels: Vec<String> = ["0", "1", "2", "3", "4", "8", "9"]
            .iter()
            .map(|token| label_for_token(token, RatingScale::Impairment))
            .collect();

        assert_eq!(
            labels,
            vec![
                "No difficulty (0-4%)",
                "Mild difficulty (5-24%)",
                "Moderate difficulty (25-49%)",
                "Severe difficulty (50-95%)",
                "Complete difficulty (96-100%)",
                "Not specified",
                "Not applicable",
            ]
        );
    }

    #[test]
    fn impairment_falls_back_to_raw_token() {
        assert_eq!(label_for_token("-2", RatingScale::Impairment), "-2");
        assert_eq!(label_for_token("severe", RatingScale::Impairment), "severe");
    }

    #[test]
    fn environmental_labels_are_signed() {
        assert_eq!(
            label_for_token("3", RatingScale::Environmental),
            "+3 (Facilitator)"
        );
        assert_eq!(
            label_for_token("-4", RatingScale::Environmental),
            "-4 (Barrier)"
        );
        assert_eq!(
            label_for_token("0", RatingScale::Environmental),
            "0 (No impact)"
        );
    }

    #[test]
    fn environmental_sentinels_are_not_facilitators() {
        assert_eq!(
            label_for_token("9", RatingScale::Environmental),
            "Not applicable"
        );
        assert_eq!(
            label_for_token("8", RatingScale::Environmental),
            "Not specified"
        );
    }

    #[test]
    fn environmental_unrecognized_tokens_echo_back() {
        assert_eq!(label_for_token("12", RatingScale::Environmental), "12");
    }
}

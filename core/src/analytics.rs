//! Attendance metrics against the monthly in-office target.
//!
//! Every function here is pure: the same counts always give the same result.

use serde::{Deserialize, Serialize};

/// Minimum share of decided working days that must be spent in the office.
pub const TARGET_PERCENTAGE: f64 = 0.60;

/// A slack of this many days or fewer still suggests going to the office.
const TIGHT_MARGIN_DAYS: i64 = 2;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct OfficeDaysNeeded {
    pub target_total: u32,
    pub needed: u32,
    pub remaining_days: i64,
    pub possible: bool,
    /// Negative while the target has not been reached.
    pub surplus: i64,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Suggestion {
    Office,
    Remote,
    Any,
    /// No working days are left to decide this month.
    None,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TomorrowSuggestion {
    pub suggestion: Suggestion,
    pub remaining_days: i64,
    pub needed_office_days: i64,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AlertStatus {
    Success,
    Warning,
    Danger,
}

/// Office days required to reach the target over `working_days`, rounded up.
pub fn target_office_days(working_days: u32) -> u32 {
    (f64::from(working_days) * TARGET_PERCENTAGE).ceil() as u32
}

pub fn presence_percentage(office_days: u32, total_decided_days: u32) -> f64 {
    if total_decided_days == 0 {
        return 0.0;
    }
    f64::from(office_days) / f64::from(total_decided_days)
}

pub fn remaining_office_days_needed(
    current_office: u32,
    total_working_days_excluding_licenses: u32,
    days_already_registered: u32,
) -> OfficeDaysNeeded {
    let target_total = target_office_days(total_working_days_excluding_licenses);
    let needed = target_total.saturating_sub(current_office);
    let remaining_days =
        i64::from(total_working_days_excluding_licenses) - i64::from(days_already_registered);

    OfficeDaysNeeded {
        target_total,
        needed,
        remaining_days,
        possible: i64::from(needed) <= remaining_days,
        surplus: i64::from(current_office) - i64::from(target_total),
    }
}

/// Final percentage if the remaining days follow the current office ratio.
///
/// With nothing decided yet there is no trend to extrapolate, so the target
/// itself is returned.
pub fn project_final_percentage(current_office: u32, current_remote: u32, remaining_days: u32) -> f64 {
    let decided = current_office + current_remote;
    if decided == 0 {
        return TARGET_PERCENTAGE;
    }

    let current_ratio = f64::from(current_office) / f64::from(decided);
    let projected_additional = (f64::from(remaining_days) * current_ratio).round();

    (f64::from(current_office) + projected_additional) / f64::from(decided + remaining_days)
}

pub fn suggest_tomorrow(
    office: u32,
    remote: u32,
    total_working_days: u32,
    license_days: u32,
) -> TomorrowSuggestion {
    let effective = i64::from(total_working_days) - i64::from(license_days);
    let remaining = effective - i64::from(office) - i64::from(remote);

    if remaining <= 0 {
        return TomorrowSuggestion {
            suggestion: Suggestion::None,
            remaining_days: remaining,
            needed_office_days: 0,
        };
    }

    let target = (effective as f64 * TARGET_PERCENTAGE).ceil() as i64;
    let needed = target - i64::from(office);

    // Order matters: target met, then every day required, then the margin rule.
    let suggestion = if needed <= 0 {
        Suggestion::Remote
    } else if needed >= remaining {
        Suggestion::Office
    } else if remaining - needed <= TIGHT_MARGIN_DAYS {
        Suggestion::Office
    } else {
        Suggestion::Any
    };

    TomorrowSuggestion {
        suggestion,
        remaining_days: remaining,
        needed_office_days: needed,
    }
}

pub fn alert_status(current: f64, projected: f64, possible: bool) -> AlertStatus {
    if current >= TARGET_PERCENTAGE {
        AlertStatus::Success
    } else if projected >= TARGET_PERCENTAGE && possible {
        AlertStatus::Success
    } else if possible {
        AlertStatus::Warning
    } else {
        AlertStatus::Danger
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    #[test]
    fn test_presence_percentage() {
        assert_eq!(presence_percentage(0, 0), 0.0);
        assert_eq!(presence_percentage(3, 4), 0.75);
        assert_eq!(presence_percentage(0, 5), 0.0);
    }

    #[test]
    fn test_target_rounds_up() {
        assert_eq!(target_office_days(20), 12);
        assert_eq!(target_office_days(21), 13);
        assert_eq!(target_office_days(23), 14);
        assert_eq!(target_office_days(1), 1);
        assert_eq!(target_office_days(0), 0);
    }

    #[test]
    fn test_remaining_target_already_met() {
        assert_eq!(
            remaining_office_days_needed(12, 20, 20),
            OfficeDaysNeeded {
                target_total: 12,
                needed: 0,
                remaining_days: 0,
                possible: true,
                surplus: 0,
            }
        );
    }

    #[test]
    fn test_remaining_from_scratch() {
        assert_eq!(
            remaining_office_days_needed(0, 20, 0),
            OfficeDaysNeeded {
                target_total: 12,
                needed: 12,
                remaining_days: 20,
                possible: true,
                surplus: -12,
            }
        );
    }

    #[test]
    fn test_remaining_impossible() {
        // 21 days, 13 needed; 2 office and 10 remote leave 9 days for 11 more.
        let result = remaining_office_days_needed(2, 21, 12);
        assert_eq!(result.target_total, 13);
        assert_eq!(result.needed, 11);
        assert_eq!(result.remaining_days, 9);
        assert!(!result.possible);
        assert_eq!(result.surplus, -11);
    }

    #[test]
    fn test_remaining_surplus() {
        let result = remaining_office_days_needed(15, 20, 18);
        assert_eq!(result.needed, 0);
        assert_eq!(result.surplus, 3);
        assert!(result.possible);
    }

    #[test]
    fn test_projection_without_data_is_target() {
        assert_eq!(project_final_percentage(0, 0, 20), TARGET_PERCENTAGE);
        assert_eq!(project_final_percentage(0, 0, 0), TARGET_PERCENTAGE);
    }

    #[test]
    fn test_projection_follows_ratio() {
        // ratio 0.5, 10 remaining -> 5 more office days: 7 / 14
        let projected = project_final_percentage(2, 2, 10);
        assert!((projected - 0.5).abs() < EPSILON);

        // ratio 2/3, 5 remaining -> round(3.33) = 3 more: 5 / 8
        let projected = project_final_percentage(2, 1, 5);
        assert!((projected - 0.625).abs() < EPSILON);
    }

    #[test]
    fn test_projection_with_no_days_left_is_current() {
        let projected = project_final_percentage(3, 1, 0);
        assert!((projected - 0.75).abs() < EPSILON);
    }

    #[test]
    fn test_suggest_any_with_slack() {
        let result = suggest_tomorrow(0, 0, 20, 0);
        assert_eq!(result.suggestion, Suggestion::Any);
        assert_eq!(result.remaining_days, 20);
        assert_eq!(result.needed_office_days, 12);
    }

    #[test]
    fn test_suggest_office_when_every_day_required() {
        let result = suggest_tomorrow(10, 8, 20, 0);
        assert_eq!(result.remaining_days, 2);
        assert_eq!(result.needed_office_days, 2);
        assert_eq!(result.suggestion, Suggestion::Office);
    }

    #[test]
    fn test_suggest_office_on_tight_margin() {
        // 7 office, 6 remote: remaining 7, needed 5, margin 2
        let result = suggest_tomorrow(7, 6, 20, 0);
        assert_eq!(result.remaining_days, 7);
        assert_eq!(result.needed_office_days, 5);
        assert_eq!(result.suggestion, Suggestion::Office);

        // margin 3 is flexible again
        let result = suggest_tomorrow(7, 5, 20, 0);
        assert_eq!(result.remaining_days, 8);
        assert_eq!(result.suggestion, Suggestion::Any);
    }

    #[test]
    fn test_suggest_remote_when_target_met() {
        let result = suggest_tomorrow(12, 2, 20, 0);
        assert_eq!(result.suggestion, Suggestion::Remote);
        assert_eq!(result.remaining_days, 6);
    }

    #[test]
    fn test_target_met_takes_precedence_over_margin() {
        // one day left, target already met
        let result = suggest_tomorrow(12, 7, 20, 0);
        assert_eq!(result.remaining_days, 1);
        assert_eq!(result.suggestion, Suggestion::Remote);
    }

    #[test]
    fn test_suggest_none_when_month_is_decided() {
        assert_eq!(suggest_tomorrow(12, 8, 20, 0).suggestion, Suggestion::None);
        assert_eq!(suggest_tomorrow(0, 0, 5, 5).suggestion, Suggestion::None);
        assert_eq!(suggest_tomorrow(0, 0, 0, 0).suggestion, Suggestion::None);
    }

    #[test]
    fn test_licenses_shrink_target() {
        // 21 working days, 6 licensed -> 15 effective, target 9
        let result = suggest_tomorrow(4, 2, 21, 6);
        assert_eq!(result.remaining_days, 9);
        assert_eq!(result.needed_office_days, 5);
        assert_eq!(result.suggestion, Suggestion::Any);
    }

    #[test]
    fn test_alert_status_order() {
        assert_eq!(alert_status(0.6, 0.0, false), AlertStatus::Success);
        assert_eq!(alert_status(0.5, 0.65, true), AlertStatus::Success);
        assert_eq!(alert_status(0.5, 0.65, false), AlertStatus::Danger);
        assert_eq!(alert_status(0.5, 0.55, true), AlertStatus::Warning);
        assert_eq!(alert_status(0.1, 0.2, false), AlertStatus::Danger);
    }
}

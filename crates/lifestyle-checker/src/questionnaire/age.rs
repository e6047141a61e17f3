use chrono::{Datelike, NaiveDate};

use super::domain::AgeGroup;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AgeError {
    #[error("date of birth {date_of_birth} is after {today}")]
    BornInFuture {
        date_of_birth: NaiveDate,
        today: NaiveDate,
    },
}

/// Age in whole years on `today`.
///
/// The year difference is reduced by one when the birthday has not happened yet this year.
/// A 29 February birthday is treated as reached on 1 March in common years.
pub fn age_on(date_of_birth: NaiveDate, today: NaiveDate) -> Result<u32, AgeError> {
    if date_of_birth > today {
        return Err(AgeError::BornInFuture {
            date_of_birth,
            today,
        });
    }

    let mut years = today.year() - date_of_birth.year();
    if (today.month(), today.day()) < (date_of_birth.month(), date_of_birth.day()) {
        years -= 1;
    }

    Ok(years as u32)
}

/// Configuration problems in a set of age brackets.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AgeGroupConfigError {
    #[error("age group '{name}' has min age {min_age} above max age {max_age}")]
    InvertedRange {
        name: String,
        min_age: u32,
        max_age: u32,
    },
    #[error("age groups '{first}' and '{second}' share the range {min_age}-{max_age}")]
    Duplicate {
        first: String,
        second: String,
        min_age: u32,
        max_age: u32,
    },
    #[error("age groups '{first}' and '{second}' overlap")]
    Overlap { first: String, second: String },
    #[error("ages {from}-{to} are not covered between '{first}' and '{second}'")]
    Gap {
        first: String,
        second: String,
        from: u32,
        to: u32,
    },
}

/// Check that brackets are well formed, unique, non-overlapping and contiguous.
///
/// This is a configuration-time check; scoring assumes the brackets are already sane.
pub fn validate_age_groups(groups: &[AgeGroup]) -> Result<(), AgeGroupConfigError> {
    if let Some(group) = groups.iter().find(|group| group.min_age > group.max_age) {
        return Err(AgeGroupConfigError::InvertedRange {
            name: group.name.clone(),
            min_age: group.min_age,
            max_age: group.max_age,
        });
    }

    let mut sorted: Vec<&AgeGroup> = groups.iter().collect();
    sorted.sort_by_key(|group| (group.min_age, group.max_age));

    for pair in sorted.windows(2) {
        let (first, second) = (pair[0], pair[1]);

        if first.min_age == second.min_age && first.max_age == second.max_age {
            return Err(AgeGroupConfigError::Duplicate {
                first: first.name.clone(),
                second: second.name.clone(),
                min_age: first.min_age,
                max_age: first.max_age,
            });
        }

        if second.min_age <= first.max_age {
            return Err(AgeGroupConfigError::Overlap {
                first: first.name.clone(),
                second: second.name.clone(),
            });
        }

        if second.min_age - first.max_age > 1 {
            return Err(AgeGroupConfigError::Gap {
                first: first.name.clone(),
                second: second.name.clone(),
                from: first.max_age + 1,
                to: second.min_age - 1,
            });
        }
    }

    Ok(())
}

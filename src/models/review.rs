use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::booking::required;

pub const MIN_RATING: i64 = 1;
pub const MAX_RATING: i64 = 5;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: String,
    pub name: String,
    pub rating: i64,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewReview {
    pub name: Option<String>,
    pub rating: Option<i64>,
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReviewDraft {
    pub name: String,
    pub rating: i64,
    pub message: String,
}

impl NewReview {
    pub fn validate(self) -> Result<ReviewDraft, String> {
        let name = required("name", self.name)?;
        let rating = match self.rating {
            Some(r) if (MIN_RATING..=MAX_RATING).contains(&r) => r,
            Some(r) => {
                return Err(format!(
                    "rating must be between {MIN_RATING} and {MAX_RATING}, got {r}"
                ))
            }
            None => return Err("rating is required".to_string()),
        };
        let message = required("message", self.message)?;

        Ok(ReviewDraft {
            name,
            rating,
            message,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn review(rating: Option<i64>) -> NewReview {
        NewReview {
            name: Some("Bela".to_string()),
            rating,
            message: Some("Great service".to_string()),
        }
    }

    #[test]
    fn test_valid_review() {
        let draft = review(Some(5)).validate().unwrap();
        assert_eq!(draft.rating, 5);
        assert_eq!(draft.message, "Great service");
    }

    #[test]
    fn test_rating_bounds() {
        assert!(review(Some(1)).validate().is_ok());
        assert!(review(Some(0)).validate().is_err());
        assert!(review(Some(7)).validate().is_err());
        assert!(review(Some(-3)).validate().is_err());
    }

    #[test]
    fn test_missing_rating() {
        assert_eq!(review(None).validate().unwrap_err(), "rating is required");
    }

    #[test]
    fn test_missing_message() {
        let mut input = review(Some(4));
        input.message = Some(" ".to_string());
        assert_eq!(input.validate().unwrap_err(), "message is required");
    }
}

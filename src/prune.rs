//! Retention planning for repository tags
//!
//! Splits the observed tag set into the retained prefix (the `keep` most
//! recently updated tags) and the expired suffix slated for deletion.

use crate::error::Result;
use crate::registry::Tag;
use chrono::{DateTime, Utc};

#[derive(Debug)]
pub struct PrunePlan {
    /// Retained tags, most-recent-first
    pub kept: Vec<Tag>,
    /// Expired tags in deletion order, from the (keep+1)-th most recent
    /// down to the oldest
    pub expired: Vec<Tag>,
}

impl PrunePlan {
    pub fn is_noop(&self) -> bool {
        self.expired.is_empty()
    }
}

/// Build the prune plan for a listed tag set.
///
/// Every timestamp is parsed up front, so a malformed tag aborts the run
/// before any deletion is issued. The sort is stable: tags with equal
/// timestamps keep the order the listing returned them in.
pub fn plan(tags: Vec<Tag>, keep: usize) -> Result<PrunePlan> {
    let mut dated: Vec<(DateTime<Utc>, Tag)> = tags
        .into_iter()
        .map(|tag| tag.parse_last_updated().map(|updated| (updated, tag)))
        .collect::<Result<_>>()?;

    dated.sort_by(|a, b| b.0.cmp(&a.0));

    let mut kept: Vec<Tag> = dated.into_iter().map(|(_, tag)| tag).collect();
    let expired = kept.split_off(keep.min(kept.len()));

    Ok(PrunePlan { kept, expired })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PrunerError;

    fn names(tags: &[Tag]) -> Vec<&str> {
        tags.iter().map(|t| t.name.as_str()).collect()
    }

    #[test]
    fn test_prunes_oldest_beyond_retention() {
        // Listed in ascending age order on purpose; the plan must sort
        let tags = vec![
            Tag::new("v1", "2024-01-01T00:00:00.000000Z"),
            Tag::new("v2", "2024-02-01T00:00:00.000000Z"),
            Tag::new("v3", "2024-03-01T00:00:00.000000Z"),
            Tag::new("v4", "2024-04-01T00:00:00.000000Z"),
        ];

        let plan = plan(tags, 3).unwrap();
        assert_eq!(names(&plan.kept), ["v4", "v3", "v2"]);
        assert_eq!(names(&plan.expired), ["v1"]);
        assert!(!plan.is_noop());
    }

    #[test]
    fn test_noop_when_under_threshold() {
        let tags = vec![
            Tag::new("a", "2024-01-01T00:00:00.000000Z"),
            Tag::new("b", "2024-02-01T00:00:00.000000Z"),
        ];

        let plan = plan(tags, 3).unwrap();
        assert_eq!(names(&plan.kept), ["b", "a"]);
        assert!(plan.expired.is_empty());
        assert!(plan.is_noop());
    }

    #[test]
    fn test_empty_listing() {
        let plan = plan(Vec::new(), 3).unwrap();
        assert!(plan.kept.is_empty());
        assert!(plan.is_noop());
    }

    #[test]
    fn test_malformed_timestamp_aborts_planning() {
        let tags = vec![
            Tag::new("good", "2024-01-01T00:00:00.000000Z"),
            Tag::new("bad", "not-a-date"),
        ];

        let err = plan(tags, 3).unwrap_err();
        assert!(matches!(err, PrunerError::Parse(_)));
    }

    #[test]
    fn test_ties_keep_listing_order() {
        let tags = vec![
            Tag::new("first", "2024-01-01T00:00:00.000000Z"),
            Tag::new("second", "2024-01-01T00:00:00.000000Z"),
            Tag::new("third", "2024-01-01T00:00:00.000000Z"),
        ];

        let plan = plan(tags, 2).unwrap();
        assert_eq!(names(&plan.kept), ["first", "second"]);
        assert_eq!(names(&plan.expired), ["third"]);
    }

    #[test]
    fn test_expired_ordered_newest_to_oldest() {
        let tags = vec![
            Tag::new("oldest", "2023-01-01T00:00:00.000000Z"),
            Tag::new("newest", "2024-05-01T00:00:00.000000Z"),
            Tag::new("mid", "2023-06-01T00:00:00.000000Z"),
            Tag::new("older", "2023-03-01T00:00:00.000000Z"),
        ];

        let plan = plan(tags, 1).unwrap();
        assert_eq!(names(&plan.kept), ["newest"]);
        assert_eq!(names(&plan.expired), ["mid", "older", "oldest"]);
    }

    #[test]
    fn test_retention_bound() {
        for n in 0..6 {
            let tags: Vec<Tag> = (0..n)
                .map(|i| {
                    Tag::new(
                        format!("tag{}", i),
                        format!("2024-01-0{}T00:00:00.000000Z", i + 1),
                    )
                })
                .collect();

            let plan = plan(tags, 3).unwrap();
            assert_eq!(plan.kept.len(), n.min(3));
            assert_eq!(plan.expired.len(), n.saturating_sub(3));
        }
    }
}

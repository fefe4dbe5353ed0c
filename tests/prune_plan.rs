//! Workflow-level tests: from a raw Hub tag-listing payload through
//! retention planning.

use docker_tag_pruner::error::PrunerError;
use docker_tag_pruner::prune;
use docker_tag_pruner::registry::Tag;

/// A trimmed-down Hub tag page, with the extra payload fields the tool
/// ignores left in place.
const TAG_PAGE: &str = r#"{
    "count": 4,
    "next": null,
    "previous": null,
    "results": [
        {
            "name": "v1",
            "last_updated": "2024-01-01T00:00:00.000000Z",
            "full_size": 52428800,
            "tag_status": "active"
        },
        {
            "name": "v2",
            "last_updated": "2024-02-01T00:00:00.000000Z",
            "full_size": 52428801,
            "tag_status": "active"
        },
        {
            "name": "v3",
            "last_updated": "2024-03-01T00:00:00.000000Z",
            "full_size": 52428802,
            "tag_status": "active"
        },
        {
            "name": "v4",
            "last_updated": "2024-04-01T00:00:00.000000Z",
            "full_size": 52428803,
            "tag_status": "active"
        }
    ]
}"#;

fn tags_from_page(raw: &str) -> Vec<Tag> {
    let page: serde_json::Value = serde_json::from_str(raw).unwrap();
    serde_json::from_value(page["results"].clone()).unwrap()
}

#[test]
fn test_plan_from_hub_payload() {
    let tags = tags_from_page(TAG_PAGE);
    assert_eq!(tags.len(), 4);

    let plan = prune::plan(tags, 3).unwrap();

    let kept: Vec<&str> = plan.kept.iter().map(|t| t.name.as_str()).collect();
    let expired: Vec<&str> = plan.expired.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(kept, ["v4", "v3", "v2"]);
    assert_eq!(expired, ["v1"]);
}

#[test]
fn test_plan_is_noop_for_small_repository() {
    let mut tags = tags_from_page(TAG_PAGE);
    tags.truncate(2);

    let plan = prune::plan(tags, 3).unwrap();

    assert!(plan.is_noop());
    let kept: Vec<&str> = plan.kept.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(kept, ["v2", "v1"]);
}

#[test]
fn test_plan_rejects_malformed_payload_timestamp() {
    let raw = r#"[
        {"name": "ok", "last_updated": "2024-01-01T00:00:00.000000Z"},
        {"name": "broken", "last_updated": "not-a-date"}
    ]"#;
    let tags: Vec<Tag> = serde_json::from_str(raw).unwrap();

    let err = prune::plan(tags, 3).unwrap_err();
    assert!(matches!(err, PrunerError::Parse(_)));
    assert!(err.to_string().contains("not-a-date"));
}

use salvo::http::StatusCode;
use serde_json::{Value, json};

use super::helpers::{
    TestRequest, create_meeting, create_test_service, create_test_service_in, id_of,
    meeting_form,
};

fn recurring_form(date_time: &str, rule: Value) -> Value {
    let mut form = meeting_form("Dr. James Wilson", date_time);
    form["recurrence"] = rule;
    form
}

fn date_times(meetings: &[Value]) -> Vec<&str> {
    meetings
        .iter()
        .filter_map(|meeting| meeting["dateTime"].as_str())
        .collect()
}

#[test_log::test(tokio::test)]
async fn weekly_series_is_stored_once_per_instance() {
    let service = create_test_service();

    let base = create_meeting(
        &service,
        &recurring_form(
            "2024-03-04T09:00:00Z",
            json!({ "frequency": "weekly", "interval": 1, "count": 3 }),
        ),
    )
    .await;
    let base_id = id_of(&base);
    assert_eq!(base["dateTime"], "2024-03-04T09:00:00Z");
    assert_eq!(base["recurrence"]["frequency"], "weekly");

    let all = TestRequest::get("/api/meetings")
        .send(&service)
        .await
        .json_array();
    assert_eq!(
        date_times(&all),
        vec![
            "2024-03-04T09:00:00Z",
            "2024-03-11T09:00:00Z",
            "2024-03-18T09:00:00Z",
        ]
    );
    assert!(
        all.iter()
            .skip(1)
            .all(|instance| instance["parentId"] == base_id.as_str())
    );
    assert!(all.iter().skip(1).all(|instance| instance.get("recurrence").is_none()));

    let series = TestRequest::get(&format!("/api/meetings/{base_id}/series"))
        .send(&service)
        .await
        .assert_status(StatusCode::OK)
        .json_array();
    assert_eq!(series.len(), 3);
    assert_eq!(id_of(&series[0]), base_id);

    let week = TestRequest::get("/api/meetings?weekStart=2024-03-13")
        .send(&service)
        .await
        .json_array();
    assert_eq!(date_times(&week), vec!["2024-03-11T09:00:00Z"]);
}

#[test_log::test(tokio::test)]
async fn end_date_is_inclusive() {
    let service = create_test_service();

    let series = TestRequest::post("/api/meetings/series")
        .json_body(&recurring_form(
            "2024-03-01T10:00:00Z",
            json!({ "frequency": "daily", "interval": 2, "endDate": "2024-03-07T10:00:00Z" }),
        ))
        .send(&service)
        .await
        .assert_status(StatusCode::CREATED)
        .json_array();

    assert_eq!(
        date_times(&series),
        vec![
            "2024-03-01T10:00:00Z",
            "2024-03-03T10:00:00Z",
            "2024-03-05T10:00:00Z",
            "2024-03-07T10:00:00Z",
        ]
    );
}

#[test_log::test(tokio::test)]
async fn monthly_series_clamps_to_month_end() {
    let service = create_test_service();

    let series = TestRequest::post("/api/meetings/series")
        .json_body(&recurring_form(
            "2024-01-31T10:00:00Z",
            json!({ "frequency": "monthly", "interval": 1, "count": 3 }),
        ))
        .send(&service)
        .await
        .assert_status(StatusCode::CREATED)
        .json_array();

    assert_eq!(
        date_times(&series),
        vec![
            "2024-01-31T10:00:00Z",
            "2024-02-29T10:00:00Z",
            "2024-03-31T10:00:00Z",
        ]
    );
}

#[test_log::test(tokio::test)]
async fn unbounded_series_stops_at_occurrence_cap() {
    let service = create_test_service();

    let series = TestRequest::post("/api/meetings/series")
        .json_body(&recurring_form(
            "2024-01-01T08:00:00Z",
            json!({ "frequency": "daily", "interval": 1 }),
        ))
        .send(&service)
        .await
        .assert_status(StatusCode::CREATED)
        .json_array();

    assert_eq!(series.len(), 100);
    assert_eq!(series[99]["dateTime"], "2024-04-09T08:00:00Z");
}

#[test_log::test(tokio::test)]
async fn far_end_date_stops_at_occurrence_cap() {
    let service = create_test_service();

    let series = TestRequest::post("/api/meetings/series")
        .json_body(&recurring_form(
            "2024-01-01T08:00:00Z",
            json!({ "frequency": "daily", "interval": 1, "endDate": "2030-01-01T00:00:00Z" }),
        ))
        .send(&service)
        .await
        .assert_status(StatusCode::CREATED)
        .json_array();

    assert_eq!(series.len(), 100);
}

#[test_log::test(tokio::test)]
async fn series_keeps_wall_clock_across_dst() {
    let service = create_test_service_in(chrono_tz::Europe::Paris);

    let series = TestRequest::post("/api/meetings/series")
        .json_body(&recurring_form(
            "2024-03-25T09:00:00+01:00",
            json!({ "frequency": "weekly", "interval": 1, "count": 2 }),
        ))
        .send(&service)
        .await
        .assert_status(StatusCode::CREATED)
        .json_array();

    assert_eq!(
        date_times(&series),
        vec!["2024-03-25T08:00:00Z", "2024-04-01T07:00:00Z"]
    );
}

#[test_log::test(tokio::test)]
async fn non_repeating_rule_keeps_only_the_base() {
    let service = create_test_service();

    let series = TestRequest::post("/api/meetings/series")
        .json_body(&recurring_form(
            "2024-03-04T09:00:00Z",
            json!({ "frequency": "fortnightly", "count": 4 }),
        ))
        .send(&service)
        .await
        .assert_status(StatusCode::CREATED)
        .json_array();

    assert_eq!(series.len(), 1);
}

#[test_log::test(tokio::test)]
async fn invalid_rules_are_rejected_without_storing() {
    let service = create_test_service();

    for (rule, message) in [
        (
            json!({ "frequency": "weekly", "interval": 0, "count": 2 }),
            "Recurrence interval must be at least 1",
        ),
        (
            json!({ "frequency": "weekly", "count": 0 }),
            "Recurrence count must be at least 1",
        ),
        (
            json!({ "frequency": "weekly", "count": 2, "endDate": "2024-04-01T00:00:00Z" }),
            "Recurrence cannot have both an end date and a count",
        ),
        (
            json!({ "frequency": "weekly", "endDate": "2024-03-01T00:00:00Z" }),
            "Recurrence end date cannot be before the meeting date",
        ),
        (
            json!({ "frequency": "daily", "count": 101 }),
            "Recurrence count cannot exceed 100 occurrences",
        ),
    ] {
        TestRequest::post("/api/meetings")
            .json_body(&recurring_form("2024-03-04T09:00:00Z", rule))
            .send(&service)
            .await
            .assert_status(StatusCode::BAD_REQUEST)
            .assert_body_contains(message);
    }

    let all = TestRequest::get("/api/meetings")
        .send(&service)
        .await
        .json_array();
    assert!(all.is_empty());
}

#[test_log::test(tokio::test)]
async fn deleting_the_base_keeps_its_instances() {
    let service = create_test_service();
    let base = create_meeting(
        &service,
        &recurring_form(
            "2024-03-04T09:00:00Z",
            json!({ "frequency": "weekly", "count": 2 }),
        ),
    )
    .await;

    TestRequest::delete(&format!("/api/meetings?id={}", id_of(&base)))
        .send(&service)
        .await
        .assert_status(StatusCode::OK);

    let remaining = TestRequest::get("/api/meetings")
        .send(&service)
        .await
        .json_array();
    assert_eq!(date_times(&remaining), vec!["2024-03-11T09:00:00Z"]);
}

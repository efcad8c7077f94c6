use salvo::http::StatusCode;
use serde_json::json;

use super::helpers::{
    TestRequest, create_meeting, create_seeded_test_service, create_test_service, id_of,
    meeting_form,
};

#[test_log::test(tokio::test)]
async fn meeting_lifecycle() {
    let service = create_test_service();

    let created = create_meeting(
        &service,
        &meeting_form("Dr. Michael Chen", "2024-03-06T14:30:00Z"),
    )
    .await;
    let id = id_of(&created);
    assert_eq!(created["status"], "scheduled");
    assert_eq!(created["createdAt"], created["updatedAt"]);

    let fetched = TestRequest::get(&format!("/api/meetings?id={id}"))
        .send(&service)
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert_eq!(fetched, created);

    let updated = TestRequest::put("/api/meetings")
        .json_body(&json!({ "id": id, "dateTime": "2024-03-07T09:00:00Z" }))
        .send(&service)
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert_eq!(updated["dateTime"], "2024-03-07T09:00:00Z");
    assert_eq!(updated["createdAt"], created["createdAt"]);

    let canceled = TestRequest::put(&format!("/api/meetings/{id}/status"))
        .json_body(&json!({ "status": "canceled" }))
        .send(&service)
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert_eq!(canceled["status"], "canceled");

    TestRequest::delete(&format!("/api/meetings?id={id}"))
        .send(&service)
        .await
        .assert_status(StatusCode::OK)
        .assert_body_contains("\"success\":true");

    TestRequest::delete(&format!("/api/meetings?id={id}"))
        .send(&service)
        .await
        .assert_status(StatusCode::NOT_FOUND)
        .assert_body_contains("Meeting not found");

    TestRequest::get(&format!("/api/meetings?id={id}"))
        .send(&service)
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[test_log::test(tokio::test)]
async fn list_without_parameters_returns_every_meeting_sorted() {
    let service = create_test_service();
    create_meeting(&service, &meeting_form("Dr. B", "2024-05-01T10:00:00Z")).await;
    create_meeting(&service, &meeting_form("Dr. A", "2024-01-01T10:00:00Z")).await;

    let meetings = TestRequest::get("/api/meetings")
        .send(&service)
        .await
        .assert_status(StatusCode::OK)
        .json_array();

    assert_eq!(meetings.len(), 2);
    assert_eq!(meetings[0]["doctorName"], "Dr. A");
    assert_eq!(meetings[1]["doctorName"], "Dr. B");
}

#[test_log::test(tokio::test)]
async fn week_query_includes_sunday_and_excludes_next_monday() {
    let service = create_test_service();
    for date_time in [
        "2024-03-03T23:59:59Z",
        "2024-03-04T00:00:00Z",
        "2024-03-10T23:59:59Z",
        "2024-03-11T00:00:00Z",
    ] {
        create_meeting(&service, &meeting_form("Dr. Chen", date_time)).await;
    }

    let meetings = TestRequest::get("/api/meetings?weekStart=2024-03-06")
        .send(&service)
        .await
        .assert_status(StatusCode::OK)
        .json_array();

    let times: Vec<_> = meetings.iter().map(|m| m["dateTime"].clone()).collect();
    assert_eq!(
        times,
        vec![json!("2024-03-04T00:00:00Z"), json!("2024-03-10T23:59:59Z")]
    );
}

#[test_log::test(tokio::test)]
async fn month_query_and_filters_combine() {
    let service = create_test_service();
    create_meeting(&service, &meeting_form("Dr. Chen", "2024-02-29T10:00:00Z")).await;
    create_meeting(&service, &meeting_form("Dr. Chen", "2024-03-01T10:00:00Z")).await;
    create_meeting(&service, &meeting_form("Dr. Patel", "2024-03-15T10:00:00Z")).await;
    let mut done = meeting_form("Dr. Chen", "2024-03-20T10:00:00Z");
    done["status"] = json!("done");
    create_meeting(&service, &done).await;

    let march = TestRequest::get("/api/meetings?month=2024-03-10")
        .send(&service)
        .await
        .json_array();
    assert_eq!(march.len(), 3);

    let chen = TestRequest::get("/api/meetings?month=2024-03-10&doctor=chen")
        .send(&service)
        .await
        .json_array();
    assert_eq!(chen.len(), 2);

    let chen_scheduled = TestRequest::get("/api/meetings?month=2024-03-10&doctor=chen&status=scheduled")
        .send(&service)
        .await
        .json_array();
    assert_eq!(chen_scheduled.len(), 1);
    assert_eq!(chen_scheduled[0]["dateTime"], "2024-03-01T10:00:00Z");

    let everything = TestRequest::get("/api/meetings?status=all")
        .send(&service)
        .await
        .json_array();
    assert_eq!(everything.len(), 4);

    TestRequest::get("/api/meetings?status=postponed")
        .send(&service)
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[test_log::test(tokio::test)]
async fn search_query_matches_purpose_and_notes() {
    let service = create_test_service();
    let mut with_notes = meeting_form("Dr. Chen", "2024-03-05T10:00:00Z");
    with_notes["notes"] = json!("Bring the cardiology samples");
    create_meeting(&service, &with_notes).await;
    create_meeting(&service, &meeting_form("Dr. Patel", "2024-03-06T10:00:00Z")).await;

    let found = TestRequest::get("/api/meetings?query=CARDIOLOGY")
        .send(&service)
        .await
        .json_array();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0]["doctorName"], "Dr. Chen");

    let demo = TestRequest::get("/api/meetings?query=demo")
        .send(&service)
        .await
        .json_array();
    assert_eq!(demo.len(), 2);
}

#[test_log::test(tokio::test)]
async fn validation_errors_are_reported_together() {
    let service = create_test_service();

    let body = TestRequest::post("/api/meetings")
        .json_body(&json!({ "doctorName": "X", "dateTime": "not a date" }))
        .send(&service)
        .await
        .assert_status(StatusCode::BAD_REQUEST)
        .json();

    let errors = body["errors"].as_array().cloned().unwrap_or_default();
    assert!(errors.contains(&json!("Hospital is required")));
    assert!(errors.contains(&json!("Invalid date/time format")));
}

#[test_log::test(tokio::test)]
async fn update_unknown_meeting_is_404() {
    let service = create_test_service();

    TestRequest::put("/api/meetings")
        .json_body(&json!({ "id": "missing", "notes": "x" }))
        .send(&service)
        .await
        .assert_status(StatusCode::NOT_FOUND);

    TestRequest::put("/api/meetings/missing/status")
        .json_body(&json!({ "status": "done" }))
        .send(&service)
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[test_log::test(tokio::test)]
async fn seeded_service_has_a_full_demo_week() {
    let service = create_seeded_test_service();

    let hospitals = TestRequest::get("/api/hospitals")
        .send(&service)
        .await
        .json_array();
    assert_eq!(hospitals.len(), 5);

    let summary = TestRequest::get("/api/meetings/summary")
        .send(&service)
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert_eq!(summary["total"], 20);
    let counted = ["scheduled", "done", "canceled"]
        .iter()
        .filter_map(|key| summary[*key].as_u64())
        .sum::<u64>();
    assert_eq!(counted, 20);
}

#[test_log::test(tokio::test)]
async fn range_queries_past_the_calendar_end_are_400() {
    let service = create_test_service();

    for path in [
        "/api/meetings?month=%2B262142-12-15",
        "/api/meetings?weekStart=%2B262142-12-31",
        "/api/meetings/summary?weekStart=%2B262142-12-31",
        "/api/meetings/week?weekStart=%2B262142-12-31",
    ] {
        TestRequest::get(path)
            .send(&service)
            .await
            .assert_status(StatusCode::BAD_REQUEST)
            .assert_body_contains("Date out of range");
    }
}

#[test_log::test(tokio::test)]
async fn week_view_of_the_seeded_week_has_five_busy_days() {
    let service = create_seeded_test_service();

    let view = TestRequest::get("/api/meetings/week")
        .send(&service)
        .await
        .assert_status(StatusCode::OK)
        .json();

    let days = view["days"].as_array().expect("days");
    assert_eq!(days.len(), 7);
    let busy = days
        .iter()
        .filter(|day| day["meetings"].as_array().is_some_and(|m| !m.is_empty()))
        .count();
    assert_eq!(busy, 5);
    assert_eq!(view["summary"]["total"], 20);
    assert_eq!(view["summary"]["canceled"], 0);
}

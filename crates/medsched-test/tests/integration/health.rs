use salvo::http::StatusCode;

use super::helpers::{TestRequest, create_test_service};

#[test_log::test(tokio::test)]
async fn healthcheck_responds_ok() {
    let service = create_test_service();

    TestRequest::get("/api/app/healthcheck")
        .send(&service)
        .await
        .assert_status(StatusCode::OK)
        .assert_body_contains("OK");
}

#[test_log::test(tokio::test)]
async fn unknown_route_is_404() {
    let service = create_test_service();

    TestRequest::get("/api/appointments")
        .send(&service)
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[test_log::test(tokio::test)]
async fn statuses_carry_badge_metadata() {
    let service = create_test_service();

    let statuses = TestRequest::get("/api/app/statuses")
        .send(&service)
        .await
        .assert_status(StatusCode::OK)
        .json_array();

    assert_eq!(statuses.len(), 3);
    assert_eq!(statuses[0]["status"], "scheduled");
    assert_eq!(statuses[0]["label"], "Scheduled");
    assert_eq!(statuses[1]["color"], "green");
    assert_eq!(statuses[2]["icon"], "XCircle");
}

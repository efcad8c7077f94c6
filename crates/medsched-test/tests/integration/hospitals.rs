use salvo::http::StatusCode;
use serde_json::json;

use super::helpers::{
    TestRequest, create_meeting, create_seeded_test_service, create_test_service, id_of,
};

fn hospital_form(name: &str, city: &str) -> serde_json::Value {
    json!({
        "name": name,
        "address": "9101 Hospital Boulevard",
        "city": city,
        "coordinates": { "lat": 32.7157, "lng": -117.1611 },
    })
}

#[test_log::test(tokio::test)]
async fn hospital_lifecycle() {
    let service = create_test_service();

    let created = TestRequest::post("/api/hospitals")
        .json_body(&hospital_form("City Regional Medical Center", "San Diego"))
        .send(&service)
        .await
        .assert_status(StatusCode::CREATED)
        .json();
    let id = id_of(&created);
    assert_eq!(created["coordinates"]["lat"], 32.7157);

    let updated = TestRequest::put("/api/hospitals")
        .json_body(&json!({ "id": id, "city": "La Jolla" }))
        .send(&service)
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert_eq!(updated["city"], "La Jolla");
    assert_eq!(updated["name"], "City Regional Medical Center");

    TestRequest::delete(&format!("/api/hospitals?id={id}"))
        .send(&service)
        .await
        .assert_status(StatusCode::OK);
    TestRequest::delete(&format!("/api/hospitals?id={id}"))
        .send(&service)
        .await
        .assert_status(StatusCode::NOT_FOUND)
        .assert_body_contains("Hospital not found");
}

#[test_log::test(tokio::test)]
async fn out_of_range_coordinates_are_rejected() {
    let service = create_test_service();
    let mut form = hospital_form("General Hospital", "Los Angeles");
    form["coordinates"] = json!({ "lat": 91.0, "lng": -181.0 });

    let body = TestRequest::post("/api/hospitals")
        .json_body(&form)
        .send(&service)
        .await
        .assert_status(StatusCode::BAD_REQUEST)
        .json();

    assert_eq!(body["errors"].as_array().map(Vec::len), Some(2));
}

#[test_log::test(tokio::test)]
async fn demo_hospitals_filter_by_city_and_query() {
    let service = create_seeded_test_service();

    let sf = TestRequest::get("/api/hospitals?city=san%20francisco")
        .send(&service)
        .await
        .json_array();
    assert_eq!(sf.len(), 1);
    assert_eq!(sf[0]["name"], "St. Mary Medical Center");

    let medical = TestRequest::get("/api/hospitals?query=medical")
        .send(&service)
        .await
        .json_array();
    assert!(medical.len() >= 2);
    assert!(medical.iter().all(|hospital| {
        let text = hospital.to_string().to_lowercase();
        text.contains("medical")
    }));
}

#[test_log::test(tokio::test)]
async fn meeting_picks_up_hospital_details() {
    let service = create_test_service();
    let hospital = TestRequest::post("/api/hospitals")
        .json_body(&hospital_form("General Hospital", "Los Angeles"))
        .send(&service)
        .await
        .assert_status(StatusCode::CREATED)
        .json();

    let meeting = create_meeting(
        &service,
        &json!({
            "doctorName": "Dr. Emily Rodriguez",
            "hospitalId": id_of(&hospital),
            "dateTime": "2024-03-06T10:00:00Z",
        }),
    )
    .await;

    assert_eq!(meeting["hospitalName"], "General Hospital");
    assert_eq!(
        meeting["hospitalAddress"],
        "9101 Hospital Boulevard, Los Angeles"
    );

    let by_hospital = TestRequest::get(&format!(
        "/api/meetings?hospitalId={}",
        id_of(&hospital)
    ))
    .send(&service)
    .await
    .json_array();
    assert_eq!(by_hospital.len(), 1);
}

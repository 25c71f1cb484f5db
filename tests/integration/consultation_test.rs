//! Integration tests for the consultation workflow.

use std::time::Duration;

use axum::http::StatusCode;
use serde_json::json;

use crate::helpers::TestApp;

fn path(id: &str, action: &str) -> String {
    format!("/api/consultations/{id}/{action}")
}

#[tokio::test]
async fn test_full_lifecycle() {
    let app = TestApp::new().await;
    let (citizen, citizen_id) = app.register("asha", "user").await;
    let (lawyer, lawyer_id) = app.register("ravi", "lawyer").await;

    let id = app.submit(&citizen, "Deposit not returned").await;

    let pending = app
        .request("GET", "/api/consultations/lawyer/pending", None, Some(&lawyer))
        .await;
    assert_eq!(pending.status, StatusCode::OK);
    assert_eq!(pending.body["data"].as_array().map(Vec::len), Some(1));

    let assigned = app
        .request("PUT", &path(&id, "assign"), None, Some(&lawyer))
        .await;
    assert_eq!(assigned.status, StatusCode::OK);
    assert_eq!(assigned.message(), "Consultation assigned successfully");
    assert_eq!(assigned.body["data"]["status"], "assigned");
    assert_eq!(assigned.body["data"]["assigned_lawyer_id"], lawyer_id.as_str());
    assert_eq!(assigned.body["data"]["assigned_lawyer"]["username"], "ravi");

    let pending = app
        .request("GET", "/api/consultations/lawyer/pending", None, Some(&lawyer))
        .await;
    assert_eq!(pending.body["data"].as_array().map(Vec::len), Some(0));

    let responded = app
        .request(
            "PUT",
            &path(&id, "respond"),
            Some(json!({ "response": "  Send a legal notice first.  " })),
            Some(&lawyer),
        )
        .await;
    assert_eq!(responded.status, StatusCode::OK);
    assert_eq!(responded.body["data"]["status"], "responded");
    assert_eq!(responded.body["data"]["response"], "Send a legal notice first.");
    assert!(responded.body["data"]["response_date"].is_string());

    let closed = app
        .request("PUT", &path(&id, "close"), None, Some(&citizen))
        .await;
    assert_eq!(closed.status, StatusCode::OK);
    assert_eq!(closed.message(), "Consultation closed successfully");
    assert_eq!(closed.body["data"]["status"], "closed");
    assert_eq!(closed.body["data"]["user_id"], citizen_id.as_str());

    let fetched = app
        .request("GET", &format!("/api/consultations/{id}"), None, Some(&citizen))
        .await;
    assert_eq!(fetched.status, StatusCode::OK);
    assert_eq!(fetched.body["data"]["status"], "closed");
    assert_eq!(fetched.body["data"]["response"], "Send a legal notice first.");
}

#[tokio::test]
async fn test_submit_defaults_and_validation() {
    let app = TestApp::new().await;
    let (citizen, _) = app.register("asha", "user").await;

    let created = app
        .request(
            "POST",
            "/api/consultations",
            Some(json!({
                "query_title": "  Unpaid wages  ",
                "detailed_question": "Employer has not paid for three months.",
                "category": "employment_issue",
            })),
            Some(&citizen),
        )
        .await;
    assert_eq!(created.status, StatusCode::CREATED);
    assert_eq!(created.message(), "Consultation submitted successfully");
    let data = &created.body["data"];
    assert_eq!(data["title"], "Unpaid wages");
    assert_eq!(data["status"], "pending");
    assert_eq!(data["urgency"], "medium");
    assert_eq!(data["contact_preference"], "email");
    assert_eq!(data["language"], "english");
    assert_eq!(data["is_anonymous"], false);
    assert!(data["assigned_lawyer_id"].is_null());

    let missing = app
        .request(
            "POST",
            "/api/consultations",
            Some(json!({ "title": "No question", "category": "other" })),
            Some(&citizen),
        )
        .await;
    assert_eq!(missing.status, StatusCode::BAD_REQUEST);
    assert_eq!(missing.message(), "Please provide all required fields");

    let bad_category = app
        .request(
            "POST",
            "/api/consultations",
            Some(json!({
                "title": "Tax",
                "question": "Income tax notice",
                "category": "tax_law",
            })),
            Some(&citizen),
        )
        .await;
    assert_eq!(bad_category.status, StatusCode::BAD_REQUEST);

    let long_title = app
        .request(
            "POST",
            "/api/consultations",
            Some(json!({
                "title": "x".repeat(201),
                "question": "Too long a title",
                "category": "other",
            })),
            Some(&citizen),
        )
        .await;
    assert_eq!(long_title.status, StatusCode::BAD_REQUEST);
    assert_eq!(long_title.message(), "Title cannot exceed 200 characters");
}

#[tokio::test]
async fn test_title_length_is_checked_after_trimming() {
    let app = TestApp::new().await;
    let (citizen, _) = app.register("asha", "user").await;
    let title = "a".repeat(200);

    let padded = app
        .request(
            "POST",
            "/api/consultations",
            Some(json!({
                "title": format!("  {title}  "),
                "question": format!("{}\n", "q".repeat(2000)),
                "category": "other",
            })),
            Some(&citizen),
        )
        .await;
    assert_eq!(padded.status, StatusCode::CREATED, "{:?}", padded.body);
    assert_eq!(padded.body["data"]["title"], title.as_str());
    assert_eq!(
        padded.body["data"]["question"].as_str().map(str::len),
        Some(2000)
    );

    // Multi-byte characters count once each.
    let wide = app
        .request(
            "POST",
            "/api/consultations",
            Some(json!({
                "title": "अ".repeat(200),
                "question": "Question",
                "category": "other",
            })),
            Some(&citizen),
        )
        .await;
    assert_eq!(wide.status, StatusCode::CREATED, "{:?}", wide.body);

    let long_question = app
        .request(
            "POST",
            "/api/consultations",
            Some(json!({
                "title": "Fine",
                "question": "q".repeat(2001),
                "category": "other",
            })),
            Some(&citizen),
        )
        .await;
    assert_eq!(long_question.status, StatusCode::BAD_REQUEST);
    assert_eq!(long_question.message(), "Question cannot exceed 2000 characters");
}

#[tokio::test]
async fn test_only_users_submit() {
    let app = TestApp::new().await;
    let (lawyer, _) = app.register("ravi", "lawyer").await;

    let response = app
        .request(
            "POST",
            "/api/consultations",
            Some(json!({ "title": "t", "question": "q", "category": "other" })),
            Some(&lawyer),
        )
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
    assert_eq!(response.message(), "Only users can submit consultations");
}

#[tokio::test]
async fn test_requires_authentication() {
    let app = TestApp::new().await;

    let response = app.request("GET", "/api/consultations", None, None).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.message(), "Not authorized to access this route");
}

#[tokio::test]
async fn test_list_mine_is_newest_first_and_scoped() {
    let app = TestApp::new().await;
    let (asha, _) = app.register("asha", "user").await;
    let (meena, _) = app.register("meena", "user").await;

    app.submit(&asha, "First").await;
    tokio::time::sleep(Duration::from_millis(5)).await;
    app.submit(&meena, "Not mine").await;
    tokio::time::sleep(Duration::from_millis(5)).await;
    app.submit(&asha, "Second").await;

    let response = app
        .request("GET", "/api/consultations", None, Some(&asha))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    let titles: Vec<_> = response.body["data"]
        .as_array()
        .expect("data array")
        .iter()
        .map(|c| c["title"].as_str().unwrap_or_default().to_string())
        .collect();
    assert_eq!(titles, vec!["Second", "First"]);
}

#[tokio::test]
async fn test_visibility_rules() {
    let app = TestApp::new().await;
    let (owner, _) = app.register("asha", "user").await;
    let (stranger, _) = app.register("meena", "user").await;
    let (lawyer, _) = app.register("ravi", "lawyer").await;
    let (other_lawyer, _) = app.register("kiran", "lawyer").await;

    let id = app.submit(&owner, "Boundary wall").await;
    let url = format!("/api/consultations/{id}");

    let denied = app.request("GET", &url, None, Some(&stranger)).await;
    assert_eq!(denied.status, StatusCode::FORBIDDEN);
    assert_eq!(
        denied.message(),
        "You are not authorized to view this consultation"
    );

    // Unclaimed consultations are open to every lawyer.
    let open = app.request("GET", &url, None, Some(&other_lawyer)).await;
    assert_eq!(open.status, StatusCode::OK);

    app.request("PUT", &path(&id, "assign"), None, Some(&lawyer))
        .await;

    let claimed = app.request("GET", &url, None, Some(&other_lawyer)).await;
    assert_eq!(claimed.status, StatusCode::FORBIDDEN);

    let assigned = app.request("GET", &url, None, Some(&lawyer)).await;
    assert_eq!(assigned.status, StatusCode::OK);
}

#[tokio::test]
async fn test_unknown_and_malformed_ids() {
    let app = TestApp::new().await;
    let (citizen, _) = app.register("asha", "user").await;

    let unknown = app
        .request(
            "GET",
            "/api/consultations/00000000-0000-4000-8000-000000000000",
            None,
            Some(&citizen),
        )
        .await;
    assert_eq!(unknown.status, StatusCode::NOT_FOUND);
    assert_eq!(unknown.message(), "Consultation not found");

    let malformed = app
        .request("GET", "/api/consultations/not-an-id", None, Some(&citizen))
        .await;
    assert_eq!(malformed.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_anonymous_owner_is_hidden_from_lawyer() {
    let app = TestApp::new().await;
    let (citizen, citizen_id) = app.register("asha", "user").await;
    let (lawyer, _) = app.register("ravi", "lawyer").await;

    let created = app
        .request(
            "POST",
            "/api/consultations",
            Some(json!({
                "title": "Domestic matter",
                "question": "Sensitive question",
                "category": "family_law",
                "is_anonymous": true,
            })),
            Some(&citizen),
        )
        .await;
    assert_eq!(created.status, StatusCode::CREATED);
    assert_eq!(created.body["data"]["user"]["username"], "asha");
    let id = created.body["data"]["id"].as_str().unwrap_or_default().to_string();

    let seen = app
        .request("GET", &format!("/api/consultations/{id}"), None, Some(&lawyer))
        .await;
    assert_eq!(seen.status, StatusCode::OK);
    assert!(seen.body["data"].get("user").is_none());
    assert!(seen.body["data"].get("user_id").is_none());
    assert_eq!(seen.body["data"]["is_anonymous"], true);

    let pending = app
        .request("GET", "/api/consultations/lawyer/pending", None, Some(&lawyer))
        .await;
    assert_eq!(pending.status, StatusCode::OK);
    let queued = &pending.body["data"][0];
    assert_eq!(queued["id"], id.as_str());
    assert!(queued.get("user").is_none());
    assert!(queued.get("user_id").is_none());
    assert!(!pending.body.to_string().contains(&citizen_id));

    let own = app
        .request("GET", &format!("/api/consultations/{id}"), None, Some(&citizen))
        .await;
    assert_eq!(own.body["data"]["user_id"], citizen_id.as_str());
    assert_eq!(own.body["data"]["user"]["username"], "asha");
}

#[tokio::test]
async fn test_lawyer_endpoints_reject_citizens() {
    let app = TestApp::new().await;
    let (citizen, _) = app.register("asha", "user").await;
    let id = app.submit(&citizen, "Consumer fraud").await;

    for endpoint in [
        "/api/consultations/lawyer/pending",
        "/api/consultations/lawyer/assigned",
    ] {
        let response = app.request("GET", endpoint, None, Some(&citizen)).await;
        assert_eq!(response.status, StatusCode::FORBIDDEN);
        assert_eq!(response.message(), "Only lawyers can access this endpoint");
    }

    let assign = app
        .request("PUT", &path(&id, "assign"), None, Some(&citizen))
        .await;
    assert_eq!(assign.status, StatusCode::FORBIDDEN);
    assert_eq!(assign.message(), "Only lawyers can assign consultations");
}

#[tokio::test]
async fn test_respond_requires_assignment_and_text() {
    let app = TestApp::new().await;
    let (citizen, _) = app.register("asha", "user").await;
    let (lawyer, _) = app.register("ravi", "lawyer").await;
    let (other_lawyer, _) = app.register("kiran", "lawyer").await;
    let id = app.submit(&citizen, "Land records").await;

    let unassigned = app
        .request(
            "PUT",
            &path(&id, "respond"),
            Some(json!({ "response": "Visit the tehsil office" })),
            Some(&lawyer),
        )
        .await;
    assert_eq!(unassigned.status, StatusCode::FORBIDDEN);
    assert_eq!(
        unassigned.message(),
        "You are not assigned to this consultation"
    );

    app.request("PUT", &path(&id, "assign"), None, Some(&lawyer))
        .await;

    let blank = app
        .request(
            "PUT",
            &path(&id, "respond"),
            Some(json!({ "response": "   " })),
            Some(&lawyer),
        )
        .await;
    assert_eq!(blank.status, StatusCode::BAD_REQUEST);
    assert_eq!(blank.message(), "Response is required");

    let intruder = app
        .request(
            "PUT",
            &path(&id, "respond"),
            Some(json!({ "response": "Hijacked" })),
            Some(&other_lawyer),
        )
        .await;
    assert_eq!(intruder.status, StatusCode::FORBIDDEN);

    let assigned = app
        .request("GET", "/api/consultations/lawyer/assigned", None, Some(&lawyer))
        .await;
    assert_eq!(assigned.body["data"].as_array().map(Vec::len), Some(1));
    assert_eq!(assigned.body["data"][0]["status"], "assigned");
}

#[tokio::test]
async fn test_close_rules_under_strict_policy() {
    let app = TestApp::new().await;
    let (citizen, _) = app.register("asha", "user").await;
    let (stranger, _) = app.register("meena", "user").await;
    let (lawyer, _) = app.register("ravi", "lawyer").await;
    let id = app.submit(&citizen, "Pension delay").await;

    let denied = app
        .request("PUT", &path(&id, "close"), None, Some(&stranger))
        .await;
    assert_eq!(denied.status, StatusCode::FORBIDDEN);
    assert_eq!(
        denied.message(),
        "You are not authorized to close this consultation"
    );

    let closed = app
        .request("PUT", &path(&id, "close"), None, Some(&citizen))
        .await;
    assert_eq!(closed.status, StatusCode::OK);

    let again = app
        .request("PUT", &path(&id, "close"), None, Some(&citizen))
        .await;
    assert_eq!(again.status, StatusCode::BAD_REQUEST);
    assert_eq!(again.message(), "Consultation is already closed");

    let assign = app
        .request("PUT", &path(&id, "assign"), None, Some(&lawyer))
        .await;
    assert_eq!(assign.status, StatusCode::BAD_REQUEST);
    assert_eq!(assign.message(), "Consultation is closed");
}

#[tokio::test]
async fn test_second_assign_loses_under_strict_policy() {
    let app = TestApp::new().await;
    let (citizen, _) = app.register("asha", "user").await;
    let (first, first_id) = app.register("ravi", "lawyer").await;
    let (second, _) = app.register("kiran", "lawyer").await;
    let id = app.submit(&citizen, "Tenant eviction").await;

    let won = app
        .request("PUT", &path(&id, "assign"), None, Some(&first))
        .await;
    assert_eq!(won.status, StatusCode::OK);

    let lost = app
        .request("PUT", &path(&id, "assign"), None, Some(&second))
        .await;
    assert_eq!(lost.status, StatusCode::BAD_REQUEST);
    assert_eq!(lost.message(), "Consultation is already assigned to a lawyer");

    let fetched = app
        .request("GET", &format!("/api/consultations/{id}"), None, Some(&citizen))
        .await;
    assert_eq!(fetched.body["data"]["assigned_lawyer_id"], first_id.as_str());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_assign_has_one_winner() {
    let app = TestApp::new().await;
    let (citizen, _) = app.register("asha", "user").await;
    let id = app.submit(&citizen, "Race").await;

    let mut handles = Vec::new();
    for i in 0..6 {
        let (token, _) = app.register(&format!("lawyer{i}"), "lawyer").await;
        let app = app.clone();
        let url = path(&id, "assign");
        handles.push(tokio::spawn(async move {
            app.request("PUT", &url, None, Some(&token)).await.status
        }));
    }

    let mut statuses = Vec::new();
    for handle in handles {
        statuses.push(handle.await.expect("assign task panicked"));
    }

    let winners = statuses.iter().filter(|s| **s == StatusCode::OK).count();
    assert_eq!(winners, 1);
    assert!(
        statuses
            .iter()
            .filter(|s| **s != StatusCode::OK)
            .all(|s| *s == StatusCode::BAD_REQUEST)
    );
}

#[tokio::test]
async fn test_last_writer_wins_allows_reassign_and_reclose() {
    let app = TestApp::with_policy("last_writer_wins").await;
    let (citizen, _) = app.register("asha", "user").await;
    let (first, _) = app.register("ravi", "lawyer").await;
    let (second, second_id) = app.register("kiran", "lawyer").await;
    let (stranger, _) = app.register("meena", "user").await;
    let id = app.submit(&citizen, "Water supply").await;

    app.request("PUT", &path(&id, "assign"), None, Some(&first))
        .await;
    let reassigned = app
        .request("PUT", &path(&id, "assign"), None, Some(&second))
        .await;
    assert_eq!(reassigned.status, StatusCode::OK);
    assert_eq!(
        reassigned.body["data"]["assigned_lawyer_id"],
        second_id.as_str()
    );

    // Party checks still hold.
    let intruder = app
        .request(
            "PUT",
            &path(&id, "respond"),
            Some(json!({ "response": "Stale answer" })),
            Some(&first),
        )
        .await;
    assert_eq!(intruder.status, StatusCode::FORBIDDEN);

    let denied = app
        .request("PUT", &path(&id, "close"), None, Some(&stranger))
        .await;
    assert_eq!(denied.status, StatusCode::FORBIDDEN);

    for _ in 0..2 {
        let closed = app
            .request("PUT", &path(&id, "close"), None, Some(&citizen))
            .await;
        assert_eq!(closed.status, StatusCode::OK);
        assert_eq!(closed.body["data"]["status"], "closed");
    }

    // No guard on closed records: a late claim reopens it.
    let reopened = app
        .request("PUT", &path(&id, "assign"), None, Some(&first))
        .await;
    assert_eq!(reopened.status, StatusCode::OK);
    assert_eq!(reopened.body["data"]["status"], "assigned");
}

#[tokio::test]
async fn test_unknown_policy_fails_to_build() {
    let mut config = adhikar_core::config::AppConfig::default();
    config.workflow.transition_policy = "optimistic".to_string();

    let result = adhikar_api::build_app(config, adhikar_database::Stores::memory());
    assert!(result.is_err());
}

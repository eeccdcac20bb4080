//! HTTP-level tests for the backend client against a mock server.

use mockito::{Matcher, Server};
use serde_json::json;
use vax_client::{ApiClient, ApiError, Credentials, DoctorCenterLink, Gender, NewDoctor};

fn client_for(server: &Server) -> ApiClient {
    ApiClient::new(server.url()).expect("mock server URL should be valid")
}

#[tokio::test]
async fn test_register_posts_credentials() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/auth/register")
        .match_header("content-type", "application/json")
        .match_body(Matcher::Json(json!({
            "email": "a@b.com",
            "password": "secret1"
        })))
        .with_status(200)
        .with_body("OTP sent to your email")
        .create_async()
        .await;

    let client = client_for(&server);
    client
        .register(&Credentials {
            email: "a@b.com".into(),
            password: "secret1".into(),
        })
        .await
        .expect("register should succeed");

    mock.assert_async().await;
}

#[tokio::test]
async fn test_verify_email_sends_numeric_otp() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/auth/verify-email")
        .match_body(Matcher::Json(json!({"email": "a@b.com", "otp": 654321})))
        .with_status(200)
        .create_async()
        .await;

    let client = client_for(&server);
    client.verify_email("a@b.com", 654321).await.unwrap();

    mock.assert_async().await;
}

#[tokio::test]
async fn test_rejection_with_json_message() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/auth/verify-email")
        .with_status(400)
        .with_header("content-type", "application/json")
        .with_body(r#"{"message": "Invalid or expired OTP"}"#)
        .create_async()
        .await;

    let client = client_for(&server);
    let err = client.verify_email("a@b.com", 123456).await.unwrap_err();

    assert_eq!(err.status(), Some(400));
    assert_eq!(err.user_message(), Some("Invalid or expired OTP"));
}

#[tokio::test]
async fn test_rejection_with_plain_text_and_empty_body() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/auth/register")
        .with_status(409)
        .with_body("Email already exists")
        .create_async()
        .await;
    server
        .mock("POST", "/auth/login")
        .with_status(500)
        .create_async()
        .await;

    let client = client_for(&server);
    let creds = Credentials {
        email: "a@b.com".into(),
        password: "secret1".into(),
    };

    let err = client.register(&creds).await.unwrap_err();
    assert_eq!(err.user_message(), Some("Email already exists"));

    let err = client.login(&creds).await.unwrap_err();
    assert!(matches!(
        err,
        ApiError::Api {
            status: 500,
            message: None
        }
    ));
}

#[tokio::test]
async fn test_list_endpoints_tolerate_non_array_bodies() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/doctor/getAll")
        .with_status(200)
        .with_body(r#"{"status": "empty"}"#)
        .create_async()
        .await;
    server
        .mock("GET", "/vaccine/doctor/4")
        .with_status(200)
        .with_body(
            json!([
                {"id": 1, "vaccineName": "Covaxin", "manufacturer": "Bharat", "dosesRequired": 2},
                {"id": 2, "vaccineName": "Covishield"}
            ])
            .to_string(),
        )
        .create_async()
        .await;

    let client = client_for(&server);
    assert!(client.list_doctors().await.unwrap().is_empty());

    let vaccines = client.vaccines_for_doctor(4).await.unwrap();
    assert_eq!(vaccines.len(), 2);
    assert_eq!(vaccines[0].vaccine_name, "Covaxin");
    assert_eq!(vaccines[0].doses_required, Some(2));
    assert_eq!(vaccines[1].manufacturer, None);
}

#[tokio::test]
async fn test_write_endpoints_return_backend_message() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/doctor/add")
        .match_body(Matcher::Json(json!({
            "name": "Dr. Rao",
            "age": 45,
            "gender": "FEMALE",
            "emailId": "rao@clinic.org"
        })))
        .with_status(200)
        .with_body("Doctor added successfully")
        .create_async()
        .await;
    server
        .mock("POST", "/doctor/associateWithCenter")
        .match_body(Matcher::Json(json!({"docId": 3, "centerId": 9})))
        .with_status(200)
        .with_body(r#"{"message": "Doctor linked"}"#)
        .create_async()
        .await;

    let client = client_for(&server);
    let msg = client
        .add_doctor(&NewDoctor {
            name: "Dr. Rao".into(),
            age: 45,
            gender: Gender::Female,
            email_id: "rao@clinic.org".into(),
        })
        .await
        .unwrap();
    assert_eq!(msg.as_deref(), Some("Doctor added successfully"));

    let msg = client
        .link_doctor_to_center(DoctorCenterLink {
            doc_id: 3,
            center_id: 9,
        })
        .await
        .unwrap();
    assert_eq!(msg.as_deref(), Some("Doctor linked"));
}

#[tokio::test]
async fn test_give_dose_uses_query_parameters() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/dose/giveDose1")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("doseId".into(), "D-100".into()),
            Matcher::UrlEncoded("userId".into(), "12".into()),
        ]))
        .with_status(200)
        .with_body("Dose 1 given")
        .create_async()
        .await;

    let client = client_for(&server);
    let msg = client.give_dose("D-100", 12).await.unwrap();

    assert_eq!(msg.as_deref(), Some("Dose 1 given"));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_find_account_decodes_summary() {
    let mut server = Server::new_async().await;
    server
        .mock(
            "GET",
            Matcher::Regex(r"^/auth/by-email/a(%40|@)b\.com$".into()),
        )
        .with_status(200)
        .with_body(r#"{"email": "a@b.com", "role": "ADMIN", "emailVerified": true}"#)
        .create_async()
        .await;

    let client = client_for(&server);
    let account = client.find_account("a@b.com").await.unwrap();

    assert_eq!(account.email, "a@b.com");
    assert_eq!(account.role.as_deref(), Some("ADMIN"));
    assert!(account.email_verified);
}

#[tokio::test]
async fn test_get_vaccine_with_unexpected_body_is_parse_error() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/vaccine/get/5")
        .with_status(200)
        .with_body("not json at all")
        .create_async()
        .await;

    let client = client_for(&server);
    let err = client.get_vaccine(5).await.unwrap_err();
    assert!(matches!(err, ApiError::Parse(_)));
}

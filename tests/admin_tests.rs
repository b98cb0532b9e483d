//! Admin Integration Tests

mod common;

use jpush_client::{AppRequest, CertificateUpload};
use serde_json::json;
use wiremock::matchers::{body_json, body_string, method, path};
use wiremock::{Mock, ResponseTemplate};

#[tokio::test]
async fn test_create_app() {
    let (server, client) = common::mock_client().await;

    Mock::given(method("POST"))
        .and(path("/app"))
        .and(body_json(json!({
            "app_name": "news",
            "android_package": "cn.example.news",
            "group_name": "default",
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "app_key": "a1703c14b186a0a31ac7bbc6",
            "android_package": "cn.example.news",
            "is_new_created": true,
        })))
        .expect(1)
        .mount(&server)
        .await;

    let request = AppRequest::new("news", "cn.example.news", "default");
    let app = client.create_app(&request).await.unwrap();
    assert_eq!(app.app_key, "a1703c14b186a0a31ac7bbc6");
    assert!(app.is_new_created);
}

#[tokio::test]
async fn test_delete_app_posts_empty_body() {
    let (server, client) = common::mock_client().await;

    Mock::given(method("POST"))
        .and(path("/app/a1703c14b186a0a31ac7bbc6/delete"))
        .and(body_string(""))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": "success",
        })))
        .expect(1)
        .mount(&server)
        .await;

    client.delete_app("a1703c14b186a0a31ac7bbc6").await.unwrap();
}

#[tokio::test]
async fn test_upload_certificate() {
    let (server, client) = common::mock_client().await;

    Mock::given(method("POST"))
        .and(path("/app/a1703c14b186a0a31ac7bbc6/certificate"))
        .and(body_json(json!({
            "proCertificatePassword": "p12pass",
            "proCertificateFile": "Y2VydC1ieXRlcw==",
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": "success",
        })))
        .expect(1)
        .mount(&server)
        .await;

    let upload = CertificateUpload::new()
        .with_pro_certificate(b"cert-bytes".to_vec())
        .with_pro_password("p12pass");
    client
        .upload_certificate("a1703c14b186a0a31ac7bbc6", &upload)
        .await
        .unwrap();
}

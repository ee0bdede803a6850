//! Task endpoint integration tests
//!
//! Exercise the HTTP adapter and the task workflow against a local mock
//! server standing in for the task endpoint.

use mockito::Matcher;
use std::time::Duration;
use xinde_client::{
    AppId, AppSecret, BodyEncoding, ClientError, EndpointUrl, FixedClock, TaskHttpClient,
    TaskHttpConfig, TaskId, TaskRequest, TaskWorkflow, UrlSigner, ValueSplit,
};

const CREATE_SIGNATURE: &str = "06c02ddd474fa5225a6230eb3d03d28ff1d8eabb";
const STATUS_SIGNATURE: &str = "6130aeedc1aa45a7a023d1dfb8d6c432689e026b";

fn http_config(body_encoding: BodyEncoding) -> TaskHttpConfig {
    TaskHttpConfig {
        timeout: Duration::from_secs(5),
        body_encoding,
    }
}

fn workflow(server: &mockito::ServerGuard, body_encoding: BodyEncoding) -> TaskWorkflow<FixedClock> {
    TaskWorkflow::with_clock(
        EndpointUrl::new(format!("{}/v1/task", server.url())).unwrap(),
        AppId::new("demo").unwrap(),
        AppSecret::new("sec"),
        ValueSplit::Legacy,
        http_config(body_encoding),
        FixedClock(1000),
    )
    .unwrap()
}

mod http_client_tests {
    use super::*;

    #[tokio::test]
    async fn test_post_task_sends_form_body() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/v1/task")
            .match_query(Matcher::Any)
            .match_header(
                "content-type",
                Matcher::Regex("application/x-www-form-urlencoded".to_string()),
            )
            .match_body(Matcher::AllOf(vec![
                Matcher::UrlEncoded("type".into(), "auth2".into()),
                Matcher::UrlEncoded("userName".into(), "张三".into()),
                Matcher::UrlEncoded("userID".into(), "110101199001011234".into()),
            ]))
            .with_status(200)
            .with_body(r#"{"code":0,"tid":"T1"}"#)
            .create_async()
            .await;

        let signer = UrlSigner::new(AppSecret::new("sec"));
        let url = signer.sign(&format!("{}/v1/task?appid=demo&time=1000", server.url()));
        let client = TaskHttpClient::new(http_config(BodyEncoding::Form)).unwrap();

        let response = client
            .post_task(&url, &TaskRequest::auth2("张三", "110101199001011234"))
            .await
            .expect("task accepted");

        assert_eq!(response.status, 200);
        assert_eq!(response.body, r#"{"code":0,"tid":"T1"}"#);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_post_task_sends_json_body() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/v1/task")
            .match_query(Matcher::Any)
            .match_header("content-type", "application/json;charset=utf-8")
            .match_body(Matcher::Json(serde_json::json!({
                "type": "auth2",
                "userName": "张三",
                "userID": "110101199001011234"
            })))
            .with_status(200)
            .with_body("ok")
            .create_async()
            .await;

        let signer = UrlSigner::new(AppSecret::new("sec"));
        let url = signer.sign(&format!("{}/v1/task?appid=demo&time=1000", server.url()));
        let client = TaskHttpClient::new(http_config(BodyEncoding::Json)).unwrap();

        let response = client
            .post_task(&url, &TaskRequest::auth2("张三", "110101199001011234"))
            .await
            .unwrap();

        assert_eq!(response.body, "ok");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_non_success_status_is_unexpected_response() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/v1/task")
            .match_query(Matcher::Any)
            .with_status(403)
            .with_body("bad signature")
            .create_async()
            .await;

        let signer = UrlSigner::new(AppSecret::new("sec"));
        let url = signer.sign(&format!("{}/v1/task?tid=T1&appid=demo&time=1", server.url()));
        let client = TaskHttpClient::new(http_config(BodyEncoding::Form)).unwrap();

        let err = client.get_status(&url).await.unwrap_err();
        match err {
            ClientError::UnexpectedResponse { status, body } => {
                assert_eq!(status, 403);
                assert_eq!(body, "bad signature");
            }
            other => panic!("Wrong error type: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_unreachable_server_is_transport_error() {
        let signer = UrlSigner::new(AppSecret::new("sec"));
        // Port 1 is reserved and refuses connections on test hosts.
        let url = signer.sign("http://127.0.0.1:1/v1/task?appid=demo&time=1");
        let client = TaskHttpClient::new(http_config(BodyEncoding::Form)).unwrap();

        let err = client.get_status(&url).await.unwrap_err();
        assert!(matches!(err, ClientError::Transport(_)), "got {err:?}");
        assert_eq!(err.status_code(), None);
    }
}

mod workflow_tests {
    use super::*;

    #[tokio::test]
    async fn test_create_task_signs_and_posts() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/v1/task")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("appid".into(), "demo".into()),
                Matcher::UrlEncoded("time".into(), "1000".into()),
                Matcher::UrlEncoded("signature".into(), CREATE_SIGNATURE.into()),
            ]))
            .match_body(Matcher::UrlEncoded("type".into(), "auth2".into()))
            .with_status(200)
            .with_body(r#"{"tid":"T1"}"#)
            .create_async()
            .await;

        let outcome = workflow(&server, BodyEncoding::Form)
            .create_task("张三", "110101199001011234")
            .await
            .expect("task created");

        assert_eq!(outcome.signed_url.signature(), CREATE_SIGNATURE);
        assert_eq!(outcome.response.body, r#"{"tid":"T1"}"#);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_task_status_signs_and_gets() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/v1/task")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("tid".into(), "T1".into()),
                Matcher::UrlEncoded("appid".into(), "demo".into()),
                Matcher::UrlEncoded("time".into(), "1000".into()),
                Matcher::UrlEncoded("signature".into(), STATUS_SIGNATURE.into()),
            ]))
            .with_status(200)
            .with_body(r#"{"status":"done"}"#)
            .create_async()
            .await;

        let tid = TaskId::new("T1").unwrap();
        let outcome = workflow(&server, BodyEncoding::Form)
            .task_status(&tid)
            .await
            .expect("status returned");

        assert_eq!(outcome.response.status, 200);
        assert_eq!(outcome.response.body, r#"{"status":"done"}"#);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_failure_keeps_signed_url() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/v1/task")
            .match_query(Matcher::Any)
            .with_status(500)
            .create_async()
            .await;

        let tid = TaskId::new("T1").unwrap();
        let failure = workflow(&server, BodyEncoding::Form)
            .task_status(&tid)
            .await
            .unwrap_err();

        assert_eq!(failure.signed_url.signature(), STATUS_SIGNATURE);
        assert_eq!(failure.error.status_code(), Some(500));
    }
}

//! Integration tests for waba-core, driven through the public API only.

use std::sync::{Arc, Mutex};

use mockall::{Sequence, mock};
use serde_json::{Value, json};
use waba_core::prelude::*;

mock! {
    pub Graph {}

    #[async_trait::async_trait]
    impl ApiClient for Graph {
        async fn get(&self, path: &str, query: &[(String, String)]) -> Result<Value, ClientError>;
        async fn post(&self, path: &str, body: &Value) -> Result<Value, ClientError>;
        async fn delete(&self, path: &str, query: &[(String, String)]) -> Result<Value, ClientError>;
    }
}

#[derive(Clone, Default)]
struct CollectingLogger {
    lines: Arc<Mutex<Vec<String>>>,
}

impl Logger for CollectingLogger {
    fn debug(&self, message: &str) {
        self.lines.lock().unwrap().push(format!("DEBUG {message}"));
    }

    fn info(&self, message: &str) {
        self.lines.lock().unwrap().push(format!("INFO {message}"));
    }

    fn error(&self, message: &str, cause: &(dyn std::error::Error + 'static)) {
        self.lines
            .lock()
            .unwrap()
            .push(format!("ERROR {message}: {cause}"));
    }
}

fn name_query(name: &str) -> Vec<(String, String)> {
    vec![("name".to_string(), name.to_string())]
}

#[tokio::test]
async fn test_template_lifecycle() {
    let mut graph = MockGraph::new();
    let mut seq = Sequence::new();

    graph
        .expect_post()
        .withf(|path, body| path == "/10987/message_templates" && body["category"] == "UTILITY")
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_, _| Ok(json!({"id": "594425479261596", "status": "PENDING", "category": "UTILITY"})));

    graph
        .expect_get()
        .withf(|path, query| path == "/10987/message_templates" && query.to_vec() == name_query("shipping_update"))
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_, _| {
            Ok(json!({"data": [{"name": "shipping_update", "status": "APPROVED", "language": "en_US"}]}))
        });

    graph
        .expect_post()
        .withf(|path, body| {
            path == "/10987/messages"
                && body["to"] == "447700900123"
                && body["template"]["components"][1]["sub_type"] == "url"
        })
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_, _| {
            Ok(json!({
                "messaging_product": "whatsapp",
                "contacts": [{"input": "447700900123", "wa_id": "447700900123"}],
                "messages": [{"id": "wamid.HBgM", "message_status": "accepted"}]
            }))
        });

    graph
        .expect_delete()
        .withf(|path, query| path == "/10987/message_templates" && query.to_vec() == name_query("shipping_update"))
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_, _| Ok(json!({"success": true})));

    let logger = CollectingLogger::default();
    let service = TemplateService::new(Box::new(graph), "10987", Box::new(logger.clone()));

    let components = [json!({"type": "BODY", "text": "Your parcel {{1}} has shipped"})];
    let created = service
        .create_template("shipping_update", "en_US", TemplateCategory::Utility, &components)
        .await
        .into_result()
        .unwrap();
    assert_eq!(created.template_id, "594425479261596");

    let details = service.get_template_details("shipping_update").await.unwrap();
    assert_eq!(details["status"], "APPROVED");

    let sent = service
        .send_template(
            "447700900123",
            "shipping_update",
            "en_US",
            vec![
                TemplateComponent::body(vec![Parameter::text("PX-1182")]),
                TemplateComponent::url_button(0, "PX-1182"),
            ],
        )
        .await
        .unwrap();
    assert_eq!(sent.message_id.as_deref(), Some("wamid.HBgM"));
    assert_eq!(sent.message_status.as_deref(), Some("accepted"));

    assert!(service.delete_template("shipping_update").await.unwrap());

    let lines = logger.lines.lock().unwrap();
    assert!(lines.iter().all(|line| !line.starts_with("ERROR")));
    assert_eq!(lines.iter().filter(|line| line.starts_with("INFO")).count(), 4);
}

#[tokio::test]
async fn test_errors_keep_their_identity() {
    let mut graph = MockGraph::new();
    graph.expect_get().returning(|_, _| {
        Err(ApiError::new("190", "Error validating access token")
            .with_status(401)
            .into())
    });
    graph.expect_post().never();

    let service = TemplateService::new(Box::new(graph), "10987", Box::new(CollectingLogger::default()));

    let err = service.get_templates(Some(50)).await.unwrap_err();
    assert_eq!(err.code(), "190");
    assert_eq!(err.category(), ErrorCategory::Configuration);

    let err = service
        .send_template("447700900123", "  ", "en_US", vec![])
        .await
        .unwrap_err();
    assert_eq!(err.code(), "invalid_content");
    assert_eq!(err.category(), ErrorCategory::Validation);
}

#[tokio::test]
async fn test_concurrent_calls_share_one_service() {
    let mut graph = MockGraph::new();
    graph
        .expect_get()
        .withf(|path, _| path == "/10987/message_templates")
        .times(8)
        .returning(|_, query| Ok(json!({"data": [{"name": query[0].1.clone()}]})));

    let service = Arc::new(TemplateService::new(
        Box::new(graph),
        "10987",
        Box::new(CollectingLogger::default()),
    ));

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let service = Arc::clone(&service);
            tokio::spawn(async move { service.get_template_details(&format!("t{i}")).await })
        })
        .collect();

    for (i, handle) in handles.into_iter().enumerate() {
        let details = handle.await.unwrap().unwrap();
        assert_eq!(details["name"], format!("t{i}"));
    }
}

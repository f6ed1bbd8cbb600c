#![allow(dead_code)]

use quizgen_service::config::QuizgenConfig;
use quizgen_service::startup::Application;
use serde_json::{json, Value};
use std::net::{IpAddr, Ipv4Addr};
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub struct TestApp {
    pub address: String,
    pub upstream: MockServer,
    pub client: reqwest::Client,
}

impl TestApp {
    /// Spawn the service on a random port, pointed at a fresh fake Groq API.
    pub async fn spawn() -> Self {
        std::env::set_var("ENVIRONMENT", "test");
        std::env::set_var("GROQ_API_KEY", "test-api-key");

        let upstream = MockServer::start().await;

        let mut config = QuizgenConfig::load().expect("Failed to load configuration");
        config.common.host = IpAddr::V4(Ipv4Addr::LOCALHOST);
        config.common.port = 0; // Random port for testing
        config.groq.api_url = format!("{}/openai/v1", upstream.uri());
        config.groq.model = "test-model".to_string();

        let app = Application::build(config)
            .await
            .expect("Failed to build test application");

        let port = app.port();
        tokio::spawn(async move {
            app.run_until_stopped().await.ok();
        });

        // Wait for HTTP server to be ready by polling health endpoint
        let client = reqwest::Client::new();
        let health_url = format!("http://127.0.0.1:{}/health", port);
        for _ in 0..50 {
            if client.get(&health_url).send().await.is_ok() {
                break;
            }
            tokio::time::sleep(Duration::from_millis(20)).await;
        }

        TestApp {
            address: format!("http://127.0.0.1:{}", port),
            upstream,
            client,
        }
    }

    /// Make the fake Groq API answer every completion with `content`.
    pub async fn upstream_replies_with(&self, content: &str) {
        Mock::given(method("POST"))
            .and(path("/openai/v1/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "chatcmpl-test",
                "object": "chat.completion",
                "model": "test-model",
                "choices": [{
                    "index": 0,
                    "message": { "role": "assistant", "content": content },
                    "finish_reason": "stop"
                }],
                "usage": { "prompt_tokens": 200, "completion_tokens": 400, "total_tokens": 600 }
            })))
            .mount(&self.upstream)
            .await;
    }

    /// Make the fake Groq API fail every completion.
    pub async fn upstream_fails_with(&self, status: u16, body: &str) {
        Mock::given(method("POST"))
            .and(path("/openai/v1/chat/completions"))
            .respond_with(ResponseTemplate::new(status).set_body_string(body))
            .mount(&self.upstream)
            .await;
    }

    pub async fn post_json(&self, route: &str, body: &Value) -> reqwest::Response {
        self.client
            .post(format!("{}{}", self.address, route))
            .json(body)
            .timeout(Duration::from_secs(5))
            .send()
            .await
            .expect("Failed to execute request")
    }

    /// Requests the fake Groq API has received so far, as JSON bodies.
    pub async fn upstream_requests(&self) -> Vec<Value> {
        self.upstream
            .received_requests()
            .await
            .unwrap_or_default()
            .iter()
            .map(|r| serde_json::from_slice(&r.body).expect("Upstream body is not JSON"))
            .collect()
    }
}

/// A well-formed question record with option `correct` marked right.
pub fn question_json(label: &str, correct: usize) -> Value {
    let options: Vec<Value> = ["A", "B", "C", "D"]
        .iter()
        .enumerate()
        .map(|(i, text)| json!({ "text": format!("{} {}", label, text), "is_correct": i == correct }))
        .collect();

    json!({
        "question": format!("{}?", label),
        "options": options,
        "explanation": format!("Because {}", label),
    })
}

//! End-to-end chat flow: the app state machine driving a real HTTP round
//! trip against an in-process answer service.

use std::time::Duration;

use helpbot::app::{App, ChatRole};
use helpbot::config::Config;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

fn config_for(port: u16) -> Config {
    let mut cfg = Config::new();
    cfg.endpoint_url = Some(format!("http://127.0.0.1:{}", port));
    cfg
}

/// Accept one connection and answer every request shape with the given body.
fn answer_with(listener: TcpListener, body: &'static str) {
    tokio::spawn(async move {
        let (mut stream, _) = listener.accept().await.unwrap();

        // Drain the request far enough to see the end of the body
        let mut buf = Vec::new();
        loop {
            let mut chunk = [0u8; 1024];
            let n = stream.read(&mut chunk).await.unwrap();
            if n == 0 {
                break;
            }
            buf.extend_from_slice(&chunk[..n]);
            if buf.windows(4).any(|w| w == b"\r\n\r\n") && buf.ends_with(b"}") {
                break;
            }
        }

        let response = format!(
            "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            body.len(),
            body
        );
        stream.write_all(response.as_bytes()).await.unwrap();
        stream.shutdown().await.unwrap();
    });
}

async fn wait_for_answer(app: &mut App) {
    for _ in 0..500 {
        if app.query_finished() {
            app.finish_query().await;
            return;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("query did not finish in time");
}

#[tokio::test]
async fn question_and_answer_land_in_order() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    answer_with(listener, r#"{"answer":"MOSDAC is a satellite data portal."}"#);

    let mut app = App::new(&config_for(port));
    app.query_input = "What is MOSDAC?".to_string();
    app.submit_query();

    assert!(app.query_loading);
    wait_for_answer(&mut app).await;

    // Greeting, question, answer, in that order
    assert_eq!(app.chat_messages.len(), 3);
    assert_eq!(app.chat_messages[0].role, ChatRole::Assistant);
    assert_eq!(app.chat_messages[1].role, ChatRole::User);
    assert_eq!(app.chat_messages[1].content, "What is MOSDAC?");
    assert_eq!(app.chat_messages[2].role, ChatRole::Assistant);
    assert_eq!(app.chat_messages[2].content, "MOSDAC is a satellite data portal.");
    assert!(!app.query_loading);
}

#[tokio::test]
async fn unreachable_backend_appends_the_fallback() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);

    let mut app = App::new(&config_for(port));
    app.query_input = "anyone there?".to_string();
    app.submit_query();

    wait_for_answer(&mut app).await;

    assert_eq!(app.chat_messages.len(), 3);
    assert_eq!(app.chat_messages[2].role, ChatRole::Assistant);
    assert_eq!(app.chat_messages[2].content, app.fallback_message);
    assert!(!app.query_loading);

    // The input stays usable for a retry
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let retry_port = listener.local_addr().unwrap().port();
    answer_with(listener, r#"{"answer":"Back online."}"#);

    let mut retry_app = App::new(&config_for(retry_port));
    retry_app.query_input = "anyone there?".to_string();
    retry_app.submit_query();
    wait_for_answer(&mut retry_app).await;
    assert_eq!(retry_app.chat_messages[2].content, "Back online.");
}

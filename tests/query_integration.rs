//! Integration tests for the answer-service client: one-shot POST /query
//! against a minimal in-process HTTP server (no mocks).

use helpbot::AnswerClient;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

fn find_subsequence(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}

/// Read one HTTP request: headers plus a Content-Length body.
async fn read_request(stream: &mut TcpStream) -> String {
    let mut buf = Vec::new();
    loop {
        let mut chunk = [0u8; 1024];
        let n = stream.read(&mut chunk).await.unwrap();
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);

        if let Some(headers_end) = find_subsequence(&buf, b"\r\n\r\n") {
            let headers = String::from_utf8_lossy(&buf[..headers_end]).to_string();
            let content_length = headers
                .lines()
                .find_map(|line| {
                    let (name, value) = line.split_once(':')?;
                    if name.eq_ignore_ascii_case("content-length") {
                        value.trim().parse::<usize>().ok()
                    } else {
                        None
                    }
                })
                .unwrap_or(0);
            if buf.len() >= headers_end + 4 + content_length {
                break;
            }
        }
    }
    String::from_utf8_lossy(&buf).to_string()
}

/// Accept one connection, answer it with the given status line and body,
/// and hand back the raw request for assertions.
fn serve_once(
    listener: TcpListener,
    status_line: &'static str,
    body: &'static str,
) -> tokio::task::JoinHandle<String> {
    tokio::spawn(async move {
        let (mut stream, _) = listener.accept().await.unwrap();
        let request = read_request(&mut stream).await;
        let response = format!(
            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status_line,
            body.len(),
            body
        );
        stream.write_all(response.as_bytes()).await.unwrap();
        stream.shutdown().await.unwrap();
        request
    })
}

#[tokio::test]
async fn ask_posts_query_and_returns_answer() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    let server = serve_once(listener, "200 OK", r#"{"answer":"MOSDAC is a satellite data portal."}"#);

    let client = AnswerClient::new(&format!("http://127.0.0.1:{}", port));
    let answer = client.ask("What is MOSDAC?").await.expect("ask should succeed");
    assert_eq!(answer, "MOSDAC is a satellite data portal.");

    let request = server.await.unwrap();
    assert!(request.starts_with("POST /query HTTP/1.1"));
    assert!(request.contains(r#"{"query":"What is MOSDAC?"}"#));
}

#[tokio::test]
async fn ask_rejects_server_errors() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    let server = serve_once(
        listener,
        "500 Internal Server Error",
        r#"{"detail":"index unavailable"}"#,
    );

    let client = AnswerClient::new(&format!("http://127.0.0.1:{}", port));
    assert!(client.ask("anything").await.is_err());

    server.await.unwrap();
}

#[tokio::test]
async fn ask_rejects_malformed_bodies() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    let server = serve_once(listener, "200 OK", "this is not json");

    let client = AnswerClient::new(&format!("http://127.0.0.1:{}", port));
    assert!(client.ask("anything").await.is_err());

    server.await.unwrap();
}

#[tokio::test]
async fn ask_rejects_missing_answer_field() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    let server = serve_once(listener, "200 OK", r#"{"result":"wrong shape"}"#);

    let client = AnswerClient::new(&format!("http://127.0.0.1:{}", port));
    assert!(client.ask("anything").await.is_err());

    server.await.unwrap();
}

#[tokio::test]
async fn ask_fails_when_nothing_is_listening() {
    // Grab a free port, then close the listener before the request
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);

    let client = AnswerClient::new(&format!("http://127.0.0.1:{}", port));
    assert!(client.ask("anything").await.is_err());
}

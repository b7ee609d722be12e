use anyhow::Result;
use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::process::Command;
use std::sync::{Arc, Mutex};
use std::thread;

use super::common::TestEnvironment;

pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
    pub exit_code: i32,
}

const SESSION_VARS: [&str; 5] = [
    "DISPLAY",
    "WAYLAND_DISPLAY",
    "XDG_CURRENT_DESKTOP",
    "XDG_SESSION_DESKTOP",
    "DESKTOP_SESSION",
];

const PROXY_VARS: [&str; 8] = [
    "http_proxy",
    "HTTP_PROXY",
    "https_proxy",
    "HTTPS_PROXY",
    "all_proxy",
    "ALL_PROXY",
    "no_proxy",
    "NO_PROXY",
];

/// Run the built binary with HOME and config redirected into the test environment
pub fn run_bingwall(env: &TestEnvironment, args: &[&str]) -> Result<CommandOutput> {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_bingwall"));
    for var in SESSION_VARS.iter().chain(PROXY_VARS.iter()) {
        cmd.env_remove(var);
    }
    cmd.env("HOME", env.home())
        .env("XDG_CONFIG_HOME", env.config_home())
        .arg("--no-color")
        .args(args)
        .current_dir(env.path());

    let output = cmd.output()?;

    Ok(CommandOutput {
        stdout: String::from_utf8_lossy(&output.stdout).to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        exit_code: output.status.code().unwrap_or(-1),
    })
}

pub const IMAGE_URI: &str = "/th?id=OHR.TestLake_ZH-CN0000000000_1920x1080.jpg&pid=hp";
pub const IMAGE_TITLE: &str = "Test Lake";

/// Fake image bytes served for `IMAGE_URI`
pub fn image_bytes() -> Vec<u8> {
    let mut bytes = vec![0xFF, 0xD8, 0xFF, 0xE0];
    bytes.extend((0..=255u8).cycle().take(2048));
    bytes.extend([0xFF, 0xD9]);
    bytes
}

fn metadata_body() -> String {
    format!(
        r#"{{"images":[{{"startdate":"20261019","url":"{}","copyright":"A lake","title":"{}"}}]}}"#,
        IMAGE_URI.replace('&', "\\u0026"),
        IMAGE_TITLE
    )
}

/// Minimal HTTP server standing in for the image service.
///
/// Serves metadata on `/HPImageArchive.aspx` and the image on `/th`; every
/// request target is recorded.
pub struct TestServer {
    pub base_url: String,
    requests: Arc<Mutex<Vec<String>>>,
}

impl TestServer {
    pub fn start() -> Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0")?;
        let base_url = format!("http://{}/", listener.local_addr()?);
        let requests = Arc::new(Mutex::new(Vec::new()));

        let seen = Arc::clone(&requests);
        thread::spawn(move || {
            for stream in listener.incoming().flatten() {
                let _ = handle(stream, &seen);
            }
        });

        Ok(Self { base_url, requests })
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }

    pub fn image_requests(&self) -> usize {
        self.requests()
            .iter()
            .filter(|r| r.starts_with("/th"))
            .count()
    }
}

fn handle(mut stream: TcpStream, seen: &Mutex<Vec<String>>) -> std::io::Result<()> {
    let mut head = Vec::new();
    let mut buf = [0u8; 1024];
    while !head.windows(4).any(|w| w == b"\r\n\r\n") {
        let n = stream.read(&mut buf)?;
        if n == 0 {
            break;
        }
        head.extend_from_slice(&buf[..n]);
    }

    let head = String::from_utf8_lossy(&head);
    let target = head
        .lines()
        .next()
        .and_then(|line| line.split_whitespace().nth(1))
        .unwrap_or("/")
        .to_string();
    seen.lock().unwrap().push(target.clone());

    let (status, content_type, body) = if target.starts_with("/HPImageArchive.aspx") {
        ("200 OK", "application/json", metadata_body().into_bytes())
    } else if target.starts_with("/th") {
        ("200 OK", "image/jpeg", image_bytes())
    } else {
        ("404 Not Found", "text/plain", b"not found".to_vec())
    };

    write!(
        stream,
        "HTTP/1.1 {status}\r\nContent-Type: {content_type}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
        body.len()
    )?;
    stream.write_all(&body)?;
    stream.flush()
}

/// A loopback address nothing listens on
pub fn closed_base_url() -> Result<String> {
    let listener = TcpListener::bind("127.0.0.1:0")?;
    let addr = listener.local_addr()?;
    drop(listener);
    Ok(format!("http://{addr}/"))
}

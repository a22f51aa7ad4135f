#![cfg(feature = "api")]

use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::process::{Child, Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use serde_json::Value;

struct ChildGuard {
    child: Child,
}

impl Drop for ChildGuard {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

#[test]
fn served_profiles_and_table_match_generation() {
    let port = allocate_port();
    let _child = spawn_api_process(port);
    let addr = format!("127.0.0.1:{port}");

    wait_for_server(&addr, Duration::from_secs(8));

    let (status, body) = http_get(&addr, "/profiles").expect("/profiles request should succeed");
    assert_eq!(status, 200);
    let profiles: Value = serde_json::from_str(&body).expect("profiles body should be JSON");
    let profiles = profiles.as_array().expect("profiles should be an array");
    assert_eq!(profiles.len(), 4);
    for p in profiles {
        for key in ["name", "mode", "min_kw", "mean_kw", "max_kw", "energy_kwh"] {
            assert!(p.get(key).is_some(), "missing key: {key}");
        }
    }

    let (status, body) = http_get(&addr, "/table?profile=Solar%20Power&from=10&to=15")
        .expect("/table request should succeed");
    assert_eq!(status, 200);
    let rows: Value = serde_json::from_str(&body).expect("table body should be JSON");
    let rows = rows.as_array().expect("table should be an array");
    assert_eq!(rows.len(), 6);
    assert_eq!(rows[0]["hour"].as_u64(), Some(10));
    assert_eq!(rows[5]["hour"].as_u64(), Some(15));

    let (status, _) = http_get(&addr, "/profiles/Nope").expect("request should succeed");
    assert_eq!(status, 404);
}

fn allocate_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").expect("ephemeral port bind should succeed");
    let port = listener
        .local_addr()
        .expect("local_addr should be available")
        .port();
    drop(listener);
    port
}

fn spawn_api_process(port: u16) -> ChildGuard {
    let child = Command::new(env!("CARGO_BIN_EXE_power-schedule"))
        .args(["--serve", "--port", &port.to_string()])
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .expect("power-schedule process should spawn");

    ChildGuard { child }
}

fn wait_for_server(addr: &str, timeout: Duration) {
    let start = Instant::now();
    loop {
        if let Ok((200, _)) = http_get(addr, "/profiles") {
            return;
        }

        if start.elapsed() >= timeout {
            panic!("timed out waiting for API server on {addr}");
        }

        thread::sleep(Duration::from_millis(50));
    }
}

fn http_get(addr: &str, path: &str) -> Result<(u16, String), String> {
    let mut stream = TcpStream::connect(addr).map_err(|err| format!("connect: {err}"))?;
    let request = format!("GET {path} HTTP/1.1\r\nHost: {addr}\r\nConnection: close\r\n\r\n");
    stream
        .write_all(request.as_bytes())
        .map_err(|err| format!("write: {err}"))?;

    let mut raw = String::new();
    stream
        .read_to_string(&mut raw)
        .map_err(|err| format!("read: {err}"))?;

    let (head, body) = raw
        .split_once("\r\n\r\n")
        .ok_or_else(|| "invalid HTTP response".to_string())?;
    let status_code = head
        .lines()
        .next()
        .and_then(|line| line.split_whitespace().nth(1))
        .ok_or_else(|| "missing status code".to_string())?
        .parse::<u16>()
        .map_err(|err| format!("invalid status code: {err}"))?;

    Ok((status_code, body.to_string()))
}

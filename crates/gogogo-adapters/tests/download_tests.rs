//! Download step against a local mock server.
//!
//! The step uses the blocking reqwest client, so it runs on a blocking
//! thread while wiremock serves from the async runtime.

use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use gogogo_adapters::platform::Platform;
use gogogo_adapters::steps::BROWSER_USER_AGENT;
use gogogo_adapters::{DownloadStep, MemoryFilesystem};
use gogogo_core::application::{
    StepError,
    ports::{Filesystem, Step},
};
use gogogo_core::domain::{ModulePrefix, ProjectContext};
use tempfile::TempDir;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

const LINUX_X64: Platform = Platform::new("linux", "x86_64");
const ASSET_PATH: &str = "/tailwindcss-linux-x64";

async fn run_step(step: DownloadStep, workdir: PathBuf) -> Result<(), StepError> {
    tokio::task::spawn_blocking(move || {
        let ctx = ProjectContext::build("demo", &ModulePrefix::default());
        step.run(&workdir, &ctx)
    })
    .await
    .unwrap()
}

#[tokio::test(flavor = "multi_thread")]
async fn success_writes_executable_binary() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(ASSET_PATH))
        .and(header("accept", "application/octet-stream"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"#!/bin/sh\necho tw\n".to_vec()))
        .expect(1)
        .mount(&server)
        .await;

    let tmp = TempDir::new().unwrap();
    let step = DownloadStep::tailwind_from(&server.uri(), LINUX_X64);

    run_step(step, tmp.path().to_path_buf()).await.unwrap();

    let binary = tmp.path().join("bin/tailwindcss");
    assert_eq!(std::fs::read(&binary).unwrap(), b"#!/bin/sh\necho tw\n");

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mode = std::fs::metadata(&binary).unwrap().permissions().mode();
        assert_eq!(mode & 0o111, 0o111);
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn browser_user_agent_is_sent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(ASSET_PATH))
        .and(|req: &Request| {
            req.headers
                .get("user-agent")
                .and_then(|v| v.to_str().ok())
                == Some(BROWSER_USER_AGENT)
        })
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"bin".to_vec()))
        .expect(1)
        .mount(&server)
        .await;

    let tmp = TempDir::new().unwrap();
    let step = DownloadStep::tailwind_from(&server.uri(), LINUX_X64);

    run_step(step, tmp.path().to_path_buf()).await.unwrap();
}

#[tokio::test(flavor = "multi_thread")]
async fn non_success_status_reports_code_and_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(ASSET_PATH))
        .respond_with(ResponseTemplate::new(404).set_body_string("Not Found"))
        .mount(&server)
        .await;

    let tmp = TempDir::new().unwrap();
    let step = DownloadStep::tailwind_from(&server.uri(), LINUX_X64);

    let err = run_step(step, tmp.path().to_path_buf()).await.unwrap_err();

    match err {
        StepError::HttpStatus { code, body, .. } => {
            assert_eq!(code, 404);
            assert_eq!(body, "Not Found");
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(!tmp.path().join("bin/tailwindcss").exists());
}

#[tokio::test(flavor = "multi_thread")]
async fn redirects_are_followed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(ASSET_PATH))
        .respond_with(
            ResponseTemplate::new(302)
                .insert_header("location", format!("{}/real-asset", server.uri()).as_str()),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/real-asset"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"redirected".to_vec()))
        .mount(&server)
        .await;

    let tmp = TempDir::new().unwrap();
    let step = DownloadStep::tailwind_from(&server.uri(), LINUX_X64);

    run_step(step, tmp.path().to_path_buf()).await.unwrap();

    assert_eq!(
        std::fs::read(tmp.path().join("bin/tailwindcss")).unwrap(),
        b"redirected"
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn unreachable_server_is_a_network_error() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let uri = format!("http://{}", listener.local_addr().unwrap());
    drop(listener);

    let tmp = TempDir::new().unwrap();
    let step = DownloadStep::tailwind_from(&uri, LINUX_X64);

    let err = run_step(step, tmp.path().to_path_buf()).await.unwrap_err();

    assert!(matches!(err, StepError::Network { .. }), "{err:?}");
    assert!(!tmp.path().join("bin/tailwindcss").exists());
}

#[tokio::test(flavor = "multi_thread")]
async fn unwritable_destination_is_an_io_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(ASSET_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"bin".to_vec()))
        .mount(&server)
        .await;

    let tmp = TempDir::new().unwrap();
    // A plain file where the bin/ directory should go.
    std::fs::write(tmp.path().join("bin"), "not a directory").unwrap();
    let step = DownloadStep::tailwind_from(&server.uri(), LINUX_X64);

    let err = run_step(step, tmp.path().to_path_buf()).await.unwrap_err();

    assert!(matches!(err, StepError::Io { .. }), "{err:?}");
}

/// Serves one canned response on a raw socket, then hangs up.
fn serve_once(response: &'static [u8]) -> (String, std::thread::JoinHandle<()>) {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let uri = format!("http://{}", listener.local_addr().unwrap());
    let handle = std::thread::spawn(move || {
        let (mut stream, _) = listener.accept().unwrap();
        let mut request = [0u8; 4096];
        let _ = stream.read(&mut request);
        stream.write_all(response).unwrap();
    });
    (uri, handle)
}

#[tokio::test(flavor = "multi_thread")]
async fn truncated_body_is_a_network_error() {
    let (uri, server) = serve_once(
        b"HTTP/1.1 200 OK\r\nContent-Length: 1000\r\nConnection: close\r\n\r\nabcde",
    );

    let tmp = TempDir::new().unwrap();
    let step = DownloadStep::tailwind_from(&uri, LINUX_X64);

    let err = run_step(step, tmp.path().to_path_buf()).await.unwrap_err();
    server.join().unwrap();

    assert!(matches!(err, StepError::Network { .. }), "{err:?}");
    assert_eq!(
        gogogo_core::error::GogogoError::from(err).category(),
        gogogo_core::error::ErrorCategory::Network
    );
    assert!(!tmp.path().join("bin/tailwindcss").exists());
}

#[tokio::test(flavor = "multi_thread")]
async fn unreadable_error_body_still_reports_status() {
    let (uri, server) = serve_once(
        b"HTTP/1.1 503 Service Unavailable\r\nContent-Length: 100\r\nConnection: close\r\n\r\nbusy",
    );

    let tmp = TempDir::new().unwrap();
    let step = DownloadStep::tailwind_from(&uri, LINUX_X64);

    let err = run_step(step, tmp.path().to_path_buf()).await.unwrap_err();
    server.join().unwrap();

    match err {
        StepError::HttpStatus { code, body, .. } => {
            assert_eq!(code, 503);
            assert!(body.is_empty());
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn writes_through_the_injected_filesystem() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(ASSET_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"tw".to_vec()))
        .mount(&server)
        .await;

    let fs = MemoryFilesystem::new();
    let step = DownloadStep::tailwind_from(&server.uri(), LINUX_X64)
        .with_filesystem(Arc::new(fs.clone()));

    run_step(step, PathBuf::from("/project")).await.unwrap();

    let binary = Path::new("/project/bin/tailwindcss");
    assert_eq!(fs.read_file(binary).unwrap(), b"tw");
    assert!(fs.is_executable(binary));
    assert!(!Path::new("/project").exists());
}

/// Memory filesystem that refuses to set the executable bit.
struct NoExecBit(MemoryFilesystem);

impl Filesystem for NoExecBit {
    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        self.0.create_dir_all(path)
    }

    fn write_file(&self, path: &Path, content: &[u8]) -> io::Result<()> {
        self.0.write_file(path, content)
    }

    fn create_file(&self, path: &Path) -> io::Result<Box<dyn Write + Send>> {
        self.0.create_file(path)
    }

    fn set_executable(&self, _path: &Path) -> io::Result<()> {
        Err(io::Error::new(io::ErrorKind::PermissionDenied, "chmod refused"))
    }

    fn exists(&self, path: &Path) -> bool {
        self.0.exists(path)
    }

    fn remove_file(&self, path: &Path) -> io::Result<()> {
        self.0.remove_file(path)
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn chmod_failure_removes_the_binary() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(ASSET_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"tw".to_vec()))
        .mount(&server)
        .await;

    let fs = MemoryFilesystem::new();
    let step = DownloadStep::tailwind_from(&server.uri(), LINUX_X64)
        .with_filesystem(Arc::new(NoExecBit(fs.clone())));

    let err = run_step(step, PathBuf::from("/project")).await.unwrap_err();

    match err {
        StepError::Io { path, source, .. } => {
            assert_eq!(path, Path::new("/project/bin/tailwindcss"));
            assert_eq!(source.kind(), io::ErrorKind::PermissionDenied);
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(fs.list_files().is_empty());
}

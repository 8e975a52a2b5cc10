use page_fetch::config::FetcherConfig;
use page_fetch::crawler::{run_batch, Action, Coordinator};
use page_fetch::{FileStore, OutputMsg};
use std::path::{Path, PathBuf};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Runs one batch against a file store rooted at `dir` and collects every message
pub async fn run(
    dir: &Path,
    config: &FetcherConfig,
    action: Action,
    urls: Vec<String>,
) -> Vec<OutputMsg> {
    let (coordinator, mut rx) =
        Coordinator::new(config, FileStore::new(dir)).expect("Failed to create coordinator");
    let batch = run_batch(coordinator, action, urls);

    let mut messages = Vec::new();
    while let Some(msg) = rx.recv().await {
        messages.push(msg);
    }
    batch.await.expect("Batch task panicked");
    messages
}

/// Runs a fetch batch with the default timeouts
pub async fn fetch(dir: &Path, urls: Vec<String>) -> Vec<OutputMsg> {
    run(dir, &FetcherConfig::default(), Action::Fetch, urls).await
}

/// Runs a metadata batch with the default timeouts
pub async fn load(dir: &Path, urls: Vec<String>) -> Vec<OutputMsg> {
    run(dir, &FetcherConfig::default(), Action::LoadMetadata, urls).await
}

/// Serves `body` as HTML at `route`
pub async fn mount_page(server: &MockServer, route: &str, body: &str) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(body)
                .insert_header("content-type", "text/html"),
        )
        .mount(server)
        .await;
}

/// Sorted names of the files in `dir`
pub fn file_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .expect("Failed to read directory")
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

pub fn store_paths(dir: &Path, url: &str) -> (PathBuf, PathBuf) {
    let store = FileStore::new(dir);
    (store.body_path(url), store.metadata_path(url))
}

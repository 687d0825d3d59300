//! Shared helpers for the integration tests.

use std::sync::Arc;
use std::time::Duration;

use forky_client::{ChatController, ClientConfig, CommonMarkRenderer, HttpChatBackend, Transcript};

pub const FORM_PAGE: &str = r#"<form id="ingestForm">
  <input id="input_text" name="input_text">
  <input type="range" id="file_size" name="max_file_size" min="0" max="500" value="250">
</form>
<span id="github-stars">812</span>"#;

pub const RESULT_PAGE: &str = r#"<span id="github-stars"></span>
<input type="range" id="file_size" name="max_file_size" min="0" max="500" value="250">
<section data-results>
  <input type="hidden" id="directory-structure-content" value="foo-bar/">
  <textarea class="result-text" readonly>README.md</textarea>
</section>"#;

pub fn config(server: &mockito::Server) -> ClientConfig {
    ClientConfig::new(server.url()).with_chat_timeout(Duration::from_secs(30))
}

pub fn chat(
    server: &mockito::Server,
) -> (ChatController<HttpChatBackend>, Arc<Transcript>) {
    let config = config(server);
    let transcript = Arc::new(Transcript::new());
    let controller = ChatController::new(
        Arc::new(HttpChatBackend::new(&config).unwrap()),
        transcript.clone(),
        Arc::new(CommonMarkRenderer),
        config.chat_timeout,
    );
    (controller, transcript)
}

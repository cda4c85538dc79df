//! Test context for unified test setup
//!
//! Builds an `AppContext` pointed at a fresh mock API server, with the
//! session persisted to a file in a temporary directory and a frozen clock.

use std::path::PathBuf;
use std::sync::{Arc, Once};
use tempfile::TempDir;

use eventr::models::Role;
use eventr::{AppContext, FixedClock, Session, SessionStore, Settings};

use super::api_mock::ApiMockServer;
use super::test_data::{test_now, test_user, TEST_TOKEN};

static INIT: Once = Once::new();

/// Initialize test logging once per test binary
pub fn init_test_env() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter("eventr=debug")
            .with_test_writer()
            .try_init();
    });
}

pub struct TestContext {
    pub api: ApiMockServer,
    pub ctx: AppContext,
    pub temp_dir: TempDir,
}

impl TestContext {
    pub async fn new() -> Self {
        init_test_env();

        let api = ApiMockServer::new().await;
        let temp_dir = tempfile::tempdir().expect("create temp dir");

        let mut settings = Settings::default();
        settings.api.base_url = api.base_url.clone();
        settings.api.timeout_seconds = 5;
        settings.session.file_path = temp_dir
            .path()
            .join("session.json")
            .to_string_lossy()
            .into_owned();

        let ctx = build_context(settings);
        Self { api, ctx, temp_dir }
    }

    pub fn session_path(&self) -> PathBuf {
        PathBuf::from(&self.ctx.settings.session.file_path)
    }

    /// Store a session as if the user had logged in
    pub fn sign_in(&self, role: Role) -> Session {
        let session = Session::new(TEST_TOKEN, test_user(role));
        self.ctx.session_store.write(&session).expect("write session");
        session
    }

    /// A second client process sharing the same session file
    pub fn reopen(&self) -> AppContext {
        build_context(self.ctx.settings.clone())
    }
}

fn build_context(settings: Settings) -> AppContext {
    let store = SessionStore::file(&settings.session.file_path);
    AppContext::with_parts(settings, store, Arc::new(FixedClock(test_now()))).expect("build app context")
}

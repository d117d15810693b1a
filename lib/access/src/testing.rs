//! In-memory collaborators shared by the crate's tests.

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use crate::config::GateConfig;
use crate::gate::AccessGate;
use crate::provider::{
    ButtonOptions, CredentialCallback, IdentityProvider, ProviderError, ProviderSettings,
};
use crate::surface::{Banner, UiSurface};

/// Builds an unsigned compact token around a JSON payload.
pub(crate) fn token(payload_json: &str) -> String {
    format!(
        "{}.{}.c2lnbmF0dXJl",
        URL_SAFE_NO_PAD.encode(r#"{"alg":"RS256","typ":"JWT"}"#),
        URL_SAFE_NO_PAD.encode(payload_json)
    )
}

/// Token for the `a@acme.com` user.
pub(crate) fn acme_token() -> String {
    token(r#"{"sub":"123","email":"a@acme.com","name":"A","email_verified":true}"#)
}

pub(crate) fn config(allowed: &[&str]) -> GateConfig {
    GateConfig::builder("client-id".to_string())
        .allowed_domains(allowed.iter().map(|d| (*d).to_string()).collect())
        .build()
}

pub(crate) fn gate(config: GateConfig) -> AccessGate<FakeProvider, RecordingSurface> {
    AccessGate::new(config, FakeProvider::new(), RecordingSurface::default())
}

#[derive(Default)]
struct FakeInner {
    load_error: Mutex<Option<ProviderError>>,
    missing_targets: Mutex<Vec<String>>,
    queued: Mutex<Vec<String>>,
    close_after_queue: AtomicBool,
    callback: Mutex<Option<CredentialCallback>>,
    settings: Mutex<Option<ProviderSettings>>,
    initialize_calls: AtomicUsize,
    prompts: AtomicUsize,
    auto_select_disabled: AtomicUsize,
    rendered: Mutex<Vec<(String, ButtonOptions)>>,
}

/// Identity provider that records calls and delivers scripted credentials.
///
/// Clones share state, so a test can keep a handle after moving the
/// provider into a gate.
#[derive(Clone, Default)]
pub(crate) struct FakeProvider {
    inner: Arc<FakeInner>,
}

impl FakeProvider {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn failing(reason: &str) -> Self {
        let provider = Self::new();
        let error = ProviderError::LoadFailed {
            reason: reason.to_string(),
        };
        *provider.inner.load_error.lock().unwrap() = Some(error);
        provider
    }

    /// Delivers `tokens` during initialization, then closes the callback.
    pub(crate) fn replaying(tokens: Vec<String>) -> Self {
        let provider = Self::new();
        *provider.inner.queued.lock().unwrap() = tokens;
        provider.inner.close_after_queue.store(true, Ordering::SeqCst);
        provider
    }

    pub(crate) fn without_target(self, target: &str) -> Self {
        self.inner
            .missing_targets
            .lock()
            .unwrap()
            .push(target.to_string());
        self
    }

    pub(crate) fn sign_in(&self, token: &str) -> bool {
        self.inner
            .callback
            .lock()
            .unwrap()
            .as_ref()
            .is_some_and(|callback| callback.deliver(token))
    }

    pub(crate) fn close(&self) {
        self.inner.callback.lock().unwrap().take();
    }

    pub(crate) fn settings(&self) -> Option<ProviderSettings> {
        self.inner.settings.lock().unwrap().clone()
    }

    pub(crate) fn initialize_calls(&self) -> usize {
        self.inner.initialize_calls.load(Ordering::SeqCst)
    }

    pub(crate) fn prompts(&self) -> usize {
        self.inner.prompts.load(Ordering::SeqCst)
    }

    pub(crate) fn auto_select_disabled(&self) -> usize {
        self.inner.auto_select_disabled.load(Ordering::SeqCst)
    }

    pub(crate) fn rendered(&self) -> Vec<(String, ButtonOptions)> {
        self.inner.rendered.lock().unwrap().clone()
    }
}

#[async_trait]
impl IdentityProvider for FakeProvider {
    async fn initialize(
        &self,
        settings: &ProviderSettings,
        callback: CredentialCallback,
    ) -> Result<(), ProviderError> {
        self.inner.initialize_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(error) = self.inner.load_error.lock().unwrap().clone() {
            return Err(error);
        }
        *self.inner.settings.lock().unwrap() = Some(settings.clone());

        for token in self.inner.queued.lock().unwrap().drain(..) {
            callback.deliver(token);
        }
        if !self.inner.close_after_queue.load(Ordering::SeqCst) {
            *self.inner.callback.lock().unwrap() = Some(callback);
        }
        Ok(())
    }

    fn prompt(&self) {
        self.inner.prompts.fetch_add(1, Ordering::SeqCst);
    }

    fn render_button(&self, target: &str, options: &ButtonOptions) -> Result<(), ProviderError> {
        let missing = self.inner.missing_targets.lock().unwrap();
        if missing.iter().any(|t| t == target) {
            return Err(ProviderError::TargetNotFound {
                target: target.to_string(),
            });
        }
        drop(missing);
        let mut rendered = self.inner.rendered.lock().unwrap();
        rendered.push((target.to_string(), *options));
        Ok(())
    }

    fn disable_auto_select(&self) {
        self.inner.auto_select_disabled.fetch_add(1, Ordering::SeqCst);
    }
}

/// UI surface that tracks visibility and flags overlapping surfaces.
#[derive(Debug, Default)]
pub(crate) struct RecordingSurface {
    pub(crate) gated_visible: bool,
    pub(crate) auth_visible: bool,
    pub(crate) ever_both_visible: bool,
    pub(crate) banner: Option<String>,
    pub(crate) banners_shown: usize,
    pub(crate) display_name: Option<String>,
}

impl RecordingSurface {
    fn check_overlap(&mut self) {
        if self.gated_visible && self.auth_visible {
            self.ever_both_visible = true;
        }
    }
}

impl UiSurface for RecordingSurface {
    fn show_gated_ui(&mut self) {
        self.gated_visible = true;
        self.check_overlap();
    }

    fn hide_gated_ui(&mut self) {
        self.gated_visible = false;
    }

    fn show_auth_ui(&mut self) {
        self.auth_visible = true;
        self.check_overlap();
    }

    fn hide_auth_ui(&mut self) {
        self.auth_visible = false;
    }

    fn show_banner(&mut self, banner: &Banner) {
        self.banner = Some(banner.message().to_string());
        self.banners_shown += 1;
    }

    fn hide_banner(&mut self) {
        self.banner = None;
    }

    fn set_display_name(&mut self, name: &str) {
        self.display_name = Some(name.to_string());
    }
}

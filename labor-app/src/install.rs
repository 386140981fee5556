//! Deferred install prompt handling.
//!
//! The host offers a prompt once the app becomes installable. Showing it
//! consumes it; only an accepted outcome marks the app installed.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InstallOutcome {
    Accepted,
    Dismissed,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum InstallError {
    #[error("install prompt failed: {0}")]
    PromptFailed(String),
}

/// A prompt the host handed over for later use.
#[async_trait]
pub trait DeferredInstallPrompt: Send + Sync {
    async fn prompt(&self) -> Result<InstallOutcome, InstallError>;
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum InstallState {
    #[default]
    NotInstallable,
    Installable,
    Installed,
}

impl InstallState {
    /// Banner heading and body for the state.
    pub fn banner(&self) -> (&'static str, &'static str) {
        match self {
            Self::NotInstallable => ("앱으로 설치하기", "브라우저 메뉴에서 홈 화면에 추가할 수 있어요"),
            Self::Installable => ("앱으로 설치하기", "홈 화면에 추가해서 더 빠르게 이용하세요!"),
            Self::Installed => ("앱 설치 완료!", "AI노무사가 홈 화면에 추가되었습니다."),
        }
    }
}

#[derive(Default)]
pub struct InstallFlow {
    state: InstallState,
    deferred: Option<Box<dyn DeferredInstallPrompt>>,
}

impl InstallFlow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> InstallState {
        self.state
    }

    /// Whether a prompt is waiting to be shown.
    pub fn has_prompt(&self) -> bool {
        self.deferred.is_some()
    }

    /// The host offered a prompt. Ignored once installed.
    pub fn mark_installable(
        &mut self,
        prompt: Box<dyn DeferredInstallPrompt>,
    ) {
        if self.state == InstallState::Installed {
            debug!("install prompt offered after install; ignoring");
            return;
        }
        self.state = InstallState::Installable;
        self.deferred = Some(prompt);
    }

    /// The host reported the app as installed by other means.
    pub fn mark_installed(&mut self) {
        self.state = InstallState::Installed;
        self.deferred = None;
    }

    /// Shows the deferred prompt, if any, and consumes it.
    ///
    /// Returns `Ok(None)` when there is no prompt to show. A dismissed or
    /// failed prompt leaves the flow installable.
    ///
    /// # Errors
    ///
    /// Returns the prompt's error; the flow state is unchanged.
    pub async fn request_install(&mut self) -> Result<Option<InstallOutcome>, InstallError> {
        let Some(prompt) = self.deferred.take() else {
            debug!("no deferred install prompt");
            return Ok(None);
        };

        let outcome = prompt
            .prompt()
            .await
            .inspect_err(|e| warn!(error = %e, "install prompt failed"))?;

        match outcome {
            InstallOutcome::Accepted => {
                self.state = InstallState::Installed;
                info!("app installed");
            }
            InstallOutcome::Dismissed => info!("install prompt dismissed"),
        }
        Ok(Some(outcome))
    }
}

/// Prompt that answers with a fixed result, for the command line.
#[derive(Debug, Clone)]
pub struct ScriptedPrompt(pub Result<InstallOutcome, InstallError>);

#[async_trait]
impl DeferredInstallPrompt for ScriptedPrompt {
    async fn prompt(&self) -> Result<InstallOutcome, InstallError> {
        self.0.clone()
    }
}

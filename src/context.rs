//! Composition root.
//!
//! Wires the concrete adapters to the orchestrator. The embedding
//! platform layer supplies the surfaces only it can provide (the
//! renderer, the consent prompt, the permission dialog and push
//! registration) plus the device identity; everything else is
//! constructed here from the loaded settings.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{anyhow, Result};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::info;

use ob_app::{OnboardingOrchestrator, OrchestratorPorts};
use ob_core::ports::{MessagingPort, PermissionPort, PromptPort, RendererPort};
use ob_core::{AppConfig, DeviceMetadata, OnboardingEvent};
use ob_infra::{FileFlagStore, SystemClock, TokioDelay};
use ob_net::{
    HttpConfigClient, HttpInstallDataClient, HttpInteractionClient, HttpProfileClient,
};

use crate::settings::get_config_dir;

const EVENT_QUEUE_CAPACITY: usize = 64;

/// Assembled application context.
///
/// `events` is the only way in: platform callbacks translate their
/// signals into [`OnboardingEvent`]s and send them here.
pub struct AppContext {
    pub events: mpsc::Sender<OnboardingEvent>,
    orchestrator: Arc<OnboardingOrchestrator>,
    intake: Option<mpsc::Receiver<OnboardingEvent>>,
}

impl AppContext {
    /// Start the event loop. Returns the task handle; abort it to
    /// stop the flow (pending flag writes are already durable, the
    /// flow resumes from them on the next start).
    pub fn spawn(&mut self) -> Result<JoinHandle<()>> {
        let intake = self
            .intake
            .take()
            .ok_or_else(|| anyhow!("Event loop already started"))?;
        info!("starting onboarding event loop");
        Ok(tokio::spawn(self.orchestrator.clone().run(intake)))
    }
}

pub struct AppContextBuilder {
    settings: AppConfig,
    device: DeviceMetadata,
    flags_path: Option<PathBuf>,
    renderer: Option<Arc<dyn RendererPort>>,
    prompt: Option<Arc<dyn PromptPort>>,
    permission: Option<Arc<dyn PermissionPort>>,
    messaging: Option<Arc<dyn MessagingPort>>,
}

impl AppContextBuilder {
    pub fn new(settings: AppConfig, device: DeviceMetadata) -> Self {
        Self {
            settings,
            device,
            flags_path: None,
            renderer: None,
            prompt: None,
            permission: None,
            messaging: None,
        }
    }

    /// Override the flag-store file location (defaults to the config
    /// directory).
    pub fn flags_path(mut self, path: PathBuf) -> Self {
        self.flags_path = Some(path);
        self
    }

    pub fn renderer(mut self, renderer: Arc<dyn RendererPort>) -> Self {
        self.renderer = Some(renderer);
        self
    }

    pub fn prompt(mut self, prompt: Arc<dyn PromptPort>) -> Self {
        self.prompt = Some(prompt);
        self
    }

    pub fn permission(mut self, permission: Arc<dyn PermissionPort>) -> Self {
        self.permission = Some(permission);
        self
    }

    pub fn messaging(mut self, messaging: Arc<dyn MessagingPort>) -> Self {
        self.messaging = Some(messaging);
        self
    }

    pub async fn build(self) -> Result<AppContext> {
        let renderer = self
            .renderer
            .ok_or_else(|| anyhow!("AppContextBuilder: renderer is required"))?;
        let prompt = self
            .prompt
            .ok_or_else(|| anyhow!("AppContextBuilder: prompt is required"))?;
        let permission = self
            .permission
            .ok_or_else(|| anyhow!("AppContextBuilder: permission is required"))?;
        let messaging = self
            .messaging
            .ok_or_else(|| anyhow!("AppContextBuilder: messaging is required"))?;

        let flags_path = match self.flags_path {
            Some(path) => path,
            None => get_config_dir()?.join(ob_infra::flag_store::DEFAULT_FLAGS_FILE),
        };

        let client = reqwest::Client::new();
        let endpoints = &self.settings.endpoints;
        let config_client = Arc::new(HttpConfigClient::new(
            client.clone(),
            endpoints.config_url.clone(),
        ));
        let profile_client = Arc::new(HttpProfileClient::new(
            client.clone(),
            endpoints.profile_url.clone(),
        ));
        let interaction_client = Arc::new(HttpInteractionClient::new(
            client.clone(),
            endpoints.interaction_base_url.clone(),
        ));
        let install_data_client = Arc::new(HttpInstallDataClient::new(
            client,
            endpoints.install_data_base_url.clone(),
            self.device.bundle_id.clone(),
            self.settings.dev_key.clone(),
            self.device.af_id.clone(),
        ));

        let (events, intake) = mpsc::channel(EVENT_QUEUE_CAPACITY);
        let ports = OrchestratorPorts {
            flag_store: Arc::new(FileFlagStore::new(flags_path)),
            clock: Arc::new(SystemClock),
            delay: Arc::new(TokioDelay),
            install_data: install_data_client,
            config_endpoint: config_client,
            profile_endpoint: profile_client,
            interaction_endpoint: interaction_client,
            permission,
            renderer,
            prompt,
            messaging,
        };
        let orchestrator = Arc::new(
            OnboardingOrchestrator::new(
                ports,
                self.device,
                self.settings.timing.clone(),
                events.clone(),
            )
            .await,
        );

        Ok(AppContext {
            events,
            orchestrator,
            intake: Some(intake),
        })
    }
}

pub mod alert;
pub mod audio;
pub mod backend;
pub mod bootstrap;
pub mod config;
pub mod flows;
pub mod ipc;
pub mod nav;
pub mod storage;

use std::sync::Arc;

use alert::AlertCenter;
use audio::AudioSession;
use backend::{HttpIdentity, HttpProfiles, IdentityService, ProfileStore};
use bootstrap::BootstrapResolver;
use config::AppConfig;
use flows::{IntroCarousel, OnboardingFlow, SignInFlow, SignUpFlow};
use ipc::event::EventBroadcaster;
use nav::NavStack;
use storage::Storage;

/// Shared application state passed to every RPC handler and background task.
#[derive(Clone)]
pub struct AppContext {
    pub config: Arc<AppConfig>,
    pub storage: Arc<Storage>,
    pub broadcaster: Arc<EventBroadcaster>,
    pub nav: Arc<NavStack>,
    pub alerts: Arc<AlertCenter>,
    pub audio: Arc<AudioSession>,
    pub intro: Arc<IntroCarousel>,
    /// One-shot launch router; also answers `app.status` phase queries.
    pub bootstrap: Arc<BootstrapResolver>,
    pub sign_in: Arc<SignInFlow>,
    pub sign_up: Arc<SignUpFlow>,
    pub onboarding: Arc<OnboardingFlow>,
    pub started_at: std::time::Instant,
}

impl AppContext {
    /// Wire up the full context against the HTTP backend.
    pub async fn build(config: AppConfig) -> anyhow::Result<Arc<Self>> {
        let identity: Arc<dyn IdentityService> = Arc::new(
            HttpIdentity::new(config.backend.clone())
                .map_err(|e| anyhow::anyhow!("identity client: {e}"))?,
        );
        let profiles: Arc<dyn ProfileStore> = Arc::new(
            HttpProfiles::new(config.backend.clone())
                .map_err(|e| anyhow::anyhow!("profiles client: {e}"))?,
        );
        Self::build_with(config, identity, profiles).await
    }

    /// Wire up the context with caller-supplied backend seams. The
    /// integration tests pass in-memory fakes here.
    pub async fn build_with(
        config: AppConfig,
        identity: Arc<dyn IdentityService>,
        profiles: Arc<dyn ProfileStore>,
    ) -> anyhow::Result<Arc<Self>> {
        let storage = Arc::new(Storage::new(&config.data_dir).await?);
        let broadcaster = Arc::new(EventBroadcaster::new());
        let nav = Arc::new(NavStack::new(broadcaster.clone()));
        let alerts = Arc::new(AlertCenter::new(broadcaster.clone()));
        let audio = Arc::new(AudioSession::new(
            broadcaster.clone(),
            config.audio.background_track.clone(),
            config.audio.click_sound.clone(),
        ));
        let intro = Arc::new(IntroCarousel::new(
            nav.clone(),
            audio.clone(),
            broadcaster.clone(),
            config.typing_interval(),
        ));
        let bootstrap = Arc::new(BootstrapResolver::new(config.splash_duration()));

        let sign_in = Arc::new(SignInFlow::new(
            identity.clone(),
            profiles.clone(),
            storage.clone(),
            nav.clone(),
            alerts.clone(),
            audio.clone(),
        ));
        let sign_up = Arc::new(SignUpFlow::new(
            identity,
            profiles.clone(),
            storage.clone(),
            nav.clone(),
            alerts.clone(),
            audio.clone(),
        ));
        let onboarding = Arc::new(OnboardingFlow::new(
            profiles,
            storage.clone(),
            nav.clone(),
            alerts.clone(),
            audio.clone(),
        ));

        Ok(Arc::new(Self {
            config: Arc::new(config),
            storage,
            broadcaster,
            nav,
            alerts,
            audio,
            intro,
            bootstrap,
            sign_in,
            sign_up,
            onboarding,
            started_at: std::time::Instant::now(),
        }))
    }

    /// Kick off the splash/bootstrap sequence in the background.
    pub fn spawn_launch_sequence(self: &Arc<Self>) {
        let ctx = self.clone();
        tokio::spawn(async move {
            bootstrap::run_launch_sequence(
                &ctx.bootstrap,
                ctx.storage.clone(),
                &ctx.nav,
                &ctx.broadcaster,
            )
            .await;
        });
    }
}

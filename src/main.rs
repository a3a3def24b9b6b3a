use analysis_client::{AnalysisApiClient, AnalysisService};
use anyhow::Context;
use database::{MentionCache, SqliteStore};
use gui::App;
use iced::{Application, Settings};
use mentionhub_core::AppConfig;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    let config = AppConfig::load().context("failed to load configuration")?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_filter));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    tracing::info!("Starting Mentionhub - Reddit Mention Tracker");

    let client =
        Arc::new(AnalysisApiClient::new(&config).context("failed to create analysis client")?);
    let service: Arc<dyn AnalysisService> = client.clone();

    // Lives until the window closes; the cache pool was created on it.
    let runtime = tokio::runtime::Runtime::new().context("failed to start async runtime")?;

    let cache_path = config.resolved_cache_path();
    let store = runtime
        .block_on(SqliteStore::open(&cache_path))
        .with_context(|| format!("failed to open mention cache at {}", cache_path.display()))?;
    let cache = MentionCache::new(Arc::new(store));

    let mut settings = Settings::with_flags(Flags {
        service,
        cache,
        post_limit: config.post_limit,
    });
    settings.window = iced::window::Settings {
        size: iced::Size::new(1200.0, 800.0),
        min_size: Some(iced::Size::new(800.0, 600.0)),
        ..Default::default()
    };

    let result = MentionhubApp::run(settings).map_err(|e| {
        tracing::error!("Application error: {}", e);
        anyhow::anyhow!("GUI error: {e}")
    });

    let metrics = runtime.block_on(client.get_metrics());
    tracing::info!("Analysis service usage:\n{}", metrics.summary());
    drop(runtime);
    result
}

struct Flags {
    service: Arc<dyn AnalysisService>,
    cache: MentionCache,
    post_limit: u32,
}

struct MentionhubApp {
    app: App,
}

impl Application for MentionhubApp {
    type Message = gui::Message;
    type Theme = iced::Theme;
    type Executor = iced::executor::Default;
    type Flags = Flags;

    fn new(flags: Self::Flags) -> (Self, iced::Command<Self::Message>) {
        tracing::info!("Initializing application");
        let app = App::new(flags.service, flags.cache, flags.post_limit);
        (Self { app }, iced::Command::none())
    }

    fn title(&self) -> String {
        "Mentionhub - Reddit Mention Tracker".to_string()
    }

    fn update(&mut self, message: Self::Message) -> iced::Command<Self::Message> {
        self.app.update(message)
    }

    fn view(&self) -> iced::Element<Self::Message> {
        self.app.view()
    }

    fn theme(&self) -> Self::Theme {
        iced::Theme::Light
    }
}

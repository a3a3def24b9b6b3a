use crate::create_project::badge_row;
use crate::Message;
use analysis_client::AnalysisService;
use database::MentionCache;
use iced::widget::{button, column, container, row, text, Space};
use iced::{theme, Color, Element, Length};
use mentionhub_core::{CoreError, ErrorExt, Project, ProjectId};
use std::sync::Arc;
use tracing::{debug, info};

pub const KEYWORD_PREVIEW: usize = 3;

/// Loading and error state for one project's "View Mentions" control.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectCard {
    loading: bool,
    error: Option<String>,
}

impl ProjectCard {
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Returns false when a fetch is already in flight.
    pub fn begin_fetch(&mut self) -> bool {
        if self.loading {
            return false;
        }
        self.loading = true;
        self.error = None;
        true
    }

    /// Returns true when the caller should navigate to the mentions view.
    pub fn finish_fetch(&mut self, result: Result<(), String>) -> bool {
        self.loading = false;
        match result {
            Ok(()) => true,
            Err(message) => {
                self.error = Some(message);
                false
            }
        }
    }

    pub fn view<'a>(&'a self, project: &'a Project) -> Element<'a, Message> {
        let header = row![
            text(&project.name).size(20),
            Space::with_width(Length::Fill),
            button(text("Delete Project").size(12))
                .style(theme::Button::Destructive)
                .on_press(Message::DeleteProject(project.id)),
        ];

        let (shown, hidden) = project.keyword_preview(KEYWORD_PREVIEW);
        let mut keywords = badge_row(shown.iter().cloned());
        if hidden > 0 {
            keywords = keywords.push(text(format!("+{}", hidden)).size(12));
        }

        let mut content = column![
            header,
            text("Description").size(12),
            text(&project.description).size(14),
            text("Keywords").size(12),
            keywords,
        ]
        .spacing(8);

        if let Some(error) = &self.error {
            content = content.push(
                container(text(error).size(14).style(Color::from_rgb(0.86, 0.15, 0.15)))
                    .padding(10)
                    .width(Length::Fill)
                    .style(theme::Container::Box),
            );
        }

        let label = if self.loading {
            "Analyzing Reddit Posts... (This may take a minute)"
        } else {
            "View Mentions"
        };
        let mut view_mentions = button(text(label))
            .width(Length::Fill)
            .style(theme::Button::Secondary);
        if !self.loading {
            view_mentions = view_mentions.on_press(Message::ViewMentions(project.id));
        }
        content = content.push(view_mentions);

        container(content)
            .padding(20)
            .width(Length::Fill)
            .style(theme::Container::Box)
            .into()
    }
}

/// Asks the service for matching posts and caches them; the cache is only
/// written when the whole response is valid.
pub async fn fetch_and_cache(
    service: Arc<dyn AnalysisService>,
    cache: MentionCache,
    project: Project,
    post_limit: u32,
) -> Result<(), CoreError> {
    info!("Fetching mentions for project '{}'", project.name);
    let request = project.match_request(post_limit);
    let result = service.match_posts(&request).await?;
    cache.store(&project.id, &result).await?;
    debug!("Mentions for {} ready", project.id);
    Ok(())
}

pub(crate) async fn fetch_mentions_message(
    service: Arc<dyn AnalysisService>,
    cache: MentionCache,
    project: Project,
    post_limit: u32,
) -> (ProjectId, Result<(), String>) {
    let project_id = project.id;
    let result = fetch_and_cache(service, cache, project, post_limit)
        .await
        .map_err(|e| e.log_error().user_friendly_message());
    (project_id, result)
}

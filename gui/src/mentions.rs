use crate::create_project::badge_row;
use crate::Message;
use database::MentionCache;
use iced::widget::{button, column, container, row, scrollable, text, Column, Space};
use iced::{theme, Color, Element, Length};
use mentionhub_core::{AnalysisResult, CoreError, ErrorExt, Post, ProjectId, RelevanceBand};
use tokio::process::Command;
use tracing::{debug, info};
use url::Url;

pub const EMPTY_STATE: &str = "No mentions found for this project.";

/// Read-only list of the cached mentions for one project.
#[derive(Debug, Clone)]
pub struct MentionsView {
    project_id: ProjectId,
    project_name: Option<String>,
    posts: Vec<Post>,
    loaded: bool,
}

/// Everything one post card displays.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostCard<'a> {
    pub subreddit_badge: String,
    pub keyword_badges: &'a [String],
    pub date: &'a str,
    pub relevance_label: String,
    pub band: RelevanceBand,
    pub title: &'a str,
    pub url: &'a str,
    pub snippet: Option<&'a str>,
    pub reply: Option<&'a str>,
}

impl<'a> From<&'a Post> for PostCard<'a> {
    fn from(post: &'a Post) -> Self {
        Self {
            subreddit_badge: format!("r/{}", post.subreddit),
            keyword_badges: &post.matching_keywords,
            date: &post.formatted_date,
            relevance_label: format!("Relevance: {}%", post.relevance_score),
            band: RelevanceBand::from_score(post.relevance_score),
            title: &post.title,
            url: &post.url,
            snippet: post.snippet(),
            reply: post.reply(),
        }
    }
}

impl MentionsView {
    pub fn loading(project_id: ProjectId, project_name: Option<String>) -> Self {
        Self {
            project_id,
            project_name,
            posts: Vec::new(),
            loaded: false,
        }
    }

    pub fn project_id(&self) -> ProjectId {
        self.project_id
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn loaded(&mut self, result: Option<AnalysisResult>) {
        self.posts = result.map(|r| r.matching_posts).unwrap_or_default();
        self.loaded = true;
        debug!(
            "Mentions view for {} shows {} posts",
            self.project_id,
            self.posts.len()
        );
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }

    pub fn cards(&self) -> Vec<PostCard<'_>> {
        self.posts.iter().map(PostCard::from).collect()
    }

    pub fn view(&self) -> Element<'_, Message> {
        let title = match &self.project_name {
            Some(name) => format!("Mentions for {}", name),
            None => "Mentions".to_string(),
        };
        let header = row![
            button(text("Back to Projects"))
                .style(theme::Button::Text)
                .on_press(Message::BackToProjects),
            Space::with_width(16),
            text(title).size(24),
        ];

        let body: Element<'_, Message> = if !self.loaded {
            text("Loading mentions...").size(16).into()
        } else if self.is_empty() {
            container(text(EMPTY_STATE).size(16))
                .width(Length::Fill)
                .center_x()
                .padding(48)
                .into()
        } else {
            let list = self
                .cards()
                .into_iter()
                .fold(Column::new().spacing(16), |list, card| {
                    list.push(post_card_view(card))
                });
            scrollable(list).height(Length::Fill).into()
        };

        column![header, body].spacing(24).into()
    }
}

fn post_card_view(card: PostCard<'_>) -> Element<'_, Message> {
    let [r, g, b] = card.band.rgb();

    let badges = row![
        container(text(card.subreddit_badge).size(12))
            .padding([2, 8])
            .style(theme::Container::Box),
        Space::with_width(8),
        badge_row(card.keyword_badges.iter().cloned()),
    ];

    let meta = row![
        text(card.date).size(13),
        Space::with_width(16),
        text(card.relevance_label)
            .size(13)
            .style(Color::from_rgb(r, g, b)),
    ];

    let mut content = column![
        badges,
        meta,
        button(text(card.title).size(16))
            .style(theme::Button::Text)
            .padding(0)
            .on_press(Message::OpenPost(card.url.to_string())),
    ]
    .spacing(10);

    if let Some(snippet) = card.snippet {
        content = content.push(text(snippet).size(14));
    }

    if let Some(reply) = card.reply {
        content = content.push(
            container(column![text("Generated Reply").size(13), text(reply).size(14)].spacing(6))
                .padding(16)
                .width(Length::Fill)
                .style(theme::Container::Box),
        );
    }

    container(content)
        .padding(20)
        .width(Length::Fill)
        .style(theme::Container::Box)
        .into()
}

/// Reads the cached result; storage failures render as the empty state.
pub async fn load_mentions(cache: MentionCache, project_id: ProjectId) -> Option<AnalysisResult> {
    match cache.load(&project_id).await {
        Ok(result) => result,
        Err(e) => {
            e.log_error();
            None
        }
    }
}

/// Accepts only absolute http(s) URLs.
pub fn web_url(url: &str) -> Result<Url, CoreError> {
    let parsed = Url::parse(url).map_err(|e| CoreError::InvalidInput {
        message: format!("Invalid post URL '{}': {}", url, e),
    })?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(CoreError::InvalidInput {
            message: format!("Refusing to open non-web URL '{}'", url),
        });
    }
    Ok(parsed)
}

/// Hands an http(s) post URL to the platform's default browser and waits for the launcher.
pub async fn open_in_browser(url: String) -> Result<(), CoreError> {
    let parsed = web_url(&url)?;
    info!("Opening {} in browser", parsed);

    let mut command = if cfg!(target_os = "macos") {
        let mut command = Command::new("open");
        command.arg(parsed.as_str());
        command
    } else if cfg!(target_os = "windows") {
        let mut command = Command::new("cmd");
        command.args(["/C", "start", "", parsed.as_str()]);
        command
    } else {
        let mut command = Command::new("xdg-open");
        command.arg(parsed.as_str());
        command
    };

    let status = command.status().await?;
    if !status.success() {
        return Err(CoreError::Internal {
            message: format!("Browser launcher exited with {}", status),
        });
    }
    debug!("Browser launcher finished for {}", parsed);
    Ok(())
}

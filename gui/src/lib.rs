pub mod create_project;
pub mod mentions;
pub mod project_card;
pub mod toast;

#[cfg(test)]
mod testing;

use analysis_client::AnalysisService;
use create_project::{CreateEvent, CreateMessage, CreateProjectFlow};
use database::MentionCache;
use iced::widget::{button, column, container, row, scrollable, text, Column, Space};
use iced::{theme, Command, Element, Length, Theme};
use mentionhub_core::{
    AnalysisResult, ErrorExt, KeywordAnalysis, Project, ProjectId, ProjectStore,
};
use mentions::MentionsView;
use project_card::ProjectCard;
use std::collections::HashMap;
use std::sync::Arc;
use toast::{Toasts, TOAST_DURATION};
use tracing::{debug, info, warn};

#[derive(Debug, Clone)]
pub enum Message {
    OpenCreateDialog,
    CloseCreateDialog,
    Create(CreateMessage),
    AnalysisFinished {
        request: u64,
        result: Result<KeywordAnalysis, String>,
    },
    ViewMentions(ProjectId),
    MentionsFetched(ProjectId, Result<(), String>),
    MentionsLoaded(ProjectId, Option<AnalysisResult>),
    DeleteProject(ProjectId),
    CacheEntryRemoved(ProjectId, Result<(), String>),
    OpenPost(String),
    PostOpened(Result<(), String>),
    BackToProjects,
    DismissToast(u64),
}

#[derive(Debug)]
pub enum Screen {
    Projects,
    Mentions(MentionsView),
}

pub struct App {
    service: Arc<dyn AnalysisService>,
    cache: MentionCache,
    post_limit: u32,
    projects: ProjectStore,
    cards: HashMap<ProjectId, ProjectCard>,
    create_flow: CreateProjectFlow,
    dialog_open: bool,
    screen: Screen,
    toasts: Toasts,
}

impl App {
    pub fn new(service: Arc<dyn AnalysisService>, cache: MentionCache, post_limit: u32) -> Self {
        Self {
            service,
            cache,
            post_limit,
            projects: ProjectStore::new(),
            cards: HashMap::new(),
            create_flow: CreateProjectFlow::new(),
            dialog_open: false,
            screen: Screen::Projects,
            toasts: Toasts::default(),
        }
    }

    pub fn projects(&self) -> &ProjectStore {
        &self.projects
    }

    pub fn card(&self, id: &ProjectId) -> Option<&ProjectCard> {
        self.cards.get(id)
    }

    pub fn create_flow(&self) -> &CreateProjectFlow {
        &self.create_flow
    }

    pub fn is_dialog_open(&self) -> bool {
        self.dialog_open
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn toasts(&self) -> &Toasts {
        &self.toasts
    }

    pub fn update(&mut self, message: Message) -> Command<Message> {
        match message {
            Message::OpenCreateDialog => {
                self.dialog_open = true;
                Command::none()
            }
            Message::CloseCreateDialog => {
                self.dialog_open = false;
                self.create_flow.cancel_pending();
                Command::none()
            }
            Message::Create(message) => match self.create_flow.update(message) {
                Some(CreateEvent::RequestAnalysis {
                    request,
                    name,
                    description,
                }) => {
                    let service = Arc::clone(&self.service);
                    Command::perform(
                        async move {
                            service
                                .analyze_initial(&name, &description)
                                .await
                                .map_err(|e| e.log_error().user_friendly_message())
                        },
                        move |result| Message::AnalysisFinished { request, result },
                    )
                }
                Some(CreateEvent::ProjectReady(draft)) => {
                    let project = Project::new(draft);
                    info!("Created project '{}' ({})", project.name, project.id);
                    self.cards.insert(project.id, ProjectCard::default());
                    self.projects.add(project);
                    self.dialog_open = false;
                    Command::none()
                }
                None => Command::none(),
            },
            Message::AnalysisFinished { request, result } => {
                match self.create_flow.analysis_finished(request, result) {
                    Ok(()) => Command::none(),
                    Err(toast) => self.show_toast(toast),
                }
            }
            Message::ViewMentions(project_id) => {
                let Some(project) = self.projects.get(&project_id).cloned() else {
                    warn!("View Mentions for unknown project {}", project_id);
                    return Command::none();
                };
                if !self.cards.entry(project_id).or_default().begin_fetch() {
                    return Command::none();
                }
                Command::perform(
                    project_card::fetch_mentions_message(
                        Arc::clone(&self.service),
                        self.cache.clone(),
                        project,
                        self.post_limit,
                    ),
                    |(project_id, result)| Message::MentionsFetched(project_id, result),
                )
            }
            Message::MentionsFetched(project_id, result) => {
                match self.cards.get_mut(&project_id) {
                    Some(card) => {
                        if card.finish_fetch(result) {
                            return self.enter_mentions(project_id);
                        }
                        Command::none()
                    }
                    None => {
                        // Deleted while the request was in flight
                        debug!("Discarding mentions for deleted project {}", project_id);
                        self.remove_cache_entry(project_id)
                    }
                }
            }
            Message::MentionsLoaded(project_id, result) => {
                if let Screen::Mentions(view) = &mut self.screen {
                    if view.project_id() == project_id {
                        view.loaded(result);
                    }
                }
                Command::none()
            }
            Message::DeleteProject(project_id) => {
                if self.projects.remove(&project_id).is_none() {
                    return Command::none();
                }
                info!("Deleted project {}", project_id);
                self.cards.remove(&project_id);
                if matches!(&self.screen, Screen::Mentions(view) if view.project_id() == project_id)
                {
                    self.screen = Screen::Projects;
                }
                self.remove_cache_entry(project_id)
            }
            Message::CacheEntryRemoved(project_id, result) => match result {
                Ok(()) => {
                    debug!("Removed cached mentions for {}", project_id);
                    Command::none()
                }
                Err(message) => self.show_toast(message),
            },
            Message::OpenPost(url) => Command::perform(
                async move {
                    mentions::open_in_browser(url)
                        .await
                        .map_err(|e| e.log_error().user_friendly_message())
                },
                Message::PostOpened,
            ),
            Message::PostOpened(result) => match result {
                Ok(()) => Command::none(),
                Err(message) => self.show_toast(message),
            },
            Message::BackToProjects => {
                self.screen = Screen::Projects;
                Command::none()
            }
            Message::DismissToast(id) => {
                self.toasts.dismiss(id);
                Command::none()
            }
        }
    }

    fn enter_mentions(&mut self, project_id: ProjectId) -> Command<Message> {
        let name = self.projects.get(&project_id).map(|p| p.name.clone());
        info!("Navigating to mentions for {}", project_id);
        self.screen = Screen::Mentions(MentionsView::loading(project_id, name));
        Command::perform(
            mentions::load_mentions(self.cache.clone(), project_id),
            move |result| Message::MentionsLoaded(project_id, result),
        )
    }

    fn remove_cache_entry(&self, project_id: ProjectId) -> Command<Message> {
        let cache = self.cache.clone();
        Command::perform(
            async move {
                cache
                    .remove(&project_id)
                    .await
                    .map_err(|e| e.log_error().user_friendly_message())
            },
            move |result| Message::CacheEntryRemoved(project_id, result),
        )
    }

    fn show_toast(&mut self, message: String) -> Command<Message> {
        let id = self.toasts.push(message);
        Command::perform(
            async { tokio::time::sleep(TOAST_DURATION).await },
            move |_| Message::DismissToast(id),
        )
    }

    pub fn view(&self) -> Element<Message, Theme> {
        let page: Element<Message, Theme> = match &self.screen {
            Screen::Projects => self.projects_view(),
            Screen::Mentions(view) => view.view(),
        };

        let mut layout = Column::new().spacing(20);
        if !self.toasts.is_empty() {
            layout = layout.push(self.toasts.view());
        }
        layout = layout.push(page);

        container(layout)
            .width(Length::Fill)
            .height(Length::Fill)
            .padding(20)
            .into()
    }

    fn projects_view(&self) -> Element<Message, Theme> {
        let header = row![
            text("Reddit Mention Tracker").size(28),
            Space::with_width(Length::Fill),
            button(text("New Project"))
                .style(theme::Button::Primary)
                .on_press(Message::OpenCreateDialog),
        ];

        let mut page = column![header].spacing(20);

        if self.dialog_open {
            let dialog = column![
                row![
                    Space::with_width(Length::Fill),
                    button(text("Close"))
                        .style(theme::Button::Text)
                        .on_press(Message::CloseCreateDialog),
                ],
                self.create_flow.view().map(Message::Create),
            ];
            page = page.push(
                container(dialog)
                    .padding(20)
                    .max_width(600)
                    .style(theme::Container::Box),
            );
        }

        let content: Element<Message, Theme> = if self.projects.is_empty() {
            column![
                text("No projects yet").size(16),
                text("Create a project to start tracking Reddit mentions").size(14)
            ]
            .spacing(10)
            .into()
        } else {
            let list = self.projects.iter().fold(Column::new().spacing(16), |list, project| {
                match self.cards.get(&project.id) {
                    Some(card) => list.push(card.view(project)),
                    None => list,
                }
            });
            scrollable(list).height(Length::Fill).into()
        };

        page.push(content).into()
    }
}

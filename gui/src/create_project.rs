//! Two-step "Create New Project" dialog.
//!
//! The input step collects a name and description and asks the analysis
//! service for keywords and subreddits. The review step shows what came back
//! and commits the project.

use iced::widget::{button, column, container, row, text, text_input, Row, Space};
use iced::{theme, Element, Length};
use mentionhub_core::{KeywordAnalysis, ProjectDraft};
use tracing::{debug, warn};

pub const ANALYSIS_FAILED_TOAST: &str = "Failed to analyze project. Please try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Step {
    #[default]
    Input,
    Review,
}

#[derive(Debug, Clone)]
pub enum CreateMessage {
    NameChanged(String),
    DescriptionChanged(String),
    Analyze,
    BackToEdit,
    Create,
}

/// What the dialog needs its owner to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CreateEvent {
    RequestAnalysis {
        request: u64,
        name: String,
        description: String,
    },
    ProjectReady(ProjectDraft),
}

#[derive(Debug, Default)]
pub struct CreateProjectFlow {
    step: Step,
    name: String,
    description: String,
    keywords: Vec<String>,
    subreddits: Vec<String>,
    in_flight: bool,
    request_seq: u64,
}

impl CreateProjectFlow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn step(&self) -> Step {
        self.step
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight
    }

    /// Sequence number of the in-flight analysis, if any.
    pub fn pending_request(&self) -> Option<u64> {
        self.in_flight.then_some(self.request_seq)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn keyword_badges(&self) -> &[String] {
        &self.keywords
    }

    pub fn subreddit_badges(&self) -> Vec<String> {
        self.subreddits.iter().map(|s| format!("r/{}", s)).collect()
    }

    pub fn can_submit(&self) -> bool {
        !self.in_flight && !self.name.trim().is_empty() && !self.description.trim().is_empty()
    }

    pub fn update(&mut self, message: CreateMessage) -> Option<CreateEvent> {
        match message {
            CreateMessage::NameChanged(name) => {
                self.name = name;
                None
            }
            CreateMessage::DescriptionChanged(description) => {
                self.description = description;
                None
            }
            CreateMessage::Analyze => {
                if self.step != Step::Input || !self.can_submit() {
                    return None;
                }
                self.in_flight = true;
                self.request_seq += 1;
                debug!("Requesting initial analysis #{}", self.request_seq);
                Some(CreateEvent::RequestAnalysis {
                    request: self.request_seq,
                    name: self.name.clone(),
                    description: self.description.clone(),
                })
            }
            CreateMessage::BackToEdit => {
                self.step = Step::Input;
                None
            }
            CreateMessage::Create => {
                if self.step != Step::Review {
                    return None;
                }
                let draft = ProjectDraft {
                    name: std::mem::take(&mut self.name),
                    description: std::mem::take(&mut self.description),
                    keywords: std::mem::take(&mut self.keywords),
                    subreddits: std::mem::take(&mut self.subreddits),
                };
                self.reset();
                Some(CreateEvent::ProjectReady(draft))
            }
        }
    }

    /// Applies the analysis outcome. `Err` carries the toast to show.
    pub fn analysis_finished(
        &mut self,
        request: u64,
        result: Result<KeywordAnalysis, String>,
    ) -> Result<(), String> {
        if !self.in_flight || request != self.request_seq {
            debug!("Dropping stale analysis response #{}", request);
            return Ok(());
        }
        self.in_flight = false;

        match result {
            Ok(analysis) => {
                self.keywords = analysis.keywords;
                self.subreddits = analysis.subreddits;
                self.step = Step::Review;
                Ok(())
            }
            Err(reason) => {
                warn!("Initial analysis failed: {}", reason);
                Err(ANALYSIS_FAILED_TOAST.to_string())
            }
        }
    }

    /// Invalidates any outstanding request while keeping what was typed.
    pub fn cancel_pending(&mut self) {
        if self.in_flight {
            debug!("Cancelling analysis request #{}", self.request_seq);
            self.in_flight = false;
            self.request_seq += 1;
        }
    }

    /// Clears every field and invalidates any outstanding request.
    pub fn reset(&mut self) {
        let request_seq = self.request_seq + 1;
        *self = Self {
            request_seq,
            ..Self::default()
        };
    }

    pub fn view(&self) -> Element<'_, CreateMessage> {
        let body: Element<'_, CreateMessage> = match self.step {
            Step::Input => self.input_view(),
            Step::Review => self.review_view(),
        };

        column![text("Create New Project").size(22), body]
            .spacing(16)
            .into()
    }

    fn input_view(&self) -> Element<'_, CreateMessage> {
        let name = text_input("Enter project name", &self.name)
            .on_input(CreateMessage::NameChanged)
            .padding(10);
        let description = text_input("Describe your project...", &self.description)
            .on_input(CreateMessage::DescriptionChanged)
            .padding(10);

        let label = if self.in_flight {
            "Analyzing..."
        } else {
            "Analyze & Continue"
        };
        let mut analyze = button(text(label))
            .width(Length::Fill)
            .style(theme::Button::Primary);
        if self.can_submit() {
            analyze = analyze.on_press(CreateMessage::Analyze);
        }

        column![
            text("Project Name").size(14),
            name,
            text("Description").size(14),
            description,
            analyze,
        ]
        .spacing(8)
        .into()
    }

    fn review_view(&self) -> Element<'_, CreateMessage> {
        let keywords = badge_row(self.keywords.iter().cloned());
        let subreddits = badge_row(self.subreddit_badges());

        let summary = container(
            column![
                text("Generated Keywords").size(14),
                keywords,
                text("Target Subreddits").size(14),
                subreddits,
            ]
            .spacing(8),
        )
        .padding(16)
        .width(Length::Fill)
        .style(theme::Container::Box);

        let actions = row![
            button(text("Back to Edit"))
                .width(Length::Fill)
                .style(theme::Button::Secondary)
                .on_press(CreateMessage::BackToEdit),
            Space::with_width(12),
            button(text("Create Project"))
                .width(Length::Fill)
                .style(theme::Button::Primary)
                .on_press(CreateMessage::Create),
        ];

        column![summary, actions].spacing(16).into()
    }
}

pub(crate) fn badge_row<'a, M: 'a>(labels: impl IntoIterator<Item = String>) -> Row<'a, M> {
    labels.into_iter().fold(Row::new().spacing(6), |row, label| {
        row.push(
            container(text(label).size(12))
                .padding([2, 8])
                .style(theme::Container::Box),
        )
    })
}

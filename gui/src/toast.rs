use crate::Message;
use iced::widget::{button, container, row, text, Column, Space};
use iced::{theme, Element, Length};
use std::time::Duration;

pub const TOAST_DURATION: Duration = Duration::from_secs(4);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub id: u64,
    pub message: String,
}

/// Transient error notifications, newest last.
#[derive(Debug, Default)]
pub struct Toasts {
    next_id: u64,
    items: Vec<Toast>,
}

impl Toasts {
    pub fn push(&mut self, message: impl Into<String>) -> u64 {
        self.next_id += 1;
        self.items.push(Toast {
            id: self.next_id,
            message: message.into(),
        });
        self.next_id
    }

    pub fn dismiss(&mut self, id: u64) {
        self.items.retain(|toast| toast.id != id);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Toast> {
        self.items.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn view(&self) -> Element<'_, Message> {
        self.items
            .iter()
            .fold(Column::new().spacing(8), |column, toast| {
                column.push(
                    container(row![
                        text(&toast.message).size(14),
                        Space::with_width(Length::Fill),
                        button(text("x").size(12))
                            .style(theme::Button::Text)
                            .on_press(Message::DismissToast(toast.id)),
                    ])
                    .padding(12)
                    .width(Length::Fill)
                    .style(theme::Container::Box),
                )
            })
            .into()
    }
}

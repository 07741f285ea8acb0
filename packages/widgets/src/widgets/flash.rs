use anyhow::{anyhow, Result};

use crate::{browser::Locator, error::WidgetError, page::Page};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlashLevel {
    Success,
    Info,
    Warning,
    Error,
}

impl FlashLevel {
    fn from_classes(classes: &str) -> Self {
        let has = |class: &str| classes.split_whitespace().any(|c| c == class);
        if has("alert-success") {
            FlashLevel::Success
        } else if has("alert-danger") || has("alert-error") {
            FlashLevel::Error
        } else if has("alert-warning") {
            FlashLevel::Warning
        } else {
            FlashLevel::Info
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlashMessage {
    pub text: String,
    pub level: FlashLevel,
}

/// Notification area above the page content.
#[derive(Debug, Clone)]
pub struct FlashMessages {
    page: Page,
}

impl FlashMessages {
    pub fn new(page: &Page) -> Self {
        Self { page: page.clone() }
    }

    pub fn locator() -> Locator {
        Locator::xpath("//div[@id='flash_msg_div']")
    }

    pub fn message_locator() -> Locator {
        Locator::xpath("./div[contains(@class, 'alert')]")
    }

    pub async fn messages(&self) -> Result<Vec<FlashMessage>> {
        let roots = self.page.elements(&Self::locator()).await?;
        let Some(root) = roots.first() else {
            return Ok(Vec::new());
        };

        let mut messages = Vec::new();
        for element in self.page.children(root, &Self::message_locator()).await? {
            let classes = self
                .page
                .attribute(&element, "class")
                .await?
                .unwrap_or_default();
            messages.push(FlashMessage {
                text: self.page.text(&element).await?,
                level: FlashLevel::from_classes(&classes),
            });
        }
        Ok(messages)
    }

    pub async fn assert_success_message(&self, expected: &str) -> Result<()> {
        let messages = self.messages().await?;
        if messages
            .iter()
            .any(|m| m.level == FlashLevel::Success && m.text == expected)
        {
            return Ok(());
        }
        Err(WidgetError::FlashMessageMissing {
            expected: expected.to_string(),
            found: messages.into_iter().map(|m| m.text).collect(),
        }
        .into())
    }

    pub async fn assert_no_error(&self) -> Result<()> {
        let errors = self
            .messages()
            .await?
            .into_iter()
            .filter(|m| m.level == FlashLevel::Error)
            .map(|m| m.text)
            .collect::<Vec<_>>();
        if errors.is_empty() {
            Ok(())
        } else {
            Err(anyhow!("Error flash message(s) shown: {}", errors.join("; ")))
        }
    }
}

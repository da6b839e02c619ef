// ── Navigation / alerting host ──
//
// The controller never renders anything. Screen transitions, one-shot
// notices and confirmation prompts are delegated to a `Host`, which the
// TUI (or a test double) implements.

use std::future::Future;

use strum::IntoStaticStr;

use crate::model::Product;

/// Navigation destinations reachable from the product list.
#[derive(Debug, Clone, PartialEq, IntoStaticStr)]
pub enum Route {
    /// Edit form, pre-filled with the selected product.
    EditShoe(Product),
    /// Empty add form.
    AddShoe,
}

impl Route {
    /// Screen identifier understood by the host.
    pub fn name(&self) -> &'static str {
        self.into()
    }
}

/// Severity of a notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Error,
}

/// A one-shot user-visible notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub title: &'static str,
    pub message: String,
}

impl Notice {
    pub fn success(title: &'static str, message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            title,
            message: message.into(),
        }
    }

    pub fn error(title: &'static str, message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            title,
            message: message.into(),
        }
    }

    pub fn load_failed() -> Self {
        Self::error("Error", "Could not load the product list")
    }

    pub fn deleted() -> Self {
        Self::success("Success", "Product deleted!")
    }

    pub fn delete_failed() -> Self {
        Self::error("Error", "Could not delete the product!")
    }
}

/// A modal question with exactly two labeled answers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmPrompt {
    pub title: &'static str,
    pub message: String,
    pub cancel_label: &'static str,
    pub confirm_label: &'static str,
    /// The confirm action removes data.
    pub destructive: bool,
}

impl ConfirmPrompt {
    /// Prompt shown before deleting `display_name`.
    pub fn delete(display_name: &str) -> Self {
        Self {
            title: "Confirm delete",
            message: format!("Are you sure you want to delete \"{display_name}\"?"),
            cancel_label: "Cancel",
            confirm_label: "Delete",
            destructive: true,
        }
    }
}

/// The user's answer to a [`ConfirmPrompt`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Choice {
    Cancel,
    Confirm,
}

/// Everything the controller needs from the surrounding UI.
pub trait Host: Send + Sync {
    /// Push a destination screen.
    fn navigate(&self, route: Route);

    /// Pop back to the previous screen.
    fn go_back(&self);

    /// Show a one-shot notice. Fire-and-forget.
    fn notify(&self, notice: Notice);

    /// Present a prompt and resolve once the user picks an answer.
    /// A dismissed prompt resolves to [`Choice::Cancel`].
    fn confirm(&self, prompt: ConfirmPrompt) -> impl Future<Output = Choice> + Send;
}

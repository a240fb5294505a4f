//! Terminal implementations of the navigation and dialog contracts.

use std::io::{self, BufRead, Write};
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use catalog_core::{ConfirmDialog, Navigator, Prompt, Route};
use tracing::{debug, warn};

/// An in-memory screen stack. The CLI runs one screen per invocation, so the
/// stack only records where the flow would have gone next.
#[derive(Debug)]
pub struct StackNavigator {
    stack: Mutex<Vec<Route>>,
}

impl StackNavigator {
    pub fn new(stack: Vec<Route>) -> Self {
        Self {
            stack: Mutex::new(stack),
        }
    }

    pub fn current(&self) -> Option<Route> {
        self.lock().last().copied()
    }

    pub fn history(&self) -> Vec<Route> {
        self.lock().clone()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Route>> {
        self.stack.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Navigator for StackNavigator {
    fn navigate(&self, route: Route) {
        debug!(%route, "navigate");
        self.lock().push(route);
    }

    fn replace(&self, route: Route) {
        debug!(%route, "replace");
        let mut stack = self.lock();
        stack.pop();
        stack.push(route);
    }

    fn go_back(&self) {
        let mut stack = self.lock();
        if stack.len() > 1 {
            stack.pop();
        }
        debug!(current = ?stack.last(), "back");
    }
}

/// Asks on the terminal; only an explicit yes confirms.
pub struct StdinDialog;

#[async_trait]
impl ConfirmDialog for StdinDialog {
    async fn confirm(&self, prompt: &Prompt) -> bool {
        let question = format!(
            "{}\n{} [{}/{}]: ",
            prompt.title, prompt.message, prompt.confirm_label, prompt.cancel_label
        );
        let answer = tokio::task::spawn_blocking(move || -> io::Result<String> {
            let mut stderr = io::stderr();
            stderr.write_all(question.as_bytes())?;
            stderr.flush()?;
            let mut line = String::new();
            io::stdin().lock().read_line(&mut line)?;
            Ok(line)
        })
        .await;

        match answer {
            Ok(Ok(line)) => is_yes(&line),
            Ok(Err(err)) => {
                warn!(error = %err, "could not read confirmation");
                false
            }
            Err(err) => {
                warn!(error = %err, "confirmation prompt aborted");
                false
            }
        }
    }
}

/// Confirms without asking, for `--yes`.
pub struct AssumeYes;

#[async_trait]
impl ConfirmDialog for AssumeYes {
    async fn confirm(&self, _prompt: &Prompt) -> bool {
        true
    }
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes" | "delete")
}

use std::fmt::Write as _;

use colored::Colorize;

use crate::domain::User;

/// Snapshot published to observers after every state change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum View {
    Loading,
    Failed {
        message: String,
    },
    Empty {
        creating: bool,
        create_error: Option<String>,
    },
    Carousel(CarouselView),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CarouselView {
    pub current: User,
    /// Zero-based index of `current` in `users`.
    pub selected: usize,
    pub users: Vec<User>,
    pub can_previous: bool,
    pub can_next: bool,
    pub creating: bool,
    pub create_error: Option<String>,
    pub refreshing: bool,
}

impl View {
    /// Plain terminal rendering of the snapshot.
    pub fn render(&self) -> String {
        match self {
            View::Loading => format!("{}\n", "Loading users...".cyan()),
            View::Failed { message } => {
                format!("{} {}\n{}\n", "✖".red().bold(), format!("Error: {message}").red(), "r to retry".dimmed())
            }
            View::Empty { creating, create_error } => {
                let mut out = format!("{}\n", "No users found".dimmed());
                render_create_line(&mut out, *creating, create_error.as_deref());
                out
            }
            View::Carousel(view) => view.render(),
        }
    }
}

impl CarouselView {
    fn render(&self) -> String {
        let mut out = String::new();
        let current = &self.current;

        let _ = writeln!(out, "  {}  {}", format!("[{}]", current.initial()).bold().magenta(), current.full_name.bold());
        let _ = writeln!(out, "       {}", current.email);
        let _ = writeln!(
            out,
            "       {}",
            format!("User {} of {}", self.selected + 1, self.users.len()).dimmed()
        );
        if self.refreshing {
            let _ = writeln!(out, "       {}", "refreshing...".dimmed());
        }

        let previous = if self.can_previous { "[p] previous".normal() } else { "[p] previous".dimmed() };
        let next = if self.can_next { "[n] next".normal() } else { "[n] next".dimmed() };
        let _ = writeln!(out, "\n  {previous}   {next}");
        render_create_line(&mut out, self.creating, self.create_error.as_deref());

        let _ = writeln!(out, "\n  {}", format!("All users ({})", self.users.len()).bold());
        for (index, user) in self.users.iter().enumerate() {
            let marker = if index == self.selected { "✔".green().bold() } else { " ".normal() };
            let _ = writeln!(out, "  {marker} {:>3}. {}  {}", index + 1, user.full_name, user.email.dimmed());
        }
        out
    }
}

fn render_create_line(out: &mut String, creating: bool, create_error: Option<&str>) {
    if creating {
        let _ = writeln!(out, "  {}", "Creating...".yellow());
    } else {
        let _ = writeln!(out, "  [c] new user");
    }
    if let Some(message) = create_error {
        let _ = writeln!(out, "  {} {}", "✖".red().bold(), format!("Could not create user: {message}").red());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> CarouselView {
        let users = vec![
            User::new("1", "ana lima", "ana@example.com"),
            User::new("2", "Bruno Costa", "bruno@example.com"),
        ];
        CarouselView {
            current: users[1].clone(),
            selected: 1,
            users,
            can_previous: true,
            can_next: false,
            creating: false,
            create_error: None,
            refreshing: false,
        }
    }

    #[test]
    fn carousel_shows_position_and_list() {
        let out = View::Carousel(sample()).render();
        assert!(out.contains("User 2 of 2"));
        assert!(out.contains("All users (2)"));
        assert!(out.contains("bruno@example.com"));
        assert!(out.contains("[c] new user"));
    }

    #[test]
    fn pending_create_replaces_button() {
        let mut view = sample();
        view.creating = true;
        view.create_error = Some("timeout".into());
        let out = View::Carousel(view).render();
        assert!(out.contains("Creating..."));
        assert!(!out.contains("[c] new user"));
        assert!(out.contains("Could not create user: timeout"));
    }

    #[test]
    fn failure_shows_server_message() {
        let out = View::Failed { message: "database offline".into() }.render();
        assert!(out.contains("Error: database offline"));
    }

    #[test]
    fn empty_state_offers_create() {
        let out = View::Empty { creating: false, create_error: None }.render();
        assert!(out.contains("No users found"));
        assert!(out.contains("[c] new user"));
    }
}

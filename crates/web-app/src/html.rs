//! Standalone HTML page of the dashboard.
//!
//! The page is static. Every action it offers is shown as the `liftlog` command that performs
//! it, the input fields are for display only.

use std::borrow::Cow;

use handlebars::{Handlebars, RenderError};
use liftlog_domain::Trend;
use serde::Serialize;

use crate::{
    Theme,
    dashboard::{Dashboard, EntryForm, ExercisePanel, GroupTab, TableRow},
};

const TEMPLATE: &str = include_str!("templates/dashboard.hbs");

#[must_use]
pub fn status_symbol(trend: Trend) -> &'static str {
    match trend {
        Trend::Up => "▲",
        Trend::Down => "▼",
        Trend::Flat => "=",
        Trend::None => "–",
    }
}

/// Render the dashboard as a standalone HTML page.
pub fn render(
    dashboard: &Dashboard,
    theme: Theme,
    notice: Option<&str>,
) -> Result<String, RenderError> {
    Handlebars::new().render_template(TEMPLATE, &Page::new(dashboard, theme, notice))
}

#[derive(Serialize)]
struct Page<'a> {
    theme: String,
    user: &'a str,
    notice: Option<&'a str>,
    users: Vec<User<'a>>,
    tabs: Vec<Tab<'a>>,
}

#[derive(Serialize)]
struct User<'a> {
    name: &'a str,
    selected: bool,
    command: String,
}

#[derive(Serialize)]
struct Tab<'a> {
    group: &'a str,
    panels: Vec<Panel<'a>>,
    add_exercise: String,
}

#[derive(Serialize)]
struct Panel<'a> {
    exercise: &'a str,
    chart: Option<&'a str>,
    rows: Vec<Row>,
    form: &'a EntryForm,
    add_entry: String,
    remove_exercise: String,
}

#[derive(Serialize)]
struct Row {
    time: String,
    weight: String,
    status: String,
    symbol: &'static str,
}

impl<'a> Page<'a> {
    fn new(dashboard: &'a Dashboard, theme: Theme, notice: Option<&'a str>) -> Self {
        Self {
            theme: theme.to_string(),
            user: &dashboard.user,
            notice,
            users: dashboard
                .users
                .iter()
                .map(|user| User {
                    name: user,
                    selected: *user == dashboard.user,
                    command: command(&["render", "--user", user.as_str()]),
                })
                .collect(),
            tabs: dashboard
                .tabs
                .iter()
                .map(|tab| Tab::new(&dashboard.user, tab))
                .collect(),
        }
    }
}

impl<'a> Tab<'a> {
    fn new(user: &str, tab: &'a GroupTab) -> Self {
        Self {
            group: &tab.group,
            panels: tab
                .panels
                .iter()
                .map(|panel| Panel::new(user, &tab.group, panel))
                .collect(),
            add_exercise: format!("{} NAME", command(&["add-exercise", tab.group.as_str()])),
        }
    }
}

impl<'a> Panel<'a> {
    fn new(user: &str, group: &str, panel: &'a ExercisePanel) -> Self {
        Self {
            exercise: &panel.exercise,
            chart: panel.chart.as_deref(),
            rows: panel.rows.iter().map(Row::from).collect(),
            form: &panel.form,
            add_entry: format!(
                "{} --weight WEIGHT",
                command(&[
                    "add-entry",
                    "--user",
                    user,
                    "--exercise",
                    panel.exercise.as_str(),
                    "--date",
                    panel.form.date.as_str(),
                ])
            ),
            remove_exercise: command(&["remove-exercise", group, panel.exercise.as_str()]),
        }
    }
}

impl From<&TableRow> for Row {
    fn from(row: &TableRow) -> Self {
        Self {
            time: row.time.format("%Y-%m-%d").to_string(),
            weight: row.weight.to_string(),
            status: row.status.to_string(),
            symbol: status_symbol(row.status),
        }
    }
}

/// Command line invoking `liftlog` with the given arguments.
fn command(args: &[&str]) -> String {
    std::iter::once(Cow::Borrowed("liftlog"))
        .chain(args.iter().map(|arg| quote(arg)))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Quote an argument for a POSIX shell if it is not a plain word.
fn quote(arg: &str) -> Cow<'_, str> {
    let plain = !arg.is_empty()
        && arg
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "-_./:@%+,".contains(c));
    if plain {
        Cow::Borrowed(arg)
    } else {
        Cow::Owned(format!("'{}'", arg.replace('\'', r"'\''")))
    }
}

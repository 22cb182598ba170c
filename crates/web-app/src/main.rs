use std::path::Path;

use anyhow::{Context, Result};
use chrono::Local;
use clap::Parser;
use liftlog_domain::{CatalogService, EntryService, Name, Service, Session};
use liftlog_storage::{Gateway, ReqwestSendRequest};
use liftlog_web_app::{
    Settings, chart,
    dashboard::{Dashboard, EntryForm},
    html,
};
use log::{LevelFilter, info};

mod cli;

use cli::{Cli, Command};

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => LevelFilter::Info,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    liftlog_web_app::log::init(level).context("failed to initialize logger")?;

    let settings = Settings::from_env(cli.catalog, cli.theme)?;

    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to start runtime")?
        .block_on(run(cli.command, &settings))
}

async fn run(command: Command, settings: &Settings) -> Result<()> {
    let gateway = Gateway::connect(&settings.store_url, &settings.catalog_path)
        .with_context(|| format!("failed to connect to {}", settings.store_url))?;
    let service = Service::new(gateway);
    let today = Local::now().date_naive();

    match command {
        Command::Render {
            user,
            output,
            width,
        } => {
            let session = Session::new(Name::new(&user)?, &service);
            let page = render(&session, settings, width, None).await?;
            match output {
                Some(path) => write_page(&path, &page)?,
                None => print!("{page}"),
            }
        }
        Command::AddEntry {
            user,
            exercise,
            weight,
            date,
            output,
        } => {
            let session = Session::new(Name::new(&user)?, &service);
            let form = EntryForm {
                weight,
                date: date.unwrap_or_else(|| today.format("%Y-%m-%d").to_string()),
                ..EntryForm::new(&exercise, today)
            };
            let acknowledgment = form.submit(&session).await?;
            println!("{acknowledgment}");
            if let Some(path) = output {
                let page =
                    render(&session, settings, chart::DEFAULT_WIDTH, Some(acknowledgment)).await?;
                write_page(&path, &page)?;
            }
        }
        Command::AddExercise { group, name } => {
            report(
                service.add_exercise(&Name::new(&group)?, &Name::new(&name)?)?,
                "Exercise added!",
                "Exercise already present",
            );
        }
        Command::RemoveExercise { group, name } => {
            report(
                service.remove_exercise(&group, &name)?,
                "Exercise removed!",
                "Exercise not found",
            );
        }
        Command::AddGroup { group } => {
            report(
                service.add_muscle_group(&Name::new(&group)?)?,
                "Muscle group added!",
                "Muscle group already present",
            );
        }
        Command::RemoveGroup { group } => {
            report(
                service.remove_muscle_group(&group)?,
                "Muscle group removed!",
                "Muscle group not found",
            );
        }
        Command::Users => {
            for user in service.get_users().await? {
                println!("{user}");
            }
        }
    }

    Ok(())
}

async fn render(
    session: &Session<'_, Service<Gateway<ReqwestSendRequest>>>,
    settings: &Settings,
    width: u32,
    notice: Option<&str>,
) -> Result<String> {
    let dashboard =
        Dashboard::load(session, settings.theme, width, Local::now().date_naive()).await?;
    Ok(html::render(&dashboard, settings.theme, notice)?)
}

fn write_page(path: &Path, page: &str) -> Result<()> {
    std::fs::write(path, page).with_context(|| format!("failed to write {}", path.display()))?;
    info!("wrote dashboard to {}", path.display());
    Ok(())
}

fn report(changed: bool, changed_message: &str, unchanged_message: &str) {
    if changed {
        println!("{changed_message}");
    } else {
        println!("{unchanged_message}");
    }
}

//! Music center registration page - command-line entry point.

mod config;
mod error;
mod render;

use crate::config::Config;
use crate::error::{AppError, AppResult};
use anyhow::Context;
use clap::builder::PossibleValuesParser;
use clap::{Args, Parser, Subcommand};
use registration_client::{
    AdminMode, FormField, RegistrationClient, RegistrationPage, COURSES, GRADES,
};
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "music-registration")]
#[command(about = "Music Center student registration")]
struct Cli {
    /// Page URL; `?admin=1` shows the registered students list
    #[arg(long, global = true)]
    page_url: Option<String>,

    /// Backend root URL, overriding BACKEND__URL
    #[arg(long, global = true)]
    backend: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Submit a registration
    Register(RegisterArgs),
    /// Show registered students (admin mode only)
    List,
    /// Show the course and grade choices
    Options,
}

#[derive(Args, Debug)]
struct RegisterArgs {
    #[arg(long)]
    student_name: Option<String>,
    #[arg(long)]
    parent_name: Option<String>,
    #[arg(long)]
    email: Option<String>,
    #[arg(long)]
    phone: Option<String>,
    #[arg(long, value_parser = PossibleValuesParser::new(COURSES))]
    course: Option<String>,
    #[arg(long, value_parser = PossibleValuesParser::new(GRADES))]
    grade: Option<String>,
    #[arg(long)]
    experience_years: Option<String>,
    /// Set a form field by input name, e.g. `--field parent_name="Jane Rivera"`
    #[arg(long = "field", value_name = "NAME=VALUE", value_parser = parse_assignment)]
    fields: Vec<(String, String)>,
}

impl RegisterArgs {
    fn apply(&self, page: &mut RegistrationPage) -> AppResult<()> {
        let named = [
            (FormField::StudentName, &self.student_name),
            (FormField::ParentName, &self.parent_name),
            (FormField::Email, &self.email),
            (FormField::Phone, &self.phone),
            (FormField::Course, &self.course),
            (FormField::Grade, &self.grade),
            (FormField::ExperienceYears, &self.experience_years),
        ];

        for (field, value) in named {
            if let Some(value) = value {
                page.update_field(field, value.as_str());
            }
        }

        for (name, value) in &self.fields {
            let field: FormField = name.parse()?;
            check_choice(field, value)?;
            page.update_field(field, value.as_str());
        }

        Ok(())
    }
}

/// Course and grade are select inputs. An empty value clears them.
fn check_choice(field: FormField, value: &str) -> AppResult<()> {
    let choices: &[&str] = match field {
        FormField::Course => &COURSES,
        FormField::Grade => &GRADES,
        _ => return Ok(()),
    };

    if value.is_empty() || choices.contains(&value) {
        Ok(())
    } else {
        Err(AppError::InvalidChoice {
            field,
            value: value.to_string(),
            choices: choices.join(", "),
        })
    }
}

fn parse_assignment(raw: &str) -> Result<(String, String), String> {
    raw.split_once('=')
        .map(|(name, value)| (name.trim().to_string(), value.to_string()))
        .ok_or_else(|| format!("expected NAME=VALUE, got `{}`", raw))
}

#[tokio::main]
async fn main() -> AppResult<ExitCode> {
    let cli = Cli::parse();

    // Load configuration
    let config = Config::load().context("Failed to load configuration")?;

    // Initialize logging
    init_logging(&config.log.level);

    let client_config = config.client_config(cli.backend.as_deref());
    if client_config.api_base.is_empty() {
        warn!("No backend URL configured - requests use same-origin relative paths");
    }
    info!("Students endpoint: {}", client_config.students_url());

    let client = Arc::new(RegistrationClient::new(client_config)?);

    let admin = cli
        .page_url
        .as_deref()
        .map(AdminMode::from_page_url)
        .unwrap_or_default();

    let mut page = RegistrationPage::new(client, admin);

    match &cli.command {
        Command::Options => {
            print!("{}", render::options());
            return Ok(ExitCode::SUCCESS);
        }
        Command::List => {
            if !admin.is_on() {
                eprintln!("The student list is only shown in admin mode (page URL with ?admin=1).");
                return Ok(ExitCode::FAILURE);
            }
            page.mount().await;
        }
        Command::Register(args) => {
            page.mount().await;
            args.apply(&mut page)?;
            page.submit().await;
        }
    }

    let banner = render::banner(page.feedback());
    if !banner.is_empty() {
        println!("{}", banner);
    }

    if let Some(students) = page.students() {
        println!("{}", render::students(students.state()));
    }

    if page.feedback().is_error() {
        Ok(ExitCode::FAILURE)
    } else {
        Ok(ExitCode::SUCCESS)
    }
}

fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

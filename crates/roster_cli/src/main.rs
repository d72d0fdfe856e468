//! `roster` command-line front end.
//!
//! Every subcommand is one short session: open storage, build the table,
//! replay the matching UI events against the controller, print the result.

use anyhow::{bail, Context, Result};
use clap::Parser;
use dialoguer::Confirm;
use log::info;
use roster_core::db::open_db;
use roster_core::view::frame::Frame;
use roster_core::view::table::render_table;
use roster_core::{
    init_logging, Avatar, Controller, KvPersonRepository, NotificationKind, PersonField,
    PersonRepository, PersonStore, SqliteKeyValueStore, UiEvent, LOADING_DELAY,
};
use std::time::Instant;

mod commands;
mod config;

use commands::{Args, Commands};
use config::RosterConfig;

fn main() -> Result<()> {
    let args = Args::parse();
    let Some(command) = args.command.as_ref() else {
        println!("Run with --help to see instructions");
        return Ok(());
    };

    if let Commands::Avatars = command {
        for avatar in Avatar::SELECTABLE {
            println!("{:<16} {} {}", avatar.key(), avatar.glyph(), avatar.label());
        }
        return Ok(());
    }

    let config = RosterConfig::resolve(&args)?;
    init_logging(
        config.log_level.as_str(),
        &config.log_dir.to_string_lossy(),
    )
    .context("could not initialize logging")?;
    info!(
        "event=cli_command module=cli name={} core_version={}",
        command.name(),
        roster_core::core_version()
    );

    let conn = open_db(&config.db_path)
        .with_context(|| format!("could not open {}", config.db_path.display()))?;
    let kv = SqliteKeyValueStore::try_new(&conn).context("database is not usable")?;
    let (store, warning) = PersonStore::open(KvPersonRepository::new(kv));

    let now = Instant::now();
    let mut controller = Controller::new(store, warning, now);
    if let Some(banner) = controller.notification() {
        eprintln!("{banner}");
    }

    controller.handle(UiEvent::BuildTable, now);
    let loaded = controller.tick(now + LOADING_DELAY);

    run(command, &mut controller, loaded)
}

fn run<R: PersonRepository>(
    command: &Commands,
    controller: &mut Controller<R>,
    loaded: Frame,
) -> Result<()> {
    let now = Instant::now();
    match command {
        Commands::List => print!("{loaded}"),
        Commands::Show { id } => {
            let Some(person) = controller.store().find_by_id(*id) else {
                bail!("Person {id} nicht gefunden");
            };
            println!("{}", render_table(std::slice::from_ref(person)).to_text());
        }
        Commands::Add {
            first_name,
            last_name,
            birth_date,
            avatar,
        } => {
            controller.handle(UiEvent::OpenCreateForm, now);
            for (field, value) in [
                (PersonField::FirstName, first_name),
                (PersonField::LastName, last_name),
                (PersonField::BirthDate, birth_date),
                (PersonField::Avatar, avatar),
            ] {
                controller.handle(UiEvent::EditField(field, value.clone()), now);
            }
            report(&controller.handle(UiEvent::SubmitForm, now))?;
        }
        Commands::Edit {
            id,
            first_name,
            last_name,
            birth_date,
            avatar,
        } => {
            let frame = controller.handle(UiEvent::OpenEditForm(*id), now);
            if frame.form.is_none() {
                bail!("Person {id} nicht gefunden");
            }
            for (field, value) in [
                (PersonField::FirstName, first_name),
                (PersonField::LastName, last_name),
                (PersonField::BirthDate, birth_date),
                (PersonField::Avatar, avatar),
            ] {
                if let Some(value) = value {
                    controller.handle(UiEvent::EditField(field, value.clone()), now);
                }
            }
            report(&controller.handle(UiEvent::SubmitForm, now))?;
        }
        Commands::Remove { id, yes } => {
            let frame = controller.handle(UiEvent::RequestDelete(*id), now);
            let Some(prompt) = frame.confirmation else {
                bail!("Person {id} nicht gefunden");
            };
            let confirmed = *yes
                || Confirm::new()
                    .with_prompt(prompt)
                    .default(false)
                    .interact()
                    .context("could not read confirmation")?;
            if confirmed {
                report(&controller.handle(UiEvent::ConfirmDelete, now))?;
            } else {
                controller.handle(UiEvent::CancelDelete, now);
                println!("Abgebrochen");
            }
        }
        Commands::Avatars => {}
    }
    Ok(())
}

/// Prints the outcome banner; error banners become the process error.
fn report(frame: &Frame) -> Result<()> {
    match &frame.notification {
        Some(banner) if banner.kind == NotificationKind::Error => bail!("{}", banner.message),
        Some(banner) => println!("{banner}"),
        None => {}
    }
    if frame.form.is_some() {
        bail!("form was not submitted");
    }
    Ok(())
}

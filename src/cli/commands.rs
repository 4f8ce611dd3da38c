//! Execution of the commands that talk to the pet service or local state.
//!
//! Output goes to any [`Write`] so the same code serves the terminal and the
//! tests.

use color_eyre::eyre::{eyre, Result, WrapErr};
use std::io::Write;
use std::sync::Arc;
use tracing::debug;

use super::args::{CliCommand, ThemeCommand};
use crate::api::PetClient;
use crate::models::UpdatePet;
use crate::state::{FavoritesStore, ThemeStore};
use crate::traits::HttpClient;
use crate::view_model::{
    AddPetViewModel, LoadState, PetDetailViewModel, PetDetails, PetFilter, PetListItem,
    PetListViewModel,
};

/// Everything a command may need, built once in `main`.
pub struct CliContext<C: HttpClient> {
    pub client: Arc<PetClient<C>>,
    pub favorites: FavoritesStore,
    pub theme: ThemeStore,
}

impl<C: HttpClient> CliContext<C> {
    pub fn new(client: PetClient<C>, theme: ThemeStore) -> Self {
        Self {
            client: Arc::new(client),
            favorites: FavoritesStore::new(),
            theme,
        }
    }
}

/// Run one command, writing its output to `out`.
///
/// `Version` and `Help` are handled by [`run_cli_command`](super::run_cli_command)
/// and are no-ops here.
pub async fn execute<C, W>(ctx: &CliContext<C>, command: CliCommand, out: &mut W) -> Result<()>
where
    C: HttpClient,
    W: Write,
{
    debug!(?command, "executing command");
    match command {
        CliCommand::Version | CliCommand::Help => Ok(()),
        CliCommand::List { filter, favorites } => list(ctx, &filter, &favorites, out).await,
        CliCommand::Show { id } => show(ctx, &id, out).await,
        CliCommand::Add(form) => {
            let vm = AddPetViewModel::new(Arc::clone(&ctx.client));
            let pet = vm.submit(&form).await.map_err(|message| eyre!(message))?;
            writeln!(out, "{}", AddPetViewModel::<C>::success_message(&form))?;
            writeln!(out, "id: {}", pet.id)?;
            Ok(())
        }
        CliCommand::Rename { id, name } => {
            let changes = UpdatePet {
                name: Some(name),
                ..Default::default()
            };
            let pet = ctx.client.update_pet(&id, &changes).await?;
            writeln!(out, "Renamed {} to {}", pet.id, pet.name)?;
            Ok(())
        }
        CliCommand::Theme(theme) => {
            let pending = match theme {
                ThemeCommand::Show => None,
                ThemeCommand::Set(mode) => ctx.theme.set_mode(mode),
                ThemeCommand::Toggle => ctx.theme.toggle(),
            };
            // The process exits right after, so wait for the write here.
            if let Some(handle) = pending {
                handle.await.wrap_err("theme persistence task failed")?;
            }
            write_theme(&ctx.theme, out)
        }
    }
}

async fn list<C, W>(
    ctx: &CliContext<C>,
    filter: &PetFilter,
    favorites: &[String],
    out: &mut W,
) -> Result<()>
where
    C: HttpClient,
    W: Write,
{
    let vm = PetListViewModel::new(Arc::clone(&ctx.client), ctx.favorites.clone());
    for id in favorites {
        ctx.favorites.add(id);
    }

    vm.load().await;
    if let LoadState::Failed(message) = vm.state() {
        return Err(eyre!(message));
    }

    let items = vm.filtered_items(filter);
    if items.is_empty() {
        writeln!(out, "No pets found")?;
        return Ok(());
    }
    for item in &items {
        writeln!(out, "{}", list_row(item))?;
    }
    Ok(())
}

async fn show<C, W>(ctx: &CliContext<C>, id: &str, out: &mut W) -> Result<()>
where
    C: HttpClient,
    W: Write,
{
    let vm = PetDetailViewModel::new(Arc::clone(&ctx.client));
    vm.load(id).await;

    match vm.state() {
        LoadState::Ready(details) => write_details(&details, out),
        LoadState::Failed(message) => Err(eyre!(message)),
        other => Err(eyre!("pet detail did not settle ({})", other.label())),
    }
}

fn list_row(item: &PetListItem) -> String {
    let star = if item.is_favorite { "*" } else { " " };
    format!(
        "{} {:<6} {:<16} {}",
        star, item.pet.id, item.pet.name, item.type_label
    )
}

fn write_details<W: Write>(details: &PetDetails, out: &mut W) -> Result<()> {
    writeln!(out, "{}", details.title())?;
    for (label, value) in details.rows() {
        writeln!(out, "  {:<20} {}", label, value)?;
    }
    Ok(())
}

fn write_theme<W: Write>(theme: &ThemeStore, out: &mut W) -> Result<()> {
    let palette = theme.palette();
    writeln!(
        out,
        "mode: {} (showing {}, background {}, text {})",
        theme.mode(),
        theme.resolved().as_str(),
        palette.background,
        palette.text
    )?;
    Ok(())
}

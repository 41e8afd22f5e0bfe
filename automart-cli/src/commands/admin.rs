//! Moderation commands. Every command requires an admin session.

use anyhow::Result;
use clap::Subcommand;
use shared::models::RecordId;
use tracing::debug;

use super::{
    cars::{format_price, summary_line},
    failed_to, failure, guard_admin,
    prompt::confirm,
};
use crate::{context::AppContext, toast::show_success};

/// `automart admin` subcommands.
#[derive(Subcommand, Debug)]
pub enum AdminCommand {
    /// Every listing on the marketplace, sold ones included
    Cars,
    /// Remove a listing
    Delete {
        /// Listing id
        id: RecordId,
        /// Skip the confirmation prompt
        #[arg(long, short)]
        yes: bool,
    },
}

/// Dispatch an `admin` subcommand.
pub async fn run(ctx: &AppContext, command: AdminCommand) -> Result<()> {
    guard_admin(&ctx.session)?;
    match command {
        AdminCommand::Cars => list(ctx).await,
        AdminCommand::Delete { id, yes } => delete(ctx, &id, yes).await,
    }
}

async fn list(ctx: &AppContext) -> Result<()> {
    let cars = ctx
        .api()
        .car()
        .list_admin()
        .await
        .map_err(|err| failed_to(err, "Failed to load car listings"))?;

    let total: f64 = cars.iter().map(|car| car.price).sum();
    for car in &cars {
        let owner = car.owner_email.as_deref().unwrap_or("-");
        println!("{}  {owner}", summary_line(car));
    }
    println!("{} listings, {} total value", cars.len(), format_price(total));
    Ok(())
}

async fn delete(ctx: &AppContext, id: &RecordId, yes: bool) -> Result<()> {
    const DELETE_FAILED: &str = "Failed to delete car listing";

    let name = match ctx.api().car().get(id).await {
        Ok(car) => car.title(),
        Err(err) => {
            debug!(error = %err, "could not load listing name");
            format!("car {id}")
        }
    };

    let question = format!(
        "Are you sure you want to delete the {name} listing? This action cannot be undone."
    );
    if !yes && !confirm(&question)? {
        println!("Nothing deleted.");
        return Ok(());
    }

    ctx.api()
        .car()
        .delete(id)
        .await
        .map_err(|err| failure(err, DELETE_FAILED))?;
    show_success(&format!("{name} has been deleted successfully"));
    Ok(())
}

//! Offers and reports on someone else's listing.

use anyhow::Result;
use clap::{Args, Subcommand};
use client::validation;
use shared::models::{CreateFlagRequest, CreateOrderRequest, RecordId};

use super::{failure, guard_auth, prompt::value_or_prompt};
use crate::{context::AppContext, toast::show_success};

const OFFER_FAILED: &str = "Failed to submit offer";
const INVALID_OFFER: &str = "Please enter a valid offer amount";

/// `automart offer` subcommands.
#[derive(Subcommand, Debug)]
pub enum OfferCommand {
    /// Make an offer on a car
    Create {
        /// Listing id
        car_id: RecordId,
        /// Amount offered
        amount: f64,
    },
    /// Change the amount of an offer you already made
    Update {
        /// Order id printed when the offer was made
        order_id: RecordId,
        /// New amount
        amount: f64,
    },
}

/// Arguments of `automart flag`.
#[derive(Args, Debug)]
pub struct FlagArgs {
    /// Listing id
    pub car_id: RecordId,
    /// Why the listing is being reported, e.g. `pricing` or `fraud`
    #[arg(long)]
    pub reason: Option<String>,
    /// Optional details for the moderators
    #[arg(long)]
    pub description: Option<String>,
}

/// Dispatch an `offer` subcommand.
pub async fn run(ctx: &AppContext, command: OfferCommand) -> Result<()> {
    guard_auth(&ctx.session)?;
    match command {
        OfferCommand::Create { car_id, amount } => {
            let amount = validation::positive_amount(amount, INVALID_OFFER)?;
            let order = ctx
                .api()
                .order()
                .create(&CreateOrderRequest { car_id, amount })
                .await
                .map_err(|err| failure(err, OFFER_FAILED))?;
            show_success(&format!("Offer submitted successfully! (order {})", order.id));
        }
        OfferCommand::Update { order_id, amount } => {
            let amount = validation::positive_amount(amount, INVALID_OFFER)?;
            ctx.api()
                .order()
                .update_price(&order_id, amount)
                .await
                .map_err(|err| failure(err, OFFER_FAILED))?;
            show_success("Offer updated successfully!");
        }
    }
    Ok(())
}

/// Report a listing to the moderators.
pub async fn flag(ctx: &AppContext, args: FlagArgs) -> Result<()> {
    guard_auth(&ctx.session)?;

    let reason = value_or_prompt(args.reason, "Reason: ")?;
    validation::require_filled(&[reason.as_str()], "Please select a reason for reporting")?;

    let request = CreateFlagRequest {
        car_id: args.car_id,
        reason,
        description: args.description.unwrap_or_default(),
    };
    ctx.api()
        .flag()
        .create(&request)
        .await
        .map_err(|err| failure(err, "Failed to submit report"))?;
    show_success("Report submitted successfully!");
    Ok(())
}

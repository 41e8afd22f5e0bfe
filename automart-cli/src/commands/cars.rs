//! Browsing, listing and editing cars.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Subcommand};
use client::{Destination, api::Photo, validation::{self, ValidationError}};
use shared::models::{Car, CarQuery, CarStatus, NewCar, RecordId};
use tracing::{debug, warn};

use super::{failed_to, failure, guard_auth, prompt::read_photo};
use crate::{context::AppContext, toast::show_success};

/// `automart cars` subcommands.
#[derive(Subcommand, Debug)]
pub enum CarsCommand {
    /// Browse listings, optionally filtered
    List(ListArgs),
    /// Show one listing in full
    Show {
        /// Listing id
        id: RecordId,
    },
    /// Put a car up for sale
    Create(CreateArgs),
    /// Your own listings
    Mine,
    /// Change the price or status of one of your listings
    Edit(EditArgs),
}

/// Filters of `automart cars list`.
#[derive(Args, Debug)]
pub struct ListArgs {
    /// Manufacturer, e.g. Toyota
    #[arg(long)]
    pub make: Option<String>,
    /// Body style, e.g. sedan
    #[arg(long)]
    pub body_type: Option<String>,
    /// `new` or `used`
    #[arg(long)]
    pub state: Option<String>,
    /// Upper price bound; values above 100,000,000 mean no limit
    #[arg(long)]
    pub max_price: Option<u64>,
    /// Page to show, starting at 1
    #[arg(long)]
    pub page: Option<u32>,
    /// Listings per page
    #[arg(long)]
    pub limit: Option<u32>,
}

/// Fields of a new listing.
#[derive(Args, Debug)]
pub struct CreateArgs {
    /// Manufacturer
    #[arg(long)]
    pub make: Option<String>,
    /// Model name
    #[arg(long)]
    pub model: Option<String>,
    /// Asking price
    #[arg(long)]
    pub price: Option<String>,
    /// City or area
    #[arg(long)]
    pub location: Option<String>,
    /// `new` or `used`
    #[arg(long)]
    pub state: Option<String>,
    /// Body style
    #[arg(long)]
    pub body_type: Option<String>,
    /// What buyers should know
    #[arg(long)]
    pub description: Option<String>,
    /// JPEG or PNG file; repeat for up to five photos
    #[arg(long = "photo")]
    pub photos: Vec<PathBuf>,
    /// Index of the cover photo among `--photo` values
    #[arg(long, default_value_t = 0)]
    pub main_photo: usize,
}

/// Changes to one of your listings.
#[derive(Args, Debug)]
pub struct EditArgs {
    /// Listing id
    pub id: RecordId,
    /// New asking price
    #[arg(long)]
    pub price: Option<f64>,
    /// `available` or `sold`
    #[arg(long)]
    pub status: Option<String>,
}

/// Dispatch a `cars` subcommand.
pub async fn run(ctx: &AppContext, command: CarsCommand) -> Result<()> {
    match command {
        CarsCommand::List(args) => list(ctx, args).await,
        CarsCommand::Show { id } => show(ctx, &id).await,
        CarsCommand::Create(args) => create(ctx, args).await,
        CarsCommand::Mine => mine(ctx).await,
        CarsCommand::Edit(args) => edit(ctx, args).await,
    }
}

async fn list(ctx: &AppContext, args: ListArgs) -> Result<()> {
    let query = CarQuery {
        make: args.make,
        body_type: args.body_type,
        state: args.state,
        max_price: None,
        page: args.page,
        limit: args.limit,
    }
    .with_max_price(args.max_price);

    let page = ctx
        .api()
        .car()
        .list(&query)
        .await
        .map_err(|err| failed_to(err, "Failed to load cars"))?;

    if page.cars().is_empty() {
        println!("No cars match your filters.");
        return Ok(());
    }
    for car in page.cars() {
        println!("{}", summary_line(car));
    }
    if let (Some(current), Some(total)) = (page.page, page.total_pages) {
        println!("page {current} of {total} ({} cars)", page.total_cars);
    }
    Ok(())
}

async fn show(ctx: &AppContext, id: &RecordId) -> Result<()> {
    let car = ctx
        .api()
        .car()
        .get(id)
        .await
        .map_err(|err| failed_to(err, "Failed to load car details"))?;

    println!("{} ({})", car.title(), car.status);
    println!("price:     {}", format_price(car.price));
    println!("location:  {}", car.location);
    println!("condition: {}", car.state);
    println!("body type: {}", car.body_type);
    if let Some(image) = car.main_image() {
        println!("photo:     {image}");
    }
    if !car.description.is_empty() {
        println!("\n{}", car.description);
    }

    if ctx.session.is_logged_in() {
        match ctx.api().car().user_actions(id).await {
            Ok(actions) => {
                if actions.has_ordered {
                    println!("\nYou have made an offer on this car.");
                }
                if actions.has_flagged {
                    println!("You have reported this listing.");
                }
            }
            Err(err) => warn!(error = %err, "failed to load your actions for this car"),
        }
    }
    Ok(())
}

async fn create(ctx: &AppContext, args: CreateArgs) -> Result<()> {
    guard_auth(&ctx.session)?;

    let car = new_car(&args)?;
    validation::photo_count(args.photos.len())?;
    if car.main_photo_index >= args.photos.len() {
        let message = "Please choose one of your photos as the main photo";
        return Err(ValidationError::new(message).into());
    }
    let mut photos = Vec::with_capacity(args.photos.len());
    for path in &args.photos {
        let (name, bytes) = read_photo(path)?;
        photos.push(Photo::new(name, bytes)?);
    }

    let _guard = ctx.session.begin("create-car").map_err(|err| failure(err, CREATE_FAILED))?;
    debug!(photos = photos.len(), "submitting listing");
    ctx.api()
        .car()
        .create(&car, photos)
        .await
        .map_err(|err| failure(err, CREATE_FAILED))?;

    show_success("Car listing created successfully!");
    ctx.session.navigator().redirect(Destination::MyListings);
    Ok(())
}

const CREATE_FAILED: &str = "Failed to create car listing. Please try again.";

fn new_car(args: &CreateArgs) -> Result<NewCar, ValidationError> {
    let field = |value: &Option<String>| value.as_deref().unwrap_or_default().trim().to_string();
    let car = NewCar {
        make: field(&args.make),
        model: field(&args.model),
        price: 0.0,
        location: field(&args.location),
        state: field(&args.state),
        body_type: field(&args.body_type),
        description: field(&args.description),
        main_photo_index: args.main_photo,
    };
    let price = field(&args.price);
    validation::require_filled(
        &[
            car.make.as_str(),
            car.model.as_str(),
            car.location.as_str(),
            car.body_type.as_str(),
            price.as_str(),
            car.state.as_str(),
            car.description.as_str(),
        ],
        "Please fill in all required fields",
    )?;

    let price = price.parse::<f64>().unwrap_or(0.0);
    let price = validation::positive_amount(price, "Price must be a positive number.")?;
    Ok(NewCar { price, ..car })
}

async fn mine(ctx: &AppContext) -> Result<()> {
    guard_auth(&ctx.session)?;
    let cars = ctx
        .api()
        .car()
        .list_mine()
        .await
        .map_err(|err| failed_to(err, "Failed to load your listings"))?;

    if cars.is_empty() {
        println!("You have no listings yet. Add one with `automart cars create`.");
    }
    for car in &cars {
        println!("{}", summary_line(car));
    }
    Ok(())
}

async fn edit(ctx: &AppContext, args: EditArgs) -> Result<()> {
    const SAVE_FAILED: &str = "Failed to save changes";

    guard_auth(&ctx.session)?;
    let cars = ctx
        .api()
        .car()
        .list_mine()
        .await
        .map_err(|err| failed_to(err, "Failed to load your listings"))?;
    let car = own_listing(cars, &args.id).ok_or_else(|| ValidationError::new("Car not found"))?;

    let price = validation::positive_amount(
        args.price.unwrap_or(car.price),
        "Please enter a valid price",
    )?;
    let status = match args.status.as_deref() {
        Some(status) => status.parse::<CarStatus>().map_err(ValidationError::new)?,
        None => car.status.clone(),
    };

    let price_changed = (price - car.price).abs() > f64::EPSILON;
    let status_changed = status != car.status;
    if !price_changed && !status_changed {
        println!("Nothing to change.");
        return Ok(());
    }

    let api = ctx.api().car();
    if price_changed {
        api.update_price(&car.id, price)
            .await
            .map_err(|err| failure(err, SAVE_FAILED))?;
    }
    if status_changed {
        api.update_status(&car.id, status)
            .await
            .map_err(|err| failure(err, SAVE_FAILED))?;
    }
    show_success("Changes saved successfully!");
    Ok(())
}

/// Ids typed on the command line parse as numbers even when the server
/// sends them as strings; [`RecordId`] equality covers both.
fn own_listing(cars: Vec<Car>, id: &RecordId) -> Option<Car> {
    cars.into_iter().find(|car| car.id == *id)
}

pub(crate) fn summary_line(car: &Car) -> String {
    format!(
        "#{:<6} {:<28} {:>16}  {:<9} {}",
        car.id,
        car.title(),
        format_price(car.price),
        car.status,
        car.location
    )
}

/// Naira amount with thousands separators; whole amounts drop the kobo.
pub(crate) fn format_price(price: f64) -> String {
    let fixed = format!("{:.2}", price.abs());
    let (whole, kobo) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (index, digit) in whole.chars().enumerate() {
        if index > 0 && (whole.len() - index).is_multiple_of(3) {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if price < 0.0 { "-" } else { "" };
    if kobo == "00" {
        format!("{sign}₦{grouped}")
    } else {
        format!("{sign}₦{grouped}.{kobo}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prices_are_grouped_by_thousands() {
        assert_eq!(format_price(0.0), "₦0");
        assert_eq!(format_price(950.0), "₦950");
        assert_eq!(format_price(5_000_000.0), "₦5,000,000");
        assert_eq!(format_price(1234.5), "₦1,234.50");
    }

    fn create_args() -> CreateArgs {
        CreateArgs {
            make: Some("Toyota".into()),
            model: Some("Corolla".into()),
            price: Some("2500000".into()),
            location: Some("Lagos".into()),
            state: Some("used".into()),
            body_type: Some("sedan".into()),
            description: Some("One owner".into()),
            photos: vec![PathBuf::from("front.jpg")],
            main_photo: 0,
        }
    }

    #[test]
    fn new_car_requires_every_field() {
        let args = CreateArgs {
            location: None,
            ..create_args()
        };
        assert_eq!(
            new_car(&args).unwrap_err().message(),
            "Please fill in all required fields"
        );
    }

    #[test]
    fn new_car_rejects_non_positive_price() {
        for price in ["0", "-10", "abc"] {
            let args = CreateArgs {
                price: Some(price.into()),
                ..create_args()
            };
            assert_eq!(
                new_car(&args).unwrap_err().message(),
                "Price must be a positive number."
            );
        }
    }

    #[test]
    fn own_listing_matches_string_ids_from_server() {
        let cars: Vec<Car> = serde_json::from_value(serde_json::json!([
            { "id": "6", "make": "Kia", "model": "Rio", "price": 1 },
            { "id": "7", "make": "Kia", "model": "Soul", "price": "2" },
        ]))
        .unwrap();
        let typed: RecordId = "7".parse().unwrap();

        let car = own_listing(cars.clone(), &typed).expect("listing by typed id");
        assert_eq!(car.model, "Soul");
        assert!(own_listing(cars, &RecordId::Number(9)).is_none());
    }

    #[test]
    fn new_car_parses_price() {
        let car = new_car(&create_args()).unwrap();
        assert!((car.price - 2_500_000.0).abs() < f64::EPSILON);
        assert_eq!(car.make, "Toyota");
    }
}

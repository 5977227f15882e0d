use std::num::NonZeroU32;

use clap::{Args, Subcommand};
use jiff::civil::Date;
use platter_app::{
    context::CartContext,
    domain::{
        carts::{
            CartSummary,
            models::{CartItemId, CartLineItem, NewCartLineItem, PackageRef, PackageSnapshot},
        },
        events::models::EventDetails,
    },
};

use super::or_dash;

#[derive(Debug, Args)]
pub(crate) struct CartCommand {
    #[command(subcommand)]
    command: CartSubcommand,
}

#[derive(Debug, Subcommand)]
enum CartSubcommand {
    /// List cart items and totals
    List,

    /// Add a package to the cart, or update it if already present
    Add(AddItemArgs),

    /// Change the guest count of a cart item
    Guests(GuestsArgs),

    /// Remove a cart item
    Remove(RemoveArgs),

    /// Remove every cart item
    Clear,
}

#[derive(Debug, Args)]
struct AddItemArgs {
    /// Remote package id, or a staged custom package id
    #[arg(long)]
    package: PackageRef,

    /// Package display name
    #[arg(long, default_value = "")]
    name: String,

    /// Number of guests
    #[arg(long)]
    guests: NonZeroU32,

    /// Price per guest in minor units
    #[arg(long)]
    price_per_person: Option<u64>,

    /// Flat package price in minor units
    #[arg(long)]
    total_price: Option<u64>,

    /// Price for this item in minor units; computed from the package when omitted
    #[arg(long)]
    price: Option<u64>,

    /// Number of people the package is designed for
    #[arg(long)]
    people_count: Option<u32>,

    #[arg(long)]
    currency: Option<String>,

    #[arg(long)]
    cover_image: Option<String>,

    #[arg(long)]
    caterer_id: Option<String>,

    #[arg(long)]
    caterer_name: Option<String>,

    #[command(flatten)]
    event: EventArgs,
}

#[derive(Debug, Args)]
struct EventArgs {
    /// Event date (YYYY-MM-DD)
    #[arg(long)]
    event_date: Option<Date>,

    #[arg(long)]
    event_time: Option<String>,

    /// Occasion, e.g. wedding
    #[arg(long)]
    event_type: Option<String>,

    /// Delivery area
    #[arg(long)]
    area: Option<String>,
}

impl From<EventArgs> for EventDetails {
    fn from(args: EventArgs) -> Self {
        Self {
            event_date: args.event_date,
            event_time: args.event_time,
            event_type: args.event_type,
            area: args.area,
        }
    }
}

#[derive(Debug, Args)]
struct GuestsArgs {
    /// Local cart item id
    id: CartItemId,

    /// New number of guests
    guests: NonZeroU32,

    /// New price in minor units; recomputed from the package snapshot when omitted
    #[arg(long)]
    price: Option<u64>,
}

#[derive(Debug, Args)]
struct RemoveArgs {
    /// Local cart item id
    id: CartItemId,
}

pub(crate) fn run(context: &CartContext, command: CartCommand) -> Result<(), String> {
    match command.command {
        CartSubcommand::List => {
            list(context);

            Ok(())
        }
        CartSubcommand::Add(args) => add(context, args),
        CartSubcommand::Guests(args) => update_guests(context, args),
        CartSubcommand::Remove(args) => {
            let removed = context
                .items
                .remove(&args.id)
                .map_err(|error| format!("failed to remove cart item: {error}"))?;

            if removed {
                println!("removed {}", args.id);
            } else {
                println!("no cart item {}", args.id);
            }

            Ok(())
        }
        CartSubcommand::Clear => {
            context
                .items
                .clear()
                .map_err(|error| format!("failed to clear cart: {error}"))?;

            println!("cart cleared");

            Ok(())
        }
    }
}

fn list(context: &CartContext) {
    let items = context.items.list();

    if items.is_empty() {
        println!("cart is empty");
        return;
    }

    for item in &items {
        print_item(item);
        println!();
    }

    let CartSummary {
        item_count,
        guest_count,
        total,
        currency,
    } = CartSummary::from_items(&items);

    println!("items: {item_count}");
    println!("guests: {guest_count}");
    println!("total: {total} {}", currency.unwrap_or_default());
}

fn add(context: &CartContext, args: AddItemArgs) -> Result<(), String> {
    let package_snapshot = PackageSnapshot {
        name: args.name,
        people_count: args.people_count,
        total_price: args.total_price,
        price_per_person: args.price_per_person,
        currency: args.currency,
        cover_image: args.cover_image,
        caterer_id: args.caterer_id,
        caterer_name: args.caterer_name,
    };

    let price_at_time = args
        .price
        .unwrap_or_else(|| package_snapshot.price_for(args.guests));

    let item = context
        .items
        .upsert(NewCartLineItem {
            package_ref: args.package,
            package_snapshot,
            guests: args.guests,
            price_at_time,
            event: args.event.into(),
        })
        .map_err(|error| format!("failed to add cart item: {error}"))?;

    print_item(&item);

    Ok(())
}

fn update_guests(context: &CartContext, args: GuestsArgs) -> Result<(), String> {
    let Some(item) = context.items.get(&args.id) else {
        return Err(format!("no cart item {}", args.id));
    };

    let price_at_time = args
        .price
        .unwrap_or_else(|| item.package_snapshot.price_for(args.guests));

    let updated = context
        .items
        .update_guests(&args.id, args.guests, price_at_time)
        .map_err(|error| format!("failed to update cart item: {error}"))?
        .ok_or_else(|| format!("no cart item {}", args.id))?;

    print_item(&updated);

    Ok(())
}

fn print_item(item: &CartLineItem) {
    let date = item.event_date.map(|date| date.to_string());
    let currency = item.package_snapshot.currency.as_deref().unwrap_or_default();

    println!("id: {}", item.id);
    println!("package: {} ({})", item.package_ref, item.package_snapshot.name);
    println!("caterer: {}", or_dash(item.package_snapshot.caterer_name.as_deref()));
    println!("guests: {}", item.guests);
    println!("price: {} {currency}", item.price_at_time);
    println!("event_date: {}", or_dash(date.as_deref()));
    println!("event_time: {}", or_dash(item.event_time.as_deref()));
    println!("event_type: {}", or_dash(item.event_type.as_deref()));
    println!("area: {}", or_dash(item.area.as_deref()));
    println!("updated_at: {}", item.updated_at);
}

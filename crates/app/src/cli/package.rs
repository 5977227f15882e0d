use std::num::NonZeroU32;

use clap::{Args, Subcommand};
use platter_app::{context::CartContext, domain::packages::models::DishId};

#[derive(Debug, Args)]
pub(crate) struct PackageCommand {
    #[command(subcommand)]
    command: PackageSubcommand,
}

#[derive(Debug, Subcommand)]
enum PackageSubcommand {
    /// Stage a custom package made of the given dishes
    Add(AddPackageArgs),

    /// List staged custom packages
    List,
}

#[derive(Debug, Args)]
struct AddPackageArgs {
    /// Dish identifier; repeat for each dish
    #[arg(long = "dish", required = true)]
    dishes: Vec<String>,

    /// Number of people the package serves
    #[arg(long)]
    people: NonZeroU32,
}

pub(crate) fn run(context: &CartContext, command: PackageCommand) -> Result<(), String> {
    match command.command {
        PackageSubcommand::Add(args) => {
            let draft = context
                .packages
                .add(args.dishes.into_iter().map(DishId::new), args.people)
                .map_err(|error| format!("failed to stage custom package: {error}"))?;

            println!("draft_id: {}", draft.id);
            println!("use it as --package when adding the draft to the cart");

            Ok(())
        }
        PackageSubcommand::List => {
            let drafts = context.packages.list();

            if drafts.is_empty() {
                println!("no staged custom packages");
                return Ok(());
            }

            for draft in drafts {
                let dishes: Vec<&str> = draft.dish_ids.iter().map(DishId::as_str).collect();

                println!("draft_id: {}", draft.id);
                println!("dishes: {}", dishes.join(", "));
                println!("people_count: {}", draft.people_count);
                println!("created_at: {}", draft.created_at);
                println!();
            }

            Ok(())
        }
    }
}

use clap::{Args, Subcommand};
use platter_app::context::CartContext;

use super::or_dash;

#[derive(Debug, Args)]
pub(crate) struct EventCommand {
    #[command(subcommand)]
    command: EventSubcommand,
}

#[derive(Debug, Subcommand)]
enum EventSubcommand {
    /// Print the cached event details
    Show,

    /// Forget the cached event details
    Clear,
}

pub(crate) fn run(context: &CartContext, command: EventCommand) -> Result<(), String> {
    match command.command {
        EventSubcommand::Show => {
            let details = context.events.get();
            let date = details.event_date.map(|date| date.to_string());

            println!("event_date: {}", or_dash(date.as_deref()));
            println!("event_time: {}", or_dash(details.event_time.as_deref()));
            println!("event_type: {}", or_dash(details.event_type.as_deref()));
            println!("area: {}", or_dash(details.area.as_deref()));

            Ok(())
        }
        EventSubcommand::Clear => context
            .events
            .clear()
            .map_err(|error| format!("failed to clear event details: {error}")),
    }
}

use clap::{Parser, Subcommand};
use log::error;
use std::path::PathBuf;
use std::sync::Arc;

use recipe_cards::layout::HttpImageLoader;
use recipe_cards::payload::{read_input, LIST_PAYLOAD_ID, RECIPE_PAYLOAD_ID};
use recipe_cards::{
    render_cards, search_recipes, AppConfig, CardListView, DeleteAction, DeleteOutcome,
    DetailView, RecipeError, TerminalHost,
};

#[derive(Parser)]
#[command(name = "recipe-cards")]
#[command(about = "Render recipe records as cards and detail pages")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Render the card list page for a JSON array (or a page embedding one)
    Cards {
        file: PathBuf,
        /// Only show recipes matching this search
        #[arg(short, long, default_value = "")]
        query: String,
    },
    /// Render the detail page for a single recipe
    Recipe { file: PathBuf },
    /// Print the names of recipes matching a query, best first
    Search { file: PathBuf, query: String },
    /// Delete a recipe on the server
    Delete {
        /// Recipe route (`@id`)
        id: String,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Load every card image and print the resulting grid positions
    Layout {
        file: PathBuf,
        /// Container width in pixels
        #[arg(short, long, default_value_t = 1200)]
        width: u32,
    },
}

#[tokio::main]
async fn main() {
    env_logger::init();

    let cli = Cli::parse();
    if let Err(e) = run(cli).await {
        error!("{}", e);
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), RecipeError> {
    let config = AppConfig::load()?;

    match cli.command {
        Command::Cards { file, query } => {
            let input = tokio::fs::read_to_string(file).await?;
            println!("{}", render_cards(&input, &query, &config)?);
        }
        Command::Recipe { file } => {
            let input = tokio::fs::read_to_string(file).await?;
            let mut view = DetailView::new(read_input(&input, RECIPE_PAYLOAD_ID)?, &config)?;
            view.mount(&TerminalHost::new(false));
            println!("{}", view.to_html());
        }
        Command::Search { file, query } => {
            let input = tokio::fs::read_to_string(file).await?;
            for recipe in search_recipes(&input, &query, &config)? {
                println!("{}\t{}", recipe.id, recipe.name);
            }
        }
        Command::Delete { id, yes } => {
            let action = DeleteAction::new(&config.site)?;
            let host = TerminalHost::new(yes);
            if action.run(&host, &id, recipe_cards::delete::CONFIRM_RECIPE_DELETE).await
                == DeleteOutcome::Failed
            {
                std::process::exit(2);
            }
        }
        Command::Layout { file, width } => {
            let input = tokio::fs::read_to_string(file).await?;
            let loader = Arc::new(HttpImageLoader::new()?);
            let mut view =
                CardListView::new(read_input(&input, LIST_PAYLOAD_ID)?, &config, loader, width)?;
            view.load().await;

            if let Some(grid) = view.layout() {
                for (recipe, placement) in view.visible().zip(grid.placements()) {
                    println!(
                        "{}\tcolumn {}\tleft {}\ttop {}\theight {}",
                        recipe.name, placement.column, placement.left, placement.top, placement.height
                    );
                }
            }
        }
    }

    Ok(())
}

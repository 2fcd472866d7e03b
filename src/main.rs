use clap::{Parser, Subcommand};
use log::{debug, LevelFilter};
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use recipe_box::shell::Session;
use recipe_box::{
    open_store, view, AppConfig, Draft, FileStorage, RecipeError, RecipeId, RecipeStore,
};

/// Manage a local collection of recipes.
#[derive(Parser)]
#[command(name = "recipe-box")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Directory holding the recipe data (overrides configuration)
    #[arg(global = true, long)]
    data_dir: Option<PathBuf>,

    /// Enable debug logging
    #[arg(global = true, short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List recipe names
    List,

    /// Show a recipe (the first one if no id is given)
    Show {
        id: Option<RecipeId>,
    },

    /// Add a recipe
    Add {
        #[arg(short, long)]
        name: String,

        /// Ingredients separated by `*` or newlines
        #[arg(short, long, default_value = "")]
        ingredients: String,

        /// Directions separated by `*` or newlines
        #[arg(short, long, default_value = "")]
        description: String,
    },

    /// Change fields of an existing recipe
    Edit {
        id: RecipeId,

        #[arg(short, long)]
        name: Option<String>,

        #[arg(short, long)]
        ingredients: Option<String>,

        #[arg(short, long)]
        description: Option<String>,
    },

    /// Delete a recipe
    Delete {
        id: RecipeId,
    },

    /// Start an interactive session (default)
    Shell,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_env("RUST_LOG")
        .init();
}

fn run(cli: Cli) -> Result<ExitCode, RecipeError> {
    let mut config = AppConfig::load()?;
    if let Some(dir) = cli.data_dir {
        config.data_dir = dir;
    }
    debug!("Using configuration {:?}", config);

    let mut store = open_store(&config)?;
    let code = match cli.command.unwrap_or(Commands::Shell) {
        Commands::List => {
            print!("{}", view::render_sidebar(store.list(), store.selected()));
            ExitCode::SUCCESS
        }
        Commands::Show { id } => {
            let recipe = match id {
                Some(id) => store.get(id),
                None => store.selected(),
            };
            match (recipe, id) {
                (None, Some(id)) => {
                    eprintln!("No recipe with id {}", id);
                    ExitCode::FAILURE
                }
                (recipe, _) => {
                    print!("{}", view::render_detail(recipe, !store.is_empty()));
                    ExitCode::SUCCESS
                }
            }
        }
        Commands::Add {
            name,
            ingredients,
            description,
        } => match store.create(&Draft::new(name, ingredients, description)) {
            Ok(id) => {
                println!("Added recipe {}", id);
                ExitCode::SUCCESS
            }
            Err(rejection) => {
                eprintln!("{}", rejection);
                ExitCode::FAILURE
            }
        },
        Commands::Edit {
            id,
            name,
            ingredients,
            description,
        } => edit(&mut store, id, name, ingredients, description),
        Commands::Delete { id } => {
            if store.delete(id) {
                println!("Deleted recipe {}", id);
                ExitCode::SUCCESS
            } else {
                eprintln!("No recipe with id {}", id);
                ExitCode::FAILURE
            }
        }
        Commands::Shell => {
            let stdin = io::stdin();
            Session::new(&mut store).run(stdin.lock(), io::stdout())?;
            ExitCode::SUCCESS
        }
    };

    for notice in store.take_notices() {
        eprintln!("warning: {}", notice);
    }
    Ok(code)
}

fn edit(
    store: &mut RecipeStore<FileStorage>,
    id: RecipeId,
    name: Option<String>,
    ingredients: Option<String>,
    description: Option<String>,
) -> ExitCode {
    let Some(mut recipe) = store.get(id).cloned() else {
        eprintln!("No recipe with id {}", id);
        return ExitCode::FAILURE;
    };
    if let Some(name) = name {
        recipe.name = name;
    }
    if let Some(ingredients) = ingredients {
        recipe.ingredients = ingredients;
    }
    if let Some(description) = description {
        recipe.description = description;
    }

    match store.update(recipe) {
        Ok(true) => {
            println!("Updated recipe {}", id);
            ExitCode::SUCCESS
        }
        Ok(false) => {
            eprintln!("No recipe with id {}", id);
            ExitCode::FAILURE
        }
        Err(rejection) => {
            eprintln!("{}", rejection);
            ExitCode::FAILURE
        }
    }
}

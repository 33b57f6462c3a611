use clap::{Parser, Subcommand};
use pubcat::{catalog, config, output};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "pubcat")]
#[command(about = "Catalog generator for publication files")]
#[command(long_about = "\
Catalog generator for publication files

Walks the catalog root and writes publications.json. Ebook formats are
listed as paid and routed to a shop link; every other file is public.

Catalog root:

  publications/
  ├── catalog.toml                 # Optional config overrides
  ├── shop_map.json                # { \"books/Novel.pdf\": \"https://shop/...\" }
  ├── books/
  │   └── My Great Novel.pdf       # paid, category \"books\"
  ├── audio/
  │   └── samples/
  │       └── demo-track_v2.wav    # public, category \"audio\", tag \"samples\"
  └── flyer.png                    # public, category \"Unsorted\"

Paid files missing from shop_map.json get the fallback shop URL and are
listed after the run.

Run 'pubcat gen-config' to generate a documented catalog.toml.")]
#[command(version)]
struct Cli {
    /// Catalog root directory
    #[arg(long, default_value = "/var/www/schizo-studios/publications", global = true)]
    root: PathBuf,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Scan the root and write the catalog (default)
    Generate,
    /// Scan the root and summarize without writing
    Check,
    /// Print a stock catalog.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command.unwrap_or(Command::Generate) {
        Command::Generate => {
            let config = config::load_config(&cli.root)?;
            let result = catalog::generate(&cli.root, &config)?;
            output::print_generate_output(&result, &config.files.shop_map);
        }
        Command::Check => {
            let config = config::load_config(&cli.root)?;
            println!("==> Checking {}", cli.root.display());
            let catalog = catalog::build_catalog(&cli.root, &config)?;
            output::print_check_output(&catalog, &config.files.shop_map);
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

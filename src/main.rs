use clap::{Parser, Subcommand};
use pagesmith::config::{self, Mode};
use pagesmith::{emit, output, plan};
use std::path::PathBuf;
use std::process::ExitCode;

fn version_string() -> &'static str {
    let on_tag = env!("ON_RELEASE_TAG");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            // Leaked once at startup
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

#[derive(Parser)]
#[command(name = "pagesmith")]
#[command(about = "Multi-page site builder: one output page per HTML template")]
#[command(long_about = "\
Multi-page site builder: one output page per HTML template

Every HTML file at the top of the source directory becomes an output page.
All pages except the primary one (index.html) get the script and stylesheet
bundle references injected. Images, fonts, media, JSON and PHP files are
copied to the output directory with the source prefix stripped.

Project structure:

  my-site/
  ├── pagesmith.toml        # Optional config
  ├── src/
  │   ├── index.html        # Primary page, emitted as-is
  │   ├── about.html        # Gets <link> in head, <script> at end of body
  │   ├── img/logo.png      # → dist/img/logo.png
  │   └── fonts/inter.woff2 # → dist/fonts/inter.woff2
  └── dist/                 # Cleaned and rebuilt on every build

The build mode comes from PAGESMITH_ENV (production|development) unless
--mode is given. Production strips HTML comments by default.

Run 'pagesmith gen-config' to print a documented pagesmith.toml.")]
#[command(version = version_string())]
struct Cli {
    /// Project directory (holds pagesmith.toml and the source directory)
    #[arg(long, default_value = ".", global = true)]
    project: PathBuf,

    /// Build mode; overrides PAGESMITH_ENV
    #[arg(long, value_enum, global = true)]
    mode: Option<Mode>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Discover pages and assets and show what a build would emit
    Plan {
        /// Print the plan as JSON
        #[arg(long)]
        json: bool,
    },
    /// Plan, clean the output directory, emit pages and copy assets
    Build,
    /// Validate config and source directory without writing anything
    Check,
    /// Print a stock pagesmith.toml with all options documented
    GenConfig,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let mode = cli.mode.unwrap_or_else(Mode::from_env);

    match cli.command {
        Command::Plan { json } => {
            let plan = plan::plan_project(&cli.project, mode)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&plan)?);
            } else {
                output::print_plan_output(&plan, &cli.project);
            }
        }
        Command::Build => {
            let config = config::load_config(&cli.project)?;

            println!(
                "==> Stage 1: Planning {} ({})",
                cli.project.join(&config.source_dir).display(),
                mode.as_str()
            );
            let plan = plan::plan(&cli.project, &config, mode)?;
            output::print_plan_output(&plan, &cli.project);

            let output_dir = plan.output_dir(&cli.project);
            println!("==> Stage 2: Emitting → {}", output_dir.display());
            let report = emit::emit(&plan, &cli.project)?;
            output::print_emit_output(&report, &cli.project);

            println!("==> Build complete: {}", output_dir.display());
        }
        Command::Check => {
            println!("==> Checking {}", cli.project.display());
            let plan = plan::plan_project(&cli.project, mode)?;
            output::print_plan_output(&plan, &cli.project);
            println!("==> Project is valid");
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

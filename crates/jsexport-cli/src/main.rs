mod tracing_config;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use jsexport::core::{NamingScheme, TreeStats};
use jsexport::emit::QuoteStyle;
use jsexport::{ExportMode, PipelineConfig};
use std::path::PathBuf;
use tracing::debug;

#[derive(Parser)]
#[command(name = "jsexport")]
#[command(about = "jsexport - lower a module's exported surface to JavaScript")]
#[command(version = "0.1.0")]
#[command(author = "Gianluca Brigandi <gbrigand@gmail.com>")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Lower an export bundle and print the JavaScript.
    Lower {
        input: PathBuf,

        #[arg(short, long)]
        output: Option<PathBuf>,

        #[arg(long, value_enum, default_value = "attach")]
        mode: Mode,

        /// Object that declarations attach to in attach mode.
        #[arg(long, default_value = "_")]
        module_name: String,

        /// Wrap each class and object in `// export:` marker comments.
        #[arg(long)]
        comments: bool,

        #[arg(long, value_enum, default_value = "plain")]
        naming: Naming,

        /// Salt mixed into mangled names.
        #[arg(long)]
        salt: Option<String>,

        #[arg(long)]
        double_quotes: bool,

        #[arg(long)]
        color: bool,

        #[arg(short, long)]
        verbose: bool,
    },

    /// Check a bundle for dangling or mistyped source references.
    Validate {
        input: PathBuf,

        #[arg(short, long)]
        verbose: bool,
    },

    /// Summarise the export tree of a bundle.
    Inspect {
        input: PathBuf,

        #[arg(long)]
        json: bool,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Mode {
    Attach,
    Module,
}

impl From<Mode> for ExportMode {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Attach => ExportMode::NamespaceAttach,
            Mode::Module => ExportMode::ModuleExport,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Naming {
    Plain,
    Mangled,
}

impl From<Naming> for NamingScheme {
    fn from(naming: Naming) -> Self {
        match naming {
            Naming::Plain => NamingScheme::Plain,
            Naming::Mangled => NamingScheme::Mangled,
        }
    }
}

struct LowerOptions {
    output: Option<PathBuf>,
    mode: Mode,
    module_name: String,
    comments: bool,
    naming: Naming,
    salt: Option<String>,
    double_quotes: bool,
    color: bool,
    verbose: bool,
}

fn main() -> Result<()> {
    tracing_config::init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::Lower {
            input,
            output,
            mode,
            module_name,
            comments,
            naming,
            salt,
            double_quotes,
            color,
            verbose,
        } => cmd_lower(
            input,
            LowerOptions {
                output,
                mode,
                module_name,
                comments,
                naming,
                salt,
                double_quotes,
                color,
                verbose,
            },
        ),
        Commands::Validate { input, verbose } => cmd_validate(input, verbose),
        Commands::Inspect { input, json } => cmd_inspect(input, json),
    }
}

fn pipeline_config(options: &LowerOptions) -> PipelineConfig {
    let mut config = PipelineConfig {
        internal_module_name: options.module_name.clone(),
        ..Default::default()
    };
    config.lowering.mode = options.mode.into();
    config.lowering.export_comments = options.comments;
    config.naming.scheme = options.naming.into();
    config.naming.hash_salt = options.salt.clone();
    config.emitter.use_colors = options.color && options.output.is_none();
    if options.double_quotes {
        config.emitter.quote_style = QuoteStyle::Double;
    }
    config
}

fn cmd_lower(input: PathBuf, options: LowerOptions) -> Result<()> {
    use colored::*;
    use std::fs;
    use std::time::Instant;

    if options.verbose {
        eprintln!("{}", " jsexport lowering".bright_blue().bold());
        eprintln!("{}", "=".repeat(50).bright_blue());
        eprintln!(" Input: {}", input.display());
        if let Some(ref out) = options.output {
            eprintln!(" Output: {}", out.display());
        }
        eprintln!(" Mode: {:?}", options.mode);
        eprintln!(" Naming: {:?}", options.naming);
        eprintln!();
    }

    let start = Instant::now();
    let bundle = jsexport::load_bundle(&input)?;
    debug!(module = %bundle.module.name, sources = bundle.sources.len(), "loaded bundle");

    let config = pipeline_config(&options);
    let statements = jsexport::lower_bundle(&bundle, &config)?;
    let js = jsexport::JsEmitter::new(config.emitter.clone()).render(&statements)?;

    if let Some(output_path) = options.output {
        fs::write(&output_path, &js)?;
        if options.verbose {
            eprintln!(
                "\n {} Lowered {} statement(s)",
                "SUCCESS:".bright_green().bold(),
                statements.len()
            );
            eprintln!("   Time: {:.3}s", start.elapsed().as_secs_f64());
            eprintln!("   Output: {}", output_path.display());
        }
    } else {
        print!("{}", js);
    }

    Ok(())
}

fn cmd_validate(input: PathBuf, verbose: bool) -> Result<()> {
    use colored::*;

    if verbose {
        println!("{}", " Validating export bundle".bright_cyan().bold());
        println!("{}", "=".repeat(50).bright_cyan());
        println!(" Input: {}", input.display());
        println!();
    }

    let bundle = jsexport::load_bundle(&input)?;
    let issues = jsexport::validate_bundle(&bundle);

    if issues.is_empty() {
        println!("{}", " VALID".bright_green().bold());
        if verbose {
            let stats = bundle.module.stats();
            println!(
                "   {} declaration(s), {} source entries",
                stats.total(),
                bundle.sources.len()
            );
        }
        return Ok(());
    }

    println!("{}", " INVALID".bright_red().bold());
    for issue in &issues {
        println!("   - {}", issue);
    }
    Err(anyhow::anyhow!(
        "Validation failed with {} issue(s)",
        issues.len()
    ))
}

fn cmd_inspect(input: PathBuf, json: bool) -> Result<()> {
    use colored::*;

    let bundle = jsexport::load_bundle(&input)?;
    let stats = bundle.module.stats();

    if json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
        return Ok(());
    }

    println!(
        "{}",
        format!(" Module: {}", bundle.module.name).bright_green().bold()
    );
    print_stats(&stats);
    Ok(())
}

fn print_stats(stats: &TreeStats) {
    println!("Namespaces: {}", stats.namespaces);
    println!("Classes: {}", stats.classes);
    println!("Interfaces: {}", stats.interfaces);
    println!("Objects: {}", stats.objects);
    println!("Functions: {}", stats.functions);
    println!("Properties: {}", stats.properties);
    println!("Constructors: {}", stats.constructors);
    println!("Errors: {}", stats.errors);
    println!("Max depth: {}", stats.max_depth);
}

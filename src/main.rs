use clap::{Parser, Subcommand};
use dotenv::dotenv;
use std::collections::HashSet;
use std::path::PathBuf;

use coursereq::catalog::{CourseLoader, DependencyIndex, RequirementKind};
use coursereq::config::Config;
use coursereq::requirement::is_satisfied;
use coursereq::AppError;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// YAML configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Validate a course's requirement tree
    Validate {
        /// Course record (JSON or YAML)
        #[arg(short, long)]
        file: PathBuf,

        /// Which tree to read
        #[arg(short, long, default_value = "prerequisites")]
        kind: RequirementKind,
    },
    /// Check whether completed courses satisfy a requirement tree
    Check {
        #[arg(short, long)]
        file: PathBuf,

        #[arg(short, long, default_value = "prerequisites")]
        kind: RequirementKind,

        /// Completed course codes, comma separated
        #[arg(long, value_delimiter = ',')]
        completed: Vec<String>,
    },
    /// Print the dependency graph of a requirement tree as JSON
    Graph {
        #[arg(short, long)]
        file: PathBuf,

        #[arg(short, long, default_value = "prerequisites")]
        kind: RequirementKind,
    },
    /// List courses that depend on a course across a catalog
    Dependents {
        /// File holding a list of course records
        #[arg(long)]
        catalog: PathBuf,

        #[arg(long)]
        course: String,

        /// Follow dependents of dependents
        #[arg(long)]
        transitive: bool,
    },
    /// Run the HTTP service
    Serve {
        #[arg(short, long)]
        port: Option<u16>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    env_logger::init();

    let args = Args::parse();
    let config = Config::load(args.config.as_deref())?;
    let loader = CourseLoader::new();

    match args.command {
        Commands::Validate { file, kind } => {
            let course = loader.load_course(&file)?;
            match course.validated_requirements(kind, &config.validator()) {
                Ok(tree) => {
                    println!(
                        "{} {}: valid ({} course references)",
                        course.id,
                        kind,
                        tree.courses().len()
                    );
                }
                Err(AppError::Requirement(e)) => {
                    log::warn!("Falling back to raw {} text for {}", kind, course.id);
                    println!("{} {}: unavailable ({})", course.id, kind, e);
                    if let Some(text) = course.requirements_text(kind) {
                        println!("{}", text);
                    }
                    std::process::exit(1);
                }
                Err(e) => return Err(e.into()),
            }
        }
        Commands::Check {
            file,
            kind,
            completed,
        } => {
            let course = loader.load_course(&file)?;
            let tree = course.validated_requirements(kind, &config.validator())?;
            let completed: HashSet<String> = completed
                .into_iter()
                .map(|c| c.trim().to_string())
                .filter(|c| !c.is_empty())
                .collect();

            let satisfied = is_satisfied(tree, &completed);
            log::info!("{} {} satisfied: {}", course.id, kind, satisfied);
            println!("{}", satisfied);
        }
        Commands::Graph { file, kind } => {
            let course = loader.load_course(&file)?;
            let graph = course.requirement_graph(kind, &config.validator())?;
            println!("{}", serde_json::to_string_pretty(&graph)?);
        }
        Commands::Dependents {
            catalog,
            course,
            transitive,
        } => {
            let courses = loader.load_catalog(&catalog)?;
            let index = DependencyIndex::from_courses(&courses);
            if !index.contains(&course) {
                return Err(AppError::course_not_found(course).into());
            }
            for cycle in index.cycles() {
                log::warn!("Catalog has a prerequisite cycle: {}", cycle.join(" -> "));
            }

            let dependents = if transitive {
                index.all_dependents(&course)
            } else {
                index.leading_to(&course)
            };
            for code in dependents {
                println!("{}", code);
            }
        }
        Commands::Serve { port } => {
            let mut config = config;
            if let Some(port) = port {
                config.server.port = port;
            }
            coursereq::server::serve(config).await?;
        }
    }

    Ok(())
}

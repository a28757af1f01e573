use std::io::BufRead;
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};

use progress_portal::controller::{self, ViewStateController};
use progress_portal::directory::StudentDirectory;
use progress_portal::{projection, render};

const DATA_ENV: &str = "PROGRESS_PORTAL_DATA";

#[derive(Parser)]
#[command(name = "progress-portal")]
#[command(about = "Parent-facing student progress dashboard", long_about = None)]
struct Cli {
    /// JSON file with student records (falls back to PROGRESS_PORTAL_DATA, then the demo roster)
    #[arg(long, global = true)]
    data: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the students a caregiver can choose from
    List,
    /// Show the dashboard for one student
    Show {
        #[arg(long)]
        student: String,
    },
    /// Print or export the test score chart for one student
    Chart {
        #[arg(long)]
        student: String,
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Interactive selector/dashboard session on stdin
    Session,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let directory = load_directory(cli.data)?;

    match cli.command {
        Commands::List => {
            for student in directory.list_all() {
                println!("{}  {}", student.id, student.choice_label());
            }
        }
        Commands::Show { student } => {
            let record = controller::login(&directory, &student)?;
            print!("{}", render::render_dashboard(record));
        }
        Commands::Chart { student, out } => {
            let record = controller::login(&directory, &student)?;
            let points = projection::project(&record.test_results);

            match out {
                Some(path) => {
                    let file = std::fs::File::create(&path)
                        .with_context(|| format!("failed to create {}", path.display()))?;
                    render::write_chart_csv(file, &points)?;
                    println!("Chart for {} written to {}.", record.name, path.display());
                }
                None => {
                    for point in &points {
                        println!("{point}");
                    }
                }
            }
        }
        Commands::Session => run_session(&directory)?,
    }

    Ok(())
}

fn load_directory(data: Option<PathBuf>) -> anyhow::Result<StudentDirectory> {
    let path = data.or_else(|| std::env::var_os(DATA_ENV).map(PathBuf::from));
    match path {
        Some(path) => StudentDirectory::from_json_path(&path),
        None => {
            log::info!("no data file configured, using the demo roster");
            StudentDirectory::seed()
        }
    }
}

fn run_session(directory: &StudentDirectory) -> anyhow::Result<()> {
    let mut controller = ViewStateController::new(directory);
    print!("{}", render::render_screen(directory, controller.state(), None));

    let stdin = std::io::stdin();
    for line in stdin.lock().lines() {
        let line = line.context("failed to read command")?;
        let mut parts = line.trim().splitn(2, char::is_whitespace);
        let command = parts.next().unwrap_or_default();
        let argument = parts.next().unwrap_or_default().trim();

        let message = match command {
            "select" => controller.select_student(argument).message,
            "logout" => {
                controller.logout();
                None
            }
            "list" => {
                print!("{}", render::render_selector(directory, None));
                continue;
            }
            "quit" | "exit" => break,
            "" => continue,
            other => {
                println!("Unknown command `{other}`. Try: select <id>, logout, list, quit.");
                continue;
            }
        };

        println!();
        print!(
            "{}",
            render::render_screen(controller.directory(), controller.state(), message)
        );
    }

    Ok(())
}

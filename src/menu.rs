//! Numbered interactive menu over an explicit session value.

use std::io::Write;
use anyhow::Result;
use colored::Colorize;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::warn;

use crate::core::{report, Engine, Project};

const QUIT: &str = "0";

/// State carried between menu iterations
#[derive(Debug, Default)]
pub struct MenuSession {
    project: Option<Project>,
}

impl MenuSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn project(&self) -> Option<&Project> {
        self.project.as_ref()
    }

    pub fn is_project_selected(&self) -> bool {
        self.project.is_some()
    }
}

/// Run the menu until the user quits or the input ends
pub async fn run_menu<R, W>(engine: &mut Engine, input: R, output: &mut W) -> Result<MenuSession>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut session = MenuSession::new();
    let mut lines = input.lines();

    loop {
        print_menu(&session, output)?;

        let Some(choice) = lines.next_line().await? else {
            break;
        };

        match choice.trim() {
            QUIT => {
                writeln!(output, "{}", "See you soon!".green())?;
                break;
            }
            "1" => {
                writeln!(output, "Enter the path of a Java project:")?;
                let Some(path) = lines.next_line().await? else {
                    break;
                };
                select_project(engine, &mut session, path.trim(), output)?;
            }
            "2" => match session.project() {
                Some(project) => {
                    let options = engine.selection_options();
                    match engine.statistics(project, options) {
                        Ok(stats) => write!(output, "{}", report::format_statistics(&stats))?,
                        Err(e) => writeln!(output, "{} {}", "Error:".red(), e)?,
                    }
                }
                None => no_project(output)?,
            },
            "3" => match session.project() {
                Some(project) => match engine.generate_call_graph(project).await {
                    Ok(artifacts) => write!(output, "{}", report::format_graph_summary(&artifacts))?,
                    Err(e) => writeln!(output, "{} {}", "Error:".red(), e)?,
                },
                None => no_project(output)?,
            },
            other => {
                warn!("Unknown menu choice: {:?}", other);
                writeln!(output, "{}", "Error: please try again.".red())?;
            }
        }
    }

    Ok(session)
}

fn print_menu<W: Write>(session: &MenuSession, output: &mut W) -> Result<()> {
    writeln!(output, "{}", "=== Main menu ===".green())?;
    writeln!(output, "{}", "0. Quit".yellow())?;
    if session.is_project_selected() {
        writeln!(output, "1. Change project")?;
        writeln!(output, "2. Show project statistics")?;
        writeln!(output, "3. Generate the project call graph")?;
    } else {
        writeln!(output, "1. Select a project")?;
    }
    writeln!(output, "{}", "=================".green())?;
    Ok(())
}

fn select_project<W: Write>(
    engine: &Engine,
    session: &mut MenuSession,
    path: &str,
    output: &mut W,
) -> Result<()> {
    match engine.open_project(path) {
        Ok(project) => {
            writeln!(
                output,
                "{} {}",
                "Java project path validated:".yellow(),
                project.source_dir().display()
            )?;
            session.project = Some(project);
        }
        Err(e) => writeln!(output, "{} {}", "Error:".red(), e)?,
    }
    Ok(())
}

fn no_project<W: Write>(output: &mut W) -> Result<()> {
    writeln!(output, "{}", "Error: no project selected.".red())?;
    Ok(())
}

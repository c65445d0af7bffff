use clap::{Args, Parser, Subcommand};
use std::io::{self, BufRead, Write};
use tracing::{debug, warn};

use super::config::Config;
use super::logging;
use super::view;
use crate::api::{ApiClient, JobApi, SearchQuery};
use crate::board::{ConfirmationGate, JobBoard, JobForm, MutationError, Outcome};
use crate::domain::{Job, JobPatch, JobStatus, Role, TrackerError};
use crate::state::{FETCH_FAILURE_NOTICE, StatusFilter};

#[derive(Parser, Debug)]
#[command(name = "job-tracker", version, about = "Track job applications from the terminal")]
pub struct Cli {
    #[command(flatten)]
    pub config: Config,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Show one page of jobs
    List {
        #[arg(long, default_value_t = 1)]
        page: u32,
        /// Case-insensitive match on role, company or location
        #[arg(long, default_value = "")]
        search: String,
        /// "all" or one status
        #[arg(long, default_value = "all")]
        status: StatusFilter,
    },
    /// Show a job with its status history
    Show { id: String },
    /// Create a job (admin)
    Create(CreateArgs),
    /// Move a job to another status (admin)
    Status { id: String, status: JobStatus },
    /// Apply to a job (user)
    Apply { id: String },
    /// Change fields of a job (admin)
    Edit(EditArgs),
    /// Delete a job (admin)
    Delete {
        id: String,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
    /// Server-side search
    Search(SearchArgs),
    /// Job counts per status
    Stats,
    /// Recent status changes
    Activity {
        #[arg(long, default_value_t = 10)]
        limit: u32,
    },
    /// API health and request counters
    Health,
}

#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct CreateArgs {
    #[arg(long, default_value = "")]
    pub role: String,
    #[arg(long, default_value = "")]
    pub company: String,
    #[arg(long)]
    pub status: Option<JobStatus>,
    #[arg(long, default_value = "")]
    pub location: String,
    #[arg(long, default_value = "")]
    pub salary: String,
    #[arg(long, default_value = "")]
    pub description: String,
}

impl From<CreateArgs> for JobForm {
    fn from(args: CreateArgs) -> Self {
        JobForm {
            role: args.role,
            company: args.company,
            status: args.status.into(),
            location: args.location,
            salary: args.salary,
            description: args.description,
        }
    }
}

#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct EditArgs {
    pub id: String,
    #[arg(long)]
    pub role: Option<String>,
    #[arg(long)]
    pub company: Option<String>,
    #[arg(long)]
    pub status: Option<JobStatus>,
    #[arg(long)]
    pub location: Option<String>,
    #[arg(long)]
    pub salary: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
}

impl EditArgs {
    fn into_patch(self) -> (String, JobPatch) {
        let patch = JobPatch {
            role: self.role,
            company: self.company,
            status: self.status,
            location: self.location,
            salary: self.salary,
            description: self.description,
        };
        (self.id, patch)
    }
}

#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct SearchArgs {
    #[arg(long)]
    pub role: Option<String>,
    #[arg(long)]
    pub company: Option<String>,
    #[arg(long)]
    pub status: Option<JobStatus>,
    #[arg(long, default_value_t = 1)]
    pub page: u32,
}

/// Asks on stdin before a delete goes out.
pub struct PromptGate;

impl ConfirmationGate for PromptGate {
    fn confirm(&self, job: &Job) -> bool {
        let mut stdout = io::stdout();
        let _ = write!(
            stdout,
            "Are you sure you want to delete this job? ({} at {}) [y/N] ",
            job.role, job.company
        );
        let _ = stdout.flush();

        let mut answer = String::new();
        if io::stdin().lock().read_line(&mut answer).is_err() {
            return false;
        }
        is_yes(&answer)
    }
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

/// A configured board plus the view it acts in.
pub struct Session {
    board: JobBoard<ApiClient>,
    role: Role,
}

impl Session {
    pub fn new(config: &Config) -> Result<Self, TrackerError> {
        let client = ApiClient::new(config.client_config())?;
        Ok(Self {
            board: JobBoard::new(client, config.board_config()),
            role: config.role,
        })
    }

    pub fn board(&self) -> &JobBoard<ApiClient> {
        &self.board
    }

    pub fn role(&self) -> Role {
        self.role
    }

    /// Run one command and return what should be printed.
    pub async fn run(&self, command: Command) -> Result<String, TrackerError> {
        debug!(?command, role = %self.role, "running command");
        match command {
            Command::List { page, search, status } => self.list(page, search, status).await,
            Command::Show { id } => {
                let job = self.board.api().get_job(&id).await?;
                Ok(view::job_card(&job))
            }
            Command::Create(args) => {
                self.require(Role::Admin, "create")?;
                let mut form = JobForm::from(args);
                let outcome = self.board.create(&mut form).await.map_err(mutation_error)?;
                Ok(render_outcome("Created", outcome, self.role))
            }
            Command::Status { id, status } => {
                self.require(Role::Admin, "status")?;
                let job = self.board.api().get_job(&id).await?;
                let outcome = self
                    .board
                    .update_status(&job, status)
                    .await
                    .map_err(mutation_error)?;
                Ok(render_outcome("Updated", outcome, self.role))
            }
            Command::Apply { id } => {
                self.require(Role::User, "apply")?;
                let job = self.board.api().get_job(&id).await?;
                let outcome = self.board.apply(&job).await.map_err(mutation_error)?;
                Ok(render_outcome("Applied", outcome, self.role))
            }
            Command::Edit(args) => {
                self.require(Role::Admin, "edit")?;
                let (id, patch) = args.into_patch();
                let job = self.board.api().get_job(&id).await?;
                let outcome = self.board.edit(&job, patch).await.map_err(mutation_error)?;
                Ok(render_outcome("Updated", outcome, self.role))
            }
            Command::Delete { id, yes } => {
                self.require(Role::Admin, "delete")?;
                let job = self.board.api().get_job(&id).await?;
                let result = if yes {
                    self.board.delete(&job, &|_: &Job| true).await
                } else {
                    self.board.delete(&job, &PromptGate).await
                };
                let outcome = result.map_err(mutation_error)?;
                Ok(match outcome {
                    Outcome::Done(message) => format!("{message}\n"),
                    Outcome::Skipped(reason) => format!("Skipped: {reason}\n"),
                })
            }
            Command::Search(args) => {
                let query = SearchQuery {
                    role: args.role,
                    company: args.company,
                    status: args.status,
                    page: args.page.max(1),
                    limit: self.board.config().page_size,
                };
                let page = self.board.api().search_jobs(query).await?;
                Ok(view::search_results(&page, self.role))
            }
            Command::Stats => {
                let counts = self.board.api().status_statistics().await?;
                Ok(view::statistics(&counts))
            }
            Command::Activity { limit } => {
                let events = self.board.api().recent_activity(limit).await?;
                Ok(view::activity(&events))
            }
            Command::Health => {
                let info = self.board.api().health().await?;
                Ok(view::health(&info, &self.board.api().connection_stats()))
            }
        }
    }

    async fn list(
        &self,
        page: u32,
        search: String,
        status: StatusFilter,
    ) -> Result<String, TrackerError> {
        self.board.set_search_term(search);
        self.board.set_status_filter(status);
        if let Err(e) = self.board.load(page).await {
            warn!(error = %e, "failed to load jobs");
            let notice = self
                .board
                .error_message()
                .unwrap_or_else(|| FETCH_FAILURE_NOTICE.to_string());
            return Err(TrackerError::View(notice));
        }
        Ok(view::board(&self.board.snapshot(), self.role))
    }

    fn require(&self, needed: Role, command: &str) -> Result<(), TrackerError> {
        if self.role == needed {
            return Ok(());
        }
        Err(TrackerError::View(format!(
            "'{command}' is only available in the {needed} view (pass --view {needed})"
        )))
    }
}

fn render_outcome(verb: &str, outcome: Outcome<Job>, role: Role) -> String {
    match outcome {
        Outcome::Done(job) => format!("{verb}: {}\n", view::job_line(&job, role)),
        Outcome::Skipped(reason) => format!("Skipped: {reason}\n"),
    }
}

fn mutation_error(error: MutationError) -> TrackerError {
    match error.form_errors() {
        Some(errors) => TrackerError::View(format!("Invalid job:\n{}", view::form_errors(errors))),
        None => TrackerError::Mutation(error),
    }
}

/// Resolve configuration, install logging and run the parsed command.
pub async fn execute(cli: Cli) -> anyhow::Result<String> {
    let config = cli.config.resolve()?;
    logging::init_tracing(config.log_level, config.log_format)?;
    let session = Session::new(&config)?;
    let output = session.run(cli.command).await?;
    Ok(output)
}

//! `campus-cli` — drives the campus client library from a terminal.
//!
//! Each invocation restores the session cookies saved by the previous one,
//! runs a single command through [`SessionClient`] (or a non-refreshing
//! [`DirectClient`] with `--no-refresh`), and saves the cookie jar again,
//! whether or not the command succeeded. Results print as JSON on stdout;
//! diagnostics and paging summaries go to stderr.

mod args;
mod session_file;

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use campus::{
    ApiError, ClientConfig, ConfigError, CourseDraft, CourseStore, DepartmentDraft, DepartmentStore, DirectClient,
    HttpTransport, ListQuery, Pagination, ProfileUpdate, Registration, RequestExecutor, SessionClient, SyllabusPatch,
    SyllabusStore, SyllabusUpload, Transport,
};
use clap::Parser;
use serde::Serialize;
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

use args::{
    Cli, Command, CourseSubcommand, DepartmentSubcommand, ListArgs, ProfileSubcommand, RegisterArgs,
    SyllabusSubcommand,
};
use session_file::SessionFile;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("{}: {}", .0.error_code(), .0.user_message())]
    Api(#[from] ApiError),
    #[error("session file {}: {source}", .path.display())]
    SessionFile { path: PathBuf, source: std::io::Error },
    #[error("cannot read {}: {source}", .path.display())]
    ReadUpload { path: PathBuf, source: std::io::Error },
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("nothing to update; pass at least one field")]
    NothingToUpdate,
}

#[tokio::main]
async fn main() -> ExitCode {
    load_dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn load_dotenv() {
    match dotenvy::dotenv() {
        Ok(path) => debug!(path = %path.display(), "loaded .env"),
        Err(e) if e.not_found() => {}
        Err(e) => eprintln!("warning: ignoring .env: {e}"),
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let config = load_config(cli.base_url.as_deref())?;
    let session_file = SessionFile::new(cli.session_file);
    let ctx = Context::connect(config, &session_file, cli.no_refresh)?;

    let result = dispatch(&ctx, cli.command).await;

    let saved = session_file
        .save(ctx.transport.cookie_header().as_deref())
        .map_err(|source| CliError::SessionFile { path: session_file.path().to_path_buf(), source });
    result.and(saved)
}

fn load_config(base_url: Option<&str>) -> Result<ClientConfig, CliError> {
    let mut config = ClientConfig::from_env()?;
    if let Some(base_url) = base_url {
        config.base_url = ClientConfig::for_base_url(base_url)?.base_url;
    }
    Ok(config)
}

// =============================================================================
// CONTEXT
// =============================================================================

struct Context {
    page_size: u32,
    transport: Arc<HttpTransport>,
    session: Arc<SessionClient>,
    no_refresh: bool,
}

impl Context {
    fn connect(config: ClientConfig, session_file: &SessionFile, no_refresh: bool) -> Result<Self, CliError> {
        let page_size = config.page_size;
        let refresh_timeout = config.refresh_timeout();
        let transport = Arc::new(HttpTransport::new(config)?);

        let saved = session_file
            .load()
            .map_err(|source| CliError::SessionFile { path: session_file.path().to_path_buf(), source })?;
        if let Some(header) = saved {
            transport.restore_cookies(&header);
            debug!(path = %session_file.path().display(), "restored session cookies");
        }

        let session = SessionClient::new(Arc::clone(&transport) as Arc<dyn Transport>)
            .with_refresh_timeout(refresh_timeout);
        session.on_session_lost(|e: &ApiError| warn!(error = %e, "session expired; run `campus-cli login`"));

        Ok(Self { page_size, transport, session: Arc::new(session), no_refresh })
    }

    /// Executor for list and CRUD commands.
    fn executor(&self) -> Arc<dyn RequestExecutor> {
        if self.no_refresh {
            Arc::new(DirectClient::new(Arc::clone(&self.transport) as Arc<dyn Transport>))
        } else {
            Arc::clone(&self.session) as Arc<dyn RequestExecutor>
        }
    }

    fn list_query(&self, list: &ListArgs) -> ListQuery {
        ListQuery::new(list.limit.unwrap_or(self.page_size))
            .with_search(list.search.clone().unwrap_or_default())
            .with_page(list.page)
    }
}

// =============================================================================
// COMMANDS
// =============================================================================

async fn dispatch(ctx: &Context, command: Command) -> Result<(), CliError> {
    match command {
        Command::Login { email, password } => {
            let user = ctx.session.sign_in(&email, &password).await?;
            print_json(&user)
        }
        Command::Register(args) => run_register(ctx, args).await,
        Command::Whoami => print_json(&ctx.session.fetch_current_user().await?),
        Command::Logout => {
            ctx.session.logout().await?;
            eprintln!("logged out");
            Ok(())
        }
        Command::Profile(profile) => match profile.command {
            ProfileSubcommand::Show => print_json(&ctx.session.get_profile().await?),
            ProfileSubcommand::Update { email, first_name, last_name } => {
                let update = ProfileUpdate { email, first_name, last_name };
                if update.is_empty() {
                    return Err(CliError::NothingToUpdate);
                }
                print_json(&ctx.session.update_profile(&update).await?)
            }
        },
        Command::Password { current, new } => {
            ctx.session.change_password(&current, &new).await?;
            eprintln!("password changed");
            Ok(())
        }
        Command::Departments(departments) => run_departments(ctx, departments.command).await,
        Command::Courses(courses) => run_courses(ctx, courses.command).await,
        Command::Syllabi(syllabi) => run_syllabi(ctx, syllabi.command).await,
    }
}

async fn run_register(ctx: &Context, args: RegisterArgs) -> Result<(), CliError> {
    let re_password = args.re_password.unwrap_or_else(|| args.password.clone());
    let registration = Registration {
        email: args.email,
        first_name: args.first_name,
        last_name: args.last_name,
        password: args.password,
        re_password,
    };
    print_json(&ctx.session.register(&registration).await?)
}

async fn run_departments(ctx: &Context, command: DepartmentSubcommand) -> Result<(), CliError> {
    let store = DepartmentStore::new(ctx.executor()).with_query(ListQuery::new(ctx.page_size));
    match command {
        DepartmentSubcommand::List => {
            store.fetch(&ListQuery::new(ctx.page_size)).await?;
            let state = store.snapshot().await;
            eprintln!("{} departments", state.pagination.count);
            print_json(&state.departments)
        }
        DepartmentSubcommand::Choices => print_json(&store.fetch_faculty_choices().await?),
        DepartmentSubcommand::Create { name, faculty } => {
            print_json(&store.create(&DepartmentDraft { name, faculty }).await?)
        }
        DepartmentSubcommand::Update { id, name, faculty } => {
            print_json(&store.update(id, &DepartmentDraft { name, faculty }).await?)
        }
        DepartmentSubcommand::Delete { id } => {
            store.delete(id).await?;
            eprintln!("deleted department {id}");
            Ok(())
        }
    }
}

async fn run_courses(ctx: &Context, command: CourseSubcommand) -> Result<(), CliError> {
    let store = CourseStore::new(ctx.executor()).with_query(ListQuery::new(ctx.page_size));
    match command {
        CourseSubcommand::List(list) => {
            let query = ctx.list_query(&list);
            store.fetch(&query).await?;
            let state = store.snapshot().await;
            report_page(&query, &state.pagination);
            print_json(&state.courses)
        }
        CourseSubcommand::Choices => print_json(&store.fetch_choices().await?),
        CourseSubcommand::Create { data } => {
            let draft: CourseDraft = serde_json::from_str(&data)?;
            print_json(&store.create(&draft).await?)
        }
        CourseSubcommand::Update { id, data } => {
            let draft: CourseDraft = serde_json::from_str(&data)?;
            print_json(&store.update(id, &draft).await?)
        }
        CourseSubcommand::Delete { id } => {
            store.delete(id).await?;
            eprintln!("deleted course {id}");
            Ok(())
        }
    }
}

async fn run_syllabi(ctx: &Context, command: SyllabusSubcommand) -> Result<(), CliError> {
    let store = SyllabusStore::new(ctx.executor()).with_query(ListQuery::new(ctx.page_size));
    match command {
        SyllabusSubcommand::List { list, course } => {
            let query = ctx.list_query(&list).with_course(course).with_page(list.page);
            store.fetch(&query).await?;
            let state = store.snapshot().await;
            report_page(&query, &state.pagination);
            print_json(&state.syllabi)
        }
        SyllabusSubcommand::Upload { course, file } => {
            let bytes = tokio::fs::read(&file)
                .await
                .map_err(|source| CliError::ReadUpload { path: file.clone(), source })?;
            let file_name = file
                .file_name()
                .map_or_else(|| file.to_string_lossy(), |name| name.to_string_lossy())
                .into_owned();
            print_json(&store.upload(SyllabusUpload::new(course, file_name, bytes)).await?)
        }
        SyllabusSubcommand::Update { id, version, active } => {
            let patch = SyllabusPatch { version, is_active: active };
            if patch == SyllabusPatch::default() {
                return Err(CliError::NothingToUpdate);
            }
            print_json(&store.update(id, &patch).await?)
        }
        SyllabusSubcommand::Delete { id } => {
            store.delete(id).await?;
            eprintln!("deleted syllabus {id}");
            Ok(())
        }
    }
}

// =============================================================================
// OUTPUT
// =============================================================================

fn report_page(query: &ListQuery, pagination: &Pagination) {
    eprintln!(
        "page {} of {} ({} total)",
        query.page,
        query.total_pages(pagination).max(1),
        pagination.count
    );
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<(), CliError> {
    let rendered = serde_json::to_string_pretty(value)?;
    println!("{rendered}");
    Ok(())
}

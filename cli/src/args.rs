use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "campus-cli", about = "University administration API CLI")]
pub struct Cli {
    /// Backend origin; overrides `CAMPUS_BASE_URL` from the environment.
    #[arg(long)]
    pub base_url: Option<String>,

    /// Where session cookies are kept between invocations.
    #[arg(long, env = "CAMPUS_SESSION_FILE", default_value = ".campus-session")]
    pub session_file: PathBuf,

    /// Let list and CRUD commands fail on an expired session instead of
    /// renewing it.
    #[arg(long, default_value_t = false)]
    pub no_refresh: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Sign in and keep the session cookies.
    Login {
        #[arg(long, env = "CAMPUS_EMAIL")]
        email: String,
        #[arg(long, env = "CAMPUS_PASSWORD", hide_env_values = true)]
        password: String,
    },
    Register(RegisterArgs),
    /// Show the signed-in user.
    Whoami,
    Logout,
    Profile(ProfileCommand),
    /// Change the account password.
    Password {
        #[arg(long)]
        current: String,
        #[arg(long)]
        new: String,
    },
    Departments(DepartmentCommand),
    Courses(CourseCommand),
    Syllabi(SyllabusCommand),
}

#[derive(Args, Debug)]
pub struct RegisterArgs {
    #[arg(long)]
    pub email: String,
    #[arg(long)]
    pub first_name: String,
    #[arg(long)]
    pub last_name: String,
    #[arg(long)]
    pub password: String,
    /// Defaults to `--password`.
    #[arg(long)]
    pub re_password: Option<String>,
}

#[derive(Args, Debug)]
pub struct ProfileCommand {
    #[command(subcommand)]
    pub command: ProfileSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum ProfileSubcommand {
    Show,
    Update {
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        first_name: Option<String>,
        #[arg(long)]
        last_name: Option<String>,
    },
}

/// Paging and search flags shared by list commands.
#[derive(Args, Debug, Clone)]
pub struct ListArgs {
    #[arg(long, default_value_t = 1)]
    pub page: u32,
    /// Page size; defaults to `CAMPUS_PAGE_SIZE`.
    #[arg(long)]
    pub limit: Option<u32>,
    #[arg(long)]
    pub search: Option<String>,
}

#[derive(Args, Debug)]
pub struct DepartmentCommand {
    #[command(subcommand)]
    pub command: DepartmentSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum DepartmentSubcommand {
    List,
    /// List faculty codes.
    Choices,
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        faculty: String,
    },
    Update {
        id: i64,
        #[arg(long)]
        name: String,
        #[arg(long)]
        faculty: String,
    },
    Delete {
        id: i64,
    },
}

#[derive(Args, Debug)]
pub struct CourseCommand {
    #[command(subcommand)]
    pub command: CourseSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum CourseSubcommand {
    List(ListArgs),
    /// List the option groups for course choice fields.
    Choices,
    Create {
        /// Course fields as JSON, using the backend's upper-case names.
        #[arg(long)]
        data: String,
    },
    Update {
        id: i64,
        #[arg(long)]
        data: String,
    },
    Delete {
        id: i64,
    },
}

#[derive(Args, Debug)]
pub struct SyllabusCommand {
    #[command(subcommand)]
    pub command: SyllabusSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum SyllabusSubcommand {
    List {
        #[command(flatten)]
        list: ListArgs,
        #[arg(long)]
        course: Option<i64>,
    },
    Upload {
        #[arg(long)]
        course: i64,
        file: PathBuf,
    },
    Update {
        id: i64,
        #[arg(long)]
        version: Option<String>,
        #[arg(long)]
        active: Option<bool>,
    },
    Delete {
        id: i64,
    },
}

#[cfg(test)]
#[path = "args_test.rs"]
mod tests;

use std::path::PathBuf;

use clap::{
    Args, CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};
use tracing_subscriber::EnvFilter;

use checkupcli::{
    Error,
    cli::{self, Context},
    client::ApiClient,
    config::{self, ClientConfig},
    error,
    events::EventBus,
    router::Router,
    session::Session,
    warning,
};

fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::White.on_default() | Effects::BOLD)
        .usage(AnsiColor::White.on_default() | Effects::BOLD)
        .literal(AnsiColor::BrightBlue.on_default())
        .placeholder(AnsiColor::BrightGreen.on_default())
}

#[derive(Parser, Debug, Clone)]
#[clap(
  version = env!("CARGO_PKG_VERSION"),
  name=env!("CARGO_PKG_NAME"),
  bin_name=env!("CARGO_PKG_NAME"),
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
)]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Sign in and store the session token
    Login(LoginOptions),

    /// Forget the stored session
    Logout,

    /// Show the signed-in user
    Whoami,

    /// Create a new account
    Register(RegisterOptions),

    /// Exchange the session token for a fresh one
    Refresh,

    /// Password reset and change
    #[command(subcommand)]
    Password(PasswordCommand),

    /// List the client-side routes and their auth requirement
    Routes,

    /// Navigate to a view through the route guard
    Open(OpenOptions),

    /// Health information
    #[command(subcommand)]
    Health(HealthCommand),

    /// Personalised checkup recommendations
    Recommend(RecommendOptions),

    /// Medical reports
    #[command(subcommand)]
    Reports(ReportsCommand),

    /// Basic user profile
    #[command(subcommand)]
    User(UserCommand),

    /// Conversational profile collection
    #[command(subcommand)]
    Profile(ProfileCommand),

    /// User portrait questionnaire
    #[command(subcommand)]
    Portrait(PortraitCommand),

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
pub struct LoginOptions {
    username: String,

    #[clap(long)]
    password: String,

    /// View to continue with after signing in
    #[clap(long)]
    redirect: Option<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct RegisterOptions {
    #[clap(long)]
    username: String,
    #[clap(long)]
    email: String,
    #[clap(long)]
    password: String,
}

#[derive(Subcommand, Debug, Clone)]
pub enum PasswordCommand {
    /// Ask for a reset token by email
    RequestReset {
        #[clap(long)]
        email: String,
    },
    /// Set a new password with a reset token
    Reset {
        #[clap(long)]
        token: String,
        #[clap(long)]
        new_password: String,
    },
    /// Change the password of the signed-in user
    Change {
        #[clap(long)]
        old_password: String,
        #[clap(long)]
        new_password: String,
    },
}

#[derive(Parser, Debug, Clone)]
pub struct OpenOptions {
    /// Path including query, e.g. /report/3/interpretation
    path: String,

    /// Open the view in the web frontend when allowed
    #[clap(long)]
    browser: bool,
}

/// JSON body given inline or read from a file.
#[derive(Args, Debug, Clone)]
pub struct PayloadArgs {
    #[clap(long, conflicts_with = "file")]
    data: Option<String>,
    #[clap(long)]
    file: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct UserIdArg {
    /// Defaults to the id remembered at login
    #[clap(long)]
    user_id: Option<i64>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum HealthCommand {
    Show(UserIdArg),
    Submit(PayloadArgs),
    Update {
        #[clap(flatten)]
        user: UserIdArg,
        #[clap(flatten)]
        payload: PayloadArgs,
    },
    /// Upload a medical report file
    Upload { path: PathBuf },
    /// Generate the user portrait from stored health data
    Portrait,
}

#[derive(Parser, Debug, Clone)]
#[command(args_conflicts_with_subcommands = true)]
pub struct RecommendOptions {
    #[clap(flatten)]
    user: UserIdArg,

    #[command(subcommand)]
    command: Option<RecommendSubcommand>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum RecommendSubcommand {
    /// Send feedback on a recommendation
    Feedback {
        #[clap(flatten)]
        user: UserIdArg,
        #[clap(flatten)]
        payload: PayloadArgs,
    },
}

#[derive(Subcommand, Debug, Clone)]
pub enum ReportsCommand {
    List(UserIdArg),
    Show {
        report_id: i64,
    },
    Upload {
        #[clap(flatten)]
        user: UserIdArg,
        path: PathBuf,
    },
}

#[derive(Subcommand, Debug, Clone)]
pub enum UserCommand {
    Show(UserIdArg),
    Update {
        #[clap(flatten)]
        user: UserIdArg,
        #[clap(flatten)]
        payload: PayloadArgs,
    },
}

#[derive(Subcommand, Debug, Clone)]
pub enum ProfileCommand {
    Init,
    Process(PayloadArgs),
    Save(PayloadArgs),
    Show,
    Update {
        #[clap(flatten)]
        user: UserIdArg,
        #[clap(flatten)]
        payload: PayloadArgs,
    },
    /// Follow-up questions for a symptom
    Questions { symptom: String },
    History,
    ClearHistory,
}

#[derive(Subcommand, Debug, Clone)]
pub enum PortraitCommand {
    Progress,
    Step {
        step: String,
        #[clap(flatten)]
        payload: PayloadArgs,
    },
    Answer {
        answer: String,
    },
    Skip,
    Reset,
    Steps,
    Status,
    Show,
    Symptoms,
    Update(PayloadArgs),
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = config::load_env().await {
        error!("Cannot load environment. Err: {}", e);
    }

    let cli = Cli::parse();

    if let Command::Completions(opt) = &cli.command {
        let mut cmd = Cli::command();
        let name = cmd.get_name().to_string();
        generate(opt.shell, &mut cmd, name, &mut std::io::stdout());
        return;
    }

    let session_path = config::session_path();
    let session = match Session::load(&session_path).await {
        Ok(session) => session,
        Err(e @ Error::Serialization(_)) => {
            warning!(
                "Ignoring unreadable session file {}: {}",
                session_path.display(),
                e
            );
            Session::at(session_path)
        }
        Err(e) => error!("Cannot read session file: {}", e),
    };
    let client = match ApiClient::builder(ClientConfig::from_env())
        .session(session)
        .events(EventBus::new())
        .build()
    {
        Ok(client) => client,
        Err(e) => error!("Cannot build HTTP client: {}", e),
    };

    let mut ctx = Context::new(client, Router::new());
    run(&ctx, cli.command).await;
    ctx.flush_events();
}

async fn run(ctx: &Context, command: Command) {
    match command {
        Command::Login(opt) => cli::login(ctx, &opt.username, &opt.password, opt.redirect).await,
        Command::Logout => cli::logout(ctx).await,
        Command::Whoami => cli::whoami(ctx).await,
        Command::Register(opt) => cli::register(ctx, opt.username, opt.email, opt.password).await,
        Command::Refresh => cli::refresh(ctx).await,
        Command::Password(cmd) => match cmd {
            PasswordCommand::RequestReset { email } => cli::request_reset(ctx, &email).await,
            PasswordCommand::Reset {
                token,
                new_password,
            } => cli::reset(ctx, &token, &new_password).await,
            PasswordCommand::Change {
                old_password,
                new_password,
            } => cli::change_password(ctx, &old_password, &new_password).await,
        },
        Command::Routes => cli::list_routes(ctx),
        Command::Open(opt) => cli::open(ctx, &opt.path, opt.browser).await,
        Command::Health(cmd) => match cmd {
            HealthCommand::Show(u) => cli::health_show(ctx, u.user_id).await,
            HealthCommand::Submit(p) => cli::health_submit(ctx, p.data, p.file).await,
            HealthCommand::Update { user, payload } => {
                cli::health_update(ctx, user.user_id, payload.data, payload.file).await
            }
            HealthCommand::Upload { path } => cli::health_upload(ctx, path).await,
            HealthCommand::Portrait => cli::health_portrait(ctx).await,
        },
        Command::Recommend(opt) => match opt.command {
            Some(RecommendSubcommand::Feedback { user, payload }) => {
                cli::recommend_feedback(ctx, user.user_id, payload.data, payload.file).await
            }
            None => cli::recommend(ctx, opt.user.user_id).await,
        },
        Command::Reports(cmd) => match cmd {
            ReportsCommand::List(u) => cli::reports_list(ctx, u.user_id).await,
            ReportsCommand::Show { report_id } => cli::reports_show(ctx, report_id).await,
            ReportsCommand::Upload { user, path } => {
                cli::reports_upload(ctx, user.user_id, path).await
            }
        },
        Command::User(cmd) => match cmd {
            UserCommand::Show(u) => cli::user_show(ctx, u.user_id).await,
            UserCommand::Update { user, payload } => {
                cli::user_update(ctx, user.user_id, payload.data, payload.file).await
            }
        },
        Command::Profile(cmd) => match cmd {
            ProfileCommand::Init => cli::profile_init(ctx).await,
            ProfileCommand::Process(p) => cli::profile_process(ctx, p.data, p.file).await,
            ProfileCommand::Save(p) => cli::profile_save(ctx, p.data, p.file).await,
            ProfileCommand::Show => cli::profile_show(ctx).await,
            ProfileCommand::Update { user, payload } => {
                cli::profile_update(ctx, user.user_id, payload.data, payload.file).await
            }
            ProfileCommand::Questions { symptom } => cli::profile_questions(ctx, &symptom).await,
            ProfileCommand::History => cli::profile_history(ctx).await,
            ProfileCommand::ClearHistory => cli::profile_clear_history(ctx).await,
        },
        Command::Portrait(cmd) => match cmd {
            PortraitCommand::Progress => cli::portrait_progress(ctx).await,
            PortraitCommand::Step { step, payload } => {
                cli::portrait_step(ctx, &step, payload.data, payload.file).await
            }
            PortraitCommand::Answer { answer } => cli::portrait_answer(ctx, &answer).await,
            PortraitCommand::Skip => cli::portrait_skip(ctx).await,
            PortraitCommand::Reset => cli::portrait_reset(ctx).await,
            PortraitCommand::Steps => cli::portrait_steps(ctx).await,
            PortraitCommand::Status => cli::portrait_status(ctx).await,
            PortraitCommand::Show => cli::portrait_show(ctx).await,
            PortraitCommand::Symptoms => cli::portrait_symptoms(ctx).await,
            PortraitCommand::Update(p) => cli::portrait_update(ctx, p.data, p.file).await,
        },
        Command::Completions(_) => {}
    }
}

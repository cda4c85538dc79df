//! Command-line surface
//!
//! Every page and action of the client as a `clap` command tree:
//! - `open <path>` routes and renders any page path
//! - `signup`, `login`, `logout` manage the stored session
//! - user actions (`events`, `register`, `tickets`, `cancel`, `profile`, ...)
//! - `admin ...` for the admin console

use std::path::PathBuf;
use clap::{Args, Parser, Subcommand};

use crate::config::Settings;
use crate::context::AppContext;
use crate::handlers::{self, admin, auth, user};
use crate::models::{Decision, EventRequest, EventUpdate, NewEvent, Role};
use crate::utils::errors::Result;
use crate::views::discovery::{EventFilters, SortOrder};
use crate::views::Page;

#[derive(Parser, Debug)]
#[command(name = "eventr")]
#[command(author, version, about = "Terminal client for the EVENTR event platform", long_about = None)]
pub struct Cli {
    /// Configuration file, without extension
    #[arg(short, long, default_value = "eventr")]
    pub config: PathBuf,

    /// Override the API base URL
    #[arg(long, env = "EVENTR_API_URL")]
    pub api_url: Option<String>,

    /// Override the log level
    #[arg(short, long)]
    pub log_level: Option<String>,

    /// Override the session file location
    #[arg(long, env = "EVENTR_SESSION_FILE")]
    pub session_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    /// Apply command-line overrides on top of loaded settings
    pub fn apply_overrides(&self, settings: &mut Settings) {
        if let Some(url) = &self.api_url {
            settings.api.base_url = url.clone();
        }
        if let Some(level) = &self.log_level {
            settings.logging.level = level.clone();
        }
        if let Some(path) = &self.session_file {
            settings.session.file_path = path.to_string_lossy().into_owned();
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Open a page by path, e.g. /user/dashboard
    Open {
        #[arg(default_value = "/")]
        path: String,
    },

    /// Create an account
    Signup {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long, env = "EVENTR_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Sign in
    Login {
        #[arg(long)]
        email: String,
        #[arg(long, env = "EVENTR_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Sign out and forget the stored session
    Logout,

    /// Discover events
    Events {
        /// Match against title or location
        #[arg(short, long, default_value = "")]
        search: String,
        #[arg(long)]
        category: Option<String>,
        /// default, date or popularity
        #[arg(long, default_value = "default")]
        sort: SortOrder,
    },

    /// Request a seat at an event
    Register {
        event_id: String,
        /// Defaults to the profile name
        #[arg(long)]
        name: Option<String>,
        /// Defaults to the profile email
        #[arg(long)]
        email: Option<String>,
    },

    /// List your registrations and ticket states
    Tickets,

    /// Show the digital ticket of an approved registration
    Ticket { registration_id: String },

    /// List your registrations with their events
    Registrations,

    /// Cancel a pending registration
    Cancel { registration_id: String },

    /// Show or edit your profile
    Profile {
        #[command(subcommand)]
        action: Option<ProfileCommands>,
    },

    /// Propose a new event
    RequestEvent(EventRequestArgs),

    /// Admin console
    #[command(subcommand)]
    Admin(AdminCommands),
}

#[derive(Subcommand, Debug)]
pub enum ProfileCommands {
    Show,
    Update {
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        bio: Option<String>,
        #[arg(long)]
        address: Option<String>,
    },
    /// Upload a new profile picture
    Avatar { file: PathBuf },
}

#[derive(Args, Debug)]
pub struct EventRequestArgs {
    #[arg(long)]
    pub title: String,
    #[arg(long)]
    pub description: String,
    #[arg(long)]
    pub date: String,
    #[arg(long)]
    pub location: String,
}

#[derive(Args, Debug)]
pub struct CreateEventArgs {
    #[arg(long)]
    pub title: String,
    #[arg(long)]
    pub category: String,
    #[arg(long)]
    pub date: String,
    #[arg(long)]
    pub time: String,
    #[arg(long)]
    pub location: String,
    #[arg(long)]
    pub description: String,
    #[arg(long, default_value = "")]
    pub image_url: String,
    #[arg(long, default_value_t = 0.0)]
    pub price: f64,
    #[arg(long, default_value_t = 0)]
    pub seats: u32,
}

#[derive(Subcommand, Debug)]
pub enum AdminCommands {
    Dashboard,
    Events,
    CreateEvent(CreateEventArgs),
    UpdateEvent {
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        date: Option<String>,
        /// New cover image; sends the update as multipart
        #[arg(long)]
        image: Option<PathBuf>,
    },
    DeleteEvent { id: String },
    Users,
    SetRole { id: String, role: Role },
    ToggleBlock { id: String },
    DeleteUser { id: String },
    Registrations,
    Approve { id: String },
    Reject { id: String },
    Analytics,
}

/// Run one command against the context and return the page it produced
pub async fn dispatch(ctx: &AppContext, command: Commands) -> Result<Page> {
    match command {
        Commands::Open { path } => handlers::open(ctx, &path).await,
        Commands::Signup { name, email, password } => auth::signup(ctx, &name, &email, &password).await,
        Commands::Login { email, password } => auth::login(ctx, &email, &password).await,
        Commands::Logout => auth::logout(ctx),
        Commands::Events { search, category, sort } => {
            let filters = EventFilters { query: search, category, sort };
            user::discover(ctx, &filters).await
        }
        Commands::Register { event_id, name, email } => {
            user::register(ctx, &event_id, name.as_deref(), email.as_deref()).await
        }
        Commands::Tickets => user::tickets(ctx).await,
        Commands::Ticket { registration_id } => user::show_ticket(ctx, &registration_id).await,
        Commands::Registrations => user::registrations(ctx).await,
        Commands::Cancel { registration_id } => user::cancel(ctx, &registration_id).await,
        Commands::Profile { action } => match action.unwrap_or(ProfileCommands::Show) {
            ProfileCommands::Show => user::profile_page(ctx).await,
            ProfileCommands::Update { name, email, phone, bio, address } => {
                let changes = user::ProfileChanges { name, email, phone, bio, address };
                user::update_profile(ctx, changes).await
            }
            ProfileCommands::Avatar { file } => user::upload_avatar(ctx, &file).await,
        },
        Commands::RequestEvent(args) => {
            let request = EventRequest {
                title: args.title,
                description: args.description,
                date: args.date,
                location: args.location,
            };
            user::request_event(ctx, &request).await
        }
        Commands::Admin(command) => dispatch_admin(ctx, command).await,
    }
}

async fn dispatch_admin(ctx: &AppContext, command: AdminCommands) -> Result<Page> {
    match command {
        AdminCommands::Dashboard => admin::dashboard(ctx).await,
        AdminCommands::Events => admin::events(ctx).await,
        AdminCommands::CreateEvent(args) => {
            let event = NewEvent {
                title: args.title,
                category: args.category,
                date: args.date,
                time: args.time,
                location: args.location,
                description: args.description,
                image_url: args.image_url,
                price: args.price,
                available_seats: args.seats,
            };
            admin::create_event(ctx, &event).await
        }
        AdminCommands::UpdateEvent { id, title, category, date, image } => {
            let update = EventUpdate { title, category, date };
            admin::update_event(ctx, &id, &update, image.as_deref()).await
        }
        AdminCommands::DeleteEvent { id } => admin::delete_event(ctx, &id).await,
        AdminCommands::Users => admin::users(ctx).await,
        AdminCommands::SetRole { id, role } => admin::set_role(ctx, &id, role).await,
        AdminCommands::ToggleBlock { id } => admin::toggle_block(ctx, &id).await,
        AdminCommands::DeleteUser { id } => admin::delete_user(ctx, &id).await,
        AdminCommands::Registrations => admin::registrations(ctx).await,
        AdminCommands::Approve { id } => admin::decide(ctx, &id, Decision::Approve).await,
        AdminCommands::Reject { id } => admin::decide(ctx, &id, Decision::Reject).await,
        AdminCommands::Analytics => admin::analytics(ctx).await,
    }
}

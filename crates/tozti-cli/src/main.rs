//! tozti CLI: command-line client for the tozti API.
//!
//! Set TOZTI_ORIGIN (or TOZTI_URL). Commands needing a session accept
//! `--user` and `--user-password` and log in first.

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use serde_json::json;
use tozti_api_client::{ApiClient, SignupRequest};
use tozti_cli::{init_tracing, parse_json_arg, print_json};
use tozti_core::config::normalize_origin;
use tozti_core::{ClientConfig, NewResource};
use tozti_extensions::{Bootstrap, ExtensionRegistry};
use tracing::info;

#[derive(Parser)]
#[command(name = "tozti", about = "tozti API CLI")]
struct Cli {
    /// Backend origin, overrides TOZTI_ORIGIN
    #[arg(long, global = true)]
    origin: Option<String>,
    /// Handle to log in with before running the command
    #[arg(long, global = true, requires = "user_password")]
    user: Option<String>,
    #[arg(long, global = true, requires = "user")]
    user_password: Option<String>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch a resource by id
    Get { id: String },
    /// List resources of a type, e.g. core/folder
    ByType { resource_type: String },
    /// Create a resource from `{"type": .., "attributes": ..}` (or @file)
    Create { resource: String },
    /// Patch a resource with a JSON-API document (or @file)
    Update { id: String, patch: String },
    /// Delete a resource
    Delete { id: String },
    /// Show, replace or extend a relationship
    Rel {
        id: String,
        rel: String,
        /// Replace the relationship data with this JSON (or @file)
        #[arg(long, conflicts_with = "append")]
        set: Option<String>,
        /// Append this JSON (or @file) to a to-many relationship
        #[arg(long)]
        append: Option<String>,
    },
    /// Log in and print the backend's answer
    Login { handle: String, password: String },
    /// Create an account
    Signup {
        handle: String,
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Show the logged-in user
    Me,
    /// Print the endpoint table
    Endpoints,
    /// Print the core extension manifest
    Manifest {
        /// Include the logged-in user
        #[arg(long)]
        session: bool,
    },
}

fn load_config(origin: Option<&str>) -> anyhow::Result<ClientConfig> {
    let mut config = ClientConfig::from_env().context(
        "Failed to load client configuration. Check TOZTI_ORIGIN and TOZTI_TIMEOUT_SECS",
    )?;
    if let Some(origin) = origin {
        config.origin = normalize_origin(origin)?;
    }
    Ok(config)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let config = load_config(cli.origin.as_deref())?;
    let client = ApiClient::from_config(&config).context("Failed to create API client")?;

    if let (Some(user), Some(password)) = (&cli.user, &cli.user_password) {
        let response = client.login(user, password).await?;
        if !response.logged {
            bail!("Login refused for {}", user);
        }
        info!(user = %user, "Logged in");
    }

    match cli.command {
        Commands::Get { id } => {
            print_json(&client.get_resource(&id).await?)?;
        }
        Commands::ByType { resource_type } => {
            print_json(&client.list_by_type(&resource_type).await?)?;
        }
        Commands::Create { resource } => {
            let resource: NewResource = serde_json::from_value(parse_json_arg(&resource)?)
                .context("Resource must have a `type` and optional `attributes`")?;
            print_json(&client.create_resource(resource).await?)?;
        }
        Commands::Update { id, patch } => {
            let patch = parse_json_arg(&patch)?;
            print_json(&client.update_resource(&id, &patch).await?)?;
        }
        Commands::Delete { id } => {
            client.delete_resource(&id).await?;
            print_json(
                &json!({ "success": true, "message": format!("Resource {} deleted", id) }),
            )?;
        }
        Commands::Rel {
            id,
            rel,
            set,
            append,
        } => {
            let response = match (set, append) {
                (Some(data), _) => {
                    client
                        .replace_relationship(&id, &rel, &parse_json_arg(&data)?)
                        .await
                }
                (None, Some(data)) => {
                    client
                        .append_relationship(&id, &rel, &parse_json_arg(&data)?)
                        .await
                }
                (None, None) => client.get_relationship(&id, &rel).await,
            };
            print_json(&response?)?;
        }
        Commands::Login { handle, password } => {
            print_json(&client.login(&handle, &password).await?)?;
        }
        Commands::Signup {
            handle,
            name,
            email,
            password,
        } => {
            let request = SignupRequest {
                handle,
                name,
                email,
                passwd: password,
            };
            print_json(&client.signup(&request).await?)?;
        }
        Commands::Me => {
            print_json(&client.me().await?)?;
        }
        Commands::Endpoints => {
            let endpoints = client.endpoints();
            print_json(&json!({
                "origin": endpoints.origin(),
                "resources": endpoints.resources,
                "types": endpoints.types,
                "me": endpoints.me,
                "login": endpoints.login,
                "signup": endpoints.signup,
            }))?;
        }
        Commands::Manifest { session } => {
            let bootstrap = Bootstrap::new(ExtensionRegistry::with_core_defaults(client));
            let extensions = if session {
                bootstrap.launch_with_session().await?
            } else {
                bootstrap.launch()?
            };
            print_json(&extensions.manifest())?;
        }
    }

    Ok(())
}

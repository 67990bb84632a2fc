use crate::{
    client::{ApiMethod, ApiPayload, RequestBody, RequestOptions},
    domain::{ExportFormat, Resource},
    handler::Navigation,
    middleware::RoleRequirement,
    state::AppState,
};
use anyhow::{Context, Result, anyhow};
use clap::{Parser, Subcommand};
use serde_json::Value;
use shared::{
    config::Config,
    domain::requests::LoginRequest,
    errors::{ClientError, ServiceError},
};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "pidash")]
#[command(version)]
#[command(about = "Command-line client for the PI dashboard API", long_about = None)]
pub struct Cli {
    /// API base URL, overrides API_BASE_URL
    #[arg(long, value_name = "URL")]
    pub api_url: Option<String>,

    /// Directory holding the session file, overrides SESSION_DIR
    #[arg(long, value_name = "DIR")]
    pub session_dir: Option<PathBuf>,

    /// Keep the session in memory only
    #[arg(long)]
    pub ephemeral: bool,

    /// Print request metrics after the command
    #[arg(long)]
    pub metrics: bool,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    pub fn apply_overrides(&self, config: &mut Config) {
        if let Some(url) = &self.api_url {
            config.api_base_url = url.trim_end_matches('/').to_string();
        }
        if let Some(dir) = &self.session_dir {
            config.session_dir = dir.clone();
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Log in and store the session
    Login {
        #[arg(short, long)]
        email: String,
        #[arg(short, long, env = "PIDASH_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Drop the stored session
    Logout,
    /// Show the locally stored user
    Whoami,
    /// Fetch the current profile from the server
    Me,
    /// Check where opening a dashboard view leads
    Open { path: String },
    /// List dashboard views and the roles they require
    Routes,
    /// Raw GET
    Get {
        path: String,
        #[arg(long)]
        no_auth: bool,
    },
    /// Raw POST with an optional JSON body
    Post {
        path: String,
        #[arg(long)]
        body: Option<String>,
        #[arg(long)]
        no_auth: bool,
    },
    /// Raw PUT with an optional JSON body
    Put {
        path: String,
        #[arg(long)]
        body: Option<String>,
        #[arg(long)]
        no_auth: bool,
    },
    /// Raw DELETE
    Delete {
        path: String,
        #[arg(long)]
        no_auth: bool,
    },
    /// Download a binary response to a file
    Download {
        path: String,
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
    /// List a resource collection
    List {
        resource: Resource,
        /// Query filter as key=value, repeatable
        #[arg(long = "filter", value_parser = parse_key_val)]
        filters: Vec<(String, String)>,
    },
    /// Show one item of a resource
    Show { resource: Resource, id: String },
    /// Export a resource collection as produced by the server
    Export {
        resource: Resource,
        #[arg(long, default_value = "csv")]
        format: ExportFormat,
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
    /// Attach a file to a resource item
    Upload {
        resource: Resource,
        id: String,
        file: PathBuf,
    },
}

fn parse_key_val(s: &str) -> Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("invalid filter '{s}', expected key=value"))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("invalid filter '{s}', empty key"));
    }
    Ok((key.to_string(), value.to_string()))
}

fn parse_body(body: Option<&str>) -> Result<RequestBody> {
    match body {
        None => Ok(RequestBody::None),
        Some(raw) => {
            let value: Value = serde_json::from_str(raw).context("--body must be valid JSON")?;
            Ok(RequestBody::Json(value))
        }
    }
}

fn options(no_auth: bool) -> RequestOptions {
    if no_auth {
        RequestOptions::public()
    } else {
        RequestOptions::default()
    }
}

fn print_value(value: &Value) -> Result<()> {
    match value {
        Value::String(text) => println!("{text}"),
        other => println!("{}", serde_json::to_string_pretty(other)?),
    }
    Ok(())
}

fn print_payload(payload: ApiPayload) -> Result<()> {
    print_value(&payload.into_value())
}

fn describe_requirement(requirement: &RoleRequirement) -> String {
    match requirement {
        RoleRequirement::Any => "any".to_string(),
        RoleRequirement::One(role) => role.to_string(),
        RoleRequirement::AnyOf(roles) => roles
            .iter()
            .map(|r| r.to_string())
            .collect::<Vec<_>>()
            .join(", "),
    }
}

fn describe_navigation(navigation: &Navigation) -> String {
    match navigation {
        Navigation::Rendered { path, title } => format!("render {path} ({title})"),
        Navigation::Redirected { from, to } => format!("redirect {from} -> {to}"),
        Navigation::NotFound { path } => format!("not found: {path}"),
    }
}

async fn write_file(out: &Path, bytes: &[u8]) -> Result<()> {
    tokio::fs::write(out, bytes)
        .await
        .with_context(|| format!("Failed to write {}", out.display()))?;
    println!("Wrote {} bytes to {}", bytes.len(), out.display());
    Ok(())
}

/// True when the failure came from a 401 that ended the session.
pub fn is_authorization_lost(err: &anyhow::Error) -> bool {
    err.chain().any(|cause| {
        cause
            .downcast_ref::<ClientError>()
            .is_some_and(ClientError::is_authorization_lost)
            || cause
                .downcast_ref::<ServiceError>()
                .is_some_and(ServiceError::is_authorization_lost)
    })
}

pub async fn run(state: &AppState, command: Commands) -> Result<()> {
    let auth = &state.di_container.auth_service;
    let resources = &state.di_container.resource_service;

    match command {
        Commands::Login { email, password } => {
            let user = auth.login(&LoginRequest::new(email, password)).await?;
            println!("Logged in as {} ({})", user.display_name(), user.role);
            println!("{}", describe_navigation(&state.router.after_login()));
        }
        Commands::Logout => {
            auth.logout().await?;
            println!("Logged out");
        }
        Commands::Whoami => match auth.current_user() {
            Some(user) => println!(
                "{} <{}> id={} role={}",
                user.display_name(),
                user.email,
                user.id,
                user.role
            ),
            None => println!("Not logged in"),
        },
        Commands::Me => {
            let user = auth.me().await?;
            print_value(&serde_json::to_value(&user)?)?;
        }
        Commands::Open { path } => {
            println!("{}", describe_navigation(&state.router.open(&path)));
        }
        Commands::Routes => {
            for route in state.router.routes().routes() {
                let access = if route.public {
                    "public".to_string()
                } else {
                    describe_requirement(&route.requirement)
                };
                println!("{:<14} {:<22} {}", route.path, route.title, access);
            }
        }
        Commands::Get { path, no_auth } => {
            let payload = state
                .client
                .request(ApiMethod::Get, &path, RequestBody::None, options(no_auth))
                .await?;
            print_payload(payload)?;
        }
        Commands::Post {
            path,
            body,
            no_auth,
        } => {
            let body = parse_body(body.as_deref())?;
            let payload = state
                .client
                .request(ApiMethod::Post, &path, body, options(no_auth))
                .await?;
            print_payload(payload)?;
        }
        Commands::Put {
            path,
            body,
            no_auth,
        } => {
            let body = parse_body(body.as_deref())?;
            let payload = state
                .client
                .request(ApiMethod::Put, &path, body, options(no_auth))
                .await?;
            print_payload(payload)?;
        }
        Commands::Delete { path, no_auth } => {
            let payload = state
                .client
                .request(ApiMethod::Delete, &path, RequestBody::None, options(no_auth))
                .await?;
            print_payload(payload)?;
        }
        Commands::Download { path, out } => {
            let download = state
                .client
                .download(&path, RequestOptions::default())
                .await?;
            let out = out
                .or_else(|| download.filename.as_ref().map(PathBuf::from))
                .ok_or_else(|| anyhow!("No file name from the server, pass --out"))?;
            write_file(&out, &download.bytes).await?;
        }
        Commands::List { resource, filters } => {
            let rows = resources.list(resource, &filters).await?;
            print_value(&rows)?;
        }
        Commands::Show { resource, id } => {
            let item = resources.get(resource, &id).await?;
            print_value(&item)?;
        }
        Commands::Export {
            resource,
            format,
            out,
        } => {
            let download = resources.export(resource, format).await?;
            let out = out
                .or_else(|| download.filename.as_ref().map(PathBuf::from))
                .unwrap_or_else(|| PathBuf::from(format!("{resource}.{}", format.as_str())));
            write_file(&out, &download.bytes).await?;
        }
        Commands::Upload { resource, id, file } => {
            let bytes = tokio::fs::read(&file)
                .await
                .with_context(|| format!("Failed to read {}", file.display()))?;
            let file_name = file
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| "upload.bin".to_string());
            let result = resources.upload(resource, &id, &file_name, bytes).await?;
            print_value(&result)?;
        }
    }

    Ok(())
}

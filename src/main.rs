//! deskhand CLI: the operational surface of the admin console workflow core.
//!
//! Every command dispatches to the same generic helpers the console pages
//! use: fetch a collection, filter it locally, validate and apply
//! transitions, and print the backend's authoritative records.

use anyhow::{anyhow, bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing::Instrument;

use deskhand::backend::{AuthToken, BackendError, EntityBackend, GraphqlBackend, SeedBackend};
use deskhand::config::{config, DeskhandConfig};
use deskhand::entity::{Entity, EntityKind};
use deskhand::kinds::{
    approval, forum, okr, order, returns, subscription, ApprovalPost, ForumReport, ForumThread,
    Objective, Order, ReportStatus, ReturnRequest, Subscription, ThreadStatus,
};
use deskhand::observability::{api_metrics, OperationTimer};
use deskhand::store::{filter_collection, Collection, CollectionQuery};
use deskhand::telemetry::{create_transition_span, generate_correlation_id};
use deskhand::workflow::graph::{SideEffectData, StatusGraph};
use deskhand::workflow::{transition_with_dependents, WorkflowEngine};

#[derive(Parser)]
#[command(
    name = "deskhand",
    about = "Operations console workflow CLI",
    version
)]
struct Cli {
    /// Use in-memory seed data instead of the configured backend
    #[arg(long, global = true)]
    seed: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch a collection and print the filtered view
    List {
        /// Entity kind (order, return, subscription, approval, thread, report, okr)
        kind: String,
        /// Case-insensitive free-text search
        #[arg(long)]
        search: Option<String>,
        /// Exact status filter
        #[arg(long)]
        status: Option<String>,
        /// Additional exact-match facets, e.g. --facet platform=instagram
        #[arg(long = "facet", value_parser = parse_key_val)]
        facets: Vec<(String, String)>,
        /// Print full records as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show the legal next statuses from a given status
    Transitions {
        kind: String,
        status: String,
    },
    /// Apply a status transition to one entity
    Transition {
        kind: String,
        id: String,
        target: String,
        /// Side-effect fields, e.g. --set approvedBy=dana --set feedback="looks good"
        #[arg(long = "set", value_parser = parse_key_val)]
        fields: Vec<(String, String)>,
    },
    /// Create a new entity from a JSON object of fields
    Create {
        kind: String,
        /// JSON object with the kind's payload fields (id is backend-assigned)
        data: String,
    },
    /// Remove a forum thread and resolve its open reports in one action
    RemoveThread {
        id: String,
    },
}

fn parse_key_val(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => Err(format!("expected KEY=VALUE, got `{s}`")),
    }
}

fn parse_kind(s: &str) -> Result<EntityKind> {
    EntityKind::parse(s).ok_or_else(|| anyhow!("unknown entity kind `{s}`"))
}

fn parse_status<E: Entity>(s: &str) -> Result<E::Status> {
    E::Status::parse(s).ok_or_else(|| anyhow!("unknown {} status `{s}`", E::kind()))
}

fn side_effect_data(fields: Vec<(String, String)>) -> SideEffectData {
    fields
        .into_iter()
        .map(|(key, value)| (key, serde_json::Value::String(value)))
        .collect()
}

fn seed_token() -> AuthToken {
    AuthToken::new("seed-local")
}

fn backend_token(cfg: &DeskhandConfig) -> Result<AuthToken> {
    cfg.backend.token.clone().map(AuthToken::new).ok_or_else(|| {
        BackendError::TokenMissing(
            "set DESKHAND_BACKEND_TOKEN or backend.token in deskhand.toml".to_string(),
        )
        .into()
    })
}

/// Calls `$helper::<E, _>(engine, token, args...)` with the right entity type
/// and backend (seed or GraphQL) for `$kind`.
macro_rules! dispatch_kind {
    ($kind:expr, $seed:expr, $helper:ident ( $($arg:expr),* $(,)? )) => {
        match $kind {
            EntityKind::Order => with_backend($seed, order::seed_orders(), |e, t| $helper(e, t, $($arg),*)).await,
            EntityKind::Return => with_backend($seed, returns::seed_returns(), |e, t| $helper(e, t, $($arg),*)).await,
            EntityKind::Subscription => with_backend($seed, subscription::seed_subscriptions(), |e, t| $helper(e, t, $($arg),*)).await,
            EntityKind::ApprovalPost => with_backend($seed, approval::seed_approval_posts(), |e, t| $helper(e, t, $($arg),*)).await,
            EntityKind::ForumThread => with_backend($seed, forum::seed_forum_threads(), |e, t| $helper(e, t, $($arg),*)).await,
            EntityKind::ForumReport => with_backend($seed, forum::seed_forum_reports(), |e, t| $helper(e, t, $($arg),*)).await,
            EntityKind::Objective => with_backend($seed, okr::seed_objectives(), |e, t| $helper(e, t, $($arg),*)).await,
        }
    };
}

/// Builds the engine for either backend and hands it to `run` together with
/// the auth token. The closure indirection keeps the two monomorphizations
/// (seed vs GraphQL) in one place.
async fn with_backend<E, F, Fut>(use_seed: bool, seeds: Vec<E>, run: F) -> Result<()>
where
    E: Entity,
    F: FnOnce(EngineKind<E>, AuthToken) -> Fut,
    Fut: std::future::Future<Output = Result<()>>,
{
    if use_seed {
        let engine = WorkflowEngine::new(ConsoleBackend::<E>::Seed(SeedBackend::new(seeds)));
        run(engine, seed_token()).await
    } else {
        let cfg = config()?;
        let token = backend_token(cfg)?;
        let engine = WorkflowEngine::new(ConsoleBackend::<E>::Graphql(GraphqlBackend::new(
            &cfg.backend,
        )?));
        run(engine, token).await
    }
}

type EngineKind<E> = WorkflowEngine<E, ConsoleBackend<E>>;

/// Either backend behind one type so command helpers stay monomorphic.
enum ConsoleBackend<E> {
    Seed(SeedBackend<E>),
    Graphql(GraphqlBackend<E>),
}

#[async_trait::async_trait]
impl<E: Entity> EntityBackend<E> for ConsoleBackend<E> {
    async fn fetch_all(
        &self,
        token: &AuthToken,
    ) -> Result<Vec<E>, deskhand::BackendError> {
        match self {
            ConsoleBackend::Seed(b) => b.fetch_all(token).await,
            ConsoleBackend::Graphql(b) => b.fetch_all(token).await,
        }
    }

    async fn update(
        &self,
        id: &deskhand::EntityId,
        patch: deskhand::UpdatePatch<E::Status>,
        token: &AuthToken,
    ) -> Result<E, deskhand::BackendError> {
        match self {
            ConsoleBackend::Seed(b) => b.update(id, patch, token).await,
            ConsoleBackend::Graphql(b) => b.update(id, patch, token).await,
        }
    }

    async fn create(
        &self,
        fields: serde_json::Value,
        token: &AuthToken,
    ) -> Result<E, deskhand::BackendError> {
        match self {
            ConsoleBackend::Seed(b) => b.create(fields, token).await,
            ConsoleBackend::Graphql(b) => b.create(fields, token).await,
        }
    }
}

async fn run_list<E: Entity>(
    engine: EngineKind<E>,
    token: AuthToken,
    query: CollectionQuery,
    json: bool,
) -> Result<()> {
    let mut collection = Collection::new();
    let timer = OperationTimer::new("list_refresh");
    engine.refresh(&mut collection, &token).await?;
    timer.finish();
    let view = filter_collection(collection.entries(), &query);

    if json {
        println!("{}", serde_json::to_string_pretty(&view)?);
        return Ok(());
    }

    println!("{:<12} {:<20} {:<24}", "ID", "STATUS", "UPDATED");
    for entity in &view {
        println!(
            "{:<12} {:<20} {:<24}",
            entity.id().as_str(),
            entity.status().as_str(),
            entity.updated_at().to_rfc3339()
        );
    }
    if query.is_unfiltered() {
        println!("{} records", collection.len());
    } else {
        println!("{} of {} records", view.len(), collection.len());
    }
    Ok(())
}

async fn run_transition<E: Entity>(
    engine: EngineKind<E>,
    token: AuthToken,
    id: String,
    target: String,
    fields: Vec<(String, String)>,
) -> Result<()> {
    let correlation_id = generate_correlation_id();
    let span = create_transition_span(E::kind().as_str(), &id, &target, Some(&correlation_id));
    let target = parse_status::<E>(&target)?;

    async {
        let mut collection = Collection::new();
        engine.refresh(&mut collection, &token).await?;
        let updated = engine
            .apply_transition(
                &mut collection,
                &id.as_str().into(),
                target,
                side_effect_data(fields),
                &token,
            )
            .await?;
        println!("{}", serde_json::to_string_pretty(&updated)?);
        Ok(())
    }
    .instrument(span)
    .await
}

async fn run_create<E: Entity>(
    engine: EngineKind<E>,
    token: AuthToken,
    data: String,
) -> Result<()> {
    let fields: serde_json::Value =
        serde_json::from_str(&data).context("create data must be a JSON object")?;
    let mut collection = Collection::new();
    let created = engine.create(&mut collection, fields, &token).await?;
    println!("{}", serde_json::to_string_pretty(&created)?);
    Ok(())
}

fn run_transitions(kind: EntityKind, status: &str) -> Result<()> {
    fn print_for<E: Entity>(status: &str) -> Result<()> {
        let status = parse_status::<E>(status)?;
        let next = status.transitions();
        if next.is_empty() {
            println!("{} is terminal", status.as_str());
        } else {
            for target in next {
                println!("{}", target.as_str());
            }
        }
        Ok(())
    }

    match kind {
        EntityKind::Order => print_for::<Order>(status),
        EntityKind::Return => print_for::<ReturnRequest>(status),
        EntityKind::Subscription => print_for::<Subscription>(status),
        EntityKind::ApprovalPost => print_for::<ApprovalPost>(status),
        EntityKind::ForumThread => print_for::<ForumThread>(status),
        EntityKind::ForumReport => print_for::<ForumReport>(status),
        EntityKind::Objective => print_for::<Objective>(status),
    }
}

async fn run_remove_thread(use_seed: bool, id: String) -> Result<()> {
    if !use_seed {
        let cfg = config()?;
        let token = backend_token(cfg)?;
        let thread_engine = WorkflowEngine::new(GraphqlBackend::<ForumThread>::new(&cfg.backend)?);
        let report_engine = WorkflowEngine::new(GraphqlBackend::<ForumReport>::new(&cfg.backend)?);
        remove_thread(&thread_engine, &report_engine, id, token).await
    } else {
        let thread_engine =
            WorkflowEngine::new(SeedBackend::new(forum::seed_forum_threads()));
        let report_engine =
            WorkflowEngine::new(SeedBackend::new(forum::seed_forum_reports()));
        remove_thread(&thread_engine, &report_engine, id, seed_token()).await
    }
}

async fn remove_thread<BT, BR>(
    thread_engine: &WorkflowEngine<ForumThread, BT>,
    report_engine: &WorkflowEngine<ForumReport, BR>,
    id: String,
    token: AuthToken,
) -> Result<()>
where
    BT: EntityBackend<ForumThread>,
    BR: EntityBackend<ForumReport>,
{
    let mut threads = Collection::new();
    let mut reports = Collection::new();
    thread_engine.refresh(&mut threads, &token).await?;
    report_engine.refresh(&mut reports, &token).await?;

    let thread_id = id.as_str().into();
    let dependents = forum::open_report_ids(&reports, &thread_id);
    let outcome = transition_with_dependents(
        thread_engine,
        &mut threads,
        &thread_id,
        ThreadStatus::Removed,
        SideEffectData::new(),
        report_engine,
        &mut reports,
        &dependents,
        ReportStatus::Resolved,
        &token,
    )
    .await?;

    println!(
        "thread {} removed; {} reports resolved",
        outcome.primary.id, outcome.resolved.len()
    );
    if !outcome.fully_resolved() {
        for (report_id, err) in &outcome.failed {
            eprintln!("report {report_id} left unresolved: {err}");
        }
        bail!("{} report(s) could not be resolved", outcome.failed.len());
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    // Structured logs are opt-in for the CLI so command output stays clean.
    let logging = std::env::var_os("RUST_LOG").is_some();
    if logging {
        deskhand::init_telemetry()?;
    }

    let cli = Cli::parse();
    let use_seed = cli.seed;

    let result = match cli.command {
        Commands::List {
            kind,
            search,
            status,
            facets,
            json,
        } => {
            let kind = parse_kind(&kind)?;
            let mut query = CollectionQuery::new();
            if let Some(text) = search {
                query = query.with_search(text);
            }
            if let Some(status) = status {
                query = query.with_facet("status", status);
            }
            for (key, value) in facets {
                query = query.with_facet(key, value);
            }
            dispatch_kind!(kind, use_seed, run_list(query.clone(), json))
        }
        Commands::Transitions { kind, status } => {
            run_transitions(parse_kind(&kind)?, &status)
        }
        Commands::Transition {
            kind,
            id,
            target,
            fields,
        } => {
            let kind = parse_kind(&kind)?;
            dispatch_kind!(
                kind,
                use_seed,
                run_transition(id.clone(), target.clone(), fields.clone())
            )
        }
        Commands::Create { kind, data } => {
            let kind = parse_kind(&kind)?;
            dispatch_kind!(kind, use_seed, run_create(data.clone()))
        }
        Commands::RemoveThread { id } => run_remove_thread(use_seed, id).await,
    };

    if logging {
        api_metrics().log_stats();
    }
    result
}

use super::render::{
    print_messages, render_cities, render_config, render_facets, render_markers,
    render_record_detail, render_record_list, render_summary,
};
use super::setup::{BrowseArgs, Cli, Commands};
use clap::Parser;
use parent_hub::api::{BrowseOverrides, BrowseQuery, CmdResult, ConfigAction, HubApi};
use parent_hub::error::Result;
use parent_hub::init::initialize;
use parent_hub::store::fs::FileStore;
use std::path::PathBuf;
use std::process::ExitCode;

struct AppContext {
    api: HubApi<FileStore>,
}

pub fn run() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let ctx = init_context(&cli)?;

    let result = match cli.command {
        Some(Commands::Browse(args)) => handle_browse(&ctx, args),
        Some(Commands::Cities { query }) => handle_cities(&ctx, query),
        Some(Commands::Facets) => handle_facets(&ctx),
        Some(Commands::Show { id }) => handle_show(&ctx, &id),
        Some(Commands::Config { key, value }) => handle_config(&ctx, key, value),
        None => handle_browse(&ctx, BrowseArgs::default()),
    }?;

    print_messages(&result.messages);
    if result.has_errors() {
        Ok(ExitCode::FAILURE)
    } else {
        Ok(ExitCode::SUCCESS)
    }
}

/// `RUST_LOG` wins; otherwise warnings only, or debug with `--verbose`.
fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let env = env_logger::Env::default().default_filter_or(default_level);
    let _ = env_logger::Builder::from_env(env)
        .format_timestamp(None)
        .try_init();
}

fn init_context(cli: &Cli) -> Result<AppContext> {
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let ctx = initialize(&cwd, cli.data.as_deref())?;
    Ok(AppContext { api: ctx.api })
}

fn handle_browse(ctx: &AppContext, args: BrowseArgs) -> Result<CmdResult> {
    let query = BrowseQuery {
        search: args.search,
        city: args.city,
        county: args.county,
        pfcc_only: args.pfcc,
        ratings: args.ratings,
        program_types: args.program_types,
    };
    let overrides = BrowseOverrides {
        limit: args.limit.map(|n| usize::try_from(n).unwrap_or(usize::MAX)),
        use_worker: args.worker,
    };

    let result = ctx.api.browse(&query, overrides)?;

    if let Some(summary) = &result.summary {
        print!("{}", render_summary(summary));
    }
    if !result.listed_records.is_empty() {
        println!();
        print!("{}", render_record_list(&result.listed_records));
    }
    if args.markers && !result.has_errors() {
        println!();
        print!("{}", render_markers(&result.markers, result.map_center));
    }
    Ok(result)
}

fn handle_cities(ctx: &AppContext, query: Option<String>) -> Result<CmdResult> {
    let result = ctx.api.cities(query.as_deref())?;
    print!("{}", render_cities(&result.cities));
    Ok(result)
}

fn handle_facets(ctx: &AppContext) -> Result<CmdResult> {
    let result = ctx.api.facets()?;
    if let Some(facets) = &result.facets {
        print!("{}", render_facets(facets));
    }
    Ok(result)
}

fn handle_show(ctx: &AppContext, id: &str) -> Result<CmdResult> {
    let mut result = ctx.api.show(id)?;
    for record in &result.listed_records {
        print!("{}", render_record_detail(record));
    }
    // The detail page path is already part of the rendered record
    result.messages.clear();
    Ok(result)
}

fn handle_config(ctx: &AppContext, key: Option<String>, value: Option<String>) -> Result<CmdResult> {
    let action = match (key, value) {
        (None, _) => ConfigAction::ShowAll,
        (Some(key), None) => ConfigAction::ShowKey(key),
        (Some(key), Some(value)) => ConfigAction::Set(key, value),
    };

    let show_all = matches!(action, ConfigAction::ShowAll);
    let result = ctx.api.config(action)?;
    if show_all {
        if let Some(config) = &result.config {
            print!("{}", render_config(config));
        }
    }
    Ok(result)
}

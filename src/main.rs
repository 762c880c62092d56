//! ontoscope CLI: RDF ontology explorer.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use miette::{IntoDiagnostic, Result};

use ontoscope::client::OntologyClient;
use ontoscope::config::ExplorerConfig;
use ontoscope::filter::Column;
use ontoscope::graph::stats;
use ontoscope::session::{ExplorerSession, SessionConfig};
use ontoscope::term;
use ontoscope::turtle;

#[derive(Parser)]
#[command(name = "ontoscope", version, about = "RDF ontology explorer")]
struct Cli {
    /// Config file (TOML).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Explore a local Turtle file instead of the backend's latest version.
    #[arg(long, global = true)]
    file: Option<PathBuf>,

    /// Substring search across subject, predicate and object value.
    #[arg(long, global = true)]
    search: Option<String>,

    /// Keep only triples with one of these subjects (repeatable).
    #[arg(long, global = true)]
    subject: Vec<String>,

    /// Keep only triples with one of these predicates (repeatable).
    #[arg(long, global = true)]
    predicate: Vec<String>,

    /// Keep only triples with one of these object values (repeatable).
    #[arg(long, global = true)]
    object: Vec<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show category counts for the current slice.
    Stats,

    /// Print the filtered triples as a table.
    Table {
        /// Print full URIs instead of short labels.
        #[arg(long)]
        full_uris: bool,

        /// Maximum rows to print (0 = all).
        #[arg(long, default_value = "0")]
        limit: usize,
    },

    /// Project the current slice as graph JSON.
    Graph {
        /// Zoom to the one-hop neighborhood of this node id.
        #[arg(long)]
        focus: Option<String>,

        /// Collapse repeated edges between the same pair of nodes.
        #[arg(long)]
        dedupe: bool,
    },

    /// List the distinct values available for a filter column.
    Values {
        /// Column to enumerate: subject, predicate or object.
        column: String,
    },

    /// Inspect the backend's change history.
    History {
        #[command(subcommand)]
        action: HistoryAction,
    },

    /// Ask the agent for a one-shot ontology change.
    Update {
        /// Natural-language instruction.
        prompt: String,
    },

    /// Talk to the ontology agent interactively.
    #[cfg(feature = "chat")]
    Chat,
}

#[derive(Subcommand)]
enum HistoryAction {
    /// List versions, newest first.
    List,
    /// Show one version: instruction, diff and snapshots.
    Show {
        /// Version id from `history list`.
        version_id: String,
    },
}

fn main() -> Result<()> {
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(3)
                .build(),
        )
    }))
    .ok(); // Ignore error if hook already set (e.g., in tests)

    // Quiet by default; stdout belongs to the command output.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();
    let config = ExplorerConfig::resolve(cli.config.as_deref())?;

    match &cli.command {
        Commands::Stats => {
            let mut session = open_session(&cli, &config, config.session_config())?;
            let total = session.triples().len();
            let counts = stats::category_counts(session.filtered());
            println!("Triples:    {} / {}", counts.triples, total);
            println!("Subjects:   {}", counts.subjects);
            println!("Predicates: {}", counts.predicates);
            println!("Objects:    {}", counts.objects);
        }

        Commands::Table { full_uris, limit } => {
            let mut session = open_session(&cli, &config, config.session_config())?;
            let total = session.triples().len();
            let full = *full_uris || config.show_full_uris;

            let rows: Vec<(String, String, String)> = session
                .filtered()
                .iter()
                .map(|t| {
                    (
                        cell(&t.subject, full),
                        cell(&t.predicate, full),
                        cell(t.object.resolved(), full),
                    )
                })
                .collect();

            let shown = if *limit == 0 {
                rows.len()
            } else {
                rows.len().min(*limit)
            };
            let s_width = column_width("subject", rows[..shown].iter().map(|r| r.0.as_str()));
            let p_width = column_width("predicate", rows[..shown].iter().map(|r| r.1.as_str()));

            println!("{:<s_width$}  {:<p_width$}  {}", "subject", "predicate", "object");
            for (s, p, o) in &rows[..shown] {
                println!("{s:<s_width$}  {p:<p_width$}  {o}");
            }
            if shown < rows.len() {
                println!("{} / {} triples (showing first {})", rows.len(), total, shown);
            } else {
                println!("{} / {} triples", rows.len(), total);
            }
        }

        Commands::Graph { focus, dedupe } => {
            let mut session_config = config.session_config();
            if *dedupe {
                session_config.dedupe_edges = true;
            }
            let mut session = open_session(&cli, &config, session_config)?;
            session.set_focal(focus.clone());

            let json = serde_json::to_string_pretty(session.visible_graph()).into_diagnostic()?;
            println!("{json}");
        }

        Commands::Values { column } => {
            let column = parse_column(column)?;
            let session = open_session(&cli, &config, config.session_config())?;
            let values = session.candidate_values(column);
            if values.is_empty() {
                println!("No values match the current filters.");
            } else {
                println!("Values ({}):", values.len());
                for value in &values {
                    println!("  {value}");
                }
            }
        }

        Commands::History { action } => {
            let client = OntologyClient::new(&config.backend_url);
            match action {
                HistoryAction::List => {
                    let mut entries = client.history()?;
                    entries.sort_by(|a, b| b.created_at.cmp(&a.created_at));
                    if entries.is_empty() {
                        println!("No history yet.");
                    } else {
                        println!("Versions ({}):", entries.len());
                        for entry in &entries {
                            let when = entry
                                .created_at_utc()
                                .map(|t| t.format("%Y-%m-%d %H:%M:%S UTC").to_string())
                                .unwrap_or_else(|| format!("@{}", entry.created_at));
                            println!(
                                "  {}  {}  [{}]  {}",
                                entry.version_id, when, entry.actor, entry.plan_summary
                            );
                        }
                    }
                }
                HistoryAction::Show { version_id } => {
                    let detail = client.history_entry(version_id)?;
                    print_history_detail(&detail);
                }
            }
        }

        Commands::Update { prompt } => {
            let client = OntologyClient::new(&config.backend_url);
            let version = client.update(prompt)?;
            match &version.version_id {
                Some(id) => println!("Applied as version \"{id}\"."),
                None => println!("Applied."),
            }
            let triples = turtle::parse_turtle(&version.content)?;
            println!("Ontology now holds {} triples.", triples.len());
        }

        #[cfg(feature = "chat")]
        Commands::Chat => run_chat(&cli, &config)?,
    }

    Ok(())
}

/// Load the ontology source and apply the CLI filter flags.
fn open_session(
    cli: &Cli,
    config: &ExplorerConfig,
    session_config: SessionConfig,
) -> Result<ExplorerSession> {
    let mut session = ExplorerSession::with_config(session_config);

    match &cli.file {
        Some(path) => {
            let triples = turtle::load_file(path)?;
            session.replace_triples(triples);
        }
        None => {
            let client = OntologyClient::new(&config.backend_url);
            let latest = client.latest()?;
            session.load_turtle(&latest.content)?;
        }
    }

    if let Some(search) = &cli.search {
        session.set_search(search.clone());
    }
    if !cli.subject.is_empty() {
        session.set_column_filter(Column::Subject, cli.subject.clone());
    }
    if !cli.predicate.is_empty() {
        session.set_column_filter(Column::Predicate, cli.predicate.clone());
    }
    if !cli.object.is_empty() {
        session.set_column_filter(Column::Object, cli.object.clone());
    }

    Ok(session)
}

fn parse_column(name: &str) -> Result<Column> {
    match name {
        "subject" | "s" => Ok(Column::Subject),
        "predicate" | "p" => Ok(Column::Predicate),
        "object" | "o" => Ok(Column::Object),
        other => miette::bail!("unknown column \"{other}\" (expected subject, predicate or object)"),
    }
}

/// Table cell text: the short label with its namespace beside it, or the
/// raw value in full mode and for values that have nothing to shorten.
fn cell(value: &str, full: bool) -> String {
    if full {
        return value.to_string();
    }
    let label = term::short_label(value);
    let namespace = term::namespace_of(value);
    if label == value || namespace.is_empty() {
        label.to_string()
    } else {
        format!("{label} ({namespace})")
    }
}

fn column_width<'a>(header: &str, cells: impl Iterator<Item = &'a str>) -> usize {
    cells
        .map(str::len)
        .chain(std::iter::once(header.len()))
        .max()
        .unwrap_or(header.len())
}

fn print_history_detail(detail: &ontoscope::client::HistoryDetail) {
    let entry = &detail.entry;
    println!("Version: {}", entry.version_id);
    if let Some(when) = entry.created_at_utc() {
        println!("  created: {}", when.format("%Y-%m-%d %H:%M:%S UTC"));
    }
    println!("  actor:   {}", entry.actor);
    if let Some(parent) = &entry.parent_version_id {
        println!("  parent:  {parent}");
    }
    println!("  summary: {}", entry.plan_summary);
    if let Some(instruction) = &detail.instruction {
        println!("  instruction: {instruction}");
    }

    if let Some(diff) = &detail.diff {
        if !diff.added.is_empty() {
            println!("Added ({}):", diff.added.len());
            for row in &diff.added {
                let triple = row.as_triple();
                println!(
                    "  + {} {} {}",
                    term::short_label(&triple.subject),
                    term::short_label(&triple.predicate),
                    term::short_label(triple.object.resolved()),
                );
            }
        }
        if !diff.removed.is_empty() {
            println!("Removed ({}):", diff.removed.len());
            for row in &diff.removed {
                let triple = row.as_triple();
                println!(
                    "  - {} {} {}",
                    term::short_label(&triple.subject),
                    term::short_label(&triple.predicate),
                    term::short_label(triple.object.resolved()),
                );
            }
        }
    }

    if let Some(snapshot) = &detail.new_ontology {
        println!("  snapshot: {} bytes", snapshot.len());
    }
    if let Some(snapshot) = &detail.old_ontology {
        println!("  previous snapshot: {} bytes", snapshot.len());
    }
}

// ── Chat REPL ─────────────────────────────────────────────────────────────

#[cfg(feature = "chat")]
fn run_chat(cli: &Cli, config: &ExplorerConfig) -> Result<()> {
    use std::io::{BufRead, Write};
    use std::time::Duration;

    use ontoscope::chat::ChatExchange;
    use ontoscope::chat::live::LiveChat;

    let client = OntologyClient::new(&config.backend_url);
    let mut session = open_session(cli, config, config.session_config())?;
    let mut live = LiveChat::connect(&config.chat_url)?;
    let mut exchange = ChatExchange::new();

    println!(
        "Connected to {}. {} triples loaded.",
        config.chat_url,
        session.triples().len()
    );
    println!("Type a message, or /help for commands.");

    let stdin = std::io::stdin();
    let mut line = String::new();
    loop {
        print!("> ");
        std::io::stdout().flush().into_diagnostic()?;

        line.clear();
        if stdin.lock().read_line(&mut line).into_diagnostic()? == 0 {
            break; // EOF
        }
        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        match input {
            "/quit" | "/q" => break,
            "/help" => {
                println!("  /table [n]   list the filtered triples (default 20), numbered");
                println!("  /select N    stage or unstage triple N for the next request");
                println!("  /selection   show the staged triples");
                println!("  /clear       unstage everything");
                println!("  /quit        leave the conversation");
                continue;
            }
            "/selection" => {
                let staged = session.selection().triples();
                if staged.is_empty() {
                    println!("Nothing staged.");
                } else {
                    println!("Staged ({}):", staged.len());
                    for triple in staged {
                        println!(
                            "  {} {} {}",
                            term::short_label(&triple.subject),
                            term::short_label(&triple.predicate),
                            term::short_label(triple.object.resolved()),
                        );
                    }
                }
                continue;
            }
            "/clear" => {
                session.clear_selection();
                println!("Selection cleared.");
                continue;
            }
            _ => {}
        }

        if let Some(rest) = input.strip_prefix("/table") {
            let limit = rest.trim().parse::<usize>().unwrap_or(20);
            let rows: Vec<String> = session
                .filtered()
                .iter()
                .take(limit)
                .enumerate()
                .map(|(i, t)| {
                    format!(
                        "  {}. {} {} {}",
                        i,
                        term::short_label(&t.subject),
                        term::short_label(&t.predicate),
                        term::short_label(t.object.resolved()),
                    )
                })
                .collect();
            if rows.is_empty() {
                println!("No triples match the current filters.");
            }
            for row in rows {
                println!("{row}");
            }
            continue;
        }
        if let Some(rest) = input.strip_prefix("/select") {
            match rest.trim().parse::<usize>() {
                Ok(index) => {
                    let Some(triple) = session.filtered().get(index).cloned() else {
                        println!("No triple {index} in the current view; see /table.");
                        continue;
                    };
                    let added = session.toggle_selection(triple);
                    println!(
                        "{} triple {index}; {} staged.",
                        if added { "Staged" } else { "Unstaged" },
                        session.selection().len()
                    );
                }
                Err(_) => println!("Usage: /select N"),
            }
            continue;
        }
        if input.starts_with('/') {
            println!("Unknown command: \"{input}\". Try /help.");
            continue;
        }

        let request = exchange.compose(input, session.selection_mut());
        live.send(request);

        // One response is expected per turn; drain any extras after it.
        match live.recv_timeout(Duration::from_secs(120)) {
            Some(response) => {
                handle_response(&response, &mut exchange, &mut session, &client);
                while let Some(extra) = live.try_recv() {
                    handle_response(&extra, &mut exchange, &mut session, &client);
                }
            }
            None => println!("(no response from the agent yet; it may still be working)"),
        }

        if live.is_disconnected() {
            break;
        }
    }

    Ok(())
}

#[cfg(feature = "chat")]
fn handle_response(
    response: &ontoscope::chat::ChatResponse,
    exchange: &mut ontoscope::chat::ChatExchange,
    session: &mut ExplorerSession,
    client: &OntologyClient,
) {
    use ontoscope::chat::{ChatEvent, ChatResponse};

    let event = exchange.receive(response);

    match response {
        ChatResponse::Answer {
            message,
            selected_triples,
        } => {
            println!("{message}");
            if let Some(triples) = selected_triples {
                for triple in triples {
                    println!(
                        "  {} {} {}",
                        term::short_label(&triple.subject),
                        term::short_label(&triple.predicate),
                        term::short_label(triple.object.resolved()),
                    );
                }
            }
        }
        ChatResponse::ChangeApplied {
            message,
            version_id,
            diff,
            ..
        } => {
            println!("{message}");
            if let Some(id) = version_id {
                println!("  version: {id}");
            }
            if let Some(diff) = diff {
                println!("  +{} -{} triples", diff.added.len(), diff.removed.len());
            }
        }
        ChatResponse::ConfirmationNeeded {
            message,
            warnings,
            risk,
            ..
        } => {
            println!("{message}");
            if let Some(warnings) = warnings {
                for warning in warnings {
                    println!("  warning: {warning}");
                }
            }
            if let Some(risk) = risk {
                println!("  risk: {risk}");
            }
            println!("(your next message answers this)");
        }
        ChatResponse::EntityNeeded {
            message,
            missing_terms,
            candidates,
            ..
        } => {
            println!("{message}");
            if let Some(terms) = missing_terms {
                println!("  missing: {}", terms.join(", "));
            }
            if let Some(candidates) = candidates {
                for candidate in candidates {
                    println!("  candidate: {candidate}");
                }
            }
            println!("(your next message answers this)");
        }
        ChatResponse::Error { message } => println!("agent error: {message}"),
    }

    match event {
        Some(ChatEvent::ReplaceOntology(content)) => match session.load_turtle(&content) {
            Ok(count) => println!("Ontology replaced ({count} triples)."),
            Err(e) => println!("could not parse the new ontology: {e}"),
        },
        Some(ChatEvent::RefreshOntology) => {
            let refreshed = client
                .latest()
                .map_err(|e| e.to_string())
                .and_then(|v| session.load_turtle(&v.content).map_err(|e| e.to_string()));
            match refreshed {
                Ok(count) => println!("Ontology refreshed ({count} triples)."),
                Err(e) => println!("could not refresh the ontology: {e}"),
            }
        }
        None => {}
    }
}

mod config;
mod render;
mod session;

use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::{env, fs};

use botblock::{
    normalize_extension, Action, BulkAction, CrawlerRecord, CrawlerType, Rule, ROBOTS_MIME_TYPE,
};
use botblock_sitemap::{decode_sitemap, extract_paths, read_sitemap, OnError, Sitemap};
use botblock_tree::{effective_status, PathTree};
use clap::{CommandFactory, Parser};
use clap_complete::{generate, Shell};

use crate::config::BotblockConfig;
use crate::session::Session;

/// Robots.txt generator driven by a sitemap
#[derive(Debug, Parser)]
#[clap(version)]
pub struct Args {
    /// Optional yaml configuration file
    #[clap(env = "BOTBLOCK_CONFIG", parse(from_os_str), long)]
    pub config: Option<PathBuf>,
    /// Override the directory holding the saved session
    #[clap(env = "BOTBLOCK_STATE_DIR", parse(from_os_str), long)]
    pub state_dir: Option<PathBuf>,
    /// Override the origin used until a sitemap provides one
    #[clap(long)]
    pub origin: Option<String>,
    /// Start new sessions with no crawler blocked
    #[clap(long)]
    pub allow_seed_crawlers: bool,
    /// When quiet no logs are outputted
    #[clap(long, short)]
    pub quiet: bool,
    #[clap(subcommand)]
    pub cmd: SubCommand,
}

#[derive(Debug, clap::Subcommand)]
pub enum SubCommand {
    /// Replace the known paths with the ones of a sitemap
    Import(ImportArgs),
    /// Show the path tree and the status of each path
    Tree {
        /// Only show paths containing this text
        #[clap(long)]
        filter: Option<String>,
    },
    /// Toggle the rule of a single path
    Path(PathArgs),
    /// Block, allow or reset many paths at once
    Paths {
        #[clap(arg_enum)]
        action: BulkAction,
        /// Only target paths containing this text
        #[clap(long)]
        filter: Option<String>,
    },
    /// Cycle the rule of a file extension
    Ext { extension: String },
    /// Block, allow or reset the extensions of a category
    Exts {
        #[clap(arg_enum)]
        action: BulkAction,
        /// Category to target, every category when missing
        #[clap(long)]
        category: Option<String>,
    },
    /// Add a file extension to a category
    AddExt {
        extension: String,
        #[clap(long, default_value = "Custom")]
        category: String,
    },
    /// Show the file extensions and their rules
    ListExts,
    /// Block or unblock a crawler
    Crawler { user_agent: String },
    /// Block, allow or reset many crawlers at once
    Crawlers {
        #[clap(arg_enum)]
        action: BulkAction,
        #[clap(flatten)]
        filter: CrawlerFilter,
    },
    /// Unblock every search engine crawler
    AllowSeo,
    /// Add a crawler missing from the list
    AddCrawler {
        user_agent: String,
        #[clap(long)]
        company: Option<String>,
        #[clap(arg_enum, long = "type")]
        kind: Option<CrawlerType>,
    },
    /// Show the known crawlers, blocked ones are marked
    ListCrawlers(CrawlerFilter),
    /// Write the robots.txt file
    Generate {
        /// Override the configured output file
        #[clap(parse(from_os_str), long, short)]
        output_file: Option<PathBuf>,
        /// Print to stdout instead of writing a file
        #[clap(long, conflicts_with = "output_file")]
        stdout: bool,
    },
    /// Summarize the current rules
    Status,
    /// Drop every rule and path, saved preferences are kept
    Reset,
    #[clap(hide = true)]
    Completion,
}

/// Import a sitemap file, `-` reads stdin
#[derive(Debug, clap::Args)]
pub struct ImportArgs {
    #[clap(parse(from_os_str))]
    pub sitemap: PathBuf,
    /// Override the configured invalid url handling strategy
    #[clap(arg_enum, long)]
    pub on_url_error: Option<OnError>,
}

#[derive(Debug, clap::Args)]
#[clap(group = clap::ArgGroup::new("rule"))]
pub struct PathArgs {
    pub path: String,
    /// Block the path, or unset it when already blocked
    #[clap(group = "rule", long)]
    pub block: bool,
    /// Allow the path, or unset it when already allowed
    #[clap(group = "rule", long)]
    pub allow: bool,
}

impl PathArgs {
    fn force(&self) -> Option<Rule> {
        if self.block {
            Some(Rule::Block)
        } else if self.allow {
            Some(Rule::Allow)
        } else {
            None
        }
    }
}

#[derive(Debug, clap::Args)]
pub struct CrawlerFilter {
    /// Only target crawlers whose company or user agent contains this text
    #[clap(long, default_value = "")]
    pub search: String,
    #[clap(arg_enum, long = "type")]
    pub kind: Option<CrawlerType>,
}

fn import(session: &mut Session, conf: &BotblockConfig, args: ImportArgs) -> anyhow::Result<()> {
    let xml = if args.sitemap == Path::new("-") {
        let mut bytes = vec![];
        io::stdin().read_to_end(&mut bytes)?;
        decode_sitemap(&bytes)?
    } else {
        read_sitemap(&args.sitemap)?
    };
    let on_error = args.on_url_error.unwrap_or(conf.on_url_error);
    let extraction = extract_paths(&xml)?.check(on_error)?;

    if extraction.kind == Sitemap::Index {
        log::warn!("Nested sitemaps of {} are not fetched", args.sitemap.display());
    }
    println!(
        "Imported {} paths from {} {}",
        extraction.paths.len(),
        extraction.kind,
        extraction.origin.as_deref().unwrap_or("without origin")
    );

    session.apply(Action::LoadSitemap {
        paths: extraction.paths,
        origin: extraction.origin,
    });
    Ok(())
}

fn extensions_of(session: &Session, category: Option<&str>) -> anyhow::Result<Vec<String>> {
    let groups = &session.store.file_groups;
    let extensions = match category {
        Some(category) => groups
            .iter()
            .find(|g| g.category == category)
            .map(|g| g.extensions.clone())
            .ok_or_else(|| anyhow::anyhow!("Unknown category: {category}"))?,
        None => groups.iter().flat_map(|g| g.extensions.clone()).collect(),
    };
    Ok(extensions)
}

fn generate_robots(
    session: &Session,
    conf: &BotblockConfig,
    output_file: Option<PathBuf>,
    stdout: bool,
) -> anyhow::Result<()> {
    let robots = session.robots_txt().generate();
    if stdout {
        println!("{robots}");
        return Ok(());
    }
    let path = output_file.unwrap_or_else(|| conf.output_file.clone());
    fs::write(&path, robots)?;
    log::info!("Wrote {} ({ROBOTS_MIME_TYPE})", path.display());
    println!("Wrote {}", path.display());
    Ok(())
}

fn run(args: Args) -> anyhow::Result<()> {
    let conf = BotblockConfig::try_from(&args)?;
    let mut session = Session::open(&conf);
    let mut stdout = io::stdout();

    let modified = match args.cmd {
        SubCommand::Import(import_args) => {
            import(&mut session, &conf, import_args)?;
            true
        }
        SubCommand::Tree { filter } => {
            let tree = match filter {
                Some(filter) => PathTree::build(session.store.filter_paths(&filter)),
                None => PathTree::build(&session.store.paths),
            };
            render::tree(&mut stdout, &tree, &session.store.path_rules)?;
            false
        }
        SubCommand::Path(path_args) => {
            session.apply(Action::TogglePath {
                path: path_args.path.clone(),
                force: path_args.force(),
            });
            let status = effective_status(&path_args.path, &session.store.path_rules);
            println!("{} is now {} ({:?})", path_args.path, status.status, status.source);
            true
        }
        SubCommand::Paths { action, filter } => {
            let paths = match filter {
                Some(filter) => session.store.filter_paths(&filter),
                None => session.store.paths.clone(),
            };
            if paths.is_empty() {
                println!("No path matched");
            }
            session.apply(Action::BulkSetPaths { paths, action });
            true
        }
        SubCommand::Ext { extension } => {
            let extension = normalize_extension(&extension)
                .ok_or_else(|| anyhow::anyhow!("Empty extension"))?;
            session.apply(Action::ToggleExtension(extension.clone()));
            let rule = session.store.extension_rules.get(&extension);
            println!(
                "{extension} is now {}",
                rule.map_or_else(|| String::from("unset"), Rule::to_string)
            );
            true
        }
        SubCommand::Exts { action, category } => {
            let extensions = extensions_of(&session, category.as_deref())?;
            session.apply(Action::BulkSetExtensions { extensions, action });
            true
        }
        SubCommand::AddExt {
            extension,
            category,
        } => {
            session.apply(Action::AddExtension {
                extension,
                category,
            });
            true
        }
        SubCommand::ListExts => {
            render::file_groups(&mut stdout, &session.store)?;
            false
        }
        SubCommand::Crawler { user_agent } => {
            let blocked = session.toggle_crawler(&user_agent)?;
            println!(
                "{user_agent} is now {}",
                if blocked { "blocked" } else { "allowed" }
            );
            true
        }
        SubCommand::Crawlers { action, filter } => {
            let crawlers = session.store.filter_crawlers(&filter.search, filter.kind);
            session.apply(Action::BulkSetCrawlers { crawlers, action });
            true
        }
        SubCommand::AllowSeo => {
            session.apply(Action::AllowSeoCrawlers);
            true
        }
        SubCommand::AddCrawler {
            user_agent,
            company,
            kind,
        } => {
            let record =
                CrawlerRecord::custom(&user_agent, company.as_deref(), kind.unwrap_or_default());
            session.apply(Action::AddCrawler(record));
            true
        }
        SubCommand::ListCrawlers(filter) => {
            let crawlers = session.store.filter_crawlers(&filter.search, filter.kind);
            render::crawlers(&mut stdout, &crawlers, &session.store.blocked_crawlers)?;
            false
        }
        SubCommand::Generate {
            output_file,
            stdout: to_stdout,
        } => {
            generate_robots(&session, &conf, output_file, to_stdout)?;
            false
        }
        SubCommand::Status => {
            render::summary(&mut stdout, &session.store)?;
            false
        }
        SubCommand::Reset => {
            session.reset(&conf);
            true
        }
        SubCommand::Completion => {
            generate(Shell::Bash, &mut Args::command(), "botblock", &mut stdout);
            false
        }
    };

    if modified {
        session.save()?;
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    if !args.quiet {
        if env::var_os("RUST_LOG").is_none() {
            env::set_var("RUST_LOG", "botblock=warn");
        }
        env_logger::init();
    }
    run(args)
}

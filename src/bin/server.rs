use std::path::PathBuf;
use std::sync::Arc;

use clap::{App, Arg};
use tracing::{error, info};

use exact_index::config::Config;
use exact_index::crawler;
use exact_index::loader;
use exact_index::search::Index;
use exact_index::server::{self, Stats};

fn main() {
    tracing_subscriber::fmt::init();

    let matches = App::new("exact_index_server")
        .about("Crawls, loads and indexes a set of files, then serves exact substring search over HTTP")
        .arg(Arg::with_name("config").long("config").takes_value(true).help("path to the JSON config file"))
        .arg(Arg::with_name("root").long("root").takes_value(true).multiple(true).help("root directory to crawl (repeatable); overrides the config file"))
        .arg(Arg::with_name("addr").long("addr").takes_value(true).help("address to listen on; overrides the config file"))
        .get_matches();

    let config_path = matches
        .value_of("config")
        .map(PathBuf::from)
        .unwrap_or_else(default_config_path);

    let mut config = match Config::load(&config_path) {
        Ok(c) => c,
        Err(e) => {
            error!(error = %e, path = %config_path.display(), "loading configuration");
            std::process::exit(1);
        }
    };

    if let Some(roots) = matches.values_of("root") {
        config.roots = roots.map(PathBuf::from).collect();
    }
    if let Some(addr) = matches.value_of("addr") {
        config.bind_addr = addr.to_string();
    }

    if let Err(e) = run(config) {
        error!(error = %e, "server exited with an error");
        std::process::exit(1);
    }
}

fn default_config_path() -> PathBuf {
    dirs_config_path().unwrap_or_else(|| PathBuf::from("exact-index-config.json"))
}

fn dirs_config_path() -> Option<PathBuf> {
    let home = std::env::var_os("HOME")?;
    Some(PathBuf::from(home).join(".config").join("exact-index").join("server-config.json"))
}

fn run(config: Config) -> exact_index::Result<()> {
    let stats = Arc::new(Stats::default());

    info!(roots = ?config.roots, "crawling");
    let paths = crawler::crawl(&config.roots, config.extensions.as_deref())?;
    stats.done_crawling.store(true, std::sync::atomic::Ordering::Relaxed);

    info!(files = paths.len(), "loading");
    let (data, offsets, ids) = loader::load(&paths)?;
    stats.done_loading.store(true, std::sync::atomic::Ordering::Relaxed);
    stats.indexed_files.store(ids.len(), std::sync::atomic::Ordering::Relaxed);
    stats.indexed_bytes.store(data.len(), std::sync::atomic::Ordering::Relaxed);

    info!(bytes = data.len(), "building index");
    let index = if ids.len() <= 1 {
        Index::build_single(ids.into_iter().next().unwrap_or_default(), data)?
    } else {
        Index::build_multi(data, offsets, ids)?
    };
    stats.done_indexing.store(true, std::sync::atomic::Ordering::Relaxed);

    server::serve(&config.bind_addr, Arc::new(index), stats)
}

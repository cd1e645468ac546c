//! Query checks and the native messaging host.

use std::io;

use anyhow::Context;

use crate::config::HostConfig;
use crate::host::{check_search_url, Host, HostReply};
use crate::services::catalog::CatalogStore;

/// Print the reply the extension would get for `url`.
pub fn run_check(store: &CatalogStore, url: &str) -> anyhow::Result<()> {
    let reply = HostReply::Search(check_search_url(&store.parser(), url));
    println!("{}", serde_json::to_string_pretty(&reply)?);
    Ok(())
}

pub fn run_parse(store: &CatalogStore, query: &str) -> anyhow::Result<()> {
    match store.parser().resolve(query) {
        Some((bang_match, url)) => {
            println!("Bang:  !{} ({})", bang_match.matched_trigger, bang_match.bang.name);
            println!("Query: {}", bang_match.query);
            println!("URL:   {}", url);
        }
        None => println!("No bang in query"),
    }
    Ok(())
}

pub fn run_host(store: CatalogStore, config: HostConfig) -> anyhow::Result<()> {
    let mut host = Host::new(store, config);
    host.run(io::stdin().lock(), io::stdout().lock())
        .context("Native messaging host failed")
}

//! `tiny_http`-based HTTP front end: a single listener thread dispatching
//! onto a `rayon` pool, exposing the index over `/search`, `/documents` and
//! `/stats`.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tiny_http::{Method, Response, Server as HttpServer};
use tracing::{error, info, warn};

use crate::dto::{DocumentDto, SearchQuery, SearchResultDto, StatsDto};
use crate::error::{Error, Result};
use crate::search::Index;

/// Readiness and error bookkeeping surfaced by `/stats`, mirroring the
/// crawl/load/index progression of the CLI binary's startup sequence.
pub struct Stats {
    pub done_crawling: AtomicBool,
    pub done_loading: AtomicBool,
    pub done_indexing: AtomicBool,
    pub indexed_files: std::sync::atomic::AtomicUsize,
    pub indexed_bytes: std::sync::atomic::AtomicUsize,
}

impl Default for Stats {
    fn default() -> Stats {
        Stats {
            done_crawling: AtomicBool::new(false),
            done_loading: AtomicBool::new(false),
            done_indexing: AtomicBool::new(false),
            indexed_files: std::sync::atomic::AtomicUsize::new(0),
            indexed_bytes: std::sync::atomic::AtomicUsize::new(0),
        }
    }
}

impl Stats {
    fn to_dto(&self) -> StatsDto {
        StatsDto {
            done_crawling: self.done_crawling.load(Ordering::Relaxed),
            done_loading: self.done_loading.load(Ordering::Relaxed),
            done_indexing: self.done_indexing.load(Ordering::Relaxed),
            indexed_files: self.indexed_files.load(Ordering::Relaxed),
            indexed_bytes: self.indexed_bytes.load(Ordering::Relaxed),
            errors: Vec::new(),
        }
    }
}

/// Serves `index` on `bind_addr` until the process exits. Blocks the
/// calling thread accepting connections; each request is handled on a
/// `rayon` worker so a slow context lookup never stalls the listener.
pub fn serve(bind_addr: &str, index: Arc<Index>, stats: Arc<Stats>) -> Result<()> {
    let http = HttpServer::http(bind_addr).map_err(|e| {
        Error::Server(std::io::Error::new(std::io::ErrorKind::Other, e.to_string()))
    })?;
    info!(addr = bind_addr, "listening");

    for request in http.incoming_requests() {
        let index = Arc::clone(&index);
        let stats = Arc::clone(&stats);
        rayon::spawn(move || handle(request, &index, &stats));
    }
    Ok(())
}

fn handle(request: tiny_http::Request, index: &Index, stats: &Stats) {
    let method = request.method().clone();
    let url = request.url().to_string();
    let result = match (&method, path_of(&url).as_str()) {
        (Method::Get, "/search") => handle_search(&url, index),
        (Method::Get, "/documents") => handle_documents(index),
        (Method::Get, "/stats") => Ok(json_response(&stats.to_dto())),
        _ => Ok(Response::from_string("not found").with_status_code(404)),
    };
    let response = result.unwrap_or_else(|e| {
        warn!(error = %e, url = %url, "request failed");
        Response::from_string(e.to_string()).with_status_code(400)
    });
    if let Err(e) = request.respond(response) {
        error!(error = %e, "failed to write response");
    }
}

fn path_of(url: &str) -> String {
    url.split('?').next().unwrap_or("").to_string()
}

fn handle_search(url: &str, index: &Index) -> Result<Response<std::io::Cursor<Vec<u8>>>> {
    let query = parse_search_query(url)?;
    if query.pattern.is_empty() {
        return Err(Error::InvalidInput("you have to specify a non-empty pattern".into()));
    }
    let result = index.find(query.pattern.as_bytes())?;
    let dto = SearchResultDto::from_result(&result, query.offset, query.max_hits, query.max_context)?;
    Ok(json_response(&dto))
}

fn handle_documents(index: &Index) -> Result<Response<std::io::Cursor<Vec<u8>>>> {
    let docs: Vec<DocumentDto> = (0..index.document_count())
        .map(|i| DocumentDto::from(index.document(i)))
        .collect();
    Ok(json_response(&docs))
}

fn parse_search_query(url: &str) -> Result<SearchQuery> {
    let query_string = url.splitn(2, '?').nth(1).unwrap_or("");
    let mut pattern = String::new();
    let mut max_hits = 20usize;
    let mut max_context = 40i32;
    let mut offset = 0usize;
    for pair in query_string.split('&').filter(|s| !s.is_empty()) {
        let mut it = pair.splitn(2, '=');
        let key = it.next().unwrap_or("");
        let value = it.next().unwrap_or("");
        match key {
            "q" => pattern = percent_decode(value),
            "context" => {
                max_context = value.parse().map_err(|_| Error::InvalidInput(format!("invalid context length: {}", value)))?
            }
            "max_hits" => {
                max_hits = value.parse().map_err(|_| Error::InvalidInput(format!("invalid max_hits: {}", value)))?
            }
            "offset" => {
                offset = value.parse().map_err(|_| Error::InvalidInput(format!("invalid offset: {}", value)))?
            }
            _ => {}
        }
    }
    Ok(SearchQuery { pattern, max_hits, max_context, offset })
}

fn percent_decode(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        match c {
            '+' => out.push(' '),
            '%' => {
                let hi = chars.next();
                let lo = chars.next();
                if let (Some(hi), Some(lo)) = (hi, lo) {
                    if let Ok(byte) = u8::from_str_radix(&format!("{}{}", hi, lo), 16) {
                        out.push(byte as char);
                        continue;
                    }
                }
                out.push('%');
            }
            _ => out.push(c),
        }
    }
    out
}

fn json_response<T: serde::Serialize>(value: &T) -> Response<std::io::Cursor<Vec<u8>>> {
    let body = serde_json::to_vec(value).expect("DTOs always serialize");
    Response::from_data(body).with_header(
        tiny_http::Header::from_bytes(&b"Content-Type"[..], &b"application/json"[..]).expect("static header is valid"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_query_string() {
        let q = parse_search_query("/search?q=hello&context=5&max_hits=10&offset=2").unwrap();
        assert_eq!(q.pattern, "hello");
        assert_eq!(q.max_context, 5);
        assert_eq!(q.max_hits, 10);
        assert_eq!(q.offset, 2);
    }

    #[test]
    fn percent_decodes_the_pattern() {
        let q = parse_search_query("/search?q=a%20b").unwrap();
        assert_eq!(q.pattern, "a b");
    }

    #[test]
    fn path_of_strips_query() {
        assert_eq!(path_of("/search?q=x"), "/search");
        assert_eq!(path_of("/documents"), "/documents");
    }
}

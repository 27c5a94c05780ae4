//! Feed ingestion: fetching, parsing, and idempotent storage of articles.

mod client;
mod fetcher;
mod parser;
mod types;
mod util;

pub use self::client::create_http_client;
pub use self::fetcher::{fetch_source, ingest_loop, run_batch, run_batch_with};
pub use self::parser::parse_feed;
pub use self::types::{BatchSummary, ParsedEntries, RawArticle};
pub use self::util::{cleanup_xml, is_valid_url, parse_date, strip_html, truncate_chars};

pub const IMDB_FIND_URL: &str = "https://www.imdb.com/find?q=";

/// IMDb search link for a title. Any Unicode input is percent-encoded.
pub fn imdb_search_url(title: &str) -> String { format!("{IMDB_FIND_URL}{}", urlencoding::encode(title)) }

use std::fmt;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// Bundled list of well-known crawlers.
pub const SEED_CRAWLER_CSV: &str = "Company,User-Agent,Type,notes
Google,Googlebot,seo,
Google,Googlebot-Image,image,
Google,Googlebot-Video,video,
Google,Googlebot-News,news,
Google,Mediapartners-Google,ads,
Google,GoogleOther,research,
Google,Google-Extended,training,
Bing,Bingbot,seo,
BingAds,AdIdxBot,ads,
BingPreview,MicrosoftPreview,preview,
MicrosoftSearch,msnbot,seo,
Facebook,FacebookBot,training,
Twitter,TwitterBot,social,
Discord,DiscordBot,social,
Yahoo,Slurp,seo,
OpenAI,ChatGPT-User,chat,plugins
OpenAI,GPTBot,training,
Anthropic,anthropic-ai,training,
Anthropic,anthropicAi,training,
Common Crawl,CCBot,training,
Omigili ,Omgilibot,training,";

pub static SEED_CRAWLERS: Lazy<Vec<CrawlerRecord>> = Lazy::new(|| {
    parse_crawler_csv(SEED_CRAWLER_CSV).unwrap_or_else(|e| {
        log::error!("Couldn't parse bundled crawler list: {e}");
        vec![]
    })
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "clap", derive(clap::ArgEnum))]
#[serde(rename_all = "lowercase")]
pub enum CrawlerType {
    Seo,
    Training,
    Research,
    Image,
    Video,
    News,
    Ads,
    Social,
    Chat,
    Preview,
    #[default]
    Other,
}

impl From<&str> for CrawlerType {
    /// Unknown names fall back to [`CrawlerType::Other`].
    fn from(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "seo" => Self::Seo,
            "training" => Self::Training,
            "research" => Self::Research,
            "image" => Self::Image,
            "video" => Self::Video,
            "news" => Self::News,
            "ads" => Self::Ads,
            "social" => Self::Social,
            "chat" => Self::Chat,
            "preview" => Self::Preview,
            _ => Self::Other,
        }
    }
}

impl fmt::Display for CrawlerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Seo => "seo",
            Self::Training => "training",
            Self::Research => "research",
            Self::Image => "image",
            Self::Video => "video",
            Self::News => "news",
            Self::Ads => "ads",
            Self::Social => "social",
            Self::Chat => "chat",
            Self::Preview => "preview",
            Self::Other => "other",
        };
        write!(f, "{name}")
    }
}

/// A known web crawler, identified by its user agent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrawlerRecord {
    pub company: String,
    pub user_agent: String,
    #[serde(rename = "type", default)]
    pub kind: CrawlerType,
    #[serde(default)]
    pub notes: String,
}

impl CrawlerRecord {
    /// A crawler added by hand rather than coming from the bundled list.
    pub fn custom(user_agent: &str, company: Option<&str>, kind: CrawlerType) -> Self {
        let company = company
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .unwrap_or("Custom");
        Self {
            company: company.to_string(),
            user_agent: user_agent.trim().to_string(),
            kind,
            notes: String::from("Custom added"),
        }
    }
}

/// Parses a `Company,User-Agent,Type,notes` table.
///
/// Header names are matched case-insensitively and fields are split on bare
/// commas, quotes have no special meaning. Rows without a user agent are
/// dropped.
pub fn parse_crawler_csv(text: &str) -> csv::Result<Vec<CrawlerRecord>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .quoting(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(text.trim().as_bytes());

    let headers = rdr
        .headers()?
        .iter()
        .map(str::to_lowercase)
        .collect::<Vec<_>>();
    let column = |name: &str| headers.iter().position(|h| h == name);
    let company = column("company");
    let user_agent = column("user-agent");
    let kind = column("type");
    let notes = column("notes");

    let mut crawlers = vec![];
    for record in rdr.records() {
        let record = record?;
        let field = |idx: Option<usize>| {
            idx.and_then(|i| record.get(i))
                .unwrap_or_default()
                .to_string()
        };

        let user_agent = field(user_agent);
        if user_agent.is_empty() {
            continue;
        }

        crawlers.push(CrawlerRecord {
            company: field(company),
            user_agent,
            kind: CrawlerType::from(field(kind).as_str()),
            notes: field(notes),
        });
    }

    Ok(crawlers)
}

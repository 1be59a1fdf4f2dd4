use std::collections::HashMap;
use std::time::Duration;

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime};
use reqwest::{Client, StatusCode, Url};
use serde_json::Value;
use tokio::sync::RwLock;
use tracing::debug;
use yfin_types::{
    HistoryRequest,
    HistoryWindow,
    IndustryOverview,
    NewsItem,
    PriceBar,
    RankedEntity,
    SearchResults,
    Sector,
    SectorOverview,
    TickerInfo,
};

use super::{MarketDataProvider, ProviderError, ProviderFuture, ProviderResult};

pub const DEFAULT_QUERY_BASE_URL: &str = "https://query2.finance.yahoo.com";
pub const DEFAULT_COOKIE_URL: &str = "https://fc.yahoo.com";
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64; rv:128.0) Gecko/20100101 Firefox/128.0";

const DEFAULT_PRICE_HINT: i32 = 2;
const QUOTE_SUMMARY_MODULES: &str = "assetProfile,summaryProfile,summaryDetail,\
defaultKeyStatistics,financialData,quoteType,price,calendarEvents";

/// Connection settings for the Yahoo Finance provider.
#[derive(Debug, Clone)]
pub struct YahooConfig {
    pub base_url: String,
    pub cookie_url: String,
    pub user_agent: String,
    pub timeout: Duration,
    pub news_count: usize,
    pub search_count: usize,
}

impl YahooConfig {
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            cookie_url: DEFAULT_COOKIE_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: Duration::from_secs(30),
            news_count: 10,
            search_count: 8,
        }
    }

    #[must_use]
    pub fn with_cookie_url(mut self, cookie_url: impl Into<String>) -> Self {
        self.cookie_url = cookie_url.into();
        self
    }

    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    #[must_use]
    pub const fn with_news_count(mut self, news_count: usize) -> Self {
        self.news_count = news_count;
        self
    }
}

impl Default for YahooConfig {
    fn default() -> Self {
        Self::new(DEFAULT_QUERY_BASE_URL)
    }
}

/// Yahoo Finance provider over the public query endpoints.
///
/// Endpoints that need a session crumb fetch one lazily and keep it until the
/// provider rejects it.
pub struct YahooProvider {
    client: Client,
    base_url: Url,
    config: YahooConfig,
    crumb: RwLock<Option<String>>,
}

impl YahooProvider {
    /// Builds the provider and its HTTP client.
    ///
    /// # Errors
    /// Returns `ProviderError` if the base URL is invalid or the client cannot be built.
    pub fn new(config: YahooConfig) -> ProviderResult<Self> {
        let base_url = Url::parse(&config.base_url).map_err(|err| {
            ProviderError::InvalidRequest(format!("invalid base url {}: {err}", config.base_url))
        })?;
        if base_url.cannot_be_a_base() {
            return Err(ProviderError::InvalidRequest(format!(
                "base url cannot carry a path: {base_url}"
            )));
        }
        let client = Client::builder()
            .cookie_store(true)
            .user_agent(config.user_agent.clone())
            .timeout(config.timeout)
            .build()?;
        Ok(Self {
            client,
            base_url,
            config,
            crumb: RwLock::new(None),
        })
    }

    #[must_use]
    pub const fn config(&self) -> &YahooConfig {
        &self.config
    }

    fn endpoint(&self, segments: &[&str]) -> ProviderResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| {
                ProviderError::InvalidRequest(format!(
                    "base url cannot carry a path: {}",
                    self.base_url
                ))
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn crumb(&self) -> ProviderResult<String> {
        if let Some(crumb) = self.crumb.read().await.as_ref() {
            return Ok(crumb.clone());
        }

        let mut slot = self.crumb.write().await;
        if let Some(crumb) = slot.as_ref() {
            return Ok(crumb.clone());
        }

        debug!("requesting provider session crumb");
        // The cookie endpoint answers with an error status but still sets the session cookie.
        self.client
            .get(self.config.cookie_url.as_str())
            .send()
            .await?;

        let url = self.endpoint(&["v1", "test", "getcrumb"])?;
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ProviderError::Auth(format!(
                "crumb request returned status {status}"
            )));
        }
        let crumb = parse_crumb(&response.text().await?)?;
        *slot = Some(crumb.clone());
        Ok(crumb)
    }

    async fn get_json(
        &self,
        url: Url,
        query: &[(&str, String)],
        authenticated: bool,
    ) -> ProviderResult<Value> {
        let mut request = self.client.get(url.clone()).query(query);
        if authenticated {
            let crumb = self.crumb().await?;
            request = request.query(&[("crumb", crumb)]);
        }

        debug!(%url, "provider request");
        let response = request.send().await?;
        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            self.crumb.write().await.take();
            return Err(ProviderError::Auth(format!("{url} returned status {status}")));
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let payload = serde_json::from_str::<Value>(&body).ok();
            if status.is_client_error()
                && let Some(message) = payload.as_ref().and_then(chart_error)
            {
                return Err(ProviderError::NoData(message));
            }
            let reported = payload.as_ref().and_then(upstream_error);
            return Err(reported.map_or_else(
                || ProviderError::Status {
                    status: status.as_u16(),
                    url: url.to_string(),
                },
                ProviderError::Upstream,
            ));
        }
        Ok(response.json::<Value>().await?)
    }

    fn search_query(&self, query: &str, quotes: usize, news: usize) -> Vec<(&'static str, String)> {
        vec![
            ("q", query.to_string()),
            ("quotesCount", quotes.to_string()),
            ("newsCount", news.to_string()),
            ("listsCount", self.config.search_count.to_string()),
            ("enableFuzzyQuery", "false".to_string()),
            ("quotesQueryId", "tss_match_phrase_query".to_string()),
            ("newsQueryId", "news_cie_vespa".to_string()),
            ("enableCb", "true".to_string()),
            ("enableNavLinks", "true".to_string()),
            ("enableResearchReports", "true".to_string()),
        ]
    }
}

impl MarketDataProvider for YahooProvider {
    fn ticker_info<'a>(&'a self, symbol: &'a str) -> ProviderFuture<'a, TickerInfo> {
        Box::pin(async move {
            let url = self.endpoint(&["v10", "finance", "quoteSummary", symbol])?;
            let query = [
                ("modules", QUOTE_SUMMARY_MODULES.to_string()),
                ("formatted", "false".to_string()),
                ("corsDomain", "finance.yahoo.com".to_string()),
            ];
            let payload = self.get_json(url, &query, true).await?;
            parse_quote_summary(symbol, &payload)
        })
    }

    fn ticker_news<'a>(&'a self, symbol: &'a str) -> ProviderFuture<'a, Vec<NewsItem>> {
        Box::pin(async move {
            let url = self.endpoint(&["v1", "finance", "search"])?;
            let query = self.search_query(symbol, 0, self.config.news_count);
            let payload = self.get_json(url, &query, false).await?;
            Ok(parse_news(&payload))
        })
    }

    fn search<'a>(&'a self, query: &'a str) -> ProviderFuture<'a, SearchResults> {
        Box::pin(async move {
            let url = self.endpoint(&["v1", "finance", "search"])?;
            let count = self.config.search_count;
            let params = self.search_query(query, count, count);
            let payload = self.get_json(url, &params, false).await?;
            if let Some(message) = upstream_error(&payload) {
                return Err(ProviderError::Upstream(message));
            }
            Ok(parse_search(&payload))
        })
    }

    fn sector(&self, sector: Sector) -> ProviderFuture<'_, SectorOverview> {
        Box::pin(async move {
            let key = sector.as_str();
            let url = self.endpoint(&["v1", "finance", "sectors", key])?;
            let payload = self.get_json(url, &overview_query(), true).await?;
            parse_sector(key, &payload)
        })
    }

    fn industry<'a>(&'a self, industry: &'a str) -> ProviderFuture<'a, IndustryOverview> {
        Box::pin(async move {
            let url = self.endpoint(&["v1", "finance", "industries", industry])?;
            let payload = self.get_json(url, &overview_query(), true).await?;
            parse_industry(industry, &payload)
        })
    }

    fn history<'a>(&'a self, request: &'a HistoryRequest) -> ProviderFuture<'a, Vec<PriceBar>> {
        Box::pin(async move {
            let url = self.endpoint(&["v8", "finance", "chart", request.symbol.as_str()])?;
            let payload = self.get_json(url, &chart_query(request), false).await?;
            parse_chart(&payload)
        })
    }
}

fn overview_query() -> Vec<(&'static str, String)> {
    vec![
        ("formatted", "true".to_string()),
        ("withReturns", "true".to_string()),
        ("lang", "en-US".to_string()),
        ("region", "US".to_string()),
    ]
}

fn chart_query(request: &HistoryRequest) -> Vec<(&'static str, String)> {
    let mut query = vec![
        ("interval", request.interval.as_str().to_string()),
        ("includePrePost", "false".to_string()),
        ("events", "div,splits".to_string()),
    ];
    match request.window {
        HistoryWindow::Period(period) => query.push(("range", period.as_str().to_string())),
        HistoryWindow::Range { start, end } => {
            query.push(("period1", midnight_utc(start).to_string()));
            query.push(("period2", midnight_utc(end).to_string()));
        }
    }
    query
}

fn midnight_utc(date: NaiveDate) -> i64 {
    date.and_time(NaiveTime::MIN).and_utc().timestamp()
}

fn parse_crumb(body: &str) -> ProviderResult<String> {
    let crumb = body.trim();
    if crumb.is_empty()
        || crumb.len() > 100
        || crumb.contains('<')
        || crumb.chars().any(char::is_whitespace)
    {
        return Err(ProviderError::Auth("unexpected crumb payload".to_string()));
    }
    Ok(crumb.to_string())
}

/// Extracts the error description Yahoo embeds in its response envelopes.
fn upstream_error(payload: &Value) -> Option<String> {
    ["chart", "quoteSummary", "finance"].iter().find_map(|root| {
        let error = payload.get(*root)?.get("error")?;
        if error.is_null() {
            return None;
        }
        Some(
            error
                .get("description")
                .and_then(Value::as_str)
                .map_or_else(|| error.to_string(), str::to_string),
        )
    })
}

/// Description of a `chart.error` envelope, if the payload carries one.
fn chart_error(payload: &Value) -> Option<String> {
    let error = payload.pointer("/chart/error").filter(|error| !error.is_null())?;
    Some(
        error
            .get("description")
            .and_then(Value::as_str)
            .map_or_else(|| error.to_string(), str::to_string),
    )
}

fn unwrap_raw(value: &Value) -> Value {
    match value {
        Value::Object(fields) => fields.get("raw").cloned().unwrap_or_else(|| value.clone()),
        _ => value.clone(),
    }
}

fn number(entry: &Value, key: &str) -> Option<f64> {
    entry.get(key).map(unwrap_raw).and_then(|value| value.as_f64())
}

fn text(entry: &Value, key: &str) -> Option<String> {
    entry.get(key).and_then(Value::as_str).map(str::to_string)
}

fn array(payload: &Value, key: &str) -> Vec<Value> {
    payload
        .get(key)
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default()
}

/// Flattens the quote summary modules into one ticker record.
fn parse_quote_summary(symbol: &str, payload: &Value) -> ProviderResult<TickerInfo> {
    if let Some(message) = upstream_error(payload) {
        return Err(ProviderError::Upstream(message));
    }
    let modules = payload
        .pointer("/quoteSummary/result/0")
        .and_then(Value::as_object)
        .ok_or_else(|| {
            ProviderError::Upstream(format!("no quote summary available for {symbol}"))
        })?;

    let mut info = TickerInfo::new();
    for module in modules.values() {
        let Some(fields) = module.as_object() else {
            continue;
        };
        for (key, value) in fields {
            if key == "maxAge" {
                continue;
            }
            info.insert(key.clone(), unwrap_raw(value));
        }
    }
    Ok(info)
}

fn parse_news(payload: &Value) -> Vec<NewsItem> {
    array(payload, "news")
        .iter()
        .filter_map(|item| {
            Some(NewsItem {
                title: text(item, "title")?,
                publisher: text(item, "publisher"),
                link: text(item, "link"),
                published_at: item.get("providerPublishTime").and_then(Value::as_i64),
                summary: text(item, "summary"),
                related_tickers: item
                    .get("relatedTickers")
                    .and_then(Value::as_array)
                    .map(|tickers| {
                        tickers
                            .iter()
                            .filter_map(Value::as_str)
                            .map(str::to_string)
                            .collect()
                    })
                    .unwrap_or_default(),
            })
        })
        .collect()
}

fn parse_search(payload: &Value) -> SearchResults {
    SearchResults {
        quotes: array(payload, "quotes"),
        news: array(payload, "news"),
        lists: array(payload, "lists"),
        research: array(payload, "researchReports"),
        nav: array(payload, "nav"),
    }
}

fn parse_entity(entry: &Value) -> Option<RankedEntity> {
    let symbol = entry.get("symbol")?.as_str()?;
    Some(RankedEntity {
        rating: text(entry, "rating"),
        market_weight: number(entry, "marketWeight"),
        ytd_return: number(entry, "ytdReturn"),
        growth_estimate: number(entry, "growthEstimate"),
        last_price: number(entry, "lastPrice"),
        target_price: number(entry, "targetPrice"),
        ..RankedEntity::new(symbol, text(entry, "name"))
    })
}

/// `None` when the table is missing or null in the payload.
fn parse_entities(list: Option<&Value>) -> Option<Vec<RankedEntity>> {
    let entries = list?.as_array()?;
    Some(entries.iter().filter_map(parse_entity).collect())
}

fn overview_data<'v>(kind: &str, key: &str, payload: &'v Value) -> ProviderResult<&'v Value> {
    if let Some(message) = upstream_error(payload) {
        return Err(ProviderError::Upstream(message));
    }
    payload
        .get("data")
        .filter(|data| data.is_object())
        .ok_or_else(|| ProviderError::Decode(format!("{kind} payload for {key} has no data")))
}

fn parse_sector(key: &str, payload: &Value) -> ProviderResult<SectorOverview> {
    let data = overview_data("sector", key, payload)?;
    Ok(SectorOverview {
        key: key.to_string(),
        name: text(data, "name"),
        top_etfs: parse_entities(data.get("topETFs")).unwrap_or_default(),
        top_mutual_funds: parse_entities(data.get("topMutualFunds")).unwrap_or_default(),
        top_companies: parse_entities(data.get("topCompanies")),
    })
}

fn parse_industry(key: &str, payload: &Value) -> ProviderResult<IndustryOverview> {
    let data = overview_data("industry", key, payload)?;
    Ok(IndustryOverview {
        key: key.to_string(),
        name: text(data, "name"),
        top_growth_companies: parse_entities(data.get("topGrowthCompanies")),
        top_performing_companies: parse_entities(data.get("topPerformingCompanies")),
    })
}

fn series<'v>(quote: Option<&'v Value>, name: &str) -> &'v [Value] {
    quote
        .and_then(|quote| quote.get(name))
        .and_then(Value::as_array)
        .map_or(&[], Vec::as_slice)
}

fn value_at(values: &[Value], index: usize) -> Option<f64> {
    values.get(index).and_then(Value::as_f64)
}

fn round_price(value: f64, price_hint: i32) -> f64 {
    let scale = 10_f64.powi(price_hint);
    (value * scale).round() / scale
}

/// Some charts report volume as a float. Negative and non-finite values become zero.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn float_volume(value: f64) -> u64 {
    if value.is_finite() && value > 0.0 {
        value.round() as u64
    } else {
        0
    }
}

fn events_by_date(
    events: Option<&Value>,
    offset: FixedOffset,
    amount: impl Fn(&Value) -> Option<f64>,
) -> HashMap<NaiveDate, f64> {
    let mut by_date = HashMap::new();
    let Some(events) = events.and_then(Value::as_object) else {
        return by_date;
    };
    for event in events.values() {
        let Some(moment) = event
            .get("date")
            .and_then(Value::as_i64)
            .and_then(|ts| DateTime::from_timestamp(ts, 0))
        else {
            continue;
        };
        if let Some(value) = amount(event) {
            by_date.insert(moment.with_timezone(&offset).date_naive(), value);
        }
    }
    by_date
}

/// Converts a chart payload into bars ordered by time.
///
/// Rows without a complete set of prices are dropped. Dividends and splits
/// land on the first bar of their calendar day.
fn parse_chart(payload: &Value) -> ProviderResult<Vec<PriceBar>> {
    if let Some(message) = chart_error(payload) {
        let not_found = payload
            .pointer("/chart/error/code")
            .and_then(Value::as_str)
            .is_some_and(|code| code.eq_ignore_ascii_case("Not Found"));
        return Err(if not_found {
            ProviderError::NoData(message)
        } else {
            ProviderError::Upstream(message)
        });
    }
    let result = payload
        .pointer("/chart/result/0")
        .ok_or_else(|| ProviderError::Decode("chart payload has no result".to_string()))?;

    let meta = result.get("meta");
    let gmtoffset = meta
        .and_then(|meta| meta.get("gmtoffset"))
        .and_then(Value::as_i64)
        .unwrap_or(0);
    let offset = i32::try_from(gmtoffset)
        .ok()
        .and_then(FixedOffset::east_opt)
        .ok_or_else(|| ProviderError::Decode(format!("invalid gmtoffset {gmtoffset}")))?;
    let price_hint = meta
        .and_then(|meta| meta.get("priceHint"))
        .and_then(Value::as_i64)
        .and_then(|hint| i32::try_from(hint).ok())
        .unwrap_or(DEFAULT_PRICE_HINT);

    let Some(timestamps) = result.get("timestamp").and_then(Value::as_array) else {
        return Ok(Vec::new());
    };

    let quote = result.pointer("/indicators/quote/0");
    let opens = series(quote, "open");
    let highs = series(quote, "high");
    let lows = series(quote, "low");
    let closes = series(quote, "close");
    let volumes = series(quote, "volume");

    let mut dividends = events_by_date(result.pointer("/events/dividends"), offset, |event| {
        event.get("amount").and_then(Value::as_f64)
    });
    let mut splits = events_by_date(result.pointer("/events/splits"), offset, |event| {
        let numerator = event.get("numerator")?.as_f64()?;
        let denominator = event.get("denominator")?.as_f64()?;
        (denominator != 0.0).then(|| numerator / denominator)
    });

    let mut bars = Vec::with_capacity(timestamps.len());
    for (index, ts) in timestamps.iter().enumerate() {
        let Some(ts) = ts.as_i64() else {
            continue;
        };
        let (Some(open), Some(high), Some(low), Some(close)) = (
            value_at(opens, index),
            value_at(highs, index),
            value_at(lows, index),
            value_at(closes, index),
        ) else {
            continue;
        };
        let timestamp = DateTime::from_timestamp(ts, 0)
            .ok_or_else(|| ProviderError::Decode(format!("timestamp out of range: {ts}")))?
            .with_timezone(&offset);
        let day = timestamp.date_naive();
        let volume = volumes
            .get(index)
            .and_then(|volume| volume.as_u64().or_else(|| volume.as_f64().map(float_volume)))
            .unwrap_or(0);

        bars.push(PriceBar {
            timestamp,
            open: round_price(open, price_hint),
            high: round_price(high, price_hint),
            low: round_price(low, price_hint),
            close: round_price(close, price_hint),
            volume,
            dividends: dividends.remove(&day).unwrap_or(0.0),
            stock_splits: splits.remove(&day).unwrap_or(0.0),
        });
    }
    bars.sort_by_key(|bar| bar.timestamp);
    Ok(bars)
}

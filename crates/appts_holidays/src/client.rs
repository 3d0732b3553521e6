// --- File: crates/appts_holidays/src/client.rs ---
use std::sync::Arc;

use appts_booking::{CalendarDay, HolidayError, HolidayOracle, RequestContext};
use appts_common::{create_client, BoxFuture};
use appts_config::HolidaysConfig;
use moka::future::Cache;
use reqwest::{Client, StatusCode, Url};
use tracing::{debug, warn};

use crate::error::HolidayApiError;
use crate::models::PublicHoliday;

// Years of holiday lists kept when caching is enabled
const YEAR_CACHE_CAPACITY: u64 = 8;

/// Client for the Nager.Date public holiday API.
#[derive(Debug, Clone)]
pub struct NagerHolidayClient {
    client: Client,
    base_url: String,
    country_code: String,
    years: Option<Cache<i32, Arc<Vec<PublicHoliday>>>>,
}

impl NagerHolidayClient {
    /// Builds a client from the `[holidays]` section.
    ///
    /// With `cache_enabled` each year's list is fetched once per process.
    pub fn new(config: &HolidaysConfig) -> Result<Self, HolidayApiError> {
        let client = create_client(config.timeout_secs, true)?;
        let nager = Self::with_client(client, &config.base_url, &config.country_code)?;
        Ok(if config.cache_enabled {
            nager.with_year_cache(YEAR_CACHE_CAPACITY)
        } else {
            nager
        })
    }

    /// Builds a client around an existing `reqwest::Client`.
    pub fn with_client(
        client: Client,
        base_url: &str,
        country_code: &str,
    ) -> Result<Self, HolidayApiError> {
        let base_url = base_url.trim_end_matches('/');
        Url::parse(base_url).map_err(|_| HolidayApiError::InvalidBaseUrl(base_url.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.to_string(),
            country_code: country_code.to_uppercase(),
            years: None,
        })
    }

    /// Keeps up to `capacity` yearly lists; concurrent fetches of one year
    /// share a single request. Failed fetches are not kept.
    pub fn with_year_cache(mut self, capacity: u64) -> Self {
        self.years = Some(Cache::new(capacity));
        self
    }

    pub fn country_code(&self) -> &str {
        &self.country_code
    }

    fn holidays_url(&self, year: i32) -> String {
        format!(
            "{}/api/v3/PublicHolidays/{}/{}",
            self.base_url, year, self.country_code
        )
    }

    /// Fetches every public holiday of `year`.
    ///
    /// Any status other than 200 is an error, including 204 for unknown
    /// country codes.
    pub async fn public_holidays(&self, year: i32) -> Result<Vec<PublicHoliday>, HolidayApiError> {
        let url = self.holidays_url(year);
        debug!("Fetching public holidays from {}", url);

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if status != StatusCode::OK {
            warn!(%status, year, country = %self.country_code, "holiday API returned an error status");
            return Err(HolidayApiError::UnexpectedStatus(status.as_u16()));
        }

        let body = response.text().await?;
        let holidays: Vec<PublicHoliday> = serde_json::from_str(&body)?;
        debug!(year, count = holidays.len(), "public holidays received");
        Ok(holidays)
    }

    async fn holidays_of(&self, year: i32) -> Result<Arc<Vec<PublicHoliday>>, HolidayError> {
        let fetch = async { self.public_holidays(year).await.map(Arc::new) };
        let fetched = match &self.years {
            Some(years) => years.try_get_with(year, fetch).await,
            None => fetch.await.map_err(Arc::new),
        };
        fetched.map_err(|source| HolidayError::Lookup {
            region: self.country_code.clone(),
            source,
        })
    }
}

impl HolidayOracle for NagerHolidayClient {
    fn region(&self) -> &str {
        &self.country_code
    }

    fn is_holiday<'a>(
        &'a self,
        ctx: &'a RequestContext,
        day: CalendarDay,
    ) -> BoxFuture<'a, bool, HolidayError> {
        Box::pin(async move {
            match ctx.run(self.holidays_of(day.year())).await {
                Ok(Ok(holidays)) => {
                    let matched = holidays.iter().find(|holiday| holiday.date == day);
                    if let Some(holiday) = matched {
                        debug!(%day, name = ?holiday.name, "day is a public holiday");
                    }
                    Ok(matched.is_some())
                }
                Ok(Err(err)) => Err(err),
                Err(_) => Err(HolidayError::Interrupted),
            }
        })
    }
}

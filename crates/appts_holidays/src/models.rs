use appts_booking::CalendarDay;
use serde::{Deserialize, Serialize};

/// One entry of the `PublicHolidays` response.
///
/// Only `date` is required; the remaining fields are kept for logging.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicHoliday {
    pub date: CalendarDay,
    #[serde(default)]
    pub local_name: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub country_code: Option<String>,
    #[serde(default)]
    pub global: Option<bool>,
    #[serde(default)]
    pub counties: Option<Vec<String>>,
}

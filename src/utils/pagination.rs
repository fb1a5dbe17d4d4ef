use serde::{Deserialize, Deserializer, Serialize};
use utoipa::{IntoParams, ToSchema};

fn deserialize_optional_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    match s {
        Some(s) if s.is_empty() => Ok(None),
        Some(s) => s.parse::<i64>().map(Some).map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PaginationMeta {
    pub total: i64,
    pub limit: i64,
    pub offset: i64,
    pub has_more: bool,
}

/// Limit/offset query parameters.
///
/// Values arrive as strings so that empty query fragments (`?limit=`)
/// fall back to defaults instead of rejecting the request.
#[derive(Debug, Deserialize, ToSchema, IntoParams)]
pub struct PaginationParams {
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub limit: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub offset: Option<i64>,
}

impl Default for PaginationParams {
    fn default() -> Self {
        Self {
            limit: Some(10),
            offset: Some(0),
        }
    }
}

impl PaginationParams {
    pub fn limit(&self) -> i64 {
        self.limit.unwrap_or(10).clamp(1, 100)
    }

    pub fn offset(&self) -> i64 {
        self.offset.unwrap_or(0).max(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let params = PaginationParams::default();
        assert_eq!(params.limit(), 10);
        assert_eq!(params.offset(), 0);
    }

    #[test]
    fn limit_is_clamped() {
        for (input, expected) in [(0, 1), (-10, 1), (100, 100), (150, 100), (25, 25)] {
            let params = PaginationParams {
                limit: Some(input),
                offset: Some(0),
            };
            assert_eq!(params.limit(), expected);
        }
    }

    #[test]
    fn negative_offset_is_floored() {
        let params = PaginationParams {
            limit: Some(10),
            offset: Some(-5),
        };
        assert_eq!(params.offset(), 0);
    }

    #[test]
    fn deserializes_string_values() {
        let params: PaginationParams =
            serde_json::from_str(r#"{"limit":"25","offset":"50"}"#).unwrap();
        assert_eq!(params.limit(), 25);
        assert_eq!(params.offset(), 50);
    }

    #[test]
    fn empty_strings_fall_back_to_defaults() {
        let params: PaginationParams = serde_json::from_str(r#"{"limit":"","offset":""}"#).unwrap();
        assert_eq!(params.limit(), 10);
        assert_eq!(params.offset(), 0);
    }
}

use serde::{Deserialize, Serialize};

/// Sort mode selecting one of the two pagination strategies
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortMode {
    #[default]
    Time,
    Price,
}

impl SortMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortMode::Time => "time",
            SortMode::Price => "price",
        }
    }

    pub fn toggled(&self) -> SortMode {
        match self {
            SortMode::Time => SortMode::Price,
            SortMode::Price => SortMode::Time,
        }
    }
}

/// A redeemable share-code record as served by the API.
///
/// Records are never mutated client-side; the `used` flag only changes
/// through a full refetch after a redeem.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ShareCode {
    pub code: String,
    pub price: f64,
    /// Creation time in unix seconds
    pub create_time: i64,
    /// 0 = available, anything else = redeemed
    pub used: u8,
}

impl ShareCode {
    pub fn is_used(&self) -> bool {
        self.used != 0
    }
}

/// Body of the create endpoint
#[derive(Clone, Debug, Serialize)]
pub struct CreateShareCode {
    pub code: String,
    pub price: f64,
}

/// The `{code, msg, data}` wrapper every endpoint responds with.
///
/// `data` is optional: failure envelopes routinely omit it.
#[derive(Clone, Debug, Deserialize)]
pub struct Envelope<T> {
    pub code: i64,
    #[serde(default)]
    pub msg: String,
    #[serde(default)]
    pub data: Option<T>,
}

impl<T> Envelope<T> {
    /// The API signals success with either 200 or 0
    pub fn is_success(&self) -> bool {
        self.code == 200 || self.code == 0
    }

    /// Server-supplied message, or `fallback` when the envelope carries none
    pub fn message_or(&self, fallback: &str) -> String {
        if self.msg.is_empty() {
            fallback.to_string()
        } else {
            self.msg.clone()
        }
    }
}

/// A server-provided page of records
#[derive(Clone, Debug, Default, Deserialize)]
pub struct PageData<T> {
    #[serde(default)]
    pub data: Vec<T>,
    pub total: u64,
    pub page: u32,
    #[serde(rename = "pageSize")]
    pub page_size: u32,
    #[serde(rename = "totalPages")]
    pub total_pages: u32,
}

pub type PageEnvelope = Envelope<PageData<ShareCode>>;
pub type ListEnvelope = Envelope<Vec<ShareCode>>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_codes_are_200_and_0() {
        let ok200: Envelope<()> = Envelope { code: 200, msg: String::new(), data: None };
        let ok0: Envelope<()> = Envelope { code: 0, msg: String::new(), data: None };
        let err: Envelope<()> = Envelope { code: 500, msg: "boom".into(), data: None };
        assert!(ok200.is_success());
        assert!(ok0.is_success());
        assert!(!err.is_success());
    }

    #[test]
    fn message_falls_back_when_empty() {
        let err: Envelope<()> = Envelope { code: 400, msg: String::new(), data: None };
        assert_eq!(err.message_or("request rejected"), "request rejected");

        let err: Envelope<()> = Envelope { code: 400, msg: "duplicate code".into(), data: None };
        assert_eq!(err.message_or("request rejected"), "duplicate code");
    }

    #[test]
    fn page_envelope_deserializes_camel_case() {
        let json = r#"{
            "code": 0,
            "msg": "",
            "data": {
                "data": [{"code": "ABC123", "price": 9.9, "create_time": 1700000000, "used": 0}],
                "total": 45,
                "page": 1,
                "pageSize": 20,
                "totalPages": 3
            }
        }"#;
        let envelope: PageEnvelope = serde_json::from_str(json).unwrap();
        assert!(envelope.is_success());
        let page = envelope.data.unwrap();
        assert_eq!(page.data.len(), 1);
        assert_eq!(page.page_size, 20);
        assert_eq!(page.total_pages, 3);
        assert!(!page.data[0].is_used());
    }

    #[test]
    fn failure_envelope_without_data_deserializes() {
        let json = r#"{"code": 500, "msg": "internal error"}"#;
        let envelope: PageEnvelope = serde_json::from_str(json).unwrap();
        assert!(!envelope.is_success());
        assert!(envelope.data.is_none());
        assert_eq!(envelope.msg, "internal error");
    }

    #[test]
    fn sort_mode_round_trip() {
        assert_eq!(SortMode::Time.as_str(), "time");
        assert_eq!(SortMode::Price.as_str(), "price");
        assert_eq!(SortMode::Time.toggled(), SortMode::Price);
        assert_eq!(SortMode::Price.toggled(), SortMode::Time);
    }
}

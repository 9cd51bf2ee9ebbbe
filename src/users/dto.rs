use serde::{de, Deserialize, Deserializer};

#[derive(Debug, Deserialize)]
pub struct UpdateCountryAndLocationRequest {
    #[serde(rename = "userID", deserialize_with = "number_or_numeric_string")]
    pub user_id: i64,
    pub country: String,
    pub location: String,
}

/// Clients send `userID` either as a JSON number or as a decimal string.
fn number_or_numeric_string<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Number(i64),
        Text(String),
    }

    match RawId::deserialize(deserializer)? {
        RawId::Number(id) => Ok(id),
        RawId::Text(text) => text
            .parse()
            .map_err(|_| de::Error::custom(format!("userID is not a number: {text:?}"))),
    }
}

#[derive(Debug, Deserialize)]
pub struct UsersInLocationRequest {
    pub location: String,
    #[serde(default)]
    pub page: i64,
}

#[derive(Debug, Deserialize)]
pub struct DeleteUserRequest {
    pub email: String,
}

#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    pub query: String,
    #[serde(default)]
    pub location: Option<String>,
}

impl SearchRequest {
    /// The location filter, with a blank location meaning "everywhere".
    pub fn location_filter(&self) -> Option<&str> {
        self.location.as_deref().filter(|l| !l.is_empty())
    }
}

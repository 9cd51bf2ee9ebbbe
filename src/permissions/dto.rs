use serde::Deserialize;

/// Body shared by the `/alter-*` routes; each route reads only its own flag.
#[derive(Debug, Deserialize)]
pub struct AlterPermissionsRequest {
    pub email: String,
    #[serde(default)]
    pub user_deactivated: bool,
    #[serde(default)]
    pub banned_from_commenting: bool,
    #[serde(default)]
    pub banned_from_posting: bool,
    #[serde(default)]
    pub banned_from_analytix: bool,
}

#[derive(Debug, Deserialize)]
pub struct CheckPermissionsRequest {
    pub email: String,
}

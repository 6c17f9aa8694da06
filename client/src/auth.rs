//! Login assertion fetch.

use anyhow::{Result, anyhow};

const LOGIN_URL: &str = "https://play.pokemonshowdown.com/api/login";

/// Fetch the signed assertion needed for a trusted login.
///
/// The login endpoint answers with a `]`-prefixed JSON object. An
/// assertion starting with `;;` is an error message, not a credential.
pub async fn get_assertion(username: &str, password: &str, challstr: &str) -> Result<String> {
    let client = reqwest::Client::new();

    let params = [
        ("name", username),
        ("pass", password),
        ("challstr", challstr),
    ];

    let response = client.post(LOGIN_URL).query(&params).send().await?;
    let text = response.text().await?;

    let json_str = text.trim_start_matches(']');
    let json: serde_json::Value = serde_json::from_str(json_str)?;

    match json.get("assertion").and_then(|v| v.as_str()) {
        Some(assertion) if assertion.starts_with(";;") => {
            Err(anyhow!("login failed: {}", &assertion[2..]))
        }
        Some(assertion) => Ok(assertion.to_string()),
        None => Err(anyhow!("login response missing assertion")),
    }
}

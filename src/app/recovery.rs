#[must_use]
pub fn get_suggestions(msg: &str) -> Vec<String> {
    let mut suggestions = Vec::new();
    let msg_lower = msg.to_lowercase();

    if msg_lower.contains("request failed")
        || msg_lower.contains("connection refused")
        || msg_lower.contains("error sending request")
    {
        suggestions.push("Check that the automation backend is running (python App.py)".to_string());
        suggestions.push("Verify the backend URL with --url or base_url in config.toml".to_string());
    }

    if ["status: 500", "status: 502", "status: 503"]
        .iter()
        .any(|s| msg_lower.contains(s))
    {
        suggestions.push("The backend reported an internal error; check its log output".to_string());
    }

    if msg_lower.contains("unknown command") {
        suggestions.push("Press ? to list the commands the backend understands".to_string());
    }

    if msg_lower.contains("invalid response") {
        suggestions.push("The backend answered with an unexpected payload; check its version".to_string());
    }

    suggestions
}

use lazy_static::lazy_static;
use regex::Regex;

static LABEL_NAME_REGEX: &str = r#"^[A-Za-z0-9]([-A-Za-z0-9_.]*[A-Za-z0-9])?$"#;
static DNS_SUBDOMAIN_REGEX: &str = r#"^[a-z0-9]([-a-z0-9]*[a-z0-9])?(\.[a-z0-9]([-a-z0-9]*[a-z0-9])?)*$"#;

const MAX_NAME_LEN: usize = 63;
const MAX_PREFIX_LEN: usize = 253;

lazy_static! {
    static ref LABEL_NAME: Regex = Regex::new(LABEL_NAME_REGEX).unwrap();
    static ref DNS_SUBDOMAIN: Regex = Regex::new(DNS_SUBDOMAIN_REGEX).unwrap();
}

/// Checks a label key: an optional DNS subdomain prefix followed by `/`, then a name of at most 63 characters.
pub fn validate_key(key: &str) -> Result<(), String> {
    let (prefix, name) = match key.split_once('/') {
        Some((prefix, name)) => (Some(prefix), name),
        None => (None, key),
    };
    if let Some(prefix) = prefix {
        if prefix.is_empty() || prefix.len() > MAX_PREFIX_LEN || !DNS_SUBDOMAIN.is_match(prefix) {
            return Err(format!("invalid label key '{key}': prefix must be a DNS subdomain"));
        }
    }
    if name.is_empty() || name.len() > MAX_NAME_LEN || !LABEL_NAME.is_match(name) {
        return Err(format!(
            "invalid label key '{key}': name must be 1-{MAX_NAME_LEN} alphanumeric characters, '-', '_' or '.', starting and ending with an alphanumeric"
        ));
    }
    Ok(())
}

/// Checks a label value: empty, or at most 63 characters following the same rules as a key name.
pub fn validate_value(value: &str) -> Result<(), String> {
    if value.is_empty() {
        return Ok(());
    }
    if value.len() > MAX_NAME_LEN || !LABEL_NAME.is_match(value) {
        return Err(format!(
            "invalid label value '{value}': must be at most {MAX_NAME_LEN} alphanumeric characters, '-', '_' or '.', starting and ending with an alphanumeric"
        ));
    }
    Ok(())
}

pub fn validate_label(key: &str, value: &str) -> Result<(), String> {
    validate_key(key)?;
    validate_value(value)
}

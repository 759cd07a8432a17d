use crate::utils::error::{EtlError, Result};
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

/// 驗證遠端來源 URL：必須同時具備 scheme 與 host
pub fn validate_url(field_name: &str, url_str: &str) -> Result<Url> {
    if url_str.is_empty() {
        return Err(EtlError::ValidationError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    let url = Url::parse(url_str).map_err(|e| EtlError::ValidationError {
        field: field_name.to_string(),
        value: url_str.to_string(),
        reason: format!("URL was unable to be parsed properly: {}", e),
    })?;

    // 特殊 scheme 會自動補上 host，需確認原始字串真的帶有 `//` authority
    let has_authority = url_str
        .trim()
        .get(url.scheme().len()..)
        .is_some_and(|rest| rest.starts_with("://"));

    match url.host_str() {
        Some(host) if has_authority && !host.is_empty() => Ok(url),
        _ => Err(EtlError::ValidationError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL must contain a network location".to_string(),
        }),
    }
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(EtlError::ValidationError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(EtlError::ValidationError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}
